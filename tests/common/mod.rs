//! Common utilities for integration tests

#![allow(dead_code, unused_imports)]

pub mod test_helpers;

// Re-export commonly used items
pub use test_helpers::{
    assert_profile_close,
    linear_steady_state,
    reference_parameters,
    relative_error,
    run_scheme,
};
