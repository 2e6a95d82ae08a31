//! Error types for the heat equation engine
//!
//! Only configuration defects are errors. A stability violation or a run
//! that hits the iteration ceiling still completes and is reported through
//! [`Termination`](crate::solver::Termination).

use thiserror::Error;

/// Result alias used throughout the crate
pub type HeatResult<T> = Result<T, HeatError>;

/// Configuration defects detected while building or running an engine
#[derive(Error, Debug)]
pub enum HeatError {
    /// A construction parameter is out of range
    #[error("invalid parameter {name} = {value}: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },

    /// The realized grid has fewer nodes than a stencil needs
    #[error("{scheme} needs at least {required} grid nodes, got {nodes}")]
    GridTooSmall {
        scheme: &'static str,
        nodes: usize,
        required: usize,
    },

    /// Banded LU factorization met a zero pivot (structurally singular matrix)
    #[error("zero pivot in row {row} of the tridiagonal matrix")]
    ZeroPivot { row: usize },

    /// A recognized descriptor ran out of arguments
    #[error("initial condition {descriptor:?}: missing argument #{position}")]
    MissingArgument { descriptor: String, position: usize },

    /// A descriptor argument is not a valid number
    #[error("initial condition {descriptor:?}: argument #{position} ({value:?}) is not a valid number")]
    InvalidArgument {
        descriptor: String,
        position: usize,
        value: String,
    },

    /// Output directory lifecycle failure
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}
