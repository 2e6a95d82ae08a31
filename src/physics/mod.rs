//! Problem definition
//!
//! This module describes WHAT is solved: the transient heat equation
//!
//! ```text
//! ∂u/∂t = α·∂²u/∂x²,   x ∈ [0, L],   u(0,t) = bc0,   u(L,t) = bc1
//! ```
//!
//! on a uniform grid, starting from a descriptor-defined initial condition.
//!
//! # Core Concepts
//!
//! - **Parameters** ([`HeatParameters`]): construction parameters of a run
//! - **Grid** ([`Grid`]): node count and realized spacing derived from them
//! - **State** ([`HeatState`]): previous/current solution vectors
//! - **Initial condition** ([`InitialCondition`]): parsed descriptor that
//!   fills the previous-step vector once before integration
//!
//! The numerical schemes that advance the state live in [`crate::solver`].
//!
//! # Example
//!
//! ```rust
//! use heateq::physics::{Grid, HeatParameters, HeatState, InitialCondition};
//!
//! let params = HeatParameters::default();
//! let grid = Grid::new(&params).unwrap();
//! let mut state = HeatState::zeros(grid.nx);
//!
//! let ic: InitialCondition = params.initial_condition.parse().unwrap();
//! ic.apply(&mut state.previous, grid.dx);
//! assert!(state.previous.iter().all(|u| *u == 1.0));
//! ```

pub mod grid;
pub mod initial;
pub mod parameters;

pub use grid::{Grid, HeatState};
pub use initial::InitialCondition;
pub use parameters::{HeatParameters, DEFAULT_MAX_ITERATIONS, MAX_NODES};
