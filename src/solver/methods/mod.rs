//! Finite-difference time-stepping schemes
//!
//! This module contains the concrete implementations of the
//! [`Scheme`](crate::solver::Scheme) trait.
//!
//! # Available Schemes
//!
//! | Scheme | Type | Stencil | Stability |
//! |---|---|---|---|
//! | [`Ftcs`] | explicit | 3-point | `α·dt/dx² ≤ 1/2`, checked every step |
//! | [`Upwind15`] | explicit | 5-point (3-point next to the walls) | not checked |
//! | [`CrankNicolson`] | implicit | tridiagonal solve | unconditional |
//!
//! # Example
//!
//! ```rust
//! use heateq::physics::{Grid, HeatParameters, HeatState};
//! use heateq::solver::{Scheme, methods::Ftcs};
//!
//! let grid = Grid::new(&HeatParameters::default()).unwrap();
//! let scheme = Ftcs::new(&grid).unwrap();
//!
//! let mut state = HeatState::zeros(grid.nx);
//! state.previous.fill(1.0);
//! assert!(scheme.update(&mut state).is_advanced());
//! assert_eq!(state.current[0], grid.bc0);
//! ```
//!
//! # Design Philosophy
//!
//! Each scheme is built once per run from the [`Grid`](crate::physics::Grid)
//! and is immutable afterwards: coefficients (and the implicit scheme's
//! factored matrix) are computed at construction and reused every step.

mod crank_nicolson;
mod ftcs;
mod upwind15;

pub use crank_nicolson::CrankNicolson;
pub use ftcs::{Ftcs, FTCS_STABILITY_LIMIT};
pub use upwind15::{Upwind15, UPWIND15_MIN_NODES};
