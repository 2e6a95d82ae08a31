//! heateq: 1-D transient heat equation engine
//!
//! Solves `∂u/∂t = α·∂²u/∂x²` on a rod of length `L` with fixed-temperature
//! (Dirichlet) ends, using one of three finite-difference schemes.
//!
//! # Architecture
//!
//! heateq is built on the same split as its modules:
//!
//! 1. **Separation of Problem and Numerics**
//!    - [`physics`] defines what is solved: parameters, grid, initial condition
//!    - [`solver`] defines how: schemes, the tridiagonal solver, the time loop
//!
//! 2. **Collaborators at the edges**
//!    - the engine never prints or writes files
//!    - progress, snapshots and the final vector go through observer and
//!      sink traits, implemented in [`output`]
//!
//! # Quick Start
//!
//! ```rust
//! use heateq::prelude::*;
//!
//! # fn main() -> Result<(), HeatError> {
//! // 1. Describe the problem: unit rod at 1 K, ends held at 0 K and 1 K
//! let params = HeatParameters::default()
//!     .with_alpha(0.2)
//!     .with_max_time(2.0)
//!     .with_initial_condition("const(1)");
//!
//! // 2. Pick a scheme and run
//! let mut solver = HeatSolver::new(params, SchemeKind::CrankNicolson)?;
//! let result = solver.run();
//!
//! // 3. Inspect the result
//! assert!(!result.termination.is_failure());
//! assert_eq!(result.len(), 11);
//! println!("{}: u(0.5) = {:.4}", result.scheme, result.values[5]);
//! # Ok(())
//! # }
//! ```
//!
//! # Modules
//!
//! - [`error`]: configuration defects
//! - [`physics`]: parameters, grid and initial conditions
//! - [`solver`]: schemes and the time-stepping driver
//! - [`output`]: curve/CSV export, plots, run directories

pub mod error;
pub mod output;
pub mod physics;
pub mod solver;

pub mod prelude {
    //! Convenient imports for common usage
    //!
    //! ```rust
    //! use heateq::prelude::*;
    //! ```
    pub use crate::error::{HeatError, HeatResult};
    pub use crate::physics::{Grid, HeatParameters, HeatState, InitialCondition};
    pub use crate::solver::{
        DriverPhase, HeatSolver, LogProgress, ResultSink, Scheme, SchemeKind, SimulationResult,
        SolverObserver, Termination,
    };
}
