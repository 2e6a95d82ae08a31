//! Numerical solvers
//!
//! This module turns a [`Grid`](crate::physics::Grid) and a
//! [`HeatState`](crate::physics::HeatState) into a finished run.
//!
//! # Core Concepts
//!
//! 1. **Scheme** (`Scheme` trait) - one finite-difference update
//!    - reads `previous`, writes `current`, forces the boundaries
//!    - reports a refused step as [`StepStatus::StabilityViolated`]
//!
//! 2. **Driver** (`HeatSolver`) - the time loop
//!    - applies the initial condition
//!    - computes the change metric, decides termination
//!    - reports to a [`SolverObserver`]
//!
//! 3. **Result** (`SimulationResult`) - what a run produced
//!    - final vector, realized `dx`, [`Termination`]
//!    - handed to a [`ResultSink`] for persistence
//!
//! # Module Organization
//!
//! - **`traits`**: `Scheme`, `SchemeKind`, observers, sinks, `Termination`,
//!   `SimulationResult`
//! - **`tridiagonal`**: banded matrix and LU used by the implicit scheme
//! - **`methods`**: `Ftcs`, `Upwind15`, `CrankNicolson`
//! - **`driver`**: `HeatSolver` and its `DriverPhase`
//! - **`sweep`**: independent runs over many cases
//!
//! # Quick Start Example
//!
//! ```rust
//! use heateq::physics::HeatParameters;
//! use heateq::solver::{HeatSolver, SchemeKind};
//!
//! let params = HeatParameters::default().with_max_time(0.5);
//! let mut solver = HeatSolver::new(params, SchemeKind::CrankNicolson).unwrap();
//!
//! let mut log = Vec::new();
//! let mut progress = |iteration: usize, change: f64| log.push((iteration, change));
//! let result = solver.run_with(&mut progress);
//!
//! assert_eq!(result.len(), 11);
//! assert_eq!(log[0].0, 0);
//! ```
//!
//! # Workflow Diagram
//!
//! ```text
//! ┌─────────────────┐
//! │ HeatParameters  │
//! └────────┬────────┘
//!          │
//! ┌────────▼────────┐     ┌──────────────────┐
//! │ Grid + State    │◄────│ InitialCondition │
//! └────────┬────────┘     └──────────────────┘
//!          │
//! ┌────────▼────────┐
//! │ HeatSolver      │ ──► SolverObserver (progress, snapshots)
//! │ (Scheme)        │
//! └────────┬────────┘
//!          │
//! ┌────────▼──────────┐
//! │ SimulationResult  │ ──► ResultSink (curve file, CSV, plot)
//! └───────────────────┘
//! ```

pub mod driver;
pub mod methods;
pub mod sweep;
pub mod traits;
pub mod tridiagonal;

pub use driver::{DriverPhase, HeatSolver};
pub use traits::{
    LogProgress, ResultSink, Scheme, SchemeKind, Silent, SimulationResult, SolverObserver, StepStatus,
    Termination,
};
pub use tridiagonal::{TridiagonalLu, TridiagonalMatrix};
