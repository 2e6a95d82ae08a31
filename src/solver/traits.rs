//! Time-stepping scheme traits and run types
//!
//! # Design Philosophy
//!
//! - `Scheme` trait: one finite-difference update, `previous -> current`
//! - `SchemeKind` enum: the closed set of available schemes
//! - `SolverObserver` / `ResultSink`: the only seams through which a run
//!   talks to the outside world
//! - `Termination` / `SimulationResult`: how a run ended and what it produced

use std::collections::HashMap;
use std::error::Error;
use std::fmt;
use std::str::FromStr;

use nalgebra::DVector;

use crate::error::HeatResult;
use crate::physics::{Grid, HeatState};
use crate::solver::methods::{CrankNicolson, Ftcs, Upwind15};

// =================================================================================================
// Scheme
// =================================================================================================

/// Outcome of a single scheme update
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StepStatus {
    /// `current` holds the new solution
    Advanced,

    /// The update was refused and `current` is untouched
    StabilityViolated {
        /// Diffusion number that was checked
        ratio: f64,
        /// Largest stable value
        limit: f64,
    },
}

impl StepStatus {
    /// True for [`StepStatus::Advanced`]
    pub fn is_advanced(&self) -> bool {
        matches!(self, StepStatus::Advanced)
    }
}

/// A finite-difference time-stepping scheme
///
/// Implementations own their coefficients (and, for the implicit scheme,
/// the factored matrix). `update` reads `state.previous`, writes
/// `state.current` and forces the boundary nodes of `current`.
pub trait Scheme: Send + Sync {
    /// Compute the next state from the previous one
    fn update(&self, state: &mut HeatState) -> StepStatus;

    /// Display name
    fn name(&self) -> &'static str;
}

/// Selector over the available schemes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchemeKind {
    /// Forward-time central-space, explicit, second order in space
    Ftcs,

    /// Backward-time implicit scheme solved with a tridiagonal LU
    CrankNicolson,

    /// Higher-order explicit 5-point stencil
    Upwind15,
}

impl SchemeKind {
    /// Every available scheme, in command-line order
    pub const ALL: [SchemeKind; 3] = [SchemeKind::Ftcs, SchemeKind::Upwind15, SchemeKind::CrankNicolson];

    /// Identifier accepted by [`FromStr`]
    pub fn id(&self) -> &'static str {
        match self {
            SchemeKind::Ftcs => "ftcs",
            SchemeKind::CrankNicolson => "crankn",
            SchemeKind::Upwind15 => "upwind15",
        }
    }

    /// Construct the scheme for a grid
    ///
    /// # Errors
    ///
    /// - [`HeatError::GridTooSmall`](crate::error::HeatError::GridTooSmall)
    ///   when the grid is narrower than the stencil
    /// - [`HeatError::ZeroPivot`](crate::error::HeatError::ZeroPivot) from
    ///   the implicit scheme's factorization
    pub fn build(&self, grid: &Grid) -> HeatResult<Box<dyn Scheme>> {
        Ok(match self {
            SchemeKind::Ftcs => Box::new(Ftcs::new(grid)?),
            SchemeKind::CrankNicolson => Box::new(CrankNicolson::new(grid)?),
            SchemeKind::Upwind15 => Box::new(Upwind15::new(grid)?),
        })
    }
}

impl fmt::Display for SchemeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

impl FromStr for SchemeKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ftcs" | "explicit" => Ok(SchemeKind::Ftcs),
            "crankn" | "implicit" | "crank-nicolson" => Ok(SchemeKind::CrankNicolson),
            "upwind15" | "higher-order" => Ok(SchemeKind::Upwind15),
            other => Err(format!("unknown scheme '{other}' (expected ftcs, upwind15 or crankn)")),
        }
    }
}

// =================================================================================================
// Collaborators
// =================================================================================================

/// Observer notified by the driver while stepping
///
/// Purely observational: nothing an observer does feeds back into the run.
pub trait SolverObserver {
    /// Called every `output_interval` iterations with the last change metric
    fn on_progress(&mut self, iteration: usize, change: f64);

    /// Called every `save_interval` iterations with the freshly computed solution
    fn on_snapshot(&mut self, _iteration: usize, _current: &DVector<f64>, _dx: f64) {}
}

impl<F: FnMut(usize, f64)> SolverObserver for F {
    fn on_progress(&mut self, iteration: usize, change: f64) {
        self(iteration, change)
    }
}

/// Observer that ignores everything
#[derive(Debug, Clone, Copy, Default)]
pub struct Silent;

impl SolverObserver for Silent {
    fn on_progress(&mut self, _iteration: usize, _change: f64) {}
}

/// Progress reports forwarded to the `log` facade
#[derive(Debug, Clone, Copy, Default)]
pub struct LogProgress;

impl SolverObserver for LogProgress {
    fn on_progress(&mut self, iteration: usize, change: f64) {
        log::info!("Iteration {iteration}: last change l2={change}");
    }
}

/// Receiver of the final solution vector
pub trait ResultSink {
    /// Accept the final vector and the realized grid spacing
    fn accept(&mut self, values: &DVector<f64>, dx: f64) -> Result<(), Box<dyn Error>>;
}

// =================================================================================================
// Termination
// =================================================================================================

/// Terminal state of a run
#[derive(Debug, Clone, PartialEq)]
pub enum Termination {
    /// Change threshold (or the iteration-ceiling sentinel) stopped the run
    Converged { iterations: usize, change: f64 },

    /// The scheme refused a step
    Unstable { iteration: usize, ratio: f64, limit: f64 },

    /// Simulated time reached `max_time`
    MaxTime { iterations: usize },

    /// Runaway guard: the iteration ceiling was hit
    IterationCeiling { iterations: usize },
}

impl Termination {
    /// Unstable runs and runs stopped by the ceiling did not produce a valid answer
    pub fn is_failure(&self) -> bool {
        matches!(self, Termination::Unstable { .. } | Termination::IterationCeiling { .. })
    }

    /// Short label
    pub fn label(&self) -> &'static str {
        match self {
            Termination::Converged { .. } => "converged",
            Termination::Unstable { .. } => "unstable",
            Termination::MaxTime { .. } => "max time",
            Termination::IterationCeiling { .. } => "iteration ceiling",
        }
    }
}

impl fmt::Display for Termination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Termination::Converged { iterations, change } => {
                write!(f, "Stopped after {iterations} iterations for threshold {change}")
            }
            Termination::Unstable { iteration, ratio, limit } => write!(
                f,
                "Solution criteria violated at iteration {iteration}: \
                 alpha*dt/dx^2 = {ratio} exceeds {limit}. Make better choices"
            ),
            Termination::MaxTime { iterations } => {
                write!(f, "Reached max time after {iterations} iterations")
            }
            Termination::IterationCeiling { iterations } => {
                write!(f, "Aborted: iteration ceiling of {iterations} reached")
            }
        }
    }
}

// =================================================================================================
// Simulation result
// =================================================================================================

/// Final state of a run
#[derive(Debug, Clone)]
pub struct SimulationResult {
    /// Final solution, `current` at termination
    pub values: DVector<f64>,

    /// Realized grid spacing
    pub dx: f64,

    /// Completed time steps (the step that triggered termination included)
    pub iterations: usize,

    /// Simulated time `iterations·dt` reached before termination
    pub time: f64,

    /// Last change metric (NaN when no step was taken)
    pub last_change: f64,

    /// How the run ended
    pub termination: Termination,

    /// Scheme display name
    pub scheme: String,

    /// Free-form run metadata
    pub metadata: HashMap<String, String>,
}

impl SimulationResult {
    /// Number of grid nodes
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True when the solution vector is empty
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Node positions `x = index·dx`
    pub fn positions(&self) -> Vec<f64> {
        (0..self.values.len()).map(|i| i as f64 * self.dx).collect()
    }

    /// `(x, u)` pairs of the final profile
    pub fn profile(&self) -> Vec<(f64, f64)> {
        self.values
            .iter()
            .enumerate()
            .map(|(i, u)| (i as f64 * self.dx, *u))
            .collect()
    }

    /// Attach a metadata entry
    pub fn add_metadata(&mut self, key: &str, value: &str) {
        self.metadata.insert(key.to_string(), value.to_string());
    }

    /// Read a metadata entry
    pub fn get_metadata(&self, key: &str) -> Option<&str> {
        self.metadata.get(key).map(String::as_str)
    }

    /// Hand the final vector to a sink
    ///
    /// A failing sink is logged and reported back; the result itself is
    /// never modified.
    pub fn deliver(&self, sink: &mut dyn ResultSink) -> Result<(), Box<dyn Error>> {
        sink.accept(&self.values, self.dx).inspect_err(|e| {
            log::warn!("result sink failed: {e}");
        })
    }
}

// =================================================================================================
// Tests
// =================================================================================================
