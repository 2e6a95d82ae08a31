//! Time-stepping driver
//!
//! [`HeatSolver`] owns one grid, one scheme and one state, and walks them
//! through a small state machine:
//!
//! ```text
//! Uninitialized ──initialize()──► Initializing ──► Stepping ──step()──► Terminated(..)
//! ```
//!
//! # Loop body
//!
//! One [`HeatSolver::step`] is one time step of size `dt`:
//!
//! 1. the scheme computes `current` from `previous` (a refused update ends
//!    the run as [`Termination::Unstable`])
//! 2. `change = Σ (current - previous)²`
//! 3. the run converges when `max_time` equals the iteration ceiling, or when
//!    `change < -max_time²` (only reachable with a negative `max_time`)
//! 4. progress and snapshots are reported at their configured cadence
//! 5. `current` replaces `previous` and simulated time advances by `dt`
//!
//! Stepping continues while `iteration·dt < max_time`. Hitting
//! `max_iterations` first aborts the run as [`Termination::IterationCeiling`].
//!
//! # Example
//!
//! ```rust
//! use heateq::physics::HeatParameters;
//! use heateq::solver::{HeatSolver, SchemeKind, Termination};
//!
//! let mut solver = HeatSolver::new(HeatParameters::default(), SchemeKind::Ftcs).unwrap();
//! let result = solver.run();
//!
//! assert!(matches!(result.termination, Termination::MaxTime { .. }));
//! assert_eq!(result.values[0], 0.0);
//! assert_eq!(result.values[10], 1.0);
//! ```

use std::collections::HashMap;

use crate::error::HeatResult;
use crate::physics::{Grid, HeatParameters, HeatState, InitialCondition};
use crate::solver::{
    Scheme, SchemeKind, Silent, SimulationResult, SolverObserver, StepStatus, Termination,
};

/// Where a [`HeatSolver`] is in its lifecycle
#[derive(Debug, Clone, PartialEq)]
pub enum DriverPhase {
    /// Built, initial condition not applied yet
    Uninitialized,

    /// Initial condition being written into `previous`
    Initializing,

    /// Ready for the next time step
    Stepping,

    /// Run finished, no further state mutation
    Terminated(Termination),
}

impl DriverPhase {
    /// True once the run has ended
    pub fn is_terminated(&self) -> bool {
        matches!(self, DriverPhase::Terminated(_))
    }
}

/// One engine instance: grid, scheme, state and run bookkeeping
pub struct HeatSolver {
    params: HeatParameters,
    grid: Grid,
    kind: SchemeKind,
    scheme: Box<dyn Scheme>,
    initial: InitialCondition,
    state: HeatState,
    phase: DriverPhase,

    // Time steps taken (time = iteration·dt)
    iteration: usize,
    // Scheme updates that completed, including one that converged
    completed: usize,
    last_change: f64,
    warned_non_finite: bool,
}

impl HeatSolver {
    /// Build an engine for `params` with the selected scheme
    ///
    /// # Errors
    ///
    /// - invalid parameters or a grid too small for the scheme
    /// - a zero pivot while factoring the implicit operator
    /// - a recognized initial-condition descriptor with a missing or
    ///   malformed argument
    pub fn new(params: HeatParameters, kind: SchemeKind) -> HeatResult<Self> {
        let grid = Grid::new(&params)?;
        let scheme = kind.build(&grid)?;
        let initial = InitialCondition::parse(&params.initial_condition)?;
        let state = HeatState::zeros(grid.nx);

        log::debug!(
            "{} engine: nx={} dx={} r={}",
            scheme.name(),
            grid.nx,
            grid.dx,
            grid.diffusion_number()
        );

        Ok(Self {
            params,
            grid,
            kind,
            scheme,
            initial,
            state,
            phase: DriverPhase::Uninitialized,
            iteration: 0,
            completed: 0,
            last_change: f64::NAN,
            warned_non_finite: false,
        })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn state(&self) -> &HeatState {
        &self.state
    }

    pub fn phase(&self) -> &DriverPhase {
        &self.phase
    }

    pub fn kind(&self) -> SchemeKind {
        self.kind
    }

    pub fn parameters(&self) -> &HeatParameters {
        &self.params
    }

    /// Time steps taken so far
    pub fn iteration(&self) -> usize {
        self.iteration
    }

    /// Simulated time reached, `iteration·dt`
    pub fn time(&self) -> f64 {
        self.iteration as f64 * self.grid.dt
    }

    /// Apply the initial condition to `previous`
    ///
    /// Boundary nodes are left as the generator wrote them; the first update
    /// forces them. Calling this again after the run started does nothing.
    pub fn initialize(&mut self) {
        if self.phase != DriverPhase::Uninitialized {
            return;
        }

        self.phase = DriverPhase::Initializing;
        self.initial.apply(&mut self.state.previous, self.grid.dx);
        self.phase = DriverPhase::Stepping;

        log::debug!("initial condition {} applied", self.initial);
    }

    /// Run one loop iteration and return the resulting phase
    ///
    /// Initializes first if needed. Once terminated, further calls return the
    /// terminal phase unchanged.
    pub fn step(&mut self, observer: &mut dyn SolverObserver) -> &DriverPhase {
        match self.phase {
            DriverPhase::Uninitialized => self.initialize(),
            DriverPhase::Terminated(_) => return &self.phase,
            _ => {}
        }

        if let Some(termination) = self.advance_once(observer) {
            self.finish(termination);
        }

        &self.phase
    }

    /// Run to termination without observers
    pub fn run(&mut self) -> SimulationResult {
        self.run_with(&mut Silent)
    }

    /// Run to termination, reporting progress and snapshots to `observer`
    pub fn run_with(&mut self, observer: &mut dyn SolverObserver) -> SimulationResult {
        log::info!(
            "Running {} on {} nodes: alpha={} dt={} maxt={} ic={}",
            self.scheme.name(),
            self.grid.nx,
            self.grid.alpha,
            self.grid.dt,
            self.params.max_time,
            self.params.initial_condition
        );

        while !self.step(observer).is_terminated() {}

        self.result()
    }

    /// Snapshot of the run so far
    ///
    /// Before termination the reported [`Termination`] is
    /// [`Termination::MaxTime`] at the current iteration.
    pub fn result(&self) -> SimulationResult {
        let termination = match &self.phase {
            DriverPhase::Terminated(t) => t.clone(),
            _ => Termination::MaxTime {
                iterations: self.completed,
            },
        };

        let mut result = SimulationResult {
            values: self.state.current.clone(),
            dx: self.grid.dx,
            iterations: self.completed,
            time: self.time(),
            last_change: self.last_change,
            termination,
            scheme: self.scheme.name().to_string(),
            metadata: HashMap::new(),
        };

        result.add_metadata("scheme", self.kind.id());
        result.add_metadata("nx", &self.grid.nx.to_string());
        result.add_metadata("dx", &self.grid.dx.to_string());
        result.add_metadata("dt", &self.grid.dt.to_string());
        result.add_metadata("alpha", &self.grid.alpha.to_string());
        result.add_metadata("max time", &self.params.max_time.to_string());
        result.add_metadata("initial condition", &self.params.initial_condition);

        result
    }

    // One pass of the loop body; `Some` ends the run
    fn advance_once(&mut self, observer: &mut dyn SolverObserver) -> Option<Termination> {
        let max_time = self.params.max_time;

        if self.time() >= max_time {
            return Some(Termination::MaxTime {
                iterations: self.completed,
            });
        }

        if self.iteration >= self.params.max_iterations {
            return Some(Termination::IterationCeiling {
                iterations: self.iteration,
            });
        }

        if let StepStatus::StabilityViolated { ratio, limit } = self.scheme.update(&mut self.state) {
            return Some(Termination::Unstable {
                iteration: self.iteration,
                ratio,
                limit,
            });
        }
        self.completed += 1;

        let change = self.state.change();
        self.last_change = change;

        if !change.is_finite() && !self.warned_non_finite {
            log::warn!("Non-finite change {change} at iteration {}", self.iteration);
            self.warned_non_finite = true;
        }

        if max_time == self.params.max_iterations as f64 || change < -(max_time * max_time) {
            return Some(Termination::Converged {
                iterations: self.completed,
                change,
            });
        }

        let outi = self.params.output_interval;
        if outi > 0 && self.iteration % outi == 0 {
            log::debug!("iteration {} change {change}", self.iteration);
            observer.on_progress(self.iteration, change);
        }

        let savi = self.params.save_interval;
        if savi > 0 && self.iteration % savi == 0 {
            observer.on_snapshot(self.iteration, &self.state.current, self.grid.dx);
        }

        self.state.advance();
        self.iteration += 1;

        None
    }

    fn finish(&mut self, termination: Termination) {
        match &termination {
            Termination::IterationCeiling { .. } => log::error!("{termination}"),
            Termination::Unstable { .. } => log::warn!("{termination}"),
            _ => log::info!("{termination}"),
        }
        self.phase = DriverPhase::Terminated(termination);
    }
}

impl std::fmt::Debug for HeatSolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HeatSolver")
            .field("scheme", &self.scheme.name())
            .field("grid", &self.grid)
            .field("phase", &self.phase)
            .field("iteration", &self.iteration)
            .finish()
    }
}

// =================================================================================================
// Tests
// =================================================================================================
