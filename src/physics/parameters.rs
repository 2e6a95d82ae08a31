//! Construction parameters of a heat equation run
//!
//! # Design
//!
//! `HeatParameters` follows the same pattern as the solver configuration:
//! plain public fields, builder-style setters and a `validate()` method that
//! is called before anything is allocated.
//!
//! # Time bound convention
//!
//! `max_time > 0` is the simulated duration. A negative `max_time` is the
//! historical "convergence tolerance" form of the parameter; it is accepted
//! but, since the time loop runs while `t < max_time`, such a run performs
//! no step at all.
//!
//! # Example
//!
//! ```rust
//! use heateq::physics::HeatParameters;
//!
//! let params = HeatParameters::default()
//!     .with_alpha(0.1)
//!     .with_initial_condition("ramp(0,1)");
//!
//! assert!(params.validate().is_ok());
//! assert_eq!(params.node_count(), 11);
//! ```

use crate::error::{HeatError, HeatResult};

/// Hard ceiling on the number of time steps of a single run
///
/// Also used as a sentinel: a run configured with `max_time` equal to this
/// value stops after its first step.
pub const DEFAULT_MAX_ITERATIONS: usize = 99_999;

/// Largest grid `validate()` accepts
pub const MAX_NODES: usize = 10_000_000;

/// Physical and numerical parameters of a run
#[derive(Debug, Clone, PartialEq)]
pub struct HeatParameters {
    /// Domain length L (m)
    pub length: f64,

    /// Simulated duration (s), or a negative tolerance (see module docs)
    pub max_time: f64,

    /// Thermal diffusivity (m²/s)
    pub alpha: f64,

    /// Requested spatial step (m). Only a hint, the realized step spans [0, L] exactly
    pub dx: f64,

    /// Time step (s)
    pub dt: f64,

    /// Boundary value at x = 0
    pub bc0: f64,

    /// Boundary value at x = L
    pub bc1: f64,

    /// Initial condition descriptor, e.g. `const(1)` or `step(0,0.5,1)`
    pub initial_condition: String,

    /// Progress report cadence in iterations (0 disables reports)
    pub output_interval: usize,

    /// Snapshot cadence in iterations (0 disables snapshots)
    pub save_interval: usize,

    /// Iteration ceiling guarding against runaway loops
    pub max_iterations: usize,
}

impl Default for HeatParameters {
    fn default() -> Self {
        Self {
            length: 1.0,
            max_time: 2.0,
            alpha: 0.2,
            dx: 0.1,
            dt: 0.004,
            bc0: 0.0,
            bc1: 1.0,
            initial_condition: "const(1)".to_string(),
            output_interval: 100,
            save_interval: 0,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

impl HeatParameters {
    /// Create parameters from the full positional list used by the command line
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        length: f64,
        max_time: f64,
        alpha: f64,
        dx: f64,
        dt: f64,
        bc0: f64,
        bc1: f64,
        initial_condition: impl Into<String>,
        output_interval: usize,
    ) -> Self {
        Self {
            length,
            max_time,
            alpha,
            dx,
            dt,
            bc0,
            bc1,
            initial_condition: initial_condition.into(),
            output_interval,
            ..Default::default()
        }
    }

    /// Builder pattern: set domain length
    pub fn with_length(mut self, length: f64) -> Self {
        self.length = length;
        self
    }

    /// Builder pattern: set simulated duration
    pub fn with_max_time(mut self, max_time: f64) -> Self {
        self.max_time = max_time;
        self
    }

    /// Builder pattern: set thermal diffusivity
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Builder pattern: set requested spatial step
    pub fn with_dx(mut self, dx: f64) -> Self {
        self.dx = dx;
        self
    }

    /// Builder pattern: set time step
    pub fn with_dt(mut self, dt: f64) -> Self {
        self.dt = dt;
        self
    }

    /// Builder pattern: set both boundary values
    pub fn with_boundaries(mut self, bc0: f64, bc1: f64) -> Self {
        self.bc0 = bc0;
        self.bc1 = bc1;
        self
    }

    /// Builder pattern: set initial condition descriptor
    pub fn with_initial_condition(mut self, descriptor: impl Into<String>) -> Self {
        self.initial_condition = descriptor.into();
        self
    }

    /// Builder pattern: set progress report cadence
    pub fn with_output_interval(mut self, interval: usize) -> Self {
        self.output_interval = interval;
        self
    }

    /// Builder pattern: set snapshot cadence
    pub fn with_save_interval(mut self, interval: usize) -> Self {
        self.save_interval = interval;
        self
    }

    /// Builder pattern: set iteration ceiling
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Number of grid nodes, `floor(L/dx) + 1`
    ///
    /// Saturates at `usize::MAX` for ratios out of range; `validate()`
    /// rejects those.
    pub fn node_count(&self) -> usize {
        ((self.length / self.dx) as usize).saturating_add(1)
    }

    /// Advisory step budget, `floor(maxT/dt)` (0 for a negative `max_time`)
    pub fn step_budget(&self) -> usize {
        (self.max_time / self.dt).max(0.0) as usize
    }

    /// Check that parameters describe a usable run
    pub fn validate(&self) -> HeatResult<()> {
        positive("length", self.length)?;
        positive("dx", self.dx)?;
        positive("dt", self.dt)?;
        positive("alpha", self.alpha)?;
        finite("max_time", self.max_time)?;
        finite("bc0", self.bc0)?;
        finite("bc1", self.bc1)?;

        let intervals = self.length / self.dx;
        if !intervals.is_finite() || intervals >= MAX_NODES as f64 {
            return Err(HeatError::InvalidParameter {
                name: "dx",
                value: self.dx,
                reason: "gives more grid nodes than MAX_NODES",
            });
        }

        let nodes = self.node_count();
        if nodes < 3 {
            return Err(HeatError::GridTooSmall {
                scheme: "heat equation grid",
                nodes,
                required: 3,
            });
        }

        Ok(())
    }
}

fn positive(name: &'static str, value: f64) -> HeatResult<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(HeatError::InvalidParameter {
            name,
            value,
            reason: "must be finite and positive",
        });
    }
    Ok(())
}

fn finite(name: &'static str, value: f64) -> HeatResult<()> {
    if !value.is_finite() {
        return Err(HeatError::InvalidParameter {
            name,
            value,
            reason: "must be finite",
        });
    }
    Ok(())
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_command_line() {
        let params = HeatParameters::default();
        assert_eq!(params.length, 1.0);
        assert_eq!(params.max_time, 2.0);
        assert_eq!(params.alpha, 0.2);
        assert_eq!(params.dt, 0.004);
        assert_eq!(params.initial_condition, "const(1)");
        assert_eq!(params.output_interval, 100);
        assert_eq!(params.max_iterations, DEFAULT_MAX_ITERATIONS);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_positional_constructor() {
        let params = HeatParameters::new(2.0, 1.0, 0.5, 0.25, 0.01, 3.0, 4.0, "ramp(3,4)", 10);
        assert_eq!(params.length, 2.0);
        assert_eq!(params.bc1, 4.0);
        assert_eq!(params.initial_condition, "ramp(3,4)");
        assert_eq!(params.save_interval, 0);
        assert_eq!(params.node_count(), 9);
    }

    #[test]
    fn test_step_budget() {
        let params = HeatParameters::default();
        assert_eq!(params.step_budget(), 500);

        let params = params.with_max_time(-1e-6);
        assert_eq!(params.step_budget(), 0);
    }

    #[test]
    fn test_rejects_non_positive_spacing() {
        let err = HeatParameters::default().with_dx(0.0).validate().unwrap_err();
        assert!(matches!(err, HeatError::InvalidParameter { name: "dx", .. }));

        let err = HeatParameters::default().with_dt(-0.1).validate().unwrap_err();
        assert!(matches!(err, HeatError::InvalidParameter { name: "dt", .. }));

        let err = HeatParameters::default().with_alpha(f64::NAN).validate().unwrap_err();
        assert!(matches!(err, HeatError::InvalidParameter { name: "alpha", .. }));
    }

    #[test]
    fn test_negative_max_time_is_accepted() {
        assert!(HeatParameters::default().with_max_time(-0.5).validate().is_ok());
        assert!(HeatParameters::default().with_max_time(f64::INFINITY).validate().is_err());
    }

    #[test]
    fn test_rejects_tiny_grid() {
        let err = HeatParameters::default().with_dx(0.6).validate().unwrap_err();
        assert!(matches!(err, HeatError::GridTooSmall { nodes: 2, required: 3, .. }));
    }

    #[test]
    fn test_rejects_oversized_grid() {
        // L/dx overflows to infinity
        let params = HeatParameters::default().with_length(1e300).with_dx(1e-300);
        assert_eq!(params.node_count(), usize::MAX);
        let err = params.validate().unwrap_err();
        assert!(matches!(err, HeatError::InvalidParameter { name: "dx", .. }));

        // Finite but far above the cap
        let err = HeatParameters::default().with_dx(1e-12).validate().unwrap_err();
        assert!(matches!(err, HeatError::InvalidParameter { name: "dx", .. }));

        // Largest accepted grid
        let dx = 1.0 / (MAX_NODES - 1) as f64;
        assert!(HeatParameters::default().with_dx(dx).validate().is_ok());
    }
}
