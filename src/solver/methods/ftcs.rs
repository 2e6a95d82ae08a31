//! Forward-Time Central-Space (FTCS) scheme
//!
//! # Mathematical Background
//!
//! Forward Euler in time, second-order central difference in space:
//!
//! ```text
//! u_i^{n+1} = r·u_{i+1}^n + (1 - 2r)·u_i^n + r·u_{i-1}^n,    r = α·dt/dx²
//! ```
//!
//! # Stability
//!
//! Conditionally stable: `r ≤ 1/2`. Above that bound the update is refused
//! and the driver ends the run as unstable.

use crate::error::HeatResult;
use crate::physics::{Grid, HeatState};
use crate::solver::{Scheme, StepStatus};

/// Largest stable diffusion number of the FTCS stencil
pub const FTCS_STABILITY_LIMIT: f64 = 0.5;

/// Explicit 3-point scheme
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ftcs {
    r: f64,
    bc0: f64,
    bc1: f64,
}

impl Ftcs {
    /// Build for a grid
    ///
    /// Construction always succeeds on a valid grid, even when `r > 1/2`:
    /// stability is checked on every update.
    pub fn new(grid: &Grid) -> HeatResult<Self> {
        Ok(Self {
            r: grid.diffusion_number(),
            bc0: grid.bc0,
            bc1: grid.bc1,
        })
    }

    /// Diffusion number `α·dt/dx²`
    pub fn ratio(&self) -> f64 {
        self.r
    }
}

impl Scheme for Ftcs {
    fn update(&self, state: &mut HeatState) -> StepStatus {
        let r = self.r;

        if r > FTCS_STABILITY_LIMIT {
            return StepStatus::StabilityViolated {
                ratio: r,
                limit: FTCS_STABILITY_LIMIT,
            };
        }

        let nx = state.len();
        let last = &state.previous;
        let curr = &mut state.current;

        for i in 1..nx - 1 {
            curr[i] = r * last[i + 1] + (1.0 - 2.0 * r) * last[i] + r * last[i - 1];
        }

        state.enforce_boundaries(self.bc0, self.bc1);

        StepStatus::Advanced
    }

    fn name(&self) -> &'static str {
        "FTCS"
    }
}

// =================================================================================================
// Tests
// =================================================================================================
