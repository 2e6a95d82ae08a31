//! Upwind 1.5: higher-order explicit 5-point scheme
//!
//! # Stencil
//!
//! With `k = α²·dt/dx²` and `k2 = k²`, interior nodes `i ∈ [2, nx-3]` use
//!
//! ```text
//! u_i^{n+1} =   f2·(12k2 - 2k) ·(u_{i-2} + u_{i+2})
//!             - f1·(12k2 - 8k) ·(u_{i-1} + u_{i+1})
//!             + f0·(12k2 - 10k + 4)·u_i
//!
//! f0 = 1/4,  f1 = 1/6,  f2 = 1/24
//! ```
//!
//! Nodes 1 and nx-2 fall back to the 3-point update driven by `k`, nodes 0
//! and nx-1 take the boundary values.
//!
//! # Stability
//!
//! No stability check is performed. A diverging run shows up only through
//! the driver's change metric.

use crate::error::{HeatError, HeatResult};
use crate::physics::{Grid, HeatState};
use crate::solver::{Scheme, StepStatus};

const F0: f64 = 1.0 / 4.0;
const F1: f64 = 1.0 / 6.0;
const F2: f64 = 1.0 / 24.0;

/// Smallest grid the 5-point stencil fits on
pub const UPWIND15_MIN_NODES: usize = 5;

/// Explicit 5-point scheme
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Upwind15 {
    k: f64,
    bc0: f64,
    bc1: f64,
}

impl Upwind15 {
    /// Build for a grid of at least [`UPWIND15_MIN_NODES`] nodes
    pub fn new(grid: &Grid) -> HeatResult<Self> {
        if grid.nx < UPWIND15_MIN_NODES {
            return Err(HeatError::GridTooSmall {
                scheme: "Upwind 1.5",
                nodes: grid.nx,
                required: UPWIND15_MIN_NODES,
            });
        }

        Ok(Self {
            k: grid.alpha * grid.alpha * grid.dt / (grid.dx * grid.dx),
            bc0: grid.bc0,
            bc1: grid.bc1,
        })
    }

    /// Stencil coefficient `α²·dt/dx²`
    pub fn coefficient(&self) -> f64 {
        self.k
    }

    /// Weights applied to `u_{i±2}`, `u_{i±1}` and `u_i`
    pub fn weights(&self) -> (f64, f64, f64) {
        let k = self.k;
        let k2 = k * k;
        (
            F2 * (12.0 * k2 - 2.0 * k),
            -F1 * (12.0 * k2 - 8.0 * k),
            F0 * (12.0 * k2 - 10.0 * k + 4.0),
        )
    }
}

impl Scheme for Upwind15 {
    fn update(&self, state: &mut HeatState) -> StepStatus {
        let k = self.k;
        let (outer, inner, center) = self.weights();

        let nx = state.len();
        let last = &state.previous;
        let curr = &mut state.current;

        curr[1] = last[1] + k * (last[0] - 2.0 * last[1] + last[2]);
        curr[nx - 2] = last[nx - 2] + k * (last[nx - 3] - 2.0 * last[nx - 2] + last[nx - 1]);

        for i in 2..nx - 2 {
            curr[i] = outer * last[i - 2]
                + outer * last[i + 2]
                + inner * last[i - 1]
                + inner * last[i + 1]
                + center * last[i];
        }

        state.enforce_boundaries(self.bc0, self.bc1);

        StepStatus::Advanced
    }

    fn name(&self) -> &'static str {
        "Upwind 1.5"
    }
}

// =================================================================================================
// Tests
// =================================================================================================
