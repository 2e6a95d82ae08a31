//! Implicit tridiagonal scheme ("crankn")
//!
//! # Mathematical Background
//!
//! Each step solves
//!
//! ```text
//! -w·u_{i-1}^{n+1} + (1 + 2w)·u_i^{n+1} - w·u_{i+1}^{n+1} = u_i^n,    w = α·dt/dx²
//! ```
//!
//! with identity rows at both ends, using the previous solution as the
//! right-hand side. The coefficient matrix does not depend on time, so it is
//! factored once at construction and only the two triangular sweeps run per
//! step.
//!
//! # Stability
//!
//! Unconditionally stable for this equation: the update never refuses a step.

use crate::error::HeatResult;
use crate::physics::{Grid, HeatState};
use crate::solver::tridiagonal::{TridiagonalLu, TridiagonalMatrix};
use crate::solver::{Scheme, StepStatus};

/// Implicit scheme holding the factored heat operator
#[derive(Debug, Clone, PartialEq)]
pub struct CrankNicolson {
    lu: TridiagonalLu,
    w: f64,
    bc0: f64,
    bc1: f64,
}

impl CrankNicolson {
    /// Build and factor the operator for a grid
    ///
    /// # Errors
    ///
    /// [`HeatError::ZeroPivot`](crate::error::HeatError::ZeroPivot) if the
    /// operator is singular.
    pub fn new(grid: &Grid) -> HeatResult<Self> {
        let w = grid.diffusion_number();
        let lu = TridiagonalMatrix::heat_operator(grid.nx, w).factor()?;

        Ok(Self {
            lu,
            w,
            bc0: grid.bc0,
            bc1: grid.bc1,
        })
    }

    /// Off-diagonal weight `α·dt/dx²`
    pub fn weight(&self) -> f64 {
        self.w
    }
}

impl Scheme for CrankNicolson {
    fn update(&self, state: &mut HeatState) -> StepStatus {
        state.current.copy_from(&state.previous);
        self.lu.solve_in_place(&mut state.current);
        state.enforce_boundaries(self.bc0, self.bc1);

        StepStatus::Advanced
    }

    fn name(&self) -> &'static str {
        "Crank-Nicolson"
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::HeatParameters;
    use approx::assert_relative_eq;
    use nalgebra::DVector;

    #[test]
    fn test_step_solves_heat_operator() {
        let grid = Grid::new(&HeatParameters::default()).unwrap();
        let scheme = CrankNicolson::new(&grid).unwrap();
        let mut state = HeatState::zeros(grid.nx);

        // Boundary nodes already at bc so the forced values agree with the solve
        state.previous = DVector::from_fn(grid.nx, |i, _| {
            if i == 0 { grid.bc0 } else if i == grid.nx - 1 { grid.bc1 } else { 1.0 + (i as f64).sin() }
        });

        assert!(scheme.update(&mut state).is_advanced());

        let a = TridiagonalMatrix::heat_operator(grid.nx, scheme.weight());
        let back = a.multiply(&state.current);
        for i in 0..grid.nx {
            assert_relative_eq!(back[i], state.previous[i], epsilon = 1e-12);
        }
    }

    #[test]
    fn test_boundaries_forced() {
        let params = HeatParameters::default().with_boundaries(2.0, 5.0);
        let grid = Grid::new(&params).unwrap();
        let scheme = CrankNicolson::new(&grid).unwrap();
        let mut state = HeatState::zeros(grid.nx);
        state.previous.fill(-3.0);

        scheme.update(&mut state);

        assert_eq!(state.current[0], 2.0);
        assert_eq!(state.current[grid.nx - 1], 5.0);
    }

    #[test]
    fn test_large_time_step_is_accepted() {
        // w = 0.2 * 10 / 0.01 = 200, far beyond any explicit limit
        let grid = Grid::new(&HeatParameters::default().with_dt(10.0)).unwrap();
        let scheme = CrankNicolson::new(&grid).unwrap();
        let mut state = HeatState::zeros(grid.nx);
        state.previous.fill(1.0);

        assert_eq!(scheme.update(&mut state), StepStatus::Advanced);
        assert!(state.current.iter().all(|u| u.is_finite()));
    }

    #[test]
    fn test_minimal_grid() {
        let grid = Grid::new(&HeatParameters::default().with_dx(0.5)).unwrap();
        assert_eq!(grid.nx, 3);

        let scheme = CrankNicolson::new(&grid).unwrap();
        let mut state = HeatState::zeros(3);
        state.previous = DVector::from_vec(vec![0.0, 1.0, 1.0]);

        scheme.update(&mut state);

        let w = scheme.weight();
        // Middle row: -w·0 + (1+2w)·u1 - w·1 = 1
        assert_relative_eq!(state.current[1], (1.0 + w) / (1.0 + 2.0 * w), epsilon = 1e-14);
    }
}
