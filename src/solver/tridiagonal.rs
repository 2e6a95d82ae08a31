//! Banded tridiagonal matrix with in-place LU factorization
//!
//! # Storage
//!
//! Three parallel bands of length `n`, indexed by column:
//!
//! ```text
//! sub[j]   = A[j+1][j]    (below the diagonal)
//! diag[j]  = A[j][j]
//! sup[j]   = A[j-1][j]    (above the diagonal)
//! ```
//!
//! `sub[n-1]` and `sup[0]` fall outside the matrix and are kept at zero.
//!
//! # Factorization
//!
//! LU without pivoting. The multipliers of L overwrite `sub`, the pivots of
//! U overwrite `diag`, `sup` is unchanged. A zero pivot is a construction
//! defect reported as [`HeatError::ZeroPivot`].
//!
//! # Example
//!
//! ```rust
//! use heateq::solver::tridiagonal::TridiagonalMatrix;
//! use nalgebra::DVector;
//!
//! let matrix = TridiagonalMatrix::heat_operator(5, 0.5);
//! let rhs = DVector::from_vec(vec![0.0, 1.0, 2.0, 1.0, 0.0]);
//!
//! let lu = matrix.clone().factor().unwrap();
//! let mut x = rhs.clone();
//! lu.solve_in_place(&mut x);
//!
//! assert!((matrix.multiply(&x) - rhs).norm() < 1e-12);
//! ```

use nalgebra::DVector;

use crate::error::{HeatError, HeatResult};

// =================================================================================================
// Unfactored matrix
// =================================================================================================

/// Tridiagonal matrix stored as three bands
#[derive(Debug, Clone, PartialEq)]
pub struct TridiagonalMatrix {
    sub: DVector<f64>,
    diag: DVector<f64>,
    sup: DVector<f64>,
}

impl TridiagonalMatrix {
    /// Build from explicit bands (see module docs for the index convention)
    ///
    /// # Panics
    ///
    /// Panics if the bands differ in length.
    pub fn from_bands(sub: DVector<f64>, diag: DVector<f64>, sup: DVector<f64>) -> Self {
        assert_eq!(sub.len(), diag.len(), "sub-diagonal length mismatch");
        assert_eq!(sup.len(), diag.len(), "super-diagonal length mismatch");
        Self { sub, diag, sup }
    }

    /// Implicit heat operator with Dirichlet rows
    ///
    /// Rows 0 and n-1 are identity rows, every interior row is
    /// `-w, 1+2w, -w` with `w = alpha·dt/dx²`.
    ///
    /// # Panics
    ///
    /// Panics if `n < 2`.
    pub fn heat_operator(n: usize, w: f64) -> Self {
        assert!(n >= 2, "heat operator needs at least two rows");

        let mut sub = DVector::zeros(n);
        let mut diag = DVector::zeros(n);
        let mut sup = DVector::zeros(n);

        diag[0] = 1.0;
        for i in 1..n - 1 {
            sub[i - 1] = -w;
            diag[i] = 1.0 + 2.0 * w;
            sup[i + 1] = -w;
        }
        diag[n - 1] = 1.0;

        Self { sub, diag, sup }
    }

    /// Matrix order
    pub fn len(&self) -> usize {
        self.diag.len()
    }

    /// True for a 0×0 matrix
    pub fn is_empty(&self) -> bool {
        self.diag.is_empty()
    }

    /// Entry `A[row][col]` (zero outside the three bands)
    pub fn get(&self, row: usize, col: usize) -> f64 {
        if row == col {
            self.diag[col]
        } else if row == col + 1 {
            self.sub[col]
        } else if col == row + 1 {
            self.sup[col]
        } else {
            0.0
        }
    }

    /// Matrix-vector product `A·x`
    pub fn multiply(&self, x: &DVector<f64>) -> DVector<f64> {
        let n = self.len();
        let mut y = DVector::zeros(n);
        for i in 0..n {
            let mut value = self.diag[i] * x[i];
            if i > 0 {
                value += self.sub[i - 1] * x[i - 1];
            }
            if i + 1 < n {
                value += self.sup[i + 1] * x[i + 1];
            }
            y[i] = value;
        }
        y
    }

    /// Factor in place, consuming the matrix
    pub fn factor(mut self) -> HeatResult<TridiagonalLu> {
        let n = self.len();

        for i in 1..n {
            let pivot = self.diag[i - 1];
            if pivot == 0.0 {
                return Err(HeatError::ZeroPivot { row: i - 1 });
            }

            let m = self.sub[i - 1] / pivot;
            self.sub[i - 1] = m;
            self.diag[i] -= m * self.sup[i];
        }

        if n > 0 && self.diag[n - 1] == 0.0 {
            return Err(HeatError::ZeroPivot { row: n - 1 });
        }

        Ok(TridiagonalLu {
            multipliers: self.sub,
            pivots: self.diag,
            upper: self.sup,
        })
    }
}

// =================================================================================================
// Factored matrix
// =================================================================================================

/// LU factors of a [`TridiagonalMatrix`], reusable for any right-hand side
#[derive(Debug, Clone, PartialEq)]
pub struct TridiagonalLu {
    multipliers: DVector<f64>,
    pivots: DVector<f64>,
    upper: DVector<f64>,
}

impl TridiagonalLu {
    /// Matrix order
    pub fn len(&self) -> usize {
        self.pivots.len()
    }

    /// True for a 0×0 matrix
    pub fn is_empty(&self) -> bool {
        self.pivots.is_empty()
    }

    /// Solve `A·x = b` in place: `x` holds `b` on entry and the solution on exit
    ///
    /// # Panics
    ///
    /// Panics if `x` has the wrong length.
    pub fn solve_in_place(&self, x: &mut DVector<f64>) {
        let n = self.len();
        assert_eq!(x.len(), n, "right-hand side length mismatch");

        // L·y = b
        for i in 1..n {
            x[i] -= self.multipliers[i - 1] * x[i - 1];
        }

        // U·x = y
        for i in (1..=n).rev() {
            x[i - 1] /= self.pivots[i - 1];
            if i > 1 {
                x[i - 2] -= self.upper[i - 1] * x[i - 1];
            }
        }
    }
}

// =================================================================================================
// Tests
// =================================================================================================
