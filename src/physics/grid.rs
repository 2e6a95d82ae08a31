//! Uniform 1-D grid and the working solution vectors
//!
//! The grid owns the derived discretization (node count, realized `dx`),
//! the state owns the two solution vectors a step reads from and writes to.
//! Both are plain storage; the schemes and the driver give them behavior.

use nalgebra::DVector;

use crate::error::HeatResult;
use crate::physics::HeatParameters;

// =================================================================================================
// Grid
// =================================================================================================

/// Discretization of `[0, L]` into `nx` equally spaced nodes
///
/// The requested `dx` is only a hint: the node count is `floor(L/dx) + 1`
/// and `dx` is then recomputed as `L / (nx - 1)` so the last node sits
/// exactly on `x = L`.
///
/// # Example
///
/// ```rust
/// use heateq::physics::{Grid, HeatParameters};
///
/// let grid = Grid::new(&HeatParameters::default()).unwrap();
/// assert_eq!(grid.nx, 11);
/// assert_eq!(grid.dx, 1.0 / 10.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    /// Domain length
    pub length: f64,

    /// Number of nodes
    pub nx: usize,

    /// Realized spatial step
    pub dx: f64,

    /// Time step
    pub dt: f64,

    /// Thermal diffusivity
    pub alpha: f64,

    /// Boundary value at node 0
    pub bc0: f64,

    /// Boundary value at node nx-1
    pub bc1: f64,

    /// Advisory step budget `floor(maxT/dt)`
    pub nt: usize,
}

impl Grid {
    /// Build the grid from validated parameters
    pub fn new(params: &HeatParameters) -> HeatResult<Self> {
        params.validate()?;

        let nx = params.node_count();
        let dx = params.length / (nx - 1) as f64;

        Ok(Self {
            length: params.length,
            nx,
            dx,
            dt: params.dt,
            alpha: params.alpha,
            bc0: params.bc0,
            bc1: params.bc1,
            nt: params.step_budget(),
        })
    }

    /// Diffusion number `alpha·dt/dx²`
    pub fn diffusion_number(&self) -> f64 {
        self.alpha * self.dt / (self.dx * self.dx)
    }

    /// Physical position of node `index`
    pub fn position(&self, index: usize) -> f64 {
        index as f64 * self.dx
    }

    /// Positions of all nodes, `x = index·dx`
    pub fn positions(&self) -> Vec<f64> {
        (0..self.nx).map(|i| self.position(i)).collect()
    }
}

// =================================================================================================
// State
// =================================================================================================

/// Solution vectors of a run
///
/// `previous` and `current` are distinct allocations: a step reads the
/// former and writes the latter. [`HeatState::advance`] copies `current`
/// into `previous`.
///
/// `exact`, `change_history` and `error_history` are reserved diagnostic
/// buffers. They are allocated zeroed and nothing in the engine writes them.
#[derive(Debug, Clone, PartialEq)]
pub struct HeatState {
    /// Solution at the start of the step in progress
    pub previous: DVector<f64>,

    /// Solution being computed
    pub current: DVector<f64>,

    /// Placeholder for an exact solution
    pub exact: DVector<f64>,

    /// Placeholder for per-node change accumulation
    pub change_history: DVector<f64>,

    /// Placeholder for per-node error accumulation
    pub error_history: DVector<f64>,
}

impl HeatState {
    /// Allocate zeroed vectors of length `nx`
    pub fn zeros(nx: usize) -> Self {
        Self {
            previous: DVector::zeros(nx),
            current: DVector::zeros(nx),
            exact: DVector::zeros(nx),
            change_history: DVector::zeros(nx),
            error_history: DVector::zeros(nx),
        }
    }

    /// Number of nodes
    pub fn len(&self) -> usize {
        self.previous.len()
    }

    /// True for a zero-node state
    pub fn is_empty(&self) -> bool {
        self.previous.is_empty()
    }

    /// Change metric: squared L2 norm of `current - previous`
    pub fn change(&self) -> f64 {
        self.current
            .iter()
            .zip(self.previous.iter())
            .map(|(c, p)| (c - p) * (c - p))
            .sum()
    }

    /// Replace `previous` with `current`
    ///
    /// Both vectors hold the same values afterwards, so `current` is always
    /// the latest solution whichever way a run ends.
    pub fn advance(&mut self) {
        self.previous.copy_from(&self.current);
    }

    /// Force the boundary nodes of `current`
    pub fn enforce_boundaries(&mut self, bc0: f64, bc1: f64) {
        let last = self.current.len() - 1;
        self.current[0] = bc0;
        self.current[last] = bc1;
    }
}

// =================================================================================================
// Tests
// =================================================================================================
