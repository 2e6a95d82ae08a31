//! Independent runs over a list of cases
//!
//! Every case gets its own [`HeatSolver`]; nothing is shared between them.
//! With the `parallel` feature the cases are distributed with rayon,
//! otherwise they run one after the other. Output order always matches
//! input order.
//!
//! ```rust
//! use heateq::physics::HeatParameters;
//! use heateq::solver::{sweep::run_sweep, SchemeKind};
//!
//! let cases: Vec<_> = SchemeKind::ALL
//!     .iter()
//!     .map(|kind| (HeatParameters::default().with_max_time(0.1), *kind))
//!     .collect();
//!
//! let results = run_sweep(&cases);
//! assert_eq!(results.len(), 3);
//! assert!(results.iter().all(|r| r.is_ok()));
//! ```

use crate::error::HeatResult;
use crate::physics::HeatParameters;
use crate::solver::{HeatSolver, SchemeKind, SimulationResult};

fn run_case(params: &HeatParameters, kind: SchemeKind) -> HeatResult<SimulationResult> {
    let mut solver = HeatSolver::new(params.clone(), kind)?;
    Ok(solver.run())
}

/// Run every `(parameters, scheme)` case to termination
pub fn run_sweep(cases: &[(HeatParameters, SchemeKind)]) -> Vec<HeatResult<SimulationResult>> {
    log::info!("Sweeping {} cases", cases.len());

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;

        cases
            .par_iter()
            .map(|(params, kind)| run_case(params, *kind))
            .collect()
    }

    #[cfg(not(feature = "parallel"))]
    {
        cases
            .iter()
            .map(|(params, kind)| run_case(params, *kind))
            .collect()
    }
}

// =================================================================================================
// Tests
// =================================================================================================
