//! Helper functions for integration tests

use heateq::physics::HeatParameters;
use heateq::solver::{HeatSolver, SchemeKind, SimulationResult};

/// Parameters of the reference scenario: unit rod at 1 K, ends at 0 K and 1 K, run for 2 s
pub fn reference_parameters() -> HeatParameters {
    HeatParameters::new(1.0, 2.0, 0.2, 0.1, 0.004, 0.0, 1.0, "const(1)", 100)
}

/// Build and run an engine, panicking on configuration errors
pub fn run_scheme(params: HeatParameters, kind: SchemeKind) -> SimulationResult {
    HeatSolver::new(params, kind)
        .unwrap_or_else(|e| panic!("{kind} engine rejected its parameters: {e}"))
        .run()
}

/// Compute relative error: |actual - expected| / |expected|
///
/// Falls back to the absolute error for expected values near zero.
pub fn relative_error(actual: f64, expected: f64) -> f64 {
    if expected.abs() < 1e-10 {
        (actual - expected).abs()
    } else {
        (actual - expected).abs() / expected.abs()
    }
}

/// Assert that two profiles agree node by node within `tolerance` (relative error)
pub fn assert_profile_close(actual: &[f64], expected: &[f64], tolerance: f64, message: &str) {
    assert_eq!(actual.len(), expected.len(), "{}: length mismatch", message);

    for (i, (&a, &e)) in actual.iter().zip(expected.iter()).enumerate() {
        let error = relative_error(a, e);
        assert!(
            error < tolerance,
            "{}: node {} is {} but expected {} (error {:.2e}, tolerance {:.0e})",
            message, i, a, e, error, tolerance
        );
    }
}

/// Steady solution between fixed ends: straight line from bc0 to bc1
pub fn linear_steady_state(positions: &[f64], length: f64, bc0: f64, bc1: f64) -> Vec<f64> {
    positions
        .iter()
        .map(|x| bc0 + (bc1 - bc0) * x / length)
        .collect()
}
