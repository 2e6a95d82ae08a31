//! Performance benchmarks for the finite-difference schemes
//!
//! Compares FTCS, Upwind 1.5 and Crank-Nicolson on identical problems.
//!
//! # What We're Measuring
//!
//! 1. **Single update**: cost of one `Scheme::update` on a fixed state
//!    - FTCS: 3-point stencil, one pass
//!    - Upwind 1.5: 5-point stencil, one pass
//!    - Crank-Nicolson: one forward and one back substitution (O(n))
//!
//! 2. **Full run**: the driver loop including change tracking
//!
//! # Running Benchmarks
//!
//! ```bash
//! cargo bench --bench scheme_performance
//!
//! # Only the single-update group
//! cargo bench --bench scheme_performance update
//! ```
//!
//! # Expected Results
//!
//! All three schemes scale linearly with the node count. Crank-Nicolson
//! pays a constant factor for the substitution sweeps but accepts any `dt`.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::hint::black_box;

use heateq::physics::{Grid, HeatParameters, HeatState, InitialCondition};
use heateq::solver::{HeatSolver, Scheme, SchemeKind};

// =================================================================================================
// Problem Setup
// =================================================================================================

/// Unit rod, alpha 0.2, `dt` at 40% of the FTCS limit for the given `dx`
fn parameters(dx: f64, max_time: f64) -> HeatParameters {
    let dt = 0.4 * 0.5 * dx * dx / 0.2;
    HeatParameters::default()
        .with_dx(dx)
        .with_dt(dt)
        .with_max_time(max_time)
        .with_initial_condition("step(1,0.5,0)")
        .with_output_interval(0)
}

fn state(params: &HeatParameters) -> (Grid, HeatState) {
    let grid = Grid::new(params).unwrap();
    let ic = InitialCondition::parse(&params.initial_condition).unwrap();
    let mut state = HeatState::zeros(grid.nx);
    ic.apply(&mut state.previous, grid.dx);
    (grid, state)
}

// =================================================================================================
// Benchmark Functions
// =================================================================================================

/// One update per scheme across grid sizes
///
/// # Test Configuration
///
/// - **dx**: 0.1, 0.01, 0.001 (11, 101, 1001 nodes)
fn benchmark_single_update(c: &mut Criterion) {
    let mut group = c.benchmark_group("Single update");

    for dx in [0.1, 0.01, 0.001] {
        let params = parameters(dx, 1.0);
        let (grid, initial) = state(&params);
        group.throughput(Throughput::Elements(grid.nx as u64));

        for kind in SchemeKind::ALL {
            let scheme = kind.build(&grid).unwrap();

            group.bench_with_input(BenchmarkId::new(kind.to_string(), grid.nx), &initial, |b, initial| {
                let mut state = initial.clone();
                b.iter(|| black_box(scheme.update(black_box(&mut state))));
            });
        }
    }

    group.finish();
}

/// Complete driver runs on the reference scenario and a 101-node grid
fn benchmark_full_run(c: &mut Criterion) {
    let mut group = c.benchmark_group("Full run");
    group.sample_size(20);

    let configurations = [(0.1, 2.0, "11 nodes"), (0.01, 0.1, "101 nodes")];

    for (dx, max_time, label) in configurations {
        let params = parameters(dx, max_time);

        for kind in SchemeKind::ALL {
            group.bench_function(format!("{kind} {label}"), |b| {
                b.iter(|| {
                    let mut solver = HeatSolver::new(black_box(params.clone()), kind).unwrap();
                    solver.run()
                });
            });
        }
    }

    group.finish();
}

criterion_group!(benches, benchmark_single_update, benchmark_full_run);
criterion_main!(benches);
