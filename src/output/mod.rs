//! Output module for simulation results
//!
//! Everything a run hands to the outside world:
//! - **Export**: `.curve` and CSV files of the final profile
//! - **Visualization**: PNG/SVG plots using plotters
//! - **Run directory**: naming and lifecycle of a run's output folder, and
//!   the snapshot observer writing into it
//!
//! # Architecture
//!
//! ```text
//! output/
//! ├── mod.rs              ← This file
//! ├── run_directory.rs    ← <runame>/ lifecycle, snapshot files
//! ├── export/             ← Data export
//! │   ├── mod.rs          ← Exporter trait, ExportError
//! │   ├── curve.rs
//! │   └── csv.rs
//! └── visualization/      ← Plots
//!     ├── config.rs
//!     └── profile.rs
//! ```
//!
//! # Design Philosophy
//!
//! Output is a collaborator of the engine, never part of it: exporters
//! consume a finished [`SimulationResult`](crate::solver::SimulationResult)
//! or plug in as a [`ResultSink`](crate::solver::ResultSink) /
//! [`SolverObserver`](crate::solver::SolverObserver). A failing writer
//! cannot affect the numbers.

pub mod export;
pub mod run_directory;
pub mod visualization;

pub use export::{CsvConfig, CsvExporter, CsvMetadata, CurveExporter, CurveFile, ExportError, Exporter};
pub use run_directory::{RunDirectory, SnapshotWriter};
pub use visualization::{plot_profile, plot_profiles, PlotConfig};
