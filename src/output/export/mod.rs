//! Export module for simulation results.
//!
//! # Architecture
//!
//! This module defines the [`Exporter`] trait that abstracts the file format.
//! Each format is an independent implementation in its own sub-module and
//! reports failures through the shared [`ExportError`].
//!
//! # Available formats
//!
//! | Format | Module    | Content |
//! |--------|-----------|---------|
//! | Curve  | [`curve`] | `# Temperature` header, then `x value` lines |
//! | CSV    | [`csv`]   | optional `#` metadata block, header row, `x,value` rows |
//!
//! # Usage example
//!
//! ```rust,no_run
//! use heateq::output::export::{CurveExporter, Exporter};
//! use heateq::physics::HeatParameters;
//! use heateq::solver::{HeatSolver, SchemeKind};
//!
//! let result = HeatSolver::new(HeatParameters::default(), SchemeKind::Ftcs)?.run();
//! CurveExporter::default().export(&result, "heat_results_soln_final.curve")?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod csv;
pub mod curve;

pub use csv::{CsvConfig, CsvExporter, CsvMetadata};
pub use curve::{CurveExporter, CurveFile};

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::solver::SimulationResult;

/// Errors raised while writing results
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("nothing to export: the profile has no nodes")]
    EmptyProfile,

    #[error("non-finite value {value} at node {index}")]
    NonFinite { index: usize, value: f64 },

    #[error("plot rendering failed: {0}")]
    Plot(String),
}

impl ExportError {
    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        ExportError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Abstraction trait for all export formats.
///
/// Formats write the final profile of a [`SimulationResult`] as
/// `(x, value)` pairs with `x = index·dx`.
pub trait Exporter {
    /// Write `result` to `path`, replacing any existing file
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `result` contains no nodes
    /// - the format rejects a value (see the implementation)
    /// - the file cannot be created or written
    fn export(&self, result: &SimulationResult, path: impl AsRef<Path>) -> Result<(), ExportError>;
}

/// Reject empty or non-finite profiles
pub(crate) fn check_profile(values: &[f64]) -> Result<(), ExportError> {
    if values.is_empty() {
        return Err(ExportError::EmptyProfile);
    }

    if let Some((index, value)) = values.iter().enumerate().find(|(_, v)| !v.is_finite()) {
        return Err(ExportError::NonFinite { index, value: *value });
    }

    Ok(())
}
