//! Output directory of a named run
//!
//! A run named `heat_results` writes into `heat_results/`:
//!
//! ```text
//! heat_results/
//! ├── heat_results_soln_00000.curve   snapshots, one per save interval
//! ├── heat_results_soln_00100.curve
//! ├── heat_results_soln_final.curve   final profile
//! ├── heat_results_soln_final.csv     optional
//! └── heat_results_soln_final.png     optional
//! ```
//!
//! Preparing the directory deletes any previous content with the same name.

use std::path::{Path, PathBuf};

use nalgebra::DVector;

use crate::error::HeatResult;
use crate::output::export::CurveExporter;
use crate::solver::{LogProgress, SolverObserver};

/// Directory and file naming of one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunDirectory {
    root: PathBuf,
    name: String,
}

impl RunDirectory {
    /// Create `<parent>/<name>`, removing it first if it exists
    ///
    /// # Errors
    ///
    /// [`HeatError::Io`](crate::error::HeatError::Io) if removal or creation fails.
    pub fn prepare(parent: impl AsRef<Path>, name: &str) -> HeatResult<Self> {
        let root = parent.as_ref().join(name);

        if root.is_dir() {
            log::info!("removing previous results in {}", root.display());
            std::fs::remove_dir_all(&root)?;
        }
        std::fs::create_dir_all(&root)?;

        Ok(Self {
            root,
            name: name.to_string(),
        })
    }

    /// Name without creating anything on disk
    pub fn describe(parent: impl AsRef<Path>, name: &str) -> Self {
        Self {
            root: parent.as_ref().join(name),
            name: name.to_string(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    fn file(&self, suffix: &str) -> PathBuf {
        self.root.join(format!("{}_soln_{suffix}", self.name))
    }

    /// `<name>_soln_final.curve`
    pub fn final_curve(&self) -> PathBuf {
        self.file("final.curve")
    }

    /// `<name>_soln_final.csv`
    pub fn final_csv(&self) -> PathBuf {
        self.file("final.csv")
    }

    /// `<name>_soln_final.png`
    pub fn final_plot(&self) -> PathBuf {
        self.file("final.png")
    }

    /// `<name>_soln_<iteration:05>.curve`
    pub fn snapshot(&self, iteration: usize) -> PathBuf {
        self.file(&format!("{iteration:05}.curve"))
    }
}

/// Observer writing snapshots into a [`RunDirectory`]
///
/// Progress goes to [`LogProgress`]. A snapshot that cannot be written is
/// logged and skipped; the run continues.
#[derive(Debug)]
pub struct SnapshotWriter<'a> {
    directory: &'a RunDirectory,
    exporter: CurveExporter,
    written: Vec<PathBuf>,
}

impl<'a> SnapshotWriter<'a> {
    pub fn new(directory: &'a RunDirectory) -> Self {
        Self {
            directory,
            exporter: CurveExporter::default(),
            written: Vec::new(),
        }
    }

    /// Snapshot files written so far, in order
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }
}

impl SolverObserver for SnapshotWriter<'_> {
    fn on_progress(&mut self, iteration: usize, change: f64) {
        LogProgress.on_progress(iteration, change);
    }

    fn on_snapshot(&mut self, iteration: usize, current: &DVector<f64>, dx: f64) {
        let path = self.directory.snapshot(iteration);
        match self.exporter.write_values(current.as_slice(), dx, &path) {
            Ok(()) => self.written.push(path),
            Err(e) => log::warn!("snapshot {iteration} not written: {e}"),
        }
    }
}

// =================================================================================================
// Tests
// =================================================================================================
