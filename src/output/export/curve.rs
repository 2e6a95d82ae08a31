//! Plain-text curve files
//!
//! One comment line naming the variable, then one `x value` line per node:
//!
//! ```text
//! # Temperature
//! 0.0 0.0
//! 0.1 0.10393...
//! ...
//! 1.0 1.0
//! ```
//!
//! Values are written with Rust's shortest round-trip float formatting, so a
//! file read back yields the exact vector. Non-finite values are written as
//! they are (`NaN`, `inf`): a diverged run still leaves a trace.

use std::error::Error;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use nalgebra::DVector;

use super::{ExportError, Exporter};
use crate::solver::{ResultSink, SimulationResult};

/// Default variable name of the header line
pub const DEFAULT_CURVE_LABEL: &str = "Temperature";

/// Writer for `.curve` files
#[derive(Debug, Clone, PartialEq)]
pub struct CurveExporter {
    /// Name written after `# ` on the first line
    pub label: String,
}

impl Default for CurveExporter {
    fn default() -> Self {
        Self {
            label: DEFAULT_CURVE_LABEL.to_string(),
        }
    }
}

impl CurveExporter {
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Write `values` sampled at `x = index·dx`
    pub fn write_values(&self, values: &[f64], dx: f64, path: impl AsRef<Path>) -> Result<(), ExportError> {
        let path = path.as_ref();
        if values.is_empty() {
            return Err(ExportError::EmptyProfile);
        }

        let file = File::create(path).map_err(|e| ExportError::io(path, e))?;
        let mut out = BufWriter::new(file);

        write_lines(&mut out, &self.label, values, dx)
            .and_then(|_| out.flush())
            .map_err(|e| ExportError::io(path, e))?;

        log::debug!("wrote {} nodes to {}", values.len(), path.display());
        Ok(())
    }
}

fn write_lines(out: &mut impl Write, label: &str, values: &[f64], dx: f64) -> std::io::Result<()> {
    writeln!(out, "# {label}")?;
    for (i, value) in values.iter().enumerate() {
        writeln!(out, "{:?} {:?}", i as f64 * dx, value)?;
    }
    Ok(())
}

impl Exporter for CurveExporter {
    fn export(&self, result: &SimulationResult, path: impl AsRef<Path>) -> Result<(), ExportError> {
        self.write_values(result.values.as_slice(), result.dx, path)
    }
}

/// [`ResultSink`] writing the final vector to a fixed path
#[derive(Debug, Clone)]
pub struct CurveFile {
    path: PathBuf,
    exporter: CurveExporter,
}

impl CurveFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            exporter: CurveExporter::default(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ResultSink for CurveFile {
    fn accept(&mut self, values: &DVector<f64>, dx: f64) -> Result<(), Box<dyn Error>> {
        self.exporter.write_values(values.as_slice(), dx, &self.path)?;
        Ok(())
    }
}

/// Read a curve file back into `(x, value)` pairs, skipping `#` lines
pub fn read_curve(path: impl AsRef<Path>) -> Result<Vec<(f64, f64)>, ExportError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|e| ExportError::io(path, e))?;

    let invalid = |line: &str| {
        ExportError::io(
            path,
            std::io::Error::new(std::io::ErrorKind::InvalidData, format!("malformed curve line {line:?}")),
        )
    };

    let mut points = Vec::new();
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let mut fields = line.split_whitespace();
        let x = fields.next().and_then(|s| s.parse::<f64>().ok());
        let u = fields.next().and_then(|s| s.parse::<f64>().ok());
        match (x, u) {
            (Some(x), Some(u)) => points.push((x, u)),
            _ => return Err(invalid(line)),
        }
    }

    Ok(points)
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::fs;
    use tempfile::tempdir;

    use crate::solver::Termination;

    fn result(values: Vec<f64>, dx: f64) -> SimulationResult {
        SimulationResult {
            values: DVector::from_vec(values),
            dx,
            iterations: 1,
            time: 0.004,
            last_change: 0.0,
            termination: Termination::MaxTime { iterations: 1 },
            scheme: "FTCS".to_string(),
            metadata: HashMap::new(),
        }
    }

    #[test]
    fn test_curve_layout() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("run_soln_final.curve");

        CurveExporter::default()
            .export(&result(vec![0.0, 0.5, 1.0], 0.5), &path)
            .unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(text, "# Temperature\n0.0 0.0\n0.5 0.5\n1.0 1.0\n");
    }

    #[test]
    fn test_custom_label() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("u.curve");

        CurveExporter::default()
            .with_label("Error")
            .write_values(&[1.0], 0.1, &path)
            .unwrap();

        assert!(fs::read_to_string(&path).unwrap().starts_with("# Error\n"));
    }

    #[test]
    fn test_round_trip_is_exact() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("exact.curve");
        let values: Vec<f64> = (0..11).map(|i| (i as f64 * 0.37).sin() / 3.0).collect();

        CurveExporter::default().write_values(&values, 0.1, &path).unwrap();
        let points = read_curve(&path).unwrap();

        assert_eq!(points.len(), 11);
        for (i, (x, u)) in points.iter().enumerate() {
            assert_eq!(*x, i as f64 * 0.1);
            assert_eq!(*u, values[i]);
        }
    }

    #[test]
    fn test_empty_profile_rejected() {
        let dir = tempdir().unwrap();
        let err = CurveExporter::default()
            .write_values(&[], 0.1, dir.path().join("empty.curve"))
            .unwrap_err();
        assert!(matches!(err, ExportError::EmptyProfile));
    }

    #[test]
    fn test_missing_directory_is_io_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing").join("x.curve");

        let err = CurveExporter::default().write_values(&[1.0], 0.1, &path).unwrap_err();
        assert!(matches!(err, ExportError::Io { .. }));
    }

    #[test]
    fn test_curve_file_as_sink() {
        let dir = tempdir().unwrap();
        let mut sink = CurveFile::new(dir.path().join("sink.curve"));

        result(vec![2.0, 3.0], 1.0).deliver(&mut sink).unwrap();

        assert_eq!(read_curve(sink.path()).unwrap(), vec![(0.0, 2.0), (1.0, 3.0)]);
    }

    #[test]
    fn test_malformed_line() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.curve");
        fs::write(&path, "# Temperature\n0.0 zero\n").unwrap();

        assert!(read_curve(&path).is_err());
    }
}
