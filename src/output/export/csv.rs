//! CSV export of temperature profiles
//!
//! Writes the final profile as two columns, position and value, readable by
//! spreadsheet tools, pandas or gnuplot.
//!
//! # Quick Examples
//!
//! ## Minimal Export
//!
//! ```rust,ignore
//! use heateq::output::export::{CsvExporter, Exporter};
//!
//! CsvExporter::default().export(&result, "profile.csv")?;
//! ```
//!
//! **Output** (`profile.csv`):
//! ```csv
//! x (m),Temperature (K)
//! 0.000000,0.000000
//! 0.100000,0.103932
//! ...
//! ```
//!
//! ## With Metadata
//!
//! ```rust,ignore
//! let config = CsvConfig::default().with_metadata(CsvMetadata::from_result(&result));
//! CsvExporter::new(config).export(&result, "profile.csv")?;
//! ```
//!
//! **Output** (`profile.csv`):
//! ```csv
//! # Heat Equation Simulation Data
//! # Generated: 2026-02-11T15:30:00+00:00
//! # Scheme: FTCS
//! # Simulated Time: 2 s
//! # Iterations: 500
//! # Termination: max time
//! # alpha: 0.2
//! #
//! x (m),Temperature (K)
//! ...
//! ```

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use super::{check_profile, ExportError, Exporter};
use crate::solver::SimulationResult;

// =============================================================================
// Configuration Structures
// =============================================================================

/// Configuration for CSV export
///
/// # Example
///
/// ```rust
/// use heateq::output::export::CsvConfig;
///
/// let config = CsvConfig::european().precision(10);
/// assert_eq!(config.delimiter, ';');
/// assert_eq!(config.precision, 10);
/// ```
#[derive(Debug, Clone)]
pub struct CsvConfig {
    /// Column delimiter (default: ',')
    pub delimiter: char,

    /// Decimal separator (default: '.')
    pub decimal_separator: char,

    /// Number of decimal places (default: 6)
    pub precision: usize,

    /// Include metadata header comments (default: false)
    pub include_metadata: bool,

    /// Metadata to include in header
    pub metadata: Option<CsvMetadata>,

    /// Header of the position column (default: "x (m)")
    pub position_header: String,

    /// Header of the value column (default: "Temperature (K)")
    pub value_header: String,
}

impl Default for CsvConfig {
    fn default() -> Self {
        Self {
            delimiter: ',',
            decimal_separator: '.',
            precision: 6,
            include_metadata: false,
            metadata: None,
            position_header: "x (m)".to_string(),
            value_header: "Temperature (K)".to_string(),
        }
    }
}

impl CsvConfig {
    /// Semicolon-separated with a decimal comma
    pub fn european() -> Self {
        Self {
            delimiter: ';',
            decimal_separator: ',',
            ..Default::default()
        }
    }

    /// 12 decimal places
    pub fn high_precision() -> Self {
        Self {
            precision: 12,
            ..Default::default()
        }
    }

    /// Builder pattern: set delimiter
    pub fn delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Builder pattern: set precision
    pub fn precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    /// Builder pattern: enable metadata
    pub fn with_metadata(mut self, metadata: CsvMetadata) -> Self {
        self.include_metadata = true;
        self.metadata = Some(metadata);
        self
    }
}

/// Metadata for CSV header comments
///
/// Only `Some` fields are written.
#[derive(Debug, Clone, Default)]
pub struct CsvMetadata {
    /// Scheme display name
    pub scheme: Option<String>,

    /// Simulated time reached
    pub simulated_time: Option<f64>,

    /// Completed iterations
    pub iterations: Option<usize>,

    /// Termination label
    pub termination: Option<String>,

    /// Additional key/value pairs, written in order
    pub custom: Vec<(String, String)>,
}

impl CsvMetadata {
    /// Collect metadata from a finished run
    ///
    /// Result metadata entries are appended as custom pairs, sorted by key.
    pub fn from_result(result: &SimulationResult) -> Self {
        let mut custom: Vec<(String, String)> = result
            .metadata
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        custom.sort();

        Self {
            scheme: Some(result.scheme.clone()),
            simulated_time: Some(result.time),
            iterations: Some(result.iterations),
            termination: Some(result.termination.label().to_string()),
            custom,
        }
    }

    /// Add custom parameter
    pub fn add_custom(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.custom.push((key.into(), value.into()));
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

fn write_metadata_header(out: &mut impl Write, metadata: &CsvMetadata) -> std::io::Result<()> {
    writeln!(out, "# Heat Equation Simulation Data")?;
    writeln!(out, "# Generated: {}", chrono::Utc::now().to_rfc3339())?;

    if let Some(scheme) = &metadata.scheme {
        writeln!(out, "# Scheme: {scheme}")?;
    }
    if let Some(time) = metadata.simulated_time {
        writeln!(out, "# Simulated Time: {time} s")?;
    }
    if let Some(iterations) = metadata.iterations {
        writeln!(out, "# Iterations: {iterations}")?;
    }
    if let Some(termination) = &metadata.termination {
        writeln!(out, "# Termination: {termination}")?;
    }

    for (key, value) in &metadata.custom {
        writeln!(out, "# {key}: {value}")?;
    }

    writeln!(out, "#")
}

/// Format number with configured precision and decimal separator
fn format_number(value: f64, config: &CsvConfig) -> String {
    let formatted = format!("{:.prec$}", value, prec = config.precision);

    if config.decimal_separator != '.' {
        formatted.replace('.', &config.decimal_separator.to_string())
    } else {
        formatted
    }
}

fn write_table(
    out: &mut impl Write,
    positions: &[f64],
    values: &[f64],
    config: &CsvConfig,
) -> std::io::Result<()> {
    if config.include_metadata
        && let Some(metadata) = &config.metadata
    {
        write_metadata_header(out, metadata)?;
    }

    writeln!(out, "{}{}{}", config.position_header, config.delimiter, config.value_header)?;

    for (x, u) in positions.iter().zip(values) {
        writeln!(
            out,
            "{}{}{}",
            format_number(*x, config),
            config.delimiter,
            format_number(*u, config)
        )?;
    }

    Ok(())
}

// =============================================================================
// Export
// =============================================================================

/// Write a profile given as parallel position/value slices
///
/// # Errors
///
/// - empty or non-finite values
/// - position/value length mismatch (an `InvalidInput` I/O error)
/// - file creation errors
pub fn export_profile_csv(
    positions: &[f64],
    values: &[f64],
    output_path: impl AsRef<Path>,
    configuration: Option<&CsvConfig>,
) -> Result<(), ExportError> {
    let path = output_path.as_ref();

    check_profile(values)?;
    if positions.len() != values.len() {
        return Err(ExportError::io(
            path,
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("{} positions for {} values", positions.len(), values.len()),
            ),
        ));
    }

    let binding = CsvConfig::default();
    let configuration = configuration.unwrap_or(&binding);

    let file = File::create(path).map_err(|e| ExportError::io(path, e))?;
    let mut out = BufWriter::new(file);

    write_table(&mut out, positions, values, configuration)
        .and_then(|_| out.flush())
        .map_err(|e| ExportError::io(path, e))
}

/// [`Exporter`] writing CSV with a fixed configuration
#[derive(Debug, Clone, Default)]
pub struct CsvExporter {
    config: CsvConfig,
}

impl CsvExporter {
    pub fn new(config: CsvConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CsvConfig {
        &self.config
    }
}

impl Exporter for CsvExporter {
    fn export(&self, result: &SimulationResult, path: impl AsRef<Path>) -> Result<(), ExportError> {
        export_profile_csv(&result.positions(), result.values.as_slice(), path, Some(&self.config))
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::DVector;
    use std::collections::HashMap;
    use std::fs;
    use tempfile::NamedTempFile;

    use crate::solver::Termination;

    fn sample() -> SimulationResult {
        let mut result = SimulationResult {
            values: DVector::from_vec(vec![0.0, 0.25, 1.0]),
            dx: 0.5,
            iterations: 500,
            time: 2.0,
            last_change: 1e-9,
            termination: Termination::MaxTime { iterations: 500 },
            scheme: "FTCS".to_string(),
            metadata: HashMap::new(),
        };
        result.add_metadata("alpha", "0.2");
        result
    }

    #[test]
    fn test_basic_export() {
        let file = NamedTempFile::new().unwrap();
        CsvExporter::default().export(&sample(), file.path()).unwrap();

        let content = fs::read_to_string(file.path()).unwrap();
        let lines: Vec<&str> = content.lines().collect();

        assert_eq!(lines[0], "x (m),Temperature (K)");
        assert_eq!(lines[1], "0.000000,0.000000");
        assert_eq!(lines[2], "0.500000,0.250000");
        assert_eq!(lines[3], "1.000000,1.000000");
        assert_eq!(lines.len(), 4);
    }

    #[test]
    fn test_metadata_header() {
        let file = NamedTempFile::new().unwrap();
        let result = sample();
        let config = CsvConfig::default().with_metadata(CsvMetadata::from_result(&result));

        CsvExporter::new(config).export(&result, file.path()).unwrap();
        let content = fs::read_to_string(file.path()).unwrap();

        assert!(content.starts_with("# Heat Equation Simulation Data\n# Generated: "));
        assert!(content.contains("# Scheme: FTCS\n"));
        assert!(content.contains("# Simulated Time: 2 s\n"));
        assert!(content.contains("# Iterations: 500\n"));
        assert!(content.contains("# Termination: max time\n"));
        assert!(content.contains("# alpha: 0.2\n"));
        assert!(content.contains("#\nx (m),Temperature (K)\n"));
    }

    #[test]
    fn test_high_precision_with_custom_entries() {
        let file = NamedTempFile::new().unwrap();
        let result = sample();
        let mut metadata = CsvMetadata::from_result(&result);
        metadata.add_custom("run", "rod");

        CsvExporter::new(CsvConfig::high_precision().with_metadata(metadata))
            .export(&result, file.path())
            .unwrap();
        let content = fs::read_to_string(file.path()).unwrap();

        assert!(content.contains("# alpha: 0.2\n# run: rod\n#\n"));
        assert!(content.contains("\n0.500000000000,0.250000000000\n"));
    }

    #[test]
    fn test_european_format() {
        let file = NamedTempFile::new().unwrap();
        CsvExporter::new(CsvConfig::european().precision(2))
            .export(&sample(), file.path())
            .unwrap();

        let content = fs::read_to_string(file.path()).unwrap();
        assert!(content.contains("0,50;0,25\n"));
    }

    #[test]
    fn test_non_finite_rejected() {
        let file = NamedTempFile::new().unwrap();
        let err = export_profile_csv(&[0.0, 1.0], &[0.0, f64::NAN], file.path(), None).unwrap_err();

        assert!(matches!(err, ExportError::NonFinite { index: 1, .. }));
    }

    #[test]
    fn test_empty_rejected() {
        let file = NamedTempFile::new().unwrap();
        let err = export_profile_csv(&[], &[], file.path(), None).unwrap_err();

        assert!(matches!(err, ExportError::EmptyProfile));
    }

    #[test]
    fn test_length_mismatch() {
        let file = NamedTempFile::new().unwrap();
        assert!(export_profile_csv(&[0.0], &[0.0, 1.0], file.path(), None).is_err());
    }
}
