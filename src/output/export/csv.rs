//! CSV export of cascade results
//!
//! Writes one row per time point: the time, then one concentration column per
//! (species, stage). The file opens in Excel, pandas, MATLAB and most data
//! analysis tools.
//!
//! # Features
//!
//! - **Metadata header**: optional `#` comment lines with run information
//! - **Customizable**: delimiter, decimal separator, precision, headers
//! - **Downsampling**: uniform, always keeping the first and last points
//! - **Geometry columns**: optional bed height and particle radii per stage
//! - **Validation**: rejects empty results and NaN/Inf values
//!
//! # Example
//!
//! ```rust,ignore
//! use leach_rs::output::export::{export_cascade_csv, CsvConfig, CsvMetadata};
//!
//! let metadata = CsvMetadata::from_result(&result);
//! let config = CsvConfig::default().with_metadata(metadata);
//!
//! export_cascade_csv(&result, &["NO3", "Mg"], "heap.csv", Some(&config))?;
//! ```
//!
//! **Output** (`heap.csv`, 3 stages, metadata enabled):
//! ```csv
//! # Heap Leaching Simulation Data
//! # Generated: 2026-02-11T15:30:00+00:00
//! # Model: Shrinking-core leaching
//! # Solver: Runge Kutta (RK4)
//! # Total Time: 450 h
//! # Time Steps: 900
//! #
//! Time (h),NO3 stage 1 (g/L),NO3 stage 2 (g/L),NO3 stage 3 (g/L),Mg stage 1 (g/L),...
//! 0.000000,250.000000,250.000000,250.000000,20.000000,...
//! ```

use std::error::Error;
use std::fs::File;
use std::io::{BufWriter, Write};

use crate::physics::{Species, StageState};
use crate::solver::CascadeResult;

// =============================================================================
// Configuration Structures
// =============================================================================

/// Configuration for CSV export
///
/// # Example
///
/// ```rust
/// use leach_rs::output::export::CsvConfig;
///
/// let config = CsvConfig {
///     delimiter: ';',
///     precision: 10,
///     n_points: Some(100),
///     ..Default::default()
/// };
/// assert_eq!(config.decimal_separator, '.');
/// ```
#[derive(Clone, Debug)]
pub struct CsvConfig {
    /// Column delimiter (default: ',')
    pub delimiter: char,

    /// Decimal separator (default: '.')
    pub decimal_separator: char,

    /// Number of decimal places for floating-point values (default: 6)
    pub precision: usize,

    /// Include metadata header comments (default: false)
    pub include_metadata: bool,

    /// Metadata to include in header
    pub metadata: Option<CsvMetadata>,

    /// Custom header for time column (default: "Time (h)")
    pub time_header: String,

    /// Unit appended to concentration headers (default: "g/L")
    pub concentration_unit: String,

    /// Also write bed height and particle radii of every stage (default: false)
    pub include_geometry: bool,

    /// Uniformly downsample to this many rows (default: None, all rows)
    pub n_points: Option<usize>,
}

impl Default for CsvConfig {
    fn default() -> Self {
        Self {
            delimiter: ',',
            decimal_separator: '.',
            precision: 6,
            include_metadata: false,
            metadata: None,
            time_header: "Time (h)".to_string(),
            concentration_unit: "g/L".to_string(),
            include_geometry: false,
            n_points: None,
        }
    }
}

impl CsvConfig {
    /// Create config with European CSV format (semicolon, comma for decimal)
    pub fn european() -> Self {
        Self {
            delimiter: ';',
            decimal_separator: ',',
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

    /// Builder pattern: downsample to `n_points` rows
    pub fn downsample(mut self, n_points: usize) -> Self {
        self.n_points = Some(n_points);
        self
    }

    /// Builder pattern: add height and radius columns
    pub fn with_geometry(mut self) -> Self {
        self.include_geometry = true;
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
/// All fields are optional. Only non-None fields will be included in the CSV header.
#[derive(Clone, Debug, Default)]
pub struct CsvMetadata {
    /// Model name
    pub model_name: Option<String>,

    /// Solver name (e.g., "Runge Kutta (RK4)")
    pub solver_name: Option<String>,

    /// Total simulation time (hours)
    pub total_time: Option<f64>,

    /// Number of time steps
    pub time_steps: Option<usize>,

    /// Number of stages
    pub stages: Option<usize>,

    /// Additional custom parameters
    pub custom: Vec<(String, String)>,
}

impl CsvMetadata {
    /// Create metadata from the run information stored in a result
    pub fn from_result(result: &CascadeResult) -> Self {
        Self {
            model_name: result.get_metadata("model").cloned(),
            solver_name: result.get_metadata("solver").cloned(),
            total_time: result.get_metadata("total time").and_then(|v| v.parse().ok()),
            time_steps: result.get_metadata("time steps").and_then(|v| v.parse().ok()),
            stages: Some(result.stage_count()),
            custom: Vec::new(),
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

/// Write metadata header comments
fn write_metadata_header<W: Write>(
    writer: &mut W,
    metadata: &CsvMetadata,
) -> Result<(), Box<dyn Error>> {
    writeln!(writer, "# Heap Leaching Simulation Data")?;

    let now = chrono::Utc::now();
    writeln!(writer, "# Generated: {}", now.to_rfc3339())?;

    if let Some(model) = &metadata.model_name {
        writeln!(writer, "# Model: {}", model)?;
    }
    if let Some(solver) = &metadata.solver_name {
        writeln!(writer, "# Solver: {}", solver)?;
    }
    if let Some(total_time) = metadata.total_time {
        writeln!(writer, "# Total Time: {} h", total_time)?;
    }
    if let Some(time_steps) = metadata.time_steps {
        writeln!(writer, "# Time Steps: {}", time_steps)?;
    }
    if let Some(stages) = metadata.stages {
        writeln!(writer, "# Stages: {}", stages)?;
    }
    for (key, value) in &metadata.custom {
        writeln!(writer, "# {}: {}", key, value)?;
    }

    writeln!(writer, "#")?;
    Ok(())
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

/// Row indices of a uniform downsampling to `n_points` rows
///
/// The first and last rows are always kept; `None` or a count at least the
/// number of rows keeps everything.
pub(crate) fn sample_indices(len: usize, n_points: Option<usize>) -> Vec<usize> {
    match n_points {
        _ if len <= 2 => (0..len).collect(),
        Some(n) if n < len => {
            let n = n.max(2);
            let last = (len - 1) as f64;
            let mut indices: Vec<usize> = (0..n)
                .map(|i| (i as f64 * last / (n - 1) as f64).round() as usize)
                .collect();
            indices.dedup();
            indices
        }
        _ => (0..len).collect(),
    }
}

/// Column headers after the time column
fn column_headers(stages: usize, species_names: &[&str; 2], config: &CsvConfig) -> Vec<String> {
    let mut headers = Vec::new();
    for name in species_names {
        for stage in 1..=stages {
            headers.push(format!("{name} stage {stage} ({})", config.concentration_unit));
        }
    }
    if config.include_geometry {
        for stage in 1..=stages {
            headers.push(format!("Height stage {stage} (m)"));
            for name in species_names {
                headers.push(format!("Radius {name} stage {stage} (m)"));
            }
        }
    }
    headers
}

/// Values of one row, in header order
fn row_values(states: &[&StageState], include_geometry: bool) -> Vec<f64> {
    let mut values = Vec::new();
    for species in Species::ALL {
        values.extend(states.iter().map(|state| state.concentration(species)));
    }
    if include_geometry {
        for state in states {
            values.push(state.height());
            values.extend(Species::ALL.map(|species| state.radius(species)));
        }
    }
    values
}

// =============================================================================
// Export Function
// =============================================================================

/// Export a cascade result to CSV
///
/// # Arguments
///
/// * `result` - Cascade result
/// * `species_names` - Names of species A and B (for column headers)
/// * `output_path` - Output file path
/// * `configuration` - Optional CSV configuration (uses default if None)
///
/// # Errors
///
/// - Empty result
/// - NaN or Inf values
/// - File creation errors
pub fn export_cascade_csv(
    result: &CascadeResult,
    species_names: &[&str; 2],
    output_path: &str,
    configuration: Option<&CsvConfig>,
) -> Result<(), Box<dyn Error>> {
    // ============================= Validation =============================

    if result.is_empty() || result.stage_count() == 0 {
        return Err("Empty data: the result holds no time points".into());
    }

    if result.time_points.iter().any(|t| !t.is_finite()) {
        return Err("Invalid data: NaN or Inf detected in time series".into());
    }

    for (stage, trajectory) in result.trajectories.iter().enumerate() {
        if trajectory.len() != result.len() {
            return Err(format!(
                "Stage {} length mismatch: {} states versus {} time points",
                stage + 1,
                trajectory.len(),
                result.len()
            )
            .into());
        }
        if trajectory.iter().any(|state| !state.is_finite()) {
            return Err(format!("Invalid data: NaN or Inf detected in stage {}", stage + 1).into());
        }
    }

    // ============================= Configuration ==========================

    let binding = CsvConfig::default();
    let configuration = configuration.unwrap_or(&binding);

    // ============================= Open File ==============================

    let mut file = BufWriter::new(File::create(output_path)?);

    // ============================= Write Metadata =========================

    if configuration.include_metadata
        && let Some(metadata) = &configuration.metadata
    {
        write_metadata_header(&mut file, metadata)?;
    }

    // ============================= Write Header ===========================

    let delimiter = configuration.delimiter.to_string();
    let headers = column_headers(result.stage_count(), species_names, configuration);
    writeln!(
        file,
        "{}{}{}",
        configuration.time_header,
        delimiter,
        headers.join(&delimiter)
    )?;

    // ============================= Write Data =============================

    for index in sample_indices(result.len(), configuration.n_points) {
        let states: Vec<&StageState> = result
            .trajectories
            .iter()
            .map(|trajectory| &trajectory[index])
            .collect();

        write!(file, "{}", format_number(result.time_points[index], configuration))?;
        for value in row_values(&states, configuration.include_geometry) {
            write!(file, "{}{}", delimiter, format_number(value, configuration))?;
        }
        writeln!(file)?;
    }

    file.flush()?;
    log::debug!("Exported cascade result to {}", output_path);

    Ok(())
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::NamedTempFile;

    fn sample(points: usize) -> CascadeResult {
        let mut result = CascadeResult::with_capacity(2, points);
        result.time_points = (0..points).map(|n| n as f64 * 0.5).collect();
        result.trajectories = (0..2)
            .map(|stage| {
                (0..points)
                    .map(|n| StageState::new(0.9, 0.006, 0.005, 250.0 - (n + stage) as f64, 20.0))
                    .collect()
            })
            .collect();
        result
    }

    fn export(result: &CascadeResult, config: Option<&CsvConfig>) -> String {
        let file = NamedTempFile::new().unwrap();
        let path = file.path().to_str().unwrap();
        export_cascade_csv(result, &["NO3", "Mg"], path, config).unwrap();
        fs::read_to_string(path).unwrap()
    }

    #[test]
    fn test_header_and_rows() {
        let content = export(&sample(3), None);
        let lines: Vec<&str> = content.lines().collect();

        assert_eq!(lines.len(), 4);
        assert_eq!(
            lines[0],
            "Time (h),NO3 stage 1 (g/L),NO3 stage 2 (g/L),Mg stage 1 (g/L),Mg stage 2 (g/L)"
        );
        assert_eq!(lines[1], "0.000000,250.000000,249.000000,20.000000,20.000000");
        assert_eq!(lines[3], "1.000000,248.000000,247.000000,20.000000,20.000000");
    }

    #[test]
    fn test_european_format() {
        let config = CsvConfig::european().precision(2);
        let content = export(&sample(2), Some(&config));
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines[2], "0,50;249,00;248,00;20,00;20,00");
    }

    #[test]
    fn test_metadata_header() {
        let mut metadata = CsvMetadata {
            model_name: Some("Shrinking-core leaching".to_string()),
            time_steps: Some(2),
            ..Default::default()
        };
        metadata.add_custom("Flow rate", "0.000154");
        let config = CsvConfig::default().with_metadata(metadata);

        let content = export(&sample(3), Some(&config));
        assert!(content.starts_with("# Heap Leaching Simulation Data\n# Generated: "));
        assert!(content.contains("# Model: Shrinking-core leaching\n"));
        assert!(content.contains("# Time Steps: 2\n"));
        assert!(content.contains("# Flow rate: 0.000154\n"));
        assert!(!content.contains("# Solver"));
    }

    #[test]
    fn test_geometry_columns() {
        let config = CsvConfig::default().with_geometry().precision(3);
        let content = export(&sample(1), Some(&config));
        let lines: Vec<&str> = content.lines().collect();
        assert!(lines[0].ends_with(
            "Height stage 2 (m),Radius NO3 stage 2 (m),Radius Mg stage 2 (m)"
        ));
        assert!(lines[1].ends_with("0.900,0.006,0.005"));
    }

    #[test]
    fn test_downsampling_keeps_first_and_last() {
        assert_eq!(sample_indices(11, Some(3)), vec![0, 5, 10]);
        assert_eq!(sample_indices(901, Some(2)), vec![0, 900]);
        assert_eq!(sample_indices(5, Some(1)), vec![0, 4]);
        assert_eq!(sample_indices(5, Some(10)), vec![0, 1, 2, 3, 4]);
        assert_eq!(sample_indices(5, None).len(), 5);
        assert_eq!(sample_indices(1, Some(3)), vec![0]);

        let config = CsvConfig::default().downsample(4);
        let content = export(&sample(10), Some(&config));
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 5);
        assert!(lines[1].starts_with("0.000000,"));
        assert!(lines[4].starts_with("4.500000,"));
    }

    #[test]
    fn test_rejects_invalid_data() {
        let file = NamedTempFile::new().unwrap();
        let path = file.path().to_str().unwrap();

        let empty = CascadeResult::with_capacity(2, 0);
        assert!(export_cascade_csv(&empty, &["A", "B"], path, None).is_err());

        let mut broken = sample(3);
        broken.trajectories[1][1] = StageState::new(0.9, 0.006, f64::NAN, 1.0, 1.0);
        let error = export_cascade_csv(&broken, &["A", "B"], path, None).unwrap_err();
        assert!(error.to_string().contains("stage 2"));
    }

    #[test]
    fn test_invalid_path() {
        let error = export_cascade_csv(&sample(2), &["A", "B"], "/nonexistent/dir/out.csv", None);
        assert!(error.is_err());
    }
}
