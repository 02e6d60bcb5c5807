//! JSON export of cascade results
//!
//! The whole [`CascadeResult`] (time axis, every stage trajectory and the run
//! metadata) is serialized with `serde_json`, so a saved run can be read back
//! with [`load_cascade_json`] and re-plotted or compared later.

use std::error::Error;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};

use crate::error::LeachResult;
use crate::solver::CascadeResult;

/// Write a cascade result as pretty-printed JSON
///
/// # Errors
///
/// Returns `Err` if the result is empty or the file cannot be written.
pub fn export_cascade_json(result: &CascadeResult, output_path: &str) -> Result<(), Box<dyn Error>> {
    if result.is_empty() {
        return Err("Empty data: the result holds no time points".into());
    }

    let mut writer = BufWriter::new(File::create(output_path)?);
    serde_json::to_writer_pretty(&mut writer, result)?;
    writer.flush()?;

    log::debug!("Exported cascade result to {}", output_path);
    Ok(())
}

/// Read back a result written by [`export_cascade_json`]
pub fn load_cascade_json(path: &str) -> LeachResult<CascadeResult> {
    let reader = BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(reader)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::StageState;
    use tempfile::NamedTempFile;

    #[test]
    fn test_json_preserves_result() {
        let mut result = CascadeResult::with_capacity(1, 2);
        result.time_points = vec![0.0, 0.5];
        result.trajectories[0] = vec![
            StageState::new(0.91, 0.00635, 0.00635, 250.0, 20.0),
            StageState::new(0.9099, 0.00634, 0.00635, 249.9, 20.0),
        ];
        result.add_metadata("solver", "Runge Kutta (RK4)");

        let file = NamedTempFile::new().unwrap();
        let path = file.path().to_str().unwrap();
        export_cascade_json(&result, path).unwrap();

        let loaded = load_cascade_json(path).unwrap();
        assert_eq!(loaded, result);
    }

    #[test]
    fn test_empty_result_is_rejected() {
        let file = NamedTempFile::new().unwrap();
        let empty = CascadeResult::with_capacity(1, 0);
        assert!(export_cascade_json(&empty, file.path().to_str().unwrap()).is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let error = load_cascade_json("/nonexistent/run.json").unwrap_err();
        assert!(error.is_configuration());
    }
}
