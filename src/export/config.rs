//! Export destination settings.

use crate::error::ExportError;
use std::path::{Path, PathBuf};

/// Where exports are written.
///
/// ```
/// use u_triage::export::ExportConfig;
///
/// let config = ExportConfig::default().with_directory("/tmp/clinic");
/// assert_eq!(
///     config.snapshot_path(1_700_000_000),
///     std::path::Path::new("/tmp/clinic/hospital_queue_snapshot_1700000000.csv")
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExportConfig {
    /// Output directory. Must already exist.
    pub directory: PathBuf,

    /// Snapshot files are named `{snapshot_prefix}_{unix_seconds}.csv`.
    pub snapshot_prefix: String,

    /// File name for simulation service records.
    pub simulation_file: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("."),
            snapshot_prefix: String::from("hospital_queue_snapshot"),
            simulation_file: String::from("simulation_serviced.csv"),
        }
    }
}

impl ExportConfig {
    pub fn with_directory(mut self, directory: impl AsRef<Path>) -> Self {
        self.directory = directory.as_ref().to_path_buf();
        self
    }

    pub fn with_snapshot_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.snapshot_prefix = prefix.into();
        self
    }

    pub fn with_simulation_file(mut self, name: impl Into<String>) -> Self {
        self.simulation_file = name.into();
        self
    }

    pub fn snapshot_path(&self, unix_seconds: i64) -> PathBuf {
        self.directory
            .join(format!("{}_{}.csv", self.snapshot_prefix, unix_seconds))
    }

    pub fn simulation_path(&self) -> PathBuf {
        self.directory.join(&self.simulation_file)
    }

    pub fn validate(&self) -> Result<(), ExportError> {
        if self.simulation_file.trim().is_empty() {
            return Err(ExportError::InvalidConfig(
                "simulation_file must not be empty".into(),
            ));
        }
        if self.snapshot_prefix.trim().is_empty() {
            return Err(ExportError::InvalidConfig(
                "snapshot_prefix must not be empty".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_paths() {
        let config = ExportConfig::default();
        assert_eq!(
            config.simulation_path(),
            PathBuf::from(".").join("simulation_serviced.csv")
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_custom_names() {
        let config = ExportConfig::default()
            .with_directory("out")
            .with_snapshot_prefix("ward_a")
            .with_simulation_file("run.csv");
        assert_eq!(config.snapshot_path(5), PathBuf::from("out").join("ward_a_5.csv"));
        assert_eq!(config.simulation_path(), PathBuf::from("out").join("run.csv"));
    }

    #[test]
    fn test_validate_empty_names() {
        assert!(ExportConfig::default()
            .with_simulation_file(" ")
            .validate()
            .is_err());
        assert!(ExportConfig::default()
            .with_snapshot_prefix("")
            .validate()
            .is_err());
    }
}
