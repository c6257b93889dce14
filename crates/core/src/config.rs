//! Core runtime configuration and operator settings.
//!
//! [`CoreConfig`] is resolved once at process startup and then passed into
//! core services, so no service reads environment variables or settings
//! files during normal operation. [`Settings`] is the on-disk shape of the
//! operator's `config.json`, which survives from the original desktop
//! deployment and can be rewritten in place.

use crate::constants::{DEFAULT_DATA_DIR, DEFAULT_REPORT_DIR, PATIENTS_DIR_NAME, SUPPLEMENTS_DIR_NAME};
use crate::{SuppliError, SuppliResult};
use std::fs;
use std::path::{Path, PathBuf};

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    data_dir: PathBuf,
    report_dir: PathBuf,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    ///
    /// # Errors
    ///
    /// Returns `SuppliError::InvalidInput` if either directory path is empty.
    pub fn new(data_dir: PathBuf, report_dir: PathBuf) -> SuppliResult<Self> {
        if data_dir.as_os_str().is_empty() {
            return Err(SuppliError::InvalidInput("data_dir cannot be empty".into()));
        }
        if report_dir.as_os_str().is_empty() {
            return Err(SuppliError::InvalidInput(
                "report_dir cannot be empty".into(),
            ));
        }

        Ok(Self {
            data_dir,
            report_dir,
        })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn patients_dir(&self) -> PathBuf {
        self.data_dir.join(PATIENTS_DIR_NAME)
    }

    pub fn supplements_dir(&self) -> PathBuf {
        self.data_dir.join(SUPPLEMENTS_DIR_NAME)
    }

    pub fn report_dir(&self) -> &Path {
        &self.report_dir
    }
}

/// Operator settings persisted in `config.json`.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Settings {
    /// Directory holding patient and supplement records.
    pub data_dir: String,
    /// Directory that exported report files are written to.
    pub report_dir: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: DEFAULT_DATA_DIR.to_string(),
            report_dir: DEFAULT_REPORT_DIR.to_string(),
        }
    }
}

impl Settings {
    /// Loads settings from the given file, falling back to defaults when the
    /// file does not exist.
    ///
    /// A missing settings file is the normal first-run state and is not an
    /// error; a present-but-unreadable or malformed file is.
    ///
    /// # Errors
    ///
    /// Returns `SuppliError::FileRead` or `SuppliError::Deserialization` if
    /// the file exists but cannot be read or parsed.
    pub fn load_or_default(path: &Path) -> SuppliResult<Self> {
        if !path.exists() {
            tracing::info!("settings file {} not found, using defaults", path.display());
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path).map_err(SuppliError::FileRead)?;
        serde_json::from_str(&contents).map_err(SuppliError::Deserialization)
    }

    /// Writes the settings to the given file, replacing existing values.
    ///
    /// # Errors
    ///
    /// Returns `SuppliError::Serialization` or `SuppliError::FileWrite` on
    /// failure.
    pub fn save(&self, path: &Path) -> SuppliResult<()> {
        let json = serde_json::to_string_pretty(self).map_err(SuppliError::Serialization)?;
        fs::write(path, json).map_err(SuppliError::FileWrite)?;
        Ok(())
    }

    /// Builds the startup [`CoreConfig`] from these settings.
    ///
    /// # Errors
    ///
    /// Returns `SuppliError::InvalidInput` if either configured path is empty.
    pub fn to_core_config(&self) -> SuppliResult<CoreConfig> {
        CoreConfig::new(
            PathBuf::from(&self.data_dir),
            PathBuf::from(&self.report_dir),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn load_or_default_returns_defaults_for_missing_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let settings = Settings::load_or_default(&temp_dir.path().join("config.json"))
            .expect("missing file should fall back to defaults");

        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn settings_round_trip_through_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("config.json");

        let settings = Settings {
            data_dir: "clinic_data".into(),
            report_dir: "clinic_reports".into(),
        };
        settings.save(&path).expect("save should succeed");

        let reloaded = Settings::load_or_default(&path).expect("load should succeed");
        assert_eq!(reloaded, settings);
    }

    #[test]
    fn load_or_default_rejects_malformed_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("config.json");
        std::fs::write(&path, "{ not json").expect("should write file");

        let err = Settings::load_or_default(&path).expect_err("malformed file should fail");
        assert!(matches!(err, SuppliError::Deserialization(_)));
    }

    #[test]
    fn core_config_rejects_empty_paths() {
        let err = CoreConfig::new(PathBuf::new(), PathBuf::from("report_out"))
            .expect_err("empty data_dir should fail");
        assert!(matches!(err, SuppliError::InvalidInput(_)));
    }
}
