//! Generated report persistence.
//!
//! Reports are stored as single JSON documents in the configured report
//! directory, named `<MRN>-(<date>).json` so a report is keyed by
//! `(MRN, report date)` and a regenerated report for the same day replaces
//! the earlier file. The serialised shape is the stable
//! [`ReportOutput`](crate::ReportOutput) schema, so exported files can be
//! re-imported or read by other systems.

use crate::config::CoreConfig;
use crate::report::ReportOutput;
use crate::{SuppliError, SuppliResult};
use chrono::NaiveDate;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use supplicore_types::Mrn;

/// Service for saving and re-loading generated reports.
#[derive(Clone, Debug)]
pub struct ReportStore {
    cfg: Arc<CoreConfig>,
}

impl ReportStore {
    /// Creates a new store bound to the configured report directory.
    pub fn new(cfg: Arc<CoreConfig>) -> Self {
        Self { cfg }
    }

    /// Path a report for `(mrn, date)` is stored at.
    pub fn path_for(&self, mrn: Mrn, date: NaiveDate) -> PathBuf {
        self.cfg.report_dir().join(format!("{mrn}-({date}).json"))
    }

    /// Persists a generated report, keyed by its MRN and report date.
    ///
    /// Returns the path the report was written to.
    ///
    /// # Errors
    ///
    /// Returns `SuppliError::StorageDirCreation`, `Serialization` or
    /// `FileWrite` on failure.
    pub fn save(&self, report: &ReportOutput) -> SuppliResult<PathBuf> {
        fs::create_dir_all(self.cfg.report_dir()).map_err(SuppliError::StorageDirCreation)?;

        let path = self.path_for(report.header.mrn, report.header.current_date);
        let json = serde_json::to_string_pretty(report).map_err(SuppliError::Serialization)?;
        fs::write(&path, json).map_err(SuppliError::FileWrite)?;

        tracing::info!(path = %path.display(), "saved report");
        Ok(path)
    }

    /// Loads a previously saved report from an arbitrary path.
    ///
    /// # Errors
    ///
    /// Returns `SuppliError::ReportNotFound` if the file does not exist, or
    /// a read/parse error variant otherwise.
    pub fn load(&self, path: &Path) -> SuppliResult<ReportOutput> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(SuppliError::ReportNotFound(path.display().to_string()));
            }
            Err(e) => return Err(SuppliError::FileRead(e)),
        };

        serde_json::from_str(&contents).map_err(SuppliError::Deserialization)
    }

    /// Loads the stored report for `(mrn, date)`.
    ///
    /// # Errors
    ///
    /// As for [`load`](Self::load).
    pub fn load_by_key(&self, mrn: Mrn, date: NaiveDate) -> SuppliResult<ReportOutput> {
        self.load(&self.path_for(mrn, date))
    }

    /// Lists the paths of all stored report files, sorted by filename.
    pub fn list(&self) -> Vec<PathBuf> {
        let mut paths = Vec::new();

        let iter = match fs::read_dir(self.cfg.report_dir()) {
            Ok(it) => it,
            Err(_) => return paths,
        };
        for entry in iter.flatten() {
            let path = entry.path();
            if path.is_file() && path.extension().is_some_and(|ext| ext == "json") {
                paths.push(path);
            }
        }

        paths.sort();
        paths
    }
}
