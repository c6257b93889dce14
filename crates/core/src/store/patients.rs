//! Patient record management.
//!
//! This module provides creation, lookup, update, deletion and listing of
//! patient records.
//!
//! ## Storage Layout
//!
//! Patients are stored as JSON files in a sharded structure:
//!
//! ```text
//! patients/
//!   <shard>/
//!     <mrn>/
//!       patient.json
//! ```
//!
//! where `<shard>` is the MRN modulo [`PATIENT_SHARDS`], zero-padded to two
//! digits. Sharding keeps individual directories small without requiring an
//! index file.
//!
//! ## Pure Data Operations
//!
//! This module contains **only** data operations. Argument parsing, prompts
//! and terminal output belong in the `supplicore` binary.

use crate::config::CoreConfig;
use crate::constants::{PATIENT_FILE_NAME, PATIENT_SHARDS};
use crate::report::PatientLookup;
use crate::validation::validate_patient;
use crate::{SuppliError, SuppliResult};
use chrono::{DateTime, NaiveDate, Utc};
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use supplicore_types::{Mrn, NonEmptyText, Sex};

/// A stored patient record.
///
/// Field names, types and units form a stable schema: weight in kilograms,
/// dates in ISO 8601. The record is read-only to the report engine.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PatientRecord {
    pub mrn: Mrn,
    pub first_name: NonEmptyText,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub middle_name: Option<String>,
    pub last_name: NonEmptyText,
    pub sex: Sex,
    pub date_of_birth: NaiveDate,
    pub weight_kg: f64,
    /// UTC timestamp of the last write, set by the store.
    #[serde(default)]
    pub last_updated: Option<DateTime<Utc>>,
}

/// Service for managing patient record storage.
#[derive(Clone, Debug)]
pub struct PatientStore {
    cfg: Arc<CoreConfig>,
}

impl PatientStore {
    /// Creates a new store bound to the configured data directory.
    pub fn new(cfg: Arc<CoreConfig>) -> Self {
        Self { cfg }
    }

    fn record_dir(&self, mrn: Mrn) -> PathBuf {
        let shard = format!("{:02}", mrn.get() % PATIENT_SHARDS);
        self.cfg
            .patients_dir()
            .join(shard)
            .join(mrn.get().to_string())
    }

    fn record_path(&self, mrn: Mrn) -> PathBuf {
        self.record_dir(mrn).join(PATIENT_FILE_NAME)
    }

    fn write_record(&self, patient: &PatientRecord) -> SuppliResult<()> {
        let dir = self.record_dir(patient.mrn);
        fs::create_dir_all(&dir).map_err(SuppliError::StorageDirCreation)?;

        let json = serde_json::to_string_pretty(patient).map_err(SuppliError::Serialization)?;
        fs::write(dir.join(PATIENT_FILE_NAME), json).map_err(SuppliError::FileWrite)?;
        Ok(())
    }

    /// Creates a new patient record.
    ///
    /// The stored record's `last_updated` field is set to the time of the
    /// write.
    ///
    /// # Errors
    ///
    /// Returns `SuppliError::DuplicateMrn` if a record already exists for
    /// the MRN, `SuppliError::InvalidInput` if the weight or date of birth
    /// violates the storage invariants, or a file-system error variant on
    /// I/O failure.
    pub fn create(&self, patient: &PatientRecord) -> SuppliResult<()> {
        validate_patient(patient, Utc::now().date_naive())?;

        if self.record_path(patient.mrn).exists() {
            return Err(SuppliError::DuplicateMrn(patient.mrn));
        }

        let mut stored = patient.clone();
        stored.last_updated = Some(Utc::now());
        self.write_record(&stored)?;

        tracing::info!(mrn = %patient.mrn, "created patient record");
        Ok(())
    }

    /// Fetches the patient record for `mrn`.
    ///
    /// # Errors
    ///
    /// Returns `SuppliError::PatientNotFound` if no record exists, or a
    /// read/parse error variant if the record file is unreadable.
    pub fn get(&self, mrn: Mrn) -> SuppliResult<PatientRecord> {
        let path = self.record_path(mrn);
        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(SuppliError::PatientNotFound(mrn));
            }
            Err(e) => return Err(SuppliError::FileRead(e)),
        };

        serde_json::from_str(&contents).map_err(SuppliError::Deserialization)
    }

    /// Replaces an existing patient record.
    ///
    /// The MRN is immutable once created, so the replacement record keeps
    /// the key of the record it overwrites.
    ///
    /// # Errors
    ///
    /// Returns `SuppliError::PatientNotFound` if no record exists for the
    /// MRN, or `SuppliError::InvalidInput` if the replacement violates the
    /// storage invariants.
    pub fn update(&self, patient: &PatientRecord) -> SuppliResult<()> {
        validate_patient(patient, Utc::now().date_naive())?;

        if !self.record_path(patient.mrn).exists() {
            return Err(SuppliError::PatientNotFound(patient.mrn));
        }

        let mut stored = patient.clone();
        stored.last_updated = Some(Utc::now());
        self.write_record(&stored)?;

        tracing::info!(mrn = %patient.mrn, "updated patient record");
        Ok(())
    }

    /// Updates only the recorded weight of an existing patient.
    ///
    /// # Errors
    ///
    /// As for [`update`](Self::update).
    pub fn update_weight(&self, mrn: Mrn, weight_kg: f64) -> SuppliResult<()> {
        let mut patient = self.get(mrn)?;
        patient.weight_kg = weight_kg;
        self.update(&patient)
    }

    /// Deletes the patient record for `mrn`.
    ///
    /// # Errors
    ///
    /// Returns `SuppliError::PatientNotFound` if no record exists, or
    /// `SuppliError::FileDelete` on I/O failure.
    pub fn delete(&self, mrn: Mrn) -> SuppliResult<()> {
        let dir = self.record_dir(mrn);
        if !dir.join(PATIENT_FILE_NAME).is_file() {
            return Err(SuppliError::PatientNotFound(mrn));
        }

        fs::remove_dir_all(&dir).map_err(SuppliError::FileDelete)?;
        tracing::info!(mrn = %mrn, "deleted patient record");
        Ok(())
    }

    /// Lists all patient records, sorted by MRN.
    ///
    /// Traverses the sharded directory structure and reads every
    /// `patient.json`. Individual files that cannot be parsed are logged as
    /// warnings and skipped so one corrupt record never hides the rest.
    pub fn list(&self) -> Vec<PatientRecord> {
        let mut patients = Vec::new();

        let shard_iter = match fs::read_dir(self.cfg.patients_dir()) {
            Ok(it) => it,
            Err(_) => return patients,
        };
        for shard in shard_iter.flatten() {
            let shard_path = shard.path();
            if !shard_path.is_dir() {
                continue;
            }

            let record_iter = match fs::read_dir(&shard_path) {
                Ok(it) => it,
                Err(_) => continue,
            };

            for record in record_iter.flatten() {
                let record_path = record.path().join(PATIENT_FILE_NAME);
                if !record_path.is_file() {
                    continue;
                }

                if let Ok(contents) = fs::read_to_string(&record_path) {
                    match serde_json::from_str::<PatientRecord>(&contents) {
                        Ok(patient) => patients.push(patient),
                        Err(e) => {
                            tracing::warn!(
                                "failed to parse patient record: {} - {}",
                                record_path.display(),
                                e
                            );
                        }
                    }
                }
            }
        }

        patients.sort_by_key(|p| p.mrn);
        patients
    }
}

impl PatientLookup for PatientStore {
    fn get_patient(&self, mrn: Mrn) -> SuppliResult<PatientRecord> {
        self.get(mrn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn test_cfg(dir: &std::path::Path) -> Arc<CoreConfig> {
        Arc::new(
            CoreConfig::new(dir.to_path_buf(), dir.join("report_out"))
                .expect("CoreConfig::new should succeed"),
        )
    }

    fn test_patient(mrn: u32) -> PatientRecord {
        PatientRecord {
            mrn: Mrn::new(mrn).expect("valid MRN"),
            first_name: NonEmptyText::new("John").expect("valid name"),
            middle_name: None,
            last_name: NonEmptyText::new("Doe").expect("valid name"),
            sex: Sex::Male,
            date_of_birth: NaiveDate::from_ymd_opt(2000, 1, 1).expect("valid date"),
            weight_kg: 70.0,
            last_updated: None,
        }
    }

    #[test]
    fn create_then_get_returns_the_record() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let store = PatientStore::new(test_cfg(temp_dir.path()));

        let patient = test_patient(123456);
        store.create(&patient).expect("create should succeed");

        let loaded = store.get(patient.mrn).expect("get should succeed");
        assert_eq!(loaded.mrn, patient.mrn);
        assert_eq!(loaded.first_name, patient.first_name);
        assert_eq!(loaded.weight_kg, patient.weight_kg);
        assert!(loaded.last_updated.is_some(), "store should stamp the write");
    }

    #[test]
    fn create_rejects_duplicate_mrn() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let store = PatientStore::new(test_cfg(temp_dir.path()));

        let patient = test_patient(42);
        store.create(&patient).expect("first create should succeed");

        let err = store.create(&patient).expect_err("duplicate should fail");
        assert!(matches!(err, SuppliError::DuplicateMrn(m) if m == patient.mrn));
    }

    #[test]
    fn create_rejects_negative_weight() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let store = PatientStore::new(test_cfg(temp_dir.path()));

        let mut patient = test_patient(42);
        patient.weight_kg = -1.0;

        let err = store.create(&patient).expect_err("negative weight should fail");
        assert!(matches!(err, SuppliError::InvalidInput(_)));
    }

    #[test]
    fn get_unknown_mrn_returns_patient_not_found() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let store = PatientStore::new(test_cfg(temp_dir.path()));

        let mrn = Mrn::new(999).expect("valid MRN");
        let err = store.get(mrn).expect_err("unknown MRN should fail");
        assert!(matches!(err, SuppliError::PatientNotFound(m) if m == mrn));
    }

    #[test]
    fn update_weight_changes_only_the_weight() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let store = PatientStore::new(test_cfg(temp_dir.path()));

        let patient = test_patient(42);
        store.create(&patient).expect("create should succeed");
        store
            .update_weight(patient.mrn, 72.5)
            .expect("update should succeed");

        let loaded = store.get(patient.mrn).expect("get should succeed");
        assert_eq!(loaded.weight_kg, 72.5);
        assert_eq!(loaded.first_name, patient.first_name);
    }

    #[test]
    fn update_replaces_all_mutable_fields() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let store = PatientStore::new(test_cfg(temp_dir.path()));

        let mut patient = test_patient(42);
        store.create(&patient).expect("create should succeed");

        patient.first_name = NonEmptyText::new("Jane").expect("valid name");
        patient.middle_name = Some("Q".into());
        patient.last_name = NonEmptyText::new("Smith").expect("valid name");
        patient.sex = Sex::Female;
        patient.date_of_birth = NaiveDate::from_ymd_opt(1999, 6, 15).expect("valid date");
        patient.weight_kg = 61.3;
        store.update(&patient).expect("update should succeed");

        let loaded = store.get(patient.mrn).expect("get should succeed");
        assert_eq!(loaded.first_name.as_str(), "Jane");
        assert_eq!(loaded.middle_name.as_deref(), Some("Q"));
        assert_eq!(loaded.last_name.as_str(), "Smith");
        assert_eq!(loaded.sex, Sex::Female);
        assert_eq!(
            loaded.date_of_birth,
            NaiveDate::from_ymd_opt(1999, 6, 15).expect("valid date")
        );
        assert_eq!(loaded.weight_kg, 61.3);
        assert!(loaded.last_updated.is_some(), "store should stamp the write");
    }

    #[test]
    fn update_unknown_mrn_returns_patient_not_found() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let store = PatientStore::new(test_cfg(temp_dir.path()));

        let err = store
            .update(&test_patient(321))
            .expect_err("unknown MRN should fail");
        assert!(matches!(err, SuppliError::PatientNotFound(_)));
    }

    #[test]
    fn delete_removes_the_record() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let store = PatientStore::new(test_cfg(temp_dir.path()));

        let patient = test_patient(42);
        store.create(&patient).expect("create should succeed");
        store.delete(patient.mrn).expect("delete should succeed");

        let err = store.get(patient.mrn).expect_err("record should be gone");
        assert!(matches!(err, SuppliError::PatientNotFound(_)));
    }

    #[test]
    fn list_returns_records_sorted_by_mrn_and_skips_invalid_files() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let cfg = test_cfg(temp_dir.path());
        let store = PatientStore::new(cfg.clone());

        store.create(&test_patient(205)).expect("create should succeed");
        store.create(&test_patient(104)).expect("create should succeed");

        // Write an unparsable record by hand; listing must skip it.
        let bad_dir = cfg.patients_dir().join("99").join("199");
        fs::create_dir_all(&bad_dir).expect("should create directory");
        fs::write(bad_dir.join(PATIENT_FILE_NAME), "{ not json").expect("should write file");

        let patients = store.list();
        let mrns: Vec<u32> = patients.iter().map(|p| p.mrn.get()).collect();
        assert_eq!(mrns, vec![104, 205]);
    }

    #[test]
    fn list_returns_empty_for_missing_data_directory() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let store = PatientStore::new(test_cfg(&temp_dir.path().join("nowhere")));

        assert!(store.list().is_empty());
    }
}
