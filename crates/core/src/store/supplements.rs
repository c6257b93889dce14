//! Supplement reference data management.
//!
//! Supplements are the formula products referenced when composing a feeding
//! plan: a name, energy density in kcal, fluid displacement in mL and
//! free-text notes. Identifiers are small sequential integers assigned by
//! the store.
//!
//! ## Storage Layout
//!
//! ```text
//! supplements/
//!   <id>/
//!     supplement.json
//! ```

use crate::config::CoreConfig;
use crate::constants::SUPPLEMENT_FILE_NAME;
use crate::validation::validate_non_negative;
use crate::{SuppliError, SuppliResult};
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use supplicore_types::NonEmptyText;

/// A stored supplement reference record.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Supplement {
    /// Store-assigned sequential identifier.
    pub id: u32,
    pub name: NonEmptyText,
    /// Energy density, kcal per serving.
    pub kcal: f64,
    /// Fluid displacement per serving, in mL.
    pub displacement_ml: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// A supplement as submitted by the operator, before an id is assigned.
#[derive(Debug, Clone, PartialEq)]
pub struct NewSupplement {
    pub name: NonEmptyText,
    pub kcal: f64,
    pub displacement_ml: f64,
    pub notes: Option<String>,
}

/// Service for managing supplement reference data.
#[derive(Clone, Debug)]
pub struct SupplementStore {
    cfg: Arc<CoreConfig>,
}

impl SupplementStore {
    /// Creates a new store bound to the configured data directory.
    pub fn new(cfg: Arc<CoreConfig>) -> Self {
        Self { cfg }
    }

    fn record_path(&self, id: u32) -> PathBuf {
        self.cfg
            .supplements_dir()
            .join(id.to_string())
            .join(SUPPLEMENT_FILE_NAME)
    }

    fn validate(new: &NewSupplement) -> SuppliResult<()> {
        validate_non_negative("kcal", new.kcal)?;
        validate_non_negative("displacement_ml", new.displacement_ml)?;
        Ok(())
    }

    fn next_id(&self) -> u32 {
        self.list().iter().map(|s| s.id).max().unwrap_or(0) + 1
    }

    fn write_record(&self, supplement: &Supplement) -> SuppliResult<()> {
        let dir = self
            .cfg
            .supplements_dir()
            .join(supplement.id.to_string());
        fs::create_dir_all(&dir).map_err(SuppliError::StorageDirCreation)?;

        let json = serde_json::to_string_pretty(supplement).map_err(SuppliError::Serialization)?;
        fs::write(dir.join(SUPPLEMENT_FILE_NAME), json).map_err(SuppliError::FileWrite)?;
        Ok(())
    }

    /// Adds a new supplement and assigns it the next free id.
    ///
    /// # Errors
    ///
    /// Returns `SuppliError::InvalidInput` if kcal or displacement is
    /// negative or non-finite, or a file-system error variant on I/O
    /// failure.
    pub fn add(&self, new: NewSupplement) -> SuppliResult<Supplement> {
        Self::validate(&new)?;

        let supplement = Supplement {
            id: self.next_id(),
            name: new.name,
            kcal: new.kcal,
            displacement_ml: new.displacement_ml,
            notes: new.notes,
        };
        self.write_record(&supplement)?;

        tracing::info!(id = supplement.id, name = %supplement.name, "added supplement");
        Ok(supplement)
    }

    /// Fetches the supplement with the given id.
    ///
    /// # Errors
    ///
    /// Returns `SuppliError::SupplementNotFound` if no record exists.
    pub fn get(&self, id: u32) -> SuppliResult<Supplement> {
        let path = self.record_path(id);
        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(SuppliError::SupplementNotFound(id));
            }
            Err(e) => return Err(SuppliError::FileRead(e)),
        };

        serde_json::from_str(&contents).map_err(SuppliError::Deserialization)
    }

    /// Replaces an existing supplement record, keeping its id.
    ///
    /// # Errors
    ///
    /// Returns `SuppliError::SupplementNotFound` if no record exists for the
    /// id, or `SuppliError::InvalidInput` for out-of-range values.
    pub fn update(&self, supplement: &Supplement) -> SuppliResult<()> {
        validate_non_negative("kcal", supplement.kcal)?;
        validate_non_negative("displacement_ml", supplement.displacement_ml)?;

        if !self.record_path(supplement.id).exists() {
            return Err(SuppliError::SupplementNotFound(supplement.id));
        }
        self.write_record(supplement)
    }

    /// Deletes the supplement with the given id.
    ///
    /// # Errors
    ///
    /// Returns `SuppliError::SupplementNotFound` if no record exists.
    pub fn delete(&self, id: u32) -> SuppliResult<()> {
        let dir = self.cfg.supplements_dir().join(id.to_string());
        if !dir.join(SUPPLEMENT_FILE_NAME).is_file() {
            return Err(SuppliError::SupplementNotFound(id));
        }

        fs::remove_dir_all(&dir).map_err(SuppliError::FileDelete)?;
        tracing::info!(id, "deleted supplement");
        Ok(())
    }

    /// Lists all supplements, sorted by id.
    ///
    /// Unparsable record files are logged as warnings and skipped.
    pub fn list(&self) -> Vec<Supplement> {
        let mut supplements = Vec::new();

        let id_iter = match fs::read_dir(self.cfg.supplements_dir()) {
            Ok(it) => it,
            Err(_) => return supplements,
        };
        for id_ent in id_iter.flatten() {
            let record_path = id_ent.path().join(SUPPLEMENT_FILE_NAME);
            if !record_path.is_file() {
                continue;
            }

            if let Ok(contents) = fs::read_to_string(&record_path) {
                match serde_json::from_str::<Supplement>(&contents) {
                    Ok(supplement) => supplements.push(supplement),
                    Err(e) => {
                        tracing::warn!(
                            "failed to parse supplement record: {} - {}",
                            record_path.display(),
                            e
                        );
                    }
                }
            }
        }

        supplements.sort_by_key(|s| s.id);
        supplements
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

    fn new_supplement(name: &str) -> NewSupplement {
        NewSupplement {
            name: NonEmptyText::new(name).expect("valid name"),
            kcal: 100.0,
            displacement_ml: 50.0,
            notes: Some("mix with water".into()),
        }
    }

    #[test]
    fn add_assigns_sequential_ids() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let store = SupplementStore::new(test_cfg(temp_dir.path()));

        let first = store.add(new_supplement("Formula A")).expect("add should succeed");
        let second = store.add(new_supplement("Formula B")).expect("add should succeed");

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
    }

    #[test]
    fn add_rejects_negative_kcal() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let store = SupplementStore::new(test_cfg(temp_dir.path()));

        let mut supplement = new_supplement("Formula A");
        supplement.kcal = -5.0;

        let err = store.add(supplement).expect_err("negative kcal should fail");
        assert!(matches!(err, SuppliError::InvalidInput(_)));
    }

    #[test]
    fn get_returns_stored_fields() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let store = SupplementStore::new(test_cfg(temp_dir.path()));

        let added = store.add(new_supplement("Formula A")).expect("add should succeed");
        let loaded = store.get(added.id).expect("get should succeed");

        assert_eq!(loaded, added);
    }

    #[test]
    fn get_unknown_id_returns_supplement_not_found() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let store = SupplementStore::new(test_cfg(temp_dir.path()));

        let err = store.get(7).expect_err("unknown id should fail");
        assert!(matches!(err, SuppliError::SupplementNotFound(7)));
    }

    #[test]
    fn delete_frees_the_record_but_not_the_id_sequence() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let store = SupplementStore::new(test_cfg(temp_dir.path()));

        let first = store.add(new_supplement("Formula A")).expect("add should succeed");
        let second = store.add(new_supplement("Formula B")).expect("add should succeed");
        store.delete(first.id).expect("delete should succeed");

        let third = store.add(new_supplement("Formula C")).expect("add should succeed");
        assert_eq!(third.id, second.id + 1, "ids continue from the highest survivor");

        let ids: Vec<u32> = store.list().iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![second.id, third.id]);
    }

    #[test]
    fn update_replaces_fields_in_place() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let store = SupplementStore::new(test_cfg(temp_dir.path()));

        let mut supplement = store.add(new_supplement("Formula A")).expect("add should succeed");
        supplement.kcal = 120.0;
        supplement.notes = None;
        store.update(&supplement).expect("update should succeed");

        let loaded = store.get(supplement.id).expect("get should succeed");
        assert_eq!(loaded.kcal, 120.0);
        assert_eq!(loaded.notes, None);
    }
}
