//! Constants used throughout the SuppliCore core crate.
//!
//! This module contains all path and filename constants to ensure
//! consistency across the codebase and make maintenance easier.

/// Default directory for record storage when no explicit directory is configured.
pub const DEFAULT_DATA_DIR: &str = "supplicore_data";

/// Default directory for exported report files.
pub const DEFAULT_REPORT_DIR: &str = "report_out";

/// Directory name for patient records storage.
pub const PATIENTS_DIR_NAME: &str = "patients";

/// Directory name for supplement reference data storage.
pub const SUPPLEMENTS_DIR_NAME: &str = "supplements";

/// Filename for patient JSON records.
pub const PATIENT_FILE_NAME: &str = "patient.json";

/// Filename for supplement JSON records.
pub const SUPPLEMENT_FILE_NAME: &str = "supplement.json";

/// Default filename for the operator settings file.
pub const SETTINGS_FILE_NAME: &str = "config.json";

/// Number of shard buckets for patient directories (MRN modulo).
pub const PATIENT_SHARDS: u32 = 100;
