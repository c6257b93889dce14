//! # SuppliCore Core
//!
//! Core business logic for the SuppliCore nutrition support system.
//!
//! This crate contains pure data operations and the report calculation
//! engine:
//! - Patient and supplement records with sharded JSON storage
//! - Nutrition-support report generation (age, Holliday-Segar maintenance
//!   fluids, WHO resting energy expenditure)
//! - Report persistence keyed by `(MRN, report date)`
//!
//! **No presentation concerns**: terminal output, prompts and argument
//! parsing belong in the `supplicore` binary.

pub mod config;
pub mod constants;
pub mod error;
pub mod report;
pub mod store;
pub mod validation;

pub use config::{CoreConfig, Settings};
pub use error::{SuppliError, SuppliResult};
pub use report::{
    age_in_years, calculate_age, generate_report, holliday_segar, who_ree, AgeResult, AgeUnit,
    Calculations, HollidaySegar, PatientLookup, ReportHeader, ReportInput, ReportOutput,
};
pub use store::{
    NewSupplement, PatientRecord, PatientStore, ReportStore, Supplement, SupplementStore,
};

// Re-export the validated value types so callers need only one import path.
pub use supplicore_types::{Mrn, NonEmptyText, Sex};
