//! File-backed record stores.
//!
//! The stores are the persistence collaborators of the report engine: plain
//! JSON files under the configured data directory, one record per file, no
//! database server. Each store is constructed from the startup
//! [`CoreConfig`](crate::CoreConfig) and performs pure data operations only.

mod patients;
mod reports;
mod supplements;

pub use patients::{PatientRecord, PatientStore};
pub use reports::ReportStore;
pub use supplements::{NewSupplement, Supplement, SupplementStore};
