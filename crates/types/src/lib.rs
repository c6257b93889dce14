//! Validated domain value types for the SuppliCore system.
//!
//! Every type in this crate enforces its invariant at construction time, so
//! downstream code never needs to re-validate. All types serialise to the
//! stable wire shapes used in stored records and reports:
//!
//! - [`Mrn`] — a positive integer medical record number
//! - [`Sex`] — `"M"`, `"F"` or `"unknown"`
//! - [`NonEmptyText`] — a plain string with at least one non-whitespace character

mod mrn;
mod sex;
mod text;

pub use mrn::{Mrn, MrnError};
pub use sex::{Sex, SexParseError};
pub use text::{NonEmptyText, TextError};
