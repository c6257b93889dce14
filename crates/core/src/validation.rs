//! Input validation utilities.
//!
//! This module contains functions for validating record fields before they
//! are persisted, so every stored record satisfies the documented invariants.

use crate::store::PatientRecord;
use crate::{SuppliError, SuppliResult};
use chrono::NaiveDate;

/// Validates that a weight value is usable in the nutrition formulas.
///
/// Weight must be finite and non-negative; both formula families are total
/// over that domain and undefined outside it.
///
/// # Errors
///
/// Returns `SuppliError::InvalidInput` if the weight is negative, NaN or
/// infinite.
pub fn validate_weight_kg(weight_kg: f64) -> SuppliResult<()> {
    validate_non_negative("weight_kg", weight_kg)
}

/// Validates that a numeric field is finite and non-negative.
///
/// # Errors
///
/// Returns `SuppliError::InvalidInput` naming the offending field if the
/// value is negative, NaN or infinite.
pub fn validate_non_negative(field: &str, value: f64) -> SuppliResult<()> {
    if !value.is_finite() {
        return Err(SuppliError::InvalidInput(format!(
            "{field} must be a finite number"
        )));
    }
    if value < 0.0 {
        return Err(SuppliError::InvalidInput(format!(
            "{field} must be non-negative, got {value}"
        )));
    }
    Ok(())
}

/// Validates that a date of birth is not in the future relative to `today`.
///
/// # Errors
///
/// Returns `SuppliError::InvalidInput` if the date of birth lies after
/// `today`.
pub fn validate_date_of_birth(date_of_birth: NaiveDate, today: NaiveDate) -> SuppliResult<()> {
    if date_of_birth > today {
        return Err(SuppliError::InvalidInput(format!(
            "date of birth {date_of_birth} lies in the future"
        )));
    }
    Ok(())
}

/// Validates a full patient record against the storage invariants.
///
/// # Errors
///
/// Returns `SuppliError::InvalidInput` if the weight or date of birth is
/// out of range.
pub fn validate_patient(patient: &PatientRecord, today: NaiveDate) -> SuppliResult<()> {
    validate_weight_kg(patient.weight_kg)?;
    validate_date_of_birth(patient.date_of_birth, today)?;
    Ok(())
}
