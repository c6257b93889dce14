//! Age calculation in the coarsest non-zero calendar unit.
//!
//! Clinical nutrition references express ages in the largest whole unit that
//! is non-zero: years take priority over months, months over days. A subject
//! exactly 11 months old is therefore reported in months, never in days.

use crate::{SuppliError, SuppliResult};
use chrono::{Datelike, NaiveDate};

/// Calendar unit of an [`AgeResult`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgeUnit {
    Days,
    Months,
    Years,
}

impl std::fmt::Display for AgeUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let unit = match self {
            AgeUnit::Days => "days",
            AgeUnit::Months => "months",
            AgeUnit::Years => "years",
        };
        write!(f, "{unit}")
    }
}

/// An age expressed in exactly one calendar unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AgeResult {
    /// Whole count of `unit`s elapsed since birth.
    pub value: u32,
    /// The single unit `value` is expressed in.
    pub unit: AgeUnit,
}

impl std::fmt::Display for AgeResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.value, self.unit)
    }
}

/// Calculates the age at `current_date` for a subject born on
/// `date_of_birth`, in the coarsest non-zero unit.
///
/// Whole years are counted first (decremented by one if the birthday has not
/// yet occurred in the current year). Subjects under one year old are
/// reported in whole months, and under one month old in whole days.
///
/// # Errors
///
/// Returns `SuppliError::InvalidInput` if `current_date` precedes
/// `date_of_birth`.
pub fn calculate_age(date_of_birth: NaiveDate, current_date: NaiveDate) -> SuppliResult<AgeResult> {
    if current_date < date_of_birth {
        return Err(SuppliError::InvalidInput(format!(
            "report date {current_date} precedes date of birth {date_of_birth}"
        )));
    }

    let mut years = current_date.year() - date_of_birth.year();
    if (current_date.month(), current_date.day()) < (date_of_birth.month(), date_of_birth.day()) {
        years -= 1;
    }
    if years >= 1 {
        return Ok(AgeResult {
            value: years as u32,
            unit: AgeUnit::Years,
        });
    }

    let mut months = (current_date.year() - date_of_birth.year()) * 12
        + current_date.month() as i32
        - date_of_birth.month() as i32;
    if current_date.day() < date_of_birth.day() {
        months -= 1;
    }
    if months >= 1 {
        return Ok(AgeResult {
            value: months as u32,
            unit: AgeUnit::Months,
        });
    }

    let days = current_date.signed_duration_since(date_of_birth).num_days();
    Ok(AgeResult {
        value: days as u32,
        unit: AgeUnit::Days,
    })
}

/// Age in fractional years, derived from whole days since birth.
///
/// The WHO REE thresholds are expressed in years, so infant ages must not be
/// fed in as raw month or day counts. This derivation is independent of the
/// coarsened [`AgeResult`]: a 6-month-old yields roughly 0.5, not 6.
///
/// # Errors
///
/// Returns `SuppliError::InvalidInput` if `current_date` precedes
/// `date_of_birth`.
pub fn age_in_years(date_of_birth: NaiveDate, current_date: NaiveDate) -> SuppliResult<f64> {
    if current_date < date_of_birth {
        return Err(SuppliError::InvalidInput(format!(
            "report date {current_date} precedes date of birth {date_of_birth}"
        )));
    }

    let days = current_date.signed_duration_since(date_of_birth).num_days();
    Ok(days as f64 / 365.25)
}
