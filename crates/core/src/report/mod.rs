//! Nutrition-support report generation.
//!
//! A report is one pure computation over a patient record: the header
//! carries identity and pass-through clinical fields, the calculations
//! section carries the derived values (age, Holliday-Segar fluids, WHO REE).
//! Report generation never mutates the patient record; persistence of the
//! finished report is the store's concern, not the assembler's.

mod age;
mod formulas;

pub use age::{age_in_years, calculate_age, AgeResult, AgeUnit};
pub use formulas::{holliday_segar, who_ree, HollidaySegar};

use crate::store::PatientRecord;
use crate::SuppliResult;
use chrono::{NaiveDate, Utc};
use supplicore_types::{Mrn, Sex};

/// Read-only patient lookup, the assembler's only dependency on the store.
pub trait PatientLookup {
    /// Fetches the patient record for `mrn`.
    ///
    /// # Errors
    ///
    /// Returns `SuppliError::PatientNotFound` if no record exists for `mrn`.
    fn get_patient(&self, mrn: Mrn) -> SuppliResult<PatientRecord>;
}

/// Operator input for one report generation.
///
/// The free-text clinical fields pass through to the report header
/// unmodified; the calculator does not interpret them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportInput {
    /// Report date; defaults to today when unset.
    pub current_date: Option<NaiveDate>,
    pub feeding_schedule: String,
    pub method_of_delivery: String,
    pub home_recipe: String,
    pub fluids: String,
    pub solids: String,
    pub medications: String,
}

/// Identity and clinical context for a generated report.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ReportHeader {
    /// Patient name formatted as "Last, First".
    pub name: String,
    pub mrn: Mrn,
    pub sex: Sex,
    pub date_of_birth: NaiveDate,
    pub age: AgeResult,
    pub weight_kg: f64,
    pub current_date: NaiveDate,
    pub feeding_schedule: String,
    pub method_of_delivery: String,
    pub home_recipe: String,
    pub fluids: String,
    pub solids: String,
    pub medications: String,
}

/// Derived values recomputed fresh for every report.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Calculations {
    pub holliday_segar: HollidaySegar,
    pub who_ree_kcal_per_day: f64,
}

/// A fully populated, immutable nutrition-support report.
///
/// Units are fixed: weight in kilograms, volumes in mL/day, energy in
/// kcal/day, dates in ISO 8601. The serialised form is a stable schema so a
/// persisted report keyed by MRN and report date remains interpretable.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ReportOutput {
    pub header: ReportHeader,
    pub calculations: Calculations,
}

/// Generates a nutrition-support report for the patient identified by `mrn`.
///
/// Looks the patient up through `lookup`, derives the age in the coarsest
/// non-zero unit for display, and computes both formula families. The REE
/// age argument is derived as fractional years from whole days since birth,
/// independent of the display age.
///
/// # Errors
///
/// Returns `SuppliError::PatientNotFound` if `mrn` has no record, or
/// `SuppliError::InvalidInput` if the report date precedes the patient's
/// date of birth.
pub fn generate_report(
    lookup: &impl PatientLookup,
    mrn: Mrn,
    input: ReportInput,
) -> SuppliResult<ReportOutput> {
    let patient = lookup.get_patient(mrn)?;
    let current_date = input
        .current_date
        .unwrap_or_else(|| Utc::now().date_naive());

    let age = calculate_age(patient.date_of_birth, current_date)?;
    let ree_age_years = age_in_years(patient.date_of_birth, current_date)?;

    let holliday_segar = holliday_segar(patient.weight_kg);
    let who_ree_kcal_per_day = who_ree(patient.weight_kg, patient.sex, ree_age_years);

    Ok(ReportOutput {
        header: ReportHeader {
            name: format!("{}, {}", patient.last_name, patient.first_name),
            mrn: patient.mrn,
            sex: patient.sex,
            date_of_birth: patient.date_of_birth,
            age,
            weight_kg: patient.weight_kg,
            current_date,
            feeding_schedule: input.feeding_schedule,
            method_of_delivery: input.method_of_delivery,
            home_recipe: input.home_recipe,
            fluids: input.fluids,
            solids: input.solids,
            medications: input.medications,
        },
        calculations: Calculations {
            holliday_segar,
            who_ree_kcal_per_day,
        },
    })
}
