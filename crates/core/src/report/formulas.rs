//! Nutrition-support formulas.
//!
//! Both formula families are pure and total over non-negative weights; they
//! are recomputed fresh for every report and never read from stored state.

use supplicore_types::Sex;

/// Holliday-Segar maintenance fluid estimate, in mL/day.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct HollidaySegar {
    /// Baseline maintenance volume.
    pub maintenance_ml_per_day: f64,
    /// Sick-day volume: maintenance scaled by 1.5.
    pub sick_day_ml_per_day: f64,
}

/// Computes the Holliday-Segar maintenance fluid estimate for a body weight
/// in kilograms.
///
/// The tiers apply to cumulative weight: 100 mL/kg for the first 10 kg,
/// 50 mL/kg for the next 10 kg, 20 mL/kg beyond 20 kg. The curve is
/// continuous at both breakpoints (10 kg gives 1000 mL/day from either
/// adjoining tier, 20 kg gives 1500 mL/day).
pub fn holliday_segar(weight_kg: f64) -> HollidaySegar {
    let maintenance = if weight_kg <= 10.0 {
        weight_kg * 100.0
    } else if weight_kg <= 20.0 {
        1000.0 + 50.0 * (weight_kg - 10.0)
    } else {
        1500.0 + 20.0 * (weight_kg - 20.0)
    };

    HollidaySegar {
        maintenance_ml_per_day: maintenance,
        sick_day_ml_per_day: maintenance * 1.5,
    }
}

/// Computes the WHO resting energy expenditure estimate, in kcal/day.
///
/// Coefficients are age- and sex-banded with thresholds at 3 and 10 years.
/// `age_years` must be a true year count — for infants, derive it with
/// [`crate::report::age_in_years`] rather than reusing a coarsened month or
/// day value.
///
/// A patient of unknown sex yields 0.0 kcal/day. The WHO tables only define
/// male and female coefficients, and the original system recorded 0 rather
/// than refusing the report; callers that need a hard failure can check the
/// sex before calling.
pub fn who_ree(weight_kg: f64, sex: Sex, age_years: f64) -> f64 {
    match sex {
        Sex::Male => {
            if age_years <= 3.0 {
                60.9 * weight_kg - 54.0
            } else if age_years <= 10.0 {
                22.7 * weight_kg + 495.0
            } else {
                17.5 * weight_kg + 651.0
            }
        }
        Sex::Female => {
            if age_years <= 3.0 {
                60.1 * weight_kg - 51.0
            } else if age_years <= 10.0 {
                22.5 * weight_kg + 499.0
            } else {
                12.2 * weight_kg + 746.0
            }
        }
        Sex::Unknown => {
            tracing::warn!("WHO REE requested for patient of unknown sex, recording 0 kcal/day");
            0.0
        }
    }
}
