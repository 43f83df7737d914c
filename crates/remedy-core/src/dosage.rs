//! Age- and weight-banded dosage guidance.
//!
//! `suggested_dosage` is advisory text, not a control operation: bad input
//! produces [`INVALID_DOSAGE_INPUT`] and missing data produces a referral to a
//! professional. It never returns an error.

use remedy_contracts::dosage::{AgeBand, DosageProfile, WeightBasedDose};

use crate::traits::KnowledgeBase;

/// Returned when the medicine id is blank or age/weight are not positive.
pub const INVALID_DOSAGE_INPUT: &str =
    "Invalid input: a medicine id, a positive age and a positive weight are required";

/// Referral text for medicines without dosage data.
const CONSULT_PROFESSIONAL: &str =
    "No specific dosage information is available; consult a pharmacist or physician";

/// Compute dosage guidance for one patient.
///
/// `age_years` is the patient's age in whole years and `weight_kg` their body
/// weight. Ages below one year cannot be represented: `0` is rejected as
/// invalid, so the infant band is only reached at age `1`.
///
/// The result has the shape `"<name> (<band>): <guidance>"`, or one of the
/// fixed sentinel texts.
pub fn suggested_dosage(
    kb: &dyn KnowledgeBase,
    medicine_id: &str,
    age_years: i32,
    weight_kg: f64,
) -> String {
    let medicine_id = medicine_id.trim();
    if medicine_id.is_empty() || age_years <= 0 || !(weight_kg.is_finite() && weight_kg > 0.0) {
        return INVALID_DOSAGE_INPUT.to_string();
    }

    let band = AgeBand::for_age(age_years);

    let (Some(medicine), Some(profile)) = (kb.medicine(medicine_id), kb.dosage_profile(medicine_id))
    else {
        return format!("{medicine_id}: {CONSULT_PROFESSIONAL}");
    };

    let guidance = guidance_for(profile, band, age_years, weight_kg);
    format!("{} ({}): {}", medicine.name, band, guidance)
}

fn guidance_for(profile: &DosageProfile, band: AgeBand, age_years: i32, weight_kg: f64) -> String {
    if let Some(min_age) = profile.min_age_years {
        if i64::from(age_years) < i64::from(min_age) {
            return format!(
                "not recommended for patients under {min_age} years; consult a physician"
            );
        }
    }

    if let Some(rule) = profile
        .weight_based
        .as_ref()
        .filter(|rule| rule.applies_to.contains(&band))
    {
        return weight_scaled(rule, weight_kg);
    }

    match profile.bands.get(band) {
        Some(text) => text.to_string(),
        None => CONSULT_PROFESSIONAL.to_string(),
    }
}

fn weight_scaled(rule: &WeightBasedDose, weight_kg: f64) -> String {
    let dose = (rule.mg_per_kg * weight_kg).min(rule.max_single_mg);
    format!(
        "{:.0} mg per dose ({} mg/kg at {:.1} kg, max {:.0} mg) {}",
        dose, rule.mg_per_kg, weight_kg, rule.max_single_mg, rule.frequency
    )
}
