//! Scenario 2: Medication Review
//!
//! A pharmacist reviews the medicines a patient already holds before handing
//! over anything new. For the held ids the workflow reports:
//!   - the resolved catalog entries, and any ids the catalog does not know
//!   - every pairwise interaction, checked in both directions
//!   - side effects per known medicine
//!   - age and weight specific dosage text per id
//!   - which medicines need a prescription

use std::collections::{BTreeMap, HashSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use remedy_contracts::{interaction::InteractionReport, medicine::Medicine};
use remedy_core::SymptomEngine;

use crate::mock_data::PATIENTS;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MedicationReview {
    pub review_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub age_years: i32,
    pub weight_kg: f64,
    /// Catalog entries for the known ids, in the order given.
    pub medicines: Vec<Medicine>,
    pub unknown_ids: Vec<String>,
    pub interactions: InteractionReport,
    pub side_effects: BTreeMap<String, Vec<String>>,
    /// Dosage text per id, including ids the catalog does not know.
    pub dosage: BTreeMap<String, String>,
    /// Ids of held medicines that need a prescription.
    pub prescription_required: Vec<String>,
}

/// Review the medicines in `medicine_ids` for a patient of the given age and
/// weight.
pub fn review<I, S>(
    engine: &SymptomEngine,
    medicine_ids: I,
    age_years: i32,
    weight_kg: f64,
) -> MedicationReview
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    let ids: Vec<String> = medicine_ids
        .into_iter()
        .map(|id| id.as_ref().trim().to_string())
        .filter(|id| !id.is_empty() && seen.insert(id.clone()))
        .collect();

    let kb = engine.knowledge();
    let mut medicines = Vec::new();
    let mut unknown_ids = Vec::new();
    for id in &ids {
        match kb.medicine(id) {
            Some(medicine) => medicines.push(medicine.clone()),
            None => unknown_ids.push(id.clone()),
        }
    }

    let prescription_required = medicines
        .iter()
        .filter(|m| m.requires_prescription)
        .map(|m| m.id.clone())
        .collect();

    let dosage = ids
        .iter()
        .map(|id| (id.clone(), engine.suggested_dosage(id, age_years, weight_kg)))
        .collect();

    let review = MedicationReview {
        review_id: Uuid::new_v4(),
        created_at: Utc::now(),
        age_years,
        weight_kg,
        interactions: engine.check_medicine_interactions(&ids),
        side_effects: engine.potential_side_effects(&ids),
        medicines,
        unknown_ids,
        dosage,
        prescription_required,
    };

    info!(
        review_id = %review.review_id,
        medicines = review.medicines.len(),
        unknown = review.unknown_ids.len(),
        interactions = review.interactions.interactions.len(),
        "medication review complete"
    );
    review
}

/// Print a review the way the pharmacy console lays it out.
pub fn print_review(review: &MedicationReview) {
    println!("  Review:        {}", review.review_id);
    println!(
        "  Patient:       {} y, {:.1} kg",
        review.age_years, review.weight_kg
    );

    for medicine in &review.medicines {
        println!(
            "    {} {:<14} {}{}",
            medicine.id,
            medicine.name,
            medicine.category,
            if medicine.requires_prescription { "  [Rx]" } else { "" }
        );
    }
    for id in &review.unknown_ids {
        println!("    {} (not in catalog)", id);
    }

    if review.interactions.has_interactions {
        println!("  Interactions:");
        for record in &review.interactions.interactions {
            println!(
                "    [{}] {} + {}: {}",
                record.severity, record.first, record.second, record.description
            );
        }
    } else {
        println!("  Interactions:  none found");
    }

    if !review.side_effects.is_empty() {
        println!("  Side effects:");
        for (id, effects) in &review.side_effects {
            println!("    {}: {}", id, effects.join(", "));
        }
    }

    println!("  Dosage:");
    for text in review.dosage.values() {
        println!("    {}", text);
    }
}

// ── Scenario runner ───────────────────────────────────────────────────────────

/// Run Scenario 2: Medication Review for every mock patient.
pub fn run_scenario(engine: &SymptomEngine) {
    println!("=== Scenario 2: Medication Review ===");
    println!();

    for patient in PATIENTS {
        println!(
            "  Patient {} ({}) holds {}",
            patient.patient_id,
            patient.display_name,
            patient.medications.join(", ")
        );
        let reviewed = review(
            engine,
            patient.medications.iter().copied(),
            patient.age_years,
            patient.weight_kg,
        );
        print_review(&reviewed);
        if let Some(highest) = reviewed.interactions.highest_severity() {
            println!("  Highest graded severity: {}", highest);
        }
        println!();
    }

    println!("  Scenario 2 complete.");
    println!();
}
