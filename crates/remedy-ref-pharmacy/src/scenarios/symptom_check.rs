//! Scenario 1: Symptom Check
//!
//! A customer types their symptoms at the pharmacy console as one
//! comma-separated line. The workflow:
//!   1. Splits and normalizes the line into distinct symptom keys
//!   2. Runs triage and records which symptoms are critical
//!   3. Ranks medicines by symptom coverage, unless the triage policy
//!      withholds them for a critical case
//!   4. Collects precautions and summed specialist scores
//!   5. Stamps the result with a consultation id and UTC time

use std::collections::{BTreeMap, HashSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use remedy_contracts::{medicine::RankedMedicine, symptom::SymptomKey};
use remedy_core::SymptomEngine;

use crate::mock_data::PATIENTS;

/// How triage and recommendation are combined for one consultation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TriagePolicy {
    /// Report triage and recommendations side by side.
    #[default]
    Independent,
    /// Withhold medicine recommendations when any symptom needs a clinician.
    SuppressOnCritical,
}

/// Everything the console shows for one symptom check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsultationReport {
    pub consultation_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub policy: TriagePolicy,
    /// Distinct normalized symptoms, in the order they were typed.
    pub symptoms: Vec<SymptomKey>,
    pub attention_required: bool,
    pub critical_symptoms: Vec<SymptomKey>,
    pub recommendations: Vec<RankedMedicine>,
    /// True when recommendations were dropped by `SuppressOnCritical`.
    pub recommendations_withheld: bool,
    pub precautions: Vec<String>,
    pub specialists: BTreeMap<String, f64>,
}

/// Split console text on commas into distinct, normalized symptoms.
///
/// Blank segments are dropped: `"a,, b ,"` gives `["a", "b"]`.
pub fn parse_symptoms(text: &str) -> Vec<SymptomKey> {
    let mut seen = HashSet::new();
    text.split(',')
        .map(SymptomKey::normalize)
        .filter(|key| !key.is_empty() && seen.insert(key.clone()))
        .collect()
}

/// Run one consultation for the symptoms in `text`.
pub fn consult(engine: &SymptomEngine, text: &str, policy: TriagePolicy) -> ConsultationReport {
    let symptoms = parse_symptoms(text);
    let keys = || symptoms.iter().map(SymptomKey::as_str);

    let critical_symptoms = engine.critical_symptoms(keys());
    let attention_required = !critical_symptoms.is_empty();

    let withheld = attention_required && policy == TriagePolicy::SuppressOnCritical;
    let recommendations = if withheld {
        warn!(
            critical = critical_symptoms.len(),
            "recommendations withheld pending medical attention"
        );
        Vec::new()
    } else {
        engine.rank_medicines(keys())
    };

    let report = ConsultationReport {
        consultation_id: Uuid::new_v4(),
        created_at: Utc::now(),
        policy,
        attention_required,
        critical_symptoms,
        recommendations,
        recommendations_withheld: withheld,
        precautions: engine.precautions_for_symptoms(keys()),
        specialists: engine.recommended_specialists(keys()),
        symptoms,
    };

    info!(
        consultation_id = %report.consultation_id,
        symptoms = report.symptoms.len(),
        attention_required = report.attention_required,
        recommendations = report.recommendations.len(),
        "consultation complete"
    );
    report
}

/// Print a report the way the pharmacy console lays it out.
pub fn print_report(report: &ConsultationReport) {
    let symptoms: Vec<&str> = report.symptoms.iter().map(SymptomKey::as_str).collect();
    println!("  Consultation:  {}", report.consultation_id);
    println!("  Symptoms:      {}", symptoms.join(", "));

    if report.attention_required {
        let critical: Vec<&str> = report
            .critical_symptoms
            .iter()
            .map(SymptomKey::as_str)
            .collect();
        println!("  Triage:        SEEK MEDICAL ATTENTION ({})", critical.join(", "));
    } else {
        println!("  Triage:        self-care appropriate");
    }

    if report.recommendations_withheld {
        println!("  Medicines:     withheld; please see a doctor first");
    } else if report.recommendations.is_empty() {
        println!("  Medicines:     none found for these symptoms");
    } else {
        println!("  Medicines:");
        for ranked in &report.recommendations {
            let m = &ranked.medicine;
            println!(
                "    {} {:<14} ${:>6.2}  covers {} symptom(s){}",
                m.id,
                m.name,
                m.price,
                ranked.coverage,
                if m.requires_prescription { "  [Rx]" } else { "" }
            );
        }
    }

    if !report.precautions.is_empty() {
        println!("  Precautions:");
        for precaution in &report.precautions {
            println!("    - {}", precaution);
        }
    }

    if !report.specialists.is_empty() {
        let mut ranked: Vec<(&String, &f64)> = report.specialists.iter().collect();
        ranked.sort_by(|a, b| b.1.total_cmp(a.1));
        println!("  Specialists:");
        for (name, score) in ranked {
            println!("    {:<30} {:.2}", name, score);
        }
    }
}

// ── Scenario runner ───────────────────────────────────────────────────────────

/// Run Scenario 1: Symptom Check.
///
/// Consults every mock patient with the independent policy, then repeats a
/// mixed critical case with `SuppressOnCritical` to show the difference.
pub fn run_scenario(engine: &SymptomEngine) {
    println!("=== Scenario 1: Symptom Check ===");
    println!();

    for patient in PATIENTS {
        println!(
            "  Patient {} ({}, {} y): \"{}\"",
            patient.patient_id, patient.display_name, patient.age_years, patient.reported_symptoms
        );
        let report = consult(engine, patient.reported_symptoms, TriagePolicy::Independent);
        print_report(&report);
        println!();
    }

    let mixed = "headache, chest pain";
    println!("  Walk-in: \"{}\" with policy suppress-on-critical", mixed);
    let report = consult(engine, mixed, TriagePolicy::SuppressOnCritical);
    print_report(&report);
    println!();
    println!("  Scenario 1 complete.");
    println!();
}
