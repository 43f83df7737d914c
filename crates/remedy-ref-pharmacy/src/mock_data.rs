//! Simulated pharmacy customers for the Remedy reference runtime.
//!
//! All data in this module is hardcoded and fictional. It stands in for a
//! customer record system in a production deployment.

use serde::Serialize;

/// A fictional pharmacy customer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PatientProfile {
    pub patient_id: &'static str,
    pub display_name: &'static str,
    pub age_years: i32,
    pub weight_kg: f64,
    /// Catalog ids of the medicines the patient already holds.
    pub medications: &'static [&'static str],
    /// Symptoms exactly as typed at the console, comma separated.
    pub reported_symptoms: &'static str,
}

// ── Patients (mock) ───────────────────────────────────────────────────────────

/// Known patients:
/// - pt-1001 adult with a flu-like illness, on ibuprofen and lisinopril
/// - pt-1002 child with a cold, given both NyQuil and Tylenol
/// - pt-1003 senior on warfarin reporting chest pain
/// - pt-1004 adolescent with hay fever, no interacting medicines
pub const PATIENTS: &[PatientProfile] = &[
    PatientProfile {
        patient_id: "pt-1001",
        display_name: "J. Okafor",
        age_years: 34,
        weight_kg: 72.0,
        medications: &["M002", "M007"],
        reported_symptoms: "Headache, fever, body ache",
    },
    PatientProfile {
        patient_id: "pt-1002",
        display_name: "M. Lindqvist",
        age_years: 7,
        weight_kg: 23.5,
        medications: &["M004", "M001"],
        reported_symptoms: "cough, Sore Throat , runny nose",
    },
    PatientProfile {
        patient_id: "pt-1003",
        display_name: "R. Haddad",
        age_years: 71,
        weight_kg: 64.0,
        medications: &["M012", "M008", "M010"],
        reported_symptoms: "dizziness, CHEST PAIN",
    },
    PatientProfile {
        patient_id: "pt-1004",
        display_name: "A. Tanaka",
        age_years: 15,
        weight_kg: 55.0,
        medications: &["M005"],
        reported_symptoms: "sneezing, runny nose, nasal congestion",
    },
];

/// Look up a mock patient by id.
pub fn patient(patient_id: &str) -> Option<&'static PatientProfile> {
    PATIENTS.iter().find(|p| p.patient_id == patient_id)
}
