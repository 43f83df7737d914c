//! Knowledge document schema.
//!
//! A `KnowledgeDocument` is deserialized from TOML and holds the raw tables
//! exactly as written. `TableKnowledgeBase::from_document` normalizes keys,
//! resolves medicine references and checks invariants.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use remedy_contracts::{
    dosage::DosageProfile, interaction::InteractionSeverity, medicine::Medicine,
};

/// One symptom row.
///
/// ```toml
/// [[symptoms]]
/// key = "headache"
/// description = "Pain or pressure in the head"
/// medicines = ["M001", "M002"]
/// precautions = ["Get plenty of rest"]
/// [symptoms.specialists]
/// "General Practitioner" = 0.6
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SymptomEntry {
    /// Symptom name; normalized on load.
    pub key: String,

    #[serde(default)]
    pub description: String,

    /// Candidate medicine ids, in recommendation order.
    #[serde(default)]
    pub medicines: Vec<String>,

    #[serde(default)]
    pub precautions: Vec<String>,

    /// Specialist name → relevance score in 0.0..=1.0.
    #[serde(default)]
    pub specialists: BTreeMap<String, f64>,
}

/// One interaction row, recorded under `medicine` for `with`.
///
/// The reverse direction does not need its own row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InteractionEntry {
    pub medicine: String,
    pub with: String,
    pub description: String,
    /// Omitted when no graded severity is known.
    #[serde(default)]
    pub severity: Option<InteractionSeverity>,
}

/// The top-level structure deserialized from a knowledge TOML file.
///
/// Every table is optional, so an empty document is a valid (empty)
/// knowledge base.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KnowledgeDocument {
    /// Symptoms that require escalation to a clinician.
    #[serde(default)]
    pub critical: Vec<String>,

    #[serde(default)]
    pub medicines: Vec<Medicine>,

    #[serde(default)]
    pub symptoms: Vec<SymptomEntry>,

    #[serde(default)]
    pub interactions: Vec<InteractionEntry>,

    /// Condition name → advice, in display order.
    #[serde(default)]
    pub advice: BTreeMap<String, Vec<String>>,

    #[serde(default)]
    pub dosage: Vec<DosageProfile>,
}
