//! Medicine catalog types.

use serde::{Deserialize, Serialize};

/// A medicine as known to the knowledge base.
///
/// Two medicines are the same remedy when their `id`s match; the remaining
/// fields are descriptive and never consulted for deduplication.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Medicine {
    /// Unique, stable identifier (e.g. "M001").
    pub id: String,
    /// Display name shown to customers.
    pub name: String,
    /// Unit price in the store currency.
    pub price: f64,
    /// Category tag (e.g. "OTC", "Antihistamine").
    pub category: String,
    /// True when the medicine may only be dispensed against a prescription.
    #[serde(default)]
    pub requires_prescription: bool,
    /// Short note on what the medicine helps with.
    #[serde(default)]
    pub description: String,
    /// Known side effects, most common first.
    #[serde(default)]
    pub side_effects: Vec<String>,
}

impl Medicine {
    /// True when the medicine can be sold over the counter.
    pub fn is_otc(&self) -> bool {
        !self.requires_prescription
    }
}

/// A recommended medicine together with its symptom coverage count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedMedicine {
    pub medicine: Medicine,
    /// Number of distinct input symptoms that listed this medicine.
    pub coverage: usize,
}
