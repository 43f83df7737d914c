//! The knowledge lookup seam.
//!
//! Every engine operation reads through [`KnowledgeBase`] and nothing else.
//! Implementations are read-only after construction, which is what lets one
//! instance be shared by concurrent callers without locking.

use std::collections::BTreeMap;

use remedy_contracts::{
    dosage::DosageProfile,
    interaction::Interaction,
    medicine::Medicine,
    symptom::{SymptomInfo, SymptomKey},
};

/// Read-only clinical knowledge tables.
///
/// All lookups are total: an unknown key yields an empty slice, an empty
/// record or `None`, never a panic or error. Medicine ids are matched
/// exactly; symptom and condition keys arrive already normalized.
pub trait KnowledgeBase: Send + Sync {
    /// Candidate medicines for a symptom, in table order.
    fn medicines_for(&self, symptom: &SymptomKey) -> &[Medicine];

    /// Description and precautions for a symptom, or an empty record.
    fn info_for(&self, symptom: &SymptomKey) -> &SymptomInfo;

    /// True when the symptom requires escalation to a clinician.
    fn is_critical(&self, symptom: &SymptomKey) -> bool;

    /// Specialist name → relevance score (0.0..=1.0) for a symptom.
    fn specialists_for(&self, symptom: &SymptomKey) -> &BTreeMap<String, f64>;

    /// Side effects recorded for a medicine id.
    fn side_effects_for(&self, medicine_id: &str) -> &[String];

    /// The interaction recorded for an unordered pair of medicine ids.
    ///
    /// The table may list a pair under only one of its ids. Implementations
    /// look under `a` for `b` first, then under `b` for `a`.
    fn interaction_between(&self, a: &str, b: &str) -> Option<&Interaction>;

    /// Health advice for a condition.
    fn advice_for(&self, condition: &SymptomKey) -> &[String];

    /// Resolve a medicine id against the catalog.
    fn medicine(&self, medicine_id: &str) -> Option<&Medicine>;

    /// Dosage data for a medicine id.
    fn dosage_profile(&self, medicine_id: &str) -> Option<&DosageProfile>;
}
