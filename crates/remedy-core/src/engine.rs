//! The Remedy symptom engine: triage, ranking and aggregation over a shared
//! knowledge base.
//!
//! Every operation normalizes its symptom inputs, reads the knowledge base
//! and returns a fresh value. There is no mutable state, so an engine can be
//! cloned into as many threads as needed:
//!
//!   raw symptoms → SymptomKey::normalize → distinct keys → KnowledgeBase
//!
//! Triage and recommendation are independent queries. Neither suppresses the
//! other; callers decide how to combine them.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;

use tracing::{debug, warn};

use remedy_contracts::{
    interaction::{InteractionRecord, InteractionReport},
    medicine::{Medicine, RankedMedicine},
    symptom::SymptomKey,
};

use crate::{config::EngineConfig, dosage, traits::KnowledgeBase};

/// Normalize raw symptoms into distinct, non-empty keys in first-seen order.
fn distinct_keys<I, S>(symptoms: I) -> Vec<SymptomKey>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    symptoms
        .into_iter()
        .map(|raw| SymptomKey::normalize(raw.as_ref()))
        .filter(|key| !key.is_empty() && seen.insert(key.clone()))
        .collect()
}

/// Trim medicine ids and drop blanks and repeats, keeping first-seen order.
fn distinct_ids<I, S>(medicine_ids: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    medicine_ids
        .into_iter()
        .map(|raw| raw.as_ref().trim().to_string())
        .filter(|id| !id.is_empty() && seen.insert(id.clone()))
        .collect()
}

/// The boundary every caller (console, consultation or order workflow) uses.
///
/// Construct once at startup with a knowledge base and hand out clones.
#[derive(Clone)]
pub struct SymptomEngine {
    kb: Arc<dyn KnowledgeBase>,
    config: EngineConfig,
}

impl SymptomEngine {
    /// Create an engine with the default [`EngineConfig`].
    pub fn new(kb: Arc<dyn KnowledgeBase>) -> Self {
        Self::with_config(kb, EngineConfig::default())
    }

    pub fn with_config(kb: Arc<dyn KnowledgeBase>, config: EngineConfig) -> Self {
        Self { kb, config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn knowledge(&self) -> &dyn KnowledgeBase {
        self.kb.as_ref()
    }

    // ── Triage ───────────────────────────────────────────────────────────────

    /// True as soon as any symptom is in the critical set.
    ///
    /// Matching is exact equality on normalized keys. An empty input needs no
    /// attention.
    pub fn is_medical_attention_required<I, S>(&self, symptoms: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for raw in symptoms {
            let key = SymptomKey::normalize(raw.as_ref());
            if self.kb.is_critical(&key) {
                warn!(symptom = %key, "symptom requires medical attention");
                return true;
            }
        }
        false
    }

    /// Every distinct critical symptom in the input, in first-seen order.
    pub fn critical_symptoms<I, S>(&self, symptoms: I) -> Vec<SymptomKey>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        distinct_keys(symptoms)
            .into_iter()
            .filter(|key| self.kb.is_critical(key))
            .collect()
    }

    // ── Recommendation ───────────────────────────────────────────────────────

    /// Rank candidate medicines by how many distinct symptoms list them.
    ///
    /// 1. Symptoms are normalized and deduplicated; unknown ones are skipped.
    /// 2. Each medicine's coverage is the number of symptoms naming its id.
    /// 3. Medicines are sorted by descending coverage. The sort is stable, so
    ///    ties keep the order in which the medicines were first encountered.
    /// 4. `otc_only` filtering and then the `max_recommendations` cap are
    ///    applied to the ranked list, never before ranking.
    pub fn rank_medicines<I, S>(&self, symptoms: I) -> Vec<RankedMedicine>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let keys = distinct_keys(symptoms);
        if keys.is_empty() {
            return Vec::new();
        }

        let mut ranked: Vec<RankedMedicine> = Vec::new();
        let mut position: HashMap<String, usize> = HashMap::new();

        for key in &keys {
            let candidates = self.kb.medicines_for(key);
            if candidates.is_empty() {
                debug!(symptom = %key, "no candidates for symptom; skipping");
                continue;
            }

            // A medicine counts once per symptom even if a table repeats it.
            let mut counted: HashSet<&str> = HashSet::new();
            for medicine in candidates {
                if !counted.insert(medicine.id.as_str()) {
                    continue;
                }
                match position.get(&medicine.id) {
                    Some(&idx) => ranked[idx].coverage += 1,
                    None => {
                        position.insert(medicine.id.clone(), ranked.len());
                        ranked.push(RankedMedicine {
                            medicine: medicine.clone(),
                            coverage: 1,
                        });
                    }
                }
            }
        }

        ranked.sort_by(|a, b| b.coverage.cmp(&a.coverage));

        if self.config.otc_only {
            ranked.retain(|r| r.medicine.is_otc());
        }
        if let Some(max) = self.config.max_recommendations {
            ranked.truncate(max);
        }

        debug!(
            symptoms = keys.len(),
            medicines = ranked.len(),
            "ranked medicine recommendations"
        );
        ranked
    }

    /// Ranked medicines for the given symptoms, without coverage counts.
    pub fn recommend_medicines_for_symptoms<I, S>(&self, symptoms: I) -> Vec<Medicine>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.rank_medicines(symptoms)
            .into_iter()
            .map(|r| r.medicine)
            .collect()
    }

    // ── Aggregation ──────────────────────────────────────────────────────────

    /// Union of the precautions of every symptom, first-seen order, no
    /// duplicates.
    pub fn precautions_for_symptoms<I, S>(&self, symptoms: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen: HashSet<&str> = HashSet::new();
        let mut precautions = Vec::new();
        for key in distinct_keys(symptoms) {
            for precaution in &self.kb.info_for(&key).precautions {
                if seen.insert(precaution.as_str()) {
                    precautions.push(precaution.clone());
                }
            }
        }
        precautions
    }

    /// Specialist scores summed across all matched symptoms.
    ///
    /// A specialist named by three symptoms accumulates the sum of the three
    /// scores.
    pub fn recommended_specialists<I, S>(&self, symptoms: I) -> BTreeMap<String, f64>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut scores: BTreeMap<String, f64> = BTreeMap::new();
        for key in distinct_keys(symptoms) {
            for (specialist, score) in self.kb.specialists_for(&key) {
                *scores.entry(specialist.clone()).or_insert(0.0) += score;
            }
        }
        scores
    }

    /// Side effects per medicine id. Lists are kept per medicine, not merged;
    /// ids the knowledge base does not know are left out.
    pub fn potential_side_effects<I, S>(&self, medicine_ids: I) -> BTreeMap<String, Vec<String>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        distinct_ids(medicine_ids)
            .into_iter()
            .filter(|id| self.kb.medicine(id).is_some())
            .map(|id| {
                let effects = self.kb.side_effects_for(&id).to_vec();
                (id, effects)
            })
            .collect()
    }

    /// Advice for a single condition; unknown conditions give no advice.
    pub fn health_advice(&self, condition: &str) -> Vec<String> {
        self.kb
            .advice_for(&SymptomKey::normalize(condition))
            .to_vec()
    }

    // ── Interactions ─────────────────────────────────────────────────────────

    /// Cross-check every unordered pair of the given medicines.
    ///
    /// Ids are deduplicated first so no pair is checked twice and no medicine
    /// is checked against itself. The knowledge base's graded severity is
    /// used when present, otherwise the configured default tag.
    pub fn check_medicine_interactions<I, S>(&self, medicine_ids: I) -> InteractionReport
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let ids = distinct_ids(medicine_ids);
        let mut records = Vec::new();

        for (i, first) in ids.iter().enumerate() {
            for second in &ids[i + 1..] {
                if let Some(interaction) = self.kb.interaction_between(first, second) {
                    let severity = interaction
                        .severity
                        .unwrap_or(self.config.default_interaction_severity);
                    warn!(
                        first = %first,
                        second = %second,
                        severity = %severity,
                        "medicine interaction found"
                    );
                    records.push(InteractionRecord {
                        first: first.clone(),
                        second: second.clone(),
                        description: interaction.description.clone(),
                        severity,
                    });
                }
            }
        }

        debug!(
            medicines = ids.len(),
            interactions = records.len(),
            "interaction check complete"
        );
        InteractionReport::new(records)
    }

    // ── Dosage ───────────────────────────────────────────────────────────────

    /// Dosage guidance for a patient; see [`dosage::suggested_dosage`].
    pub fn suggested_dosage(&self, medicine_id: &str, age_years: i32, weight_kg: f64) -> String {
        dosage::suggested_dosage(self.kb.as_ref(), medicine_id, age_years, weight_kg)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
