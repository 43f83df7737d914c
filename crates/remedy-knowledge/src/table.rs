//! Table-backed knowledge base.
//!
//! `TableKnowledgeBase` loads a `KnowledgeDocument` from a TOML string or
//! file, validates it, and implements the `KnowledgeBase` trait from
//! remedy-core.
//!
//! Construction steps:
//!
//! 1. Index the medicine catalog; ids must be non-blank, unpadded and unique.
//! 2. Normalize symptom keys (unique after normalization) and resolve each
//!    symptom's medicine ids against the catalog.
//! 3. Check specialist scores lie in 0.0..=1.0.
//! 4. Index interactions under the medicine they were recorded for. A pair
//!    may be recorded in one direction only.
//! 5. Normalize critical symptoms and advice conditions; index dosage
//!    profiles.
//!
//! Any violation is a `RemedyError::InvalidKnowledge`. After construction the
//! tables are never written again.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::Path;

use tracing::{debug, info};

use remedy_contracts::{
    dosage::DosageProfile,
    error::{RemedyError, RemedyResult},
    interaction::Interaction,
    medicine::Medicine,
    symptom::{SymptomInfo, SymptomKey},
};
use remedy_core::traits::KnowledgeBase;

use crate::schema::KnowledgeDocument;

/// The pharmacy tables compiled into the binary.
pub const BUILTIN_KNOWLEDGE: &str = include_str!("../knowledge/pharmacy.toml");

static EMPTY_INFO: SymptomInfo = SymptomInfo::EMPTY;
static EMPTY_SCORES: BTreeMap<String, f64> = BTreeMap::new();

fn invalid(reason: String) -> RemedyError {
    RemedyError::InvalidKnowledge { reason }
}

/// A `KnowledgeBase` built from validated, in-memory tables.
///
/// ```rust,ignore
/// use remedy_knowledge::TableKnowledgeBase;
///
/// let kb = TableKnowledgeBase::from_file(Path::new("knowledge/pharmacy.toml"))?;
/// ```
#[derive(Debug, Default)]
pub struct TableKnowledgeBase {
    catalog: HashMap<String, Medicine>,
    candidates: HashMap<SymptomKey, Vec<Medicine>>,
    info: HashMap<SymptomKey, SymptomInfo>,
    critical: HashSet<SymptomKey>,
    specialists: HashMap<SymptomKey, BTreeMap<String, f64>>,
    interactions: HashMap<String, HashMap<String, Interaction>>,
    advice: HashMap<SymptomKey, Vec<String>>,
    dosage: HashMap<String, DosageProfile>,
}

impl TableKnowledgeBase {
    /// Parse `s` as a TOML knowledge document and build a validated knowledge
    /// base.
    ///
    /// Returns `RemedyError::ConfigError` if the TOML is malformed and
    /// `RemedyError::InvalidKnowledge` if the tables break an invariant.
    pub fn from_toml_str(s: &str) -> RemedyResult<Self> {
        let document: KnowledgeDocument =
            toml::from_str(s).map_err(|e| RemedyError::ConfigError {
                reason: format!("failed to parse knowledge TOML: {}", e),
            })?;
        Self::from_document(document)
    }

    /// Read the file at `path` and parse it as a knowledge document.
    pub fn from_file(path: &Path) -> RemedyResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| RemedyError::ConfigError {
            reason: format!("failed to read knowledge file '{}': {}", path.display(), e),
        })?;
        Self::from_toml_str(&contents)
    }

    /// The built-in pharmacy tables.
    pub fn builtin() -> RemedyResult<Self> {
        Self::from_toml_str(BUILTIN_KNOWLEDGE)
    }

    /// Validate `document` and index its tables.
    pub fn from_document(document: KnowledgeDocument) -> RemedyResult<Self> {
        let mut kb = Self::default();

        // ── Catalog ──────────────────────────────────────────────────────────
        for medicine in document.medicines {
            if medicine.id.trim().is_empty() {
                return Err(invalid(format!(
                    "medicine '{}' has a blank id",
                    medicine.name
                )));
            }
            if medicine.id.trim() != medicine.id {
                return Err(invalid(format!(
                    "medicine id '{}' has surrounding whitespace",
                    medicine.id
                )));
            }
            if kb.catalog.contains_key(&medicine.id) {
                return Err(invalid(format!("duplicate medicine id '{}'", medicine.id)));
            }
            kb.catalog.insert(medicine.id.clone(), medicine);
        }

        // ── Symptoms ─────────────────────────────────────────────────────────
        for entry in document.symptoms {
            let key = SymptomKey::normalize(&entry.key);
            if key.is_empty() {
                return Err(invalid("symptom with a blank key".to_string()));
            }
            if kb.info.contains_key(&key) {
                return Err(invalid(format!("duplicate symptom '{}'", key)));
            }

            let mut listed = HashSet::new();
            let mut medicines = Vec::with_capacity(entry.medicines.len());
            for id in &entry.medicines {
                if !listed.insert(id.as_str()) {
                    return Err(invalid(format!(
                        "symptom '{}' lists medicine '{}' twice",
                        key, id
                    )));
                }
                let medicine = kb.catalog.get(id).ok_or_else(|| {
                    invalid(format!(
                        "symptom '{}' references unknown medicine '{}'",
                        key, id
                    ))
                })?;
                medicines.push(medicine.clone());
            }

            for (specialist, score) in &entry.specialists {
                if !(0.0..=1.0).contains(score) {
                    return Err(invalid(format!(
                        "specialist '{}' for symptom '{}' has score {} outside 0.0..=1.0",
                        specialist, key, score
                    )));
                }
            }

            if !medicines.is_empty() {
                kb.candidates.insert(key.clone(), medicines);
            }
            if !entry.specialists.is_empty() {
                kb.specialists.insert(key.clone(), entry.specialists);
            }
            kb.info.insert(
                key,
                SymptomInfo {
                    description: entry.description,
                    precautions: entry.precautions,
                },
            );
        }

        // ── Critical set ─────────────────────────────────────────────────────
        for raw in document.critical {
            let key = SymptomKey::normalize(&raw);
            if key.is_empty() {
                return Err(invalid("blank critical symptom".to_string()));
            }
            kb.critical.insert(key);
        }

        // ── Interactions ─────────────────────────────────────────────────────
        for entry in document.interactions {
            for id in [&entry.medicine, &entry.with] {
                if !kb.catalog.contains_key(id) {
                    return Err(invalid(format!(
                        "interaction references unknown medicine '{}'",
                        id
                    )));
                }
            }
            if entry.medicine == entry.with {
                return Err(invalid(format!(
                    "medicine '{}' is recorded as interacting with itself",
                    entry.medicine
                )));
            }

            let reversed = kb
                .interactions
                .get(&entry.with)
                .is_some_and(|m| m.contains_key(&entry.medicine));
            if reversed {
                return Err(invalid(format!(
                    "interaction '{}' -> '{}' is already recorded as '{}' -> '{}'",
                    entry.medicine, entry.with, entry.with, entry.medicine
                )));
            }

            let under = kb.interactions.entry(entry.medicine.clone()).or_default();
            if under.contains_key(&entry.with) {
                return Err(invalid(format!(
                    "duplicate interaction '{}' -> '{}'",
                    entry.medicine, entry.with
                )));
            }
            under.insert(
                entry.with,
                Interaction {
                    description: entry.description,
                    severity: entry.severity,
                },
            );
        }

        // ── Advice ───────────────────────────────────────────────────────────
        for (condition, advice) in document.advice {
            let key = SymptomKey::normalize(&condition);
            if kb.advice.insert(key.clone(), advice).is_some() {
                return Err(invalid(format!("duplicate advice for condition '{}'", key)));
            }
        }

        // ── Dosage ───────────────────────────────────────────────────────────
        for profile in document.dosage {
            if !kb.catalog.contains_key(&profile.medicine) {
                return Err(invalid(format!(
                    "dosage profile references unknown medicine '{}'",
                    profile.medicine
                )));
            }
            if let Some(rule) = &profile.weight_based {
                if !(rule.mg_per_kg > 0.0 && rule.max_single_mg > 0.0) {
                    return Err(invalid(format!(
                        "weight-based dose for '{}' must have positive mg_per_kg and max_single_mg",
                        profile.medicine
                    )));
                }
            }
            if kb.dosage.contains_key(&profile.medicine) {
                return Err(invalid(format!(
                    "duplicate dosage profile for '{}'",
                    profile.medicine
                )));
            }
            kb.dosage.insert(profile.medicine.clone(), profile);
        }

        info!(
            medicines = kb.catalog.len(),
            symptoms = kb.info.len(),
            critical = kb.critical.len(),
            interactions = kb.interactions.values().map(HashMap::len).sum::<usize>(),
            conditions = kb.advice.len(),
            dosage_profiles = kb.dosage.len(),
            "knowledge base loaded"
        );

        Ok(kb)
    }

    /// Every medicine in the catalog, ordered by id.
    pub fn medicines(&self) -> Vec<&Medicine> {
        let mut medicines: Vec<&Medicine> = self.catalog.values().collect();
        medicines.sort_by(|a, b| a.id.cmp(&b.id));
        medicines
    }

    /// Every known symptom key, sorted.
    pub fn symptom_keys(&self) -> Vec<&SymptomKey> {
        let mut keys: Vec<&SymptomKey> = self.info.keys().collect();
        keys.sort();
        keys
    }
}

impl KnowledgeBase for TableKnowledgeBase {
    fn medicines_for(&self, symptom: &SymptomKey) -> &[Medicine] {
        self.candidates.get(symptom).map(Vec::as_slice).unwrap_or(&[])
    }

    fn info_for(&self, symptom: &SymptomKey) -> &SymptomInfo {
        self.info.get(symptom).unwrap_or(&EMPTY_INFO)
    }

    fn is_critical(&self, symptom: &SymptomKey) -> bool {
        self.critical.contains(symptom)
    }

    fn specialists_for(&self, symptom: &SymptomKey) -> &BTreeMap<String, f64> {
        self.specialists.get(symptom).unwrap_or(&EMPTY_SCORES)
    }

    fn side_effects_for(&self, medicine_id: &str) -> &[String] {
        self.catalog
            .get(medicine_id)
            .map(|m| m.side_effects.as_slice())
            .unwrap_or(&[])
    }

    /// Look under `a` for `b`, then under `b` for `a`. First hit wins.
    fn interaction_between(&self, a: &str, b: &str) -> Option<&Interaction> {
        let lookup = |under: &str, with: &str| {
            self.interactions.get(under).and_then(|m| m.get(with))
        };
        let hit = lookup(a, b).or_else(|| lookup(b, a));
        if hit.is_some() {
            debug!(a = %a, b = %b, "interaction table hit");
        }
        hit
    }

    fn advice_for(&self, condition: &SymptomKey) -> &[String] {
        self.advice.get(condition).map(Vec::as_slice).unwrap_or(&[])
    }

    fn medicine(&self, medicine_id: &str) -> Option<&Medicine> {
        self.catalog.get(medicine_id)
    }

    fn dosage_profile(&self, medicine_id: &str) -> Option<&DosageProfile> {
        self.dosage.get(medicine_id)
    }
}
