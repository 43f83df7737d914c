//! # remedy-knowledge
//!
//! TOML-driven, validated knowledge tables for the Remedy engine.
//!
//! ## Overview
//!
//! This crate provides [`TableKnowledgeBase`], which implements the
//! [`KnowledgeBase`](remedy_core::traits::KnowledgeBase) trait. The medicine
//! catalog, symptom table, critical set, interaction table, advice and dosage
//! profiles are declared in one TOML document, checked once at load and then
//! only read.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use remedy_core::SymptomEngine;
//! use remedy_knowledge::TableKnowledgeBase;
//!
//! let kb = TableKnowledgeBase::builtin()?;
//! let engine = SymptomEngine::new(Arc::new(kb));
//! ```
//!
//! ## Normalization
//!
//! Symptom keys, critical symptoms and advice conditions are lower-cased and
//! trimmed on load, so `"Headache "` in a document matches `"HEADACHE"` in a
//! query.

pub mod schema;
pub mod table;

pub use schema::{InteractionEntry, KnowledgeDocument, SymptomEntry};
pub use table::{TableKnowledgeBase, BUILTIN_KNOWLEDGE};

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use remedy_contracts::{
        error::RemedyError, interaction::InteractionSeverity, symptom::SymptomKey,
    };
    use remedy_core::{traits::KnowledgeBase, SymptomEngine, INVALID_DOSAGE_INPUT};

    use crate::TableKnowledgeBase;

    // ── Helpers ───────────────────────────────────────────────────────────────

    fn builtin_engine() -> SymptomEngine {
        SymptomEngine::new(Arc::new(TableKnowledgeBase::builtin().unwrap()))
    }

    fn ids(medicines: &[remedy_contracts::medicine::Medicine]) -> Vec<&str> {
        medicines.iter().map(|m| m.id.as_str()).collect()
    }

    /// Assert that `toml` fails validation with a reason containing `needle`.
    fn assert_invalid(toml: &str, needle: &str) {
        match TableKnowledgeBase::from_toml_str(toml) {
            Err(RemedyError::InvalidKnowledge { reason }) => {
                assert!(reason.contains(needle), "unexpected reason: {reason}");
            }
            other => panic!("expected InvalidKnowledge, got {:?}", other.map(|_| ())),
        }
    }

    const TWO_MEDICINES: &str = r#"
        [[medicines]]
        id = "A"
        name = "Alpha"
        price = 1.0
        category = "OTC"
        description = "first"

        [[medicines]]
        id = "B"
        name = "Beta"
        price = 2.0
        category = "OTC"
        description = "second"
    "#;

    // ── 1. loading ────────────────────────────────────────────────────────────

    #[test]
    fn test_builtin_loads() {
        let kb = TableKnowledgeBase::builtin().unwrap();
        assert_eq!(kb.medicines().len(), 12);
        assert!(kb.symptom_keys().iter().any(|k| k.as_str() == "headache"));
        assert_eq!(kb.medicine("M001").unwrap().name, "Tylenol");
    }

    #[test]
    fn test_empty_document_is_empty_knowledge() {
        let kb = TableKnowledgeBase::from_toml_str("").unwrap();
        let key = SymptomKey::normalize("headache");
        assert!(kb.medicines_for(&key).is_empty());
        assert!(kb.info_for(&key).precautions.is_empty());
        assert!(!kb.is_critical(&key));
        assert!(kb.specialists_for(&key).is_empty());
    }

    #[test]
    fn test_parse_error_is_config_error() {
        match TableKnowledgeBase::from_toml_str("[[medicines]]\nid = 7") {
            Err(RemedyError::ConfigError { reason }) => {
                assert!(
                    reason.contains("failed to parse knowledge TOML"),
                    "unexpected reason: {reason}"
                );
            }
            other => panic!("expected ConfigError, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let result =
            TableKnowledgeBase::from_file(std::path::Path::new("/nonexistent/pharmacy.toml"));
        assert!(matches!(result, Err(RemedyError::ConfigError { .. })));
    }

    #[test]
    fn test_keys_are_normalized_on_load() {
        let toml = format!(
            r#"
            critical = ["  Chest Pain "]
            {TWO_MEDICINES}
            [[symptoms]]
            key = " HEADACHE"
            medicines = ["A"]

            [advice]
            "Common Cold" = ["Rest"]
            "#
        );
        let kb = TableKnowledgeBase::from_toml_str(&toml).unwrap();
        assert_eq!(kb.medicines_for(&SymptomKey::normalize("headache")).len(), 1);
        assert!(kb.is_critical(&SymptomKey::normalize("chest pain")));
        assert_eq!(kb.advice_for(&SymptomKey::normalize("common cold")), ["Rest"]);
    }

    // ── 2. validation ─────────────────────────────────────────────────────────

    #[test]
    fn test_rejects_duplicate_medicine_id() {
        let toml = r#"
            [[medicines]]
            id = "A"
            name = "Alpha"
            price = 1.0
            category = "OTC"
            description = ""

            [[medicines]]
            id = "A"
            name = "Again"
            price = 1.0
            category = "OTC"
            description = ""
        "#;
        assert_invalid(toml, "duplicate medicine id 'A'");
    }

    #[test]
    fn test_rejects_blank_medicine_id() {
        let toml = r#"
            [[medicines]]
            id = "  "
            name = "Nameless"
            price = 1.0
            category = "OTC"
            description = ""
        "#;
        assert_invalid(toml, "blank id");
    }

    #[test]
    fn test_rejects_padded_medicine_id() {
        let toml = r#"
            [[medicines]]
            id = " A "
            name = "Alpha"
            price = 1.0
            category = "OTC"
            description = ""
        "#;
        assert_invalid(toml, "medicine id ' A ' has surrounding whitespace");
    }

    #[test]
    fn test_rejects_unknown_medicine_reference() {
        let toml = format!(
            r#"
            {TWO_MEDICINES}
            [[symptoms]]
            key = "headache"
            medicines = ["A", "Z"]
            "#
        );
        assert_invalid(&toml, "unknown medicine 'Z'");
    }

    #[test]
    fn test_rejects_medicine_listed_twice_for_symptom() {
        let toml = format!(
            r#"
            {TWO_MEDICINES}
            [[symptoms]]
            key = "headache"
            medicines = ["A", "A"]
            "#
        );
        assert_invalid(&toml, "lists medicine 'A' twice");
    }

    #[test]
    fn test_rejects_symptoms_equal_after_normalization() {
        let toml = r#"
            [[symptoms]]
            key = "Headache"

            [[symptoms]]
            key = "headache "
        "#;
        assert_invalid(toml, "duplicate symptom 'headache'");
    }

    #[test]
    fn test_rejects_score_out_of_range() {
        let toml = r#"
            [[symptoms]]
            key = "headache"
            [symptoms.specialists]
            "Neurologist" = 1.5
        "#;
        assert_invalid(toml, "outside 0.0..=1.0");
    }

    #[test]
    fn test_rejects_self_interaction() {
        let toml = format!(
            r#"
            {TWO_MEDICINES}
            [[interactions]]
            medicine = "A"
            with = "A"
            description = "itself"
            "#
        );
        assert_invalid(&toml, "interacting with itself");
    }

    #[test]
    fn test_rejects_duplicate_interaction() {
        let toml = format!(
            r#"
            {TWO_MEDICINES}
            [[interactions]]
            medicine = "A"
            with = "B"
            description = "once"

            [[interactions]]
            medicine = "A"
            with = "B"
            description = "twice"
            "#
        );
        assert_invalid(&toml, "duplicate interaction 'A' -> 'B'");
    }

    #[test]
    fn test_rejects_pair_recorded_in_both_directions() {
        let toml = format!(
            r#"
            {TWO_MEDICINES}
            [[interactions]]
            medicine = "A"
            with = "B"
            description = "one way"
            severity = "HIGH"

            [[interactions]]
            medicine = "B"
            with = "A"
            description = "other way"
            severity = "LOW"
            "#
        );
        assert_invalid(&toml, "'B' -> 'A' is already recorded as 'A' -> 'B'");
    }

    #[test]
    fn test_one_way_pair_has_same_severity_in_any_order() {
        let toml = format!(
            r#"
            {TWO_MEDICINES}
            [[interactions]]
            medicine = "A"
            with = "B"
            description = "one way"
            severity = "HIGH"
            "#
        );
        let kb = TableKnowledgeBase::from_toml_str(&toml).unwrap();
        let engine = SymptomEngine::new(Arc::new(kb));
        for pair in [["A", "B"], ["B", "A"]] {
            let report = engine.check_medicine_interactions(pair);
            assert_eq!(report.interactions.len(), 1);
            assert_eq!(report.interactions[0].severity, InteractionSeverity::High);
        }
    }

    #[test]
    fn test_rejects_dosage_for_unknown_medicine() {
        let toml = r#"
            [[dosage]]
            medicine = "Z"
            [dosage.bands]
            adult = "1 tablet"
        "#;
        assert_invalid(toml, "dosage profile references unknown medicine 'Z'");
    }

    #[test]
    fn test_rejects_non_positive_weight_rule() {
        let toml = format!(
            r#"
            {TWO_MEDICINES}
            [[dosage]]
            medicine = "A"
            [dosage.weight_based]
            mg_per_kg = 0.0
            max_single_mg = 100.0
            frequency = "daily"
            applies_to = ["child"]
            "#
        );
        assert_invalid(&toml, "positive mg_per_kg");
    }

    // ── 3. engine over the built-in tables ────────────────────────────────────

    #[test]
    fn test_headache_and_fever_ranking() {
        let engine = builtin_engine();
        let meds = engine.recommend_medicines_for_symptoms(["headache", "fever"]);
        assert_eq!(ids(&meds), vec!["M001", "M002", "M008"]);
    }

    #[test]
    fn test_triage_examples() {
        let engine = builtin_engine();
        assert!(engine.is_medical_attention_required(["Chest Pain"]));
        assert!(engine.is_medical_attention_required(["cough", "  difficulty breathing"]));
        assert!(!engine.is_medical_attention_required(["headache", "fever"]));
        assert!(!engine.is_medical_attention_required(Vec::<String>::new()));
    }

    #[test]
    fn test_specialist_scores_are_summed() {
        let engine = builtin_engine();
        let scores = engine.recommended_specialists(["headache", "dizziness"]);
        let gp = scores["General Practitioner"];
        assert!((gp - 1.1).abs() < 1e-9, "got {gp}");
        let neuro = scores["Neurologist"];
        assert!((neuro - 0.7).abs() < 1e-9, "got {neuro}");
    }

    #[test]
    fn test_interaction_recorded_one_way_found_both_ways() {
        let engine = builtin_engine();

        // Recorded under M012 only.
        let report = engine.check_medicine_interactions(["M008", "M012"]);
        assert!(report.has_interactions);
        assert_eq!(report.interactions.len(), 1);
        assert_eq!(report.interactions[0].first, "M008");
        assert_eq!(report.interactions[0].second, "M012");
        assert_eq!(report.interactions[0].severity, InteractionSeverity::High);
    }

    #[test]
    fn test_ungraded_interaction_uses_default_severity() {
        let engine = builtin_engine();
        let report = engine.check_medicine_interactions(["M012", "M010"]);
        assert_eq!(report.interactions.len(), 1);
        assert_eq!(report.interactions[0].severity, InteractionSeverity::Unknown);
    }

    #[test]
    fn test_no_interaction_between_unrelated_medicines() {
        let engine = builtin_engine();
        let report = engine.check_medicine_interactions(["M003", "M010"]);
        assert!(!report.has_interactions);
        assert!(report.interactions.is_empty());
    }

    #[test]
    fn test_side_effects_skip_unknown_ids() {
        let engine = builtin_engine();
        let effects = engine.potential_side_effects(["M003", "M999"]);
        assert_eq!(effects.len(), 1);
        assert!(effects["M003"].contains(&"Drowsiness".to_string()));
    }

    #[test]
    fn test_health_advice_lookup() {
        let engine = builtin_engine();
        let advice = engine.health_advice("Hypertension");
        assert_eq!(advice.len(), 4);
        assert!(engine.health_advice("unknown condition").is_empty());
    }

    #[test]
    fn test_weight_scaled_child_dose() {
        let engine = builtin_engine();
        let text = engine.suggested_dosage("M001", 5, 20.0);
        assert!(text.starts_with("Tylenol (child): 300 mg per dose"), "got {text}");
    }

    #[test]
    fn test_infant_dose_at_one_year() {
        let engine = builtin_engine();
        let text = engine.suggested_dosage("M001", 1, 9.0);
        assert!(text.starts_with("Tylenol (infant): 135 mg per dose"), "got {text}");
    }

    #[test]
    fn test_weight_scaled_dose_is_capped() {
        let engine = builtin_engine();
        // 15 mg/kg at 90 kg would be 1350 mg; the cap is 1000 mg.
        let text = engine.suggested_dosage("M001", 10, 90.0);
        assert!(text.starts_with("Tylenol (child): 1000 mg per dose"), "got {text}");
    }

    #[test]
    fn test_adult_band_text() {
        let engine = builtin_engine();
        let text = engine.suggested_dosage("M005", 30, 70.0);
        assert_eq!(text, "Loratadine (adult): 10 mg once daily");
    }

    #[test]
    fn test_minimum_age_refusal() {
        let engine = builtin_engine();
        let text = engine.suggested_dosage("M008", 10, 30.0);
        assert!(text.contains("not recommended for patients under 16 years"), "got {text}");
    }

    #[test]
    fn test_invalid_dosage_input() {
        let engine = builtin_engine();
        assert_eq!(engine.suggested_dosage("M001", 0, 70.0), INVALID_DOSAGE_INPUT);
        assert_eq!(engine.suggested_dosage("M001", 30, -1.0), INVALID_DOSAGE_INPUT);
        assert_eq!(engine.suggested_dosage("", 30, 70.0), INVALID_DOSAGE_INPUT);
    }
}
