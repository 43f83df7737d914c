//! # remedy-core
//!
//! The symptom triage and medicine recommendation engine.
//!
//! This crate provides:
//! - The `KnowledgeBase` trait, the single read-only seam every operation
//!   goes through
//! - The `SymptomEngine` exposing triage, ranking, aggregation, interaction
//!   checking and dosage guidance
//! - `EngineConfig`, the TOML-loadable engine bounds
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use remedy_core::SymptomEngine;
//! use remedy_knowledge::TableKnowledgeBase;
//!
//! let engine = SymptomEngine::new(Arc::new(TableKnowledgeBase::builtin()?));
//! let meds = engine.recommend_medicines_for_symptoms(["headache", "fever"]);
//! ```

pub mod config;
pub mod dosage;
pub mod engine;
pub mod traits;

pub use config::EngineConfig;
pub use dosage::INVALID_DOSAGE_INPUT;
pub use engine::SymptomEngine;
pub use traits::KnowledgeBase;

#[cfg(test)]
mod tests {
    use remedy_contracts::{error::RemedyError, interaction::InteractionSeverity};

    use crate::config::{EngineConfig, DEFAULT_MAX_RECOMMENDATIONS};

    #[test]
    fn test_config_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.max_recommendations, Some(DEFAULT_MAX_RECOMMENDATIONS));
        assert!(!config.otc_only);
        assert_eq!(config.default_interaction_severity, InteractionSeverity::Unknown);
    }

    #[test]
    fn test_config_empty_toml_uses_defaults() {
        let config = EngineConfig::from_toml_str("").unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn test_config_overrides() {
        let config = EngineConfig::from_toml_str(
            r#"
            max_recommendations = 5
            otc_only = true
            default_interaction_severity = "MEDIUM"
            "#,
        )
        .unwrap();
        assert_eq!(config.max_recommendations, Some(5));
        assert!(config.otc_only);
        assert_eq!(config.default_interaction_severity, InteractionSeverity::Medium);
    }

    #[test]
    fn test_config_parse_error() {
        match EngineConfig::from_toml_str("max_recommendations = \"lots\"") {
            Err(RemedyError::ConfigError { reason }) => {
                assert!(
                    reason.contains("failed to parse engine config TOML"),
                    "unexpected reason: {reason}"
                );
            }
            other => panic!("expected ConfigError, got {:?}", other),
        }
    }

    #[test]
    fn test_config_none_removes_cap() {
        let config = EngineConfig::from_toml_str(r#"max_recommendations = "none""#).unwrap();
        assert_eq!(config.max_recommendations, None);
    }

    #[test]
    fn test_config_rejects_zero_and_negative_cap() {
        for toml in ["max_recommendations = 0", "max_recommendations = -1"] {
            match EngineConfig::from_toml_str(toml) {
                Err(RemedyError::ConfigError { reason }) => {
                    assert!(
                        reason.contains("max_recommendations must be at least 1"),
                        "unexpected reason: {reason}"
                    );
                }
                other => panic!("expected ConfigError for {toml:?}, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_config_rejects_unknown_cap_keyword() {
        let result = EngineConfig::from_toml_str(r#"max_recommendations = "all""#);
        assert!(matches!(result, Err(RemedyError::ConfigError { .. })));
    }

    #[test]
    fn test_config_uncapped_serializes_as_keyword() {
        let config = EngineConfig {
            max_recommendations: None,
            ..EngineConfig::default()
        };
        let text = toml::to_string(&config).unwrap();
        assert!(text.contains(r#"max_recommendations = "none""#), "{text}");
        assert_eq!(EngineConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn test_config_missing_file() {
        let result = EngineConfig::from_file(std::path::Path::new("/nonexistent/remedy.toml"));
        assert!(matches!(result, Err(RemedyError::ConfigError { .. })));
    }
}
