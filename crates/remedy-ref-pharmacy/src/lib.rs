//! # remedy-ref-pharmacy
//!
//! Pharmacy reference runtime for the Remedy symptom triage engine.
//!
//! Demonstrates two pharmacy workflows using mock patients:
//!
//! 1. **Symptom Check**: free-text symptoms from a console are split,
//!    triaged and turned into a `ConsultationReport` with ranked medicines,
//!    precautions and specialist scores.
//! 2. **Medication Review**: the medicines a patient already holds are
//!    cross-checked for interactions, side effects and age/weight dosage.
//!
//! All patient data is hardcoded and fictional. No external systems are
//! contacted.

use std::path::Path;
use std::sync::Arc;

use tracing::info;

use remedy_contracts::error::RemedyResult;
use remedy_core::{EngineConfig, SymptomEngine};
use remedy_knowledge::TableKnowledgeBase;

pub mod mock_data;
pub mod scenarios;

/// Build an engine from optional knowledge and config files.
///
/// `None` selects the built-in pharmacy tables and the default
/// [`EngineConfig`] respectively.
pub fn build_engine(
    knowledge: Option<&Path>,
    config: Option<&Path>,
) -> RemedyResult<SymptomEngine> {
    let kb = match knowledge {
        Some(path) => TableKnowledgeBase::from_file(path)?,
        None => TableKnowledgeBase::builtin()?,
    };
    let config = match config {
        Some(path) => EngineConfig::from_file(path)?,
        None => EngineConfig::default(),
    };
    info!(
        custom_knowledge = knowledge.is_some(),
        max_recommendations = ?config.max_recommendations,
        otc_only = config.otc_only,
        "engine ready"
    );
    Ok(SymptomEngine::with_config(Arc::new(kb), config))
}

#[cfg(test)]
mod tests {
    use remedy_contracts::error::RemedyError;

    use super::build_engine;

    #[test]
    fn test_build_engine_defaults() {
        let engine = build_engine(None, None).unwrap();
        assert_eq!(engine.config().max_recommendations, Some(20));
        assert!(engine.knowledge().medicine("M001").is_some());
    }

    #[test]
    fn test_build_engine_missing_knowledge_file() {
        let result = build_engine(Some(std::path::Path::new("/nonexistent/kb.toml")), None);
        assert!(matches!(result, Err(RemedyError::ConfigError { .. })));
    }
}
