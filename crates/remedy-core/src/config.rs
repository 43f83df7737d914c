//! Engine configuration.
//!
//! Every field has a default, so an empty TOML document is a valid config:
//!
//! ```toml
//! max_recommendations = 20
//! otc_only = false
//! default_interaction_severity = "UNKNOWN"
//! ```
//!
//! `max_recommendations` takes a positive count or the string `"none"` for
//! no cap. `0` is rejected.

use std::path::Path;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use remedy_contracts::{
    error::{RemedyError, RemedyResult},
    interaction::InteractionSeverity,
};

/// Result cap applied when a config does not set one.
pub const DEFAULT_MAX_RECOMMENDATIONS: usize = 20;

/// Tunable bounds for [`SymptomEngine`](crate::SymptomEngine).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Maximum number of ranked medicines returned. Applied after ranking;
    /// `None` returns every candidate.
    #[serde(deserialize_with = "deserialize_cap", serialize_with = "serialize_cap")]
    pub max_recommendations: Option<usize>,

    /// Drop prescription-only medicines from recommendations.
    pub otc_only: bool,

    /// Severity tag used when the knowledge base records an interaction
    /// without a graded severity.
    pub default_interaction_severity: InteractionSeverity,
}

/// Keyword accepted in place of a count to disable the cap.
const UNCAPPED: &str = "none";

/// A cap as written in TOML: a count, or a keyword.
#[derive(Deserialize)]
#[serde(untagged)]
enum CapSetting {
    Count(i64),
    Keyword(String),
}

fn deserialize_cap<'de, D>(deserializer: D) -> Result<Option<usize>, D::Error>
where
    D: Deserializer<'de>,
{
    match CapSetting::deserialize(deserializer)? {
        CapSetting::Count(n) if n >= 1 => usize::try_from(n).map(Some).map_err(de::Error::custom),
        CapSetting::Count(n) => Err(de::Error::custom(format!(
            "max_recommendations must be at least 1, got {n}; use \"{UNCAPPED}\" for no cap"
        ))),
        CapSetting::Keyword(k) if k.trim().eq_ignore_ascii_case(UNCAPPED) => Ok(None),
        CapSetting::Keyword(k) => Err(de::Error::custom(format!(
            "max_recommendations must be a positive count or \"{UNCAPPED}\", got \"{k}\""
        ))),
    }
}

fn serialize_cap<S>(cap: &Option<usize>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match cap {
        Some(n) => serializer.serialize_u64(*n as u64),
        None => serializer.serialize_str(UNCAPPED),
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_recommendations: Some(DEFAULT_MAX_RECOMMENDATIONS),
            otc_only: false,
            default_interaction_severity: InteractionSeverity::Unknown,
        }
    }
}

impl EngineConfig {
    /// Parse `s` as a TOML engine configuration.
    ///
    /// Returns `RemedyError::ConfigError` if the TOML is malformed or a field
    /// has the wrong type.
    pub fn from_toml_str(s: &str) -> RemedyResult<Self> {
        toml::from_str(s).map_err(|e| RemedyError::ConfigError {
            reason: format!("failed to parse engine config TOML: {}", e),
        })
    }

    /// Read the file at `path` and parse it as an engine configuration.
    pub fn from_file(path: &Path) -> RemedyResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| RemedyError::ConfigError {
            reason: format!("failed to read engine config '{}': {}", path.display(), e),
        })?;
        Self::from_toml_str(&contents)
    }
}
