//! Symptom keys and per-symptom information records.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A normalized symptom string: lower-cased with surrounding whitespace
/// removed.
///
/// The only way to build a key is [`SymptomKey::normalize`], so any two raw
/// strings that differ only in case or padding map to the same key. An empty
/// key is valid but never matches a table entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct SymptomKey(String);

impl SymptomKey {
    /// Normalize `raw` into a lookup key.
    ///
    /// Idempotent: normalizing an already normalized string returns it
    /// unchanged.
    pub fn normalize(raw: &str) -> Self {
        Self(raw.to_lowercase().trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<String> for SymptomKey {
    fn from(raw: String) -> Self {
        Self::normalize(&raw)
    }
}

impl From<&str> for SymptomKey {
    fn from(raw: &str) -> Self {
        Self::normalize(raw)
    }
}

impl From<SymptomKey> for String {
    fn from(key: SymptomKey) -> Self {
        key.0
    }
}

impl fmt::Display for SymptomKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Descriptive information about a symptom.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymptomInfo {
    pub description: String,
    /// Self-care precautions, in the order they should be shown.
    pub precautions: Vec<String>,
}

impl SymptomInfo {
    /// The record returned for symptoms the knowledge base does not know.
    pub const EMPTY: SymptomInfo = SymptomInfo {
        description: String::new(),
        precautions: Vec::new(),
    };
}
