//! Medicine interaction types.
//!
//! The knowledge base stores an [`Interaction`] under one medicine id for
//! another. The interaction checker turns every hit into an
//! [`InteractionRecord`] and collects them in an [`InteractionReport`].

use std::fmt;

use serde::{Deserialize, Serialize};

/// Graded severity of a recorded interaction.
///
/// Expressed in TOML and JSON as an upper-case string:
/// ```toml
/// severity = "HIGH"
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum InteractionSeverity {
    High,
    Medium,
    Low,
    /// No graded severity is on record for the pair.
    #[default]
    Unknown,
}

impl fmt::Display for InteractionSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::High => "HIGH",
            Self::Medium => "MEDIUM",
            Self::Low => "LOW",
            Self::Unknown => "UNKNOWN",
        };
        f.write_str(label)
    }
}

/// One entry of the interaction table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interaction {
    pub description: String,
    /// Graded severity, when the knowledge source supplies one.
    pub severity: Option<InteractionSeverity>,
}

/// An interaction found between two medicines of a checked set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractionRecord {
    /// The id that appeared first in the checked sequence.
    pub first: String,
    /// The id that appeared second in the checked sequence.
    pub second: String,
    pub description: String,
    pub severity: InteractionSeverity,
}

/// Result of cross-checking a set of medicine ids.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractionReport {
    /// Found interactions, in pair-scan order.
    pub interactions: Vec<InteractionRecord>,
    /// True only if `interactions` is non-empty.
    pub has_interactions: bool,
}

impl InteractionReport {
    /// Build a report, deriving `has_interactions` from the records.
    pub fn new(interactions: Vec<InteractionRecord>) -> Self {
        let has_interactions = !interactions.is_empty();
        Self {
            interactions,
            has_interactions,
        }
    }

    /// The most severe graded interaction in the report, if any was graded.
    pub fn highest_severity(&self) -> Option<InteractionSeverity> {
        let rank = |s: InteractionSeverity| match s {
            InteractionSeverity::High => 3,
            InteractionSeverity::Medium => 2,
            InteractionSeverity::Low => 1,
            InteractionSeverity::Unknown => 0,
        };
        self.interactions
            .iter()
            .map(|r| r.severity)
            .filter(|s| *s != InteractionSeverity::Unknown)
            .max_by_key(|s| rank(*s))
    }
}
