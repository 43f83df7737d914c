//! Age bands and per-medicine dosage profiles.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Age category used to select dosage guidance.
///
/// Thresholds (in whole years):
/// - infant      `< 2`
/// - child       `2..12`
/// - adolescent  `12..18`
/// - adult       `18..65`
/// - senior      `>= 65`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AgeBand {
    Infant,
    Child,
    Adolescent,
    Adult,
    Senior,
}

impl AgeBand {
    /// Bucket a patient age in years. Callers validate `age > 0` first.
    pub fn for_age(age_years: i32) -> Self {
        match age_years {
            i32::MIN..=1 => Self::Infant,
            2..=11 => Self::Child,
            12..=17 => Self::Adolescent,
            18..=64 => Self::Adult,
            _ => Self::Senior,
        }
    }
}

impl fmt::Display for AgeBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Infant => "infant",
            Self::Child => "child",
            Self::Adolescent => "adolescent",
            Self::Adult => "adult",
            Self::Senior => "senior",
        };
        f.write_str(label)
    }
}

/// A dose computed from body weight, used for the bands it lists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightBasedDose {
    /// Milligrams per kilogram of body weight for one dose.
    pub mg_per_kg: f64,
    /// Upper bound for a single dose regardless of weight.
    pub max_single_mg: f64,
    /// How often the dose may be repeated (e.g. "every 4-6 hours").
    pub frequency: String,
    /// Bands for which the weight formula replaces the fixed text.
    pub applies_to: Vec<AgeBand>,
}

/// Dosage data for one medicine.
///
/// ```toml
/// [[dosage]]
/// medicine = "M001"
/// min_age_years = 0
///
/// [dosage.weight_based]
/// mg_per_kg = 15.0
/// max_single_mg = 1000.0
/// frequency = "every 4-6 hours, no more than 5 doses in 24 hours"
/// applies_to = ["infant", "child"]
///
/// [dosage.bands]
/// adult = "500-1000 mg every 4-6 hours, max 4000 mg per day"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DosageProfile {
    /// Id of the medicine this profile belongs to.
    pub medicine: String,
    /// Patients younger than this must not take the medicine.
    #[serde(default)]
    pub min_age_years: Option<u32>,
    #[serde(default)]
    pub weight_based: Option<WeightBasedDose>,
    /// Fixed guidance per age band.
    #[serde(default)]
    pub bands: BandGuidance,
}

/// Fixed dosage text for each age band; a missing band has no guidance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BandGuidance {
    pub infant: Option<String>,
    pub child: Option<String>,
    pub adolescent: Option<String>,
    pub adult: Option<String>,
    pub senior: Option<String>,
}

impl BandGuidance {
    pub fn get(&self, band: AgeBand) -> Option<&str> {
        let text = match band {
            AgeBand::Infant => &self.infant,
            AgeBand::Child => &self.child,
            AgeBand::Adolescent => &self.adolescent,
            AgeBand::Adult => &self.adult,
            AgeBand::Senior => &self.senior,
        };
        text.as_deref()
    }
}
