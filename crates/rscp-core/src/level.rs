//! # Certification Levels
//!
//! The closed set of RSCP certification tiers. Each level carries fixed
//! protocol constants (single-letter code, training hours, minimum passing
//! score, validity period). Every `match` is exhaustive, so a new tier
//! forces every consumer to handle it.
//!
//! | Level  | Code | Training hours | Passing score | Validity |
//! |--------|------|----------------|---------------|----------|
//! | bronze | B    | 2              | 70            | 1 year   |
//! | silver | S    | 4              | 80            | 1 year   |
//! | gold   | G    | 8              | 85            | 2 years  |

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::ValidationError;

/// An RSCP certification level.
///
/// The `Ord` derivation follows variant declaration order:
/// `Bronze < Silver < Gold`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CertificationLevel {
    /// Entry tier.
    Bronze,
    /// Intermediate tier.
    Silver,
    /// Highest tier.
    Gold,
}

/// All levels, in ascending order.
pub const ALL_LEVELS: [CertificationLevel; 3] = [
    CertificationLevel::Bronze,
    CertificationLevel::Silver,
    CertificationLevel::Gold,
];

impl CertificationLevel {
    /// Lowercase protocol name (`bronze`, `silver`, `gold`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bronze => "bronze",
            Self::Silver => "silver",
            Self::Gold => "gold",
        }
    }

    /// Single-letter code embedded in certificate numbers.
    pub fn code(&self) -> char {
        match self {
            Self::Bronze => 'B',
            Self::Silver => 'S',
            Self::Gold => 'G',
        }
    }

    /// Resolve a level from its single-letter code (case-insensitive).
    pub fn from_code(code: char) -> Option<Self> {
        match code.to_ascii_uppercase() {
            'B' => Some(Self::Bronze),
            'S' => Some(Self::Silver),
            'G' => Some(Self::Gold),
            _ => None,
        }
    }

    /// Required training hours.
    pub fn training_hours(&self) -> u32 {
        match self {
            Self::Bronze => 2,
            Self::Silver => 4,
            Self::Gold => 8,
        }
    }

    /// Minimum assessment score (percent) needed to pass.
    pub fn passing_score(&self) -> u32 {
        match self {
            Self::Bronze => 70,
            Self::Silver => 80,
            Self::Gold => 85,
        }
    }

    /// How many years a credential at this level stays valid.
    pub fn validity_years(&self) -> u32 {
        match self {
            Self::Bronze | Self::Silver => 1,
            Self::Gold => 2,
        }
    }
}

impl std::fmt::Display for CertificationLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CertificationLevel {
    type Err = ValidationError;

    /// Parse the exact lowercase protocol name.
    ///
    /// The match is case-sensitive: the registry only ever stores the
    /// lowercase form, so `"Gold"` is rejected rather than normalized.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bronze" => Ok(Self::Bronze),
            "silver" => Ok(Self::Silver),
            "gold" => Ok(Self::Gold),
            other => Err(ValidationError::InvalidLevel(other.to_string())),
        }
    }
}
