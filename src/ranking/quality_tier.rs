//! Hotspot Quality Tiers
//!
//! 5-tier classification of hotspots by all-time species diversity.
//! Breakpoints are strict: 201 species is Exceptional, 200 is Excellent.

use serde::{Deserialize, Serialize};

/// Quality tier groupings, best first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QualityTier {
    /// More than 200 species all time
    Exceptional,

    /// 101-200 species
    Excellent,

    /// 51-100 species
    VeryGood,

    /// 26-50 species
    Good,

    /// 0-25 species (count reported)
    Moderate,
}

impl QualityTier {
    /// Classify an all-time species count; absent counts have no tier
    pub fn from_species_count(count: Option<u32>) -> Option<Self> {
        let count = count?;
        Some(if count > 200 {
            QualityTier::Exceptional
        } else if count > 100 {
            QualityTier::Excellent
        } else if count > 50 {
            QualityTier::VeryGood
        } else if count > 25 {
            QualityTier::Good
        } else {
            QualityTier::Moderate
        })
    }

    /// Friendly name for display
    pub fn label(&self) -> &'static str {
        match self {
            QualityTier::Exceptional => "Exceptional",
            QualityTier::Excellent => "Excellent",
            QualityTier::VeryGood => "Very Good",
            QualityTier::Good => "Good",
            QualityTier::Moderate => "Moderate",
        }
    }

    /// Sort rank, higher is better (Exceptional = 5, Moderate = 1)
    pub fn rank(&self) -> u8 {
        match self {
            QualityTier::Exceptional => 5,
            QualityTier::Excellent => 4,
            QualityTier::VeryGood => 3,
            QualityTier::Good => 2,
            QualityTier::Moderate => 1,
        }
    }

    /// Get all tiers, best first
    pub fn all() -> &'static [QualityTier] {
        &[
            QualityTier::Exceptional,
            QualityTier::Excellent,
            QualityTier::VeryGood,
            QualityTier::Good,
            QualityTier::Moderate,
        ]
    }
}

/// Sort rank for an optional tier; unknown ranks below Moderate
pub fn tier_rank(tier: Option<QualityTier>) -> u8 {
    tier.map_or(0, |t| t.rank())
}
