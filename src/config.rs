//! Scoring and Search Configuration
//!
//! Tunable constants for the likelihood formula plus search defaults.
//! `Default` reproduces the production formula; a JSON file may override any
//! subset of fields.

use crate::error::ConfigError;
use crate::ranking::criteria::{BirdSortKey, HotspotSortKey, ResultLimit, SortCriterion};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Constants of the four-part likelihood formula
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ScoringParams {
    /// Maximum frequency subscore
    pub frequency_weight: f64,
    /// Maximum recency subscore
    pub recency_weight: f64,
    /// Maximum volume subscore
    pub volume_weight: f64,
    /// Maximum consistency subscore
    pub consistency_cap: f64,
    /// Per-day exponential decay rate for recency
    pub decay_rate: f64,
    /// Geometric weight falloff between successive recent sightings
    pub recency_falloff: f64,
    /// Birds assumed for a present-but-uncounted ("X") report
    pub uncounted_count: f64,
    /// Birds assumed for a missing or unparsable count
    pub missing_count: f64,
    /// Fraction of the batch maximum volume at which the volume subscore saturates
    pub volume_saturation: f64,
    /// Consistency points per (sighting / day of range)
    pub consistency_rate: f64,
    /// Likelihood is never reported above this value
    pub max_likelihood: u8,
}

impl Default for ScoringParams {
    fn default() -> Self {
        Self {
            frequency_weight: 50.0,
            recency_weight: 30.0,
            volume_weight: 20.0,
            consistency_cap: 10.0,
            decay_rate: 0.1,
            recency_falloff: 0.8,
            uncounted_count: 25.0,
            missing_count: 1.0,
            volume_saturation: 0.7,
            consistency_rate: 5.0,
            max_likelihood: 99,
        }
    }
}

impl ScoringParams {
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        let non_negative = [
            ("frequency_weight", self.frequency_weight),
            ("recency_weight", self.recency_weight),
            ("volume_weight", self.volume_weight),
            ("consistency_cap", self.consistency_cap),
            ("decay_rate", self.decay_rate),
            ("consistency_rate", self.consistency_rate),
        ];
        for (name, value) in non_negative {
            if !(value >= 0.0 && value.is_finite()) {
                return Err(ConfigError::InvalidParameter {
                    name,
                    expected: "a finite non-negative number",
                    value,
                });
            }
        }

        let positive = [
            ("uncounted_count", self.uncounted_count),
            ("missing_count", self.missing_count),
        ];
        for (name, value) in positive {
            if !(value > 0.0 && value.is_finite()) {
                return Err(ConfigError::InvalidParameter {
                    name,
                    expected: "a finite positive number",
                    value,
                });
            }
        }

        if !(self.recency_falloff > 0.0 && self.recency_falloff <= 1.0) {
            return Err(ConfigError::InvalidParameter {
                name: "recency_falloff",
                expected: "in (0, 1]",
                value: self.recency_falloff,
            });
        }
        if !(self.volume_saturation > 0.0 && self.volume_saturation <= 1.0) {
            return Err(ConfigError::InvalidParameter {
                name: "volume_saturation",
                expected: "in (0, 1]",
                value: self.volume_saturation,
            });
        }
        if self.max_likelihood > 99 {
            return Err(ConfigError::InvalidParameter {
                name: "max_likelihood",
                expected: "at most 99",
                value: f64::from(self.max_likelihood),
            });
        }

        Ok(())
    }
}

/// Defaults for a new search session
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SearchDefaults {
    /// Radius of the first search, in kilometres
    pub default_radius_km: f64,
    /// Radius used by the one-shot expansion after an empty search
    pub expanded_radius_km: f64,
    pub result_limit: ResultLimit,
    /// Minimum all-time species for a hotspot to be listed (0 = all)
    pub min_hotspot_species: u32,
    pub bird_sort: SortCriterion<BirdSortKey>,
    pub hotspot_sort: SortCriterion<HotspotSortKey>,
}

impl Default for SearchDefaults {
    fn default() -> Self {
        Self {
            default_radius_km: 25.0,
            expanded_radius_km: 50.0,
            result_limit: ResultLimit::Unlimited,
            min_hotspot_species: 0,
            bird_sort: SortCriterion::default_for(BirdSortKey::Likelihood),
            hotspot_sort: SortCriterion::default_for(HotspotSortKey::Quality),
        }
    }
}

impl SearchDefaults {
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        if !(self.default_radius_km > 0.0 && self.default_radius_km.is_finite()) {
            return Err(ConfigError::InvalidParameter {
                name: "default_radius_km",
                expected: "a finite positive number",
                value: self.default_radius_km,
            });
        }
        if !(self.expanded_radius_km > self.default_radius_km) {
            return Err(ConfigError::RadiusNotExpanded {
                default: self.default_radius_km,
                expanded: self.expanded_radius_km,
            });
        }
        Ok(())
    }
}

/// Complete configuration file
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RankingConfig {
    pub scoring: ScoringParams,
    pub search: SearchDefaults,
}

impl RankingConfig {
    /// Load configuration from JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        Self::from_json_str(&contents)
            .with_context(|| format!("Invalid config file: {:?}", path))
    }

    /// Parse and validate configuration JSON
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: RankingConfig = serde_json::from_str(json)
            .with_context(|| "Failed to parse config JSON")?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        self.scoring.validate()?;
        self.search.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ranking::criteria::SortDirection;

    #[test]
    fn test_defaults_are_valid() {
        assert!(RankingConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_override() {
        let json = r#"{
            "scoring": { "decay_rate": 0.05 },
            "search": { "expanded_radius_km": 40.0, "result_limit": 20,
                        "bird_sort": { "key": "name", "direction": "ascending" } }
        }"#;

        let config = RankingConfig::from_json_str(json).unwrap();
        assert_eq!(config.scoring.decay_rate, 0.05);
        assert_eq!(config.scoring.frequency_weight, 50.0);
        assert_eq!(config.search.default_radius_km, 25.0);
        assert_eq!(config.search.expanded_radius_km, 40.0);
        assert_eq!(config.search.result_limit, ResultLimit::top(20));
        assert_eq!(config.search.bird_sort.key, BirdSortKey::Name);
        assert_eq!(config.search.bird_sort.direction, SortDirection::Ascending);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let mut params = ScoringParams::default();
        params.recency_falloff = 1.5;
        assert!(matches!(
            params.validate(),
            Err(ConfigError::InvalidParameter { name: "recency_falloff", .. })
        ));

        let search = SearchDefaults {
            expanded_radius_km: 10.0,
            ..SearchDefaults::default()
        };
        assert_eq!(
            search.validate(),
            Err(ConfigError::RadiusNotExpanded { default: 25.0, expanded: 10.0 })
        );

        let json = r#"{ "scoring": { "volume_weight": -1.0 } }"#;
        assert!(RankingConfig::from_json_str(json).is_err());
    }
}
