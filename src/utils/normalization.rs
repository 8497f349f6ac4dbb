//! Batch Normalization
//!
//! Normalization constants computed once across all species of a batch and
//! shared by every species' likelihood calculation.

use crate::config::ScoringParams;
use crate::metrics::s3_volume::total_volume;
use crate::utils::observation_grouper::SpeciesGroup;

/// Largest per-species sighting count and bird volume in one batch
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BatchNormalization {
    pub max_sighting_count: usize,
    pub max_volume: f64,
}

impl BatchNormalization {
    /// Compute batch maxima
    ///
    /// Returns None for an empty batch (both maxima would be zero), which
    /// callers map to an empty result instead of dividing by zero.
    pub fn from_groups(groups: &[SpeciesGroup<'_>], params: &ScoringParams) -> Option<Self> {
        let max_sighting_count = groups.iter().map(|g| g.sighting_count()).max().unwrap_or(0);
        let max_volume = groups
            .iter()
            .map(|g| total_volume(&g.records, params))
            .fold(0.0_f64, f64::max);

        if max_sighting_count == 0 || max_volume <= 0.0 {
            return None;
        }

        Some(Self {
            max_sighting_count,
            max_volume,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{BirdCount, ObservationRecord};
    use crate::utils::observation_grouper::group_by_species;
    use chrono::NaiveDate;

    fn record(species: &str, count: BirdCount) -> ObservationRecord {
        ObservationRecord {
            species_id: species.to_string(),
            common_name: String::new(),
            scientific_name: String::new(),
            location_id: "L1".to_string(),
            location_name: String::new(),
            observed_at: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap().and_hms_opt(8, 0, 0).unwrap(),
            count,
            latitude: 40.0,
            longitude: -75.0,
            valid: true,
            reviewed: false,
            location_private: false,
        }
    }

    #[test]
    fn test_batch_maxima() {
        let records = vec![
            record("a", BirdCount::Exact(1)),
            record("a", BirdCount::Exact(1)),
            record("a", BirdCount::Unknown),
            record("b", BirdCount::Uncounted),
        ];
        let groups = group_by_species(&records);
        let norm = BatchNormalization::from_groups(&groups, &ScoringParams::default()).unwrap();

        assert_eq!(norm.max_sighting_count, 3);
        // "b" has 25 (uncounted) against "a" with 1 + 1 + 1
        assert_eq!(norm.max_volume, 25.0);
    }

    #[test]
    fn test_empty_batch_has_no_normalization() {
        assert!(BatchNormalization::from_groups(&[], &ScoringParams::default()).is_none());
    }
}
