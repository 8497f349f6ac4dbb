//! SUBSCORE 3: VOLUME (0-20)
//!
//! Total birds reported for the species, saturating at 70% of the batch
//! maximum so one extreme flock does not flatten every other species.
//!
//! This is the only place a `BirdCount` is turned into a number:
//! - Exact(n) → n
//! - Uncounted ("X") → 25
//! - Unknown → 1

use crate::config::ScoringParams;
use crate::data::{BirdCount, ObservationRecord};
use crate::utils::BatchNormalization;

/// Result of S3 calculation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct S3Result {
    /// Sum of resolved counts across the species' records
    pub total_volume: f64,
    /// Weighted subscore (0-volume_weight)
    pub score: f64,
}

/// Numeric bird count used for volume
pub fn resolve_count(count: BirdCount, params: &ScoringParams) -> f64 {
    match count {
        BirdCount::Exact(n) => f64::from(n),
        BirdCount::Uncounted => params.uncounted_count,
        BirdCount::Unknown => params.missing_count,
    }
}

/// Sum of resolved counts for one species
pub fn total_volume(records: &[&ObservationRecord], params: &ScoringParams) -> f64 {
    records.iter().map(|r| resolve_count(r.count, params)).sum()
}

/// Calculate S3: Volume
pub fn calculate_s3(
    records: &[&ObservationRecord],
    normalization: &BatchNormalization,
    params: &ScoringParams,
) -> S3Result {
    let total_volume = total_volume(records, params);
    let saturation = normalization.max_volume * params.volume_saturation;
    let fraction = if saturation > 0.0 {
        (total_volume / saturation).min(1.0)
    } else {
        0.0
    };

    S3Result {
        total_volume,
        score: fraction * params.volume_weight,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::NaiveDate;

    fn sighting(count: BirdCount) -> ObservationRecord {
        ObservationRecord {
            species_id: "amerob".to_string(),
            common_name: String::new(),
            scientific_name: String::new(),
            location_id: "L1".to_string(),
            location_name: String::new(),
            observed_at: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap().and_hms_opt(9, 0, 0).unwrap(),
            count,
            latitude: 40.0,
            longitude: -75.0,
            valid: true,
            reviewed: false,
            location_private: false,
        }
    }

    #[test]
    fn test_resolve_count() {
        let params = ScoringParams::default();
        assert_eq!(resolve_count(BirdCount::Exact(7), &params), 7.0);
        assert_eq!(resolve_count(BirdCount::Uncounted, &params), 25.0);
        assert_eq!(resolve_count(BirdCount::Unknown, &params), 1.0);
    }

    #[test]
    fn test_partial_volume() {
        let records = [sighting(BirdCount::Exact(1)), sighting(BirdCount::Exact(1)), sighting(BirdCount::Exact(1))];
        let refs: Vec<&ObservationRecord> = records.iter().collect();
        let norm = BatchNormalization { max_sighting_count: 3, max_volume: 25.0 };

        let result = calculate_s3(&refs, &norm, &ScoringParams::default());
        assert_eq!(result.total_volume, 3.0);
        assert_relative_eq!(result.score, 3.0 / 17.5 * 20.0, epsilon = 1e-9);
    }

    #[test]
    fn test_volume_saturates() {
        let records = [sighting(BirdCount::Uncounted)];
        let refs: Vec<&ObservationRecord> = records.iter().collect();
        let norm = BatchNormalization { max_sighting_count: 3, max_volume: 25.0 };

        let result = calculate_s3(&refs, &norm, &ScoringParams::default());
        assert_relative_eq!(result.score, 20.0, epsilon = 1e-9);
    }
}
