//! SUBSCORE 1: FREQUENCY (0-50)
//!
//! Rewards species reported by many independent sightings, relative to the
//! most-reported species in the batch.

use crate::config::ScoringParams;
use crate::utils::BatchNormalization;

/// Result of S1 calculation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct S1Result {
    /// Sightings relative to the batch maximum (0-1)
    pub ratio: f64,
    /// Weighted subscore (0-frequency_weight)
    pub score: f64,
}

/// Calculate S1: Frequency
pub fn calculate_s1(
    sighting_count: usize,
    normalization: &BatchNormalization,
    params: &ScoringParams,
) -> S1Result {
    let ratio = (sighting_count as f64 / normalization.max_sighting_count as f64).min(1.0);

    S1Result {
        ratio,
        score: ratio * params.frequency_weight,
    }
}
