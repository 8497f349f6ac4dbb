//! SUBSCORE 2: RECENCY (0-30)
//!
//! Each sighting decays exponentially with age (`exp(-0.1 * days_ago)`:
//! ~1.0 today, ~0.05 at 30 days). Decay values are sorted most recent first
//! and averaged with geometric weights `0.8^index`, so the latest sighting
//! dominates while further recent sightings still contribute.

use crate::config::ScoringParams;
use crate::data::ObservationRecord;
use chrono::NaiveDateTime;
use smallvec::SmallVec;

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Result of S2 calculation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct S2Result {
    /// Geometrically weighted mean decay (0-1)
    pub weighted_decay: f64,
    /// Weighted subscore (0-recency_weight)
    pub score: f64,
}

/// Fractional days between a sighting and `now`
///
/// Sightings stamped after `now` count as today.
pub fn days_ago(observed_at: NaiveDateTime, now: NaiveDateTime) -> f64 {
    let elapsed = (now - observed_at).num_milliseconds() as f64 / MILLIS_PER_DAY;
    elapsed.max(0.0)
}

/// Calculate S2: Recency
pub fn calculate_s2(
    records: &[&ObservationRecord],
    now: NaiveDateTime,
    params: &ScoringParams,
) -> S2Result {
    // Most species have only a handful of sightings per batch
    let mut decays: SmallVec<[f64; 16]> = records
        .iter()
        .map(|r| (-params.decay_rate * days_ago(r.observed_at, now)).exp())
        .collect();

    if decays.is_empty() {
        return S2Result {
            weighted_decay: 0.0,
            score: 0.0,
        };
    }

    decays.sort_unstable_by(|a, b| b.total_cmp(a));

    let mut weighted_sum = 0.0;
    let mut weight_total = 0.0;
    let mut weight = 1.0;
    for decay in &decays {
        weighted_sum += decay * weight;
        weight_total += weight;
        weight *= params.recency_falloff;
    }
    let weighted_decay = weighted_sum / weight_total;

    S2Result {
        weighted_decay,
        score: weighted_decay * params.recency_weight,
    }
}
