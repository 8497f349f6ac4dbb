//! SUBSCORE 4: CONSISTENCY (0-10)
//!
//! Rewards species seen repeatedly over a span of time rather than in one
//! burst. Only applies with more than one sighting; the date range is the
//! elapsed time between the earliest and latest sighting in fractional days,
//! the same measure recency uses for `days_ago`.

use crate::config::ScoringParams;
use crate::data::ObservationRecord;
use crate::metrics::s2_recency::days_ago;

/// Result of S4 calculation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct S4Result {
    /// Elapsed days between earliest and latest sighting
    pub date_range_days: f64,
    /// Weighted subscore (0-consistency_cap)
    pub score: f64,
}

/// Calculate S4: Consistency
pub fn calculate_s4(records: &[&ObservationRecord], params: &ScoringParams) -> S4Result {
    let timestamps = records.iter().map(|r| r.observed_at);
    let (Some(earliest), Some(latest)) = (timestamps.clone().min(), timestamps.max()) else {
        return S4Result { date_range_days: 0.0, score: 0.0 };
    };
    let date_range_days = days_ago(earliest, latest);

    if records.len() < 2 || date_range_days == 0.0 {
        return S4Result { date_range_days, score: 0.0 };
    }

    let rate = records.len() as f64 / date_range_days * params.consistency_rate;

    S4Result {
        date_range_days,
        score: rate.min(params.consistency_cap),
    }
}
