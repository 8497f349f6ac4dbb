//! Bird ranking: sort → limit over scored species.
//!
//! No filtering happens here; callers pre-filter records (e.g. by validity)
//! before scoring. Sorting is stable, so ties keep their scored order.

use crate::ranking::criteria::{BirdSortKey, ResultLimit, SortCriterion};
use crate::scorer::ScoredSpecies;
use std::cmp::Ordering;

/// Caller-chosen bird ranking parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BirdRankingOptions {
    pub sort: SortCriterion<BirdSortKey>,
    pub limit: ResultLimit,
}

impl Default for BirdRankingOptions {
    fn default() -> Self {
        Self {
            sort: SortCriterion::default_for(BirdSortKey::Likelihood),
            limit: ResultLimit::Unlimited,
        }
    }
}

/// Ascending comparison on one bird sort field
fn compare(a: &ScoredSpecies, b: &ScoredSpecies, key: BirdSortKey) -> Ordering {
    match key {
        BirdSortKey::Likelihood => a.likelihood.cmp(&b.likelihood),
        BirdSortKey::Name => a.common_name().cmp(b.common_name()),
        BirdSortKey::Date => a.latest_observed_at.cmp(&b.latest_observed_at),
    }
}

/// Sort scored species by the active criterion, then truncate to the limit
///
/// Always returns a freshly ordered list; the input is left untouched.
pub fn rank_birds(scored: &[ScoredSpecies], options: &BirdRankingOptions) -> Vec<ScoredSpecies> {
    let mut ranked = scored.to_vec();
    let SortCriterion { key, direction } = options.sort;

    ranked.sort_by(|a, b| direction.apply(compare(a, b, key)));
    options.limit.apply(&mut ranked);

    tracing::debug!(
        "Ranked {} of {} species by {:?} {:?} (limit {})",
        ranked.len(),
        scored.len(),
        key,
        direction,
        options.limit
    );

    ranked
}
