//! Hotspot ranking: filter → sort → limit.
//!
//! Quality tiers and distances are derived per hotspot while ranking.
//! Distance comparisons use the unrounded value; unknown distances compare
//! as the largest possible distance.

use crate::data::{Coordinate, Hotspot};
use crate::ranking::criteria::{HotspotSortKey, ResultLimit, SortCriterion};
use crate::ranking::quality_tier::{tier_rank, QualityTier};
use crate::utils::geo_distance::{distance_miles, distance_sort_key, round_for_display};
use serde::Serialize;
use std::cmp::Ordering;

/// Hotspot with its derived tier and distance from the search origin
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedHotspot {
    pub hotspot: Hotspot,
    pub tier: Option<QualityTier>,
    /// Unrounded miles; None when either coordinate is missing
    pub distance_miles: Option<f64>,
}

impl RankedHotspot {
    pub fn new(hotspot: Hotspot, origin: Coordinate) -> Self {
        let tier = QualityTier::from_species_count(hotspot.all_time_species_count);
        let distance_miles = distance_miles(origin, hotspot.coordinate());
        Self {
            hotspot,
            tier,
            distance_miles,
        }
    }

    /// Distance rounded to 0.1 mile for display
    pub fn display_distance(&self) -> Option<f64> {
        self.distance_miles.map(round_for_display)
    }
}

/// Caller-chosen hotspot ranking parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HotspotRankingOptions {
    pub sort: SortCriterion<HotspotSortKey>,
    /// Minimum all-time species (absent counts as 0); 0 keeps everything
    pub min_species: u32,
    pub limit: ResultLimit,
}

impl Default for HotspotRankingOptions {
    fn default() -> Self {
        Self {
            sort: SortCriterion::default_for(HotspotSortKey::Quality),
            min_species: 0,
            limit: ResultLimit::Unlimited,
        }
    }
}

/// Ascending comparison on one hotspot sort field
fn compare(a: &RankedHotspot, b: &RankedHotspot, key: HotspotSortKey) -> Ordering {
    match key {
        HotspotSortKey::Quality => tier_rank(a.tier).cmp(&tier_rank(b.tier)),
        HotspotSortKey::Distance => {
            distance_sort_key(a.distance_miles).total_cmp(&distance_sort_key(b.distance_miles))
        }
        HotspotSortKey::Name => a.hotspot.name.cmp(&b.hotspot.name),
    }
}

/// Filter by minimum species, sort by the active criterion, truncate to the limit
pub fn rank_hotspots(
    hotspots: &[Hotspot],
    origin: Coordinate,
    options: &HotspotRankingOptions,
) -> Vec<RankedHotspot> {
    let mut ranked: Vec<RankedHotspot> = hotspots
        .iter()
        .filter(|h| h.all_time_species_count.unwrap_or(0) >= options.min_species)
        .map(|h| RankedHotspot::new(h.clone(), origin))
        .collect();
    let kept = ranked.len();

    let SortCriterion { key, direction } = options.sort;
    ranked.sort_by(|a, b| direction.apply(compare(a, b, key)));
    options.limit.apply(&mut ranked);

    tracing::debug!(
        "Ranked {} hotspots ({} of {} passed min species {}) by {:?} {:?}",
        ranked.len(),
        kept,
        hotspots.len(),
        options.min_species,
        key,
        direction
    );

    ranked
}
