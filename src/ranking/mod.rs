//! Ranking pipelines for scored birds and hotspots
//!
//! Both share the same three stages: filter → sort → limit.
//! - `birds`: sort by likelihood, name or latest sighting
//! - `hotspots`: minimum-species filter, sort by quality tier, distance or name
//! - `quality_tier`: hotspot classification by all-time species count
//! - `criteria`: sort keys, directions and result limits

pub mod criteria;
pub mod quality_tier;
pub mod birds;
pub mod hotspots;

pub use criteria::{BirdSortKey, HotspotSortKey, ResultLimit, SortCriterion, SortDirection, SortKey};
pub use quality_tier::{tier_rank, QualityTier};
pub use birds::{rank_birds, BirdRankingOptions};
pub use hotspots::{rank_hotspots, HotspotRankingOptions, RankedHotspot};
