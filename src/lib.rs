//! Bird Scorer Rust Implementation
//!
//! Turns a batch of location-tagged bird observations into a ranked list of
//! species likely to be seen nearby, plus an independent ranking of nearby
//! hotspots by quality and distance.
//!
//! Module layout:
//! - `data`: Observation/hotspot records and batch loading (JSON, CSV via Polars)
//! - `utils/`: Geo distance, species grouping, batch normalization
//! - `metrics/`: The four likelihood subscores (S1-S4)
//! - `scorer`: Combines subscores into a 0-99 likelihood per species
//! - `ranking/`: Quality tiers and filter → sort → limit pipelines
//! - `session`: Caller-owned search state and one-shot radius expansion
//! - `config`: Tunable scoring constants and search defaults
//!
//! Everything below `data` is pure and synchronous: a new search recomputes
//! all derived values from the fresh batch.

pub mod config;
pub mod error;
pub mod data;
pub mod utils;
pub mod metrics;
pub mod scorer;
pub mod ranking;
pub mod session;

// Re-export commonly used types
pub use config::{RankingConfig, ScoringParams, SearchDefaults};
pub use error::ConfigError;
pub use data::{BirdCount, Coordinate, Hotspot, ObservationBatch, ObservationRecord};
pub use utils::{distance_miles, group_by_species, BatchNormalization};
pub use metrics::LikelihoodBreakdown;
pub use scorer::{LikelihoodScorer, ScoredSpecies};
pub use ranking::{
    rank_birds, rank_hotspots, BirdRankingOptions, BirdSortKey, HotspotRankingOptions,
    HotspotSortKey, QualityTier, RankedHotspot, ResultLimit, SortCriterion, SortDirection,
};
pub use session::{ExpansionDecision, ExpansionState, RadiusExpansionPolicy, SearchSession};
