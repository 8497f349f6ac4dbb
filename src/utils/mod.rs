//! Utility modules for likelihood scoring
//!
//! Contains shared functionality used across scoring and ranking:
//! - Geo distance: Haversine miles between coordinates
//! - Observation grouping: Records grouped by species
//! - Normalization: Batch-wide maxima shared by all species

pub mod geo_distance;
pub mod observation_grouper;
pub mod normalization;

// Re-export commonly used types
pub use geo_distance::{distance_miles, round_for_display, EARTH_RADIUS_MILES};
pub use observation_grouper::{group_by_species, SpeciesGroup};
pub use normalization::BatchNormalization;
