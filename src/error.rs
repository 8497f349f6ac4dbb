//! Typed errors for configuration and caller-supplied ranking parameters.
//!
//! Scoring and ranking never fail; only invalid settings do.

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("scoring parameter '{name}' must be {expected}, got {value}")]
    InvalidParameter {
        name: &'static str,
        expected: &'static str,
        value: f64,
    },

    #[error("expanded radius ({expanded} km) must be larger than default radius ({default} km)")]
    RadiusNotExpanded { default: f64, expanded: f64 },

    #[error("unknown bird sort criterion '{0}' (expected likelihood, name or date)")]
    UnknownBirdSort(String),

    #[error("unknown hotspot sort criterion '{0}' (expected quality, distance or name)")]
    UnknownHotspotSort(String),

    #[error("unknown sort direction '{0}' (expected asc or desc)")]
    UnknownDirection(String),

    #[error("invalid result limit '{0}' (expected a positive integer or 'all')")]
    InvalidLimit(String),
}
