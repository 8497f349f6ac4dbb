//! Subscore modules for likelihood scoring
//!
//! Each subscore is bounded independently so no single noisy signal dominates:
//! - S1 frequency (0-50)
//! - S2 recency (0-30)
//! - S3 volume (0-20)
//! - S4 consistency (0-10)

pub mod s1_frequency;
pub mod s2_recency;
pub mod s3_volume;
pub mod s4_consistency;

// Re-export subscore functions
pub use s1_frequency::{calculate_s1, S1Result};
pub use s2_recency::{calculate_s2, days_ago, S2Result};
pub use s3_volume::{calculate_s3, resolve_count, total_volume, S3Result};
pub use s4_consistency::{calculate_s4, S4Result};

use serde::Serialize;

/// The four weighted subscores behind one likelihood
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LikelihoodBreakdown {
    pub frequency: f64,
    pub recency: f64,
    pub volume: f64,
    pub consistency: f64,
}

impl LikelihoodBreakdown {
    pub fn total(&self) -> f64 {
        self.frequency + self.recency + self.volume + self.consistency
    }
}
