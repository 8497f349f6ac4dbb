//! Likelihood Scorer - Main coordinator for scoring an observation batch
//!
//! Groups a batch by species, computes batch-wide normalization once, and
//! combines the four subscores into one integer likelihood per species.
//! Includes both sequential and parallel (Rayon) implementations; both
//! return identical output for identical input.

use crate::config::ScoringParams;
use crate::data::ObservationRecord;
use crate::error::ConfigError;
use crate::metrics::*;
use crate::utils::{group_by_species, BatchNormalization, SpeciesGroup};
use chrono::NaiveDateTime;
use rayon::prelude::*;
use serde::Serialize;

/// One species with its derived likelihood
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredSpecies {
    /// First record encountered for the species
    pub representative: ObservationRecord,
    /// 0-99, never certain
    pub likelihood: u8,
    /// Number of records for the species in the batch
    pub sighting_count: usize,
    /// Most recent sighting across all of the species' records
    pub latest_observed_at: NaiveDateTime,
    pub breakdown: LikelihoodBreakdown,
}

impl ScoredSpecies {
    pub fn species_id(&self) -> &str {
        &self.representative.species_id
    }

    pub fn common_name(&self) -> &str {
        &self.representative.common_name
    }
}

/// Main likelihood scorer
#[derive(Debug, Clone, Default)]
pub struct LikelihoodScorer {
    params: ScoringParams,
}

impl LikelihoodScorer {
    /// Build a scorer from tuned parameters
    ///
    /// Rejects parameters that could zero out batch normalization (e.g. a
    /// missing-count fallback of 0), which would drop species from results.
    pub fn new(params: ScoringParams) -> Result<Self, ConfigError> {
        params.validate()?;
        Ok(Self { params })
    }

    pub fn params(&self) -> &ScoringParams {
        &self.params
    }

    /// Score every species in a batch
    ///
    /// Output holds exactly one entry per species, in first-encounter order.
    /// An empty batch yields an empty list.
    pub fn score_batch(&self, records: &[ObservationRecord], now: NaiveDateTime) -> Vec<ScoredSpecies> {
        let groups = group_by_species(records);
        let Some(normalization) = BatchNormalization::from_groups(&groups, &self.params) else {
            tracing::debug!("Empty observation batch, nothing to score");
            return Vec::new();
        };

        let scored: Vec<ScoredSpecies> = groups
            .iter()
            .map(|group| self.score_group(group, &normalization, now))
            .collect();

        tracing::debug!(
            "Scored {} species from {} records (max sightings {}, max volume {})",
            scored.len(),
            records.len(),
            normalization.max_sighting_count,
            normalization.max_volume
        );

        scored
    }

    /// Score every species in a batch IN PARALLEL
    ///
    /// Species are independent once normalization is known, so each group is
    /// scored on its own Rayon task. Order matches `score_batch`.
    pub fn score_batch_parallel(
        &self,
        records: &[ObservationRecord],
        now: NaiveDateTime,
    ) -> Vec<ScoredSpecies> {
        let groups = group_by_species(records);
        let Some(normalization) = BatchNormalization::from_groups(&groups, &self.params) else {
            return Vec::new();
        };

        groups
            .par_iter()
            .map(|group| self.score_group(group, &normalization, now))
            .collect()
    }

    /// Likelihood for one species' records against precomputed batch maxima
    pub fn score_species(
        &self,
        records: &[&ObservationRecord],
        normalization: &BatchNormalization,
        now: NaiveDateTime,
    ) -> (u8, LikelihoodBreakdown) {
        let s1 = calculate_s1(records.len(), normalization, &self.params);
        let s2 = calculate_s2(records, now, &self.params);
        let s3 = calculate_s3(records, normalization, &self.params);
        let s4 = calculate_s4(records, &self.params);

        let breakdown = LikelihoodBreakdown {
            frequency: s1.score,
            recency: s2.score,
            volume: s3.score,
            consistency: s4.score,
        };

        (self.finalize(breakdown.total()), breakdown)
    }

    fn score_group(
        &self,
        group: &SpeciesGroup<'_>,
        normalization: &BatchNormalization,
        now: NaiveDateTime,
    ) -> ScoredSpecies {
        let (likelihood, breakdown) = self.score_species(&group.records, normalization, now);
        let latest_observed_at = group
            .records
            .iter()
            .map(|r| r.observed_at)
            .max()
            .unwrap_or(group.representative().observed_at);

        ScoredSpecies {
            representative: group.representative().clone(),
            likelihood,
            sighting_count: group.sighting_count(),
            latest_observed_at,
            breakdown,
        }
    }

    /// Round to the nearest integer, clamp into [0, max_likelihood]
    fn finalize(&self, total: f64) -> u8 {
        if !total.is_finite() {
            return 0;
        }
        let cap = f64::from(self.params.max_likelihood.min(99));
        total.round().clamp(0.0, cap) as u8
    }
}
