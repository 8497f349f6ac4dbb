//! Search Session and Radius Expansion
//!
//! Caller-owned state for one user's searches: origin, radius, ranking
//! choices, and the one-shot radius expansion flag.
//!
//! Expansion state machine:
//! - `NotExpanded` → (zero bird results at the default radius) → re-search at
//!   the expanded radius, move to `Expanded`
//! - `Expanded` is terminal until the user changes the radius by hand
//!
//! Hotspot searches never trigger expansion.

use crate::config::SearchDefaults;
use crate::data::Coordinate;
use crate::ranking::{BirdRankingOptions, HotspotRankingOptions};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExpansionState {
    #[default]
    NotExpanded,
    Expanded,
}

/// What the caller should do after a bird search completes
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ExpansionDecision {
    /// Keep the results as they are
    Keep,
    /// Re-run the search once at this radius (km)
    ResearchAt(f64),
}

/// Fixed radii for the one-shot expansion rule
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadiusExpansionPolicy {
    pub default_radius_km: f64,
    pub expanded_radius_km: f64,
}

impl RadiusExpansionPolicy {
    pub fn from_defaults(defaults: &SearchDefaults) -> Self {
        Self {
            default_radius_km: defaults.default_radius_km,
            expanded_radius_km: defaults.expanded_radius_km,
        }
    }

    /// Decide whether an empty search should be retried wider
    pub fn decide(&self, state: ExpansionState, radius_km: f64, result_count: usize) -> ExpansionDecision {
        if state == ExpansionState::NotExpanded
            && result_count == 0
            && radius_km == self.default_radius_km
        {
            ExpansionDecision::ResearchAt(self.expanded_radius_km)
        } else {
            ExpansionDecision::Keep
        }
    }
}

/// Current search parameters and expansion flag
///
/// Any change to origin, radius, or ranking options means the caller
/// recomputes rankings from scratch; nothing here is cached.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchSession {
    pub origin: Coordinate,
    radius_km: f64,
    expansion: ExpansionState,
    policy: RadiusExpansionPolicy,
    pub birds: BirdRankingOptions,
    pub hotspots: HotspotRankingOptions,
}

impl SearchSession {
    pub fn new(origin: Coordinate, defaults: &SearchDefaults) -> Self {
        Self {
            origin,
            radius_km: defaults.default_radius_km,
            expansion: ExpansionState::NotExpanded,
            policy: RadiusExpansionPolicy::from_defaults(defaults),
            birds: BirdRankingOptions {
                sort: defaults.bird_sort,
                limit: defaults.result_limit,
            },
            hotspots: HotspotRankingOptions {
                sort: defaults.hotspot_sort,
                min_species: defaults.min_hotspot_species,
                limit: defaults.result_limit,
            },
        }
    }

    pub fn radius_km(&self) -> f64 {
        self.radius_km
    }

    pub fn expansion(&self) -> ExpansionState {
        self.expansion
    }

    /// Manual radius change by the user; re-arms expansion
    pub fn set_radius(&mut self, radius_km: f64) {
        self.radius_km = radius_km;
        self.expansion = ExpansionState::NotExpanded;
    }

    /// Record a completed bird search
    ///
    /// On `ResearchAt`, the session has already switched to the expanded
    /// radius and consumed its expansion; the caller just re-fetches.
    pub fn on_bird_results(&mut self, result_count: usize) -> ExpansionDecision {
        let decision = self.policy.decide(self.expansion, self.radius_km, result_count);
        if let ExpansionDecision::ResearchAt(radius_km) = decision {
            tracing::info!(
                "No birds within {} km, expanding search to {} km",
                self.radius_km,
                radius_km
            );
            self.radius_km = radius_km;
            self.expansion = ExpansionState::Expanded;
        }
        decision
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> SearchSession {
        SearchSession::new(Coordinate::new(40.0, -75.0), &SearchDefaults::default())
    }

    #[test]
    fn test_expands_once() {
        let mut s = session();
        assert_eq!(s.on_bird_results(0), ExpansionDecision::ResearchAt(50.0));
        assert_eq!(s.radius_km(), 50.0);
        assert_eq!(s.expansion(), ExpansionState::Expanded);

        // Second empty result after expansion does nothing
        assert_eq!(s.on_bird_results(0), ExpansionDecision::Keep);
        assert_eq!(s.radius_km(), 50.0);
    }

    #[test]
    fn test_results_found_no_expansion() {
        let mut s = session();
        assert_eq!(s.on_bird_results(3), ExpansionDecision::Keep);
        assert_eq!(s.expansion(), ExpansionState::NotExpanded);
    }

    #[test]
    fn test_non_default_radius_never_expands() {
        let mut s = session();
        s.set_radius(10.0);
        assert_eq!(s.on_bird_results(0), ExpansionDecision::Keep);
    }

    #[test]
    fn test_manual_radius_change_resets() {
        let mut s = session();
        assert_eq!(s.on_bird_results(0), ExpansionDecision::ResearchAt(50.0));

        s.set_radius(25.0);
        assert_eq!(s.expansion(), ExpansionState::NotExpanded);
        assert_eq!(s.on_bird_results(0), ExpansionDecision::ResearchAt(50.0));
    }

    #[test]
    fn test_session_uses_defaults() {
        let s = session();
        assert_eq!(s.radius_km(), 25.0);
        assert_eq!(s.birds, BirdRankingOptions::default());
        assert_eq!(s.hotspots, HotspotRankingOptions::default());
    }
}
