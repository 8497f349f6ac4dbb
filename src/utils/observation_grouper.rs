//! Observation Grouping
//!
//! Groups a flat batch of observation records by species identifier.
//! Species keep first-encounter order; records keep input order within
//! each species. Nothing is dropped or validated here.

use crate::data::ObservationRecord;
use rustc_hash::FxHashMap;

/// All records sharing one species identifier
#[derive(Debug, Clone)]
pub struct SpeciesGroup<'a> {
    pub species_id: &'a str,
    pub records: Vec<&'a ObservationRecord>,
}

impl<'a> SpeciesGroup<'a> {
    /// First record encountered for the species
    pub fn representative(&self) -> &'a ObservationRecord {
        self.records[0]
    }

    pub fn sighting_count(&self) -> usize {
        self.records.len()
    }
}

/// Group records by species id
///
/// Returns groups in order of each species' first appearance in `records`.
/// Every returned group holds at least one record.
pub fn group_by_species(records: &[ObservationRecord]) -> Vec<SpeciesGroup<'_>> {
    let mut index: FxHashMap<&str, usize> = FxHashMap::default();
    let mut groups: Vec<SpeciesGroup<'_>> = Vec::new();

    for record in records {
        let species_id = record.species_id.as_str();
        match index.get(species_id) {
            Some(&slot) => groups[slot].records.push(record),
            None => {
                index.insert(species_id, groups.len());
                groups.push(SpeciesGroup {
                    species_id,
                    records: vec![record],
                });
            }
        }
    }

    groups
}
