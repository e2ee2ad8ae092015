//! Territory extraction: which locations each nation holds

use std::collections::{BTreeMap, BTreeSet};

use crate::core::types::{Location, Nation};
use crate::game::snapshot::PhaseSnapshot;

/// Locations a single nation holds
pub type Territory = BTreeSet<Location>;

/// Territory of every nation in the roster
pub type Territories = BTreeMap<Nation, Territory>;

/// Territory of every nation as of the given movement phase
///
/// A nation holds every province it occupies with a unit, every province
/// one of its dislodged units stands in, and every supply center it owns.
/// Every roster nation gets an entry; with no phase all entries are empty.
pub fn extract_territories(nations: &[Nation], phase: Option<&PhaseSnapshot>) -> Territories {
    nations
        .iter()
        .map(|nation| {
            let territory = phase
                .map(|phase| territory_of(phase, nation))
                .unwrap_or_default();
            (nation.clone(), territory)
        })
        .collect()
}

fn territory_of(phase: &PhaseSnapshot, nation: &Nation) -> Territory {
    let mut territory: Territory = phase.units_of(nation).map(|unit| unit.location).collect();
    territory.extend(phase.retreating_units_of(nation).map(|unit| unit.location));
    territory.extend(phase.centers_of(nation).iter().cloned());
    territory
}
