//! Symmetric province adjacency for armies and fleets

use ahash::{AHashMap, AHashSet};
use serde::{Deserialize, Serialize};

use crate::core::types::{Location, UnitType};

/// Which provinces a unit type can move between
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AdjacencyMap {
    #[serde(default)]
    armies: AHashMap<Location, AHashSet<Location>>,
    #[serde(default)]
    fleets: AHashMap<Location, AHashSet<Location>>,
}

impl AdjacencyMap {
    pub fn new() -> Self {
        Self::default()
    }

    fn edges(&self, unit_type: UnitType) -> &AHashMap<Location, AHashSet<Location>> {
        match unit_type {
            UnitType::Army => &self.armies,
            UnitType::Fleet => &self.fleets,
        }
    }

    /// Connect two provinces in both directions
    pub fn connect(&mut self, unit_type: UnitType, a: &str, b: &str) {
        if a == b {
            return;
        }
        let edges = match unit_type {
            UnitType::Army => &mut self.armies,
            UnitType::Fleet => &mut self.fleets,
        };
        edges.entry(a.to_string()).or_default().insert(b.to_string());
        edges.entry(b.to_string()).or_default().insert(a.to_string());
    }

    /// Build an army-only map from a list of province pairs
    pub fn from_army_edges(pairs: &[(&str, &str)]) -> Self {
        let mut map = Self::new();
        for (a, b) in pairs {
            map.connect(UnitType::Army, a, b);
        }
        map
    }

    pub fn abuts(&self, unit_type: UnitType, from: &str, to: &str) -> bool {
        self.edges(unit_type)
            .get(from)
            .map_or(false, |neighbors| neighbors.contains(to))
    }
}
