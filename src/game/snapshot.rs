//! Per-phase snapshots of the board
//!
//! A `PhaseSnapshot` is the read-only record of one completed phase: the
//! board as it stood when the phase began plus every order submitted in
//! it. The serde layout follows the turn-level JSON game logs
//! (`name`, `orders`, `state.units`, `state.retreats`, `state.centers`).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::core::types::{Location, Nation, UnitType};
use crate::game::phase::{is_movement_phase, PhaseName};

/// A unit and the province it stands in
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UnitPosition {
    pub unit_type: UnitType,
    pub location: Location,
}

impl UnitPosition {
    /// Parse a unit string such as `A PAR`, `F STP/SC` or `*A MUN`
    ///
    /// The dislodged marker is ignored and only the three-letter province
    /// is kept, so `F STP/SC` stands in `STP`.
    pub fn parse(unit: &str) -> Option<Self> {
        let mut parts = unit.trim_start_matches('*').split_whitespace();
        let unit_type = UnitType::from_code(parts.next()?)?;
        let location: Location = parts.next()?.chars().take(3).collect();
        if parts.next().is_some() {
            return None;
        }
        Some(Self { unit_type, location })
    }
}

/// Unit, retreat and supply-center positions at the start of a phase
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BoardState {
    #[serde(default)]
    pub units: BTreeMap<Nation, Vec<String>>,
    /// Dislodged unit -> provinces it may retreat to
    #[serde(default)]
    pub retreats: BTreeMap<Nation, BTreeMap<String, Vec<Location>>>,
    #[serde(default)]
    pub centers: BTreeMap<Nation, Vec<Location>>,
}

/// One completed phase: its name, the orders submitted, and the board it started from
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PhaseSnapshot {
    pub name: String,
    #[serde(default)]
    pub orders: BTreeMap<Nation, Vec<String>>,
    #[serde(default)]
    pub state: BoardState,
}

impl PhaseSnapshot {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn phase(&self) -> PhaseName {
        PhaseName::parse(&self.name)
    }

    pub fn is_movement(&self) -> bool {
        is_movement_phase(&self.name)
    }

    pub fn year(&self) -> Option<u32> {
        self.phase().year
    }

    /// Orders submitted by a nation; empty when it sent none
    pub fn orders_of(&self, nation: &Nation) -> &[String] {
        self.orders.get(nation).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Units a nation had on the board; malformed unit strings are skipped
    pub fn units_of<'a>(&'a self, nation: &Nation) -> impl Iterator<Item = UnitPosition> + 'a {
        self.state
            .units
            .get(nation)
            .into_iter()
            .flatten()
            .filter_map(|unit| UnitPosition::parse(unit))
    }

    /// Dislodged units of a nation awaiting retreat
    pub fn retreating_units_of<'a>(
        &'a self,
        nation: &Nation,
    ) -> impl Iterator<Item = UnitPosition> + 'a {
        self.state
            .retreats
            .get(nation)
            .into_iter()
            .flat_map(|retreats| retreats.keys())
            .filter_map(|unit| UnitPosition::parse(unit))
    }

    pub fn centers_of(&self, nation: &Nation) -> &[Location] {
        self.state
            .centers
            .get(nation)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn with_orders<S: AsRef<str>>(mut self, nation: &str, orders: &[S]) -> Self {
        self.orders.insert(
            Nation::from(nation),
            orders.iter().map(|o| o.as_ref().to_string()).collect(),
        );
        self
    }

    pub fn with_units<S: AsRef<str>>(mut self, nation: &str, units: &[S]) -> Self {
        self.state.units.insert(
            Nation::from(nation),
            units.iter().map(|u| u.as_ref().to_string()).collect(),
        );
        self
    }

    pub fn with_retreat(mut self, nation: &str, unit: &str, options: &[&str]) -> Self {
        self.state
            .retreats
            .entry(Nation::from(nation))
            .or_default()
            .insert(unit.to_string(), options.iter().map(|o| o.to_string()).collect());
        self
    }

    pub fn with_centers<S: AsRef<str>>(mut self, nation: &str, centers: &[S]) -> Self {
        self.state.centers.insert(
            Nation::from(nation),
            centers.iter().map(|c| c.as_ref().to_string()).collect(),
        );
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_position_parse() {
        let unit = UnitPosition::parse("A PAR").unwrap();
        assert_eq!(unit.unit_type, UnitType::Army);
        assert_eq!(unit.location, "PAR");

        let fleet = UnitPosition::parse("F STP/SC").unwrap();
        assert_eq!(fleet.unit_type, UnitType::Fleet);
        assert_eq!(fleet.location, "STP");

        let dislodged = UnitPosition::parse("*A MUN").unwrap();
        assert_eq!(dislodged.location, "MUN");
    }

    #[test]
    fn test_unit_position_rejects_garbage() {
        assert!(UnitPosition::parse("").is_none());
        assert!(UnitPosition::parse("X PAR").is_none());
        assert!(UnitPosition::parse("A").is_none());
        assert!(UnitPosition::parse("A PAR BUR").is_none());
    }

    #[test]
    fn test_missing_nation_reads_as_empty() {
        let phase = PhaseSnapshot::new("S1901M");
        let france = Nation::from("FRANCE");
        assert!(phase.orders_of(&france).is_empty());
        assert!(phase.centers_of(&france).is_empty());
        assert_eq!(phase.units_of(&france).count(), 0);
        assert_eq!(phase.retreating_units_of(&france).count(), 0);
    }

    #[test]
    fn test_deserialize_turn_log() {
        let json = r#"{
            "name": "F1901M",
            "orders": { "FRANCE": ["A PAR - BUR"], "ENGLAND": [] },
            "state": {
                "units": { "FRANCE": ["A PAR", "F BRE"] },
                "retreats": { "GERMANY": { "A MUN": ["BOH", "TYR"] } },
                "centers": { "FRANCE": ["BRE", "MAR", "PAR"] }
            }
        }"#;
        let phase: PhaseSnapshot = serde_json::from_str(json).unwrap();
        assert!(phase.is_movement());
        assert_eq!(phase.year(), Some(1901));
        assert_eq!(phase.orders_of(&Nation::from("FRANCE")), ["A PAR - BUR"]);
        assert_eq!(phase.units_of(&Nation::from("FRANCE")).count(), 2);
        let retreating: Vec<_> = phase.retreating_units_of(&Nation::from("GERMANY")).collect();
        assert_eq!(retreating[0].location, "MUN");
    }
}
