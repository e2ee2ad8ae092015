//! Signal extraction from one movement phase
//!
//! Each extractor takes a standing nation and scores every other nation
//! by what it did last movement phase:
//! - hostile moves: moves into my territory, or onto a province I also moved for
//! - hostile supports: supports/convoys of those moves
//! - friendly supports: supports/convoys of my units
//! - unrealized hostile moves: armies next to my territory that did not move in
//!
//! The standing nation itself is never scored, so its own entry stays at zero.

use std::collections::{BTreeMap, BTreeSet};

use crate::core::config::StanceConfig;
use crate::core::types::{Nation, UnitType};
use crate::game::snapshot::PhaseSnapshot;
use crate::game::{GameEngine, MOVE_OPERATOR};
use crate::stance::order::{parse_order, ParsedOrder};
use crate::stance::territory::{Territories, Territory};

/// Contribution of each nation to one signal
pub type NationScores = BTreeMap<Nation, f64>;

static EMPTY_TERRITORY: Territory = BTreeSet::new();

fn zeroed(nations: &[Nation]) -> NationScores {
    nations.iter().map(|nation| (nation.clone(), 0.0)).collect()
}

fn accumulate(scores: &mut NationScores, nation: &Nation, amount: f64) {
    *scores.entry(nation.clone()).or_insert(0.0) += amount;
}

/// Moves against a standing nation
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HostileMoves {
    pub hostility: NationScores,
    /// `unit-target` of every move into my territory
    pub hostile_moves: Vec<String>,
    /// `unit-target` of every move onto a province I was also moving to
    pub conflict_moves: Vec<String>,
}

/// Supports and convoys backing moves against a standing nation
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HostileSupports {
    pub hostility: NationScores,
    /// `unit:source-target`
    pub hostile_supports: Vec<String>,
    pub conflict_supports: Vec<String>,
}

/// Supports and convoys given to a standing nation's units
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FriendlySupports {
    pub friendship: NationScores,
    /// `unit:source-target`, or `unit:source` for a support-hold
    pub friendly_supports: Vec<String>,
}

/// Attacks other nations' armies could have made but did not
#[derive(Debug, Clone, PartialEq, Default)]
pub struct UnrealizedMoves {
    /// Either 0 or exactly the unrealized coefficient per nation
    pub friendship: NationScores,
    /// `unit-target` adjacencies left unused
    pub unrealized_moves: BTreeSet<String>,
}

/// All four signals from one standing nation's point of view
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NationSignals {
    pub hostile_moves: HostileMoves,
    pub hostile_supports: HostileSupports,
    pub friendly_supports: FriendlySupports,
    pub unrealized: UnrealizedMoves,
}

/// Signals for every standing nation in one turn
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TurnSignals(BTreeMap<Nation, NationSignals>);

impl TurnSignals {
    pub fn get(&self, nation: &str) -> Option<&NationSignals> {
        self.0.get(nation)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Nation, &NationSignals)> {
        self.0.iter()
    }

    fn score(&self, n: &str, k: &str, pick: impl Fn(&NationSignals) -> &NationScores) -> f64 {
        self.0
            .get(n)
            .and_then(|signals| pick(signals).get(k))
            .copied()
            .unwrap_or(0.0)
    }

    /// Hostility `n` holds toward `k` from `k`'s moves
    pub fn hostility_moves(&self, n: &str, k: &str) -> f64 {
        self.score(n, k, |s| &s.hostile_moves.hostility)
    }

    /// Hostility `n` holds toward `k` from `k`'s supports and convoys
    pub fn hostility_supports(&self, n: &str, k: &str) -> f64 {
        self.score(n, k, |s| &s.hostile_supports.hostility)
    }

    pub fn friendship_supports(&self, n: &str, k: &str) -> f64 {
        self.score(n, k, |s| &s.friendly_supports.friendship)
    }

    pub fn friendship_unrealized(&self, n: &str, k: &str) -> f64 {
        self.score(n, k, |s| &s.unrealized.friendship)
    }
}

/// Reads one movement phase and scores it for any standing nation
pub struct SignalExtractor<'a> {
    nations: &'a [Nation],
    phase: &'a PhaseSnapshot,
    territories: &'a Territories,
    engine: &'a dyn GameEngine,
    config: &'a StanceConfig,
}

impl<'a> SignalExtractor<'a> {
    pub fn new(
        nations: &'a [Nation],
        phase: &'a PhaseSnapshot,
        territories: &'a Territories,
        engine: &'a dyn GameEngine,
        config: &'a StanceConfig,
    ) -> Self {
        Self {
            nations,
            phase,
            territories,
            engine,
            config,
        }
    }

    fn territory(&self, nation: &Nation) -> &'a Territory {
        self.territories.get(nation).unwrap_or(&EMPTY_TERRITORY)
    }

    fn opponents<'b>(&self, nation: &'b Nation) -> impl Iterator<Item = &'a Nation> + 'b
    where
        'a: 'b,
    {
        let nations: &'a [Nation] = self.nations;
        nations.iter().filter(move |opp| *opp != nation)
    }

    /// Moves by other nations into my territory or onto my own move targets
    pub fn hostile_moves(&self, nation: &Nation) -> HostileMoves {
        let territory = self.territory(nation);
        let mut result = HostileMoves {
            hostility: zeroed(self.nations),
            ..HostileMoves::default()
        };

        // Provinces I tried to expand into, not reinforcements of my own
        let my_targets: Vec<&str> = self
            .phase
            .orders_of(nation)
            .iter()
            .filter_map(|order| match parse_order(order) {
                ParsedOrder::Move { target, .. } if !territory.contains(target) => Some(target),
                _ => None,
            })
            .collect();

        for opp in self.opponents(nation) {
            for order in self.phase.orders_of(opp) {
                let ParsedOrder::Move { unit, target } = parse_order(order) else {
                    continue;
                };
                if territory.contains(target) {
                    accumulate(&mut result.hostility, opp, self.config.invasion_coef);
                    result.hostile_moves.push(format!("{}-{}", unit, target));
                    tracing::trace!(%nation, %opp, unit, target, "hostile move");
                } else if my_targets.contains(&target) {
                    accumulate(&mut result.hostility, opp, self.config.conflict_coef);
                    result.conflict_moves.push(format!("{}-{}", unit, target));
                    tracing::trace!(%nation, %opp, unit, target, "conflict move");
                }
            }
        }

        result
    }

    /// Supports and convoys of the hostile and conflict moves found against `nation`
    pub fn hostile_supports(&self, nation: &Nation, moves: &HostileMoves) -> HostileSupports {
        let mut result = HostileSupports {
            hostility: zeroed(self.nations),
            ..HostileSupports::default()
        };

        for opp in self.opponents(nation) {
            for order in self.phase.orders_of(opp) {
                // Supporting a hold never threatens anyone
                let Some((unit, source, Some(target))) = parse_order(order).assistance() else {
                    continue;
                };
                let supported = format!("{}-{}", source, target);
                if moves.hostile_moves.contains(&supported) {
                    accumulate(&mut result.hostility, opp, self.config.invasive_support_coef);
                    result
                        .hostile_supports
                        .push(format!("{}:{}-{}", unit, source, target));
                    tracing::trace!(%nation, %opp, unit, %supported, "hostile support");
                } else if moves.conflict_moves.iter().any(|m| m == target) {
                    accumulate(&mut result.hostility, opp, self.config.conflict_support_coef);
                    result
                        .conflict_supports
                        .push(format!("{}:{}-{}", unit, source, target));
                }
            }
        }

        result
    }

    /// Supports and convoys other nations gave to units in my territory
    pub fn friendly_supports(&self, nation: &Nation) -> FriendlySupports {
        let territory = self.territory(nation);
        let mut result = FriendlySupports {
            friendship: zeroed(self.nations),
            ..FriendlySupports::default()
        };

        for opp in self.opponents(nation) {
            for order in self.phase.orders_of(opp) {
                let Some((unit, source, target)) = parse_order(order).assistance() else {
                    continue;
                };
                if !territory.contains(source) {
                    continue;
                }
                accumulate(&mut result.friendship, opp, self.config.friendly_coef);
                result.friendly_supports.push(match target {
                    Some(target) => format!("{}:{}-{}", unit, source, target),
                    None => format!("{}:{}", unit, source),
                });
            }
        }

        result
    }

    /// Rewards nations whose armies bordered my territory without moving in
    pub fn unrealized_hostile_moves(&self, nation: &Nation) -> UnrealizedMoves {
        let territory = self.territory(nation);
        let mut result = UnrealizedMoves {
            friendship: zeroed(self.nations),
            ..UnrealizedMoves::default()
        };

        for opp in self.opponents(nation) {
            let mut threats = BTreeSet::new();
            for unit in self
                .phase
                .units_of(opp)
                .filter(|unit| unit.unit_type == UnitType::Army)
            {
                for location in territory {
                    if self
                        .engine
                        .abuts(UnitType::Army, &unit.location, MOVE_OPERATOR, location)
                    {
                        threats.insert(format!("{}-{}", unit.location, location));
                    }
                }
            }

            if !threats.is_empty() {
                result.friendship.insert(opp.clone(), self.config.unrealized_coef);
            }

            for order in self.phase.orders_of(opp) {
                let ParsedOrder::Move { unit, target } = parse_order(order) else {
                    continue;
                };
                if territory.contains(target) && threats.remove(&format!("{}-{}", unit, target)) {
                    // Realized: scored as a hostile move instead
                    result.friendship.insert(opp.clone(), 0.0);
                }
            }

            result.unrealized_moves.extend(threats);
        }

        result
    }

    /// Run all four extractors for every nation in the roster
    pub fn extract_all(&self) -> TurnSignals {
        let signals = self
            .nations
            .iter()
            .map(|nation| {
                let hostile_moves = self.hostile_moves(nation);
                let hostile_supports = self.hostile_supports(nation, &hostile_moves);
                let signals = NationSignals {
                    friendly_supports: self.friendly_supports(nation),
                    unrealized: self.unrealized_hostile_moves(nation),
                    hostile_moves,
                    hostile_supports,
                };
                (nation.clone(), signals)
            })
            .collect();
        TurnSignals(signals)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::adjacency::AdjacencyMap;
    use crate::game::record::RecordedGame;
    use crate::stance::territory::extract_territories;

    fn roster() -> Vec<Nation> {
        ["ENGLAND", "FRANCE", "GERMANY"].into_iter().map(Nation::from).collect()
    }

    fn board() -> RecordedGame {
        RecordedGame::new(
            roster(),
            AdjacencyMap::from_army_edges(&[
                ("BUR", "PAR"),
                ("BUR", "MAR"),
                ("BUR", "PIC"),
                ("BUR", "RUH"),
                ("BEL", "PIC"),
                ("BEL", "BUR"),
                ("PAR", "PIC"),
            ]),
        )
    }

    fn base_phase() -> PhaseSnapshot {
        PhaseSnapshot::new("F1901M")
            .with_units("FRANCE", &["A MAR", "A PAR", "F PIC"])
            .with_centers("FRANCE", &["BRE", "MAR", "PAR"])
            .with_units("GERMANY", &["A BUR", "A RUH", "F HOL"])
            .with_centers("GERMANY", &["BER", "KIE", "MUN"])
            .with_units("ENGLAND", &["A BEL", "F ENG"])
            .with_centers("ENGLAND", &["EDI", "LON", "LVP"])
    }

    fn with_extractor<T>(phase: &PhaseSnapshot, f: impl FnOnce(&SignalExtractor<'_>) -> T) -> T {
        let nations = roster();
        let game = board();
        let config = StanceConfig::default();
        let territories = extract_territories(&nations, Some(phase));
        let extractor = SignalExtractor::new(&nations, phase, &territories, &game, &config);
        f(&extractor)
    }

    fn france() -> Nation {
        Nation::from("FRANCE")
    }

    #[test]
    fn test_invasion_scores_invasion_coef() {
        let phase = base_phase().with_orders("GERMANY", &["A BUR - MAR"]);
        let moves = with_extractor(&phase, |x| x.hostile_moves(&france()));
        assert_eq!(moves.hostility["GERMANY"], 1.0);
        assert_eq!(moves.hostility["ENGLAND"], 0.0);
        assert_eq!(moves.hostile_moves, vec!["BUR-MAR"]);
        assert!(moves.conflict_moves.is_empty());
    }

    #[test]
    fn test_conflict_move_on_shared_target() {
        let phase = base_phase()
            .with_orders("FRANCE", &["A PAR - BUR", "A MAR - PAR"])
            .with_orders("ENGLAND", &["A BEL - BUR"]);
        let moves = with_extractor(&phase, |x| x.hostile_moves(&france()));
        assert_eq!(moves.hostility["ENGLAND"], 0.5);
        assert_eq!(moves.conflict_moves, vec!["BEL-BUR"]);
        assert!(moves.hostile_moves.is_empty());
    }

    #[test]
    fn test_reinforcement_is_not_a_target() {
        // FRANCE moving within its own territory does not make PAR contested
        let phase = base_phase()
            .with_orders("FRANCE", &["A MAR - PAR"])
            .with_orders("ENGLAND", &["A BEL - PAR"]);
        let moves = with_extractor(&phase, |x| x.hostile_moves(&france()));
        // PAR is French territory, so this is an invasion, not a conflict
        assert_eq!(moves.hostility["ENGLAND"], 1.0);
        assert!(moves.conflict_moves.is_empty());
    }

    #[test]
    fn test_hostile_moves_accumulate() {
        let phase = base_phase().with_orders("GERMANY", &["A BUR - MAR", "A RUH - PAR"]);
        let moves = with_extractor(&phase, |x| x.hostile_moves(&france()));
        assert_eq!(moves.hostility["GERMANY"], 2.0);
        assert_eq!(moves.hostile_moves.len(), 2);
    }

    #[test]
    fn test_support_of_invasion_is_hostile() {
        let phase = base_phase()
            .with_orders("GERMANY", &["A BUR - PAR"])
            .with_orders("ENGLAND", &["A BEL S A BUR - PAR", "F ENG S A BEL"]);
        let (moves, supports) = with_extractor(&phase, |x| {
            let moves = x.hostile_moves(&france());
            let supports = x.hostile_supports(&france(), &moves);
            (moves, supports)
        });
        assert_eq!(moves.hostile_moves, vec!["BUR-PAR"]);
        assert_eq!(supports.hostility["ENGLAND"], 1.0);
        assert_eq!(supports.hostile_supports, vec!["BEL:BUR-PAR"]);
        assert!(supports.conflict_supports.is_empty());
    }

    #[test]
    fn test_friendly_support_of_my_unit() {
        let phase = base_phase().with_orders("ENGLAND", &["A BEL S F PIC", "F ENG S F PIC - BRE"]);
        let supports = with_extractor(&phase, |x| x.friendly_supports(&france()));
        assert_eq!(supports.friendship["ENGLAND"], 2.0);
        assert_eq!(supports.friendly_supports, vec!["BEL:PIC", "ENG:PIC-BRE"]);
    }

    #[test]
    fn test_friendly_convoy_counts() {
        let phase = base_phase().with_orders("ENGLAND", &["F ENG C A PAR - LON"]);
        let supports = with_extractor(&phase, |x| x.friendly_supports(&france()));
        assert_eq!(supports.friendship["ENGLAND"], 1.0);
        assert_eq!(supports.friendly_supports, vec!["ENG:PAR-LON"]);
    }

    #[test]
    fn test_unrealized_threat_is_rewarded_once() {
        // GERMANY's A BUR borders MAR, PAR and PIC; one reward, not three
        let phase = base_phase().with_orders("GERMANY", &["A BUR H"]);
        let unrealized = with_extractor(&phase, |x| x.unrealized_hostile_moves(&france()));
        assert_eq!(unrealized.friendship["GERMANY"], 1.0);
        assert!(unrealized.unrealized_moves.contains("BUR-PAR"));
        assert_eq!(unrealized.unrealized_moves.len(), 4);
    }

    #[test]
    fn test_realized_threat_resets_reward() {
        let phase = base_phase().with_orders("GERMANY", &["A BUR - MAR"]);
        let unrealized = with_extractor(&phase, |x| x.unrealized_hostile_moves(&france()));
        assert_eq!(unrealized.friendship["GERMANY"], 0.0);
        assert!(!unrealized.unrealized_moves.contains("BUR-MAR"));
        assert!(unrealized.unrealized_moves.contains("BUR-PAR"));
    }

    #[test]
    fn test_fleets_never_threaten() {
        let phase = base_phase()
            .with_units("ENGLAND", &["F BEL"])
            .with_orders("ENGLAND", &["F BEL H"]);
        let unrealized = with_extractor(&phase, |x| x.unrealized_hostile_moves(&france()));
        assert_eq!(unrealized.friendship["ENGLAND"], 0.0);
    }

    #[test]
    fn test_unknown_orders_are_ignored() {
        let phase = base_phase()
            .with_orders("GERMANY", &["EAT HAM SAND", "A BUR B", "A BUR S A"])
            .with_orders("ENGLAND", &["garbage"]);
        let signals = with_extractor(&phase, |x| x.extract_all());
        assert_eq!(signals.hostility_moves("FRANCE", "GERMANY"), 0.0);
        assert_eq!(signals.hostility_supports("FRANCE", "GERMANY"), 0.0);
        assert_eq!(signals.friendship_supports("FRANCE", "ENGLAND"), 0.0);
    }

    #[test]
    fn test_self_is_never_scored() {
        let phase = base_phase().with_orders("FRANCE", &["A MAR - PAR", "A PAR S A MAR - PAR"]);
        let signals = with_extractor(&phase, |x| x.extract_all());
        for (nation, _) in signals.iter() {
            let n = nation.as_str();
            assert_eq!(signals.hostility_moves(n, n), 0.0);
            assert_eq!(signals.hostility_supports(n, n), 0.0);
            assert_eq!(signals.friendship_supports(n, n), 0.0);
            assert_eq!(signals.friendship_unrealized(n, n), 0.0);
        }
    }
}
