//! Read-only interface to the game engine the stance extractors observe
//!
//! The extractors never drive the game. They read the roster, the phase
//! history, current supply centers and an adjacency predicate through
//! `GameEngine`, and copy the one phase they need into an owned
//! `PhaseSnapshot` before computing anything.

pub mod adjacency;
pub mod phase;
pub mod record;
pub mod snapshot;

pub use adjacency::AdjacencyMap;
pub use phase::{is_movement_phase, PhaseKind, PhaseName};
pub use record::{RecordedGame, ReplayView};
pub use snapshot::{BoardState, PhaseSnapshot, UnitPosition};

use crate::core::types::{Location, Nation, UnitType};

/// Operator of a plain move order, as passed to [`GameEngine::abuts`]
pub const MOVE_OPERATOR: &str = "-";

/// What a stance extractor needs from the game engine
pub trait GameEngine {
    /// Every player of the game, in any order
    fn power_names(&self) -> Vec<Nation>;

    /// Completed phases, oldest first
    fn phase_history(&self) -> &[PhaseSnapshot];

    /// Supply centers a nation currently owns
    fn centers(&self, nation: &Nation) -> Vec<Location>;

    /// Whether a unit of `unit_type` at `from` can reach `to` with the order operator `op`
    fn abuts(&self, unit_type: UnitType, from: &str, op: &str, to: &str) -> bool;

    /// The most recent completed movement phase, if any
    fn previous_movement_phase(&self) -> Option<&PhaseSnapshot> {
        self.phase_history()
            .iter()
            .rev()
            .find(|phase| phase.is_movement())
    }
}
