//! Recorded games: replay a turn-level JSON game log as a `GameEngine`

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::Result;
use crate::core::types::{Location, Nation, UnitType};
use crate::game::adjacency::AdjacencyMap;
use crate::game::snapshot::{BoardState, PhaseSnapshot};
use crate::game::GameEngine;

/// A finished (or in-progress) game captured as a sequence of phases
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordedGame {
    pub powers: Vec<Nation>,
    #[serde(default)]
    pub phases: Vec<PhaseSnapshot>,
    #[serde(default)]
    pub adjacency: AdjacencyMap,
    /// Board after the last recorded phase, if the log has one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final_state: Option<BoardState>,
}

impl RecordedGame {
    pub fn new(powers: Vec<Nation>, adjacency: AdjacencyMap) -> Self {
        Self {
            powers,
            phases: Vec::new(),
            adjacency,
            final_state: None,
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&content)
    }

    /// Append a completed phase to the history
    pub fn push_phase(&mut self, phase: PhaseSnapshot) {
        self.phases.push(phase);
    }

    /// The game as it stood after its first `len` phases completed
    pub fn view(&self, len: usize) -> ReplayView<'_> {
        ReplayView {
            game: self,
            len: len.min(self.phases.len()),
        }
    }

    /// One view per completed phase, oldest first
    pub fn replay(&self) -> impl Iterator<Item = ReplayView<'_>> {
        (1..=self.phases.len()).map(move |len| self.view(len))
    }

    pub fn with_final_state(mut self, state: BoardState) -> Self {
        self.final_state = Some(state);
        self
    }

    /// Centers a nation owns once the first `len` phases have completed
    ///
    /// Snapshots hold the board at the start of their phase, so the result
    /// of phase `len - 1` is the start of phase `len`. After the last phase
    /// the final state is used, or the last start-of-phase board when the
    /// log has none.
    pub fn centers_after(&self, len: usize, nation: &Nation) -> Vec<Location> {
        if let Some(next) = self.phases.get(len) {
            return next.centers_of(nation).to_vec();
        }
        if let Some(state) = &self.final_state {
            return state.centers.get(nation).cloned().unwrap_or_default();
        }
        self.phases[..len.min(self.phases.len())]
            .last()
            .map(|phase| phase.centers_of(nation).to_vec())
            .unwrap_or_default()
    }
}

impl GameEngine for RecordedGame {
    fn power_names(&self) -> Vec<Nation> {
        self.powers.clone()
    }

    fn phase_history(&self) -> &[PhaseSnapshot] {
        &self.phases
    }

    fn centers(&self, nation: &Nation) -> Vec<Location> {
        self.centers_after(self.phases.len(), nation)
    }

    // Recorded adjacency does not distinguish order operators.
    fn abuts(&self, unit_type: UnitType, from: &str, _op: &str, to: &str) -> bool {
        self.adjacency.abuts(unit_type, from, to)
    }
}

/// A recorded game truncated after some number of phases
#[derive(Debug, Clone, Copy)]
pub struct ReplayView<'a> {
    game: &'a RecordedGame,
    len: usize,
}

impl<'a> ReplayView<'a> {
    /// The phase that completed last in this view
    pub fn last_phase(&self) -> Option<&'a PhaseSnapshot> {
        self.game.phases[..self.len].last()
    }
}

impl GameEngine for ReplayView<'_> {
    fn power_names(&self) -> Vec<Nation> {
        self.game.powers.clone()
    }

    fn phase_history(&self) -> &[PhaseSnapshot] {
        &self.game.phases[..self.len]
    }

    fn centers(&self, nation: &Nation) -> Vec<Location> {
        self.game.centers_after(self.len, nation)
    }

    fn abuts(&self, unit_type: UnitType, from: &str, _op: &str, to: &str) -> bool {
        self.game.adjacency.abuts(unit_type, from, to)
    }
}
