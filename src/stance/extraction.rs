//! Shared state and the capability trait every stance strategy implements

use crate::core::error::{Result, StanceError};
use crate::core::types::{Message, Nation};
use crate::game::snapshot::PhaseSnapshot;
use crate::game::GameEngine;
use crate::stance::matrix::StanceMatrix;
use crate::stance::territory::{extract_territories, Territories};

/// Starting stance for every ordered pair: neutral with a little trust
pub const INITIAL_STANCE: f64 = 0.1;

/// Construction data common to all strategies
#[derive(Debug, Clone)]
pub struct StanceBase {
    identity: Nation,
    nations: Vec<Nation>,
    territories: Territories,
}

impl StanceBase {
    /// Capture the roster of `game`, sorted and deduplicated
    pub fn new(identity: impl Into<Nation>, game: &dyn GameEngine) -> Self {
        let mut nations = game.power_names();
        nations.sort();
        nations.dedup();
        let territories = extract_territories(&nations, None);

        Self {
            identity: identity.into(),
            nations,
            territories,
        }
    }

    /// The nation this extractor plays as
    pub fn identity(&self) -> &Nation {
        &self.identity
    }

    pub fn nations(&self) -> &[Nation] {
        &self.nations
    }

    /// Territories as of the last refresh
    pub fn territories(&self) -> &Territories {
        &self.territories
    }

    /// Recompute every nation's territory from a movement phase
    pub fn refresh_territories(&mut self, phase: Option<&PhaseSnapshot>) -> &Territories {
        self.territories = extract_territories(&self.nations, phase);
        &self.territories
    }
}

/// A strategy that turns game state into a stance matrix
pub trait StanceExtraction {
    fn base(&self) -> &StanceBase;

    fn identity(&self) -> &Nation {
        self.base().identity()
    }

    fn nations(&self) -> &[Nation] {
        self.base().nations()
    }

    fn territories(&self) -> &Territories {
        self.base().territories()
    }

    /// Compute `stance[n][k]` for every ordered pair at the current turn
    ///
    /// `messages` is the press exchanged this turn; strategies that only
    /// look at orders ignore it. Types without a scoring strategy fail
    /// with [`StanceError::NotImplemented`].
    fn get_stance(
        &mut self,
        _game: &dyn GameEngine,
        _messages: &[Message],
    ) -> Result<StanceMatrix> {
        Err(StanceError::NotImplemented("StanceExtraction::get_stance"))
    }
}
