//! Score-based baseline: trust the weaker, fear the stronger

use std::collections::BTreeMap;

use crate::core::error::Result;
use crate::core::types::{Message, Nation};
use crate::game::GameEngine;
use crate::stance::extraction::{StanceBase, StanceExtraction};
use crate::stance::matrix::StanceMatrix;

/// Stance from supply-center counts alone
///
/// A nation with at least one center regards everyone it outscores as a
/// friend (`1`) and everyone outscoring it as an enemy (`-1`). Ties, self
/// entries and center-less nations stay at `0`.
#[derive(Debug, Clone)]
pub struct ScoreBasedStance {
    base: StanceBase,
    scores: BTreeMap<Nation, usize>,
    stance: StanceMatrix,
}

impl ScoreBasedStance {
    pub fn new(identity: impl Into<Nation>, game: &dyn GameEngine) -> Self {
        let base = StanceBase::new(identity, game);
        let stance = StanceMatrix::uniform(base.nations(), 0.0);
        Self {
            base,
            scores: BTreeMap::new(),
            stance,
        }
    }

    /// Center count of every roster nation
    pub fn extract_scores(&mut self, game: &dyn GameEngine) -> &BTreeMap<Nation, usize> {
        self.scores = self
            .base
            .nations()
            .iter()
            .map(|nation| (nation.clone(), game.centers(nation).len()))
            .collect();
        &self.scores
    }

    pub fn scores(&self) -> &BTreeMap<Nation, usize> {
        &self.scores
    }

    pub fn stance(&self) -> &StanceMatrix {
        &self.stance
    }
}

impl StanceExtraction for ScoreBasedStance {
    fn base(&self) -> &StanceBase {
        &self.base
    }

    fn get_stance(&mut self, game: &dyn GameEngine, _messages: &[Message]) -> Result<StanceMatrix> {
        self.extract_scores(game);
        let scores = &self.scores;
        let score = |nation: &Nation| scores.get(nation).copied().unwrap_or(0);

        self.stance = StanceMatrix::from_fn(self.base.nations(), |n, k| {
            let (mine, theirs) = (score(n), score(k));
            if mine == 0 || mine == theirs {
                0.0
            } else if mine > theirs {
                1.0
            } else {
                -1.0
            }
        });
        tracing::debug!(nation = %self.base.identity(), "score-based stance updated");
        Ok(self.stance.clone())
    }
}
