//! Action-based stance: "whoever attacks me is my enemy, whoever supports me is my friend"
//!
//! Each call reads the latest movement phase and updates every entry as
//!
//! ```text
//! stance[n][k] = discount * stance[n][k]
//!              - hostile_moves[n][k] - hostile_supports[n][k]
//!              + friendly_supports[n][k] + unrealized_moves[n][k]
//! ```
//!
//! followed by the end-game flip and the random betrayal overrides.

use std::collections::BTreeSet;

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::core::config::StanceConfig;
use crate::core::error::{Result, StanceError};
use crate::core::types::{Message, Nation};
use crate::game::GameEngine;
use crate::stance::extraction::{StanceBase, StanceExtraction, INITIAL_STANCE};
use crate::stance::matrix::StanceMatrix;
use crate::stance::rationale::{self, RationaleLog};
use crate::stance::signals::{NationSignals, SignalExtractor, TurnSignals};

/// Ordered `(n, k)` pairs an override touched
pub type FlipSet = BTreeSet<(Nation, Nation)>;

/// Everything one recurrence step produced, kept for rendering the rationale
#[derive(Debug, Clone, PartialEq)]
pub struct TurnOutcome {
    /// Name of the movement phase the signals came from
    pub phase: String,
    pub year: Option<u32>,
    pub discount: f64,
    pub year_threshold: u32,
    pub previous: StanceMatrix,
    pub current: StanceMatrix,
    pub signals: TurnSignals,
    pub betrayals: FlipSet,
    pub end_game_flips: FlipSet,
}

/// Stance extractor driven by observed unit orders
#[derive(Debug, Clone)]
pub struct ActionBasedStance {
    base: StanceBase,
    config: StanceConfig,
    stance: StanceMatrix,
    stance_prev: Option<StanceMatrix>,
    rng: ChaCha8Rng,
}

impl ActionBasedStance {
    /// Extractor with the default configuration
    pub fn new(identity: impl Into<Nation>, game: &dyn GameEngine) -> Self {
        Self::build(identity, game, StanceConfig::default())
    }

    pub fn with_config(
        identity: impl Into<Nation>,
        game: &dyn GameEngine,
        config: StanceConfig,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(identity, game, config))
    }

    fn build(identity: impl Into<Nation>, game: &dyn GameEngine, config: StanceConfig) -> Self {
        let base = StanceBase::new(identity, game);
        let stance = StanceMatrix::uniform(base.nations(), INITIAL_STANCE);
        let rng = match config.random_seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };

        Self {
            base,
            config,
            stance,
            stance_prev: None,
            rng,
        }
    }

    pub fn config(&self) -> &StanceConfig {
        &self.config
    }

    /// The matrix as of the last call
    pub fn stance(&self) -> &StanceMatrix {
        &self.stance
    }

    /// The matrix before the last call, if any call happened
    pub fn previous_stance(&self) -> Option<&StanceMatrix> {
        self.stance_prev.as_ref()
    }

    /// Force `stance[nation][other]` to `value`, e.g. after an agreed alliance
    ///
    /// The forced value is the decay base of the next call.
    pub fn update_stance(&mut self, nation: &str, other: &str, value: f64) -> Result<()> {
        self.stance.set(nation, other, value)
    }

    /// Like [`StanceExtraction::get_stance`], also explaining every entry
    pub fn get_stance_verbose(
        &mut self,
        game: &dyn GameEngine,
        _messages: &[Message],
    ) -> Result<(StanceMatrix, RationaleLog)> {
        let outcome = self.step(game)?;
        let log = rationale::render(&outcome);
        Ok((outcome.current, log))
    }

    /// One recurrence step: decay, signals, end-game flip, betrayal
    pub fn step(&mut self, game: &dyn GameEngine) -> Result<TurnOutcome> {
        let phase = game
            .previous_movement_phase()
            .cloned()
            .ok_or(StanceError::NoMovementPhase)?;
        self.base.refresh_territories(Some(&phase));

        let signals = SignalExtractor::new(
            self.base.nations(),
            &phase,
            self.base.territories(),
            game,
            &self.config,
        )
        .extract_all();

        let previous = self.stance.clone();
        let discount = self.config.discount_factor;
        let mut current = previous.map(|n, k, value| {
            discount * value - signals.hostility_moves(n.as_str(), k.as_str())
                - signals.hostility_supports(n.as_str(), k.as_str())
                + signals.friendship_supports(n.as_str(), k.as_str())
                + signals.friendship_unrealized(n.as_str(), k.as_str())
        });

        let year = phase.year();
        let mut end_game_flips = FlipSet::new();
        let past_threshold = year.map_or(false, |year| year > self.config.year_threshold);
        if self.config.end_game_flip && past_threshold {
            current.for_each_mut(|n, k, value| {
                if *value >= 0.0 {
                    *value = -1.0;
                    end_game_flips.insert((n.clone(), k.clone()));
                }
            });
            tracing::debug!(
                phase = %phase.name,
                flips = end_game_flips.len(),
                "end-game flip"
            );
        }

        let mut betrayals = FlipSet::new();
        if self.config.random_betrayal {
            let nations = self.base.nations();
            for n in nations {
                let trusts_everyone = current
                    .row(n.as_str())
                    .map_or(false, |row| row.values().all(|value| *value >= 0.0));
                if !trusts_everyone {
                    continue;
                }
                let candidates: Vec<&Nation> = nations.iter().filter(|k| *k != n).collect();
                if let Some(&target) = candidates.choose(&mut self.rng) {
                    current.set(n.as_str(), target.as_str(), -1.0)?;
                    betrayals.insert((n.clone(), target.clone()));
                    tracing::debug!(nation = %n, target = %target, "random betrayal");
                }
            }
        }

        tracing::debug!(
            phase = %phase.name,
            hostile_moves = count_signals(&signals, |s| s.hostile_moves.hostile_moves.len()),
            friendly_supports = count_signals(&signals, |s| s.friendly_supports.friendly_supports.len()),
            betrayals = betrayals.len(),
            "stance updated"
        );

        self.stance = current.clone();
        self.stance_prev = Some(previous.clone());

        Ok(TurnOutcome {
            phase: phase.name,
            year,
            discount,
            year_threshold: self.config.year_threshold,
            previous,
            current,
            signals,
            betrayals,
            end_game_flips,
        })
    }
}

impl StanceExtraction for ActionBasedStance {
    fn base(&self) -> &StanceBase {
        &self.base
    }

    fn get_stance(&mut self, game: &dyn GameEngine, _messages: &[Message]) -> Result<StanceMatrix> {
        Ok(self.step(game)?.current)
    }
}

fn count_signals(
    signals: &TurnSignals,
    count: impl Fn(&NationSignals) -> usize,
) -> usize {
    signals.iter().map(|(_, s)| count(s)).sum()
}
