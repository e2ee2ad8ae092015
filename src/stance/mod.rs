//! Stance extraction
//!
//! Strategies that read a game through [`crate::game::GameEngine`] and
//! produce a [`StanceMatrix`] of how every nation regards every other.

pub mod action;
pub mod extraction;
pub mod matrix;
pub mod order;
pub mod rationale;
pub mod score;
pub mod signals;
pub mod territory;

pub use action::{ActionBasedStance, FlipSet, TurnOutcome};
pub use extraction::{StanceBase, StanceExtraction, INITIAL_STANCE};
pub use matrix::StanceMatrix;
pub use order::{parse_order, OrderKind, ParsedOrder};
pub use rationale::RationaleLog;
pub use score::ScoreBasedStance;
pub use signals::{
    FriendlySupports, HostileMoves, HostileSupports, NationSignals, SignalExtractor, TurnSignals,
    UnrealizedMoves,
};
pub use territory::{extract_territories, Territories, Territory};
