//! Stance Vector - how each Diplomacy power regards every other

pub mod core;
pub mod game;
pub mod stance;

pub use crate::core::{Result, StanceConfig, StanceError};
pub use crate::game::{GameEngine, RecordedGame};
pub use crate::stance::{ActionBasedStance, ScoreBasedStance, StanceExtraction, StanceMatrix};
