//! Core type definitions used throughout the codebase

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A player of the game (a "power" in Diplomacy terms)
///
/// Ordered by name so every roster, matrix and signal table iterates
/// in the same deterministic order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Nation(pub String);

impl Nation {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Nation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for Nation {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Nation {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl From<String> for Nation {
    fn from(name: String) -> Self {
        Self(name)
    }
}

/// Province abbreviation as it appears in order text (e.g. `PAR`, `STP/SC`)
pub type Location = String;

/// Kind of unit standing on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnitType {
    Army,
    Fleet,
}

impl UnitType {
    /// Parse the one-letter prefix used in order and unit strings
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "A" => Some(Self::Army),
            "F" => Some(Self::Fleet),
            _ => None,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::Army => "A",
            Self::Fleet => "F",
        }
    }
}

/// A press message exchanged between two nations
///
/// Accepted by the stance extractors for interface compatibility with
/// message-aware strategies; the order-based baselines ignore it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub sender: Nation,
    pub recipient: Nation,
    #[serde(default)]
    pub phase: String,
    pub body: String,
}
