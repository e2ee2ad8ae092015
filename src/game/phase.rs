//! Phase names such as `S1901M`: season letter, four-digit year, phase type letter

use serde::{Deserialize, Serialize};

/// The type of a phase, taken from the last character of its name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PhaseKind {
    /// Units issue hold/move/support/convoy orders
    Movement,
    /// Dislodged units retreat or disband
    Retreats,
    /// Builds and disbands
    Adjustments,
    /// Anything else (`FORMING`, `COMPLETED`, ...)
    Other,
}

/// A parsed phase name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhaseName {
    pub season: Option<char>,
    pub year: Option<u32>,
    pub kind: PhaseKind,
}

impl PhaseName {
    /// Parse a phase name; never fails, unknown parts are left as `None`/`Other`
    pub fn parse(name: &str) -> Self {
        let kind = match name.chars().last() {
            Some('M') => PhaseKind::Movement,
            Some('R') => PhaseKind::Retreats,
            Some('A') => PhaseKind::Adjustments,
            _ => PhaseKind::Other,
        };
        let year = name.get(1..5).and_then(|digits| digits.parse().ok());
        let season = if year.is_some() { name.chars().next() } else { None };

        Self { season, year, kind }
    }
}

/// Whether a phase name marks a movement phase
pub fn is_movement_phase(name: &str) -> bool {
    name.ends_with('M')
}
