//! Order classification
//!
//! Orders use the whitespace-separated DipNet syntax, e.g. `A PAR - BUR`,
//! `F ENG S A BRE`, `F ENG C A WAL - BEL`. Only the token count and the
//! operator token are inspected; anything outside the known shapes is
//! `Unknown` and contributes nothing to any signal.

/// Order type, independent of its locations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrderKind {
    Hold,
    Move,
    Support,
    Convoy,
    Unknown,
}

/// A classified order, borrowing its locations from the order text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParsedOrder<'a> {
    Hold {
        unit: &'a str,
    },
    /// Plain move, convoyed move (`VIA`) or retreat
    Move {
        unit: &'a str,
        target: &'a str,
    },
    /// Support of the unit at `source`; `target` is `None` for a support-hold
    Support {
        unit: &'a str,
        source: &'a str,
        target: Option<&'a str>,
    },
    Convoy {
        unit: &'a str,
        source: &'a str,
        target: &'a str,
    },
    Unknown,
}

impl<'a> ParsedOrder<'a> {
    pub fn kind(&self) -> OrderKind {
        match self {
            Self::Hold { .. } => OrderKind::Hold,
            Self::Move { .. } => OrderKind::Move,
            Self::Support { .. } => OrderKind::Support,
            Self::Convoy { .. } => OrderKind::Convoy,
            Self::Unknown => OrderKind::Unknown,
        }
    }

    /// Location of the ordered unit
    pub fn unit(&self) -> Option<&'a str> {
        match *self {
            Self::Hold { unit }
            | Self::Move { unit, .. }
            | Self::Support { unit, .. }
            | Self::Convoy { unit, .. } => Some(unit),
            Self::Unknown => None,
        }
    }

    /// Location the order acts on: the unit itself for holds and moves,
    /// the supported or convoyed unit otherwise
    pub fn source(&self) -> Option<&'a str> {
        match *self {
            Self::Hold { unit } | Self::Move { unit, .. } => Some(unit),
            Self::Support { source, .. } | Self::Convoy { source, .. } => Some(source),
            Self::Unknown => None,
        }
    }

    pub fn target(&self) -> Option<&'a str> {
        match *self {
            Self::Move { target, .. } | Self::Convoy { target, .. } => Some(target),
            Self::Support { target, .. } => target,
            Self::Hold { .. } | Self::Unknown => None,
        }
    }

    /// `(unit, source, target)` of a support or convoy, target absent for a support-hold
    pub fn assistance(&self) -> Option<(&'a str, &'a str, Option<&'a str>)> {
        match *self {
            Self::Support { unit, source, target } => Some((unit, source, target)),
            Self::Convoy { unit, source, target } => Some((unit, source, Some(target))),
            _ => None,
        }
    }
}

/// Classify one order string; never fails
pub fn parse_order(order: &str) -> ParsedOrder<'_> {
    let tokens: Vec<&str> = order.split_whitespace().collect();
    match tokens.as_slice() {
        &[_, unit, "H"] => ParsedOrder::Hold { unit },
        &[_, unit, "-" | "R", target] => ParsedOrder::Move { unit, target },
        &[_, unit, "-", target, _] => ParsedOrder::Move { unit, target },
        &[_, unit, "S", _, source] => ParsedOrder::Support {
            unit,
            source,
            target: None,
        },
        &[_, unit, "S", _, source, _, target] => ParsedOrder::Support {
            unit,
            source,
            target: Some(target),
        },
        &[_, unit, "C", _, source, _, target] => ParsedOrder::Convoy { unit, source, target },
        _ => ParsedOrder::Unknown,
    }
}
