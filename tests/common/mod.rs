//! Shared fixtures: a 1901-1902 opening on the standard map

#![allow(dead_code)]

use stance_vector::core::types::Nation;
use stance_vector::game::{AdjacencyMap, PhaseSnapshot, RecordedGame};

/// Seven powers, two years: France is attacked by Germany and supported by England
pub fn opening_game() -> RecordedGame {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/data/opening_1901_1902.json");
    RecordedGame::load(path).expect("opening fixture loads")
}

pub const POWERS: [&str; 7] = [
    "AUSTRIA", "ENGLAND", "FRANCE", "GERMANY", "ITALY", "RUSSIA", "TURKEY",
];

pub fn roster() -> Vec<Nation> {
    POWERS.into_iter().map(Nation::from).collect()
}

/// Army adjacency around France and the Low Countries
pub fn western_armies() -> AdjacencyMap {
    AdjacencyMap::from_army_edges(&[
        ("BRE", "PIC"),
        ("BRE", "PAR"),
        ("BRE", "GAS"),
        ("PAR", "PIC"),
        ("PAR", "BUR"),
        ("PAR", "GAS"),
        ("MAR", "GAS"),
        ("MAR", "BUR"),
        ("PIC", "BUR"),
        ("PIC", "BEL"),
        ("GAS", "BUR"),
        ("BUR", "BEL"),
        ("BUR", "RUH"),
        ("BUR", "MUN"),
        ("BEL", "HOL"),
        ("BEL", "RUH"),
        ("RUH", "MUN"),
    ])
}

/// Three-power game with a single movement phase
pub fn skirmish(france: &[&str], england: &[&str], germany: &[&str]) -> RecordedGame {
    let powers = ["ENGLAND", "FRANCE", "GERMANY"]
        .into_iter()
        .map(Nation::from)
        .collect();
    let mut game = RecordedGame::new(powers, western_armies());
    game.push_phase(
        PhaseSnapshot::new("S1901M")
            .with_units("FRANCE", &["A PAR", "A MAR", "F BRE"])
            .with_units("ENGLAND", &["A BEL", "F ENG"])
            .with_units("GERMANY", &["A MUN", "A BUR"])
            .with_centers("FRANCE", &["BRE", "MAR", "PAR"])
            .with_centers("ENGLAND", &["BEL", "LON"])
            .with_centers("GERMANY", &["MUN"])
            .with_orders("FRANCE", france)
            .with_orders("ENGLAND", england)
            .with_orders("GERMANY", germany),
    );
    game
}

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}
