//! Stance extraction configuration
//!
//! All coefficients of the action-based recurrence are collected here,
//! together with the override switches. Every field has a default, so a
//! TOML file only needs to name the values it changes.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::{Result, StanceError};

/// Configuration for the action-based stance extractor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StanceConfig {
    // === HOSTILITY ===
    /// Penalty per move into one of my held locations
    pub invasion_coef: f64,

    /// Penalty per move contesting a location I also tried to take
    pub conflict_coef: f64,

    /// Penalty per support or convoy of a hostile move
    pub invasive_support_coef: f64,

    /// Penalty per support or convoy of a conflict move
    pub conflict_support_coef: f64,

    // === FRIENDSHIP ===
    /// Reward per support or convoy given to one of my units
    pub friendly_coef: f64,

    /// Reward for an opponent whose armies could have attacked me but did not
    ///
    /// Not accumulated: an opponent earns this once per turn or not at all.
    pub unrealized_coef: f64,

    // === MEMORY ===
    /// Multiplier applied to the previous stance before new signals are added
    ///
    /// At 0.5, a signal loses half its weight every processed turn.
    pub discount_factor: f64,

    // === OVERRIDES ===
    /// Turn every non-negative stance into -1 once the game is past `year_threshold`
    pub end_game_flip: bool,

    /// Last year in which the end-game flip stays dormant
    pub year_threshold: u32,

    /// Force one enemy on any nation that would otherwise trust everyone
    pub random_betrayal: bool,

    /// Seed for the betrayal draw; `None` seeds from system entropy
    pub random_seed: Option<u64>,
}

impl Default for StanceConfig {
    fn default() -> Self {
        Self {
            invasion_coef: 1.0,
            conflict_coef: 0.5,
            invasive_support_coef: 1.0,
            conflict_support_coef: 0.5,
            friendly_coef: 1.0,
            unrealized_coef: 1.0,
            discount_factor: 0.5,
            end_game_flip: true,
            year_threshold: 1918,
            random_betrayal: true,
            random_seed: None,
        }
    }
}

impl StanceConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from TOML text; missing keys keep their defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: StanceConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.random_seed = Some(seed);
        self
    }

    pub fn with_discount(mut self, discount_factor: f64) -> Self {
        self.discount_factor = discount_factor;
        self
    }

    pub fn with_year_threshold(mut self, year: u32) -> Self {
        self.year_threshold = year;
        self
    }

    pub fn without_betrayal(mut self) -> Self {
        self.random_betrayal = false;
        self
    }

    pub fn without_end_game_flip(mut self) -> Self {
        self.end_game_flip = false;
        self
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        let coefficients = [
            ("invasion_coef", self.invasion_coef),
            ("conflict_coef", self.conflict_coef),
            ("invasive_support_coef", self.invasive_support_coef),
            ("conflict_support_coef", self.conflict_support_coef),
            ("friendly_coef", self.friendly_coef),
            ("unrealized_coef", self.unrealized_coef),
        ];
        for (name, value) in coefficients {
            if !value.is_finite() {
                return Err(StanceError::InvalidConfig(format!(
                    "{} must be finite, got {}",
                    name, value
                )));
            }
        }

        if !(0.0..=1.0).contains(&self.discount_factor) {
            return Err(StanceError::InvalidConfig(format!(
                "discount_factor ({}) must lie in [0, 1]",
                self.discount_factor
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = StanceConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.discount_factor, 0.5);
        assert_eq!(config.year_threshold, 1918);
        assert!(config.random_seed.is_none());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = StanceConfig::from_toml_str(
            r#"
            invasion_coef = 2.0
            random_betrayal = false
            random_seed = 7
            "#,
        )
        .unwrap();
        assert_eq!(config.invasion_coef, 2.0);
        assert!(!config.random_betrayal);
        assert_eq!(config.random_seed, Some(7));
        assert_eq!(config.conflict_coef, 0.5);
        assert!(config.end_game_flip);
    }

    #[test]
    fn test_discount_out_of_range_rejected() {
        let result = StanceConfig::from_toml_str("discount_factor = 1.5");
        assert!(matches!(result, Err(StanceError::InvalidConfig(_))));
    }

    #[test]
    fn test_non_finite_coefficient_rejected() {
        let config = StanceConfig {
            friendly_coef: f64::NAN,
            ..StanceConfig::default()
        };
        assert!(matches!(config.validate(), Err(StanceError::InvalidConfig(_))));
    }

    #[test]
    fn test_malformed_toml_is_an_error() {
        let result = StanceConfig::from_toml_str("invasion_coef = \"lots\"");
        assert!(matches!(result, Err(StanceError::Toml(_))));
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("stance_config_{}.toml", std::process::id()));
        fs::write(&path, "year_threshold = 1905\n").unwrap();
        let config = StanceConfig::load(&path).unwrap();
        fs::remove_file(&path).ok();
        assert_eq!(config.year_threshold, 1905);
    }

    #[test]
    fn test_builders() {
        let config = StanceConfig::new()
            .with_seed(3)
            .with_discount(0.25)
            .with_year_threshold(1901)
            .without_betrayal()
            .without_end_game_flip();
        assert_eq!(config.random_seed, Some(3));
        assert_eq!(config.discount_factor, 0.25);
        assert_eq!(config.year_threshold, 1901);
        assert!(!config.random_betrayal);
        assert!(!config.end_game_flip);
    }
}
