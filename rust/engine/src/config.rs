//! Table settings for the hand engine.
//!
//! Values resolve in order: built-in defaults, then the TOML file named by
//! `HOLDEM_CONFIG`, then the `HOLDEM_SEED`, `HOLDEM_SMALL_BLIND` and
//! `HOLDEM_BIG_BLIND` environment variables.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::player::STARTING_STACK;

pub const CONFIG_ENV: &str = "HOLDEM_CONFIG";
pub const SEED_ENV: &str = "HOLDEM_SEED";
pub const SMALL_BLIND_ENV: &str = "HOLDEM_SMALL_BLIND";
pub const BIG_BLIND_ENV: &str = "HOLDEM_BIG_BLIND";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TableConfig {
    pub small_blind: u32,
    pub big_blind: u32,
    pub starting_stack: u32,
    /// Deck shuffle seed; `None` picks a fixed default
    pub seed: Option<u64>,
    /// Burn one card before the flop, turn and river
    pub burn_cards: bool,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            small_blind: 10,
            big_blind: 20,
            starting_stack: STARTING_STACK,
            seed: None,
            burn_cards: true,
        }
    }
}

impl TableConfig {
    pub fn with_blinds(small_blind: u32, big_blind: u32) -> Self {
        Self {
            small_blind,
            big_blind,
            ..Self::default()
        }
    }

    /// Parses a TOML document; missing keys keep their defaults.
    ///
    /// ```
    /// use holdem_engine::config::TableConfig;
    ///
    /// let cfg = TableConfig::from_toml_str("big_blind = 50\nsmall_blind = 25").unwrap();
    /// assert_eq!((cfg.small_blind, cfg.big_blind), (25, 50));
    /// assert!(cfg.burn_cards);
    /// ```
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let cfg: TableConfig = toml::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let s = fs::read_to_string(path)?;
        Self::from_toml_str(&s)
    }

    /// Resolves defaults, the optional config file and env overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let mut cfg = match std::env::var(CONFIG_ENV) {
            Ok(path) if !path.is_empty() => Self::load_from_path(path)?,
            _ => Self::default(),
        };
        cfg.apply_env_overrides(|key| std::env::var(key).ok())?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Applies overrides from a key lookup, normally the process environment.
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup(SEED_ENV).filter(|v| !v.is_empty()) {
            self.seed = Some(parse_number(SEED_ENV, &v)?);
        }
        if let Some(v) = lookup(SMALL_BLIND_ENV).filter(|v| !v.is_empty()) {
            self.small_blind = parse_number(SMALL_BLIND_ENV, &v)?;
        }
        if let Some(v) = lookup(BIG_BLIND_ENV).filter(|v| !v.is_empty()) {
            self.big_blind = parse_number(BIG_BLIND_ENV, &v)?;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.big_blind == 0 {
            return Err(ConfigError::Invalid("big_blind must be positive".into()));
        }
        if self.small_blind > self.big_blind {
            return Err(ConfigError::Invalid(format!(
                "small_blind {} exceeds big_blind {}",
                self.small_blind, self.big_blind
            )));
        }
        if self.starting_stack == 0 {
            return Err(ConfigError::Invalid("starting_stack must be positive".into()));
        }
        Ok(())
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::Invalid(format!("{key} is not a number: {value:?}")))
}
