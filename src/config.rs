//! Runtime configuration from environment variables.
//!
//! | variable            | default                 |
//! |---------------------|-------------------------|
//! | `TETRIS_SEED`       | system clock            |
//! | `TETRIS_PIECE_RULE` | `uniform` (or `bag7`)   |
//! | `TETRIS_DAS_MS`     | 150                     |
//! | `TETRIS_ARR_MS`     | 50                      |
//! | `TETRIS_LOG_DIR`    | `<temp>/classic-tetris` |
//!
//! Bad values fall back to the default. They are collected in
//! [`Config::warnings`] because the logger is configured from this struct
//! and cannot report them yet.

use std::env;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::core::PieceRule;
use crate::types::{DEFAULT_ARR_MS, DEFAULT_DAS_MS};

pub const SEED_VAR: &str = "TETRIS_SEED";
pub const PIECE_RULE_VAR: &str = "TETRIS_PIECE_RULE";
pub const DAS_VAR: &str = "TETRIS_DAS_MS";
pub const ARR_VAR: &str = "TETRIS_ARR_MS";
pub const LOG_DIR_VAR: &str = "TETRIS_LOG_DIR";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Fixed seed; `None` means seed from the clock.
    pub seed: Option<u32>,
    pub piece_rule: PieceRule,
    pub das_ms: u32,
    pub arr_ms: u32,
    pub log_dir: PathBuf,
    /// Human-readable notes about ignored values.
    pub warnings: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seed: None,
            piece_rule: PieceRule::default(),
            das_ms: DEFAULT_DAS_MS,
            arr_ms: DEFAULT_ARR_MS,
            log_dir: default_log_dir(),
            warnings: Vec::new(),
        }
    }
}

fn default_log_dir() -> PathBuf {
    env::temp_dir().join("classic-tetris")
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut cfg = Self::default();

        if let Some(raw) = lookup(SEED_VAR) {
            match raw.trim().parse::<u32>() {
                Ok(seed) => cfg.seed = Some(seed),
                Err(_) => cfg.warn(SEED_VAR, &raw),
            }
        }

        if let Some(raw) = lookup(PIECE_RULE_VAR) {
            match PieceRule::from_str(&raw) {
                Some(rule) => cfg.piece_rule = rule,
                None => cfg.warn(PIECE_RULE_VAR, &raw),
            }
        }

        if let Some(raw) = lookup(DAS_VAR) {
            match raw.trim().parse::<u32>() {
                Ok(ms) => cfg.das_ms = ms,
                Err(_) => cfg.warn(DAS_VAR, &raw),
            }
        }

        if let Some(raw) = lookup(ARR_VAR) {
            match raw.trim().parse::<u32>() {
                Ok(ms) if ms > 0 => cfg.arr_ms = ms,
                _ => cfg.warn(ARR_VAR, &raw),
            }
        }

        if let Some(raw) = lookup(LOG_DIR_VAR) {
            if raw.trim().is_empty() {
                cfg.warn(LOG_DIR_VAR, &raw);
            } else {
                cfg.log_dir = PathBuf::from(raw);
            }
        }

        cfg
    }

    fn warn(&mut self, key: &str, raw: &str) {
        self.warnings
            .push(format!("ignoring {key}={raw:?}, using default"));
    }

    /// The configured seed, or one derived from the system clock.
    pub fn resolve_seed(&self) -> u32 {
        self.seed.unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.subsec_nanos() ^ (d.as_secs() as u32))
                .unwrap_or(1)
        })
    }
}
