//! Runtime configuration from `TILEFLIP_*` environment variables.

use std::path::PathBuf;

use crate::types::{DEFAULT_MAX_TILES, DEFAULT_SCORE_FILE, SETTLE_DELAY_MS};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    /// Parameter pairs whose product reaches this are rejected.
    pub max_tiles: u32,
    pub settle_ms: u32,
    pub score_path: PathBuf,
    /// Keep scores in memory only.
    pub scores_disabled: bool,
    /// Fixed board seed; random when unset.
    pub seed: Option<u64>,
    pub skip_intro: bool,
    pub log_path: Option<String>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            max_tiles: DEFAULT_MAX_TILES,
            settle_ms: SETTLE_DELAY_MS,
            score_path: PathBuf::from(DEFAULT_SCORE_FILE),
            scores_disabled: false,
            seed: None,
            skip_intro: false,
            log_path: None,
        }
    }
}

impl GameConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source. Unparseable values fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let text = |key: &str| {
            lookup(key)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };

        let max_tiles = text("TILEFLIP_MAX_TILES")
            .and_then(|s| s.parse().ok())
            .filter(|&n: &u32| n > 0)
            .unwrap_or(defaults.max_tiles);

        let settle_ms = text("TILEFLIP_SETTLE_MS")
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.settle_ms);

        let score_path = text("TILEFLIP_SCORE_PATH")
            .map(PathBuf::from)
            .unwrap_or(defaults.score_path);

        Self {
            max_tiles,
            settle_ms,
            score_path,
            scores_disabled: text("TILEFLIP_SCORES_DISABLED").is_some_and(|s| is_truthy(&s)),
            seed: text("TILEFLIP_SEED").and_then(|s| s.parse().ok()),
            skip_intro: text("TILEFLIP_SKIP_INTRO").is_some_and(|s| is_truthy(&s)),
            log_path: text("TILEFLIP_LOG_PATH"),
        }
    }
}

fn is_truthy(s: &str) -> bool {
    matches!(s.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on")
}
