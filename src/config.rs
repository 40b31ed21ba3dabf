//! Engine settings
//!
//! Loads [`EngineSettings`] from a JSON file. Every field is optional in the file; missing
//! fields keep their defaults.
//!
//! # File Location
//!
//! An explicit `--config <FILE>` wins. Without it, `engine.json` in the user's configuration
//! directory is used when it exists (e.g. `~/.config/minimax-uci/engine.json`).
//!
//! # Error Handling
//!
//! A file that cannot be read or parsed is logged and replaced by default settings; it
//! never stops the engine from starting.

use crate::error::ConfigResult;
use directories::ProjectDirs;
use rand::rngs::StdRng;
use rand::SeedableRng;
use search_kernel::constants::{
    DEFAULT_MAX_DEPTH, DEFAULT_TIME_BUDGET_SECS, DEFAULT_TRACE_DEPTH, DEMO_FEN,
};
use search_kernel::DeepeningLimits;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};

/// Settings filename
const SETTINGS_FILENAME: &str = "engine.json";

/// Default DOT output of the `draw` mode
pub const DEFAULT_TRACE_OUTPUT: &str = "minimax_tree.dot";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    /// Deepest iteration `go` will start.
    pub max_depth: u32,
    /// Wall-clock budget for `go`, checked between depths.
    pub time_budget_secs: f64,
    /// Seed for the fallback move; `None` draws from the OS.
    pub seed: Option<u64>,
    pub trace_depth: u32,
    pub trace_fen: String,
    pub trace_output: PathBuf,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            time_budget_secs: DEFAULT_TIME_BUDGET_SECS,
            seed: None,
            trace_depth: DEFAULT_TRACE_DEPTH,
            trace_fen: DEMO_FEN.to_string(),
            trace_output: PathBuf::from(DEFAULT_TRACE_OUTPUT),
        }
    }
}

impl EngineSettings {
    pub fn from_json(contents: &str) -> ConfigResult<Self> {
        Ok(serde_json::from_str(contents)?)
    }

    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// Load settings from `path`, or from the default location when `path` is `None`.
    ///
    /// Falls back to [`EngineSettings::default`] on any failure.
    pub fn load(path: Option<&Path>) -> Self {
        let settings_path = match path {
            Some(path) => path.to_path_buf(),
            None => match default_config_path() {
                Some(path) if path.exists() => path,
                _ => {
                    info!("[CONFIG] No settings file found. Using defaults.");
                    return Self::default();
                }
            },
        };

        match Self::from_file(&settings_path) {
            Ok(settings) => {
                info!("[CONFIG] Loaded settings from {:?}", settings_path);
                settings
            }
            Err(e) => {
                warn!(
                    "[CONFIG] Failed to load settings file at {:?}: {}. Using defaults.",
                    settings_path, e
                );
                Self::default()
            }
        }
    }

    /// Search limits for `go`. A negative or non-finite budget counts as zero.
    pub fn limits(&self) -> DeepeningLimits {
        let time_budget = Duration::try_from_secs_f64(self.time_budget_secs).unwrap_or_else(|_| {
            warn!(
                "[CONFIG] Invalid time budget {}s, searching with no time",
                self.time_budget_secs
            );
            Duration::ZERO
        });
        DeepeningLimits::new(self.max_depth, time_budget)
    }

    /// Random source for the fallback move.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }
}

/// `engine.json` in the platform configuration directory, if one can be determined.
pub fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "minimax-uci").map(|dirs| dirs.config_dir().join(SETTINGS_FILENAME))
}
