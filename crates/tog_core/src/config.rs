//! # Tracker Configuration
//!
//! Match shape and roster limits, loadable from YAML or JSON.
//!
//! ```rust
//! use tog_core::config::TrackerConfig;
//!
//! let config = TrackerConfig::default();
//! assert_eq!(config.quarters, 4);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{Result, TrackerError};

/// Roster size accepted by the settings page.
pub const DEFAULT_MAX_ROSTER: usize = 25;
/// Periods per match.
pub const DEFAULT_QUARTERS: u8 = 4;
/// Live display refresh interval.
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 1000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackerConfig {
    /// Names past this count are dropped (default: 25)
    #[serde(default = "default_max_roster")]
    pub max_roster: usize,
    /// Number of periods; the last one finishes the match (default: 4)
    #[serde(default = "default_quarters")]
    pub quarters: u8,
    /// Live tick period while a quarter runs (default: 1000ms, at most 1000ms)
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,
    /// Roster a fresh tracker starts with
    #[serde(default = "default_roster")]
    pub default_roster: Vec<String>,
}

fn default_max_roster() -> usize {
    DEFAULT_MAX_ROSTER
}

fn default_quarters() -> u8 {
    DEFAULT_QUARTERS
}

fn default_tick_interval_ms() -> u64 {
    DEFAULT_TICK_INTERVAL_MS
}

fn default_roster() -> Vec<String> {
    (1..=4).map(|i| format!("Player Name {}", i)).collect()
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            max_roster: DEFAULT_MAX_ROSTER,
            quarters: DEFAULT_QUARTERS,
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            default_roster: default_roster(),
        }
    }
}

impl TrackerConfig {
    /// Two periods instead of four
    pub fn halves() -> Self {
        let mut cfg = Self::default();
        cfg.quarters = 2;
        cfg
    }

    pub fn from_yaml_str(text: &str) -> Result<Self> {
        let cfg: Self = serde_yaml::from_str(text)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        let cfg: Self = serde_json::from_str(text)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        if self.quarters == 0 {
            return Err(TrackerError::InvalidConfig("quarters must be at least 1".into()));
        }
        if self.max_roster == 0 {
            return Err(TrackerError::InvalidConfig("max_roster must be at least 1".into()));
        }
        if self.tick_interval_ms == 0 || self.tick_interval_ms > 1000 {
            return Err(TrackerError::InvalidConfig(format!(
                "tick_interval_ms must be within 1..=1000, got {}",
                self.tick_interval_ms
            )));
        }
        Ok(())
    }

    pub fn tick_interval_secs(&self) -> f64 {
        self.tick_interval_ms as f64 / 1000.0
    }
}
