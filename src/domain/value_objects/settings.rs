//! Draw settings value object
//!
//! Timing and validation knobs for a draw cycle. Defaults follow the shipped
//! Tết edition: two 2.5 s horse laps, an 80 ms shuffle tick and a new loading
//! line every 3.5 s.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::YearBounds;

/// What to do when the interpretation request fails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FallbackPolicy {
    /// Surface an error and return to input
    Strict,
    /// Substitute the canned reading and show a result anyway
    #[default]
    Lenient,
}

impl std::str::FromStr for FallbackPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strict" => Ok(Self::Strict),
            "lenient" => Ok(Self::Lenient),
            other => Err(format!("unknown fallback policy: {}", other)),
        }
    }
}

/// All configurable draw settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DrawSettings {
    // Validation
    pub min_year: i32,
    pub max_year: i32,

    // Ceremony
    pub ceremony_laps: u32,
    pub lap_duration_ms: u64,
    pub shuffle_tick_ms: u64,
    pub loading_message_interval_ms: u64,
    pub shuffle_enabled: bool,

    // Failure handling
    pub fallback_policy: FallbackPolicy,
}

impl Default for DrawSettings {
    fn default() -> Self {
        Self {
            min_year: 1920,
            max_year: 2025,
            ceremony_laps: 2,
            lap_duration_ms: 2500,
            shuffle_tick_ms: 80,
            loading_message_interval_ms: 3500,
            shuffle_enabled: false,
            fallback_policy: FallbackPolicy::Lenient,
        }
    }
}

impl DrawSettings {
    /// Load from environment variables, using defaults for missing values
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            min_year: env_or("FORTUNE_MIN_YEAR", defaults.min_year),
            max_year: env_or("FORTUNE_MAX_YEAR", defaults.max_year),
            ceremony_laps: env_or("FORTUNE_CEREMONY_LAPS", defaults.ceremony_laps),
            lap_duration_ms: env_or("FORTUNE_LAP_DURATION_MS", defaults.lap_duration_ms),
            shuffle_tick_ms: env_or("FORTUNE_SHUFFLE_TICK_MS", defaults.shuffle_tick_ms),
            loading_message_interval_ms: env_or("FORTUNE_LOADING_MESSAGE_MS", defaults.loading_message_interval_ms),
            shuffle_enabled: env_or("FORTUNE_SHUFFLE_ENABLED", defaults.shuffle_enabled),
            fallback_policy: env_or("FORTUNE_FALLBACK_POLICY", defaults.fallback_policy),
        }
    }

    pub fn year_bounds(&self) -> YearBounds {
        YearBounds {
            min: self.min_year,
            max: self.max_year,
        }
    }

    /// Minimum time the ceremony occupies, independent of backend latency
    pub fn ceremony_duration(&self) -> Duration {
        Duration::from_millis(self.lap_duration_ms * u64::from(self.ceremony_laps))
    }

    pub fn lap_duration(&self) -> Duration {
        Duration::from_millis(self.lap_duration_ms)
    }

    pub fn shuffle_tick(&self) -> Duration {
        Duration::from_millis(self.shuffle_tick_ms.max(1))
    }

    pub fn loading_message_interval(&self) -> Duration {
        Duration::from_millis(self.loading_message_interval_ms.max(1))
    }
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key).ok().and_then(|v| v.parse().ok()).unwrap_or(default)
}
