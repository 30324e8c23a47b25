//! Game settings and tuning
//!
//! Every gameplay constant is data-driven so a host can reshape the screen
//! or retune speeds without touching the simulation. Loaded from JSON;
//! missing fields fall back to [`crate::consts`].

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::Layout;

/// Errors raised while loading or validating settings
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read settings file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("settings JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid settings: {0}")]
    Invalid(String),
}

/// Tunable game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Screen ===
    pub screen_width: f32,
    pub screen_height: f32,

    // === Geometry ===
    pub avatar_size: f32,
    pub obstacle_width: f32,
    pub obstacle_height: f32,
    /// Obstacle top sits this far above the avatar top
    pub obstacle_rise: f32,

    // === Motion ===
    pub base_speed: f32,
    pub slow_speed: f32,
    pub recycle_jitter: f32,
    pub shield_knockback: f32,

    // === Timing ===
    pub tick_period_ms: u64,
    pub slow_time_ms: u64,

    // === Economy ===
    pub coin_interval: u64,
    pub shield_cost: u32,

    /// RNG seed for recycle spacing (None = draw from OS entropy)
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,

            avatar_size: AVATAR_SIZE,
            obstacle_width: OBSTACLE_WIDTH,
            obstacle_height: OBSTACLE_HEIGHT,
            obstacle_rise: OBSTACLE_RISE,

            base_speed: BASE_SPEED,
            slow_speed: SLOW_SPEED,
            recycle_jitter: RECYCLE_JITTER,
            shield_knockback: SHIELD_KNOCKBACK,

            tick_period_ms: TICK_PERIOD_MS,
            slow_time_ms: SLOW_TIME_MS,

            coin_interval: COIN_INTERVAL,
            shield_cost: SHIELD_COST,

            seed: None,
        }
    }
}

impl Settings {
    /// Load settings from a JSON file and validate them
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Parse and validate settings from a JSON string
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reject tunings the simulation cannot honor
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("screen_width", self.screen_width),
            ("screen_height", self.screen_height),
            ("avatar_size", self.avatar_size),
            ("obstacle_width", self.obstacle_width),
            ("obstacle_height", self.obstacle_height),
            ("base_speed", self.base_speed),
            ("slow_speed", self.slow_speed),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::Invalid(format!("{name} must be positive, got {value}")));
            }
        }

        if self.slow_speed > self.base_speed {
            return Err(ConfigError::Invalid(format!(
                "slow_speed ({}) exceeds base_speed ({})",
                self.slow_speed, self.base_speed
            )));
        }
        let offsets = [
            ("recycle_jitter", self.recycle_jitter),
            ("shield_knockback", self.shield_knockback),
        ];
        for (name, value) in offsets {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be finite and non-negative, got {value}"
                )));
            }
        }
        if self.tick_period_ms == 0 || self.slow_time_ms == 0 {
            return Err(ConfigError::Invalid("timer periods must be non-zero".into()));
        }
        if self.coin_interval == 0 {
            return Err(ConfigError::Invalid("coin_interval must be non-zero".into()));
        }

        // Recycled obstacles respawn at or beyond the right edge; the avatar
        // must sit strictly left of it or a respawn could land on it.
        let layout = self.layout();
        if layout.avatar.max.x >= self.screen_width {
            return Err(ConfigError::Invalid(format!(
                "avatar (right edge {}) does not fit on a {} wide screen",
                layout.avatar.max.x, self.screen_width
            )));
        }

        Ok(())
    }

    /// Static geometry derived from these settings
    pub fn layout(&self) -> Layout {
        Layout::from_settings(self)
    }

    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_period_ms)
    }

    pub fn slow_time_duration(&self) -> Duration {
        Duration::from_millis(self.slow_time_ms)
    }

    /// Obstacle speed per tick for the current slow-time state
    pub fn obstacle_speed(&self, slow_time_active: bool) -> f32 {
        if slow_time_active {
            self.slow_speed
        } else {
            self.base_speed
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.obstacle_speed(false), 4.0);
        assert_eq!(settings.obstacle_speed(true), 2.0);
        assert_eq!(settings.tick_period(), Duration::from_millis(16));
        assert_eq!(settings.slow_time_duration(), Duration::from_millis(3000));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings = Settings::from_json(r#"{ "screen_width": 600.0, "seed": 7 }"#).unwrap();
        assert_eq!(settings.screen_width, 600.0);
        assert_eq!(settings.seed, Some(7));
        assert_eq!(settings.coin_interval, COIN_INTERVAL);
    }

    #[test]
    fn test_rejects_bad_json() {
        let err = Settings::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_rejects_avatar_off_screen() {
        let settings = Settings {
            screen_width: 30.0,
            ..Default::default()
        };
        assert!(matches!(settings.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_rejects_zero_coin_interval() {
        let settings = Settings {
            coin_interval: 0,
            ..Default::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_rejects_fast_slow_time() {
        let settings = Settings {
            slow_speed: 8.0,
            ..Default::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_rejects_non_finite_offsets() {
        let jitter = Settings {
            recycle_jitter: f32::INFINITY,
            ..Default::default()
        };
        assert!(matches!(jitter.validate(), Err(ConfigError::Invalid(_))));

        let knockback = Settings {
            shield_knockback: f32::INFINITY,
            ..Default::default()
        };
        assert!(matches!(knockback.validate(), Err(ConfigError::Invalid(_))));

        let nan = Settings {
            recycle_jitter: f32::NAN,
            ..Default::default()
        };
        assert!(nan.validate().is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let err = Settings::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
