//! Fireworks settings
//!
//! Spawn policy and physics constants for the field. Stored as JSON
//! (LocalStorage on web, an optional file natively) and validated before a
//! field is built from them.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::{GRAVITY, SPAWN_INTERVAL_FRAMES, SPAWN_PROBABILITY, TRAIL_ALPHA};

/// Settings loading/validation error
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// Gravity has to pull rockets back down or they never reach their apex
    #[error("gravity must be finite and point down the canvas (+y), got ({x}, {y})")]
    Gravity { x: f32, y: f32 },
    #[error("spawn interval must be at least one frame")]
    SpawnInterval,
    #[error("spawn probability must be within [0, 1], got {0}")]
    SpawnProbability(f32),
    #[error("trail alpha must be within [0.01, 1], got {0}")]
    TrailAlpha(f32),
    /// JSON parsing error
    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),
    /// File I/O error
    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),
}

/// Slowest allowed trail fade; fainter fades would need very long trails
pub const MIN_TRAIL_ALPHA: f32 = 0.01;

/// Physics and spawn policy for a fireworks field
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    /// Constant acceleration applied to every particle each tick
    pub gravity: [f32; 2],
    /// Frames between spawn attempts
    pub spawn_interval: u64,
    /// Chance that a spawn attempt launches a firework
    pub spawn_probability: f32,
    /// Alpha of the background fade that leaves trails, at least
    /// `MIN_TRAIL_ALPHA`
    pub trail_alpha: f32,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            spawn_interval: SPAWN_INTERVAL_FRAMES,
            spawn_probability: SPAWN_PROBABILITY,
            trail_alpha: TRAIL_ALPHA,
        }
    }
}

impl FieldConfig {
    pub fn gravity(&self) -> Vec2 {
        Vec2::from(self.gravity)
    }

    /// Reject configurations that would stall rockets or never spawn sanely
    pub fn validate(&self) -> Result<(), ConfigError> {
        let [x, y] = self.gravity;
        if !x.is_finite() || !y.is_finite() || y <= 0.0 {
            return Err(ConfigError::Gravity { x, y });
        }
        if self.spawn_interval == 0 {
            return Err(ConfigError::SpawnInterval);
        }
        if !(0.0..=1.0).contains(&self.spawn_probability) {
            return Err(ConfigError::SpawnProbability(self.spawn_probability));
        }
        if !(MIN_TRAIL_ALPHA..=1.0).contains(&self.trail_alpha) {
            return Err(ConfigError::TrailAlpha(self.trail_alpha));
        }
        Ok(())
    }
}

/// App settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub field: FieldConfig,
    /// Fixed RNG seed for reproducible displays (random when absent)
    pub seed: Option<u64>,
}

impl Settings {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "score_fireworks_settings";

    /// Parse and validate settings JSON. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.field.validate()?;
        Ok(settings)
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_file(path: &std::path::Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring stored settings: {}", e),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = FieldConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.gravity(), Vec2::new(0.0, 0.2));
        assert_eq!(config.spawn_interval, 20);
    }

    #[test]
    fn test_rejects_zero_and_upward_gravity() {
        for gravity in [[0.0, 0.0], [0.0, -0.2], [0.0, f32::NAN], [f32::INFINITY, 0.2]] {
            let config = FieldConfig {
                gravity,
                ..Default::default()
            };
            assert!(matches!(config.validate(), Err(ConfigError::Gravity { .. })));
        }
    }

    #[test]
    fn test_rejects_bad_policy() {
        let interval = FieldConfig {
            spawn_interval: 0,
            ..Default::default()
        };
        assert!(matches!(interval.validate(), Err(ConfigError::SpawnInterval)));

        let probability = FieldConfig {
            spawn_probability: 1.5,
            ..Default::default()
        };
        assert!(matches!(
            probability.validate(),
            Err(ConfigError::SpawnProbability(_))
        ));

        for trail_alpha in [0.0, 0.001, 1.5, f32::NAN] {
            let trail = FieldConfig {
                trail_alpha,
                ..Default::default()
            };
            assert!(matches!(trail.validate(), Err(ConfigError::TrailAlpha(_))));
        }
        let slowest = FieldConfig {
            trail_alpha: MIN_TRAIL_ALPHA,
            ..Default::default()
        };
        assert!(slowest.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings = Settings::from_json(r#"{"field": {"spawn_probability": 1.0}, "seed": 7}"#)
            .expect("valid settings");
        assert_eq!(settings.seed, Some(7));
        assert_eq!(settings.field.spawn_probability, 1.0);
        assert_eq!(settings.field.spawn_interval, SPAWN_INTERVAL_FRAMES);
    }

    #[test]
    fn test_invalid_json_settings() {
        assert!(matches!(
            Settings::from_json("{not json"),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            Settings::from_json(r#"{"field": {"gravity": [0.0, -1.0]}}"#),
            Err(ConfigError::Gravity { .. })
        ));
    }
}
