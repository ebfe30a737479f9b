//! Configuration System for Heart Field
//! Tunable physics, field layout and visual settings with JSON persistence

use anyhow::Context;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// Validation
// ============================================================================

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("friction must lie strictly between 0 and 1, got {0}")]
    Friction(f32),
    #[error("mouse radius must be positive, got {0}")]
    MouseRadius(f32),
    #[error("reference size must be positive, got {0}")]
    ReferenceSize(f32),
    #[error("return speed must not be negative, got {0}")]
    ReturnSpeed(f32),
    #[error("heart size range {min}..{max} is empty or not positive")]
    SizeRange { min: f32, max: f32 },
}

// ============================================================================
// Field Layout
// ============================================================================

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
#[serde(default)]
pub struct FieldConfig {
    /// Number of hearts created on first load
    pub count: usize,
    /// Smallest glyph size (inclusive)
    pub size_min: f32,
    /// Largest glyph size (exclusive)
    pub size_max: f32,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            count: 500,
            size_min: 36.0,
            size_max: 84.0,
        }
    }
}

// ============================================================================
// Physics
// ============================================================================

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
#[serde(default)]
pub struct PhysicsConfig {
    /// How far the repulsion reaches (px)
    pub mouse_radius: f32,
    /// How hard hearts are pushed away
    pub repulsion_strength: f32,
    /// Spring pull toward home per frame (lower = slower drift)
    pub return_speed: f32,
    /// Velocity damping applied each frame
    pub friction: f32,
    /// Size at which the size factor equals 1
    pub reference_size: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            mouse_radius: 250.0,
            repulsion_strength: 12.0,
            return_speed: 0.00001,
            friction: 0.80,
            reference_size: 60.0,
        }
    }
}

// ============================================================================
// Visual
// ============================================================================

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
#[serde(default)]
pub struct VisualConfig {
    /// Whether the landing page carries a hearts canvas at all
    pub canvas: bool,
    pub background: [u8; 3],
    pub show_stats: bool,
}

impl Default for VisualConfig {
    fn default() -> Self {
        Self {
            canvas: true,
            background: [255, 240, 245],
            show_stats: false,
        }
    }
}

// ============================================================================
// Main App Configuration
// ============================================================================

#[derive(Clone, Serialize, Deserialize, Debug, Default, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub field: FieldConfig,
    #[serde(default)]
    pub physics: PhysicsConfig,
    #[serde(default)]
    pub visual: VisualConfig,
}

impl AppConfig {
    pub fn save(&self, path: &str) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).with_context(|| format!("writing config to {path}"))?;
        Ok(())
    }

    pub fn load(path: &str) -> anyhow::Result<Self> {
        let json =
            std::fs::read_to_string(path).with_context(|| format!("reading config {path}"))?;
        let config: AppConfig =
            serde_json::from_str(&json).with_context(|| format!("parsing config {path}"))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would make the simulation diverge or divide by zero
    pub fn validate(&self) -> Result<(), ConfigError> {
        let physics = &self.physics;
        if !(physics.friction > 0.0 && physics.friction < 1.0) {
            return Err(ConfigError::Friction(physics.friction));
        }
        if !(physics.mouse_radius > 0.0) {
            return Err(ConfigError::MouseRadius(physics.mouse_radius));
        }
        if !(physics.reference_size > 0.0) {
            return Err(ConfigError::ReferenceSize(physics.reference_size));
        }
        if !(physics.return_speed >= 0.0) {
            return Err(ConfigError::ReturnSpeed(physics.return_speed));
        }

        let field = &self.field;
        if !(field.size_min > 0.0 && field.size_min < field.size_max) {
            return Err(ConfigError::SizeRange {
                min: field.size_min,
                max: field.size_max,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults_are_valid() {
        let config = AppConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.field.count, 500);
        assert_eq!(config.physics.mouse_radius, 250.0);
        assert_eq!(config.physics.friction, 0.80);
    }

    #[test]
    fn friction_outside_unit_interval_is_rejected() {
        let mut config = AppConfig::default();
        config.physics.friction = 1.0;
        assert_eq!(config.validate(), Err(ConfigError::Friction(1.0)));

        config.physics.friction = 0.0;
        assert_eq!(config.validate(), Err(ConfigError::Friction(0.0)));
    }

    #[test]
    fn empty_size_range_is_rejected() {
        let mut config = AppConfig::default();
        config.field.size_min = 84.0;
        assert_eq!(
            config.validate(),
            Err(ConfigError::SizeRange {
                min: 84.0,
                max: 84.0
            })
        );
    }

    #[test]
    fn save_then_load_keeps_tuning() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hearts.json");
        let path = path.to_str().unwrap();

        let mut config = AppConfig::default();
        config.field.count = 42;
        config.physics.repulsion_strength = 20.0;
        config.visual.show_stats = true;
        config.save(path).unwrap();

        assert_eq!(AppConfig::load(path).unwrap(), config);
    }

    #[test]
    fn partial_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("partial.json");
        std::fs::write(&path, r#"{ "physics": { "friction": 0.5 } }"#).unwrap();

        let config = AppConfig::load(path.to_str().unwrap()).unwrap();
        assert_eq!(config.physics.friction, 0.5);
        assert_eq!(config.physics.mouse_radius, 250.0);
        assert_eq!(config.field, FieldConfig::default());
    }

    #[test]
    fn invalid_file_fails_to_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, r#"{ "physics": { "friction": 1.5 } }"#).unwrap();

        assert!(AppConfig::load(path.to_str().unwrap()).is_err());
    }
}
