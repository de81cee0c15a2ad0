//! Data-driven game balance
//!
//! Every gameplay constant lives here so a JSON file can override it. Missing
//! fields fall back to the values in [`crate::consts`].

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Largest play field side accepted from a config file
pub const MAX_PLAY_EXTENT: f32 = 4096.0;

/// Errors raised while loading configuration files
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// A static wall placed into every level
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WallSpec {
    /// Centre x
    pub x: f32,
    /// Centre y
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl WallSpec {
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }
}

/// Gameplay tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub play_width: f32,
    pub play_height: f32,

    pub vehicle_width: f32,
    pub vehicle_height: f32,
    /// Units per second at full throttle
    pub vehicle_speed: f32,
    /// Degrees per tick
    pub steer_rate: f32,
    pub throttle_rate: f32,
    pub throttle_gravity: f32,

    pub goal_size: f32,

    pub intro_seconds: f32,
    pub go_time_budget: f32,
    pub loss_grace_seconds: f32,
    pub outro_seconds: f32,
    pub spawn_inset: f32,

    pub walls: Vec<WallSpec>,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            play_width: PLAY_WIDTH,
            play_height: PLAY_HEIGHT,
            vehicle_width: VEHICLE_WIDTH,
            vehicle_height: VEHICLE_HEIGHT,
            vehicle_speed: VEHICLE_SPEED,
            steer_rate: STEER_RATE,
            throttle_rate: THROTTLE_RATE,
            throttle_gravity: THROTTLE_GRAVITY,
            goal_size: GOAL_SIZE,
            intro_seconds: INTRO_SECONDS,
            go_time_budget: GO_TIME_BUDGET,
            loss_grace_seconds: LOSS_GRACE_SECONDS,
            outro_seconds: OUTRO_SECONDS,
            spawn_inset: SPAWN_INSET,
            walls: Vec::new(),
        }
    }
}

impl Tuning {
    /// Parse and validate tuning from JSON
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Read tuning from a JSON file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Read tuning from `path` if given, falling back to defaults on any error
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            log::info!("Using default tuning");
            return Self::default();
        };

        match Self::load(path) {
            Ok(tuning) => {
                log::info!("Loaded tuning from {}", path.display());
                tuning
            }
            Err(e) => {
                log::warn!("Ignoring tuning file {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Reject values the simulation can't work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("play_width", self.play_width),
            ("play_height", self.play_height),
            ("vehicle_width", self.vehicle_width),
            ("vehicle_height", self.vehicle_height),
            ("vehicle_speed", self.vehicle_speed),
            ("throttle_rate", self.throttle_rate),
            ("throttle_gravity", self.throttle_gravity),
            ("goal_size", self.goal_size),
            ("go_time_budget", self.go_time_budget),
        ];
        for (name, value) in positive {
            if !(value > 0.0) {
                return Err(ConfigError::Invalid(format!("{name} must be positive, got {value}")));
            }
        }

        let non_negative = [
            ("steer_rate", self.steer_rate),
            ("intro_seconds", self.intro_seconds),
            ("loss_grace_seconds", self.loss_grace_seconds),
            ("outro_seconds", self.outro_seconds),
            ("spawn_inset", self.spawn_inset),
        ];
        for (name, value) in non_negative {
            if !(value >= 0.0) {
                return Err(ConfigError::Invalid(format!("{name} must not be negative, got {value}")));
            }
        }

        if self.loss_grace_seconds >= self.go_time_budget {
            return Err(ConfigError::Invalid(format!(
                "loss_grace_seconds ({}) must be shorter than go_time_budget ({})",
                self.loss_grace_seconds, self.go_time_budget
            )));
        }
        if self.play_width > MAX_PLAY_EXTENT || self.play_height > MAX_PLAY_EXTENT {
            return Err(ConfigError::Invalid(format!(
                "play field {}x{} exceeds {MAX_PLAY_EXTENT} per side",
                self.play_width, self.play_height
            )));
        }

        let shortest_side = self.play_width.min(self.play_height);
        let sized = [
            ("vehicle_width", self.vehicle_width),
            ("vehicle_height", self.vehicle_height),
            ("goal_size", self.goal_size),
        ];
        for (name, value) in sized {
            if value > shortest_side {
                return Err(ConfigError::Invalid(format!(
                    "{name} ({value}) does not fit on a {}x{} field",
                    self.play_width, self.play_height
                )));
            }
        }

        // A courier spawned closer to the border than its own reach starts
        // partly outside the field and can never make a legal move
        let min_inset = 0.5 * self.vehicle_width.hypot(self.vehicle_height);
        if self.spawn_inset < min_inset {
            return Err(ConfigError::Invalid(format!(
                "spawn_inset ({}) must be at least {min_inset:.2} for a {}x{} vehicle",
                self.spawn_inset, self.vehicle_width, self.vehicle_height
            )));
        }
        if self.spawn_inset * 2.0 > shortest_side {
            return Err(ConfigError::Invalid(format!(
                "spawn_inset ({}) leaves no room on a {}x{} field",
                self.spawn_inset, self.play_width, self.play_height
            )));
        }

        for wall in &self.walls {
            if !(wall.width > 0.0 && wall.height > 0.0) {
                return Err(ConfigError::Invalid(format!(
                    "wall at ({}, {}) needs a positive size",
                    wall.x, wall.y
                )));
            }
            if wall.width > self.play_width || wall.height > self.play_height {
                return Err(ConfigError::Invalid(format!(
                    "wall at ({}, {}) is {}x{}, larger than the {}x{} field",
                    wall.x, wall.y, wall.width, wall.height, self.play_width, self.play_height
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Tuning::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json_str(r#"{ "go_time_budget": 8.0 }"#).unwrap();
        assert_eq!(tuning.go_time_budget, 8.0);
        assert_eq!(tuning.vehicle_speed, VEHICLE_SPEED);
        assert!(tuning.walls.is_empty());
    }

    #[test]
    fn test_walls_parse() {
        let json = r#"{ "walls": [ { "x": 300, "y": 300, "width": 40, "height": 200 } ] }"#;
        let tuning = Tuning::from_json_str(json).unwrap();
        assert_eq!(tuning.walls.len(), 1);
        assert_eq!(tuning.walls[0].size(), Vec2::new(40.0, 200.0));
    }

    #[test]
    fn test_grace_longer_than_budget_is_rejected() {
        let err = Tuning::from_json_str(r#"{ "go_time_budget": 1.0, "loss_grace_seconds": 2.0 }"#)
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_non_positive_speed_is_rejected() {
        let err = Tuning::from_json_str(r#"{ "vehicle_speed": 0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_spawn_inset_must_clear_the_vehicle() {
        let err = Tuning::from_json_str(r#"{ "spawn_inset": 0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        // Half the diagonal of a 10x20 courier is about 11.18
        assert!(Tuning::from_json_str(r#"{ "spawn_inset": 11 }"#).is_err());
        assert!(Tuning::from_json_str(r#"{ "spawn_inset": 12 }"#).is_ok());
    }

    #[test]
    fn test_oversized_wall_is_rejected() {
        let json = r#"{ "walls": [ { "x": 0, "y": 0, "width": 70000, "height": 70000 } ] }"#;
        let err = Tuning::from_json_str(json).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_oversized_field_and_vehicle_are_rejected() {
        assert!(Tuning::from_json_str(r#"{ "play_width": 100000 }"#).is_err());
        assert!(Tuning::from_json_str(r#"{ "vehicle_height": 700 }"#).is_err());
        assert!(Tuning::from_json_str(r#"{ "goal_size": 601 }"#).is_err());
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let err = Tuning::from_json_str("{ nope").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_file_falls_back_to_default() {
        let tuning = Tuning::load_or_default(Some(Path::new("/definitely/not/here.json")));
        assert_eq!(tuning, Tuning::default());
    }
}
