//! Player preferences
//!
//! Kept apart from [`crate::Tuning`]: settings change how the game is
//! controlled and shown, never how it plays.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::input::KeyBindings;
use crate::tuning::ConfigError;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub bindings: KeyBindings,

    // === HUD ===
    /// Show the countdown
    pub show_timer: bool,
    /// Show level and score
    pub show_score: bool,
    /// Show how many ghosts are still replaying
    pub show_ghost_count: bool,
    /// Draw completed-goal markers
    pub show_dead_goals: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bindings: KeyBindings::default(),
            show_timer: true,
            show_score: true,
            show_ghost_count: false,
            show_dead_goals: true,
        }
    }
}

impl Settings {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let settings: Settings = serde_json::from_str(json)?;
        let b = &settings.bindings;
        if b.confirm.is_empty() || b.reset.is_empty() {
            return Err(ConfigError::Invalid(
                "confirm and reset each need at least one key".to_string(),
            ));
        }
        Ok(settings)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Load settings from `path` if given, otherwise (or on error) defaults
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            log::info!("Using default settings");
            return Self::default();
        };

        match Self::load(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Ignoring settings file {}: {}", path.display(), e);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Key;

    #[test]
    fn test_partial_settings_keep_defaults() {
        let settings = Settings::from_json_str(r#"{ "show_timer": false }"#).unwrap();
        assert!(!settings.show_timer);
        assert!(settings.show_score);
        assert_eq!(settings.bindings, KeyBindings::default());
    }

    #[test]
    fn test_custom_bindings() {
        let settings =
            Settings::from_json_str(r#"{ "bindings": { "reset": ["Enter"] } }"#).unwrap();
        assert_eq!(settings.bindings.reset, vec![Key::Enter]);
        assert_eq!(settings.bindings.up, vec![Key::Up, Key::W]);
    }

    #[test]
    fn test_unbound_confirm_is_rejected() {
        let err = Settings::from_json_str(r#"{ "bindings": { "confirm": [] } }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }
}
