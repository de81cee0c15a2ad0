//! Ghost Courier - a top-down delivery arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, route replay, level flow)
//! - `scene`: Title/Game scene dispatch
//! - `input`: Key bindings and per-tick intents
//! - `renderer`: Stateless render description handed to a drawing backend
//! - `tuning`: Data-driven game balance

pub mod input;
pub mod renderer;
pub mod scene;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use scene::{Scene, SceneCommand};
pub use settings::Settings;
pub use tuning::{ConfigError, Tuning};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, one tick per rendered frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// Play field dimensions, shared with the renderer
    pub const PLAY_WIDTH: f32 = 600.0;
    pub const PLAY_HEIGHT: f32 = 600.0;

    /// Courier vehicle footprint before rotation
    pub const VEHICLE_WIDTH: f32 = 10.0;
    pub const VEHICLE_HEIGHT: f32 = 20.0;
    /// Top speed at full throttle (units/s)
    pub const VEHICLE_SPEED: f32 = 300.0;
    /// Degrees turned per tick at full steer input
    pub const STEER_RATE: f32 = 5.0;
    /// Throttle added per tick of accelerate input
    pub const THROTTLE_RATE: f32 = 0.1;
    /// Throttle relaxation toward zero per tick
    pub const THROTTLE_GRAVITY: f32 = 0.025;

    /// Goal marker edge length
    pub const GOAL_SIZE: f32 = 20.0;

    /// Seconds of "get ready" before control is granted
    pub const INTRO_SECONDS: f32 = 2.5;
    /// Seconds available to reach the goal
    pub const GO_TIME_BUDGET: f32 = 6.0;
    /// A loss this close to the start of the countdown is forgiven
    pub const LOSS_GRACE_SECONDS: f32 = 1.0;
    /// Seconds the success banner stays up before the next level
    pub const OUTRO_SECONDS: f32 = 1.5;
    /// Distance of spawn points from the play field edge
    pub const SPAWN_INSET: f32 = 30.0;
}

/// Wrap a heading in degrees so it stays inside (-360, 360)
///
/// Only a single turn is removed, matching the per-tick steering step which
/// can never move the heading by more than a full revolution.
#[inline]
pub fn wrap_heading(mut degrees: f32) -> f32 {
    if degrees >= 360.0 {
        degrees -= 360.0;
    }
    if degrees <= -360.0 {
        degrees += 360.0;
    }
    degrees
}

/// Unit direction for a heading in degrees
///
/// Heading 0 points along +Y (down the screen) and 90 along +X: the vector is
/// `(sin, cos)`, not the textbook `(cos, sin)`. The result is only
/// renormalized when both components are non-zero.
#[inline]
pub fn heading_to_direction(degrees: f32) -> Vec2 {
    let rad = degrees.to_radians();
    let dir = Vec2::new(rad.sin(), rad.cos());
    if dir.x != 0.0 && dir.y != 0.0 {
        dir.normalize()
    } else {
        dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_heading_zero_points_down() {
        let dir = heading_to_direction(0.0);
        assert!(dir.x.abs() < 1e-6);
        assert!((dir.y - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_heading_ninety_points_right() {
        let dir = heading_to_direction(90.0);
        assert!((dir.x - 1.0).abs() < 1e-6);
        assert!(dir.y.abs() < 1e-6);
    }

    #[test]
    fn test_wrap_heading_removes_one_turn() {
        assert_eq!(wrap_heading(360.0), 0.0);
        assert_eq!(wrap_heading(365.0), 5.0);
        assert_eq!(wrap_heading(-360.0), 0.0);
        assert_eq!(wrap_heading(-362.0), -2.0);
        assert_eq!(wrap_heading(359.0), 359.0);
    }

    proptest! {
        #[test]
        fn prop_direction_is_unit_length(deg in -359.0f32..360.0) {
            let dir = heading_to_direction(deg);
            prop_assert!((dir.length() - 1.0).abs() < 1e-4);
        }
    }
}
