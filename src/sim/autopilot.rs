//! Demo driver: points the courier at the goal and floors it
//!
//! Ghosts and walls are ignored, so the autopilot happily crashes into its
//! own past runs. Good enough for attract mode and soak tests.

use super::state::{LevelPhase, Session};
use super::tick::TickInput;

/// Heading error (degrees) below which the autopilot stops turning
const AIM_TOLERANCE: f32 = 3.0;

/// Signed difference `to - from`, folded into (-180, 180]
fn heading_delta(from: f32, to: f32) -> f32 {
    let mut delta = (to - from) % 360.0;
    if delta > 180.0 {
        delta -= 360.0;
    } else if delta <= -180.0 {
        delta += 360.0;
    }
    delta
}

/// Inputs the autopilot would press this tick
pub fn drive(state: &Session) -> TickInput {
    if state.phase != LevelPhase::Playing {
        return TickInput::default();
    }
    let (Some(player), Some(goal)) = (state.player.as_ref(), state.goal.as_ref()) else {
        return TickInput::default();
    };

    let to_goal = goal.pos - player.pos;
    // Headings use (sin, cos), so atan2 takes x first
    let desired = to_goal.x.atan2(to_goal.y).to_degrees();
    let delta = heading_delta(player.angle(), desired);

    TickInput {
        // Positive steer lowers the heading
        left: delta > AIM_TOLERANCE,
        right: delta < -AIM_TOLERANCE,
        up: true,
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::sim::player::Player;
    use crate::sim::state::Goal;
    use crate::sim::tick::tick;
    use crate::tuning::Tuning;
    use glam::Vec2;

    #[test]
    fn test_heading_delta_folds() {
        assert_eq!(heading_delta(0.0, 90.0), 90.0);
        assert_eq!(heading_delta(350.0, 10.0), 20.0);
        assert_eq!(heading_delta(10.0, 350.0), -20.0);
        assert_eq!(heading_delta(-270.0, 90.0), 0.0);
    }

    #[test]
    fn test_idle_outside_playing() {
        let state = Session::new(1, Tuning::default());
        assert_eq!(drive(&state), TickInput::default());
    }

    #[test]
    fn test_autopilot_turns_around_and_delivers() {
        let mut state = Session::new(21, Tuning::default());
        // Facing down, goal behind and to the right
        state.player = Some(Player::new(Vec2::new(200.0, 300.0), 0.0, &state.tuning));
        state.goal = Some(Goal::new(Vec2::new(400.0, 100.0), state.tuning.goal_size));

        for _ in 0..2_000 {
            let input = drive(&state);
            tick(&mut state, &input, SIM_DT);
            if state.score > 0 || state.phase == LevelPhase::Lost {
                break;
            }
        }
        assert_eq!(state.score, 1);
    }
}
