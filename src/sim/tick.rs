//! Per-tick session update
//!
//! Order within a playing tick is fixed, since later steps read what earlier
//! steps wrote: input, movement and collisions, win/lose evaluation, ghost
//! replay, then recording.

use super::player::World;
use super::state::{GameEvent, LevelPhase, Session};

/// Input commands for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    /// Confirm (edge-triggered)
    pub confirm: bool,
    /// Pause toggle (edge-triggered)
    pub pause: bool,
    /// Start a brand-new session (edge-triggered)
    pub reset: bool,
}

impl TickInput {
    /// +1 turns toward decreasing heading
    pub fn steer(&self) -> f32 {
        self.right as i8 as f32 - self.left as i8 as f32
    }

    /// +1 forward, -1 reverse
    pub fn throttle(&self) -> f32 {
        self.up as i8 as f32 - self.down as i8 as f32
    }

    /// Drop the edge-triggered flags once they've been consumed
    pub fn clear_one_shots(&mut self) {
        self.confirm = false;
        self.pause = false;
        self.reset = false;
    }
}

/// Advance the session by one tick of `dt` seconds
pub fn tick(state: &mut Session, input: &TickInput, dt: f32) {
    if input.reset {
        state.reset();
        return;
    }

    if input.pause && state.phase == LevelPhase::Playing {
        state.paused = !state.paused;
        log::info!("{}", if state.paused { "Paused" } else { "Resumed" });
    }

    match state.phase {
        LevelPhase::Intro { remaining } => {
            let remaining = remaining - dt;
            if remaining <= 0.0 {
                state.phase = LevelPhase::Playing;
                state.events.push(GameEvent::Go);
            } else {
                state.phase = LevelPhase::Intro { remaining };
            }
        }
        LevelPhase::Playing => tick_playing(state, input, dt),
        LevelPhase::Outro { remaining } => {
            let remaining = remaining - dt;
            if remaining <= 0.0 {
                state.setup_level();
            } else {
                state.phase = LevelPhase::Outro { remaining };
            }
        }
        LevelPhase::Lost => {}
    }
}

fn tick_playing(state: &mut Session, input: &TickInput, dt: f32) {
    state.go_time = (state.go_time - dt).max(0.0);

    let field = state.field();
    let Some(player) = state.player.as_mut() else {
        return;
    };

    // Pausing only blocks control; everything else keeps running
    if !state.paused {
        player.steer(input.steer());
        player.accelerate(input.throttle());
    }

    let world = World {
        field,
        goal: state.goal.as_ref(),
        walls: &state.walls,
        ghosts: &state.ghosts,
    };
    player.update(dt, &world);

    if player.win {
        let sample = player.sample();
        state.route.record(state.go_time, sample);
        state.complete_level();
        return;
    }

    if player.lost {
        let grace_start = state.tuning.go_time_budget - state.tuning.loss_grace_seconds;
        if state.go_time >= grace_start {
            player.forgive_loss();
            log::debug!("Near miss forgiven at {:.2}s", state.go_time);
            state.events.push(GameEvent::NearMissForgiven);
        } else {
            state.fail_level();
            return;
        }
    } else if state.go_time <= 0.0 {
        state.fail_level();
        return;
    }

    let countdown = state.go_time;
    let before = state.ghosts.len();
    state.ghosts.retain_mut(|ghost| ghost.update(countdown));
    for _ in state.ghosts.len()..before {
        state.events.push(GameEvent::GhostFinished);
    }

    if let Some(player) = state.player.as_ref() {
        state.route.record(countdown, player.sample());
    }
    log::trace!("t={:.3} route={} ghosts={}", countdown, state.route.len(), state.ghosts.len());
}
