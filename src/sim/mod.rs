//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Caller-supplied timestep only
//! - Seeded RNG only
//! - Stable iteration order (routes oldest first, ghosts in spawn order)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod ghost;
pub mod mask;
pub mod player;
pub mod route;
pub mod state;
pub mod tick;

pub use collision::{Body, PlayField, overlaps, overlaps_any};
pub use ghost::Ghost;
pub use mask::Mask;
pub use player::{Player, World};
pub use route::{Route, RouteEntry, RouteError, Sample};
pub use state::{
    DeadGoal, Edge, GameEvent, Goal, LevelPhase, Session, SpawnPoint, Wall, generate_spawn_point,
};
pub use tick::{TickInput, tick};
