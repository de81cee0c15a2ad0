//! Level entities and session state
//!
//! The session owns every entity collection; nothing in the simulation holds
//! references across ticks.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::collision::{Body, PlayField, overlaps_any};
use super::ghost::Ghost;
use super::mask::Mask;
use super::player::{Player, World};
use super::route::Route;
use crate::tuning::Tuning;

/// A static obstacle
#[derive(Debug, Clone)]
pub struct Wall {
    pub pos: Vec2,
    mask: Mask,
}

impl Wall {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self {
            pos,
            mask: Mask::filled(size.x.round() as u32, size.y.round() as u32),
        }
    }
}

impl Body for Wall {
    fn center(&self) -> Vec2 {
        self.pos
    }

    fn mask(&self) -> &Mask {
        &self.mask
    }
}

/// The delivery target for the current level
#[derive(Debug, Clone)]
pub struct Goal {
    pub pos: Vec2,
    mask: Mask,
}

impl Goal {
    pub fn new(pos: Vec2, size: f32) -> Self {
        let edge = size.round() as u32;
        Self {
            pos,
            mask: Mask::filled(edge, edge),
        }
    }

    /// Leave a marker behind where this goal stood
    pub fn retire(&self) -> DeadGoal {
        DeadGoal {
            pos: self.pos,
            size: self.mask.size(),
        }
    }
}

impl Body for Goal {
    fn center(&self) -> Vec2 {
        self.pos
    }

    fn mask(&self) -> &Mask {
        &self.mask
    }
}

/// Cosmetic marker of a completed delivery; never collides
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeadGoal {
    pub pos: Vec2,
    pub size: Vec2,
}

/// Play field edge a spawn point sits on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Top,
    Right,
    Bottom,
    Left,
}

impl Edge {
    const ALL: [Edge; 4] = [Edge::Top, Edge::Right, Edge::Bottom, Edge::Left];

    /// Heading that faces into the field from this edge
    pub fn facing(self) -> f32 {
        match self {
            Edge::Top => 0.0,
            Edge::Right => 270.0,
            Edge::Bottom => 180.0,
            Edge::Left => 90.0,
        }
    }
}

/// A position on the field border plus the heading facing inward
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnPoint {
    pub pos: Vec2,
    pub angle: f32,
    pub edge: Edge,
}

/// Whole-unit offset in [inset, extent - inset]
fn offset_along(rng: &mut impl Rng, extent: f32, inset: f32) -> f32 {
    let lo = inset.round() as i32;
    let hi = (extent - inset).round() as i32;
    rng.random_range(lo..=hi.max(lo)) as f32
}

/// Pick a random edge, then a random whole-unit offset along it
pub fn generate_spawn_point(rng: &mut impl Rng, tuning: &Tuning) -> SpawnPoint {
    let inset = tuning.spawn_inset;
    let (w, h) = (tuning.play_width, tuning.play_height);
    let edge = Edge::ALL[rng.random_range(0..Edge::ALL.len())];

    let pos = match edge {
        Edge::Top => Vec2::new(offset_along(rng, w, inset), inset),
        Edge::Bottom => Vec2::new(offset_along(rng, w, inset), h - inset),
        Edge::Right => Vec2::new(w - inset, offset_along(rng, h, inset)),
        Edge::Left => Vec2::new(inset, offset_along(rng, h, inset)),
    };

    SpawnPoint {
        pos,
        angle: edge.facing(),
        edge,
    }
}

/// Spawn draws tried before accepting a spot that overlaps a wall
const SPAWN_ATTEMPTS: usize = 64;

/// Draw spawn points until the body built on one is clear of every wall
fn spawn_clear_of_walls<B: Body>(
    rng: &mut impl Rng,
    tuning: &Tuning,
    walls: &[Wall],
    build: impl Fn(&SpawnPoint) -> B,
) -> (SpawnPoint, B) {
    let mut point = generate_spawn_point(rng, tuning);
    let mut body = build(&point);
    for _ in 1..SPAWN_ATTEMPTS {
        if !overlaps_any(&body, walls) {
            return (point, body);
        }
        point = generate_spawn_point(rng, tuning);
        body = build(&point);
    }
    if overlaps_any(&body, walls) {
        log::warn!(
            "No wall-free spawn point after {} draws, using {:?}",
            SPAWN_ATTEMPTS,
            point.pos
        );
    }
    (point, body)
}

/// Where the current level is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LevelPhase {
    /// "Get ready" countdown before control is granted
    Intro { remaining: f32 },
    /// Courier is driving and being recorded
    Playing,
    /// Delivery made; next level starts when `remaining` runs out
    ///
    /// The session's `go_time` keeps the countdown value the win was recorded
    /// under, while the HUD shows the clock stopped at zero.
    Outro { remaining: f32 },
    /// Crashed or out of time; waits for a reset
    Lost,
}

/// Notable things that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    LevelStarted { level: u32, ghosts: usize },
    Go,
    Won { level: u32, samples: usize },
    Lost { level: u32 },
    NearMissForgiven,
    GhostFinished,
    Reset,
}

/// One play-through: levels, score and the routes of every win so far
#[derive(Debug, Clone)]
pub struct Session {
    pub tuning: Tuning,
    rng: Pcg32,
    pub seed: u64,
    /// 1-based once the first level is set up
    pub level: u32,
    /// Completed levels; equals the number of archived routes
    pub score: u32,
    pub phase: LevelPhase,
    /// Seconds left in the current level, never negative
    pub go_time: f32,
    /// Steering and throttle input are ignored while set
    pub paused: bool,
    pub player: Option<Player>,
    pub goal: Option<Goal>,
    pub dead_goals: Vec<DeadGoal>,
    pub walls: Vec<Wall>,
    pub ghosts: Vec<Ghost>,
    /// Routes of every won level, oldest first
    history: Vec<Route>,
    /// Route being recorded this level
    pub route: Route,
    /// Events since the last drain
    pub events: Vec<GameEvent>,
}

impl Session {
    /// Start a session and set up its first level
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        let walls = tuning
            .walls
            .iter()
            .map(|w| Wall::new(w.center(), w.size()))
            .collect();

        let mut session = Self {
            rng: Pcg32::seed_from_u64(seed),
            seed,
            level: 0,
            score: 0,
            phase: LevelPhase::Lost,
            go_time: tuning.go_time_budget,
            paused: false,
            player: None,
            goal: None,
            dead_goals: Vec::new(),
            walls,
            ghosts: Vec::new(),
            history: Vec::new(),
            route: Route::new(),
            events: Vec::new(),
            tuning,
        };
        session.setup_level();
        session
    }

    /// Throw everything away and start over with a fresh session
    ///
    /// Score, level and every recorded route are discarded. The new seed is
    /// drawn from this session's RNG so a seeded run stays reproducible.
    pub fn reset(&mut self) {
        let seed = self.rng.random::<u64>();
        log::info!(
            "Session reset at level {} with score {} (new seed {})",
            self.level,
            self.score,
            seed
        );
        *self = Session::new(seed, self.tuning.clone());
        self.events.push(GameEvent::Reset);
    }

    pub fn field(&self) -> PlayField {
        PlayField::new(self.tuning.play_width, self.tuning.play_height)
    }

    /// Archived routes, oldest first
    pub fn history(&self) -> &[Route] {
        &self.history
    }

    /// Borrow the pieces the courier collides with
    pub fn world(&self) -> World<'_> {
        World {
            field: self.field(),
            goal: self.goal.as_ref(),
            walls: &self.walls,
            ghosts: &self.ghosts,
        }
    }

    /// Spawn courier, goal and one ghost per archived route, then enter the intro
    pub fn setup_level(&mut self) {
        let tuning = &self.tuning;
        let (start, player) =
            spawn_clear_of_walls(&mut self.rng, tuning, &self.walls, |p| {
                Player::new(p.pos, p.angle, tuning)
            });
        let (target, goal) = spawn_clear_of_walls(&mut self.rng, tuning, &self.walls, |p| {
            Goal::new(p.pos, tuning.goal_size)
        });

        self.player = Some(player);
        self.goal = Some(goal);

        self.ghosts.clear();
        for (i, route) in self.history.iter().enumerate() {
            match Ghost::new(route.clone(), &self.tuning) {
                Ok(ghost) => self.ghosts.push(ghost),
                Err(e) => log::error!("Skipping ghost for route {}: {}", i, e),
            }
        }

        self.level += 1;
        self.go_time = self.tuning.go_time_budget;
        self.route = Route::new();
        self.paused = false;
        self.phase = LevelPhase::Intro {
            remaining: self.tuning.intro_seconds,
        };

        log::debug!(
            "Level {}: courier at {:?} ({:?}), goal at {:?}, {} ghosts",
            self.level,
            start.pos,
            start.edge,
            target.pos,
            self.ghosts.len()
        );
        self.events.push(GameEvent::LevelStarted {
            level: self.level,
            ghosts: self.ghosts.len(),
        });
    }

    /// Archive the finished route, bank the point and clear the courier away
    pub(crate) fn complete_level(&mut self) {
        let route = std::mem::take(&mut self.route);
        let samples = route.len();
        self.history.push(route);
        self.score += 1;
        self.player = None;
        if let Some(goal) = self.goal.take() {
            self.dead_goals.push(goal.retire());
        }
        self.paused = false;
        self.phase = LevelPhase::Outro {
            remaining: self.tuning.outro_seconds,
        };

        log::info!(
            "Delivered level {} with {:.2}s left (score {})",
            self.level,
            self.go_time,
            self.score
        );
        self.events.push(GameEvent::Won {
            level: self.level,
            samples,
        });
    }

    /// Halt play until a reset
    pub(crate) fn fail_level(&mut self) {
        if let Some(player) = self.player.as_mut() {
            player.lost = true;
        }
        self.paused = false;
        self.phase = LevelPhase::Lost;
        log::info!("Lost on level {} (score {})", self.level, self.score);
        self.events.push(GameEvent::Lost { level: self.level });
    }

    /// Take all events queued since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::WallSpec;

    #[test]
    fn test_new_session_sets_up_first_level() {
        let session = Session::new(7, Tuning::default());
        assert_eq!(session.level, 1);
        assert_eq!(session.score, 0);
        assert!(session.player.is_some());
        assert!(session.goal.is_some());
        assert!(session.ghosts.is_empty());
        assert!(session.history().is_empty());
        assert_eq!(session.go_time, session.tuning.go_time_budget);
        assert!(matches!(session.phase, LevelPhase::Intro { .. }));
        assert_eq!(
            session.events,
            vec![GameEvent::LevelStarted { level: 1, ghosts: 0 }]
        );
    }

    #[test]
    fn test_spawns_avoid_walls() {
        // Wall off the spawn bands along the top, left and right edges
        let tuning = Tuning {
            walls: vec![
                WallSpec { x: 300.0, y: 30.0, width: 600.0, height: 60.0 },
                WallSpec { x: 30.0, y: 300.0, width: 60.0, height: 600.0 },
                WallSpec { x: 570.0, y: 300.0, width: 60.0, height: 600.0 },
            ],
            ..Tuning::default()
        };
        assert!(tuning.validate().is_ok());

        for seed in 0..20 {
            let session = Session::new(seed, tuning.clone());
            let player = session.player.as_ref().unwrap();
            let goal = session.goal.as_ref().unwrap();
            assert!(!overlaps_any(player, &session.walls), "seed {seed}");
            assert!(!overlaps_any(goal, &session.walls), "seed {seed}");
            assert_eq!(player.pos.y, 570.0);
            assert_eq!(player.angle(), 180.0);
        }
    }

    #[test]
    fn test_courier_can_leave_spawn_at_smallest_inset() {
        use crate::consts::SIM_DT;

        let tuning = Tuning::from_json_str(r#"{ "spawn_inset": 12 }"#).unwrap();
        for seed in 0..20 {
            let mut session = Session::new(seed, tuning.clone());
            let field = session.field();
            let player = session.player.as_mut().unwrap();
            assert!(field.contains(&*player), "seed {seed}");

            let start = player.pos;
            let world = World {
                field,
                goal: None,
                walls: &[],
                ghosts: &[],
            };
            for _ in 0..10 {
                player.accelerate(1.0);
                player.update(SIM_DT, &world);
            }
            assert_ne!(player.pos, start, "seed {seed}");
        }
    }

    #[test]
    fn test_spawn_points_sit_on_an_edge_facing_inward() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(42);
        let mut seen = Vec::new();
        for _ in 0..200 {
            let p = generate_spawn_point(&mut rng, &tuning);
            match p.edge {
                Edge::Top => assert_eq!((p.pos.y, p.angle), (30.0, 0.0)),
                Edge::Right => assert_eq!((p.pos.x, p.angle), (570.0, 270.0)),
                Edge::Bottom => assert_eq!((p.pos.y, p.angle), (570.0, 180.0)),
                Edge::Left => assert_eq!((p.pos.x, p.angle), (30.0, 90.0)),
            }
            assert!((30.0..=570.0).contains(&p.pos.x));
            assert!((30.0..=570.0).contains(&p.pos.y));
            assert_eq!(p.pos.x.fract(), 0.0);
            if !seen.contains(&p.edge) {
                seen.push(p.edge);
            }
        }
        assert_eq!(seen.len(), 4);
    }

    #[test]
    fn test_same_seed_same_level() {
        let a = Session::new(1234, Tuning::default());
        let b = Session::new(1234, Tuning::default());
        assert_eq!(a.player.map(|p| p.pos), b.player.map(|p| p.pos));
        assert_eq!(a.goal.map(|g| g.pos), b.goal.map(|g| g.pos));
    }

    #[test]
    fn test_walls_come_from_tuning() {
        let tuning = Tuning::from_json_str(
            r#"{ "walls": [ { "x": 300, "y": 300, "width": 40, "height": 200 } ] }"#,
        )
        .unwrap();
        let session = Session::new(1, tuning);
        assert_eq!(session.walls.len(), 1);
        assert_eq!(session.walls[0].mask().size(), Vec2::new(40.0, 200.0));
    }

    #[test]
    fn test_complete_level_archives_route_and_leaves_marker() {
        let mut session = Session::new(3, Tuning::default());
        let sample = session.player.as_ref().map(|p| p.sample()).unwrap();
        session.route.record(5.0, sample);
        let goal_pos = session.goal.as_ref().map(|g| g.pos).unwrap();

        session.complete_level();

        assert_eq!(session.score, 1);
        assert_eq!(session.history().len(), 1);
        assert!(session.route.is_empty());
        assert!(session.player.is_none());
        assert!(session.goal.is_none());
        assert_eq!(session.dead_goals[0].pos, goal_pos);
        assert!(matches!(session.phase, LevelPhase::Outro { .. }));

        session.setup_level();
        assert_eq!(session.level, 2);
        assert_eq!(session.ghosts.len(), 1);
    }

    #[test]
    fn test_reset_wipes_progress() {
        let mut session = Session::new(3, Tuning::default());
        let sample = session.player.as_ref().map(|p| p.sample()).unwrap();
        session.route.record(5.0, sample);
        session.complete_level();
        session.setup_level();
        session.drain_events();

        session.reset();

        assert_eq!(session.level, 1);
        assert_eq!(session.score, 0);
        assert!(session.history().is_empty());
        assert!(session.ghosts.is_empty());
        assert!(session.dead_goals.is_empty());
        assert_eq!(session.events.last(), Some(&GameEvent::Reset));
    }
}
