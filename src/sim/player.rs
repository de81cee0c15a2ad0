//! The courier vehicle: steering, throttle and axis-split movement

use glam::Vec2;

use super::collision::{Body, PlayField, overlaps, overlaps_any};
use super::ghost::Ghost;
use super::mask::Mask;
use super::route::Sample;
use super::state::{Goal, Wall};
use crate::tuning::Tuning;
use crate::{heading_to_direction, wrap_heading};

/// Slack on the throttle snap-to-zero test, absorbing f32 drift from repeated
/// relaxation steps
const THROTTLE_EPSILON: f32 = 1e-4;

/// Everything the courier can bump into during a tick
#[derive(Debug, Clone, Copy)]
pub struct World<'a> {
    pub field: PlayField,
    pub goal: Option<&'a Goal>,
    pub walls: &'a [Wall],
    pub ghosts: &'a [Ghost],
}

/// The player-controlled vehicle
#[derive(Debug, Clone)]
pub struct Player {
    pub pos: Vec2,
    /// Heading in degrees, kept inside (-360, 360)
    angle: f32,
    /// Unit direction derived from `angle`
    dir: Vec2,
    /// In [-1, 1]; relaxes toward zero every tick
    throttle: f32,
    speed: f32,
    steer_rate: f32,
    throttle_rate: f32,
    throttle_gravity: f32,
    /// Unrotated footprint
    size: Vec2,
    mask: Mask,
    /// Reached the goal (sticky)
    pub win: bool,
    /// Hit a ghost or ran out of time (sticky)
    pub lost: bool,
    /// Currently overlapping a wall (recomputed on every check)
    pub wall_hit: bool,
}

impl Player {
    pub fn new(pos: Vec2, angle: f32, tuning: &Tuning) -> Self {
        let size = Vec2::new(tuning.vehicle_width, tuning.vehicle_height);
        let angle = wrap_heading(angle);
        Self {
            pos,
            angle,
            dir: heading_to_direction(angle),
            throttle: 0.0,
            speed: tuning.vehicle_speed,
            steer_rate: tuning.steer_rate,
            throttle_rate: tuning.throttle_rate,
            throttle_gravity: tuning.throttle_gravity,
            size,
            mask: Mask::rotated_rect(size.x, size.y, angle),
            win: false,
            lost: false,
            wall_hit: false,
        }
    }

    #[inline]
    pub fn angle(&self) -> f32 {
        self.angle
    }

    #[inline]
    pub fn direction(&self) -> Vec2 {
        self.dir
    }

    #[inline]
    pub fn throttle(&self) -> f32 {
        self.throttle
    }

    /// Unrotated footprint
    #[inline]
    pub fn size(&self) -> Vec2 {
        self.size
    }

    /// Turn by `input * steer_rate` degrees; positive input decreases the heading
    pub fn steer(&mut self, input: f32) {
        let angle = wrap_heading(self.angle - input * self.steer_rate);
        self.dir = heading_to_direction(angle);
        if angle != self.angle {
            self.angle = angle;
            self.mask = Mask::rotated_rect(self.size.x, self.size.y, angle);
        }
    }

    /// Push the throttle by `input * throttle_rate`
    ///
    /// Only accepted while the throttle is strictly inside (-1, 1); the result
    /// is clamped to the range.
    pub fn accelerate(&mut self, input: f32) {
        if self.throttle > -1.0 && self.throttle < 1.0 {
            self.throttle = (self.throttle + input * self.throttle_rate).clamp(-1.0, 1.0);
        }
    }

    /// Relax the throttle one gravity step toward zero
    pub fn relax_throttle(&mut self) {
        if self.throttle.abs() - self.throttle_gravity <= THROTTLE_EPSILON {
            self.throttle = 0.0;
        } else if self.throttle > 0.0 {
            self.throttle -= self.throttle_gravity;
        } else {
            self.throttle += self.throttle_gravity;
        }
    }

    /// Displacement for this tick
    pub fn velocity(&self, dt: f32) -> Vec2 {
        if self.lost {
            return Vec2::ZERO;
        }
        self.dir * self.speed * self.throttle * dt
    }

    /// Advance one tick: relax throttle, then move X and Y separately, undoing
    /// whichever axis ends up in a wall or outside the field
    pub fn update(&mut self, dt: f32, world: &World<'_>) {
        self.relax_throttle();
        let vel = self.velocity(dt);

        let prev_x = self.pos.x;
        self.pos.x += vel.x;
        self.collision_checks(world);
        if self.wall_hit || !world.field.contains(&*self) {
            self.pos.x = prev_x;
        }

        let prev_y = self.pos.y;
        self.pos.y += vel.y;
        self.collision_checks(world);
        if self.wall_hit || !world.field.contains(&*self) {
            self.pos.y = prev_y;
        }
    }

    /// Goal first (sticky win), then walls (fresh), then ghosts (sticky loss)
    pub fn collision_checks(&mut self, world: &World<'_>) {
        if let Some(goal) = world.goal {
            if overlaps(&*self, goal) {
                self.win = true;
            }
        }

        self.wall_hit = overlaps_any(&*self, world.walls);

        if overlaps_any(&*self, world.ghosts.iter().filter(|g| !g.finished())) {
            self.lost = true;
        }
    }

    /// Clear a loss that happened inside the grace window
    pub fn forgive_loss(&mut self) {
        self.lost = false;
    }

    /// State to store in the route for this tick
    pub fn sample(&self) -> Sample {
        Sample {
            x: self.pos.x,
            y: self.pos.y,
            angle: self.angle,
            win: self.win,
        }
    }
}

impl Body for Player {
    fn center(&self) -> Vec2 {
        self.pos
    }

    fn mask(&self) -> &Mask {
        &self.mask
    }
}
