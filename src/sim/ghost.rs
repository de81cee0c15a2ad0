//! Ghosts: replays of earlier winning runs
//!
//! A ghost holds a finished route and, each tick, jumps to the sample whose
//! countdown key is closest to the live countdown. Both runs count down from
//! the same budget at the same rate, so the replay lines up with the original
//! run without interpolation.

use glam::Vec2;

use super::collision::Body;
use super::mask::Mask;
use super::route::{Route, RouteError};
use crate::tuning::Tuning;

/// A non-controllable replay of a recorded route
#[derive(Debug, Clone)]
pub struct Ghost {
    route: Route,
    pos: Vec2,
    angle: f32,
    size: Vec2,
    mask: Mask,
    /// Reached the sample where the original run won
    finished: bool,
}

impl Ghost {
    /// Build a ghost parked on the route's first sample
    ///
    /// An empty route has nothing to replay and is rejected.
    pub fn new(route: Route, tuning: &Tuning) -> Result<Self, RouteError> {
        let first = route.first().ok_or(RouteError::Empty)?.sample;
        let size = Vec2::new(tuning.vehicle_width, tuning.vehicle_height);
        Ok(Self {
            pos: Vec2::new(first.x, first.y),
            angle: first.angle,
            size,
            mask: Mask::rotated_rect(size.x, size.y, first.angle),
            finished: false,
            route,
        })
    }

    /// Move to the sample nearest `countdown`
    ///
    /// Returns false once the ghost has replayed its winning sample; a
    /// finished ghost should be removed from the level.
    pub fn update(&mut self, countdown: f32) -> bool {
        let Ok(sample) = self.route.sample_at(countdown) else {
            self.finished = true;
            return false;
        };

        self.pos = Vec2::new(sample.x, sample.y);
        if sample.angle != self.angle {
            self.angle = sample.angle;
            self.mask = Mask::rotated_rect(self.size.x, self.size.y, sample.angle);
        }
        if sample.win {
            self.finished = true;
        }
        !self.finished
    }

    #[inline]
    pub fn pos(&self) -> Vec2 {
        self.pos
    }

    /// Heading in degrees
    #[inline]
    pub fn angle(&self) -> f32 {
        self.angle
    }

    /// Unrotated footprint
    #[inline]
    pub fn size(&self) -> Vec2 {
        self.size
    }

    #[inline]
    pub fn finished(&self) -> bool {
        self.finished
    }

    pub fn route(&self) -> &Route {
        &self.route
    }
}

impl Body for Ghost {
    fn center(&self) -> Vec2 {
        self.pos
    }

    fn mask(&self) -> &Mask {
        &self.mask
    }
}
