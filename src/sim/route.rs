//! Recorded routes and nearest-sample replay
//!
//! A route is keyed by the level countdown ("go time"), so keys shrink as the
//! run goes on. One sample is captured per tick, which makes key spacing
//! follow the frame times rather than any fixed grid.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when reading a route
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RouteError {
    #[error("route has no samples")]
    Empty,
}

/// Vehicle state captured for one tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub x: f32,
    pub y: f32,
    /// Heading in degrees
    pub angle: f32,
    /// Set on the sample taken the tick the courier reached the goal
    pub win: bool,
}

/// One keyed sample
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RouteEntry {
    /// Countdown seconds remaining when the sample was taken
    pub key: f32,
    pub sample: Sample,
}

/// Countdown-keyed samples, ordered from the largest key to the smallest
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Route {
    entries: Vec<RouteEntry>,
}

impl Route {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `sample` under `countdown`, replacing any sample already there
    pub fn record(&mut self, countdown: f32, sample: Sample) {
        // First index whose key is not larger than `countdown`
        let idx = self.entries.partition_point(|e| e.key > countdown);
        if let Some(entry) = self.entries.get_mut(idx).filter(|e| e.key == countdown) {
            entry.sample = sample;
            return;
        }
        self.entries.insert(
            idx,
            RouteEntry {
                key: countdown,
                sample,
            },
        );
    }

    /// Entry whose key is closest to `query`
    ///
    /// When `query` sits exactly halfway between two keys the larger key (the
    /// earlier moment of the run) wins.
    pub fn nearest(&self, query: f32) -> Result<&RouteEntry, RouteError> {
        if self.entries.is_empty() {
            return Err(RouteError::Empty);
        }

        let idx = self.entries.partition_point(|e| e.key > query);
        let above = idx.checked_sub(1).map(|i| &self.entries[i]);
        let below = self.entries.get(idx);

        match (above, below) {
            (Some(a), Some(b)) => {
                if (a.key - query).abs() <= (b.key - query).abs() {
                    Ok(a)
                } else {
                    Ok(b)
                }
            }
            (Some(a), None) => Ok(a),
            (None, Some(b)) => Ok(b),
            (None, None) => Err(RouteError::Empty),
        }
    }

    /// Sample whose key is closest to `query`
    pub fn sample_at(&self, query: f32) -> Result<Sample, RouteError> {
        self.nearest(query).map(|entry| entry.sample)
    }

    /// Entries in key order, largest key first
    pub fn entries(&self) -> &[RouteEntry] {
        &self.entries
    }

    pub fn first(&self) -> Option<&RouteEntry> {
        self.entries.first()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of samples flagged as the winning tick
    pub fn win_count(&self) -> usize {
        self.entries.iter().filter(|e| e.sample.win).count()
    }
}
