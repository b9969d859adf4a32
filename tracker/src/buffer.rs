//! Bounded trajectory kept behind the station.
//!
//! Only the most recent samples are retained, oldest out first.  Arcs are
//! recomputed on demand from adjacent samples, nothing incremental to keep in
//! sync.
//!

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use cosmicview_common::Coord;

/// How many samples we keep, counting the newest one.
const TRAJECTORY_CAP: usize = 30;

/// One drawable segment between two consecutive samples.
///
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
pub struct ArcSegment {
    pub start: Coord,
    pub end: Coord,
}

/// Append-only bounded sequence of recent positions.
///
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct TrajectoryBuffer {
    samples: VecDeque<Coord>,
}

impl TrajectoryBuffer {
    pub fn new() -> Self {
        TrajectoryBuffer {
            samples: VecDeque::with_capacity(TRAJECTORY_CAP),
        }
    }

    /// Append a sample, dropping the oldest ones so we keep the last
    /// `TRAJECTORY_CAP` including this one.
    ///
    pub fn push(&mut self, sample: Coord) {
        self.samples.push_back(sample);
        while self.samples.len() > TRAJECTORY_CAP {
            self.samples.pop_front();
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Newest sample, if any.
    ///
    #[inline]
    pub fn latest(&self) -> Option<&Coord> {
        self.samples.back()
    }

    /// Samples in arrival order.
    ///
    pub fn iter(&self) -> impl Iterator<Item = &Coord> {
        self.samples.iter()
    }

    /// One arc per adjacent pair, in order.  Empty below two samples.
    ///
    pub fn arcs(&self) -> impl Iterator<Item = ArcSegment> + '_ {
        self.samples
            .iter()
            .zip(self.samples.iter().skip(1))
            .map(|(start, end)| ArcSegment {
                start: *start,
                end: *end,
            })
    }
}
