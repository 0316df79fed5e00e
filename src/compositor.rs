//! Frame composition.
//!
//! Sources report emissions to the [`FrameCompositor`]; it tracks whether
//! every source has produced a first value and whether anything changed
//! since the last frame.  On each frame boundary it lets at most one
//! [`Round`] through.  Changes between boundaries collapse into that one
//! frame, the newest value of every source winning.

use std::time::Duration;

use log::trace;

use crate::entities::{Enemy, Hero, Score, Star};
use crate::timer::Ticker;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Source {
    Stars,
    Hero,
    Enemies,
}

impl Source {
    fn index(self) -> usize {
        match self {
            Source::Stars => 0,
            Source::Hero => 1,
            Source::Enemies => 2,
        }
    }
}

pub struct FrameCompositor {
    ticker: Ticker,
    seen: [bool; 3],
    fresh: bool,
    frames: u64,
}

impl FrameCompositor {
    pub fn new(period: Duration, now: Duration) -> Self {
        FrameCompositor {
            ticker: Ticker::new(period, now),
            seen: [false; 3],
            fresh: false,
            frames: 0,
        }
    }

    pub fn notify(&mut self, source: Source) {
        self.seen[source.index()] = true;
        self.fresh = true;
    }

    /// Every source has emitted at least once.
    pub fn is_ready(&self) -> bool {
        self.seen.iter().all(|&seen| seen)
    }

    /// Frames let through so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// `true` when a frame boundary has passed, all sources are ready, and
    /// something was emitted since the previous frame.
    pub fn sample(&mut self, now: Duration) -> bool {
        if !self.ticker.poll(now) {
            return false;
        }
        if !self.is_ready() || !self.fresh {
            return false;
        }
        self.fresh = false;
        self.frames += 1;
        trace!("frame {} at {:?}", self.frames, now);
        true
    }
}

/// One frame's view of the world.
///
/// The round borrows each source's latest value for the duration of a single
/// frame, so it cannot outlive the frame it was built for.
pub struct Round<'a> {
    pub stars: &'a [Star],
    pub hero: &'a mut Hero,
    pub enemies: &'a mut [Enemy],
    pub score: &'a mut Score,
}
