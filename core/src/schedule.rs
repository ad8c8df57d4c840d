//! Staggered spin schedule.
//!
//! A spin is a fixed list of (time, reel, action) entries computed up front
//! and drained against the virtual clock. Nothing is fire-and-forget.

use crate::{
    error::{SimError, SimResult},
    types::Millis,
};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpinTiming {
    /// Delay between consecutive reel starts.
    pub start_stagger_ms:  Millis,
    /// Delay from the spin press to the first reel's stop.
    pub spin_duration_ms:  Millis,
    /// Delay between consecutive reel stops.
    pub stop_stagger_ms:   Millis,
    /// Rate at which reel speeds are expressed (scroll units per frame).
    pub frames_per_second: f64,
}

impl Default for SpinTiming {
    fn default() -> Self {
        Self {
            start_stagger_ms:  200,
            spin_duration_ms:  2000,
            stop_stagger_ms:   300,
            frames_per_second: 60.0,
        }
    }
}

impl SpinTiming {
    /// Offsets saturate at `Millis::MAX` rather than wrap.
    pub fn start_at(&self, reel: usize) -> Millis {
        (reel as Millis).saturating_mul(self.start_stagger_ms)
    }

    pub fn stop_at(&self, reel: usize) -> Millis {
        self.spin_duration_ms
            .saturating_add((reel as Millis).saturating_mul(self.stop_stagger_ms))
    }

    /// Press-to-completion time for a bank of `reel_count` reels.
    pub fn total_duration_ms(&self, reel_count: usize) -> Millis {
        self.stop_at(reel_count.saturating_sub(1))
    }

    /// Milliseconds of one frame at `frames_per_second`, rounded.
    pub fn frame_ms(&self) -> Millis {
        (1000.0 / self.frames_per_second).round().max(1.0) as Millis
    }

    /// Convert elapsed milliseconds into frame units.
    pub fn frames_in(&self, elapsed_ms: Millis) -> f64 {
        elapsed_ms as f64 * self.frames_per_second / 1000.0
    }

    pub fn validate(&self, reel_count: usize) -> SimResult<()> {
        if !self.frames_per_second.is_finite() || self.frames_per_second <= 0.0 {
            return Err(SimError::InvalidConfig {
                reason: format!("frames_per_second must be > 0, got {}", self.frames_per_second),
            });
        }
        if let Some(reel) = (0..reel_count).find(|&i| self.stop_at(i) < self.start_at(i)) {
            return Err(SimError::InvalidConfig {
                reason: format!(
                    "reel {reel} would stop at {}ms before starting at {}ms",
                    self.stop_at(reel),
                    self.start_at(reel)
                ),
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReelAction {
    Start,
    Stop,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledAction {
    pub at_ms:  Millis,
    pub reel:   usize,
    pub action: ReelAction,
}

#[derive(Debug, Clone, Default)]
pub struct SpinSchedule {
    actions: VecDeque<ScheduledAction>,
}

impl SpinSchedule {
    /// Build the schedule of one spin pressed at `origin`.
    ///
    /// Ordered by time. Ties keep starts ahead of stops and lower
    /// reel indices ahead of higher ones.
    pub fn staggered(origin: Millis, reel_count: usize, timing: &SpinTiming) -> Self {
        let starts = (0..reel_count).map(|reel| ScheduledAction {
            at_ms:  origin.saturating_add(timing.start_at(reel)),
            reel,
            action: ReelAction::Start,
        });
        let stops = (0..reel_count).map(|reel| ScheduledAction {
            at_ms:  origin.saturating_add(timing.stop_at(reel)),
            reel,
            action: ReelAction::Stop,
        });
        let mut actions: Vec<ScheduledAction> = starts.chain(stops).collect();
        // Stable: insertion order breaks ties.
        actions.sort_by_key(|a| a.at_ms);
        Self { actions: actions.into() }
    }

    /// Time of the next pending action.
    pub fn next_due(&self) -> Option<Millis> {
        self.actions.front().map(|a| a.at_ms)
    }

    /// Pop the next action if it is due at or before `now`.
    pub fn pop_due(&mut self, now: Millis) -> Option<ScheduledAction> {
        if self.next_due()? <= now {
            self.actions.pop_front()
        } else {
            None
        }
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}
