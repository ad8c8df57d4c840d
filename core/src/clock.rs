//! Virtual clock. Owns frame count and the current instant.
//!
//! The bank never looks at wall-clock time. Presentation surfaces feed it
//! frame durations; tests feed it whatever they like.

use crate::types::{Millis, Tick};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SimClock {
    pub current_tick: Tick,
    pub now_ms:       Millis,
}

impl SimClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count a new frame. Returns the new tick number.
    pub fn begin_frame(&mut self) -> Tick {
        self.current_tick += 1;
        self.current_tick
    }

    /// Move time forward to `at` and return the elapsed milliseconds.
    /// Time never moves backwards; an earlier `at` is a no-op.
    pub fn advance_to(&mut self, at: Millis) -> Millis {
        let elapsed = at.saturating_sub(self.now_ms);
        self.now_ms += elapsed;
        elapsed
    }
}
