//! A single spinning reel.
//!
//! States: Idle → Spinning → Idle. The reel obeys every start/stop call it
//! receives; refusing a second spin is the bank's job.
//!
//! While spinning, the buffer scrolls: every full cell of travel drops the
//! oldest symbol and appends a fresh draw. On stop the last slot is forced
//! to the target chosen at start, so the committed outcome never depends on
//! what happened to scroll past.

use crate::{
    distribution::SymbolDistribution,
    error::{SimError, SimResult},
    rng::SimRng,
    symbol::Symbol,
};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReelGeometry {
    /// Symbols held in the scroll buffer.
    pub buffer_len:   usize,
    /// Scroll units per symbol cell.
    pub cell_height:  f64,
    /// Rows a presentation surface shows at once.
    pub visible_rows: usize,
    /// Spin speed bounds in scroll units per frame, `[min, max)`.
    pub min_speed:    f64,
    pub max_speed:    f64,
}

impl Default for ReelGeometry {
    fn default() -> Self {
        Self {
            buffer_len:   20,
            cell_height:  50.0,
            visible_rows: 5,
            min_speed:    20.0,
            max_speed:    30.0,
        }
    }
}

impl ReelGeometry {
    pub fn validate(&self) -> SimResult<()> {
        let invalid = |reason: String| Err(SimError::InvalidConfig { reason });
        if self.buffer_len == 0 {
            return invalid("reel buffer_len must be > 0".into());
        }
        if self.visible_rows == 0 || self.visible_rows > self.buffer_len {
            return invalid(format!(
                "visible_rows must be in 1..={}, got {}",
                self.buffer_len, self.visible_rows
            ));
        }
        if !self.cell_height.is_finite() || self.cell_height <= 0.0 {
            return invalid(format!("cell_height must be > 0, got {}", self.cell_height));
        }
        if !(self.min_speed.is_finite() && self.max_speed.is_finite())
            || self.min_speed <= 0.0
            || self.min_speed > self.max_speed
        {
            return invalid(format!(
                "speed range [{}, {}) is not a positive interval",
                self.min_speed, self.max_speed
            ));
        }
        Ok(())
    }
}

/// What a presentation surface needs to draw one reel for one frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReelView {
    pub symbols:  Vec<Symbol>,
    pub offset:   f64,
    pub spinning: bool,
}

#[derive(Debug, Clone)]
pub struct Reel {
    geometry: ReelGeometry,
    buffer:   VecDeque<Symbol>,
    position: f64,
    speed:    f64,
    target:   Symbol,
    spinning: bool,
}

impl Reel {
    /// Build an idle reel with a buffer of independent draws.
    pub fn new(geometry: ReelGeometry, dist: &SymbolDistribution, rng: &mut SimRng) -> Self {
        let buffer: VecDeque<Symbol> = (0..geometry.buffer_len).map(|_| dist.sample(rng)).collect();
        let target = buffer.back().copied().unwrap_or(Symbol::Cherry);
        Self {
            geometry,
            buffer,
            position: 0.0,
            speed: 0.0,
            target,
            spinning: false,
        }
    }

    pub fn start_spin(&mut self, dist: &SymbolDistribution, rng: &mut SimRng) {
        self.spinning = true;
        self.speed = rng.range_f64(self.geometry.min_speed, self.geometry.max_speed);
        self.target = dist.sample(rng);
    }

    /// Scroll by `delta` frames. No-op when idle.
    pub fn update(&mut self, delta: f64, dist: &SymbolDistribution, rng: &mut SimRng) {
        if !self.spinning {
            return;
        }
        self.position += self.speed * delta;
        let cells = (self.position / self.geometry.cell_height).floor();
        if cells >= self.geometry.buffer_len as f64 {
            // Every slot scrolls out: refill in one pass.
            self.position = self.position.rem_euclid(self.geometry.cell_height);
            for slot in self.buffer.iter_mut() {
                *slot = dist.sample(rng);
            }
        }
        // A long frame may cross several cells.
        while self.position >= self.geometry.cell_height {
            self.position -= self.geometry.cell_height;
            self.buffer.pop_front();
            self.buffer.push_back(dist.sample(rng));
        }
    }

    pub fn stop_spin(&mut self) {
        self.spinning = false;
        self.position = 0.0;
        if let Some(last) = self.buffer.back_mut() {
            *last = self.target;
        }
    }

    pub fn is_spinning(&self) -> bool {
        self.spinning
    }

    pub fn target_symbol(&self) -> Symbol {
        self.target
    }

    pub fn position(&self) -> f64 {
        self.position
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn symbols(&self) -> impl Iterator<Item = Symbol> + '_ {
        self.buffer.iter().copied()
    }

    pub fn last_symbol(&self) -> Option<Symbol> {
        self.buffer.back().copied()
    }

    pub fn view(&self) -> ReelView {
        ReelView {
            symbols:  self.symbols().take(self.geometry.visible_rows).collect(),
            offset:   self.position,
            spinning: self.spinning,
        }
    }
}
