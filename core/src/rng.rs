//! Deterministic random number generation.
//!
//! RULE: Nothing in the engine may call any platform RNG.
//! All randomness flows through SimRng instances derived
//! from a single master seed.
//!
//! Each consumer gets its own RNG stream, seeded deterministically
//! from (master_seed XOR stream_index). This means:
//!   - Adding a reel never changes the other reels' streams.
//!   - The simulator's stream is fully reproducible in isolation.

use rand::{RngCore, SeedableRng};
use rand_pcg::Pcg64Mcg;

/// A named, deterministic RNG for a single consumer.
pub struct SimRng {
    pub name: &'static str,
    inner: Pcg64Mcg,
}

impl SimRng {
    /// Create a stream from the master seed and a stable stream index.
    pub fn new(master_seed: u64, stream_index: u64) -> Self {
        let derived_seed = master_seed ^ (stream_index.wrapping_mul(0x9e37_79b9_7f4a_7c15));
        Self {
            name: "unnamed",
            inner: Pcg64Mcg::seed_from_u64(derived_seed),
        }
    }

    pub fn with_name(mut self, name: &'static str) -> Self {
        self.name = name;
        self
    }

    /// Roll a float in [0.0, 1.0).
    pub fn next_f64(&mut self) -> f64 {
        let bits = self.inner.next_u64();
        (bits >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }

    /// Draw a raw u64 (full range).
    pub fn next_u64(&mut self) -> u64 {
        self.inner.next_u64()
    }

    /// Roll a float in [lo, hi).
    pub fn range_f64(&mut self, lo: f64, hi: f64) -> f64 {
        lo + self.next_f64() * (hi - lo)
    }
}

/// Hands out the RNG streams of one machine, indexed by stable slot.
pub struct RngBank {
    master_seed: u64,
}

impl RngBank {
    pub fn new(master_seed: u64) -> Self {
        Self { master_seed }
    }

    pub fn for_stream(&self, slot: StreamSlot) -> SimRng {
        SimRng::new(self.master_seed, slot.index()).with_name(slot.name())
    }

    /// One stream per reel, in reel index order.
    pub fn reel_streams(&self, reel_count: usize) -> Vec<SimRng> {
        (0..reel_count as u32)
            .map(|i| self.for_stream(StreamSlot::Reel(i)))
            .collect()
    }
}

/// Stable stream assignments.
/// NEVER renumber an existing slot: it changes that stream's seed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StreamSlot {
    Simulator,
    Reel(u32),
}

impl StreamSlot {
    pub fn index(&self) -> u64 {
        match self {
            Self::Simulator => 0,
            Self::Reel(i)   => 1 + *i as u64,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Simulator => "simulator",
            Self::Reel(_)   => "reel",
        }
    }
}
