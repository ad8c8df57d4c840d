//! Events emitted while a machine advances.
//!
//! Presentation surfaces consume these to play sounds, show overlays and
//! update their scoreboards.

use crate::{
    symbol::Symbol,
    types::{Credits, Millis, SpinId},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MachineEvent {
    // ── Reel bank ──────────────────────────────────
    ReelStarted {
        spin_id: SpinId,
        reel:    usize,
        at_ms:   Millis,
    },
    ReelStopped {
        spin_id: SpinId,
        reel:    usize,
        symbol:  Symbol,
        at_ms:   Millis,
    },
    /// Fires once per spin, after the last reel has stopped.
    SpinCompleted {
        spin_id: SpinId,
        symbols: Vec<Symbol>,
        at_ms:   Millis,
    },

    // ── Engine ─────────────────────────────────────
    PayoutAwarded {
        spin_id: SpinId,
        symbols: Vec<Symbol>,
        payout:  Credits,
        win:     bool,
    },
}

impl MachineEvent {
    pub fn spin_id(&self) -> SpinId {
        match self {
            Self::ReelStarted { spin_id, .. }
            | Self::ReelStopped { spin_id, .. }
            | Self::SpinCompleted { spin_id, .. }
            | Self::PayoutAwarded { spin_id, .. } => *spin_id,
        }
    }

    /// Stable name of the variant, used in log lines.
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::ReelStarted { .. }   => "reel_started",
            Self::ReelStopped { .. }   => "reel_stopped",
            Self::SpinCompleted { .. } => "spin_completed",
            Self::PayoutAwarded { .. } => "payout_awarded",
        }
    }
}
