//! The slot engine: the one game loop every presentation surface adapts.
//!
//! FRAME ORDER (fixed):
//!   1. Reel bank fires due start/stop actions and scrolls the reels.
//!   2. On SpinCompleted, the line is settled and PayoutAwarded appended.
//!
//! RULES:
//!   - The engine never owns a score. It hands out payout deltas; the
//!     presentation layer keeps the running total.
//!   - All randomness flows through the RngBank.
//!   - A spin press while busy is ignored, never an error.

use crate::{
    config::MachineConfig,
    error::{SimError, SimResult},
    event::MachineEvent,
    payout::{self, Settlement, LINE_LEN},
    reel::ReelView,
    reel_bank::ReelBank,
    rng::RngBank,
    symbol::Symbol,
    types::{Millis, Tick},
};
use serde::{Deserialize, Serialize};

/// Everything a presentation surface draws for one frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MachineView {
    pub tick:            Tick,
    pub now_ms:          Millis,
    pub busy:            bool,
    pub reels:           Vec<ReelView>,
    pub last_settlement: Option<Settlement>,
}

pub struct SlotEngine {
    seed:            u64,
    bank:            ReelBank,
    last_settlement: Option<Settlement>,
}

impl SlotEngine {
    /// Build a three-reel machine from `config`, seeded with `seed`.
    pub fn new(config: &MachineConfig, seed: u64) -> SimResult<Self> {
        if config.reel_count != LINE_LEN {
            return Err(SimError::InvalidConfig {
                reason: format!(
                    "the payline needs {LINE_LEN} reels, config has {}",
                    config.reel_count
                ),
            });
        }
        let rng_bank = RngBank::new(seed);
        let bank = ReelBank::from_config(config, &rng_bank)?;
        log::debug!("engine: built machine with seed {seed}");
        Ok(Self {
            seed,
            bank,
            last_settlement: None,
        })
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Press spin. Returns false when the press was ignored.
    pub fn press_spin(&mut self) -> bool {
        self.bank.spin().is_some()
    }

    /// Advance one frame of `elapsed_ms`.
    pub fn advance(&mut self, elapsed_ms: Millis) -> SimResult<Vec<MachineEvent>> {
        let mut events = self.bank.advance(elapsed_ms);
        for event in &events {
            log::trace!("now_ms={} engine: {}", self.bank.now_ms(), event.event_type());
        }

        let settled: Vec<Settlement> = events
            .iter()
            .filter_map(|event| match event {
                MachineEvent::SpinCompleted { spin_id, symbols, .. } => {
                    Some(payout::line_from(symbols).map(|line| Settlement::new(*spin_id, line)))
                }
                _ => None,
            })
            .collect::<SimResult<_>>()?;

        for settlement in settled {
            log::info!(
                "now_ms={} engine: spin {} settled {:?} payout={}",
                self.bank.now_ms(),
                settlement.spin_id,
                settlement.symbols,
                settlement.payout
            );
            events.push(MachineEvent::PayoutAwarded {
                spin_id: settlement.spin_id,
                symbols: settlement.symbols.to_vec(),
                payout:  settlement.payout,
                win:     settlement.win,
            });
            self.last_settlement = Some(settlement);
        }

        Ok(events)
    }

    pub fn is_busy(&self) -> bool {
        self.bank.is_busy()
    }

    pub fn last_settlement(&self) -> Option<&Settlement> {
        self.last_settlement.as_ref()
    }

    pub fn result_symbols(&self) -> Vec<Symbol> {
        self.bank.result_symbols()
    }

    pub fn bank(&self) -> &ReelBank {
        &self.bank
    }

    pub fn view(&self) -> MachineView {
        MachineView {
            tick:            self.bank.clock().current_tick,
            now_ms:          self.bank.now_ms(),
            busy:            self.bank.is_busy(),
            reels:           self.bank.views(),
            last_settlement: self.last_settlement.clone(),
        }
    }
}
