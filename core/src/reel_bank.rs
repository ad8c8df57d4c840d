//! The reel bank. Drives N reels through one staggered spin at a time.
//!
//! PROTOCOL (per accepted spin pressed at time T):
//!   - reel i starts at T + i * start_stagger
//!   - reel i stops  at T + spin_duration + i * stop_stagger
//!   - SpinCompleted fires once, right after the last stop
//!
//! RULES:
//!   - At most one spin in flight. A press while busy is ignored.
//!   - Actions fire at their exact scheduled instant, whatever the frame size.
//!     Reels scroll up to that instant before the action applies.
//!   - Each reel owns its buffer and its RNG stream. No cross-reel mutation.

use crate::{
    clock::SimClock,
    config::MachineConfig,
    distribution::SymbolDistribution,
    error::{SimError, SimResult},
    event::MachineEvent,
    reel::{Reel, ReelGeometry, ReelView},
    rng::{RngBank, SimRng},
    schedule::{ReelAction, SpinSchedule, SpinTiming},
    symbol::Symbol,
    types::{Millis, SpinId},
};

struct ReelSlot {
    reel: Reel,
    rng:  SimRng,
}

struct ActiveSpin {
    spin_id:  SpinId,
    schedule: SpinSchedule,
}

pub struct ReelBank {
    clock:         SimClock,
    timing:        SpinTiming,
    distribution:  SymbolDistribution,
    reels:         Vec<ReelSlot>,
    active:        Option<ActiveSpin>,
    spins_started: SpinId,
}

impl ReelBank {
    /// Build a bank with one reel per RNG stream, in stream order.
    pub fn new(
        geometry: ReelGeometry,
        timing: SpinTiming,
        distribution: SymbolDistribution,
        rngs: Vec<SimRng>,
    ) -> SimResult<Self> {
        if rngs.is_empty() {
            return Err(SimError::InvalidConfig {
                reason: "a reel bank needs at least one reel".into(),
            });
        }
        geometry.validate()?;
        timing.validate(rngs.len())?;

        let reels = rngs
            .into_iter()
            .map(|mut rng| ReelSlot {
                reel: Reel::new(geometry.clone(), &distribution, &mut rng),
                rng,
            })
            .collect();

        Ok(Self {
            clock: SimClock::new(),
            timing,
            distribution,
            reels,
            active: None,
            spins_started: 0,
        })
    }

    pub fn from_config(config: &MachineConfig, rng_bank: &RngBank) -> SimResult<Self> {
        config.validate()?;
        Self::new(
            config.reel.clone(),
            config.timing.clone(),
            config.distribution()?,
            rng_bank.reel_streams(config.reel_count),
        )
    }

    /// Press spin. Returns the new spin's id, or `None` when a spin is
    /// already in flight (the press is ignored).
    pub fn spin(&mut self) -> Option<SpinId> {
        if let Some(active) = &self.active {
            log::debug!(
                "now_ms={} bank: spin pressed while spin {} in flight, ignored",
                self.clock.now_ms,
                active.spin_id
            );
            return None;
        }

        self.spins_started += 1;
        let spin_id = self.spins_started;
        let schedule = SpinSchedule::staggered(self.clock.now_ms, self.reels.len(), &self.timing);
        log::debug!(
            "now_ms={} bank: spin {spin_id} accepted, {} actions, completes at {}ms",
            self.clock.now_ms,
            schedule.len(),
            self.clock.now_ms.saturating_add(self.timing.total_duration_ms(self.reels.len()))
        );
        self.active = Some(ActiveSpin { spin_id, schedule });
        Some(spin_id)
    }

    /// Advance one frame of `elapsed_ms`. The clock stops at `Millis::MAX`.
    pub fn advance(&mut self, elapsed_ms: Millis) -> Vec<MachineEvent> {
        self.clock.begin_frame();
        let frame_end = self.clock.now_ms.saturating_add(elapsed_ms);
        let mut events = Vec::new();

        while let Some(at) = self.next_due_within(frame_end) {
            self.scroll_to(at);
            self.fire_due(&mut events);
        }
        self.scroll_to(frame_end);

        events
    }

    pub fn is_busy(&self) -> bool {
        self.active.is_some()
    }

    pub fn reel_count(&self) -> usize {
        self.reels.len()
    }

    pub fn now_ms(&self) -> Millis {
        self.clock.now_ms
    }

    pub fn clock(&self) -> &SimClock {
        &self.clock
    }

    pub fn timing(&self) -> &SpinTiming {
        &self.timing
    }

    pub fn reel(&self, index: usize) -> Option<&Reel> {
        self.reels.get(index).map(|slot| &slot.reel)
    }

    /// Each reel's target symbol, in reel order.
    /// Only meaningful once a spin has completed.
    pub fn result_symbols(&self) -> Vec<Symbol> {
        self.reels.iter().map(|slot| slot.reel.target_symbol()).collect()
    }

    pub fn views(&self) -> Vec<ReelView> {
        self.reels.iter().map(|slot| slot.reel.view()).collect()
    }

    fn next_due_within(&self, frame_end: Millis) -> Option<Millis> {
        self.active
            .as_ref()?
            .schedule
            .next_due()
            .filter(|&at| at <= frame_end)
    }

    /// Scroll every reel forward to `at`.
    fn scroll_to(&mut self, at: Millis) {
        let elapsed = self.clock.advance_to(at);
        if elapsed == 0 {
            return;
        }
        let frames = self.timing.frames_in(elapsed);
        for slot in &mut self.reels {
            slot.reel.update(frames, &self.distribution, &mut slot.rng);
        }
    }

    /// Apply every action due at the current instant.
    fn fire_due(&mut self, events: &mut Vec<MachineEvent>) {
        let now = self.clock.now_ms;
        let Some(active) = self.active.as_mut() else {
            return;
        };
        let spin_id = active.spin_id;

        while let Some(due) = active.schedule.pop_due(now) {
            let slot = &mut self.reels[due.reel];
            match due.action {
                ReelAction::Start => {
                    slot.reel.start_spin(&self.distribution, &mut slot.rng);
                    log::debug!(
                        "now_ms={now} bank: {} {} started (speed {:.1})",
                        slot.rng.name,
                        due.reel,
                        slot.reel.speed()
                    );
                    events.push(MachineEvent::ReelStarted {
                        spin_id,
                        reel: due.reel,
                        at_ms: now,
                    });
                }
                ReelAction::Stop => {
                    slot.reel.stop_spin();
                    let symbol = slot.reel.target_symbol();
                    log::debug!(
                        "now_ms={now} bank: {} {} stopped on {symbol}",
                        slot.rng.name,
                        due.reel
                    );
                    events.push(MachineEvent::ReelStopped {
                        spin_id,
                        reel: due.reel,
                        symbol,
                        at_ms: now,
                    });
                }
            }
        }

        if active.schedule.is_empty() {
            self.active = None;
            debug_assert!(self.reels.iter().all(|slot| !slot.reel.is_spinning()));
            events.push(MachineEvent::SpinCompleted {
                spin_id,
                symbols: self.result_symbols(),
                at_ms: now,
            });
        }
    }
}
