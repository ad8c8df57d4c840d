//! Slot-machine simulation engine.
//!
//! Weighted symbol draws feed both the animated reel bank and the RTP
//! simulator. The reel bank runs on a virtual clock: presentation surfaces
//! feed it frame durations and render what it reports.

pub mod clock;
pub mod command;
pub mod config;
pub mod distribution;
pub mod engine;
pub mod error;
pub mod event;
pub mod payout;
pub mod reel;
pub mod reel_bank;
pub mod rng;
pub mod schedule;
pub mod simulator;
pub mod symbol;
pub mod types;
