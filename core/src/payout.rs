//! Payout rules for a three-symbol line.
//!
//! Pure functions: same outcome in, same credits out.

use crate::{
    error::{SimError, SimResult},
    symbol::Symbol,
    types::{Credits, SpinId},
};
use serde::{Deserialize, Serialize};

/// Symbols on one payline.
pub const LINE_LEN: usize = 3;

/// Flat payout for exactly one matching pair.
pub const PAIR_PAYOUT: Credits = 5;

/// Payout for three of `symbol` on the line.
pub fn three_of_a_kind_payout(symbol: Symbol) -> Credits {
    match symbol {
        Symbol::Seven      => 100,
        Symbol::Star       => 50,
        Symbol::Bell       => 20,
        Symbol::Watermelon => 15,
        Symbol::Cherry | Symbol::Lemon => 10,
    }
}

/// Evaluate a completed line, in priority order:
///   1. all three equal  → symbol payout
///   2. any one pair     → PAIR_PAYOUT
///   3. otherwise        → 0
pub fn evaluate(outcome: &[Symbol; LINE_LEN]) -> Credits {
    let [a, b, c] = *outcome;
    if a == b && b == c {
        three_of_a_kind_payout(a)
    } else if a == b || b == c || a == c {
        PAIR_PAYOUT
    } else {
        0
    }
}

/// Copy reel results into a payline.
pub fn line_from(symbols: &[Symbol]) -> SimResult<[Symbol; LINE_LEN]> {
    symbols.try_into().map_err(|_| SimError::InvalidArgument {
        name:   "symbols",
        reason: format!("payline needs {LINE_LEN} symbols, got {}", symbols.len()),
    })
}

/// Like `evaluate`, for callers holding a slice of reel results.
pub fn evaluate_line(symbols: &[Symbol]) -> SimResult<Credits> {
    Ok(evaluate(&line_from(symbols)?))
}

/// Simplified one-symbol table used by the RTP simulator's
/// single-symbol model. It deliberately has no pair or miss rules.
pub fn single_symbol_payout(symbol: Symbol) -> Credits {
    three_of_a_kind_payout(symbol)
}

/// The settled result of one spin, handed to the presentation layer.
/// Score accumulation is the presentation layer's job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settlement {
    pub spin_id: SpinId,
    pub symbols: [Symbol; LINE_LEN],
    pub payout:  Credits,
    pub win:     bool,
}

impl Settlement {
    pub fn new(spin_id: SpinId, symbols: [Symbol; LINE_LEN]) -> Self {
        let payout = evaluate(&symbols);
        Self { spin_id, symbols, payout, win: payout > 0 }
    }
}
