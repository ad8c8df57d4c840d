//! Weighted symbol sampling.
//!
//! The table is validated once at construction and is read-only afterwards.
//! A malformed table is fatal: the machine refuses to run rather than
//! silently skew the odds.

use crate::{
    error::{SimError, SimResult},
    rng::SimRng,
    symbol::Symbol,
};
use serde::{Deserialize, Serialize};

/// Allowed drift of the weight sum away from 1.0.
pub const PROBABILITY_TOLERANCE: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SymbolProbability {
    pub symbol:      Symbol,
    pub probability: f64,
}

impl SymbolProbability {
    pub const fn new(symbol: Symbol, probability: f64) -> Self {
        Self { symbol, probability }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SymbolDistribution {
    entries: Vec<SymbolProbability>,
}

impl SymbolDistribution {
    /// Validate and wrap an ordered probability table.
    pub fn new(entries: Vec<SymbolProbability>) -> SimResult<Self> {
        validate_table(&entries)?;
        Ok(Self { entries })
    }

    /// The stock table every machine ships with.
    pub fn standard() -> Self {
        Self {
            entries: standard_table(),
        }
    }

    pub fn entries(&self) -> &[SymbolProbability] {
        &self.entries
    }

    pub fn probability_of(&self, symbol: Symbol) -> f64 {
        self.entries
            .iter()
            .find(|e| e.symbol == symbol)
            .map(|e| e.probability)
            .unwrap_or(0.0)
    }

    /// Map a uniform value `u` in [0, 1) onto the table.
    ///
    /// Returns the first entry whose cumulative weight reaches `u`. When
    /// rounding leaves the final cumulative sum below `u`, the last table
    /// entry wins.
    pub fn pick(&self, u: f64) -> Symbol {
        let mut cumulative = 0.0;
        for entry in &self.entries {
            cumulative += entry.probability;
            if cumulative >= u {
                return entry.symbol;
            }
        }
        // Non-empty by construction.
        self.entries[self.entries.len() - 1].symbol
    }

    /// Draw one symbol.
    pub fn sample(&self, rng: &mut SimRng) -> Symbol {
        self.pick(rng.next_f64())
    }
}

impl Default for SymbolDistribution {
    fn default() -> Self {
        Self::standard()
    }
}

pub fn standard_table() -> Vec<SymbolProbability> {
    vec![
        SymbolProbability::new(Symbol::Cherry,     0.30),
        SymbolProbability::new(Symbol::Lemon,      0.30),
        SymbolProbability::new(Symbol::Bell,       0.15),
        SymbolProbability::new(Symbol::Watermelon, 0.10),
        SymbolProbability::new(Symbol::Star,       0.10),
        SymbolProbability::new(Symbol::Seven,      0.05),
    ]
}

fn validate_table(entries: &[SymbolProbability]) -> SimResult<()> {
    let invalid = |reason: String| Err(SimError::InvalidDistribution { reason });

    if entries.is_empty() {
        return invalid("table is empty".into());
    }

    for symbol in Symbol::ALL {
        let count = entries.iter().filter(|e| e.symbol == symbol).count();
        match count {
            1 => {}
            0 => return invalid(format!("{symbol} has no entry")),
            n => return invalid(format!("{symbol} listed {n} times")),
        }
    }

    for entry in entries {
        let p = entry.probability;
        if !p.is_finite() || p <= 0.0 || p > 1.0 {
            return invalid(format!("{} has weight {p}, expected (0, 1]", entry.symbol));
        }
    }

    let sum: f64 = entries.iter().map(|e| e.probability).sum();
    if (sum - 1.0).abs() > PROBABILITY_TOLERANCE {
        return invalid(format!("weights sum to {sum}, expected 1.0"));
    }

    Ok(())
}
