//! RTP simulator: bulk draws with no reels and no animation.
//!
//! Two payout models:
//!   - SingleSymbol: one draw per spin through the simplified one-symbol
//!     table. Keeps the figures the statistics endpoint has always reported.
//!   - ThreeReel: three draws per spin through the full line rules,
//!     i.e. the same odds the reel game pays out.

use crate::{
    distribution::SymbolDistribution,
    error::{SimError, SimResult},
    payout::{self, LINE_LEN},
    rng::SimRng,
    types::Credits,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayoutModel {
    #[default]
    SingleSymbol,
    ThreeReel,
}

impl PayoutModel {
    /// Payout of one simulated spin.
    pub fn draw(&self, dist: &SymbolDistribution, rng: &mut SimRng) -> Credits {
        match self {
            Self::SingleSymbol => payout::single_symbol_payout(dist.sample(rng)),
            Self::ThreeReel => {
                let line: [_; LINE_LEN] = std::array::from_fn(|_| dist.sample(rng));
                payout::evaluate(&line)
            }
        }
    }

    /// Exact expected payout per spin under `dist`.
    pub fn expected_payout(&self, dist: &SymbolDistribution) -> f64 {
        let entries = dist.entries();
        match self {
            Self::SingleSymbol => entries
                .iter()
                .map(|e| e.probability * payout::single_symbol_payout(e.symbol) as f64)
                .sum(),
            Self::ThreeReel => {
                let mut ev = 0.0;
                for a in entries {
                    for b in entries {
                        for c in entries {
                            let p = a.probability * b.probability * c.probability;
                            ev += p * payout::evaluate(&[a.symbol, b.symbol, c.symbol]) as f64;
                        }
                    }
                }
                ev
            }
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "single_symbol" | "single" => Some(Self::SingleSymbol),
            "three_reel" | "three"     => Some(Self::ThreeReel),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationReport {
    pub spins:          u64,
    pub total_payout:   Credits,
    pub average_payout: f64,
    pub wins:           u64,
}

impl SimulationReport {
    /// Share of spins that paid anything.
    pub fn hit_rate(&self) -> f64 {
        self.wins as f64 / self.spins as f64
    }
}

pub struct RtpSimulator {
    distribution: SymbolDistribution,
    model:        PayoutModel,
    rng:          SimRng,
}

impl RtpSimulator {
    pub fn new(distribution: SymbolDistribution, model: PayoutModel, rng: SimRng) -> Self {
        Self { distribution, model, rng }
    }

    pub fn model(&self) -> PayoutModel {
        self.model
    }

    /// Run `spins` independent trials.
    pub fn run(&mut self, spins: u64) -> SimResult<SimulationReport> {
        if spins == 0 {
            return Err(SimError::InvalidArgument {
                name:   "spins",
                reason: "spin count must be positive".into(),
            });
        }

        let mut total_payout: Credits = 0;
        let mut wins = 0u64;
        for _ in 0..spins {
            let paid = self.model.draw(&self.distribution, &mut self.rng);
            total_payout += paid;
            if paid > 0 {
                wins += 1;
            }
        }

        let report = SimulationReport {
            spins,
            total_payout,
            average_payout: total_payout as f64 / spins as f64,
            wins,
        };
        log::info!(
            "{}: {:?} spins={} total={} avg={:.4} wins={} (expected avg {:.4})",
            self.rng.name,
            self.model,
            report.spins,
            report.total_payout,
            report.average_payout,
            report.wins,
            self.model.expected_payout(&self.distribution)
        );
        Ok(report)
    }
}
