use crate::{
    distribution::{standard_table, SymbolDistribution, SymbolProbability},
    error::{SimError, SimResult},
    payout::LINE_LEN,
    reel::ReelGeometry,
    schedule::SpinTiming,
    simulator::PayoutModel,
};
use serde::{Deserialize, Serialize};

/// Spin count used when a simulation request does not name a usable one.
pub const DEFAULT_SIMULATION_SPINS: u64 = 10_000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulatorConfig {
    pub default_spins: u64,
    #[serde(default)]
    pub payout_model:  PayoutModel,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            default_spins: DEFAULT_SIMULATION_SPINS,
            payout_model:  PayoutModel::SingleSymbol,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MachineConfig {
    pub reel_count: usize,
    /// Ordered probability table. Order decides the rounding fallback.
    pub symbols:    Vec<SymbolProbability>,
    #[serde(default)]
    pub timing:     SpinTiming,
    #[serde(default)]
    pub reel:       ReelGeometry,
    #[serde(default)]
    pub simulator:  SimulatorConfig,
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self {
            reel_count: LINE_LEN,
            symbols:    standard_table(),
            timing:     SpinTiming::default(),
            reel:       ReelGeometry::default(),
            simulator:  SimulatorConfig::default(),
        }
    }
}

impl MachineConfig {
    /// Load and validate a machine file (see data/machine.json).
    /// In tests, use MachineConfig::default().
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        let config: MachineConfig = serde_json::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Cannot parse {path}: {e}"))?;
        config.validate()?;
        log::info!(
            "config: loaded {path} ({} reels, {} symbols)",
            config.reel_count,
            config.symbols.len()
        );
        Ok(config)
    }

    /// Reject anything the machine must not run with.
    pub fn validate(&self) -> SimResult<()> {
        if self.reel_count == 0 {
            return Err(SimError::InvalidConfig {
                reason: "reel_count must be > 0".into(),
            });
        }
        if self.simulator.default_spins == 0 {
            return Err(SimError::InvalidConfig {
                reason: "simulator.default_spins must be > 0".into(),
            });
        }
        self.distribution()?;
        self.reel.validate()?;
        self.timing.validate(self.reel_count)?;
        Ok(())
    }

    pub fn distribution(&self) -> SimResult<SymbolDistribution> {
        SymbolDistribution::new(self.symbols.clone())
    }
}
