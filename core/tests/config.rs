//! Machine configuration loading and validation.

use slotsim_core::{
    config::MachineConfig,
    error::SimError,
    schedule::SpinTiming,
    simulator::PayoutModel,
};

const MACHINE_FILE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../data/machine.json");

#[test]
fn shipped_machine_file_matches_builtin_defaults() {
    let loaded = MachineConfig::load(MACHINE_FILE).expect("data/machine.json loads");
    assert_eq!(loaded, MachineConfig::default());
}

#[test]
fn defaults_validate() {
    let config = MachineConfig::default();
    config.validate().unwrap();
    assert_eq!(config.reel_count, 3);
    assert_eq!(config.simulator.default_spins, 10_000);
    assert_eq!(config.simulator.payout_model, PayoutModel::SingleSymbol);
    assert_eq!(config.timing.total_duration_ms(config.reel_count), 2600);
}

#[test]
fn missing_file_is_reported() {
    let err = MachineConfig::load("/nonexistent/machine.json").unwrap_err();
    assert!(err.to_string().contains("Cannot read"), "{err}");
}

#[test]
fn optional_sections_take_defaults() {
    let json = r#"{
        "reel_count": 3,
        "symbols": [
            { "symbol": "Cherry",     "probability": 0.25 },
            { "symbol": "Lemon",      "probability": 0.25 },
            { "symbol": "Bell",       "probability": 0.20 },
            { "symbol": "Watermelon", "probability": 0.10 },
            { "symbol": "Star",       "probability": 0.10 },
            { "symbol": "Seven",      "probability": 0.10 }
        ]
    }"#;
    let config: MachineConfig = serde_json::from_str(json).unwrap();
    config.validate().unwrap();
    assert_eq!(config.timing, SpinTiming::default());
    assert_eq!(config.simulator.default_spins, 10_000);
}

#[test]
fn skewed_table_is_fatal() {
    let mut config = MachineConfig::default();
    config.symbols[0].probability = 0.40;
    assert!(matches!(
        config.validate(),
        Err(SimError::InvalidDistribution { .. })
    ));
}

#[test]
fn bad_shapes_are_rejected() {
    let zero_reels = MachineConfig { reel_count: 0, ..MachineConfig::default() };
    assert!(matches!(zero_reels.validate(), Err(SimError::InvalidConfig { .. })));

    let mut zero_spins = MachineConfig::default();
    zero_spins.simulator.default_spins = 0;
    assert!(matches!(zero_spins.validate(), Err(SimError::InvalidConfig { .. })));

    let mut no_cells = MachineConfig::default();
    no_cells.reel.cell_height = 0.0;
    assert!(matches!(no_cells.validate(), Err(SimError::InvalidConfig { .. })));

    let mut inverted_speed = MachineConfig::default();
    inverted_speed.reel.min_speed = 40.0;
    assert!(matches!(inverted_speed.validate(), Err(SimError::InvalidConfig { .. })));

    let mut no_fps = MachineConfig::default();
    no_fps.timing.frames_per_second = 0.0;
    assert!(matches!(no_fps.validate(), Err(SimError::InvalidConfig { .. })));
}
