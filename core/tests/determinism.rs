//! Two engines, same seed, same inputs.
//! They must produce identical event logs and identical frames.

use slotsim_core::{config::MachineConfig, engine::SlotEngine, event::MachineEvent};

const FRAME_MS: u64 = 16;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Play `spins` spins back to back, serializing every event.
fn collect_event_log(seed: u64, spins: usize) -> Vec<String> {
    let mut engine = SlotEngine::new(&MachineConfig::default(), seed).expect("engine");
    let mut log = Vec::new();
    for _ in 0..spins {
        engine.press_spin();
        loop {
            let events = engine.advance(FRAME_MS).expect("advance");
            let settled = events
                .iter()
                .any(|e| matches!(e, MachineEvent::PayoutAwarded { .. }));
            log.extend(events.iter().map(|e| serde_json::to_string(e).expect("serialize")));
            log.push(serde_json::to_string(&engine.view()).expect("serialize view"));
            if settled {
                break;
            }
        }
    }
    log
}

#[test]
fn same_seed_produces_identical_event_logs() {
    init_logging();
    const SEED: u64 = 0xDEAD_BEEF_CAFE_1234;

    let log_a = collect_event_log(SEED, 20);
    let log_b = collect_event_log(SEED, 20);

    assert_eq!(
        log_a.len(), log_b.len(),
        "Event log lengths differ: {} vs {}",
        log_a.len(), log_b.len()
    );

    for (i, (a, b)) in log_a.iter().zip(log_b.iter()).enumerate() {
        assert_eq!(a, b, "Event log diverged at entry {i}:\n  A: {a}\n  B: {b}");
    }
}

#[test]
fn different_seeds_produce_different_logs() {
    init_logging();
    let log_a = collect_event_log(42, 20);
    let log_b = collect_event_log(99, 20);

    let any_different = log_a.iter().zip(log_b.iter()).any(|(a, b)| a != b);
    assert!(any_different, "Different seeds produced identical logs: seed is not being used");
}
