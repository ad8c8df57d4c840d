//! Slot engine tests: settle, payout delta and busy handling.

use slotsim_core::{
    config::MachineConfig,
    distribution::SymbolProbability,
    engine::SlotEngine,
    error::SimError,
    event::MachineEvent,
    payout,
    symbol::Symbol,
};

const FRAME_MS: u64 = 17;

fn play_one(engine: &mut SlotEngine) -> Vec<MachineEvent> {
    assert!(engine.press_spin(), "machine should be idle");
    let mut events = Vec::new();
    for _ in 0..1_000 {
        events.extend(engine.advance(FRAME_MS).expect("advance"));
        if !engine.is_busy() {
            return events;
        }
    }
    panic!("spin never settled");
}

#[test]
fn settled_spin_awards_line_payout() {
    let mut engine = SlotEngine::new(&MachineConfig::default(), 42).unwrap();
    let events = play_one(&mut engine);

    let awards: Vec<_> = events
        .iter()
        .filter_map(|e| match e {
            MachineEvent::PayoutAwarded { symbols, payout, win, .. } => Some((symbols.clone(), *payout, *win)),
            _ => None,
        })
        .collect();
    assert_eq!(awards.len(), 1);

    let (symbols, paid, win) = &awards[0];
    assert_eq!(symbols, &engine.result_symbols());
    assert_eq!(*paid, payout::evaluate_line(symbols).unwrap());
    assert_eq!(*win, *paid > 0);

    let settlement = engine.last_settlement().expect("settled");
    assert_eq!(settlement.payout, *paid);
    assert_eq!(settlement.spin_id, 1);

    // PayoutAwarded comes straight after SpinCompleted.
    let n = events.len();
    assert!(matches!(events[n - 2], MachineEvent::SpinCompleted { .. }));
    assert!(matches!(events[n - 1], MachineEvent::PayoutAwarded { .. }));
}

#[test]
fn press_is_ignored_while_busy() {
    let mut engine = SlotEngine::new(&MachineConfig::default(), 1).unwrap();
    assert!(engine.press_spin());
    engine.advance(FRAME_MS).unwrap();
    assert!(engine.is_busy());
    assert!(!engine.press_spin());
    assert!(!engine.press_spin());

    let mut awards = 0;
    for _ in 0..400 {
        awards += engine
            .advance(FRAME_MS)
            .unwrap()
            .iter()
            .filter(|e| matches!(e, MachineEvent::PayoutAwarded { .. }))
            .count();
    }
    assert_eq!(awards, 1);
}

#[test]
fn payout_deltas_sum_to_a_presentation_score() {
    let mut engine = SlotEngine::new(&MachineConfig::default(), 2024).unwrap();
    let mut score = 0u64;
    let mut expected = 0u64;

    for _ in 0..50 {
        for event in play_one(&mut engine) {
            if let MachineEvent::PayoutAwarded { payout, .. } = event {
                score += payout;
            }
        }
        expected += payout::evaluate_line(&engine.result_symbols()).unwrap();
    }

    assert_eq!(score, expected);
    assert_eq!(engine.last_settlement().map(|s| s.spin_id), Some(50));
}

#[test]
fn view_reports_reels_for_rendering() {
    let mut engine = SlotEngine::new(&MachineConfig::default(), 5).unwrap();
    engine.press_spin();
    engine.advance(500).unwrap();

    let view = engine.view();
    assert!(view.busy);
    assert_eq!(view.now_ms, 500);
    assert_eq!(view.tick, 1);
    assert_eq!(view.reels.len(), 3);
    for reel in &view.reels {
        assert_eq!(reel.symbols.len(), 5);
        assert!(reel.spinning);
        assert!(reel.offset >= 0.0 && reel.offset < 50.0);
    }
    assert!(view.last_settlement.is_none());

    let json = serde_json::to_string(&view).unwrap();
    assert!(json.contains("\"busy\":true"));
}

#[test]
fn engine_needs_three_reels() {
    let config = MachineConfig {
        reel_count: 5,
        ..MachineConfig::default()
    };
    assert!(matches!(
        SlotEngine::new(&config, 1),
        Err(SimError::InvalidConfig { .. })
    ));
}

#[test]
fn engine_refuses_malformed_table() {
    let mut config = MachineConfig::default();
    config.symbols.retain(|e| e.symbol != Symbol::Seven);
    config.symbols.push(SymbolProbability::new(Symbol::Star, 0.05));
    assert!(matches!(
        SlotEngine::new(&config, 1),
        Err(SimError::InvalidDistribution { .. })
    ));
}
