//! Reel state machine tests.

use slotsim_core::{
    distribution::SymbolDistribution,
    reel::{Reel, ReelGeometry},
    rng::{RngBank, SimRng, StreamSlot},
    symbol::Symbol,
};

fn build_reel(seed: u64) -> (Reel, SymbolDistribution, SimRng) {
    let dist = SymbolDistribution::standard();
    let mut rng = RngBank::new(seed).for_stream(StreamSlot::Reel(0));
    let reel = Reel::new(ReelGeometry::default(), &dist, &mut rng);
    (reel, dist, rng)
}

#[test]
fn new_reel_is_idle_with_full_buffer() {
    let (reel, _, _) = build_reel(1);
    assert!(!reel.is_spinning());
    assert_eq!(reel.position(), 0.0);
    assert_eq!(reel.symbols().count(), 20);
    assert_eq!(reel.view().symbols.len(), 5);
}

#[test]
fn update_while_idle_changes_nothing() {
    let (mut reel, dist, mut rng) = build_reel(2);
    let before: Vec<Symbol> = reel.symbols().collect();
    reel.update(500.0, &dist, &mut rng);
    let after: Vec<Symbol> = reel.symbols().collect();
    assert_eq!(before, after);
    assert_eq!(reel.position(), 0.0);
}

#[test]
fn start_spin_picks_speed_in_range() {
    for seed in 0..50 {
        let (mut reel, dist, mut rng) = build_reel(seed);
        reel.start_spin(&dist, &mut rng);
        assert!(reel.is_spinning());
        assert!(
            (20.0..30.0).contains(&reel.speed()),
            "seed {seed}: speed {} out of range",
            reel.speed()
        );
    }
}

/// One cell of travel shifts exactly one symbol in, even when a single
/// update crosses many cells.
#[test]
fn long_update_scrolls_once_per_cell() {
    let (mut reel, dist, mut rng) = build_reel(3);
    reel.start_spin(&dist, &mut rng);
    let before: Vec<Symbol> = reel.symbols().collect();

    let delta = 7.0;
    reel.update(delta, &dist, &mut rng);

    let travel = reel.speed() * delta;
    let shifted = (travel / 50.0).floor() as usize;
    assert!(shifted >= 2, "expected several cells of travel, got {travel}");

    let after: Vec<Symbol> = reel.symbols().collect();
    assert_eq!(after.len(), 20);
    assert_eq!(&after[..20 - shifted], &before[shifted..]);
    assert!((reel.position() - travel % 50.0).abs() < 1e-9);
    assert!(reel.position() < 50.0);
}

#[test]
fn enormous_update_refills_buffer_and_returns() {
    let (mut reel, dist, mut rng) = build_reel(5);
    reel.start_spin(&dist, &mut rng);
    let target = reel.target_symbol();

    reel.update(1e18, &dist, &mut rng);

    assert_eq!(reel.symbols().count(), 20);
    assert!((0.0..50.0).contains(&reel.position()), "position {}", reel.position());
    reel.stop_spin();
    assert_eq!(reel.last_symbol(), Some(target));
}

#[test]
fn stop_commits_target_to_last_slot() {
    for seed in 0..100 {
        let (mut reel, dist, mut rng) = build_reel(seed);
        reel.start_spin(&dist, &mut rng);
        let target = reel.target_symbol();

        // 2.6 seconds of 60fps frames.
        for _ in 0..156 {
            reel.update(1.0, &dist, &mut rng);
        }
        reel.stop_spin();

        assert!(!reel.is_spinning());
        assert_eq!(reel.position(), 0.0);
        assert_eq!(reel.target_symbol(), target, "seed {seed}: target changed mid-spin");
        assert_eq!(reel.last_symbol(), Some(target), "seed {seed}");
    }
}

#[test]
fn reel_obeys_restart_while_spinning() {
    let (mut reel, dist, mut rng) = build_reel(4);
    reel.start_spin(&dist, &mut rng);
    reel.update(3.0, &dist, &mut rng);
    reel.start_spin(&dist, &mut rng);
    assert!(reel.is_spinning());
    let target = reel.target_symbol();
    reel.stop_spin();
    assert_eq!(reel.last_symbol(), Some(target));
}
