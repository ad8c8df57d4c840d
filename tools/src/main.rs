//! sim-runner: headless runner for the slot-machine engine.
//!
//! Usage:
//!   sim-runner --spins 100000 --model three_reel --seed 42
//!   sim-runner --play 20 --seed 42
//!   sim-runner --ipc-mode --config data/machine.json

use anyhow::Result;
use slotsim_core::{
    command::{resolve_spin_count, PlayerCommand},
    config::MachineConfig,
    engine::{MachineView, SlotEngine},
    event::MachineEvent,
    payout::Settlement,
    rng::{RngBank, StreamSlot},
    simulator::{PayoutModel, RtpSimulator, SimulationReport},
    types::Credits,
};
use std::env;
use std::io::{self, BufRead, Write};

/// Upper bound on frames spent waiting for one spin to settle.
const MAX_FRAMES_PER_SPIN: u64 = 100_000;

/// Running score. Lives here, not in the engine: the engine only
/// hands out payout deltas.
#[derive(Debug, Default, serde::Serialize)]
struct Scoreboard {
    score: Credits,
    spins: u64,
    wins:  u64,
}

impl Scoreboard {
    fn update(&mut self, settlement: &Settlement) {
        self.score += settlement.payout;
        self.spins += 1;
        if settlement.win {
            self.wins += 1;
        }
    }
}

#[derive(serde::Serialize)]
struct UiState<'a> {
    seed:       u64,
    scoreboard: &'a Scoreboard,
    machine:    MachineView,
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let ipc_mode = args.iter().any(|a| a == "--ipc-mode");
    let config = match find_arg(&args, "--config") {
        Some(path) => MachineConfig::load(path)?,
        None => MachineConfig::default(),
    };
    config.validate()?;

    let seed = parse_arg(&args, "--seed", rand::random::<u64>());
    let model = find_arg(&args, "--model")
        .and_then(PayoutModel::from_name)
        .unwrap_or(config.simulator.payout_model);

    if ipc_mode {
        return run_ipc_loop(&config, seed, find_arg(&args, "--seed").is_some());
    }

    if let Some(rounds) = find_arg(&args, "--play").and_then(|v| v.parse::<u64>().ok()) {
        return run_autoplay(&config, seed, rounds);
    }

    let spins = resolve_spin_count(
        find_arg(&args, "--spins").map(|s| serde_json::Value::String(s.to_string())).as_ref(),
        config.simulator.default_spins,
    );

    println!("Slot machine sim-runner");
    println!("  seed:   {seed}");
    println!("  spins:  {spins}");
    println!("  model:  {model:?}");
    println!();

    let report = simulate(&config, seed, model, spins)?;
    print_report(&config, model, &report)?;
    Ok(())
}

fn simulate(
    config: &MachineConfig,
    seed: u64,
    model: PayoutModel,
    spins: u64,
) -> Result<SimulationReport> {
    let rng = RngBank::new(seed).for_stream(StreamSlot::Simulator);
    let mut simulator = RtpSimulator::new(config.distribution()?, model, rng);
    Ok(simulator.run(spins)?)
}

fn print_report(config: &MachineConfig, model: PayoutModel, report: &SimulationReport) -> Result<()> {
    let expected = model.expected_payout(&config.distribution()?);
    println!("=== RTP REPORT ===");
    println!("  spins:           {}", report.spins);
    println!("  total payout:    {}", report.total_payout);
    println!("  average payout:  {:.4}", report.average_payout);
    println!("  expected:        {expected:.4}");
    println!("  wins:            {}", report.wins);
    println!("  hit rate:        {:.2}%", report.hit_rate() * 100.0);
    println!();
    println!("{}", serde_json::to_string(report)?);
    Ok(())
}

fn run_autoplay(config: &MachineConfig, seed: u64, rounds: u64) -> Result<()> {
    let mut engine = SlotEngine::new(config, seed)?;
    let mut scoreboard = Scoreboard::default();
    let frame_ms = config.timing.frame_ms();

    println!("Autoplay: {rounds} spins, seed {seed}, {frame_ms}ms frames");
    for _ in 0..rounds {
        engine.press_spin();
        let settlement = run_until_settled(&mut engine, frame_ms)?;
        scoreboard.update(&settlement);

        let glyphs: Vec<&str> = settlement.symbols.iter().map(|s| s.glyph()).collect();
        print!(
            "  spin {:>4}  {}  +{:<3}  Score: {}",
            settlement.spin_id,
            glyphs.join(" "),
            settlement.payout,
            scoreboard.score
        );
        if settlement.win {
            print!("  You Won!");
        }
        println!();
    }

    println!();
    println!("=== SESSION SUMMARY ===");
    println!("  spins:  {}", scoreboard.spins);
    println!("  wins:   {}", scoreboard.wins);
    println!("  score:  {}", scoreboard.score);
    Ok(())
}

fn run_until_settled(engine: &mut SlotEngine, frame_ms: u64) -> Result<Settlement> {
    for _ in 0..MAX_FRAMES_PER_SPIN {
        for event in engine.advance(frame_ms)? {
            if let MachineEvent::PayoutAwarded { spin_id, .. } = event {
                if let Some(settlement) = engine.last_settlement() {
                    log::debug!("autoplay: spin {spin_id} settled");
                    return Ok(settlement.clone());
                }
            }
        }
    }
    anyhow::bail!("spin did not settle within {MAX_FRAMES_PER_SPIN} frames")
}

fn run_ipc_loop(config: &MachineConfig, seed: u64, fixed_seed: bool) -> Result<()> {
    let mut engine = SlotEngine::new(config, seed)?;
    let mut scoreboard = Scoreboard::default();
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut handle = stdin.lock();
    let mut buffer = String::new();
    let mut simulations = 0u64;

    loop {
        buffer.clear();
        let bytes_read = handle.read_line(&mut buffer)?;
        if bytes_read == 0 {
            break; // EOF
        }
        if buffer.trim().is_empty() {
            continue;
        }

        let cmd: PlayerCommand = match serde_json::from_str(&buffer) {
            Ok(c) => c,
            Err(e) => {
                let err_json = serde_json::json!({ "error": e.to_string() });
                writeln!(stdout, "{}", err_json)?;
                stdout.flush()?;
                continue;
            }
        };

        match cmd {
            PlayerCommand::Quit => break,
            PlayerCommand::GetState => {
                write_state(&mut stdout, &engine, &scoreboard, seed)?;
            }
            PlayerCommand::Spin => {
                if !engine.press_spin() {
                    log::debug!("ipc: spin ignored, machine busy");
                }
                write_state(&mut stdout, &engine, &scoreboard, seed)?;
            }
            PlayerCommand::Advance { elapsed_ms } => {
                for event in engine.advance(elapsed_ms)? {
                    if let MachineEvent::PayoutAwarded { .. } = event {
                        if let Some(settlement) = engine.last_settlement() {
                            scoreboard.update(settlement);
                        }
                    }
                }
                write_state(&mut stdout, &engine, &scoreboard, seed)?;
            }
            PlayerCommand::Simulate { spins } => {
                let spins = resolve_spin_count(spins.as_ref(), config.simulator.default_spins);
                // Each request stands alone: a fixed seed repeats its
                // figures, otherwise every request draws a fresh one.
                simulations += 1;
                let request_seed = if fixed_seed {
                    seed
                } else {
                    rand::random::<u64>()
                };
                log::debug!("ipc: simulation #{simulations} spins={spins}");
                let report = simulate(config, request_seed, config.simulator.payout_model, spins)?;
                writeln!(stdout, "{}", serde_json::to_string(&report)?)?;
            }
        }
        stdout.flush()?;
    }
    Ok(())
}

fn write_state(
    out: &mut impl Write,
    engine: &SlotEngine,
    scoreboard: &Scoreboard,
    seed: u64,
) -> Result<()> {
    let state = UiState {
        seed,
        scoreboard,
        machine: engine.view(),
    };
    writeln!(out, "{}", serde_json::to_string(&state)?)?;
    Ok(())
}

fn find_arg<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    find_arg(args, flag)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
