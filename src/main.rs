//! Shmup Arcade headless runner
//!
//! Drives the simulation on autopilot for a fixed number of ticks and prints
//! a summary (or the final snapshot as JSON). Useful for soak tests and
//! balance tweaking without a window.
//!
//! ```text
//! shmup-arcade [--ticks N] [--seed S] [--tuning PATH] [--json]
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use shmup_arcade::Tuning;
use shmup_arcade::consts::TICK_RATE;
use shmup_arcade::sim::{GameEvent, TickInput, TickOutcome, World, tick};

#[derive(Parser, Debug)]
#[command(name = "shmup-arcade")]
#[command(about = "Run the shmup simulation headless on autopilot")]
struct Cli {
    /// Number of simulation ticks to run
    #[arg(long, default_value_t = 3600)]
    ticks: u64,
    /// RNG seed (random when omitted)
    #[arg(long)]
    seed: Option<u64>,
    /// Balance file in JSON
    #[arg(long)]
    tuning: Option<PathBuf>,
    /// Print the final snapshot as JSON instead of a summary
    #[arg(long)]
    json: bool,
}

#[derive(Default)]
struct Totals {
    runs: u32,
    best_score: u64,
    kills: u64,
    bosses: u64,
}

fn main() -> ExitCode {
    env_logger::init();

    let args = Cli::parse();

    let tuning = args.tuning.as_deref().map(Tuning::load).unwrap_or_default();
    let seed = args.seed.unwrap_or_else(rand::random);
    let mut world = World::new(seed, tuning);
    log::info!(
        "Shmup Arcade (headless) starting: {} ticks, seed {}",
        args.ticks,
        seed
    );

    let mut totals = Totals {
        runs: 1,
        ..Default::default()
    };
    let mut input = TickInput {
        autopilot: true,
        ..Default::default()
    };

    for _ in 0..args.ticks {
        // Press restart on the frame after game over
        input.restart = world.run.game_over;
        match tick(&mut world, &input) {
            TickOutcome::Reset => totals.runs += 1,
            TickOutcome::Quit => break,
            TickOutcome::Advanced | TickOutcome::Frozen => {}
        }

        for event in &world.events {
            match event {
                GameEvent::EnemyKilled { .. } => totals.kills += 1,
                GameEvent::BossDefeated { .. } => totals.bosses += 1,
                _ => {}
            }
        }
        totals.best_score = totals.best_score.max(world.run.score);
    }

    if args.json {
        match serde_json::to_string_pretty(&world.snapshot()) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                log::error!("Failed to serialize snapshot: {e}");
                return ExitCode::FAILURE;
            }
        }
    } else {
        println!(
            "{} ticks ({:.1}s): {} run(s), best score {}, {} kills, {} boss(es), stage {}",
            args.ticks,
            args.ticks as f64 / f64::from(TICK_RATE),
            totals.runs,
            totals.best_score,
            totals.kills,
            totals.bosses,
            world.run.stage,
        );
    }

    ExitCode::SUCCESS
}
