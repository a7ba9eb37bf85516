use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use log::info;

use astrodefense_app::control;
use astrodefense_app::logging;
use astrodefense_app::runner::{self, RunReport};
use astrodefense_app::state::AppState;
use astrodefense_core::commands::PlayerCommand;
use astrodefense_sim::SimConfig;

/// Headless ASTRODEFENSE simulation runner
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON config file; missing fields use defaults
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// RNG seed, overrides the config file
    #[arg(short, long)]
    seed: Option<u64>,

    /// Number of frames to simulate
    #[arg(short, long, default_value_t = 3600)]
    ticks: u64,

    /// Run on the 60 Hz game-loop thread instead of as fast as possible
    #[arg(long)]
    realtime: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Print the final snapshot as JSON instead of a summary
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    logging::init(args.verbose);

    let mut config = match &args.config {
        Some(path) => SimConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => SimConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    config.validate()?;
    info!("seed {}, {} ticks", config.seed, args.ticks);

    let report = if args.realtime {
        run_realtime(config, args.ticks)?
    } else {
        runner::run_headless(config, args.ticks)
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report.final_snapshot)?);
    } else {
        println!("{}", report.summary());
    }
    Ok(())
}

fn run_realtime(config: SimConfig, ticks: u64) -> Result<RunReport> {
    let state = AppState::new();
    let report = Arc::new(Mutex::new(RunReport::default()));
    let sink = Arc::clone(&report);

    control::start_simulation(
        &state,
        config,
        Some(ticks),
        Box::new(move |snapshot| {
            if let Ok(mut report) = sink.lock() {
                report.record(snapshot);
            }
        }),
    )?;
    control::send_command(&state, PlayerCommand::StartGame)?;
    control::wait(&state)?;

    let report = report
        .lock()
        .map_err(|_| anyhow!("report lock poisoned"))?
        .clone();
    Ok(report)
}
