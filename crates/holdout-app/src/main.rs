//! HOLDOUT driver CLI: builds an engine from a seed and optional arena file,
//! runs it on the game loop thread with the autopilot at the controls, and
//! prints the final match report as JSON.
//!
//! Usage:
//!   holdout --seed 7 --callsign ACE
//!   RUST_LOG=debug holdout --realtime --assets ./assets --config arena.json

use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use holdout_app::assets::AssetCatalog;
use holdout_app::autopilot::Autopilot;
use holdout_app::game_loop::{spawn_game_loop, LoopOptions};
use holdout_core::config::ArenaConfig;
use holdout_sim::{SimConfig, SimulationEngine};

#[derive(Parser, Debug)]
#[command(name = "holdout")]
#[command(about = "Run a HOLDOUT survival match headless")]
struct Args {
    /// RNG seed; the same seed and inputs replay the same match
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// JSON arena description (width, height, spawn_margin, supply_inset, palette)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Callsign typed on the name-entry screen
    #[arg(long, default_value = "SURVIVOR")]
    callsign: String,

    /// Directory holding sprites and a sounds/ subdirectory
    #[arg(long)]
    assets: Option<PathBuf>,

    /// Stop after this many ticks
    #[arg(long)]
    max_ticks: Option<u64>,

    /// Pace the loop at 60 ticks per second instead of running flat out
    #[arg(long)]
    realtime: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let arena = match &args.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            ArenaConfig::from_json(&text)
                .with_context(|| format!("invalid arena config in {}", path.display()))?
        }
        None => ArenaConfig::default(),
    };

    let engine = SimulationEngine::new(SimConfig {
        seed: args.seed,
        arena,
    })
    .context("failed to build simulation engine")?;
    let catalog = AssetCatalog::load(args.assets.as_deref());

    info!(seed = args.seed, callsign = %args.callsign, "starting");
    let (command_tx, handle) = spawn_game_loop(
        engine,
        Box::new(Autopilot::new(args.callsign)),
        catalog,
        LoopOptions {
            realtime: args.realtime,
            max_ticks: args.max_ticks,
        },
        Arc::new(Mutex::new(None)),
    )
    .context("failed to spawn game loop thread")?;

    // The loop exits when every sender is gone, so hold ours until it stops.
    let report = handle
        .join()
        .map_err(|_| anyhow!("game loop thread panicked"))?;
    drop(command_tx);

    info!(
        phase = ?report.phase,
        wave = report.wave,
        score = report.score,
        kills = report.kills,
        "match finished"
    );
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
