//! Game loop thread: runs the simulation engine at 60Hz and publishes snapshots.
//!
//! The engine is built by the caller (so configuration errors surface before
//! any thread exists) and moved into the loop thread, which owns it from then
//! on. Commands arrive via an `mpsc` channel and from the attached
//! `InputSource`. The latest snapshot is stored in shared state for polling.

use std::sync::mpsc;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use serde::Serialize;
use tracing::{debug, info};

use holdout_core::commands::PlayerCommand;
use holdout_core::constants::TICK_RATE;
use holdout_core::enums::GamePhase;
use holdout_core::state::GameStateSnapshot;
use holdout_sim::SimulationEngine;

use crate::assets::AssetCatalog;
use crate::state::{GameLoopCommand, SharedSnapshot};

/// Nominal duration of one tick.
pub const TICK_DURATION: Duration = Duration::from_nanos(1_000_000_000 / TICK_RATE as u64);

/// Produces input intents for the engine, one poll per tick, after seeing the
/// snapshot of the tick that just ran.
pub trait InputSource: Send {
    fn poll(&mut self, snapshot: &GameStateSnapshot) -> Vec<PlayerCommand>;
}

/// How the loop is paced and when it gives up.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoopOptions {
    /// Sleep to hold 60 ticks per wall-clock second. Off = run flat out.
    pub realtime: bool,
    /// Stop after this many ticks even if nobody asked to quit.
    pub max_ticks: Option<u64>,
}

/// Summary returned when the loop thread exits.
#[derive(Debug, Clone, Serialize)]
pub struct LoopReport {
    pub ticks: u64,
    pub phase: GamePhase,
    pub callsign: String,
    pub wave: u32,
    pub elapsed_secs: f64,
    pub score: u64,
    pub kills: u32,
    pub health: i32,
}

impl LoopReport {
    fn from_snapshot(ticks: u64, callsign: &str, snapshot: Option<&GameStateSnapshot>) -> Self {
        let player = snapshot.and_then(|s| s.player.as_ref());
        Self {
            ticks,
            phase: snapshot.map(|s| s.phase).unwrap_or_default(),
            callsign: callsign.to_string(),
            wave: snapshot.map_or(0, |s| s.wave),
            elapsed_secs: snapshot.map_or(0.0, |s| s.time.elapsed_secs),
            score: player.map_or(0, |p| p.score),
            kills: player.map_or(0, |p| p.kills),
            health: player.map_or(0, |p| p.health),
        }
    }
}

/// Spawns the game loop in a new thread.
///
/// Returns the command sender and a handle that yields the final report.
pub fn spawn_game_loop(
    engine: SimulationEngine,
    input: Box<dyn InputSource>,
    catalog: AssetCatalog,
    options: LoopOptions,
    latest_snapshot: SharedSnapshot,
) -> std::io::Result<(mpsc::Sender<GameLoopCommand>, JoinHandle<LoopReport>)> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();

    let handle = std::thread::Builder::new()
        .name("holdout-game-loop".into())
        .spawn(move || {
            run_game_loop(engine, input, &catalog, options, cmd_rx, &latest_snapshot)
        })?;

    Ok((cmd_tx, handle))
}

/// The game loop. Runs until Shutdown, channel disconnect, a quit request
/// from the engine, or the tick limit.
fn run_game_loop(
    mut engine: SimulationEngine,
    mut input: Box<dyn InputSource>,
    catalog: &AssetCatalog,
    options: LoopOptions,
    cmd_rx: mpsc::Receiver<GameLoopCommand>,
    latest_snapshot: &SharedSnapshot,
) -> LoopReport {
    let mut next_tick_time = Instant::now();
    let mut ticks = 0u64;
    let mut last: Option<GameStateSnapshot> = None;
    let mut last_phase = engine.phase();

    loop {
        // 1. Drain all pending commands
        loop {
            match cmd_rx.try_recv() {
                Ok(GameLoopCommand::PlayerCommand(cmd)) => engine.queue_command(cmd),
                Ok(GameLoopCommand::Shutdown) | Err(mpsc::TryRecvError::Disconnected) => {
                    debug!("game loop shutting down");
                    return LoopReport::from_snapshot(ticks, engine.callsign(), last.as_ref());
                }
                Err(mpsc::TryRecvError::Empty) => break,
            }
        }

        // 2. Advance one tick (engine handles phase semantics internally)
        let snapshot = engine.tick();
        ticks += 1;
        if snapshot.phase != last_phase {
            info!(from = ?last_phase, to = ?snapshot.phase, tick = snapshot.time.tick, "phase");
            last_phase = snapshot.phase;
        }

        // 3. Presentation hints and next input
        catalog.play(&snapshot.audio_events);
        engine.queue_commands(input.poll(&snapshot));

        // 4. Store latest snapshot for synchronous polling
        if let Ok(mut lock) = latest_snapshot.lock() {
            *lock = Some(snapshot.clone());
        }
        last = Some(snapshot);

        if engine.should_quit() || options.max_ticks.is_some_and(|max| ticks >= max) {
            return LoopReport::from_snapshot(ticks, engine.callsign(), last.as_ref());
        }

        // 5. Sleep until next tick
        if options.realtime {
            next_tick_time += TICK_DURATION;
            let now = Instant::now();
            if next_tick_time > now {
                std::thread::sleep(next_tick_time - now);
            } else if now - next_tick_time > TICK_DURATION * 2 {
                // Too far behind; reset to avoid a catch-up spiral
                next_tick_time = now;
            }
        }
    }
}
