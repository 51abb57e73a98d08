//! Types shared between the driver and the game loop thread.

use std::sync::{Arc, Mutex};

use holdout_core::commands::PlayerCommand;
use holdout_core::state::GameStateSnapshot;

/// Commands sent from the driver to the game loop thread.
#[derive(Debug)]
pub enum GameLoopCommand {
    /// A player command to forward to the simulation engine.
    PlayerCommand(PlayerCommand),
    /// Shut down the game loop thread gracefully.
    Shutdown,
}

/// Latest snapshot written by the loop thread after every tick.
pub type SharedSnapshot = Arc<Mutex<Option<GameStateSnapshot>>>;
