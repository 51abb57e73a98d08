//! Player intents sent from the input layer to the simulation.
//!
//! Intents are queued and processed at the next tick boundary. An intent that
//! makes no sense in the current phase is dropped without error.

use serde::{Deserialize, Serialize};

/// All decoded input intents the core understands.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    // --- Name entry ---
    /// Append a character to the callsign.
    TypeChar { ch: char },
    /// Delete the last callsign character.
    Backspace,
    /// Confirm the callsign, or activate the selected menu item.
    Confirm,

    // --- Menu ---
    NavigateUp,
    NavigateDown,

    // --- Play ---
    /// Held movement state, sampled every tick until replaced.
    /// Each axis is -1, 0 or 1; other values are clamped.
    MoveAxis { dx: i8, dy: i8 },
    /// Fire the active weapon toward a point in arena coordinates.
    FireAt { x: f64, y: f64 },
    /// Dash along the currently held movement direction.
    Dash,
    /// Reload the active weapon.
    Reload,
    /// Cycle the active weapon by `step` (usually -1 or +1).
    SwitchWeapon { step: i8 },

    // --- Flow control ---
    Pause,
    Resume,
    /// Start a fresh match from Paused, GameOver or Victory.
    Restart,
    /// Return to the main menu from Paused, GameOver or Victory.
    ToMenu,
    /// Ask the outer driver to shut down.
    Quit,
}
