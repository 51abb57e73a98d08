//! Headless driver for HOLDOUT.
//!
//! Runs the simulation engine on its own loop thread, feeds it intents from
//! an `InputSource`, and routes audio hints through the asset catalog.

pub mod assets;
pub mod autopilot;
pub mod game_loop;
pub mod state;
