//! Horde behavior for HOLDOUT.
//!
//! Archetype stat tables for enemies and supplies, the weighted spawn
//! tables that pick between them, and pursuit steering.

pub mod profiles;
pub mod pursuit;
pub mod sampling;

pub use holdout_core as core;
