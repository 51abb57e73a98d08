//! ECS systems that operate on the simulation world each tick.
//!
//! Systems are free functions over `&mut World` (or `&World` for read-only
//! passes). Persistent state lives in components; the spawn director is the
//! one system that keeps its own timers.

pub mod actions;
pub mod cleanup;
pub mod collision;
pub mod enemy_ai;
pub mod movement;
pub mod player;
pub mod snapshot;
pub mod spawn_director;
