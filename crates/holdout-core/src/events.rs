//! Events emitted by the simulation for audio and visual-effect feedback.
//!
//! These are fire-and-forget hints. The presentation layer may drop any of
//! them without changing the outcome of the simulation.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::Position;

/// Audio events for the frontend sound system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum AudioEvent {
    ShotFired { weapon: WeaponKind },
    ReloadStarted { weapon: WeaponKind },
    ReloadFinished { weapon: WeaponKind },
    /// Survivor took contact damage.
    HitTaken { damage: i32 },
    EnemyKilled { variant: EnemyVariant },
    SupplyCollected { kind: SupplyKind },
    WeaponSwitched { weapon: WeaponKind },
    DashPerformed,
    MatchWon,
    MatchLost,
    MenuNavigated,
    /// A callsign character was typed.
    Keystroke,
    AccessGranted,
}

/// Visual effect hints, positioned in arena space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum EffectHint {
    /// Shot leaving the survivor.
    MuzzleFlash { position: Position },
    /// Bullet struck an enemy. `heavy` for tank-sized splatter.
    Blood { position: Position, heavy: bool },
    /// Enemy destroyed.
    Death { position: Position },
    /// Supply picked up.
    Pickup { position: Position, kind: SupplyKind },
    /// Survivor took contact damage.
    PlayerHit { position: Position },
}
