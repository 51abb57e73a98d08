//! Game state snapshot: everything the presentation layer needs to draw a frame.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::{AudioEvent, EffectHint};
use crate::types::{Position, Rect, SimTime};

/// Complete visible state produced after each tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub time: SimTime,
    pub phase: GamePhase,
    pub wave: u32,
    /// Seconds left until victory.
    pub remaining_secs: f64,
    /// `None` until the first match starts.
    pub player: Option<PlayerView>,
    pub enemies: Vec<EnemyView>,
    pub bullets: Vec<BulletView>,
    pub supplies: Vec<SupplyView>,
    /// Static wall layout (render only).
    pub walls: Vec<Rect>,
    pub front_end: FrontEndView,
    pub audio_events: Vec<AudioEvent>,
    pub effects: Vec<EffectHint>,
}

/// Survivor state for the HUD and sprite.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerView {
    pub position: Position,
    pub health: i32,
    pub max_health: i32,
    pub speed: f64,
    pub boosted: bool,
    pub score: u64,
    pub kills: u32,
    pub invincible: bool,
    pub dashing: bool,
    pub dash_cooldown_ticks: u32,
    pub active_weapon: usize,
    pub weapons: Vec<WeaponView>,
}

impl PlayerView {
    pub fn weapon(&self) -> Option<&WeaponView> {
        self.weapons.get(self.active_weapon)
    }
}

/// Weapon status for the HUD.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeaponView {
    pub kind: WeaponKind,
    pub ammo: u32,
    pub max_ammo: u32,
    pub reloading: bool,
    /// Reload completion (0.0 - 1.0).
    pub reload_progress: f64,
}

/// An enemy on screen.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyView {
    pub position: Position,
    pub variant: EnemyVariant,
    /// Remaining health (0.0 - 1.0).
    pub health_fraction: f64,
    /// Cosmetic draw offset from `position`.
    pub wobble: Position,
}

/// A bullet on screen.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulletView {
    pub position: Position,
    pub color: ColorTag,
    pub rgb: [u8; 3],
}

/// A supply on screen.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupplyView {
    pub position: Position,
    pub kind: SupplyKind,
    /// Cosmetic vertical draw offset.
    pub bob: f64,
}

/// Name entry, menu and welcome screen state.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FrontEndView {
    pub callsign: String,
    pub menu_items: Vec<MenuItem>,
    pub selected: usize,
    /// Ticks left on the access-granted screen.
    pub access_countdown_ticks: u32,
}
