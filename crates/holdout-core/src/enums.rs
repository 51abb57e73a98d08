//! Enumeration types used throughout the simulation.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Game phase (top-level state).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Typing a callsign before anything else.
    #[default]
    NameEntry,
    /// Transient welcome screen; returns to the menu after a countdown.
    AccessGranted,
    MainMenu,
    Instructions,
    Playing,
    Paused,
    /// Player health reached zero.
    GameOver,
    /// Player survived the full match.
    Victory,
}

impl GamePhase {
    /// Phases in which a match exists and can be restarted or abandoned.
    pub fn has_match(self) -> bool {
        matches!(
            self,
            GamePhase::Playing | GamePhase::Paused | GamePhase::GameOver | GamePhase::Victory
        )
    }
}

/// Enemy variant. Stats are resolved once at spawn from the archetype table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyVariant {
    /// Average speed and health.
    Normal,
    /// Quick but fragile.
    Fast,
    /// Slow, tough, barely pushes the player around.
    Tank,
}

/// Supply crate variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SupplyKind {
    Normal,
    Health,
    Speed,
    Ammo,
    Score,
}

/// Weapon presets carried by the player, in inventory order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeaponKind {
    Pistol,
    Shotgun,
    Rifle,
}

impl WeaponKind {
    /// Inventory order at match start.
    pub const LOADOUT: [WeaponKind; 3] =
        [WeaponKind::Pistol, WeaponKind::Shotgun, WeaponKind::Rifle];

    pub fn name(self) -> &'static str {
        match self {
            WeaponKind::Pistol => "Pistol",
            WeaponKind::Shotgun => "Shotgun",
            WeaponKind::Rifle => "Rifle",
        }
    }
}

impl fmt::Display for WeaponKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Colour tag carried by weapons and their bullets. Resolved to RGB through
/// the arena palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColorTag {
    Yellow,
    Orange,
    Blue,
}

/// Main menu entries, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MenuItem {
    StartGame,
    HowToPlay,
    Quit,
}

impl MenuItem {
    pub const ALL: [MenuItem; 3] = [MenuItem::StartGame, MenuItem::HowToPlay, MenuItem::Quit];
}
