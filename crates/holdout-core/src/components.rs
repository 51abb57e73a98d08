//! ECS components for hecs entities.
//!
//! Components are plain data. The few methods here exist only to clamp
//! values at the point of mutation; game logic lives in systems.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::constants::PLAYER_BASE_SPEED;
use crate::enums::{ColorTag, EnemyVariant, SupplyKind};

/// Marks the player-controlled survivor.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Survivor;

/// Marks a hostile that pursues the survivor.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Enemy;

/// Hit points, clamped to `[0, max]` on every change.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Health {
    pub current: i32,
    pub max: i32,
}

impl Health {
    pub fn full(max: i32) -> Self {
        Self { current: max, max }
    }

    /// Subtract damage, stopping at zero. Returns the remaining health.
    pub fn damage(&mut self, amount: i32) -> i32 {
        self.current = (self.current - amount.max(0)).clamp(0, self.max);
        self.current
    }

    /// Add health, stopping at max. Returns the resulting health.
    pub fn heal(&mut self, amount: i32) -> i32 {
        self.current = (self.current + amount.max(0)).clamp(0, self.max);
        self.current
    }

    pub fn is_depleted(&self) -> bool {
        self.current <= 0
    }

    /// Fraction of max health remaining, in [0, 1].
    pub fn fraction(&self) -> f64 {
        if self.max <= 0 {
            0.0
        } else {
            self.current as f64 / self.max as f64
        }
    }
}

/// Movement speed of the survivor, with an optional timed boost.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Mobility {
    pub base_speed: f64,
    /// Current speed (pixels per tick).
    pub speed: f64,
    /// Ticks left on the speed boost; speed reverts to base at zero.
    pub boost_ticks: u32,
}

impl Default for Mobility {
    fn default() -> Self {
        Self {
            base_speed: PLAYER_BASE_SPEED,
            speed: PLAYER_BASE_SPEED,
            boost_ticks: 0,
        }
    }
}

/// Dash state machine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DashState {
    pub active: bool,
    pub remaining_ticks: u32,
    /// Unit vector captured when the dash started.
    pub direction: DVec2,
    pub cooldown_ticks: u32,
}

/// Contact-damage immunity window after a hit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Invulnerability {
    pub remaining_ticks: u32,
}

impl Invulnerability {
    pub fn is_active(&self) -> bool {
        self.remaining_ticks > 0
    }
}

/// Score and kill count for the survivor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Tally {
    pub score: u64,
    pub kills: u32,
}

/// Per-enemy stats, rolled once at spawn from the archetype table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnemyProfile {
    pub variant: EnemyVariant,
    /// Pursuit speed (pixels per tick).
    pub speed: f64,
    pub contact_damage: i32,
    /// Fraction in [0, 1) that dampens knockback on the survivor.
    pub knockback_resistance: f64,
    pub score_value: u64,
}

/// Cosmetic oscillation phase (enemy wobble, supply bob).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Oscillator {
    pub phase: f64,
}

/// A projectile in flight.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub damage: i32,
    pub color: ColorTag,
}

/// A pickup lying in the arena.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SupplyCrate {
    pub kind: SupplyKind,
    pub value: i32,
}
