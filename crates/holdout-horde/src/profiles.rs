//! Archetype-specific stat tables.
//!
//! Ranged stats are rolled once when an entity is created. Nothing branches
//! on the variant after that.

use std::ops::RangeInclusive;

use rand::Rng;

use holdout_core::components::{EnemyProfile, Health};
use holdout_core::constants::*;
use holdout_core::enums::{EnemyVariant, SupplyKind};
use holdout_core::types::Hitbox;

/// Relative enemy spawn weights (Normal:Fast:Tank = 7:2:1).
pub const ENEMY_POOL: [(EnemyVariant, f64); 3] = [
    (EnemyVariant::Normal, 7.0),
    (EnemyVariant::Fast, 2.0),
    (EnemyVariant::Tank, 1.0),
];

/// Supply spawn weights.
pub const SUPPLY_POOL: [(SupplyKind, f64); 5] = [
    (SupplyKind::Normal, 0.5),
    (SupplyKind::Health, 0.2),
    (SupplyKind::Speed, 0.1),
    (SupplyKind::Ammo, 0.15),
    (SupplyKind::Score, 0.05),
];

/// Stat table entry for an enemy variant.
pub struct EnemyArchetype {
    /// Pursuit speed range (pixels per tick).
    pub speed: RangeInclusive<f64>,
    pub health: i32,
    pub contact_damage: i32,
    pub knockback_resistance: RangeInclusive<f64>,
    pub score_value: u64,
    pub hitbox: Hitbox,
}

/// Get the archetype for a variant.
pub fn enemy_archetype(variant: EnemyVariant) -> EnemyArchetype {
    match variant {
        EnemyVariant::Normal => EnemyArchetype {
            speed: 1.5..=2.5,
            health: 60,
            contact_damage: 15,
            knockback_resistance: 0.5..=0.9,
            score_value: 100,
            hitbox: Hitbox::square(NORMAL_ENEMY_SIZE),
        },
        EnemyVariant::Fast => EnemyArchetype {
            speed: 2.5..=3.5,
            health: 40,
            contact_damage: 10,
            knockback_resistance: 0.3..=0.3,
            score_value: 150,
            hitbox: Hitbox::square(FAST_ENEMY_SIZE),
        },
        EnemyVariant::Tank => EnemyArchetype {
            speed: 0.8..=1.5,
            health: 120,
            contact_damage: 25,
            knockback_resistance: 0.95..=0.95,
            score_value: 250,
            hitbox: Hitbox::square(TANK_ENEMY_SIZE),
        },
    }
}

/// Everything needed to spawn one enemy.
#[derive(Debug, Clone, Copy)]
pub struct RolledEnemy {
    pub profile: EnemyProfile,
    pub health: Health,
    pub hitbox: Hitbox,
}

/// Roll a concrete enemy from its archetype.
pub fn roll_enemy<R: Rng + ?Sized>(variant: EnemyVariant, rng: &mut R) -> RolledEnemy {
    let archetype = enemy_archetype(variant);
    RolledEnemy {
        profile: EnemyProfile {
            variant,
            speed: rng.gen_range(archetype.speed),
            contact_damage: archetype.contact_damage,
            knockback_resistance: rng.gen_range(archetype.knockback_resistance),
            score_value: archetype.score_value,
        },
        health: Health::full(archetype.health),
        hitbox: archetype.hitbox,
    }
}

/// Fixed value carried by each supply kind.
pub fn supply_value(kind: SupplyKind) -> i32 {
    match kind {
        SupplyKind::Normal => 1,
        SupplyKind::Health => 20,
        SupplyKind::Speed => 5,
        SupplyKind::Ammo => 10,
        SupplyKind::Score => 100,
    }
}
