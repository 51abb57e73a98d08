//! Entity spawn factories for setting up the simulation world.
//!
//! Creates the survivor, enemies, supplies and bullets with their component
//! bundles, and generates the one-shot static wall layout.

use hecs::{Entity, World};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use holdout_core::components::*;
use holdout_core::config::ArenaConfig;
use holdout_core::constants::*;
use holdout_core::enums::{EnemyVariant, SupplyKind};
use holdout_core::types::{Hitbox, Position, Rect};
use holdout_core::weapon::{Loadout, Shot};
use holdout_horde::profiles::{roll_enemy, supply_value};

/// Spawn the survivor at the arena centre with a full loadout.
pub fn spawn_player(world: &mut World, arena: &ArenaConfig) -> Entity {
    world.spawn((
        Survivor,
        arena.center(),
        Hitbox::square(PLAYER_SIZE),
        Health::full(PLAYER_MAX_HEALTH),
        Mobility::default(),
        DashState::default(),
        Invulnerability::default(),
        Tally::default(),
        Loadout::default(),
    ))
}

/// Spawn one enemy of `variant` at `position`, rolling its stats now.
pub fn spawn_enemy(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    variant: EnemyVariant,
    position: Position,
) -> Entity {
    let rolled = roll_enemy(variant, rng);
    let wobble = Oscillator {
        phase: rng.gen_range(0.0..std::f64::consts::TAU),
    };

    world.spawn((
        Enemy,
        position,
        rolled.hitbox,
        rolled.health,
        rolled.profile,
        wobble,
    ))
}

/// Pick a point just outside one of the four arena edges, edge chosen uniformly.
pub fn edge_spawn_point(arena: &ArenaConfig, rng: &mut ChaCha8Rng) -> Position {
    let margin = arena.spawn_margin;
    match rng.gen_range(0..4) {
        0 => Position::new(rng.gen_range(0.0..=arena.width), -margin),
        1 => Position::new(arena.width + margin, rng.gen_range(0.0..=arena.height)),
        2 => Position::new(rng.gen_range(0.0..=arena.width), arena.height + margin),
        _ => Position::new(-margin, rng.gen_range(0.0..=arena.height)),
    }
}

/// Pick a point uniformly inside the supply inset.
pub fn interior_spawn_point(arena: &ArenaConfig, rng: &mut ChaCha8Rng) -> Position {
    let inset = arena.supply_inset;
    Position::new(
        rng.gen_range(inset..=arena.width - inset),
        rng.gen_range(inset..=arena.height - inset),
    )
}

/// Spawn a supply of `kind` at `position`.
pub fn spawn_supply(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    kind: SupplyKind,
    position: Position,
) -> Entity {
    let bob = Oscillator {
        phase: rng.gen_range(0.0..std::f64::consts::TAU),
    };

    world.spawn((
        SupplyCrate {
            kind,
            value: supply_value(kind),
        },
        position,
        Hitbox::square(SUPPLY_SIZE),
        bob,
    ))
}

/// Spawn a bullet from a weapon shot.
pub fn spawn_bullet(world: &mut World, shot: &Shot) -> Entity {
    world.spawn((
        Projectile {
            damage: shot.damage,
            color: shot.color,
        },
        shot.origin,
        shot.velocity,
        Hitbox::square(BULLET_SIZE),
    ))
}

/// Generate the static wall layout: a ring of border tiles plus scattered
/// interior blocks snapped to the tile grid. Walls are decorative only.
pub fn generate_layout(arena: &ArenaConfig, rng: &mut ChaCha8Rng) -> Vec<Rect> {
    let tile = WALL_TILE;
    let cols = (arena.width / tile).floor() as u32;
    let rows = (arena.height / tile).floor() as u32;
    let tile_at = |x: f64, y: f64| Rect {
        x,
        y,
        width: tile,
        height: tile,
    };
    let mut walls = Vec::new();

    for c in 0..cols {
        let x = c as f64 * tile;
        walls.push(tile_at(x, 0.0));
        walls.push(tile_at(x, arena.height - tile));
    }
    for r in 1..rows.saturating_sub(1) {
        let y = r as f64 * tile;
        walls.push(tile_at(0.0, y));
        walls.push(tile_at(arena.width - tile, y));
    }

    let max_col = (((arena.width - 2.0 * tile) / tile).floor() as u32).max(1);
    let max_row = (((arena.height - 2.0 * tile) / tile).floor() as u32).max(1);
    for _ in 0..LAYOUT_BLOCKS {
        let x = rng.gen_range(1..=max_col) as f64 * tile;
        let y = rng.gen_range(1..=max_row) as f64 * tile;
        let width = LAYOUT_BLOCK_SIDES[rng.gen_range(0..LAYOUT_BLOCK_SIDES.len())];
        let height = LAYOUT_BLOCK_SIDES[rng.gen_range(0..LAYOUT_BLOCK_SIDES.len())];
        walls.push(Rect { x, y, width, height });
    }

    walls
}
