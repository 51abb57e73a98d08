//! Spawn director: wave scaling plus timed enemy and supply spawns.
//!
//! The wave number is a pure function of the match tick. Each tick the
//! director counts down two timers; when a timer is at zero and the live
//! population is under the wave's target, one entity is created and the
//! timer is rearmed. A timer that hits zero at the cap stays at zero, so the
//! next spawn happens as soon as room opens up.

use hecs::World;
use rand::distributions::WeightedError;
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use holdout_core::components::{Enemy, SupplyCrate};
use holdout_core::config::ArenaConfig;
use holdout_core::constants::*;
use holdout_core::enums::{EnemyVariant, SupplyKind};
use holdout_horde::profiles::{ENEMY_POOL, SUPPLY_POOL};
use holdout_horde::sampling::WeightedTable;

use crate::world_setup;

/// Wave number after `tick` match ticks: `1 + floor(elapsed / 30 s)`.
pub fn wave_at(tick: u64) -> u32 {
    1 + (tick / WAVE_LENGTH_TICKS) as u32
}

/// Maximum live enemies during `wave`.
pub fn enemy_cap(wave: u32) -> usize {
    (ENEMY_BASE_POPULATION + wave * ENEMY_POPULATION_PER_WAVE) as usize
}

/// Maximum live supplies during `wave`.
pub fn supply_cap(wave: u32) -> usize {
    (SUPPLY_BASE_POPULATION + wave * SUPPLY_POPULATION_PER_WAVE) as usize
}

pub fn enemy_count(world: &World) -> usize {
    world.query::<&Enemy>().iter().count()
}

pub fn supply_count(world: &World) -> usize {
    world.query::<&SupplyCrate>().iter().count()
}

/// Spawn timers and weighted variant tables for one match.
#[derive(Debug, Clone)]
pub struct Director {
    wave: u32,
    enemy_timer: u32,
    supply_timer: u32,
    enemy_table: WeightedTable<EnemyVariant>,
    supply_table: WeightedTable<SupplyKind>,
}

impl Director {
    pub fn new() -> Result<Self, WeightedError> {
        Ok(Self {
            wave: 1,
            enemy_timer: ENEMY_SPAWN_INTERVAL_TICKS,
            supply_timer: SUPPLY_SPAWN_INTERVAL_TICKS,
            enemy_table: WeightedTable::new(&ENEMY_POOL)?,
            supply_table: WeightedTable::new(&SUPPLY_POOL)?,
        })
    }

    pub fn wave(&self) -> u32 {
        self.wave
    }

    /// Rewind to the start of a match.
    pub fn reset(&mut self) {
        self.wave = 1;
        self.enemy_timer = ENEMY_SPAWN_INTERVAL_TICKS;
        self.supply_timer = SUPPLY_SPAWN_INTERVAL_TICKS;
    }

    /// Populate a fresh arena before its first tick. The supply request is
    /// capped by the wave-1 target so the population invariant holds from
    /// the very first snapshot.
    pub fn seed_match(&mut self, world: &mut World, rng: &mut ChaCha8Rng, arena: &ArenaConfig) {
        for _ in 0..INITIAL_ENEMIES {
            self.spawn_enemy(world, rng, arena);
        }
        let supplies = (INITIAL_SUPPLIES as usize).min(supply_cap(self.wave));
        for _ in 0..supplies {
            self.spawn_supply(world, rng, arena);
        }
    }

    /// One director step for the match tick `tick`.
    pub fn run(&mut self, world: &mut World, rng: &mut ChaCha8Rng, arena: &ArenaConfig, tick: u64) {
        let wave = wave_at(tick);
        if wave != self.wave {
            debug!(wave, tick, "wave advanced");
            self.wave = wave;
        }

        self.enemy_timer = self.enemy_timer.saturating_sub(1);
        if self.enemy_timer == 0 && enemy_count(world) < enemy_cap(self.wave) {
            self.spawn_enemy(world, rng, arena);
            self.enemy_timer = ENEMY_SPAWN_INTERVAL_TICKS;
        }

        self.supply_timer = self.supply_timer.saturating_sub(1);
        if self.supply_timer == 0 && supply_count(world) < supply_cap(self.wave) {
            self.spawn_supply(world, rng, arena);
            self.supply_timer = SUPPLY_SPAWN_INTERVAL_TICKS;
        }
    }

    fn spawn_enemy(&self, world: &mut World, rng: &mut ChaCha8Rng, arena: &ArenaConfig) {
        let variant = self.enemy_table.sample(rng);
        let position = world_setup::edge_spawn_point(arena, rng);
        world_setup::spawn_enemy(world, rng, variant, position);
        debug!(?variant, x = position.x, y = position.y, "enemy spawned");
    }

    fn spawn_supply(&self, world: &mut World, rng: &mut ChaCha8Rng, arena: &ArenaConfig) {
        let kind = self.supply_table.sample(rng);
        let position = world_setup::interior_spawn_point(arena, rng);
        world_setup::spawn_supply(world, rng, kind, position);
        debug!(?kind, x = position.x, y = position.y, "supply spawned");
    }
}
