//! Cleanup system: removes bullets that have left the play area.

use hecs::{Entity, World};

use holdout_core::components::Projectile;
use holdout_core::config::ArenaConfig;
use holdout_core::types::Position;

/// Despawn every bullet whose centre lies outside the arena. Runs before
/// collision resolution so a departing bullet never hits anything.
pub fn run(world: &mut World, arena: &ArenaConfig, despawn_buffer: &mut Vec<Entity>) {
    despawn_buffer.clear();

    let bounds = arena.bounds();
    for (entity, (pos, _projectile)) in world.query_mut::<(&Position, &Projectile)>() {
        if !bounds.contains(pos.as_vec()) {
            despawn_buffer.push(entity);
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
