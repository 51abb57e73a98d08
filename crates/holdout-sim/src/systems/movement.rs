//! Movement integration for bullets and the supply bob animation.

use hecs::World;

use holdout_core::components::{Oscillator, SupplyCrate};
use holdout_core::constants::SUPPLY_BOB_STEP;
use holdout_core::types::{Position, Velocity};

/// Integrate position by velocity. Only bullets carry a `Velocity`.
pub fn run(world: &mut World) {
    for (_entity, (pos, vel)) in world.query_mut::<(&mut Position, &Velocity)>() {
        pos.x += vel.x;
        pos.y += vel.y;
    }
}

/// Advance the bob phase of every supply lying in the arena.
pub fn animate_supplies(world: &mut World) {
    for (_entity, (_supply, bob)) in world.query_mut::<(&SupplyCrate, &mut Oscillator)>() {
        bob.phase += SUPPLY_BOB_STEP;
    }
}
