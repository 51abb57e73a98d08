//! Enemy pursuit: every enemy steps straight toward the survivor at its
//! rolled speed and advances its cosmetic wobble.

use hecs::World;

use holdout_core::components::{Enemy, EnemyProfile, Oscillator, Survivor};
use holdout_core::constants::ENEMY_WOBBLE_STEP;
use holdout_core::types::Position;
use holdout_horde::pursuit::step_toward;

pub fn run(world: &mut World) {
    let target = world
        .query::<(&Survivor, &Position)>()
        .iter()
        .next()
        .map(|(_, (_, pos))| pos.as_vec());

    for (_entity, (_enemy, pos, profile, wobble)) in
        world.query_mut::<(&Enemy, &mut Position, &EnemyProfile, &mut Oscillator)>()
    {
        if let Some(target) = target {
            *pos = step_toward(pos.as_vec(), target, profile.speed).into();
        }
        wobble.phase += ENEMY_WOBBLE_STEP;
    }
}
