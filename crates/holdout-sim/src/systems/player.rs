//! Survivor movement, dash integration and per-tick timers.

use std::f64::consts::FRAC_1_SQRT_2;

use glam::DVec2;
use hecs::World;

use holdout_core::components::{DashState, Invulnerability, Mobility, Survivor};
use holdout_core::config::ArenaConfig;
use holdout_core::constants::DASH_SPEED;
use holdout_core::events::AudioEvent;
use holdout_core::types::{Hitbox, Position};
use holdout_core::weapon::Loadout;

/// Compose the held movement axes into a direction. Each axis is clamped to
/// -1..=1 and diagonals are scaled by 1/sqrt(2), so the result is either zero
/// or a unit vector.
pub fn movement_direction(axis: (i8, i8)) -> DVec2 {
    let dir = DVec2::new(axis.0.clamp(-1, 1) as f64, axis.1.clamp(-1, 1) as f64);
    if dir.x != 0.0 && dir.y != 0.0 {
        dir * FRAC_1_SQRT_2
    } else {
        dir
    }
}

/// Move the survivor, then count down dash, invulnerability, speed boost and
/// weapon timers. A dash overrides the held direction until it runs out.
pub fn run(
    world: &mut World,
    arena: &ArenaConfig,
    direction: DVec2,
    audio_events: &mut Vec<AudioEvent>,
) {
    for (_entity, (_survivor, pos, hitbox, mobility, dash, invuln, loadout)) in world
        .query_mut::<(
            &Survivor,
            &mut Position,
            &Hitbox,
            &mut Mobility,
            &mut DashState,
            &mut Invulnerability,
            &mut Loadout,
        )>()
    {
        // The dash flag stays up through the tick of its last step so the
        // collision pass that follows still sees the survivor as dashing.
        if dash.active && dash.remaining_ticks == 0 {
            dash.active = false;
        }

        if dash.active {
            pos.translate(dash.direction * DASH_SPEED);
            dash.remaining_ticks -= 1;
        } else if direction != DVec2::ZERO {
            pos.translate(direction * mobility.speed);
        }
        arena.clamp_inside(pos, hitbox);

        dash.cooldown_ticks = dash.cooldown_ticks.saturating_sub(1);
        invuln.remaining_ticks = invuln.remaining_ticks.saturating_sub(1);

        if mobility.boost_ticks > 0 {
            mobility.boost_ticks -= 1;
            if mobility.boost_ticks == 0 {
                mobility.speed = mobility.base_speed;
            }
        }

        for weapon in loadout.weapons_mut() {
            if weapon.update() {
                audio_events.push(AudioEvent::ReloadFinished {
                    weapon: weapon.kind,
                });
            }
        }
    }
}
