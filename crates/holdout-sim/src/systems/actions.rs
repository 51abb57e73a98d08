//! Discrete survivor actions: fire, reload, dash and weapon switch.
//!
//! Called from the engine's command handler while a match is playing. Each
//! returns whether the action was performed; a rejected action changes
//! nothing and emits nothing.

use glam::DVec2;
use hecs::{Entity, World};
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use holdout_core::components::DashState;
use holdout_core::constants::{DASH_COOLDOWN_TICKS, DASH_DURATION_TICKS};
use holdout_core::enums::WeaponKind;
use holdout_core::events::{AudioEvent, EffectHint};
use holdout_core::types::Position;
use holdout_core::weapon::Loadout;

use crate::world_setup;

/// Fire the active weapon toward `target`, spawning one bullet per pellet.
///
/// An empty weapon that is not already reloading starts a reload instead of
/// firing. Returns the number of bullets spawned.
pub fn fire(
    world: &mut World,
    survivor: Entity,
    target: Position,
    rng: &mut ChaCha8Rng,
    audio_events: &mut Vec<AudioEvent>,
    effects: &mut Vec<EffectHint>,
) -> usize {
    let Ok((origin, loadout)) = world.query_one_mut::<(&Position, &mut Loadout)>(survivor) else {
        return 0;
    };
    let origin = *origin;
    let weapon = loadout.active_mut();

    if weapon.ammo == 0 {
        if weapon.reload() {
            audio_events.push(AudioEvent::ReloadStarted {
                weapon: weapon.kind,
            });
        }
        return 0;
    }

    let kind = weapon.kind;
    let shots = weapon.fire(origin, target, rng);
    if shots.is_empty() {
        return 0;
    }

    for shot in &shots {
        world_setup::spawn_bullet(world, shot);
    }
    audio_events.push(AudioEvent::ShotFired { weapon: kind });
    effects.push(EffectHint::MuzzleFlash { position: origin });
    shots.len()
}

/// Start reloading the active weapon.
pub fn reload(world: &mut World, survivor: Entity, audio_events: &mut Vec<AudioEvent>) -> bool {
    let Ok(loadout) = world.query_one_mut::<&mut Loadout>(survivor) else {
        return false;
    };
    let weapon = loadout.active_mut();
    if !weapon.reload() {
        debug!(weapon = %weapon.kind, ammo = weapon.ammo, "reload rejected");
        return false;
    }
    audio_events.push(AudioEvent::ReloadStarted {
        weapon: weapon.kind,
    });
    true
}

/// Start a dash along `direction`. Rejected while dashing, during the
/// cooldown, or when no direction is held.
pub fn dash(
    world: &mut World,
    survivor: Entity,
    direction: DVec2,
    audio_events: &mut Vec<AudioEvent>,
) -> bool {
    let Ok(state) = world.query_one_mut::<&mut DashState>(survivor) else {
        return false;
    };
    if state.active || state.cooldown_ticks > 0 || direction == DVec2::ZERO {
        debug!(
            active = state.active,
            cooldown = state.cooldown_ticks,
            "dash rejected"
        );
        return false;
    }

    *state = DashState {
        active: true,
        remaining_ticks: DASH_DURATION_TICKS,
        direction: direction.normalize(),
        cooldown_ticks: DASH_COOLDOWN_TICKS,
    };
    audio_events.push(AudioEvent::DashPerformed);
    true
}

/// Cycle the active weapon by `step`.
pub fn switch_weapon(
    world: &mut World,
    survivor: Entity,
    step: i8,
    audio_events: &mut Vec<AudioEvent>,
) -> Option<WeaponKind> {
    let loadout = world.query_one_mut::<&mut Loadout>(survivor).ok()?;
    let weapon = loadout.switch(step);
    audio_events.push(AudioEvent::WeaponSwitched { weapon });
    Some(weapon)
}
