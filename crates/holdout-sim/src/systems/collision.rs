//! Collision resolver: bullets against enemies, survivor against supplies,
//! then survivor against enemies.
//!
//! Runs after all movement and after out-of-bounds cleanup. Removals are
//! buffered and swept once per pass so no query ever sees a half-removed
//! entity.

use hecs::{Entity, World};
use tracing::{debug, trace};

use holdout_core::components::*;
use holdout_core::config::ArenaConfig;
use holdout_core::constants::*;
use holdout_core::enums::{EnemyVariant, SupplyKind};
use holdout_core::events::{AudioEvent, EffectHint};
use holdout_core::types::{Aabb, Hitbox, Position};
use holdout_core::weapon::Loadout;
use holdout_horde::pursuit::push_away;

/// What the resolver decided about the survivor this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Survived,
    Defeated,
}

/// Resolve every collision for one tick.
pub fn run(
    world: &mut World,
    arena: &ArenaConfig,
    survivor: Entity,
    despawn_buffer: &mut Vec<Entity>,
    audio_events: &mut Vec<AudioEvent>,
    effects: &mut Vec<EffectHint>,
) -> Resolution {
    resolve_bullets(world, survivor, despawn_buffer, audio_events, effects);
    resolve_supplies(world, survivor, despawn_buffer, audio_events, effects);
    resolve_contact(world, arena, survivor, audio_events, effects)
}

/// An enemy as seen by the bullet pass.
struct Target {
    entity: Entity,
    aabb: Aabb,
    position: Position,
    variant: EnemyVariant,
    score_value: u64,
    dead: bool,
}

fn sweep(world: &mut World, despawn_buffer: &mut Vec<Entity>) {
    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}

fn survivor_box(world: &World, survivor: Entity) -> Option<Aabb> {
    let mut query = world.query_one::<(&Position, &Hitbox)>(survivor).ok()?;
    query.get().map(|(pos, hitbox)| hitbox.at(pos))
}

/// Each bullet damages the first live enemy it overlaps and is consumed.
fn resolve_bullets(
    world: &mut World,
    survivor: Entity,
    despawn_buffer: &mut Vec<Entity>,
    audio_events: &mut Vec<AudioEvent>,
    effects: &mut Vec<EffectHint>,
) {
    despawn_buffer.clear();

    let bullets: Vec<(Entity, Aabb, i32)> = world
        .query::<(&Projectile, &Position, &Hitbox)>()
        .iter()
        .map(|(e, (projectile, pos, hitbox))| (e, hitbox.at(pos), projectile.damage))
        .collect();
    if bullets.is_empty() {
        return;
    }

    let mut targets: Vec<Target> = world
        .query::<(&Enemy, &Position, &Hitbox, &EnemyProfile)>()
        .iter()
        .map(|(entity, (_, pos, hitbox, profile))| Target {
            entity,
            aabb: hitbox.at(pos),
            position: *pos,
            variant: profile.variant,
            score_value: profile.score_value,
            dead: false,
        })
        .collect();

    let mut kills = 0u32;
    let mut points = 0u64;

    for (bullet, bullet_box, damage) in bullets {
        let Some(target) = targets
            .iter_mut()
            .find(|t| !t.dead && t.aabb.overlaps(&bullet_box))
        else {
            continue;
        };

        despawn_buffer.push(bullet);
        effects.push(EffectHint::Blood {
            position: target.position,
            heavy: target.variant == EnemyVariant::Tank,
        });

        let remaining = match world.get::<&mut Health>(target.entity) {
            Ok(mut health) => health.damage(damage),
            Err(_) => continue,
        };
        trace!(variant = ?target.variant, damage, remaining, "enemy hit");

        if remaining <= 0 {
            target.dead = true;
            despawn_buffer.push(target.entity);
            kills += 1;
            points += target.score_value;
            effects.push(EffectHint::Death {
                position: target.position,
            });
            audio_events.push(AudioEvent::EnemyKilled {
                variant: target.variant,
            });
            debug!(variant = ?target.variant, "enemy killed");
        }
    }

    if kills > 0 {
        if let Ok(mut tally) = world.get::<&mut Tally>(survivor) {
            tally.kills += kills;
            tally.score += points;
        }
    }

    sweep(world, despawn_buffer);
}

/// Apply and consume every supply the survivor overlaps.
fn resolve_supplies(
    world: &mut World,
    survivor: Entity,
    despawn_buffer: &mut Vec<Entity>,
    audio_events: &mut Vec<AudioEvent>,
    effects: &mut Vec<EffectHint>,
) {
    despawn_buffer.clear();

    let Some(survivor_box) = survivor_box(world, survivor) else {
        return;
    };
    let pickups: Vec<(Entity, SupplyCrate, Position)> = world
        .query::<(&SupplyCrate, &Position, &Hitbox)>()
        .iter()
        .filter(|(_, (_, pos, hitbox))| hitbox.at(pos).overlaps(&survivor_box))
        .map(|(e, (supply, pos, _))| (e, *supply, *pos))
        .collect();
    if pickups.is_empty() {
        return;
    }

    let Ok((health, mobility, tally, loadout)) = world
        .query_one_mut::<(&mut Health, &mut Mobility, &mut Tally, &mut Loadout)>(survivor)
    else {
        return;
    };

    for (entity, supply, position) in pickups {
        match supply.kind {
            SupplyKind::Normal => tally.score += NORMAL_SUPPLY_POINTS,
            SupplyKind::Score => tally.score += supply.value.max(0) as u64,
            SupplyKind::Health => {
                health.heal(supply.value);
            }
            SupplyKind::Speed => {
                mobility.speed = mobility.base_speed + supply.value as f64;
                mobility.boost_ticks = SPEED_BOOST_TICKS;
            }
            SupplyKind::Ammo => {
                let rounds = supply.value.max(0) as u32;
                for weapon in loadout.weapons_mut() {
                    weapon.add_ammo(rounds);
                }
            }
        }

        despawn_buffer.push(entity);
        audio_events.push(AudioEvent::SupplyCollected { kind: supply.kind });
        effects.push(EffectHint::Pickup {
            position,
            kind: supply.kind,
        });
        debug!(kind = ?supply.kind, "supply collected");
    }

    sweep(world, despawn_buffer);
}

/// At most one enemy contact per tick, skipped while invulnerable or dashing.
fn resolve_contact(
    world: &mut World,
    arena: &ArenaConfig,
    survivor: Entity,
    audio_events: &mut Vec<AudioEvent>,
    effects: &mut Vec<EffectHint>,
) -> Resolution {
    let Some(survivor_box) = survivor_box(world, survivor) else {
        return Resolution::Survived;
    };

    let attacker = world
        .query::<(&Enemy, &Position, &Hitbox, &EnemyProfile)>()
        .iter()
        .find(|(_, (_, pos, hitbox, _))| hitbox.at(pos).overlaps(&survivor_box))
        .map(|(_, (_, pos, _, profile))| (*pos, *profile));
    let Some((enemy_pos, profile)) = attacker else {
        return Resolution::Survived;
    };

    let Ok((pos, hitbox, health, invuln, dash)) = world.query_one_mut::<(
        &mut Position,
        &Hitbox,
        &mut Health,
        &mut Invulnerability,
        &DashState,
    )>(survivor) else {
        return Resolution::Survived;
    };
    if invuln.is_active() || dash.active {
        return Resolution::Survived;
    }

    let remaining = health.damage(profile.contact_damage);
    invuln.remaining_ticks = INVINCIBILITY_TICKS;

    let knockback = KNOCKBACK_DISTANCE * (1.0 - profile.knockback_resistance);
    pos.translate(push_away(pos.as_vec(), enemy_pos.as_vec(), knockback));
    arena.clamp_inside(pos, hitbox);

    audio_events.push(AudioEvent::HitTaken {
        damage: profile.contact_damage,
    });
    effects.push(EffectHint::PlayerHit { position: *pos });
    debug!(variant = ?profile.variant, remaining, "survivor hit");

    if health.is_depleted() {
        Resolution::Defeated
    } else {
        Resolution::Survived
    }
}
