//! Snapshot system: queries the ECS world and builds a complete GameStateSnapshot.
//!
//! This system is read-only; it never modifies the world.

use hecs::{Entity, World};

use holdout_core::components::*;
use holdout_core::config::ArenaConfig;
use holdout_core::constants::MATCH_DURATION_SECS;
use holdout_core::enums::GamePhase;
use holdout_core::events::{AudioEvent, EffectHint};
use holdout_core::state::*;
use holdout_core::types::{Position, Rect, SimTime};
use holdout_core::weapon::Loadout;
use holdout_horde::pursuit::{bob_offset, wobble_offset};

/// Engine state the snapshot needs besides the world itself.
pub struct Frame<'a> {
    pub time: SimTime,
    pub phase: GamePhase,
    pub wave: u32,
    pub arena: &'a ArenaConfig,
    pub walls: &'a [Rect],
    pub survivor: Option<Entity>,
    pub front_end: FrontEndView,
}

/// Build a complete GameStateSnapshot from the current world state.
pub fn build_snapshot(
    world: &World,
    frame: Frame<'_>,
    audio_events: Vec<AudioEvent>,
    effects: Vec<EffectHint>,
) -> GameStateSnapshot {
    let remaining_secs = (MATCH_DURATION_SECS as f64 - frame.time.elapsed_secs).max(0.0);

    GameStateSnapshot {
        time: frame.time,
        phase: frame.phase,
        wave: frame.wave,
        remaining_secs,
        player: frame.survivor.and_then(|e| build_player(world, e)),
        enemies: build_enemies(world),
        bullets: build_bullets(world, frame.arena),
        supplies: build_supplies(world),
        walls: frame.walls.to_vec(),
        front_end: frame.front_end,
        audio_events,
        effects,
    }
}

fn build_player(world: &World, survivor: Entity) -> Option<PlayerView> {
    let mut query = world
        .query_one::<(
            &Position,
            &Health,
            &Mobility,
            &Tally,
            &Invulnerability,
            &DashState,
            &Loadout,
        )>(survivor)
        .ok()?;
    let (pos, health, mobility, tally, invuln, dash, loadout) = query.get()?;

    Some(PlayerView {
        position: *pos,
        health: health.current,
        max_health: health.max,
        speed: mobility.speed,
        boosted: mobility.boost_ticks > 0,
        score: tally.score,
        kills: tally.kills,
        invincible: invuln.is_active(),
        dashing: dash.active,
        dash_cooldown_ticks: dash.cooldown_ticks,
        active_weapon: loadout.active_index(),
        weapons: loadout
            .weapons()
            .iter()
            .map(|w| WeaponView {
                kind: w.kind,
                ammo: w.ammo,
                max_ammo: w.max_ammo,
                reloading: w.is_reloading(),
                reload_progress: w.reload_progress(),
            })
            .collect(),
    })
}

fn build_enemies(world: &World) -> Vec<EnemyView> {
    world
        .query::<(&Enemy, &Position, &Health, &EnemyProfile, &Oscillator)>()
        .iter()
        .map(|(_, (_, pos, health, profile, wobble))| EnemyView {
            position: *pos,
            variant: profile.variant,
            health_fraction: health.fraction(),
            wobble: wobble_offset(wobble.phase).into(),
        })
        .collect()
}

fn build_bullets(world: &World, arena: &ArenaConfig) -> Vec<BulletView> {
    world
        .query::<(&Projectile, &Position)>()
        .iter()
        .map(|(_, (projectile, pos))| BulletView {
            position: *pos,
            color: projectile.color,
            rgb: arena.palette.rgb(projectile.color),
        })
        .collect()
}

fn build_supplies(world: &World) -> Vec<SupplyView> {
    world
        .query::<(&SupplyCrate, &Position, &Oscillator)>()
        .iter()
        .map(|(_, (supply, pos, bob))| SupplyView {
            position: *pos,
            kind: supply.kind,
            bob: bob_offset(bob.phase),
        })
        .collect()
}
