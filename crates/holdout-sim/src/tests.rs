//! Tests for the simulation engine, front-end flow, spawn director, weapon
//! actions and collision resolution.

use holdout_core::commands::PlayerCommand;
use holdout_core::components::{Health, Invulnerability};
use holdout_core::config::ArenaConfig;
use holdout_core::constants::*;
use holdout_core::enums::*;
use holdout_core::events::{AudioEvent, EffectHint};
use holdout_core::state::GameStateSnapshot;
use holdout_core::types::{Position, Velocity};
use holdout_core::weapon::{Loadout, Shot};

use crate::engine::{SimConfig, SimulationEngine};
use crate::error::SimError;
use crate::systems::player::movement_direction;
use crate::systems::spawn_director::{enemy_cap, supply_cap, wave_at};
use crate::world_setup;

fn new_engine(seed: u64) -> SimulationEngine {
    SimulationEngine::new(SimConfig {
        seed,
        ..Default::default()
    })
    .unwrap()
}

/// Walk the front end (callsign, access screen, menu) into a running match.
fn start_match(engine: &mut SimulationEngine) -> GameStateSnapshot {
    engine.queue_commands([PlayerCommand::TypeChar { ch: 'Z' }, PlayerCommand::Confirm]);
    for _ in 0..ACCESS_GRANTED_TICKS {
        engine.tick();
    }
    assert_eq!(engine.phase(), GamePhase::MainMenu);
    engine.queue_command(PlayerCommand::Confirm);
    let snap = engine.tick();
    assert_eq!(snap.phase, GamePhase::Playing);
    snap
}

/// A running match with nothing in the arena but the survivor.
fn empty_arena(seed: u64) -> SimulationEngine {
    let mut engine = new_engine(seed);
    start_match(&mut engine);
    engine.clear_arena();
    engine
}

fn survivor_position(engine: &SimulationEngine) -> Position {
    let survivor = engine.survivor().unwrap();
    *engine.world().get::<&Position>(survivor).unwrap()
}

fn set_survivor_health(engine: &mut SimulationEngine, current: i32) {
    let survivor = engine.survivor().unwrap();
    engine
        .world_mut()
        .get::<&mut Health>(survivor)
        .unwrap()
        .current = current;
}

// ---- Determinism ----

#[test]
fn test_determinism_same_seed() {
    let mut engine_a = new_engine(12345);
    let mut engine_b = new_engine(12345);
    start_match(&mut engine_a);
    start_match(&mut engine_b);

    for i in 0..600u32 {
        let script = [
            PlayerCommand::MoveAxis {
                dx: (i / 40 % 3) as i8 - 1,
                dy: (i / 70 % 3) as i8 - 1,
            },
            PlayerCommand::FireAt {
                x: (i * 37 % 1024) as f64,
                y: (i * 53 % 768) as f64,
            },
        ];
        engine_a.queue_commands(script.clone());
        engine_b.queue_commands(script);

        let json_a = serde_json::to_string(&engine_a.tick()).unwrap();
        let json_b = serde_json::to_string(&engine_b.tick()).unwrap();
        assert_eq!(json_a, json_b, "Snapshots diverged with same seed at tick {i}");
    }
}

#[test]
fn test_determinism_different_seeds() {
    let mut engine_a = new_engine(111);
    let mut engine_b = new_engine(222);

    let snap_a = start_match(&mut engine_a);
    let snap_b = start_match(&mut engine_b);

    let json_a = serde_json::to_string(&snap_a).unwrap();
    let json_b = serde_json::to_string(&snap_b).unwrap();
    assert_ne!(json_a, json_b, "Different seeds should produce divergent output");
}

// ---- Construction ----

#[test]
fn test_invalid_arena_rejected() {
    let result = SimulationEngine::new(SimConfig {
        seed: 1,
        arena: ArenaConfig {
            width: 0.0,
            ..Default::default()
        },
    });
    assert!(matches!(result, Err(SimError::Config(_))));
}

#[test]
fn test_static_layout() {
    let mut engine = new_engine(5);
    let first = engine.tick();
    // 20 columns x 15 rows of 50 px tiles: 40 top/bottom + 26 side tiles.
    assert_eq!(first.walls.len(), 66 + LAYOUT_BLOCKS);
    let (border, blocks) = first.walls.split_at(66);
    assert!(border.iter().all(|w| w.width == WALL_TILE && w.height == WALL_TILE));
    for block in blocks {
        assert_eq!(block.x % WALL_TILE, 0.0);
        assert_eq!(block.y % WALL_TILE, 0.0);
        assert!(LAYOUT_BLOCK_SIDES.contains(&block.width));
        assert!(LAYOUT_BLOCK_SIDES.contains(&block.height));
    }

    // The layout is drawn once and survives match restarts.
    let playing = start_match(&mut engine);
    assert_eq!(first.walls, playing.walls);

    let other = new_engine(6).tick();
    assert_ne!(first.walls, other.walls);
}

// ---- Front end ----

#[test]
fn test_initial_state() {
    let mut engine = new_engine(1);
    let snap = engine.tick();
    assert_eq!(snap.phase, GamePhase::NameEntry);
    assert!(snap.player.is_none());
    assert!(snap.enemies.is_empty());
    assert_eq!(snap.time.tick, 0);
    assert_eq!(snap.front_end.menu_items, MenuItem::ALL.to_vec());
}

#[test]
fn test_callsign_entry() {
    let mut engine = new_engine(1);

    engine.queue_command(PlayerCommand::Confirm);
    engine.tick();
    assert_eq!(engine.phase(), GamePhase::NameEntry, "empty callsign accepted");

    engine.queue_commands((0..20).map(|_| PlayerCommand::TypeChar { ch: 'x' }));
    engine.queue_command(PlayerCommand::TypeChar { ch: '\n' });
    let snap = engine.tick();
    assert_eq!(snap.front_end.callsign.chars().count(), CALLSIGN_MAX_LEN);
    let keystrokes = snap
        .audio_events
        .iter()
        .filter(|e| **e == AudioEvent::Keystroke)
        .count();
    assert_eq!(keystrokes, CALLSIGN_MAX_LEN);

    engine.queue_commands([PlayerCommand::Backspace, PlayerCommand::Backspace]);
    let snap = engine.tick();
    assert_eq!(snap.front_end.callsign.len(), CALLSIGN_MAX_LEN - 2);
}

#[test]
fn test_access_granted_countdown() {
    let mut engine = new_engine(1);
    engine.queue_commands([PlayerCommand::TypeChar { ch: 'A' }, PlayerCommand::Confirm]);
    let snap = engine.tick();
    assert_eq!(snap.phase, GamePhase::AccessGranted);
    assert!(snap.audio_events.contains(&AudioEvent::AccessGranted));
    assert_eq!(engine.callsign(), "A");

    // Intents are ignored while the welcome screen is up.
    engine.queue_command(PlayerCommand::Confirm);
    for _ in 1..ACCESS_GRANTED_TICKS - 1 {
        assert_eq!(engine.tick().phase, GamePhase::AccessGranted);
    }
    let snap = engine.tick();
    assert_eq!(snap.phase, GamePhase::MainMenu);
    assert_eq!(snap.front_end.access_countdown_ticks, 0);
}

#[test]
fn test_menu_navigation_wraps() {
    let mut engine = new_engine(1);
    engine.queue_commands([PlayerCommand::TypeChar { ch: 'A' }, PlayerCommand::Confirm]);
    for _ in 0..ACCESS_GRANTED_TICKS {
        engine.tick();
    }

    engine.queue_command(PlayerCommand::NavigateUp);
    let snap = engine.tick();
    assert_eq!(snap.front_end.selected, 2);
    assert!(snap.audio_events.contains(&AudioEvent::MenuNavigated));

    engine.queue_command(PlayerCommand::NavigateDown);
    assert_eq!(engine.tick().front_end.selected, 0);

    // How To Play, then any key back to the menu.
    engine.queue_commands([PlayerCommand::NavigateDown, PlayerCommand::Confirm]);
    assert_eq!(engine.tick().phase, GamePhase::Instructions);
    engine.queue_command(PlayerCommand::FireAt { x: 1.0, y: 1.0 });
    assert_eq!(engine.tick().phase, GamePhase::Instructions);
    engine.queue_command(PlayerCommand::Reload);
    assert_eq!(engine.tick().phase, GamePhase::MainMenu);

    // Quit item raises a quit request without changing phase.
    engine.queue_commands([PlayerCommand::NavigateDown, PlayerCommand::Confirm]);
    engine.tick();
    assert!(engine.should_quit());
    assert_eq!(engine.phase(), GamePhase::MainMenu);
}

#[test]
fn test_quit_intent_from_any_phase() {
    let mut engine = empty_arena(3);
    assert!(!engine.should_quit());
    engine.queue_command(PlayerCommand::Quit);
    let snap = engine.tick();
    assert!(engine.should_quit());
    assert_eq!(snap.phase, GamePhase::Playing);
}

// ---- Match lifecycle ----

#[test]
fn test_match_start_population() {
    let mut engine = new_engine(9);
    let snap = start_match(&mut engine);

    let player = snap.player.as_ref().unwrap();
    assert_eq!(player.health, PLAYER_MAX_HEALTH);
    assert_eq!(player.weapons.len(), 3);
    assert_eq!(player.weapon().unwrap().kind, WeaponKind::Pistol);
    assert_eq!(snap.time.tick, 1);
    assert_eq!(snap.wave, 1);
    assert_eq!(snap.enemies.len(), INITIAL_ENEMIES as usize);
    // The pre-seed is capped by the wave-1 supply target.
    assert_eq!(snap.supplies.len(), supply_cap(1));

    let arena = engine.arena().clone();
    for enemy in &snap.enemies {
        let outside = enemy.position.x < 0.0
            || enemy.position.x > arena.width
            || enemy.position.y < 0.0
            || enemy.position.y > arena.height;
        assert!(outside, "enemy spawned inside the arena at {:?}", enemy.position);
    }
    for supply in &snap.supplies {
        assert!(supply.position.x >= arena.supply_inset);
        assert!(supply.position.x <= arena.width - arena.supply_inset);
        assert!(supply.position.y >= arena.supply_inset);
        assert!(supply.position.y <= arena.height - arena.supply_inset);
    }
}

#[test]
fn test_pause_freezes_simulation() {
    let mut engine = new_engine(4);
    start_match(&mut engine);
    for _ in 0..30 {
        engine.tick();
    }

    engine.queue_command(PlayerCommand::Pause);
    let paused = engine.tick();
    assert_eq!(paused.phase, GamePhase::Paused);

    for _ in 0..10 {
        let snap = engine.tick();
        assert_eq!(snap.time, paused.time);
        assert_eq!(
            serde_json::to_string(&snap.enemies).unwrap(),
            serde_json::to_string(&paused.enemies).unwrap()
        );
    }

    // Play intents are dropped while paused.
    engine.queue_command(PlayerCommand::FireAt { x: 0.0, y: 0.0 });
    assert!(engine.tick().bullets.is_empty());

    engine.queue_command(PlayerCommand::Resume);
    let snap = engine.tick();
    assert_eq!(snap.phase, GamePhase::Playing);
    assert_eq!(snap.time.tick, paused.time.tick + 1);
}

#[test]
fn test_defeat_and_restart() {
    let mut engine = empty_arena(8);
    set_survivor_health(&mut engine, 10);
    let pos = survivor_position(&engine);
    engine.spawn_test_enemy(EnemyVariant::Normal, Position::new(pos.x + 5.0, pos.y));

    let snap = engine.tick();
    assert_eq!(snap.phase, GamePhase::GameOver);
    assert_eq!(snap.player.as_ref().unwrap().health, 0);
    assert!(snap.audio_events.contains(&AudioEvent::MatchLost));

    // Terminal: nothing advances until an explicit restart.
    let frozen = engine.tick();
    assert_eq!(frozen.phase, GamePhase::GameOver);
    assert_eq!(frozen.time, snap.time);

    engine.queue_command(PlayerCommand::Restart);
    let snap = engine.tick();
    assert_eq!(snap.phase, GamePhase::Playing);
    assert_eq!(snap.time.tick, 1);
    let player = snap.player.as_ref().unwrap();
    assert_eq!(player.health, PLAYER_MAX_HEALTH);
    assert_eq!(player.score, 0);
    assert_eq!(snap.enemies.len(), INITIAL_ENEMIES as usize);
}

#[test]
fn test_return_to_menu_discards_match() {
    let mut engine = empty_arena(8);
    engine.queue_command(PlayerCommand::ToMenu);
    assert_eq!(engine.tick().phase, GamePhase::Playing, "ToMenu needs a paused or ended match");

    engine.queue_commands([PlayerCommand::Pause, PlayerCommand::ToMenu]);
    let snap = engine.tick();
    assert_eq!(snap.phase, GamePhase::MainMenu);
    assert!(snap.player.is_none());
    assert!(snap.enemies.is_empty());
    assert_eq!(snap.time.tick, 0);
}

#[test]
fn test_victory_at_match_end() {
    let mut engine = empty_arena(21);
    while engine.time().tick < MATCH_DURATION_TICKS - 1 {
        engine.clear_arena();
        let snap = engine.tick();
        assert_eq!(snap.phase, GamePhase::Playing);
    }

    engine.clear_arena();
    let snap = engine.tick();
    assert_eq!(snap.time.elapsed_secs, MATCH_DURATION_SECS as f64);
    assert_eq!(snap.phase, GamePhase::Victory);
    assert_eq!(snap.remaining_secs, 0.0);
    assert!(snap.audio_events.contains(&AudioEvent::MatchWon));
    assert!(!snap.audio_events.contains(&AudioEvent::MatchLost));

    let after = engine.tick();
    assert_eq!(after.phase, GamePhase::Victory);
    assert_eq!(after.time, snap.time);
}

// ---- Spawn director ----

#[test]
fn test_wave_formula() {
    assert_eq!(wave_at(0), 1);
    assert_eq!(wave_at(WAVE_LENGTH_TICKS - 1), 1);
    assert_eq!(wave_at(WAVE_LENGTH_TICKS), 2);
    assert_eq!(wave_at(MATCH_DURATION_TICKS), 7);
    assert_eq!(enemy_cap(1), 7);
    assert_eq!(enemy_cap(3), 11);
    assert_eq!(supply_cap(1), 4);
    assert_eq!(supply_cap(6), 9);
}

#[test]
fn test_population_stays_under_caps() {
    let mut engine = new_engine(77);
    start_match(&mut engine);

    let mut last_wave = 1;
    let mut saw_full_enemy_cap = false;
    for _ in 0..(WAVE_LENGTH_TICKS * 2 + 120) {
        set_survivor_health(&mut engine, PLAYER_MAX_HEALTH);
        let snap = engine.tick();
        assert_eq!(snap.phase, GamePhase::Playing);

        let expected_wave = 1 + (snap.time.elapsed_secs / WAVE_LENGTH_SECS as f64).floor() as u32;
        assert_eq!(snap.wave, expected_wave);
        assert!(snap.wave >= last_wave);
        last_wave = snap.wave;

        assert!(snap.enemies.len() <= enemy_cap(snap.wave));
        assert!(snap.supplies.len() <= supply_cap(snap.wave));
        saw_full_enemy_cap |= snap.enemies.len() == enemy_cap(snap.wave);
    }
    assert_eq!(last_wave, 3);
    assert!(saw_full_enemy_cap, "director never filled the enemy quota");
}

#[test]
fn test_enemy_spawn_interval() {
    let mut engine = empty_arena(31);
    let start = engine.time().tick;
    let mut spawn_ticks = Vec::new();
    let mut previous = 0;
    while engine.time().tick < start + 130 {
        let snap = engine.tick();
        if snap.enemies.len() > previous {
            spawn_ticks.push(snap.time.tick);
        }
        previous = snap.enemies.len();
    }
    assert_eq!(spawn_ticks, vec![60, 120]);
}

// ---- Weapons ----

#[test]
fn test_shotgun_fires_three_pellets() {
    let mut engine = empty_arena(2);
    engine.queue_commands([
        PlayerCommand::SwitchWeapon { step: 1 },
        PlayerCommand::FireAt { x: 900.0, y: 384.0 },
    ]);
    let snap = engine.tick();

    let player = snap.player.as_ref().unwrap();
    let shotgun = player.weapon().unwrap();
    assert_eq!(shotgun.kind, WeaponKind::Shotgun);
    assert_eq!(shotgun.ammo, 5);
    assert_eq!(snap.bullets.len(), 3);
    assert!(snap.bullets.iter().all(|b| b.color == ColorTag::Orange));
    assert!(snap.bullets.iter().all(|b| b.rgb == [255, 165, 0]));
    assert!(snap
        .audio_events
        .contains(&AudioEvent::WeaponSwitched { weapon: WeaponKind::Shotgun }));
    assert!(snap
        .audio_events
        .contains(&AudioEvent::ShotFired { weapon: WeaponKind::Shotgun }));
    assert!(snap
        .effects
        .iter()
        .any(|e| matches!(e, EffectHint::MuzzleFlash { .. })));
}

#[test]
fn test_fire_cooldown_blocks_second_shot() {
    let mut engine = empty_arena(2);
    engine.queue_commands([
        PlayerCommand::FireAt { x: 900.0, y: 384.0 },
        PlayerCommand::FireAt { x: 900.0, y: 384.0 },
    ]);
    let snap = engine.tick();
    assert_eq!(snap.bullets.len(), 1);
    assert_eq!(snap.player.unwrap().weapon().unwrap().ammo, 11);
}

#[test]
fn test_reload_completes_after_reload_time() {
    let mut engine = empty_arena(2);
    engine.queue_commands([
        PlayerCommand::FireAt { x: 900.0, y: 384.0 },
        PlayerCommand::Reload,
    ]);
    let snap = engine.tick();
    assert!(snap.audio_events.contains(&AudioEvent::ReloadStarted { weapon: WeaponKind::Pistol }));
    assert!(snap.player.as_ref().unwrap().weapon().unwrap().reloading);

    // A second reload while one is running is rejected silently.
    engine.queue_command(PlayerCommand::Reload);
    let snap = engine.tick();
    assert!(!snap.audio_events.contains(&AudioEvent::ReloadStarted { weapon: WeaponKind::Pistol }));

    for _ in 2..59 {
        engine.clear_arena();
        engine.tick();
    }
    engine.clear_arena();
    let snap = engine.tick();
    assert!(snap.audio_events.contains(&AudioEvent::ReloadFinished { weapon: WeaponKind::Pistol }));
    let pistol = snap.player.as_ref().unwrap().weapon().unwrap().clone();
    assert_eq!(pistol.ammo, 12);
    assert!(!pistol.reloading);
}

#[test]
fn test_empty_weapon_reloads_instead_of_firing() {
    let mut engine = empty_arena(2);
    let survivor = engine.survivor().unwrap();
    engine
        .world_mut()
        .get::<&mut Loadout>(survivor)
        .unwrap()
        .active_mut()
        .ammo = 0;

    engine.queue_command(PlayerCommand::FireAt { x: 900.0, y: 384.0 });
    let snap = engine.tick();
    assert!(snap.bullets.is_empty());
    assert!(snap.audio_events.contains(&AudioEvent::ReloadStarted { weapon: WeaponKind::Pistol }));
    assert!(snap.player.unwrap().weapon().unwrap().reloading);
}

// ---- Movement & dash ----

#[test]
fn test_movement_direction_normalizes_diagonals() {
    assert_eq!(movement_direction((0, 0)), glam::DVec2::ZERO);
    assert_eq!(movement_direction((1, 0)), glam::DVec2::new(1.0, 0.0));
    assert_eq!(movement_direction((0, -5)), glam::DVec2::new(0.0, -1.0));
    let diag = movement_direction((1, 1));
    assert!((diag.length() - 1.0).abs() < 1e-12);
}

#[test]
fn test_survivor_clamped_to_arena() {
    let mut engine = empty_arena(12);
    engine.queue_command(PlayerCommand::MoveAxis { dx: -1, dy: -1 });
    for _ in 0..200 {
        engine.clear_arena();
        engine.tick();
    }
    let pos = survivor_position(&engine);
    assert_eq!(pos, Position::new(PLAYER_SIZE / 2.0, PLAYER_SIZE / 2.0));
}

#[test]
fn test_dash_displacement_and_duration() {
    let mut engine = empty_arena(13);
    let start = survivor_position(&engine);
    engine.queue_commands([
        PlayerCommand::MoveAxis { dx: 1, dy: 0 },
        PlayerCommand::Dash,
        PlayerCommand::MoveAxis { dx: 0, dy: 0 },
    ]);

    for step in 1..=DASH_DURATION_TICKS {
        let snap = engine.tick();
        let player = snap.player.unwrap();
        assert!(player.dashing);
        assert_eq!(player.position.x, start.x + DASH_SPEED * step as f64);
        assert_eq!(player.position.y, start.y);
        if step == 1 {
            assert!(snap.audio_events.contains(&AudioEvent::DashPerformed));
        }
    }

    let snap = engine.tick();
    let player = snap.player.unwrap();
    assert!(!player.dashing);
    assert_eq!(player.position.x, start.x + DASH_SPEED * DASH_DURATION_TICKS as f64);
}

#[test]
fn test_dash_cooldown() {
    let mut engine = empty_arena(14);
    let dash_down = [
        PlayerCommand::MoveAxis { dx: 0, dy: 1 },
        PlayerCommand::Dash,
        PlayerCommand::MoveAxis { dx: 0, dy: 0 },
    ];
    let dash_right = [
        PlayerCommand::MoveAxis { dx: 1, dy: 0 },
        PlayerCommand::Dash,
        PlayerCommand::MoveAxis { dx: 0, dy: 0 },
    ];

    engine.queue_commands(dash_right);
    assert!(engine.tick().audio_events.contains(&AudioEvent::DashPerformed));

    // Ticks 2..=59 after the dash.
    for _ in 2..DASH_COOLDOWN_TICKS {
        engine.clear_arena();
        engine.tick();
    }

    engine.queue_commands(dash_down.clone());
    let snap = engine.tick();
    assert!(
        !snap.audio_events.contains(&AudioEvent::DashPerformed),
        "dash accepted during cooldown"
    );
    assert!(!snap.player.unwrap().dashing);

    engine.queue_commands(dash_down);
    let snap = engine.tick();
    assert!(snap.audio_events.contains(&AudioEvent::DashPerformed));
    assert!(snap.player.unwrap().dashing);
}

#[test]
fn test_dash_needs_direction() {
    let mut engine = empty_arena(15);
    engine.queue_command(PlayerCommand::Dash);
    let snap = engine.tick();
    assert!(!snap.audio_events.contains(&AudioEvent::DashPerformed));
    let player = snap.player.unwrap();
    assert!(!player.dashing);
    assert_eq!(player.dash_cooldown_ticks, 0);
}

#[test]
fn test_dash_grants_contact_immunity() {
    let mut engine = empty_arena(16);
    let pos = survivor_position(&engine);
    engine.spawn_test_enemy(EnemyVariant::Tank, Position::new(pos.x + 18.0, pos.y));
    engine.queue_commands([
        PlayerCommand::MoveAxis { dx: 1, dy: 0 },
        PlayerCommand::Dash,
        PlayerCommand::MoveAxis { dx: 0, dy: 0 },
    ]);
    let snap = engine.tick();
    assert_eq!(snap.player.unwrap().health, PLAYER_MAX_HEALTH);
    assert!(!snap.audio_events.iter().any(|e| matches!(e, AudioEvent::HitTaken { .. })));
}

// ---- Collision resolution ----

#[test]
fn test_pistol_hit_on_tank() {
    let mut engine = empty_arena(7);
    let pos = survivor_position(&engine);
    let tank = engine.spawn_test_enemy(EnemyVariant::Tank, Position::new(pos.x + 100.0, pos.y));
    engine.queue_command(PlayerCommand::FireAt {
        x: pos.x + 100.0,
        y: pos.y,
    });

    let mut hit = false;
    for _ in 0..20 {
        let snap = engine.tick();
        if snap.effects.iter().any(|e| matches!(e, EffectHint::Blood { heavy: true, .. })) {
            hit = true;
            assert!(snap.bullets.is_empty(), "bullet should be consumed");
            break;
        }
    }
    assert!(hit, "bullet never reached the tank");

    let health = *engine.world().get::<&Health>(tank).unwrap();
    assert_eq!(health.current, 95);
    assert_eq!(health.max, 120);
    let snap = engine.tick();
    assert_eq!(snap.enemies.len(), 1);
    assert!((snap.enemies[0].health_fraction - 95.0 / 120.0).abs() < 1e-12);
}

#[test]
fn test_kill_awards_score() {
    let mut engine = empty_arena(17);
    let pos = survivor_position(&engine);
    let enemy = engine.spawn_test_enemy(EnemyVariant::Normal, Position::new(pos.x, pos.y - 120.0));
    engine.world_mut().get::<&mut Health>(enemy).unwrap().current = 10;
    engine.queue_command(PlayerCommand::FireAt {
        x: pos.x,
        y: pos.y - 120.0,
    });

    let mut killed = None;
    for _ in 0..20 {
        let snap = engine.tick();
        if snap
            .audio_events
            .contains(&AudioEvent::EnemyKilled { variant: EnemyVariant::Normal })
        {
            killed = Some(snap);
            break;
        }
    }
    let snap = killed.expect("enemy was never killed");
    assert!(snap.enemies.is_empty());
    assert!(snap.effects.iter().any(|e| matches!(e, EffectHint::Death { .. })));
    let player = snap.player.unwrap();
    assert_eq!(player.kills, 1);
    assert_eq!(player.score, 100);
}

#[test]
fn test_out_of_bounds_bullet_removed_without_effect() {
    let mut engine = empty_arena(18);
    let arena = engine.arena().clone();
    let tank = engine.spawn_test_enemy(
        EnemyVariant::Tank,
        Position::new(arena.width + 16.0, arena.height / 2.0),
    );
    world_setup::spawn_bullet(
        engine.world_mut(),
        &Shot {
            origin: Position::new(arena.width - 4.0, arena.height / 2.0),
            velocity: Velocity::new(12.0, 0.0),
            damage: 25,
            color: ColorTag::Yellow,
        },
    );

    let snap = engine.tick();
    assert!(snap.bullets.is_empty());
    assert!(snap.effects.is_empty());
    assert_eq!(engine.world().get::<&Health>(tank).unwrap().current, 120);
}

#[test]
fn test_contact_damage_and_invincibility() {
    let mut engine = empty_arena(19);
    let pos = survivor_position(&engine);
    engine.spawn_test_enemy(EnemyVariant::Normal, Position::new(pos.x + 10.0, pos.y));

    let snap = engine.tick();
    let player = snap.player.as_ref().unwrap();
    assert_eq!(player.health, 85);
    assert!(player.invincible);
    assert!(player.position.x < pos.x, "knockback should push away from the enemy");
    assert!(snap.audio_events.contains(&AudioEvent::HitTaken { damage: 15 }));
    assert!(snap
        .effects
        .iter()
        .any(|e| matches!(e, EffectHint::PlayerHit { .. })));

    let survivor = engine.survivor().unwrap();
    let window = engine
        .world()
        .get::<&Invulnerability>(survivor)
        .unwrap()
        .remaining_ticks;
    assert_eq!(window, INVINCIBILITY_TICKS);

    // The enemy keeps touching but the window holds for one second.
    for _ in 1..INVINCIBILITY_TICKS {
        assert_eq!(engine.tick().player.unwrap().health, 85);
    }
}

#[test]
fn test_knockback_scales_with_resistance() {
    // Tank resists 0.95 and Fast 0.3, both fixed in the archetype table.
    for (variant, expected) in [(EnemyVariant::Tank, 1.0), (EnemyVariant::Fast, 14.0)] {
        let mut engine = empty_arena(21);
        let pos = survivor_position(&engine);
        engine.spawn_test_enemy(variant, Position::new(pos.x + 10.0, pos.y));

        let snap = engine.tick();
        let player = snap.player.unwrap();
        let shift = pos.x - player.position.x;
        assert!(
            (shift - expected).abs() < 1e-9,
            "{variant:?} knockback moved {shift}, expected {expected}"
        );
        assert!((player.position.y - pos.y).abs() < 1e-9);
    }
}

#[test]
fn test_one_contact_per_tick() {
    let mut engine = empty_arena(20);
    let pos = survivor_position(&engine);
    engine.spawn_test_enemy(EnemyVariant::Normal, Position::new(pos.x + 5.0, pos.y));
    engine.spawn_test_enemy(EnemyVariant::Tank, Position::new(pos.x - 5.0, pos.y));
    engine.spawn_test_enemy(EnemyVariant::Fast, Position::new(pos.x, pos.y + 5.0));

    let snap = engine.tick();
    let hits: Vec<_> = snap
        .audio_events
        .iter()
        .filter(|e| matches!(e, AudioEvent::HitTaken { .. }))
        .collect();
    assert_eq!(hits.len(), 1);
    assert!(snap.player.unwrap().health >= PLAYER_MAX_HEALTH - 25);
}

#[test]
fn test_health_supply_clamps_to_max() {
    let mut engine = empty_arena(22);
    set_survivor_health(&mut engine, 90);
    let pos = survivor_position(&engine);
    engine.spawn_test_supply(SupplyKind::Health, pos);

    let snap = engine.tick();
    assert_eq!(snap.player.as_ref().unwrap().health, 100);
    assert!(snap.supplies.is_empty());
    assert!(snap
        .audio_events
        .contains(&AudioEvent::SupplyCollected { kind: SupplyKind::Health }));
}

#[test]
fn test_ammo_supply_refills_every_weapon() {
    let mut engine = empty_arena(23);
    let survivor = engine.survivor().unwrap();
    {
        let mut loadout = engine.world_mut().get::<&mut Loadout>(survivor).unwrap();
        let weapons = loadout.weapons_mut();
        weapons[0].ammo = 2;
        weapons[1].ammo = 0;
        weapons[2].ammo = 29;
    }
    let pos = survivor_position(&engine);
    engine.spawn_test_supply(SupplyKind::Ammo, pos);

    let snap = engine.tick();
    let ammo: Vec<u32> = snap.player.unwrap().weapons.iter().map(|w| w.ammo).collect();
    assert_eq!(ammo, vec![12, 6, 30]);
}

#[test]
fn test_score_supplies() {
    let mut engine = empty_arena(24);
    let pos = survivor_position(&engine);
    engine.spawn_test_supply(SupplyKind::Score, pos);
    engine.spawn_test_supply(SupplyKind::Normal, pos);

    let snap = engine.tick();
    assert_eq!(snap.player.unwrap().score, 100 + NORMAL_SUPPLY_POINTS);
}

#[test]
fn test_speed_boost_window_restarts_on_pickup() {
    let mut engine = empty_arena(25);
    let pos = survivor_position(&engine);
    engine.spawn_test_supply(SupplyKind::Speed, pos);
    let snap = engine.tick();
    let player = snap.player.unwrap();
    assert_eq!(player.speed, PLAYER_BASE_SPEED + 5.0);
    assert!(player.boosted);

    for _ in 0..200 {
        engine.clear_arena();
        engine.tick();
    }
    engine.spawn_test_supply(SupplyKind::Speed, survivor_position(&engine));
    engine.tick();

    for _ in 0..SPEED_BOOST_TICKS - 1 {
        engine.clear_arena();
        assert!(engine.tick().player.unwrap().boosted);
    }
    engine.clear_arena();
    let player = engine.tick().player.unwrap();
    assert!(!player.boosted);
    assert_eq!(player.speed, PLAYER_BASE_SPEED);
}

// ---- Invariants under play ----

#[test]
fn test_health_and_ammo_stay_in_range() {
    let mut engine = new_engine(404);
    start_match(&mut engine);

    for i in 0..3000u32 {
        let mut commands = vec![PlayerCommand::MoveAxis {
            dx: ((i / 90) % 3) as i8 - 1,
            dy: ((i / 55) % 3) as i8 - 1,
        }];
        if i % 7 == 0 {
            commands.push(PlayerCommand::FireAt {
                x: (i * 131 % 1024) as f64,
                y: (i * 71 % 768) as f64,
            });
        }
        if i % 400 == 0 {
            commands.push(PlayerCommand::SwitchWeapon { step: 1 });
        }
        if i % 250 == 0 {
            commands.push(PlayerCommand::Reload);
        }
        if i % 130 == 0 {
            commands.push(PlayerCommand::Dash);
        }
        engine.queue_commands(commands);

        let snap = engine.tick();
        if let Some(player) = &snap.player {
            assert!(player.health >= 0 && player.health <= player.max_health);
            for weapon in &player.weapons {
                assert!(weapon.ammo <= weapon.max_ammo);
            }
            let arena = engine.arena();
            assert!(player.position.x >= 0.0 && player.position.x <= arena.width);
            assert!(player.position.y >= 0.0 && player.position.y <= arena.height);
        }
        for enemy in &snap.enemies {
            assert!(enemy.health_fraction > 0.0 && enemy.health_fraction <= 1.0);
        }
        if snap.phase != GamePhase::Playing {
            assert_eq!(snap.phase, GamePhase::GameOver);
            break;
        }
    }
}
