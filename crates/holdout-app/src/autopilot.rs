//! Autopilot input source for the headless driver.
//!
//! Plays a deterministic bot: enters a callsign, starts a match, kites away
//! from the nearest enemy while shooting it, grabs nearby supplies and dashes
//! out of contact. Quits once the match is decided.

use glam::DVec2;

use holdout_core::commands::PlayerCommand;
use holdout_core::enums::GamePhase;
use holdout_core::state::{GameStateSnapshot, PlayerView};

use crate::game_loop::InputSource;

/// Enemies closer than this are fled from.
const DANGER_RADIUS: f64 = 140.0;

/// Enemies closer than this trigger a dash.
const PANIC_RADIUS: f64 = 45.0;

/// Supplies closer than this are worth a detour when nothing is in danger range.
const PICKUP_RADIUS: f64 = 250.0;

pub struct Autopilot {
    callsign: String,
    typed: bool,
    played: bool,
}

impl Autopilot {
    pub fn new(callsign: impl Into<String>) -> Self {
        Self {
            callsign: callsign.into(),
            typed: false,
            played: false,
        }
    }

    fn name_entry(&mut self) -> Vec<PlayerCommand> {
        if self.typed {
            return Vec::new();
        }
        self.typed = true;
        let mut commands: Vec<PlayerCommand> = self
            .callsign
            .chars()
            .map(|ch| PlayerCommand::TypeChar { ch })
            .collect();
        commands.push(PlayerCommand::Confirm);
        commands
    }

    fn play(&mut self, snapshot: &GameStateSnapshot) -> Vec<PlayerCommand> {
        self.played = true;
        let Some(player) = snapshot.player.as_ref() else {
            return Vec::new();
        };
        let me = player.position.as_vec();

        let nearest_enemy = snapshot
            .enemies
            .iter()
            .map(|e| e.position.as_vec())
            .min_by(|a, b| a.distance(me).total_cmp(&b.distance(me)));
        let nearest_supply = snapshot
            .supplies
            .iter()
            .map(|s| s.position.as_vec())
            .filter(|p| p.distance(me) < PICKUP_RADIUS)
            .min_by(|a, b| a.distance(me).total_cmp(&b.distance(me)));

        let mut commands = Vec::new();
        let heading = match (nearest_enemy, nearest_supply) {
            (Some(enemy), _) if enemy.distance(me) < DANGER_RADIUS => me - enemy,
            (_, Some(supply)) => supply - me,
            (Some(enemy), None) => enemy - me,
            (None, None) => DVec2::ZERO,
        };
        let (dx, dy) = axis_toward(heading);
        commands.push(PlayerCommand::MoveAxis { dx, dy });

        if let Some(enemy) = nearest_enemy {
            if enemy.distance(me) < PANIC_RADIUS && !player.dashing {
                commands.push(PlayerCommand::Dash);
            }
            commands.push(PlayerCommand::FireAt {
                x: enemy.x,
                y: enemy.y,
            });
        }
        commands.extend(self.manage_weapons(player));
        commands
    }

    /// Reload an empty gun, or switch to another gun that still has rounds.
    fn manage_weapons(&self, player: &PlayerView) -> Option<PlayerCommand> {
        let active = player.weapon()?;
        if active.ammo > 0 || active.reloading {
            return None;
        }
        let loaded = player
            .weapons
            .iter()
            .position(|w| w.ammo > 0 && !w.reloading)?;
        let step = loaded as i64 - player.active_weapon as i64;
        Some(PlayerCommand::SwitchWeapon {
            step: step.clamp(i8::MIN as i64, i8::MAX as i64) as i8,
        })
    }
}

impl InputSource for Autopilot {
    fn poll(&mut self, snapshot: &GameStateSnapshot) -> Vec<PlayerCommand> {
        match snapshot.phase {
            GamePhase::NameEntry => self.name_entry(),
            GamePhase::AccessGranted => Vec::new(),
            GamePhase::MainMenu if self.played => vec![PlayerCommand::Quit],
            GamePhase::MainMenu | GamePhase::Instructions => vec![PlayerCommand::Confirm],
            GamePhase::Playing => self.play(snapshot),
            GamePhase::Paused => vec![PlayerCommand::Resume],
            GamePhase::GameOver | GamePhase::Victory => vec![PlayerCommand::Quit],
        }
    }
}

/// Snap a heading onto the eight held-key directions.
fn axis_toward(heading: DVec2) -> (i8, i8) {
    if heading.length_squared() < 1e-9 {
        return (0, 0);
    }
    let dir = heading.normalize();
    let snap = |v: f64| {
        if v > 0.38 {
            1
        } else if v < -0.38 {
            -1
        } else {
            0
        }
    };
    (snap(dir.x), snap(dir.y))
}
