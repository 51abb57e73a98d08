//! Simulation engine: the core of the game.
//!
//! `SimulationEngine` owns the hecs ECS world, runs the front-end state
//! machine, processes player commands, runs all systems while a match is
//! playing, and produces `GameStateSnapshot`s. Completely headless, which is
//! what makes deterministic testing possible.

use std::collections::VecDeque;

use hecs::{Entity, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use holdout_core::commands::PlayerCommand;
use holdout_core::config::ArenaConfig;
use holdout_core::constants::*;
use holdout_core::enums::{GamePhase, MenuItem};
use holdout_core::events::{AudioEvent, EffectHint};
use holdout_core::state::{FrontEndView, GameStateSnapshot};
use holdout_core::types::{Position, Rect, SimTime};

use crate::error::SimError;
use crate::systems;
use crate::systems::collision::Resolution;
use crate::systems::spawn_director::Director;
use crate::world_setup;

/// Configuration for starting a new simulation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    pub arena: ArenaConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            arena: ArenaConfig::default(),
        }
    }
}

/// The simulation engine. Owns the ECS world and all sim state.
pub struct SimulationEngine {
    world: World,
    arena: ArenaConfig,
    time: SimTime,
    phase: GamePhase,
    rng: ChaCha8Rng,
    command_queue: VecDeque<PlayerCommand>,
    despawn_buffer: Vec<Entity>,
    audio_events: Vec<AudioEvent>,
    effects: Vec<EffectHint>,
    survivor: Option<Entity>,
    /// Held movement axes, sampled every tick.
    move_axis: (i8, i8),
    director: Director,
    walls: Vec<Rect>,

    // --- Front end ---
    callsign: String,
    menu_selected: usize,
    access_countdown: u32,
    quit_requested: bool,
}

impl SimulationEngine {
    /// Create a new simulation engine with the given config. The static wall
    /// layout is drawn here, once per engine.
    pub fn new(config: SimConfig) -> Result<Self, SimError> {
        config.arena.validate()?;
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        let walls = world_setup::generate_layout(&config.arena, &mut rng);

        Ok(Self {
            world: World::new(),
            arena: config.arena,
            time: SimTime::default(),
            phase: GamePhase::default(),
            rng,
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            audio_events: Vec::new(),
            effects: Vec::new(),
            survivor: None,
            move_axis: (0, 0),
            director: Director::new()?,
            walls,
            callsign: String::new(),
            menu_selected: 0,
            access_countdown: 0,
            quit_requested: false,
        })
    }

    /// Queue a player command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the simulation by one tick and return the resulting snapshot.
    pub fn tick(&mut self) -> GameStateSnapshot {
        self.process_commands();

        match self.phase {
            GamePhase::AccessGranted => self.count_down_access(),
            GamePhase::Playing => self.run_systems(),
            _ => {}
        }

        let audio_events = std::mem::take(&mut self.audio_events);
        let effects = std::mem::take(&mut self.effects);
        systems::snapshot::build_snapshot(
            &self.world,
            systems::snapshot::Frame {
                time: self.time,
                phase: self.phase,
                wave: self.director.wave(),
                arena: &self.arena,
                walls: &self.walls,
                survivor: self.survivor,
                front_end: self.front_end_view(),
            },
            audio_events,
            effects,
        )
    }

    /// Get the current game phase.
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Get the current simulation time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    /// Current wave number of the running match.
    pub fn wave(&self) -> u32 {
        self.director.wave()
    }

    pub fn arena(&self) -> &ArenaConfig {
        &self.arena
    }

    pub fn callsign(&self) -> &str {
        &self.callsign
    }

    /// Whether a Quit intent has been received. The engine never stops
    /// itself; the driver polls this and shuts down.
    pub fn should_quit(&self) -> bool {
        self.quit_requested
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Mutable world access for tests that stage exact situations.
    #[cfg(test)]
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// The survivor entity of the current match.
    #[cfg(test)]
    pub fn survivor(&self) -> Option<Entity> {
        self.survivor
    }

    /// Spawn an enemy at an exact position (for testing).
    #[cfg(test)]
    pub fn spawn_test_enemy(
        &mut self,
        variant: holdout_core::enums::EnemyVariant,
        position: Position,
    ) -> Entity {
        world_setup::spawn_enemy(&mut self.world, &mut self.rng, variant, position)
    }

    /// Spawn a supply at an exact position (for testing).
    #[cfg(test)]
    pub fn spawn_test_supply(
        &mut self,
        kind: holdout_core::enums::SupplyKind,
        position: Position,
    ) -> Entity {
        world_setup::spawn_supply(&mut self.world, &mut self.rng, kind, position)
    }

    /// Remove every enemy, supply and bullet, leaving only the survivor.
    #[cfg(test)]
    pub fn clear_arena(&mut self) {
        let doomed: Vec<Entity> = self
            .world
            .iter()
            .map(|entity_ref| entity_ref.entity())
            .filter(|&e| Some(e) != self.survivor)
            .collect();
        for entity in doomed {
            let _ = self.world.despawn(entity);
        }
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single player command. Commands that make no sense in the
    /// current phase are dropped.
    fn handle_command(&mut self, command: PlayerCommand) {
        // Held movement is tracked in every phase so a key held through a
        // menu transition still counts once play starts.
        if let PlayerCommand::MoveAxis { dx, dy } = command {
            self.move_axis = (dx.clamp(-1, 1), dy.clamp(-1, 1));
            return;
        }
        if let PlayerCommand::Quit = command {
            info!("quit requested");
            self.quit_requested = true;
            return;
        }

        match self.phase {
            GamePhase::NameEntry => self.handle_name_entry(command),
            GamePhase::AccessGranted => {
                debug!(?command, "ignored during access-granted screen");
            }
            GamePhase::MainMenu => self.handle_menu(command),
            GamePhase::Instructions => {
                if is_keystroke(&command) {
                    self.set_phase(GamePhase::MainMenu);
                }
            }
            GamePhase::Playing => self.handle_play(command),
            GamePhase::Paused => match command {
                PlayerCommand::Resume => self.set_phase(GamePhase::Playing),
                PlayerCommand::Restart => self.begin_match(),
                PlayerCommand::ToMenu => self.return_to_menu(),
                other => debug!(command = ?other, "ignored while paused"),
            },
            GamePhase::GameOver | GamePhase::Victory => match command {
                PlayerCommand::Restart => self.begin_match(),
                PlayerCommand::ToMenu => self.return_to_menu(),
                other => debug!(command = ?other, "ignored after match end"),
            },
        }
    }

    fn handle_name_entry(&mut self, command: PlayerCommand) {
        match command {
            PlayerCommand::TypeChar { ch } => {
                if !ch.is_control() && self.callsign.chars().count() < CALLSIGN_MAX_LEN {
                    self.callsign.push(ch);
                    self.audio_events.push(AudioEvent::Keystroke);
                }
            }
            PlayerCommand::Backspace => {
                self.callsign.pop();
            }
            PlayerCommand::Confirm => {
                if self.callsign.is_empty() {
                    debug!("empty callsign rejected");
                    return;
                }
                info!(callsign = %self.callsign, "access granted");
                self.access_countdown = ACCESS_GRANTED_TICKS;
                self.audio_events.push(AudioEvent::AccessGranted);
                self.set_phase(GamePhase::AccessGranted);
            }
            other => debug!(command = ?other, "ignored during name entry"),
        }
    }

    fn handle_menu(&mut self, command: PlayerCommand) {
        let items = MenuItem::ALL.len();
        match command {
            PlayerCommand::NavigateUp => {
                self.menu_selected = (self.menu_selected + items - 1) % items;
                self.audio_events.push(AudioEvent::MenuNavigated);
            }
            PlayerCommand::NavigateDown => {
                self.menu_selected = (self.menu_selected + 1) % items;
                self.audio_events.push(AudioEvent::MenuNavigated);
            }
            PlayerCommand::Confirm => {
                self.audio_events.push(AudioEvent::MenuNavigated);
                match MenuItem::ALL[self.menu_selected] {
                    MenuItem::StartGame => self.begin_match(),
                    MenuItem::HowToPlay => self.set_phase(GamePhase::Instructions),
                    MenuItem::Quit => {
                        info!("quit selected from menu");
                        self.quit_requested = true;
                    }
                }
            }
            other => debug!(command = ?other, "ignored in menu"),
        }
    }

    fn handle_play(&mut self, command: PlayerCommand) {
        let Some(survivor) = self.survivor else {
            return;
        };
        match command {
            PlayerCommand::FireAt { x, y } => {
                systems::actions::fire(
                    &mut self.world,
                    survivor,
                    Position::new(x, y),
                    &mut self.rng,
                    &mut self.audio_events,
                    &mut self.effects,
                );
            }
            PlayerCommand::Dash => {
                let direction = systems::player::movement_direction(self.move_axis);
                systems::actions::dash(
                    &mut self.world,
                    survivor,
                    direction,
                    &mut self.audio_events,
                );
            }
            PlayerCommand::Reload => {
                systems::actions::reload(&mut self.world, survivor, &mut self.audio_events);
            }
            PlayerCommand::SwitchWeapon { step } => {
                systems::actions::switch_weapon(
                    &mut self.world,
                    survivor,
                    step,
                    &mut self.audio_events,
                );
            }
            PlayerCommand::Pause => self.set_phase(GamePhase::Paused),
            other => debug!(command = ?other, "ignored while playing"),
        }
    }

    fn count_down_access(&mut self) {
        self.access_countdown = self.access_countdown.saturating_sub(1);
        if self.access_countdown == 0 {
            self.set_phase(GamePhase::MainMenu);
        }
    }

    /// Discard any previous match and build a fresh one.
    fn begin_match(&mut self) {
        self.world.clear();
        self.despawn_buffer.clear();
        self.time = SimTime::default();
        self.director.reset();

        let survivor = world_setup::spawn_player(&mut self.world, &self.arena);
        self.survivor = Some(survivor);
        self.director
            .seed_match(&mut self.world, &mut self.rng, &self.arena);

        info!(callsign = %self.callsign, "match started");
        self.set_phase(GamePhase::Playing);
    }

    fn return_to_menu(&mut self) {
        self.world.clear();
        self.survivor = None;
        self.time = SimTime::default();
        self.director.reset();
        self.menu_selected = 0;
        self.set_phase(GamePhase::MainMenu);
    }

    fn set_phase(&mut self, phase: GamePhase) {
        if self.phase != phase {
            debug!(from = ?self.phase, to = ?phase, "phase change");
            self.phase = phase;
        }
    }

    /// Run all systems in order.
    fn run_systems(&mut self) {
        let Some(survivor) = self.survivor else {
            return;
        };
        self.time.advance();

        // 1. Survivor movement, dash and timers
        let direction = systems::player::movement_direction(self.move_axis);
        systems::player::run(
            &mut self.world,
            &self.arena,
            direction,
            &mut self.audio_events,
        );
        // 2. Enemy pursuit
        systems::enemy_ai::run(&mut self.world);
        // 3. Bullet integration and supply bob
        systems::movement::run(&mut self.world);
        systems::movement::animate_supplies(&mut self.world);
        // 4. Spawn director
        self.director.run(
            &mut self.world,
            &mut self.rng,
            &self.arena,
            self.time.tick,
        );
        // 5. Out-of-bounds bullets
        systems::cleanup::run(&mut self.world, &self.arena, &mut self.despawn_buffer);
        // 6. Collision resolution
        let resolution = systems::collision::run(
            &mut self.world,
            &self.arena,
            survivor,
            &mut self.despawn_buffer,
            &mut self.audio_events,
            &mut self.effects,
        );

        // 7. Terminal conditions
        if resolution == Resolution::Defeated {
            info!(tick = self.time.tick, wave = self.wave(), "match lost");
            self.audio_events.push(AudioEvent::MatchLost);
            self.set_phase(GamePhase::GameOver);
        } else if self.time.tick >= MATCH_DURATION_TICKS {
            info!(tick = self.time.tick, "match won");
            self.audio_events.push(AudioEvent::MatchWon);
            self.set_phase(GamePhase::Victory);
        }
    }

    fn front_end_view(&self) -> FrontEndView {
        FrontEndView {
            callsign: self.callsign.clone(),
            menu_items: MenuItem::ALL.to_vec(),
            selected: self.menu_selected,
            access_countdown_ticks: self.access_countdown,
        }
    }
}

/// Intents that count as a key press on the instructions screen. Held
/// movement and mouse fire are not key presses.
fn is_keystroke(command: &PlayerCommand) -> bool {
    !matches!(
        command,
        PlayerCommand::MoveAxis { .. } | PlayerCommand::FireAt { .. }
    )
}
