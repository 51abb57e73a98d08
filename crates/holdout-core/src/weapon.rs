//! Weapon model: per-weapon ammo, fire cooldown and reload state machine.
//!
//! All timers count ticks. `update` is called once per simulation tick and
//! never drives a timer below zero.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::constants::TICK_RATE;
use crate::enums::{ColorTag, WeaponKind};
use crate::types::{Position, Velocity};

/// Fixed stats of a weapon preset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeaponSpec {
    pub kind: WeaponKind,
    pub damage: i32,
    /// Shots per second.
    pub fire_rate: f64,
    pub max_ammo: u32,
    pub reload_ticks: u32,
    /// Maximum angular deviation per projectile (radians).
    pub spread: f64,
    /// Projectile speed (pixels per tick).
    pub bullet_speed: f64,
    /// Projectiles emitted per shot.
    pub pellets: u32,
    pub color: ColorTag,
}

/// Preset table lookup.
pub fn spec(kind: WeaponKind) -> WeaponSpec {
    match kind {
        WeaponKind::Pistol => WeaponSpec {
            kind,
            damage: 25,
            fire_rate: 3.0,
            max_ammo: 12,
            reload_ticks: 60,
            spread: 0.10,
            bullet_speed: 12.0,
            pellets: 1,
            color: ColorTag::Yellow,
        },
        WeaponKind::Shotgun => WeaponSpec {
            kind,
            damage: 15,
            fire_rate: 1.0,
            max_ammo: 6,
            reload_ticks: 90,
            spread: 0.30,
            bullet_speed: 10.0,
            pellets: 3,
            color: ColorTag::Orange,
        },
        WeaponKind::Rifle => WeaponSpec {
            kind,
            damage: 20,
            fire_rate: 6.0,
            max_ammo: 30,
            reload_ticks: 45,
            spread: 0.05,
            bullet_speed: 15.0,
            pellets: 1,
            color: ColorTag::Blue,
        },
    }
}

/// A projectile requested by a successful shot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shot {
    pub origin: Position,
    pub velocity: Velocity,
    pub damage: i32,
    pub color: ColorTag,
}

/// Live weapon state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Weapon {
    pub kind: WeaponKind,
    pub damage: i32,
    pub fire_rate: f64,
    pub max_ammo: u32,
    pub ammo: u32,
    pub reload_time: u32,
    pub spread: f64,
    pub bullet_speed: f64,
    pub pellets: u32,
    pub color: ColorTag,
    /// Ticks until the next shot is allowed.
    pub fire_timer: u32,
    /// Ticks until the running reload completes.
    pub reload_timer: u32,
}

impl Weapon {
    /// A fully loaded weapon of the given preset.
    pub fn new(kind: WeaponKind) -> Self {
        let spec = spec(kind);
        Self {
            kind,
            damage: spec.damage,
            fire_rate: spec.fire_rate,
            max_ammo: spec.max_ammo,
            ammo: spec.max_ammo,
            reload_time: spec.reload_ticks,
            spread: spec.spread,
            bullet_speed: spec.bullet_speed,
            pellets: spec.pellets,
            color: spec.color,
            fire_timer: 0,
            reload_timer: 0,
        }
    }

    pub fn can_fire(&self) -> bool {
        self.ammo > 0 && self.reload_timer == 0 && self.fire_timer == 0
    }

    pub fn is_reloading(&self) -> bool {
        self.reload_timer > 0
    }

    /// Cooldown between shots in ticks.
    pub fn cooldown_ticks(&self) -> u32 {
        (TICK_RATE as f64 / self.fire_rate).round() as u32
    }

    /// Fire toward `target`. Returns no shots if firing is not permitted.
    pub fn fire<R: Rng + ?Sized>(
        &mut self,
        origin: Position,
        target: Position,
        rng: &mut R,
    ) -> Vec<Shot> {
        if !self.can_fire() {
            return Vec::new();
        }

        self.ammo -= 1;
        self.fire_timer = self.cooldown_ticks();

        let base_angle = origin.angle_to(&target);
        (0..self.pellets)
            .map(|_| {
                let angle = base_angle + rng.gen_range(-self.spread..=self.spread);
                Shot {
                    origin,
                    velocity: Velocity::from_angle(angle, self.bullet_speed),
                    damage: self.damage,
                    color: self.color,
                }
            })
            .collect()
    }

    /// Start a reload. Returns false (and changes nothing) while already
    /// reloading or when the magazine is full.
    pub fn reload(&mut self) -> bool {
        if self.reload_timer == 0 && self.ammo < self.max_ammo {
            self.reload_timer = self.reload_time;
            true
        } else {
            false
        }
    }

    /// Add rounds without exceeding the magazine size.
    pub fn add_ammo(&mut self, amount: u32) {
        self.ammo = self.ammo.saturating_add(amount).min(self.max_ammo);
    }

    /// Advance timers by one tick. Returns true when a reload completed on
    /// this tick.
    pub fn update(&mut self) -> bool {
        self.fire_timer = self.fire_timer.saturating_sub(1);
        if self.reload_timer > 0 {
            self.reload_timer -= 1;
            if self.reload_timer == 0 {
                self.ammo = self.max_ammo;
                return true;
            }
        }
        false
    }

    /// Reload completion in [0, 1]; 1 when not reloading.
    pub fn reload_progress(&self) -> f64 {
        if self.reload_timer == 0 || self.reload_time == 0 {
            1.0
        } else {
            1.0 - self.reload_timer as f64 / self.reload_time as f64
        }
    }
}

/// Ordered weapon inventory with exactly one active weapon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Loadout {
    weapons: Vec<Weapon>,
    active: usize,
}

impl Default for Loadout {
    fn default() -> Self {
        Self {
            weapons: WeaponKind::LOADOUT.into_iter().map(Weapon::new).collect(),
            active: 0,
        }
    }
}

impl Loadout {
    pub fn weapons(&self) -> &[Weapon] {
        &self.weapons
    }

    pub fn weapons_mut(&mut self) -> &mut [Weapon] {
        &mut self.weapons
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn active(&self) -> &Weapon {
        &self.weapons[self.active]
    }

    pub fn active_mut(&mut self) -> &mut Weapon {
        &mut self.weapons[self.active]
    }

    /// Cycle the active weapon by `step`, wrapping in both directions.
    pub fn switch(&mut self, step: i8) -> WeaponKind {
        let len = self.weapons.len() as i64;
        self.active = (self.active as i64 + step as i64).rem_euclid(len) as usize;
        self.active().kind
    }
}
