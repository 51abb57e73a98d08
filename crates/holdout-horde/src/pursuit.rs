//! Pursuit steering and cosmetic motion.
//!
//! Pure functions on plain vectors. No ECS dependency.

use glam::DVec2;

use holdout_core::constants::{ENEMY_WOBBLE_AMPLITUDE, SUPPLY_BOB_AMPLITUDE};

/// Move `from` toward `target` by `speed` pixels. Distances under one pixel
/// are treated as one so an enemy sitting on its target never divides by zero.
pub fn step_toward(from: DVec2, target: DVec2, speed: f64) -> DVec2 {
    let delta = target - from;
    let dist = delta.length().max(1.0);
    from + delta / dist * speed
}

/// Displacement that pushes `subject` away from `source`.
pub fn push_away(subject: DVec2, source: DVec2, distance: f64) -> DVec2 {
    let delta = subject - source;
    let dist = delta.length().max(1.0);
    delta / dist * distance
}

/// Draw offset for an enemy's idle wobble.
pub fn wobble_offset(phase: f64) -> DVec2 {
    DVec2::new(
        phase.sin() * ENEMY_WOBBLE_AMPLITUDE,
        (phase * 1.5).cos() * ENEMY_WOBBLE_AMPLITUDE,
    )
}

/// Vertical draw offset for a supply's bob.
pub fn bob_offset(phase: f64) -> f64 {
    phase.sin() * SUPPLY_BOB_AMPLITUDE
}
