//! Gridfire - raycasting core for a grid-based first-person shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (grid, raycasting, actors, combat, AI)
//! - `level`: Level data loading and validation
//! - `tuning`: Data-driven game balance
//! - `settings`: Player preferences
//! - `input`: Keyboard/pointer state to per-frame commands
//! - `audio`: Sound trigger dispatch to a pluggable backend

pub mod audio;
pub mod input;
pub mod level;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use level::{Level, LevelError};
pub use settings::{Settings, SettingsError};
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    use std::f32::consts::PI;

    /// Nominal frame time used by the headless driver (60 Hz)
    pub const FRAME_DT: f32 = 1.0 / 60.0;
    /// Largest frame delta fed into the simulation (backgrounded tab, debugger pause)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Player defaults
    pub const PLAYER_SPEED: f32 = 3.0;
    pub const PLAYER_FOV: f32 = PI / 3.0;
    pub const PLAYER_MAX_HEALTH: i32 = 100;
    pub const FIRE_COOLDOWN: f32 = 0.3;

    /// Hit-scan shot
    pub const SHOT_RANGE: f32 = 6.0;
    pub const SHOT_TOLERANCE: f32 = 0.15;
    pub const SHOT_DAMAGE: i32 = 25;

    /// Standard hostile
    pub const ENEMY_SPEED: f32 = 0.35;
    pub const ENEMY_HEALTH: i32 = 100;
    pub const ENEMY_DAMAGE: i32 = 10;

    /// Boss hostile
    pub const BOSS_SPEED: f32 = 0.6;
    pub const BOSS_HEALTH: i32 = 400;
    pub const BOSS_DAMAGE: i32 = 20;
    /// Completed deaths needed before the boss appears
    pub const BOSS_KILL_THRESHOLD: u32 = 5;

    /// Melee reach and timing (shared by all hostiles)
    pub const MELEE_RANGE: f32 = 0.6;
    pub const ATTACK_COOLDOWN: f32 = 1.2;
    /// Seconds a hostile spends dying before it is dead
    pub const DEATH_DURATION: f32 = 1.0;

    /// Timed spawning window, seconds [min, max)
    pub const SPAWN_DELAY_MIN: f32 = 3.5;
    pub const SPAWN_DELAY_MAX: f32 = 5.5;
    /// Rejection-sampling budget when looking for a walkable spawn point
    pub const MAX_SPAWN_ATTEMPTS: u32 = 1000;

    /// Pickups
    pub const PICKUP_RADIUS: f32 = 0.5;
    pub const HEALTH_PICKUP_AMOUNT: i32 = 25;
    pub const AMMO_PICKUP_AMOUNT: u32 = 10;

    /// Ray search cap (grid units)
    pub const MAX_RAY_DISTANCE: f32 = 64.0;

    /// Radians of heading per pointer unit
    pub const MOUSE_SENSITIVITY: f32 = 0.002;
}

/// Normalized angle to [-π, π)
#[inline]
pub fn normalize_angle(mut angle: f32) -> f32 {
    use std::f32::consts::PI;
    while angle >= PI {
        angle -= 2.0 * PI;
    }
    while angle < -PI {
        angle += 2.0 * PI;
    }
    angle
}

/// Euclidean distance between two points
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    (b - a).length()
}

/// Angle of the vector from `a` to `b`, in (-π, π]
#[inline]
pub fn angle_between(a: Vec2, b: Vec2) -> f32 {
    (b.y - a.y).atan2(b.x - a.x)
}

/// Unit vector pointing along `angle`
#[inline]
pub fn direction(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_normalize_angle_wraps() {
        assert!((normalize_angle(3.0 * PI) - (-PI)).abs() < 1e-5);
        assert!((normalize_angle(-FRAC_PI_2) + FRAC_PI_2).abs() < 1e-6);
        assert!((normalize_angle(2.0 * PI + 0.25) - 0.25).abs() < 1e-5);
    }

    #[test]
    fn test_distance_and_angle() {
        let a = Vec2::new(1.0, 1.0);
        let b = Vec2::new(4.0, 5.0);
        assert!((distance(a, b) - 5.0).abs() < 1e-6);
        assert!((angle_between(a, Vec2::new(1.0, 3.0)) - FRAC_PI_2).abs() < 1e-6);
        // Straight behind maps to +π, not -π
        assert!((angle_between(a, Vec2::new(0.0, 1.0)) - PI).abs() < 1e-6);
    }
}
