//! Data-driven game balance
//!
//! Every number the simulation consults lives here so a level or settings
//! file can override it. Defaults come from [`crate::consts`].

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Gameplay tuning values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Player ===
    /// Movement speed (grid units per second)
    pub player_speed: f32,
    /// Horizontal field of view (radians)
    pub fov: f32,
    /// Health cap for pickups
    pub max_health: i32,
    /// Seconds between shots
    pub fire_cooldown: f32,
    /// Ammo is never consumed
    pub unlimited_ammo: bool,
    /// Starting rounds when ammo is limited
    pub starting_ammo: u32,
    /// Normalize combined movement input (false sums raw unit vectors,
    /// so diagonals run ~1.41x faster)
    pub normalize_diagonal: bool,

    // === Combat ===
    pub shot_range: f32,
    pub shot_tolerance: f32,
    pub shot_damage: i32,

    // === Hostiles ===
    pub enemy_speed: f32,
    pub enemy_health: i32,
    pub enemy_damage: i32,
    pub boss_speed: f32,
    pub boss_health: i32,
    pub boss_damage: i32,
    pub boss_kill_threshold: u32,
    pub melee_range: f32,
    pub attack_cooldown: f32,
    pub death_duration: f32,
    pub spawn_delay_min: f32,
    pub spawn_delay_max: f32,
    pub max_spawn_attempts: u32,

    // === Pickups ===
    pub pickup_radius: f32,
    pub health_pickup_amount: i32,
    pub ammo_pickup_amount: u32,

    // === Engine ===
    pub max_ray_distance: f32,
    /// Frame deltas are clamped to this before use
    pub max_frame_dt: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            player_speed: PLAYER_SPEED,
            fov: PLAYER_FOV,
            max_health: PLAYER_MAX_HEALTH,
            fire_cooldown: FIRE_COOLDOWN,
            unlimited_ammo: true,
            starting_ammo: 0,
            normalize_diagonal: false,

            shot_range: SHOT_RANGE,
            shot_tolerance: SHOT_TOLERANCE,
            shot_damage: SHOT_DAMAGE,

            enemy_speed: ENEMY_SPEED,
            enemy_health: ENEMY_HEALTH,
            enemy_damage: ENEMY_DAMAGE,
            boss_speed: BOSS_SPEED,
            boss_health: BOSS_HEALTH,
            boss_damage: BOSS_DAMAGE,
            boss_kill_threshold: BOSS_KILL_THRESHOLD,
            melee_range: MELEE_RANGE,
            attack_cooldown: ATTACK_COOLDOWN,
            death_duration: DEATH_DURATION,
            spawn_delay_min: SPAWN_DELAY_MIN,
            spawn_delay_max: SPAWN_DELAY_MAX,
            max_spawn_attempts: MAX_SPAWN_ATTEMPTS,

            pickup_radius: PICKUP_RADIUS,
            health_pickup_amount: HEALTH_PICKUP_AMOUNT,
            ammo_pickup_amount: AMMO_PICKUP_AMOUNT,

            max_ray_distance: MAX_RAY_DISTANCE,
            max_frame_dt: MAX_FRAME_DT,
        }
    }
}

impl Tuning {
    /// Clamp a host-supplied frame delta into the range the sim accepts
    pub fn clamp_dt(&self, dt: f32) -> f32 {
        if dt.is_finite() {
            dt.clamp(0.0, self.max_frame_dt)
        } else {
            0.0
        }
    }
}
