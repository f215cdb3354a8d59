//! Game state and core simulation types
//!
//! The whole world lives in one [`GameState`] that is handed by `&mut` to each
//! update routine every frame. There is no global mutable state.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::grid::GridMap;
use crate::level::{EnemyDef, Level, PickupDef};
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Player health reached zero; the world is frozen
    GameOver,
}

/// Position plus heading, in grid units and radians
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Pose {
    pub pos: Vec2,
    pub angle: f32,
}

impl Pose {
    pub fn new(x: f32, y: f32, angle: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            angle,
        }
    }
}

/// Ammunition supply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Ammo {
    /// Never runs out
    Unlimited,
    /// Counted rounds
    Limited(u32),
}

impl Ammo {
    /// Spend one round. Returns false when empty.
    pub fn try_consume(&mut self) -> bool {
        match self {
            Ammo::Unlimited => true,
            Ammo::Limited(0) => false,
            Ammo::Limited(n) => {
                *n -= 1;
                true
            }
        }
    }

    /// Add rounds (no effect in unlimited mode)
    pub fn add(&mut self, rounds: u32) {
        if let Ammo::Limited(n) = self {
            *n = n.saturating_add(rounds);
        }
    }

    /// HUD text
    pub fn display(&self) -> String {
        match self {
            Ammo::Unlimited => "∞".to_string(),
            Ammo::Limited(n) => n.to_string(),
        }
    }
}

/// The controllable actor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pose: Pose,
    /// Grid units per second
    pub speed: f32,
    /// Field of view (radians)
    pub fov: f32,
    /// Can go negative from the killing blow
    pub health: i32,
    pub ammo: Ammo,
    /// Seconds until the next shot; only the sign matters
    pub fire_cooldown: f32,
}

impl Player {
    pub fn new(pose: Pose, tuning: &Tuning) -> Self {
        Self {
            pose,
            speed: tuning.player_speed,
            fov: tuning.fov,
            health: tuning.max_health,
            ammo: if tuning.unlimited_ammo {
                Ammo::Unlimited
            } else {
                Ammo::Limited(tuning.starting_ammo)
            },
            fire_cooldown: 0.0,
        }
    }

    pub fn is_dead(&self) -> bool {
        self.health <= 0
    }
}

/// Hostile life-cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyState {
    Alive,
    /// Playing the death animation; `death_timer` counts up
    Dying,
    /// Terminal; kept in the list but ignored by simulation and rendering
    Dead,
}

/// A hostile actor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub pose: Pose,
    pub speed: f32,
    pub health: i32,
    pub max_health: i32,
    pub state: EnemyState,
    pub death_timer: f32,
    pub attack_cooldown: f32,
    pub is_boss: bool,
}

impl Enemy {
    /// Standard hostile at `pos` using tuning stats
    pub fn standard(id: u32, pos: Vec2, tuning: &Tuning) -> Self {
        Self::with_stats(id, pos, tuning.enemy_speed, tuning.enemy_health, false)
    }

    /// Boss hostile at `pos` using tuning stats
    pub fn boss(id: u32, pos: Vec2, tuning: &Tuning) -> Self {
        Self::with_stats(id, pos, tuning.boss_speed, tuning.boss_health, true)
    }

    pub fn with_stats(id: u32, pos: Vec2, speed: f32, health: i32, is_boss: bool) -> Self {
        Self {
            id,
            pose: Pose {
                pos,
                angle: 0.0,
            },
            speed,
            health,
            max_health: health,
            state: EnemyState::Alive,
            death_timer: 0.0,
            attack_cooldown: 0.0,
            is_boss,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.state == EnemyState::Alive
    }

    /// Melee damage this hostile deals
    pub fn melee_damage(&self, tuning: &Tuning) -> i32 {
        if self.is_boss {
            tuning.boss_damage
        } else {
            tuning.enemy_damage
        }
    }

    /// Apply damage; crossing zero starts the death animation.
    /// Returns true if this hit was the killing blow.
    pub fn take_damage(&mut self, amount: i32) -> bool {
        if self.state != EnemyState::Alive {
            return false;
        }
        self.health -= amount;
        if self.health <= 0 {
            self.state = EnemyState::Dying;
            self.death_timer = 0.0;
            return true;
        }
        false
    }
}

/// Pickup types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PickupKind {
    Ammo,
    Health,
}

/// A pickup entity; never removed, only flagged
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pickup {
    pub id: u32,
    pub kind: PickupKind,
    pub pos: Vec2,
    pub taken: bool,
}

/// Things that happened during a step, drained by the host
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// Player fired (sound: "shoot")
    Shoot,
    /// A shot connected (sound: "hit")
    Hit { enemy_id: u32 },
    /// A pickup was collected (sound: "pickup")
    PickupCollected { pickup_id: u32, kind: PickupKind },
    EnemySpawned { enemy_id: u32 },
    BossSpawned { enemy_id: u32 },
    /// A hostile finished dying
    EnemyKilled { enemy_id: u32 },
    PlayerDamaged { amount: i32 },
    /// Health finished a frame at or below zero
    PlayerDied,
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub tuning: Tuning,
    pub grid: GridMap,
    pub phase: GamePhase,
    pub player: Player,
    /// Insertion order is the combat tie-break order
    pub enemies: Vec<Enemy>,
    pub pickups: Vec<Pickup>,
    /// Hostiles that completed dying -> dead
    pub kill_count: u32,
    pub boss_spawned: bool,
    /// Seconds accumulated toward the next timed spawn
    pub spawn_timer: f32,
    pub spawn_delay: f32,
    /// Simulated seconds since start
    pub time: f64,
    pub frame: u64,
    /// Events produced since the last drain
    pub events: Vec<GameEvent>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a new game from level data with default tuning
    pub fn new(level: &Level, seed: u64) -> Self {
        Self::with_tuning(level, Tuning::default(), seed)
    }

    pub fn with_tuning(level: &Level, tuning: Tuning, seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let spawn_delay = random_spawn_delay(&mut rng, &tuning);
        let player = Player::new(level.player_start, &tuning);

        let mut state = Self {
            seed,
            rng,
            grid: level.grid.clone(),
            phase: GamePhase::Playing,
            player,
            enemies: Vec::with_capacity(level.enemies.len()),
            pickups: Vec::with_capacity(level.pickups.len()),
            kill_count: 0,
            boss_spawned: false,
            spawn_timer: 0.0,
            spawn_delay,
            time: 0.0,
            frame: 0,
            events: Vec::new(),
            next_id: 1,
            tuning,
        };

        for def in &level.enemies {
            state.add_enemy_from_def(def);
        }
        for def in &level.pickups {
            state.add_pickup_from_def(def);
        }

        log::info!(
            "New game: seed={}, map={}x{}, enemies={}, pickups={}",
            seed,
            state.grid.width(),
            state.grid.height(),
            state.enemies.len(),
            state.pickups.len()
        );
        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn add_enemy_from_def(&mut self, def: &EnemyDef) {
        let id = self.next_entity_id();
        let speed = def.speed.unwrap_or(if def.boss {
            self.tuning.boss_speed
        } else {
            self.tuning.enemy_speed
        });
        let health = def.health.unwrap_or(if def.boss {
            self.tuning.boss_health
        } else {
            self.tuning.enemy_health
        });
        self.enemies
            .push(Enemy::with_stats(id, Vec2::new(def.x, def.y), speed, health, def.boss));
    }

    fn add_pickup_from_def(&mut self, def: &PickupDef) {
        let id = self.next_entity_id();
        self.pickups.push(Pickup {
            id,
            kind: def.kind,
            pos: Vec2::new(def.x, def.y),
            taken: false,
        });
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Hostiles not yet dead
    pub fn living_enemy_count(&self) -> usize {
        self.enemies
            .iter()
            .filter(|e| e.state != EnemyState::Dead)
            .count()
    }
}

/// Draw the next timed-spawn delay, uniform in [min, max)
pub fn random_spawn_delay(rng: &mut Pcg32, tuning: &Tuning) -> f32 {
    if tuning.spawn_delay_max > tuning.spawn_delay_min {
        rng.random_range(tuning.spawn_delay_min..tuning.spawn_delay_max)
    } else {
        tuning.spawn_delay_min
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ammo_modes() {
        let mut ammo = Ammo::Unlimited;
        assert!(ammo.try_consume());
        ammo.add(10);
        assert_eq!(ammo, Ammo::Unlimited);
        assert_eq!(ammo.display(), "∞");

        let mut ammo = Ammo::Limited(1);
        assert!(ammo.try_consume());
        assert!(!ammo.try_consume());
        ammo.add(10);
        assert_eq!(ammo, Ammo::Limited(10));
        assert_eq!(ammo.display(), "10");
    }

    #[test]
    fn test_enemy_damage_transitions_to_dying() {
        let tuning = Tuning::default();
        let mut enemy = Enemy::standard(1, Vec2::new(2.0, 2.0), &tuning);
        enemy.health = 25;
        enemy.death_timer = 0.7;
        assert!(enemy.take_damage(25));
        assert_eq!(enemy.health, 0);
        assert_eq!(enemy.state, EnemyState::Dying);
        assert_eq!(enemy.death_timer, 0.0);
        // Dying hostiles ignore further damage
        assert!(!enemy.take_damage(25));
        assert_eq!(enemy.health, 0);
    }

    #[test]
    fn test_new_state_from_level() {
        let level = Level::default_level().unwrap();
        let state = GameState::new(&level, 7);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.enemies.len(), level.enemies.len());
        assert_eq!(state.pickups.len(), level.pickups.len());
        assert!(state.spawn_delay >= 3.5 && state.spawn_delay < 5.5);
        assert_eq!(state.player.health, 100);
        assert_eq!(state.player.ammo, Ammo::Unlimited);

        // IDs are unique across hostiles and pickups
        let mut ids: Vec<u32> = state.enemies.iter().map(|e| e.id).collect();
        ids.extend(state.pickups.iter().map(|p| p.id));
        let count = ids.len();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), count);
    }
}
