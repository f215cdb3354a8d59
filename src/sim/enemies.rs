//! Hostile population: spawning, chase-and-melee AI, death progression,
//! and the one-time boss trigger.
//!
//! Life-cycle: `Alive --(health <= 0)--> Dying --(death_timer > duration)--> Dead`.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::grid::GridMap;
use super::state::{Enemy, EnemyState, GameEvent, GameState, Player, random_spawn_delay};
use crate::tuning::Tuning;

/// Rejection-sample a walkable point. Gives up after `attempts` tries.
pub fn sample_walkable(grid: &GridMap, rng: &mut Pcg32, attempts: u32) -> Option<Vec2> {
    let w = grid.width() as f32;
    let h = grid.height() as f32;
    (0..attempts)
        .map(|_| Vec2::new(rng.random::<f32>() * w, rng.random::<f32>() * h))
        .find(|p| grid.is_walkable_at(*p))
}

/// Spawn a hostile at a random walkable point.
/// Returns the new id, or `None` if no walkable point was found.
pub fn spawn_enemy(state: &mut GameState, is_boss: bool) -> Option<u32> {
    let Some(pos) = sample_walkable(&state.grid, &mut state.rng, state.tuning.max_spawn_attempts)
    else {
        log::warn!(
            "No walkable spawn point after {} attempts; skipping {} spawn",
            state.tuning.max_spawn_attempts,
            if is_boss { "boss" } else { "enemy" }
        );
        return None;
    };

    let id = state.next_entity_id();
    let enemy = if is_boss {
        Enemy::boss(id, pos, &state.tuning)
    } else {
        Enemy::standard(id, pos, &state.tuning)
    };
    state.enemies.push(enemy);

    if is_boss {
        log::info!("Boss {} spawned at ({:.2}, {:.2})", id, pos.x, pos.y);
        state.events.push(GameEvent::BossSpawned { enemy_id: id });
    } else {
        log::debug!("Enemy {} spawned at ({:.2}, {:.2})", id, pos.x, pos.y);
        state.events.push(GameEvent::EnemySpawned { enemy_id: id });
    }
    Some(id)
}

/// Chase the player and melee when close. Returns damage dealt this frame.
fn update_alive(enemy: &mut Enemy, target: Vec2, grid: &GridMap, tuning: &Tuning, dt: f32) -> i32 {
    enemy.attack_cooldown -= dt;

    let to_target = target - enemy.pose.pos;
    let dist = to_target.length();

    if dist > tuning.melee_range {
        let dir = to_target / dist;
        enemy.pose.angle = dir.y.atan2(dir.x);
        let next = enemy.pose.pos + dir * enemy.speed * dt;
        if grid.is_walkable_at(next) {
            enemy.pose.pos = next;
        }
        0
    } else if dist < tuning.melee_range && enemy.attack_cooldown <= 0.0 {
        enemy.attack_cooldown = tuning.attack_cooldown;
        enemy.melee_damage(tuning)
    } else {
        0
    }
}

/// Advance the death animation. Returns true on the frame the hostile dies.
fn update_dying(enemy: &mut Enemy, tuning: &Tuning, dt: f32) -> bool {
    enemy.death_timer += dt;
    if enemy.death_timer > tuning.death_duration {
        enemy.state = EnemyState::Dead;
        return true;
    }
    false
}

fn damage_player(player: &mut Player, amount: i32, events: &mut Vec<GameEvent>) {
    player.health -= amount;
    events.push(GameEvent::PlayerDamaged { amount });
    log::debug!("Player hit for {} (health {})", amount, player.health);
}

/// Advance every hostile one frame
pub fn update_enemies(state: &mut GameState, dt: f32) {
    state.spawn_timer += dt;
    if !state.boss_spawned && state.spawn_timer >= state.spawn_delay {
        spawn_enemy(state, false);
        state.spawn_timer = 0.0;
        state.spawn_delay = random_spawn_delay(&mut state.rng, &state.tuning);
    }

    // Index walk: a boss appended mid-sweep is still visited this frame
    let target = state.player.pose.pos;
    let mut i = 0;
    while i < state.enemies.len() {
        let enemy = &mut state.enemies[i];
        let mut killed = false;
        match enemy.state {
            EnemyState::Alive => {
                let damage = update_alive(enemy, target, &state.grid, &state.tuning, dt);
                if damage > 0 {
                    damage_player(&mut state.player, damage, &mut state.events);
                }
            }
            EnemyState::Dying => {
                if update_dying(enemy, &state.tuning, dt) {
                    killed = true;
                    state.kill_count += 1;
                    state.events.push(GameEvent::EnemyKilled { enemy_id: enemy.id });
                    log::debug!("Enemy {} dead (kills: {})", enemy.id, state.kill_count);
                }
            }
            EnemyState::Dead => {}
        }

        if killed && !state.boss_spawned && state.kill_count >= state.tuning.boss_kill_threshold {
            state.boss_spawned = true;
            spawn_enemy(state, true);
        }
        i += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::Level;
    use crate::sim::state::Pose;

    fn arena_state() -> GameState {
        let grid = GridMap::parse(
            "
            ##########
            #........#
            #........#
            #...#....#
            #........#
            ##########
            ",
        )
        .unwrap();
        let level = Level::new(grid, Pose::new(1.5, 1.5, 0.0), Vec::new(), Vec::new()).unwrap();
        let mut state = GameState::new(&level, 42);
        // Keep timed spawns out of the way unless a test wants them
        state.spawn_delay = 1.0e9;
        state
    }

    fn push_enemy(state: &mut GameState, x: f32, y: f32) -> usize {
        let id = state.next_entity_id();
        state
            .enemies
            .push(Enemy::standard(id, Vec2::new(x, y), &state.tuning));
        state.enemies.len() - 1
    }

    #[test]
    fn test_enemy_walks_toward_player() {
        let mut state = arena_state();
        let i = push_enemy(&mut state, 6.5, 1.5);
        update_enemies(&mut state, 1.0);
        assert!((state.enemies[i].pose.pos.x - 6.15).abs() < 1e-5);
        assert!((state.enemies[i].pose.pos.y - 1.5).abs() < 1e-5);
    }

    #[test]
    fn test_enemy_blocked_by_wall_stays_put() {
        let mut state = arena_state();
        state.player.pose.pos = Vec2::new(2.5, 3.5);
        // Pillar at cell (4, 3) sits between them
        let i = push_enemy(&mut state, 5.05, 3.5);
        update_enemies(&mut state, 1.0);
        assert_eq!(state.enemies[i].pose.pos, Vec2::new(5.05, 3.5));
    }

    #[test]
    fn test_melee_damage_and_cooldown() {
        let mut state = arena_state();
        let i = push_enemy(&mut state, 2.0, 1.5);
        update_enemies(&mut state, 0.1);
        assert_eq!(state.player.health, 90);
        assert!((state.enemies[i].attack_cooldown - 1.2).abs() < 1e-6);
        // In melee range: no movement
        assert_eq!(state.enemies[i].pose.pos, Vec2::new(2.0, 1.5));

        update_enemies(&mut state, 0.5);
        assert_eq!(state.player.health, 90);
        update_enemies(&mut state, 0.8);
        assert_eq!(state.player.health, 80);
    }

    #[test]
    fn test_boss_melee_can_drop_health_below_zero() {
        let mut state = arena_state();
        state.player.health = 10;
        let id = state.next_entity_id();
        state
            .enemies
            .push(Enemy::boss(id, Vec2::new(2.0, 1.5), &state.tuning));

        update_enemies(&mut state, 0.1);
        assert_eq!(state.player.health, -10);
        let events = state.drain_events();
        assert!(events.contains(&GameEvent::PlayerDamaged { amount: 20 }));
    }

    #[test]
    fn test_dying_becomes_dead_strictly_after_duration() {
        let mut state = arena_state();
        let i = push_enemy(&mut state, 6.5, 3.5);
        state.enemies[i].state = EnemyState::Dying;

        update_enemies(&mut state, 0.5);
        update_enemies(&mut state, 0.5);
        assert_eq!(state.enemies[i].death_timer, 1.0);
        assert_eq!(state.enemies[i].state, EnemyState::Dying);
        assert_eq!(state.kill_count, 0);

        update_enemies(&mut state, 0.01);
        assert_eq!(state.enemies[i].state, EnemyState::Dead);
        assert_eq!(state.kill_count, 1);

        // Dead is terminal and inert
        let pos = state.enemies[i].pose.pos;
        update_enemies(&mut state, 2.0);
        assert_eq!(state.enemies[i].state, EnemyState::Dead);
        assert_eq!(state.enemies[i].pose.pos, pos);
        assert_eq!(state.kill_count, 1);
    }

    #[test]
    fn test_fifth_kill_spawns_exactly_one_boss() {
        let mut state = arena_state();
        for n in 0..7 {
            let i = push_enemy(&mut state, 6.5 + (n % 2) as f32, 4.5);
            state.enemies[i].state = EnemyState::Dying;
            // Stagger so kills land on separate frames
            state.enemies[i].death_timer = 0.95 - n as f32 * 0.1;
        }

        let mut boss_seen_at_kill = None;
        for _ in 0..20 {
            update_enemies(&mut state, 0.1);
            if state.boss_spawned && boss_seen_at_kill.is_none() {
                boss_seen_at_kill = Some(state.kill_count);
            }
        }

        assert_eq!(state.kill_count, 7);
        assert_eq!(boss_seen_at_kill, Some(5));
        assert_eq!(state.enemies.iter().filter(|e| e.is_boss).count(), 1);
        let boss = state.enemies.iter().find(|e| e.is_boss).unwrap();
        assert_eq!(boss.max_health, 400);
        assert_eq!(boss.health, 400);
        assert!((boss.speed - 0.6).abs() < 1e-6);
    }

    #[test]
    fn test_boss_acts_on_the_frame_it_spawns() {
        let mut state = arena_state();
        for n in 0..5 {
            let i = push_enemy(&mut state, 6.5 + (n % 2) as f32, 4.5);
            state.enemies[i].state = EnemyState::Dying;
            state.enemies[i].death_timer = 0.95;
        }

        update_enemies(&mut state, 0.1);
        assert_eq!(state.kill_count, 5);
        let boss = state.enemies.iter().find(|e| e.is_boss).unwrap();
        // Fresh hostiles start at 0; the same-frame sweep has already run its AI
        assert_ne!(boss.attack_cooldown, 0.0);
    }

    #[test]
    fn test_timed_spawn_uses_random_delay() {
        let mut state = arena_state();
        state.spawn_delay = 4.0;
        update_enemies(&mut state, 3.0);
        assert!(state.enemies.is_empty());

        update_enemies(&mut state, 1.0);
        assert_eq!(state.enemies.len(), 1);
        let spawned = &state.enemies[0];
        assert!(state.grid.is_walkable_at(spawned.pose.pos));
        assert!(!spawned.is_boss);
        assert_eq!(spawned.health, 100);
        assert_eq!(state.spawn_timer, 0.0);
        assert!(state.spawn_delay >= 3.5 && state.spawn_delay < 5.5);
    }

    #[test]
    fn test_no_timed_spawns_after_boss() {
        let mut state = arena_state();
        state.boss_spawned = true;
        state.spawn_delay = 0.5;
        for _ in 0..50 {
            update_enemies(&mut state, 0.1);
        }
        assert!(state.enemies.is_empty());
    }

    #[test]
    fn test_spawn_gives_up_on_blocked_map() {
        let mut state = arena_state();
        state.grid = GridMap::from_rows(&[[1u8; 3]; 3]).unwrap();
        assert_eq!(spawn_enemy(&mut state, false), None);
        assert!(state.enemies.is_empty());
    }

    #[test]
    fn test_spawns_are_deterministic_per_seed() {
        let mut a = arena_state();
        let mut b = arena_state();
        spawn_enemy(&mut a, false);
        spawn_enemy(&mut b, false);
        assert_eq!(a.enemies[0].pose.pos, b.enemies[0].pose.pos);
    }
}
