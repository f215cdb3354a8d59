//! Per-frame simulation step
//!
//! Order within a frame: player (which may fire), hostiles, pickups.
//! Rendering pulls from the updated state afterwards via [`super::view`].

use super::enemies::update_enemies;
use super::player::update_player;
use super::state::{GameEvent, GamePhase, GameState, PickupKind};

/// Input commands for a single frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickInput {
    pub forward: bool,
    pub backward: bool,
    /// Strafe left
    pub left: bool,
    /// Strafe right
    pub right: bool,
    /// Heading change since the last frame (radians, already scaled)
    pub turn: f32,
    pub fire: bool,
}

/// Advance the game state by one frame of `dt` seconds.
///
/// `dt` is clamped to `tuning.max_frame_dt` so a long stall cannot carry
/// anything through a wall. The phase switches to game over at the end of
/// the frame in which health ends at or below zero; after that this does
/// nothing.
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    if state.phase == GamePhase::GameOver {
        return;
    }

    let dt = state.tuning.clamp_dt(dt);
    state.frame += 1;
    state.time += dt as f64;

    update_player(state, input, dt);
    update_enemies(state, dt);
    // A pickup reached this frame still applies, even after a lethal hit
    collect_pickups(state);

    if state.player.is_dead() {
        state.phase = GamePhase::GameOver;
        state.events.push(GameEvent::PlayerDied);
        log::info!(
            "Game over at {:.1}s: {} kills",
            state.time,
            state.kill_count
        );
    }
}

/// Collect every untaken pickup within reach of the player
pub fn collect_pickups(state: &mut GameState) {
    let player = &mut state.player;
    let tuning = &state.tuning;

    for pickup in state.pickups.iter_mut().filter(|p| !p.taken) {
        if player.pose.pos.distance(pickup.pos) >= tuning.pickup_radius {
            continue;
        }
        pickup.taken = true;
        match pickup.kind {
            PickupKind::Ammo => player.ammo.add(tuning.ammo_pickup_amount),
            PickupKind::Health => {
                player.health = (player.health + tuning.health_pickup_amount).min(tuning.max_health);
            }
        }
        state.events.push(GameEvent::PickupCollected {
            pickup_id: pickup.id,
            kind: pickup.kind,
        });
        log::debug!("Picked up {:?} #{}", pickup.kind, pickup.id);
    }
}
