//! Player controller
//!
//! Turns a per-frame input command into heading changes, movement against
//! the grid, and shots.

use glam::Vec2;

use super::combat::resolve_shot;
use super::state::GameState;
use super::tick::TickInput;
use crate::{direction, normalize_angle};

/// Sum of unit vectors for every held movement key, relative to `heading`.
///
/// Forward/back run along the heading, strafes at heading ∓ 90°. Holding two
/// perpendicular keys yields a vector of length √2 unless `normalize` is set.
pub fn movement_vector(input: &TickInput, heading: f32, normalize: bool) -> Vec2 {
    use std::f32::consts::FRAC_PI_2;

    let mut v = Vec2::ZERO;
    if input.forward {
        v += direction(heading);
    }
    if input.backward {
        v -= direction(heading);
    }
    if input.left {
        v += direction(heading - FRAC_PI_2);
    }
    if input.right {
        v += direction(heading + FRAC_PI_2);
    }

    if normalize { v.normalize_or_zero() } else { v }
}

/// Advance the player one frame
pub fn update_player(state: &mut GameState, input: &TickInput, dt: f32) {
    if state.player.is_dead() {
        return;
    }

    let player = &mut state.player;
    player.fire_cooldown -= dt;
    player.pose.angle = normalize_angle(player.pose.angle + input.turn);

    let step = movement_vector(input, player.pose.angle, state.tuning.normalize_diagonal)
        * player.speed
        * dt;
    if step != Vec2::ZERO {
        let candidate = player.pose.pos + step;
        // All or nothing: no sliding along walls
        if state.grid.is_walkable_at(candidate) {
            player.pose.pos = candidate;
        }
    }

    if input.fire && player.fire_cooldown <= 0.0 {
        if !player.ammo.try_consume() {
            log::debug!("Click: out of ammo");
            return;
        }
        player.fire_cooldown = state.tuning.fire_cooldown;
        resolve_shot(
            &state.player.pose,
            &state.tuning,
            &mut state.enemies,
            &mut state.events,
        );
    }
}
