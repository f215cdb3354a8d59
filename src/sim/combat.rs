//! Hit-scan combat
//!
//! A shot travels along the shooter's heading. It connects with the first
//! living hostile, in collection order, that is within range and whose
//! bearing lies inside the angular tolerance. Order, not proximity, decides
//! between several qualifying targets. Walls do not stop the shot.

use super::state::{Enemy, GameEvent, Pose};
use crate::tuning::Tuning;
use crate::{angle_between, distance, normalize_angle};

/// True if `target` sits inside the shot cone from `shooter`
pub fn in_shot_cone(shooter: &Pose, target: &Enemy, tuning: &Tuning) -> bool {
    if distance(shooter.pos, target.pose.pos) > tuning.shot_range {
        return false;
    }
    let bearing = angle_between(shooter.pos, target.pose.pos);
    normalize_angle(bearing - shooter.angle).abs() < tuning.shot_tolerance
}

/// Resolve one shot. Returns the id of the hostile that was hit, if any.
///
/// Always emits [`GameEvent::Shoot`]; a connecting shot adds [`GameEvent::Hit`].
pub fn resolve_shot(
    shooter: &Pose,
    tuning: &Tuning,
    enemies: &mut [Enemy],
    events: &mut Vec<GameEvent>,
) -> Option<u32> {
    events.push(GameEvent::Shoot);

    let target = enemies
        .iter_mut()
        .filter(|e| e.is_alive())
        .find(|e| in_shot_cone(shooter, e, tuning))?;

    let killed = target.take_damage(tuning.shot_damage);
    events.push(GameEvent::Hit {
        enemy_id: target.id,
    });
    log::debug!(
        "Hit enemy {} for {} ({} hp left{})",
        target.id,
        tuning.shot_damage,
        target.health,
        if killed { ", dying" } else { "" }
    );
    Some(target.id)
}
