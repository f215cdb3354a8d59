//! Read-only queries for the renderer and HUD
//!
//! Nothing here mutates the simulation. The renderer pulls ray hits per
//! screen column and projected hostile sprites after each step.

use glam::Vec2;

use super::raycast::{RayHit, cast, column_angle, corrected_distance};
use super::state::{Ammo, EnemyState, GameState, Pose};
use crate::normalize_angle;

/// Closer than this a sprite would blow up to infinity; it is skipped
const MIN_SPRITE_DISTANCE: f32 = 0.01;
/// Smallest sprite size in pixels, so distant hostiles stay visible
const MIN_SPRITE_SIZE: f32 = 10.0;

/// HUD numbers
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hud {
    pub health: i32,
    pub ammo: Ammo,
    pub kills: u32,
}

impl Hud {
    pub fn ammo_text(&self) -> String {
        self.ammo.display()
    }
}

/// What the renderer needs to know about one hostile
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemyView {
    pub id: u32,
    pub pose: Pose,
    pub state: EnemyState,
    pub death_timer: f32,
    pub is_boss: bool,
    pub health: i32,
    pub max_health: i32,
}

/// Wall hit for one screen column
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnHit {
    pub column: u32,
    pub angle: f32,
    pub hit: RayHit,
    /// Distance projected onto the view direction (no fisheye)
    pub corrected: f32,
}

impl ColumnHit {
    /// Projected wall height for a screen of `screen_height` pixels
    pub fn wall_height(&self, screen_height: f32) -> f32 {
        screen_height / self.corrected.max(0.01)
    }
}

/// A hostile projected onto the screen
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sprite {
    pub enemy_id: u32,
    /// Horizontal screen position of the sprite center (pixels)
    pub screen_x: f32,
    /// Sprite height in pixels
    pub size: f32,
    pub distance: f32,
    /// 1.0 while alive, fading to 0.0 over the death animation
    pub opacity: f32,
    pub dying: bool,
    pub is_boss: bool,
}

impl GameState {
    pub fn hud(&self) -> Hud {
        Hud {
            health: self.player.health,
            ammo: self.player.ammo,
            kills: self.kill_count,
        }
    }

    /// All hostiles in collection order, dead ones included
    pub fn enemy_views(&self) -> impl Iterator<Item = EnemyView> + '_ {
        self.enemies.iter().map(|e| EnemyView {
            id: e.id,
            pose: e.pose,
            state: e.state,
            death_timer: e.death_timer,
            is_boss: e.is_boss,
            health: e.health,
            max_health: e.max_health,
        })
    }

    /// Raw ray from the player's position
    pub fn cast_ray(&self, angle: f32) -> RayHit {
        cast(
            &self.grid,
            self.player.pose.pos,
            angle,
            self.tuning.max_ray_distance,
        )
    }

    /// Ray for one screen column
    pub fn cast_column(&self, column: u32, width: u32) -> ColumnHit {
        let heading = self.player.pose.angle;
        let angle = column_angle(heading, self.player.fov, column, width);
        let hit = self.cast_ray(angle);
        ColumnHit {
            column,
            angle,
            hit,
            corrected: corrected_distance(hit.distance, angle, heading),
        }
    }

    /// Rays for every column of a `width`-pixel screen
    pub fn cast_columns(&self, width: u32) -> Vec<ColumnHit> {
        (0..width).map(|column| self.cast_column(column, width)).collect()
    }

    /// Project every visible, non-dead hostile onto a `width` x `height` screen
    pub fn sprites(&self, width: f32, height: f32) -> Vec<Sprite> {
        let eye = self.player.pose.pos;
        let heading = self.player.pose.angle;
        let fov = self.player.fov;

        self.enemies
            .iter()
            .filter(|e| e.state != EnemyState::Dead)
            .filter_map(|e| {
                let offset: Vec2 = e.pose.pos - eye;
                let distance = offset.length();
                if distance < MIN_SPRITE_DISTANCE {
                    return None;
                }
                let relative = normalize_angle(offset.y.atan2(offset.x) - heading);
                if relative.abs() > fov / 2.0 {
                    return None;
                }

                let dying = e.state == EnemyState::Dying;
                Some(Sprite {
                    enemy_id: e.id,
                    screen_x: ((relative + fov / 2.0) / fov) * width,
                    size: (height / distance).clamp(MIN_SPRITE_SIZE, height * 2.0),
                    distance,
                    opacity: if dying {
                        1.0 - e.death_timer.min(1.0)
                    } else {
                        1.0
                    },
                    dying,
                    is_boss: e.is_boss,
                })
            })
            .collect()
    }
}
