//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Caller-supplied frame delta, clamped before use
//! - Seeded RNG only
//! - Stable iteration order (collection order of hostiles and pickups)
//! - No rendering, audio or platform dependencies

pub mod combat;
pub mod enemies;
pub mod grid;
pub mod player;
pub mod raycast;
pub mod state;
pub mod tick;
pub mod view;

pub use combat::{in_shot_cone, resolve_shot};
pub use enemies::{sample_walkable, spawn_enemy, update_enemies};
pub use grid::{Cell, GridMap};
pub use player::{movement_vector, update_player};
pub use raycast::{RayHit, WallSide, cast, column_angle, corrected_distance};
pub use state::{
    Ammo, Enemy, EnemyState, GameEvent, GamePhase, GameState, Pickup, PickupKind, Player, Pose,
};
pub use tick::{TickInput, collect_pickups, tick};
pub use view::{ColumnHit, EnemyView, Hud, Sprite};
