//! Level data
//!
//! A level is a marker grid plus the starting population. It is parsed from
//! JSON, validated once, and then treated as immutable. Validation catches the
//! configurations the simulation cannot recover from at runtime (ragged maps,
//! maps with nowhere to stand, entities placed inside walls).

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::sim::grid::GridMap;
use crate::sim::state::{PickupKind, Pose};

/// Errors raised while loading a level
#[derive(Debug, Error)]
pub enum LevelError {
    #[error("map has no cells")]
    EmptyMap,

    #[error("map row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("map has no walkable cell")]
    NoWalkableCell,

    #[error("player start ({x}, {y}) is not walkable")]
    PlayerStartBlocked { x: f32, y: f32 },

    #[error("{what} #{index} at ({x}, {y}) is not walkable")]
    EntityBlocked {
        what: &'static str,
        index: usize,
        x: f32,
        y: f32,
    },

    #[error("invalid level JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Hostile definition as stored in level data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyDef {
    pub x: f32,
    pub y: f32,
    #[serde(default)]
    pub boss: bool,
    /// Overrides the tuning speed
    #[serde(default)]
    pub speed: Option<f32>,
    /// Overrides the tuning health
    #[serde(default)]
    pub health: Option<i32>,
}

/// Pickup definition as stored in level data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PickupDef {
    pub x: f32,
    pub y: f32,
    pub kind: PickupKind,
}

/// On-disk level layout
#[derive(Debug, Clone, Serialize, Deserialize)]
struct LevelFile {
    map: Vec<Vec<u8>>,
    player: Pose,
    #[serde(default)]
    enemies: Vec<EnemyDef>,
    #[serde(default)]
    pickups: Vec<PickupDef>,
}

/// A validated level
#[derive(Debug, Clone)]
pub struct Level {
    pub grid: GridMap,
    pub player_start: Pose,
    pub enemies: Vec<EnemyDef>,
    pub pickups: Vec<PickupDef>,
}

impl Level {
    /// Build and validate a level
    pub fn new(
        grid: GridMap,
        player_start: Pose,
        enemies: Vec<EnemyDef>,
        pickups: Vec<PickupDef>,
    ) -> Result<Self, LevelError> {
        let level = Self {
            grid,
            player_start,
            enemies,
            pickups,
        };
        level.validate()?;
        Ok(level)
    }

    /// Parse level JSON
    pub fn from_json(json: &str) -> Result<Self, LevelError> {
        let file: LevelFile = serde_json::from_str(json)?;
        let grid = GridMap::from_rows(&file.map)?;
        Self::new(grid, file.player, file.enemies, file.pickups)
    }

    fn validate(&self) -> Result<(), LevelError> {
        if self.grid.open_cell_count() == 0 {
            return Err(LevelError::NoWalkableCell);
        }

        let start = self.player_start.pos;
        if !self.grid.is_walkable(start.x, start.y) {
            return Err(LevelError::PlayerStartBlocked {
                x: start.x,
                y: start.y,
            });
        }

        for (index, def) in self.enemies.iter().enumerate() {
            if !self.grid.is_walkable(def.x, def.y) {
                return Err(LevelError::EntityBlocked {
                    what: "enemy",
                    index,
                    x: def.x,
                    y: def.y,
                });
            }
        }
        for (index, def) in self.pickups.iter().enumerate() {
            if !self.grid.is_walkable(def.x, def.y) {
                return Err(LevelError::EntityBlocked {
                    what: "pickup",
                    index,
                    x: def.x,
                    y: def.y,
                });
            }
        }
        Ok(())
    }

    /// Built-in level: a walled courtyard with a few pillars
    pub fn default_level() -> Result<Self, LevelError> {
        Self::new(
            GridMap::parse(DEFAULT_LAYOUT)?,
            Pose::new(3.5, 3.5, 0.0),
            vec![
                EnemyDef {
                    x: 8.5,
                    y: 3.5,
                    boss: false,
                    speed: None,
                    health: None,
                },
                EnemyDef {
                    x: 9.5,
                    y: 7.5,
                    boss: false,
                    speed: None,
                    health: None,
                },
            ],
            vec![
                PickupDef {
                    x: 2.5,
                    y: 7.5,
                    kind: PickupKind::Health,
                },
                PickupDef {
                    x: 6.5,
                    y: 1.5,
                    kind: PickupKind::Ammo,
                },
            ],
        )
    }
}

/// Layout of the built-in level
const DEFAULT_LAYOUT: &str = "
############
#..........#
#..........#
#....##....#
#..........#
#..#....#..#
#..#....#..#
#..........#
#..........#
############
";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_level_is_valid() {
        let level = Level::default_level().unwrap();
        assert_eq!(level.grid.width(), 12);
        assert_eq!(level.grid.height(), 10);
        assert!(level.grid.is_walkable(3.5, 3.5));
    }

    #[test]
    fn test_from_json() {
        let json = r#"{
            "map": [[1,1,1,1],[1,0,0,1],[1,0,0,1],[1,1,1,1]],
            "player": { "pos": [1.5, 1.5], "angle": 0.0 },
            "enemies": [{ "x": 2.5, "y": 2.5 }],
            "pickups": [{ "x": 2.5, "y": 1.5, "kind": "health" }]
        }"#;
        let level = Level::from_json(json).unwrap();
        assert_eq!(level.grid.width(), 4);
        assert_eq!(level.enemies.len(), 1);
        assert!(!level.enemies[0].boss);
        assert_eq!(level.pickups[0].kind, PickupKind::Health);
    }

    #[test]
    fn test_blocked_player_start_rejected() {
        let json = r#"{
            "map": [[1,1,1],[1,0,1],[1,1,1]],
            "player": { "pos": [0.5, 0.5], "angle": 0.0 }
        }"#;
        assert!(matches!(
            Level::from_json(json),
            Err(LevelError::PlayerStartBlocked { .. })
        ));
    }

    #[test]
    fn test_fully_blocked_map_rejected() {
        let grid = GridMap::from_rows(&[[1u8; 3]; 3]).unwrap();
        let result = Level::new(grid, Pose::new(1.5, 1.5, 0.0), Vec::new(), Vec::new());
        assert!(matches!(result, Err(LevelError::NoWalkableCell)));
    }

    #[test]
    fn test_enemy_in_wall_rejected() {
        let grid = GridMap::parse("###\n#.#\n###").unwrap();
        let enemies = vec![EnemyDef {
            x: 0.5,
            y: 1.5,
            boss: false,
            speed: None,
            health: None,
        }];
        let result = Level::new(grid, Pose::new(1.5, 1.5, 0.0), enemies, Vec::new());
        assert!(matches!(
            result,
            Err(LevelError::EntityBlocked { what: "enemy", index: 0, .. })
        ));
    }

    #[test]
    fn test_bad_json_reports_error() {
        assert!(matches!(Level::from_json("{ nope"), Err(LevelError::Json(_))));
    }
}
