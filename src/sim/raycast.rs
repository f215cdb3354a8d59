//! Grid raycasting
//!
//! Digital differential analysis: walk the ray cell by cell, always crossing
//! whichever grid line (vertical or horizontal) is nearer along the ray,
//! until a blocked cell is entered. Because the grid reports everything
//! outside its bounds as blocked, the walk ends after at most
//! `width + height` steps; the distance cap is a second bound.

use glam::{IVec2, Vec2};

use super::grid::{Cell, GridMap};
use crate::direction;

/// Which family of grid lines the ray crossed to enter the hit cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WallSide {
    /// Crossed a vertical line (x = const); an east or west face
    Vertical,
    /// Crossed a horizontal line (y = const); a north or south face
    Horizontal,
}

/// Result of one ray query
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// Euclidean distance from the origin to the first blocked cell boundary
    pub distance: f32,
    /// The blocked cell, or `None` if the search hit the distance cap
    pub cell: Option<IVec2>,
    /// Face that was struck (meaningless when `cell` is `None`)
    pub side: WallSide,
}

impl RayHit {
    fn capped(max_distance: f32) -> Self {
        Self {
            distance: max_distance,
            cell: None,
            side: WallSide::Vertical,
        }
    }

    /// Point where the ray met the wall
    pub fn point(&self, origin: Vec2, angle: f32) -> Vec2 {
        origin + direction(angle) * self.distance
    }
}

/// Direction components smaller than this count as parallel to that axis.
/// `cos(π/2)` in f32 is about 4e-8, so the cutoff sits well above it.
const PARALLEL_EPSILON: f32 = 1e-6;

/// Step direction, distance along the ray to the first grid line, and
/// distance between successive grid lines for one axis.
///
/// A ray running along an axis never crosses that axis' lines, even when the
/// origin sits exactly on one.
#[inline]
fn axis_setup(origin: f32, cell: i32, d: f32) -> (i32, f32, f32) {
    if d.abs() < PARALLEL_EPSILON {
        return (0, f32::INFINITY, f32::INFINITY);
    }
    let delta = (1.0 / d).abs();
    if d < 0.0 {
        (-1, (origin - cell as f32) * delta, delta)
    } else {
        (1, (cell as f32 + 1.0 - origin) * delta, delta)
    }
}

/// Cast a ray from `origin` along `angle` and return the raw (not
/// fisheye-corrected) distance to the first blocked cell.
///
/// An origin that is itself inside a blocked cell reports distance 0.
pub fn cast(grid: &GridMap, origin: Vec2, angle: f32, max_distance: f32) -> RayHit {
    let mut cell = GridMap::cell_of(origin);
    if grid.cell(cell.x, cell.y) == Cell::Blocked {
        return RayHit {
            distance: 0.0,
            cell: Some(cell),
            side: WallSide::Vertical,
        };
    }

    let dir = direction(angle);
    let (step_x, mut side_x, delta_x) = axis_setup(origin.x, cell.x, dir.x);
    let (step_y, mut side_y, delta_y) = axis_setup(origin.y, cell.y, dir.y);

    let max_steps = grid.width() + grid.height() + 2;
    for _ in 0..max_steps {
        let (travelled, side) = if side_x < side_y {
            let t = side_x;
            side_x += delta_x;
            cell.x += step_x;
            (t, WallSide::Vertical)
        } else {
            let t = side_y;
            side_y += delta_y;
            cell.y += step_y;
            (t, WallSide::Horizontal)
        };

        if travelled > max_distance {
            break;
        }

        if grid.cell(cell.x, cell.y) == Cell::Blocked {
            return RayHit {
                distance: travelled,
                cell: Some(cell),
                side,
            };
        }
    }

    RayHit::capped(max_distance)
}

/// Ray angle for a screen column: left edge at `heading - fov/2`
#[inline]
pub fn column_angle(heading: f32, fov: f32, column: u32, width: u32) -> f32 {
    heading - fov / 2.0 + (column as f32 / width as f32) * fov
}

/// Remove fisheye distortion by projecting onto the view direction
#[inline]
pub fn corrected_distance(raw: f32, ray_angle: f32, heading: f32) -> f32 {
    raw * (ray_angle - heading).cos()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, PI};

    const MAX: f32 = 64.0;

    /// 7x7 room with a one-cell border: interior spans [1, 6)
    fn square_room() -> GridMap {
        GridMap::parse(
            "
            #######
            #.....#
            #.....#
            #.....#
            #.....#
            #.....#
            #######
            ",
        )
        .unwrap()
    }

    #[test]
    fn test_symmetric_distances_from_center() {
        let grid = square_room();
        let center = Vec2::new(3.5, 3.5);
        for angle in [0.0, FRAC_PI_2, PI, 3.0 * FRAC_PI_2] {
            let hit = cast(&grid, center, angle, MAX);
            assert!(
                (hit.distance - 2.5).abs() < 1e-4,
                "angle {} gave {}",
                angle,
                hit.distance
            );
            assert!(hit.cell.is_some());
        }
    }

    #[test]
    fn test_diagonal_hits_corner_region() {
        let grid = square_room();
        let hit = cast(&grid, Vec2::new(3.5, 3.5), FRAC_PI_4, MAX);
        // Wall lines at x = 6 and y = 6 are both 2.5 away on each axis
        let expected = 2.5 * 2.0f32.sqrt();
        assert!((hit.distance - expected).abs() < 1e-3);
    }

    #[test]
    fn test_hit_face_and_cell() {
        let grid = square_room();
        let east = cast(&grid, Vec2::new(2.25, 3.5), 0.0, MAX);
        assert_eq!(east.side, WallSide::Vertical);
        assert_eq!(east.cell, Some(IVec2::new(6, 3)));
        assert!((east.distance - 3.75).abs() < 1e-4);
        let impact = east.point(Vec2::new(2.25, 3.5), 0.0);
        assert!((impact - Vec2::new(6.0, 3.5)).length() < 1e-4);

        let north = cast(&grid, Vec2::new(2.5, 2.25), -FRAC_PI_2, MAX);
        assert_eq!(north.side, WallSide::Horizontal);
        assert_eq!(north.cell, Some(IVec2::new(2, 0)));
        assert!((north.distance - 1.25).abs() < 1e-4);
    }

    #[test]
    fn test_ray_along_grid_line_beside_wall() {
        let grid = square_room();
        // Origin on x = 1, the west wall's face, looking north and south
        let north = cast(&grid, Vec2::new(1.0, 3.5), -FRAC_PI_2, MAX);
        assert!((north.distance - 2.5).abs() < 1e-4);
        assert_eq!(north.cell, Some(IVec2::new(1, 0)));
        let south = cast(&grid, Vec2::new(1.0, 3.5), FRAC_PI_2, MAX);
        assert!((south.distance - 2.5).abs() < 1e-4);
        assert_eq!(south.cell, Some(IVec2::new(1, 6)));

        // Origin on y = 1, the north wall's face, looking west
        let west = cast(&grid, Vec2::new(3.5, 1.0), PI, MAX);
        assert!((west.distance - 2.5).abs() < 1e-4);
        assert_eq!(west.cell, Some(IVec2::new(0, 1)));
        assert_eq!(west.side, WallSide::Vertical);

        // Interior grid line: same answer as from a cell center
        let inner = cast(&grid, Vec2::new(2.0, 3.5), -FRAC_PI_2, MAX);
        assert!((inner.distance - 2.5).abs() < 1e-4);
    }

    #[test]
    fn test_open_map_treats_edge_as_wall() {
        let grid = GridMap::from_rows(&[[0u8; 4]; 4]).unwrap();
        let hit = cast(&grid, Vec2::new(1.5, 1.5), 0.0, MAX);
        assert!((hit.distance - 2.5).abs() < 1e-4);
        assert_eq!(hit.cell, Some(IVec2::new(4, 1)));
    }

    #[test]
    fn test_distance_cap() {
        let grid = GridMap::from_rows(&[[0u8; 40]; 3]).unwrap();
        let hit = cast(&grid, Vec2::new(0.5, 1.5), 0.0, 10.0);
        assert_eq!(hit.cell, None);
        assert_eq!(hit.distance, 10.0);
    }

    #[test]
    fn test_origin_inside_wall() {
        let grid = square_room();
        let hit = cast(&grid, Vec2::new(0.5, 0.5), 0.3, MAX);
        assert_eq!(hit.distance, 0.0);
    }

    #[test]
    fn test_column_angles_span_fov() {
        let fov = PI / 3.0;
        assert!((column_angle(0.0, fov, 0, 320) + fov / 2.0).abs() < 1e-6);
        assert!(column_angle(0.0, fov, 160, 320).abs() < 1e-6);
        assert!((corrected_distance(2.0, 0.0, 0.0) - 2.0).abs() < 1e-6);
        assert!(corrected_distance(2.0, fov / 2.0, 0.0) < 2.0);
    }

    proptest! {
        #[test]
        fn prop_cast_is_deterministic_and_bounded(
            x in 1.01f32..5.99,
            y in 1.01f32..5.99,
            angle in -10.0f32..10.0,
        ) {
            let grid = square_room();
            let origin = Vec2::new(x, y);
            let a = cast(&grid, origin, angle, MAX);
            let b = cast(&grid, origin, angle, MAX);
            prop_assert_eq!(a.distance.to_bits(), b.distance.to_bits());
            prop_assert!(a.distance >= 0.0);
            // Nothing inside the room is farther than its diagonal
            prop_assert!(a.distance <= 5.0 * 2.0f32.sqrt() + 1e-3);
            prop_assert!(a.cell.is_some());
        }
    }
}
