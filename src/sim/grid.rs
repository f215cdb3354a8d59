//! Static occupancy grid
//!
//! Cells are unit squares; cell `(cx, cy)` covers `[cx, cx+1) × [cy, cy+1)`.
//! Anything outside the grid counts as blocked, so every level is implicitly
//! enclosed by walls.

use glam::{IVec2, Vec2};

use crate::level::LevelError;

/// State of a single grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cell {
    #[default]
    Open,
    Blocked,
}

impl Cell {
    /// Map marker convention: 0 is walkable, anything else is a wall
    pub fn from_marker(marker: u8) -> Self {
        if marker == 0 { Cell::Open } else { Cell::Blocked }
    }
}

/// Immutable rectangular occupancy grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridMap {
    width: usize,
    height: usize,
    /// Row-major cells
    cells: Vec<Cell>,
}

impl GridMap {
    /// Build a grid from rows of markers (0 = open, non-zero = blocked)
    pub fn from_rows<R: AsRef<[u8]>>(rows: &[R]) -> Result<Self, LevelError> {
        let height = rows.len();
        let width = rows.first().map(|r| r.as_ref().len()).unwrap_or(0);
        if height == 0 || width == 0 {
            return Err(LevelError::EmptyMap);
        }

        let mut cells = Vec::with_capacity(width * height);
        for (row_index, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != width {
                return Err(LevelError::RaggedRow {
                    row: row_index,
                    expected: width,
                    found: row.len(),
                });
            }
            cells.extend(row.iter().copied().map(Cell::from_marker));
        }

        Ok(Self {
            width,
            height,
            cells,
        })
    }

    /// Parse an ASCII layout: `#` is a wall, `.` or space is open.
    /// Blank lines are skipped and lines are trimmed of trailing whitespace.
    pub fn parse(layout: &str) -> Result<Self, LevelError> {
        let rows: Vec<Vec<u8>> = layout
            .lines()
            .map(str::trim_end)
            .filter(|line| !line.is_empty())
            .map(|line| {
                line.trim_start()
                    .bytes()
                    .map(|b| u8::from(b == b'#'))
                    .collect()
            })
            .collect();
        Self::from_rows(&rows)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Cell at integer coordinates (out of bounds reads as blocked)
    pub fn cell(&self, cx: i32, cy: i32) -> Cell {
        if cx < 0 || cy < 0 || cx as usize >= self.width || cy as usize >= self.height {
            return Cell::Blocked;
        }
        self.cells[cy as usize * self.width + cx as usize]
    }

    /// Integer cell containing a point
    #[inline]
    pub fn cell_of(pos: Vec2) -> IVec2 {
        IVec2::new(pos.x.floor() as i32, pos.y.floor() as i32)
    }

    /// True if the point lies inside the grid on an open cell
    pub fn is_walkable(&self, x: f32, y: f32) -> bool {
        // Written so that NaN fails every comparison
        let in_bounds =
            x >= 0.0 && y >= 0.0 && x < self.width as f32 && y < self.height as f32;
        if !in_bounds {
            return false;
        }
        self.cell(x.floor() as i32, y.floor() as i32) == Cell::Open
    }

    #[inline]
    pub fn is_walkable_at(&self, pos: Vec2) -> bool {
        self.is_walkable(pos.x, pos.y)
    }

    /// Number of open cells (a level with none is rejected at load time)
    pub fn open_cell_count(&self) -> usize {
        self.cells.iter().filter(|c| **c == Cell::Open).count()
    }
}
