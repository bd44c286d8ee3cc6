use glam::Vec2;

use crate::constants::TILE_SIZE;
use crate::tile::CellKind;

/// Errors raised while building a grid
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    #[error("grid must be at least 1x1")]
    Empty,

    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("unknown cell glyph {glyph:?} at ({x}, {y})")]
    UnknownGlyph { glyph: char, x: usize, y: usize },

    #[error("{found} cells supplied for a {width}x{height} grid")]
    CellCountMismatch {
        width: usize,
        height: usize,
        found: usize,
    },
}

/// Convert a world-space point to the tile containing it
pub fn world_to_tile(pos: Vec2) -> (i32, i32) {
    (
        (pos.x / TILE_SIZE).floor() as i32,
        (pos.y / TILE_SIZE).floor() as i32,
    )
}

/// World-space center of a tile
pub fn tile_center(x: i32, y: i32) -> Vec2 {
    Vec2::new(
        (x as f32 + 0.5) * TILE_SIZE,
        (y as f32 + 0.5) * TILE_SIZE,
    )
}

/// Fixed-size map of cell kinds. Never mutated during a tick; a map
/// transition swaps in a whole new grid.
#[derive(Debug, Clone)]
pub struct Grid {
    pub width: usize,
    pub height: usize,
    cells: Vec<CellKind>,
}

impl Grid {
    /// An open floor of the given size
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![CellKind::Floor; width * height],
        }
    }

    pub fn from_cells(width: usize, height: usize, cells: Vec<CellKind>) -> Result<Self, GridError> {
        if width == 0 || height == 0 {
            return Err(GridError::Empty);
        }
        if cells.len() != width * height {
            return Err(GridError::CellCountMismatch {
                width,
                height,
                found: cells.len(),
            });
        }
        Ok(Self { width, height, cells })
    }

    /// Build a grid from ASCII rows (`.` floor, `#` wall, `~` water, `+` door, space void)
    pub fn from_ascii(rows: &[&str]) -> Result<Self, GridError> {
        let height = rows.len();
        let width = rows.first().map(|r| r.chars().count()).unwrap_or(0);
        if width == 0 || height == 0 {
            return Err(GridError::Empty);
        }

        let mut cells = Vec::with_capacity(width * height);
        for (y, row) in rows.iter().enumerate() {
            let found = row.chars().count();
            if found != width {
                return Err(GridError::RaggedRow {
                    row: y,
                    expected: width,
                    found,
                });
            }
            for (x, glyph) in row.chars().enumerate() {
                let kind = CellKind::from_glyph(glyph).ok_or(GridError::UnknownGlyph { glyph, x, y })?;
                cells.push(kind);
            }
        }

        Ok(Self { width, height, cells })
    }

    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && x < self.width as i32 && y < self.height as i32
    }

    pub fn get(&self, x: i32, y: i32) -> Option<&CellKind> {
        if !self.in_bounds(x, y) {
            return None;
        }
        Some(&self.cells[y as usize * self.width + x as usize])
    }

    /// Cell kind at a tile; out-of-bounds reads as `Void`
    pub fn cell_at(&self, x: i32, y: i32) -> CellKind {
        self.get(x, y).copied().unwrap_or_default()
    }

    /// Out-of-bounds is never walkable
    pub fn is_walkable(&self, x: i32, y: i32) -> bool {
        self.get(x, y).map(|c| c.is_walkable()).unwrap_or(false)
    }

    pub fn is_walkable_world(&self, pos: Vec2) -> bool {
        let (x, y) = world_to_tile(pos);
        self.is_walkable(x, y)
    }

    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }
}
