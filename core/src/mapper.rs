use serde::{Deserialize, Serialize};

use crate::*;

/// Pixel size of the drawable surface the board is rendered onto.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SurfaceSize {
    pub width: f32,
    pub height: f32,
}

impl SurfaceSize {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Layout of the board on a surface: the board is a centred square, every
/// cell is `cell_size` wide and odd rows are shifted right by half a cell.
///
/// Both the input mapping and the drawing side use this one type so a tap
/// always lands on the cell that is drawn under it.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoardGeometry {
    edge_size: Coord,
    cell_size: f32,
    translation: (f32, f32),
}

impl BoardGeometry {
    pub fn new(edge_size: Coord, surface: SurfaceSize) -> Self {
        let short = surface.width.min(surface.height);
        let long = surface.width.max(surface.height);
        let pad = (long - short) / 2.0;
        let translation = if surface.height > surface.width {
            (0.0, pad)
        } else {
            (pad, 0.0)
        };

        Self {
            edge_size,
            cell_size: short / (f32::from(edge_size) + 0.5),
            translation,
        }
    }

    pub const fn edge_size(&self) -> Coord {
        self.edge_size
    }

    pub const fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Offset of the board's top-left corner on the surface.
    pub const fn translation(&self) -> (f32, f32) {
        self.translation
    }

    pub fn cell_radius(&self) -> f32 {
        self.cell_size / 2.0
    }

    /// Maps a surface pixel to the cell drawn under it.
    ///
    /// Pixels outside the board (including the half-cell gaps at the ends of
    /// staggered rows) are reported as [`GameError::OutOfBounds`], callers are
    /// expected to ignore them.
    pub fn pixel_to_cell(&self, x: f32, y: f32) -> Result<Cell> {
        if self.cell_size.is_nan() || self.cell_size <= 0.0 {
            return Err(GameError::OutOfBounds);
        }

        let (x_trans, y_trans) = self.translation;
        let x = x - x_trans;
        let y = y - y_trans;

        let row = floor_div(y, self.cell_size).ok_or(GameError::OutOfBounds)?;
        let x = if row.rem_euclid(2) == 1 {
            x - self.cell_size / 2.0
        } else {
            x
        };
        let column = floor_div(x, self.cell_size).ok_or(GameError::OutOfBounds)?;

        let column = Coord::try_from(column).map_err(|_| GameError::OutOfBounds)?;
        let row = Coord::try_from(row).map_err(|_| GameError::OutOfBounds)?;
        let cell = Cell::new(column, row);
        if cell.is_inside(self.edge_size) {
            Ok(cell)
        } else {
            Err(GameError::OutOfBounds)
        }
    }

    /// Surface position of the centre of `cell`.
    pub fn cell_center(&self, cell: Cell) -> (f32, f32) {
        let (x_trans, y_trans) = self.translation;
        let half = self.cell_size / 2.0;
        let mut x = f32::from(cell.column) * self.cell_size + half;
        let y = f32::from(cell.row) * self.cell_size + half;
        if cell.is_odd_row() {
            x += half;
        }
        (x + x_trans, y + y_trans)
    }
}

/// `floor(value / divisor)`, `None` when the quotient is not a usable integer.
fn floor_div(value: f32, divisor: f32) -> Option<i32> {
    let quotient = value / divisor;
    if !quotient.is_finite() || quotient < i32::MIN as f32 || quotient > i32::MAX as f32 {
        return None;
    }
    let truncated = quotient as i32;
    Some(if truncated as f32 > quotient {
        truncated - 1
    } else {
        truncated
    })
}
