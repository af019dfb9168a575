use core::fmt;
use serde::{Deserialize, Serialize};

/// Single coordinate axis used for the board edge and cell positions.
pub type Coord = u8;

/// Count type used for wall counts and total-cell counts.
pub type CellCount = u16;

/// Edge length of the classic board.
pub const EDGE_SIZE: Coord = 11;

/// A cell address on the board, `column` is the x axis and `row` the y axis.
///
/// Odd rows are drawn shifted right by half a cell, which is what makes the
/// square array tile as hexagons.
#[derive(
    Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Cell {
    pub column: Coord,
    pub row: Coord,
}

impl Cell {
    pub const fn new(column: Coord, row: Coord) -> Self {
        Self { column, row }
    }

    pub const fn is_odd_row(self) -> bool {
        self.row % 2 == 1
    }

    pub const fn is_inside(self, edge_size: Coord) -> bool {
        self.column < edge_size && self.row < edge_size
    }

    /// Whether this cell lies on the outer ring of a board with the given edge.
    pub const fn is_boundary(self, edge_size: Coord) -> bool {
        let last = edge_size.saturating_sub(1);
        self.column == 0 || self.row == 0 || self.column == last || self.row == last
    }
}

impl From<(Coord, Coord)> for Cell {
    fn from((column, row): (Coord, Coord)) -> Self {
        Self::new(column, row)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.column, self.row)
    }
}

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Cell {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.column.into(), self.row.into()]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}
