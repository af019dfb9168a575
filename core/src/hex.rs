use serde::{Deserialize, Serialize};

use crate::*;

/// One of the six directions a cell touches its neighbours in.
///
/// The discriminant is the stable numeric encoding of a move (`0..=5`).
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    West = 0,
    East = 1,
    NorthWest = 2,
    NorthEast = 3,
    SouthWest = 4,
    SouthEast = 5,
}

impl Direction {
    pub const ALL: [Direction; 6] = [
        Self::West,
        Self::East,
        Self::NorthWest,
        Self::NorthEast,
        Self::SouthWest,
        Self::SouthEast,
    ];

    pub const fn code(self) -> u8 {
        self as u8
    }

    pub const fn from_code(code: u8) -> Option<Self> {
        use Direction::*;
        match code {
            0 => Some(West),
            1 => Some(East),
            2 => Some(NorthWest),
            3 => Some(NorthEast),
            4 => Some(SouthWest),
            5 => Some(SouthEast),
            _ => None,
        }
    }

    /// Column/row offset of this direction, seen from a row of the given parity.
    pub const fn delta(self, odd_row: bool) -> (i8, i8) {
        use Direction::*;
        match (self, odd_row) {
            (West, _) => (-1, 0),
            (East, _) => (1, 0),
            (NorthWest, false) => (-1, -1),
            (NorthWest, true) => (0, -1),
            (NorthEast, false) => (0, -1),
            (NorthEast, true) => (1, -1),
            (SouthWest, false) => (-1, 1),
            (SouthWest, true) => (0, 1),
            (SouthEast, false) => (0, 1),
            (SouthEast, true) => (1, 1),
        }
    }

    pub const fn opposite(self) -> Self {
        use Direction::*;
        match self {
            West => East,
            East => West,
            NorthWest => SouthEast,
            NorthEast => SouthWest,
            SouthWest => NorthEast,
            SouthEast => NorthWest,
        }
    }

    /// Direction leading from `from` into the adjacent cell `to`, if they touch.
    pub fn between(from: Cell, to: Cell) -> Option<Self> {
        let odd_row = from.is_odd_row();
        Self::ALL
            .into_iter()
            .find(|&direction| apply_delta(from, direction.delta(odd_row), Coord::MAX) == Some(to))
    }
}

/// Order neighbours are visited in. The first two entries are the row
/// neighbours, then straight up/down in offset coordinates, then the diagonal
/// that depends on the row parity. Breadth-first search inherits its
/// tie-break from this order.
const EVEN_ROW_ORDER: [Direction; 6] = [
    Direction::West,
    Direction::East,
    Direction::NorthEast,
    Direction::SouthEast,
    Direction::NorthWest,
    Direction::SouthWest,
];

const ODD_ROW_ORDER: [Direction; 6] = [
    Direction::West,
    Direction::East,
    Direction::NorthWest,
    Direction::SouthWest,
    Direction::NorthEast,
    Direction::SouthEast,
];

/// Applies `delta` to `cell`, returning a value only when it remains inside an
/// `edge_size` board.
fn apply_delta(cell: Cell, delta: (i8, i8), edge_size: Coord) -> Option<Cell> {
    let (dc, dr) = delta;

    let column = cell.column.checked_add_signed(dc)?;
    if column >= edge_size {
        return None;
    }

    let row = cell.row.checked_add_signed(dr)?;
    if row >= edge_size {
        return None;
    }

    Some(Cell::new(column, row))
}

impl Cell {
    /// The adjacent cell in `direction`, if it is on the board.
    pub fn step(self, direction: Direction, edge_size: Coord) -> Option<Cell> {
        apply_delta(self, direction.delta(self.is_odd_row()), edge_size)
    }

    pub fn neighbors(self, edge_size: Coord) -> NeighborIter {
        NeighborIter::new(self, edge_size)
    }

    pub fn is_adjacent(self, other: Cell) -> bool {
        Direction::between(self, other).is_some()
    }
}

#[derive(Debug, Clone)]
pub struct NeighborIter {
    center: Cell,
    edge_size: Coord,
    order: &'static [Direction; 6],
    index: u8,
}

impl NeighborIter {
    fn new(center: Cell, edge_size: Coord) -> Self {
        let order = if center.is_odd_row() {
            &ODD_ROW_ORDER
        } else {
            &EVEN_ROW_ORDER
        };
        Self {
            center,
            edge_size,
            order,
            index: 0,
        }
    }
}

impl Iterator for NeighborIter {
    type Item = Cell;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let direction = *self.order.get(usize::from(self.index))?;
            self.index += 1;

            let next_item = self.center.step(direction, self.edge_size);
            if next_item.is_some() {
                return next_item;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use alloc::vec::Vec;

    #[test]
    fn adjacency_is_symmetric_on_the_whole_board() {
        for column in 0..EDGE_SIZE {
            for row in 0..EDGE_SIZE {
                let cell = Cell::new(column, row);
                for neighbor in cell.neighbors(EDGE_SIZE) {
                    assert!(
                        neighbor.neighbors(EDGE_SIZE).any(|back| back == cell),
                        "{neighbor} does not list {cell} as a neighbour"
                    );
                }
            }
        }
    }

    #[test]
    fn even_row_enumeration_order() {
        let found: Vec<_> = Cell::new(4, 4).neighbors(EDGE_SIZE).collect();

        assert_eq!(
            found,
            vec![
                Cell::new(3, 4),
                Cell::new(5, 4),
                Cell::new(4, 3),
                Cell::new(4, 5),
                Cell::new(3, 3),
                Cell::new(3, 5),
            ]
        );
    }

    #[test]
    fn odd_row_enumeration_order() {
        let found: Vec<_> = Cell::new(4, 5).neighbors(EDGE_SIZE).collect();

        assert_eq!(
            found,
            vec![
                Cell::new(3, 5),
                Cell::new(5, 5),
                Cell::new(4, 4),
                Cell::new(4, 6),
                Cell::new(5, 4),
                Cell::new(5, 6),
            ]
        );
    }

    #[test]
    fn corner_cells_skip_off_board_neighbors() {
        assert_eq!(Cell::new(0, 0).neighbors(EDGE_SIZE).count(), 2);
        // odd row on the right edge leans out of the board on both diagonals
        assert_eq!(Cell::new(10, 1).neighbors(EDGE_SIZE).count(), 3);
    }

    #[test]
    fn direction_between_matches_step() {
        let from = Cell::new(5, 5);
        for direction in Direction::ALL {
            let to = from.step(direction, EDGE_SIZE).unwrap();
            assert_eq!(Direction::between(from, to), Some(direction));
            assert_eq!(Direction::between(to, from), Some(direction.opposite()));
        }
        assert_eq!(Direction::between(from, Cell::new(7, 5)), None);
    }

    #[test]
    fn codes_round_trip() {
        for direction in Direction::ALL {
            assert_eq!(Direction::from_code(direction.code()), Some(direction));
        }
        assert_eq!(Direction::from_code(6), None);
    }
}
