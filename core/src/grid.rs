use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::*;

/// Square board of hexagonal cells, each either open or walled off.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HexGrid {
    walls: Array2<bool>,
    wall_count: CellCount,
}

impl HexGrid {
    /// An `edge_size × edge_size` board with no walls.
    pub fn new(edge_size: Coord) -> Self {
        Self {
            walls: Array2::default([edge_size.into(), edge_size.into()]),
            wall_count: 0,
        }
    }

    pub fn from_walls(edge_size: Coord, walls: &[Cell]) -> Result<Self> {
        let mut grid = Self::new(edge_size);
        for &cell in walls {
            grid.block(cell)?;
        }
        Ok(grid)
    }

    pub fn from_wall_mask(walls: Array2<bool>) -> Result<Self> {
        let (columns, rows) = walls.dim();
        if columns != rows || Coord::try_from(columns).is_err() {
            return Err(GameError::InvalidBoardShape);
        }
        let wall_count = walls
            .iter()
            .filter(|&&blocked| blocked)
            .count()
            .try_into()
            .map_err(|_| GameError::InvalidBoardShape)?;
        Ok(Self { walls, wall_count })
    }

    pub fn edge_size(&self) -> Coord {
        // constructors keep both axes equal and within `Coord`
        self.walls.dim().0 as Coord
    }

    pub fn total_cells(&self) -> CellCount {
        let edge = self.edge_size();
        mult(edge, edge)
    }

    pub fn wall_count(&self) -> CellCount {
        self.wall_count
    }

    pub fn open_count(&self) -> CellCount {
        self.total_cells() - self.wall_count
    }

    pub fn validate_cell(&self, cell: Cell) -> Result<Cell> {
        if cell.is_inside(self.edge_size()) {
            Ok(cell)
        } else {
            Err(GameError::OutOfBounds)
        }
    }

    pub fn is_boundary(&self, cell: Cell) -> bool {
        cell.is_boundary(self.edge_size())
    }

    pub fn is_blocked(&self, cell: Cell) -> Result<bool> {
        let cell = self.validate_cell(cell)?;
        Ok(self[cell])
    }

    /// Walls off `cell`. Blocking an existing wall is a no-op.
    pub fn block(&mut self, cell: Cell) -> Result<BlockOutcome> {
        let cell = self.validate_cell(cell)?;
        let blocked = &mut self.walls[cell.to_nd_index()];
        if *blocked {
            return Ok(BlockOutcome::NoChange);
        }
        *blocked = true;
        self.wall_count += 1;
        Ok(BlockOutcome::Blocked)
    }

    /// Re-opens `cell`; only board generation does this, play never does.
    pub(crate) fn open(&mut self, cell: Cell) {
        if cell.is_inside(self.edge_size()) {
            let blocked = &mut self.walls[cell.to_nd_index()];
            if *blocked {
                *blocked = false;
                self.wall_count -= 1;
            }
        }
    }

    pub fn clear(&mut self) {
        self.walls.fill(false);
        self.wall_count = 0;
    }

    pub fn neighbors(&self, cell: Cell) -> NeighborIter {
        cell.neighbors(self.edge_size())
    }

    pub fn open_neighbors(&self, cell: Cell) -> SmallVec<[Cell; 6]> {
        self.neighbors(cell).filter(|&pos| !self[pos]).collect()
    }

    /// Every cell, column by column.
    pub fn iter_cells(&self) -> impl Iterator<Item = (Cell, bool)> + '_ {
        self.walls
            .indexed_iter()
            .map(|((column, row), &blocked)| (Cell::new(column as Coord, row as Coord), blocked))
    }

    pub fn walls(&self) -> &Array2<bool> {
        &self.walls
    }
}

impl Index<Cell> for HexGrid {
    type Output = bool;

    fn index(&self, cell: Cell) -> &Self::Output {
        &self.walls[cell.to_nd_index()]
    }
}
