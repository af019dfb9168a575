use serde::{Deserialize, Serialize};

use crate::*;
pub use random::*;

mod random;

pub trait BoardGenerator {
    fn generate(self, config: GameConfig) -> BoardLayout;
}

/// Where a fresh agent is placed.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpawnPolicy {
    /// Always the middle cell of the board.
    Centre,
    /// Anywhere in the central region, away from the boundary.
    #[default]
    Random,
}

/// Everything a round starts from: the walls and the agent's spawn cell.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoardLayout {
    grid: HexGrid,
    spawn: Cell,
}

impl BoardLayout {
    pub fn new(grid: HexGrid, spawn: Cell) -> Result<Self> {
        if grid.is_blocked(spawn)? {
            return Err(GameError::InvalidBlock(BlockRejection::OccupiedByAgent));
        }
        Ok(Self { grid, spawn })
    }

    pub fn from_walls(edge_size: Coord, walls: &[Cell], spawn: Cell) -> Result<Self> {
        Self::new(HexGrid::from_walls(edge_size, walls)?, spawn)
    }

    pub fn grid(&self) -> &HexGrid {
        &self.grid
    }

    pub const fn spawn(&self) -> Cell {
        self.spawn
    }

    pub fn into_parts(self) -> (HexGrid, Cell) {
        (self.grid, self.spawn)
    }
}
