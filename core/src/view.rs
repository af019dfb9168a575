use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Read-only picture of the engine handed to whoever draws a frame.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoardView {
    pub edge_size: Coord,
    pub walls: Array2<bool>,
    pub agent: Option<Cell>,
    pub heading: Option<Direction>,
    pub animating: bool,
    pub frames_left: u8,
    pub state: TurnState,
    pub turn: u32,
}

impl BoardView {
    pub fn from_engine(engine: &GameEngine) -> Self {
        let agent = engine.agent();
        Self {
            edge_size: engine.edge_size(),
            walls: engine.grid().walls().clone(),
            agent: agent.position(),
            heading: agent.heading(),
            animating: agent.is_animating(),
            frames_left: agent.frames_left(),
            state: engine.state(),
            turn: engine.turn(),
        }
    }

    /// Walls outside the board read as open.
    pub fn is_blocked(&self, cell: Cell) -> bool {
        cell.is_inside(self.edge_size) && self.walls[cell.to_nd_index()]
    }

    pub fn ending(&self) -> Option<Ending> {
        self.state.ending()
    }
}
