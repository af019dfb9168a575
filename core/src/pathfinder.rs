use alloc::collections::VecDeque;
use alloc::vec::Vec;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// What the agent does in response to a player turn.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveOutcome {
    /// Step into this adjacent cell, the first hop of a shortest escape route.
    MoveTo(Cell),
    /// The agent stands on the boundary and leaves the board.
    Escaped,
    /// No open route to the boundary exists.
    PlayerWins,
}

/// Breadth-first escape search over a borrowed grid.
///
/// Neighbours are expanded in [`Cell::neighbors`] order, so when several
/// shortest routes exist the one found first in that order wins and repeated
/// calls on the same board always agree.
#[derive(Copy, Clone, Debug)]
pub struct PathFinder<'a> {
    grid: &'a HexGrid,
}

impl<'a> PathFinder<'a> {
    pub const fn new(grid: &'a HexGrid) -> Self {
        Self { grid }
    }

    pub fn next_move(&self, agent: Cell) -> Result<MoveOutcome> {
        let agent = self.grid.validate_cell(agent)?;

        if self.grid.is_boundary(agent) {
            return Ok(MoveOutcome::Escaped);
        }

        Ok(match self.escape_route(agent)?.as_deref() {
            Some([_, first_hop, ..]) => MoveOutcome::MoveTo(*first_hop),
            _ => MoveOutcome::PlayerWins,
        })
    }

    /// Shortest route from `agent` to the nearest boundary cell, both ends
    /// included, or `None` when the agent is enclosed.
    pub fn escape_route(&self, agent: Cell) -> Result<Option<Vec<Cell>>> {
        let agent = self.grid.validate_cell(agent)?;

        let Some((exit, predecessors)) = self.search(agent) else {
            log::trace!("No escape from {}", agent);
            return Ok(None);
        };

        let mut route = Vec::from([exit]);
        let mut current = exit;
        while let Some(previous) = predecessors[current.to_nd_index()] {
            route.push(previous);
            current = previous;
        }
        route.reverse();
        Ok(Some(route))
    }

    /// Runs the search, returning the first boundary cell dequeued and the
    /// predecessor of every visited cell.
    fn search(&self, agent: Cell) -> Option<(Cell, Array2<Option<Cell>>)> {
        let grid = self.grid;
        let edge = usize::from(grid.edge_size());
        let shape = [edge, edge];
        let mut visited: Array2<bool> = Array2::default(shape);
        let mut predecessors: Array2<Option<Cell>> = Array2::default(shape);
        let mut to_visit = VecDeque::from([agent]);
        visited[agent.to_nd_index()] = true;

        while let Some(cell) = to_visit.pop_front() {
            if grid.is_boundary(cell) {
                log::trace!("Escape route from {} exits at {}", agent, cell);
                return Some((cell, predecessors));
            }

            for neighbor in grid.neighbors(cell) {
                if grid[neighbor] || visited[neighbor.to_nd_index()] {
                    continue;
                }
                visited[neighbor.to_nd_index()] = true;
                predecessors[neighbor.to_nd_index()] = Some(cell);
                to_visit.push_back(neighbor);
            }
        }

        None
    }
}

/// Shorthand for [`PathFinder::next_move`].
pub fn next_move(grid: &HexGrid, agent: Cell) -> Result<MoveOutcome> {
    PathFinder::new(grid).next_move(agent)
}
