//! Simulation engine for a hex-grid trapping puzzle: the player walls off one
//! cell per turn while the agent runs for the edge of the board.
#![no_std]

extern crate alloc;

use serde::{Deserialize, Serialize};

pub use agent::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use grid::*;
pub use hex::*;
pub use mapper::*;
pub use pathfinder::*;
pub use types::*;
pub use view::*;

mod agent;
mod engine;
mod error;
mod generator;
mod grid;
mod hex;
mod mapper;
mod pathfinder;
mod types;
mod view;

/// Frames a single agent step is animated over.
pub const DEFAULT_ANIMATION_FRAMES: u8 = 4;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub edge_size: Coord,
    pub animation_frames: u8,
    pub spawn: SpawnPolicy,
}

impl GameConfig {
    /// Smallest board that still has a cell off the boundary.
    pub const MIN_EDGE_SIZE: Coord = 3;

    pub const fn new_unchecked(edge_size: Coord, animation_frames: u8, spawn: SpawnPolicy) -> Self {
        Self {
            edge_size,
            animation_frames,
            spawn,
        }
    }

    pub fn new(edge_size: Coord, animation_frames: u8, spawn: SpawnPolicy) -> Self {
        let edge_size = edge_size.clamp(Self::MIN_EDGE_SIZE, Coord::MAX);
        Self::new_unchecked(edge_size, animation_frames, spawn)
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.edge_size, self.edge_size)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new_unchecked(EDGE_SIZE, DEFAULT_ANIMATION_FRAMES, SpawnPolicy::default())
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BlockOutcome {
    NoChange,
    Blocked,
}

impl BlockOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Blocked => true,
        }
    }
}
