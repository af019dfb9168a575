use serde::{Deserialize, Serialize};

use crate::*;

/// The cat: where it sits, which way it last moved and how far into the
/// move animation it is.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    position: Option<Cell>,
    heading: Option<Direction>,
    frames_left: u8,
    escaped: bool,
}

impl Agent {
    pub const fn spawn(position: Cell) -> Self {
        Self {
            position: Some(position),
            heading: None,
            frames_left: 0,
            escaped: false,
        }
    }

    /// Current cell, `None` once the agent has left the board.
    pub const fn position(&self) -> Option<Cell> {
        self.position
    }

    pub const fn heading(&self) -> Option<Direction> {
        self.heading
    }

    pub const fn is_animating(&self) -> bool {
        self.frames_left > 0
    }

    pub const fn frames_left(&self) -> u8 {
        self.frames_left
    }

    pub const fn has_escaped(&self) -> bool {
        self.escaped
    }

    pub(crate) fn move_to(&mut self, cell: Cell, frames: u8) {
        self.heading = self
            .position
            .and_then(|from| Direction::between(from, cell))
            .or(self.heading);
        self.position = Some(cell);
        self.frames_left = frames;
    }

    pub(crate) fn escape(&mut self) {
        self.position = None;
        self.frames_left = 0;
        self.escaped = true;
    }

    /// Consumes one animation frame, returns whether the animation is still running.
    pub(crate) fn advance_animation(&mut self) -> bool {
        self.frames_left = self.frames_left.saturating_sub(1);
        self.is_animating()
    }
}
