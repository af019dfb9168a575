use serde::{Deserialize, Serialize};

use crate::*;

/// How a round ended.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Ending {
    /// The agent was enclosed.
    Won,
    /// The agent reached the boundary.
    Escaped,
}

/// Valid transitions:
/// - Idle -> Resolving (a block was placed)
/// - Resolving -> Animating | Idle | Terminal
/// - Animating -> Idle (animation finished)
/// - any -> Idle (reset)
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnState {
    /// Waiting for the player.
    #[default]
    Idle,
    /// A block was applied and the agent has yet to answer.
    Resolving,
    /// The agent is visibly moving, input is not accepted.
    Animating,
    /// Round over, waiting for the reset.
    Terminal(Ending),
}

impl TurnState {
    pub const fn is_idle(self) -> bool {
        matches!(self, Self::Idle)
    }

    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Terminal(_))
    }

    pub const fn ending(self) -> Option<Ending> {
        match self {
            Self::Terminal(ending) => Some(ending),
            _ => None,
        }
    }
}

/// Owns the board and the agent and runs the turns between them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameEngine {
    config: GameConfig,
    grid: HexGrid,
    agent: Agent,
    state: TurnState,
    turn: u32,
}

impl GameEngine {
    pub fn new(config: GameConfig, layout: BoardLayout) -> Self {
        let (grid, spawn) = layout.into_parts();
        let mut engine = Self {
            config: GameConfig {
                edge_size: grid.edge_size(),
                ..config
            },
            grid,
            agent: Agent::spawn(spawn),
            state: TurnState::Idle,
            turn: 0,
        };
        engine.start_round();
        engine
    }

    pub fn generate(config: GameConfig, generator: impl BoardGenerator) -> Self {
        Self::new(config, generator.generate(config))
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn state(&self) -> TurnState {
        self.state
    }

    pub fn ending(&self) -> Option<Ending> {
        self.state.ending()
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_terminal()
    }

    pub fn is_accepting_input(&self) -> bool {
        self.state.is_idle()
    }

    pub fn is_animating(&self) -> bool {
        matches!(self.state, TurnState::Animating)
    }

    pub fn edge_size(&self) -> Coord {
        self.grid.edge_size()
    }

    pub fn grid(&self) -> &HexGrid {
        &self.grid
    }

    pub fn agent(&self) -> &Agent {
        &self.agent
    }

    pub fn agent_position(&self) -> Option<Cell> {
        self.agent.position()
    }

    /// Number of blocks placed this round.
    pub fn turn(&self) -> u32 {
        self.turn
    }

    pub fn is_blocked(&self, cell: Cell) -> Result<bool> {
        self.grid.is_blocked(cell)
    }

    pub fn view(&self) -> BoardView {
        BoardView::from_engine(self)
    }

    /// Walls off `cell` and hands the turn to the agent.
    ///
    /// Refused without any change when the engine is not idle, the cell is
    /// outside the board, already walled, or holds the agent.
    pub fn place_block(&mut self, cell: Cell) -> Result<()> {
        if !self.state.is_idle() {
            return Err(GameError::NotAcceptingInput);
        }

        let cell = self.grid.validate_cell(cell)?;
        if self.agent.position() == Some(cell) {
            return Err(GameError::InvalidBlock(BlockRejection::OccupiedByAgent));
        }

        match self.grid.block(cell)? {
            BlockOutcome::NoChange => Err(GameError::InvalidBlock(BlockRejection::AlreadyBlocked)),
            BlockOutcome::Blocked => {
                self.turn += 1;
                self.state = TurnState::Resolving;
                log::debug!("Turn {}: blocked {}", self.turn, cell);
                Ok(())
            }
        }
    }

    /// Lets the agent answer the last block.
    pub fn resolve(&mut self) -> Result<MoveOutcome> {
        if !matches!(self.state, TurnState::Resolving) {
            return Err(GameError::NotAcceptingInput);
        }

        let outcome = match self.agent.position() {
            Some(position) => PathFinder::new(&self.grid).next_move(position)?,
            None => MoveOutcome::Escaped,
        };

        match outcome {
            MoveOutcome::MoveTo(cell) => {
                self.agent.move_to(cell, self.config.animation_frames);
                self.state = if self.agent.is_animating() {
                    TurnState::Animating
                } else {
                    TurnState::Idle
                };
                log::debug!("Agent moves to {}", cell);
            }
            MoveOutcome::Escaped => {
                self.agent.escape();
                self.state = TurnState::Terminal(Ending::Escaped);
                log::debug!("Agent escaped after {} turns", self.turn);
            }
            MoveOutcome::PlayerWins => {
                self.state = TurnState::Terminal(Ending::Won);
                log::debug!("Agent enclosed after {} turns", self.turn);
            }
        }

        Ok(outcome)
    }

    /// One full turn: [`place_block`](Self::place_block) then [`resolve`](Self::resolve).
    pub fn apply_block(&mut self, cell: Cell) -> Result<MoveOutcome> {
        self.place_block(cell)?;
        self.resolve()
    }

    /// Steps the move animation by one frame, returns whether it keeps running.
    pub fn advance_animation(&mut self) -> bool {
        if !self.is_animating() {
            return false;
        }
        if self.agent.advance_animation() {
            true
        } else {
            self.state = TurnState::Idle;
            false
        }
    }

    /// Throws the current round away and starts over from `layout`.
    pub fn reset(&mut self, layout: BoardLayout) {
        let (grid, spawn) = layout.into_parts();
        self.config.edge_size = grid.edge_size();
        self.grid = grid;
        self.agent = Agent::spawn(spawn);
        self.turn = 0;
        self.start_round();
        log::debug!("Board reset, agent at {}", spawn);
    }

    /// An agent spawned on the boundary gets to act before the player does.
    fn start_round(&mut self) {
        let on_boundary = self
            .agent
            .position()
            .is_some_and(|spawn| self.grid.is_boundary(spawn));
        self.state = if on_boundary {
            TurnState::Resolving
        } else {
            TurnState::Idle
        };
    }
}
