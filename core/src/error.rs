use thiserror::Error;

/// Why a block on an in-bounds cell was refused.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BlockRejection {
    AlreadyBlocked,
    OccupiedByAgent,
}

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Coordinates are outside the board")]
    OutOfBounds,
    #[error("Cell cannot be blocked: {0:?}")]
    InvalidBlock(BlockRejection),
    #[error("Engine is not accepting input right now")]
    NotAcceptingInput,
    #[error("Board shape does not match declared size")]
    InvalidBoardShape,
}

pub type Result<T> = core::result::Result<T, GameError>;
