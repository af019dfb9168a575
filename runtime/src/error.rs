use thiserror::Error;

#[derive(Error, Debug)]
pub enum RuntimeError {
    #[error("Could not start the render worker")]
    Spawn(#[from] std::io::Error),
    #[error("Game session was lost with a failed render worker")]
    SessionLost,
}

pub type Result<T> = std::result::Result<T, RuntimeError>;
