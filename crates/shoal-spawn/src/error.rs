use shoal_core::ShoalError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SpawnError {
    #[error("arena bounds were not supplied")]
    MissingBounds,

    #[error("roster is empty but {expected} agents were expected")]
    EmptyRoster { expected: usize },

    #[error("roster population is {got} but {expected} agents were expected")]
    PopulationMismatch { expected: usize, got: usize },

    #[error("kind {kind:?} has move_speed {speed}; it must be finite and positive")]
    InvalidMoveSpeed { kind: String, speed: f32 },

    #[error("roster parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Core(#[from] ShoalError),
}

pub type SpawnResult<T> = Result<T, SpawnError>;
