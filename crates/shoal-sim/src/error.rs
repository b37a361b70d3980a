use shoal_core::ShoalError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error("arena bounds were not supplied")]
    MissingBounds,

    #[error("{what} length {got} does not match agent count {expected}")]
    AgentCountMismatch {
        expected: usize,
        got:      usize,
        what:     &'static str,
    },

    #[error("failed to build worker pool: {0}")]
    ThreadPool(String),

    #[error(transparent)]
    Core(#[from] ShoalError),
}

pub type SimResult<T> = Result<T, SimError>;
