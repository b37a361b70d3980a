//! Core error type.
//!
//! Sub-crates define their own error enums and wrap `ShoalError` as one
//! variant via `#[from]`, so a `?` on a core call propagates unchanged.

use thiserror::Error;

/// The base error type for `shoal-core` and a common variant for sub-crates.
#[derive(Debug, Error)]
pub enum ShoalError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for all `shoal-*` crates.
pub type ShoalResult<T> = Result<T, ShoalError>;
