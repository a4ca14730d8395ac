//! Shared primitives for all Rust crates in Limitra.

#![forbid(unsafe_code)]

use thiserror::Error;

/// Result type used across Limitra crates.
pub type AppResult<T> = Result<T, AppError>;

/// Common application error categories.
///
/// Errors here stay internal to the limiter: the public operations swallow
/// them at the service boundary and degrade to in-memory state.
#[derive(Debug, Error)]
pub enum AppError {
    /// Invalid input or malformed persisted data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Durable storage read or write failure.
    #[error("storage error: {0}")]
    Storage(String),
}
