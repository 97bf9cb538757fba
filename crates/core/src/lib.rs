//! Shared primitives for all Rust crates in the user lookup workspace.

#![forbid(unsafe_code)]

use thiserror::Error;

/// Result type used across user lookup crates.
pub type AppResult<T> = Result<T, AppError>;

/// Common application error categories.
///
/// A missing user is never one of these: lookups report absence through
/// `bool` and `Option` results.
#[derive(Debug, Error)]
pub enum AppError {
    /// Invalid input or configuration.
    #[error("validation error: {0}")]
    Validation(String),

    /// Requested resource does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// Write operation conflicts with existing state.
    #[error("conflict: {0}")]
    Conflict(String),

    /// Internal unexpected error, including store connectivity failures.
    #[error("internal error: {0}")]
    Internal(String),
}
