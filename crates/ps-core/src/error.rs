//! # AppError
//!
//! Centralized error handling for postsync.
//! Every failure mode of the sync and access layer maps to one named variant.

use thiserror::Error;

/// The primary error type for all ps-core operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    /// Resource not found (entity kind, identifier)
    #[error("{0} not found with ID {1}")]
    NotFound(String, String),

    /// Upstream unreachable, non-success status, or malformed response body
    #[error("upstream transport error: {0}")]
    Transport(String),

    /// Constraint violation (e.g., duplicate post id)
    #[error("conflict: {0}")]
    Conflict(String),

    /// Any other persistence failure
    #[error("storage error: {0}")]
    Storage(String),

    /// Invalid or unreadable configuration
    #[error("configuration error: {0}")]
    Config(String),
}

impl AppError {
    pub fn not_found(kind: &str, id: impl ToString) -> Self {
        Self::NotFound(kind.to_string(), id.to_string())
    }
}

/// A specialized Result type for postsync logic.
pub type Result<T> = std::result::Result<T, AppError>;
