//! Engine-wide error taxonomy.
//!
//! Every component error maps into one of these classes at the engine
//! boundary so callers can decide how to react:
//! - validation errors are fixed by the caller and never retried
//! - state conflicts are fixed by choosing a different period or action
//! - concurrency errors are transient and safe to retry with backoff
//! - integrity errors are surfaced out-of-band and never block posting

use thiserror::Error;

/// Result type alias using `AppError`.
pub type AppResult<T> = Result<T, AppError>;

/// Engine error classes.
#[derive(Debug, Error)]
pub enum AppError {
    /// Input failed a validation rule (unbalanced, empty, duplicate code).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Operation conflicts with current entity state (closed period,
    /// already-posted entry).
    #[error("State conflict: {0}")]
    StateConflict(String),

    /// Lock acquisition timed out; the operation may be retried.
    #[error("Concurrency conflict: {0}")]
    Concurrency(String),

    /// Ledger and subledger disagree; surfaced as an alert, never fatal.
    #[error("Integrity violation: {0}")]
    Integrity(String),

    /// Referenced entity does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invariant the engine itself must uphold was broken.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Returns the stable error code for this error class.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::StateConflict(_) => "STATE_CONFLICT",
            Self::Concurrency(_) => "CONCURRENCY_CONFLICT",
            Self::Integrity(_) => "INTEGRITY_VIOLATION",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Returns true if this error is transient and safe to retry.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Concurrency(_))
    }
}
