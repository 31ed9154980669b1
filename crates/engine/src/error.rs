//! Engine boundary error types.

use thiserror::Error;

use reckon_core::fiscal::FiscalError;
use reckon_core::ledger::{self, LedgerError};
use reckon_core::subledger::DocumentError;
use reckon_shared::error::AppError;
use reckon_shared::types::{DocumentId, JournalEntryId};

/// Errors returned by the posting coordinator and the draft entry flow.
#[derive(Debug, Error)]
pub enum PostingError {
    /// Journal validation or resolution failed.
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    /// The fiscal period gate refused the posting date.
    #[error(transparent)]
    Fiscal(#[from] FiscalError),

    /// The producer's document mutation failed.
    #[error(transparent)]
    Document(#[from] DocumentError),

    /// The producer mutation targets an unknown document.
    #[error("Subledger document not found: {0}")]
    DocumentNotFound(DocumentId),

    /// A period or document lock could not be acquired in time. Safe to
    /// retry; the idempotency key makes retries at-most-once.
    #[error("Lock on {scope} not acquired in time, retry later")]
    Busy {
        /// The lock scope that timed out.
        scope: String,
    },
}

impl PostingError {
    /// Returns true if this error is transient and safe to retry.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Busy { .. })
    }

    /// Maps this error into the engine-wide error taxonomy.
    #[must_use]
    pub fn classify(&self) -> AppError {
        match self {
            Self::Ledger(err) => match err {
                LedgerError::EntryAlreadyPosted(_) => AppError::StateConflict(err.to_string()),
                LedgerError::EntryNotFound(_) | LedgerError::AccountNotFound(_) => {
                    AppError::NotFound(err.to_string())
                }
                _ => AppError::Validation(err.to_string()),
            },
            Self::Fiscal(err) => match err {
                FiscalError::PeriodClosed { .. } | FiscalError::PeriodLocked { .. } => {
                    AppError::StateConflict(err.to_string())
                }
                FiscalError::PeriodNotFound(_) => AppError::NotFound(err.to_string()),
                _ => AppError::Validation(err.to_string()),
            },
            Self::Document(err) => match err {
                DocumentError::InvalidTransition { .. } | DocumentError::NotPosted => {
                    AppError::StateConflict(err.to_string())
                }
                _ => AppError::Validation(err.to_string()),
            },
            Self::DocumentNotFound(_) => AppError::NotFound(self.to_string()),
            Self::Busy { .. } => AppError::Concurrency(self.to_string()),
        }
    }
}

/// Errors returned by `reverse_entry`.
#[derive(Debug, Error)]
pub enum ReversalError {
    /// The entry cannot be reversed (not posted, or already reversed).
    #[error(transparent)]
    Invalid(#[from] ledger::ReversalError),

    /// The entry to reverse does not exist.
    #[error("Journal entry not found: {0}")]
    EntryNotFound(JournalEntryId),

    /// The fiscal period gate refused the reversal date.
    #[error(transparent)]
    Fiscal(#[from] FiscalError),

    /// Mirror line re-validation failed (engine invariant; should never
    /// happen for an entry that posted).
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    /// The period lock could not be acquired in time.
    #[error("Lock on {scope} not acquired in time, retry later")]
    Busy {
        /// The lock scope that timed out.
        scope: String,
    },
}

impl ReversalError {
    /// Returns true if this error is transient and safe to retry.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Busy { .. })
    }
}

/// Errors returned by administrative period operations.
#[derive(Debug, Error)]
pub enum PeriodAdminError {
    /// The transition or period definition was invalid.
    #[error(transparent)]
    Fiscal(#[from] FiscalError),

    /// The period lock could not be acquired in time (an in-flight
    /// posting is still holding it).
    #[error("Lock on {scope} not acquired in time, retry later")]
    Busy {
        /// The lock scope that timed out.
        scope: String,
    },
}
