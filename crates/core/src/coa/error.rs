//! Chart of accounts error types.

use thiserror::Error;

use reckon_shared::types::AccountId;

/// Errors that can occur during chart of accounts operations.
#[derive(Debug, Error)]
pub enum CoaError {
    /// An account with the same code already exists.
    #[error("Account code already exists: {0}")]
    DuplicateCode(String),

    /// Account not found.
    #[error("Account not found: {0}")]
    AccountNotFound(AccountId),

    /// Referenced parent account not found.
    #[error("Parent account not found: {0}")]
    ParentNotFound(AccountId),

    /// Account has non-reversed postings in an open or locked period and
    /// cannot be deactivated.
    #[error("Account {0} is referenced by active journal lines")]
    AccountInUse(AccountId),

    /// Account is already inactive.
    #[error("Account {0} is already inactive")]
    AlreadyInactive(AccountId),

    /// Account type cannot change once the account has posted lines.
    #[error("Account {0} has posted lines; its type is locked")]
    TypeLocked(AccountId),
}

impl CoaError {
    /// Returns the stable error code for this error.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::DuplicateCode(_) => "DUPLICATE_CODE",
            Self::AccountNotFound(_) => "ACCOUNT_NOT_FOUND",
            Self::ParentNotFound(_) => "PARENT_NOT_FOUND",
            Self::AccountInUse(_) => "ACCOUNT_IN_USE",
            Self::AlreadyInactive(_) => "ALREADY_INACTIVE",
            Self::TypeLocked(_) => "TYPE_LOCKED",
        }
    }
}
