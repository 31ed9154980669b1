//! Ledger error types for validation and state errors.

use rust_decimal::Decimal;
use thiserror::Error;

use reckon_shared::types::{AccountId, JournalEntryId};

use crate::currency::CurrencyError;

/// Errors that can occur during journal validation and mutation.
#[derive(Debug, Error)]
pub enum LedgerError {
    // ========== Validation Errors ==========
    /// Entry must have at least 2 lines.
    #[error("Journal entry must have at least 2 lines")]
    EmptyEntry,

    /// Entry is not balanced (debits != credits in base currency).
    #[error("Journal entry is not balanced. Debit: {debit}, Credit: {credit}")]
    Unbalanced {
        /// Total debit amount in base currency.
        debit: Decimal,
        /// Total credit amount in base currency.
        credit: Decimal,
    },

    /// Line amount cannot be zero.
    #[error("Line amount cannot be zero")]
    ZeroAmount,

    /// Line amount cannot be negative.
    #[error("Line amount cannot be negative")]
    NegativeAmount,

    /// Transaction amounts carry at most 4 decimal places.
    #[error("Line amount has too many decimal places: {scale}")]
    ScaleTooLarge {
        /// Scale of the offending amount.
        scale: u32,
    },

    /// A line must carry exactly one of debit or credit.
    #[error("Line must have exactly one of debit or credit set")]
    InvalidLineSide,

    // ========== Account Errors ==========
    /// Account not found.
    #[error("Account not found: {0}")]
    AccountNotFound(AccountId),

    /// Account is inactive and cannot take new postings.
    #[error("Account {0} is inactive")]
    AccountInactive(AccountId),

    // ========== State Errors ==========
    /// Journal entry not found.
    #[error("Journal entry not found: {0}")]
    EntryNotFound(JournalEntryId),

    /// Mutation attempted against a posted entry. This indicates the
    /// immutability contract was bypassed upstream and is a caller bug.
    #[error("Journal entry {0} is posted and immutable")]
    EntryAlreadyPosted(JournalEntryId),

    // ========== Currency Errors ==========
    /// Currency normalization failed.
    #[error(transparent)]
    Currency(#[from] CurrencyError),
}

impl LedgerError {
    /// Returns the stable error code for this error.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyEntry => "EMPTY_ENTRY",
            Self::Unbalanced { .. } => "UNBALANCED",
            Self::ZeroAmount => "ZERO_AMOUNT",
            Self::NegativeAmount => "NEGATIVE_AMOUNT",
            Self::ScaleTooLarge { .. } => "SCALE_TOO_LARGE",
            Self::InvalidLineSide => "INVALID_LINE_SIDE",
            Self::AccountNotFound(_) => "ACCOUNT_NOT_FOUND",
            Self::AccountInactive(_) => "ACCOUNT_INACTIVE",
            Self::EntryNotFound(_) => "ENTRY_NOT_FOUND",
            Self::EntryAlreadyPosted(_) => "ENTRY_ALREADY_POSTED",
            Self::Currency(err) => err.error_code(),
        }
    }

    /// Returns true if this error is a caller contract violation rather
    /// than a recoverable input problem.
    #[must_use]
    pub const fn is_contract_violation(&self) -> bool {
        matches!(self, Self::EntryAlreadyPosted(_))
    }
}

/// Errors that can occur when reversing a posted entry.
#[derive(Debug, Error)]
pub enum ReversalError {
    /// Only posted entries can be reversed.
    #[error("Journal entry {0} is not posted")]
    NotPosted(JournalEntryId),

    /// The entry has already been reversed.
    #[error("Journal entry {0} is already reversed")]
    AlreadyReversed(JournalEntryId),
}
