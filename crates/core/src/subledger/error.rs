//! Subledger document error types.

use rust_decimal::Decimal;
use thiserror::Error;

use super::document::DocumentStatus;

/// Errors that can occur during subledger document transitions.
#[derive(Debug, Error)]
pub enum DocumentError {
    /// The requested status change is not a permitted transition.
    #[error("Invalid document transition from {from} to {to}")]
    InvalidTransition {
        /// Current status.
        from: DocumentStatus,
        /// Requested status.
        to: DocumentStatus,
    },

    /// Settlements apply only to posted documents.
    #[error("Document is not posted")]
    NotPosted,

    /// Settlement amounts must be strictly positive.
    #[error("Settlement amount must be positive")]
    InvalidSettlementAmount,

    /// Settlement exceeds the outstanding balance.
    #[error("Settlement {requested} exceeds outstanding balance {outstanding}")]
    OverSettlement {
        /// Outstanding balance before the settlement.
        outstanding: Decimal,
        /// Requested settlement amount.
        requested: Decimal,
    },

    /// The journal entry total does not match the document total.
    #[error(
        "Journal entry total {entry_total} does not match document total {document_total} \
         (variance {variance})"
    )]
    TotalMismatch {
        /// Document total in base currency.
        document_total: Decimal,
        /// Journal entry total in base currency.
        entry_total: Decimal,
        /// Absolute variance.
        variance: Decimal,
    },
}
