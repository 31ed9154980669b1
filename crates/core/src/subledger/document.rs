//! Subledger document types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use reckon_shared::types::{DocumentId, JournalEntryId, Money};

use super::error::DocumentError;
use crate::coa::ControlRole;

/// Kind of subledger document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    /// Customer invoice (receivable).
    Invoice,
    /// Vendor bill (payable).
    Bill,
    /// Payroll run (disbursement).
    PayrollRun,
}

impl DocumentKind {
    /// Returns the control account role this document kind aggregates
    /// into, if any.
    #[must_use]
    pub const fn control_role(&self) -> Option<ControlRole> {
        match self {
            Self::Invoice => Some(ControlRole::Receivables),
            Self::Bill => Some(ControlRole::Payables),
            Self::PayrollRun => None,
        }
    }
}

/// Lifecycle status of a subledger document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentStatus {
    /// Created by the producer; not yet in the ledger.
    Draft,
    /// Sent/approved/disbursed, backed by a posted journal entry.
    Posted,
    /// Fully settled.
    Settled,
}

impl std::fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Draft => write!(f, "draft"),
            Self::Posted => write!(f, "posted"),
            Self::Settled => write!(f, "settled"),
        }
    }
}

/// A subledger document as seen at the engine boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Unique identifier.
    pub id: DocumentId,
    /// Document kind.
    pub kind: DocumentKind,
    /// Counterparty (customer, vendor, or payroll batch label).
    pub counterparty: String,
    /// Total in transaction currency.
    pub total: Money,
    /// Date the document was issued.
    pub issue_date: NaiveDate,
    /// Date payment falls due (the aging key).
    pub due_date: NaiveDate,
    /// Lifecycle status.
    pub status: DocumentStatus,
    /// The journal entry that posted this document.
    pub posted_entry: Option<JournalEntryId>,
    /// Base-currency total frozen when the document was posted.
    pub base_total: Option<Decimal>,
    /// Base-currency amount settled so far.
    pub settled_base: Decimal,
}

/// Input for registering a subledger document.
#[derive(Debug, Clone)]
pub struct NewDocument {
    /// Document kind.
    pub kind: DocumentKind,
    /// Counterparty name.
    pub counterparty: String,
    /// Total in transaction currency.
    pub total: Money,
    /// Date the document was issued.
    pub issue_date: NaiveDate,
    /// Date payment falls due.
    pub due_date: NaiveDate,
}

impl Document {
    /// Creates a draft document from registration input.
    #[must_use]
    pub fn draft(input: NewDocument) -> Self {
        Self {
            id: DocumentId::new(),
            kind: input.kind,
            counterparty: input.counterparty,
            total: input.total,
            issue_date: input.issue_date,
            due_date: input.due_date,
            status: DocumentStatus::Draft,
            posted_entry: None,
            base_total: None,
            settled_base: Decimal::ZERO,
        }
    }

    /// Returns the outstanding base-currency balance.
    ///
    /// Zero until the document is posted (a draft has no ledger
    /// footprint).
    #[must_use]
    pub fn outstanding_base(&self) -> Decimal {
        match self.base_total {
            Some(base_total) => base_total - self.settled_base,
            None => Decimal::ZERO,
        }
    }

    /// Marks the document posted.
    ///
    /// Called by the posting coordinator inside its atomic unit; the
    /// entry link and frozen base total are attached separately once the
    /// entry id is known.
    ///
    /// # Errors
    ///
    /// Returns `InvalidTransition` unless the document is a draft.
    pub fn mark_posted(&mut self) -> Result<(), DocumentError> {
        if self.status != DocumentStatus::Draft {
            return Err(DocumentError::InvalidTransition {
                from: self.status,
                to: DocumentStatus::Posted,
            });
        }
        self.status = DocumentStatus::Posted;
        Ok(())
    }

    /// Applies a settlement in base currency.
    ///
    /// Flips the document to settled when the outstanding balance
    /// reaches zero.
    ///
    /// # Errors
    ///
    /// Returns `NotPosted`, `InvalidSettlementAmount`, or
    /// `OverSettlement`.
    pub fn apply_settlement(&mut self, amount: Decimal) -> Result<(), DocumentError> {
        if self.status != DocumentStatus::Posted {
            return Err(DocumentError::NotPosted);
        }
        if amount <= Decimal::ZERO {
            return Err(DocumentError::InvalidSettlementAmount);
        }
        let outstanding = self.outstanding_base();
        if amount > outstanding {
            return Err(DocumentError::OverSettlement {
                outstanding,
                requested: amount,
            });
        }

        self.settled_base += amount;
        if self.outstanding_base() == Decimal::ZERO {
            self.status = DocumentStatus::Settled;
        }
        Ok(())
    }

    /// Validates that a journal entry total matches this document's base
    /// total within the rounding tolerance.
    ///
    /// # Errors
    ///
    /// Returns `TotalMismatch` if the variance exceeds the tolerance.
    pub fn validate_entry_total(
        document_total: Decimal,
        entry_total: Decimal,
        tolerance: Decimal,
    ) -> Result<(), DocumentError> {
        let variance = (document_total - entry_total).abs();
        if variance > tolerance {
            return Err(DocumentError::TotalMismatch {
                document_total,
                entry_total,
                variance,
            });
        }
        Ok(())
    }
}
