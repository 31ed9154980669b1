//! Journal entry types.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use reckon_shared::types::{ActorId, DocumentId, FiscalPeriodId, JournalEntryId};

use super::audit::AuditContext;

/// Reference from a journal entry to the source document that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type", content = "id")]
pub enum SourceRef {
    /// Manually keyed journal entry.
    Manual,
    /// Posted from a customer invoice.
    Invoice(DocumentId),
    /// Posted from a vendor bill.
    Bill(DocumentId),
    /// Posted from a payroll run.
    Payroll(DocumentId),
}

impl SourceRef {
    /// Returns the referenced subledger document, if any.
    #[must_use]
    pub const fn document_id(&self) -> Option<DocumentId> {
        match self {
            Self::Manual => None,
            Self::Invoice(id) | Self::Bill(id) | Self::Payroll(id) => Some(*id),
        }
    }
}

/// Caller-supplied header for a new journal entry.
#[derive(Debug, Clone)]
pub struct EntryHeader {
    /// The date the event was recorded (descriptive only).
    pub entry_date: NaiveDate,
    /// The canonical date used by all reports; must fall in an open
    /// fiscal period.
    pub posting_date: NaiveDate,
    /// Human-readable description.
    pub description: String,
    /// Source document reference.
    pub source: SourceRef,
    /// The user creating the entry.
    pub created_by: ActorId,
}

/// A journal entry header.
///
/// Once `posted` is true no field may change; the only permitted
/// follow-up operation is a reversal, which creates a new mirror entry
/// and links both ways.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalEntry {
    /// Unique identifier.
    pub id: JournalEntryId,
    /// Entry number, unique and monotonic per ledger.
    pub entry_no: i64,
    /// The date the event was recorded (descriptive only).
    pub entry_date: NaiveDate,
    /// The canonical date used by all reports.
    pub posting_date: NaiveDate,
    /// Human-readable description.
    pub description: String,
    /// Source document reference.
    pub source: SourceRef,
    /// The fiscal period the posting date resolved to.
    pub fiscal_period_id: FiscalPeriodId,
    /// Whether the entry has been posted (and is therefore immutable).
    pub posted: bool,
    /// When the entry was posted.
    pub posted_at: Option<DateTime<Utc>>,
    /// Who posted the entry.
    pub posted_by: Option<ActorId>,
    /// Whether a reversal entry has been posted against this entry.
    pub reversed: bool,
    /// The entry this entry reverses, if it is a reversal.
    pub reversal_of: Option<JournalEntryId>,
    /// The reversal entry posted against this entry, if any.
    pub reversed_by: Option<JournalEntryId>,
    /// Audit context captured at posting time.
    pub audit: Option<AuditContext>,
}

impl JournalEntry {
    /// Creates a draft entry from a header.
    #[must_use]
    pub fn draft(entry_no: i64, header: EntryHeader, fiscal_period_id: FiscalPeriodId) -> Self {
        Self {
            id: JournalEntryId::new(),
            entry_no,
            entry_date: header.entry_date,
            posting_date: header.posting_date,
            description: header.description,
            source: header.source,
            fiscal_period_id,
            posted: false,
            posted_at: None,
            posted_by: None,
            reversed: false,
            reversal_of: None,
            reversed_by: None,
            audit: None,
        }
    }

    /// Returns true if the entry may still be modified.
    #[must_use]
    pub const fn is_mutable(&self) -> bool {
        !self.posted
    }

    /// Returns true if the entry contributes to canonical views
    /// (posted and not reversed).
    #[must_use]
    pub const fn is_effective(&self) -> bool {
        self.posted && !self.reversed
    }
}
