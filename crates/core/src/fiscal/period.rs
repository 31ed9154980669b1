//! Fiscal period types.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use reckon_shared::types::FiscalPeriodId;

use crate::ledger::AuditContext;

/// Status of a fiscal period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeriodStatus {
    /// Period is open for postings.
    Open,
    /// Period is closed; no new postings allowed.
    Closed,
    /// Period is locked; closed and frozen for any change.
    Locked,
}

impl PeriodStatus {
    /// Returns true if postings dated in this period are permitted.
    #[must_use]
    pub const fn is_writable(&self) -> bool {
        matches!(self, Self::Open)
    }

    /// Returns true if `self -> to` is a permitted transition.
    ///
    /// Forward transitions move one step at a time
    /// (`Open -> Closed -> Locked`); the only backward transition is the
    /// administrative reopen of a closed or locked period.
    #[must_use]
    pub const fn can_transition_to(&self, to: Self) -> bool {
        matches!(
            (self, to),
            (Self::Open, Self::Closed)
                | (Self::Closed, Self::Locked)
                | (Self::Closed, Self::Open)
                | (Self::Locked, Self::Open)
        )
    }
}

impl std::fmt::Display for PeriodStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Open => write!(f, "open"),
            Self::Closed => write!(f, "closed"),
            Self::Locked => write!(f, "locked"),
        }
    }
}

/// A fiscal period within a fiscal year.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FiscalPeriod {
    /// Unique identifier.
    pub id: FiscalPeriodId,
    /// Fiscal year this period belongs to.
    pub year: i32,
    /// Period number within the year (1-12 for monthly).
    pub sequence: u32,
    /// Period name (e.g., "2026-01").
    pub name: String,
    /// Start date of the period (inclusive).
    pub start_date: NaiveDate,
    /// End date of the period (inclusive).
    pub end_date: NaiveDate,
    /// Current status.
    pub status: PeriodStatus,
}

impl FiscalPeriod {
    /// Returns true if the given date falls within this period.
    #[must_use]
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }
}

/// Input for creating a fiscal period.
#[derive(Debug, Clone)]
pub struct NewPeriod {
    /// Fiscal year.
    pub year: i32,
    /// Period number within the year.
    pub sequence: u32,
    /// Period name.
    pub name: String,
    /// Start date (inclusive).
    pub start_date: NaiveDate,
    /// End date (inclusive).
    pub end_date: NaiveDate,
}

/// Audited record of a period status transition.
///
/// Appended to the period audit log on every close, lock, and reopen.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeriodAuditEvent {
    /// The period that transitioned.
    pub period_id: FiscalPeriodId,
    /// Status before the transition.
    pub from: PeriodStatus,
    /// Status after the transition.
    pub to: PeriodStatus,
    /// Who performed the transition, when, and why.
    pub audit: AuditContext,
}
