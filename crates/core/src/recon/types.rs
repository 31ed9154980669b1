//! Reconciliation data types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use reckon_shared::types::ReconciliationRunId;

use crate::coa::ControlRole;
use crate::ledger::AuditContext;

/// Scope of a reconciliation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReconciliationScope {
    /// Receivables control account vs open invoices.
    Receivables,
    /// Payables control account vs open bills.
    Payables,
    /// Both control accounts.
    Full,
}

impl ReconciliationScope {
    /// Returns the control roles this scope covers.
    #[must_use]
    pub fn roles(&self) -> Vec<ControlRole> {
        match self {
            Self::Receivables => vec![ControlRole::Receivables],
            Self::Payables => vec![ControlRole::Payables],
            Self::Full => vec![ControlRole::Receivables, ControlRole::Payables],
        }
    }
}

/// Severity of a single discrepancy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Variance above tolerance but below the critical threshold.
    Warning,
    /// Variance above the critical threshold.
    Critical,
}

/// Outcome of a reconciliation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunStatus {
    /// All compared balances were within tolerance.
    Success,
    /// At least one warning-level discrepancy.
    Warning,
    /// At least one critical discrepancy.
    Failed,
}

/// Input to a reconciliation comparison: expected (subledger) vs actual
/// (ledger control balance).
#[derive(Debug, Clone, Copy)]
pub struct ControlComparison {
    /// Which control account is being compared.
    pub role: ControlRole,
    /// Sum of open subledger document balances.
    pub expected: Decimal,
    /// Control account balance from the trial balance.
    pub actual: Decimal,
}

/// A single discrepancy found by a reconciliation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Discrepancy {
    /// Which control account disagreed.
    pub role: ControlRole,
    /// Sum of open subledger document balances.
    pub expected: Decimal,
    /// Control account balance from the trial balance.
    pub actual: Decimal,
    /// `expected - actual`.
    pub variance: Decimal,
    /// Severity scaled to the variance magnitude.
    pub severity: Severity,
}

/// An append-only reconciliation run record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReconciliationRun {
    /// Unique identifier.
    pub id: ReconciliationRunId,
    /// When the run executed.
    pub run_at: DateTime<Utc>,
    /// Scope that was compared.
    pub scope: ReconciliationScope,
    /// Outcome.
    pub status: RunStatus,
    /// Discrepancies found (empty on success).
    pub discrepancies: Vec<Discrepancy>,
    /// Who or what triggered the run.
    pub audit: AuditContext,
}
