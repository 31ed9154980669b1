//! Ledger-vs-subledger reconciliation math.
//!
//! A reconciliation run compares the sum of open subledger documents
//! against the corresponding control account balance. Variances become
//! discrepancies with severity scaled to their magnitude; the run record
//! is append-only and never blocks or corrects live postings.

pub mod service;
pub mod types;

pub use service::ReconService;
pub use types::{
    ControlComparison, Discrepancy, ReconciliationRun, ReconciliationScope, RunStatus, Severity,
};
