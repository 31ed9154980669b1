//! Double-entry journal logic.
//!
//! This module implements the core ledger functionality:
//! - Journal entry and line domain types
//! - Balance and immutability validation
//! - Line resolution with currency normalization
//! - Reversal construction (the only undo path for posted entries)
//! - Audit context attached to postings and administrative events

pub mod audit;
pub mod entry;
pub mod error;
pub mod line;
pub mod reversal;
pub mod service;
pub mod validation;

#[cfg(test)]
mod reversal_props;
#[cfg(test)]
mod validation_props;

pub use audit::{AuditContext, AuditError};
pub use entry::{EntryHeader, JournalEntry, SourceRef};
pub use error::{LedgerError, ReversalError};
pub use line::{JournalLine, LineSpec, ResolvedLine, Side};
pub use reversal::{build_reversal_lines, reversal_description, validate_reversible};
pub use service::{AccountInfo, EntryTotals, LedgerService};
pub use validation::validate_lines;
