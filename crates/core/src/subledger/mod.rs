//! Subledger document lifecycle rules.
//!
//! Invoices, bills, and payroll runs are owned by their producer modules;
//! the engine sees them at the boundary. A document may not reach its
//! posted state without a committed journal entry whose total matches the
//! document's amount, and that transition happens only inside the posting
//! coordinator's atomic unit.

pub mod document;
pub mod error;

pub use document::{Document, DocumentKind, DocumentStatus, NewDocument};
pub use error::DocumentError;
