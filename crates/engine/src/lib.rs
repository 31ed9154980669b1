//! Stateful ledger engine for Reckon.
//!
//! This crate wires the pure domain rules from `reckon-core` into a
//! shared, concurrently-accessed engine:
//! - in-memory stores for journal, accounts, periods, rates, and
//!   subledger documents
//! - the posting coordinator: idempotency, per-period/per-document
//!   locking, and all-or-nothing commits spanning the journal entry and
//!   the producer's document mutation
//! - canonical view queries over posted, non-reversed lines
//! - the out-of-band reconciliation job and its alert channel
//!
//! The engine is async and safe to share behind an `Arc` across tasks.

pub mod accounts;
pub mod coordinator;
pub mod documents;
pub mod engine;
pub mod error;
pub mod journal;
pub mod locks;
pub mod periods;
pub mod rates;
pub mod recon;
pub mod views;

pub use coordinator::ProducerMutation;
pub use engine::LedgerEngine;
pub use error::{PeriodAdminError, PostingError, ReversalError};
pub use recon::ReconciliationAlert;
