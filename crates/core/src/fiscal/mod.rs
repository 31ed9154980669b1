//! Fiscal period state machine and posting gate.
//!
//! Every ledger write resolves its posting date to a fiscal period and is
//! refused unless that period is open. Period status transitions are
//! one-directional (`Open -> Closed -> Locked`) except for an explicit,
//! audited administrative reopen.

pub mod error;
pub mod gate;
pub mod period;

pub use error::FiscalError;
pub use gate::{check_writable, find_period, validate_new_period, validate_transition};
pub use period::{FiscalPeriod, NewPeriod, PeriodAuditEvent, PeriodStatus};
