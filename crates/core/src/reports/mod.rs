//! Canonical view projections.
//!
//! Every report here is a pure function over posted, non-reversed journal
//! lines (never over subledger tables), with the posting date as the only
//! time axis.

pub mod service;
pub mod types;

pub use service::ReportService;
pub use types::{
    AccountBalance, AgingBuckets, AgingReport, CashPositionReport, LineFact, PlSection,
    ProfitAndLossReport, TrialBalanceReport, TrialBalanceTotals,
};
