//! Fiscal period error types.

use chrono::NaiveDate;
use thiserror::Error;

use reckon_shared::types::FiscalPeriodId;

use super::period::PeriodStatus;

/// Errors that can occur during fiscal period operations.
#[derive(Debug, Error)]
pub enum FiscalError {
    /// No fiscal period covers the given date.
    #[error("No fiscal period defined for date {0}")]
    NoPeriodDefined(NaiveDate),

    /// The target period is closed.
    #[error("Fiscal period {period} is closed, no posting allowed")]
    PeriodClosed {
        /// Name of the closed period.
        period: String,
    },

    /// The target period is locked.
    #[error("Fiscal period {period} is locked, no posting allowed")]
    PeriodLocked {
        /// Name of the locked period.
        period: String,
    },

    /// Fiscal period not found.
    #[error("Fiscal period not found: {0}")]
    PeriodNotFound(FiscalPeriodId),

    /// The requested status change is not a permitted transition.
    #[error("Invalid period transition from {from} to {to}")]
    InvalidTransition {
        /// Current status.
        from: PeriodStatus,
        /// Requested status.
        to: PeriodStatus,
    },

    /// Start date must not be after end date.
    #[error("Period start date must be on or before end date")]
    InvalidDateRange,

    /// The new period overlaps an existing one.
    #[error("Period overlaps existing period {0}")]
    OverlappingPeriod(String),

    /// The new period leaves a gap after the latest existing period.
    #[error("Period must start on {expected}, got {actual}")]
    NonContiguous {
        /// Day immediately after the latest existing period.
        expected: NaiveDate,
        /// Start date that was supplied.
        actual: NaiveDate,
    },

    /// Reopening a period requires a reason in the audit context.
    #[error("Reopening a period requires a reason")]
    ReopenReasonRequired,
}

impl FiscalError {
    /// Returns the stable error code for this error.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NoPeriodDefined(_) => "NO_PERIOD_DEFINED",
            Self::PeriodClosed { .. } => "PERIOD_CLOSED",
            Self::PeriodLocked { .. } => "PERIOD_LOCKED",
            Self::PeriodNotFound(_) => "PERIOD_NOT_FOUND",
            Self::InvalidTransition { .. } => "INVALID_TRANSITION",
            Self::InvalidDateRange => "INVALID_DATE_RANGE",
            Self::OverlappingPeriod(_) => "OVERLAPPING_PERIOD",
            Self::NonContiguous { .. } => "NON_CONTIGUOUS_PERIOD",
            Self::ReopenReasonRequired => "REOPEN_REASON_REQUIRED",
        }
    }
}
