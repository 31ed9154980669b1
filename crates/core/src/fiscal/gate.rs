//! Posting gate and period transition validation.
//!
//! The gate maps a posting date to its fiscal period and refuses writes
//! into closed or locked periods. Callers must hold the period's exclusive
//! lock while checking and writing so a concurrent close cannot slip in
//! between.

use chrono::NaiveDate;

use reckon_shared::types::FiscalPeriodId;

use super::error::FiscalError;
use super::period::{FiscalPeriod, NewPeriod, PeriodStatus};
use crate::ledger::AuditContext;

/// Finds the period containing the given date.
#[must_use]
pub fn find_period(periods: &[FiscalPeriod], date: NaiveDate) -> Option<&FiscalPeriod> {
    periods.iter().find(|p| p.contains_date(date))
}

/// Checks that a posting dated `date` is permitted.
///
/// # Errors
///
/// Returns `NoPeriodDefined` if no period covers the date, or
/// `PeriodClosed`/`PeriodLocked` for non-open periods.
pub fn check_writable(
    periods: &[FiscalPeriod],
    date: NaiveDate,
) -> Result<FiscalPeriodId, FiscalError> {
    let period = find_period(periods, date).ok_or(FiscalError::NoPeriodDefined(date))?;

    match period.status {
        PeriodStatus::Open => Ok(period.id),
        PeriodStatus::Closed => Err(FiscalError::PeriodClosed {
            period: period.name.clone(),
        }),
        PeriodStatus::Locked => Err(FiscalError::PeriodLocked {
            period: period.name.clone(),
        }),
    }
}

/// Validates a period status transition.
///
/// Reopening (any backward transition to `Open`) additionally requires a
/// reason in the audit context, since it is an exceptional administrative
/// event.
///
/// # Errors
///
/// Returns `InvalidTransition` or `ReopenReasonRequired`.
pub fn validate_transition(
    from: PeriodStatus,
    to: PeriodStatus,
    audit: &AuditContext,
) -> Result<(), FiscalError> {
    if !from.can_transition_to(to) {
        return Err(FiscalError::InvalidTransition { from, to });
    }

    if to == PeriodStatus::Open
        && audit
            .reason
            .as_deref()
            .is_none_or(|reason| reason.trim().is_empty())
    {
        return Err(FiscalError::ReopenReasonRequired);
    }

    Ok(())
}

/// Validates a new period against the existing ones.
///
/// Periods of one ledger are contiguous and non-overlapping: the first
/// period may start anywhere; each subsequent period must start the day
/// after the latest existing period ends.
///
/// # Errors
///
/// Returns `InvalidDateRange`, `OverlappingPeriod`, or `NonContiguous`.
pub fn validate_new_period(
    existing: &[FiscalPeriod],
    input: &NewPeriod,
) -> Result<(), FiscalError> {
    if input.start_date > input.end_date {
        return Err(FiscalError::InvalidDateRange);
    }

    for period in existing {
        if input.start_date <= period.end_date && input.end_date >= period.start_date {
            return Err(FiscalError::OverlappingPeriod(period.name.clone()));
        }
    }

    if let Some(latest) = existing.iter().max_by_key(|p| p.end_date) {
        let expected = latest
            .end_date
            .succ_opt()
            .ok_or(FiscalError::InvalidDateRange)?;
        if input.start_date != expected {
            return Err(FiscalError::NonContiguous {
                expected,
                actual: input.start_date,
            });
        }
    }

    Ok(())
}
