//! Fiscal period store and audit log.

use std::collections::HashMap;

use chrono::NaiveDate;
use tokio::sync::RwLock;

use reckon_core::fiscal::{
    self, FiscalError, FiscalPeriod, NewPeriod, PeriodAuditEvent, PeriodStatus,
};
use reckon_core::ledger::AuditContext;
use reckon_shared::types::FiscalPeriodId;

#[derive(Debug, Default)]
struct PeriodInner {
    periods: Vec<FiscalPeriod>,
    audit_log: Vec<PeriodAuditEvent>,
}

/// In-memory fiscal period store.
///
/// Status transitions go through [`PeriodStore::transition`], which
/// validates the state machine and appends to the audit log. The engine
/// serializes transitions against in-flight postings by holding the
/// period's exclusive lock around this call.
#[derive(Debug, Default)]
pub struct PeriodStore {
    inner: RwLock<PeriodInner>,
}

impl PeriodStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a period after contiguity validation.
    ///
    /// # Errors
    ///
    /// Returns `InvalidDateRange`, `OverlappingPeriod`, or
    /// `NonContiguous`.
    pub async fn add_period(&self, input: NewPeriod) -> Result<FiscalPeriod, FiscalError> {
        let mut inner = self.inner.write().await;
        fiscal::validate_new_period(&inner.periods, &input)?;

        let period = FiscalPeriod {
            id: FiscalPeriodId::new(),
            year: input.year,
            sequence: input.sequence,
            name: input.name,
            start_date: input.start_date,
            end_date: input.end_date,
            status: PeriodStatus::Open,
        };
        inner.periods.push(period.clone());
        Ok(period)
    }

    /// Adds twelve open monthly periods for a calendar year.
    ///
    /// # Errors
    ///
    /// Returns the first period-validation failure.
    pub async fn add_calendar_year(&self, year: i32) -> Result<Vec<FiscalPeriod>, FiscalError> {
        let mut created = Vec::with_capacity(12);
        for month in 1..=12u32 {
            let start = NaiveDate::from_ymd_opt(year, month, 1)
                .ok_or(FiscalError::InvalidDateRange)?;
            let end = if month == 12 {
                NaiveDate::from_ymd_opt(year + 1, 1, 1)
            } else {
                NaiveDate::from_ymd_opt(year, month + 1, 1)
            }
            .and_then(|d| d.pred_opt())
            .ok_or(FiscalError::InvalidDateRange)?;

            created.push(
                self.add_period(NewPeriod {
                    year,
                    sequence: month,
                    name: format!("{year}-{month:02}"),
                    start_date: start,
                    end_date: end,
                })
                .await?,
            );
        }
        Ok(created)
    }

    /// Returns a period by id.
    pub async fn get(&self, id: FiscalPeriodId) -> Option<FiscalPeriod> {
        self.inner
            .read()
            .await
            .periods
            .iter()
            .find(|p| p.id == id)
            .cloned()
    }

    /// Returns the period containing a date.
    pub async fn period_for_date(&self, date: NaiveDate) -> Option<FiscalPeriod> {
        let inner = self.inner.read().await;
        fiscal::find_period(&inner.periods, date).cloned()
    }

    /// Checks that a posting dated `date` is permitted.
    ///
    /// # Errors
    ///
    /// Returns `NoPeriodDefined`, `PeriodClosed`, or `PeriodLocked`.
    pub async fn check_writable(&self, date: NaiveDate) -> Result<FiscalPeriodId, FiscalError> {
        let inner = self.inner.read().await;
        fiscal::check_writable(&inner.periods, date)
    }

    /// Applies a status transition and appends the audit event.
    ///
    /// # Errors
    ///
    /// Returns `PeriodNotFound`, `InvalidTransition`, or
    /// `ReopenReasonRequired`.
    pub async fn transition(
        &self,
        id: FiscalPeriodId,
        to: PeriodStatus,
        audit: AuditContext,
    ) -> Result<FiscalPeriod, FiscalError> {
        let mut inner = self.inner.write().await;
        let period = inner
            .periods
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(FiscalError::PeriodNotFound(id))?;

        fiscal::validate_transition(period.status, to, &audit)?;

        let from = period.status;
        period.status = to;
        let updated = period.clone();

        inner.audit_log.push(PeriodAuditEvent {
            period_id: id,
            from,
            to,
            audit,
        });
        Ok(updated)
    }

    /// Returns the append-only transition audit log.
    pub async fn audit_log(&self) -> Vec<PeriodAuditEvent> {
        self.inner.read().await.audit_log.clone()
    }

    /// Returns the status of every period, for the account-deactivation
    /// reference check.
    pub async fn statuses(&self) -> HashMap<FiscalPeriodId, PeriodStatus> {
        self.inner
            .read()
            .await
            .periods
            .iter()
            .map(|p| (p.id, p.status))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reckon_shared::types::ActorId;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[tokio::test]
    async fn test_calendar_year_is_contiguous() {
        let store = PeriodStore::new();
        let periods = store.add_calendar_year(2026).await.unwrap();
        assert_eq!(periods.len(), 12);
        assert_eq!(periods[0].start_date, ymd(2026, 1, 1));
        assert_eq!(periods[0].end_date, ymd(2026, 1, 31));
        assert_eq!(periods[1].start_date, ymd(2026, 2, 1));
        assert_eq!(periods[11].end_date, ymd(2026, 12, 31));
    }

    #[tokio::test]
    async fn test_two_years_stack() {
        let store = PeriodStore::new();
        store.add_calendar_year(2026).await.unwrap();
        let next = store.add_calendar_year(2027).await.unwrap();
        assert_eq!(next[0].start_date, ymd(2027, 1, 1));
    }

    #[tokio::test]
    async fn test_check_writable_tracks_status() {
        let store = PeriodStore::new();
        let periods = store.add_calendar_year(2026).await.unwrap();

        assert!(store.check_writable(ymd(2026, 1, 15)).await.is_ok());

        store
            .transition(
                periods[0].id,
                PeriodStatus::Closed,
                AuditContext::new(ActorId::new()),
            )
            .await
            .unwrap();

        assert!(matches!(
            store.check_writable(ymd(2026, 1, 15)).await,
            Err(FiscalError::PeriodClosed { .. })
        ));
        // other periods unaffected
        assert!(store.check_writable(ymd(2026, 2, 15)).await.is_ok());
    }

    #[tokio::test]
    async fn test_transition_audit_trail() {
        let store = PeriodStore::new();
        let periods = store.add_calendar_year(2026).await.unwrap();
        let id = periods[0].id;
        let actor = ActorId::new();

        store
            .transition(id, PeriodStatus::Closed, AuditContext::new(actor))
            .await
            .unwrap();
        store
            .transition(
                id,
                PeriodStatus::Open,
                AuditContext::with_reason(actor, "late invoice"),
            )
            .await
            .unwrap();

        let log = store.audit_log().await;
        assert_eq!(log.len(), 2);
        assert_eq!(log[0].from, PeriodStatus::Open);
        assert_eq!(log[0].to, PeriodStatus::Closed);
        assert_eq!(log[1].to, PeriodStatus::Open);
        assert_eq!(log[1].audit.reason.as_deref(), Some("late invoice"));
    }

    #[tokio::test]
    async fn test_invalid_transition_not_logged() {
        let store = PeriodStore::new();
        let periods = store.add_calendar_year(2026).await.unwrap();

        let result = store
            .transition(
                periods[0].id,
                PeriodStatus::Locked,
                AuditContext::new(ActorId::new()),
            )
            .await;
        assert!(matches!(
            result,
            Err(FiscalError::InvalidTransition { .. })
        ));
        assert!(store.audit_log().await.is_empty());
    }
}
