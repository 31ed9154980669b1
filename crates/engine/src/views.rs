//! Canonical view queries.
//!
//! Every query here is a snapshot read over posted journal lines: it
//! never blocks writers and never observes a partially applied commit
//! (commits land under a single write guard). Subledger tables are
//! consulted only for the aging buckets, whose total is checked back
//! against the control account balance.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use reckon_core::coa::ControlRole;
use reckon_core::reports::{
    AgingReport, CashPositionReport, ProfitAndLossReport, ReportService, TrialBalanceReport,
};
use reckon_shared::types::AccountId;

use crate::engine::LedgerEngine;

impl LedgerEngine {
    /// Trial balance as of a posting date, optionally restricted to a
    /// set of accounts.
    pub async fn trial_balance(
        &self,
        as_of: NaiveDate,
        filter: Option<&[AccountId]>,
    ) -> TrialBalanceReport {
        let accounts = self.accounts.list().await;
        let facts = self.journal.effective_facts().await;
        ReportService::trial_balance(
            &accounts,
            &facts,
            as_of,
            self.config().ledger.base_currency,
            filter,
        )
    }

    /// Profit and loss statement over a posting-date range.
    pub async fn profit_and_loss(
        &self,
        period_start: NaiveDate,
        period_end: NaiveDate,
    ) -> ProfitAndLossReport {
        let accounts = self.accounts.list().await;
        let facts = self.journal.effective_facts().await;
        ReportService::profit_and_loss(
            &accounts,
            &facts,
            period_start,
            period_end,
            self.config().ledger.base_currency,
        )
    }

    /// Cash position (cash/bank-flagged accounts) as of a posting date.
    pub async fn cash_position(&self, as_of: NaiveDate) -> CashPositionReport {
        let accounts = self.accounts.list().await;
        let facts = self.journal.effective_facts().await;
        ReportService::cash_position(
            &accounts,
            &facts,
            as_of,
            self.config().ledger.base_currency,
        )
    }

    /// Receivables or payables aging as of a date.
    ///
    /// Bucket totals must equal the control account balance; the report
    /// carries the comparison so callers can see the reconciliation
    /// state.
    pub async fn aging(&self, side: ControlRole, as_of: NaiveDate) -> AgingReport {
        let documents = self.documents.list().await;
        let control_balance = self.control_balance(side, as_of).await;
        ReportService::aging(side, &documents, control_balance, as_of)
    }

    /// Balance of the control account(s) for a side, measured in the
    /// account's natural direction (receivables debit-positive, payables
    /// credit-positive).
    pub(crate) async fn control_balance(&self, side: ControlRole, as_of: NaiveDate) -> Decimal {
        let accounts = self.accounts.list().await;
        let facts = self.journal.effective_facts().await;
        let trial_balance = ReportService::trial_balance(
            &accounts,
            &facts,
            as_of,
            self.config().ledger.base_currency,
            None,
        );

        accounts
            .iter()
            .filter(|account| account.control_role == Some(side))
            .map(|account| {
                let balance = trial_balance.balance_of(account.id);
                match side {
                    ControlRole::Receivables => balance,
                    ControlRole::Payables => -balance,
                }
            })
            .sum()
    }
}
