//! Report data types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use reckon_shared::types::{AccountId, Currency};

use crate::coa::{AccountType, ControlRole};

/// One posted, non-reversed journal line as seen by the report
/// projections.
#[derive(Debug, Clone, Copy)]
pub struct LineFact {
    /// The account the line posted to.
    pub account_id: AccountId,
    /// The entry's posting date (the canonical report axis).
    pub posting_date: NaiveDate,
    /// Debit amount in base currency.
    pub debit: Decimal,
    /// Credit amount in base currency.
    pub credit: Decimal,
}

/// Account balance row shared by all reports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountBalance {
    /// Account ID.
    pub account_id: AccountId,
    /// Account code.
    pub code: String,
    /// Account name.
    pub name: String,
    /// Account type.
    pub account_type: AccountType,
    /// Total debit amount.
    pub total_debit: Decimal,
    /// Total credit amount.
    pub total_credit: Decimal,
    /// Signed balance (debit positive).
    pub balance: Decimal,
}

/// Trial balance totals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrialBalanceTotals {
    /// Total debit.
    pub total_debit: Decimal,
    /// Total credit.
    pub total_credit: Decimal,
    /// Whether debits equal credits.
    pub is_balanced: bool,
}

/// Trial balance report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrialBalanceReport {
    /// As-of posting date (inclusive).
    pub as_of: NaiveDate,
    /// Base currency of all amounts.
    pub currency: Currency,
    /// Per-account balances, ordered by account code.
    pub accounts: Vec<AccountBalance>,
    /// Report totals.
    pub totals: TrialBalanceTotals,
}

impl TrialBalanceReport {
    /// Returns the balance row for an account, if it has activity.
    #[must_use]
    pub fn account(&self, account_id: AccountId) -> Option<&AccountBalance> {
        self.accounts.iter().find(|a| a.account_id == account_id)
    }

    /// Returns the signed balance for an account (zero if no activity).
    #[must_use]
    pub fn balance_of(&self, account_id: AccountId) -> Decimal {
        self.account(account_id)
            .map_or(Decimal::ZERO, |a| a.balance)
    }
}

/// One section of the profit and loss statement.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlSection {
    /// Section total (positive in the section's natural direction).
    pub total: Decimal,
    /// Accounts in this section.
    pub accounts: Vec<AccountBalance>,
}

/// Profit and loss report over a posting-date range.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfitAndLossReport {
    /// Period start posting date (inclusive).
    pub period_start: NaiveDate,
    /// Period end posting date (inclusive).
    pub period_end: NaiveDate,
    /// Base currency of all amounts.
    pub currency: Currency,
    /// Revenue section.
    pub revenue: PlSection,
    /// Cost of goods sold section.
    pub cost_of_goods_sold: PlSection,
    /// Gross profit (revenue - COGS).
    pub gross_profit: Decimal,
    /// Operating expense section.
    pub expenses: PlSection,
    /// Net income (gross profit - expenses).
    pub net_income: Decimal,
}

/// Cash position report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CashPositionReport {
    /// As-of posting date (inclusive).
    pub as_of: NaiveDate,
    /// Base currency of all amounts.
    pub currency: Currency,
    /// Cash and bank accounts with activity.
    pub accounts: Vec<AccountBalance>,
    /// Total cash position.
    pub total: Decimal,
}

/// Aging bucket totals keyed by days past due at the as-of date.
///
/// "Current" covers documents not yet due or at most 30 days past due.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AgingBuckets {
    /// Not yet due or up to 30 days past due.
    pub current: Decimal,
    /// 31-60 days past due.
    pub days_31_60: Decimal,
    /// 61-90 days past due.
    pub days_61_90: Decimal,
    /// More than 90 days past due.
    pub days_90_plus: Decimal,
}

impl AgingBuckets {
    /// Returns the sum over all buckets.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.current + self.days_31_60 + self.days_61_90 + self.days_90_plus
    }
}

/// Receivables or payables aging report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgingReport {
    /// Which control account side this report covers.
    pub side: ControlRole,
    /// As-of date buckets were computed against.
    pub as_of: NaiveDate,
    /// Bucketed outstanding document balances.
    pub buckets: AgingBuckets,
    /// Sum over all buckets.
    pub total: Decimal,
    /// Control account balance from the trial balance.
    pub control_balance: Decimal,
    /// Whether the bucket total equals the control account balance.
    pub is_reconciled: bool,
}
