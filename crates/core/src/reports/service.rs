//! Report generation over posted line facts.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use reckon_shared::types::{AccountId, Currency};

use super::types::{
    AccountBalance, AgingBuckets, AgingReport, CashPositionReport, LineFact, PlSection,
    ProfitAndLossReport, TrialBalanceReport, TrialBalanceTotals,
};
use crate::coa::{Account, AccountType, ControlRole};
use crate::subledger::{Document, DocumentStatus};

/// Service for generating financial reports.
///
/// All inputs are posted, non-reversed line facts; the service never
/// looks at subledger tables except for the aging buckets, whose total is
/// checked back against the control account balance.
pub struct ReportService;

impl ReportService {
    /// Generates a trial balance as of a posting date.
    ///
    /// Accounts without activity up to the date are omitted. An optional
    /// account filter restricts the rows (totals then cover only the
    /// filtered rows).
    #[must_use]
    pub fn trial_balance(
        accounts: &[Account],
        facts: &[LineFact],
        as_of: NaiveDate,
        currency: Currency,
        filter: Option<&[AccountId]>,
    ) -> TrialBalanceReport {
        let rows = Self::balances(accounts, facts, |fact| fact.posting_date <= as_of);
        let rows: Vec<AccountBalance> = rows
            .into_iter()
            .filter(|row| filter.is_none_or(|ids| ids.contains(&row.account_id)))
            .collect();

        let total_debit: Decimal = rows.iter().map(|a| a.total_debit).sum();
        let total_credit: Decimal = rows.iter().map(|a| a.total_credit).sum();

        TrialBalanceReport {
            as_of,
            currency,
            accounts: rows,
            totals: TrialBalanceTotals {
                total_debit,
                total_credit,
                is_balanced: total_debit == total_credit,
            },
        }
    }

    /// Generates a profit and loss statement over a posting-date range.
    ///
    /// Only revenue, expense, and cost-of-goods-sold accounts
    /// participate. Section totals are reported in their natural
    /// direction (revenue as credit minus debit, costs as debit minus
    /// credit).
    #[must_use]
    pub fn profit_and_loss(
        accounts: &[Account],
        facts: &[LineFact],
        period_start: NaiveDate,
        period_end: NaiveDate,
        currency: Currency,
    ) -> ProfitAndLossReport {
        let rows = Self::balances(accounts, facts, |fact| {
            fact.posting_date >= period_start && fact.posting_date <= period_end
        });

        let mut revenue = PlSection::default();
        let mut cogs = PlSection::default();
        let mut expenses = PlSection::default();

        for row in rows {
            match row.account_type {
                AccountType::Revenue => {
                    revenue.total += row.total_credit - row.total_debit;
                    revenue.accounts.push(row);
                }
                AccountType::CostOfGoodsSold => {
                    cogs.total += row.total_debit - row.total_credit;
                    cogs.accounts.push(row);
                }
                AccountType::Expense => {
                    expenses.total += row.total_debit - row.total_credit;
                    expenses.accounts.push(row);
                }
                AccountType::Asset | AccountType::Liability | AccountType::Equity => {}
            }
        }

        let gross_profit = revenue.total - cogs.total;
        let net_income = gross_profit - expenses.total;

        ProfitAndLossReport {
            period_start,
            period_end,
            currency,
            revenue,
            cost_of_goods_sold: cogs,
            gross_profit,
            expenses,
            net_income,
        }
    }

    /// Generates the cash position as of a posting date.
    ///
    /// Covers accounts flagged as cash/bank; balances are debit-positive.
    #[must_use]
    pub fn cash_position(
        accounts: &[Account],
        facts: &[LineFact],
        as_of: NaiveDate,
        currency: Currency,
    ) -> CashPositionReport {
        let cash_ids: Vec<AccountId> = accounts
            .iter()
            .filter(|a| a.is_cash)
            .map(|a| a.id)
            .collect();
        let rows: Vec<AccountBalance> =
            Self::balances(accounts, facts, |fact| fact.posting_date <= as_of)
                .into_iter()
                .filter(|row| cash_ids.contains(&row.account_id))
                .collect();

        let total = rows.iter().map(|a| a.balance).sum();

        CashPositionReport {
            as_of,
            currency,
            accounts: rows,
            total,
        }
    }

    /// Buckets outstanding posted documents by days past due and checks
    /// the bucket total against the control account balance.
    ///
    /// The subledger's due dates are only the aging key; the amounts are
    /// the documents' frozen base-currency outstanding balances, which
    /// must sum to the control account's ledger balance.
    #[must_use]
    pub fn aging(
        side: ControlRole,
        documents: &[Document],
        control_balance: Decimal,
        as_of: NaiveDate,
    ) -> AgingReport {
        let mut buckets = AgingBuckets::default();

        for doc in documents {
            if doc.kind.control_role() != Some(side) {
                continue;
            }
            if doc.status == DocumentStatus::Draft {
                continue;
            }
            let outstanding = doc.outstanding_base();
            if outstanding == Decimal::ZERO {
                continue;
            }

            let days_past_due = (as_of - doc.due_date).num_days();
            match days_past_due {
                i64::MIN..=30 => buckets.current += outstanding,
                31..=60 => buckets.days_31_60 += outstanding,
                61..=90 => buckets.days_61_90 += outstanding,
                _ => buckets.days_90_plus += outstanding,
            }
        }

        let total = buckets.total();

        AgingReport {
            side,
            as_of,
            buckets,
            total,
            control_balance,
            is_reconciled: total == control_balance,
        }
    }

    /// Aggregates facts into per-account balance rows, ordered by
    /// account code.
    fn balances<F>(accounts: &[Account], facts: &[LineFact], include: F) -> Vec<AccountBalance>
    where
        F: Fn(&LineFact) -> bool,
    {
        let mut sums: BTreeMap<AccountId, (Decimal, Decimal)> = BTreeMap::new();
        for fact in facts.iter().filter(|f| include(f)) {
            let entry = sums.entry(fact.account_id).or_default();
            entry.0 += fact.debit;
            entry.1 += fact.credit;
        }

        let mut rows: Vec<AccountBalance> = accounts
            .iter()
            .filter_map(|account| {
                sums.get(&account.id).map(|(debit, credit)| AccountBalance {
                    account_id: account.id,
                    code: account.code.clone(),
                    name: account.name.clone(),
                    account_type: account.account_type,
                    total_debit: *debit,
                    total_credit: *credit,
                    balance: *debit - *credit,
                })
            })
            .collect();
        rows.sort_by(|a, b| a.code.cmp(&b.code));
        rows
    }
}
