//! Line resolution and entry-level validation.
//!
//! This service contains pure business logic with no storage dependencies.
//! It validates line specs, resolves exchange rates, and computes entry
//! totals before anything is persisted.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use reckon_shared::types::{AccountId, Currency, TXN_SCALE};

use super::error::LedgerError;
use super::line::{LineSpec, ResolvedLine, Side};
use crate::currency;

/// Information about an account needed to validate a posting.
#[derive(Debug, Clone)]
pub struct AccountInfo {
    /// The account ID.
    pub id: AccountId,
    /// Whether the account accepts new postings.
    pub is_active: bool,
}

/// Entry totals in base currency.
#[derive(Debug, Clone)]
pub struct EntryTotals {
    /// Total debit amount in base currency.
    pub debit: Decimal,
    /// Total credit amount in base currency.
    pub credit: Decimal,
    /// Whether the entry is balanced (debits == credits).
    pub is_balanced: bool,
}

impl EntryTotals {
    /// Creates totals from debit and credit sums.
    #[must_use]
    pub fn new(debit: Decimal, credit: Decimal) -> Self {
        Self {
            debit,
            credit,
            is_balanced: debit == credit,
        }
    }

    /// Returns the difference between debits and credits.
    #[must_use]
    pub fn difference(&self) -> Decimal {
        self.debit - self.credit
    }
}

/// Stateless service for resolving and validating journal lines.
pub struct LedgerService;

impl LedgerService {
    /// Validates and resolves line specs into postable lines.
    ///
    /// Steps:
    /// 1. Validates each amount (positive, at most 4 decimal places)
    /// 2. Validates each account (exists, active) via the injected lookup
    /// 3. Resolves the exchange rate for the posting date and freezes it
    /// 4. Computes base amounts with half-even rounding at the line level
    /// 5. Computes entry totals
    ///
    /// Balance is NOT enforced here; drafts may be temporarily unbalanced.
    /// `post_entry` enforces it through [`crate::ledger::validate_lines`].
    ///
    /// # Errors
    ///
    /// Returns `LedgerError` if any line fails validation or resolution.
    pub fn resolve_lines<R, A>(
        specs: &[LineSpec],
        posting_date: NaiveDate,
        base_currency: Currency,
        rate_lookup: R,
        account_lookup: A,
    ) -> Result<(Vec<ResolvedLine>, EntryTotals), LedgerError>
    where
        R: Fn(Currency, Currency, NaiveDate) -> Option<Decimal>,
        A: Fn(AccountId) -> Result<AccountInfo, LedgerError>,
    {
        let mut resolved = Vec::with_capacity(specs.len());

        for spec in specs {
            resolved.push(Self::resolve_line(
                spec,
                posting_date,
                base_currency,
                &rate_lookup,
                &account_lookup,
            )?);
        }

        let totals = Self::calculate_totals(&resolved);
        Ok((resolved, totals))
    }

    /// Resolves a single line spec.
    fn resolve_line<R, A>(
        spec: &LineSpec,
        posting_date: NaiveDate,
        base_currency: Currency,
        rate_lookup: &R,
        account_lookup: &A,
    ) -> Result<ResolvedLine, LedgerError>
    where
        R: Fn(Currency, Currency, NaiveDate) -> Option<Decimal>,
        A: Fn(AccountId) -> Result<AccountInfo, LedgerError>,
    {
        if spec.amount == Decimal::ZERO {
            return Err(LedgerError::ZeroAmount);
        }
        if spec.amount < Decimal::ZERO {
            return Err(LedgerError::NegativeAmount);
        }
        if spec.amount.scale() > TXN_SCALE {
            return Err(LedgerError::ScaleTooLarge {
                scale: spec.amount.scale(),
            });
        }

        let account = account_lookup(spec.account_id)?;
        if !account.is_active {
            return Err(LedgerError::AccountInactive(spec.account_id));
        }

        let normalized = currency::normalize(
            spec.amount,
            spec.currency,
            base_currency,
            posting_date,
            rate_lookup,
        )?;

        let (debit, credit) = match spec.side {
            Side::Debit => (normalized.base_amount, Decimal::ZERO),
            Side::Credit => (Decimal::ZERO, normalized.base_amount),
        };

        Ok(ResolvedLine {
            account_id: spec.account_id,
            cost_center_id: spec.cost_center_id,
            currency: spec.currency,
            txn_amount: spec.amount,
            exchange_rate: normalized.exchange_rate,
            base_amount: normalized.base_amount,
            debit,
            credit,
            memo: spec.memo.clone(),
        })
    }

    /// Calculates entry totals from resolved lines.
    #[must_use]
    pub fn calculate_totals(lines: &[ResolvedLine]) -> EntryTotals {
        let debit: Decimal = lines.iter().map(|l| l.debit).sum();
        let credit: Decimal = lines.iter().map(|l| l.credit).sum();
        EntryTotals::new(debit, credit)
    }
}
