//! Journal line types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use reckon_shared::types::{AccountId, CostCenterId, Currency, JournalEntryId, JournalLineId};

/// Side of a journal line: debit or credit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// Debit entry.
    Debit,
    /// Credit entry.
    Credit,
}

impl Side {
    /// Returns the opposite side.
    #[must_use]
    pub const fn opposite(&self) -> Self {
        match self {
            Self::Debit => Self::Credit,
            Self::Credit => Self::Debit,
        }
    }
}

/// Caller-supplied input for a single journal line.
///
/// Amounts are in the transaction currency; the engine resolves the
/// exchange rate and base amount at posting time.
#[derive(Debug, Clone)]
pub struct LineSpec {
    /// The account to post to.
    pub account_id: AccountId,
    /// Optional cost center tag.
    pub cost_center_id: Option<CostCenterId>,
    /// Debit or credit.
    pub side: Side,
    /// Amount in transaction currency (must be positive).
    pub amount: Decimal,
    /// Transaction currency.
    pub currency: Currency,
    /// Optional memo for this line.
    pub memo: Option<String>,
}

/// A line after validation and currency normalization.
///
/// The exchange rate is frozen here and never recomputed.
#[derive(Debug, Clone)]
pub struct ResolvedLine {
    /// The account to post to.
    pub account_id: AccountId,
    /// Optional cost center tag.
    pub cost_center_id: Option<CostCenterId>,
    /// Transaction currency.
    pub currency: Currency,
    /// Amount in transaction currency.
    pub txn_amount: Decimal,
    /// The frozen exchange rate (transaction to base).
    pub exchange_rate: Decimal,
    /// Amount in base currency at ledger scale.
    pub base_amount: Decimal,
    /// Debit amount in base currency (zero if credit).
    pub debit: Decimal,
    /// Credit amount in base currency (zero if debit).
    pub credit: Decimal,
    /// Optional memo.
    pub memo: Option<String>,
}

impl ResolvedLine {
    /// Returns which side this line is on.
    #[must_use]
    pub fn side(&self) -> Side {
        if self.debit > Decimal::ZERO {
            Side::Debit
        } else {
            Side::Credit
        }
    }
}

/// A persisted journal line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalLine {
    /// Unique identifier.
    pub id: JournalLineId,
    /// Parent journal entry.
    pub entry_id: JournalEntryId,
    /// The account posted to.
    pub account_id: AccountId,
    /// Optional cost center tag.
    pub cost_center_id: Option<CostCenterId>,
    /// Transaction currency.
    pub currency: Currency,
    /// Amount in transaction currency.
    pub txn_amount: Decimal,
    /// The frozen exchange rate (transaction to base).
    pub exchange_rate: Decimal,
    /// Amount in base currency at ledger scale.
    pub base_amount: Decimal,
    /// Debit amount in base currency (zero if credit).
    pub debit: Decimal,
    /// Credit amount in base currency (zero if debit).
    pub credit: Decimal,
    /// Optional memo.
    pub memo: Option<String>,
}

impl JournalLine {
    /// Builds a persisted line from a resolved line.
    #[must_use]
    pub fn from_resolved(entry_id: JournalEntryId, resolved: ResolvedLine) -> Self {
        Self {
            id: JournalLineId::new(),
            entry_id,
            account_id: resolved.account_id,
            cost_center_id: resolved.cost_center_id,
            currency: resolved.currency,
            txn_amount: resolved.txn_amount,
            exchange_rate: resolved.exchange_rate,
            base_amount: resolved.base_amount,
            debit: resolved.debit,
            credit: resolved.credit,
            memo: resolved.memo,
        }
    }

    /// Returns which side this line is on.
    #[must_use]
    pub fn side(&self) -> Side {
        if self.debit > Decimal::ZERO {
            Side::Debit
        } else {
            Side::Credit
        }
    }

    /// Re-projects the line into its resolved form, e.g. for balance
    /// re-validation or reversal construction.
    #[must_use]
    pub fn to_resolved(&self) -> ResolvedLine {
        ResolvedLine {
            account_id: self.account_id,
            cost_center_id: self.cost_center_id,
            currency: self.currency,
            txn_amount: self.txn_amount,
            exchange_rate: self.exchange_rate,
            base_amount: self.base_amount,
            debit: self.debit,
            credit: self.credit,
            memo: self.memo.clone(),
        }
    }
}
