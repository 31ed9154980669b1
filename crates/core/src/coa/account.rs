//! Account types for the chart of accounts.

use serde::{Deserialize, Serialize};

use reckon_shared::types::AccountId;

/// Account classification.
///
/// Determines the normal balance side and which reports the account
/// participates in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountType {
    /// Asset account (debit normal).
    Asset,
    /// Liability account (credit normal).
    Liability,
    /// Equity account (credit normal).
    Equity,
    /// Revenue account (credit normal).
    Revenue,
    /// Expense account (debit normal).
    Expense,
    /// Cost of goods sold account (debit normal).
    CostOfGoodsSold,
}

impl AccountType {
    /// Returns true if the account's normal balance is on the debit side.
    #[must_use]
    pub const fn is_debit_normal(&self) -> bool {
        matches!(self, Self::Asset | Self::Expense | Self::CostOfGoodsSold)
    }

    /// Returns true if the account type feeds the profit and loss
    /// statement rather than the balance sheet.
    #[must_use]
    pub const fn is_result_type(&self) -> bool {
        matches!(self, Self::Revenue | Self::Expense | Self::CostOfGoodsSold)
    }
}

/// Control-account designation tying a ledger account to a subledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlRole {
    /// Accounts receivable control account (open customer invoices).
    Receivables,
    /// Accounts payable control account (open vendor bills).
    Payables,
}

/// A chart of accounts entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    /// Unique identifier.
    pub id: AccountId,
    /// Unique account code (e.g., "1200").
    pub code: String,
    /// Display name.
    pub name: String,
    /// Account classification.
    pub account_type: AccountType,
    /// Optional parent account forming the account tree.
    pub parent_id: Option<AccountId>,
    /// Whether this account participates in the cash position view.
    pub is_cash: bool,
    /// Control-account designation, if any.
    pub control_role: Option<ControlRole>,
    /// Whether new postings to this account are allowed.
    pub is_active: bool,
}

/// Input for creating an account.
#[derive(Debug, Clone)]
pub struct NewAccount {
    /// Unique account code.
    pub code: String,
    /// Display name.
    pub name: String,
    /// Account classification.
    pub account_type: AccountType,
    /// Optional parent account.
    pub parent_id: Option<AccountId>,
    /// Whether this account participates in the cash position view.
    pub is_cash: bool,
    /// Control-account designation, if any.
    pub control_role: Option<ControlRole>,
}
