//! Reversal construction.
//!
//! A reversal is a new entry whose lines exactly mirror the original
//! (debit and credit swapped, same accounts, amounts, and frozen rates).
//! Posting the original and its reversal nets every account to zero.
//! This is the only way to undo a posted entry.

use rust_decimal::Decimal;

use super::entry::JournalEntry;
use super::error::ReversalError;
use super::line::{JournalLine, ResolvedLine};

/// Validates that an entry may be reversed.
///
/// # Errors
///
/// Returns `NotPosted` for drafts or `AlreadyReversed` if a reversal
/// already exists.
pub fn validate_reversible(entry: &JournalEntry) -> Result<(), ReversalError> {
    if !entry.posted {
        return Err(ReversalError::NotPosted(entry.id));
    }
    if entry.reversed {
        return Err(ReversalError::AlreadyReversed(entry.id));
    }
    Ok(())
}

/// Builds the mirror lines for a reversal entry.
///
/// Debits become credits and vice versa; accounts, cost centers,
/// transaction amounts, and frozen exchange rates are preserved. Memos
/// are prefixed so the trail stays readable.
#[must_use]
pub fn build_reversal_lines(original: &[JournalLine]) -> Vec<ResolvedLine> {
    original
        .iter()
        .map(|line| {
            let memo = match &line.memo {
                Some(memo) => format!("Reversal: {memo}"),
                None => "Reversal".to_string(),
            };
            ResolvedLine {
                account_id: line.account_id,
                cost_center_id: line.cost_center_id,
                currency: line.currency,
                txn_amount: line.txn_amount,
                exchange_rate: line.exchange_rate,
                base_amount: line.base_amount,
                debit: line.credit,
                credit: line.debit,
                memo: Some(memo),
            }
        })
        .collect()
}

/// Builds the description for a reversal entry.
#[must_use]
pub fn reversal_description(original_entry_no: i64, reason: &str) -> String {
    format!("Reversal of entry #{original_entry_no}. Reason: {reason}")
}

/// Returns the net base-currency contribution of a line set per account,
/// as (debit total, credit total). Used to verify mirror correctness.
#[must_use]
pub fn line_totals(lines: &[ResolvedLine]) -> (Decimal, Decimal) {
    let debit = lines.iter().map(|l| l.debit).sum();
    let credit = lines.iter().map(|l| l.credit).sum();
    (debit, credit)
}
