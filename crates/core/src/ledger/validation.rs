//! Balance validation for journal entries.

use rust_decimal::Decimal;

use super::error::LedgerError;
use super::line::ResolvedLine;

/// Validates that a set of resolved lines forms a postable entry.
///
/// Rules:
/// - at least 2 lines
/// - every line has exactly one of debit/credit set, strictly positive
/// - sum of debits equals sum of credits exactly in base currency
///   (base amounts are fixed at 2 decimal places, so equality is exact,
///   not tolerance-based)
///
/// # Errors
///
/// Returns the first violated rule.
pub fn validate_lines(lines: &[ResolvedLine]) -> Result<(), LedgerError> {
    if lines.len() < 2 {
        return Err(LedgerError::EmptyEntry);
    }

    let mut total_debit = Decimal::ZERO;
    let mut total_credit = Decimal::ZERO;

    for line in lines {
        let debit_set = line.debit != Decimal::ZERO;
        let credit_set = line.credit != Decimal::ZERO;
        if debit_set == credit_set {
            return Err(LedgerError::InvalidLineSide);
        }
        if line.debit < Decimal::ZERO || line.credit < Decimal::ZERO {
            return Err(LedgerError::NegativeAmount);
        }

        total_debit += line.debit;
        total_credit += line.credit;
    }

    if total_debit != total_credit {
        return Err(LedgerError::Unbalanced {
            debit: total_debit,
            credit: total_credit,
        });
    }

    Ok(())
}
