//! Conversion of transaction amounts into base currency.
//!
//! CRITICAL rounding rules for multi-currency:
//! - Base amounts are rounded to the ledger scale at the LINE level, never
//!   at the entry-total level, so summed lines are reproducible
//! - Banker's rounding (round half to even) minimizes cumulative drift

use chrono::NaiveDate;
use rust_decimal::prelude::*;

use reckon_shared::types::{BASE_SCALE, Currency};

use super::error::CurrencyError;

/// Result of normalizing one transaction amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Normalized {
    /// The rate that was applied, frozen into the journal line.
    pub exchange_rate: Decimal,
    /// The base-currency amount at ledger scale.
    pub base_amount: Decimal,
}

/// Converts an amount to base currency using the given rate.
///
/// Rounds half-even to the ledger scale (2 decimal places).
#[must_use]
pub fn to_base(amount: Decimal, rate: Decimal) -> Decimal {
    (amount * rate).round_dp_with_strategy(BASE_SCALE, RoundingStrategy::MidpointNearestEven)
}

/// Normalizes a transaction-currency amount into base currency as of a
/// posting date.
///
/// Base-currency amounts use rate 1 exactly; other currencies resolve a
/// rate through `rate_lookup` (the rate effective on or before `as_of`).
///
/// # Errors
///
/// Returns `NoRate` if the lookup yields nothing, or `InvalidRate` if it
/// yields a non-positive rate.
pub fn normalize<R>(
    amount: Decimal,
    currency: Currency,
    base_currency: Currency,
    as_of: NaiveDate,
    rate_lookup: R,
) -> Result<Normalized, CurrencyError>
where
    R: Fn(Currency, Currency, NaiveDate) -> Option<Decimal>,
{
    let exchange_rate = if currency == base_currency {
        Decimal::ONE
    } else {
        let rate = rate_lookup(currency, base_currency, as_of).ok_or(CurrencyError::NoRate {
            from: currency,
            to: base_currency,
            date: as_of,
        })?;
        if rate <= Decimal::ZERO {
            return Err(CurrencyError::InvalidRate);
        }
        rate
    };

    Ok(Normalized {
        exchange_rate,
        base_amount: to_base(amount, exchange_rate),
    })
}
