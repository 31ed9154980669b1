//! Exchange rate types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use reckon_shared::types::Currency;

use super::error::CurrencyError;

/// An exchange rate effective from a given date.
///
/// Rates are insert-only per (pair, effective date); a correction is a new
/// rate row, never an update of an old one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExchangeRate {
    /// Source currency.
    pub from: Currency,
    /// Target currency.
    pub to: Currency,
    /// Units of `to` per one unit of `from`.
    pub rate: Decimal,
    /// First date this rate applies to.
    pub effective_date: NaiveDate,
}

impl ExchangeRate {
    /// Validates the rate row.
    ///
    /// # Errors
    ///
    /// Returns `SameCurrencyPair` if `from == to` or `InvalidRate` if the
    /// rate is not strictly positive.
    pub fn validate(&self) -> Result<(), CurrencyError> {
        if self.from == self.to {
            return Err(CurrencyError::SameCurrencyPair);
        }
        if self.rate <= Decimal::ZERO {
            return Err(CurrencyError::InvalidRate);
        }
        Ok(())
    }
}
