//! Currency error types.

use chrono::NaiveDate;
use thiserror::Error;

use reckon_shared::types::Currency;

/// Errors that can occur during currency normalization.
#[derive(Debug, Error)]
pub enum CurrencyError {
    /// No exchange rate is known for the currency pair on the given date.
    #[error("No exchange rate found for {from} to {to} on {date}")]
    NoRate {
        /// Source currency.
        from: Currency,
        /// Target currency.
        to: Currency,
        /// Posting date the rate was looked up for.
        date: NaiveDate,
    },

    /// Exchange rate must be strictly positive.
    #[error("Exchange rate must be positive")]
    InvalidRate,

    /// Source and target currencies must differ.
    #[error("Source and target currencies must be different")]
    SameCurrencyPair,
}

impl CurrencyError {
    /// Returns the stable error code for this error.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NoRate { .. } => "NO_EXCHANGE_RATE",
            Self::InvalidRate => "INVALID_EXCHANGE_RATE",
            Self::SameCurrencyPair => "SAME_CURRENCY_PAIR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CurrencyError::NoRate {
            from: Currency::Eur,
            to: Currency::Usd,
            date: NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
        };
        assert_eq!(
            err.to_string(),
            "No exchange rate found for EUR to USD on 2026-01-15"
        );
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(CurrencyError::InvalidRate.error_code(), "INVALID_EXCHANGE_RATE");
        assert_eq!(
            CurrencyError::SameCurrencyPair.error_code(),
            "SAME_CURRENCY_PAIR"
        );
    }
}
