//! Exchange rate table.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tokio::sync::RwLock;

use reckon_core::currency::{CurrencyError, ExchangeRate};
use reckon_shared::types::Currency;

/// Snapshot of the rate table used during line resolution, keyed by
/// currency pair and effective date.
pub type RateSnapshot = BTreeMap<(Currency, Currency), BTreeMap<NaiveDate, Decimal>>;

/// Looks up the rate effective on or before a date in a snapshot.
#[must_use]
pub fn lookup_in(
    snapshot: &RateSnapshot,
    from: Currency,
    to: Currency,
    date: NaiveDate,
) -> Option<Decimal> {
    snapshot
        .get(&(from, to))
        .and_then(|by_date| by_date.range(..=date).next_back())
        .map(|(_, rate)| *rate)
}

/// In-memory exchange rate table.
///
/// Corrections never rewrite a rate already frozen into a journal line;
/// they only change which rate future postings resolve.
#[derive(Debug, Default)]
pub struct RateTable {
    inner: RwLock<RateSnapshot>,
}

impl RateTable {
    /// Creates an empty rate table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a rate for its pair and effective date.
    ///
    /// # Errors
    ///
    /// Returns `SameCurrencyPair` or `InvalidRate` for malformed rows.
    pub async fn set_rate(&self, rate: ExchangeRate) -> Result<(), CurrencyError> {
        rate.validate()?;
        let mut inner = self.inner.write().await;
        inner
            .entry((rate.from, rate.to))
            .or_default()
            .insert(rate.effective_date, rate.rate);
        Ok(())
    }

    /// Looks up the rate effective on or before `date`.
    pub async fn lookup(&self, from: Currency, to: Currency, date: NaiveDate) -> Option<Decimal> {
        let inner = self.inner.read().await;
        lookup_in(&inner, from, to, date)
    }

    /// Returns a point-in-time copy for use inside a posting transaction.
    pub async fn snapshot(&self) -> RateSnapshot {
        self.inner.read().await.clone()
    }
}
