//! Engine configuration management.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::types::Currency;

/// Engine configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EngineConfig {
    /// Ledger configuration.
    #[serde(default)]
    pub ledger: LedgerConfig,
    /// Posting coordinator configuration.
    #[serde(default)]
    pub posting: PostingConfig,
    /// Reconciliation job configuration.
    #[serde(default)]
    pub reconciliation: ReconciliationConfig,
}

/// Ledger configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LedgerConfig {
    /// Base (functional) currency all lines are normalized into.
    #[serde(default = "default_base_currency")]
    pub base_currency: Currency,
    /// Rounding tolerance when matching a subledger document total
    /// against its journal entry total.
    #[serde(default = "default_document_tolerance")]
    pub document_tolerance: Decimal,
}

fn default_base_currency() -> Currency {
    Currency::Usd
}

fn default_document_tolerance() -> Decimal {
    // one cent
    Decimal::new(1, 2)
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            base_currency: default_base_currency(),
            document_tolerance: default_document_tolerance(),
        }
    }
}

/// Posting coordinator configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct PostingConfig {
    /// Maximum time to wait for a period or document lock before the
    /// operation fails with a retryable busy error.
    #[serde(default = "default_lock_wait_ms")]
    pub lock_wait_ms: u64,
}

fn default_lock_wait_ms() -> u64 {
    5_000
}

impl Default for PostingConfig {
    fn default() -> Self {
        Self {
            lock_wait_ms: default_lock_wait_ms(),
        }
    }
}

/// Reconciliation job configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ReconciliationConfig {
    /// Absolute variance at or below which a control account is
    /// considered reconciled.
    #[serde(default = "default_tolerance")]
    pub tolerance: Decimal,
    /// Absolute variance above which a discrepancy is critical and the
    /// run is marked failed.
    #[serde(default = "default_critical_variance")]
    pub critical_variance: Decimal,
}

fn default_tolerance() -> Decimal {
    // one cent
    Decimal::new(1, 2)
}

fn default_critical_variance() -> Decimal {
    Decimal::new(1_000_00, 2)
}

impl Default for ReconciliationConfig {
    fn default() -> Self {
        Self {
            tolerance: default_tolerance(),
            critical_variance: default_critical_variance(),
        }
    }
}

impl EngineConfig {
    /// Loads configuration from environment and config files.
    ///
    /// Layering order (later wins): `config/default.toml`,
    /// `config/<RUN_MODE>.toml`, then `RECKON__`-prefixed environment
    /// variables.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded or parsed.
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenvy::dotenv().ok();

        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("RECKON").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
