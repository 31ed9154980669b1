//! Multi-currency normalization.
//!
//! Transaction-currency amounts are converted to the ledger's base
//! currency at posting time. The rate used is frozen into the journal
//! line; later rate corrections never rewrite history.

pub mod error;
pub mod normalizer;
pub mod rate;

pub use error::CurrencyError;
pub use normalizer::{Normalized, normalize, to_base};
pub use rate::ExchangeRate;
