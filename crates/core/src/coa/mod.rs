//! Chart of accounts rules.
//!
//! This module defines the account registry types and the validation rules
//! for creating, deactivating, and protecting accounts:
//! - Account codes are unique
//! - Account type is frozen once the account has posted activity
//! - Referenced accounts are never hard-deleted, only deactivated

pub mod account;
pub mod error;
pub mod service;

pub use account::{Account, AccountType, ControlRole, NewAccount};
pub use error::CoaError;
pub use service::CoaService;
