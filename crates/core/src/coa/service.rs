//! Chart of accounts validation rules.
//!
//! This service contains pure business logic with no storage dependencies.
//! Registry lookups are injected as closures.

use reckon_shared::types::AccountId;

use super::account::{Account, AccountType, NewAccount};
use super::error::CoaError;

/// Stateless service enforcing chart of accounts rules.
pub struct CoaService;

impl CoaService {
    /// Validates a new account before it is inserted into the registry.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateCode` if an account with the same code exists, or
    /// `ParentNotFound` if the referenced parent is unknown.
    pub fn validate_create<C, P>(
        input: &NewAccount,
        code_exists: C,
        parent_exists: P,
    ) -> Result<(), CoaError>
    where
        C: Fn(&str) -> bool,
        P: Fn(AccountId) -> bool,
    {
        if code_exists(&input.code) {
            return Err(CoaError::DuplicateCode(input.code.clone()));
        }

        if let Some(parent_id) = input.parent_id {
            if !parent_exists(parent_id) {
                return Err(CoaError::ParentNotFound(parent_id));
            }
        }

        Ok(())
    }

    /// Validates that an account may be deactivated.
    ///
    /// Deactivation only blocks new postings; it never invalidates
    /// history. It is refused while non-reversed posted lines reference
    /// the account inside an open or locked period.
    ///
    /// # Errors
    ///
    /// Returns `AlreadyInactive` or `AccountInUse`.
    pub fn validate_deactivate<R>(account: &Account, has_active_reference: R) -> Result<(), CoaError>
    where
        R: Fn(AccountId) -> bool,
    {
        if !account.is_active {
            return Err(CoaError::AlreadyInactive(account.id));
        }

        if has_active_reference(account.id) {
            return Err(CoaError::AccountInUse(account.id));
        }

        Ok(())
    }

    /// Validates an account type change.
    ///
    /// The type is frozen once the account has at least one posted line,
    /// so historical results can never be silently reclassified.
    ///
    /// # Errors
    ///
    /// Returns `TypeLocked` if the account has posted lines.
    pub fn validate_type_change<L>(
        account: &Account,
        new_type: AccountType,
        has_posted_lines: L,
    ) -> Result<(), CoaError>
    where
        L: Fn(AccountId) -> bool,
    {
        if account.account_type == new_type {
            return Ok(());
        }

        if has_posted_lines(account.id) {
            return Err(CoaError::TypeLocked(account.id));
        }

        Ok(())
    }
}
