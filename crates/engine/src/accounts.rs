//! Account registry.

use std::collections::HashMap;

use tokio::sync::RwLock;

use reckon_core::coa::{Account, AccountType, CoaError, CoaService, NewAccount};
use reckon_shared::types::AccountId;

#[derive(Debug, Default)]
struct AccountInner {
    accounts: HashMap<AccountId, Account>,
    by_code: HashMap<String, AccountId>,
}

/// In-memory chart of accounts registry.
#[derive(Debug, Default)]
pub struct AccountRegistry {
    inner: RwLock<AccountInner>,
}

impl AccountRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an account.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateCode` or `ParentNotFound`.
    pub async fn create(&self, input: NewAccount) -> Result<Account, CoaError> {
        let mut inner = self.inner.write().await;

        CoaService::validate_create(
            &input,
            |code| inner.by_code.contains_key(code),
            |parent_id| inner.accounts.contains_key(&parent_id),
        )?;

        let account = Account {
            id: AccountId::new(),
            code: input.code,
            name: input.name,
            account_type: input.account_type,
            parent_id: input.parent_id,
            is_cash: input.is_cash,
            control_role: input.control_role,
            is_active: true,
        };
        inner.by_code.insert(account.code.clone(), account.id);
        inner.accounts.insert(account.id, account.clone());
        Ok(account)
    }

    /// Returns an account by id.
    pub async fn get(&self, id: AccountId) -> Option<Account> {
        self.inner.read().await.accounts.get(&id).cloned()
    }

    /// Returns all accounts, ordered by code.
    pub async fn list(&self) -> Vec<Account> {
        let inner = self.inner.read().await;
        let mut accounts: Vec<Account> = inner.accounts.values().cloned().collect();
        accounts.sort_by(|a, b| a.code.cmp(&b.code));
        accounts
    }

    /// Returns a point-in-time copy keyed by id for use inside a posting
    /// transaction.
    pub async fn snapshot(&self) -> HashMap<AccountId, Account> {
        self.inner.read().await.accounts.clone()
    }

    /// Deactivates an account, blocking new postings to it.
    ///
    /// `in_use` is the precomputed answer to "do non-reversed posted
    /// lines reference this account within an open or locked period".
    ///
    /// # Errors
    ///
    /// Returns `AccountNotFound`, `AlreadyInactive`, or `AccountInUse`.
    pub async fn deactivate(&self, id: AccountId, in_use: bool) -> Result<Account, CoaError> {
        let mut inner = self.inner.write().await;
        let account = inner
            .accounts
            .get(&id)
            .cloned()
            .ok_or(CoaError::AccountNotFound(id))?;

        CoaService::validate_deactivate(&account, |_| in_use)?;

        let account = inner
            .accounts
            .get_mut(&id)
            .ok_or(CoaError::AccountNotFound(id))?;
        account.is_active = false;
        Ok(account.clone())
    }

    /// Reactivates a previously deactivated account.
    ///
    /// # Errors
    ///
    /// Returns `AccountNotFound`.
    pub async fn reactivate(&self, id: AccountId) -> Result<Account, CoaError> {
        let mut inner = self.inner.write().await;
        let account = inner
            .accounts
            .get_mut(&id)
            .ok_or(CoaError::AccountNotFound(id))?;
        account.is_active = true;
        Ok(account.clone())
    }

    /// Changes an account's type.
    ///
    /// `has_posted_lines` is the precomputed answer to "does any posted
    /// journal line reference this account"; once true, the type is
    /// locked forever.
    ///
    /// # Errors
    ///
    /// Returns `AccountNotFound` or `TypeLocked`.
    pub async fn change_type(
        &self,
        id: AccountId,
        new_type: AccountType,
        has_posted_lines: bool,
    ) -> Result<Account, CoaError> {
        let mut inner = self.inner.write().await;
        let account = inner
            .accounts
            .get(&id)
            .cloned()
            .ok_or(CoaError::AccountNotFound(id))?;

        CoaService::validate_type_change(&account, new_type, |_| has_posted_lines)?;

        let account = inner
            .accounts
            .get_mut(&id)
            .ok_or(CoaError::AccountNotFound(id))?;
        account.account_type = new_type;
        Ok(account.clone())
    }
}
