//! The ledger engine: wiring, administration, and the draft entry flow.

use std::time::Duration;

use dashmap::DashMap;
use tokio::sync::{RwLock, broadcast};

use reckon_core::coa::{Account, AccountType, CoaError, NewAccount};
use reckon_core::currency::{CurrencyError, ExchangeRate};
use reckon_core::fiscal::{FiscalError, FiscalPeriod, NewPeriod, PeriodAuditEvent, PeriodStatus};
use reckon_core::ledger::{AuditContext, EntryHeader, JournalEntry, JournalLine, LineSpec};
use reckon_core::recon::ReconciliationRun;
use reckon_core::subledger::{Document, NewDocument};
use reckon_shared::config::EngineConfig;
use reckon_shared::types::{
    AccountId, ActorId, DocumentId, FiscalPeriodId, JournalEntryId, JournalLineId,
};

use crate::accounts::AccountRegistry;
use crate::documents::DocumentStore;
use crate::error::{PeriodAdminError, PostingError};
use crate::journal::JournalStore;
use crate::locks::{LockRegistry, LockScope};
use crate::periods::PeriodStore;
use crate::rates::RateTable;
use crate::recon::ReconciliationAlert;

/// The shared, concurrently-accessed ledger engine.
///
/// Wrap it in an `Arc` and clone the handle into every producer task.
pub struct LedgerEngine {
    config: EngineConfig,
    pub(crate) accounts: AccountRegistry,
    pub(crate) periods: PeriodStore,
    pub(crate) rates: RateTable,
    pub(crate) documents: DocumentStore,
    pub(crate) journal: JournalStore,
    pub(crate) idempotency: DashMap<String, JournalEntryId>,
    pub(crate) locks: LockRegistry,
    pub(crate) alerts: broadcast::Sender<ReconciliationAlert>,
    pub(crate) runs: RwLock<Vec<ReconciliationRun>>,
}

impl LedgerEngine {
    /// Creates an engine with the given configuration.
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        let (alerts, _) = broadcast::channel(64);
        Self {
            config,
            accounts: AccountRegistry::new(),
            periods: PeriodStore::new(),
            rates: RateTable::new(),
            documents: DocumentStore::new(),
            journal: JournalStore::new(),
            idempotency: DashMap::new(),
            locks: LockRegistry::new(),
            alerts,
            runs: RwLock::new(Vec::new()),
        }
    }

    /// Returns the engine configuration.
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub(crate) fn lock_wait(&self) -> Duration {
        Duration::from_millis(self.config.posting.lock_wait_ms)
    }

    // ========== Chart of accounts ==========

    /// Creates an account.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateCode` or `ParentNotFound`.
    pub async fn create_account(&self, input: NewAccount) -> Result<Account, CoaError> {
        self.accounts.create(input).await
    }

    /// Deactivates an account, blocking new postings to it.
    ///
    /// Refused while non-reversed posted lines reference the account
    /// inside an open or locked period; history is never invalidated.
    ///
    /// # Errors
    ///
    /// Returns `AccountNotFound`, `AlreadyInactive`, or `AccountInUse`.
    pub async fn deactivate_account(&self, id: AccountId) -> Result<Account, CoaError> {
        let statuses = self.periods.statuses().await;
        let in_use = self
            .journal
            .has_active_reference(id, |period_id| {
                statuses
                    .get(&period_id)
                    .is_some_and(|status| *status != PeriodStatus::Closed)
            })
            .await;
        self.accounts.deactivate(id, in_use).await
    }

    /// Reactivates a previously deactivated account.
    ///
    /// # Errors
    ///
    /// Returns `AccountNotFound`.
    pub async fn reactivate_account(&self, id: AccountId) -> Result<Account, CoaError> {
        self.accounts.reactivate(id).await
    }

    /// Changes an account's type. Refused once the account has any
    /// posted line, so historical results cannot be silently
    /// reclassified.
    ///
    /// # Errors
    ///
    /// Returns `AccountNotFound` or `TypeLocked`.
    pub async fn change_account_type(
        &self,
        id: AccountId,
        new_type: AccountType,
    ) -> Result<Account, CoaError> {
        let has_posted_lines = self.journal.has_posted_lines(id).await;
        self.accounts.change_type(id, new_type, has_posted_lines).await
    }

    /// Returns an account by id.
    pub async fn account(&self, id: AccountId) -> Option<Account> {
        self.accounts.get(id).await
    }

    /// Returns all accounts ordered by code.
    pub async fn list_accounts(&self) -> Vec<Account> {
        self.accounts.list().await
    }

    // ========== Fiscal periods ==========

    /// Adds a fiscal period (contiguous with existing ones).
    ///
    /// # Errors
    ///
    /// Returns `InvalidDateRange`, `OverlappingPeriod`, or
    /// `NonContiguous`.
    pub async fn add_period(&self, input: NewPeriod) -> Result<FiscalPeriod, FiscalError> {
        self.periods.add_period(input).await
    }

    /// Adds twelve open monthly periods for a calendar year.
    ///
    /// # Errors
    ///
    /// Returns the first period-validation failure.
    pub async fn add_calendar_year(&self, year: i32) -> Result<Vec<FiscalPeriod>, FiscalError> {
        self.periods.add_calendar_year(year).await
    }

    /// Returns a period by id.
    pub async fn period(&self, id: FiscalPeriodId) -> Option<FiscalPeriod> {
        self.periods.get(id).await
    }

    /// Closes an open period. Serialized against in-flight postings via
    /// the period lock.
    ///
    /// # Errors
    ///
    /// Returns `Busy` while a posting holds the period, or the
    /// transition failure.
    pub async fn close_period(
        &self,
        id: FiscalPeriodId,
        audit: AuditContext,
    ) -> Result<FiscalPeriod, PeriodAdminError> {
        self.transition_period(id, PeriodStatus::Closed, audit).await
    }

    /// Locks a closed period.
    ///
    /// # Errors
    ///
    /// Returns `Busy` or the transition failure.
    pub async fn lock_period(
        &self,
        id: FiscalPeriodId,
        audit: AuditContext,
    ) -> Result<FiscalPeriod, PeriodAdminError> {
        self.transition_period(id, PeriodStatus::Locked, audit).await
    }

    /// Reopens a closed or locked period. Administrative, audited, and
    /// requires a reason.
    ///
    /// # Errors
    ///
    /// Returns `Busy`, `ReopenReasonRequired`, or the transition
    /// failure.
    pub async fn reopen_period(
        &self,
        id: FiscalPeriodId,
        audit: AuditContext,
    ) -> Result<FiscalPeriod, PeriodAdminError> {
        self.transition_period(id, PeriodStatus::Open, audit).await
    }

    /// Returns the append-only period transition audit log.
    pub async fn period_audit_log(&self) -> Vec<PeriodAuditEvent> {
        self.periods.audit_log().await
    }

    async fn transition_period(
        &self,
        id: FiscalPeriodId,
        to: PeriodStatus,
        audit: AuditContext,
    ) -> Result<FiscalPeriod, PeriodAdminError> {
        let _guard = self
            .locks
            .acquire(LockScope::Period(id), self.lock_wait())
            .await
            .map_err(|scope| PeriodAdminError::Busy {
                scope: scope.to_string(),
            })?;

        let period = self.periods.transition(id, to, audit).await?;
        tracing::info!(period = %period.name, status = %period.status, "fiscal period transitioned");
        Ok(period)
    }

    // ========== Exchange rates ==========

    /// Stores an exchange rate for its pair and effective date.
    ///
    /// # Errors
    ///
    /// Returns `SameCurrencyPair` or `InvalidRate`.
    pub async fn set_rate(&self, rate: ExchangeRate) -> Result<(), CurrencyError> {
        self.rates.set_rate(rate).await
    }

    // ========== Subledger documents ==========

    /// Registers a producer's draft document.
    pub async fn register_document(&self, input: NewDocument) -> Document {
        self.documents.register(input).await
    }

    /// Returns a document by id.
    pub async fn document(&self, id: DocumentId) -> Option<Document> {
        self.documents.get(id).await
    }

    /// Returns all documents.
    pub async fn list_documents(&self) -> Vec<Document> {
        self.documents.list().await
    }

    // ========== Draft entry flow ==========

    /// Creates a draft journal entry. The posting date must fall in a
    /// defined period, but writability is enforced at posting time.
    ///
    /// # Errors
    ///
    /// Returns `NoPeriodDefined`.
    pub async fn create_draft_entry(
        &self,
        header: EntryHeader,
    ) -> Result<JournalEntryId, PostingError> {
        let period = self
            .periods
            .period_for_date(header.posting_date)
            .await
            .ok_or(FiscalError::NoPeriodDefined(header.posting_date))
            .map_err(PostingError::from)?;
        let entry = self.journal.create_draft(header, period.id).await;
        Ok(entry.id)
    }

    /// Adds a line to a draft entry, freezing the exchange rate at the
    /// entry's posting date.
    ///
    /// # Errors
    ///
    /// Returns line validation failures, or `EntryAlreadyPosted` if the
    /// caller bypassed the immutability contract (logged as an error).
    pub async fn add_line(
        &self,
        entry_id: JournalEntryId,
        spec: LineSpec,
    ) -> Result<JournalLineId, PostingError> {
        let entry = self
            .journal
            .entry(entry_id)
            .await
            .ok_or(reckon_core::ledger::LedgerError::EntryNotFound(entry_id))
            .map_err(PostingError::from)?;

        let mut resolved = self
            .resolve_specs(std::slice::from_ref(&spec), entry.posting_date)
            .await
            .map_err(PostingError::from)?;
        let Some(line) = resolved.pop() else {
            return Err(PostingError::Ledger(
                reckon_core::ledger::LedgerError::EmptyEntry,
            ));
        };

        match self.journal.add_line(entry_id, line).await {
            Ok(line_id) => Ok(line_id),
            Err(err) => {
                if err.is_contract_violation() {
                    tracing::error!(entry_id = %entry_id, "mutation attempted against a posted entry");
                }
                Err(err.into())
            }
        }
    }

    /// Posts a draft entry: validates the balance invariant and the
    /// fiscal gate under the period lock, then flips the entry
    /// immutable.
    ///
    /// # Errors
    ///
    /// Returns `Unbalanced`, `EmptyEntry`, `PeriodClosed`/`PeriodLocked`,
    /// `EntryAlreadyPosted`, or `Busy`.
    pub async fn post_entry(
        &self,
        entry_id: JournalEntryId,
        actor: ActorId,
    ) -> Result<(), PostingError> {
        let entry = self
            .journal
            .entry(entry_id)
            .await
            .ok_or(reckon_core::ledger::LedgerError::EntryNotFound(entry_id))
            .map_err(PostingError::from)?;

        let period_id = self.periods.check_writable(entry.posting_date).await?;
        let _guard = self
            .locks
            .acquire(LockScope::Period(period_id), self.lock_wait())
            .await
            .map_err(|scope| PostingError::Busy {
                scope: scope.to_string(),
            })?;
        // the period could have closed between check and lock
        self.periods.check_writable(entry.posting_date).await?;

        let posted = self.journal.post(entry_id, AuditContext::new(actor)).await?;
        tracing::info!(entry_id = %posted.id, entry_no = posted.entry_no, "journal entry posted");
        Ok(())
    }

    /// Removes a draft entry and its lines. Posted entries are refused;
    /// they can only be undone by reversal.
    ///
    /// # Errors
    ///
    /// Returns `EntryNotFound` or `EntryAlreadyPosted`.
    pub async fn remove_draft_entry(&self, entry_id: JournalEntryId) -> Result<(), PostingError> {
        self.journal.remove_draft(entry_id).await.map_err(Into::into)
    }

    /// Returns a journal entry by id.
    pub async fn entry(&self, id: JournalEntryId) -> Option<JournalEntry> {
        self.journal.entry(id).await
    }

    /// Returns the lines of a journal entry.
    pub async fn entry_lines(&self, id: JournalEntryId) -> Vec<JournalLine> {
        self.journal.lines(id).await
    }
}
