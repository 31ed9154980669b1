//! Posting coordinator.
//!
//! The single entry point that creates a journal entry together with its
//! lines and the producer's source-document mutation as one atomic unit.
//! Replaces the "create record, then separately create journal entry,
//! then separately flip status" pattern with one all-or-nothing commit:
//! any failure, including a producer callback failure, leaves no draft
//! entry, no partial line set, and no document status flip behind.

use rust_decimal::Decimal;

use reckon_core::currency;
use reckon_core::ledger::{
    self, AuditContext, EntryHeader, LedgerError, LedgerService, LineSpec, ResolvedLine,
    service::AccountInfo,
};
use reckon_core::subledger::{Document, DocumentError, DocumentStatus};
use reckon_shared::types::{ActorId, DocumentId, JournalEntryId};

use crate::engine::LedgerEngine;
use crate::error::{PostingError, ReversalError};
use crate::locks::LockScope;
use crate::rates;

/// Caller-supplied mutation of the source document, executed inside the
/// posting transaction.
pub enum ProducerMutation {
    /// Manual journal entry; no source document to mutate.
    None,
    /// Mutate a subledger document atomically with the posting.
    Document {
        /// The document the posting belongs to.
        id: DocumentId,
        /// The mutation, applied to a staged copy and committed only if
        /// the whole unit commits.
        mutate: Box<dyn FnOnce(&mut Document) -> Result<(), DocumentError> + Send>,
    },
}

impl ProducerMutation {
    /// Mutation that marks a draft document posted (invoice send, bill
    /// approval, payroll disbursement).
    #[must_use]
    pub fn mark_posted(id: DocumentId) -> Self {
        Self::Document {
            id,
            mutate: Box::new(Document::mark_posted),
        }
    }

    /// Mutation that applies a base-currency settlement to a posted
    /// document (payment receipt or disbursement).
    #[must_use]
    pub fn settle(id: DocumentId, amount: Decimal) -> Self {
        Self::Document {
            id,
            mutate: Box::new(move |doc| doc.apply_settlement(amount)),
        }
    }

    /// Arbitrary producer mutation.
    #[must_use]
    pub fn with<F>(id: DocumentId, mutate: F) -> Self
    where
        F: FnOnce(&mut Document) -> Result<(), DocumentError> + Send + 'static,
    {
        Self::Document {
            id,
            mutate: Box::new(mutate),
        }
    }

    fn document_id(&self) -> Option<DocumentId> {
        match self {
            Self::None => None,
            Self::Document { id, .. } => Some(*id),
        }
    }
}

impl std::fmt::Debug for ProducerMutation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => write!(f, "ProducerMutation::None"),
            Self::Document { id, .. } => write!(f, "ProducerMutation::Document({id})"),
        }
    }
}

impl LedgerEngine {
    /// Posts a transaction: journal entry, lines, and the producer's
    /// document mutation, all-or-nothing.
    ///
    /// Retried calls with the same idempotency key return the previously
    /// produced entry id without re-executing anything, even under
    /// concurrent retries: the key is re-checked while the period and
    /// document locks are held.
    ///
    /// # Errors
    ///
    /// Returns `PostingError`; on any error nothing has been persisted.
    #[tracing::instrument(skip_all, fields(idempotency_key = %idempotency_key))]
    pub async fn post_transaction(
        &self,
        idempotency_key: &str,
        header: EntryHeader,
        lines: Vec<LineSpec>,
        producer: ProducerMutation,
    ) -> Result<JournalEntryId, PostingError> {
        // Fast path: already processed.
        if let Some(existing) = self.idempotency_lookup(idempotency_key) {
            tracing::info!(entry_id = %existing, "idempotent replay, returning recorded entry");
            return Ok(existing);
        }

        // Resolve the target period before locking; the date decides the
        // lock scope.
        let period_id = self.periods.check_writable(header.posting_date).await?;

        let wait = self.lock_wait();
        let _period_guard = self
            .locks
            .acquire(LockScope::Period(period_id), wait)
            .await
            .map_err(|scope| PostingError::Busy {
                scope: scope.to_string(),
            })?;
        let _document_guard = match producer.document_id() {
            Some(id) => Some(
                self.locks
                    .acquire(LockScope::Document(id), wait)
                    .await
                    .map_err(|scope| PostingError::Busy {
                        scope: scope.to_string(),
                    })?,
            ),
            None => None,
        };

        // Check-then-act is safe only under the locks: re-check both the
        // idempotency key and the gate now that we hold them.
        if let Some(existing) = self.idempotency_lookup(idempotency_key) {
            tracing::info!(entry_id = %existing, "idempotent replay detected under lock");
            return Ok(existing);
        }
        self.periods.check_writable(header.posting_date).await?;

        // Resolve and validate the lines against point-in-time snapshots.
        let resolved = self.resolve_specs(&lines, header.posting_date).await?;
        ledger::validate_lines(&resolved)?;

        // Stage the producer mutation against a copy of the document.
        let staged = self.stage_producer(producer, &resolved, &header).await?;

        // Commit: posted entry first, then the document flip, then the
        // idempotency record. The locks exclude every competing writer.
        let audit = AuditContext::new(header.created_by);
        let entry = self
            .journal
            .insert_posted(header, period_id, resolved, audit)
            .await?;

        if let Some((mut document, newly_posted)) = staged {
            if newly_posted {
                document.posted_entry = Some(entry.id);
            }
            self.documents.replace(document).await;
        }
        self.idempotency.insert(idempotency_key.to_string(), entry.id);

        tracing::info!(entry_id = %entry.id, entry_no = entry.entry_no, "transaction posted");
        Ok(entry.id)
    }

    /// Reverses a posted entry: creates the posted mirror entry dated at
    /// `posting_date` (today if omitted), marks the original reversed,
    /// and links both ways. The reversal date is itself subject to the
    /// fiscal period gate.
    ///
    /// # Errors
    ///
    /// Returns `ReversalError`.
    #[tracing::instrument(skip(self, actor))]
    pub async fn reverse_entry(
        &self,
        entry_id: JournalEntryId,
        reason: &str,
        actor: ActorId,
        posting_date: Option<chrono::NaiveDate>,
    ) -> Result<JournalEntryId, ReversalError> {
        let original = self
            .journal
            .entry(entry_id)
            .await
            .ok_or(ReversalError::EntryNotFound(entry_id))?;
        ledger::validate_reversible(&original)?;

        let date = posting_date.unwrap_or_else(|| chrono::Utc::now().date_naive());
        let period_id = self.periods.check_writable(date).await?;

        let _period_guard = self
            .locks
            .acquire(LockScope::Period(period_id), self.lock_wait())
            .await
            .map_err(|scope| ReversalError::Busy {
                scope: scope.to_string(),
            })?;
        self.periods.check_writable(date).await?;

        let header = EntryHeader {
            entry_date: date,
            posting_date: date,
            description: ledger::reversal_description(original.entry_no, reason),
            source: original.source,
            created_by: actor,
        };
        let audit = AuditContext::with_reason(actor, reason);

        let mirror = self
            .journal
            .apply_reversal(entry_id, header, period_id, audit)
            .await?;

        tracing::info!(
            original = %entry_id,
            mirror = %mirror.id,
            "journal entry reversed"
        );
        Ok(mirror.id)
    }

    fn idempotency_lookup(&self, key: &str) -> Option<JournalEntryId> {
        self.idempotency.get(key).map(|entry| *entry.value())
    }

    /// Resolves line specs against point-in-time account and rate
    /// snapshots, freezing exchange rates at the posting date.
    pub(crate) async fn resolve_specs(
        &self,
        specs: &[LineSpec],
        posting_date: chrono::NaiveDate,
    ) -> Result<Vec<ResolvedLine>, LedgerError> {
        let accounts = self.accounts.snapshot().await;
        let rate_snapshot = self.rates.snapshot().await;
        let base = self.config().ledger.base_currency;

        let (resolved, _totals) = LedgerService::resolve_lines(
            specs,
            posting_date,
            base,
            |from, to, date| rates::lookup_in(&rate_snapshot, from, to, date),
            |id| {
                accounts
                    .get(&id)
                    .map(|account| AccountInfo {
                        id: account.id,
                        is_active: account.is_active,
                    })
                    .ok_or(LedgerError::AccountNotFound(id))
            },
        )?;
        Ok(resolved)
    }

    /// Runs the producer mutation against a staged copy of its document.
    ///
    /// If the mutation takes the document out of draft, the journal
    /// entry's total must match the document total within the rounding
    /// tolerance, and the document's base-currency total is frozen.
    async fn stage_producer(
        &self,
        producer: ProducerMutation,
        resolved: &[ResolvedLine],
        header: &EntryHeader,
    ) -> Result<Option<(Document, bool)>, PostingError> {
        let ProducerMutation::Document { id, mutate } = producer else {
            return Ok(None);
        };

        let mut document = self
            .documents
            .get(id)
            .await
            .ok_or(PostingError::DocumentNotFound(id))?;
        let was_draft = document.status == DocumentStatus::Draft;

        mutate(&mut document)?;

        let newly_posted = was_draft && document.status != DocumentStatus::Draft;
        if newly_posted {
            let base = self.config().ledger.base_currency;
            let rate = if document.total.currency == base {
                Decimal::ONE
            } else {
                self.rates
                    .lookup(document.total.currency, base, header.posting_date)
                    .await
                    .ok_or(LedgerError::from(
                        reckon_core::currency::CurrencyError::NoRate {
                            from: document.total.currency,
                            to: base,
                            date: header.posting_date,
                        },
                    ))?
            };
            let document_base_total = currency::to_base(document.total.amount, rate);
            let entry_total: Decimal = resolved.iter().map(|line| line.debit).sum();

            Document::validate_entry_total(
                document_base_total,
                entry_total,
                self.config().ledger.document_tolerance,
            )?;
            document.base_total = Some(document_base_total);
        }

        Ok(Some((document, newly_posted)))
    }
}
