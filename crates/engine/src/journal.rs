//! Journal entry and line store.
//!
//! This store is the sole mutator of journal entries and lines. Posted
//! entries are immutable; the only permitted follow-up is a reversal,
//! applied atomically under the store's write guard so readers observe
//! whole commits or nothing. There is no delete for posted entries and no
//! in-place mutation API at all.

use std::collections::HashMap;

use tokio::sync::RwLock;

use reckon_core::ledger::{
    self, AuditContext, EntryHeader, JournalEntry, JournalLine, LedgerError, ResolvedLine,
};
use reckon_core::reports::LineFact;
use reckon_shared::types::{AccountId, FiscalPeriodId, JournalEntryId, JournalLineId};

use crate::error::ReversalError;

#[derive(Debug, Default)]
struct JournalInner {
    entries: HashMap<JournalEntryId, JournalEntry>,
    lines: HashMap<JournalEntryId, Vec<JournalLine>>,
    next_entry_no: i64,
}

impl JournalInner {
    fn take_entry_no(&mut self) -> i64 {
        self.next_entry_no += 1;
        self.next_entry_no
    }
}

/// In-memory journal store.
#[derive(Debug, Default)]
pub struct JournalStore {
    inner: RwLock<JournalInner>,
}

impl JournalStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a draft entry. No balance constraint applies yet.
    pub async fn create_draft(
        &self,
        header: EntryHeader,
        fiscal_period_id: FiscalPeriodId,
    ) -> JournalEntry {
        let mut inner = self.inner.write().await;
        let entry_no = inner.take_entry_no();
        let entry = JournalEntry::draft(entry_no, header, fiscal_period_id);
        inner.lines.insert(entry.id, Vec::new());
        inner.entries.insert(entry.id, entry.clone());
        entry
    }

    /// Adds a resolved line to a draft entry.
    ///
    /// # Errors
    ///
    /// Returns `EntryNotFound`, or `EntryAlreadyPosted` if the entry is
    /// posted (a caller contract violation).
    pub async fn add_line(
        &self,
        entry_id: JournalEntryId,
        line: ResolvedLine,
    ) -> Result<JournalLineId, LedgerError> {
        let mut inner = self.inner.write().await;
        let entry = inner
            .entries
            .get(&entry_id)
            .ok_or(LedgerError::EntryNotFound(entry_id))?;
        if entry.posted {
            return Err(LedgerError::EntryAlreadyPosted(entry_id));
        }

        let line = JournalLine::from_resolved(entry_id, line);
        let line_id = line.id;
        inner.lines.entry(entry_id).or_default().push(line);
        Ok(line_id)
    }

    /// Returns an entry by id.
    pub async fn entry(&self, id: JournalEntryId) -> Option<JournalEntry> {
        self.inner.read().await.entries.get(&id).cloned()
    }

    /// Returns the lines of an entry.
    pub async fn lines(&self, id: JournalEntryId) -> Vec<JournalLine> {
        self.inner
            .read()
            .await
            .lines
            .get(&id)
            .cloned()
            .unwrap_or_default()
    }

    /// Removes a draft entry and its lines.
    ///
    /// # Errors
    ///
    /// Returns `EntryNotFound`, or `EntryAlreadyPosted` for posted
    /// entries (posted entries are only ever undone by reversal).
    pub async fn remove_draft(&self, id: JournalEntryId) -> Result<(), LedgerError> {
        let mut inner = self.inner.write().await;
        let entry = inner
            .entries
            .get(&id)
            .ok_or(LedgerError::EntryNotFound(id))?;
        if entry.posted {
            return Err(LedgerError::EntryAlreadyPosted(id));
        }
        inner.entries.remove(&id);
        inner.lines.remove(&id);
        Ok(())
    }

    /// Posts a draft entry after validating the balance invariant.
    ///
    /// The caller holds the period lock and has re-checked the fiscal
    /// gate; this method flips the entry atomically under the write
    /// guard.
    ///
    /// # Errors
    ///
    /// Returns `EntryNotFound`, `EntryAlreadyPosted`, or any line
    /// validation failure (`EmptyEntry`, `Unbalanced`, ...).
    pub async fn post(
        &self,
        id: JournalEntryId,
        audit: AuditContext,
    ) -> Result<JournalEntry, LedgerError> {
        let mut inner = self.inner.write().await;
        let entry = inner
            .entries
            .get(&id)
            .ok_or(LedgerError::EntryNotFound(id))?;
        if entry.posted {
            return Err(LedgerError::EntryAlreadyPosted(id));
        }

        let resolved: Vec<ResolvedLine> = inner
            .lines
            .get(&id)
            .map(|lines| lines.iter().map(JournalLine::to_resolved).collect())
            .unwrap_or_default();
        ledger::validate_lines(&resolved)?;

        let entry = inner
            .entries
            .get_mut(&id)
            .ok_or(LedgerError::EntryNotFound(id))?;
        entry.posted = true;
        entry.posted_at = Some(audit.at);
        entry.posted_by = Some(audit.actor);
        entry.audit = Some(audit);
        Ok(entry.clone())
    }

    /// Inserts a fully-formed posted entry in one atomic step.
    ///
    /// Used by the posting coordinator, which has already resolved and
    /// gate-checked everything; validation still runs so an unbalanced
    /// set can never be persisted.
    ///
    /// # Errors
    ///
    /// Returns any line validation failure; nothing is persisted on
    /// error.
    pub async fn insert_posted(
        &self,
        header: EntryHeader,
        fiscal_period_id: FiscalPeriodId,
        lines: Vec<ResolvedLine>,
        audit: AuditContext,
    ) -> Result<JournalEntry, LedgerError> {
        ledger::validate_lines(&lines)?;

        let mut inner = self.inner.write().await;
        let entry_no = inner.take_entry_no();
        let mut entry = JournalEntry::draft(entry_no, header, fiscal_period_id);
        entry.posted = true;
        entry.posted_at = Some(audit.at);
        entry.posted_by = Some(audit.actor);
        entry.audit = Some(audit);

        let lines: Vec<JournalLine> = lines
            .into_iter()
            .map(|line| JournalLine::from_resolved(entry.id, line))
            .collect();
        inner.lines.insert(entry.id, lines);
        inner.entries.insert(entry.id, entry.clone());
        Ok(entry)
    }

    /// Applies a reversal: inserts the posted mirror entry and marks the
    /// original reversed, linked both ways, in one atomic step.
    ///
    /// Reversibility is re-checked under the write guard so two racing
    /// reversals of the same entry can never both commit.
    ///
    /// # Errors
    ///
    /// Returns `EntryNotFound`, `NotPosted`, or `AlreadyReversed`.
    pub async fn apply_reversal(
        &self,
        original_id: JournalEntryId,
        header: EntryHeader,
        fiscal_period_id: FiscalPeriodId,
        audit: AuditContext,
    ) -> Result<JournalEntry, ReversalError> {
        let mut inner = self.inner.write().await;
        let original = inner
            .entries
            .get(&original_id)
            .ok_or(ReversalError::EntryNotFound(original_id))?;
        ledger::validate_reversible(original)?;

        let mirror: Vec<ResolvedLine> = inner
            .lines
            .get(&original_id)
            .map(|lines| ledger::build_reversal_lines(lines))
            .unwrap_or_default();
        ledger::validate_lines(&mirror)?;

        let entry_no = inner.take_entry_no();
        let mut entry = JournalEntry::draft(entry_no, header, fiscal_period_id);
        entry.posted = true;
        entry.posted_at = Some(audit.at);
        entry.posted_by = Some(audit.actor);
        entry.reversal_of = Some(original_id);
        entry.audit = Some(audit);

        let lines: Vec<JournalLine> = mirror
            .into_iter()
            .map(|line| JournalLine::from_resolved(entry.id, line))
            .collect();
        inner.lines.insert(entry.id, lines);
        inner.entries.insert(entry.id, entry.clone());

        let original = inner
            .entries
            .get_mut(&original_id)
            .ok_or(ReversalError::EntryNotFound(original_id))?;
        original.reversed = true;
        original.reversed_by = Some(entry.id);
        Ok(entry)
    }

    /// Snapshot of all posted lines as report facts.
    ///
    /// Reversals are additive: a reversed entry keeps its lines and the
    /// mirror negates them from its own posting date forward, so as-of
    /// reporting before the reversal date still shows the history while
    /// later dates net to zero.
    pub async fn effective_facts(&self) -> Vec<LineFact> {
        let inner = self.inner.read().await;
        let mut facts = Vec::new();
        for entry in inner.entries.values() {
            if !entry.posted {
                continue;
            }
            if let Some(lines) = inner.lines.get(&entry.id) {
                facts.extend(lines.iter().map(|line| LineFact {
                    account_id: line.account_id,
                    posting_date: entry.posting_date,
                    debit: line.debit,
                    credit: line.credit,
                }));
            }
        }
        facts
    }

    /// Returns true if any non-reversed posted line references the
    /// account within a period matching the predicate.
    pub async fn has_active_reference<P>(&self, account_id: AccountId, period_matches: P) -> bool
    where
        P: Fn(FiscalPeriodId) -> bool,
    {
        let inner = self.inner.read().await;
        inner.entries.values().any(|entry| {
            entry.posted
                && !entry.reversed
                && period_matches(entry.fiscal_period_id)
                && inner
                    .lines
                    .get(&entry.id)
                    .is_some_and(|lines| lines.iter().any(|l| l.account_id == account_id))
        })
    }

    /// Returns true if any posted line (reversed or not) references the
    /// account. Used to freeze account types.
    pub async fn has_posted_lines(&self, account_id: AccountId) -> bool {
        let inner = self.inner.read().await;
        inner.entries.values().any(|entry| {
            entry.posted
                && inner
                    .lines
                    .get(&entry.id)
                    .is_some_and(|lines| lines.iter().any(|l| l.account_id == account_id))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use reckon_core::ledger::SourceRef;
    use reckon_shared::types::{ActorId, Currency};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn header() -> EntryHeader {
        EntryHeader {
            entry_date: ymd(2026, 1, 15),
            posting_date: ymd(2026, 1, 15),
            description: "Test entry".to_string(),
            source: SourceRef::Manual,
            created_by: ActorId::new(),
        }
    }

    fn line(debit: Decimal, credit: Decimal) -> ResolvedLine {
        ResolvedLine {
            account_id: AccountId::new(),
            cost_center_id: None,
            currency: Currency::Usd,
            txn_amount: if debit > Decimal::ZERO { debit } else { credit },
            exchange_rate: Decimal::ONE,
            base_amount: if debit > Decimal::ZERO { debit } else { credit },
            debit,
            credit,
            memo: None,
        }
    }

    fn audit() -> AuditContext {
        AuditContext::new(ActorId::new())
    }

    #[tokio::test]
    async fn test_draft_flow_posts_balanced_entry() {
        let store = JournalStore::new();
        let entry = store.create_draft(header(), FiscalPeriodId::new()).await;
        assert!(!entry.posted);
        assert_eq!(entry.entry_no, 1);

        store.add_line(entry.id, line(dec!(100.00), dec!(0))).await.unwrap();
        store.add_line(entry.id, line(dec!(0), dec!(100.00))).await.unwrap();

        let posted = store.post(entry.id, audit()).await.unwrap();
        assert!(posted.posted);
        assert!(posted.posted_at.is_some());
        assert!(posted.posted_by.is_some());
    }

    #[tokio::test]
    async fn test_post_unbalanced_rejected() {
        let store = JournalStore::new();
        let entry = store.create_draft(header(), FiscalPeriodId::new()).await;
        store.add_line(entry.id, line(dec!(100.00), dec!(0))).await.unwrap();
        store.add_line(entry.id, line(dec!(0), dec!(90.00))).await.unwrap();

        let result = store.post(entry.id, audit()).await;
        assert!(matches!(result, Err(LedgerError::Unbalanced { .. })));

        // entry stays an unposted draft
        let entry = store.entry(entry.id).await.unwrap();
        assert!(!entry.posted);
    }

    #[tokio::test]
    async fn test_post_empty_entry_rejected() {
        let store = JournalStore::new();
        let entry = store.create_draft(header(), FiscalPeriodId::new()).await;

        let result = store.post(entry.id, audit()).await;
        assert!(matches!(result, Err(LedgerError::EmptyEntry)));
    }

    #[tokio::test]
    async fn test_add_line_to_posted_entry_is_loud() {
        let store = JournalStore::new();
        let entry = store.create_draft(header(), FiscalPeriodId::new()).await;
        store.add_line(entry.id, line(dec!(100.00), dec!(0))).await.unwrap();
        store.add_line(entry.id, line(dec!(0), dec!(100.00))).await.unwrap();
        store.post(entry.id, audit()).await.unwrap();

        let result = store.add_line(entry.id, line(dec!(1.00), dec!(0))).await;
        match result {
            Err(err @ LedgerError::EntryAlreadyPosted(_)) => {
                assert!(err.is_contract_violation());
            }
            other => panic!("expected EntryAlreadyPosted, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_double_post_rejected() {
        let store = JournalStore::new();
        let entry = store.create_draft(header(), FiscalPeriodId::new()).await;
        store.add_line(entry.id, line(dec!(100.00), dec!(0))).await.unwrap();
        store.add_line(entry.id, line(dec!(0), dec!(100.00))).await.unwrap();
        store.post(entry.id, audit()).await.unwrap();

        assert!(matches!(
            store.post(entry.id, audit()).await,
            Err(LedgerError::EntryAlreadyPosted(_))
        ));
    }

    #[tokio::test]
    async fn test_remove_draft_only() {
        let store = JournalStore::new();
        let draft = store.create_draft(header(), FiscalPeriodId::new()).await;
        store.remove_draft(draft.id).await.unwrap();
        assert!(store.entry(draft.id).await.is_none());

        let entry = store.create_draft(header(), FiscalPeriodId::new()).await;
        store.add_line(entry.id, line(dec!(100.00), dec!(0))).await.unwrap();
        store.add_line(entry.id, line(dec!(0), dec!(100.00))).await.unwrap();
        store.post(entry.id, audit()).await.unwrap();

        assert!(matches!(
            store.remove_draft(entry.id).await,
            Err(LedgerError::EntryAlreadyPosted(_))
        ));
    }

    #[tokio::test]
    async fn test_insert_posted_validates() {
        let store = JournalStore::new();
        let result = store
            .insert_posted(
                header(),
                FiscalPeriodId::new(),
                vec![line(dec!(100.00), dec!(0)), line(dec!(0), dec!(90.00))],
                audit(),
            )
            .await;
        assert!(matches!(result, Err(LedgerError::Unbalanced { .. })));
        assert!(store.effective_facts().await.is_empty());
    }

    #[tokio::test]
    async fn test_effective_facts_exclude_drafts_and_net_reversals() {
        let store = JournalStore::new();
        let period = FiscalPeriodId::new();

        // a draft contributes nothing
        let draft = store.create_draft(header(), period).await;
        store.add_line(draft.id, line(dec!(5.00), dec!(0))).await.unwrap();

        let posted = store
            .insert_posted(
                header(),
                period,
                vec![line(dec!(100.00), dec!(0)), line(dec!(0), dec!(100.00))],
                audit(),
            )
            .await
            .unwrap();
        assert_eq!(store.effective_facts().await.len(), 2);

        store
            .apply_reversal(posted.id, header(), period, audit())
            .await
            .unwrap();

        // original and mirror both stand and net to zero per account
        let facts = store.effective_facts().await;
        assert_eq!(facts.len(), 4);
        let net: Decimal = facts.iter().map(|f| f.debit - f.credit).sum();
        assert_eq!(net, Decimal::ZERO);
    }

    #[tokio::test]
    async fn test_apply_reversal_links_both_ways() {
        let store = JournalStore::new();
        let period = FiscalPeriodId::new();
        let posted = store
            .insert_posted(
                header(),
                period,
                vec![line(dec!(500.00), dec!(0)), line(dec!(0), dec!(500.00))],
                audit(),
            )
            .await
            .unwrap();

        let mirror = store
            .apply_reversal(posted.id, header(), period, audit())
            .await
            .unwrap();

        let original = store.entry(posted.id).await.unwrap();
        assert!(original.reversed);
        assert_eq!(original.reversed_by, Some(mirror.id));
        assert_eq!(mirror.reversal_of, Some(posted.id));

        let mirror_lines = store.lines(mirror.id).await;
        assert_eq!(mirror_lines.len(), 2);
        assert_eq!(mirror_lines[0].credit, dec!(500.00));
    }

    #[tokio::test]
    async fn test_second_reversal_rejected() {
        let store = JournalStore::new();
        let period = FiscalPeriodId::new();
        let posted = store
            .insert_posted(
                header(),
                period,
                vec![line(dec!(500.00), dec!(0)), line(dec!(0), dec!(500.00))],
                audit(),
            )
            .await
            .unwrap();

        store.apply_reversal(posted.id, header(), period, audit()).await.unwrap();
        let result = store.apply_reversal(posted.id, header(), period, audit()).await;
        assert!(matches!(
            result,
            Err(ReversalError::Invalid(
                reckon_core::ledger::ReversalError::AlreadyReversed(_)
            ))
        ));
    }

    #[tokio::test]
    async fn test_account_reference_checks() {
        let store = JournalStore::new();
        let period = FiscalPeriodId::new();
        let debit = line(dec!(100.00), dec!(0));
        let account = debit.account_id;
        store
            .insert_posted(
                header(),
                period,
                vec![debit, line(dec!(0), dec!(100.00))],
                audit(),
            )
            .await
            .unwrap();

        assert!(store.has_posted_lines(account).await);
        assert!(store.has_active_reference(account, |p| p == period).await);
        assert!(!store.has_active_reference(account, |_| false).await);
        assert!(!store.has_posted_lines(AccountId::new()).await);
    }
}
