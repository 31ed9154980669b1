//! Per-period and per-document exclusive locks.
//!
//! Lock granularity is deliberately fine: two postings into different
//! periods and documents never contend. Waits are bounded; a timeout
//! surfaces as a retryable busy error instead of blocking forever.
//! Callers that need both locks always take the period lock before the
//! document lock, so lock-ordering deadlocks cannot occur.

use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};

use reckon_shared::types::{DocumentId, FiscalPeriodId};

/// Scope of an exclusive lock.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LockScope {
    /// The fiscal period a posting writes into.
    Period(FiscalPeriodId),
    /// The source document a producer mutation targets.
    Document(DocumentId),
}

impl std::fmt::Display for LockScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Period(id) => write!(f, "period {id}"),
            Self::Document(id) => write!(f, "document {id}"),
        }
    }
}

/// Registry of keyed async mutexes.
#[derive(Debug, Default)]
pub struct LockRegistry {
    locks: DashMap<LockScope, Arc<Mutex<()>>>,
}

impl LockRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquires the lock for a scope, waiting at most `wait`.
    ///
    /// The guard is owned so it can be held across the whole posting
    /// transaction.
    ///
    /// # Errors
    ///
    /// Returns the scope back if the wait timed out.
    pub async fn acquire(
        &self,
        scope: LockScope,
        wait: Duration,
    ) -> Result<OwnedMutexGuard<()>, LockScope> {
        // Clone the Arc out before awaiting so no map shard stays locked.
        let mutex = {
            let entry = self
                .locks
                .entry(scope.clone())
                .or_insert_with(|| Arc::new(Mutex::new(())));
            Arc::clone(entry.value())
        };

        match tokio::time::timeout(wait, mutex.lock_owned()).await {
            Ok(guard) => Ok(guard),
            Err(_) => Err(scope),
        }
    }
}
