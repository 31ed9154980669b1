//! Reconciliation job and alert channel.
//!
//! The job is read-only with respect to the ledger: it compares open
//! subledger totals against control account balances, persists an
//! append-only run record, and publishes alerts. It never auto-corrects
//! and never fails a live posting; correction requires a human-reviewed
//! adjusting entry through the normal posting path.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use tokio::sync::broadcast;

use reckon_core::ledger::AuditContext;
use reckon_core::recon::{
    ControlComparison, Discrepancy, ReconService, ReconciliationRun, ReconciliationScope,
};
use reckon_core::subledger::Document;
use reckon_shared::types::ReconciliationRunId;

use crate::engine::LedgerEngine;

/// An asynchronous alert raised by a reconciliation run.
#[derive(Debug, Clone, Serialize)]
pub struct ReconciliationAlert {
    /// The run that found the discrepancy.
    pub run_id: ReconciliationRunId,
    /// Scope of the run.
    pub scope: ReconciliationScope,
    /// The discrepancy itself.
    pub discrepancy: Discrepancy,
    /// When the alert was raised.
    pub raised_at: DateTime<Utc>,
}

impl LedgerEngine {
    /// Runs a reconciliation over the given scope.
    ///
    /// `expected` is the sum of outstanding posted subledger documents;
    /// `actual` is the control account balance from the trial balance.
    /// Discrepancies beyond the configured tolerance are persisted with
    /// the run and published on the alert channel.
    #[tracing::instrument(skip(self, audit))]
    pub async fn run_reconciliation(
        &self,
        scope: ReconciliationScope,
        audit: AuditContext,
    ) -> ReconciliationRun {
        let as_of = Utc::now().date_naive();
        let documents = self.documents.list().await;

        let mut comparisons = Vec::new();
        for role in scope.roles() {
            let expected: Decimal = documents
                .iter()
                .filter(|doc| doc.kind.control_role() == Some(role))
                .map(Document::outstanding_base)
                .sum();
            let actual = self.control_balance(role, as_of).await;
            comparisons.push(ControlComparison {
                role,
                expected,
                actual,
            });
        }

        let recon_config = &self.config().reconciliation;
        let (status, discrepancies) = ReconService::evaluate(
            &comparisons,
            recon_config.tolerance,
            recon_config.critical_variance,
        );

        let run = ReconciliationRun {
            id: ReconciliationRunId::new(),
            run_at: Utc::now(),
            scope,
            status,
            discrepancies,
            audit,
        };

        for discrepancy in &run.discrepancies {
            tracing::warn!(
                role = ?discrepancy.role,
                expected = %discrepancy.expected,
                actual = %discrepancy.actual,
                variance = %discrepancy.variance,
                severity = ?discrepancy.severity,
                "reconciliation discrepancy"
            );
            // send only fails when nobody is subscribed, which is fine
            let _ = self.alerts.send(ReconciliationAlert {
                run_id: run.id,
                scope,
                discrepancy: discrepancy.clone(),
                raised_at: run.run_at,
            });
        }

        self.runs.write().await.push(run.clone());
        tracing::info!(run_id = %run.id, status = ?run.status, "reconciliation run recorded");
        run
    }

    /// Returns the append-only history of reconciliation runs.
    pub async fn reconciliation_runs(&self) -> Vec<ReconciliationRun> {
        self.runs.read().await.clone()
    }

    /// Subscribes to reconciliation alerts.
    #[must_use]
    pub fn subscribe_alerts(&self) -> broadcast::Receiver<ReconciliationAlert> {
        self.alerts.subscribe()
    }
}
