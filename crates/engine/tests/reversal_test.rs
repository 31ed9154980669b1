//! Integration tests for entry reversal.

mod common;

use common::{credit, debit, setup, ymd};

use reckon_core::fiscal::FiscalError;
use reckon_core::ledger::{AuditContext, ReversalError as LedgerReversalError, Side};
use reckon_engine::{ProducerMutation, ReversalError};
use reckon_shared::types::JournalEntryId;
use rust_decimal_macros::dec;

#[tokio::test]
async fn test_reversal_restores_trial_balance() {
    let ledger = setup().await;

    let entry_id = ledger
        .engine
        .post_transaction(
            "invoice-INV-200",
            ledger.header(ymd(2026, 1, 15), "Invoice INV-200"),
            vec![
                debit(&ledger.receivables, dec!(500.00)),
                credit(&ledger.revenue, dec!(500.00)),
            ],
            ProducerMutation::None,
        )
        .await
        .unwrap();

    let mirror_id = ledger
        .engine
        .reverse_entry(entry_id, "voided invoice", ledger.actor, Some(ymd(2026, 2, 1)))
        .await
        .unwrap();
    assert_ne!(entry_id, mirror_id);

    // after the reversal date both accounts are back at zero
    let after = ledger.engine.trial_balance(ymd(2026, 2, 28), None).await;
    assert_eq!(after.balance_of(ledger.receivables.id), dec!(0));
    assert_eq!(after.balance_of(ledger.revenue.id), dec!(0));

    // before the reversal date the original still stands
    let before = ledger.engine.trial_balance(ymd(2026, 1, 31), None).await;
    assert_eq!(before.balance_of(ledger.receivables.id), dec!(500.00));
}

#[tokio::test]
async fn test_reversal_links_and_mirrors_lines() {
    let ledger = setup().await;

    let entry_id = ledger
        .engine
        .post_transaction(
            "invoice-INV-201",
            ledger.header(ymd(2026, 1, 15), "Invoice INV-201"),
            vec![
                debit(&ledger.receivables, dec!(500.00)),
                credit(&ledger.revenue, dec!(500.00)),
            ],
            ProducerMutation::None,
        )
        .await
        .unwrap();

    let mirror_id = ledger
        .engine
        .reverse_entry(entry_id, "credit note", ledger.actor, Some(ymd(2026, 1, 20)))
        .await
        .unwrap();

    let original = ledger.engine.entry(entry_id).await.unwrap();
    assert!(original.reversed);
    assert_eq!(original.reversed_by, Some(mirror_id));

    let mirror = ledger.engine.entry(mirror_id).await.unwrap();
    assert!(mirror.posted);
    assert_eq!(mirror.reversal_of, Some(entry_id));
    assert!(mirror.description.contains("Reason: credit note"));
    assert_eq!(
        mirror.audit.as_ref().unwrap().reason.as_deref(),
        Some("credit note")
    );

    let mirror_lines = ledger.engine.entry_lines(mirror_id).await;
    let receivable_line = mirror_lines
        .iter()
        .find(|l| l.account_id == ledger.receivables.id)
        .unwrap();
    assert_eq!(receivable_line.side(), Side::Credit);
    assert_eq!(receivable_line.credit, dec!(500.00));
}

#[tokio::test]
async fn test_second_reversal_rejected() {
    let ledger = setup().await;

    let entry_id = ledger
        .engine
        .post_transaction(
            "invoice-INV-202",
            ledger.header(ymd(2026, 1, 15), "Invoice INV-202"),
            vec![
                debit(&ledger.receivables, dec!(100.00)),
                credit(&ledger.revenue, dec!(100.00)),
            ],
            ProducerMutation::None,
        )
        .await
        .unwrap();

    ledger
        .engine
        .reverse_entry(entry_id, "first void", ledger.actor, Some(ymd(2026, 1, 20)))
        .await
        .unwrap();

    let second = ledger
        .engine
        .reverse_entry(entry_id, "second void", ledger.actor, Some(ymd(2026, 1, 21)))
        .await;
    assert!(matches!(
        second,
        Err(ReversalError::Invalid(
            LedgerReversalError::AlreadyReversed(_)
        ))
    ));
}

#[tokio::test]
async fn test_draft_cannot_be_reversed() {
    let ledger = setup().await;

    let draft_id = ledger
        .engine
        .create_draft_entry(ledger.header(ymd(2026, 1, 15), "Still a draft"))
        .await
        .unwrap();

    let result = ledger
        .engine
        .reverse_entry(draft_id, "oops", ledger.actor, Some(ymd(2026, 1, 20)))
        .await;
    assert!(matches!(
        result,
        Err(ReversalError::Invalid(LedgerReversalError::NotPosted(_)))
    ));
}

#[tokio::test]
async fn test_reversal_date_is_period_gated() {
    let ledger = setup().await;

    let entry_id = ledger
        .engine
        .post_transaction(
            "invoice-INV-203",
            ledger.header(ymd(2026, 1, 15), "Invoice INV-203"),
            vec![
                debit(&ledger.receivables, dec!(100.00)),
                credit(&ledger.revenue, dec!(100.00)),
            ],
            ProducerMutation::None,
        )
        .await
        .unwrap();

    ledger
        .engine
        .close_period(ledger.periods[0].id, AuditContext::new(ledger.actor))
        .await
        .unwrap();

    // reversing back into the closed period is refused
    let into_closed = ledger
        .engine
        .reverse_entry(entry_id, "void", ledger.actor, Some(ymd(2026, 1, 31)))
        .await;
    assert!(matches!(
        into_closed,
        Err(ReversalError::Fiscal(FiscalError::PeriodClosed { .. }))
    ));

    // dating the reversal into the open February period works
    let into_open = ledger
        .engine
        .reverse_entry(entry_id, "void", ledger.actor, Some(ymd(2026, 2, 1)))
        .await;
    assert!(into_open.is_ok());
}

#[tokio::test]
async fn test_reverse_unknown_entry() {
    let ledger = setup().await;
    let result = ledger
        .engine
        .reverse_entry(
            JournalEntryId::new(),
            "void",
            ledger.actor,
            Some(ymd(2026, 1, 20)),
        )
        .await;
    assert!(matches!(result, Err(ReversalError::EntryNotFound(_))));
}

#[tokio::test]
async fn test_multiline_reversal_nets_every_account() {
    let ledger = setup().await;

    let entry_id = ledger
        .engine
        .post_transaction(
            "bill-B-77",
            ledger.header(ymd(2026, 3, 10), "Split vendor bill"),
            vec![
                debit(&ledger.salaries, dec!(60.00)),
                debit(&ledger.cogs, dec!(40.00)),
                credit(&ledger.payables, dec!(100.00)),
            ],
            ProducerMutation::None,
        )
        .await
        .unwrap();

    ledger
        .engine
        .reverse_entry(entry_id, "entered twice", ledger.actor, Some(ymd(2026, 3, 12)))
        .await
        .unwrap();

    let trial_balance = ledger.engine.trial_balance(ymd(2026, 3, 31), None).await;
    assert_eq!(trial_balance.balance_of(ledger.salaries.id), dec!(0));
    assert_eq!(trial_balance.balance_of(ledger.cogs.id), dec!(0));
    assert_eq!(trial_balance.balance_of(ledger.payables.id), dec!(0));
    assert!(trial_balance.totals.is_balanced);
}
