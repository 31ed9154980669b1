//! Shared fixture for engine integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use reckon_core::coa::{Account, AccountType, ControlRole, NewAccount};
use reckon_core::fiscal::FiscalPeriod;
use reckon_core::ledger::{EntryHeader, LineSpec, Side, SourceRef};
use reckon_core::subledger::{DocumentKind, NewDocument};
use reckon_engine::LedgerEngine;
use reckon_shared::config::EngineConfig;
use reckon_shared::types::{ActorId, Currency, Money};

/// A ready-to-post ledger: twelve open 2026 periods and a small chart of
/// accounts.
pub struct TestLedger {
    pub engine: Arc<LedgerEngine>,
    pub periods: Vec<FiscalPeriod>,
    pub actor: ActorId,
    pub cash: Account,
    pub receivables: Account,
    pub payables: Account,
    pub revenue: Account,
    pub salaries: Account,
    pub cogs: Account,
}

pub fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Installs a test subscriber once; RUST_LOG controls verbosity.
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub async fn setup() -> TestLedger {
    setup_with_config(EngineConfig::default()).await
}

pub async fn setup_with_config(config: EngineConfig) -> TestLedger {
    init_tracing();
    let engine = Arc::new(LedgerEngine::new(config));
    let periods = engine.add_calendar_year(2026).await.unwrap();

    let account = |code: &str, name: &str, account_type, is_cash, control_role| NewAccount {
        code: code.to_string(),
        name: name.to_string(),
        account_type,
        parent_id: None,
        is_cash,
        control_role,
    };

    let cash = engine
        .create_account(account("1000", "Cash", AccountType::Asset, true, None))
        .await
        .unwrap();
    let receivables = engine
        .create_account(account(
            "1200",
            "Accounts Receivable",
            AccountType::Asset,
            false,
            Some(ControlRole::Receivables),
        ))
        .await
        .unwrap();
    let payables = engine
        .create_account(account(
            "2000",
            "Accounts Payable",
            AccountType::Liability,
            false,
            Some(ControlRole::Payables),
        ))
        .await
        .unwrap();
    let revenue = engine
        .create_account(account("4000", "Revenue", AccountType::Revenue, false, None))
        .await
        .unwrap();
    let salaries = engine
        .create_account(account(
            "6000",
            "Salaries Expense",
            AccountType::Expense,
            false,
            None,
        ))
        .await
        .unwrap();
    let cogs = engine
        .create_account(account(
            "5000",
            "Cost of Goods Sold",
            AccountType::CostOfGoodsSold,
            false,
            None,
        ))
        .await
        .unwrap();

    TestLedger {
        engine,
        periods,
        actor: ActorId::new(),
        cash,
        receivables,
        payables,
        revenue,
        salaries,
        cogs,
    }
}

impl TestLedger {
    pub fn header(&self, posting_date: NaiveDate, description: &str) -> EntryHeader {
        EntryHeader {
            entry_date: posting_date,
            posting_date,
            description: description.to_string(),
            source: SourceRef::Manual,
            created_by: self.actor,
        }
    }

    pub fn header_for(
        &self,
        posting_date: NaiveDate,
        description: &str,
        source: SourceRef,
    ) -> EntryHeader {
        EntryHeader {
            entry_date: posting_date,
            posting_date,
            description: description.to_string(),
            source,
            created_by: self.actor,
        }
    }

    pub async fn register_invoice(&self, amount: Decimal, due_date: NaiveDate) -> reckon_core::subledger::Document {
        self.engine
            .register_document(NewDocument {
                kind: DocumentKind::Invoice,
                counterparty: "Acme Corp".to_string(),
                total: Money::new(amount, Currency::Usd),
                issue_date: due_date - chrono::Duration::days(30),
                due_date,
            })
            .await
    }

    pub async fn register_bill(&self, amount: Decimal, due_date: NaiveDate) -> reckon_core::subledger::Document {
        self.engine
            .register_document(NewDocument {
                kind: DocumentKind::Bill,
                counterparty: "Supplies Inc".to_string(),
                total: Money::new(amount, Currency::Usd),
                issue_date: due_date - chrono::Duration::days(14),
                due_date,
            })
            .await
    }

    pub async fn register_payroll(&self, amount: Decimal, pay_date: NaiveDate) -> reckon_core::subledger::Document {
        self.engine
            .register_document(NewDocument {
                kind: DocumentKind::PayrollRun,
                counterparty: "Payroll 2026-03".to_string(),
                total: Money::new(amount, Currency::Usd),
                issue_date: pay_date,
                due_date: pay_date,
            })
            .await
    }
}

pub fn debit(account: &Account, amount: Decimal) -> LineSpec {
    line(account, Side::Debit, amount)
}

pub fn credit(account: &Account, amount: Decimal) -> LineSpec {
    line(account, Side::Credit, amount)
}

fn line(account: &Account, side: Side, amount: Decimal) -> LineSpec {
    LineSpec {
        account_id: account.id,
        cost_center_id: None,
        side,
        amount,
        currency: Currency::Usd,
        memo: None,
    }
}
