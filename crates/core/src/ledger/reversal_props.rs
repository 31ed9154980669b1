//! Property tests for reversal correctness.

use std::collections::HashMap;

use proptest::prelude::*;
use rust_decimal::Decimal;

use reckon_shared::types::{AccountId, Currency, JournalEntryId, JournalLineId};

use super::line::{JournalLine, ResolvedLine};
use super::reversal::build_reversal_lines;

fn journal_line(account: AccountId, debit_cents: i64, credit_cents: i64) -> JournalLine {
    let debit = Decimal::new(debit_cents, 2);
    let credit = Decimal::new(credit_cents, 2);
    JournalLine {
        id: JournalLineId::new(),
        entry_id: JournalEntryId::new(),
        account_id: account,
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

/// Strategy for an arbitrary posted line set over a small account pool.
fn posted_lines() -> impl Strategy<Value = Vec<JournalLine>> {
    let accounts: Vec<AccountId> = (0..4).map(|_| AccountId::new()).collect();
    prop::collection::vec((0usize..4, 1i64..=100_000_000, any::<bool>()), 2..10).prop_map(
        move |rows| {
            rows.into_iter()
                .map(|(account_index, cents, is_debit)| {
                    let account = accounts[account_index];
                    if is_debit {
                        journal_line(account, cents, 0)
                    } else {
                        journal_line(account, 0, cents)
                    }
                })
                .collect()
        },
    )
}

fn net_by_account(original: &[JournalLine], mirror: &[ResolvedLine]) -> HashMap<AccountId, Decimal> {
    let mut net: HashMap<AccountId, Decimal> = HashMap::new();
    for line in original {
        *net.entry(line.account_id).or_default() += line.debit - line.credit;
    }
    for line in mirror {
        *net.entry(line.account_id).or_default() += line.debit - line.credit;
    }
    net
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Posting an entry and its reversal nets every account to zero.
    #[test]
    fn prop_reversal_nets_to_zero(original in posted_lines()) {
        let mirror = build_reversal_lines(&original);
        let net = net_by_account(&original, &mirror);
        for (account, balance) in net {
            prop_assert_eq!(balance, Decimal::ZERO, "account {} did not net out", account);
        }
    }

    /// The mirror swaps sides line by line and preserves every frozen
    /// amount and rate.
    #[test]
    fn prop_mirror_swaps_and_preserves(original in posted_lines()) {
        let mirror = build_reversal_lines(&original);
        prop_assert_eq!(mirror.len(), original.len());
        for (orig, rev) in original.iter().zip(&mirror) {
            prop_assert_eq!(rev.debit, orig.credit);
            prop_assert_eq!(rev.credit, orig.debit);
            prop_assert_eq!(rev.account_id, orig.account_id);
            prop_assert_eq!(rev.txn_amount, orig.txn_amount);
            prop_assert_eq!(rev.exchange_rate, orig.exchange_rate);
            prop_assert_eq!(rev.base_amount, orig.base_amount);
        }
    }

    /// Reversing twice restores the original side of every line.
    #[test]
    fn prop_double_mirror_is_identity(original in posted_lines()) {
        let once = build_reversal_lines(&original);
        let twice: Vec<JournalLine> = once
            .into_iter()
            .map(|r| {
                let entry_id = JournalEntryId::new();
                JournalLine::from_resolved(entry_id, r)
            })
            .collect();
        let restored = build_reversal_lines(&twice);
        for (orig, back) in original.iter().zip(&restored) {
            prop_assert_eq!(back.debit, orig.debit);
            prop_assert_eq!(back.credit, orig.credit);
        }
    }
}
