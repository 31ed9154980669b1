//! Property tests for the balance invariant.

use proptest::prelude::*;
use rust_decimal::Decimal;

use reckon_shared::types::{AccountId, Currency};

use super::error::LedgerError;
use super::line::ResolvedLine;
use super::validation::validate_lines;

fn line(debit_cents: i64, credit_cents: i64) -> ResolvedLine {
    let debit = Decimal::new(debit_cents, 2);
    let credit = Decimal::new(credit_cents, 2);
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

/// Strategy for positive line amounts in cents.
fn amount_cents() -> impl Strategy<Value = i64> {
    1i64..=100_000_000
}

/// Strategy for a balanced line set: every debit amount appears once on
/// each side, so totals match by construction.
fn balanced_lines() -> impl Strategy<Value = Vec<ResolvedLine>> {
    prop::collection::vec(amount_cents(), 1..8).prop_map(|amounts| {
        let mut lines: Vec<ResolvedLine> = amounts.iter().map(|&c| line(c, 0)).collect();
        lines.extend(amounts.iter().map(|&c| line(0, c)));
        lines
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Any balanced set of positive one-sided lines validates.
    #[test]
    fn prop_balanced_sets_validate(lines in balanced_lines()) {
        prop_assert!(validate_lines(&lines).is_ok());
    }

    /// Perturbing any single line amount breaks the balance and fails
    /// with `Unbalanced`, never with a different error.
    #[test]
    fn prop_any_perturbation_is_unbalanced(
        lines in balanced_lines(),
        index in any::<prop::sample::Index>(),
        delta_cents in 1i64..=1_000_000,
    ) {
        let mut lines = lines;
        let i = index.index(lines.len());
        let delta = Decimal::new(delta_cents, 2);
        if lines[i].debit > Decimal::ZERO {
            lines[i].debit += delta;
        } else {
            lines[i].credit += delta;
        }

        prop_assert!(
            matches!(validate_lines(&lines), Err(LedgerError::Unbalanced { .. })),
            "expected Unbalanced"
        );
    }

    /// A set with every line on the debit side can never balance.
    #[test]
    fn prop_single_sided_sets_fail(amounts in prop::collection::vec(amount_cents(), 2..8)) {
        let lines: Vec<ResolvedLine> = amounts.iter().map(|&c| line(c, 0)).collect();
        prop_assert!(
            matches!(validate_lines(&lines), Err(LedgerError::Unbalanced { .. })),
            "expected Unbalanced"
        );
    }

    /// Fewer than two lines is always rejected, balanced or not.
    #[test]
    fn prop_short_entries_rejected(cents in amount_cents()) {
        prop_assert!(matches!(validate_lines(&[]), Err(LedgerError::EmptyEntry)));
        prop_assert!(matches!(
            validate_lines(&[line(cents, 0)]),
            Err(LedgerError::EmptyEntry)
        ));
    }
}
