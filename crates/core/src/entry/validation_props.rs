//! Property tests for line validation.

use proptest::prelude::*;
use rust_decimal::Decimal;

use partida_shared::types::AccountId;

use super::types::EntryLine;
use super::validation::validate_lines;
use crate::error::LedgerError;

/// Strictly positive amount with two fractional digits, as whole cents.
fn cents() -> impl Strategy<Value = i64> {
    1i64..=1_000_000
}

fn amount(cents: i64) -> Decimal {
    Decimal::new(cents, 2)
}

proptest! {
    /// Any set of debit lines offset by a single credit for their total
    /// passes validation.
    #[test]
    fn balanced_entries_always_accepted(debits in prop::collection::vec(cents(), 1..10)) {
        let total: i64 = debits.iter().sum();
        let mut lines: Vec<EntryLine> = debits
            .iter()
            .map(|&c| EntryLine::debit(AccountId::new(), amount(c)))
            .collect();
        lines.push(EntryLine::credit(AccountId::new(), amount(total)));

        let totals = validate_lines(&lines).unwrap();
        prop_assert!(totals.is_balanced);
        prop_assert_eq!(totals.debit, amount(total));
        prop_assert_eq!(totals.credit, amount(total));
    }

    /// Perturbing the credit side by any nonzero cent amount is rejected,
    /// including a single cent. The entry-level check has no tolerance.
    #[test]
    fn perturbed_entries_always_rejected(
        debits in prop::collection::vec(cents(), 1..10),
        perturbation in prop_oneof![-100i64..0, 1i64..=100],
    ) {
        let total: i64 = debits.iter().sum();
        prop_assume!(total + perturbation > 0);

        let mut lines: Vec<EntryLine> = debits
            .iter()
            .map(|&c| EntryLine::debit(AccountId::new(), amount(c)))
            .collect();
        lines.push(EntryLine::credit(AccountId::new(), amount(total + perturbation)));

        let err = validate_lines(&lines).unwrap_err();
        prop_assert!(
            matches!(err, LedgerError::UnbalancedEntry { .. }),
            "expected UnbalancedEntry, got {err:?}"
        );
    }

    /// Validation order is stable: the first malformed line is the one
    /// reported, regardless of what follows it.
    #[test]
    fn first_bad_line_reported(good in prop::collection::vec(cents(), 0..5)) {
        let mut lines: Vec<EntryLine> = good
            .iter()
            .map(|&c| EntryLine::debit(AccountId::new(), amount(c)))
            .collect();
        let bad_index = lines.len();
        lines.push(EntryLine {
            account_id: AccountId::new(),
            description: None,
            debit: Decimal::ZERO,
            credit: Decimal::ZERO,
        });
        lines.push(EntryLine {
            account_id: AccountId::new(),
            description: None,
            debit: amount(100),
            credit: amount(100),
        });

        let err = validate_lines(&lines).unwrap_err();
        prop_assert!(
            matches!(err, LedgerError::LineNotSingleSided { index } if index == bad_index),
            "expected LineNotSingleSided at {bad_index}, got {err:?}"
        );
    }
}
