//! Property tests for the posting fold.

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;

use partida_shared::types::{AccountId, JournalEntryId, OpeningBalanceId, PeriodId};

use crate::account::{Account, AccountStatus, AccountType};
use crate::opening::{OpeningBalance, OpeningBalanceStatus};

use super::engine::{post_account, RawMovement};
use super::types::MovementSource;

fn make_account(account_type: AccountType) -> Account {
    Account {
        id: AccountId::new(),
        code: "1.1.01".to_string(),
        name: "Cash".to_string(),
        account_type,
        level: 3,
        parent: None,
        accepts_movements: true,
        status: AccountStatus::Active,
    }
}

fn account_type() -> impl Strategy<Value = AccountType> {
    prop::sample::select(AccountType::ALL.to_vec())
}

/// (day, debit cents, credit cents) with exactly one positive side.
fn raw_movements() -> impl Strategy<Value = Vec<(u32, i64, i64)>> {
    prop::collection::vec(
        (1u32..=28, 1i64..=100_000, prop::bool::ANY)
            .prop_map(|(day, cents, is_debit)| {
                if is_debit {
                    (day, cents, 0)
                } else {
                    (day, 0, cents)
                }
            }),
        0..20,
    )
}

fn to_raw(movements: &[(u32, i64, i64)]) -> Vec<RawMovement> {
    movements
        .iter()
        .map(|&(day, debit, credit)| RawMovement {
            source: MovementSource::Journal(JournalEntryId::new()),
            date: NaiveDate::from_ymd_opt(2026, 1, day).unwrap(),
            description: "mv".to_string(),
            reference: None,
            debit: Decimal::new(debit, 2),
            credit: Decimal::new(credit, 2),
        })
        .collect()
}

fn cutoff() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 1, 31).unwrap()
}

proptest! {
    /// Closing balance equals opening plus the sum of signed changes,
    /// regardless of input order.
    #[test]
    fn closing_is_opening_plus_signed_changes(
        account_type in account_type(),
        opening_cents in 0i64..=1_000_000,
        movements in raw_movements(),
    ) {
        let account = make_account(account_type);
        let opening = OpeningBalance {
            id: OpeningBalanceId::new(),
            period_id: PeriodId::new(),
            account_id: account.id,
            amount: Decimal::new(opening_cents, 2),
            nature: account.nature(),
            status: OpeningBalanceStatus::Active,
            recorded_on: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
            recorded_by: "clerk".to_string(),
            notes: None,
        };

        let ledger = post_account(&account, Some(&opening), to_raw(&movements), cutoff());

        let expected: Decimal = Decimal::new(opening_cents, 2)
            + movements
                .iter()
                .map(|&(_, debit, credit)| {
                    account
                        .nature()
                        .signed_change(Decimal::new(debit, 2), Decimal::new(credit, 2))
                })
                .sum::<Decimal>();
        prop_assert_eq!(ledger.closing_balance, expected);
    }

    /// Every movement's previous_balance chains to the prior balance, and
    /// the first chains to the opening.
    #[test]
    fn running_balances_chain(
        account_type in account_type(),
        movements in raw_movements(),
    ) {
        let account = make_account(account_type);
        let ledger = post_account(&account, None, to_raw(&movements), cutoff());

        let mut previous = Decimal::ZERO;
        for movement in &ledger.movements {
            prop_assert_eq!(movement.previous_balance, previous);
            prop_assert_eq!(
                movement.balance,
                previous + account.nature().signed_change(movement.debit, movement.credit)
            );
            previous = movement.balance;
        }
        prop_assert_eq!(ledger.closing_balance, previous);
    }

    /// Posting is deterministic under input shuffling: the same movement
    /// set in any order produces the same ledger.
    #[test]
    fn posting_is_order_insensitive(
        account_type in account_type(),
        movements in raw_movements(),
    ) {
        let account = make_account(account_type);
        let forward = to_raw(&movements);
        let mut reversed = forward.clone();
        reversed.reverse();

        let a = post_account(&account, None, forward, cutoff());
        let b = post_account(&account, None, reversed, cutoff());

        prop_assert_eq!(a.closing_balance, b.closing_balance);
        prop_assert_eq!(a.movements.len(), b.movements.len());
        for (x, y) in a.movements.iter().zip(&b.movements) {
            prop_assert_eq!(x.source, y.source);
            prop_assert_eq!(x.balance, y.balance);
        }
    }

    /// Total debits and credits are simple sums over the kept movements.
    #[test]
    fn totals_match_movement_sums(
        account_type in account_type(),
        movements in raw_movements(),
    ) {
        let account = make_account(account_type);
        let ledger = post_account(&account, None, to_raw(&movements), cutoff());

        let debit: Decimal = ledger.movements.iter().map(|m| m.debit).sum();
        let credit: Decimal = ledger.movements.iter().map(|m| m.credit).sum();
        prop_assert_eq!(ledger.total_debit, debit);
        prop_assert_eq!(ledger.total_credit, credit);
    }
}
