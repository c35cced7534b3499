//! Entry validation.
//!
//! Checks run in a fixed order so the first reported error is stable:
//! period state, line presence, account references, line shape, and
//! finally the exact balance check. Period-level aggregates elsewhere use
//! a one-cent tolerance; the entry-level check here is exact.

use chrono::NaiveDate;
use partida_shared::amount::round_to_cents;
use partida_shared::types::AccountId;
use rust_decimal::Decimal;

use crate::account::{Account, AccountStatus};
use crate::error::LedgerError;
use crate::period::Period;

use super::types::{EntryLine, EntryTotals};

/// Validates a full entry against its target period and the chart of
/// accounts, returning the computed totals on success.
///
/// `lookup` resolves an account by ID; returning `None` means the account
/// does not exist.
///
/// # Errors
///
/// Returns the first failing check, in order: [`LedgerError::PeriodClosed`],
/// [`LedgerError::DateOutsidePeriod`], [`LedgerError::NoLines`], account
/// reference errors, line shape errors, then [`LedgerError::UnbalancedEntry`].
pub fn validate_entry<'a>(
    period: &Period,
    date: NaiveDate,
    lines: &[EntryLine],
    lookup: impl Fn(AccountId) -> Option<&'a Account>,
) -> Result<EntryTotals, LedgerError> {
    if !period.is_open() {
        return Err(LedgerError::PeriodClosed(period.id));
    }
    if !period.contains_date(date) {
        return Err(LedgerError::DateOutsidePeriod { date });
    }
    if lines.is_empty() {
        return Err(LedgerError::NoLines);
    }

    for line in lines {
        let account =
            lookup(line.account_id).ok_or(LedgerError::AccountNotFound(line.account_id))?;
        if !account.may_post() {
            if account.status != AccountStatus::Active {
                return Err(LedgerError::AccountInactive(account.id));
            }
            return Err(LedgerError::AccountNoMovements(account.id));
        }
    }

    validate_lines(lines)
}

/// Validates line shape and balance without touching period or accounts.
///
/// Each line must carry exactly one strictly positive side; totals must be
/// equal to the cent. Every check runs on the normalized (cent-rounded)
/// amounts, the same values the entry is stored and posted with: a
/// hand-built sub-cent side rounds away before it can pass the
/// single-sided check or skew the totals.
///
/// # Errors
///
/// Returns [`LedgerError::NegativeAmount`], [`LedgerError::LineNotSingleSided`],
/// or [`LedgerError::UnbalancedEntry`].
pub fn validate_lines(lines: &[EntryLine]) -> Result<EntryTotals, LedgerError> {
    if lines.is_empty() {
        return Err(LedgerError::NoLines);
    }

    let mut total_debit = Decimal::ZERO;
    let mut total_credit = Decimal::ZERO;

    for (index, line) in lines.iter().enumerate() {
        let debit = round_to_cents(line.debit);
        let credit = round_to_cents(line.credit);
        if debit < Decimal::ZERO || credit < Decimal::ZERO {
            return Err(LedgerError::NegativeAmount { index });
        }
        let has_debit = debit > Decimal::ZERO;
        let has_credit = credit > Decimal::ZERO;
        if has_debit == has_credit {
            return Err(LedgerError::LineNotSingleSided { index });
        }
        total_debit += debit;
        total_credit += credit;
    }

    let totals = EntryTotals::new(total_debit, total_credit);
    if !totals.is_balanced {
        return Err(LedgerError::UnbalancedEntry {
            debit: totals.debit,
            credit: totals.credit,
        });
    }
    Ok(totals)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::account::{AccountStatus, AccountType};
    use crate::period::{PeriodKind, PeriodStatus};
    use partida_shared::types::PeriodId;
    use rust_decimal_macros::dec;
    use std::collections::HashMap;

    fn open_period() -> Period {
        Period {
            id: PeriodId::new(),
            start_date: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2026, 1, 31).unwrap(),
            kind: PeriodKind::Monthly,
            status: PeriodStatus::Open,
            description: None,
        }
    }

    fn make_account(code: &str) -> Account {
        Account {
            id: AccountId::new(),
            code: code.to_string(),
            name: code.to_string(),
            account_type: AccountType::Asset,
            level: 3,
            parent: None,
            accepts_movements: true,
            status: AccountStatus::Active,
        }
    }

    fn mid_january() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 15).unwrap()
    }

    fn registry(accounts: &[Account]) -> HashMap<AccountId, &Account> {
        accounts.iter().map(|a| (a.id, a)).collect()
    }

    #[test]
    fn test_balanced_entry_passes() {
        let period = open_period();
        let cash = make_account("1.1.01");
        let revenue = make_account("4.1.01");
        let accounts = [cash.clone(), revenue.clone()];
        let registry = registry(&accounts);

        let lines = vec![
            EntryLine::debit(cash.id, dec!(100.00)),
            EntryLine::credit(revenue.id, dec!(100.00)),
        ];
        let totals = validate_entry(&period, mid_january(), &lines, |id| {
            registry.get(&id).copied()
        })
        .unwrap();

        assert_eq!(totals.debit, dec!(100.00));
        assert_eq!(totals.credit, dec!(100.00));
        assert!(totals.is_balanced);
    }

    #[test]
    fn test_closed_period_rejected_before_anything_else() {
        let mut period = open_period();
        period.status = PeriodStatus::Closed;

        // Even an empty line list reports the period first.
        let err = validate_entry(&period, mid_january(), &[], |_| None).unwrap_err();
        assert!(matches!(err, LedgerError::PeriodClosed(_)));
    }

    #[test]
    fn test_date_outside_period_rejected() {
        let period = open_period();
        let date = NaiveDate::from_ymd_opt(2026, 2, 1).unwrap();
        let err = validate_entry(&period, date, &[], |_| None).unwrap_err();
        assert!(matches!(err, LedgerError::DateOutsidePeriod { .. }));
    }

    #[test]
    fn test_empty_lines_rejected() {
        let period = open_period();
        let err = validate_entry(&period, mid_january(), &[], |_| None).unwrap_err();
        assert!(matches!(err, LedgerError::NoLines));
    }

    #[test]
    fn test_unknown_account_rejected() {
        let period = open_period();
        let lines = vec![EntryLine::debit(AccountId::new(), dec!(10.00))];
        let err = validate_entry(&period, mid_january(), &lines, |_| None).unwrap_err();
        assert!(matches!(err, LedgerError::AccountNotFound(_)));
    }

    #[test]
    fn test_inactive_account_rejected() {
        let period = open_period();
        let mut cash = make_account("1.1.01");
        cash.status = AccountStatus::Inactive;
        let accounts = [cash.clone()];
        let registry = registry(&accounts);

        let lines = vec![EntryLine::debit(cash.id, dec!(10.00))];
        let err = validate_entry(&period, mid_january(), &lines, |id| {
            registry.get(&id).copied()
        })
        .unwrap_err();
        assert!(matches!(err, LedgerError::AccountInactive(_)));
    }

    #[test]
    fn test_grouping_account_rejected() {
        let period = open_period();
        let mut group = make_account("1.1");
        group.accepts_movements = false;
        let accounts = [group.clone()];
        let registry = registry(&accounts);

        let lines = vec![EntryLine::debit(group.id, dec!(10.00))];
        let err = validate_entry(&period, mid_january(), &lines, |id| {
            registry.get(&id).copied()
        })
        .unwrap_err();
        assert!(matches!(err, LedgerError::AccountNoMovements(_)));
    }

    #[test]
    fn test_line_with_both_sides_zero_rejected() {
        let lines = vec![EntryLine {
            account_id: AccountId::new(),
            description: None,
            debit: dec!(0),
            credit: dec!(0),
        }];
        let err = validate_lines(&lines).unwrap_err();
        assert!(matches!(err, LedgerError::LineNotSingleSided { index: 0 }));
    }

    #[test]
    fn test_line_with_both_sides_positive_rejected() {
        let lines = vec![EntryLine {
            account_id: AccountId::new(),
            description: None,
            debit: dec!(10.00),
            credit: dec!(10.00),
        }];
        let err = validate_lines(&lines).unwrap_err();
        assert!(matches!(err, LedgerError::LineNotSingleSided { index: 0 }));
    }

    #[test]
    fn test_negative_amount_rejected() {
        let lines = vec![
            EntryLine::debit(AccountId::new(), dec!(10.00)),
            EntryLine {
                account_id: AccountId::new(),
                description: None,
                debit: dec!(0),
                credit: dec!(-10.00),
            },
        ];
        let err = validate_lines(&lines).unwrap_err();
        assert!(matches!(err, LedgerError::NegativeAmount { index: 1 }));
    }

    #[test]
    fn test_one_cent_difference_is_unbalanced() {
        let lines = vec![
            EntryLine::debit(AccountId::new(), dec!(100.00)),
            EntryLine::credit(AccountId::new(), dec!(99.99)),
        ];
        let err = validate_lines(&lines).unwrap_err();
        match err {
            LedgerError::UnbalancedEntry { debit, credit } => {
                assert_eq!(debit, dec!(100.00));
                assert_eq!(credit, dec!(99.99));
            }
            other => panic!("expected UnbalancedEntry, got {other}"),
        }
    }

    #[test]
    fn test_sub_cent_amounts_validate_as_rounded() {
        // A hand-built 10.004 debit is the same entry as a 10.00 debit:
        // validation and storage both see the rounded amount.
        let lines = vec![
            EntryLine {
                account_id: AccountId::new(),
                description: None,
                debit: dec!(10.004),
                credit: dec!(0),
            },
            EntryLine::credit(AccountId::new(), dec!(10.00)),
        ];
        let totals = validate_lines(&lines).unwrap();
        assert!(totals.is_balanced);
        assert_eq!(totals.debit, dec!(10.00));
    }

    #[test]
    fn test_sub_cent_only_line_rejected() {
        // 0.004 rounds to zero, leaving the line with no positive side.
        let lines = vec![EntryLine {
            account_id: AccountId::new(),
            description: None,
            debit: dec!(0.004),
            credit: dec!(0),
        }];
        let err = validate_lines(&lines).unwrap_err();
        assert!(matches!(err, LedgerError::LineNotSingleSided { index: 0 }));
    }

    #[test]
    fn test_multi_line_split_balances() {
        let lines = vec![
            EntryLine::debit(AccountId::new(), dec!(60.00)),
            EntryLine::debit(AccountId::new(), dec!(40.00)),
            EntryLine::credit(AccountId::new(), dec!(100.00)),
        ];
        let totals = validate_lines(&lines).unwrap();
        assert!(totals.is_balanced);
        assert_eq!(totals.debit, dec!(100.00));
    }
}
