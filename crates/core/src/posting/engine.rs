//! The posting fold.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::account::Account;
use crate::opening::OpeningBalance;

use super::types::{AccountLedger, LedgerMovement, MovementSource};

/// An unposted movement against a single account, extracted from a journal
/// or adjustment entry line.
#[derive(Debug, Clone)]
pub struct RawMovement {
    /// The entry this movement came from.
    pub source: MovementSource,
    /// Movement date.
    pub date: NaiveDate,
    /// Description, from the line or its entry.
    pub description: String,
    /// Reference: the journal entry's reference or the adjustment number.
    pub reference: Option<String>,
    /// Debit amount.
    pub debit: Decimal,
    /// Credit amount.
    pub credit: Decimal,
}

/// Posts one account's movements into a running-balance ledger.
///
/// Movements after `cutoff` are dropped. The remainder are sorted by
/// (date, entry id) so replays over the same inputs produce identical
/// ledgers. The fold starts from the opening balance when a live row
/// exists (using its recorded nature), otherwise from zero under the
/// account type's default nature.
#[must_use]
pub fn post_account(
    account: &Account,
    opening: Option<&OpeningBalance>,
    mut raw: Vec<RawMovement>,
    cutoff: NaiveDate,
) -> AccountLedger {
    let opening = opening.filter(|row| row.is_live());
    let nature = opening.map_or_else(|| account.nature(), |row| row.nature);

    raw.retain(|movement| movement.date <= cutoff);
    raw.sort_by_key(|movement| (movement.date, movement.source.sort_id()));

    let opening_amount = opening.map(|row| row.amount);
    let mut balance = opening_amount.unwrap_or(Decimal::ZERO);
    let mut total_debit = Decimal::ZERO;
    let mut total_credit = Decimal::ZERO;
    let mut movements = Vec::with_capacity(raw.len());

    for movement in raw {
        let previous_balance = balance;
        balance += nature.signed_change(movement.debit, movement.credit);
        total_debit += movement.debit;
        total_credit += movement.credit;
        movements.push(LedgerMovement {
            source: movement.source,
            date: movement.date,
            description: movement.description,
            reference: movement.reference,
            debit: movement.debit,
            credit: movement.credit,
            previous_balance,
            balance,
            balance_side: nature.reported_side(balance),
        });
    }

    AccountLedger {
        account_id: account.id,
        code: account.code.clone(),
        name: account.name.clone(),
        account_type: account.account_type,
        nature,
        opening_balance: opening_amount,
        movements,
        total_debit,
        total_credit,
        closing_balance: balance,
    }
}
