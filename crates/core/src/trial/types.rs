//! Trial balance types.

use chrono::{DateTime, NaiveDate, Utc};
use partida_shared::amount::within_tolerance;
use partida_shared::types::{AccountId, PeriodId, TrialBalanceId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::account::{AccountType, Nature};
use crate::posting::MovementSource;

/// One account's row in a trial balance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrialBalanceRow {
    /// The account.
    pub account_id: AccountId,
    /// Account code.
    pub code: String,
    /// Account name.
    pub name: String,
    /// Account type.
    pub account_type: AccountType,
    /// The nature the account was posted under.
    pub nature: Nature,
    /// Opening balance, when the period has one for this account.
    pub opening_balance: Option<Decimal>,
    /// Total debits up to the cutoff.
    pub total_debit: Decimal,
    /// Total credits up to the cutoff.
    pub total_credit: Decimal,
    /// Signed closing balance under the account's nature.
    pub closing_balance: Decimal,
    /// Closing balance presented in the debit column. Zero when the
    /// balance sits on the credit side.
    pub closing_debit: Decimal,
    /// Closing balance presented in the credit column.
    pub closing_credit: Decimal,
}

/// Column totals and the cuadre check for a trial balance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrialBalanceTotals {
    /// Sum of the movement debit column.
    pub total_debit: Decimal,
    /// Sum of the movement credit column.
    pub total_credit: Decimal,
    /// Sum of the closing debit column.
    pub total_closing_debit: Decimal,
    /// Sum of the closing credit column.
    pub total_closing_credit: Decimal,
    /// `total_debit - total_credit`.
    pub movement_difference: Decimal,
    /// `total_closing_debit - total_closing_credit`.
    pub closing_difference: Decimal,
    /// True when both differences are within the one-cent tolerance.
    /// False marks the snapshot out of balance; it is still produced.
    pub is_balanced: bool,
}

impl TrialBalanceTotals {
    /// Computes totals from the rows.
    #[must_use]
    pub fn from_rows(rows: &[TrialBalanceRow]) -> Self {
        let total_debit: Decimal = rows.iter().map(|r| r.total_debit).sum();
        let total_credit: Decimal = rows.iter().map(|r| r.total_credit).sum();
        let total_closing_debit: Decimal = rows.iter().map(|r| r.closing_debit).sum();
        let total_closing_credit: Decimal = rows.iter().map(|r| r.closing_credit).sum();
        let is_balanced = within_tolerance(total_debit, total_credit)
            && within_tolerance(total_closing_debit, total_closing_credit);
        Self {
            total_debit,
            total_credit,
            total_closing_debit,
            total_closing_credit,
            movement_difference: total_debit - total_credit,
            closing_difference: total_closing_debit - total_closing_credit,
            is_balanced,
        }
    }
}

/// A generated trial balance. Regenerating for the same (period, cutoff)
/// replaces the stored snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrialBalanceSnapshot {
    /// Unique identifier.
    pub id: TrialBalanceId,
    /// The period covered.
    pub period_id: PeriodId,
    /// Cutoff date (inclusive).
    pub cutoff: NaiveDate,
    /// When the snapshot was generated.
    pub generated_at: DateTime<Utc>,
    /// The user who requested it.
    pub generated_by: String,
    /// Account rows, sorted by code. Only accounts with an opening row or
    /// movements appear.
    pub rows: Vec<TrialBalanceRow>,
    /// Column totals and the cuadre flag.
    pub totals: TrialBalanceTotals,
}

/// An entry whose own lines do not balance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntryImbalance {
    /// The offending entry.
    pub source: MovementSource,
    /// Entry's total debit.
    pub debit: Decimal,
    /// Entry's total credit.
    pub credit: Decimal,
}

impl EntryImbalance {
    /// Returns `debit - credit` for the entry.
    #[must_use]
    pub fn difference(&self) -> Decimal {
        self.debit - self.credit
    }
}

/// Result of the period closure check: the aggregate cuadre verdict plus
/// the list of individually unbalanced entries behind any mismatch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClosureCheck {
    /// Period-wide total debit.
    pub total_debit: Decimal,
    /// Period-wide total credit.
    pub total_credit: Decimal,
    /// `total_debit - total_credit`.
    pub difference: Decimal,
    /// True when the difference is within the one-cent tolerance.
    pub is_balanced: bool,
    /// Entries whose own lines do not balance.
    pub unbalanced_entries: Vec<EntryImbalance>,
}
