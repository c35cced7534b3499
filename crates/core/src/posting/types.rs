//! Posted ledger types.

use chrono::NaiveDate;
use partida_shared::types::{AccountId, AdjustmentEntryId, JournalEntryId, PeriodId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::account::{AccountType, Nature};

/// The entry a ledger movement came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "kind", content = "id")]
pub enum MovementSource {
    /// A regular journal entry.
    Journal(JournalEntryId),
    /// An approved adjustment entry.
    Adjustment(AdjustmentEntryId),
}

impl MovementSource {
    /// Returns the underlying entry UUID, used as the same-date tiebreaker.
    /// Entry IDs are time-ordered, so this sorts same-date movements in
    /// creation order.
    #[must_use]
    pub fn sort_id(self) -> Uuid {
        match self {
            Self::Journal(id) => id.into_inner(),
            Self::Adjustment(id) => id.into_inner(),
        }
    }
}

/// One posted movement in an account's ledger, with the running balance
/// after it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerMovement {
    /// The entry this movement came from.
    pub source: MovementSource,
    /// Movement date.
    pub date: NaiveDate,
    /// Description, taken from the line or its entry.
    pub description: String,
    /// Reference: the journal entry's reference or the adjustment number.
    pub reference: Option<String>,
    /// Debit amount.
    pub debit: Decimal,
    /// Credit amount.
    pub credit: Decimal,
    /// Running balance before this movement.
    pub previous_balance: Decimal,
    /// Running balance after this movement.
    pub balance: Decimal,
    /// The side the running balance sits on. Flips from the account's
    /// nature when the balance goes negative.
    pub balance_side: Nature,
}

/// An account's fully posted ledger for a period.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountLedger {
    /// The account.
    pub account_id: AccountId,
    /// Account code, for presentation.
    pub code: String,
    /// Account name, for presentation.
    pub name: String,
    /// Account type.
    pub account_type: AccountType,
    /// The nature the fold ran under: the opening balance row's nature
    /// when one exists, the account type's default otherwise.
    pub nature: Nature,
    /// Opening balance, when the period has a live row for this account.
    pub opening_balance: Option<Decimal>,
    /// Posted movements in (date, entry id) order.
    pub movements: Vec<LedgerMovement>,
    /// Sum of debits across movements.
    pub total_debit: Decimal,
    /// Sum of credits across movements.
    pub total_credit: Decimal,
    /// Closing balance: opening (or zero) plus every signed change.
    pub closing_balance: Decimal,
}

impl AccountLedger {
    /// Returns the side the closing balance is reported on.
    #[must_use]
    pub fn closing_side(&self) -> Nature {
        self.nature.reported_side(self.closing_balance)
    }

    /// Returns true if the account had an opening row or any movement.
    /// Accounts with neither are omitted from reports by default.
    #[must_use]
    pub fn has_activity(&self) -> bool {
        self.opening_balance.is_some() || !self.movements.is_empty()
    }
}

/// The posted ledgers of every account in a period, sorted by account code.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FullLedger {
    /// The period posted.
    pub period_id: PeriodId,
    /// Cutoff date the posting ran to (inclusive).
    pub cutoff: NaiveDate,
    /// Per-account ledgers, sorted by account code.
    pub accounts: Vec<AccountLedger>,
}

impl FullLedger {
    /// Looks up an account's ledger by ID.
    #[must_use]
    pub fn account(&self, id: AccountId) -> Option<&AccountLedger> {
        self.accounts.iter().find(|ledger| ledger.account_id == id)
    }
}
