//! Opening balance domain types.

use chrono::NaiveDate;
use partida_shared::amount::round_to_cents;
use partida_shared::types::{AccountId, OpeningBalanceId, PeriodId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::account::{Account, AccountType, Nature};
use crate::error::LedgerError;

/// Status of an opening balance row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OpeningBalanceStatus {
    /// Row is live and seeds the ledger.
    Active,
    /// Row has been amended since it was first recorded. Still live.
    Modified,
    /// Row is annulled and ignored by the ledger.
    Annulled,
}

/// Input for recording a new opening balance.
#[derive(Debug, Clone)]
pub struct OpeningBalanceDraft {
    /// Target period.
    pub period_id: PeriodId,
    /// The account being seeded.
    pub account_id: AccountId,
    /// Balance amount, in the account's natural side.
    pub amount: Decimal,
    /// Effective date of the balance.
    pub recorded_on: NaiveDate,
    /// The user recording the balance.
    pub recorded_by: String,
    /// Free-form notes.
    pub notes: Option<String>,
}

/// An account's balance at the start of a period.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpeningBalance {
    /// Unique identifier.
    pub id: OpeningBalanceId,
    /// The period this balance opens.
    pub period_id: PeriodId,
    /// The account being seeded.
    pub account_id: AccountId,
    /// Balance amount, in the account's natural side. May be negative for
    /// creditor-nature accounts.
    pub amount: Decimal,
    /// The side the balance sits on. Recorded explicitly so the ledger
    /// keeps its convention even if the account is later reclassified.
    pub nature: Nature,
    /// Row status.
    pub status: OpeningBalanceStatus,
    /// Effective date of the balance.
    pub recorded_on: NaiveDate,
    /// The user who recorded the balance.
    pub recorded_by: String,
    /// Free-form notes.
    pub notes: Option<String>,
}

impl OpeningBalance {
    /// Builds an opening balance from a draft, after validating the amount
    /// against the account's nature.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::NegativeOpeningBalance`] when the account is
    /// debtor-nature and the amount is negative.
    pub fn from_draft(draft: OpeningBalanceDraft, account: &Account) -> Result<Self, LedgerError> {
        let amount = round_to_cents(draft.amount);
        let nature = account.nature();
        if nature == Nature::Debtor && amount < Decimal::ZERO {
            return Err(LedgerError::NegativeOpeningBalance(account.id));
        }
        Ok(Self {
            id: OpeningBalanceId::new(),
            period_id: draft.period_id,
            account_id: draft.account_id,
            amount,
            nature,
            status: OpeningBalanceStatus::Active,
            recorded_on: draft.recorded_on,
            recorded_by: draft.recorded_by,
            notes: draft.notes,
        })
    }

    /// Returns true if this row seeds the ledger (Active or Modified).
    #[must_use]
    pub fn is_live(&self) -> bool {
        self.status != OpeningBalanceStatus::Annulled
    }
}

/// Typed patch for amending an opening balance.
#[derive(Debug, Clone, Default)]
pub struct OpeningBalancePatch {
    /// New amount.
    pub amount: Option<Decimal>,
    /// New notes.
    pub notes: Option<String>,
}

impl OpeningBalancePatch {
    /// Applies the patch, moving the row to Modified.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::OpeningBalanceAnnulled`] for annulled rows,
    /// or [`LedgerError::NegativeOpeningBalance`] when the new amount is
    /// negative on a debtor-nature row.
    pub fn apply(&self, balance: &mut OpeningBalance) -> Result<(), LedgerError> {
        if balance.status == OpeningBalanceStatus::Annulled {
            return Err(LedgerError::OpeningBalanceAnnulled(balance.id));
        }
        if let Some(amount) = self.amount {
            let amount = round_to_cents(amount);
            if balance.nature == Nature::Debtor && amount < Decimal::ZERO {
                return Err(LedgerError::NegativeOpeningBalance(balance.account_id));
            }
            balance.amount = amount;
        }
        if let Some(notes) = &self.notes {
            balance.notes = Some(notes.clone());
        }
        balance.status = OpeningBalanceStatus::Modified;
        Ok(())
    }
}

/// Per-account-type subtotal within an [`OpeningBalanceSummary`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpeningBalanceTypeSummary {
    /// The account type.
    pub account_type: AccountType,
    /// Number of live seeded accounts of this type.
    pub accounts: usize,
    /// Sum of the live balances, in each row's recorded side.
    pub total: Decimal,
}

/// Aggregate view of a period's live opening balances.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpeningBalanceSummary {
    /// The summarized period.
    pub period_id: PeriodId,
    /// Subtotals per account type, in chart order. Types with no live row
    /// are omitted.
    pub by_type: Vec<OpeningBalanceTypeSummary>,
    /// Number of live seeded accounts.
    pub accounts: usize,
    /// Sum of balances sitting on the debtor side.
    pub total_debtor: Decimal,
    /// Sum of balances sitting on the creditor side.
    pub total_creditor: Decimal,
}

impl OpeningBalanceSummary {
    /// Aggregates a period's live rows. `account_type_of` resolves each
    /// row's account type from the chart.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::AccountNotFound`] when a row references an
    /// account missing from the chart.
    pub fn build(
        period_id: PeriodId,
        rows: &[OpeningBalance],
        account_type_of: impl Fn(AccountId) -> Option<AccountType>,
    ) -> Result<Self, LedgerError> {
        let mut summary = Self {
            period_id,
            by_type: Vec::new(),
            accounts: 0,
            total_debtor: Decimal::ZERO,
            total_creditor: Decimal::ZERO,
        };

        for row in rows.iter().filter(|row| row.is_live()) {
            let account_type = account_type_of(row.account_id)
                .ok_or(LedgerError::AccountNotFound(row.account_id))?;
            summary.accounts += 1;
            match row.nature {
                Nature::Debtor => summary.total_debtor += row.amount,
                Nature::Creditor => summary.total_creditor += row.amount,
            }
            match summary
                .by_type
                .iter_mut()
                .find(|subtotal| subtotal.account_type == account_type)
            {
                Some(subtotal) => {
                    subtotal.accounts += 1;
                    subtotal.total += row.amount;
                }
                None => summary.by_type.push(OpeningBalanceTypeSummary {
                    account_type,
                    accounts: 1,
                    total: row.amount,
                }),
            }
        }

        summary
            .by_type
            .sort_by_key(|subtotal| {
                AccountType::ALL
                    .iter()
                    .position(|t| *t == subtotal.account_type)
            });
        Ok(summary)
    }
}
