//! Account domain types and the nature sign convention.

use partida_shared::types::AccountId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Account type classification.
///
/// Determines the account's default nature and which statement it feeds:
/// Asset/Liability/Equity go to the balance sheet, Revenue/Expense to the
/// income statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    /// Resources owned (cash, receivables, inventory).
    Asset,
    /// Obligations owed (payables, loans).
    Liability,
    /// Owner's capital and retained results.
    Equity,
    /// Income earned in the period.
    Revenue,
    /// Costs incurred in the period.
    Expense,
}

impl AccountType {
    /// All five account types, for exhaustive iteration.
    pub const ALL: [Self; 5] = [
        Self::Asset,
        Self::Liability,
        Self::Equity,
        Self::Revenue,
        Self::Expense,
    ];

    /// Returns the default nature for this account type.
    ///
    /// Asset/Expense are debtor-nature (debits increase the balance);
    /// Liability/Equity/Revenue are creditor-nature (credits increase it).
    #[must_use]
    pub fn nature(self) -> Nature {
        match self {
            Self::Asset | Self::Expense => Nature::Debtor,
            Self::Liability | Self::Equity | Self::Revenue => Nature::Creditor,
        }
    }

    /// Returns true for balance-sheet account types, the only ones whose
    /// balances carry forward into the next period's opening balances.
    #[must_use]
    pub fn carries_forward(self) -> bool {
        matches!(self, Self::Asset | Self::Liability | Self::Equity)
    }

    /// Returns the string representation of the type.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Asset => "asset",
            Self::Liability => "liability",
            Self::Equity => "equity",
            Self::Revenue => "revenue",
            Self::Expense => "expense",
        }
    }
}

/// Balance nature: the sign convention for an account's running balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Nature {
    /// Debits increase the balance (Asset, Expense).
    Debtor,
    /// Credits increase the balance (Liability, Equity, Revenue).
    Creditor,
}

impl Nature {
    /// Returns the signed balance change for a movement under this nature.
    ///
    /// Debtor: `debit - credit`. Creditor: `credit - debit`.
    #[must_use]
    pub fn signed_change(self, debit: Decimal, credit: Decimal) -> Decimal {
        match self {
            Self::Debtor => debit - credit,
            Self::Creditor => credit - debit,
        }
    }

    /// Returns the side a running balance is reported on.
    ///
    /// A non-negative balance sits on the account's natural side; a
    /// negative balance flips to the opposite side.
    #[must_use]
    pub fn reported_side(self, balance: Decimal) -> Self {
        if balance >= Decimal::ZERO {
            self
        } else {
            self.opposite()
        }
    }

    /// Splits a natured closing balance into (debit column, credit column)
    /// for trial balance presentation. Exactly one column is nonzero for a
    /// nonzero balance.
    #[must_use]
    pub fn column_split(self, balance: Decimal) -> (Decimal, Decimal) {
        let natural = balance.max(Decimal::ZERO);
        let flipped = (-balance).max(Decimal::ZERO);
        match self {
            Self::Debtor => (natural, flipped),
            Self::Creditor => (flipped, natural),
        }
    }

    /// Returns the opposite nature.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Debtor => Self::Creditor,
            Self::Creditor => Self::Debtor,
        }
    }
}

/// Account status controlling whether new movements may reference it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountStatus {
    /// Account may be referenced by new entry lines.
    Active,
    /// Account is retired; existing history remains, no new movements.
    Inactive,
}

/// A chart of accounts entry.
///
/// Grouping accounts (`accepts_movements = false`) exist only to structure
/// the hierarchy; entry lines may reference leaf accounts only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    /// Unique identifier.
    pub id: AccountId,
    /// Unique hierarchical code (e.g. "1.1.01").
    pub code: String,
    /// Display name.
    pub name: String,
    /// Account type.
    pub account_type: AccountType,
    /// Hierarchy level: 1 for roots, parent level + 1 otherwise.
    pub level: u8,
    /// Parent account, if any. Weak reference, lookup only.
    pub parent: Option<AccountId>,
    /// Whether entry lines may post to this account.
    pub accepts_movements: bool,
    /// Current status.
    pub status: AccountStatus,
}

impl Account {
    /// Returns true if new entry lines may reference this account.
    #[must_use]
    pub fn may_post(&self) -> bool {
        self.status == AccountStatus::Active && self.accepts_movements
    }

    /// Returns the account's default nature from its type.
    #[must_use]
    pub fn nature(&self) -> Nature {
        self.account_type.nature()
    }
}

/// Typed patch for account updates, applied field-by-field.
///
/// `None` leaves a field untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AccountPatch {
    /// New display name.
    pub name: Option<String>,
    /// New movement-acceptance flag.
    pub accepts_movements: Option<bool>,
    /// New status.
    pub status: Option<AccountStatus>,
}

impl AccountPatch {
    /// Applies the patch to an account, field by field.
    pub fn apply(&self, account: &mut Account) {
        if let Some(name) = &self.name {
            account.name.clone_from(name);
        }
        if let Some(accepts) = self.accepts_movements {
            account.accepts_movements = accepts;
        }
        if let Some(status) = self.status {
            account.status = status;
        }
    }
}
