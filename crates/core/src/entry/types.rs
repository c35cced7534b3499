//! Journal entry domain types.

use chrono::NaiveDate;
use partida_shared::amount::{cents_equal, round_to_cents};
use partida_shared::types::{AccountId, JournalEntryId, PeriodId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single debit or credit line within an entry.
///
/// Exactly one of `debit`/`credit` is strictly positive; the other is
/// exactly zero. The validator enforces this; the constructors below can
/// only build well-formed lines.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntryLine {
    /// The account this line posts to.
    pub account_id: AccountId,
    /// Optional line-level description.
    pub description: Option<String>,
    /// Debit amount (zero for credit lines).
    pub debit: Decimal,
    /// Credit amount (zero for debit lines).
    pub credit: Decimal,
}

impl EntryLine {
    /// Creates a debit line, rounded to the unit of account.
    #[must_use]
    pub fn debit(account_id: AccountId, amount: Decimal) -> Self {
        Self {
            account_id,
            description: None,
            debit: round_to_cents(amount),
            credit: Decimal::ZERO,
        }
    }

    /// Creates a credit line, rounded to the unit of account.
    #[must_use]
    pub fn credit(account_id: AccountId, amount: Decimal) -> Self {
        Self {
            account_id,
            description: None,
            debit: Decimal::ZERO,
            credit: round_to_cents(amount),
        }
    }

    /// Attaches a description to the line.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Rounds both sides to the unit of account.
    ///
    /// Hand-built lines may carry sub-cent amounts; entries are stored
    /// normalized so the posted amounts match the validated totals.
    pub fn normalize(&mut self) {
        self.debit = round_to_cents(self.debit);
        self.credit = round_to_cents(self.credit);
    }
}

/// Input for creating a new journal entry.
#[derive(Debug, Clone)]
pub struct JournalEntryDraft {
    /// Target period.
    pub period_id: PeriodId,
    /// Entry date; must fall inside the target period.
    pub date: NaiveDate,
    /// Entry description.
    pub description: String,
    /// Optional reference number (e.g. invoice number).
    pub reference: Option<String>,
    /// The entry lines.
    pub lines: Vec<EntryLine>,
    /// The user creating the entry.
    pub created_by: String,
}

/// A recorded journal entry. Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalEntry {
    /// Unique identifier.
    pub id: JournalEntryId,
    /// The period this entry belongs to.
    pub period_id: PeriodId,
    /// Entry date.
    pub date: NaiveDate,
    /// Entry description.
    pub description: String,
    /// Optional reference number.
    pub reference: Option<String>,
    /// The entry lines, in input order.
    pub lines: Vec<EntryLine>,
    /// The user who created the entry.
    pub created_by: String,
}

impl JournalEntry {
    /// Builds a persisted entry from a validated draft. Line amounts are
    /// normalized to the unit of account.
    #[must_use]
    pub fn from_draft(draft: JournalEntryDraft) -> Self {
        let mut lines = draft.lines;
        for line in &mut lines {
            line.normalize();
        }
        Self {
            id: JournalEntryId::new(),
            period_id: draft.period_id,
            date: draft.date,
            description: draft.description,
            reference: draft.reference,
            lines,
            created_by: draft.created_by,
        }
    }
}

/// Debit/credit totals across an entry's lines.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntryTotals {
    /// Total debit across lines.
    pub debit: Decimal,
    /// Total credit across lines.
    pub credit: Decimal,
    /// Whether debits equal credits exactly to the cent.
    pub is_balanced: bool,
}

impl EntryTotals {
    /// Creates totals from debit and credit sums.
    #[must_use]
    pub fn new(debit: Decimal, credit: Decimal) -> Self {
        Self {
            debit,
            credit,
            is_balanced: cents_equal(debit, credit),
        }
    }

    /// Returns the difference between debits and credits.
    #[must_use]
    pub fn difference(&self) -> Decimal {
        self.debit - self.credit
    }
}
