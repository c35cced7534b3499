//! Error types for ledger operations.
//!
//! One taxonomy for the whole engine: validation errors (structurally
//! invalid entries), conflicts (duplicate rows, illegal state transitions),
//! not-found errors, and storage failures. An out-of-balance trial balance
//! or statement identity is NOT an error - it is a flag on the produced
//! snapshot, so the figures stay inspectable.

use chrono::NaiveDate;
use partida_shared::types::{AccountId, AdjustmentEntryId, OpeningBalanceId, PeriodId};
use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that can occur during ledger operations.
#[derive(Debug, Error)]
pub enum LedgerError {
    // ========== Validation Errors ==========
    /// Target period is closed, no posting allowed.
    #[error("Period {0} is closed, no posting allowed")]
    PeriodClosed(PeriodId),

    /// Entry date falls outside the target period's date range.
    #[error("Entry date {date} is outside the period's date range")]
    DateOutsidePeriod {
        /// The offending entry date.
        date: NaiveDate,
    },

    /// Entry has no lines.
    #[error("Entry must have at least one line")]
    NoLines,

    /// Account is inactive and cannot receive movements.
    #[error("Account {0} is inactive")]
    AccountInactive(AccountId),

    /// Account is a grouping account and does not accept movements.
    #[error("Account {0} does not accept movements")]
    AccountNoMovements(AccountId),

    /// Line has both sides zero or both sides positive.
    #[error("Line {index} must have exactly one of debit/credit positive")]
    LineNotSingleSided {
        /// Zero-based index of the offending line.
        index: usize,
    },

    /// Line has a negative debit or credit amount.
    #[error("Line {index} has a negative amount")]
    NegativeAmount {
        /// Zero-based index of the offending line.
        index: usize,
    },

    /// Entry lines do not balance exactly to the cent.
    #[error("Entry is not balanced. Debit: {debit}, Credit: {credit}")]
    UnbalancedEntry {
        /// Total debit across lines.
        debit: Decimal,
        /// Total credit across lines.
        credit: Decimal,
    },

    /// Cutoff date falls outside the period's date range.
    #[error("Cutoff date {cutoff} is outside the period's date range")]
    CutoffOutsidePeriod {
        /// The requested cutoff date.
        cutoff: NaiveDate,
    },

    /// Debtor-nature accounts cannot carry a negative opening balance.
    #[error("Account {0} has debtor nature and cannot have a negative opening balance")]
    NegativeOpeningBalance(AccountId),

    // ========== Conflict Errors ==========
    /// An Active opening balance already exists for this (period, account).
    #[error("An opening balance already exists for account {account} in period {period}")]
    DuplicateOpeningBalance {
        /// The target period.
        period: PeriodId,
        /// The account already seeded.
        account: AccountId,
    },

    /// Adjustment entry is already approved.
    #[error("Adjustment entry {0} is already approved")]
    AlreadyApproved(AdjustmentEntryId),

    /// Adjustment entry is annulled; no further transitions are allowed.
    #[error("Adjustment entry {0} is annulled")]
    AlreadyAnnulled(AdjustmentEntryId),

    /// Opening balance row is annulled and cannot be modified.
    #[error("Opening balance {0} is annulled")]
    OpeningBalanceAnnulled(OpeningBalanceId),

    // ========== Not Found Errors ==========
    /// Account not found in the registry.
    #[error("Account not found: {0}")]
    AccountNotFound(AccountId),

    /// Period not found.
    #[error("Period not found: {0}")]
    PeriodNotFound(PeriodId),

    /// Adjustment entry not found.
    #[error("Adjustment entry not found: {0}")]
    AdjustmentNotFound(AdjustmentEntryId),

    /// Opening balance row not found.
    #[error("Opening balance not found: {0}")]
    OpeningBalanceNotFound(OpeningBalanceId),

    // ========== Storage Errors ==========
    /// Infrastructure failure in the storage layer. Not retried by the
    /// core; surfaced verbatim for the caller to handle.
    #[error("Storage error: {0}")]
    Storage(String),
}

impl LedgerError {
    /// Returns the stable error code for this error.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::PeriodClosed(_) => "PERIOD_CLOSED",
            Self::DateOutsidePeriod { .. } => "DATE_OUTSIDE_PERIOD",
            Self::NoLines => "NO_LINES",
            Self::AccountInactive(_) => "ACCOUNT_INACTIVE",
            Self::AccountNoMovements(_) => "ACCOUNT_NO_MOVEMENTS",
            Self::LineNotSingleSided { .. } => "LINE_NOT_SINGLE_SIDED",
            Self::NegativeAmount { .. } => "NEGATIVE_AMOUNT",
            Self::UnbalancedEntry { .. } => "UNBALANCED_ENTRY",
            Self::CutoffOutsidePeriod { .. } => "CUTOFF_OUTSIDE_PERIOD",
            Self::NegativeOpeningBalance(_) => "NEGATIVE_OPENING_BALANCE",
            Self::DuplicateOpeningBalance { .. } => "DUPLICATE_OPENING_BALANCE",
            Self::AlreadyApproved(_) => "ALREADY_APPROVED",
            Self::AlreadyAnnulled(_) => "ALREADY_ANNULLED",
            Self::OpeningBalanceAnnulled(_) => "OPENING_BALANCE_ANNULLED",
            Self::AccountNotFound(_) => "ACCOUNT_NOT_FOUND",
            Self::PeriodNotFound(_) => "PERIOD_NOT_FOUND",
            Self::AdjustmentNotFound(_) => "ADJUSTMENT_NOT_FOUND",
            Self::OpeningBalanceNotFound(_) => "OPENING_BALANCE_NOT_FOUND",
            Self::Storage(_) => "STORAGE_ERROR",
        }
    }

    /// Returns true if this is a validation error (structurally invalid input).
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::PeriodClosed(_)
                | Self::DateOutsidePeriod { .. }
                | Self::NoLines
                | Self::AccountInactive(_)
                | Self::AccountNoMovements(_)
                | Self::LineNotSingleSided { .. }
                | Self::NegativeAmount { .. }
                | Self::UnbalancedEntry { .. }
                | Self::CutoffOutsidePeriod { .. }
                | Self::NegativeOpeningBalance(_)
        )
    }

    /// Returns true if this is a conflict (duplicate row or illegal transition).
    #[must_use]
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::DuplicateOpeningBalance { .. }
                | Self::AlreadyApproved(_)
                | Self::AlreadyAnnulled(_)
                | Self::OpeningBalanceAnnulled(_)
        )
    }

    /// Returns true if this is a not-found error.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::AccountNotFound(_)
                | Self::PeriodNotFound(_)
                | Self::AdjustmentNotFound(_)
                | Self::OpeningBalanceNotFound(_)
        )
    }
}
