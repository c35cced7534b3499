//! Storage abstraction for the ledger engine.

use chrono::NaiveDate;
use partida_shared::types::{AccountId, AdjustmentEntryId, OpeningBalanceId, PeriodId};

use crate::account::Account;
use crate::adjustment::AdjustmentEntry;
use crate::entry::JournalEntry;
use crate::error::LedgerError;
use crate::opening::OpeningBalance;
use crate::period::Period;
use crate::statement::FinancialStatementSnapshot;
use crate::trial::TrialBalanceSnapshot;

/// A period's recorded activity, fetched in one atomic read.
///
/// Aggregations consume this instead of separate per-collection reads so a
/// concurrent writer can never leave the view torn across collections: an
/// adjustment recorded after a journal entry is never visible without that
/// entry.
#[derive(Debug, Clone)]
pub struct PeriodData {
    /// The period's journal entries.
    pub journal_entries: Vec<JournalEntry>,
    /// The period's adjustment entries, every status.
    pub adjustments: Vec<AdjustmentEntry>,
    /// The period's opening balances, annulled rows included.
    pub opening_balances: Vec<OpeningBalance>,
}

/// Storage operations the engine needs.
///
/// Implementations must make each method atomic: the update methods take a
/// closure and run it against the current row under whatever concurrency
/// control the store provides (a lock, a transaction, a compare-and-swap
/// loop). A closure returning an error aborts the update and leaves the
/// row untouched. [`Repository::period_data`] must read all three
/// collections under one lock or transaction.
pub trait Repository: Send + Sync {
    /// Fetches an account.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::AccountNotFound`] when absent.
    fn account(&self, id: AccountId) -> Result<Account, LedgerError>;

    /// Lists every account in the chart.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Storage`] on infrastructure failure.
    fn accounts(&self) -> Result<Vec<Account>, LedgerError>;

    /// Fetches a period.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::PeriodNotFound`] when absent.
    fn period(&self, id: PeriodId) -> Result<Period, LedgerError>;

    /// Persists a validated journal entry.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Storage`] on infrastructure failure.
    fn insert_journal_entry(&self, entry: JournalEntry) -> Result<(), LedgerError>;

    /// Lists a period's journal entries.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Storage`] on infrastructure failure.
    fn journal_entries(&self, period: PeriodId) -> Result<Vec<JournalEntry>, LedgerError>;

    /// Persists a new adjustment entry.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Storage`] on infrastructure failure.
    fn insert_adjustment(&self, entry: AdjustmentEntry) -> Result<(), LedgerError>;

    /// Fetches an adjustment entry.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::AdjustmentNotFound`] when absent.
    fn adjustment(&self, id: AdjustmentEntryId) -> Result<AdjustmentEntry, LedgerError>;

    /// Lists a period's adjustment entries.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Storage`] on infrastructure failure.
    fn adjustments(&self, period: PeriodId) -> Result<Vec<AdjustmentEntry>, LedgerError>;

    /// Fetches a period's journal entries, adjustments and opening
    /// balances in one atomic read.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Storage`] on infrastructure failure.
    fn period_data(&self, period: PeriodId) -> Result<PeriodData, LedgerError>;

    /// Returns the most recently assigned adjustment number, across all
    /// periods.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Storage`] on infrastructure failure.
    fn last_adjustment_number(&self) -> Result<Option<String>, LedgerError>;

    /// Runs a state transition against an adjustment entry atomically.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::AdjustmentNotFound`] when absent, or the
    /// closure's error with the row left untouched.
    fn update_adjustment(
        &self,
        id: AdjustmentEntryId,
        apply: impl FnOnce(&mut AdjustmentEntry) -> Result<(), LedgerError>,
    ) -> Result<AdjustmentEntry, LedgerError>;

    /// Fetches the live opening balance for (period, account), if any.
    /// Annulled rows are not returned.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Storage`] on infrastructure failure.
    fn opening_balance(
        &self,
        period: PeriodId,
        account: AccountId,
    ) -> Result<Option<OpeningBalance>, LedgerError>;

    /// Lists a period's opening balances, annulled rows included.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Storage`] on infrastructure failure.
    fn opening_balances(&self, period: PeriodId) -> Result<Vec<OpeningBalance>, LedgerError>;

    /// Persists a new opening balance, enforcing at most one live row per
    /// (period, account) atomically.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::DuplicateOpeningBalance`] when a live row
    /// already exists.
    fn insert_opening_balance(&self, row: OpeningBalance) -> Result<(), LedgerError>;

    /// Runs an amendment against an opening balance atomically.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::OpeningBalanceNotFound`] when absent, or the
    /// closure's error with the row left untouched.
    fn update_opening_balance(
        &self,
        id: OpeningBalanceId,
        apply: impl FnOnce(&mut OpeningBalance) -> Result<(), LedgerError>,
    ) -> Result<OpeningBalance, LedgerError>;

    /// Stores a trial balance snapshot, replacing any previous snapshot
    /// for the same (period, cutoff).
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Storage`] on infrastructure failure.
    fn upsert_trial_balance(&self, snapshot: TrialBalanceSnapshot) -> Result<(), LedgerError>;

    /// Fetches the stored trial balance for (period, cutoff), if any.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Storage`] on infrastructure failure.
    fn trial_balance(
        &self,
        period: PeriodId,
        cutoff: NaiveDate,
    ) -> Result<Option<TrialBalanceSnapshot>, LedgerError>;

    /// Lists a period's stored trial balance snapshots, most recent
    /// generation first.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Storage`] on infrastructure failure.
    fn trial_balances(&self, period: PeriodId) -> Result<Vec<TrialBalanceSnapshot>, LedgerError>;

    /// Appends a statement to the period's history. Never replaces.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Storage`] on infrastructure failure.
    fn append_statement(&self, snapshot: FinancialStatementSnapshot) -> Result<(), LedgerError>;

    /// Lists a period's statement history in generation order.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Storage`] on infrastructure failure.
    fn statements(&self, period: PeriodId) -> Result<Vec<FinancialStatementSnapshot>, LedgerError>;
}
