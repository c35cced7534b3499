//! In-memory repository, used by tests and as the reference semantics for
//! real backends.

use std::collections::HashMap;
use std::sync::RwLock;

use chrono::NaiveDate;
use partida_shared::types::{AccountId, AdjustmentEntryId, OpeningBalanceId, PeriodId};

use crate::account::{Account, AccountPatch};
use crate::adjustment::AdjustmentEntry;
use crate::entry::JournalEntry;
use crate::error::LedgerError;
use crate::opening::OpeningBalance;
use crate::period::Period;
use crate::statement::FinancialStatementSnapshot;
use crate::trial::TrialBalanceSnapshot;

use super::repository::{PeriodData, Repository};

#[derive(Default)]
struct State {
    accounts: HashMap<AccountId, Account>,
    periods: HashMap<PeriodId, Period>,
    journal_entries: Vec<JournalEntry>,
    // Insertion order doubles as the numbering order.
    adjustments: Vec<AdjustmentEntry>,
    opening_balances: Vec<OpeningBalance>,
    trial_balances: HashMap<(PeriodId, NaiveDate), TrialBalanceSnapshot>,
    statements: Vec<FinancialStatementSnapshot>,
}

/// A [`Repository`] backed by a single `RwLock`.
///
/// Every method takes the lock once, so each repository call is atomic
/// with respect to the others. A poisoned lock surfaces as a storage
/// error.
#[derive(Default)]
pub struct MemoryRepository {
    state: RwLock<State>,
}

impl MemoryRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds an account. Test and bootstrap helper.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Storage`] if the lock is poisoned.
    pub fn insert_account(&self, account: Account) -> Result<(), LedgerError> {
        let mut state = self.write()?;
        state.accounts.insert(account.id, account);
        Ok(())
    }

    /// Applies a patch to a seeded account. Like the seeders, this is a
    /// chart-maintenance helper: the engine itself never mutates the chart.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::AccountNotFound`] when absent.
    pub fn update_account(
        &self,
        id: AccountId,
        patch: &AccountPatch,
    ) -> Result<Account, LedgerError> {
        let mut state = self.write()?;
        let account = state
            .accounts
            .get_mut(&id)
            .ok_or(LedgerError::AccountNotFound(id))?;
        patch.apply(account);
        Ok(account.clone())
    }

    /// Seeds a period. Test and bootstrap helper.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Storage`] if the lock is poisoned.
    pub fn insert_period(&self, period: Period) -> Result<(), LedgerError> {
        let mut state = self.write()?;
        state.periods.insert(period.id, period);
        Ok(())
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, State>, LedgerError> {
        self.state
            .read()
            .map_err(|_| LedgerError::Storage("repository lock poisoned".to_string()))
    }

    fn write(&self) -> Result<std::sync::RwLockWriteGuard<'_, State>, LedgerError> {
        self.state
            .write()
            .map_err(|_| LedgerError::Storage("repository lock poisoned".to_string()))
    }
}

impl Repository for MemoryRepository {
    fn account(&self, id: AccountId) -> Result<Account, LedgerError> {
        self.read()?
            .accounts
            .get(&id)
            .cloned()
            .ok_or(LedgerError::AccountNotFound(id))
    }

    fn accounts(&self) -> Result<Vec<Account>, LedgerError> {
        let mut accounts: Vec<_> = self.read()?.accounts.values().cloned().collect();
        accounts.sort_by(|a, b| a.code.cmp(&b.code));
        Ok(accounts)
    }

    fn period(&self, id: PeriodId) -> Result<Period, LedgerError> {
        self.read()?
            .periods
            .get(&id)
            .cloned()
            .ok_or(LedgerError::PeriodNotFound(id))
    }

    fn insert_journal_entry(&self, entry: JournalEntry) -> Result<(), LedgerError> {
        self.write()?.journal_entries.push(entry);
        Ok(())
    }

    fn journal_entries(&self, period: PeriodId) -> Result<Vec<JournalEntry>, LedgerError> {
        Ok(self
            .read()?
            .journal_entries
            .iter()
            .filter(|entry| entry.period_id == period)
            .cloned()
            .collect())
    }

    fn insert_adjustment(&self, entry: AdjustmentEntry) -> Result<(), LedgerError> {
        self.write()?.adjustments.push(entry);
        Ok(())
    }

    fn adjustment(&self, id: AdjustmentEntryId) -> Result<AdjustmentEntry, LedgerError> {
        self.read()?
            .adjustments
            .iter()
            .find(|entry| entry.id == id)
            .cloned()
            .ok_or(LedgerError::AdjustmentNotFound(id))
    }

    fn adjustments(&self, period: PeriodId) -> Result<Vec<AdjustmentEntry>, LedgerError> {
        Ok(self
            .read()?
            .adjustments
            .iter()
            .filter(|entry| entry.period_id == period)
            .cloned()
            .collect())
    }

    fn period_data(&self, period: PeriodId) -> Result<PeriodData, LedgerError> {
        // One lock acquisition covers all three collections, so the
        // returned view is a consistent snapshot.
        let state = self.read()?;
        Ok(PeriodData {
            journal_entries: state
                .journal_entries
                .iter()
                .filter(|entry| entry.period_id == period)
                .cloned()
                .collect(),
            adjustments: state
                .adjustments
                .iter()
                .filter(|entry| entry.period_id == period)
                .cloned()
                .collect(),
            opening_balances: state
                .opening_balances
                .iter()
                .filter(|row| row.period_id == period)
                .cloned()
                .collect(),
        })
    }

    fn last_adjustment_number(&self) -> Result<Option<String>, LedgerError> {
        Ok(self
            .read()?
            .adjustments
            .last()
            .map(|entry| entry.number.clone()))
    }

    fn update_adjustment(
        &self,
        id: AdjustmentEntryId,
        apply: impl FnOnce(&mut AdjustmentEntry) -> Result<(), LedgerError>,
    ) -> Result<AdjustmentEntry, LedgerError> {
        let mut state = self.write()?;
        let entry = state
            .adjustments
            .iter_mut()
            .find(|entry| entry.id == id)
            .ok_or(LedgerError::AdjustmentNotFound(id))?;
        // Apply against a copy so a failing transition leaves the stored
        // row untouched.
        let mut updated = entry.clone();
        apply(&mut updated)?;
        *entry = updated.clone();
        Ok(updated)
    }

    fn opening_balance(
        &self,
        period: PeriodId,
        account: AccountId,
    ) -> Result<Option<OpeningBalance>, LedgerError> {
        Ok(self
            .read()?
            .opening_balances
            .iter()
            .find(|row| row.period_id == period && row.account_id == account && row.is_live())
            .cloned())
    }

    fn opening_balances(&self, period: PeriodId) -> Result<Vec<OpeningBalance>, LedgerError> {
        Ok(self
            .read()?
            .opening_balances
            .iter()
            .filter(|row| row.period_id == period)
            .cloned()
            .collect())
    }

    fn insert_opening_balance(&self, row: OpeningBalance) -> Result<(), LedgerError> {
        let mut state = self.write()?;
        let duplicate = state.opening_balances.iter().any(|existing| {
            existing.period_id == row.period_id
                && existing.account_id == row.account_id
                && existing.is_live()
        });
        if duplicate {
            return Err(LedgerError::DuplicateOpeningBalance {
                period: row.period_id,
                account: row.account_id,
            });
        }
        state.opening_balances.push(row);
        Ok(())
    }

    fn update_opening_balance(
        &self,
        id: OpeningBalanceId,
        apply: impl FnOnce(&mut OpeningBalance) -> Result<(), LedgerError>,
    ) -> Result<OpeningBalance, LedgerError> {
        let mut state = self.write()?;
        let row = state
            .opening_balances
            .iter_mut()
            .find(|row| row.id == id)
            .ok_or(LedgerError::OpeningBalanceNotFound(id))?;
        let mut updated = row.clone();
        apply(&mut updated)?;
        *row = updated.clone();
        Ok(updated)
    }

    fn upsert_trial_balance(&self, snapshot: TrialBalanceSnapshot) -> Result<(), LedgerError> {
        self.write()?
            .trial_balances
            .insert((snapshot.period_id, snapshot.cutoff), snapshot);
        Ok(())
    }

    fn trial_balance(
        &self,
        period: PeriodId,
        cutoff: NaiveDate,
    ) -> Result<Option<TrialBalanceSnapshot>, LedgerError> {
        Ok(self.read()?.trial_balances.get(&(period, cutoff)).cloned())
    }

    fn trial_balances(&self, period: PeriodId) -> Result<Vec<TrialBalanceSnapshot>, LedgerError> {
        let mut snapshots: Vec<_> = self
            .read()?
            .trial_balances
            .values()
            .filter(|snapshot| snapshot.period_id == period)
            .cloned()
            .collect();
        snapshots.sort_by(|a, b| b.generated_at.cmp(&a.generated_at));
        Ok(snapshots)
    }

    fn append_statement(&self, snapshot: FinancialStatementSnapshot) -> Result<(), LedgerError> {
        self.write()?.statements.push(snapshot);
        Ok(())
    }

    fn statements(&self, period: PeriodId) -> Result<Vec<FinancialStatementSnapshot>, LedgerError> {
        Ok(self
            .read()?
            .statements
            .iter()
            .filter(|snapshot| snapshot.period_id == period)
            .cloned()
            .collect())
    }
}
