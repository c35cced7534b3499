//! The ledger engine service.

use std::collections::HashMap;

use chrono::{NaiveDate, Utc};
use partida_shared::types::{AccountId, AdjustmentEntryId, OpeningBalanceId, PeriodId, StatementId};
use tracing::{debug, info};

use crate::account::Account;
use crate::adjustment::{self, AdjustmentEntry, AdjustmentEntryDraft, AdjustmentStatus};
use crate::entry::{validate_entry, EntryTotals, JournalEntry, JournalEntryDraft};
use crate::error::LedgerError;
use crate::opening::{
    carry_forward, ClosingBalance, OpeningBalance, OpeningBalanceDraft, OpeningBalancePatch,
    OpeningBalanceStatus, OpeningBalanceSummary,
};
use crate::period::Period;
use crate::posting::{post_account, AccountLedger, FullLedger, MovementSource, RawMovement};
use crate::statement::{
    derive_balance_sheet, derive_income_statement, FinancialStatementSnapshot, StatementKind,
    StatementSummary,
};
use crate::trial::{build_snapshot, check_closure, ClosureCheck, TrialBalanceSnapshot};

use super::repository::{PeriodData, Repository};

/// Outcome counts of a carry-forward run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CarryForwardReport {
    /// Opening balances created in the target period.
    pub created: usize,
    /// Accounts skipped because the target period already had a live row.
    pub skipped: usize,
}

/// Orchestrates validation, posting, workflow and reporting over a
/// repository.
pub struct LedgerEngine<R> {
    repo: R,
}

impl<R: Repository> LedgerEngine<R> {
    /// Creates an engine over the given repository.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Returns the underlying repository.
    pub fn repository(&self) -> &R {
        &self.repo
    }

    // ========== Entries ==========

    /// Dry-runs entry validation without persisting anything.
    ///
    /// # Errors
    ///
    /// Returns the first failing validation check.
    pub fn validate_entry(&self, draft: &JournalEntryDraft) -> Result<EntryTotals, LedgerError> {
        let period = self.repo.period(draft.period_id)?;
        let accounts = self.account_map()?;
        validate_entry(&period, draft.date, &draft.lines, |id| accounts.get(&id))
    }

    /// Validates and records a journal entry.
    ///
    /// Nothing is persisted when validation fails.
    ///
    /// # Errors
    ///
    /// Returns the first failing validation check, or a storage error.
    pub fn create_journal_entry(
        &self,
        draft: JournalEntryDraft,
    ) -> Result<JournalEntry, LedgerError> {
        let period = self.repo.period(draft.period_id)?;
        let accounts = self.account_map()?;
        let totals = validate_entry(&period, draft.date, &draft.lines, |id| accounts.get(&id))?;

        let entry = JournalEntry::from_draft(draft);
        info!(
            entry_id = %entry.id,
            period_id = %entry.period_id,
            debit = %totals.debit,
            "journal entry recorded"
        );
        self.repo.insert_journal_entry(entry.clone())?;
        Ok(entry)
    }

    // ========== Adjustments ==========

    /// Validates and records an adjustment entry in the pending state.
    ///
    /// Assigns the next PAJ number unless the draft carries one.
    ///
    /// # Errors
    ///
    /// Returns the first failing validation check, or a storage error.
    pub fn create_adjustment(
        &self,
        draft: AdjustmentEntryDraft,
    ) -> Result<AdjustmentEntry, LedgerError> {
        let period = self.repo.period(draft.period_id)?;
        let accounts = self.account_map()?;
        validate_entry(&period, draft.date, &draft.lines, |id| accounts.get(&id))?;

        let number = match draft.number {
            Some(number) => number,
            None => adjustment::next_entry_number(self.repo.last_adjustment_number()?.as_deref()),
        };
        let mut lines = draft.lines;
        for line in &mut lines {
            line.normalize();
        }
        let entry = AdjustmentEntry {
            id: AdjustmentEntryId::new(),
            period_id: draft.period_id,
            date: draft.date,
            number,
            description: draft.description,
            reason: draft.reason,
            kind: draft.kind,
            status: AdjustmentStatus::Active,
            approval: None,
            annulment: None,
            lines,
            created_by: draft.created_by,
            created_at: Utc::now(),
        };
        info!(entry_id = %entry.id, number = %entry.number, "adjustment entry recorded");
        self.repo.insert_adjustment(entry.clone())?;
        Ok(entry)
    }

    /// Approves a pending adjustment entry. First caller wins.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::AlreadyApproved`] or
    /// [`LedgerError::AlreadyAnnulled`] on an illegal transition.
    pub fn approve_adjustment(
        &self,
        id: AdjustmentEntryId,
        approved_by: &str,
    ) -> Result<AdjustmentEntry, LedgerError> {
        let entry = self
            .repo
            .update_adjustment(id, |entry| adjustment::approve(entry, approved_by, Utc::now()))?;
        info!(entry_id = %id, approved_by, "adjustment entry approved");
        Ok(entry)
    }

    /// Annuls an adjustment entry, pending or approved.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::AlreadyAnnulled`] when already annulled.
    pub fn annul_adjustment(
        &self,
        id: AdjustmentEntryId,
        annulled_by: &str,
    ) -> Result<AdjustmentEntry, LedgerError> {
        let entry = self
            .repo
            .update_adjustment(id, |entry| adjustment::annul(entry, annulled_by, Utc::now()))?;
        info!(entry_id = %id, annulled_by, "adjustment entry annulled");
        Ok(entry)
    }

    // ========== Opening balances ==========

    /// Records an opening balance for an account in a period.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::DuplicateOpeningBalance`] when the account is
    /// already seeded, or [`LedgerError::NegativeOpeningBalance`] for a
    /// negative amount on a debtor-nature account.
    pub fn record_opening_balance(
        &self,
        draft: OpeningBalanceDraft,
    ) -> Result<OpeningBalance, LedgerError> {
        let period = self.repo.period(draft.period_id)?;
        if !period.is_open() {
            return Err(LedgerError::PeriodClosed(period.id));
        }
        let account = self.repo.account(draft.account_id)?;
        let row = OpeningBalance::from_draft(draft, &account)?;
        self.repo.insert_opening_balance(row.clone())?;
        debug!(account_id = %row.account_id, amount = %row.amount, "opening balance recorded");
        Ok(row)
    }

    /// Amends an opening balance, moving it to the Modified status.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::OpeningBalanceAnnulled`] for annulled rows.
    pub fn amend_opening_balance(
        &self,
        id: OpeningBalanceId,
        patch: OpeningBalancePatch,
    ) -> Result<OpeningBalance, LedgerError> {
        self.repo.update_opening_balance(id, |row| patch.apply(row))
    }

    /// Annuls an opening balance. The account can then be seeded again.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::OpeningBalanceAnnulled`] when already
    /// annulled.
    pub fn annul_opening_balance(&self, id: OpeningBalanceId) -> Result<OpeningBalance, LedgerError> {
        self.repo.update_opening_balance(id, |row| {
            if row.status == OpeningBalanceStatus::Annulled {
                return Err(LedgerError::OpeningBalanceAnnulled(row.id));
            }
            row.status = OpeningBalanceStatus::Annulled;
            Ok(())
        })
    }

    /// Summarizes a period's live opening balances: per-account-type
    /// subtotals plus debtor/creditor grand totals.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::AccountNotFound`] when a row references an
    /// account missing from the chart.
    pub fn opening_balance_summary(
        &self,
        period_id: PeriodId,
    ) -> Result<OpeningBalanceSummary, LedgerError> {
        self.repo.period(period_id)?;
        let accounts = self.account_map()?;
        let rows = self.repo.opening_balances(period_id)?;
        OpeningBalanceSummary::build(period_id, &rows, |id| {
            accounts.get(&id).map(|account| account.account_type)
        })
    }

    /// Carries the source period's closing balances forward as the target
    /// period's opening balances.
    ///
    /// Idempotent: accounts already seeded in the target are skipped, so a
    /// re-run reports zero created. Income-statement accounts never carry.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::PeriodClosed`] when the target is closed, or
    /// a storage error.
    pub fn carry_forward_opening_balances(
        &self,
        source: PeriodId,
        target: PeriodId,
        recorded_by: &str,
    ) -> Result<CarryForwardReport, LedgerError> {
        let target_period = self.repo.period(target)?;
        if !target_period.is_open() {
            return Err(LedgerError::PeriodClosed(target));
        }

        let ledger = self.full_ledger(source, None, false)?;
        let closings: Vec<_> = ledger
            .accounts
            .iter()
            .map(|account| ClosingBalance {
                account_id: account.account_id,
                account_type: account.account_type,
                nature: account.closing_side(),
                amount: account.closing_balance.abs(),
            })
            .collect();

        let seeded = self
            .repo
            .opening_balances(target)?
            .into_iter()
            .filter(OpeningBalance::is_live)
            .map(|row| row.account_id)
            .collect();

        let outcome = carry_forward(
            target,
            &closings,
            &seeded,
            target_period.start_date,
            recorded_by,
        );

        let mut report = CarryForwardReport {
            created: 0,
            skipped: outcome.skipped,
        };
        for row in outcome.created {
            // A concurrent run may have seeded the account since we
            // listed; the duplicate is that run's win, not a failure.
            match self.repo.insert_opening_balance(row) {
                Ok(()) => report.created += 1,
                Err(LedgerError::DuplicateOpeningBalance { .. }) => report.skipped += 1,
                Err(err) => return Err(err),
            }
        }
        info!(
            source = %source,
            target = %target,
            created = report.created,
            skipped = report.skipped,
            "carry-forward complete"
        );
        Ok(report)
    }

    // ========== Posting ==========

    /// Posts one account's ledger for a period, up to an optional cutoff.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::CutoffOutsidePeriod`] for a cutoff outside
    /// the period's range.
    pub fn account_ledger(
        &self,
        period_id: PeriodId,
        account_id: AccountId,
        cutoff: Option<NaiveDate>,
    ) -> Result<AccountLedger, LedgerError> {
        let period = self.repo.period(period_id)?;
        let cutoff = resolve_cutoff(&period, cutoff)?;
        let account = self.repo.account(account_id)?;
        let data = self.repo.period_data(period_id)?;
        let opening = data
            .opening_balances
            .iter()
            .find(|row| row.account_id == account_id && row.is_live());
        let mut movements = collect_movements(&data);
        let raw = movements.remove(&account_id).unwrap_or_default();
        Ok(post_account(&account, opening, raw, cutoff))
    }

    /// Posts every account's ledger for a period, up to an optional cutoff.
    ///
    /// With `include_empty` the result covers the whole chart; without it,
    /// accounts with neither an opening row nor movements are dropped.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::CutoffOutsidePeriod`] for a cutoff outside
    /// the period's range.
    pub fn full_ledger(
        &self,
        period_id: PeriodId,
        cutoff: Option<NaiveDate>,
        include_empty: bool,
    ) -> Result<FullLedger, LedgerError> {
        let period = self.repo.period(period_id)?;
        let cutoff = resolve_cutoff(&period, cutoff)?;
        let accounts = self.repo.accounts()?;
        // Entries, adjustments and openings come from one atomic read, so
        // the posted view is never torn across the three collections.
        let data = self.repo.period_data(period_id)?;
        let mut movements = collect_movements(&data);
        let openings: HashMap<AccountId, &OpeningBalance> = data
            .opening_balances
            .iter()
            .filter(|row| row.is_live())
            .map(|row| (row.account_id, row))
            .collect();

        // The account list is code-sorted; the ledger keeps that order.
        let posted = accounts
            .iter()
            .map(|account| {
                let raw = movements.remove(&account.id).unwrap_or_default();
                post_account(account, openings.get(&account.id).copied(), raw, cutoff)
            })
            .filter(|ledger| include_empty || ledger.has_activity())
            .collect();

        Ok(FullLedger {
            period_id,
            cutoff,
            accounts: posted,
        })
    }

    // ========== Reports ==========

    /// Generates and stores the trial balance for a period at a cutoff.
    ///
    /// Regenerating for the same (period, cutoff) replaces the stored
    /// snapshot. An out-of-balance result is flagged on the snapshot, not
    /// an error.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::CutoffOutsidePeriod`] for a cutoff outside
    /// the period's range.
    pub fn generate_trial_balance(
        &self,
        period_id: PeriodId,
        cutoff: Option<NaiveDate>,
        generated_by: &str,
    ) -> Result<TrialBalanceSnapshot, LedgerError> {
        let ledger = self.full_ledger(period_id, cutoff, false)?;
        let snapshot = build_snapshot(&ledger, generated_by, Utc::now());
        info!(
            period_id = %period_id,
            cutoff = %snapshot.cutoff,
            is_balanced = snapshot.totals.is_balanced,
            "trial balance generated"
        );
        self.repo.upsert_trial_balance(snapshot.clone())?;
        Ok(snapshot)
    }

    /// Fetches the stored trial balance at a cutoff, defaulting to the
    /// period's end. Returns `None` when none has been generated.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::CutoffOutsidePeriod`] for a cutoff outside
    /// the period's range.
    pub fn stored_trial_balance(
        &self,
        period_id: PeriodId,
        cutoff: Option<NaiveDate>,
    ) -> Result<Option<TrialBalanceSnapshot>, LedgerError> {
        let period = self.repo.period(period_id)?;
        let cutoff = resolve_cutoff(&period, cutoff)?;
        self.repo.trial_balance(period_id, cutoff)
    }

    /// Lists a period's stored trial balance snapshots, most recent
    /// generation first.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::PeriodNotFound`] for an unknown period.
    pub fn trial_balance_history(
        &self,
        period_id: PeriodId,
    ) -> Result<Vec<TrialBalanceSnapshot>, LedgerError> {
        self.repo.period(period_id)?;
        self.repo.trial_balances(period_id)
    }

    /// Runs the period closure check up to an optional cutoff: period-wide
    /// debit/credit totals plus the list of individually unbalanced
    /// entries.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::CutoffOutsidePeriod`] for a cutoff outside
    /// the period's range.
    pub fn validate_closure(
        &self,
        period_id: PeriodId,
        cutoff: Option<NaiveDate>,
    ) -> Result<ClosureCheck, LedgerError> {
        let period = self.repo.period(period_id)?;
        let cutoff = resolve_cutoff(&period, cutoff)?;
        let data = self.repo.period_data(period_id)?;

        let entries = data
            .journal_entries
            .iter()
            .filter(|entry| entry.date <= cutoff)
            .map(|entry| (MovementSource::Journal(entry.id), entry.lines.as_slice()))
            .chain(
                data.adjustments
                    .iter()
                    .filter(|entry| entry.is_postable() && entry.date <= cutoff)
                    .map(|entry| (MovementSource::Adjustment(entry.id), entry.lines.as_slice())),
            );
        Ok(check_closure(entries))
    }

    /// Derives the balance sheet at a cutoff and appends it to the
    /// period's statement history.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::CutoffOutsidePeriod`] for a cutoff outside
    /// the period's range.
    pub fn generate_balance_sheet(
        &self,
        period_id: PeriodId,
        cutoff: Option<NaiveDate>,
        generated_by: &str,
    ) -> Result<FinancialStatementSnapshot, LedgerError> {
        let ledger = self.full_ledger(period_id, cutoff, false)?;
        let trial = build_snapshot(&ledger, generated_by, Utc::now());
        let accounts = self.repo.accounts()?;
        let sheet = derive_balance_sheet(&trial, &accounts);

        let summary = StatementSummary::BalanceSheet {
            total_assets: sheet.assets.total,
            total_liabilities: sheet.liabilities.total,
            total_equity: sheet.equity.total + sheet.period_result,
            is_balanced: sheet.is_balanced,
        };
        let snapshot = self.store_statement(
            StatementKind::BalanceSheet,
            period_id,
            trial.cutoff,
            generated_by,
            serde_json::to_value(&sheet).map_err(|err| LedgerError::Storage(err.to_string()))?,
            summary,
        )?;
        info!(
            period_id = %period_id,
            is_balanced = sheet.is_balanced,
            "balance sheet generated"
        );
        Ok(snapshot)
    }

    /// Derives the income statement at a cutoff and appends it to the
    /// period's statement history.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::CutoffOutsidePeriod`] for a cutoff outside
    /// the period's range.
    pub fn generate_income_statement(
        &self,
        period_id: PeriodId,
        cutoff: Option<NaiveDate>,
        generated_by: &str,
    ) -> Result<FinancialStatementSnapshot, LedgerError> {
        let ledger = self.full_ledger(period_id, cutoff, false)?;
        let trial = build_snapshot(&ledger, generated_by, Utc::now());
        let accounts = self.repo.accounts()?;
        let statement = derive_income_statement(&trial, &accounts);

        let summary = StatementSummary::IncomeStatement {
            total_revenue: statement.revenue.total,
            total_expenses: statement.expenses.total,
            net_result: statement.net_result,
        };
        let snapshot = self.store_statement(
            StatementKind::IncomeStatement,
            period_id,
            trial.cutoff,
            generated_by,
            serde_json::to_value(&statement)
                .map_err(|err| LedgerError::Storage(err.to_string()))?,
            summary,
        )?;
        info!(
            period_id = %period_id,
            net_result = %statement.net_result,
            "income statement generated"
        );
        Ok(snapshot)
    }

    /// Lists a period's statement history in generation order.
    ///
    /// # Errors
    ///
    /// Returns a storage error on infrastructure failure.
    pub fn statement_history(
        &self,
        period_id: PeriodId,
    ) -> Result<Vec<FinancialStatementSnapshot>, LedgerError> {
        self.repo.statements(period_id)
    }

    // ========== Internals ==========

    fn account_map(&self) -> Result<HashMap<AccountId, Account>, LedgerError> {
        Ok(self
            .repo
            .accounts()?
            .into_iter()
            .map(|account| (account.id, account))
            .collect())
    }

    fn store_statement(
        &self,
        kind: StatementKind,
        period_id: PeriodId,
        cutoff: NaiveDate,
        generated_by: &str,
        content: serde_json::Value,
        summary: StatementSummary,
    ) -> Result<FinancialStatementSnapshot, LedgerError> {
        let snapshot = FinancialStatementSnapshot {
            id: StatementId::new(),
            kind,
            period_id,
            cutoff,
            generated_at: Utc::now(),
            generated_by: generated_by.to_string(),
            content,
            summary,
        };
        self.repo.append_statement(snapshot.clone())?;
        Ok(snapshot)
    }
}

/// Flattens a period snapshot's journal entries and postable adjustments
/// into per-account raw movements.
fn collect_movements(data: &PeriodData) -> HashMap<AccountId, Vec<RawMovement>> {
    let mut by_account: HashMap<AccountId, Vec<RawMovement>> = HashMap::new();

    for entry in &data.journal_entries {
        for line in &entry.lines {
            by_account
                .entry(line.account_id)
                .or_default()
                .push(RawMovement {
                    source: MovementSource::Journal(entry.id),
                    date: entry.date,
                    description: line
                        .description
                        .clone()
                        .unwrap_or_else(|| entry.description.clone()),
                    reference: entry.reference.clone(),
                    debit: line.debit,
                    credit: line.credit,
                });
        }
    }

    for entry in &data.adjustments {
        if !entry.is_postable() {
            continue;
        }
        for line in &entry.lines {
            by_account
                .entry(line.account_id)
                .or_default()
                .push(RawMovement {
                    source: MovementSource::Adjustment(entry.id),
                    date: entry.date,
                    description: line
                        .description
                        .clone()
                        .unwrap_or_else(|| entry.description.clone()),
                    reference: Some(entry.number.clone()),
                    debit: line.debit,
                    credit: line.credit,
                });
        }
    }

    by_account
}

/// Defaults the cutoff to the period's end and checks an explicit cutoff
/// falls inside the period.
fn resolve_cutoff(period: &Period, cutoff: Option<NaiveDate>) -> Result<NaiveDate, LedgerError> {
    match cutoff {
        None => Ok(period.end_date),
        Some(cutoff) if period.contains_date(cutoff) => Ok(cutoff),
        Some(cutoff) => Err(LedgerError::CutoffOutsidePeriod { cutoff }),
    }
}
