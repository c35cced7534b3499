//! Statement derivation from a trial balance and the account hierarchy.

use std::collections::HashMap;

use partida_shared::amount::within_tolerance;
use partida_shared::types::AccountId;
use rust_decimal::Decimal;

use crate::account::{Account, AccountIndex, AccountType};
use crate::trial::TrialBalanceSnapshot;

use super::types::{BalanceSheet, IncomeStatement, StatementRow, StatementSection};

/// Leaf closing balances keyed by account, expressed in each account
/// type's natural sign. A trial row posted under a flipped nature (a
/// carried-forward balance on the opposite side) is negated back so the
/// statement identity sums work on one convention.
fn natural_balances(snapshot: &TrialBalanceSnapshot) -> HashMap<AccountId, Decimal> {
    snapshot
        .rows
        .iter()
        .map(|row| {
            let amount = if row.nature == row.account_type.nature() {
                row.closing_balance
            } else {
                -row.closing_balance
            };
            (row.account_id, amount)
        })
        .collect()
}

/// Builds the section for one account type: every leaf with activity plus
/// the group accounts above them, in code order.
fn build_section(
    accounts: &[Account],
    index: &AccountIndex<'_>,
    target: AccountType,
    leaf_balances: &HashMap<AccountId, Decimal>,
) -> StatementSection {
    let mut rows: Vec<StatementRow> = accounts
        .iter()
        .filter(|account| account.account_type == target)
        .filter_map(|account| {
            let amount = if account.accepts_movements {
                *leaf_balances.get(&account.id)?
            } else {
                let has_active_leaf = index
                    .descendant_leaves(account.id)
                    .iter()
                    .any(|leaf| leaf_balances.contains_key(&leaf.id));
                if !has_active_leaf {
                    return None;
                }
                index.rollup(account.id, leaf_balances)
            };
            Some(StatementRow {
                account_id: account.id,
                code: account.code.clone(),
                name: account.name.clone(),
                level: account.level,
                amount,
            })
        })
        .collect();
    rows.sort_by(|a, b| a.code.cmp(&b.code));

    let total = accounts
        .iter()
        .filter(|account| account.account_type == target && account.accepts_movements)
        .filter_map(|account| leaf_balances.get(&account.id))
        .sum();

    StatementSection { rows, total }
}

fn type_total(
    accounts: &[Account],
    target: AccountType,
    leaf_balances: &HashMap<AccountId, Decimal>,
) -> Decimal {
    accounts
        .iter()
        .filter(|account| account.account_type == target && account.accepts_movements)
        .filter_map(|account| leaf_balances.get(&account.id))
        .sum()
}

/// Derives the balance sheet at the trial balance's cutoff.
///
/// The period result (revenue minus expenses to the cutoff) joins the
/// equity side, which is what makes the identity hold mid-period before
/// any closing entry exists.
#[must_use]
pub fn derive_balance_sheet(snapshot: &TrialBalanceSnapshot, accounts: &[Account]) -> BalanceSheet {
    let index = AccountIndex::build(accounts);
    let leaf_balances = natural_balances(snapshot);

    let assets = build_section(accounts, &index, AccountType::Asset, &leaf_balances);
    let liabilities = build_section(accounts, &index, AccountType::Liability, &leaf_balances);
    let equity = build_section(accounts, &index, AccountType::Equity, &leaf_balances);

    let revenue = type_total(accounts, AccountType::Revenue, &leaf_balances);
    let expenses = type_total(accounts, AccountType::Expense, &leaf_balances);
    let period_result = revenue - expenses;

    let total_liabilities_equity = liabilities.total + equity.total + period_result;
    let is_balanced = within_tolerance(assets.total, total_liabilities_equity);

    BalanceSheet {
        assets,
        liabilities,
        equity,
        period_result,
        total_liabilities_equity,
        is_balanced,
    }
}

/// Derives the income statement over the trial balance's span.
#[must_use]
pub fn derive_income_statement(
    snapshot: &TrialBalanceSnapshot,
    accounts: &[Account],
) -> IncomeStatement {
    let index = AccountIndex::build(accounts);
    let leaf_balances = natural_balances(snapshot);

    let revenue = build_section(accounts, &index, AccountType::Revenue, &leaf_balances);
    let expenses = build_section(accounts, &index, AccountType::Expense, &leaf_balances);
    let net_result = revenue.total - expenses.total;

    IncomeStatement {
        revenue,
        expenses,
        net_result,
    }
}
