//! Financial statement types.

use chrono::{DateTime, NaiveDate, Utc};
use partida_shared::types::{AccountId, PeriodId, StatementId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Which statement a snapshot holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatementKind {
    /// Assets, liabilities and equity at the cutoff.
    BalanceSheet,
    /// Revenue and expenses over the period.
    IncomeStatement,
}

impl StatementKind {
    /// Returns the string representation of the kind.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::BalanceSheet => "balance_sheet",
            Self::IncomeStatement => "income_statement",
        }
    }
}

/// One account line in a statement. Group accounts carry the rolled-up
/// total of their descendant leaves.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatementRow {
    /// The account.
    pub account_id: AccountId,
    /// Account code.
    pub code: String,
    /// Account name.
    pub name: String,
    /// Hierarchy level, for indentation.
    pub level: u8,
    /// Amount in the account type's natural sign.
    pub amount: Decimal,
}

/// A titled group of statement rows with its total.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatementSection {
    /// Rows sorted by account code, parents before children.
    pub rows: Vec<StatementRow>,
    /// Sum of the section's leaf amounts.
    pub total: Decimal,
}

/// A derived balance sheet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BalanceSheet {
    /// Asset accounts.
    pub assets: StatementSection,
    /// Liability accounts.
    pub liabilities: StatementSection,
    /// Equity accounts, excluding the period result.
    pub equity: StatementSection,
    /// Net result of the period (revenue minus expenses), folded into the
    /// equity side of the identity.
    pub period_result: Decimal,
    /// `liabilities.total + equity.total + period_result`.
    pub total_liabilities_equity: Decimal,
    /// True when assets equal the other side within the aggregate
    /// tolerance. False flags the statement; it is still produced.
    pub is_balanced: bool,
}

/// A derived income statement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncomeStatement {
    /// Revenue accounts.
    pub revenue: StatementSection,
    /// Expense accounts.
    pub expenses: StatementSection,
    /// `revenue.total - expenses.total`. Negative is a loss.
    pub net_result: Decimal,
}

/// Key figures of a statement, stored alongside the full content for
/// listing without deserializing the body.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum StatementSummary {
    /// Balance sheet headline figures.
    BalanceSheet {
        /// Total assets.
        total_assets: Decimal,
        /// Total liabilities.
        total_liabilities: Decimal,
        /// Total equity including the period result.
        total_equity: Decimal,
        /// Whether the identity held.
        is_balanced: bool,
    },
    /// Income statement headline figures.
    IncomeStatement {
        /// Total revenue.
        total_revenue: Decimal,
        /// Total expenses.
        total_expenses: Decimal,
        /// Net result.
        net_result: Decimal,
    },
}

/// A stored statement. History is append-only: regenerating adds a new
/// snapshot rather than replacing the old one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinancialStatementSnapshot {
    /// Unique identifier.
    pub id: StatementId,
    /// Which statement this is.
    pub kind: StatementKind,
    /// The period covered.
    pub period_id: PeriodId,
    /// Cutoff date of the underlying trial balance.
    pub cutoff: NaiveDate,
    /// When the statement was generated.
    pub generated_at: DateTime<Utc>,
    /// The user who requested it.
    pub generated_by: String,
    /// Full statement body, serialized.
    pub content: serde_json::Value,
    /// Headline figures.
    pub summary: StatementSummary,
}
