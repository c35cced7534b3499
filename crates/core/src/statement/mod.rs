//! Financial statements derived from a trial balance.
//!
//! The balance sheet and income statement are projections of the same
//! trial balance: group accounts roll up their descendant leaves through
//! the account hierarchy, and the accounting identity (assets equal
//! liabilities plus equity plus the period result) is checked with the
//! aggregate tolerance. Statements are stored as append-only history.

pub mod deriver;
pub mod types;

pub use deriver::{derive_balance_sheet, derive_income_statement};
pub use types::{
    BalanceSheet, FinancialStatementSnapshot, IncomeStatement, StatementKind, StatementRow,
    StatementSection, StatementSummary,
};
