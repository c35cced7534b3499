//! Trial balance generation and the period closure check.
//!
//! A trial balance snapshots every active account's movement totals and
//! closing balance at a cutoff date, plus the period-wide check that total
//! debits equal total credits. Failing that check flags the snapshot but
//! never fails the generation; the figures are the diagnostic.

pub mod generator;
pub mod types;

pub use generator::{build_snapshot, check_closure};
pub use types::{
    ClosureCheck, EntryImbalance, TrialBalanceRow, TrialBalanceSnapshot, TrialBalanceTotals,
};
