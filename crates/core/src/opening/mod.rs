//! Opening balances and the period carry-forward.
//!
//! Opening balances seed an account's running balance at the start of a
//! period. They can be recorded by hand or carried forward from the prior
//! period's closing balances; either way at most one Active row exists per
//! (period, account).

pub mod carry_forward;
pub mod types;

pub use carry_forward::{carry_forward, CarryForwardOutcome, ClosingBalance};
pub use types::{
    OpeningBalance, OpeningBalanceDraft, OpeningBalancePatch, OpeningBalanceStatus,
    OpeningBalanceSummary, OpeningBalanceTypeSummary,
};
