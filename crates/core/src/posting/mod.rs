//! Ledger posting: turning journal and adjustment entries into per-account
//! running balances.
//!
//! Posting is a pure fold. For each account: start from the opening
//! balance (or zero), walk the movements in (date, entry id) order, and
//! apply each one's signed change under the account's nature. Nothing here
//! touches storage.

pub mod engine;
pub mod types;

#[cfg(test)]
mod engine_props;

pub use engine::{post_account, RawMovement};
pub use types::{AccountLedger, FullLedger, LedgerMovement, MovementSource};
