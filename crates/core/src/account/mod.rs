//! Chart of accounts: types, nature rules, and hierarchy rollups.
//!
//! The account registry itself is an external collaborator; the engine
//! only reads accounts. What lives here is the account-nature arithmetic
//! (the sign convention for running balances) and the parent/child index
//! used to roll leaf balances up to grouping accounts for display.

pub mod hierarchy;
pub mod types;

pub use hierarchy::AccountIndex;
pub use types::{Account, AccountPatch, AccountStatus, AccountType, Nature};
