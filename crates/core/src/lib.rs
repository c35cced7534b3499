//! Ledger engine for Partida.
//!
//! This crate contains pure business logic with ZERO web or database
//! dependencies. All domain types, validation rules, and calculations
//! live here; storage is consumed through the `engine::Repository` trait.
//!
//! # Modules
//!
//! - `account` - Chart of accounts types, nature rules, hierarchy rollups
//! - `period` - Accounting periods and their open/closed state
//! - `entry` - Journal entries and the entry validator
//! - `adjustment` - Adjustment entries and their approval workflow
//! - `opening` - Opening balances and period carry-forward
//! - `posting` - Ledger posting (running balances per account)
//! - `trial` - Trial balance snapshots and the cuadre check
//! - `statement` - Balance sheet and income statement derivation
//! - `engine` - The engine service and repository contract

pub mod account;
pub mod adjustment;
pub mod engine;
pub mod entry;
pub mod error;
pub mod opening;
pub mod period;
pub mod posting;
pub mod statement;
pub mod trial;

pub use error::LedgerError;
