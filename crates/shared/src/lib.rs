//! Shared types for the Partida ledger engine.
//!
//! This crate provides common types used across all other crates:
//! - Typed IDs for type-safe entity references
//! - Fixed-point amount helpers for the unit of account

pub mod types;

pub use types::amount;
