//! Adjustment entries and their approval workflow.
//!
//! Adjustments are numbered entries (PAJ-0001, PAJ-0002, ...) that start
//! unapproved, get approved by a second user, and can be annulled at any
//! point. Only approved, non-annulled adjustments post to the ledger.

pub mod types;
pub mod workflow;

pub use types::{
    AdjustmentEntry, AdjustmentEntryDraft, AdjustmentKind, AdjustmentStatus, Annulment, Approval,
    next_entry_number,
};
pub use workflow::{annul, approve};
