//! Journal entries and the entry validator.
//!
//! A journal entry is a dated set of debit/credit lines that must balance
//! exactly to the cent. Entries are immutable once created; corrections go
//! through a new offsetting entry or an adjustment entry.

pub mod types;
pub mod validation;

#[cfg(test)]
mod validation_props;

pub use types::{EntryLine, EntryTotals, JournalEntry, JournalEntryDraft};
pub use validation::{validate_entry, validate_lines};
