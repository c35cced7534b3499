//! The ledger engine: orchestration over a storage abstraction.
//!
//! [`LedgerEngine`] wires validation, posting, workflow and reporting
//! together on top of a [`Repository`]. The repository owns atomicity:
//! state transitions run inside its update closures, so two concurrent
//! approvals resolve to one winner no matter the backing store.

pub mod memory;
pub mod repository;
pub mod service;


pub use memory::MemoryRepository;
pub use repository::{PeriodData, Repository};
pub use service::{CarryForwardReport, LedgerEngine};
