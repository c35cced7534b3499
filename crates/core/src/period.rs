//! Accounting period types.

use chrono::NaiveDate;
use partida_shared::types::PeriodId;
use serde::{Deserialize, Serialize};

/// Length classification of an accounting period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PeriodKind {
    /// One calendar month.
    Monthly,
    /// Three months.
    Quarterly,
    /// Six months.
    Semiannual,
    /// A full fiscal year.
    Annual,
}

/// Status of an accounting period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeriodStatus {
    /// Period is open for entries.
    Open,
    /// Period is closed, no new entries allowed.
    Closed,
}

/// An accounting period.
///
/// Entries may only be dated inside an Open period. `end_date` is
/// inclusive and must be after `start_date`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Period {
    /// Unique identifier.
    pub id: PeriodId,
    /// First day of the period (inclusive).
    pub start_date: NaiveDate,
    /// Last day of the period (inclusive).
    pub end_date: NaiveDate,
    /// Length classification.
    pub kind: PeriodKind,
    /// Current status.
    pub status: PeriodStatus,
    /// Description (e.g. "Fiscal year 2026").
    pub description: Option<String>,
}

impl Period {
    /// Returns true if entries can be posted to this period.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.status == PeriodStatus::Open
    }

    /// Returns true if the given date falls within this period.
    #[must_use]
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }
}
