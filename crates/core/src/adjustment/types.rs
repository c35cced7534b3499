//! Adjustment entry domain types.

use chrono::{DateTime, NaiveDate, Utc};
use partida_shared::types::{AdjustmentEntryId, PeriodId};
use serde::{Deserialize, Serialize};

use crate::entry::EntryLine;

/// Prefix for auto-generated adjustment entry numbers.
const NUMBER_PREFIX: &str = "PAJ";

/// Classification of an adjustment entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdjustmentKind {
    /// Periodic depreciation of fixed assets.
    Depreciation,
    /// Provision for expected losses or obligations.
    Provision,
    /// Income or expense earned but not yet recorded.
    Accrual,
    /// Income or expense recorded but not yet earned.
    Deferral,
    /// Reclassification between accounts.
    Reclassification,
    /// Correction of a recording error.
    ErrorCorrection,
    /// Inventory count adjustment.
    InventoryAdjustment,
    /// Foreign exchange revaluation.
    FxAdjustment,
    /// Anything else.
    Other,
}

impl AdjustmentKind {
    /// Returns the string representation of the kind.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Depreciation => "depreciation",
            Self::Provision => "provision",
            Self::Accrual => "accrual",
            Self::Deferral => "deferral",
            Self::Reclassification => "reclassification",
            Self::ErrorCorrection => "error_correction",
            Self::InventoryAdjustment => "inventory_adjustment",
            Self::FxAdjustment => "fx_adjustment",
            Self::Other => "other",
        }
    }
}

/// Lifecycle status of an adjustment entry.
///
/// Approval is tracked separately: an Active entry with an [`Approval`] is
/// posted to the ledger; an Active entry without one is a pending draft.
/// Annulled is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdjustmentStatus {
    /// Entry is live (draft or approved).
    Active,
    /// Entry is annulled and excluded from the ledger.
    Annulled,
}

/// Approval record for an adjustment entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Approval {
    /// The user who approved the entry.
    pub approved_by: String,
    /// When the approval happened.
    pub approved_at: DateTime<Utc>,
}

/// Annulment record for an adjustment entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Annulment {
    /// The user who annulled the entry.
    pub annulled_by: String,
    /// When the annulment happened.
    pub annulled_at: DateTime<Utc>,
}

/// Input for creating a new adjustment entry.
#[derive(Debug, Clone)]
pub struct AdjustmentEntryDraft {
    /// Target period.
    pub period_id: PeriodId,
    /// Entry date; must fall inside the target period.
    pub date: NaiveDate,
    /// Explicit entry number; when `None`, the engine assigns the next
    /// PAJ number.
    pub number: Option<String>,
    /// Entry description.
    pub description: String,
    /// Justification for the adjustment.
    pub reason: Option<String>,
    /// Adjustment classification.
    pub kind: AdjustmentKind,
    /// The entry lines.
    pub lines: Vec<EntryLine>,
    /// The user creating the entry.
    pub created_by: String,
}

/// An adjustment entry with its workflow state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdjustmentEntry {
    /// Unique identifier.
    pub id: AdjustmentEntryId,
    /// The period this entry belongs to.
    pub period_id: PeriodId,
    /// Entry date.
    pub date: NaiveDate,
    /// Unique entry number (e.g. "PAJ-0001").
    pub number: String,
    /// Entry description.
    pub description: String,
    /// Justification for the adjustment.
    pub reason: Option<String>,
    /// Adjustment classification.
    pub kind: AdjustmentKind,
    /// Lifecycle status.
    pub status: AdjustmentStatus,
    /// Approval record, once approved.
    pub approval: Option<Approval>,
    /// Annulment record, once annulled.
    pub annulment: Option<Annulment>,
    /// The entry lines, in input order.
    pub lines: Vec<EntryLine>,
    /// The user who created the entry.
    pub created_by: String,
    /// When the entry was created.
    pub created_at: DateTime<Utc>,
}

impl AdjustmentEntry {
    /// Returns true if this entry posts to the ledger: approved and not
    /// annulled.
    #[must_use]
    pub fn is_postable(&self) -> bool {
        self.status == AdjustmentStatus::Active && self.approval.is_some()
    }
}

/// Generates the next adjustment number from the latest assigned one.
///
/// Numbers follow the `PAJ-0001` format. An unparseable latest number
/// restarts the sequence at 1 rather than failing the whole creation.
#[must_use]
pub fn next_entry_number(last: Option<&str>) -> String {
    let next = last
        .and_then(|number| number.rsplit('-').next())
        .and_then(|digits| digits.parse::<u32>().ok())
        .map_or(1, |n| n + 1);
    format!("{NUMBER_PREFIX}-{next:04}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(None, "PAJ-0001")]
    #[case(Some("PAJ-0001"), "PAJ-0002")]
    #[case(Some("PAJ-0042"), "PAJ-0043")]
    #[case(Some("PAJ-9999"), "PAJ-10000")]
    #[case(Some("garbage"), "PAJ-0001")]
    fn test_next_entry_number(#[case] last: Option<&str>, #[case] expected: &str) {
        assert_eq!(next_entry_number(last), expected);
    }

    #[test]
    fn test_postable_requires_approval() {
        let mut entry = AdjustmentEntry {
            id: AdjustmentEntryId::new(),
            period_id: PeriodId::new(),
            date: NaiveDate::from_ymd_opt(2026, 1, 31).unwrap(),
            number: "PAJ-0001".to_string(),
            description: "Depreciation".to_string(),
            reason: None,
            kind: AdjustmentKind::Depreciation,
            status: AdjustmentStatus::Active,
            approval: None,
            annulment: None,
            lines: Vec::new(),
            created_by: "clerk".to_string(),
            created_at: Utc::now(),
        };
        assert!(!entry.is_postable());

        entry.approval = Some(Approval {
            approved_by: "controller".to_string(),
            approved_at: Utc::now(),
        });
        assert!(entry.is_postable());

        entry.status = AdjustmentStatus::Annulled;
        assert!(!entry.is_postable());
    }
}
