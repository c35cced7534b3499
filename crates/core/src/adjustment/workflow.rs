//! Approval state machine for adjustment entries.
//!
//! Transitions are explicit functions over a mutable entry; the repository
//! runs them inside its update closure so concurrent callers see
//! first-wins semantics. Annulled is terminal.

use chrono::{DateTime, Utc};

use crate::error::LedgerError;

use super::types::{AdjustmentEntry, AdjustmentStatus, Annulment, Approval};

/// Approves a pending adjustment entry.
///
/// # Errors
///
/// Returns [`LedgerError::AlreadyAnnulled`] if the entry is annulled, or
/// [`LedgerError::AlreadyApproved`] if it already carries an approval.
pub fn approve(
    entry: &mut AdjustmentEntry,
    approved_by: &str,
    at: DateTime<Utc>,
) -> Result<(), LedgerError> {
    if entry.status == AdjustmentStatus::Annulled {
        return Err(LedgerError::AlreadyAnnulled(entry.id));
    }
    if entry.approval.is_some() {
        return Err(LedgerError::AlreadyApproved(entry.id));
    }
    entry.approval = Some(Approval {
        approved_by: approved_by.to_string(),
        approved_at: at,
    });
    Ok(())
}

/// Annuls an adjustment entry. Works on both pending and approved entries.
///
/// # Errors
///
/// Returns [`LedgerError::AlreadyAnnulled`] if the entry is already
/// annulled.
pub fn annul(
    entry: &mut AdjustmentEntry,
    annulled_by: &str,
    at: DateTime<Utc>,
) -> Result<(), LedgerError> {
    if entry.status == AdjustmentStatus::Annulled {
        return Err(LedgerError::AlreadyAnnulled(entry.id));
    }
    entry.status = AdjustmentStatus::Annulled;
    entry.annulment = Some(Annulment {
        annulled_by: annulled_by.to_string(),
        annulled_at: at,
    });
    Ok(())
}
