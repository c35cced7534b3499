//! Carry-forward of closing balances into the next period.
//!
//! Pure function over the prior period's closing balances: the engine
//! fetches closings and the target period's existing rows, this module
//! decides which accounts get a new opening balance. Only balance-sheet
//! accounts carry forward; income-statement accounts restart at zero.

use std::collections::HashSet;

use chrono::NaiveDate;
use partida_shared::amount::round_to_cents;
use partida_shared::types::{AccountId, OpeningBalanceId, PeriodId};
use rust_decimal::Decimal;

use crate::account::{AccountType, Nature};

use super::types::{OpeningBalance, OpeningBalanceStatus};

/// An account's closing balance in the source period, as produced by the
/// posting engine.
#[derive(Debug, Clone)]
pub struct ClosingBalance {
    /// The account.
    pub account_id: AccountId,
    /// The account's type, deciding whether the balance carries forward.
    pub account_type: AccountType,
    /// The side of the closing balance.
    pub nature: Nature,
    /// The closing balance amount.
    pub amount: Decimal,
}

/// Result of a carry-forward run.
#[derive(Debug, Clone, Default)]
pub struct CarryForwardOutcome {
    /// New opening balances to insert into the target period.
    pub created: Vec<OpeningBalance>,
    /// Accounts skipped because the target period already had a live row.
    pub skipped: usize,
}

/// Computes the opening balances to carry into `target_period`.
///
/// Skips accounts already seeded in the target period (idempotency),
/// income-statement accounts, and zero closings. Re-running after a
/// complete carry-forward yields `created: []` with everything counted as
/// skipped.
#[must_use]
pub fn carry_forward(
    target_period: PeriodId,
    closings: &[ClosingBalance],
    already_seeded: &HashSet<AccountId>,
    recorded_on: NaiveDate,
    recorded_by: &str,
) -> CarryForwardOutcome {
    let mut outcome = CarryForwardOutcome::default();

    for closing in closings {
        if !closing.account_type.carries_forward() || closing.amount == Decimal::ZERO {
            continue;
        }
        if already_seeded.contains(&closing.account_id) {
            outcome.skipped += 1;
            continue;
        }
        // The nature comes from the closing row, not re-derived, so a
        // flipped balance keeps the side the ledger reported it on. No
        // debtor-negativity check here: the posting engine already reports
        // negative balances on the flipped side with a positive amount.
        outcome.created.push(OpeningBalance {
            id: OpeningBalanceId::new(),
            period_id: target_period,
            account_id: closing.account_id,
            amount: round_to_cents(closing.amount),
            nature: closing.nature,
            status: OpeningBalanceStatus::Active,
            recorded_on,
            recorded_by: recorded_by.to_string(),
            notes: Some("Carried forward from prior period".to_string()),
        });
    }

    outcome
}
