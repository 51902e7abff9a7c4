//! Privileged manual edits of the yearly-split buckets.

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{BalanceLedger, SplitCategory, YearSplit};

/// Proof that the caller was authorized to edit balances.
///
/// The engine does not authenticate anyone. The authentication layer in
/// front of it issues a grant after verifying the caller, and the grant's
/// subject is recorded in the log of every adjustment made with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrivilegeGrant {
    subject: String,
}

impl PrivilegeGrant {
    /// Issues a grant for a caller the authentication layer has verified.
    pub fn verified(subject: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
        }
    }

    /// Who the grant was issued to.
    pub fn subject(&self) -> &str {
        &self.subject
    }
}

/// New values for any of the six split fields. `None` leaves a field as is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitAdjustment {
    /// CCT days carried from the previous year.
    pub cct_previous_year: Option<i32>,
    /// CCT days granted this year.
    pub cct_current_year: Option<i32>,
    /// Business days carried from the previous year.
    pub business_days_previous_year: Option<i32>,
    /// Business days granted this year.
    pub business_days_current_year: Option<i32>,
    /// Holidays carried from the previous year.
    pub holidays_previous_year: Option<i32>,
    /// Holidays granted this year.
    pub holidays_current_year: Option<i32>,
}

impl SplitAdjustment {
    fn fields(&self) -> [(SplitCategory, Option<i32>, Option<i32>); 3] {
        [
            (SplitCategory::Cct, self.cct_previous_year, self.cct_current_year),
            (
                SplitCategory::BusinessDays,
                self.business_days_previous_year,
                self.business_days_current_year,
            ),
            (
                SplitCategory::Holidays,
                self.holidays_previous_year,
                self.holidays_current_year,
            ),
        ]
    }

    /// Whether the adjustment changes nothing.
    pub fn is_empty(&self) -> bool {
        self.fields()
            .iter()
            .all(|(_, previous, current)| previous.is_none() && current.is_none())
    }
}

/// Overwrites the split fields named by `adjustment`.
///
/// All values are checked before any is written: a negative value fails with
/// `InvalidAdjustment` and leaves the ledger unchanged.
pub fn apply_split_adjustment(
    ledger: &mut BalanceLedger,
    adjustment: &SplitAdjustment,
) -> EngineResult<()> {
    let fields = adjustment.fields();

    for (category, previous, current) in &fields {
        for (half, value) in [("previous_year", previous), ("current_year", current)] {
            if let Some(v) = value.filter(|v| *v < 0) {
                return Err(EngineError::InvalidAdjustment {
                    field: format!("{}_{}", category, half),
                    message: format!("must not be negative, got {}", v),
                });
            }
        }
    }

    for (category, previous, current) in fields {
        let split = ledger.split.get_mut(category);
        *split = YearSplit::new(
            previous.unwrap_or(split.previous_year),
            current.unwrap_or(split.current_year),
        );
    }
    Ok(())
}
