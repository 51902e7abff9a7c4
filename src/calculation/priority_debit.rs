//! Priority-ordered debit of the simple buckets.
//!
//! The combined need is covered from the CCT bucket first, then workdays,
//! then holiday leave. Request approval never uses this; it debits the
//! yearly-split buckets instead (see [`super::apply_deduction`]).

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{AvailableBuckets, BalanceLedger};

/// Days requested from the simple buckets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimpleDebitRequest {
    /// Workdays needed.
    pub workdays: i32,
    /// Holiday leave needed.
    pub holiday: i32,
}

/// Days taken from each simple bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriorityDebit {
    /// Taken from the CCT bucket.
    pub cct: i32,
    /// Taken from the workdays bucket.
    pub workdays: i32,
    /// Taken from the holiday-leave bucket.
    pub holiday: i32,
}

/// Decides how the available buckets cover a need, without mutating anything.
///
/// # Examples
///
/// ```
/// use leave_engine::calculation::{plan_priority_debit, PriorityDebit, SimpleDebitRequest};
/// use leave_engine::models::AvailableBuckets;
///
/// let available = AvailableBuckets { workdays: 10, holiday: 4, cct: 2 };
/// let plan = plan_priority_debit(available, SimpleDebitRequest { workdays: 5, holiday: 2 }).unwrap();
/// assert_eq!(plan, PriorityDebit { cct: 2, workdays: 5, holiday: 0 });
/// ```
pub fn plan_priority_debit(
    available: AvailableBuckets,
    need: SimpleDebitRequest,
) -> EngineResult<PriorityDebit> {
    if need.workdays < 0 || need.holiday < 0 {
        return Err(EngineError::CalculationError {
            message: format!(
                "cannot debit a negative amount ({} workdays, {} holiday)",
                need.workdays, need.holiday
            ),
        });
    }

    let total = need
        .workdays
        .checked_add(need.holiday)
        .ok_or_else(|| EngineError::CalculationError {
            message: format!(
                "debit of {} workdays and {} holiday overflows",
                need.workdays, need.holiday
            ),
        })?;
    let cct = available.cct.min(total);
    let mut remaining = total - cct;

    let workdays = available.workdays.min(remaining);
    remaining -= workdays;

    let holiday = available.holiday.min(remaining);
    remaining -= holiday;

    if remaining > 0 {
        return Err(EngineError::InsufficientBalance {
            bucket: "simple".to_string(),
            requested: total,
            available: available
                .cct
                .saturating_add(available.workdays)
                .saturating_add(available.holiday),
        });
    }

    Ok(PriorityDebit {
        cct,
        workdays,
        holiday,
    })
}

/// Debits the simple buckets of `ledger`, adding to the `taken` counters.
///
/// On error the ledger is unchanged.
pub fn apply_priority_debit(
    ledger: &mut BalanceLedger,
    need: SimpleDebitRequest,
) -> EngineResult<PriorityDebit> {
    let debit = plan_priority_debit(ledger.available_buckets(), need)?;

    let simple = &ledger.simple;
    let cct_taken = add_taken(simple.cct_days.taken, debit.cct, "cct_days")?;
    let workdays_taken = add_taken(simple.workdays.taken, debit.workdays, "workdays")?;
    let holiday_taken = add_taken(simple.holiday_leave.taken, debit.holiday, "holiday_leave")?;

    ledger.simple.cct_days.taken = cct_taken;
    ledger.simple.workdays.taken = workdays_taken;
    ledger.simple.holiday_leave.taken = holiday_taken;

    Ok(debit)
}

fn add_taken(taken: i32, debit: i32, bucket: &str) -> EngineResult<i32> {
    taken
        .checked_add(debit)
        .ok_or_else(|| EngineError::CalculationError {
            message: format!("{} taken counter overflows ({} + {})", bucket, taken, debit),
        })
}
