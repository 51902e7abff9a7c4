//! Canonical leave deduction against the yearly-split buckets.
//!
//! CCT leave is debited day for day from the CCT buckets. Other leave is
//! taken in whole weeks, each week consuming 5 business days and 2 holidays.
//! Every debit draws on the previous-year balance first and the current-year
//! balance for the remainder. A deduction either applies completely or leaves
//! the ledger untouched.

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{
    AuditStep, BalanceLedger, LeaveRequest, RecordedDeduction, SplitCategory, YearSplit, clamp_days,
};

/// Calendar days in a week of non-CCT leave.
pub const DAYS_PER_WEEK: i32 = 7;

/// Business days consumed by one week of non-CCT leave.
pub const BUSINESS_DAYS_PER_WEEK: i32 = 5;

/// Holidays consumed by one week of non-CCT leave.
pub const HOLIDAYS_PER_WEEK: i32 = 2;

/// Outcome of debiting one split bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitDebit {
    /// The bucket after the debit.
    pub remaining: YearSplit,
    /// Days taken from the previous-year balance.
    pub from_previous: i32,
    /// Days taken from the current-year balance.
    pub from_current: i32,
}

/// Days debited per category by a deduction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppliedDeduction {
    /// CCT days debited.
    pub cct_days: i32,
    /// Business days debited.
    pub business_days: i32,
    /// Holidays debited.
    pub holidays: i32,
}

impl From<AppliedDeduction> for RecordedDeduction {
    fn from(applied: AppliedDeduction) -> Self {
        RecordedDeduction {
            workdays: applied.business_days,
            holiday_leave: applied.holidays,
            cct_days: applied.cct_days,
        }
    }
}

/// The result of a deduction, including the audit steps.
#[derive(Debug, Clone)]
pub struct DeductionResult {
    /// Days debited per category.
    pub applied: AppliedDeduction,
    /// One audit step per bucket debited.
    pub audit_steps: Vec<AuditStep>,
}

/// Business days and holidays needed for a non-CCT request.
///
/// ```
/// use leave_engine::calculation::weekly_needs;
///
/// assert_eq!(weekly_needs(14), (10, 4));
/// ```
pub fn weekly_needs(total_days: i32) -> (i32, i32) {
    let weeks = total_days / DAYS_PER_WEEK;
    (weeks * BUSINESS_DAYS_PER_WEEK, weeks * HOLIDAYS_PER_WEEK)
}

/// Debits `needed` days from a split bucket, previous year first.
///
/// Returns the bucket as it would be after the debit without touching the
/// input, or `InsufficientBalance` if both years together fall short.
///
/// # Examples
///
/// ```
/// use leave_engine::calculation::debit_previous_then_current;
/// use leave_engine::models::{SplitCategory, YearSplit};
///
/// let debit = debit_previous_then_current(YearSplit::new(2, 5), 6, SplitCategory::Cct).unwrap();
/// assert_eq!(debit.remaining, YearSplit::new(0, 1));
/// assert_eq!((debit.from_previous, debit.from_current), (2, 4));
/// ```
pub fn debit_previous_then_current(
    split: YearSplit,
    needed: i32,
    category: SplitCategory,
) -> EngineResult<SplitDebit> {
    if split.previous_year >= needed {
        return Ok(SplitDebit {
            remaining: YearSplit::new(split.previous_year - needed, split.current_year),
            from_previous: needed,
            from_current: 0,
        });
    }

    let remainder = needed - split.previous_year;
    if split.current_year >= remainder {
        Ok(SplitDebit {
            remaining: YearSplit::new(0, split.current_year - remainder),
            from_previous: split.previous_year,
            from_current: remainder,
        })
    } else {
        Err(EngineError::InsufficientBalance {
            bucket: category.to_string(),
            requested: needed,
            available: clamp_days(split.total()),
        })
    }
}

fn debit_audit_step(
    step_number: u32,
    category: SplitCategory,
    before: YearSplit,
    needed: i32,
    debit: &SplitDebit,
) -> AuditStep {
    AuditStep {
        step_number,
        rule_id: format!("{}_debit", category),
        rule_name: format!("Debit {}", category),
        input: serde_json::json!({
            "needed": needed,
            "previous_year": before.previous_year,
            "current_year": before.current_year
        }),
        output: serde_json::json!({
            "from_previous": debit.from_previous,
            "from_current": debit.from_current,
            "previous_year": debit.remaining.previous_year,
            "current_year": debit.remaining.current_year
        }),
        reasoning: format!(
            "{} {}: {} from previous year, {} from current year",
            needed, category, debit.from_previous, debit.from_current
        ),
    }
}

/// Debits the split buckets of `ledger` for an approved request.
///
/// # Arguments
///
/// * `ledger` - The ledger for the request's start year, modified only on success
/// * `request` - The request being approved
/// * `step_number` - The step number of the first audit step
///
/// # Returns
///
/// The days debited per category, or `InsufficientBalance` naming the first
/// bucket that could not be covered. On error the ledger is unchanged.
pub fn apply_deduction(
    ledger: &mut BalanceLedger,
    request: &LeaveRequest,
    step_number: u32,
) -> EngineResult<DeductionResult> {
    let total_days = i32::try_from(request.total_days())
        .ok()
        .filter(|days| *days > 0)
        .ok_or_else(|| EngineError::CalculationError {
            message: format!(
                "request {} spans an invalid period {} to {}",
                request.id, request.start_date, request.end_date
            ),
        })?;

    let mut split = ledger.split;
    let mut applied = AppliedDeduction::default();
    let mut audit_steps = Vec::with_capacity(2);

    let needs = if request.is_cct_leave {
        vec![(SplitCategory::Cct, total_days)]
    } else {
        let (business_days, holidays) = weekly_needs(total_days);
        vec![
            (SplitCategory::BusinessDays, business_days),
            (SplitCategory::Holidays, holidays),
        ]
    };

    // Work on a copy so a shortfall in a later category discards earlier debits
    for (offset, (category, needed)) in needs.into_iter().enumerate() {
        let before = split.get(category);
        let debit = debit_previous_then_current(before, needed, category)?;
        *split.get_mut(category) = debit.remaining;
        audit_steps.push(debit_audit_step(
            step_number + offset as u32,
            category,
            before,
            needed,
            &debit,
        ));

        match category {
            SplitCategory::Cct => applied.cct_days = needed,
            SplitCategory::BusinessDays => applied.business_days = needed,
            SplitCategory::Holidays => applied.holidays = needed,
        }
    }

    ledger.split = split;
    Ok(DeductionResult {
        applied,
        audit_steps,
    })
}

/// Reverses a recorded deduction against the simple `taken` counters.
///
/// Each counter is reduced by the recorded amount and floored at zero.
pub fn refund_deduction(ledger: &mut BalanceLedger, deduction: &RecordedDeduction) {
    let simple = &mut ledger.simple;
    simple.cct_days.taken = simple.cct_days.taken.saturating_sub(deduction.cct_days).max(0);
    simple.workdays.taken = simple.workdays.taken.saturating_sub(deduction.workdays).max(0);
    simple.holiday_leave.taken = simple.holiday_leave.taken.saturating_sub(deduction.holiday_leave).max(0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LedgerKey;
    use chrono::{NaiveDate, Utc};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn ledger() -> BalanceLedger {
        BalanceLedger::empty(&LedgerKey::new("emp_001", 2026))
    }

    fn cct_request(days: u32) -> LeaveRequest {
        LeaveRequest::new("emp_001", date(2026, 3, 2), date(2026, 3, 1 + days), true, Utc::now())
    }

    fn weekly_request(weeks: u32) -> LeaveRequest {
        // 2026-03-02 is a Monday
        LeaveRequest::new(
            "emp_001",
            date(2026, 3, 2),
            date(2026, 3, 1 + weeks * 7),
            false,
            Utc::now(),
        )
    }

    #[test]
    fn test_cct_spans_previous_and_current_year() {
        let mut ledger = ledger();
        ledger.split.cct = YearSplit::new(2, 5);

        let result = apply_deduction(&mut ledger, &cct_request(6), 1).unwrap();

        assert_eq!(ledger.split.cct, YearSplit::new(0, 1));
        assert_eq!(result.applied.cct_days, 6);
        assert_eq!(result.audit_steps.len(), 1);
        assert_eq!(result.audit_steps[0].output["from_previous"], 2);
        assert_eq!(result.audit_steps[0].output["from_current"], 4);
    }

    #[test]
    fn test_cct_covered_by_previous_year_alone() {
        let mut ledger = ledger();
        ledger.split.cct = YearSplit::new(5, 3);

        apply_deduction(&mut ledger, &cct_request(4), 1).unwrap();

        assert_eq!(ledger.split.cct, YearSplit::new(1, 3));
    }

    #[test]
    fn test_cct_insufficient_leaves_buckets_unchanged() {
        let mut ledger = ledger();
        ledger.split.cct = YearSplit::new(1, 1);
        let before = ledger.clone();

        let result = apply_deduction(&mut ledger, &cct_request(6), 1);

        match result {
            Err(EngineError::InsufficientBalance {
                bucket,
                requested,
                available,
            }) => {
                assert_eq!(bucket, "cct");
                assert_eq!(requested, 6);
                assert_eq!(available, 2);
            }
            other => panic!("Expected InsufficientBalance, got {:?}", other),
        }
        assert_eq!(ledger, before);
    }

    #[test]
    fn test_two_weeks_debits_business_days_and_holidays() {
        let mut ledger = ledger();
        ledger.split.business_days = YearSplit::new(3, 10);
        ledger.split.holidays = YearSplit::new(0, 4);

        let result = apply_deduction(&mut ledger, &weekly_request(2), 1).unwrap();

        assert_eq!(
            result.applied,
            AppliedDeduction { cct_days: 0, business_days: 10, holidays: 4 }
        );
        assert_eq!(ledger.split.business_days, YearSplit::new(0, 3));
        assert_eq!(ledger.split.holidays, YearSplit::new(0, 0));
        assert_eq!(result.audit_steps[1].step_number, 2);
    }

    #[test]
    fn test_holiday_shortfall_restores_business_days() {
        let mut ledger = ledger();
        ledger.split.business_days = YearSplit::new(0, 10);
        ledger.split.holidays = YearSplit::new(1, 2);
        let before = ledger.clone();

        let result = apply_deduction(&mut ledger, &weekly_request(2), 1);

        match result {
            Err(EngineError::InsufficientBalance { bucket, .. }) => assert_eq!(bucket, "holidays"),
            other => panic!("Expected InsufficientBalance, got {:?}", other),
        }
        assert_eq!(ledger, before);
    }

    #[test]
    fn test_weekly_request_leaves_cct_alone() {
        let mut ledger = ledger();
        ledger.split.cct = YearSplit::new(3, 3);
        ledger.split.business_days = YearSplit::new(0, 5);
        ledger.split.holidays = YearSplit::new(0, 2);

        apply_deduction(&mut ledger, &weekly_request(1), 1).unwrap();

        assert_eq!(ledger.split.cct, YearSplit::new(3, 3));
    }

    #[test]
    fn test_deduction_never_touches_simple_buckets() {
        let mut ledger = ledger();
        ledger.simple.cct_days.allotted = 3;
        ledger.split.cct = YearSplit::new(0, 3);
        let simple_before = ledger.simple;

        apply_deduction(&mut ledger, &cct_request(3), 1).unwrap();

        assert_eq!(ledger.simple, simple_before);
    }

    #[test]
    fn test_applied_converts_to_recorded() {
        let recorded: RecordedDeduction = AppliedDeduction {
            cct_days: 1,
            business_days: 5,
            holidays: 2,
        }
        .into();
        assert_eq!(recorded.workdays, 5);
        assert_eq!(recorded.holiday_leave, 2);
        assert_eq!(recorded.cct_days, 1);
    }

    #[test]
    fn test_refund_restores_taken_floored_at_zero() {
        let mut ledger = ledger();
        ledger.simple.workdays.taken = 7;
        ledger.simple.holiday_leave.taken = 1;
        ledger.simple.cct_days.taken = 2;

        refund_deduction(
            &mut ledger,
            &RecordedDeduction { workdays: 5, holiday_leave: 2, cct_days: 2 },
        );

        assert_eq!(ledger.simple.workdays.taken, 2);
        assert_eq!(ledger.simple.holiday_leave.taken, 0);
        assert_eq!(ledger.simple.cct_days.taken, 0);
    }

    #[test]
    fn test_weekly_needs_floor_partial_weeks() {
        assert_eq!(weekly_needs(7), (5, 2));
        assert_eq!(weekly_needs(10), (5, 2));
        assert_eq!(weekly_needs(6), (0, 0));
    }
}
