//! Property tests for the balance arithmetic.

use chrono::{Duration, NaiveDate, Utc};
use proptest::prelude::*;

use leave_engine::calculation::{
    SimpleDebitRequest, apply_deduction, apply_priority_debit, debit_previous_then_current,
    refund_deduction, split_allotment,
};
use leave_engine::models::{
    AvailableBuckets, BalanceLedger, LedgerKey, LeaveRequest, RecordedDeduction, SimpleBucket,
    SplitBuckets, SplitCategory, YearSplit,
};

fn year_split() -> impl Strategy<Value = YearSplit> {
    (0..30i32, 0..30i32).prop_map(|(previous, current)| YearSplit::new(previous, current))
}

fn split_buckets() -> impl Strategy<Value = SplitBuckets> {
    (year_split(), year_split(), year_split()).prop_map(|(cct, business_days, holidays)| {
        SplitBuckets {
            cct,
            business_days,
            holidays,
        }
    })
}

fn simple_bucket() -> impl Strategy<Value = SimpleBucket> {
    (0..30i32, 0..10i32, 0..40i32).prop_map(|(allotted, carried_over, taken)| SimpleBucket {
        allotted,
        carried_over,
        taken,
    })
}

fn ledger_with(split: SplitBuckets) -> BalanceLedger {
    let mut ledger = BalanceLedger::empty(&LedgerKey::new("emp_001", 2026));
    ledger.split = split;
    ledger
}

/// A CCT request of `days` days, or a non-CCT request of `days` whole weeks.
fn request(is_cct_leave: bool, days: i64) -> LeaveRequest {
    let start = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
    let span = if is_cct_leave { days } else { days * 7 };
    LeaveRequest::new("emp_001", start, start + Duration::days(span - 1), is_cct_leave, Utc::now())
}

proptest! {
    /// A successful debit takes exactly what was needed and leaves no bucket negative.
    #[test]
    fn split_debit_is_exact(split in year_split(), needed in 0..60i32) {
        match debit_previous_then_current(split, needed, SplitCategory::Cct) {
            Ok(debit) => {
                prop_assert!(debit.remaining.previous_year >= 0);
                prop_assert!(debit.remaining.current_year >= 0);
                prop_assert_eq!(debit.from_previous + debit.from_current, needed);
                prop_assert_eq!(debit.remaining.total(), split.total() - i64::from(needed));
            }
            Err(_) => prop_assert!(i64::from(needed) > split.total()),
        }
    }

    /// Previous-year days are used up before any current-year day.
    #[test]
    fn split_debit_drains_previous_first(split in year_split(), needed in 0..60i32) {
        if let Ok(debit) = debit_previous_then_current(split, needed, SplitCategory::Holidays) {
            if debit.from_current > 0 {
                prop_assert_eq!(debit.remaining.previous_year, 0);
            }
        }
    }

    /// Approval deductions are all-or-nothing.
    #[test]
    fn deduction_is_atomic(split in split_buckets(), is_cct in any::<bool>(), days in 1..12i64) {
        let mut ledger = ledger_with(split);
        let before = ledger.clone();
        let request = request(is_cct, days);

        match apply_deduction(&mut ledger, &request, 1) {
            Ok(result) => {
                let applied = result.applied;
                let debited = applied.cct_days + applied.business_days + applied.holidays;
                let total = |s: &SplitBuckets| s.cct.total() + s.business_days.total() + s.holidays.total();
                prop_assert_eq!(total(&before.split) - total(&ledger.split), i64::from(debited));
                prop_assert_eq!(ledger.simple, before.simple);
            }
            Err(_) => prop_assert_eq!(ledger, before),
        }
    }

    /// The priority debit succeeds exactly when the three buckets together cover the need.
    #[test]
    fn priority_debit_covers_or_fails_cleanly(
        workdays in simple_bucket(),
        holiday_leave in simple_bucket(),
        cct_days in simple_bucket(),
        need_workdays in 0..30i32,
        need_holiday in 0..15i32,
    ) {
        let mut ledger = ledger_with(SplitBuckets::default());
        ledger.simple.workdays = workdays;
        ledger.simple.holiday_leave = holiday_leave;
        ledger.simple.cct_days = cct_days;
        let before = ledger.clone();
        let available: AvailableBuckets = ledger.available_buckets();
        let need = SimpleDebitRequest { workdays: need_workdays, holiday: need_holiday };

        match apply_priority_debit(&mut ledger, need) {
            Ok(debit) => {
                prop_assert_eq!(debit.cct + debit.workdays + debit.holiday, need_workdays + need_holiday);
                prop_assert!(debit.cct <= available.cct);
                prop_assert!(debit.workdays <= available.workdays);
                prop_assert!(debit.holiday <= available.holiday);
            }
            Err(_) => {
                prop_assert!(need_workdays + need_holiday > available.cct + available.workdays + available.holiday);
                prop_assert_eq!(ledger, before);
            }
        }
    }

    /// Refunds never drive a taken counter below zero.
    #[test]
    fn refund_never_negative(
        taken in (0..20i32, 0..20i32, 0..20i32),
        refund in (0..30i32, 0..30i32, 0..30i32),
    ) {
        let mut ledger = ledger_with(SplitBuckets::default());
        ledger.simple.workdays.taken = taken.0;
        ledger.simple.holiday_leave.taken = taken.1;
        ledger.simple.cct_days.taken = taken.2;

        refund_deduction(&mut ledger, &RecordedDeduction {
            workdays: refund.0,
            holiday_leave: refund.1,
            cct_days: refund.2,
        });

        prop_assert_eq!(ledger.simple.workdays.taken, (taken.0 - refund.0).max(0));
        prop_assert_eq!(ledger.simple.holiday_leave.taken, (taken.1 - refund.1).max(0));
        prop_assert_eq!(ledger.simple.cct_days.taken, (taken.2 - refund.2).max(0));
    }

    /// Splitting an allotment never loses or invents a day.
    #[test]
    fn allotment_split_adds_up(total in 0..120i32, cct in 0..=3i32) {
        prop_assume!(cct <= total);
        let (workdays, holiday_leave) = split_allotment(total, cct).unwrap();

        prop_assert!(workdays >= 0);
        prop_assert!(holiday_leave >= 0);
        prop_assert_eq!(workdays + holiday_leave + cct, total);
    }
}
