//! Year-end carry-over of unused simple-bucket balance.
//!
//! Only the simple buckets roll over. The yearly-split buckets used by
//! request approval are left as they are in both years.

use serde::{Deserialize, Serialize};

use crate::models::BalanceLedger;

/// Unused balance rolled into the next year.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarriedBalance {
    /// Unused workdays.
    pub workdays: i32,
    /// Unused holiday leave.
    pub holiday_leave: i32,
    /// Unused CCT days.
    pub cct_days: i32,
}

/// Returns what `ledger` leaves unused, per bucket, never negative.
///
/// # Examples
///
/// ```
/// use leave_engine::calculation::remaining_balance;
/// use leave_engine::models::{BalanceLedger, LedgerKey};
///
/// let mut ledger = BalanceLedger::empty(&LedgerKey::new("emp_001", 2025));
/// ledger.simple.workdays.allotted = 14;
/// ledger.simple.workdays.taken = 10;
/// assert_eq!(remaining_balance(&ledger).workdays, 4);
/// ```
pub fn remaining_balance(ledger: &BalanceLedger) -> CarriedBalance {
    CarriedBalance {
        workdays: ledger.simple.workdays.available(),
        holiday_leave: ledger.simple.holiday_leave.available(),
        cct_days: ledger.simple.cct_days.available(),
    }
}

/// Writes a carried balance into the next year's ledger.
///
/// The carried-over counters are overwritten, so running carry-over twice
/// for the same year gives the same result.
pub fn apply_carry_over(next_year: &mut BalanceLedger, carried: CarriedBalance) {
    next_year.simple.workdays.carried_over = carried.workdays;
    next_year.simple.holiday_leave.carried_over = carried.holiday_leave;
    next_year.simple.cct_days.carried_over = carried.cct_days;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{LedgerKey, SimpleBucket, YearSplit};

    fn ledger(year: i32) -> BalanceLedger {
        BalanceLedger::empty(&LedgerKey::new("emp_001", year))
    }

    #[test]
    fn test_unused_days_roll_over() {
        let mut from = ledger(2025);
        from.simple.workdays = SimpleBucket { allotted: 14, carried_over: 0, taken: 10 };

        let carried = remaining_balance(&from);
        assert_eq!(carried.workdays, 4);
    }

    #[test]
    fn test_overdrawn_bucket_carries_zero() {
        let mut from = ledger(2025);
        from.simple.workdays = SimpleBucket { allotted: 14, carried_over: 0, taken: 18 };

        assert_eq!(remaining_balance(&from).workdays, 0);
    }

    #[test]
    fn test_previous_carry_over_counts() {
        let mut from = ledger(2025);
        from.simple.holiday_leave = SimpleBucket { allotted: 4, carried_over: 2, taken: 1 };
        from.simple.cct_days = SimpleBucket { allotted: 3, carried_over: 1, taken: 0 };

        let carried = remaining_balance(&from);
        assert_eq!(carried.holiday_leave, 5);
        assert_eq!(carried.cct_days, 4);
    }

    #[test]
    fn test_apply_overwrites_and_keeps_other_fields() {
        let mut next = ledger(2026);
        next.simple.workdays = SimpleBucket { allotted: 10, carried_over: 9, taken: 1 };
        next.split.cct = YearSplit::new(0, 3);

        apply_carry_over(&mut next, CarriedBalance { workdays: 4, holiday_leave: 1, cct_days: 0 });

        assert_eq!(next.simple.workdays, SimpleBucket { allotted: 10, carried_over: 4, taken: 1 });
        assert_eq!(next.simple.holiday_leave.carried_over, 1);
        assert_eq!(next.split.cct, YearSplit::new(0, 3));
    }
}
