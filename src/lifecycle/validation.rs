//! Submission checks for new leave requests.
//!
//! Checks run in a fixed order and the first failure is reported:
//!
//! 1. the end date is not before the start date;
//! 2. the start date is not in the past;
//! 3. no request exists for exactly the same period;
//! 4. non-CCT leave spans whole weeks, Monday to Sunday;
//! 5. the yearly-split buckets can cover the request.
//!
//! The balance check is a projection only; nothing is debited until approval.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::calculation::{DAYS_PER_WEEK, weekly_needs};
use crate::error::ValidationError;
use crate::models::{LeaveRequest, SplitBuckets, SplitCategory, clamp_days};

/// A request as submitted, before it is stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    /// The requesting employee.
    pub employee_id: String,
    /// First day of leave.
    pub start_date: NaiveDate,
    /// Last day of leave, inclusive.
    pub end_date: NaiveDate,
    /// Whether the request is debited from the CCT bucket.
    pub is_cct_leave: bool,
}

impl Submission {
    /// Number of calendar days covered, both ends included.
    pub fn total_days(&self) -> i64 {
        (self.end_date - self.start_date).num_days() + 1
    }
}

/// Validates a submission.
///
/// # Arguments
///
/// * `submission` - The request being submitted
/// * `today` - The service's current date
/// * `existing` - The employee's existing requests, in any status
/// * `split` - Split buckets of the ledger for the start year
///
/// # Returns
///
/// `Ok(())` if the request may be stored as pending, or the first
/// [`ValidationError`] encountered.
pub fn validate_submission(
    submission: &Submission,
    today: NaiveDate,
    existing: &[LeaveRequest],
    split: &SplitBuckets,
) -> Result<(), ValidationError> {
    let start = submission.start_date;
    let end = submission.end_date;

    if end < start {
        return Err(ValidationError::InvalidDateRange { start, end });
    }

    if start < today {
        return Err(ValidationError::StartInPast { start, today });
    }

    let duplicate = existing.iter().any(|r| {
        r.employee_id == submission.employee_id && r.start_date == start && r.end_date == end
    });
    if duplicate {
        return Err(ValidationError::DuplicatePeriod { start, end });
    }

    let total_days = i32::try_from(submission.total_days()).unwrap_or(i32::MAX);

    if submission.is_cct_leave {
        return check_projected(SplitCategory::Cct, total_days, split);
    }

    if total_days % DAYS_PER_WEEK != 0 {
        return Err(ValidationError::NotWholeWeeks { days: total_days });
    }
    if start.weekday() != Weekday::Mon || end.weekday() != Weekday::Sun {
        return Err(ValidationError::NotMondayToSunday { start, end });
    }

    let (business_days, holidays) = weekly_needs(total_days);
    check_projected(SplitCategory::BusinessDays, business_days, split)?;
    check_projected(SplitCategory::Holidays, holidays, split)
}

fn check_projected(
    category: SplitCategory,
    needed: i32,
    split: &SplitBuckets,
) -> Result<(), ValidationError> {
    let available = split.get(category).total();
    if i64::from(needed) > available {
        return Err(ValidationError::InsufficientProjectedBalance {
            bucket: category.to_string(),
            requested: needed,
            available: clamp_days(available),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::YearSplit;
    use chrono::Utc;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn submission(start: NaiveDate, end: NaiveDate, is_cct_leave: bool) -> Submission {
        Submission {
            employee_id: "emp_001".to_string(),
            start_date: start,
            end_date: end,
            is_cct_leave,
        }
    }

    fn funded() -> SplitBuckets {
        SplitBuckets {
            cct: YearSplit::new(2, 3),
            business_days: YearSplit::new(0, 20),
            holidays: YearSplit::new(0, 8),
        }
    }

    // 2026-03-02 is a Monday
    fn today() -> NaiveDate {
        date(2026, 2, 16)
    }

    #[test]
    fn test_valid_week_passes() {
        let s = submission(date(2026, 3, 2), date(2026, 3, 8), false);
        assert_eq!(validate_submission(&s, today(), &[], &funded()), Ok(()));
    }

    #[test]
    fn test_valid_cct_passes_any_weekday() {
        let s = submission(date(2026, 3, 4), date(2026, 3, 6), true);
        assert_eq!(validate_submission(&s, today(), &[], &funded()), Ok(()));
    }

    #[test]
    fn test_end_before_start() {
        let s = submission(date(2026, 3, 8), date(2026, 3, 2), false);
        match validate_submission(&s, today(), &[], &funded()) {
            Err(ValidationError::InvalidDateRange { .. }) => {}
            other => panic!("Expected InvalidDateRange, got {:?}", other),
        }
    }

    #[test]
    fn test_start_in_past() {
        let s = submission(date(2026, 2, 9), date(2026, 2, 15), false);
        match validate_submission(&s, today(), &[], &funded()) {
            Err(ValidationError::StartInPast { today: t, .. }) => assert_eq!(t, today()),
            other => panic!("Expected StartInPast, got {:?}", other),
        }
    }

    #[test]
    fn test_start_today_is_allowed() {
        let s = submission(today(), today(), true);
        assert!(validate_submission(&s, today(), &[], &funded()).is_ok());
    }

    #[test]
    fn test_duplicate_period_regardless_of_status() {
        let mut existing = LeaveRequest::new("emp_001", date(2026, 3, 2), date(2026, 3, 8), false, Utc::now());
        existing.status = crate::models::RequestStatus::Rejected;

        let s = submission(date(2026, 3, 2), date(2026, 3, 8), true);
        match validate_submission(&s, today(), &[existing], &funded()) {
            Err(ValidationError::DuplicatePeriod { .. }) => {}
            other => panic!("Expected DuplicatePeriod, got {:?}", other),
        }
    }

    #[test]
    fn test_ten_day_non_cct_span() {
        let s = submission(date(2026, 3, 2), date(2026, 3, 11), false);
        match validate_submission(&s, today(), &[], &funded()) {
            Err(ValidationError::NotWholeWeeks { days }) => assert_eq!(days, 10),
            other => panic!("Expected NotWholeWeeks, got {:?}", other),
        }
    }

    #[test]
    fn test_wednesday_start_week() {
        let s = submission(date(2026, 3, 4), date(2026, 3, 10), false);
        match validate_submission(&s, today(), &[], &funded()) {
            Err(ValidationError::NotMondayToSunday { .. }) => {}
            other => panic!("Expected NotMondayToSunday, got {:?}", other),
        }
    }

    #[test]
    fn test_cct_projection_counts_both_years() {
        let s = submission(date(2026, 3, 2), date(2026, 3, 6), true);
        assert!(validate_submission(&s, today(), &[], &funded()).is_ok());

        let s = submission(date(2026, 3, 2), date(2026, 3, 7), true);
        match validate_submission(&s, today(), &[], &funded()) {
            Err(ValidationError::InsufficientProjectedBalance { bucket, requested, available }) => {
                assert_eq!(bucket, "cct");
                assert_eq!(requested, 6);
                assert_eq!(available, 5);
            }
            other => panic!("Expected InsufficientProjectedBalance, got {:?}", other),
        }
    }

    #[test]
    fn test_holiday_projection_shortfall() {
        let mut split = funded();
        split.holidays = YearSplit::new(1, 0);

        let s = submission(date(2026, 3, 2), date(2026, 3, 8), false);
        match validate_submission(&s, today(), &[], &split) {
            Err(ValidationError::InsufficientProjectedBalance { bucket, .. }) => {
                assert_eq!(bucket, "holidays")
            }
            other => panic!("Expected InsufficientProjectedBalance, got {:?}", other),
        }
    }

    #[test]
    fn test_checks_run_in_order() {
        // Past, non-whole-week and unfunded all at once: past wins
        let s = submission(date(2026, 2, 10), date(2026, 2, 12), false);
        let empty = SplitBuckets::default();
        assert!(matches!(
            validate_submission(&s, today(), &[], &empty),
            Err(ValidationError::StartInPast { .. })
        ));
    }
}
