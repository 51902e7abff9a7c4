//! Seniority calculation.
//!
//! Two measures of service are used by the engine: seniority at the end of a
//! balance year (for annual allotment) and completed anniversary years on a
//! given date (for onboarding grants).

use chrono::{Datelike, NaiveDate};

/// Returns whole years of service at December 31 of `target_year`, floored at 0.
///
/// Every anniversary in `target_year` falls on or before December 31, so the
/// result is the difference of calendar years.
///
/// # Examples
///
/// ```
/// use leave_engine::calculation::seniority_years;
/// use chrono::NaiveDate;
///
/// let hired = NaiveDate::from_ymd_opt(2020, 11, 30).unwrap();
/// assert_eq!(seniority_years(hired, 2026), 6);
/// assert_eq!(seniority_years(hired, 2019), 0);
/// ```
pub fn seniority_years(hire_date: NaiveDate, target_year: i32) -> i32 {
    (target_year - hire_date.year()).max(0)
}

/// Returns the number of anniversaries passed on `on`, floored at 0.
///
/// # Examples
///
/// ```
/// use leave_engine::calculation::completed_years;
/// use chrono::NaiveDate;
///
/// let hired = NaiveDate::from_ymd_opt(2020, 11, 30).unwrap();
/// assert_eq!(completed_years(hired, NaiveDate::from_ymd_opt(2026, 11, 29).unwrap()), 5);
/// assert_eq!(completed_years(hired, NaiveDate::from_ymd_opt(2026, 11, 30).unwrap()), 6);
/// ```
pub fn completed_years(hire_date: NaiveDate, on: NaiveDate) -> i32 {
    let mut years = on.year() - hire_date.year();
    if (on.month(), on.day()) < (hire_date.month(), hire_date.day()) {
        years -= 1;
    }
    years.max(0)
}
