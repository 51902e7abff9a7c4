//! Balance ledger model.
//!
//! A [`BalanceLedger`] holds one employee's leave balance for one calendar
//! year. It carries two representations side by side:
//!
//! - *simple buckets* ([`SimpleBuckets`]): allotted, carried-over and taken
//!   amounts for workdays, holiday leave and CCT days. Written by annual
//!   allotment and carry-over.
//! - *yearly-split buckets* ([`SplitBuckets`]): CCT, business-day and holiday
//!   balances split by originating year. Debited by request approval.
//!
//! The ledger is a passive record; the deduction engine is responsible for
//! never letting a debit exceed what a bucket holds.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Unique key of a ledger: one per employee per calendar year.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LedgerKey {
    /// The owning employee.
    pub employee_id: String,
    /// The calendar year.
    pub year: i32,
}

impl LedgerKey {
    /// Creates a ledger key.
    pub fn new(employee_id: impl Into<String>, year: i32) -> Self {
        Self {
            employee_id: employee_id.into(),
            year,
        }
    }
}

impl fmt::Display for LedgerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.employee_id, self.year)
    }
}

/// Allotted, carried-over and taken amounts of one simple bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimpleBucket {
    /// Days granted for the year by annual allotment.
    pub allotted: i32,
    /// Days rolled over from the previous year.
    pub carried_over: i32,
    /// Days already consumed.
    pub taken: i32,
}

/// Narrows a widened day count to `0..=i32::MAX`.
pub(crate) fn clamp_days(days: i64) -> i32 {
    i32::try_from(days.max(0)).unwrap_or(i32::MAX)
}

impl SimpleBucket {
    /// Returns the unused amount, never negative and saturating at `i32::MAX`.
    ///
    /// ```
    /// use leave_engine::models::SimpleBucket;
    ///
    /// let bucket = SimpleBucket { allotted: 14, carried_over: 0, taken: 18 };
    /// assert_eq!(bucket.available(), 0);
    /// ```
    pub fn available(&self) -> i32 {
        clamp_days(i64::from(self.allotted) + i64::from(self.carried_over) - i64::from(self.taken))
    }
}

/// The three simple buckets of a ledger.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimpleBuckets {
    /// Workdays bucket.
    pub workdays: SimpleBucket,
    /// Holiday-leave bucket.
    pub holiday_leave: SimpleBucket,
    /// CCT days bucket.
    pub cct_days: SimpleBucket,
}

/// Unused simple-bucket amounts, as returned by [`BalanceLedger::available_buckets`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailableBuckets {
    /// Unused workdays.
    pub workdays: i32,
    /// Unused holiday leave.
    pub holiday: i32,
    /// Unused CCT days.
    pub cct: i32,
}

/// A balance split by the year in which it was granted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearSplit {
    /// Balance granted in the previous year, consumed first.
    pub previous_year: i32,
    /// Balance granted in the current year.
    pub current_year: i32,
}

impl YearSplit {
    /// Creates a split balance.
    pub fn new(previous_year: i32, current_year: i32) -> Self {
        Self {
            previous_year,
            current_year,
        }
    }

    /// Total balance across both years, widened so two full years cannot overflow.
    pub fn total(&self) -> i64 {
        i64::from(self.previous_year) + i64::from(self.current_year)
    }
}

/// Categories of the yearly-split buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SplitCategory {
    /// CCT days.
    Cct,
    /// Business days, consumed 5 per week of non-CCT leave.
    BusinessDays,
    /// Holidays, consumed 2 per week of non-CCT leave.
    Holidays,
}

impl fmt::Display for SplitCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SplitCategory::Cct => write!(f, "cct"),
            SplitCategory::BusinessDays => write!(f, "business_days"),
            SplitCategory::Holidays => write!(f, "holidays"),
        }
    }
}

/// The yearly-split buckets of a ledger.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitBuckets {
    /// CCT days by year.
    pub cct: YearSplit,
    /// Business days by year.
    pub business_days: YearSplit,
    /// Holidays by year.
    pub holidays: YearSplit,
}

impl SplitBuckets {
    /// Returns the split for a category.
    pub fn get(&self, category: SplitCategory) -> YearSplit {
        match category {
            SplitCategory::Cct => self.cct,
            SplitCategory::BusinessDays => self.business_days,
            SplitCategory::Holidays => self.holidays,
        }
    }

    /// Returns a mutable reference to the split for a category.
    pub fn get_mut(&mut self, category: SplitCategory) -> &mut YearSplit {
        match category {
            SplitCategory::Cct => &mut self.cct,
            SplitCategory::BusinessDays => &mut self.business_days,
            SplitCategory::Holidays => &mut self.holidays,
        }
    }
}

/// One employee's leave balance for one calendar year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceLedger {
    /// The owning employee.
    pub employee_id: String,
    /// The calendar year.
    pub year: i32,
    /// Allotment/carry-over representation.
    #[serde(default)]
    pub simple: SimpleBuckets,
    /// Canonical deduction representation.
    #[serde(default)]
    pub split: SplitBuckets,
}

impl BalanceLedger {
    /// Creates a ledger with every counter at zero.
    ///
    /// ```
    /// use leave_engine::models::{BalanceLedger, LedgerKey};
    ///
    /// let ledger = BalanceLedger::empty(&LedgerKey::new("emp_001", 2026));
    /// assert_eq!(ledger.year, 2026);
    /// assert_eq!(ledger.available_buckets().workdays, 0);
    /// ```
    pub fn empty(key: &LedgerKey) -> Self {
        Self {
            employee_id: key.employee_id.clone(),
            year: key.year,
            simple: SimpleBuckets::default(),
            split: SplitBuckets::default(),
        }
    }

    /// Returns this ledger's key.
    pub fn key(&self) -> LedgerKey {
        LedgerKey::new(self.employee_id.clone(), self.year)
    }

    /// Returns the unused amount of each simple bucket, floored at zero.
    pub fn available_buckets(&self) -> AvailableBuckets {
        AvailableBuckets {
            workdays: self.simple.workdays.available(),
            holiday: self.simple.holiday_leave.available(),
            cct: self.simple.cct_days.available(),
        }
    }
}
