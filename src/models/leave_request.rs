//! Leave request model and its status.

use std::fmt;

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::LedgerKey;

/// Status of a leave request.
///
/// `Pending` is the initial state; `Approved` and `Rejected` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    /// Awaiting a decision.
    Pending,
    /// Approved; the ledger has been debited.
    Approved,
    /// Rejected; any recorded deduction has been refunded.
    Rejected,
}

impl RequestStatus {
    /// Returns true if no further transition is allowed.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, RequestStatus::Pending)
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestStatus::Pending => write!(f, "pending"),
            RequestStatus::Approved => write!(f, "approved"),
            RequestStatus::Rejected => write!(f, "rejected"),
        }
    }
}

/// Amounts actually debited when the request was approved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordedDeduction {
    /// Workdays (business days) debited.
    pub workdays: i32,
    /// Holiday leave debited.
    pub holiday_leave: i32,
    /// CCT days debited.
    pub cct_days: i32,
}

impl RecordedDeduction {
    /// Returns true if nothing was debited.
    pub fn is_zero(&self) -> bool {
        self.workdays == 0 && self.holiday_leave == 0 && self.cct_days == 0
    }
}

/// A request by an employee to take leave over an inclusive date range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveRequest {
    /// Unique identifier for the request.
    pub id: Uuid,
    /// The requesting employee.
    pub employee_id: String,
    /// First day of leave.
    pub start_date: NaiveDate,
    /// Last day of leave (inclusive).
    pub end_date: NaiveDate,
    /// CCT leave is debited day for day from the CCT buckets; other leave is
    /// taken in whole weeks from the business-day and holiday buckets.
    pub is_cct_leave: bool,
    /// Current status.
    pub status: RequestStatus,
    /// What approval debited.
    #[serde(default)]
    pub deduction: RecordedDeduction,
    /// When the request was submitted.
    pub requested_at: DateTime<Utc>,
}

impl LeaveRequest {
    /// Creates a pending request with a fresh id and no recorded deduction.
    pub fn new(
        employee_id: impl Into<String>,
        start_date: NaiveDate,
        end_date: NaiveDate,
        is_cct_leave: bool,
        requested_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            employee_id: employee_id.into(),
            start_date,
            end_date,
            is_cct_leave,
            status: RequestStatus::Pending,
            deduction: RecordedDeduction::default(),
            requested_at,
        }
    }

    /// Number of calendar days covered, both ends included.
    ///
    /// # Examples
    ///
    /// ```
    /// use leave_engine::models::LeaveRequest;
    /// use chrono::{NaiveDate, Utc};
    ///
    /// let request = LeaveRequest::new(
    ///     "emp_001",
    ///     NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
    ///     NaiveDate::from_ymd_opt(2026, 3, 8).unwrap(),
    ///     false,
    ///     Utc::now(),
    /// );
    /// assert_eq!(request.total_days(), 7);
    /// ```
    pub fn total_days(&self) -> i64 {
        (self.end_date - self.start_date).num_days() + 1
    }

    /// The ledger this request is debited from: the one for its start year.
    pub fn ledger_key(&self) -> LedgerKey {
        LedgerKey::new(self.employee_id.clone(), self.start_date.year())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_new_request_is_pending_without_deduction() {
        let request = LeaveRequest::new("emp_001", date(2026, 3, 2), date(2026, 3, 4), true, Utc::now());
        assert_eq!(request.status, RequestStatus::Pending);
        assert!(request.deduction.is_zero());
        assert_eq!(request.total_days(), 3);
    }

    #[test]
    fn test_ledger_key_uses_start_year() {
        let request = LeaveRequest::new("emp_001", date(2026, 12, 28), date(2027, 1, 3), false, Utc::now());
        assert_eq!(request.ledger_key(), LedgerKey::new("emp_001", 2026));
    }

    #[test]
    fn test_terminal_statuses() {
        assert!(!RequestStatus::Pending.is_terminal());
        assert!(RequestStatus::Approved.is_terminal());
        assert!(RequestStatus::Rejected.is_terminal());
    }

    #[test]
    fn test_status_serialization() {
        assert_eq!(serde_json::to_string(&RequestStatus::Pending).unwrap(), "\"pending\"");
        assert_eq!(serde_json::to_string(&RequestStatus::Rejected).unwrap(), "\"rejected\"");
    }

    #[test]
    fn test_recorded_deduction_is_zero() {
        let deduction = RecordedDeduction {
            workdays: 0,
            holiday_leave: 0,
            cct_days: 1,
        };
        assert!(!deduction.is_zero());
    }
}
