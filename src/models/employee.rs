//! Employee model.
//!
//! Employees are created by HR onboarding; the leave engine only reads them.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Represents an employee who accrues and takes leave.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier for the employee.
    pub id: String,
    /// The employee's full name.
    pub full_name: String,
    /// The date the employee started employment. Never changes once set.
    pub hire_date: NaiveDate,
    /// Whether the employee is currently employed.
    #[serde(default = "default_active")]
    pub is_active: bool,
    /// Email addresses linked to the employee, used as notification recipients.
    #[serde(default)]
    pub emails: Vec<String>,
}

fn default_active() -> bool {
    true
}

impl Employee {
    /// Creates an active employee with no linked email addresses.
    ///
    /// # Examples
    ///
    /// ```
    /// use leave_engine::models::Employee;
    /// use chrono::NaiveDate;
    ///
    /// let employee = Employee::new(
    ///     "emp_001",
    ///     "Ana Gomez",
    ///     NaiveDate::from_ymd_opt(2020, 3, 15).unwrap(),
    /// );
    /// assert!(employee.is_active);
    /// assert!(employee.emails.is_empty());
    /// ```
    pub fn new(id: impl Into<String>, full_name: impl Into<String>, hire_date: NaiveDate) -> Self {
        Self {
            id: id.into(),
            full_name: full_name.into(),
            hire_date,
            is_active: true,
            emails: Vec::new(),
        }
    }

    /// Adds a notification address.
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.emails.push(email.into());
        self
    }
}
