//! Outbound notifications about leave requests.
//!
//! The service hands a [`Notification`] to a [`Notifier`] after each request
//! transition has been committed. Delivery is fire-and-forget: a failing
//! notifier is logged and never undoes the transition.

use std::fmt;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::models::{Employee, LeaveRequest};

/// The transition a notification reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationEvent {
    /// A request was submitted.
    Received,
    /// A request was approved.
    Approved,
    /// A request was rejected.
    Rejected,
}

impl fmt::Display for NotificationEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotificationEvent::Received => write!(f, "Received"),
            NotificationEvent::Approved => write!(f, "Approved"),
            NotificationEvent::Rejected => write!(f, "Rejected"),
        }
    }
}

/// A message about one request, addressed to the employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    /// The transition being reported.
    pub event: NotificationEvent,
    /// The request concerned.
    pub request_id: Uuid,
    /// Every address linked to the employee. May be empty.
    pub recipients: Vec<String>,
    /// Subject line.
    pub subject: String,
    /// Plain-text body.
    pub body: String,
}

impl Notification {
    /// Builds the notification for a request transition.
    ///
    /// # Example
    ///
    /// ```
    /// use chrono::{NaiveDate, Utc};
    /// use leave_engine::models::{Employee, LeaveRequest};
    /// use leave_engine::notify::{Notification, NotificationEvent};
    ///
    /// let employee = Employee::new("emp_001", "Ana Gomez", NaiveDate::from_ymd_opt(2020, 3, 15).unwrap());
    /// let request = LeaveRequest::new(
    ///     "emp_001",
    ///     NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
    ///     NaiveDate::from_ymd_opt(2026, 3, 4).unwrap(),
    ///     true,
    ///     Utc::now(),
    /// );
    ///
    /// let notification = Notification::for_request(NotificationEvent::Received, &employee, &request);
    /// assert_eq!(notification.subject, "Leave Request - Received");
    /// ```
    pub fn for_request(event: NotificationEvent, employee: &Employee, request: &LeaveRequest) -> Self {
        let body = format!(
            "Employee: {}\nPeriod: {} to {}\nStatus: {}\nDeductions - CCT: {}, Workdays: {}, Holiday leave: {}\n",
            employee.full_name,
            request.start_date,
            request.end_date,
            request.status,
            request.deduction.cct_days,
            request.deduction.workdays,
            request.deduction.holiday_leave,
        );

        Self {
            event,
            request_id: request.id,
            recipients: employee.emails.clone(),
            subject: format!("Leave Request - {}", event),
            body,
        }
    }
}

/// Failure to hand a notification to its transport.
#[derive(Debug, Error)]
pub enum NotifyError {
    /// The transport refused or could not be reached.
    #[error("notification transport unavailable: {0}")]
    Transport(String),
}

/// Outbound notification hook (e-mail, chat, queue adapters).
pub trait Notifier: Send + Sync {
    /// Delivers one notification.
    fn deliver(&self, notification: &Notification) -> Result<(), NotifyError>;
}

/// Writes notifications to the log instead of sending them.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn deliver(&self, notification: &Notification) -> Result<(), NotifyError> {
        tracing::info!(
            request_id = %notification.request_id,
            event = %notification.event,
            recipients = notification.recipients.len(),
            subject = %notification.subject,
            "notification"
        );
        Ok(())
    }
}

/// Keeps every delivered notification in memory.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    delivered: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    /// Creates an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Notifications delivered so far, oldest first.
    pub fn delivered(&self) -> Vec<Notification> {
        self.delivered.lock().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn deliver(&self, notification: &Notification) -> Result<(), NotifyError> {
        self.delivered.lock().push(notification.clone());
        Ok(())
    }
}
