//! Error types for the leave engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while accruing, validating and
//! deducting leave.

use chrono::NaiveDate;
use thiserror::Error;
use uuid::Uuid;

use crate::models::RequestStatus;

/// Broad classification of an [`EngineError`].
///
/// Callers branch on the kind instead of matching every variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Configuration could not be loaded.
    Config,
    /// A submission failed validation.
    Validation,
    /// Buckets could not cover a deduction.
    Deduction,
    /// A request was not in a state that allows the operation.
    State,
    /// A referenced employee or request does not exist.
    NotFound,
    /// A record with the same identity already exists.
    Conflict,
    /// The store failed to read or write.
    Storage,
    /// An internal calculation could not be completed.
    Calculation,
}

/// Reasons a leave request is refused at submission time.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The end date precedes the start date.
    #[error("end date {end} is before start date {start}")]
    InvalidDateRange {
        /// Requested first day.
        start: NaiveDate,
        /// Requested last day.
        end: NaiveDate,
    },

    /// The request starts before today.
    #[error("start date {start} is in the past (today is {today})")]
    StartInPast {
        /// Requested first day.
        start: NaiveDate,
        /// The service's current date.
        today: NaiveDate,
    },

    /// The employee already has a request for exactly this period.
    #[error("a request for {start} to {end} already exists")]
    DuplicatePeriod {
        /// Requested first day.
        start: NaiveDate,
        /// Requested last day.
        end: NaiveDate,
    },

    /// Non-CCT leave must be taken in blocks of 7 days.
    #[error("non-CCT leave must span whole weeks, got {days} days")]
    NotWholeWeeks {
        /// Number of calendar days requested.
        days: i32,
    },

    /// Non-CCT leave must run Monday to Sunday.
    #[error("non-CCT leave must start on a Monday and end on a Sunday ({start} to {end})")]
    NotMondayToSunday {
        /// Requested first day.
        start: NaiveDate,
        /// Requested last day.
        end: NaiveDate,
    },

    /// The split buckets cannot cover the request.
    #[error("insufficient {bucket} balance: requested {requested}, available {available}")]
    InsufficientProjectedBalance {
        /// Bucket that falls short.
        bucket: String,
        /// Days the request needs from the bucket.
        requested: i32,
        /// Days available across previous and current year.
        available: i32,
    },
}

/// The main error type for the leave engine.
///
/// # Example
///
/// ```
/// use leave_engine::error::{EngineError, ErrorKind};
///
/// let error = EngineError::EmployeeNotFound {
///     id: "emp_404".to_string(),
/// };
/// assert_eq!(error.to_string(), "Employee not found: emp_404");
/// assert_eq!(error.kind(), ErrorKind::NotFound);
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A submission was refused.
    #[error("Invalid leave request: {0}")]
    Validation(#[from] ValidationError),

    /// A deduction could not be covered by the buckets.
    #[error("Insufficient {bucket} balance: requested {requested}, available {available}")]
    InsufficientBalance {
        /// The bucket that fell short.
        bucket: String,
        /// Days needed from the bucket.
        requested: i32,
        /// Days the bucket could provide.
        available: i32,
    },

    /// The request has already left the pending state.
    #[error("Request {request_id} is already {status}")]
    InvalidTransition {
        /// The request that was operated on.
        request_id: Uuid,
        /// Its current status.
        status: RequestStatus,
    },

    /// No employee with this id.
    #[error("Employee not found: {id}")]
    EmployeeNotFound {
        /// The missing employee id.
        id: String,
    },

    /// No request with this id.
    #[error("Leave request not found: {id}")]
    RequestNotFound {
        /// The missing request id.
        id: Uuid,
    },

    /// An employee with this id is already on record.
    #[error("Employee already exists: {id}")]
    EmployeeAlreadyExists {
        /// The conflicting employee id.
        id: String,
    },

    /// A manual balance adjustment carried an unusable value.
    #[error("Invalid adjustment of '{field}': {message}")]
    InvalidAdjustment {
        /// The field being adjusted.
        field: String,
        /// Why the value was refused.
        message: String,
    },

    /// The store could not complete an operation.
    #[error("Storage error: {message}")]
    StorageError {
        /// A description of the failure.
        message: String,
    },

    /// A general calculation error occurred.
    #[error("Calculation error: {message}")]
    CalculationError {
        /// A description of the calculation error.
        message: String,
    },

    /// The tracing subscriber could not be installed.
    #[error("Telemetry error: {message}")]
    TelemetryError {
        /// A description of the failure.
        message: String,
    },
}

impl EngineError {
    /// Returns the broad kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            EngineError::ConfigNotFound { .. }
            | EngineError::ConfigParseError { .. }
            | EngineError::TelemetryError { .. } => ErrorKind::Config,
            EngineError::Validation(_) | EngineError::InvalidAdjustment { .. } => {
                ErrorKind::Validation
            }
            EngineError::InsufficientBalance { .. } => ErrorKind::Deduction,
            EngineError::InvalidTransition { .. } => ErrorKind::State,
            EngineError::EmployeeNotFound { .. } | EngineError::RequestNotFound { .. } => {
                ErrorKind::NotFound
            }
            EngineError::EmployeeAlreadyExists { .. } => ErrorKind::Conflict,
            EngineError::StorageError { .. } => ErrorKind::Storage,
            EngineError::CalculationError { .. } => ErrorKind::Calculation,
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
