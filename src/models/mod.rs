//! Core data models for the leave engine.
//!
//! This module contains all the domain records used throughout the engine.

mod audit;
mod employee;
mod leave_request;
mod ledger;

pub use audit::AuditStep;
pub use employee::Employee;
pub use leave_request::{LeaveRequest, RecordedDeduction, RequestStatus};
pub use ledger::{
    AvailableBuckets, BalanceLedger, LedgerKey, SimpleBucket, SimpleBuckets, SplitBuckets,
    SplitCategory, YearSplit,
};
pub(crate) use ledger::clamp_days;
