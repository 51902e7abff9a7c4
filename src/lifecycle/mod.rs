//! Request lifecycle and the service operations built on the store.
//!
//! Requests move `pending -> approved` or `pending -> rejected`; both target
//! states are terminal. Submission is validated up front, approval debits
//! the yearly-split buckets under the ledger lock, and rejection refunds any
//! recorded deduction.

mod admin;
mod clock;
mod service;
mod validation;

pub use admin::{PrivilegeGrant, SplitAdjustment, apply_split_adjustment};
pub use clock::{Clock, FixedClock, SystemClock};
pub use service::{ApprovalOutcome, BatchFailure, BatchSummary, LeaveService};
pub use validation::{Submission, validate_submission};
