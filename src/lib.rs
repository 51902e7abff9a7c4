//! Leave balance accrual and deduction engine
//!
//! This crate computes annual leave allotments from seniority, tracks
//! per-employee yearly balance ledgers, validates and approves leave
//! requests against those ledgers, and rolls unused balance into the next
//! year.

#![warn(missing_docs)]

pub mod calculation;
pub mod config;
pub mod error;
pub mod lifecycle;
pub mod models;
pub mod notify;
pub mod store;
pub mod telemetry;
