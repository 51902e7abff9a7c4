//! Accrual and deduction rules of the leave engine.
//!
//! This module contains the pure calculations behind leave balances:
//! seniority, entitlement tier resolution, annual allotment with proration,
//! canonical deduction against the yearly-split buckets and its refund
//! inverse, the legacy priority debit of the simple buckets, carry-over, and
//! onboarding grants. None of these functions touch storage.

mod allotment;
mod carry_over;
mod deduction;
mod onboarding;
mod policy_resolver;
mod priority_debit;
mod seniority;

pub use allotment::{
    Allotment, AllotmentResult, PRORATION_DAYS_PER_YEAR, cct_days_for, compute_annual_allotment,
    prorated_days, round_half_away_from_zero, split_allotment,
};
pub use carry_over::{CarriedBalance, apply_carry_over, remaining_balance};
pub use deduction::{
    AppliedDeduction, BUSINESS_DAYS_PER_WEEK, DAYS_PER_WEEK, DeductionResult, HOLIDAYS_PER_WEEK,
    SplitDebit, apply_deduction, debit_previous_then_current, refund_deduction, weekly_needs,
};
pub use onboarding::{apply_onboarding_grant, onboarding_grant};
pub use policy_resolver::{EntitlementSource, resolve_entitlement, resolve_entitlement_source};
pub use priority_debit::{PriorityDebit, SimpleDebitRequest, apply_priority_debit, plan_priority_debit};
pub use seniority::{completed_years, seniority_years};
