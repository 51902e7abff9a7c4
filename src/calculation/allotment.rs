//! Annual allotment calculation.
//!
//! Turns an employee's seniority-derived entitlement into the allotted
//! amounts of the three simple buckets (workdays, holiday leave, CCT days),
//! prorating the entitlement for employees hired during the year.

use chrono::{Datelike, NaiveDate};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::config::{CctRules, LeavePolicy};
use crate::error::{EngineError, EngineResult};
use crate::models::{AuditStep, Employee};

use super::deduction::{BUSINESS_DAYS_PER_WEEK, DAYS_PER_WEEK};
use super::policy_resolver::{EntitlementSource, resolve_entitlement_source};
use super::seniority::seniority_years;

/// Length of the year used for proration.
pub const PRORATION_DAYS_PER_YEAR: i32 = 365;

/// Allotted amounts for one employee and year.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Allotment {
    /// Workdays allotted.
    pub workdays: i32,
    /// Holiday leave allotted.
    pub holiday_leave: i32,
    /// CCT days allotted.
    pub cct_days: i32,
}

impl Allotment {
    /// Total days across all buckets.
    pub fn total_days(&self) -> i32 {
        self.workdays + self.holiday_leave + self.cct_days
    }
}

/// The result of an annual allotment, including the decisions that produced it.
#[derive(Debug, Clone)]
pub struct AllotmentResult {
    /// The year the allotment applies to.
    pub year: i32,
    /// Seniority at the end of the year.
    pub seniority_years: i32,
    /// Entitlement before proration.
    pub standard_days: i32,
    /// Whether the entitlement was prorated for a mid-year hire.
    pub prorated: bool,
    /// Bucket amounts.
    pub allotment: Allotment,
    /// The audit steps recording each decision.
    pub audit_steps: Vec<AuditStep>,
}

/// Rounds to the nearest whole day, halves away from zero.
///
/// ```
/// use leave_engine::calculation::round_half_away_from_zero;
/// use rust_decimal::Decimal;
///
/// assert_eq!(round_half_away_from_zero(Decimal::new(65, 1)).unwrap(), 7);
/// assert_eq!(round_half_away_from_zero(Decimal::new(64, 1)).unwrap(), 6);
/// ```
pub fn round_half_away_from_zero(value: Decimal) -> EngineResult<i32> {
    value
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i32()
        .ok_or_else(|| EngineError::CalculationError {
            message: format!("{} days does not fit a day counter", value),
        })
}

/// Prorates an entitlement by the days worked in the year.
///
/// ```
/// use leave_engine::calculation::prorated_days;
///
/// // 180 / 365 * 14 = 6.90
/// assert_eq!(prorated_days(180, 14).unwrap(), 7);
/// ```
pub fn prorated_days(days_worked: i32, standard_days: i32) -> EngineResult<i32> {
    let worked = Decimal::from(days_worked) * Decimal::from(standard_days);
    round_half_away_from_zero(worked / Decimal::from(PRORATION_DAYS_PER_YEAR))
}

/// Returns the CCT days carried by an allotment.
pub fn cct_days_for(seniority_years: i32, total_days: i32, rules: &CctRules) -> i32 {
    if seniority_years >= rules.senior_threshold_years {
        rules.senior_days
    } else if total_days >= rules.entitlement_threshold_days {
        rules.entitlement_days
    } else {
        0
    }
}

/// Splits a total entitlement into `(workdays, holiday_leave)` after CCT days.
///
/// Workdays take 5/7 of the non-CCT days, rounded; holiday leave receives
/// the rest.
///
/// ```
/// use leave_engine::calculation::split_allotment;
///
/// assert_eq!(split_allotment(14, 0).unwrap(), (10, 4));
/// assert_eq!(split_allotment(21, 3).unwrap(), (13, 5));
/// ```
pub fn split_allotment(total_days: i32, cct_days: i32) -> EngineResult<(i32, i32)> {
    let base = (total_days - cct_days).max(0);
    let workdays = round_half_away_from_zero(
        Decimal::from(base * BUSINESS_DAYS_PER_WEEK) / Decimal::from(DAYS_PER_WEEK),
    )?;
    let holiday_leave = (total_days - workdays - cct_days).max(0);
    Ok((workdays, holiday_leave))
}

fn year_bound(year: i32, month: u32, day: u32) -> EngineResult<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| EngineError::CalculationError {
        message: format!("year {} is out of range", year),
    })
}

/// Computes an employee's annual allotment for a year.
///
/// # Arguments
///
/// * `employee` - The employee whose hire date drives seniority and proration
/// * `year` - The balance year
/// * `policy` - Entitlement tiers and CCT rules
///
/// # Returns
///
/// The bucket amounts and one audit step per rule applied (seniority,
/// entitlement, proration, CCT days, bucket split).
///
/// # Examples
///
/// ```
/// use leave_engine::calculation::compute_annual_allotment;
/// use leave_engine::config::LeavePolicy;
/// use leave_engine::models::Employee;
/// use chrono::NaiveDate;
///
/// let employee = Employee::new("emp_001", "Luis Perez", NaiveDate::from_ymd_opt(2014, 9, 20).unwrap());
/// let result = compute_annual_allotment(&employee, 2026, &LeavePolicy::default()).unwrap();
///
/// assert_eq!(result.seniority_years, 12);
/// assert_eq!(result.allotment.total_days(), 28);
/// assert_eq!(result.allotment.cct_days, 3);
/// ```
pub fn compute_annual_allotment(
    employee: &Employee,
    year: i32,
    policy: &LeavePolicy,
) -> EngineResult<AllotmentResult> {
    let mut audit_steps = Vec::with_capacity(5);
    let hire_date = employee.hire_date;

    let seniority = seniority_years(hire_date, year);
    audit_steps.push(AuditStep {
        step_number: 1,
        rule_id: "seniority".to_string(),
        rule_name: "Seniority Years".to_string(),
        input: serde_json::json!({
            "hire_date": hire_date.to_string(),
            "year": year
        }),
        output: serde_json::json!({ "seniority_years": seniority }),
        reasoning: format!("{} years of service at {}-12-31", seniority, year),
    });

    let source = resolve_entitlement_source(seniority, policy.tiers());
    let standard_days = match source {
        EntitlementSource::Tier(tier) | EntitlementSource::TopTierFallback(tier) => {
            tier.allotted_vacation_days
        }
        EntitlementSource::Default => policy.default_entitlement_days(),
    };
    audit_steps.push(AuditStep {
        step_number: 2,
        rule_id: "entitlement".to_string(),
        rule_name: "Entitlement Tier".to_string(),
        input: serde_json::json!({ "seniority_years": seniority }),
        output: serde_json::json!({
            "standard_days": standard_days,
            "resolution": source
        }),
        reasoning: match source {
            EntitlementSource::Tier(tier) => format!(
                "Tier {}-{} grants {} days",
                tier.min_seniority_years, tier.max_seniority_years, standard_days
            ),
            EntitlementSource::TopTierFallback(tier) => format!(
                "No tier contains {} years; top tier {}-{} grants {} days",
                seniority, tier.min_seniority_years, tier.max_seniority_years, standard_days
            ),
            EntitlementSource::Default => {
                format!("No tiers configured; default of {} days", standard_days)
            }
        },
    });

    let year_start = year_bound(year, 1, 1)?;
    let year_end = year_bound(year, 12, 31)?;
    let prorated = hire_date.year() == year && hire_date > year_start;
    let total_days = if prorated {
        let days_worked = i32::try_from((year_end - hire_date).num_days() + 1).map_err(|_| {
            EngineError::CalculationError {
                message: format!("days worked in {} out of range", year),
            }
        })?;
        let total = prorated_days(days_worked, standard_days)?;
        audit_steps.push(AuditStep {
            step_number: 3,
            rule_id: "proration".to_string(),
            rule_name: "Proportional Allotment".to_string(),
            input: serde_json::json!({
                "days_worked": days_worked,
                "standard_days": standard_days
            }),
            output: serde_json::json!({ "total_days": total, "prorated": true }),
            reasoning: format!(
                "Hired {}: {} / {} x {} = {} days",
                hire_date, days_worked, PRORATION_DAYS_PER_YEAR, standard_days, total
            ),
        });
        total
    } else {
        audit_steps.push(AuditStep {
            step_number: 3,
            rule_id: "proration".to_string(),
            rule_name: "Proportional Allotment".to_string(),
            input: serde_json::json!({ "hire_date": hire_date.to_string() }),
            output: serde_json::json!({ "total_days": standard_days, "prorated": false }),
            reasoning: format!("Not hired during {}; full entitlement applies", year),
        });
        standard_days
    };

    let cct_days = cct_days_for(seniority, total_days, policy.cct());
    audit_steps.push(AuditStep {
        step_number: 4,
        rule_id: "cct_days".to_string(),
        rule_name: "CCT Days".to_string(),
        input: serde_json::json!({
            "seniority_years": seniority,
            "total_days": total_days
        }),
        output: serde_json::json!({ "cct_days": cct_days }),
        reasoning: format!("{} CCT days for {} years and {} total days", cct_days, seniority, total_days),
    });

    let (workdays, holiday_leave) = split_allotment(total_days, cct_days)?;
    audit_steps.push(AuditStep {
        step_number: 5,
        rule_id: "bucket_split".to_string(),
        rule_name: "Bucket Split".to_string(),
        input: serde_json::json!({
            "total_days": total_days,
            "cct_days": cct_days
        }),
        output: serde_json::json!({
            "workdays": workdays,
            "holiday_leave": holiday_leave
        }),
        reasoning: format!(
            "({} - {}) x {}/{} = {} workdays; {} holiday leave",
            total_days, cct_days, BUSINESS_DAYS_PER_WEEK, DAYS_PER_WEEK, workdays, holiday_leave
        ),
    });

    Ok(AllotmentResult {
        year,
        seniority_years: seniority,
        standard_days,
        prorated,
        allotment: Allotment {
            workdays,
            holiday_leave,
            cct_days,
        },
        audit_steps,
    })
}
