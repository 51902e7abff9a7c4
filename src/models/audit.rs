//! Audit records for accrual and deduction decisions.

use serde::{Deserialize, Serialize};

/// A single step in an accrual or deduction calculation.
///
/// Each step records which rule was applied, its inputs and outputs, and a
/// human-readable explanation, so that balances can be traced back to the
/// rules that produced them.
///
/// # Example
///
/// ```
/// use leave_engine::models::AuditStep;
///
/// let step = AuditStep {
///     step_number: 1,
///     rule_id: "seniority".to_string(),
///     rule_name: "Seniority Years".to_string(),
///     input: serde_json::json!({ "hire_date": "2020-03-15", "year": 2026 }),
///     output: serde_json::json!({ "seniority_years": 6 }),
///     reasoning: "2026 - 2020 = 6 years of service at 2026-12-31".to_string(),
/// };
/// assert_eq!(step.output["seniority_years"], 6);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}
