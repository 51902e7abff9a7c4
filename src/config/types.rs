//! Configuration types for leave accrual.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use serde::{Deserialize, Serialize};

/// Entitlement granted when no tier is configured at all.
pub const DEFAULT_ENTITLEMENT_DAYS: i32 = 14;

/// A seniority band and the vacation days it grants.
///
/// `min_seniority_years` is inclusive, `max_seniority_years` exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyTier {
    /// Lowest seniority in the band.
    pub min_seniority_years: i32,
    /// First seniority past the band.
    pub max_seniority_years: i32,
    /// Vacation days per year for the band.
    pub allotted_vacation_days: i32,
}

impl PolicyTier {
    /// Creates a tier.
    pub fn new(min_seniority_years: i32, max_seniority_years: i32, allotted_vacation_days: i32) -> Self {
        Self {
            min_seniority_years,
            max_seniority_years,
            allotted_vacation_days,
        }
    }

    /// Returns true if the seniority falls inside this band.
    pub fn contains(&self, seniority_years: i32) -> bool {
        self.min_seniority_years <= seniority_years && seniority_years < self.max_seniority_years
    }
}

/// Thresholds deciding how many CCT days an allotment carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CctRules {
    /// Seniority from which `senior_days` are granted.
    pub senior_threshold_years: i32,
    /// CCT days for senior employees.
    pub senior_days: i32,
    /// Total entitlement from which juniors receive `entitlement_days`.
    pub entitlement_threshold_days: i32,
    /// CCT days for juniors with a large enough entitlement.
    pub entitlement_days: i32,
}

impl Default for CctRules {
    fn default() -> Self {
        Self {
            senior_threshold_years: 10,
            senior_days: 3,
            entitlement_threshold_days: 16,
            entitlement_days: 2,
        }
    }
}

/// Split-bucket grant applied when an employee is onboarded.
///
/// Grants are matched in order; the first with `below_years` greater than the
/// employee's completed years wins, and a grant without `below_years` matches
/// everyone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OnboardingGrant {
    /// Exclusive upper bound on completed years, `None` for the open top band.
    #[serde(default)]
    pub below_years: Option<i32>,
    /// Current-year business days granted.
    pub business_days: i32,
    /// Current-year holidays granted.
    pub holidays: i32,
    /// Current-year CCT days granted.
    pub cct_days: i32,
}

/// Structure of `policy.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct PolicyFile {
    /// Fallback entitlement when no tiers exist.
    #[serde(default = "default_entitlement_days")]
    pub default_entitlement_days: i32,
    /// Entitlement tiers.
    #[serde(default)]
    pub tiers: Vec<PolicyTier>,
    /// CCT thresholds.
    #[serde(default)]
    pub cct: CctRules,
}

/// Structure of `onboarding.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct OnboardingFile {
    /// Grants ordered by `below_years`.
    pub grants: Vec<OnboardingGrant>,
}

fn default_entitlement_days() -> i32 {
    DEFAULT_ENTITLEMENT_DAYS
}

/// The complete accrual policy.
///
/// # Example
///
/// ```
/// use leave_engine::config::{LeavePolicy, PolicyTier};
///
/// let policy = LeavePolicy::default();
/// assert_eq!(policy.tiers()[0], PolicyTier::new(0, 5, 14));
/// assert_eq!(policy.default_entitlement_days(), 14);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeavePolicy {
    /// Tiers sorted by `min_seniority_years`.
    tiers: Vec<PolicyTier>,
    default_entitlement_days: i32,
    cct: CctRules,
    onboarding: Vec<OnboardingGrant>,
}

impl LeavePolicy {
    /// Creates a policy from its parts, sorting tiers by lower bound.
    pub fn new(
        tiers: Vec<PolicyTier>,
        default_entitlement_days: i32,
        cct: CctRules,
        onboarding: Vec<OnboardingGrant>,
    ) -> Self {
        let mut sorted_tiers = tiers;
        sorted_tiers.sort_by_key(|t| t.min_seniority_years);
        Self {
            tiers: sorted_tiers,
            default_entitlement_days,
            cct,
            onboarding,
        }
    }

    /// Returns a copy of this policy with different tiers.
    pub fn with_tiers(self, tiers: Vec<PolicyTier>) -> Self {
        Self::new(tiers, self.default_entitlement_days, self.cct, self.onboarding)
    }

    /// Returns the entitlement tiers.
    pub fn tiers(&self) -> &[PolicyTier] {
        &self.tiers
    }

    /// Returns the entitlement used when no tiers are configured.
    pub fn default_entitlement_days(&self) -> i32 {
        self.default_entitlement_days
    }

    /// Returns the CCT thresholds.
    pub fn cct(&self) -> &CctRules {
        &self.cct
    }

    /// Returns the onboarding grant bands.
    pub fn onboarding(&self) -> &[OnboardingGrant] {
        &self.onboarding
    }
}

impl Default for LeavePolicy {
    fn default() -> Self {
        Self::new(
            vec![
                PolicyTier::new(0, 5, 14),
                PolicyTier::new(5, 10, 21),
                PolicyTier::new(10, 20, 28),
                PolicyTier::new(20, 100, 35),
            ],
            DEFAULT_ENTITLEMENT_DAYS,
            CctRules::default(),
            vec![
                OnboardingGrant { below_years: Some(5), business_days: 10, holidays: 4, cct_days: 2 },
                OnboardingGrant { below_years: Some(10), business_days: 15, holidays: 6, cct_days: 2 },
                OnboardingGrant { below_years: Some(20), business_days: 20, holidays: 8, cct_days: 3 },
                OnboardingGrant { below_years: None, business_days: 25, holidays: 10, cct_days: 3 },
            ],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_sorts_tiers_by_min() {
        let policy = LeavePolicy::default().with_tiers(vec![
            PolicyTier::new(10, 20, 28),
            PolicyTier::new(0, 5, 14),
        ]);
        assert_eq!(policy.tiers()[0].min_seniority_years, 0);
        assert_eq!(policy.tiers()[1].min_seniority_years, 10);
    }

    #[test]
    fn test_tier_contains_is_half_open() {
        let tier = PolicyTier::new(5, 10, 21);
        assert!(!tier.contains(4));
        assert!(tier.contains(5));
        assert!(tier.contains(9));
        assert!(!tier.contains(10));
    }

    #[test]
    fn test_policy_file_defaults() {
        let file: PolicyFile = serde_yaml::from_str("tiers: []").unwrap();
        assert_eq!(file.default_entitlement_days, 14);
        assert_eq!(file.cct, CctRules::default());
    }

    #[test]
    fn test_onboarding_grant_open_band_deserializes() {
        let file: OnboardingFile = serde_yaml::from_str(
            "grants:\n  - business_days: 25\n    holidays: 10\n    cct_days: 3\n",
        )
        .unwrap();
        assert_eq!(file.grants[0].below_years, None);
    }
}
