//! Split-bucket grants for newly onboarded employees.

use crate::config::OnboardingGrant;
use crate::models::BalanceLedger;

/// Selects the grant band for an employee's completed years of service.
///
/// Bands are checked in order; the first whose `below_years` exceeds the
/// completed years applies, and a band without `below_years` matches any
/// seniority.
///
/// # Examples
///
/// ```
/// use leave_engine::calculation::onboarding_grant;
/// use leave_engine::config::LeavePolicy;
///
/// let policy = LeavePolicy::default();
/// let grant = onboarding_grant(7, policy.onboarding()).unwrap();
/// assert_eq!((grant.business_days, grant.holidays, grant.cct_days), (15, 6, 2));
/// ```
pub fn onboarding_grant(completed_years: i32, grants: &[OnboardingGrant]) -> Option<OnboardingGrant> {
    grants
        .iter()
        .find(|g| g.below_years.is_none_or(|limit| completed_years < limit))
        .copied()
}

/// Sets the current-year split buckets of `ledger` to the grant.
pub fn apply_onboarding_grant(ledger: &mut BalanceLedger, grant: &OnboardingGrant) {
    ledger.split.business_days.current_year = grant.business_days;
    ledger.split.holidays.current_year = grant.holidays;
    ledger.split.cct.current_year = grant.cct_days;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LeavePolicy;
    use crate::models::{LedgerKey, YearSplit};

    #[test]
    fn test_bands_of_default_policy() {
        let policy = LeavePolicy::default();
        let grants = policy.onboarding();

        let band = |years| {
            let g = onboarding_grant(years, grants).unwrap();
            (g.business_days, g.holidays, g.cct_days)
        };

        assert_eq!(band(0), (10, 4, 2));
        assert_eq!(band(4), (10, 4, 2));
        assert_eq!(band(5), (15, 6, 2));
        assert_eq!(band(19), (20, 8, 3));
        assert_eq!(band(20), (25, 10, 3));
        assert_eq!(band(45), (25, 10, 3));
    }

    #[test]
    fn test_no_open_band_and_too_senior_grants_nothing() {
        let grants = [OnboardingGrant {
            below_years: Some(5),
            business_days: 10,
            holidays: 4,
            cct_days: 2,
        }];
        assert_eq!(onboarding_grant(6, &grants), None);
    }

    #[test]
    fn test_apply_sets_current_year_only() {
        let mut ledger = BalanceLedger::empty(&LedgerKey::new("emp_001", 2026));
        ledger.split.cct.previous_year = 1;

        let grant = OnboardingGrant {
            below_years: None,
            business_days: 20,
            holidays: 8,
            cct_days: 3,
        };
        apply_onboarding_grant(&mut ledger, &grant);

        assert_eq!(ledger.split.cct, YearSplit::new(1, 3));
        assert_eq!(ledger.split.business_days, YearSplit::new(0, 20));
        assert_eq!(ledger.split.holidays, YearSplit::new(0, 8));
    }
}
