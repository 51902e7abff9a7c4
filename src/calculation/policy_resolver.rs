//! Entitlement tier resolution.
//!
//! Maps seniority to vacation days through a three-step fallback chain:
//! the containing tier, then the open-ended top tier, then a fixed default.

use serde::Serialize;

use crate::config::PolicyTier;

/// How an entitlement was resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum EntitlementSource {
    /// A tier contains the seniority.
    Tier(PolicyTier),
    /// No tier contains the seniority; the tier with the highest upper bound applies.
    TopTierFallback(PolicyTier),
    /// No tiers are configured.
    Default,
}

/// Finds the source of the entitlement for a seniority.
///
/// Among tiers containing the seniority the lowest `min_seniority_years`
/// wins. With none containing it, the tier with the highest
/// `max_seniority_years` applies (the first configured one on ties).
pub fn resolve_entitlement_source(seniority_years: i32, tiers: &[PolicyTier]) -> EntitlementSource {
    if let Some(tier) = tiers
        .iter()
        .filter(|t| t.contains(seniority_years))
        .min_by_key(|t| t.min_seniority_years)
    {
        return EntitlementSource::Tier(*tier);
    }

    let top_tier = tiers.iter().fold(None::<&PolicyTier>, |best, tier| match best {
        Some(b) if b.max_seniority_years >= tier.max_seniority_years => Some(b),
        _ => Some(tier),
    });

    match top_tier {
        Some(tier) => EntitlementSource::TopTierFallback(*tier),
        None => EntitlementSource::Default,
    }
}

/// Returns the vacation days granted for a seniority.
///
/// # Examples
///
/// ```
/// use leave_engine::calculation::resolve_entitlement;
/// use leave_engine::config::PolicyTier;
///
/// let tiers = vec![PolicyTier::new(0, 5, 14), PolicyTier::new(5, 10, 21)];
/// assert_eq!(resolve_entitlement(7, &tiers, 14), 21);
/// // Beyond every tier: the top tier applies
/// assert_eq!(resolve_entitlement(40, &tiers, 14), 21);
/// // Nothing configured
/// assert_eq!(resolve_entitlement(3, &[], 14), 14);
/// ```
pub fn resolve_entitlement(seniority_years: i32, tiers: &[PolicyTier], default_days: i32) -> i32 {
    match resolve_entitlement_source(seniority_years, tiers) {
        EntitlementSource::Tier(tier) | EntitlementSource::TopTierFallback(tier) => {
            tier.allotted_vacation_days
        }
        EntitlementSource::Default => default_days,
    }
}
