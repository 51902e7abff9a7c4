//! Configuration loading and management for the leave engine.
//!
//! This module loads the accrual policy from YAML files: entitlement tiers,
//! the fallback entitlement, CCT thresholds and onboarding grants.
//!
//! # Example
//!
//! ```no_run
//! use leave_engine::config::ConfigLoader;
//!
//! let loader = ConfigLoader::load("./config/default").unwrap();
//! println!("Default entitlement: {}", loader.policy().default_entitlement_days());
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    CctRules, DEFAULT_ENTITLEMENT_DAYS, LeavePolicy, OnboardingFile, OnboardingGrant, PolicyFile,
    PolicyTier,
};
