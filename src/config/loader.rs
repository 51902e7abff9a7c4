//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the leave
//! policy from YAML files.

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::types::{LeavePolicy, OnboardingFile, PolicyFile};

/// Loads and provides access to the leave policy.
///
/// # Directory Structure
///
/// ```text
/// config/default/
/// ├── policy.yaml      # Entitlement tiers, default entitlement, CCT rules
/// └── onboarding.yaml  # Split-bucket grants applied at onboarding
/// ```
///
/// # Example
///
/// ```no_run
/// use leave_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/default")?;
/// println!("{} tiers loaded", loader.policy().tiers().len());
/// # Ok::<(), leave_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    policy: LeavePolicy,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// Returns an error if either file is missing or contains invalid YAML.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let policy_file = Self::load_yaml::<PolicyFile>(&path.join("policy.yaml"))?;
        let onboarding_file = Self::load_yaml::<OnboardingFile>(&path.join("onboarding.yaml"))?;

        if policy_file.tiers.iter().any(|t| t.min_seniority_years >= t.max_seniority_years) {
            tracing::warn!(
                path = %path.display(),
                "policy contains empty tiers; they will never match"
            );
        }

        let policy = LeavePolicy::new(
            policy_file.tiers,
            policy_file.default_entitlement_days,
            policy_file.cct,
            onboarding_file.grants,
        );

        Ok(Self { policy })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the loaded policy.
    pub fn policy(&self) -> &LeavePolicy {
        &self.policy
    }

    /// Consumes the loader, returning the policy.
    pub fn into_policy(self) -> LeavePolicy {
        self.policy
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CctRules, PolicyTier};

    fn config_path() -> &'static str {
        "./config/default"
    }

    #[test]
    fn test_load_default_configuration() {
        let result = ConfigLoader::load(config_path());
        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());

        let loader = result.unwrap();
        assert_eq!(loader.policy(), &LeavePolicy::default());
    }

    #[test]
    fn test_default_configuration_tiers() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        let tiers = loader.policy().tiers();

        assert_eq!(tiers.len(), 4);
        assert_eq!(tiers[0], PolicyTier::new(0, 5, 14));
        assert_eq!(tiers[3], PolicyTier::new(20, 100, 35));
        assert_eq!(loader.policy().cct(), &CctRules::default());
    }

    #[test]
    fn test_load_missing_directory_returns_error() {
        let result = ConfigLoader::load("/nonexistent/path");

        match result {
            Err(EngineError::ConfigNotFound { path }) => {
                assert!(path.contains("policy.yaml"));
            }
            _ => panic!("Expected ConfigNotFound error"),
        }
    }

    #[test]
    fn test_load_malformed_yaml_returns_parse_error() {
        let dir = std::env::temp_dir().join(format!("leave-engine-bad-{}", uuid::Uuid::new_v4()));
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("policy.yaml"), "tiers: [not, a, tier").unwrap();
        fs::write(dir.join("onboarding.yaml"), "grants: []").unwrap();

        let result = ConfigLoader::load(&dir);
        fs::remove_dir_all(&dir).unwrap();

        match result {
            Err(EngineError::ConfigParseError { path, .. }) => {
                assert!(path.ends_with("policy.yaml"));
            }
            _ => panic!("Expected ConfigParseError"),
        }
    }
}
