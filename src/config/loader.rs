//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading matching
//! configuration from YAML files.

use rust_decimal::Decimal;
use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};
use crate::models::is_valid_level;

use super::types::{MatchingConfig, MatchingRules, ProficiencyScale};

/// Loads and provides access to matching configuration.
///
/// # Directory Structure
///
/// ```text
/// config/default/
/// ├── matching.yaml     # Tolerances, tier ratios, policies, deadline
/// └── proficiency.yaml  # Proficiency label scale
/// ```
///
/// # Example
///
/// ```no_run
/// use staffing_match::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/default").unwrap();
/// println!("Age tolerance: {}", loader.rules().age_tolerance_years);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    config: MatchingConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing
    /// - Any file contains invalid YAML
    /// - A ratio or level is out of range
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let matching_path = path.join("matching.yaml");
        let rules = Self::load_yaml::<MatchingRules>(&matching_path)?;
        Self::validate_rules(&rules, &matching_path)?;

        let proficiency_path = path.join("proficiency.yaml");
        let proficiency = Self::load_yaml::<ProficiencyScale>(&proficiency_path)?;
        Self::validate_scale(&proficiency, &proficiency_path)?;

        Ok(Self {
            config: MatchingConfig { rules, proficiency },
        })
    }

    /// Wraps an already-built configuration.
    pub fn from_config(config: MatchingConfig) -> Self {
        Self { config }
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

    fn validate_rules(rules: &MatchingRules, path: &Path) -> EngineResult<()> {
        for (name, ratio) in [
            ("exceeds_ratio", rules.tiers.exceeds_ratio),
            ("potential_ratio", rules.tiers.potential_ratio),
        ] {
            if ratio <= Decimal::ZERO || ratio > Decimal::ONE {
                return Err(EngineError::ConfigParseError {
                    path: path.display().to_string(),
                    message: format!("{} must be in (0, 1], got {}", name, ratio),
                });
            }
        }

        if rules.deadline_ms == 0 {
            return Err(EngineError::ConfigParseError {
                path: path.display().to_string(),
                message: "deadline_ms must be positive".to_string(),
            });
        }

        Ok(())
    }

    fn validate_scale(scale: &ProficiencyScale, path: &Path) -> EngineResult<()> {
        if !is_valid_level(scale.default_level) {
            return Err(EngineError::ConfigParseError {
                path: path.display().to_string(),
                message: format!("default_level {} is outside 1-3", scale.default_level),
            });
        }

        if let Some((label, level)) = scale.labels.iter().find(|(_, level)| !is_valid_level(**level)) {
            return Err(EngineError::ConfigParseError {
                path: path.display().to_string(),
                message: format!("label '{}' maps to level {} outside 1-3", label, level),
            });
        }

        Ok(())
    }

    /// Returns the underlying matching configuration.
    pub fn config(&self) -> &MatchingConfig {
        &self.config
    }

    /// Returns the matching rules.
    pub fn rules(&self) -> &MatchingRules {
        &self.config.rules
    }

    /// Returns the proficiency scale.
    pub fn proficiency(&self) -> &ProficiencyScale {
        &self.config.proficiency
    }
}
