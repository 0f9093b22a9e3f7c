//! Configuration types for candidate matching.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::matching::DEFAULT_AGE_TOLERANCE_YEARS;

/// Level assigned to labels missing from the scale.
pub const DEFAULT_PROFICIENCY_LEVEL: u8 = 2;

/// Deadline applied to a whole matching run unless configured otherwise.
pub const DEFAULT_DEADLINE_MS: u64 = 5_000;

/// How to pick one row when an employee lists the same skill twice.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicateSkillPolicy {
    /// The last row in store order wins.
    #[default]
    LastSeen,
    /// The first row in store order wins.
    FirstSeen,
    /// The row with the most years wins; ties keep the earlier row.
    MaxYears,
}

/// What a requirement without required skills does to the tier formulas.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyRequiredPolicy {
    /// Evaluate the formulas literally; `0 >= 0` holds.
    #[default]
    VacuousMatch,
    /// Never show a candidate for such a requirement.
    Exclude,
}

/// Ratios used by the tier decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierThresholds {
    /// Share of required skills that must be exceeded for EXCEEDS.
    pub exceeds_ratio: Decimal,
    /// Share of required skills that must match for POTENTIAL.
    pub potential_ratio: Decimal,
    /// Handling of requirements with no required skills.
    #[serde(default)]
    pub empty_required_skills: EmptyRequiredPolicy,
}

impl Default for TierThresholds {
    fn default() -> Self {
        Self {
            exceeds_ratio: Decimal::new(5, 1),
            potential_ratio: Decimal::new(8, 1),
            empty_required_skills: EmptyRequiredPolicy::default(),
        }
    }
}

/// Rules from `matching.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchingRules {
    /// Years outside the age window still accepted as POTENTIAL.
    #[serde(default = "default_age_tolerance")]
    pub age_tolerance_years: u32,
    /// Duplicate skill tie-break.
    #[serde(default)]
    pub duplicate_skills: DuplicateSkillPolicy,
    /// Upper bound on a single matching run.
    #[serde(default = "default_deadline_ms")]
    pub deadline_ms: u64,
    /// Tier ratios.
    #[serde(default)]
    pub tiers: TierThresholds,
}

fn default_age_tolerance() -> u32 {
    DEFAULT_AGE_TOLERANCE_YEARS
}

fn default_deadline_ms() -> u64 {
    DEFAULT_DEADLINE_MS
}

impl Default for MatchingRules {
    fn default() -> Self {
        Self {
            age_tolerance_years: DEFAULT_AGE_TOLERANCE_YEARS,
            duplicate_skills: DuplicateSkillPolicy::default(),
            deadline_ms: DEFAULT_DEADLINE_MS,
            tiers: TierThresholds::default(),
        }
    }
}

/// Maps descriptive proficiency labels onto levels 1-3.
///
/// # Example
///
/// ```
/// use staffing_match::config::ProficiencyScale;
///
/// let scale = ProficiencyScale::default();
/// assert_eq!(scale.level_for(Some("Experienced, available")), 3);
/// assert_eq!(scale.level_for(Some("Self-taught")), 2);
/// assert_eq!(scale.level_for(None), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProficiencyScale {
    /// Level for labels not in `labels`, and for rows without a label.
    #[serde(default = "default_proficiency_level")]
    pub default_level: u8,
    /// Label to level.
    pub labels: HashMap<String, u8>,
}

fn default_proficiency_level() -> u8 {
    DEFAULT_PROFICIENCY_LEVEL
}

impl ProficiencyScale {
    /// Resolves a label to its level.
    pub fn level_for(&self, label: Option<&str>) -> u8 {
        label
            .and_then(|label| self.labels.get(label.trim()).copied())
            .unwrap_or(self.default_level)
    }
}

impl Default for ProficiencyScale {
    fn default() -> Self {
        let labels = [
            ("No experience, but knowledgeable", 1),
            ("Sufficient experience available, training possible", 2),
            ("Experienced, available", 3),
        ]
        .into_iter()
        .map(|(label, level)| (label.to_string(), level))
        .collect();

        Self {
            default_level: DEFAULT_PROFICIENCY_LEVEL,
            labels,
        }
    }
}

/// The complete matching configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchingConfig {
    /// Matching rules.
    pub rules: MatchingRules,
    /// Proficiency label scale.
    pub proficiency: ProficiencyScale,
}
