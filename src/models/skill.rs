//! Skill models shared by requirements and employees.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Lowest valid proficiency level.
pub const MIN_PROFICIENCY_LEVEL: u8 = 1;

/// Highest valid proficiency level.
pub const MAX_PROFICIENCY_LEVEL: u8 = 3;

/// Which list of a requirement a skill belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillKind {
    /// Must-have skill; drives the EXCEEDS/EXACT/NEAR thresholds.
    Required,
    /// Nice-to-have skill; reported but never gates a tier.
    Preferred,
}

impl SkillKind {
    /// Returns the lower-case label used in payloads and logs.
    pub fn as_str(self) -> &'static str {
        match self {
            SkillKind::Required => "required",
            SkillKind::Preferred => "preferred",
        }
    }
}

/// A skill demanded by a staffing requirement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequirementSkill {
    /// Skill name, matched exactly against employee skills.
    pub name: String,
    /// Grouping used for display (e.g. "Backend").
    #[serde(default)]
    pub skill_group: Option<String>,
    /// Descriptive proficiency label the level was derived from.
    #[serde(default)]
    pub proficiency_label: Option<String>,
    /// Minimum years of experience asked for.
    pub required_years: Decimal,
    /// Proficiency level asked for (1-3).
    pub required_level: u8,
    /// Required or preferred.
    pub kind: SkillKind,
}

/// A skill held by an employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeSkill {
    /// Skill name.
    pub name: String,
    /// Grouping used for display.
    #[serde(default)]
    pub skill_group: Option<String>,
    /// Descriptive proficiency label the level was derived from.
    #[serde(default)]
    pub proficiency_label: Option<String>,
    /// Years of experience.
    pub years: Decimal,
    /// Proficiency level (1-3).
    pub level: u8,
}

/// Returns true if `level` is inside the valid proficiency range.
pub fn is_valid_level(level: u8) -> bool {
    (MIN_PROFICIENCY_LEVEL..=MAX_PROFICIENCY_LEVEL).contains(&level)
}
