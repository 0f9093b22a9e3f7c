//! Staffing requirement model.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::skill::{RequirementSkill, SkillKind, is_valid_level};
use crate::error::{EngineError, EngineResult};

/// An open staffing requirement raised by a customer.
///
/// The store returns requirements without skills from its summary queries;
/// the `required` and `preferred` lists are filled in by the matcher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Requirement {
    /// Unique identifier of the requirement.
    pub id: String,
    /// Customer that raised the requirement.
    pub customer: String,
    /// Project the positions are for.
    pub project_name: String,
    /// Lowest acceptable age (inclusive).
    pub minimum_age: u32,
    /// Highest acceptable age (inclusive).
    pub maximum_age: u32,
    /// Nationality candidates must hold.
    pub nationality: String,
    /// Number of open positions.
    pub number_of_positions: u32,
    /// When placement starts. Today is assumed when absent.
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    /// Days a candidate must stay free after the start date.
    #[serde(default)]
    pub minimum_availability_days: Option<u32>,
    /// Work location, informational only.
    #[serde(default)]
    pub location: Option<String>,
    /// Must-have skills.
    #[serde(default)]
    pub required: Vec<RequirementSkill>,
    /// Nice-to-have skills.
    #[serde(default)]
    pub preferred: Vec<RequirementSkill>,
}

impl Requirement {
    /// Returns the skills of one kind.
    pub fn skills(&self, kind: SkillKind) -> &[RequirementSkill] {
        match kind {
            SkillKind::Required => &self.required,
            SkillKind::Preferred => &self.preferred,
        }
    }

    /// Renders the age window as `min-max`.
    pub fn age_range_label(&self) -> String {
        format!("{}-{}", self.minimum_age, self.maximum_age)
    }

    /// Checks the invariants a matching run relies on.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidRecord`] if the age window is inverted,
    /// a skill level is outside 1-3, or a skill asks for negative years.
    pub fn validate(&self) -> EngineResult<()> {
        if self.minimum_age > self.maximum_age {
            return Err(self.invalid(
                "minimum_age",
                format!(
                    "minimum age {} exceeds maximum age {}",
                    self.minimum_age, self.maximum_age
                ),
            ));
        }

        for skill in self.required.iter().chain(self.preferred.iter()) {
            if !is_valid_level(skill.required_level) {
                return Err(self.invalid(
                    &format!("{}_skills.{}.required_level", skill.kind.as_str(), skill.name),
                    format!("level {} is outside 1-3", skill.required_level),
                ));
            }
            if skill.required_years.is_sign_negative() {
                return Err(self.invalid(
                    &format!("{}_skills.{}.required_years", skill.kind.as_str(), skill.name),
                    "years cannot be negative",
                ));
            }
        }

        Ok(())
    }

    fn invalid(&self, field: &str, message: impl Into<String>) -> EngineError {
        EngineError::InvalidRecord {
            entity: "requirement".to_string(),
            id: self.id.clone(),
            field: field.to_string(),
            message: message.into(),
        }
    }
}
