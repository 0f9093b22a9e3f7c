//! Skill match evaluation.
//!
//! This module compares one requirement skill against the skills a
//! candidate holds and classifies the comparison.

use rust_decimal::Decimal;
use std::collections::HashMap;

use crate::config::DuplicateSkillPolicy;
use crate::models::{EmployeeSkill, RequirementSkill, SkillKind, SkillMatchResult, SkillStatus};

/// Extra years beyond which a skill at level counts as exceeded.
pub const EXCEEDS_YEARS_MARGIN: Decimal = Decimal::TWO;

/// Largest year gap, either way, still counted as near.
pub const NEAR_YEARS_TOLERANCE: Decimal = Decimal::ONE;

/// Largest level gap, either way, still counted as near.
pub const NEAR_LEVEL_TOLERANCE: i16 = 1;

/// A candidate's skills keyed by exact name.
///
/// Built once per candidate so every requirement skill is a single lookup.
#[derive(Debug, Clone)]
pub struct SkillIndex<'a> {
    by_name: HashMap<&'a str, &'a EmployeeSkill>,
}

impl<'a> SkillIndex<'a> {
    /// Indexes `skills`, resolving duplicate names with `policy`.
    ///
    /// # Examples
    ///
    /// ```
    /// use staffing_match::config::DuplicateSkillPolicy;
    /// use staffing_match::matching::SkillIndex;
    /// use staffing_match::models::EmployeeSkill;
    /// use rust_decimal::Decimal;
    ///
    /// let skills = vec![
    ///     EmployeeSkill { name: "Rust".into(), skill_group: None, proficiency_label: None, years: Decimal::from(5), level: 3 },
    ///     EmployeeSkill { name: "Rust".into(), skill_group: None, proficiency_label: None, years: Decimal::from(1), level: 1 },
    /// ];
    ///
    /// let last = SkillIndex::build(&skills, DuplicateSkillPolicy::LastSeen);
    /// assert_eq!(last.get("Rust").unwrap().years, Decimal::from(1));
    ///
    /// let max = SkillIndex::build(&skills, DuplicateSkillPolicy::MaxYears);
    /// assert_eq!(max.get("Rust").unwrap().years, Decimal::from(5));
    /// ```
    pub fn build(skills: &'a [EmployeeSkill], policy: DuplicateSkillPolicy) -> Self {
        let mut by_name: HashMap<&'a str, &'a EmployeeSkill> = HashMap::with_capacity(skills.len());

        for skill in skills {
            match by_name.get(skill.name.as_str()) {
                None => {
                    by_name.insert(skill.name.as_str(), skill);
                }
                Some(existing) => {
                    let replace = match policy {
                        DuplicateSkillPolicy::LastSeen => true,
                        DuplicateSkillPolicy::FirstSeen => false,
                        DuplicateSkillPolicy::MaxYears => skill.years > existing.years,
                    };
                    if replace {
                        by_name.insert(skill.name.as_str(), skill);
                    }
                }
            }
        }

        Self { by_name }
    }

    /// Looks up a skill by exact, case-sensitive name.
    pub fn get(&self, name: &str) -> Option<&'a EmployeeSkill> {
        self.by_name.get(name).copied()
    }
}

/// Classifies a held skill against a required one.
///
/// Bands are tested in a fixed order and the first hit wins:
/// 1. `exceeds`: more than two extra years, level met
/// 2. `exact`: level met, zero to two extra years
/// 3. `near`: level and years each within one of the requirement
/// 4. `below`
pub fn classify_skill(
    required_years: Decimal,
    required_level: u8,
    employee_years: Decimal,
    employee_level: u8,
) -> SkillStatus {
    let years_diff = employee_years - required_years;
    let level_diff = i16::from(employee_level) - i16::from(required_level);
    let level_met = employee_level >= required_level;

    if years_diff > EXCEEDS_YEARS_MARGIN && level_met {
        SkillStatus::Exceeds
    } else if level_met && years_diff >= Decimal::ZERO && years_diff <= EXCEEDS_YEARS_MARGIN {
        SkillStatus::Exact
    } else if level_diff.abs() <= NEAR_LEVEL_TOLERANCE && years_diff.abs() <= NEAR_YEARS_TOLERANCE
    {
        SkillStatus::Near
    } else {
        SkillStatus::Below
    }
}

/// Evaluates one requirement skill against a candidate's skill index.
///
/// # Arguments
///
/// * `required` - The requirement skill
/// * `skills` - The candidate's indexed skills
/// * `kind` - Tag copied onto the result
///
/// # Returns
///
/// A [`SkillMatchResult`]; a skill the candidate lacks is `missing` with
/// zero years and level.
pub fn evaluate_skill(
    required: &RequirementSkill,
    skills: &SkillIndex<'_>,
    kind: SkillKind,
) -> SkillMatchResult {
    let (employee_years, employee_level, status) = match skills.get(&required.name) {
        None => (Decimal::ZERO, 0, SkillStatus::Missing),
        Some(held) => (
            held.years,
            held.level,
            classify_skill(
                required.required_years,
                required.required_level,
                held.years,
                held.level,
            ),
        ),
    };

    SkillMatchResult {
        name: required.name.clone(),
        required_years: required.required_years,
        required_level: required.required_level,
        employee_years,
        employee_level,
        status,
        kind,
    }
}
