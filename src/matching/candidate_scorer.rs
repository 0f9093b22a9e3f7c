//! Candidate scoring.
//!
//! This module runs the nationality, age and availability gates for one
//! candidate against one requirement, evaluates every required and
//! preferred skill, and derives the candidate's tier.

use chrono::NaiveDate;
use std::fmt;

use crate::config::MatchingRules;
use crate::error::EngineResult;
use crate::models::{
    Candidate, CandidateMatch, Requirement, RequirementSkill, SkillKind, SkillMatchResult, Tier,
};

use super::age_match::{AgeStatus, check_age, tolerance_note};
use super::availability::{
    AvailabilityInput, AvailabilityStatus, ExclusionReason, check_availability,
};
use super::skill_match::{SkillIndex, evaluate_skill};
use super::tier::{SkillTally, decide_tier};

/// Why a candidate ended up NOT_SHOWN.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotShownReason {
    /// Nationality differs from the requirement's.
    NationalityMismatch,
    /// Age unknown or outside the tolerance band.
    AgeOutOfRange,
    /// Contract timeline excludes the candidate.
    Unavailable(ExclusionReason),
    /// Skill coverage too low for any tier.
    InsufficientSkills,
}

impl fmt::Display for NotShownReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotShownReason::NationalityMismatch => f.write_str("nationality mismatch"),
            NotShownReason::AgeOutOfRange => f.write_str("age out of range"),
            NotShownReason::Unavailable(reason) => write!(f, "{}", reason),
            NotShownReason::InsufficientSkills => f.write_str("insufficient skills"),
        }
    }
}

/// Result of scoring one candidate against one requirement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchOutcome {
    /// The decided tier.
    pub tier: Tier,
    /// Snapshot of the candidate; `None` when NOT_SHOWN.
    pub candidate: Option<CandidateMatch>,
    /// Set when NOT_SHOWN.
    pub reason: Option<NotShownReason>,
}

impl MatchOutcome {
    fn not_shown(reason: NotShownReason) -> Self {
        Self {
            tier: Tier::NotShown,
            candidate: None,
            reason: Some(reason),
        }
    }
}

/// Scores candidates against a requirement with fixed rules and date.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use staffing_match::config::MatchingRules;
/// use staffing_match::matching::CandidateScorer;
/// use staffing_match::models::{Candidate, Requirement, Tier};
///
/// let requirement = Requirement {
///     id: "REQ-1".into(), customer: "Acme".into(), project_name: "Depot".into(),
///     minimum_age: 25, maximum_age: 35, nationality: "JP".into(), number_of_positions: 1,
///     start_date: None, minimum_availability_days: None, location: None,
///     required: vec![], preferred: vec![],
/// };
/// let candidate = Candidate {
///     id: "EMP-1".into(), name: "Ren".into(), age: Some(30), nationality: Some("TH".into()),
///     skills: vec![], active_contract_end: None, future_contract_start: None,
/// };
///
/// let rules = MatchingRules::default();
/// let scorer = CandidateScorer::new(&rules, NaiveDate::from_ymd_opt(2026, 10, 19).unwrap());
/// let outcome = scorer.score(&candidate, &requirement).unwrap();
/// assert_eq!(outcome.tier, Tier::NotShown);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct CandidateScorer<'a> {
    rules: &'a MatchingRules,
    today: NaiveDate,
}

impl<'a> CandidateScorer<'a> {
    /// Creates a scorer evaluating availability as of `today`.
    pub fn new(rules: &'a MatchingRules, today: NaiveDate) -> Self {
        Self { rules, today }
    }

    /// Scores one candidate.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::EngineError::InvalidRecord`] when the
    /// candidate's data is malformed. Callers running over many candidates
    /// are expected to log and skip such candidates.
    pub fn score(
        &self,
        candidate: &Candidate,
        requirement: &Requirement,
    ) -> EngineResult<MatchOutcome> {
        candidate.validate()?;

        if candidate.nationality.as_deref() != Some(requirement.nationality.as_str()) {
            return Ok(MatchOutcome::not_shown(NotShownReason::NationalityMismatch));
        }

        let tolerance = self.rules.age_tolerance_years;
        let age = check_age(
            candidate.age,
            requirement.minimum_age,
            requirement.maximum_age,
            tolerance,
        );
        if age == AgeStatus::Fail {
            return Ok(MatchOutcome::not_shown(NotShownReason::AgeOutOfRange));
        }

        let availability = check_availability(
            &AvailabilityInput {
                active_contract_end: candidate.active_contract_end,
                future_contract_start: candidate.future_contract_start,
                requirement_start: requirement.start_date,
                minimum_availability_days: requirement.minimum_availability_days,
            },
            self.today,
        );
        if availability.status == AvailabilityStatus::Excluded {
            let reason = availability
                .reason
                .unwrap_or(ExclusionReason::ActiveContractTooLong);
            return Ok(MatchOutcome::not_shown(NotShownReason::Unavailable(reason)));
        }

        let index = SkillIndex::build(&candidate.skills, self.rules.duplicate_skills);
        let required_matches = evaluate_all(&requirement.required, &index, SkillKind::Required);
        let preferred_matches =
            evaluate_all(&requirement.preferred, &index, SkillKind::Preferred);

        let required = SkillTally::from_results(&required_matches);
        let preferred = SkillTally::from_results(&preferred_matches);

        let decision = decide_tier(&required, age, availability.status, &self.rules.tiers);
        tracing::debug!(
            employee_id = %candidate.id,
            requirement_id = %requirement.id,
            tier = ?decision.tier,
            rule = decision.rule_id,
            "Tier decided"
        );

        if decision.tier == Tier::NotShown {
            return Ok(MatchOutcome::not_shown(NotShownReason::InsufficientSkills));
        }

        let mut skills = required_matches;
        skills.extend(preferred_matches);

        let snapshot = CandidateMatch {
            id: candidate.id.clone(),
            name: candidate.name.clone(),
            age: candidate.age,
            nationality: candidate.nationality.clone(),
            age_note: (age == AgeStatus::Potential).then(|| tolerance_note(tolerance)),
            req_exceeds: required.exceeds,
            req_exact: required.exact,
            req_near: required.near,
            req_below: required.below,
            req_missing: required.missing,
            pref_matched: preferred.matched(),
            pref_total: preferred.total(),
            skills,
            contract_info: availability.contract_info,
        };

        Ok(MatchOutcome {
            tier: decision.tier,
            candidate: Some(snapshot),
            reason: None,
        })
    }
}

fn evaluate_all(
    skills: &[RequirementSkill],
    index: &SkillIndex<'_>,
    kind: SkillKind,
) -> Vec<SkillMatchResult> {
    skills
        .iter()
        .map(|skill| evaluate_skill(skill, index, kind))
        .collect()
}
