//! Candidate matching.
//!
//! The leaf evaluators (skills, age, availability) are pure functions.
//! [`CandidateScorer`] chains them for one candidate and
//! [`RequirementMatcher`] runs a whole requirement against the store.

mod age_match;
mod availability;
mod candidate_scorer;
mod requirement_matcher;
mod skill_match;
mod tier;

pub use age_match::{AgeStatus, DEFAULT_AGE_TOLERANCE_YEARS, check_age, tolerance_note};
pub use availability::{
    AvailabilityInput, AvailabilityResult, AvailabilityStatus, ExclusionReason,
    check_availability,
};
pub use candidate_scorer::{CandidateScorer, MatchOutcome, NotShownReason};
pub use requirement_matcher::{MatchReport, RequirementMatcher, RequirementView};
pub use skill_match::{
    EXCEEDS_YEARS_MARGIN, NEAR_LEVEL_TOLERANCE, NEAR_YEARS_TOLERANCE, SkillIndex,
    classify_skill, evaluate_skill,
};
pub use tier::{SkillTally, TierDecision, decide_tier};
