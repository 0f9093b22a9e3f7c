//! Tier decision.
//!
//! Turns the required-skill tally, the age status and the availability
//! status into the final [`Tier`].

use rust_decimal::Decimal;

use crate::config::{EmptyRequiredPolicy, TierThresholds};
use crate::models::{SkillMatchResult, SkillStatus, Tier};

use super::age_match::AgeStatus;
use super::availability::AvailabilityStatus;

/// Counts of required-skill outcomes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SkillTally {
    /// Skills exceeded.
    pub exceeds: u32,
    /// Skills met exactly.
    pub exact: u32,
    /// Skills nearly met.
    pub near: u32,
    /// Skills below par.
    pub below: u32,
    /// Skills missing.
    pub missing: u32,
}

impl SkillTally {
    /// Tallies a list of skill results.
    pub fn from_results(results: &[SkillMatchResult]) -> Self {
        results.iter().fold(Self::default(), |mut tally, result| {
            match result.status {
                SkillStatus::Exceeds => tally.exceeds += 1,
                SkillStatus::Exact => tally.exact += 1,
                SkillStatus::Near => tally.near += 1,
                SkillStatus::Below => tally.below += 1,
                SkillStatus::Missing => tally.missing += 1,
            }
            tally
        })
    }

    /// Number of skills tallied.
    pub fn total(&self) -> u32 {
        self.exceeds + self.exact + self.near + self.below + self.missing
    }

    /// Skills counted as a match (exceeds, exact or near).
    pub fn matched(&self) -> u32 {
        self.exceeds + self.exact + self.near
    }
}

/// The tier and the rule that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TierDecision {
    /// The decided tier.
    pub tier: Tier,
    /// Identifier of the rule that fired, for logs.
    pub rule_id: &'static str,
}

impl TierDecision {
    fn new(tier: Tier, rule_id: &'static str) -> Self {
        Self { tier, rule_id }
    }
}

/// `count >= ratio * total`, evaluated exactly.
fn meets_ratio(count: u32, ratio: Decimal, total: u32) -> bool {
    Decimal::from(count) >= ratio * Decimal::from(total)
}

/// Decides the tier of a candidate that passed every gate.
///
/// `availability` must be AVAILABLE or POTENTIAL; an EXCLUDED candidate is
/// never shown.
///
/// Contract-limited candidates (availability POTENTIAL) are capped at
/// POTENTIAL. Everyone else is tested in order, first match wins:
/// EXCEEDS, EXACT, NEAR, POTENTIAL, NOT_SHOWN.
///
/// # Examples
///
/// ```
/// use staffing_match::config::TierThresholds;
/// use staffing_match::matching::{decide_tier, AgeStatus, AvailabilityStatus, SkillTally};
/// use staffing_match::models::Tier;
///
/// let tally = SkillTally { exceeds: 2, exact: 0, near: 0, below: 1, missing: 1 };
/// let decision = decide_tier(&tally, AgeStatus::Exact, AvailabilityStatus::Available, &TierThresholds::default());
/// assert_eq!(decision.tier, Tier::Exceeds);
/// ```
pub fn decide_tier(
    tally: &SkillTally,
    age: AgeStatus,
    availability: AvailabilityStatus,
    thresholds: &TierThresholds,
) -> TierDecision {
    let total = tally.total();

    if availability == AvailabilityStatus::Excluded {
        return TierDecision::new(Tier::NotShown, "availability_excluded");
    }

    if total == 0 && thresholds.empty_required_skills == EmptyRequiredPolicy::Exclude {
        return TierDecision::new(Tier::NotShown, "no_required_skills");
    }

    let potential_fits =
        meets_ratio(tally.matched(), thresholds.potential_ratio, total) && age.is_acceptable();

    if availability == AvailabilityStatus::Potential {
        return if potential_fits {
            TierDecision::new(Tier::Potential, "contract_limited_potential")
        } else {
            TierDecision::new(Tier::NotShown, "contract_limited_insufficient")
        };
    }

    if meets_ratio(tally.exceeds, thresholds.exceeds_ratio, total) {
        TierDecision::new(Tier::Exceeds, "exceeds_ratio")
    } else if tally.exceeds + tally.exact == total {
        TierDecision::new(Tier::Exact, "all_exact_or_better")
    } else if tally.matched() == total {
        TierDecision::new(Tier::Near, "all_near_or_better")
    } else if potential_fits {
        TierDecision::new(Tier::Potential, "potential_ratio")
    } else {
        TierDecision::new(Tier::NotShown, "insufficient_skills")
    }
}
