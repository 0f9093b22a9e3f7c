//! Match result models.
//!
//! This module contains the per-skill results, the candidate snapshot and
//! the tier buckets a matching run produces. None of these are persisted.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::skill::SkillKind;

/// How one employee skill compares to one requirement skill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillStatus {
    /// The employee does not have the skill.
    Missing,
    /// Too far below the requirement.
    Below,
    /// Within one level and one year of the requirement.
    Near,
    /// Meets the level with up to two extra years.
    Exact,
    /// Meets the level with more than two extra years.
    Exceeds,
}

impl SkillStatus {
    /// Returns true for statuses that count as a match (exceeds, exact, near).
    pub fn is_match(self) -> bool {
        matches!(
            self,
            SkillStatus::Exceeds | SkillStatus::Exact | SkillStatus::Near
        )
    }
}

/// The comparison of one requirement skill against a candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillMatchResult {
    /// Skill name.
    pub name: String,
    /// Years asked for by the requirement.
    pub required_years: Decimal,
    /// Level asked for by the requirement.
    pub required_level: u8,
    /// Years the employee has (0 when missing).
    pub employee_years: Decimal,
    /// Level the employee has (0 when missing).
    pub employee_level: u8,
    /// Outcome of the comparison.
    pub status: SkillStatus,
    /// Required or preferred.
    pub kind: SkillKind,
}

/// Final classification of a candidate against a requirement.
///
/// # Example
///
/// ```
/// use staffing_match::models::Tier;
///
/// assert_eq!(Tier::Exceeds.bucket_key(), Some("exceeds"));
/// assert_eq!(Tier::NotShown.bucket_key(), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Tier {
    /// At least half the required skills exceeded.
    Exceeds,
    /// Every required skill exact or exceeded.
    Exact,
    /// Every required skill at least near.
    Near,
    /// Mostly matching, or contract-limited.
    Potential,
    /// Filtered out.
    NotShown,
}

impl Tier {
    /// Lower-case bucket name, or `None` for [`Tier::NotShown`].
    pub fn bucket_key(self) -> Option<&'static str> {
        match self {
            Tier::Exceeds => Some("exceeds"),
            Tier::Exact => Some("exact"),
            Tier::Near => Some("near"),
            Tier::Potential => Some("potential"),
            Tier::NotShown => None,
        }
    }
}

/// Contract details attached to a contract-limited candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractInfo {
    /// Always true; kept so consumers can branch on presence.
    pub has_contract: bool,
    /// End date of the active contract.
    pub ends_on: NaiveDate,
    /// First date the candidate can be placed.
    pub available_from: NaiveDate,
    /// Days from today until the contract ends, never negative.
    pub days_until_available: i64,
}

/// Snapshot of a shown candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateMatch {
    /// Employee id.
    pub id: String,
    /// Employee name.
    pub name: String,
    /// Employee age.
    pub age: Option<u32>,
    /// Employee nationality.
    pub nationality: Option<String>,
    /// Set when the age only fits the tolerance band.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age_note: Option<String>,
    /// Required skills exceeded.
    pub req_exceeds: u32,
    /// Required skills met exactly.
    pub req_exact: u32,
    /// Required skills nearly met.
    pub req_near: u32,
    /// Required skills below par.
    pub req_below: u32,
    /// Required skills missing.
    pub req_missing: u32,
    /// Preferred skills matched (exceeds, exact or near).
    pub pref_matched: u32,
    /// Number of preferred skills on the requirement.
    pub pref_total: u32,
    /// Every skill comparison, required first.
    pub skills: Vec<SkillMatchResult>,
    /// Present when an active contract limits availability.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contract_info: Option<ContractInfo>,
}

/// Shown candidates grouped by tier, each in fetch order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchBuckets {
    /// EXCEEDS tier.
    pub exceeds: Vec<CandidateMatch>,
    /// EXACT tier.
    pub exact: Vec<CandidateMatch>,
    /// NEAR tier.
    pub near: Vec<CandidateMatch>,
    /// POTENTIAL tier.
    pub potential: Vec<CandidateMatch>,
}

impl MatchBuckets {
    /// Appends a candidate to the bucket for `tier`.
    ///
    /// Returns false, dropping the candidate, for [`Tier::NotShown`].
    pub fn push(&mut self, tier: Tier, candidate: CandidateMatch) -> bool {
        let bucket = match tier {
            Tier::Exceeds => &mut self.exceeds,
            Tier::Exact => &mut self.exact,
            Tier::Near => &mut self.near,
            Tier::Potential => &mut self.potential,
            Tier::NotShown => return false,
        };
        bucket.push(candidate);
        true
    }

    /// Returns the bucket for `tier`; empty for [`Tier::NotShown`].
    pub fn bucket(&self, tier: Tier) -> &[CandidateMatch] {
        match tier {
            Tier::Exceeds => &self.exceeds,
            Tier::Exact => &self.exact,
            Tier::Near => &self.near,
            Tier::Potential => &self.potential,
            Tier::NotShown => &[],
        }
    }

    /// Total number of shown candidates.
    pub fn len(&self) -> usize {
        self.exceeds.len() + self.exact.len() + self.near.len() + self.potential.len()
    }

    /// Returns true if no candidate was shown.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Finds the tier a candidate landed in.
    pub fn tier_of(&self, employee_id: &str) -> Option<Tier> {
        [Tier::Exceeds, Tier::Exact, Tier::Near, Tier::Potential]
            .into_iter()
            .find(|tier| self.bucket(*tier).iter().any(|c| c.id == employee_id))
    }
}
