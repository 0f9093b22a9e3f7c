//! Requirement matching pipeline.
//!
//! Loads a requirement and every active employee from the store, scores
//! each candidate and groups the shown ones into tier buckets.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use crate::config::MatchingRules;
use crate::error::{EngineError, EngineResult};
use crate::models::{MatchBuckets, Requirement, RequirementSkill, SkillKind};
use crate::store::RecordStore;

use super::candidate_scorer::CandidateScorer;

/// Requirement header returned alongside its matches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequirementView {
    /// Requirement id.
    pub id: String,
    /// Customer name.
    pub customer: String,
    /// Project name.
    pub project_name: String,
    /// Age window as `min-max`.
    pub age: String,
    /// Required nationality.
    pub nationality: String,
    /// Open positions.
    pub positions: u32,
    /// Must-have skills.
    pub required: Vec<RequirementSkill>,
    /// Nice-to-have skills.
    pub preferred: Vec<RequirementSkill>,
}

impl From<Requirement> for RequirementView {
    fn from(requirement: Requirement) -> Self {
        Self {
            age: requirement.age_range_label(),
            id: requirement.id,
            customer: requirement.customer,
            project_name: requirement.project_name,
            nationality: requirement.nationality,
            positions: requirement.number_of_positions,
            required: requirement.required,
            preferred: requirement.preferred,
        }
    }
}

/// The result of matching one requirement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchReport {
    /// The requirement that was matched.
    pub requirement: RequirementView,
    /// Shown candidates by tier, each bucket in fetch order.
    pub matches: MatchBuckets,
}

/// Runs matching over a record store.
///
/// # Example
///
/// ```no_run
/// use chrono::Utc;
/// use staffing_match::config::{MatchingRules, ProficiencyScale};
/// use staffing_match::matching::RequirementMatcher;
/// use staffing_match::store::InMemoryStore;
///
/// let store = InMemoryStore::load("./fixtures/staffing.yaml", ProficiencyScale::default()).unwrap();
/// let rules = MatchingRules::default();
/// let matcher = RequirementMatcher::new(&store, &rules);
///
/// let report = matcher.match_requirement("REQ-0001", Utc::now().date_naive()).unwrap();
/// println!("{} candidates shown", report.matches.len());
/// ```
pub struct RequirementMatcher<'a, S: RecordStore + ?Sized> {
    store: &'a S,
    rules: &'a MatchingRules,
}

impl<'a, S: RecordStore + ?Sized> RequirementMatcher<'a, S> {
    /// Creates a matcher reading from `store` with `rules`.
    pub fn new(store: &'a S, rules: &'a MatchingRules) -> Self {
        Self { store, rules }
    }

    /// Lists every open requirement with both skill lists, in store order.
    pub fn list_requirements(&self) -> EngineResult<Vec<Requirement>> {
        self.store
            .list_active_requirements()?
            .into_iter()
            .map(|requirement| self.with_skills(requirement))
            .collect()
    }

    /// Matches every active employee against one requirement.
    ///
    /// # Arguments
    ///
    /// * `requirement_id` - The requirement to staff
    /// * `today` - Reference date for contract availability
    ///
    /// # Errors
    ///
    /// - [`EngineError::RequirementNotFound`] for an unknown id
    /// - [`EngineError::InvalidRecord`] when the requirement itself is malformed
    /// - [`EngineError::StoreUnavailable`] when the store fails
    /// - [`EngineError::Timeout`] when the run passes `deadline_ms`
    ///
    /// Malformed candidates are logged and dropped; they never fail the run.
    pub fn match_requirement(
        &self,
        requirement_id: &str,
        today: NaiveDate,
    ) -> EngineResult<MatchReport> {
        let started = Instant::now();
        let deadline = Duration::from_millis(self.rules.deadline_ms);

        let requirement = self
            .store
            .get_requirement(requirement_id)?
            .ok_or_else(|| EngineError::RequirementNotFound {
                id: requirement_id.to_string(),
            })?;
        let requirement = self.with_skills(requirement)?;
        requirement.validate()?;

        // One consistent view of the pool; imports cannot land mid-run.
        let candidates = self.store.candidate_snapshot(today)?;
        self.check_deadline(started, deadline)?;

        let scorer = CandidateScorer::new(self.rules, today);
        let mut matches = MatchBuckets::default();
        let mut dropped = 0usize;

        for candidate in &candidates {
            self.check_deadline(started, deadline)?;

            match scorer.score(candidate, &requirement) {
                Ok(outcome) => match (outcome.candidate, outcome.reason) {
                    (Some(snapshot), _) => {
                        matches.push(outcome.tier, snapshot);
                    }
                    (None, reason) => {
                        debug!(
                            employee_id = %candidate.id,
                            requirement_id = %requirement.id,
                            reason = ?reason,
                            "Candidate not shown"
                        );
                    }
                },
                Err(err) => {
                    dropped += 1;
                    warn!(
                        employee_id = %candidate.id,
                        requirement_id = %requirement.id,
                        error = %err,
                        "Dropping malformed candidate"
                    );
                }
            }
        }

        info!(
            requirement_id = %requirement.id,
            candidates = candidates.len(),
            exceeds = matches.exceeds.len(),
            exact = matches.exact.len(),
            near = matches.near.len(),
            potential = matches.potential.len(),
            dropped = dropped,
            duration_us = started.elapsed().as_micros(),
            "Matching run completed"
        );

        Ok(MatchReport {
            requirement: requirement.into(),
            matches,
        })
    }

    fn with_skills(&self, mut requirement: Requirement) -> EngineResult<Requirement> {
        requirement.required = self
            .store
            .list_requirement_skills(&requirement.id, SkillKind::Required)?;
        requirement.preferred = self
            .store
            .list_requirement_skills(&requirement.id, SkillKind::Preferred)?;
        Ok(requirement)
    }

    fn check_deadline(&self, started: Instant, deadline: Duration) -> EngineResult<()> {
        if started.elapsed() >= deadline {
            return Err(EngineError::Timeout {
                limit_ms: self.rules.deadline_ms,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ProficiencyScale;
    use crate::models::{Candidate, Contract, EmployeeRecord, EmployeeSkill, Tier};
    use crate::store::{InMemoryStore, StoreError, StoreSnapshot};

    /// Serves requirements and the candidate snapshot, and fails every
    /// per-employee read.
    struct SnapshotOnly(InMemoryStore);

    fn per_record_read<T>() -> Result<T, StoreError> {
        Err(StoreError::Unavailable("per-record read".to_string()))
    }

    impl RecordStore for SnapshotOnly {
        fn list_active_requirements(&self) -> Result<Vec<Requirement>, StoreError> {
            self.0.list_active_requirements()
        }

        fn get_requirement(&self, id: &str) -> Result<Option<Requirement>, StoreError> {
            self.0.get_requirement(id)
        }

        fn list_requirement_skills(
            &self,
            requirement_id: &str,
            kind: SkillKind,
        ) -> Result<Vec<RequirementSkill>, StoreError> {
            self.0.list_requirement_skills(requirement_id, kind)
        }

        fn list_active_employees(&self) -> Result<Vec<EmployeeRecord>, StoreError> {
            per_record_read()
        }

        fn get_employee(&self, _: &str) -> Result<Option<EmployeeRecord>, StoreError> {
            per_record_read()
        }

        fn list_employee_skills(&self, _: &str) -> Result<Vec<EmployeeSkill>, StoreError> {
            per_record_read()
        }

        fn latest_active_contract_end(
            &self,
            _: &str,
            _: NaiveDate,
        ) -> Result<Option<NaiveDate>, StoreError> {
            per_record_read()
        }

        fn earliest_future_contract_start(
            &self,
            _: &str,
            _: NaiveDate,
        ) -> Result<Option<NaiveDate>, StoreError> {
            per_record_read()
        }

        fn list_contracts(&self) -> Result<Vec<Contract>, StoreError> {
            per_record_read()
        }

        fn candidate_snapshot(&self, today: NaiveDate) -> Result<Vec<Candidate>, StoreError> {
            self.0.candidate_snapshot(today)
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    fn create_test_store() -> InMemoryStore {
        let snapshot: StoreSnapshot = serde_yaml::from_str(
            r#"
requirements:
  - id: REQ-1
    customer: Acme
    project_name: Depot
    minimum_age: 25
    maximum_age: 35
    nationality: JP
    number_of_positions: 2
    start_date: 2026-11-01
    minimum_availability_days: 10
    required_skills:
      - skill: SkillA
        proficiency: "Sufficient experience available, training possible"
        years: 2
    preferred_skills:
      - skill: SkillP
        proficiency: "No experience, but knowledgeable"
        years: 1
  - id: REQ-BAD
    customer: Acme
    project_name: Inverted
    minimum_age: 40
    maximum_age: 30
    nationality: JP
employees:
  - id: EMP-1
    name: Aiko
    age: 30
    nationality: JP
    status: active
    skills:
      - skill: SkillA
        proficiency: "Experienced, available"
        years: 5
  - id: EMP-2
    name: Somchai
    age: 30
    nationality: TH
    status: active
    skills:
      - skill: SkillA
        proficiency: "Experienced, available"
        years: 5
  - id: EMP-3
    name: Broken
    age: 30
    nationality: JP
    status: active
    skills:
      - skill: SkillA
        level: 9
        years: 5
  - id: EMP-4
    name: Kenji
    age: 28
    nationality: JP
    status: active
    skills:
      - skill: SkillA
        proficiency: "Sufficient experience available, training possible"
        years: 2
"#,
        )
        .unwrap();
        InMemoryStore::new(snapshot, ProficiencyScale::default())
    }

    #[test]
    fn test_list_requirements_carries_skills() {
        let store = create_test_store();
        let rules = MatchingRules::default();
        let requirements = RequirementMatcher::new(&store, &rules)
            .list_requirements()
            .unwrap();

        assert_eq!(requirements.len(), 2);
        assert_eq!(requirements[0].required.len(), 1);
        assert_eq!(requirements[0].preferred.len(), 1);
        assert_eq!(requirements[0].required[0].required_level, 2);
    }

    #[test]
    fn test_match_requirement_buckets_candidates() {
        let store = create_test_store();
        let rules = MatchingRules::default();
        let report = RequirementMatcher::new(&store, &rules)
            .match_requirement("REQ-1", today())
            .unwrap();

        assert_eq!(report.requirement.age, "25-35");
        assert_eq!(report.requirement.positions, 2);
        assert_eq!(report.matches.tier_of("EMP-1"), Some(Tier::Exceeds));
        assert_eq!(report.matches.tier_of("EMP-2"), None);
        assert_eq!(report.matches.tier_of("EMP-3"), None);
        assert_eq!(report.matches.tier_of("EMP-4"), Some(Tier::Exact));
        assert_eq!(report.matches.len(), 2);
    }

    #[test]
    fn test_unknown_requirement_is_not_found() {
        let store = create_test_store();
        let rules = MatchingRules::default();
        let result = RequirementMatcher::new(&store, &rules).match_requirement("REQ-404", today());
        assert!(matches!(result, Err(EngineError::RequirementNotFound { .. })));
    }

    #[test]
    fn test_inverted_age_window_is_validation_error() {
        let store = create_test_store();
        let rules = MatchingRules::default();
        let result = RequirementMatcher::new(&store, &rules).match_requirement("REQ-BAD", today());
        assert!(matches!(result, Err(EngineError::InvalidRecord { .. })));
    }

    #[test]
    fn test_offline_store_is_unavailable() {
        let store = create_test_store();
        store.set_online(false);
        let rules = MatchingRules::default();
        let result = RequirementMatcher::new(&store, &rules).match_requirement("REQ-1", today());
        assert!(matches!(result, Err(EngineError::StoreUnavailable { .. })));
    }

    #[test]
    fn test_exhausted_deadline_times_out() {
        let store = create_test_store();
        let rules = MatchingRules {
            deadline_ms: 0,
            ..MatchingRules::default()
        };
        let result = RequirementMatcher::new(&store, &rules).match_requirement("REQ-1", today());
        assert!(matches!(result, Err(EngineError::Timeout { limit_ms: 0 })));
    }

    #[test]
    fn test_match_reads_the_pool_in_one_snapshot() {
        let store = SnapshotOnly(create_test_store());
        let rules = MatchingRules::default();
        let report = RequirementMatcher::new(&store, &rules)
            .match_requirement("REQ-1", today())
            .unwrap();

        assert_eq!(report.matches.tier_of("EMP-1"), Some(Tier::Exceeds));
        assert_eq!(report.matches.tier_of("EMP-4"), Some(Tier::Exact));
    }

    #[test]
    fn test_runs_are_deterministic() {
        let store = create_test_store();
        let rules = MatchingRules::default();
        let matcher = RequirementMatcher::new(&store, &rules);

        let first = matcher.match_requirement("REQ-1", today()).unwrap();
        let second = matcher.match_requirement("REQ-1", today()).unwrap();
        assert_eq!(first, second);
    }
}
