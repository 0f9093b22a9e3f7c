//! In-memory record store backed by a YAML snapshot.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::config::ProficiencyScale;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    Candidate, Contract, EmployeeRecord, EmployeeSkill, EmployeeStatus, Requirement,
    RequirementSkill, SkillKind,
};

use super::{EmployeeUpdates, RecordStore, StoreError};

/// Whether a requirement is still being staffed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequirementStatus {
    /// Still looking for candidates.
    #[default]
    Open,
    /// Filled or withdrawn.
    Closed,
}

/// A skill row as stored, before the proficiency label is resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillRow {
    /// Skill name.
    pub skill: String,
    /// Skill group.
    #[serde(default)]
    pub skill_group: Option<String>,
    /// Proficiency label.
    #[serde(default)]
    pub proficiency: Option<String>,
    /// Years of experience; missing means zero.
    #[serde(default)]
    pub years: Option<Decimal>,
    /// Explicit level, bypassing the label scale.
    #[serde(default)]
    pub level: Option<u8>,
}

impl SkillRow {
    fn level(&self, scale: &ProficiencyScale) -> u8 {
        self.level
            .unwrap_or_else(|| scale.level_for(self.proficiency.as_deref()))
    }

    fn to_requirement_skill(&self, kind: SkillKind, scale: &ProficiencyScale) -> RequirementSkill {
        RequirementSkill {
            name: self.skill.clone(),
            skill_group: self.skill_group.clone(),
            proficiency_label: self.proficiency.clone(),
            required_years: self.years.unwrap_or(Decimal::ZERO),
            required_level: self.level(scale),
            kind,
        }
    }

    fn to_employee_skill(&self, scale: &ProficiencyScale) -> EmployeeSkill {
        EmployeeSkill {
            name: self.skill.clone(),
            skill_group: self.skill_group.clone(),
            proficiency_label: self.proficiency.clone(),
            years: self.years.unwrap_or(Decimal::ZERO),
            level: self.level(scale),
        }
    }
}

/// A stored requirement with its skill rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequirementRow {
    /// Requirement id.
    pub id: String,
    /// Customer name.
    pub customer: String,
    /// Project name.
    pub project_name: String,
    /// Youngest acceptable age.
    pub minimum_age: u32,
    /// Oldest acceptable age.
    pub maximum_age: u32,
    /// Required nationality.
    pub nationality: String,
    /// Open positions.
    #[serde(default = "default_positions")]
    pub number_of_positions: u32,
    /// Placement start date.
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    /// Minimum days the candidate must stay free.
    #[serde(default)]
    pub minimum_availability_days: Option<u32>,
    /// Work location.
    #[serde(default)]
    pub location: Option<String>,
    /// Staffing status.
    #[serde(default)]
    pub status: RequirementStatus,
    /// Must-have skills.
    #[serde(default)]
    pub required_skills: Vec<SkillRow>,
    /// Nice-to-have skills.
    #[serde(default)]
    pub preferred_skills: Vec<SkillRow>,
}

fn default_positions() -> u32 {
    1
}

impl RequirementRow {
    fn header(&self) -> Requirement {
        Requirement {
            id: self.id.clone(),
            customer: self.customer.clone(),
            project_name: self.project_name.clone(),
            minimum_age: self.minimum_age,
            maximum_age: self.maximum_age,
            nationality: self.nationality.clone(),
            number_of_positions: self.number_of_positions,
            start_date: self.start_date,
            minimum_availability_days: self.minimum_availability_days,
            location: self.location.clone(),
            required: Vec::new(),
            preferred: Vec::new(),
        }
    }

    fn skill_rows(&self, kind: SkillKind) -> &[SkillRow] {
        match kind {
            SkillKind::Required => &self.required_skills,
            SkillKind::Preferred => &self.preferred_skills,
        }
    }
}

/// A stored employee with skill rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeRow {
    /// Employee id.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Age in years.
    #[serde(default)]
    pub age: Option<u32>,
    /// Nationality code.
    #[serde(default)]
    pub nationality: Option<String>,
    /// Employment status.
    pub status: EmployeeStatus,
    /// Annual cost to company.
    #[serde(default)]
    pub annual_ctc: Option<Decimal>,
    /// Skill rows in entry order.
    #[serde(default)]
    pub skills: Vec<SkillRow>,
}

impl EmployeeRow {
    fn record(&self) -> EmployeeRecord {
        EmployeeRecord {
            id: self.id.clone(),
            name: self.name.clone(),
            age: self.age,
            nationality: self.nationality.clone(),
            status: self.status,
            annual_ctc: self.annual_ctc,
        }
    }
}

/// Everything the in-memory store holds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreSnapshot {
    /// Requirements in entry order.
    #[serde(default)]
    pub requirements: Vec<RequirementRow>,
    /// Employees in entry order.
    #[serde(default)]
    pub employees: Vec<EmployeeRow>,
    /// Contracts in entry order.
    #[serde(default)]
    pub contracts: Vec<Contract>,
}

/// A [`RecordStore`] holding a snapshot in memory.
///
/// Reads take a shared lock and writes an exclusive one, so a matching run
/// never sees a half-applied import row. The store can be switched
/// offline to exercise STORE_UNAVAILABLE paths.
///
/// # Example
///
/// ```no_run
/// use staffing_match::config::ProficiencyScale;
/// use staffing_match::store::{InMemoryStore, RecordStore};
///
/// let store = InMemoryStore::load("./fixtures/staffing.yaml", ProficiencyScale::default()).unwrap();
/// let requirements = store.list_active_requirements().unwrap();
/// println!("{} open requirements", requirements.len());
/// ```
#[derive(Debug)]
pub struct InMemoryStore {
    snapshot: RwLock<StoreSnapshot>,
    scale: ProficiencyScale,
    online: AtomicBool,
}

impl InMemoryStore {
    /// Creates a store over `snapshot`, resolving labels with `scale`.
    pub fn new(snapshot: StoreSnapshot, scale: ProficiencyScale) -> Self {
        Self {
            snapshot: RwLock::new(snapshot),
            scale,
            online: AtomicBool::new(true),
        }
    }

    /// Loads a YAML snapshot file.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::DataFileError`] when the file cannot be read
    /// or parsed.
    pub fn load<P: AsRef<Path>>(path: P, scale: ProficiencyScale) -> EngineResult<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|e| EngineError::DataFileError {
            path: path_str.clone(),
            message: e.to_string(),
        })?;

        let snapshot: StoreSnapshot =
            serde_yaml::from_str(&content).map_err(|e| EngineError::DataFileError {
                path: path_str,
                message: e.to_string(),
            })?;

        Ok(Self::new(snapshot, scale))
    }

    /// Takes the store online or offline.
    pub fn set_online(&self, online: bool) {
        self.online.store(online, Ordering::SeqCst);
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, StoreSnapshot>, StoreError> {
        self.ensure_online()?;
        self.snapshot
            .read()
            .map_err(|_| StoreError::Unavailable("snapshot lock poisoned".to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, StoreSnapshot>, StoreError> {
        self.ensure_online()?;
        self.snapshot
            .write()
            .map_err(|_| StoreError::Unavailable("snapshot lock poisoned".to_string()))
    }

    fn ensure_online(&self) -> Result<(), StoreError> {
        if self.online.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(StoreError::Unavailable("record store is offline".to_string()))
        }
    }

    fn active_end(snapshot: &StoreSnapshot, employee_id: &str, today: NaiveDate) -> Option<NaiveDate> {
        Self::bound_contracts(snapshot, employee_id)
            .map(|contract| contract.end_date)
            .filter(|end| *end >= today)
            .max()
    }

    fn future_start(
        snapshot: &StoreSnapshot,
        employee_id: &str,
        today: NaiveDate,
    ) -> Option<NaiveDate> {
        Self::bound_contracts(snapshot, employee_id)
            .map(|contract| contract.start_date)
            .filter(|start| *start > today)
            .min()
    }

    fn bound_contracts<'a>(
        snapshot: &'a StoreSnapshot,
        employee_id: &'a str,
    ) -> impl Iterator<Item = &'a Contract> + 'a {
        snapshot
            .contracts
            .iter()
            .filter(move |contract| contract.binds(employee_id))
    }
}

impl RecordStore for InMemoryStore {
    fn list_active_requirements(&self) -> Result<Vec<Requirement>, StoreError> {
        let snapshot = self.read()?;
        Ok(snapshot
            .requirements
            .iter()
            .filter(|row| row.status == RequirementStatus::Open)
            .map(RequirementRow::header)
            .collect())
    }

    fn get_requirement(&self, id: &str) -> Result<Option<Requirement>, StoreError> {
        let snapshot = self.read()?;
        Ok(snapshot
            .requirements
            .iter()
            .find(|row| row.id == id)
            .map(RequirementRow::header))
    }

    fn list_requirement_skills(
        &self,
        requirement_id: &str,
        kind: SkillKind,
    ) -> Result<Vec<RequirementSkill>, StoreError> {
        let snapshot = self.read()?;
        let row = snapshot
            .requirements
            .iter()
            .find(|row| row.id == requirement_id)
            .ok_or_else(|| StoreError::NotFound {
                entity: "requirement",
                id: requirement_id.to_string(),
            })?;

        Ok(row
            .skill_rows(kind)
            .iter()
            .map(|skill| skill.to_requirement_skill(kind, &self.scale))
            .collect())
    }

    fn list_active_employees(&self) -> Result<Vec<EmployeeRecord>, StoreError> {
        let snapshot = self.read()?;
        Ok(snapshot
            .employees
            .iter()
            .filter(|row| row.status == EmployeeStatus::Active)
            .map(EmployeeRow::record)
            .collect())
    }

    fn get_employee(&self, employee_id: &str) -> Result<Option<EmployeeRecord>, StoreError> {
        let snapshot = self.read()?;
        Ok(snapshot
            .employees
            .iter()
            .find(|row| row.id == employee_id)
            .map(EmployeeRow::record))
    }

    fn list_employee_skills(&self, employee_id: &str) -> Result<Vec<EmployeeSkill>, StoreError> {
        let snapshot = self.read()?;
        let row = snapshot
            .employees
            .iter()
            .find(|row| row.id == employee_id)
            .ok_or_else(|| StoreError::NotFound {
                entity: "employee",
                id: employee_id.to_string(),
            })?;

        Ok(row
            .skills
            .iter()
            .map(|skill| skill.to_employee_skill(&self.scale))
            .collect())
    }

    fn latest_active_contract_end(
        &self,
        employee_id: &str,
        today: NaiveDate,
    ) -> Result<Option<NaiveDate>, StoreError> {
        let snapshot = self.read()?;
        Ok(Self::active_end(&snapshot, employee_id, today))
    }

    fn earliest_future_contract_start(
        &self,
        employee_id: &str,
        today: NaiveDate,
    ) -> Result<Option<NaiveDate>, StoreError> {
        let snapshot = self.read()?;
        Ok(Self::future_start(&snapshot, employee_id, today))
    }

    fn list_contracts(&self) -> Result<Vec<Contract>, StoreError> {
        Ok(self.read()?.contracts.clone())
    }

    fn candidate_snapshot(&self, today: NaiveDate) -> Result<Vec<Candidate>, StoreError> {
        // One guard for the whole pass.
        let snapshot = self.read()?;
        Ok(snapshot
            .employees
            .iter()
            .filter(|row| row.status == EmployeeStatus::Active)
            .map(|row| {
                let skills = row
                    .skills
                    .iter()
                    .map(|skill| skill.to_employee_skill(&self.scale))
                    .collect();
                Candidate::from_record(
                    row.record(),
                    skills,
                    Self::active_end(&snapshot, &row.id, today),
                    Self::future_start(&snapshot, &row.id, today),
                )
            })
            .collect())
    }
}

impl EmployeeUpdates for InMemoryStore {
    fn employee_exists(&self, employee_id: &str) -> Result<bool, StoreError> {
        Ok(self.read()?.employees.iter().any(|row| row.id == employee_id))
    }

    fn set_nationality(&self, employee_id: &str, nationality: &str) -> Result<(), StoreError> {
        let mut snapshot = self.write()?;
        let row = snapshot
            .employees
            .iter_mut()
            .find(|row| row.id == employee_id)
            .ok_or_else(|| StoreError::NotFound {
                entity: "employee",
                id: employee_id.to_string(),
            })?;

        row.nationality = Some(nationality.to_string());
        Ok(())
    }
}
