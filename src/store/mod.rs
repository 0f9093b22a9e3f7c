//! Record store seam.
//!
//! The matching engine and the dashboard read through [`RecordStore`]; the
//! bulk import writes through [`EmployeeUpdates`]. The shipped
//! implementation is [`InMemoryStore`], loaded from a YAML snapshot.

mod import;
mod memory;

pub use import::{ImportReport, import_nationalities};
pub use memory::{
    EmployeeRow, InMemoryStore, RequirementRow, RequirementStatus, SkillRow, StoreSnapshot,
};

use chrono::NaiveDate;
use thiserror::Error;

use crate::error::EngineError;
use crate::models::{
    Candidate, Contract, EmployeeRecord, EmployeeSkill, Requirement, RequirementSkill, SkillKind,
};

/// Failures raised by a record store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The referenced record does not exist.
    #[error("{entity} not found: {id}")]
    NotFound {
        /// Record kind.
        entity: &'static str,
        /// Record id.
        id: String,
    },

    /// The store could not serve the request.
    #[error("{0}")]
    Unavailable(String),
}

impl From<StoreError> for EngineError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::NotFound {
                entity: "requirement",
                id,
            } => EngineError::RequirementNotFound { id },
            StoreError::NotFound {
                entity: "employee",
                id,
            } => EngineError::EmployeeNotFound { id },
            StoreError::NotFound { entity, id } => EngineError::InvalidRequest {
                field: entity.to_string(),
                message: format!("{} not found: {}", entity, id),
            },
            StoreError::Unavailable(message) => EngineError::StoreUnavailable { message },
        }
    }
}

/// Read access to requirements, employees and contracts.
///
/// Requirements come back without their skill lists; callers load those
/// with [`RecordStore::list_requirement_skills`].
pub trait RecordStore: Send + Sync {
    /// Every open requirement, in store order.
    fn list_active_requirements(&self) -> Result<Vec<Requirement>, StoreError>;

    /// One requirement by id, open or not.
    fn get_requirement(&self, id: &str) -> Result<Option<Requirement>, StoreError>;

    /// Skill rows of one kind for a requirement, in store order.
    fn list_requirement_skills(
        &self,
        requirement_id: &str,
        kind: SkillKind,
    ) -> Result<Vec<RequirementSkill>, StoreError>;

    /// Every active employee, in store order.
    fn list_active_employees(&self) -> Result<Vec<EmployeeRecord>, StoreError>;

    /// One employee by id, whatever its status.
    fn get_employee(&self, employee_id: &str) -> Result<Option<EmployeeRecord>, StoreError>;

    /// Skill rows for an employee, in store order, duplicates included.
    fn list_employee_skills(&self, employee_id: &str) -> Result<Vec<EmployeeSkill>, StoreError>;

    /// Latest end date among submitted contracts ending on or after `today`.
    fn latest_active_contract_end(
        &self,
        employee_id: &str,
        today: NaiveDate,
    ) -> Result<Option<NaiveDate>, StoreError>;

    /// Earliest start date among submitted contracts starting after `today`.
    fn earliest_future_contract_start(
        &self,
        employee_id: &str,
        today: NaiveDate,
    ) -> Result<Option<NaiveDate>, StoreError>;

    /// Every contract, any status.
    fn list_contracts(&self) -> Result<Vec<Contract>, StoreError>;

    /// Every active employee with skills and contract bounds, in store order.
    ///
    /// Implementations should read all of it from one view so a concurrent
    /// write cannot land between two employees. The provided version
    /// composes the per-record reads and carries no such guarantee.
    fn candidate_snapshot(&self, today: NaiveDate) -> Result<Vec<Candidate>, StoreError> {
        self.list_active_employees()?
            .into_iter()
            .map(|record| {
                let skills = self.list_employee_skills(&record.id)?;
                let active_end = self.latest_active_contract_end(&record.id, today)?;
                let future_start = self.earliest_future_contract_start(&record.id, today)?;
                Ok(Candidate::from_record(record, skills, active_end, future_start))
            })
            .collect()
    }
}

/// Write access used by bulk imports.
pub trait EmployeeUpdates: Send + Sync {
    /// Returns true if an employee with `employee_id` exists, whatever its status.
    fn employee_exists(&self, employee_id: &str) -> Result<bool, StoreError>;

    /// Overwrites an employee's nationality.
    fn set_nationality(&self, employee_id: &str, nationality: &str) -> Result<(), StoreError>;
}

/// A store supporting both reads and imports.
pub trait StaffingStore: RecordStore + EmployeeUpdates {}

impl<T: RecordStore + EmployeeUpdates> StaffingStore for T {}
