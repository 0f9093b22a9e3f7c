//! Employee drill-down behind the dashboard lists.

use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::models::{Contract, EmployeeRecord, EmployeeSkill};
use crate::store::RecordStore;

/// One employee with skills and full contract history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeDetails {
    /// The employee record, whatever its status.
    pub employee: EmployeeRecord,
    /// Skills, most years first.
    pub skills: Vec<EmployeeSkill>,
    /// Every contract naming the employee, latest end date first.
    pub contracts: Vec<Contract>,
}

/// Loads the drill-down for one employee.
///
/// Contracts of every status are included. Ties keep store order.
///
/// # Errors
///
/// Returns [`EngineError::EmployeeNotFound`] for an unknown id and
/// [`EngineError::StoreUnavailable`] when the store fails.
pub fn employee_details<S: RecordStore + ?Sized>(
    store: &S,
    employee_id: &str,
) -> EngineResult<EmployeeDetails> {
    let employee = store
        .get_employee(employee_id)?
        .ok_or_else(|| EngineError::EmployeeNotFound {
            id: employee_id.to_string(),
        })?;

    let mut skills = store.list_employee_skills(&employee.id)?;
    skills.sort_by_key(|skill| Reverse(skill.years));

    let mut contracts: Vec<Contract> = store
        .list_contracts()?
        .into_iter()
        .filter(|contract| contract.employee_id.as_deref() == Some(employee.id.as_str()))
        .collect();
    contracts.sort_by_key(|contract| Reverse(contract.end_date));

    debug!(
        employee_id = %employee.id,
        skills = skills.len(),
        contracts = contracts.len(),
        "Employee details loaded"
    );

    Ok(EmployeeDetails {
        employee,
        skills,
        contracts,
    })
}
