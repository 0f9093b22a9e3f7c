//! Employee records and the per-run candidate snapshot.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::skill::{EmployeeSkill, is_valid_level};
use crate::error::{EngineError, EngineResult};

/// Employment status as kept by the record store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmployeeStatus {
    /// Currently employed and eligible for placement.
    Active,
    /// Temporarily inactive.
    Inactive,
    /// No longer with the company.
    Left,
}

/// An employee as returned by the store's summary query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeRecord {
    /// Unique identifier for the employee.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Age in years, when recorded.
    #[serde(default)]
    pub age: Option<u32>,
    /// Nationality code, when recorded.
    #[serde(default)]
    pub nationality: Option<String>,
    /// Employment status.
    pub status: EmployeeStatus,
    /// Annual cost to company, used by the revenue dashboard.
    #[serde(default)]
    pub annual_ctc: Option<Decimal>,
}

impl EmployeeRecord {
    /// Returns true if the employee is active.
    pub fn is_active(&self) -> bool {
        self.status == EmployeeStatus::Active
    }

    /// Cost to company per calendar day (`annual_ctc / 365`).
    ///
    /// # Examples
    ///
    /// ```
    /// use staffing_match::models::{EmployeeRecord, EmployeeStatus};
    /// use rust_decimal::Decimal;
    ///
    /// let employee = EmployeeRecord {
    ///     id: "EMP-001".to_string(),
    ///     name: "Aiko Tanaka".to_string(),
    ///     age: Some(30),
    ///     nationality: Some("JP".to_string()),
    ///     status: EmployeeStatus::Active,
    ///     annual_ctc: Some(Decimal::from(3_650_000)),
    /// };
    /// assert_eq!(employee.daily_cost(), Decimal::from(10_000));
    /// ```
    pub fn daily_cost(&self) -> Decimal {
        self.annual_ctc
            .map(|ctc| ctc / Decimal::from(365))
            .unwrap_or(Decimal::ZERO)
    }

    /// Cost to company per month (`annual_ctc / 12`).
    pub fn monthly_cost(&self) -> Decimal {
        self.annual_ctc
            .map(|ctc| ctc / Decimal::from(12))
            .unwrap_or(Decimal::ZERO)
    }
}

/// Everything the scorer needs about one employee for one matching run.
///
/// Contract bounds are derived from the store at snapshot time and never
/// persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Unique identifier for the employee.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Age in years, when recorded.
    pub age: Option<u32>,
    /// Nationality code, when recorded.
    pub nationality: Option<String>,
    /// Skill rows in store order. May contain duplicates by name.
    pub skills: Vec<EmployeeSkill>,
    /// Latest end date among currently valid submitted contracts.
    pub active_contract_end: Option<NaiveDate>,
    /// Earliest start date among submitted contracts starting after today.
    pub future_contract_start: Option<NaiveDate>,
}

impl Candidate {
    /// Builds a candidate from a store record and its derived data.
    pub fn from_record(
        record: EmployeeRecord,
        skills: Vec<EmployeeSkill>,
        active_contract_end: Option<NaiveDate>,
        future_contract_start: Option<NaiveDate>,
    ) -> Self {
        Candidate {
            id: record.id,
            name: record.name,
            age: record.age,
            nationality: record.nationality,
            skills,
            active_contract_end,
            future_contract_start,
        }
    }

    /// Checks the data the scorer depends on.
    ///
    /// A missing age is not an error; it fails the age gate instead.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidRecord`] for an empty id, a skill level
    /// outside 1-3, or negative years.
    pub fn validate(&self) -> EngineResult<()> {
        if self.id.trim().is_empty() {
            return Err(EngineError::invalid_employee(
                &self.name,
                "id",
                "employee id is empty",
            ));
        }

        for skill in &self.skills {
            if !is_valid_level(skill.level) {
                return Err(EngineError::invalid_employee(
                    &self.id,
                    format!("skills.{}.level", skill.name),
                    format!("level {} is outside 1-3", skill.level),
                ));
            }
            if skill.years.is_sign_negative() {
                return Err(EngineError::invalid_employee(
                    &self.id,
                    format!("skills.{}.years", skill.name),
                    "years cannot be negative",
                ));
            }
        }

        Ok(())
    }
}
