//! Placement contract model.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Lifecycle state of a contract document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContractStatus {
    /// Not yet submitted; ignored everywhere.
    Draft,
    /// Submitted and binding.
    Submitted,
    /// Cancelled after submission; ignored everywhere.
    Cancelled,
}

/// A contract placing an employee with a client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contract {
    /// Unique identifier for the contract.
    pub id: String,
    /// The placed employee. Contracts without one are not placements.
    #[serde(default)]
    pub employee_id: Option<String>,
    /// Client party code.
    pub client_code: String,
    /// Client display name.
    #[serde(default)]
    pub client_name: Option<String>,
    /// First day of the placement (inclusive).
    pub start_date: NaiveDate,
    /// Last day of the placement (inclusive).
    pub end_date: NaiveDate,
    /// Monthly billing amount.
    #[serde(default)]
    pub monthly_price: Decimal,
    /// Document state.
    pub status: ContractStatus,
}

impl Contract {
    /// Returns true if the contract is submitted.
    pub fn is_submitted(&self) -> bool {
        self.status == ContractStatus::Submitted
    }

    /// Returns true if this is a submitted placement for `employee_id`.
    pub fn binds(&self, employee_id: &str) -> bool {
        self.is_submitted() && self.employee_id.as_deref() == Some(employee_id)
    }

    /// Returns true if the contract runs on any day of `[first, last]`.
    pub fn overlaps(&self, first: NaiveDate, last: NaiveDate) -> bool {
        self.start_date <= last && self.end_date >= first
    }
}
