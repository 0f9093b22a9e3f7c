//! Contract availability evaluation.
//!
//! This module decides whether a candidate's contract timeline allows a
//! placement starting on the requirement's start date and lasting at least
//! its minimum availability window.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::ContractInfo;

/// Three-way availability outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AvailabilityStatus {
    /// Free for the whole window.
    Available,
    /// Under contract now, but free before the window closes.
    Potential,
    /// Cannot be placed.
    Excluded,
}

/// Why a candidate was excluded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExclusionReason {
    /// Not under contract, but the next contract starts inside the window.
    FutureContractTooSoon,
    /// The current contract runs to or past the end of the window.
    ActiveContractTooLong,
    /// The current contract ends in time, but the next starts inside the window.
    FutureContractInterferes,
}

impl fmt::Display for ExclusionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            ExclusionReason::FutureContractTooSoon => "Future contract starts too soon",
            ExclusionReason::ActiveContractTooLong => "Active contract too long",
            ExclusionReason::FutureContractInterferes => "Future contract interferes",
        };
        f.write_str(text)
    }
}

/// Inputs to the availability check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AvailabilityInput {
    /// Latest end date of the candidate's current contracts.
    pub active_contract_end: Option<NaiveDate>,
    /// Earliest start date of the candidate's future contracts.
    pub future_contract_start: Option<NaiveDate>,
    /// Requirement start date; today when absent.
    pub requirement_start: Option<NaiveDate>,
    /// Days the candidate must remain free; zero when absent.
    pub minimum_availability_days: Option<u32>,
}

/// The result of an availability check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvailabilityResult {
    /// The outcome.
    pub status: AvailabilityStatus,
    /// Set when `status` is [`AvailabilityStatus::Excluded`].
    pub reason: Option<ExclusionReason>,
    /// Set when `status` is [`AvailabilityStatus::Potential`].
    pub contract_info: Option<ContractInfo>,
}

impl AvailabilityResult {
    fn available() -> Self {
        Self {
            status: AvailabilityStatus::Available,
            reason: None,
            contract_info: None,
        }
    }

    fn excluded(reason: ExclusionReason) -> Self {
        Self {
            status: AvailabilityStatus::Excluded,
            reason: Some(reason),
            contract_info: None,
        }
    }
}

/// Checks a candidate's contract timeline against a requirement.
///
/// Exclusions are tested before any grant, in this order:
/// 1. with no active contract, a future contract starting fewer than
///    `minimum_availability_days` after the requirement start excludes;
/// 2. an active contract ending on or after
///    `requirement_start + minimum_availability_days` excludes;
/// 3. otherwise the same future-contract test as (1) excludes.
///
/// A surviving active contract yields POTENTIAL with its end date and the
/// days left until it ends (never negative).
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use staffing_match::matching::{check_availability, AvailabilityInput, AvailabilityStatus};
///
/// let today = NaiveDate::from_ymd_opt(2026, 10, 1).unwrap();
/// let result = check_availability(
///     &AvailabilityInput {
///         active_contract_end: None,
///         future_contract_start: None,
///         requirement_start: NaiveDate::from_ymd_opt(2026, 11, 1),
///         minimum_availability_days: Some(30),
///     },
///     today,
/// );
/// assert_eq!(result.status, AvailabilityStatus::Available);
/// ```
pub fn check_availability(input: &AvailabilityInput, today: NaiveDate) -> AvailabilityResult {
    let requirement_start = input.requirement_start.unwrap_or(today);
    let minimum_days = input.minimum_availability_days.unwrap_or(0);
    let acceptable_window_end = requirement_start
        .checked_add_days(Days::new(u64::from(minimum_days)))
        .unwrap_or(NaiveDate::MAX);

    let future_starts_too_soon = input.future_contract_start.is_some_and(|future_start| {
        (future_start - requirement_start).num_days() < i64::from(minimum_days)
    });

    let Some(contract_end) = input.active_contract_end else {
        if future_starts_too_soon {
            return AvailabilityResult::excluded(ExclusionReason::FutureContractTooSoon);
        }
        return AvailabilityResult::available();
    };

    if contract_end >= acceptable_window_end {
        return AvailabilityResult::excluded(ExclusionReason::ActiveContractTooLong);
    }

    if future_starts_too_soon {
        return AvailabilityResult::excluded(ExclusionReason::FutureContractInterferes);
    }

    let days_until_available = (contract_end - today).num_days().max(0);

    AvailabilityResult {
        status: AvailabilityStatus::Potential,
        reason: None,
        contract_info: Some(ContractInfo {
            has_contract: true,
            ends_on: contract_end,
            available_from: contract_end,
            days_until_available,
        }),
    }
}
