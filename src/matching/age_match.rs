//! Age match evaluation.

use serde::{Deserialize, Serialize};

/// Years outside the requested window still accepted as POTENTIAL.
pub const DEFAULT_AGE_TOLERANCE_YEARS: u32 = 2;

/// Outcome of comparing a candidate's age with a requirement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AgeStatus {
    /// Inside `[minimum_age, maximum_age]`.
    Exact,
    /// Outside the window but within the tolerance band.
    Potential,
    /// Unknown age, or too far outside the window.
    Fail,
}

impl AgeStatus {
    /// Returns true for [`AgeStatus::Exact`] and [`AgeStatus::Potential`].
    pub fn is_acceptable(self) -> bool {
        matches!(self, AgeStatus::Exact | AgeStatus::Potential)
    }
}

/// Classifies an age against a requirement's window.
///
/// The tolerance band is inclusive at its outer edge: with a window of
/// 25-35 and a tolerance of 2, ages 23 and 37 are POTENTIAL, 22 and 38 FAIL.
///
/// # Examples
///
/// ```
/// use staffing_match::matching::{check_age, AgeStatus};
///
/// assert_eq!(check_age(Some(30), 25, 35, 2), AgeStatus::Exact);
/// assert_eq!(check_age(Some(23), 25, 35, 2), AgeStatus::Potential);
/// assert_eq!(check_age(Some(22), 25, 35, 2), AgeStatus::Fail);
/// assert_eq!(check_age(None, 25, 35, 2), AgeStatus::Fail);
/// ```
pub fn check_age(age: Option<u32>, minimum_age: u32, maximum_age: u32, tolerance: u32) -> AgeStatus {
    let Some(age) = age else {
        return AgeStatus::Fail;
    };

    if (minimum_age..=maximum_age).contains(&age) {
        return AgeStatus::Exact;
    }

    let lower = minimum_age.saturating_sub(tolerance);
    let upper = maximum_age.saturating_add(tolerance);

    if (lower..minimum_age).contains(&age) || (age > maximum_age && age <= upper) {
        AgeStatus::Potential
    } else {
        AgeStatus::Fail
    }
}

/// Human-readable note attached to candidates that only fit the band.
pub fn tolerance_note(tolerance: u32) -> String {
    format!("Within ±{} tolerance", tolerance)
}
