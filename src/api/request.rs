//! Request types for the staffing match API.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::dashboard::ReportMonth;
use crate::error::{EngineError, EngineResult};

/// Query string of `GET /dashboard`.
///
/// `month` is 0-based (January is 0), as browser date pickers send it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardQuery {
    /// Month number, 0-11. Defaults to the current month.
    #[serde(default)]
    pub month: Option<u32>,
    /// Calendar year. Defaults to the current year.
    #[serde(default)]
    pub year: Option<i32>,
}

impl DashboardQuery {
    /// Resolves the requested month, filling gaps from `today`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidRequest`] on field `month` when the
    /// month is above 11, or on field `year` for an unsupported year.
    pub fn resolve(&self, today: NaiveDate) -> EngineResult<ReportMonth> {
        let current = ReportMonth::containing(today);

        let month = match self.month {
            Some(month) if month > 11 => {
                return Err(EngineError::InvalidRequest {
                    field: "month".to_string(),
                    message: format!("month must be 0-11, got {}", month),
                });
            }
            Some(month) => month + 1,
            None => current.month(),
        };

        match self.year {
            None if self.month.is_none() => Ok(current),
            year => ReportMonth::new(year.unwrap_or_else(|| current.year()), month),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    #[test]
    fn test_empty_query_defaults_to_current_month() {
        let month = DashboardQuery::default().resolve(today()).unwrap();
        assert_eq!((month.year(), month.month()), (2026, 10));
    }

    #[test]
    fn test_partial_query_keeps_given_fields() {
        let query = DashboardQuery {
            month: Some(3),
            year: None,
        };
        let month = query.resolve(today()).unwrap();
        assert_eq!((month.year(), month.month()), (2026, 4));
    }

    #[test]
    fn test_month_zero_is_january() {
        let query = DashboardQuery {
            month: Some(0),
            year: Some(2027),
        };
        let month = query.resolve(today()).unwrap();
        assert_eq!((month.year(), month.month()), (2027, 1));
        assert_eq!(month.first_day(), NaiveDate::from_ymd_opt(2027, 1, 1).unwrap());
    }

    #[test]
    fn test_month_eleven_is_december() {
        let query = DashboardQuery {
            month: Some(11),
            year: Some(2026),
        };
        assert_eq!(query.resolve(today()).unwrap().month(), 12);
    }

    #[test]
    fn test_year_only_keeps_current_month() {
        let query = DashboardQuery {
            month: None,
            year: Some(2025),
        };
        let month = query.resolve(today()).unwrap();
        assert_eq!((month.year(), month.month()), (2025, 10));
    }

    #[test]
    fn test_month_twelve_is_invalid() {
        let query = DashboardQuery {
            month: Some(12),
            year: Some(2026),
        };
        match query.resolve(today()) {
            Err(EngineError::InvalidRequest { field, message }) => {
                assert_eq!(field, "month");
                assert_eq!(message, "month must be 0-11, got 12");
            }
            other => panic!("expected invalid month, got {:?}", other),
        }
    }
}
