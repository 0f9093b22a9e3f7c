//! Report month and the date windows derived from it.

use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Days covered by the "next 3 months" window after its first day.
pub const LOOKAHEAD_DAYS: u64 = 90;

/// A calendar month, 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportMonth {
    year: i32,
    month: u32,
}

impl ReportMonth {
    /// Creates a report month.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidRequest`] if `month` is not 1-12 or the
    /// year is outside the supported calendar.
    ///
    /// # Examples
    ///
    /// ```
    /// use staffing_match::dashboard::ReportMonth;
    ///
    /// let month = ReportMonth::new(2024, 2).unwrap();
    /// assert_eq!(month.days(), 29);
    /// assert!(ReportMonth::new(2024, 13).is_err());
    /// ```
    pub fn new(year: i32, month: u32) -> EngineResult<Self> {
        if !(1..=12).contains(&month) {
            return Err(EngineError::InvalidRequest {
                field: "month".to_string(),
                message: format!("month must be 1-12, got {}", month),
            });
        }

        // Both ends of the month must exist on the calendar.
        let candidate = Self { year, month };
        if NaiveDate::from_ymd_opt(year, month, 1).is_none() || candidate.checked_next().is_none() {
            return Err(EngineError::InvalidRequest {
                field: "year".to_string(),
                message: format!("year {} is out of range", year),
            });
        }

        Ok(candidate)
    }

    /// The month containing `date`.
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Calendar year.
    pub fn year(&self) -> i32 {
        self.year
    }

    /// Month number, 1-12.
    pub fn month(&self) -> u32 {
        self.month
    }

    /// First day of the month.
    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }

    /// Last day of the month.
    pub fn last_day(&self) -> NaiveDate {
        self.next()
            .first_day()
            .pred_opt()
            .unwrap_or(NaiveDate::MAX)
    }

    /// Number of days in the month.
    pub fn days(&self) -> i64 {
        (self.last_day() - self.first_day()).num_days() + 1
    }

    /// The following month.
    pub fn next(&self) -> Self {
        self.checked_next().unwrap_or(*self)
    }

    fn checked_next(&self) -> Option<Self> {
        let (year, month) = if self.month == 12 {
            (self.year.checked_add(1)?, 1)
        } else {
            (self.year, self.month + 1)
        };
        NaiveDate::from_ymd_opt(year, month, 1).map(|_| Self { year, month })
    }
}

/// An inclusive date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateWindow {
    /// First day.
    pub start: NaiveDate,
    /// Last day.
    pub end: NaiveDate,
}

impl DateWindow {
    /// Returns true if `date` falls inside the window.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Days from `date` to the end of the window.
    pub fn days_after(&self, date: NaiveDate) -> i64 {
        (self.end - date).num_days()
    }
}

/// The three expiry windows of a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportWindows {
    /// The selected month.
    pub this_month: DateWindow,
    /// The calendar month after it.
    pub next_month: DateWindow,
    /// Ninety days from the first day of the next month.
    pub next_3_months: DateWindow,
}

impl ReportWindows {
    /// Builds the windows for `month`.
    pub fn for_month(month: ReportMonth) -> Self {
        let next = month.next();
        let next_first = next.first_day();

        Self {
            this_month: DateWindow {
                start: month.first_day(),
                end: month.last_day(),
            },
            next_month: DateWindow {
                start: next_first,
                end: next.last_day(),
            },
            next_3_months: DateWindow {
                start: next_first,
                end: next_first
                    .checked_add_days(Days::new(LOOKAHEAD_DAYS))
                    .unwrap_or(NaiveDate::MAX),
            },
        }
    }
}
