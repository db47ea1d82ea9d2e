//! Pay period and day count models.
//!
//! This module contains the [`Period`] (a calendar month) and the
//! [`DayCounts`] breakdown produced by the calendar classifier.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// A calendar month for which pay is calculated.
///
/// # Example
///
/// ```
/// use payroll_engine::models::Period;
/// use chrono::NaiveDate;
///
/// let period = Period::new(2025, 5).unwrap();
/// assert_eq!(period.first_day().unwrap(), NaiveDate::from_ymd_opt(2025, 5, 1).unwrap());
/// assert_eq!(period.last_day().unwrap(), NaiveDate::from_ymd_opt(2025, 5, 31).unwrap());
/// assert!(Period::new(2025, 13).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Period {
    /// The calendar year.
    pub year: i32,
    /// The month, 1 (January) through 12 (December).
    pub month: u32,
}

impl Period {
    /// Creates a period, rejecting months outside 1–12.
    pub fn new(year: i32, month: u32) -> EngineResult<Self> {
        let period = Self { year, month };
        period.validate()?;
        Ok(period)
    }

    /// Checks the month range and that the year is representable.
    pub fn validate(&self) -> EngineResult<()> {
        if !(1..=12).contains(&self.month) {
            return Err(EngineError::invalid_input(
                "month",
                format!("{} is not between 1 and 12", self.month),
            ));
        }
        self.first_day().map(|_| ())
    }

    /// The first day of the month.
    pub fn first_day(&self) -> EngineResult<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).ok_or_else(|| {
            EngineError::invalid_input(
                "year",
                format!("{}-{:02} is not a representable date", self.year, self.month),
            )
        })
    }

    /// The last day of the month: the day before the first day of the next
    /// month, with December wrapping into January of the following year.
    pub fn last_day(&self) -> EngineResult<NaiveDate> {
        let (next_year, next_month) = if self.month == 12 {
            (self.year + 1, 1)
        } else {
            (self.year, self.month + 1)
        };
        NaiveDate::from_ymd_opt(next_year, next_month, 1)
            .and_then(|next| next.pred_opt())
            .ok_or_else(|| {
                EngineError::invalid_input(
                    "year",
                    format!("{}-{:02} is not a representable date", self.year, self.month),
                )
            })
    }

    /// Number of calendar days in the month.
    pub fn day_count(&self) -> EngineResult<u32> {
        let first = self.first_day()?;
        let last = self.last_day()?;
        Ok((last - first).num_days() as u32 + 1)
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.month, self.year)
    }
}

/// Classification of the days of a month.
///
/// Holidays take precedence over Sundays, so `sundays` only counts Sundays
/// that are not holidays. The three buckets always add up to the length of
/// the month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DayCounts {
    /// Days that are neither Sundays nor holidays (Saturdays included).
    pub workdays: u32,
    /// Sundays that are not holidays.
    pub sundays: u32,
    /// Regional holidays, whatever weekday they fall on.
    pub holidays: u32,
}

impl DayCounts {
    /// Paid non-working days: Sundays plus holidays.
    pub fn paid_rest_days(&self) -> u32 {
        self.sundays + self.holidays
    }

    /// Total days classified.
    pub fn total_days(&self) -> u32 {
        self.workdays + self.sundays + self.holidays
    }
}
