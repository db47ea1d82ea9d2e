//! Day classification for a pay month.
//!
//! Every day of the month is counted exactly once, with holidays taking
//! precedence over Sundays and everything else (Saturdays included) counted
//! as a workday.

use chrono::{Datelike, Weekday};

use crate::error::EngineResult;
use crate::models::{AuditStep, DayCounts, Period};

use super::HolidayCalendar;

/// The result of classifying a month, including the audit step.
#[derive(Debug, Clone)]
pub struct DayClassificationResult {
    /// The day counts for the month.
    pub day_counts: DayCounts,
    /// The audit step recording this classification.
    pub audit_step: AuditStep,
}

/// Classifies each day of `period` as workday, Sunday or holiday.
///
/// A holiday falling on a Sunday is counted as a holiday only, so `sundays`
/// undercounts the month's Sundays in that case.
///
/// # Errors
///
/// - [`EngineError::InvalidInput`](crate::error::EngineError::InvalidInput)
///   when the month is outside 1–12
/// - [`EngineError::UnsupportedYear`](crate::error::EngineError::UnsupportedYear)
///   when the calendar has no data for the year
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::{RuleCalendar, classify_month};
/// use payroll_engine::config::ConfigLoader;
/// use payroll_engine::models::Period;
///
/// let loader = ConfigLoader::builtin().unwrap();
/// let calendar = RuleCalendar::new(loader.config().holidays());
///
/// // May 2025: Worker's Day on Thursday the 1st, four Sundays
/// let result = classify_month(Period::new(2025, 5).unwrap(), &calendar, 1).unwrap();
/// assert_eq!(result.day_counts.workdays, 26);
/// assert_eq!(result.day_counts.sundays, 4);
/// assert_eq!(result.day_counts.holidays, 1);
/// ```
pub fn classify_month(
    period: Period,
    calendar: &dyn HolidayCalendar,
    step_number: u32,
) -> EngineResult<DayClassificationResult> {
    period.validate()?;
    let holidays = calendar.holidays_in_year(period.year)?;
    let first = period.first_day()?;
    let last = period.last_day()?;

    let mut counts = DayCounts::default();
    let mut holiday_names = Vec::new();

    for day in first.iter_days().take_while(|d| *d <= last) {
        if let Some(name) = holidays.name(day) {
            counts.holidays += 1;
            holiday_names.push(serde_json::json!({
                "date": day.to_string(),
                "name": name,
                "weekday": day.weekday().to_string()
            }));
        } else if day.weekday() == Weekday::Sun {
            counts.sundays += 1;
        } else {
            counts.workdays += 1;
        }
    }

    let audit_step = AuditStep {
        step_number,
        rule_id: "day_classification".to_string(),
        rule_name: "Day Classification".to_string(),
        input: serde_json::json!({
            "year": period.year,
            "month": period.month,
            "region": calendar.region()
        }),
        output: serde_json::json!({
            "workdays": counts.workdays,
            "sundays": counts.sundays,
            "holidays": counts.holidays,
            "holiday_dates": holiday_names
        }),
        reasoning: format!(
            "{}: {} workdays, {} Sundays, {} holidays ({} paid rest days)",
            period,
            counts.workdays,
            counts.sundays,
            counts.holidays,
            counts.paid_rest_days()
        ),
    };

    Ok(DayClassificationResult {
        day_counts: counts,
        audit_step,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::{HolidaySet, RuleCalendar};
    use crate::config::ConfigLoader;
    use crate::error::EngineError;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn builtin_calendar() -> RuleCalendar {
        let loader = ConfigLoader::builtin().expect("Failed to load builtin config");
        RuleCalendar::new(loader.config().holidays())
    }

    /// A calendar with a fixed list of dates, valid for any year.
    struct FixedCalendar(Vec<NaiveDate>);

    impl HolidayCalendar for FixedCalendar {
        fn region(&self) -> &str {
            "TEST"
        }

        fn holidays_in_year(&self, year: i32) -> EngineResult<HolidaySet> {
            let mut set = HolidaySet::new();
            for d in self.0.iter().filter(|d| d.year() == year) {
                set.insert(*d, "Test Holiday");
            }
            Ok(set)
        }
    }

    #[test]
    fn test_may_2025_counts() {
        let result = classify_month(Period::new(2025, 5).unwrap(), &builtin_calendar(), 1).unwrap();
        assert_eq!(
            result.day_counts,
            DayCounts {
                workdays: 26,
                sundays: 4,
                holidays: 1,
            }
        );
        assert_eq!(result.audit_step.rule_id, "day_classification");
        assert_eq!(result.audit_step.output["holiday_dates"][0]["date"], "2025-05-01");
    }

    #[test]
    fn test_sunday_holiday_counted_once_as_holiday() {
        // 2025-06-01 is a Sunday
        let calendar = FixedCalendar(vec![date(2025, 6, 1)]);
        let result = classify_month(Period::new(2025, 6).unwrap(), &calendar, 1).unwrap();
        assert_eq!(result.day_counts.holidays, 1);
        assert_eq!(result.day_counts.sundays, 4);
        assert_eq!(result.day_counts.workdays, 25);
        assert_eq!(result.day_counts.total_days(), 30);
    }

    #[test]
    fn test_saturdays_are_workdays() {
        // February 2026 starts on a Sunday: four Sundays, no holidays
        let calendar = FixedCalendar(vec![]);
        let result = classify_month(Period::new(2026, 2).unwrap(), &calendar, 1).unwrap();
        assert_eq!(result.day_counts.sundays, 4);
        assert_eq!(result.day_counts.workdays, 24);
    }

    #[test]
    fn test_december_includes_christmas() {
        // 2025-12-25 is a Thursday; Sundays are 7, 14, 21, 28
        let result = classify_month(Period::new(2025, 12).unwrap(), &builtin_calendar(), 1).unwrap();
        assert_eq!(result.day_counts.holidays, 1);
        assert_eq!(result.day_counts.sundays, 4);
        assert_eq!(result.day_counts.workdays, 26);
    }

    #[test]
    fn test_november_2025_has_three_holidays() {
        // All Souls' Day falls on Sunday 2 Nov; Republic Day is Saturday 15 Nov;
        // Black Awareness Day is Thursday 20 Nov. Sundays left: 9, 16, 23, 30.
        let result = classify_month(Period::new(2025, 11).unwrap(), &builtin_calendar(), 1).unwrap();
        assert_eq!(result.day_counts.holidays, 3);
        assert_eq!(result.day_counts.sundays, 4);
        assert_eq!(result.day_counts.workdays, 23);
    }

    #[test]
    fn test_april_2025_easter_and_state_holidays() {
        // Good Friday 18, Sunday 20 (Easter), Tiradentes Monday 21, Saint George Wednesday 23
        let result = classify_month(Period::new(2025, 4).unwrap(), &builtin_calendar(), 1).unwrap();
        assert_eq!(result.day_counts.holidays, 3);
        assert_eq!(result.day_counts.sundays, 4);
        assert_eq!(result.day_counts.workdays, 23);
    }

    #[test]
    fn test_invalid_month_rejected_before_lookup() {
        let err = classify_month(Period { year: 2025, month: 13 }, &builtin_calendar(), 1)
            .unwrap_err();
        assert!(matches!(err, EngineError::InvalidInput { .. }));
    }

    #[test]
    fn test_unsupported_year_propagates() {
        let err = classify_month(Period::new(1900, 1).unwrap(), &builtin_calendar(), 1)
            .unwrap_err();
        assert!(matches!(err, EngineError::UnsupportedYear { year: 1900, .. }));
    }

    #[test]
    fn test_every_month_of_2024_sums_to_length() {
        let calendar = builtin_calendar();
        for month in 1..=12 {
            let period = Period::new(2024, month).unwrap();
            let result = classify_month(period, &calendar, 1).unwrap();
            assert_eq!(result.day_counts.total_days(), period.day_count().unwrap());
        }
    }
}
