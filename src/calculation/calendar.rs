//! Regional holiday calendars.
//!
//! This module provides the [`HolidayCalendar`] trait used by the day
//! classifier, a rule-driven implementation built from `holidays.yaml`, and
//! a memoizing wrapper that caches each year's holidays.

use std::collections::{BTreeMap, HashMap};
use std::sync::RwLock;

use chrono::{Datelike, NaiveDate, TimeDelta};

use crate::config::{HolidayDate, HolidaysConfig, YearRange};
use crate::error::{EngineError, EngineResult};

/// The holidays of one year, keyed by date.
///
/// When two rules land on the same date only the first name is kept, so a
/// date is never counted twice.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HolidaySet {
    holidays: BTreeMap<NaiveDate, String>,
}

impl HolidaySet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a holiday unless its date is already present.
    pub fn insert(&mut self, date: NaiveDate, name: impl Into<String>) {
        self.holidays.entry(date).or_insert_with(|| name.into());
    }

    /// Whether `date` is a holiday.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.holidays.contains_key(&date)
    }

    /// The name of the holiday on `date`, if any.
    pub fn name(&self, date: NaiveDate) -> Option<&str> {
        self.holidays.get(&date).map(String::as_str)
    }

    /// Number of distinct holiday dates.
    pub fn len(&self) -> usize {
        self.holidays.len()
    }

    /// Whether the set holds no holidays.
    pub fn is_empty(&self) -> bool {
        self.holidays.is_empty()
    }

    /// Iterates the holidays in date order.
    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, &str)> {
        self.holidays.iter().map(|(date, name)| (*date, name.as_str()))
    }
}

/// A source of regional holidays, looked up by year.
pub trait HolidayCalendar: Send + Sync {
    /// The region code of the calendar (e.g., "BR-RJ").
    fn region(&self) -> &str;

    /// All holidays of `year`.
    ///
    /// Fails with [`EngineError::UnsupportedYear`] when the calendar has no
    /// data for the year.
    fn holidays_in_year(&self, year: i32) -> EngineResult<HolidaySet>;
}

/// Easter Sunday of `year` in the Gregorian calendar (Oudin's algorithm).
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::easter_sunday;
/// use chrono::NaiveDate;
///
/// assert_eq!(easter_sunday(2025), NaiveDate::from_ymd_opt(2025, 4, 20));
/// assert_eq!(easter_sunday(2024), NaiveDate::from_ymd_opt(2024, 3, 31));
/// ```
pub fn easter_sunday(year: i32) -> Option<NaiveDate> {
    let g = year % 19;
    let c = year / 100;
    let h = (c - c / 4 - (8 * c + 13) / 25 + 19 * g + 15) % 30;
    let i = h - (h / 28) * (1 - (h / 28) * (29 / (h + 1)) * ((21 - g) / 11));
    let j = (year + year / 4 + i + 2 - c + c / 4) % 7;
    let p = i - j;
    let day = 1 + (p + 27 + (p + 6) / 40) % 31;
    let month = 3 + (p + 26) / 30;
    NaiveDate::from_ymd_opt(year, month as u32, day as u32)
}

/// A calendar computed from fixed-date and Easter-relative rules.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::{HolidayCalendar, RuleCalendar};
/// use payroll_engine::config::ConfigLoader;
/// use chrono::NaiveDate;
///
/// let loader = ConfigLoader::builtin().unwrap();
/// let calendar = RuleCalendar::new(loader.config().holidays());
///
/// let holidays = calendar.holidays_in_year(2025).unwrap();
/// assert!(holidays.contains(NaiveDate::from_ymd_opt(2025, 5, 1).unwrap()));
/// assert_eq!(holidays.name(NaiveDate::from_ymd_opt(2025, 4, 18).unwrap()), Some("Good Friday"));
/// assert!(calendar.holidays_in_year(1900).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct RuleCalendar {
    config: HolidaysConfig,
}

impl RuleCalendar {
    /// Builds a calendar from the holiday configuration.
    pub fn new(config: &HolidaysConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }

    /// The years this calendar answers for.
    pub fn supported_years(&self) -> YearRange {
        self.config.supported_years
    }
}

impl HolidayCalendar for RuleCalendar {
    fn region(&self) -> &str {
        &self.config.region
    }

    fn holidays_in_year(&self, year: i32) -> EngineResult<HolidaySet> {
        if !self.config.supported_years.contains(year) {
            return Err(EngineError::UnsupportedYear {
                region: self.config.region.clone(),
                year,
            });
        }

        let easter = easter_sunday(year);
        let mut set = HolidaySet::new();

        for holiday in self.config.holidays.iter().filter(|h| h.observed_in(year)) {
            let date = match holiday.date {
                HolidayDate::Fixed { month, day } => NaiveDate::from_ymd_opt(year, month, day),
                HolidayDate::Easter { offset_days } => easter.and_then(|easter| {
                    TimeDelta::try_days(offset_days).and_then(|delta| easter.checked_add_signed(delta))
                }),
            };
            // Rules the loader accepted only miss on Feb 29 of common years.
            if let Some(date) = date.filter(|d| d.year() == year) {
                set.insert(date, holiday.name.clone());
            }
        }

        Ok(set)
    }
}

/// Caches the holidays of each year looked up through an inner calendar.
#[derive(Debug)]
pub struct MemoizedCalendar<C> {
    inner: C,
    cache: RwLock<HashMap<i32, HolidaySet>>,
}

impl<C: HolidayCalendar> MemoizedCalendar<C> {
    /// Wraps `inner` with an empty cache.
    pub fn new(inner: C) -> Self {
        Self {
            inner,
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// Number of years currently cached.
    pub fn cached_years(&self) -> usize {
        self.cache.read().unwrap_or_else(|e| e.into_inner()).len()
    }
}

impl<C: HolidayCalendar> HolidayCalendar for MemoizedCalendar<C> {
    fn region(&self) -> &str {
        self.inner.region()
    }

    fn holidays_in_year(&self, year: i32) -> EngineResult<HolidaySet> {
        if let Some(set) = self
            .cache
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(&year)
        {
            return Ok(set.clone());
        }

        // Failures are not cached; an unsupported year stays unsupported.
        let set = self.inner.holidays_in_year(year)?;
        self.cache
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .insert(year, set.clone());
        Ok(set)
    }
}
