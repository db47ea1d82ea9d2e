//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the region's
//! payroll configuration from YAML files.

use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::warn;

use crate::calculation::{RuleCalendar, find_discontinuities, validate_schedule};
use crate::error::{EngineError, EngineResult};

use super::types::{
    BracketSchedule, HolidayDate, HolidaysConfig, PayrollConfig, RegionMetadata,
};

/// Schedule jumps at or below this size are treated as rounding.
const CONTINUITY_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Longest Easter offset accepted in holiday rules, in days.
const MAX_EASTER_OFFSET_DAYS: i64 = 366;

const BUILTIN_REGION: &str = include_str!("../../config/br-rj/region.yaml");
const BUILTIN_SOCIAL_CONTRIBUTION: &str = include_str!("../../config/br-rj/social_contribution.yaml");
const BUILTIN_INCOME_TAX: &str = include_str!("../../config/br-rj/income_tax.yaml");
const BUILTIN_HOLIDAYS: &str = include_str!("../../config/br-rj/holidays.yaml");

/// Loads and provides access to the payroll configuration.
///
/// # Directory Structure
///
/// ```text
/// config/br-rj/
/// ├── region.yaml              # Region metadata and payroll policy
/// ├── social_contribution.yaml # INSS brackets
/// ├── income_tax.yaml          # IRRF brackets
/// └── holidays.yaml            # Holiday rules and supported years
/// ```
///
/// # Example
///
/// ```no_run
/// use payroll_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/br-rj").unwrap();
/// println!("Loaded region: {}", loader.region().name);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: PayrollConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing
    /// - Any file contains invalid YAML
    /// - A bracket schedule or holiday rule is unusable
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let metadata = Self::load_yaml::<RegionMetadata>(&path.join("region.yaml"))?;
        let social_contribution =
            Self::load_yaml::<BracketSchedule>(&path.join("social_contribution.yaml"))?;
        let income_tax = Self::load_yaml::<BracketSchedule>(&path.join("income_tax.yaml"))?;
        let holidays = Self::load_yaml::<HolidaysConfig>(&path.join("holidays.yaml"))?;

        Self::from_parts(metadata, social_contribution, income_tax, holidays)
    }

    /// Loads the BR-RJ configuration compiled into the crate.
    ///
    /// # Example
    ///
    /// ```
    /// use payroll_engine::config::ConfigLoader;
    ///
    /// let loader = ConfigLoader::builtin().unwrap();
    /// assert_eq!(loader.region().code, "BR-RJ");
    /// ```
    pub fn builtin() -> EngineResult<Self> {
        let metadata = Self::parse_yaml::<RegionMetadata>(BUILTIN_REGION, "builtin:region.yaml")?;
        let social_contribution = Self::parse_yaml::<BracketSchedule>(
            BUILTIN_SOCIAL_CONTRIBUTION,
            "builtin:social_contribution.yaml",
        )?;
        let income_tax =
            Self::parse_yaml::<BracketSchedule>(BUILTIN_INCOME_TAX, "builtin:income_tax.yaml")?;
        let holidays =
            Self::parse_yaml::<HolidaysConfig>(BUILTIN_HOLIDAYS, "builtin:holidays.yaml")?;

        Self::from_parts(metadata, social_contribution, income_tax, holidays)
    }

    fn from_parts(
        metadata: RegionMetadata,
        social_contribution: BracketSchedule,
        income_tax: BracketSchedule,
        holidays: HolidaysConfig,
    ) -> EngineResult<Self> {
        Self::validate_policy(&metadata)?;
        for schedule in [&social_contribution, &income_tax] {
            validate_schedule(schedule)?;
            for gap in find_discontinuities(schedule, CONTINUITY_TOLERANCE) {
                warn!(
                    schedule = %schedule.name,
                    bound = %gap.bound,
                    below = %gap.below,
                    above = %gap.above,
                    "Bracket schedule is discontinuous at bound"
                );
            }
        }
        Self::validate_holidays(&metadata, &holidays)?;

        let config = PayrollConfig::new(metadata, social_contribution, income_tax, holidays);
        Ok(Self { config })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        Self::parse_yaml(&content, &path_str)
    }

    fn parse_yaml<T: serde::de::DeserializeOwned>(content: &str, path: &str) -> EngineResult<T> {
        serde_yaml::from_str(content).map_err(|e| EngineError::ConfigParseError {
            path: path.to_string(),
            message: e.to_string(),
        })
    }

    fn validate_policy(metadata: &RegionMetadata) -> EngineResult<()> {
        let policy = &metadata.policy;
        if policy.contracted_monthly_hours <= Decimal::ZERO {
            return Err(EngineError::InvalidConfig {
                message: "contracted_monthly_hours must be greater than zero".to_string(),
            });
        }
        if policy.overtime_premiums.first < Decimal::ZERO
            || policy.overtime_premiums.second < Decimal::ZERO
        {
            return Err(EngineError::InvalidConfig {
                message: "overtime premiums cannot be negative".to_string(),
            });
        }
        Ok(())
    }

    fn validate_holidays(metadata: &RegionMetadata, holidays: &HolidaysConfig) -> EngineResult<()> {
        if holidays.region != metadata.code {
            return Err(EngineError::InvalidConfig {
                message: format!(
                    "holiday region '{}' does not match region '{}'",
                    holidays.region, metadata.code
                ),
            });
        }
        if holidays.supported_years.first > holidays.supported_years.last {
            return Err(EngineError::InvalidConfig {
                message: "supported_years.first is after supported_years.last".to_string(),
            });
        }

        for holiday in &holidays.holidays {
            let valid = match holiday.date {
                // 2000 is a leap year, so Feb 29 passes here.
                HolidayDate::Fixed { month, day } => NaiveDate::from_ymd_opt(2000, month, day).is_some(),
                HolidayDate::Easter { offset_days } => offset_days.abs() <= MAX_EASTER_OFFSET_DAYS,
            };
            if !valid {
                return Err(EngineError::InvalidConfig {
                    message: format!("holiday '{}' has an invalid date rule", holiday.name),
                });
            }
        }
        Ok(())
    }

    /// Returns the underlying payroll configuration.
    pub fn config(&self) -> &PayrollConfig {
        &self.config
    }

    /// Returns the region metadata.
    pub fn region(&self) -> &RegionMetadata {
        self.config.region()
    }

    /// Builds the rule calendar for the configured holidays.
    pub fn calendar(&self) -> RuleCalendar {
        RuleCalendar::new(self.config.holidays())
    }
}
