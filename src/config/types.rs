//! Configuration types for payroll calculation.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::models::{IncomeTaxBase, InvalidHoursPolicy};

/// The two overtime premiums, in percent over the normal hour rate.
#[derive(Debug, Clone, Deserialize)]
pub struct OvertimePremiums {
    /// The first premium (60 in BR-RJ).
    pub first: Decimal,
    /// The second premium (120 in BR-RJ).
    pub second: Decimal,
}

/// Payroll policy choices for the region.
#[derive(Debug, Clone, Deserialize)]
pub struct PayrollPolicy {
    /// Hours contracted per month when a request does not say otherwise.
    pub contracted_monthly_hours: Decimal,
    /// The overtime premiums.
    pub overtime_premiums: OvertimePremiums,
    /// Default salary figure used as the income-tax base.
    pub income_tax_base: IncomeTaxBase,
    /// How unusable overtime hour figures are handled.
    #[serde(default)]
    pub invalid_hours: InvalidHoursPolicy,
}

/// Metadata about the region, from region.yaml.
#[derive(Debug, Clone, Deserialize)]
pub struct RegionMetadata {
    /// Region code (e.g., "BR-RJ").
    pub code: String,
    /// Human-readable name of the region.
    pub name: String,
    /// Currency symbol used in formatted reports (e.g., "R$").
    pub currency_symbol: String,
    /// Payroll policy.
    pub policy: PayrollPolicy,
}

/// One bracket of a progressive schedule.
///
/// The amount owed inside the bracket is `rate * amount - deduction`; the
/// deduction already accounts for the lower brackets.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Bracket {
    /// Inclusive upper bound; `None` for the open-ended top bracket.
    #[serde(default)]
    pub up_to: Option<Decimal>,
    /// Marginal rate of the bracket.
    pub rate: Decimal,
    /// Fixed amount subtracted from `rate * amount`.
    pub deduction: Decimal,
}

/// A progressive schedule (social contribution or income tax).
///
/// Amounts above the highest bound are evaluated at that bound unless the
/// schedule ends with an open-ended bracket.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BracketSchedule {
    /// Name of the schedule (e.g., "INSS").
    pub name: String,
    /// Brackets in ascending order of upper bound.
    pub brackets: Vec<Bracket>,
}

impl BracketSchedule {
    /// The bound above which amounts are capped, if the schedule is capped.
    pub fn ceiling(&self) -> Option<Decimal> {
        self.brackets.last().and_then(|last| last.up_to)
    }
}

/// An inclusive range of calendar years.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct YearRange {
    /// First supported year.
    pub first: i32,
    /// Last supported year.
    pub last: i32,
}

impl YearRange {
    /// Whether `year` lies inside the range.
    pub fn contains(&self, year: i32) -> bool {
        (self.first..=self.last).contains(&year)
    }
}

/// How the date of a holiday is determined each year.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HolidayDate {
    /// The same month and day every year.
    Fixed {
        /// Month, 1–12.
        month: u32,
        /// Day of the month.
        day: u32,
    },
    /// A number of days before (negative) or after Easter Sunday.
    Easter {
        /// Offset from Easter Sunday in days.
        offset_days: i64,
    },
}

/// A holiday rule of the regional calendar.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HolidayDefinition {
    /// Name of the holiday.
    pub name: String,
    /// How its date is computed.
    pub date: HolidayDate,
    /// First year the holiday is observed.
    #[serde(default)]
    pub from_year: Option<i32>,
    /// Last year the holiday is observed.
    #[serde(default)]
    pub until_year: Option<i32>,
}

impl HolidayDefinition {
    /// Whether the holiday is observed in `year`.
    pub fn observed_in(&self, year: i32) -> bool {
        self.from_year.is_none_or(|from| year >= from)
            && self.until_year.is_none_or(|until| year <= until)
    }
}

/// Holiday configuration from holidays.yaml.
#[derive(Debug, Clone, Deserialize)]
pub struct HolidaysConfig {
    /// Region code the rules belong to.
    pub region: String,
    /// Years for which the rules are known to be valid.
    pub supported_years: YearRange,
    /// The holiday rules.
    pub holidays: Vec<HolidayDefinition>,
}

/// The complete payroll configuration loaded from YAML files.
#[derive(Debug, Clone)]
pub struct PayrollConfig {
    metadata: RegionMetadata,
    social_contribution: BracketSchedule,
    income_tax: BracketSchedule,
    holidays: HolidaysConfig,
}

impl PayrollConfig {
    /// Creates a new PayrollConfig from its component parts.
    pub fn new(
        metadata: RegionMetadata,
        social_contribution: BracketSchedule,
        income_tax: BracketSchedule,
        holidays: HolidaysConfig,
    ) -> Self {
        Self {
            metadata,
            social_contribution,
            income_tax,
            holidays,
        }
    }

    /// Returns the region metadata.
    pub fn region(&self) -> &RegionMetadata {
        &self.metadata
    }

    /// Returns the payroll policy.
    pub fn policy(&self) -> &PayrollPolicy {
        &self.metadata.policy
    }

    /// Returns the social-contribution schedule.
    pub fn social_contribution(&self) -> &BracketSchedule {
        &self.social_contribution
    }

    /// Returns the income-tax schedule.
    pub fn income_tax(&self) -> &BracketSchedule {
        &self.income_tax
    }

    /// Returns the holiday configuration.
    pub fn holidays(&self) -> &HolidaysConfig {
        &self.holidays
    }
}
