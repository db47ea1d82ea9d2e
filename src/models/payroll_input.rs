//! Input models for a payroll calculation.
//!
//! This module contains the [`PayrollInput`] record consumed by the
//! pipeline, the per-premium [`OvertimeRequest`], and the two policy enums
//! that make the payroll rules explicit where they are open to
//! interpretation.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

use super::Period;

/// Contracted monthly hours assumed when none are given.
pub const DEFAULT_CONTRACTED_MONTHLY_HOURS: Decimal = Decimal::from_parts(200, 0, 0, false, 0);

/// Which salary figure feeds the income-tax withholding base.
///
/// The taxable base is always this figure minus the social contribution.
///
/// # Example
///
/// ```
/// use payroll_engine::models::IncomeTaxBase;
///
/// let policy: IncomeTaxBase = serde_json::from_str("\"base_salary\"").unwrap();
/// assert_eq!(policy, IncomeTaxBase::BaseSalary);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IncomeTaxBase {
    /// The contractual base salary, ignoring overtime and rest compensation.
    BaseSalary,
    /// The computed gross pay.
    GrossPay,
}

impl std::fmt::Display for IncomeTaxBase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IncomeTaxBase::BaseSalary => write!(f, "base_salary"),
            IncomeTaxBase::GrossPay => write!(f, "gross_pay"),
        }
    }
}

/// What to do when overtime is requested with unusable hour figures
/// (non-positive contracted hours or negative overtime hours).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvalidHoursPolicy {
    /// Fail the calculation with an invalid input error.
    #[default]
    Reject,
    /// Value the overtime at zero and record a warning.
    Zero,
}

/// A request to value overtime hours at one premium rate.
///
/// # Example
///
/// ```
/// use payroll_engine::models::OvertimeRequest;
/// use rust_decimal::Decimal;
///
/// let request = OvertimeRequest {
///     base_salary: Decimal::new(350000, 2),
///     contracted_monthly_hours: Decimal::from(200),
///     premium_percent: Decimal::from(60),
///     hours_worked: Decimal::from(3),
/// };
/// assert_eq!(request.normal_hour_rate().unwrap(), Decimal::new(1750, 2));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OvertimeRequest {
    /// Monthly base salary.
    pub base_salary: Decimal,
    /// Hours contracted per month.
    pub contracted_monthly_hours: Decimal,
    /// Premium over the normal hour rate, in percent (60 means 160%).
    pub premium_percent: Decimal,
    /// Overtime hours worked at this premium.
    pub hours_worked: Decimal,
}

impl OvertimeRequest {
    /// `base_salary / contracted_monthly_hours`.
    ///
    /// Callers must check `contracted_monthly_hours > 0` first.
    pub fn normal_hour_rate(&self) -> EngineResult<Decimal> {
        self.base_salary
            .checked_div(self.contracted_monthly_hours)
            .ok_or_else(|| EngineError::invalid_input("base_salary", "is too large"))
    }

    /// The normal hour rate raised by the premium.
    pub fn premium_hour_rate(&self) -> EngineResult<Decimal> {
        let multiplier = (self.premium_percent / Decimal::ONE_HUNDRED)
            .checked_add(Decimal::ONE)
            .ok_or_else(|| EngineError::invalid_input("premium_percent", "is too large"))?;
        self.normal_hour_rate()?
            .checked_mul(multiplier)
            .ok_or_else(|| EngineError::invalid_input("base_salary", "is too large"))
    }
}

/// Everything the pipeline needs to compute one month of pay.
///
/// # Example
///
/// ```
/// use payroll_engine::models::{IncomeTaxBase, PayrollInput, Period};
/// use rust_decimal::Decimal;
///
/// let input = PayrollInput::new(
///     Period::new(2025, 5).unwrap(),
///     Decimal::new(350000, 2),
///     Decimal::from(3),
///     Decimal::from(2),
///     IncomeTaxBase::GrossPay,
/// );
/// assert_eq!(input.contracted_monthly_hours, Decimal::from(200));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollInput {
    /// The month being paid.
    pub period: Period,
    /// Monthly base salary.
    pub base_salary: Decimal,
    /// Overtime hours paid at the first (60%) premium.
    pub overtime_hours_60: Decimal,
    /// Overtime hours paid at the second (120%) premium.
    pub overtime_hours_120: Decimal,
    /// Hours contracted per month.
    pub contracted_monthly_hours: Decimal,
    /// Which salary figure the income-tax base is derived from.
    pub income_tax_base: IncomeTaxBase,
}

impl PayrollInput {
    /// Creates an input with the default contracted monthly hours.
    pub fn new(
        period: Period,
        base_salary: Decimal,
        overtime_hours_60: Decimal,
        overtime_hours_120: Decimal,
        income_tax_base: IncomeTaxBase,
    ) -> Self {
        Self {
            period,
            base_salary,
            overtime_hours_60,
            overtime_hours_120,
            contracted_monthly_hours: DEFAULT_CONTRACTED_MONTHLY_HOURS,
            income_tax_base,
        }
    }

    /// Builds the overtime request for one premium rate.
    pub fn overtime_request(&self, premium_percent: Decimal, hours_worked: Decimal) -> OvertimeRequest {
        OvertimeRequest {
            base_salary: self.base_salary,
            contracted_monthly_hours: self.contracted_monthly_hours,
            premium_percent,
            hours_worked,
        }
    }
}
