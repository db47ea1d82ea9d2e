//! Request types for the payroll engine API.
//!
//! This module defines the JSON request structure for the `/calculate` endpoint.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

use crate::config::PayrollPolicy;
use crate::error::EngineResult;
use crate::models::{IncomeTaxBase, PayrollInput, Period};

/// Request body for the `/calculate` endpoint.
///
/// Decimal fields accept JSON numbers or numeric strings. Optional fields
/// fall back to the region's payroll policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayrollRequest {
    /// The month, 1 through 12.
    #[serde(deserialize_with = "integer_or_string")]
    pub month: u32,
    /// The calendar year.
    #[serde(deserialize_with = "integer_or_string")]
    pub year: i32,
    /// Monthly base salary.
    pub base_salary: Decimal,
    /// Overtime hours at the first premium.
    pub overtime_hours_60: Decimal,
    /// Overtime hours at the second premium.
    pub overtime_hours_120: Decimal,
    /// Override for the contracted monthly hours.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contracted_monthly_hours: Option<Decimal>,
    /// Override for the income-tax base.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub income_tax_base: Option<IncomeTaxBase>,
}

impl PayrollRequest {
    /// Converts the request into a pipeline input, filling omitted fields
    /// from `policy`.
    ///
    /// Only the period is checked here; amounts are validated by the
    /// pipeline so the hours policy applies uniformly.
    pub fn into_input(self, policy: &PayrollPolicy) -> EngineResult<PayrollInput> {
        let period = Period::new(self.year, self.month)?;
        Ok(PayrollInput {
            period,
            base_salary: self.base_salary,
            overtime_hours_60: self.overtime_hours_60,
            overtime_hours_120: self.overtime_hours_120,
            contracted_monthly_hours: self
                .contracted_monthly_hours
                .unwrap_or(policy.contracted_monthly_hours),
            income_tax_base: self.income_tax_base.unwrap_or(policy.income_tax_base),
        })
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum IntegerOrString {
    Integer(i64),
    String(String),
}

fn integer_or_string<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: TryFrom<i64> + std::str::FromStr,
{
    use serde::de::Error;

    match IntegerOrString::deserialize(deserializer)? {
        IntegerOrString::Integer(value) => {
            T::try_from(value).map_err(|_| D::Error::custom(format!("{} is out of range", value)))
        }
        IntegerOrString::String(value) => value
            .trim()
            .parse::<T>()
            .map_err(|_| D::Error::custom(format!("'{}' is not an integer", value))),
    }
}
