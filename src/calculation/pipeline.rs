//! The payroll pipeline.
//!
//! Runs day classification, overtime valuation, rest compensation and the
//! two deductions in order for one [`PayrollInput`], producing an immutable
//! [`PayrollResult`] with a numbered audit trail.

use rust_decimal::Decimal;
use tracing::debug;

use crate::config::PayrollConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{AuditStep, AuditTrace, IncomeTaxBase, PayrollInput, PayrollResult};

use super::{
    HolidayCalendar, calculate_income_tax, calculate_rest_compensation,
    calculate_social_contribution, classify_month, compute_gross, compute_net_pay, value_overtime,
};

/// Checks the fields that no policy can recover from.
fn validate_input(input: &PayrollInput) -> EngineResult<()> {
    input.period.validate()?;
    if input.base_salary < Decimal::ZERO {
        return Err(EngineError::invalid_input("base_salary", "cannot be negative"));
    }
    Ok(())
}

/// Calculates one month of pay.
///
/// Any invalid input or missing holiday data aborts the whole calculation;
/// no partial result is returned. A month without workdays, or overtime
/// zeroed under the lenient hours policy, is recovered and reported in
/// the result's audit warnings.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::{RuleCalendar, calculate_payroll};
/// use payroll_engine::config::ConfigLoader;
/// use payroll_engine::models::{IncomeTaxBase, PayrollInput, Period};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let loader = ConfigLoader::builtin().unwrap();
/// let calendar = RuleCalendar::new(loader.config().holidays());
/// let input = PayrollInput::new(
///     Period::new(2025, 5).unwrap(),
///     Decimal::from_str("3500.00").unwrap(),
///     Decimal::from(3),
///     Decimal::from(2),
///     IncomeTaxBase::GrossPay,
/// );
///
/// let result = calculate_payroll(&input, loader.config(), &calendar).unwrap();
/// assert_eq!(result.total_overtime_pay, Decimal::from(161));
/// assert_eq!(result.net_pay.round_dp(2), Decimal::from_str("3211.35").unwrap());
/// ```
pub fn calculate_payroll(
    input: &PayrollInput,
    config: &PayrollConfig,
    calendar: &dyn HolidayCalendar,
) -> EngineResult<PayrollResult> {
    validate_input(input)?;

    let policy = config.policy();
    let mut steps: Vec<AuditStep> = Vec::new();
    let mut warnings = Vec::new();
    let mut step_number: u32 = 1;

    let classification = classify_month(input.period, calendar, step_number)?;
    let day_counts = classification.day_counts;
    steps.push(classification.audit_step);
    step_number += 1;
    debug!(period = %input.period, ?day_counts, "Classified month");

    let first = value_overtime(
        &input.overtime_request(policy.overtime_premiums.first, input.overtime_hours_60),
        policy.invalid_hours,
        step_number,
    )?;
    steps.push(first.audit_step);
    warnings.extend(first.warning);
    step_number += 1;

    let second = value_overtime(
        &input.overtime_request(policy.overtime_premiums.second, input.overtime_hours_120),
        policy.invalid_hours,
        step_number,
    )?;
    steps.push(second.audit_step);
    warnings.extend(second.warning);
    step_number += 1;

    let total_overtime_pay = first
        .amount
        .checked_add(second.amount)
        .ok_or_else(|| EngineError::invalid_input("total_overtime_pay", "is too large"))?;
    debug!(
        overtime_pay_60 = %first.amount,
        overtime_pay_120 = %second.amount,
        "Valued overtime"
    );

    let rest = calculate_rest_compensation(
        total_overtime_pay,
        day_counts.workdays,
        day_counts.paid_rest_days(),
        step_number,
    )?;
    steps.push(rest.audit_step);
    warnings.extend(rest.warning);
    step_number += 1;

    let gross_pay = compute_gross(input.base_salary, first.amount, second.amount, rest.amount)?;
    steps.push(AuditStep {
        step_number,
        rule_id: "gross_pay".to_string(),
        rule_name: "Gross Pay".to_string(),
        input: serde_json::json!({
            "base_salary": input.base_salary.normalize().to_string(),
            "overtime_pay_60": first.amount.normalize().to_string(),
            "overtime_pay_120": second.amount.normalize().to_string(),
            "rest_compensation": rest.amount.normalize().to_string()
        }),
        output: serde_json::json!({ "gross_pay": gross_pay.normalize().to_string() }),
        reasoning: format!(
            "{} + {} + {} + {} = {}",
            input.base_salary.round_dp(2),
            first.amount.round_dp(2),
            second.amount.round_dp(2),
            rest.amount.round_dp(2),
            gross_pay.round_dp(2)
        ),
    });
    step_number += 1;

    let social = calculate_social_contribution(gross_pay, config.social_contribution(), step_number)?;
    steps.push(social.audit_step);
    step_number += 1;

    let salary_for_tax = match input.income_tax_base {
        IncomeTaxBase::BaseSalary => input.base_salary,
        IncomeTaxBase::GrossPay => gross_pay,
    };
    let income_tax = calculate_income_tax(
        salary_for_tax,
        social.amount,
        input.income_tax_base,
        config.income_tax(),
        step_number,
    )?;
    steps.push(income_tax.audit_step);
    step_number += 1;

    let net_pay = compute_net_pay(gross_pay, social.amount, income_tax.amount)?;
    steps.push(AuditStep {
        step_number,
        rule_id: "net_pay".to_string(),
        rule_name: "Net Pay".to_string(),
        input: serde_json::json!({
            "gross_pay": gross_pay.normalize().to_string(),
            "social_contribution": social.amount.normalize().to_string(),
            "income_tax_withheld": income_tax.amount.normalize().to_string()
        }),
        output: serde_json::json!({ "net_pay": net_pay.normalize().to_string() }),
        reasoning: format!(
            "{} - {} - {} = {}",
            gross_pay.round_dp(2),
            social.amount.round_dp(2),
            income_tax.amount.round_dp(2),
            net_pay.round_dp(2)
        ),
    });
    debug!(%gross_pay, %net_pay, warnings = warnings.len(), "Computed pay");

    Ok(PayrollResult {
        period: input.period,
        day_counts,
        base_salary: input.base_salary,
        overtime_pay_60: first.amount,
        overtime_pay_120: second.amount,
        total_overtime_pay,
        rest_compensation: rest.amount,
        gross_pay,
        social_contribution: social.amount,
        income_tax_base: input.income_tax_base,
        income_tax_withheld: income_tax.amount,
        net_pay,
        audit_trace: AuditTrace { steps, warnings },
    })
}
