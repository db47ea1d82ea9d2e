//! Income tax withholding (IRRF).

use rust_decimal::Decimal;

use crate::config::BracketSchedule;
use crate::error::{EngineError, EngineResult};
use crate::models::{AuditStep, IncomeTaxBase};

use super::brackets::{DeductionResult, evaluate_schedule};

/// Calculates the income tax withheld.
///
/// The taxable base is `salary_for_tax - social_contribution`. Which salary
/// figure is passed as `salary_for_tax` is the caller's choice, named by
/// `income_tax_base` for the audit trail.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::calculate_income_tax;
/// use payroll_engine::config::ConfigLoader;
/// use payroll_engine::models::IncomeTaxBase;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let loader = ConfigLoader::builtin().unwrap();
/// let schedule = loader.config().income_tax();
///
/// // Taxable base 2400.00 - 200.00 = 2200.00 is exempt
/// let result = calculate_income_tax(
///     Decimal::from_str("2400.00").unwrap(),
///     Decimal::from_str("200.00").unwrap(),
///     IncomeTaxBase::BaseSalary,
///     schedule,
///     1,
/// ).unwrap();
/// assert_eq!(result.amount, Decimal::ZERO);
/// ```
pub fn calculate_income_tax(
    salary_for_tax: Decimal,
    social_contribution: Decimal,
    income_tax_base: IncomeTaxBase,
    schedule: &BracketSchedule,
    step_number: u32,
) -> EngineResult<DeductionResult> {
    let taxable_base = salary_for_tax
        .checked_sub(social_contribution)
        .ok_or_else(|| EngineError::invalid_input("social_contribution", "is too large"))?;
    let evaluation = evaluate_schedule(schedule, taxable_base)?;

    let audit_step = AuditStep {
        step_number,
        rule_id: "income_tax".to_string(),
        rule_name: "Income Tax Withholding".to_string(),
        input: serde_json::json!({
            "income_tax_base": income_tax_base.to_string(),
            "salary_for_tax": salary_for_tax.normalize().to_string(),
            "social_contribution": social_contribution.normalize().to_string()
        }),
        output: serde_json::json!({
            "taxable_base": taxable_base.normalize().to_string(),
            "bracket": evaluation.bracket_index + 1,
            "rate": evaluation.rate.normalize().to_string(),
            "deduction": evaluation.deduction.normalize().to_string(),
            "amount": evaluation.amount.normalize().to_string()
        }),
        reasoning: if evaluation.rate.is_zero() {
            format!(
                "{}: taxable base {} is exempt",
                schedule.name,
                taxable_base.round_dp(2)
            )
        } else {
            format!(
                "{} bracket {}: ({} - {}) × {} - {} = {}",
                schedule.name,
                evaluation.bracket_index + 1,
                salary_for_tax.round_dp(2),
                social_contribution.round_dp(2),
                evaluation.rate.normalize(),
                evaluation.deduction.normalize(),
                evaluation.amount.round_dp(2)
            )
        },
    };

    Ok(DeductionResult {
        amount: evaluation.amount,
        base: taxable_base,
        evaluation,
        audit_step,
    })
}
