//! Weekly-rest compensation (DSR) over overtime.
//!
//! Overtime is treated as earned evenly across the month's workdays; each
//! paid rest day (Sunday or holiday) earns one workday's share of it.

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::{AuditStep, AuditWarning, WARNING_COMPUTATION_DEGENERATE};

/// The result of a rest compensation calculation.
#[derive(Debug, Clone)]
pub struct RestCompensationResult {
    /// The rest compensation amount.
    pub amount: Decimal,
    /// Set when the month had no workdays and the amount fell back to zero.
    pub warning: Option<AuditWarning>,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates rest compensation: `(total_overtime_pay / workdays) * paid_rest_days`.
///
/// With no workdays there is no denominator and the amount is zero,
/// reported through [`RestCompensationResult::warning`]. Fails only when the
/// amount cannot be represented.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::calculate_rest_compensation;
/// use rust_decimal::Decimal;
///
/// let result = calculate_rest_compensation(Decimal::from(260), 26, 5, 1).unwrap();
/// assert_eq!(result.amount, Decimal::from(50));
///
/// let degenerate = calculate_rest_compensation(Decimal::from(260), 0, 5, 1).unwrap();
/// assert_eq!(degenerate.amount, Decimal::ZERO);
/// assert!(degenerate.warning.is_some());
/// ```
pub fn calculate_rest_compensation(
    total_overtime_pay: Decimal,
    workdays: u32,
    paid_rest_days: u32,
    step_number: u32,
) -> EngineResult<RestCompensationResult> {
    let input = serde_json::json!({
        "total_overtime_pay": total_overtime_pay.normalize().to_string(),
        "workdays": workdays,
        "paid_rest_days": paid_rest_days
    });

    if workdays == 0 {
        return Ok(RestCompensationResult {
            amount: Decimal::ZERO,
            warning: Some(AuditWarning {
                code: WARNING_COMPUTATION_DEGENERATE.to_string(),
                message: "No workdays in the month; rest compensation set to zero".to_string(),
                severity: "medium".to_string(),
            }),
            audit_step: AuditStep {
                step_number,
                rule_id: "rest_compensation".to_string(),
                rule_name: "Weekly Rest Compensation".to_string(),
                input,
                output: serde_json::json!({ "amount": "0" }),
                reasoning: "No workdays to spread overtime over: 0".to_string(),
            },
        });
    }

    let daily_share = total_overtime_pay / Decimal::from(workdays);
    let amount = daily_share
        .checked_mul(Decimal::from(paid_rest_days))
        .ok_or_else(|| EngineError::invalid_input("total_overtime_pay", "is too large"))?;

    Ok(RestCompensationResult {
        amount,
        warning: None,
        audit_step: AuditStep {
            step_number,
            rule_id: "rest_compensation".to_string(),
            rule_name: "Weekly Rest Compensation".to_string(),
            input,
            output: serde_json::json!({
                "daily_share": daily_share.normalize().to_string(),
                "amount": amount.normalize().to_string()
            }),
            reasoning: format!(
                "{} / {} workdays × {} rest days = {}",
                total_overtime_pay.normalize(),
                workdays,
                paid_rest_days,
                amount.round_dp(2)
            ),
        },
    })
}
