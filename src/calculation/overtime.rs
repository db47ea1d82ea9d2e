//! Overtime valuation.
//!
//! Overtime hours are paid at the normal hour rate (`base_salary /
//! contracted_monthly_hours`) raised by a premium percentage.

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::{
    AuditStep, AuditWarning, InvalidHoursPolicy, OvertimeRequest, WARNING_INVALID_HOURS_ZEROED,
};

/// The result of an overtime valuation.
#[derive(Debug, Clone)]
pub struct OvertimeValuation {
    /// Overtime pay for the requested hours.
    pub amount: Decimal,
    /// The normal hour rate (zero when the hours were zeroed).
    pub normal_hour_rate: Decimal,
    /// The premium hour rate (zero when the hours were zeroed).
    pub premium_hour_rate: Decimal,
    /// Set when the lenient policy replaced unusable hours with zero pay.
    pub warning: Option<AuditWarning>,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Values overtime hours at one premium rate.
///
/// `amount = (base_salary / contracted_monthly_hours) * (1 + premium_percent / 100) * hours_worked`
///
/// # Errors
///
/// A negative base salary or premium is always rejected, as is a figure so
/// large the pay cannot be represented. Non-positive
/// contracted hours or negative overtime hours are rejected under
/// [`InvalidHoursPolicy::Reject`]; under [`InvalidHoursPolicy::Zero`] the
/// overtime is valued at zero and a warning is attached instead.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::value_overtime;
/// use payroll_engine::models::{InvalidHoursPolicy, OvertimeRequest};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let request = OvertimeRequest {
///     base_salary: Decimal::from_str("3500.00").unwrap(),
///     contracted_monthly_hours: Decimal::from(200),
///     premium_percent: Decimal::from(60),
///     hours_worked: Decimal::from(3),
/// };
/// let valuation = value_overtime(&request, InvalidHoursPolicy::Reject, 1).unwrap();
/// // 3 hours * (3500 / 200) * 1.6 = 84.00
/// assert_eq!(valuation.amount, Decimal::from(84));
/// ```
pub fn value_overtime(
    request: &OvertimeRequest,
    policy: InvalidHoursPolicy,
    step_number: u32,
) -> EngineResult<OvertimeValuation> {
    if request.base_salary < Decimal::ZERO {
        return Err(EngineError::invalid_input(
            "base_salary",
            "cannot be negative",
        ));
    }
    if request.premium_percent < Decimal::ZERO {
        return Err(EngineError::invalid_input(
            "premium_percent",
            "cannot be negative",
        ));
    }

    let rule_id = format!("overtime_{}", request.premium_percent.normalize());
    let rule_name = format!("Overtime at {}%", request.premium_percent.normalize());
    let input = serde_json::json!({
        "base_salary": request.base_salary.normalize().to_string(),
        "contracted_monthly_hours": request.contracted_monthly_hours.normalize().to_string(),
        "premium_percent": request.premium_percent.normalize().to_string(),
        "hours_worked": request.hours_worked.normalize().to_string()
    });

    if let Some((field, message)) = unusable_hours(request) {
        return match policy {
            InvalidHoursPolicy::Reject => Err(EngineError::invalid_input(field, message)),
            InvalidHoursPolicy::Zero => Ok(OvertimeValuation {
                amount: Decimal::ZERO,
                normal_hour_rate: Decimal::ZERO,
                premium_hour_rate: Decimal::ZERO,
                warning: Some(AuditWarning {
                    code: WARNING_INVALID_HOURS_ZEROED.to_string(),
                    message: format!("{} {}; overtime valued at zero", field, message),
                    severity: "high".to_string(),
                }),
                audit_step: AuditStep {
                    step_number,
                    rule_id,
                    rule_name,
                    input,
                    output: serde_json::json!({ "amount": "0" }),
                    reasoning: format!("{} {}: overtime valued at zero", field, message),
                },
            }),
        };
    }

    let normal_hour_rate = request.normal_hour_rate()?;
    let premium_hour_rate = request.premium_hour_rate()?;
    let amount = premium_hour_rate
        .checked_mul(request.hours_worked)
        .ok_or_else(|| EngineError::invalid_input("hours_worked", "is too large"))?;

    let audit_step = AuditStep {
        step_number,
        rule_id,
        rule_name,
        input,
        output: serde_json::json!({
            "normal_hour_rate": normal_hour_rate.normalize().to_string(),
            "premium_hour_rate": premium_hour_rate.normalize().to_string(),
            "amount": amount.normalize().to_string()
        }),
        reasoning: format!(
            "{} hours × {} × {} = {}",
            request.hours_worked.normalize(),
            normal_hour_rate.normalize(),
            (Decimal::ONE + request.premium_percent / Decimal::ONE_HUNDRED).normalize(),
            amount.normalize()
        ),
    };

    Ok(OvertimeValuation {
        amount,
        normal_hour_rate,
        premium_hour_rate,
        warning: None,
        audit_step,
    })
}

fn unusable_hours(request: &OvertimeRequest) -> Option<(&'static str, &'static str)> {
    if request.contracted_monthly_hours <= Decimal::ZERO {
        Some(("contracted_monthly_hours", "must be greater than zero"))
    } else if request.hours_worked < Decimal::ZERO {
        Some(("hours_worked", "cannot be negative"))
    } else {
        None
    }
}
