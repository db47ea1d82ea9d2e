//! Gross and net pay.

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};

/// `base_salary + overtime_pay_60 + overtime_pay_120 + rest_compensation`.
pub fn compute_gross(
    base_salary: Decimal,
    overtime_pay_60: Decimal,
    overtime_pay_120: Decimal,
    rest_compensation: Decimal,
) -> EngineResult<Decimal> {
    base_salary
        .checked_add(overtime_pay_60)
        .and_then(|sum| sum.checked_add(overtime_pay_120))
        .and_then(|sum| sum.checked_add(rest_compensation))
        .ok_or_else(|| EngineError::invalid_input("gross_pay", "is too large"))
}

/// `gross_pay - social_contribution - income_tax`.
///
/// Not clamped: deductions larger than gross pay give a negative figure.
pub fn compute_net_pay(
    gross_pay: Decimal,
    social_contribution: Decimal,
    income_tax: Decimal,
) -> EngineResult<Decimal> {
    gross_pay
        .checked_sub(social_contribution)
        .and_then(|net| net.checked_sub(income_tax))
        .ok_or_else(|| EngineError::invalid_input("net_pay", "is too large"))
}
