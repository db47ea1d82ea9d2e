//! Calculation result models for the payroll engine.
//!
//! This module contains the [`PayrollResult`] type and the audit structures
//! that record how each figure was derived.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{DayCounts, IncomeTaxBase, Period};

/// A single step in the audit trace recording a calculation decision.
///
/// Each step captures the input, output, and reasoning for a rule application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A warning generated during calculation.
///
/// Warnings flag figures that were recovered with a fallback value rather
/// than computed normally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level (e.g., "low", "medium", "high").
    pub severity: String,
}

/// Warning code for a zero denominator recovered as a zero amount.
pub const WARNING_COMPUTATION_DEGENERATE: &str = "COMPUTATION_DEGENERATE";

/// Warning code for overtime valued at zero under the lenient hours policy.
pub const WARNING_INVALID_HOURS_ZEROED: &str = "INVALID_HOURS_ZEROED";

/// The audit trail of a calculation.
///
/// # Example
///
/// ```
/// use payroll_engine::models::AuditTrace;
///
/// let trace = AuditTrace::default();
/// assert!(trace.steps.is_empty());
/// assert!(trace.warnings.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of calculation steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during calculation.
    pub warnings: Vec<AuditWarning>,
}

/// The complete result of one month's payroll calculation.
///
/// Amounts are kept at full precision; round them only for display.
/// `net_pay` is not clamped and may be negative when deductions exceed
/// gross pay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollResult {
    /// The month that was paid.
    pub period: Period,
    /// Classification of the month's days.
    pub day_counts: DayCounts,
    /// Monthly base salary.
    pub base_salary: Decimal,
    /// Overtime pay at the 60% premium.
    pub overtime_pay_60: Decimal,
    /// Overtime pay at the 120% premium.
    pub overtime_pay_120: Decimal,
    /// Sum of both overtime amounts.
    pub total_overtime_pay: Decimal,
    /// Weekly-rest compensation (DSR) over the overtime.
    pub rest_compensation: Decimal,
    /// Base salary plus overtime plus rest compensation.
    pub gross_pay: Decimal,
    /// Social-security contribution (INSS).
    pub social_contribution: Decimal,
    /// Salary figure used as the income-tax base.
    pub income_tax_base: IncomeTaxBase,
    /// Income tax withheld at source (IRRF).
    pub income_tax_withheld: Decimal,
    /// Gross pay minus both deductions.
    pub net_pay: Decimal,
    /// How each figure was derived.
    pub audit_trace: AuditTrace,
}
