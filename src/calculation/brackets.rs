//! Progressive bracket evaluation.
//!
//! Each bracket carries its own deduction, so the amount owed is a single
//! `rate * amount - deduction` over the whole amount rather than a sum of
//! marginal slices.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::BracketSchedule;
use crate::error::{EngineError, EngineResult};
use crate::models::AuditStep;

/// The result of a bracket-based deduction, including the audit step.
#[derive(Debug, Clone)]
pub struct DeductionResult {
    /// The deducted amount.
    pub amount: Decimal,
    /// The figure the schedule was applied to.
    pub base: Decimal,
    /// The bracket that applied.
    pub evaluation: BracketEvaluation,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Which bracket applied to an amount and what it produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketEvaluation {
    /// Zero-based index of the applied bracket.
    pub bracket_index: usize,
    /// Rate of the applied bracket.
    pub rate: Decimal,
    /// Deduction of the applied bracket.
    pub deduction: Decimal,
    /// The amount the formula was evaluated at (the ceiling when capped).
    pub evaluated_at: Decimal,
    /// Whether the amount exceeded the schedule's ceiling.
    pub capped: bool,
    /// `rate * evaluated_at - deduction`.
    pub amount: Decimal,
}

/// A jump in a schedule's output at a bracket bound.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Discontinuity {
    /// The bound where the brackets meet.
    pub bound: Decimal,
    /// Output of the lower bracket at the bound.
    pub below: Decimal,
    /// Output of the upper bracket at the bound.
    pub above: Decimal,
}

impl Discontinuity {
    /// `above - below`.
    pub fn gap(&self) -> Decimal {
        self.above - self.below
    }
}

/// Evaluates `amount` against `schedule`.
///
/// Bounds are inclusive. Amounts above the last bound of a capped schedule
/// are evaluated at that bound. An amount whose deduction cannot be
/// represented is an [`EngineError::InvalidInput`].
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::evaluate_schedule;
/// use payroll_engine::config::{Bracket, BracketSchedule};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let dec = |s: &str| Decimal::from_str(s).unwrap();
/// let schedule = BracketSchedule {
///     name: "INSS".to_string(),
///     brackets: vec![
///         Bracket { up_to: Some(dec("1412.00")), rate: dec("0.075"), deduction: dec("0") },
///         Bracket { up_to: Some(dec("2666.64")), rate: dec("0.09"), deduction: dec("21.18") },
///     ],
/// };
///
/// let low = evaluate_schedule(&schedule, dec("1000")).unwrap();
/// assert_eq!(low.amount, dec("75"));
///
/// let capped = evaluate_schedule(&schedule, dec("5000")).unwrap();
/// assert!(capped.capped);
/// assert_eq!(capped.evaluated_at, dec("2666.64"));
/// ```
pub fn evaluate_schedule(schedule: &BracketSchedule, amount: Decimal) -> EngineResult<BracketEvaluation> {
    let position = schedule
        .brackets
        .iter()
        .position(|b| b.up_to.is_none_or(|bound| amount <= bound));

    let (bracket_index, evaluated_at, capped) = match position {
        Some(index) => (index, amount, false),
        None => {
            let ceiling = schedule.ceiling().ok_or_else(|| EngineError::InvalidConfig {
                message: format!("schedule '{}' has no brackets", schedule.name),
            })?;
            (schedule.brackets.len() - 1, ceiling, true)
        }
    };

    let bracket = &schedule.brackets[bracket_index];
    let amount = bracket
        .rate
        .checked_mul(evaluated_at)
        .and_then(|owed| owed.checked_sub(bracket.deduction))
        .ok_or_else(|| {
            EngineError::invalid_input(schedule.name.as_str(), "base amount is too large")
        })?;

    Ok(BracketEvaluation {
        bracket_index,
        rate: bracket.rate,
        deduction: bracket.deduction,
        evaluated_at,
        capped,
        amount,
    })
}

/// Checks that a schedule can be evaluated.
///
/// A schedule needs at least one bracket, strictly ascending bounds, and at
/// most one open-ended bracket, placed last.
pub fn validate_schedule(schedule: &BracketSchedule) -> EngineResult<()> {
    let invalid = |message: String| EngineError::InvalidConfig {
        message: format!("schedule '{}': {}", schedule.name, message),
    };

    if schedule.brackets.is_empty() {
        return Err(invalid("has no brackets".to_string()));
    }

    let mut previous: Option<Decimal> = None;
    for (index, bracket) in schedule.brackets.iter().enumerate() {
        if bracket.rate < Decimal::ZERO {
            return Err(invalid(format!("bracket {} has a negative rate", index + 1)));
        }
        match bracket.up_to {
            None if index + 1 != schedule.brackets.len() => {
                return Err(invalid(format!(
                    "open-ended bracket {} must be the last one",
                    index + 1
                )));
            }
            None => {}
            Some(bound) => {
                if previous.is_some_and(|p| bound <= p) {
                    return Err(invalid(format!(
                        "bracket {} bound {} does not ascend",
                        index + 1,
                        bound
                    )));
                }
                previous = Some(bound);
            }
        }
    }

    Ok(())
}

/// Lists the bounds where adjacent brackets disagree by more than `tolerance`.
pub fn find_discontinuities(schedule: &BracketSchedule, tolerance: Decimal) -> Vec<Discontinuity> {
    schedule
        .brackets
        .windows(2)
        .filter_map(|pair| {
            let bound = pair[0].up_to?;
            let discontinuity = Discontinuity {
                bound,
                below: pair[0].rate * bound - pair[0].deduction,
                above: pair[1].rate * bound - pair[1].deduction,
            };
            (discontinuity.gap().abs() > tolerance).then_some(discontinuity)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Bracket;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn bracket(up_to: Option<&str>, rate: &str, deduction: &str) -> Bracket {
        Bracket {
            up_to: up_to.map(dec),
            rate: dec(rate),
            deduction: dec(deduction),
        }
    }

    fn income_tax_schedule() -> BracketSchedule {
        BracketSchedule {
            name: "IRRF".to_string(),
            brackets: vec![
                bracket(Some("2259.20"), "0", "0"),
                bracket(Some("2826.65"), "0.075", "169.44"),
                bracket(Some("3751.05"), "0.15", "381.44"),
                bracket(Some("4664.68"), "0.225", "662.77"),
                bracket(None, "0.275", "896.00"),
            ],
        }
    }

    #[test]
    fn test_bound_is_inclusive() {
        let evaluation = evaluate_schedule(&income_tax_schedule(), dec("2259.20")).unwrap();
        assert_eq!(evaluation.bracket_index, 0);
        assert_eq!(evaluation.amount, Decimal::ZERO);
    }

    #[test]
    fn test_open_ended_bracket_never_caps() {
        let evaluation = evaluate_schedule(&income_tax_schedule(), dec("100000")).unwrap();
        assert_eq!(evaluation.bracket_index, 4);
        assert!(!evaluation.capped);
        assert_eq!(evaluation.amount, dec("26604.00"));
    }

    #[test]
    fn test_unrepresentable_amount_is_invalid_input() {
        let schedule = BracketSchedule {
            name: "STEEP".to_string(),
            brackets: vec![bracket(None, "2", "0")],
        };
        let err = evaluate_schedule(&schedule, Decimal::MAX).unwrap_err();
        assert!(matches!(err, EngineError::InvalidInput { ref field, .. } if field == "STEEP"));
    }

    #[test]
    fn test_empty_schedule_is_invalid() {
        let schedule = BracketSchedule {
            name: "EMPTY".to_string(),
            brackets: vec![],
        };
        assert!(evaluate_schedule(&schedule, dec("10")).is_err());
        assert!(validate_schedule(&schedule).is_err());
    }

    #[test]
    fn test_validate_accepts_shipped_shape() {
        assert!(validate_schedule(&income_tax_schedule()).is_ok());
    }

    #[test]
    fn test_validate_rejects_descending_bounds() {
        let schedule = BracketSchedule {
            name: "BAD".to_string(),
            brackets: vec![
                bracket(Some("2000"), "0.1", "0"),
                bracket(Some("1000"), "0.2", "100"),
            ],
        };
        let err = validate_schedule(&schedule).unwrap_err();
        assert!(err.to_string().contains("does not ascend"));
    }

    #[test]
    fn test_validate_rejects_open_bracket_in_middle() {
        let schedule = BracketSchedule {
            name: "BAD".to_string(),
            brackets: vec![
                bracket(None, "0.1", "0"),
                bracket(Some("1000"), "0.2", "100"),
            ],
        };
        let err = validate_schedule(&schedule).unwrap_err();
        assert!(err.to_string().contains("must be the last one"));
    }

    #[test]
    fn test_income_tax_schedule_continuous_within_a_cent() {
        assert!(find_discontinuities(&income_tax_schedule(), dec("0.01")).is_empty());
    }

    #[test]
    fn test_discontinuity_reports_gap() {
        let schedule = BracketSchedule {
            name: "JUMP".to_string(),
            brackets: vec![
                bracket(Some("100"), "0.1", "0"),
                bracket(None, "0.2", "5"),
            ],
        };
        let found = find_discontinuities(&schedule, dec("0.01"));
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].bound, dec("100"));
        assert_eq!(found[0].below, dec("10"));
        assert_eq!(found[0].above, dec("15"));
        assert_eq!(found[0].gap(), dec("5"));
    }
}
