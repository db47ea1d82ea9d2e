//! Social-security contribution (INSS).

use rust_decimal::Decimal;

use crate::config::BracketSchedule;
use crate::error::EngineResult;
use crate::models::AuditStep;

use super::brackets::{DeductionResult, evaluate_schedule};

/// Calculates the social contribution owed on `gross_pay`.
///
/// The schedule is applied to the gross amount directly; above the last
/// bound the contribution is fixed at the ceiling's value.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::calculate_social_contribution;
/// use payroll_engine::config::ConfigLoader;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let loader = ConfigLoader::builtin().unwrap();
/// let schedule = loader.config().social_contribution();
///
/// let result = calculate_social_contribution(Decimal::from_str("1412.00").unwrap(), schedule, 1).unwrap();
/// assert_eq!(result.amount, Decimal::from_str("105.90").unwrap());
///
/// // Capped at 7786.02 * 0.14 - 160.78
/// let result = calculate_social_contribution(Decimal::from(20000), schedule, 1).unwrap();
/// assert_eq!(result.amount, Decimal::from_str("929.2628").unwrap());
/// ```
pub fn calculate_social_contribution(
    gross_pay: Decimal,
    schedule: &BracketSchedule,
    step_number: u32,
) -> EngineResult<DeductionResult> {
    let evaluation = evaluate_schedule(schedule, gross_pay)?;

    let reasoning = if evaluation.capped {
        format!(
            "{} capped: {} exceeds ceiling; {} × {} - {} = {}",
            schedule.name,
            gross_pay.round_dp(2),
            evaluation.evaluated_at.normalize(),
            evaluation.rate.normalize(),
            evaluation.deduction.normalize(),
            evaluation.amount.round_dp(2)
        )
    } else {
        format!(
            "{} bracket {}: {} × {} - {} = {}",
            schedule.name,
            evaluation.bracket_index + 1,
            gross_pay.round_dp(2),
            evaluation.rate.normalize(),
            evaluation.deduction.normalize(),
            evaluation.amount.round_dp(2)
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "social_contribution".to_string(),
        rule_name: "Social Security Contribution".to_string(),
        input: serde_json::json!({
            "gross_pay": gross_pay.normalize().to_string()
        }),
        output: serde_json::json!({
            "bracket": evaluation.bracket_index + 1,
            "rate": evaluation.rate.normalize().to_string(),
            "deduction": evaluation.deduction.normalize().to_string(),
            "capped": evaluation.capped,
            "amount": evaluation.amount.normalize().to_string()
        }),
        reasoning,
    };

    Ok(DeductionResult {
        amount: evaluation.amount,
        base: gross_pay,
        evaluation,
        audit_step,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::find_discontinuities;
    use crate::config::Bracket;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn social_contribution_schedule() -> BracketSchedule {
        let bracket = |up_to: &str, rate: &str, deduction: &str| Bracket {
            up_to: Some(dec(up_to)),
            rate: dec(rate),
            deduction: dec(deduction),
        };
        BracketSchedule {
            name: "INSS".to_string(),
            brackets: vec![
                bracket("1412.00", "0.075", "0"),
                bracket("2666.64", "0.09", "21.18"),
                bracket("4000.39", "0.12", "80.38"),
                bracket("7786.02", "0.14", "160.78"),
            ],
        }
    }

    fn contribution(gross: &str) -> Decimal {
        calculate_social_contribution(dec(gross), &social_contribution_schedule(), 1)
            .unwrap()
            .amount
    }

    #[test]
    fn test_first_bracket() {
        assert_eq!(contribution("1000.00"), dec("75.00"));
    }

    #[test]
    fn test_second_bracket() {
        // 2000 * 0.09 - 21.18 = 158.82
        assert_eq!(contribution("2000.00"), dec("158.82"));
    }

    #[test]
    fn test_third_bracket_may_2025_gross() {
        let gross = dec("3691.961538461538461538461538");
        let amount = calculate_social_contribution(gross, &social_contribution_schedule(), 1)
            .unwrap()
            .amount;
        assert_eq!(amount.round_dp(2), dec("362.66"));
    }

    #[test]
    fn test_fourth_bracket() {
        // 5000 * 0.14 - 160.78 = 539.22
        assert_eq!(contribution("5000.00"), dec("539.22"));
    }

    #[test]
    fn test_at_ceiling_and_above_are_equal() {
        assert_eq!(contribution("7786.02"), dec("929.2628"));
        assert_eq!(contribution("7786.03"), dec("929.2628"));
        assert_eq!(contribution("15000"), dec("929.2628"));
    }

    #[test]
    fn test_capped_audit_step() {
        let result =
            calculate_social_contribution(dec("15000"), &social_contribution_schedule(), 7).unwrap();
        assert_eq!(result.audit_step.step_number, 7);
        assert_eq!(result.audit_step.output["capped"], true);
        assert!(result.evaluation.capped);
        assert_eq!(result.base, dec("15000"));
    }

    #[test]
    fn test_zero_gross_zero_contribution() {
        assert_eq!(contribution("0"), Decimal::ZERO);
    }

    #[test]
    fn test_continuous_at_first_bound() {
        let schedule = social_contribution_schedule();
        let bound = dec("1412.00");
        let below = schedule.brackets[0].rate * bound - schedule.brackets[0].deduction;
        let above = schedule.brackets[1].rate * bound - schedule.brackets[1].deduction;
        assert_eq!(below, above);
    }

    #[test]
    fn test_table_jumps_at_upper_bounds() {
        let found = find_discontinuities(&social_contribution_schedule(), dec("0.01"));
        let bounds: Vec<Decimal> = found.iter().map(|d| d.bound).collect();
        assert_eq!(bounds, vec![dec("2666.64"), dec("4000.39")]);
        // 2666.64 * 0.12 - 80.38 vs 2666.64 * 0.09 - 21.18
        assert_eq!(found[0].gap(), dec("20.7992"));
        assert_eq!(found[1].gap(), dec("-0.392200"));
    }
}
