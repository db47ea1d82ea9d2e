//! Property tests for the calculation components.

use proptest::prelude::*;
use rust_decimal::Decimal;

use payroll_engine::calculation::{
    HolidayCalendar, MemoizedCalendar, RuleCalendar, calculate_income_tax, calculate_payroll,
    calculate_rest_compensation, calculate_social_contribution, classify_month, value_overtime,
};
use payroll_engine::config::ConfigLoader;
use payroll_engine::models::{
    IncomeTaxBase, InvalidHoursPolicy, OvertimeRequest, PayrollInput, Period,
    WARNING_COMPUTATION_DEGENERATE,
};

fn loader() -> ConfigLoader {
    ConfigLoader::builtin().expect("builtin config")
}

/// Amounts in cents, 0.00 to 50,000.00.
fn amount() -> impl Strategy<Value = Decimal> {
    (0i64..5_000_000).prop_map(|cents| Decimal::new(cents, 2))
}

/// Hours in quarter-hour steps, 0 to 100.
fn hours() -> impl Strategy<Value = Decimal> {
    (0i64..400).prop_map(|quarters| Decimal::new(quarters * 25, 2))
}

proptest! {
    #[test]
    fn day_buckets_cover_the_month(year in 1950i32..=2099, month in 1u32..=12) {
        let calendar = loader().calendar();
        let period = Period::new(year, month).unwrap();

        let counts = classify_month(period, &calendar, 1).unwrap().day_counts;
        prop_assert_eq!(counts.total_days(), period.day_count().unwrap());
        prop_assert_eq!(counts.paid_rest_days(), counts.sundays + counts.holidays);
    }

    #[test]
    fn memoized_calendar_agrees_with_rules(year in 1950i32..=2099) {
        let rules = loader().calendar();
        let memoized = MemoizedCalendar::new(loader().calendar());

        let expected = rules.holidays_in_year(year).unwrap();
        prop_assert_eq!(memoized.holidays_in_year(year).unwrap(), expected.clone());
        prop_assert_eq!(memoized.holidays_in_year(year).unwrap(), expected);
    }

    #[test]
    fn zero_premium_pays_normal_rate(salary in amount(), worked in hours(), contracted in 1i64..400) {
        let contracted = Decimal::from(contracted);
        let request = OvertimeRequest {
            base_salary: salary,
            contracted_monthly_hours: contracted,
            premium_percent: Decimal::ZERO,
            hours_worked: worked,
        };

        let valuation = value_overtime(&request, InvalidHoursPolicy::Reject, 1).unwrap();
        prop_assert_eq!(valuation.amount, salary / contracted * worked);
    }

    #[test]
    fn zero_hours_pay_nothing(salary in amount(), premium in 0i64..300) {
        let request = OvertimeRequest {
            base_salary: salary,
            contracted_monthly_hours: Decimal::from(200),
            premium_percent: Decimal::from(premium),
            hours_worked: Decimal::ZERO,
        };

        let valuation = value_overtime(&request, InvalidHoursPolicy::Reject, 1).unwrap();
        prop_assert_eq!(valuation.amount, Decimal::ZERO);
    }

    #[test]
    fn zero_workdays_give_zero_rest_compensation(total in amount(), rest_days in 0u32..31) {
        let result = calculate_rest_compensation(total, 0, rest_days, 1).unwrap();
        prop_assert_eq!(result.amount, Decimal::ZERO);
        prop_assert_eq!(
            result.warning.map(|w| w.code),
            Some(WARNING_COMPUTATION_DEGENERATE.to_string())
        );
    }

    #[test]
    fn income_tax_exempt_at_or_below_first_bound(cents in 0i64..=225_920) {
        let loader = loader();
        let taxable = Decimal::new(cents, 2);

        let result = calculate_income_tax(
            taxable,
            Decimal::ZERO,
            IncomeTaxBase::BaseSalary,
            loader.config().income_tax(),
            1,
        )
        .unwrap();
        prop_assert_eq!(result.amount, Decimal::ZERO);
    }

    #[test]
    fn social_contribution_never_exceeds_cap(gross in amount()) {
        let loader = loader();
        let schedule = loader.config().social_contribution();

        let result = calculate_social_contribution(gross, schedule, 1).unwrap();
        prop_assert!(result.amount >= Decimal::ZERO);
        prop_assert!(result.amount <= Decimal::new(9292628, 4));
    }

    #[test]
    fn payroll_is_consistent_and_repeatable(
        month in 1u32..=12,
        year in 2000i32..=2030,
        salary in amount(),
        hours_60 in hours(),
        hours_120 in hours(),
    ) {
        let loader = loader();
        let calendar = loader.calendar();
        let input = PayrollInput::new(
            Period::new(year, month).unwrap(),
            salary,
            hours_60,
            hours_120,
            IncomeTaxBase::GrossPay,
        );

        let result = calculate_payroll(&input, loader.config(), &calendar).unwrap();
        prop_assert_eq!(
            result.gross_pay,
            result.base_salary + result.total_overtime_pay + result.rest_compensation
        );
        prop_assert_eq!(
            result.net_pay,
            result.gross_pay - result.social_contribution - result.income_tax_withheld
        );
        prop_assert_eq!(result.audit_trace.steps.len(), 8);

        let again = calculate_payroll(&input, loader.config(), &calendar).unwrap();
        prop_assert_eq!(result, again);
    }
}

#[test]
fn rule_calendar_is_shareable_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<RuleCalendar>();
    assert_send_sync::<MemoizedCalendar<RuleCalendar>>();
}
