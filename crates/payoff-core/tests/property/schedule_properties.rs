use chrono::NaiveDate;
use payoff_core::amortization::scenario::{compute_scenario, ScenarioInput};
use payoff_core::LoanTerms;
use proptest::prelude::*;
use rust_decimal::Decimal;

fn scenario_input(principal: u32, rate_bp: u32, term: u32, extra: u32, start: NaiveDate) -> ScenarioInput {
    ScenarioInput {
        loan: LoanTerms {
            principal: Decimal::from(principal),
            annual_rate_percent: Decimal::new(rate_bp as i64, 2),
            term_years: term,
            start_date: start,
        },
        additional_monthly_payment: Decimal::from(extra),
    }
}

fn as_of() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn schedules_are_well_formed(
        principal in 5_000u32..1_500_000,
        rate_bp in 50u32..1_500,
        term in 1u32..=40,
        extra in 0u32..5_000,
        months_back in 0u32..600,
    ) {
        let start = as_of() - chrono::Months::new(months_back);
        let r = compute_scenario(&scenario_input(principal, rate_bp, term, extra, start), as_of()).unwrap();

        for schedule in [&r.baseline_schedule, &r.accelerated_schedule] {
            for p in schedule.iter() {
                prop_assert_eq!(p.payment_amount, p.principal_portion + p.interest_portion);
                prop_assert!(p.remaining_balance >= Decimal::ZERO);
            }
            for w in schedule.windows(2) {
                prop_assert!(w[1].remaining_balance <= w[0].remaining_balance);
            }
            if let Some(last) = schedule.last() {
                prop_assert!(last.remaining_balance < Decimal::ONE);
            }
        }

        prop_assert!(r.accelerated_schedule.len() <= r.baseline_schedule.len());
        prop_assert!(r.accelerated_total_interest <= r.baseline_total_interest);
        prop_assert!(r.interest_saved >= Decimal::ZERO);
        if extra == 0 {
            prop_assert_eq!(&r.baseline_schedule, &r.accelerated_schedule);
            prop_assert_eq!(r.months_saved, 0);
        }
    }

    #[test]
    fn paid_off_when_term_elapsed(
        term in 1u32..=30,
        extra_years in 0u32..20,
    ) {
        let start = as_of() - chrono::Months::new((term + extra_years) * 12);
        let r = compute_scenario(&scenario_input(250_000, 550, term, 100, start), as_of()).unwrap();
        prop_assert!(r.is_already_paid_off);
        prop_assert_eq!(r.current_balance, Decimal::ZERO);
        prop_assert!(r.baseline_schedule.is_empty());
    }

    #[test]
    fn scenario_is_deterministic(
        principal in 10_000u32..800_000,
        extra in 0u32..1_000,
        months_back in 0u32..200,
    ) {
        let start = as_of() - chrono::Months::new(months_back);
        let input = scenario_input(principal, 625, 25, extra, start);
        let a = compute_scenario(&input, as_of()).unwrap();
        let b = compute_scenario(&input, as_of()).unwrap();
        prop_assert_eq!(a, b);
    }
}
