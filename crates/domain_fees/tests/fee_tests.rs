//! Comprehensive tests for domain_fees

use chrono::NaiveDate;
use rust_decimal_macros::dec;

use core_kernel::{Currency, Money};
use domain_fees::{compute_charge, CalculationMethod, FeeError, FeeFrequency, FeeType};
use test_utils::{assert_money_approx_eq, FeeStructureBuilder};

fn kes(amount: rust_decimal::Decimal) -> Money {
    Money::new(amount, Currency::KES)
}

// ============================================================================
// Charge Computation Tests
// ============================================================================

mod charge_tests {
    use super::*;

    #[test]
    fn test_percentage_clamping_triple() {
        // 5% with floor 10 and cap 100
        let fee = FeeStructureBuilder::new()
            .percentage(dec!(5))
            .with_minimum(kes(dec!(10)))
            .with_maximum(kes(dec!(100)))
            .build();

        // 5% of 5000 is 250, capped at 100
        assert_eq!(compute_charge(&fee, kes(dec!(5000))).unwrap(), kes(dec!(100)));
        // 5% of 50 is 2.50, floored at 10
        assert_eq!(compute_charge(&fee, kes(dec!(50))).unwrap(), kes(dec!(10)));
        // 5% of 1000 is 50, inside the bounds
        assert_eq!(compute_charge(&fee, kes(dec!(1000))).unwrap(), kes(dec!(50)));
    }

    #[test]
    fn test_fixed_fee_is_base_independent() {
        let fee = FeeStructureBuilder::new()
            .with_name("Statement fee")
            .with_fee_type(FeeType::Account)
            .fixed(kes(dec!(75)))
            .build();

        for base in [dec!(1), dec!(10_000), dec!(5_000_000)] {
            assert_eq!(compute_charge(&fee, kes(base)).unwrap(), kes(dec!(75)));
        }
    }

    #[test]
    fn test_inactive_fee_rejected() {
        let fee = FeeStructureBuilder::new().inactive().build();

        assert!(matches!(
            compute_charge(&fee, kes(dec!(1000))),
            Err(FeeError::InactiveFee(_))
        ));
    }

    #[test]
    fn test_tiered_method_is_an_explicit_error() {
        let mut fee = FeeStructureBuilder::new().build();
        fee.calculation_method = CalculationMethod::Tiered;

        match compute_charge(&fee, kes(dec!(1000))) {
            Err(FeeError::UnsupportedCalculation { method, .. }) => {
                assert_eq!(method, "tiered");
            }
            other => panic!("expected UnsupportedCalculation, got {:?}", other),
        }
    }

    #[test]
    fn test_charge_rounds_to_currency_scale() {
        let fee = FeeStructureBuilder::new().percentage(dec!(1.375)).build();

        let charge = compute_charge(&fee, kes(dec!(333))).unwrap();
        // 1.375% of 333 = 4.57875, rounded at two decimal places
        assert_money_approx_eq(&charge, &kes(dec!(4.58)), dec!(0.005));
    }

    #[test]
    fn test_zero_decimal_currency_charge() {
        let fee = FeeStructureBuilder::new().percentage(dec!(2.5)).build();

        let charge = compute_charge(&fee, Money::new(dec!(10_001), Currency::UGX)).unwrap();
        // 2.5% of 10001 = 250.025, rounded to whole shillings
        assert_eq!(charge, Money::new(dec!(250), Currency::UGX));
    }
}

// ============================================================================
// Frequency Tests
// ============================================================================

mod frequency_tests {
    use super::*;

    #[test]
    fn test_periods_per_year() {
        assert_eq!(FeeFrequency::Daily.periods_per_year(), 365);
        assert_eq!(FeeFrequency::Weekly.periods_per_year(), 52);
        assert_eq!(FeeFrequency::Monthly.periods_per_year(), 12);
        assert_eq!(FeeFrequency::Quarterly.periods_per_year(), 4);
        assert_eq!(FeeFrequency::Annual.periods_per_year(), 1);
    }

    #[test]
    fn test_next_due_dates_advance() {
        let from = NaiveDate::from_ymd_opt(2025, 6, 10).unwrap();

        assert_eq!(
            FeeFrequency::Daily.next_due_date(from),
            NaiveDate::from_ymd_opt(2025, 6, 11).unwrap()
        );
        assert_eq!(
            FeeFrequency::Weekly.next_due_date(from),
            NaiveDate::from_ymd_opt(2025, 6, 17).unwrap()
        );
        assert_eq!(
            FeeFrequency::Monthly.next_due_date(from),
            NaiveDate::from_ymd_opt(2025, 7, 10).unwrap()
        );
        assert_eq!(
            FeeFrequency::Annual.next_due_date(from),
            NaiveDate::from_ymd_opt(2026, 6, 10).unwrap()
        );
        assert_eq!(FeeFrequency::OneTime.next_due_date(from), from);
    }
}
