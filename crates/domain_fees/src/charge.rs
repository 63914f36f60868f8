//! Charge computation
//!
//! Resolves a fee structure against a base amount into the charge to
//! post. Misconfigured structures fail loudly; a charge is never
//! silently defaulted to zero.

use core_kernel::{Money, Rate};
use rust_decimal_macros::dec;

use crate::error::FeeError;
use crate::fee::{CalculationMethod, FeeStructure};

/// Computes the charge for a fee structure against a base amount
///
/// - Fixed fees return the configured amount regardless of the base.
/// - Percentage fees apply the rate to the base and clamp the result to
///   `[minimum_fee, maximum_fee]`; the cap is unbounded when unset.
/// - Tiered fees have no defined semantics yet and are rejected.
pub fn compute_charge(fee: &FeeStructure, base_amount: Money) -> Result<Money, FeeError> {
    if !fee.is_active {
        return Err(FeeError::InactiveFee(fee.fee_name.clone()));
    }

    match fee.calculation_method {
        CalculationMethod::Fixed => fee.fixed_amount.ok_or_else(|| {
            FeeError::InvalidConfiguration {
                fee_name: fee.fee_name.clone(),
                reason: "fixed fee has no fixed_amount".to_string(),
            }
        }),
        CalculationMethod::Percentage => {
            let rate = fee
                .percentage_rate
                .ok_or_else(|| FeeError::InvalidConfiguration {
                    fee_name: fee.fee_name.clone(),
                    reason: "percentage fee has no percentage_rate".to_string(),
                })?;

            if rate < dec!(0) || rate > dec!(100) {
                return Err(FeeError::InvalidConfiguration {
                    fee_name: fee.fee_name.clone(),
                    reason: format!("percentage_rate {} outside [0, 100]", rate),
                });
            }

            let mut charge = Rate::from_percentage(rate)
                .apply(&base_amount)
                .round_to_currency();

            if let Some(minimum) = fee.minimum_fee {
                if charge.checked_sub(&minimum)?.is_negative() {
                    charge = minimum;
                }
            }
            if let Some(maximum) = fee.maximum_fee {
                charge = charge.min_of(&maximum)?;
            }

            Ok(charge)
        }
        CalculationMethod::Tiered => Err(FeeError::UnsupportedCalculation {
            fee_name: fee.fee_name.clone(),
            method: fee.calculation_method.as_str().to_string(),
        }),
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::fee::FeeType;
    use core_kernel::Currency;
    use proptest::prelude::*;
    use rust_decimal::Decimal;

    proptest! {
        #[test]
        fn percentage_charge_stays_within_bounds(
            base in 0i64..100_000_000i64,
            rate in 0u32..10_000u32,
            min in 0i64..10_000i64,
            span in 0i64..1_000_000i64,
        ) {
            let minimum = Money::from_minor(min, Currency::KES);
            let maximum = Money::from_minor(min + span, Currency::KES);
            let fee = FeeStructure::percentage(
                "Generated",
                FeeType::Loan,
                Decimal::new(rate as i64, 2),
            )
            .with_minimum(minimum)
            .with_maximum(maximum);

            let charge = compute_charge(&fee, Money::from_minor(base, Currency::KES)).unwrap();
            prop_assert!(charge >= minimum);
            prop_assert!(charge <= maximum);
        }
    }
}
