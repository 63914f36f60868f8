//! Fee structure value objects
//!
//! A fee structure describes how a charge is computed: a flat amount or a
//! percentage of the base, with optional floor and cap, applied on a
//! recurrence schedule.

use chrono::{Datelike, Duration, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::{FeeStructureId, Money};

/// What kind of product the fee attaches to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeeType {
    Loan,
    Savings,
    Account,
    Transaction,
}

/// How the charge amount is derived from the base amount
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalculationMethod {
    /// Flat amount regardless of the base
    Fixed,
    /// Percentage of the base, clamped to the configured bounds
    Percentage,
    /// Band-based calculation; semantics not yet defined
    Tiered,
}

impl CalculationMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            CalculationMethod::Fixed => "fixed",
            CalculationMethod::Percentage => "percentage",
            CalculationMethod::Tiered => "tiered",
        }
    }
}

/// How often a recurring fee is assessed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeeFrequency {
    OneTime,
    Daily,
    Weekly,
    Monthly,
    Quarterly,
    Annual,
}

impl FeeFrequency {
    /// Returns the number of assessments per year
    pub fn periods_per_year(&self) -> u32 {
        match self {
            FeeFrequency::OneTime => 1,
            FeeFrequency::Daily => 365,
            FeeFrequency::Weekly => 52,
            FeeFrequency::Monthly => 12,
            FeeFrequency::Quarterly => 4,
            FeeFrequency::Annual => 1,
        }
    }

    /// Calculates the next assessment date from a given date
    pub fn next_due_date(&self, from_date: NaiveDate) -> NaiveDate {
        match self {
            FeeFrequency::OneTime => from_date,
            FeeFrequency::Daily => from_date + Duration::days(1),
            FeeFrequency::Weekly => from_date + Duration::days(7),
            FeeFrequency::Monthly => {
                let next_month = if from_date.month() == 12 {
                    NaiveDate::from_ymd_opt(from_date.year() + 1, 1, from_date.day())
                } else {
                    NaiveDate::from_ymd_opt(from_date.year(), from_date.month() + 1, from_date.day())
                };
                next_month.unwrap_or(from_date + Duration::days(30))
            }
            FeeFrequency::Quarterly => from_date + Duration::days(91),
            FeeFrequency::Annual => {
                NaiveDate::from_ymd_opt(from_date.year() + 1, from_date.month(), from_date.day())
                    .unwrap_or(from_date + Duration::days(365))
            }
        }
    }
}

/// A configured fee
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeeStructure {
    /// Unique identifier
    pub id: FeeStructureId,
    /// Display name
    pub fee_name: String,
    /// Product the fee attaches to
    pub fee_type: FeeType,
    /// Charge derivation method
    pub calculation_method: CalculationMethod,
    /// Flat amount, for fixed fees
    pub fixed_amount: Option<Money>,
    /// Rate in percent (0 to 100), for percentage fees
    pub percentage_rate: Option<Decimal>,
    /// Floor applied to percentage charges
    pub minimum_fee: Option<Money>,
    /// Cap applied to percentage charges; unbounded when unset
    pub maximum_fee: Option<Money>,
    /// Assessment schedule
    pub frequency: FeeFrequency,
    /// Whether the fee may be charged
    pub is_active: bool,
}

impl FeeStructure {
    /// Creates a fixed fee
    pub fn fixed(fee_name: impl Into<String>, fee_type: FeeType, amount: Money) -> Self {
        Self {
            id: FeeStructureId::new_v7(),
            fee_name: fee_name.into(),
            fee_type,
            calculation_method: CalculationMethod::Fixed,
            fixed_amount: Some(amount),
            percentage_rate: None,
            minimum_fee: None,
            maximum_fee: None,
            frequency: FeeFrequency::OneTime,
            is_active: true,
        }
    }

    /// Creates a percentage fee
    pub fn percentage(fee_name: impl Into<String>, fee_type: FeeType, rate: Decimal) -> Self {
        Self {
            id: FeeStructureId::new_v7(),
            fee_name: fee_name.into(),
            fee_type,
            calculation_method: CalculationMethod::Percentage,
            fixed_amount: None,
            percentage_rate: Some(rate),
            minimum_fee: None,
            maximum_fee: None,
            frequency: FeeFrequency::OneTime,
            is_active: true,
        }
    }

    /// Sets the minimum charge
    pub fn with_minimum(mut self, minimum: Money) -> Self {
        self.minimum_fee = Some(minimum);
        self
    }

    /// Sets the maximum charge
    pub fn with_maximum(mut self, maximum: Money) -> Self {
        self.maximum_fee = Some(maximum);
        self
    }

    /// Sets the assessment schedule
    pub fn with_frequency(mut self, frequency: FeeFrequency) -> Self {
        self.frequency = frequency;
        self
    }

    /// Deactivates the fee
    pub fn deactivated(mut self) -> Self {
        self.is_active = false;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::Currency;
    use rust_decimal_macros::dec;

    #[test]
    fn test_fixed_fee_constructor() {
        let fee = FeeStructure::fixed(
            "Loan processing fee",
            FeeType::Loan,
            Money::new(dec!(500), Currency::KES),
        );

        assert_eq!(fee.calculation_method, CalculationMethod::Fixed);
        assert!(fee.fixed_amount.is_some());
        assert!(fee.percentage_rate.is_none());
        assert!(fee.is_active);
    }

    #[test]
    fn test_percentage_fee_with_bounds() {
        let fee = FeeStructure::percentage("Insurance levy", FeeType::Loan, dec!(5))
            .with_minimum(Money::new(dec!(10), Currency::KES))
            .with_maximum(Money::new(dec!(100), Currency::KES))
            .with_frequency(FeeFrequency::Annual);

        assert_eq!(fee.percentage_rate, Some(dec!(5)));
        assert_eq!(fee.frequency, FeeFrequency::Annual);
    }

    #[test]
    fn test_frequency_periods_per_year() {
        assert_eq!(FeeFrequency::Monthly.periods_per_year(), 12);
        assert_eq!(FeeFrequency::Quarterly.periods_per_year(), 4);
        assert_eq!(FeeFrequency::Annual.periods_per_year(), 1);
        assert_eq!(FeeFrequency::OneTime.periods_per_year(), 1);
    }

    #[test]
    fn test_monthly_next_due_date_rolls_year() {
        let december = NaiveDate::from_ymd_opt(2024, 12, 15).unwrap();
        let next = FeeFrequency::Monthly.next_due_date(december);
        assert_eq!(next, NaiveDate::from_ymd_opt(2025, 1, 15).unwrap());
    }

    #[test]
    fn test_monthly_next_due_date_short_month() {
        let january = NaiveDate::from_ymd_opt(2025, 1, 31).unwrap();
        // Feb 31 does not exist; falls back to a 30-day offset
        let next = FeeFrequency::Monthly.next_due_date(january);
        assert_eq!(next, NaiveDate::from_ymd_opt(2025, 3, 2).unwrap());
    }
}
