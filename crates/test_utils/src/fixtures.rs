//! Pre-built Test Fixtures
//!
//! Ready-to-use test data for common entities across the microfinance
//! system. Fixtures are consistent and predictable for unit tests.

use chrono::NaiveDate;
use fake::faker::name::en::Name;
use fake::Fake;
use rust_decimal_macros::dec;

use core_kernel::{Currency, Money};
use domain_ledger::SaccoChartOfAccounts;
use domain_loans::LoanGlAccounts;

/// Fixture for Money test data
pub struct MoneyFixtures;

impl MoneyFixtures {
    /// A standard KES amount
    pub fn kes_1000() -> Money {
        Money::new(dec!(1000.00), Currency::KES)
    }

    /// A typical loan principal
    pub fn kes_principal() -> Money {
        Money::new(dec!(25000.00), Currency::KES)
    }

    /// A typical repayment amount
    pub fn kes_repayment() -> Money {
        Money::new(dec!(2500.00), Currency::KES)
    }

    /// A zero KES amount
    pub fn kes_zero() -> Money {
        Money::zero(Currency::KES)
    }

    /// A TZS amount for currency mismatch tests
    pub fn tzs_1000() -> Money {
        Money::new(dec!(1000.00), Currency::TZS)
    }

    /// A UGX amount (zero decimal places)
    pub fn ugx_50000() -> Money {
        Money::new(dec!(50000), Currency::UGX)
    }
}

/// Fixture for business dates
pub struct DateFixtures;

impl DateFixtures {
    /// A standard transaction date
    pub fn transaction_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 15).unwrap()
    }

    /// Month-end, for accrual tests
    pub fn month_end() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 31).unwrap()
    }

    /// First of the following month, for accrual reversals
    pub fn next_month_start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 4, 1).unwrap()
    }
}

/// Fixture for GL account wiring
pub struct AccountFixtures;

impl AccountFixtures {
    /// Loan GL accounts wired from the standard chart
    pub fn loan_accounts() -> LoanGlAccounts {
        LoanGlAccounts::from_chart(&SaccoChartOfAccounts::standard())
            .expect("standard chart wires all loan accounts")
    }
}

/// Fixture for display strings
pub struct StringFixtures;

impl StringFixtures {
    /// A deterministic fee name
    pub fn fee_name() -> &'static str {
        "Loan processing fee"
    }

    /// A randomized member name, for payloads where the value is opaque
    pub fn member_name() -> String {
        Name().fake()
    }
}
