//! Test Data Builders
//!
//! Builder patterns for constructing test data with sensible defaults.
//! Tests specify only the fields they care about.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use core_kernel::{Currency, GlAccountId, Money};
use domain_fees::{FeeStructure, FeeType};
use domain_ledger::JournalEntry;
use domain_loans::OutstandingBalances;

use crate::fixtures::{DateFixtures, MoneyFixtures};

/// Builder for journal entry drafts
pub struct JournalEntryBuilder {
    description: String,
    transaction_date: NaiveDate,
    lines: Vec<(GlAccountId, Money, bool)>,
}

impl Default for JournalEntryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl JournalEntryBuilder {
    /// Creates a builder with no lines
    pub fn new() -> Self {
        Self {
            description: "Test entry".to_string(),
            transaction_date: DateFixtures::transaction_date(),
            lines: Vec::new(),
        }
    }

    /// Sets the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the transaction date
    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.transaction_date = date;
        self
    }

    /// Adds a debit line
    pub fn debit(mut self, account: GlAccountId, amount: Money) -> Self {
        self.lines.push((account, amount, true));
        self
    }

    /// Adds a credit line
    pub fn credit(mut self, account: GlAccountId, amount: Money) -> Self {
        self.lines.push((account, amount, false));
        self
    }

    /// Adds a balanced debit/credit pair across two fresh accounts
    pub fn balanced_pair(self, amount: Money) -> Self {
        self.debit(GlAccountId::new(), amount)
            .credit(GlAccountId::new(), amount)
    }

    /// Builds the draft entry
    pub fn build(self) -> JournalEntry {
        let mut entry = JournalEntry::draft(self.description, self.transaction_date);
        for (account, amount, is_debit) in self.lines {
            entry = if is_debit {
                entry.debit(account, amount)
            } else {
                entry.credit(account, amount)
            };
        }
        entry
    }
}

/// Builder for fee structures
pub struct FeeStructureBuilder {
    fee_name: String,
    fee_type: FeeType,
    rate: Option<Decimal>,
    fixed_amount: Option<Money>,
    minimum: Option<Money>,
    maximum: Option<Money>,
    active: bool,
}

impl Default for FeeStructureBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl FeeStructureBuilder {
    /// Creates a builder defaulting to a 5% loan fee
    pub fn new() -> Self {
        Self {
            fee_name: "Loan processing fee".to_string(),
            fee_type: FeeType::Loan,
            rate: Some(dec!(5)),
            fixed_amount: None,
            minimum: None,
            maximum: None,
            active: true,
        }
    }

    /// Sets the fee name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.fee_name = name.into();
        self
    }

    /// Sets the fee type
    pub fn with_fee_type(mut self, fee_type: FeeType) -> Self {
        self.fee_type = fee_type;
        self
    }

    /// Makes the fee a fixed amount
    pub fn fixed(mut self, amount: Money) -> Self {
        self.fixed_amount = Some(amount);
        self.rate = None;
        self
    }

    /// Makes the fee a percentage of the base
    pub fn percentage(mut self, rate: Decimal) -> Self {
        self.rate = Some(rate);
        self.fixed_amount = None;
        self
    }

    /// Sets the minimum charge
    pub fn with_minimum(mut self, minimum: Money) -> Self {
        self.minimum = Some(minimum);
        self
    }

    /// Sets the maximum charge
    pub fn with_maximum(mut self, maximum: Money) -> Self {
        self.maximum = Some(maximum);
        self
    }

    /// Marks the fee inactive
    pub fn inactive(mut self) -> Self {
        self.active = false;
        self
    }

    /// Builds the fee structure
    pub fn build(self) -> FeeStructure {
        let mut fee = match (self.fixed_amount, self.rate) {
            (Some(amount), _) => FeeStructure::fixed(self.fee_name, self.fee_type, amount),
            (None, Some(rate)) => FeeStructure::percentage(self.fee_name, self.fee_type, rate),
            (None, None) => {
                FeeStructure::percentage(self.fee_name, self.fee_type, dec!(5))
            }
        };
        if let Some(minimum) = self.minimum {
            fee = fee.with_minimum(minimum);
        }
        if let Some(maximum) = self.maximum {
            fee = fee.with_maximum(maximum);
        }
        if !self.active {
            fee = fee.deactivated();
        }
        fee
    }
}

/// Builder for outstanding loan balances
pub struct OutstandingBalancesBuilder {
    principal: Money,
    interest: Money,
    fee: Money,
    penalty: Money,
}

impl Default for OutstandingBalancesBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl OutstandingBalancesBuilder {
    /// Creates a builder with a typical performing loan
    pub fn new() -> Self {
        Self {
            principal: MoneyFixtures::kes_principal(),
            interest: Money::new(dec!(1200.00), Currency::KES),
            fee: Money::new(dec!(300.00), Currency::KES),
            penalty: MoneyFixtures::kes_zero(),
        }
    }

    /// Sets the outstanding principal
    pub fn with_principal(mut self, principal: Money) -> Self {
        self.principal = principal;
        self
    }

    /// Sets the outstanding interest
    pub fn with_interest(mut self, interest: Money) -> Self {
        self.interest = interest;
        self
    }

    /// Sets the outstanding fees
    pub fn with_fee(mut self, fee: Money) -> Self {
        self.fee = fee;
        self
    }

    /// Sets the outstanding penalties
    pub fn with_penalty(mut self, penalty: Money) -> Self {
        self.penalty = penalty;
        self
    }

    /// Builds the snapshot
    pub fn build(self) -> OutstandingBalances {
        OutstandingBalances::new(self.principal, self.interest, self.fee, self.penalty)
    }
}
