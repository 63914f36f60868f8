//! Loan domain errors

use core_kernel::{MoneyError, PortError};
use domain_fees::FeeError;
use domain_ledger::{AccountCategory, LedgerError};
use rust_decimal::Decimal;
use thiserror::Error;

use crate::allocator::LoanComponent;

/// Errors that can occur when processing loan transactions
#[derive(Debug, Error)]
pub enum LoanError {
    /// Payment exceeds everything outstanding on the loan
    #[error("Payment {payment} exceeds total outstanding {outstanding}")]
    OverAllocation { payment: Decimal, outstanding: Decimal },

    /// Manual split does not reconcile with the payment amount
    #[error("Allocation does not sum to the payment: expected {expected}, got {actual}")]
    AmountMismatch { expected: Decimal, actual: Decimal },

    /// A manual split component exceeds its outstanding balance
    #[error("{component} allocation {allocated} exceeds outstanding {outstanding}")]
    ComponentExceedsOutstanding {
        component: LoanComponent,
        allocated: Decimal,
        outstanding: Decimal,
    },

    /// The injected precedence order is malformed
    #[error("Invalid allocation order: {0}")]
    InvalidAllocationOrder(String),

    /// The chart of accounts cannot wire a loan posting flow
    #[error("Chart of accounts has no active {0:?} account")]
    MissingGlAccount(AccountCategory),

    /// Transactions must move a positive amount
    #[error("Transaction amount must be positive, got {0}")]
    NonPositiveAmount(Decimal),

    /// Referenced payment does not exist
    #[error("Payment not found: {0}")]
    PaymentNotFound(String),

    /// The payment is not in a state that allows the operation
    #[error("Invalid payment state: {0}")]
    InvalidPaymentState(String),

    /// Fee resolution failed
    #[error("Fee error: {0}")]
    Fee(#[from] FeeError),

    /// Journal posting failed
    #[error("Ledger error: {0}")]
    Ledger(#[from] LedgerError),

    /// Arithmetic failure on money values
    #[error("Money error: {0}")]
    Money(#[from] MoneyError),

    /// The persistence collaborator failed; nothing was applied
    #[error("Persistence failure: {0}")]
    Persistence(#[from] PortError),
}
