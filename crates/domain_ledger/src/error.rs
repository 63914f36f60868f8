//! Ledger domain errors

use core_kernel::{MoneyError, PortError};
use rust_decimal::Decimal;
use thiserror::Error;

use crate::journal::EntryStatus;

/// Reasons a single ledger line fails validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineIssue {
    /// Both the debit and credit side carry a positive amount
    BothSidesSet,
    /// Neither side carries a positive amount
    NeitherSideSet,
    /// A side carries a negative amount
    NegativeAmount,
    /// The line's currency differs from the entry's
    CurrencyMismatch,
}

impl std::fmt::Display for LineIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            LineIssue::BothSidesSet => "both debit and credit are set",
            LineIssue::NeitherSideSet => "neither debit nor credit is set",
            LineIssue::NegativeAmount => "amount is negative",
            LineIssue::CurrencyMismatch => "currency differs from the entry",
        };
        write!(f, "{}", s)
    }
}

/// Errors that can occur in the ledger domain
///
/// Validation errors carry enough detail for the caller to present an
/// actionable message, including the exact imbalance on a failed balance
/// check.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Fewer than two lines in a journal entry
    #[error("Journal entry requires at least 2 lines, got {actual}")]
    LineCountTooLow { actual: usize },

    /// A line violates the one-side-positive rule
    #[error("Invalid line {index}: {issue}")]
    InvalidLine { index: usize, issue: LineIssue },

    /// A line references the nil account id
    #[error("Line {index}: account id is blank")]
    BlankAccount { index: usize },

    /// Debits and credits do not reconcile within tolerance
    #[error("Unbalanced entry: debits={debits}, credits={credits}")]
    BalanceMismatch { debits: Decimal, credits: Decimal },

    /// An illegal lifecycle move was attempted
    #[error("Cannot {attempted} a {from:?} entry")]
    InvalidStateTransition {
        from: EntryStatus,
        attempted: &'static str,
    },

    /// Accrual account and contra account are the same
    #[error("Accrual account and contra account must differ: {0}")]
    AccrualAccountsEqual(String),

    /// An illegal accrual lifecycle move was attempted
    #[error("Invalid accrual transition: {0}")]
    InvalidAccrualTransition(String),

    /// Journal entry not found
    #[error("Journal entry not found: {0}")]
    EntryNotFound(String),

    /// Arithmetic failure on money values
    #[error("Money error: {0}")]
    Money(#[from] MoneyError),

    /// The persistence collaborator failed; nothing was applied
    #[error("Persistence failure: {0}")]
    Persistence(#[from] PortError),
}
