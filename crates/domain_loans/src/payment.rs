//! Loan payment records
//!
//! A payment captures one money movement against a loan together with
//! the allocation that was applied. Status moves are guarded so a
//! payment cannot be completed or reversed twice.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{JournalEntryId, LoanId, Money, PaymentId};

use crate::allocator::Allocation;
use crate::error::LoanError;

/// Lifecycle status of a loan payment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    /// Recorded but not yet posted to the ledger
    Pending,
    /// Posted and applied to the loan
    Completed,
    /// Backed out by a reversal entry
    Reversed,
}

/// What kind of movement the payment represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentKind {
    Disbursement,
    Repayment,
    Charge,
}

/// A money movement against a loan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanPayment {
    /// Unique identifier
    pub id: PaymentId,
    /// Loan the payment applies to
    pub loan_id: LoanId,
    /// Kind of movement
    pub kind: PaymentKind,
    /// Payment amount
    pub amount: Money,
    /// How the amount was split across loan components
    pub allocation: Allocation,
    /// Business date
    pub transaction_date: NaiveDate,
    /// Lifecycle status
    pub status: PaymentStatus,
    /// Journal entry created when the payment posted
    pub journal_entry_id: Option<JournalEntryId>,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// When the payment completed
    pub completed_at: Option<DateTime<Utc>>,
    /// When the payment was reversed
    pub reversed_at: Option<DateTime<Utc>>,
    /// Notes
    pub notes: Option<String>,
}

impl LoanPayment {
    /// Creates a pending payment
    pub fn new(
        loan_id: LoanId,
        kind: PaymentKind,
        amount: Money,
        allocation: Allocation,
        transaction_date: NaiveDate,
    ) -> Self {
        Self {
            id: PaymentId::new_v7(),
            loan_id,
            kind,
            amount,
            allocation,
            transaction_date,
            status: PaymentStatus::Pending,
            journal_entry_id: None,
            created_at: Utc::now(),
            completed_at: None,
            reversed_at: None,
            notes: None,
        }
    }

    /// Marks the payment completed, linking its journal entry
    pub fn complete(&mut self, journal_entry_id: JournalEntryId) -> Result<(), LoanError> {
        if self.status != PaymentStatus::Pending {
            return Err(LoanError::InvalidPaymentState(format!(
                "cannot complete a {:?} payment",
                self.status
            )));
        }
        self.status = PaymentStatus::Completed;
        self.journal_entry_id = Some(journal_entry_id);
        self.completed_at = Some(Utc::now());
        Ok(())
    }

    /// Marks the payment reversed
    ///
    /// Only completed payments can be reversed; a second reversal is an
    /// error.
    pub fn reverse(&mut self, reason: &str) -> Result<(), LoanError> {
        if self.status != PaymentStatus::Completed {
            return Err(LoanError::InvalidPaymentState(format!(
                "cannot reverse a {:?} payment",
                self.status
            )));
        }
        self.status = PaymentStatus::Reversed;
        self.reversed_at = Some(Utc::now());
        self.notes = Some(format!("Reversed: {}", reason));
        Ok(())
    }
}
