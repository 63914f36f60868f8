//! Loan transaction requests
//!
//! Requests arrive from the host application as one closed enum. Each
//! variant carries exactly the data its processing needs; mutually
//! exclusive options (payout destination, allocation instruction) are
//! modeled as nested enums rather than optional fields.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use core_kernel::{FeeStructureId, LoanId, Money, PaymentId, SavingsAccountId};

/// Where disbursed principal goes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisbursementDestination {
    /// Paid out directly to the borrower
    DirectPayout,
    /// Credited to the borrower's linked savings account
    LinkedSavings(SavingsAccountId),
}

/// How a repayment should be split
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AllocationInstruction {
    /// Apply the product's precedence order
    Strategy,
    /// Apply an explicit split, validated against the payment amount
    Manual {
        principal: Money,
        interest: Money,
        fee: Money,
        penalty: Money,
    },
}

/// A request to move money against a loan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LoanTransactionRequest {
    /// Release approved principal to the borrower
    Disbursement {
        loan_id: LoanId,
        amount: Money,
        transaction_date: NaiveDate,
        destination: DisbursementDestination,
    },
    /// Apply a payment against the loan's outstanding components
    Repayment {
        loan_id: LoanId,
        amount: Money,
        transaction_date: NaiveDate,
        instruction: AllocationInstruction,
    },
    /// Assess a configured fee against the loan
    Charge {
        loan_id: LoanId,
        fee_structure_id: FeeStructureId,
        base_amount: Money,
        transaction_date: NaiveDate,
    },
    /// Back out a previously completed payment
    Reversal {
        loan_id: LoanId,
        original_payment_id: PaymentId,
        transaction_date: NaiveDate,
    },
}

impl LoanTransactionRequest {
    /// The loan the request targets
    pub fn loan_id(&self) -> LoanId {
        match self {
            LoanTransactionRequest::Disbursement { loan_id, .. }
            | LoanTransactionRequest::Repayment { loan_id, .. }
            | LoanTransactionRequest::Charge { loan_id, .. }
            | LoanTransactionRequest::Reversal { loan_id, .. } => *loan_id,
        }
    }

    /// The business date of the request
    pub fn transaction_date(&self) -> NaiveDate {
        match self {
            LoanTransactionRequest::Disbursement {
                transaction_date, ..
            }
            | LoanTransactionRequest::Repayment {
                transaction_date, ..
            }
            | LoanTransactionRequest::Charge {
                transaction_date, ..
            }
            | LoanTransactionRequest::Reversal {
                transaction_date, ..
            } => *transaction_date,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::{Currency, Money};
    use rust_decimal_macros::dec;

    #[test]
    fn test_request_accessors() {
        let loan_id = LoanId::new();
        let date = NaiveDate::from_ymd_opt(2025, 5, 2).unwrap();
        let request = LoanTransactionRequest::Disbursement {
            loan_id,
            amount: Money::new(dec!(10000), Currency::KES),
            transaction_date: date,
            destination: DisbursementDestination::DirectPayout,
        };

        assert_eq!(request.loan_id(), loan_id);
        assert_eq!(request.transaction_date(), date);
    }

    #[test]
    fn test_request_serde_round_trip() {
        let request = LoanTransactionRequest::Repayment {
            loan_id: LoanId::new(),
            amount: Money::new(dec!(250), Currency::KES),
            transaction_date: NaiveDate::from_ymd_opt(2025, 5, 2).unwrap(),
            instruction: AllocationInstruction::Strategy,
        };

        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains("\"type\":\"repayment\""));
        let back: LoanTransactionRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(back, request);
    }
}
