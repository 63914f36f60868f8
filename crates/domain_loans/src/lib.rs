//! Loan Domain - Transactions, Allocation, and Status
//!
//! This crate turns loan transaction requests into balanced journal
//! entries and payment records:
//!
//! - Disbursements release principal to the borrower or a linked savings
//!   account.
//! - Repayments are split across principal, interest, fees, and
//!   penalties, either by a precedence strategy or an explicit split.
//! - Charges resolve a fee structure into a concrete amount.
//! - Reversals back out a completed payment through a mirrored journal
//!   entry.
//!
//! The allocator and status resolver are pure; all storage goes through
//! the injected [`LoanStore`] and the ledger's posting service.

pub mod allocator;
pub mod error;
pub mod payment;
pub mod ports;
pub mod request;
pub mod service;
pub mod status;

pub use allocator::{
    allocate_manual, allocate_with_strategy, Allocation, AllocationOrder, LoanComponent,
    OutstandingBalances,
};
pub use error::LoanError;
pub use payment::{LoanPayment, PaymentKind, PaymentStatus};
pub use ports::LoanStore;
pub use request::{AllocationInstruction, DisbursementDestination, LoanTransactionRequest};
pub use service::{LoanGlAccounts, LoanTransactionService, TransactionOutcome};
pub use status::{
    resolve_application, resolve_loan, resolve_raw, ApplicationStatus, BadgeTone, LoanStatus,
    StatusBucket, StatusSource, UnifiedLoanStatus, UnknownStatus,
};
