//! Persistence port for loan records

use async_trait::async_trait;

use core_kernel::{DomainPort, FeeStructureId, LoanId, PaymentId, PortError};
use domain_fees::FeeStructure;

use crate::allocator::OutstandingBalances;
use crate::payment::LoanPayment;

/// Storage port for loans, payments, and fee configuration
///
/// `outstanding_balances` returns a point-in-time snapshot. Adapters
/// must apply the subsequent write within the same storage transaction
/// (or equivalent optimistic check) so two payments allocating against
/// the same loan cannot both observe the stale snapshot and lose an
/// update.
#[async_trait]
pub trait LoanStore: DomainPort {
    /// Reads the loan's current outstanding component balances
    async fn outstanding_balances(&self, loan_id: LoanId)
        -> Result<OutstandingBalances, PortError>;

    /// Finds a payment by id, if it exists
    async fn find_payment(&self, id: PaymentId) -> Result<Option<LoanPayment>, PortError>;

    /// Persists a payment and applies its allocation to the loan
    async fn record_payment(&self, payment: &LoanPayment) -> Result<(), PortError>;

    /// Persists a payment's reversal and backs out its allocation
    async fn mark_payment_reversed(&self, payment: &LoanPayment) -> Result<(), PortError>;

    /// Loads a fee structure by id
    async fn fee_structure(&self, id: FeeStructureId) -> Result<FeeStructure, PortError>;
}
