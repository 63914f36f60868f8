//! In-memory port adapters
//!
//! Hash-map backed implementations of the persistence ports, used by the
//! service-level tests. Writes are atomic per call, matching the port
//! contracts, and write failures can be injected to exercise the
//! all-or-nothing behavior of the services.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;

use core_kernel::{DomainPort, FeeStructureId, JournalEntryId, LoanId, PaymentId, PortError};
use domain_fees::FeeStructure;
use domain_ledger::{JournalEntry, JournalStore};
use domain_loans::{LoanPayment, LoanStore, OutstandingBalances, PaymentKind, PaymentStatus};

/// In-memory journal entry store
#[derive(Default)]
pub struct InMemoryJournalStore {
    entries: Mutex<HashMap<JournalEntryId, JournalEntry>>,
    fail_writes: AtomicBool,
}

impl InMemoryJournalStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent write fail with a connection error
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Number of entries currently stored
    pub async fn entry_count(&self) -> usize {
        self.entries.lock().await.len()
    }

    /// Returns a stored entry, if present
    pub async fn get(&self, id: JournalEntryId) -> Option<JournalEntry> {
        self.entries.lock().await.get(&id).cloned()
    }

    fn check_writable(&self) -> Result<(), PortError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            Err(PortError::connection("injected write failure"))
        } else {
            Ok(())
        }
    }
}

impl DomainPort for InMemoryJournalStore {}

#[async_trait]
impl JournalStore for InMemoryJournalStore {
    async fn load(&self, id: JournalEntryId) -> Result<JournalEntry, PortError> {
        self.entries
            .lock()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| PortError::not_found("JournalEntry", id))
    }

    async fn insert(&self, entry: &JournalEntry) -> Result<(), PortError> {
        self.check_writable()?;
        let mut entries = self.entries.lock().await;
        if entries.contains_key(&entry.id) {
            return Err(PortError::conflict(format!(
                "entry {} already exists",
                entry.id
            )));
        }
        entries.insert(entry.id, entry.clone());
        Ok(())
    }

    async fn insert_reversal(
        &self,
        reversal: &JournalEntry,
        reversed_original: &JournalEntry,
    ) -> Result<(), PortError> {
        self.check_writable()?;
        let mut entries = self.entries.lock().await;
        entries.insert(reversal.id, reversal.clone());
        entries.insert(reversed_original.id, reversed_original.clone());
        Ok(())
    }
}

/// In-memory loan store
///
/// `record_payment` and `mark_payment_reversed` apply the payment's
/// allocation to the loan's outstanding balances under one lock, the way
/// a real adapter applies them inside one storage transaction.
#[derive(Default)]
pub struct InMemoryLoanStore {
    balances: Mutex<HashMap<LoanId, OutstandingBalances>>,
    payments: Mutex<HashMap<PaymentId, LoanPayment>>,
    fees: Mutex<HashMap<FeeStructureId, FeeStructure>>,
}

impl InMemoryLoanStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a loan's outstanding balances
    pub async fn set_outstanding(&self, loan_id: LoanId, balances: OutstandingBalances) {
        self.balances.lock().await.insert(loan_id, balances);
    }

    /// Seeds a fee structure
    pub async fn insert_fee(&self, fee: FeeStructure) {
        self.fees.lock().await.insert(fee.id, fee);
    }

    /// Returns a stored payment, if present
    pub async fn payment(&self, id: PaymentId) -> Option<LoanPayment> {
        self.payments.lock().await.get(&id).cloned()
    }

    /// Number of payments currently stored
    pub async fn payment_count(&self) -> usize {
        self.payments.lock().await.len()
    }

    /// Current outstanding balances for a loan, if seeded
    pub async fn balances(&self, loan_id: LoanId) -> Option<OutstandingBalances> {
        self.balances.lock().await.get(&loan_id).cloned()
    }

    fn apply(
        balances: &mut OutstandingBalances,
        payment: &LoanPayment,
        reversal: bool,
    ) -> Result<(), PortError> {
        let adapter_error =
            |e: core_kernel::MoneyError| PortError::internal(format!("balance arithmetic: {}", e));

        match (payment.kind, reversal) {
            (PaymentKind::Disbursement, false) => {
                balances.principal = balances
                    .principal
                    .checked_add(&payment.amount)
                    .map_err(adapter_error)?;
            }
            (PaymentKind::Disbursement, true) => {
                balances.principal = balances
                    .principal
                    .checked_sub(&payment.amount)
                    .map_err(adapter_error)?;
            }
            (PaymentKind::Charge, false) => {
                balances.fee = balances
                    .fee
                    .checked_add(&payment.amount)
                    .map_err(adapter_error)?;
            }
            (PaymentKind::Charge, true) => {
                balances.fee = balances
                    .fee
                    .checked_sub(&payment.amount)
                    .map_err(adapter_error)?;
            }
            (PaymentKind::Repayment, reversed) => {
                let allocation = &payment.allocation;
                let pairs = [
                    (&mut balances.principal, allocation.principal),
                    (&mut balances.interest, allocation.interest),
                    (&mut balances.fee, allocation.fee),
                    (&mut balances.penalty, allocation.penalty),
                ];
                for (balance, share) in pairs {
                    *balance = if reversed {
                        balance.checked_add(&share).map_err(adapter_error)?
                    } else {
                        balance.checked_sub(&share).map_err(adapter_error)?
                    };
                }
            }
        }
        Ok(())
    }
}

impl DomainPort for InMemoryLoanStore {}

#[async_trait]
impl LoanStore for InMemoryLoanStore {
    async fn outstanding_balances(
        &self,
        loan_id: LoanId,
    ) -> Result<OutstandingBalances, PortError> {
        self.balances
            .lock()
            .await
            .get(&loan_id)
            .cloned()
            .ok_or_else(|| PortError::not_found("Loan", loan_id))
    }

    async fn find_payment(&self, id: PaymentId) -> Result<Option<LoanPayment>, PortError> {
        Ok(self.payments.lock().await.get(&id).cloned())
    }

    async fn record_payment(&self, payment: &LoanPayment) -> Result<(), PortError> {
        let mut balances = self.balances.lock().await;
        let loan_balances = balances
            .entry(payment.loan_id)
            .or_insert_with(|| OutstandingBalances::zero(payment.amount.currency()));
        Self::apply(loan_balances, payment, false)?;

        self.payments
            .lock()
            .await
            .insert(payment.id, payment.clone());
        Ok(())
    }

    async fn mark_payment_reversed(&self, payment: &LoanPayment) -> Result<(), PortError> {
        if payment.status != PaymentStatus::Reversed {
            return Err(PortError::validation(format!(
                "payment {} is not reversed",
                payment.id
            )));
        }

        let mut balances = self.balances.lock().await;
        let loan_balances = balances
            .entry(payment.loan_id)
            .or_insert_with(|| OutstandingBalances::zero(payment.amount.currency()));
        Self::apply(loan_balances, payment, true)?;

        self.payments
            .lock()
            .await
            .insert(payment.id, payment.clone());
        Ok(())
    }

    async fn fee_structure(&self, id: FeeStructureId) -> Result<FeeStructure, PortError> {
        self.fees
            .lock()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| PortError::not_found("FeeStructure", id))
    }
}
