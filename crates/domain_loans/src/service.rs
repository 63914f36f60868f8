//! Loan transaction service
//!
//! Orchestrates one loan transaction end to end: resolve the allocation,
//! compute any charge, build the balanced journal draft, post it through
//! the posting service, and record the payment. Every collaborator is
//! injected at construction; a port failure anywhere aborts the whole
//! operation with nothing applied.

use std::sync::Arc;

use tracing::{info, instrument};

use core_kernel::{
    FeeStructureId, GlAccountId, LoanId, Money, PaymentId, TenantMonetaryConfig,
};
use domain_fees::compute_charge;
use domain_ledger::{
    AccountCategory, JournalEntry, JournalStore, PostingService, SaccoChartOfAccounts,
};

use crate::allocator::{
    allocate_manual, allocate_with_strategy, Allocation, AllocationOrder,
};
use crate::error::LoanError;
use crate::payment::{LoanPayment, PaymentKind, PaymentStatus};
use crate::ports::LoanStore;
use crate::request::{AllocationInstruction, DisbursementDestination, LoanTransactionRequest};

/// General-ledger accounts the loan flows post against
#[derive(Debug, Clone, Copy)]
pub struct LoanGlAccounts {
    /// Cash or bank account funding disbursements and receiving payments
    pub funding_source: GlAccountId,
    /// Outstanding principal asset account
    pub loan_portfolio: GlAccountId,
    /// Interest income account
    pub interest_income: GlAccountId,
    /// Fee income account
    pub fee_income: GlAccountId,
    /// Penalty income account
    pub penalty_income: GlAccountId,
    /// Member savings liability account, for savings-routed disbursements
    pub member_savings: GlAccountId,
}

impl LoanGlAccounts {
    /// Wires the loan flows from a chart of accounts
    ///
    /// Fails when the chart has no active account for a category the
    /// flows post to.
    pub fn from_chart(chart: &SaccoChartOfAccounts) -> Result<Self, LoanError> {
        let account = |category: AccountCategory| {
            chart
                .account_id_for(category)
                .ok_or(LoanError::MissingGlAccount(category))
        };

        Ok(Self {
            funding_source: account(AccountCategory::Cash)?,
            loan_portfolio: account(AccountCategory::LoanPortfolio)?,
            interest_income: account(AccountCategory::InterestIncome)?,
            fee_income: account(AccountCategory::FeeIncome)?,
            penalty_income: account(AccountCategory::PenaltyIncome)?,
            member_savings: account(AccountCategory::MemberSavings)?,
        })
    }
}

/// Result of processing a loan transaction request
#[derive(Debug)]
pub enum TransactionOutcome {
    Disbursed {
        payment: LoanPayment,
        entry: JournalEntry,
    },
    Repaid {
        payment: LoanPayment,
        entry: JournalEntry,
    },
    Charged {
        charge: Money,
        payment: LoanPayment,
        entry: JournalEntry,
    },
    Reversed {
        payment: LoanPayment,
        reversal_allocation: Allocation,
        entry: JournalEntry,
    },
}

impl TransactionOutcome {
    /// The journal entry the outcome posted
    pub fn entry(&self) -> &JournalEntry {
        match self {
            TransactionOutcome::Disbursed { entry, .. }
            | TransactionOutcome::Repaid { entry, .. }
            | TransactionOutcome::Charged { entry, .. }
            | TransactionOutcome::Reversed { entry, .. } => entry,
        }
    }
}

/// Processes loan transactions against the ledger and the loan store
pub struct LoanTransactionService<L: LoanStore, J: JournalStore> {
    loans: Arc<L>,
    posting: Arc<PostingService<J>>,
    accounts: LoanGlAccounts,
    config: TenantMonetaryConfig,
    order: AllocationOrder,
}

impl<L: LoanStore, J: JournalStore> LoanTransactionService<L, J> {
    /// Creates a service with the default allocation order
    pub fn new(
        loans: Arc<L>,
        posting: Arc<PostingService<J>>,
        accounts: LoanGlAccounts,
        config: TenantMonetaryConfig,
    ) -> Self {
        Self {
            loans,
            posting,
            accounts,
            config,
            order: AllocationOrder::default(),
        }
    }

    /// Overrides the repayment precedence order
    pub fn with_allocation_order(mut self, order: AllocationOrder) -> Self {
        self.order = order;
        self
    }

    /// Processes one transaction request
    #[instrument(skip(self, request), fields(loan_id = %request.loan_id()))]
    pub async fn process(
        &self,
        request: LoanTransactionRequest,
    ) -> Result<TransactionOutcome, LoanError> {
        match request {
            LoanTransactionRequest::Disbursement {
                loan_id,
                amount,
                transaction_date,
                destination,
            } => self.disburse(loan_id, amount, transaction_date, destination).await,
            LoanTransactionRequest::Repayment {
                loan_id,
                amount,
                transaction_date,
                instruction,
            } => self.repay(loan_id, amount, transaction_date, instruction).await,
            LoanTransactionRequest::Charge {
                loan_id,
                fee_structure_id,
                base_amount,
                transaction_date,
            } => {
                self.charge(loan_id, fee_structure_id, base_amount, transaction_date)
                    .await
            }
            LoanTransactionRequest::Reversal {
                loan_id,
                original_payment_id,
                ..
            } => self.reverse_payment(loan_id, original_payment_id).await,
        }
    }

    async fn disburse(
        &self,
        loan_id: LoanId,
        amount: Money,
        transaction_date: chrono::NaiveDate,
        destination: DisbursementDestination,
    ) -> Result<TransactionOutcome, LoanError> {
        require_positive(amount)?;

        let (credit_account, description) = match destination {
            DisbursementDestination::DirectPayout => {
                (self.accounts.funding_source, "Loan disbursement")
            }
            DisbursementDestination::LinkedSavings(_) => (
                self.accounts.member_savings,
                "Loan disbursement to linked savings",
            ),
        };

        let draft = JournalEntry::draft(description, transaction_date)
            .with_reference("loan", *loan_id.as_uuid())
            .debit(self.accounts.loan_portfolio, amount)
            .credit(credit_account, amount);

        let entry = self.posting.post(draft).await?;

        let mut payment = LoanPayment::new(
            loan_id,
            PaymentKind::Disbursement,
            amount,
            Allocation::principal_only(amount),
            transaction_date,
        );
        payment.complete(entry.id)?;
        self.loans.record_payment(&payment).await?;

        info!(payment_id = %payment.id, amount = %amount, "loan disbursed");
        Ok(TransactionOutcome::Disbursed { payment, entry })
    }

    async fn repay(
        &self,
        loan_id: LoanId,
        amount: Money,
        transaction_date: chrono::NaiveDate,
        instruction: AllocationInstruction,
    ) -> Result<TransactionOutcome, LoanError> {
        require_positive(amount)?;

        let outstanding = self.loans.outstanding_balances(loan_id).await?;

        let allocation = match instruction {
            AllocationInstruction::Strategy => {
                allocate_with_strategy(amount, &outstanding, &self.order)?
            }
            AllocationInstruction::Manual {
                principal,
                interest,
                fee,
                penalty,
            } => allocate_manual(
                amount,
                Allocation::new(principal, interest, fee, penalty),
                &outstanding,
                self.config.balance_epsilon(),
            )?,
        };

        let mut draft = JournalEntry::draft("Loan repayment", transaction_date)
            .with_reference("loan", *loan_id.as_uuid())
            .debit(self.accounts.funding_source, amount);

        for (share, account) in [
            (allocation.principal, self.accounts.loan_portfolio),
            (allocation.interest, self.accounts.interest_income),
            (allocation.fee, self.accounts.fee_income),
            (allocation.penalty, self.accounts.penalty_income),
        ] {
            if share.is_positive() {
                draft = draft.credit(account, share);
            }
        }

        let entry = self.posting.post(draft).await?;

        let mut payment = LoanPayment::new(
            loan_id,
            PaymentKind::Repayment,
            amount,
            allocation,
            transaction_date,
        );
        payment.complete(entry.id)?;
        self.loans.record_payment(&payment).await?;

        info!(payment_id = %payment.id, amount = %amount, "repayment applied");
        Ok(TransactionOutcome::Repaid { payment, entry })
    }

    async fn charge(
        &self,
        loan_id: LoanId,
        fee_structure_id: FeeStructureId,
        base_amount: Money,
        transaction_date: chrono::NaiveDate,
    ) -> Result<TransactionOutcome, LoanError> {
        let fee = self.loans.fee_structure(fee_structure_id).await?;
        let charge = compute_charge(&fee, base_amount)?;
        require_positive(charge)?;

        let draft = JournalEntry::draft(format!("Fee: {}", fee.fee_name), transaction_date)
            .with_reference("loan", *loan_id.as_uuid())
            .debit(self.accounts.loan_portfolio, charge)
            .credit(self.accounts.fee_income, charge);

        let entry = self.posting.post(draft).await?;

        let zero = Money::zero(charge.currency());
        let mut payment = LoanPayment::new(
            loan_id,
            PaymentKind::Charge,
            charge,
            Allocation::new(zero, zero, charge, zero),
            transaction_date,
        );
        payment.complete(entry.id)?;
        self.loans.record_payment(&payment).await?;

        info!(payment_id = %payment.id, charge = %charge, "fee charged");
        Ok(TransactionOutcome::Charged {
            charge,
            payment,
            entry,
        })
    }

    async fn reverse_payment(
        &self,
        loan_id: LoanId,
        original_payment_id: PaymentId,
    ) -> Result<TransactionOutcome, LoanError> {
        let mut payment = self
            .loans
            .find_payment(original_payment_id)
            .await?
            .filter(|p| p.loan_id == loan_id)
            .ok_or_else(|| LoanError::PaymentNotFound(original_payment_id.to_string()))?;

        if payment.status != PaymentStatus::Completed {
            return Err(LoanError::InvalidPaymentState(format!(
                "cannot reverse a {:?} payment",
                payment.status
            )));
        }

        let entry_id = payment.journal_entry_id.ok_or_else(|| {
            LoanError::InvalidPaymentState("completed payment has no journal entry".to_string())
        })?;

        // The journal reversal goes first; the payment flips only once
        // the mirrored entry is persisted.
        let entry = self.posting.reverse(entry_id, "payment reversal").await?;

        payment.reverse("payment reversal")?;
        self.loans.mark_payment_reversed(&payment).await?;

        let reversal_allocation = payment.allocation.invert();

        info!(payment_id = %payment.id, "payment reversed");
        Ok(TransactionOutcome::Reversed {
            payment,
            reversal_allocation,
            entry,
        })
    }
}

fn require_positive(amount: Money) -> Result<(), LoanError> {
    if amount.is_positive() {
        Ok(())
    } else {
        Err(LoanError::NonPositiveAmount(amount.amount()))
    }
}
