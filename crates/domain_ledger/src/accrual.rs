//! Accrual records
//!
//! An accrual recognizes income or expense before cash moves. Posting an
//! accrual creates a journal entry; on the reversal date an offsetting
//! entry backs it out. The accrual's own lifecycle mirrors the journal
//! state machine: pending, posted, reversed.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use core_kernel::{AccrualId, GlAccountId, JournalEntryId, Money};

use crate::error::LedgerError;
use crate::journal::JournalEntry;

/// The accounting nature of an accrual
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccrualType {
    Expense,
    Income,
    Liability,
    Asset,
}

impl AccrualType {
    /// True when the accrual's main account is debited at posting
    ///
    /// Expense and asset accruals debit the main account against the
    /// contra; income and liability accruals credit it.
    fn debits_main_account(&self) -> bool {
        matches!(self, AccrualType::Expense | AccrualType::Asset)
    }
}

/// Lifecycle status of an accrual
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccrualStatus {
    Pending,
    Posted,
    Reversed,
}

/// A provisional accounting event awaiting posting and later reversal
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Accrual {
    /// Unique identifier
    pub id: AccrualId,
    /// Display name
    pub accrual_name: String,
    /// Accounting nature
    pub accrual_type: AccrualType,
    /// Accrued amount
    pub amount: Money,
    /// Date the accrual is recognized
    pub accrual_date: NaiveDate,
    /// Date the accrual is backed out, if scheduled
    pub reversal_date: Option<NaiveDate>,
    /// Main account
    pub account_id: GlAccountId,
    /// Contra account
    pub contra_account_id: GlAccountId,
    /// Lifecycle status
    pub status: AccrualStatus,
    /// Entry created when the accrual was posted
    pub journal_entry_id: Option<JournalEntryId>,
    /// Entry created when the accrual was reversed
    pub reversal_entry_id: Option<JournalEntryId>,
}

impl Accrual {
    /// Creates a pending accrual
    ///
    /// The main and contra accounts must differ.
    pub fn new(
        accrual_name: impl Into<String>,
        accrual_type: AccrualType,
        amount: Money,
        accrual_date: NaiveDate,
        account_id: GlAccountId,
        contra_account_id: GlAccountId,
    ) -> Result<Self, LedgerError> {
        if account_id == contra_account_id {
            return Err(LedgerError::AccrualAccountsEqual(account_id.to_string()));
        }

        Ok(Self {
            id: AccrualId::new_v7(),
            accrual_name: accrual_name.into(),
            accrual_type,
            amount,
            accrual_date,
            reversal_date: None,
            account_id,
            contra_account_id,
            status: AccrualStatus::Pending,
            journal_entry_id: None,
            reversal_entry_id: None,
        })
    }

    /// Schedules the reversal date
    pub fn with_reversal_date(mut self, date: NaiveDate) -> Self {
        self.reversal_date = Some(date);
        self
    }

    /// Builds the draft journal entry that recognizes this accrual
    pub fn posting_draft(&self) -> JournalEntry {
        let draft = JournalEntry::draft(self.accrual_name.clone(), self.accrual_date)
            .with_reference("accrual", *self.id.as_uuid());

        if self.accrual_type.debits_main_account() {
            draft
                .debit(self.account_id, self.amount)
                .credit(self.contra_account_id, self.amount)
        } else {
            draft
                .debit(self.contra_account_id, self.amount)
                .credit(self.account_id, self.amount)
        }
    }

    /// Builds the offsetting draft entry for the reversal date
    ///
    /// Orientation is the mirror of the posting draft. Only meaningful
    /// once the accrual has been posted.
    pub fn reversal_draft(&self) -> Result<JournalEntry, LedgerError> {
        if self.status != AccrualStatus::Posted {
            return Err(LedgerError::InvalidAccrualTransition(format!(
                "cannot reverse a {:?} accrual",
                self.status
            )));
        }

        let date = self.reversal_date.unwrap_or(self.accrual_date);
        let draft = JournalEntry::draft(
            format!("Reversal of accrual: {}", self.accrual_name),
            date,
        )
        .with_reference("accrual_reversal", *self.id.as_uuid());

        let entry = if self.accrual_type.debits_main_account() {
            draft
                .debit(self.contra_account_id, self.amount)
                .credit(self.account_id, self.amount)
        } else {
            draft
                .debit(self.account_id, self.amount)
                .credit(self.contra_account_id, self.amount)
        };

        Ok(entry)
    }

    /// Records that the accrual's journal entry has been posted
    pub fn mark_posted(&mut self, entry_id: JournalEntryId) -> Result<(), LedgerError> {
        if self.status != AccrualStatus::Pending {
            return Err(LedgerError::InvalidAccrualTransition(format!(
                "cannot post a {:?} accrual",
                self.status
            )));
        }
        self.status = AccrualStatus::Posted;
        self.journal_entry_id = Some(entry_id);
        Ok(())
    }

    /// Records that the offsetting entry has been posted
    pub fn mark_reversed(&mut self, entry_id: JournalEntryId) -> Result<(), LedgerError> {
        if self.status != AccrualStatus::Posted {
            return Err(LedgerError::InvalidAccrualTransition(format!(
                "cannot reverse a {:?} accrual",
                self.status
            )));
        }
        self.status = AccrualStatus::Reversed;
        self.reversal_entry_id = Some(entry_id);
        Ok(())
    }
}
