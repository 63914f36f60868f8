//! Journal entry types and numbering
//!
//! A journal entry is a balanced set of ledger lines representing one
//! accounting event. Entries begin life as drafts built with the fluent
//! constructors here and only become immutable once the posting engine
//! accepts them.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use core_kernel::{Currency, GlAccountId, JournalEntryId, Money, OfficeId};
use rust_decimal::Decimal;

use crate::line::LedgerLine;

/// Lifecycle status of a journal entry
///
/// Draft entries can still be edited and posted. Posted entries are
/// immutable except for the reversal linkage. Reversed is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntryStatus {
    Draft,
    Posted,
    Reversed,
}

/// A reference from a journal entry to its originating record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryReference {
    /// Reference type (e.g., "loan", "accrual", "reversal")
    pub reference_type: String,
    /// Referenced record id
    pub reference_id: Uuid,
}

/// A journal entry in the general ledger
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalEntry {
    /// Unique entry identifier
    pub id: JournalEntryId,
    /// Tenant-unique entry number, assigned at posting
    pub entry_number: Option<String>,
    /// Business date of the transaction
    pub transaction_date: NaiveDate,
    /// Description
    pub description: String,
    /// Originating record, if any
    pub reference: Option<EntryReference>,
    /// Office the entry belongs to
    pub office_id: Option<OfficeId>,
    /// Individual lines
    pub lines: Vec<LedgerLine>,
    /// Lifecycle status
    pub status: EntryStatus,
    /// When the entry was created
    pub created_at: DateTime<Utc>,
    /// When the entry was posted
    pub approved_at: Option<DateTime<Utc>>,
    /// Set on a reversal entry: the entry it reverses
    pub reversal_of: Option<JournalEntryId>,
    /// Set on a reversed entry: the entry that reversed it
    pub reversed_by: Option<JournalEntryId>,
}

impl JournalEntry {
    /// Creates a new draft entry
    pub fn draft(description: impl Into<String>, transaction_date: NaiveDate) -> Self {
        Self {
            id: JournalEntryId::new_v7(),
            entry_number: None,
            transaction_date,
            description: description.into(),
            reference: None,
            office_id: None,
            lines: Vec::new(),
            status: EntryStatus::Draft,
            created_at: Utc::now(),
            approved_at: None,
            reversal_of: None,
            reversed_by: None,
        }
    }

    /// Adds a debit line
    pub fn debit(mut self, account_id: GlAccountId, amount: Money) -> Self {
        self.lines.push(LedgerLine::debit(account_id, amount));
        self
    }

    /// Adds a credit line
    pub fn credit(mut self, account_id: GlAccountId, amount: Money) -> Self {
        self.lines.push(LedgerLine::credit(account_id, amount));
        self
    }

    /// Adds a prepared line
    pub fn line(mut self, line: LedgerLine) -> Self {
        self.lines.push(line);
        self
    }

    /// Sets the originating reference
    pub fn with_reference(mut self, reference_type: impl Into<String>, reference_id: Uuid) -> Self {
        self.reference = Some(EntryReference {
            reference_type: reference_type.into(),
            reference_id,
        });
        self
    }

    /// Sets the owning office
    pub fn with_office(mut self, office_id: OfficeId) -> Self {
        self.office_id = Some(office_id);
        self
    }

    /// The entry's currency, taken from its first line
    pub fn currency(&self) -> Option<Currency> {
        self.lines.first().map(|l| l.debit.currency())
    }

    /// Sum of the debit side across all lines
    pub fn total_debits(&self) -> Decimal {
        self.lines.iter().map(|l| l.debit.amount()).sum()
    }

    /// Sum of the credit side across all lines
    pub fn total_credits(&self) -> Decimal {
        self.lines.iter().map(|l| l.credit.amount()).sum()
    }

    /// Total amount moved by the entry (the debit total)
    pub fn total_amount(&self) -> Decimal {
        self.total_debits()
    }

    /// Returns true if the entry carries a reversal reference
    pub fn is_reversal(&self) -> bool {
        self.reversal_of.is_some()
    }
}

/// Generates tenant-unique journal entry numbers
///
/// Numbers are monotonic within a sequence. The format is internal;
/// callers may only rely on uniqueness.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntryNumberSequence {
    prefix: String,
    next: u64,
}

impl EntryNumberSequence {
    /// Creates a sequence with the given prefix, starting at 1
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: 1,
        }
    }

    /// Resumes a sequence from a persisted counter
    pub fn resume(prefix: impl Into<String>, next: u64) -> Self {
        Self {
            prefix: prefix.into(),
            next,
        }
    }

    /// Returns the next entry number and advances the counter
    pub fn next_number(&mut self) -> String {
        let number = format!("{}-{:08}", self.prefix, self.next);
        self.next += 1;
        number
    }

    /// The counter value the next call will use
    pub fn peek(&self) -> u64 {
        self.next
    }
}

impl Default for EntryNumberSequence {
    fn default() -> Self {
        Self::new("JE")
    }
}
