//! Ledger line types
//!
//! A ledger line is one debit-or-credit row within a journal entry. Lines
//! carry both a debit and a credit amount, exactly one of which is
//! positive on a well-formed line.

use serde::{Deserialize, Serialize};

use core_kernel::{GlAccountId, LedgerLineId, Money};

/// Which side of the books a line touches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntrySide {
    Debit,
    Credit,
}

/// A single line in a journal entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerLine {
    /// Unique line identifier
    pub id: LedgerLineId,
    /// Account the line posts to
    pub account_id: GlAccountId,
    /// Optional description for this line
    pub description: Option<String>,
    /// Debit amount (zero when the line is a credit)
    pub debit: Money,
    /// Credit amount (zero when the line is a debit)
    pub credit: Money,
}

impl LedgerLine {
    /// Creates a debit line
    pub fn debit(account_id: GlAccountId, amount: Money) -> Self {
        Self {
            id: LedgerLineId::new(),
            account_id,
            description: None,
            debit: amount,
            credit: Money::zero(amount.currency()),
        }
    }

    /// Creates a credit line
    pub fn credit(account_id: GlAccountId, amount: Money) -> Self {
        Self {
            id: LedgerLineId::new(),
            account_id,
            description: None,
            debit: Money::zero(amount.currency()),
            credit: amount,
        }
    }

    /// Adds a description to the line
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Returns the side this line posts to
    ///
    /// Returns None when the line is malformed: both sides set, or
    /// neither. Validation turns that None into a diagnostic.
    pub fn side(&self) -> Option<EntrySide> {
        match (self.debit.is_positive(), self.credit.is_positive()) {
            (true, false) => Some(EntrySide::Debit),
            (false, true) => Some(EntrySide::Credit),
            _ => None,
        }
    }

    /// Returns the positive amount of the line, whichever side it is on
    pub fn amount(&self) -> Money {
        match self.side() {
            Some(EntrySide::Debit) => self.debit,
            Some(EntrySide::Credit) => self.credit,
            None => self.debit, // malformed line, caller validates first
        }
    }

    /// Returns a copy of this line with debit and credit swapped
    ///
    /// The swapped line gets a fresh id; it belongs to a new entry.
    pub fn swapped(&self) -> Self {
        Self {
            id: LedgerLineId::new(),
            account_id: self.account_id,
            description: self.description.clone(),
            debit: self.credit,
            credit: self.debit,
        }
    }
}
