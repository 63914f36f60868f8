//! Journal posting engine
//!
//! Turns validated drafts into immutable posted entries and generates
//! reversal entries. The lifecycle is a strict state machine:
//!
//! ```text
//! Draft --post--> Posted --reverse--> Reversed
//! ```
//!
//! Posted is the only state with an outbound edge, and that edge marks
//! the original Reversed while producing a new, immediately posted
//! mirror entry.

use chrono::Utc;
use rust_decimal::Decimal;
use tracing::debug;

use crate::error::LedgerError;
use crate::journal::{EntryNumberSequence, EntryStatus, JournalEntry};
use crate::validate::validate_entry;

/// Posts and reverses journal entries for one tenant
#[derive(Debug)]
pub struct PostingEngine {
    sequence: EntryNumberSequence,
    epsilon: Decimal,
}

impl PostingEngine {
    /// Creates an engine with the given number sequence and balance
    /// tolerance
    pub fn new(sequence: EntryNumberSequence, epsilon: Decimal) -> Self {
        Self { sequence, epsilon }
    }

    /// The balance tolerance this engine validates against
    pub fn epsilon(&self) -> Decimal {
        self.epsilon
    }

    /// Posts a draft entry
    ///
    /// Validates the draft, assigns a tenant-unique entry number, and
    /// stamps the approval time. On validation failure the error is
    /// returned untouched and no state changes.
    pub fn post(&mut self, mut entry: JournalEntry) -> Result<JournalEntry, LedgerError> {
        if entry.status != EntryStatus::Draft {
            return Err(LedgerError::InvalidStateTransition {
                from: entry.status,
                attempted: "post",
            });
        }

        validate_entry(&entry, self.epsilon)?;

        entry.entry_number = Some(self.sequence.next_number());
        entry.status = EntryStatus::Posted;
        entry.approved_at = Some(Utc::now());

        debug!(
            entry_id = %entry.id,
            entry_number = entry.entry_number.as_deref().unwrap_or(""),
            amount = %entry.total_amount(),
            "posted journal entry"
        );

        Ok(entry)
    }

    /// Reverses a posted entry
    ///
    /// Produces a new entry whose lines are the exact debit/credit swap
    /// of the original, posted immediately (reversals are not drafts).
    /// The original's status becomes Reversed and the two entries are
    /// linked in both directions. Only Posted entries can be reversed.
    pub fn reverse(
        &mut self,
        original: &mut JournalEntry,
        reason: &str,
    ) -> Result<JournalEntry, LedgerError> {
        if original.status != EntryStatus::Posted {
            return Err(LedgerError::InvalidStateTransition {
                from: original.status,
                attempted: "reverse",
            });
        }

        let mut reversal = JournalEntry::draft(
            format!(
                "Reversal of {}: {}",
                original.entry_number.as_deref().unwrap_or("entry"),
                reason
            ),
            original.transaction_date,
        )
        .with_reference("reversal", *original.id.as_uuid());

        reversal.office_id = original.office_id;
        reversal.lines = original.lines.iter().map(|l| l.swapped()).collect();
        reversal.reversal_of = Some(original.id);

        // Mirror of a valid entry is valid; number and stamp it directly.
        reversal.entry_number = Some(self.sequence.next_number());
        reversal.status = EntryStatus::Posted;
        reversal.approved_at = Some(Utc::now());

        original.status = EntryStatus::Reversed;
        original.reversed_by = Some(reversal.id);

        debug!(
            original_id = %original.id,
            reversal_id = %reversal.id,
            "reversed journal entry"
        );

        Ok(reversal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::journal::EntryNumberSequence;
    use crate::line::EntrySide;
    use chrono::NaiveDate;
    use core_kernel::{Currency, GlAccountId, Money};
    use rust_decimal_macros::dec;

    fn engine() -> PostingEngine {
        PostingEngine::new(EntryNumberSequence::new("JE"), dec!(0.01))
    }

    fn balanced_draft() -> JournalEntry {
        JournalEntry::draft(
            "Member deposit",
            NaiveDate::from_ymd_opt(2025, 2, 1).unwrap(),
        )
        .debit(GlAccountId::new(), Money::new(dec!(1000), Currency::KES))
        .credit(GlAccountId::new(), Money::new(dec!(1000), Currency::KES))
    }

    #[test]
    fn test_post_assigns_number_and_approval() {
        let posted = engine().post(balanced_draft()).unwrap();

        assert_eq!(posted.status, EntryStatus::Posted);
        assert_eq!(posted.entry_number.as_deref(), Some("JE-00000001"));
        assert!(posted.approved_at.is_some());
    }

    #[test]
    fn test_post_rejects_unbalanced_draft() {
        let draft = JournalEntry::draft(
            "Unbalanced",
            NaiveDate::from_ymd_opt(2025, 2, 1).unwrap(),
        )
        .debit(GlAccountId::new(), Money::new(dec!(1000), Currency::KES))
        .credit(GlAccountId::new(), Money::new(dec!(900), Currency::KES));

        assert!(matches!(
            engine().post(draft),
            Err(LedgerError::BalanceMismatch { .. })
        ));
    }

    #[test]
    fn test_post_rejects_already_posted() {
        let mut engine = engine();
        let posted = engine.post(balanced_draft()).unwrap();

        assert!(matches!(
            engine.post(posted),
            Err(LedgerError::InvalidStateTransition {
                from: EntryStatus::Posted,
                attempted: "post",
            })
        ));
    }

    #[test]
    fn test_reverse_swaps_lines_and_links() {
        let mut engine = engine();
        let mut posted = engine.post(balanced_draft()).unwrap();
        let reversal = engine.reverse(&mut posted, "entered twice").unwrap();

        assert_eq!(posted.status, EntryStatus::Reversed);
        assert_eq!(posted.reversed_by, Some(reversal.id));
        assert_eq!(reversal.reversal_of, Some(posted.id));
        assert_eq!(reversal.status, EntryStatus::Posted);
        assert!(reversal.entry_number.is_some());
        assert_ne!(reversal.entry_number, posted.entry_number);

        for (orig, rev) in posted.lines.iter().zip(reversal.lines.iter()) {
            assert_eq!(orig.account_id, rev.account_id);
            assert_eq!(orig.debit, rev.credit);
            assert_eq!(orig.credit, rev.debit);
        }

        let reference = reversal.reference.as_ref().unwrap();
        assert_eq!(reference.reference_type, "reversal");
        assert_eq!(reference.reference_id, *posted.id.as_uuid());
    }

    #[test]
    fn test_reverse_twice_fails() {
        let mut engine = engine();
        let mut posted = engine.post(balanced_draft()).unwrap();
        engine.reverse(&mut posted, "first").unwrap();

        assert!(matches!(
            engine.reverse(&mut posted, "second"),
            Err(LedgerError::InvalidStateTransition {
                from: EntryStatus::Reversed,
                attempted: "reverse",
            })
        ));
    }

    #[test]
    fn test_reverse_draft_fails() {
        let mut draft = balanced_draft();

        assert!(matches!(
            engine().reverse(&mut draft, "not yet posted"),
            Err(LedgerError::InvalidStateTransition {
                from: EntryStatus::Draft,
                attempted: "reverse",
            })
        ));
    }

    #[test]
    fn test_reversal_lines_keep_sides_consistent() {
        let mut engine = engine();
        let mut posted = engine.post(balanced_draft()).unwrap();
        let reversal = engine.reverse(&mut posted, "swap check").unwrap();

        assert_eq!(reversal.lines[0].side(), Some(EntrySide::Credit));
        assert_eq!(reversal.lines[1].side(), Some(EntrySide::Debit));
        assert_eq!(reversal.total_debits(), reversal.total_credits());
    }
}
