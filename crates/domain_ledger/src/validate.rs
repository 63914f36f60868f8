//! Journal entry validation
//!
//! Pure double-entry checks, run before any persistence. Deterministic
//! given the entry and the tenant's balance epsilon.

use rust_decimal::Decimal;

use crate::error::{LedgerError, LineIssue};
use crate::journal::JournalEntry;

/// Validates the double-entry invariants of a journal entry
///
/// Rules:
/// - at least two lines
/// - every line posts to a non-blank account
/// - every line carries exactly one positive side, no negatives
/// - all lines share the entry's currency
/// - total debits equal total credits within `epsilon`
///
/// The epsilon comes from the tenant's monetary configuration
/// (`TenantMonetaryConfig::balance_epsilon`), one minor currency unit.
pub fn validate_entry(entry: &JournalEntry, epsilon: Decimal) -> Result<(), LedgerError> {
    if entry.lines.len() < 2 {
        return Err(LedgerError::LineCountTooLow {
            actual: entry.lines.len(),
        });
    }

    let entry_currency = entry.currency();

    for (index, line) in entry.lines.iter().enumerate() {
        if line.account_id.is_nil() {
            return Err(LedgerError::BlankAccount { index });
        }
        if line.debit.is_negative() || line.credit.is_negative() {
            return Err(LedgerError::InvalidLine {
                index,
                issue: LineIssue::NegativeAmount,
            });
        }
        if line.debit.currency() != line.credit.currency()
            || Some(line.debit.currency()) != entry_currency
        {
            return Err(LedgerError::InvalidLine {
                index,
                issue: LineIssue::CurrencyMismatch,
            });
        }
        match (line.debit.is_positive(), line.credit.is_positive()) {
            (true, true) => {
                return Err(LedgerError::InvalidLine {
                    index,
                    issue: LineIssue::BothSidesSet,
                })
            }
            (false, false) => {
                return Err(LedgerError::InvalidLine {
                    index,
                    issue: LineIssue::NeitherSideSet,
                })
            }
            _ => {}
        }
    }

    let debits = entry.total_debits();
    let credits = entry.total_credits();
    if (debits - credits).abs() >= epsilon {
        return Err(LedgerError::BalanceMismatch { debits, credits });
    }

    Ok(())
}
