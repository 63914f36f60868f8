//! Custom Test Assertions
//!
//! Specialized assertion helpers for domain types that give more
//! meaningful error messages than standard assertions.

use rust_decimal::Decimal;

use core_kernel::Money;
use domain_ledger::JournalEntry;
use domain_loans::{Allocation, LoanComponent, OutstandingBalances};

/// Asserts that two Money values are approximately equal within a tolerance
///
/// # Panics
///
/// Panics if the currencies don't match or the amounts differ by more
/// than the tolerance.
pub fn assert_money_approx_eq(actual: &Money, expected: &Money, tolerance: Decimal) {
    assert_eq!(
        actual.currency(),
        expected.currency(),
        "Currency mismatch: actual={}, expected={}",
        actual.currency(),
        expected.currency()
    );

    let diff = (actual.amount() - expected.amount()).abs();
    assert!(
        diff <= tolerance,
        "Money amounts differ by more than tolerance: actual={}, expected={}, diff={}, tolerance={}",
        actual.amount(),
        expected.amount(),
        diff,
        tolerance
    );
}

/// Asserts that a journal entry's debits equal its credits exactly
pub fn assert_entry_balanced(entry: &JournalEntry) {
    assert_eq!(
        entry.total_debits(),
        entry.total_credits(),
        "Entry {} is unbalanced: debits={}, credits={}",
        entry.id,
        entry.total_debits(),
        entry.total_credits()
    );
}

/// Asserts that an allocation conserves the payment amount and respects
/// the outstanding balances
pub fn assert_allocation_conserves(
    allocation: &Allocation,
    payment: &Money,
    outstanding: &OutstandingBalances,
) {
    let total = allocation.total().expect("allocation total");
    assert_eq!(
        total.amount(),
        payment.amount(),
        "Allocation total {} does not equal payment {}",
        total.amount(),
        payment.amount()
    );

    for component in LoanComponent::ALL {
        let allocated = allocation.component(component);
        let open = outstanding.component(component);
        assert!(
            allocated.amount() <= open.amount(),
            "{} allocation {} exceeds outstanding {}",
            component,
            allocated.amount(),
            open.amount()
        );
    }
}

/// Asserts that the lines of one entry are the debit/credit mirror of
/// another's
pub fn assert_entries_mirrored(original: &JournalEntry, reversal: &JournalEntry) {
    assert_eq!(
        original.lines.len(),
        reversal.lines.len(),
        "Line counts differ: {} vs {}",
        original.lines.len(),
        reversal.lines.len()
    );

    for (index, (orig, rev)) in original.lines.iter().zip(reversal.lines.iter()).enumerate() {
        assert_eq!(
            orig.account_id, rev.account_id,
            "Line {} accounts differ",
            index
        );
        assert_eq!(orig.debit, rev.credit, "Line {} debit not mirrored", index);
        assert_eq!(orig.credit, rev.debit, "Line {} credit not mirrored", index);
    }
}
