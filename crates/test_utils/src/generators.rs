//! Property-Based Test Generators
//!
//! Proptest strategies for generating random test data that maintains
//! domain invariants.

use proptest::prelude::*;
use rust_decimal::Decimal;
use uuid::Uuid;

use core_kernel::{Currency, GlAccountId, Money};
use domain_ledger::JournalEntry;
use domain_loans::OutstandingBalances;

use crate::fixtures::DateFixtures;

/// Strategy for generating Currency values
pub fn currency_strategy() -> impl Strategy<Value = Currency> {
    prop_oneof![
        Just(Currency::KES),
        Just(Currency::TZS),
        Just(Currency::UGX),
        Just(Currency::RWF),
        Just(Currency::NGN),
        Just(Currency::GHS),
        Just(Currency::ZMW),
        Just(Currency::USD),
        Just(Currency::EUR),
        Just(Currency::INR),
    ]
}

/// Strategy for generating positive amounts in minor units
pub fn positive_amount_minor_strategy() -> impl Strategy<Value = i64> {
    1i64..1_000_000_000i64
}

/// Strategy for generating positive KES Money values
pub fn positive_kes_strategy() -> impl Strategy<Value = Money> {
    positive_amount_minor_strategy().prop_map(|amount| Money::from_minor(amount, Currency::KES))
}

/// Strategy for generating positive Money values in any currency
pub fn positive_money_strategy() -> impl Strategy<Value = Money> {
    (positive_amount_minor_strategy(), currency_strategy())
        .prop_map(|(amount, currency)| Money::from_minor(amount, currency))
}

/// Strategy for generating percentage rates (0% to 100%)
pub fn percentage_strategy() -> impl Strategy<Value = Decimal> {
    (0u32..10_000u32).prop_map(|n| Decimal::new(n as i64, 2))
}

/// Strategy for generating GL account ids
pub fn gl_account_id_strategy() -> impl Strategy<Value = GlAccountId> {
    any::<[u8; 16]>()
        .prop_filter("nil account id", |bytes| bytes.iter().any(|b| *b != 0))
        .prop_map(|bytes| GlAccountId::from_uuid(Uuid::from_bytes(bytes)))
}

/// Strategy for generating outstanding loan balances in KES
pub fn outstanding_balances_strategy() -> impl Strategy<Value = OutstandingBalances> {
    (
        0i64..100_000_000i64,
        0i64..10_000_000i64,
        0i64..1_000_000i64,
        0i64..1_000_000i64,
    )
        .prop_map(|(principal, interest, fee, penalty)| {
            OutstandingBalances::new(
                Money::from_minor(principal, Currency::KES),
                Money::from_minor(interest, Currency::KES),
                Money::from_minor(fee, Currency::KES),
                Money::from_minor(penalty, Currency::KES),
            )
        })
}

/// Strategy for generating balanced journal entry drafts
///
/// Emits one debit line per generated amount and a single credit line
/// carrying the total, so the entry always balances and always has at
/// least two lines.
pub fn balanced_entry_strategy() -> impl Strategy<Value = JournalEntry> {
    proptest::collection::vec(1i64..100_000_000i64, 1..6).prop_map(|amounts| {
        let mut entry = JournalEntry::draft("Generated entry", DateFixtures::transaction_date());
        let mut total = 0i64;
        for amount in amounts {
            total += amount;
            entry = entry.debit(GlAccountId::new(), Money::from_minor(amount, Currency::KES));
        }
        entry.credit(GlAccountId::new(), Money::from_minor(total, Currency::KES))
    })
}
