//! Comprehensive tests for domain_ledger

use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal_macros::dec;

use core_kernel::{Currency, GlAccountId, JournalEntryId, Money, TenantMonetaryConfig};

use domain_ledger::{
    validate_entry, Accrual, AccrualStatus, AccrualType, EntryNumberSequence, EntryStatus,
    JournalEntry, LedgerError, PostingEngine, PostingService,
};
use test_utils::{
    assert_entries_mirrored, assert_entry_balanced, balanced_entry_strategy, init_test_tracing,
    InMemoryJournalStore, JournalEntryBuilder,
};

fn kes(amount: rust_decimal::Decimal) -> Money {
    Money::new(amount, Currency::KES)
}

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 15).unwrap()
}

fn service() -> (Arc<InMemoryJournalStore>, PostingService<InMemoryJournalStore>) {
    let store = Arc::new(InMemoryJournalStore::new());
    let config = TenantMonetaryConfig::new(Currency::KES);
    let engine = PostingEngine::new(EntryNumberSequence::new("JE"), config.balance_epsilon());
    let service = PostingService::new(store.clone(), engine);
    (store, service)
}

// ============================================================================
// Posting Service Tests
// ============================================================================

mod posting_service_tests {
    use super::*;

    #[tokio::test]
    async fn test_post_persists_entry() {
        init_test_tracing();
        let (store, service) = service();

        let draft = JournalEntryBuilder::new()
            .with_description("Member deposit")
            .balanced_pair(kes(dec!(1000)))
            .build();
        let draft_id = draft.id;

        let posted = service.post(draft).await.unwrap();

        assert_eq!(posted.status, EntryStatus::Posted);
        assert!(posted.entry_number.is_some());
        assert!(posted.approved_at.is_some());

        let stored = store.get(draft_id).await.unwrap();
        assert_eq!(stored.status, EntryStatus::Posted);
        assert_eq!(stored.entry_number, posted.entry_number);
    }

    #[tokio::test]
    async fn test_post_rejects_unbalanced_before_any_write() {
        let (store, service) = service();

        let draft = JournalEntryBuilder::new()
            .debit(GlAccountId::new(), kes(dec!(1000)))
            .credit(GlAccountId::new(), kes(dec!(900)))
            .build();

        let result = service.post(draft).await;

        match result {
            Err(LedgerError::BalanceMismatch { debits, credits }) => {
                assert_eq!(debits, dec!(1000));
                assert_eq!(credits, dec!(900));
            }
            other => panic!("expected BalanceMismatch, got {:?}", other),
        }
        assert_eq!(store.entry_count().await, 0);
    }

    #[tokio::test]
    async fn test_post_store_failure_leaves_nothing_applied() {
        let (store, service) = service();
        store.fail_writes(true);

        let draft = JournalEntryBuilder::new()
            .balanced_pair(kes(dec!(500)))
            .build();

        assert!(matches!(
            service.post(draft).await,
            Err(LedgerError::Persistence(_))
        ));
        assert_eq!(store.entry_count().await, 0);
    }

    #[tokio::test]
    async fn test_entry_numbers_are_unique_across_posts() {
        let (_store, service) = service();

        let first = service
            .post(JournalEntryBuilder::new().balanced_pair(kes(dec!(100))).build())
            .await
            .unwrap();
        let second = service
            .post(JournalEntryBuilder::new().balanced_pair(kes(dec!(200))).build())
            .await
            .unwrap();

        assert_ne!(first.entry_number, second.entry_number);
    }

    #[tokio::test]
    async fn test_reverse_mirrors_lines_and_flips_original() {
        let (store, service) = service();

        let posted = service
            .post(JournalEntryBuilder::new().balanced_pair(kes(dec!(750))).build())
            .await
            .unwrap();

        let reversal = service.reverse(posted.id, "entered twice").await.unwrap();

        assert_eq!(reversal.status, EntryStatus::Posted);
        assert_eq!(reversal.reversal_of, Some(posted.id));
        assert_entry_balanced(&reversal);
        assert_entries_mirrored(&posted, &reversal);

        let stored_original = store.get(posted.id).await.unwrap();
        assert_eq!(stored_original.status, EntryStatus::Reversed);
        assert_eq!(stored_original.reversed_by, Some(reversal.id));

        let stored_reversal = store.get(reversal.id).await.unwrap();
        assert_eq!(stored_reversal.status, EntryStatus::Posted);
    }

    #[tokio::test]
    async fn test_double_reverse_fails_with_state_error() {
        let (_store, service) = service();

        let posted = service
            .post(JournalEntryBuilder::new().balanced_pair(kes(dec!(300))).build())
            .await
            .unwrap();

        service.reverse(posted.id, "first").await.unwrap();

        assert!(matches!(
            service.reverse(posted.id, "second").await,
            Err(LedgerError::InvalidStateTransition {
                from: EntryStatus::Reversed,
                attempted: "reverse",
            })
        ));
    }

    #[tokio::test]
    async fn test_reverse_missing_entry_is_not_found() {
        let (_store, service) = service();

        assert!(matches!(
            service.reverse(JournalEntryId::new(), "nothing there").await,
            Err(LedgerError::EntryNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_concurrent_reversals_serialize_one_winner() {
        let (store, service) = service();
        let service = Arc::new(service);

        let posted = service
            .post(JournalEntryBuilder::new().balanced_pair(kes(dec!(900))).build())
            .await
            .unwrap();

        let a = {
            let service = service.clone();
            let id = posted.id;
            tokio::spawn(async move { service.reverse(id, "task a").await })
        };
        let b = {
            let service = service.clone();
            let id = posted.id;
            tokio::spawn(async move { service.reverse(id, "task b").await })
        };

        let results = [a.await.unwrap(), b.await.unwrap()];
        let successes = results.iter().filter(|r| r.is_ok()).count();

        assert_eq!(successes, 1, "exactly one reversal must win");
        // one reversal entry plus the original
        assert_eq!(store.entry_count().await, 2);
    }
}

// ============================================================================
// Accrual Flow Tests
// ============================================================================

mod accrual_flow_tests {
    use super::*;

    #[tokio::test]
    async fn test_accrual_post_and_reverse_through_service() {
        let (_store, service) = service();

        let mut accrual = Accrual::new(
            "Accrued loan interest",
            AccrualType::Income,
            kes(dec!(800)),
            NaiveDate::from_ymd_opt(2025, 3, 31).unwrap(),
            GlAccountId::new(),
            GlAccountId::new(),
        )
        .unwrap()
        .with_reversal_date(NaiveDate::from_ymd_opt(2025, 4, 1).unwrap());

        let posted = service.post(accrual.posting_draft()).await.unwrap();
        accrual.mark_posted(posted.id).unwrap();
        assert_eq!(accrual.status, AccrualStatus::Posted);

        let reversal = service.post(accrual.reversal_draft().unwrap()).await.unwrap();
        accrual.mark_reversed(reversal.id).unwrap();
        assert_eq!(accrual.status, AccrualStatus::Reversed);

        // the offsetting entry mirrors the recognition entry
        assert_eq!(posted.lines[0].account_id, reversal.lines[1].account_id);
        assert_eq!(posted.total_amount(), reversal.total_amount());
    }
}

// ============================================================================
// Validator Property Tests
// ============================================================================

mod validator_properties {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn generated_balanced_entries_validate(entry in balanced_entry_strategy()) {
            prop_assert!(validate_entry(&entry, dec!(0.01)).is_ok());
        }

        #[test]
        fn skewing_one_line_breaks_the_balance(
            entry in balanced_entry_strategy(),
            skew in 1i64..1_000_000i64,
        ) {
            let mut entry = entry;
            let last = entry.lines.len() - 1;
            entry.lines[last].credit = entry.lines[last]
                .credit
                .checked_add(&Money::from_minor(skew, Currency::KES))
                .unwrap();

            let result = validate_entry(&entry, dec!(0.01));
            let is_balance_mismatch = matches!(result, Err(LedgerError::BalanceMismatch { .. }));
            prop_assert!(is_balance_mismatch);
        }
    }
}

// ============================================================================
// Draft Construction Tests
// ============================================================================

mod draft_tests {
    use super::*;

    #[test]
    fn test_builder_and_fluent_constructor_agree() {
        let account_a = GlAccountId::new();
        let account_b = GlAccountId::new();

        let built = JournalEntryBuilder::new()
            .with_description("Comparison")
            .with_date(date())
            .debit(account_a, kes(dec!(100)))
            .credit(account_b, kes(dec!(100)))
            .build();

        let fluent = JournalEntry::draft("Comparison", date())
            .debit(account_a, kes(dec!(100)))
            .credit(account_b, kes(dec!(100)));

        assert_eq!(built.description, fluent.description);
        assert_eq!(built.transaction_date, fluent.transaction_date);
        assert_eq!(built.total_debits(), fluent.total_debits());
        assert_eq!(built.total_credits(), fluent.total_credits());
    }
}
