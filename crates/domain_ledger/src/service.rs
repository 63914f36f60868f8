//! Posting service
//!
//! Orchestrates the posting engine against a `JournalStore`. The service
//! owns the per-entry locking that keeps concurrent reverse attempts from
//! racing each other: two tasks reversing the same entry serialize here,
//! and the loser fails the state-machine check instead of double-posting.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{info, instrument};

use core_kernel::JournalEntryId;

use crate::error::LedgerError;
use crate::journal::JournalEntry;
use crate::ports::JournalStore;
use crate::posting::PostingEngine;

/// Posts and reverses journal entries through a persistence port
///
/// Constructed explicitly with its collaborators; there is no global
/// instance.
pub struct PostingService<S: JournalStore> {
    store: Arc<S>,
    engine: Mutex<PostingEngine>,
    entry_locks: Mutex<HashMap<JournalEntryId, Arc<Mutex<()>>>>,
}

impl<S: JournalStore> PostingService<S> {
    /// Creates a service over the given store and engine
    pub fn new(store: Arc<S>, engine: PostingEngine) -> Self {
        Self {
            store,
            engine: Mutex::new(engine),
            entry_locks: Mutex::new(HashMap::new()),
        }
    }

    /// Posts a draft entry and persists it
    ///
    /// Validation happens before any write. If the store fails, the
    /// entry is not applied anywhere; the caller decides retry policy.
    #[instrument(skip(self, draft), fields(entry_id = %draft.id))]
    pub async fn post(&self, draft: JournalEntry) -> Result<JournalEntry, LedgerError> {
        let posted = {
            let mut engine = self.engine.lock().await;
            engine.post(draft)?
        };

        self.store.insert(&posted).await?;

        info!(
            entry_number = posted.entry_number.as_deref().unwrap_or(""),
            "journal entry persisted"
        );
        Ok(posted)
    }

    /// Reverses a posted entry by id
    ///
    /// Holds the entry's lock across load, state change, and write so a
    /// concurrent second reversal observes the Reversed status and fails
    /// with InvalidStateTransition.
    #[instrument(skip(self), fields(entry_id = %id))]
    pub async fn reverse(
        &self,
        id: JournalEntryId,
        reason: &str,
    ) -> Result<JournalEntry, LedgerError> {
        let lock = self.entry_lock(id).await;
        let _guard = lock.lock().await;

        let mut original = self.store.load(id).await.map_err(|e| {
            if e.is_not_found() {
                LedgerError::EntryNotFound(id.to_string())
            } else {
                LedgerError::Persistence(e)
            }
        })?;

        let reversal = {
            let mut engine = self.engine.lock().await;
            engine.reverse(&mut original, reason)?
        };

        // One atomic write: reversal entry plus the original's flip.
        self.store.insert_reversal(&reversal, &original).await?;

        info!(reversal_id = %reversal.id, "journal entry reversed");
        Ok(reversal)
    }

    async fn entry_lock(&self, id: JournalEntryId) -> Arc<Mutex<()>> {
        let mut locks = self.entry_locks.lock().await;
        locks.entry(id).or_default().clone()
    }
}
