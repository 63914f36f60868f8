//! Persistence port for journal entries

use async_trait::async_trait;

use core_kernel::{DomainPort, JournalEntryId, PortError};

use crate::journal::JournalEntry;

/// Storage port for posted journal entries
///
/// Adapters must make each method atomic: an entry's lines are written
/// together or not at all, and `insert_reversal` applies the reversal
/// entry and the original's status flip as one unit. A failure means
/// nothing was applied.
#[async_trait]
pub trait JournalStore: DomainPort {
    /// Loads an entry by id
    async fn load(&self, id: JournalEntryId) -> Result<JournalEntry, PortError>;

    /// Persists a newly posted entry with all of its lines
    async fn insert(&self, entry: &JournalEntry) -> Result<(), PortError>;

    /// Persists a reversal entry together with the reversed original
    async fn insert_reversal(
        &self,
        reversal: &JournalEntry,
        reversed_original: &JournalEntry,
    ) -> Result<(), PortError>;
}
