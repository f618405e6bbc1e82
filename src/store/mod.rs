//! Store capability for tournament records and scrape logs.
//!
//! The persistence mechanics live behind a trait; this crate bundles an
//! in-memory implementation and treats durable backends as external
//! collaborators.

mod memory;

pub use memory::MemoryStore;

use async_trait::async_trait;
use chrono::NaiveDate;
use thiserror::Error;

use crate::models::{NewTournament, ScrapeLogEntry, Tournament};
use crate::query::SearchQuery;

/// Persistence-layer failure, surfaced opaquely to callers.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store backend failure: {0}")]
    Backend(String),
}

/// Persistence capability required from the record store.
#[async_trait]
pub trait TournamentStore: Send + Sync {
    /// Persist a new record, assigning its id and timestamps.
    async fn create(&self, record: NewTournament) -> Result<Tournament, StoreError>;

    /// Find a record matching the dedup key exactly.
    async fn find_by_dedup_key(
        &self,
        name: &str,
        start_date: NaiveDate,
        prefecture: &str,
    ) -> Result<Option<Tournament>, StoreError>;

    /// Matching records ordered by start date (stable), paginated.
    async fn search(
        &self,
        query: &SearchQuery,
        skip: usize,
        take: usize,
    ) -> Result<Vec<Tournament>, StoreError>;

    /// Count of matching records before pagination.
    async fn count(&self, query: &SearchQuery) -> Result<u64, StoreError>;

    /// Append a scrape-run log entry. Entries are never mutated.
    async fn append_log(&self, entry: ScrapeLogEntry) -> Result<(), StoreError>;

    /// Most recent scrape-run log entries, newest first.
    async fn recent_logs(&self, limit: usize) -> Result<Vec<ScrapeLogEntry>, StoreError>;
}
