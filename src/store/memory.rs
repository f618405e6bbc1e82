//! In-memory store backed by a tokio `RwLock`.

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use tokio::sync::RwLock;

use crate::models::{NewTournament, ScrapeLogEntry, Tournament};
use crate::query::SearchQuery;

use super::{StoreError, TournamentStore};

#[derive(Debug, Default)]
struct Inner {
    next_id: i64,
    tournaments: Vec<Tournament>,
    logs: Vec<ScrapeLogEntry>,
}

/// Process-local store. Insertion order is preserved, which gives the
/// stable tie-break the query engine relies on.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TournamentStore for MemoryStore {
    async fn create(&self, record: NewTournament) -> Result<Tournament, StoreError> {
        let mut inner = self.inner.write().await;
        inner.next_id += 1;
        let now = Utc::now();
        let tournament = Tournament {
            id: inner.next_id,
            name: record.name,
            description: record.description,
            start_date: record.start_date,
            end_date: record.end_date,
            prefecture: record.prefecture,
            city: record.city,
            venue: record.venue,
            category: record.category,
            level: record.level,
            entry_fee: record.entry_fee,
            max_entries: record.max_entries,
            deadline: record.deadline,
            contact_info: record.contact_info,
            source_url: record.source_url,
            status: record.status,
            created_at: now,
            updated_at: now,
        };
        inner.tournaments.push(tournament.clone());
        Ok(tournament)
    }

    async fn find_by_dedup_key(
        &self,
        name: &str,
        start_date: NaiveDate,
        prefecture: &str,
    ) -> Result<Option<Tournament>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner
            .tournaments
            .iter()
            .find(|t| t.dedup_key() == (name, start_date, prefecture))
            .cloned())
    }

    async fn search(
        &self,
        query: &SearchQuery,
        skip: usize,
        take: usize,
    ) -> Result<Vec<Tournament>, StoreError> {
        let inner = self.inner.read().await;
        let mut matching: Vec<Tournament> = inner
            .tournaments
            .iter()
            .filter(|t| query.matches(t))
            .cloned()
            .collect();
        matching.sort_by_key(|t| t.start_date);
        Ok(matching.into_iter().skip(skip).take(take).collect())
    }

    async fn count(&self, query: &SearchQuery) -> Result<u64, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.tournaments.iter().filter(|t| query.matches(t)).count() as u64)
    }

    async fn append_log(&self, entry: ScrapeLogEntry) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        inner.logs.push(entry);
        Ok(())
    }

    async fn recent_logs(&self, limit: usize) -> Result<Vec<ScrapeLogEntry>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.logs.iter().rev().take(limit).cloned().collect())
    }
}
