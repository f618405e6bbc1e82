//! Deduplicating ingestion pipeline.
//!
//! Candidates are processed strictly sequentially with a politeness delay
//! between store writes. The delay limits load on the source and the
//! store; do not parallelize this loop.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::models::{Category, NewTournament, ScrapeLogEntry, ScrapeStatus};
use crate::scrapers::{fetch_listing, FetchError, HttpClient, RawCandidate, SourceConfig};
use crate::scrapers::normalize::{extract_prefecture, parse_date};
use crate::store::{StoreError, TournamentStore};
use crate::validation::sanitize_tournament;

/// Ingestion pipeline failure, re-raised to the caller after being
/// captured in the scrape-run log.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Outcome of one ingestion run.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct IngestSummary {
    /// Candidates that normalized into persistable records.
    pub scraped: usize,
    /// Novel records persisted this run.
    pub inserted: usize,
    /// Candidates skipped as duplicates of existing records.
    pub skipped: usize,
}

/// Fetches a source listing and persists novel records.
pub struct Ingestor {
    store: Arc<dyn TournamentStore>,
    client: HttpClient,
    delay: Duration,
}

impl Ingestor {
    pub fn new(store: Arc<dyn TournamentStore>, client: HttpClient, delay: Duration) -> Self {
        Self {
            store,
            client,
            delay,
        }
    }

    /// Run the pipeline for one source.
    ///
    /// Writes exactly one scrape-run log entry: success with the scraped
    /// count, or error with the failure message. Failures are re-raised
    /// after logging.
    pub async fn ingest(&self, source: &SourceConfig) -> Result<IngestSummary, IngestError> {
        let url = source.listing_url();

        let result = match fetch_listing(&self.client, source).await {
            Ok(candidates) => self
                .ingest_candidates(candidates, source)
                .await
                .map_err(IngestError::from),
            Err(e) => Err(e.into()),
        };

        match &result {
            Ok(summary) => {
                self.store
                    .append_log(ScrapeLogEntry::new(
                        &source.id,
                        &url,
                        ScrapeStatus::Success,
                        format!("{} tournaments scraped", summary.scraped),
                    ))
                    .await?;
                info!(
                    source = %source.id,
                    scraped = summary.scraped,
                    inserted = summary.inserted,
                    skipped = summary.skipped,
                    "ingestion run complete"
                );
            }
            Err(e) => {
                // History must survive even when the run fails; a log
                // write failure is reported but does not mask the cause.
                if let Err(log_err) = self
                    .store
                    .append_log(ScrapeLogEntry::new(
                        &source.id,
                        &url,
                        ScrapeStatus::Error,
                        e.to_string(),
                    ))
                    .await
                {
                    warn!(source = %source.id, error = %log_err, "failed to record scrape log entry");
                }
            }
        }

        result
    }

    /// Normalize and persist candidates, skipping duplicates of the
    /// (name, start date, prefecture) key.
    async fn ingest_candidates(
        &self,
        candidates: Vec<RawCandidate>,
        source: &SourceConfig,
    ) -> Result<IngestSummary, StoreError> {
        let url = source.listing_url();
        let category = source.default_category.unwrap_or(Category::General);
        let mut summary = IngestSummary::default();

        for candidate in candidates {
            let Some(start_date) = parse_date(&candidate.date_text) else {
                debug!(
                    source = %source.id,
                    name = %candidate.name,
                    date_text = %candidate.date_text,
                    "dropping candidate with unparsable date"
                );
                continue;
            };
            let prefecture = extract_prefecture(&candidate.location_text);
            summary.scraped += 1;

            let mut record =
                NewTournament::new(candidate.name, start_date, prefecture.to_string(), category);
            record.source_url = Some(url.clone());
            let record = sanitize_tournament(record);

            let existing = self
                .store
                .find_by_dedup_key(&record.name, record.start_date, &record.prefecture)
                .await?;
            if existing.is_some() {
                summary.skipped += 1;
            } else {
                self.store.create(record).await?;
                summary.inserted += 1;
            }

            // Politeness delay between consecutive store operations.
            tokio::time::sleep(self.delay).await;
        }

        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::SearchQuery;
    use crate::store::MemoryStore;

    fn candidate(name: &str, date_text: &str, location: &str) -> RawCandidate {
        RawCandidate {
            name: name.to_string(),
            date_text: date_text.to_string(),
            location_text: location.to_string(),
        }
    }

    fn ingestor(store: Arc<MemoryStore>) -> Ingestor {
        Ingestor::new(
            store,
            HttpClient::new(Duration::from_secs(1)),
            Duration::ZERO,
        )
    }

    async fn store_count(store: &MemoryStore) -> u64 {
        store
            .count(&SearchQuery {
                page: 1,
                limit: 20,
                ..Default::default()
            })
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn ingesting_the_same_key_twice_stores_one_record() {
        let store = Arc::new(MemoryStore::new());
        let ingestor = ingestor(store.clone());
        let source = SourceConfig::default();
        let batch = vec![candidate("県大会", "2026年10月1日", "東京都")];

        let first = ingestor
            .ingest_candidates(batch.clone(), &source)
            .await
            .unwrap();
        let second = ingestor.ingest_candidates(batch, &source).await.unwrap();

        assert_eq!(first.inserted, 1);
        assert_eq!(second.inserted, 0);
        assert_eq!(second.skipped, 1);
        assert_eq!(store_count(&store).await, 1);
    }

    #[tokio::test]
    async fn unparsable_dates_drop_the_candidate_not_the_run() {
        let store = Arc::new(MemoryStore::new());
        let ingestor = ingestor(store.clone());
        let source = SourceConfig::default();

        let summary = ingestor
            .ingest_candidates(
                vec![
                    candidate("日付不明の大会", "未定", "東京都"),
                    candidate("県大会", "2026-10-01", "大阪府"),
                ],
                &source,
            )
            .await
            .unwrap();

        assert_eq!(summary.scraped, 1);
        assert_eq!(summary.inserted, 1);
        assert_eq!(store_count(&store).await, 1);
    }

    #[tokio::test]
    async fn scraped_records_are_published_with_source_defaults() {
        let store = Arc::new(MemoryStore::new());
        let ingestor = ingestor(store.clone());
        let source = SourceConfig::default();

        ingestor
            .ingest_candidates(
                vec![candidate("会場未定の大会", "2026-10-01", "オンライン")],
                &source,
            )
            .await
            .unwrap();

        let stored = store
            .find_by_dedup_key(
                "会場未定の大会",
                chrono::NaiveDate::from_ymd_opt(2026, 10, 1).unwrap(),
                "その他",
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.category, Category::General);
        assert_eq!(stored.source_url.as_deref(), Some("https://minton.jp/tournament"));
    }

    #[tokio::test]
    async fn fetch_failure_writes_an_error_log_and_reraises() {
        let store = Arc::new(MemoryStore::new());
        let ingestor = ingestor(store.clone());
        let source = SourceConfig {
            id: "unreachable".to_string(),
            base_url: "http://127.0.0.1:9".to_string(),
            ..Default::default()
        };

        let result = ingestor.ingest(&source).await;
        assert!(matches!(result, Err(IngestError::Fetch(_))));

        let logs = store.recent_logs(10).await.unwrap();
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].status, ScrapeStatus::Error);
        assert_eq!(logs[0].source, "unreachable");
    }
}
