//! Query engine: optional filter composition, ordering, and pagination.

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::{Category, Tournament, TournamentStatus};
use crate::store::{StoreError, TournamentStore};

/// A validated search query. All filters are optional and combined with
/// logical AND; the keyword matches name OR description OR venue.
#[derive(Debug, Clone, Default)]
pub struct SearchQuery {
    pub prefecture: Option<String>,
    pub city: Option<String>,
    pub category: Option<Category>,
    /// Lower bound on the start date.
    pub date_from: Option<NaiveDate>,
    /// Upper bound, also applied to the start date. The public interface
    /// labels this "endDate" but it never touches the record's own end
    /// date field.
    pub date_to: Option<NaiveDate>,
    pub keyword: Option<String>,
    pub page: u32,
    pub limit: u32,
}

impl SearchQuery {
    /// Whether a record satisfies every active filter.
    ///
    /// Unpublished records never match, regardless of filters.
    pub fn matches(&self, t: &Tournament) -> bool {
        if t.status != TournamentStatus::Published {
            return false;
        }
        if let Some(pref) = self.prefecture.as_deref() {
            if t.prefecture != pref {
                return false;
            }
        }
        if let Some(city) = self.city.as_deref() {
            match t.city.as_deref() {
                Some(c) if c.contains(city) => {}
                _ => return false,
            }
        }
        if let Some(category) = self.category {
            if t.category != category {
                return false;
            }
        }
        if let Some(from) = self.date_from {
            if t.start_date < from {
                return false;
            }
        }
        if let Some(to) = self.date_to {
            if t.start_date > to {
                return false;
            }
        }
        if let Some(keyword) = self.keyword.as_deref() {
            let hit = t.name.contains(keyword)
                || t.description.as_deref().is_some_and(|d| d.contains(keyword))
                || t.venue.as_deref().is_some_and(|v| v.contains(keyword));
            if !hit {
                return false;
            }
        }
        true
    }

    pub fn skip(&self) -> usize {
        self.page.saturating_sub(1) as usize * self.limit as usize
    }
}

/// Pagination metadata returned alongside a result page.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    pub total_pages: u64,
}

/// One page of search results plus the pre-pagination total.
#[derive(Debug, Clone, Serialize)]
pub struct SearchResults {
    pub tournaments: Vec<Tournament>,
    pub pagination: Pagination,
}

/// Run a search against the store: filter, order by start date, paginate.
pub async fn search(
    store: &dyn TournamentStore,
    query: &SearchQuery,
) -> Result<SearchResults, StoreError> {
    let per_page = query.limit.max(1);
    let records = store
        .search(query, query.skip(), per_page as usize)
        .await?;
    let total = store.count(query).await?;

    Ok(SearchResults {
        tournaments: records,
        pagination: Pagination {
            page: query.page,
            limit: per_page,
            total,
            total_pages: total.div_ceil(per_page as u64),
        },
    })
}
