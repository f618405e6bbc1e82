//! HTTP request handlers.
//!
//! Validation and rate-limit conditions are reported before any state
//! mutation. Validation errors surface per-field messages; all other
//! failures surface a generic message while full detail goes to the
//! server logs.

use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use serde_json::json;
use tracing::error;

use crate::query;
use crate::validation::{
    sanitize_tournament, validate_search, validate_tournament, DateRule, SearchParams,
    TournamentInput, ValidationError,
};

use super::middleware::{client_key, rate_limited_response};
use super::AppState;

/// Health check endpoint for container orchestration.
pub async fn health() -> impl IntoResponse {
    StatusCode::OK
}

fn validation_failure(errors: Vec<ValidationError>) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({
            "error": "入力データが正しくありません",
            "details": errors,
        })),
    )
        .into_response()
}

/// `GET /api/tournaments` - filtered, paginated search.
pub async fn search_tournaments(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<SearchParams>,
) -> Response {
    if !state.api_limiter.allow(&client_key(&headers)) {
        return rate_limited_response();
    }

    let query = match validate_search(&params) {
        Ok(query) => query,
        Err(errors) => return validation_failure(errors),
    };

    match query::search(state.store.as_ref(), &query).await {
        Ok(results) => Json(results).into_response(),
        Err(e) => {
            error!(error = %e, "search failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "検索処理でエラーが発生しました" })),
            )
                .into_response()
        }
    }
}

/// `POST /api/tournaments` - manual submission.
pub async fn create_tournament(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(input): Json<TournamentInput>,
) -> Response {
    if !state.api_limiter.allow(&client_key(&headers)) {
        return rate_limited_response();
    }

    let record = match validate_tournament(&input, DateRule::FutureOnly) {
        Ok(record) => sanitize_tournament(record),
        Err(errors) => return validation_failure(errors),
    };

    match state.store.create(record).await {
        Ok(tournament) => (StatusCode::CREATED, Json(tournament)).into_response(),
        Err(e) => {
            error!(error = %e, "tournament creation failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "大会登録でエラーが発生しました" })),
            )
                .into_response()
        }
    }
}

/// `POST /api/scrape` - run the ingestion pipeline for the configured
/// source.
pub async fn trigger_scrape(State(state): State<AppState>) -> Response {
    let Some(source) = state.source.as_ref() else {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": "スクレイピング対象が設定されていません" })),
        )
            .into_response();
    };

    match state.ingestor.ingest(source).await {
        Ok(summary) => Json(json!({
            "message": "Scraping completed successfully",
            "scraped": summary.scraped,
            "inserted": summary.inserted,
            "skipped": summary.skipped,
            "timestamp": Utc::now().to_rfc3339(),
        }))
        .into_response(),
        Err(e) => {
            // Detail stays in the server logs and the scrape-run log.
            error!(source = %source.id, error = %e, "scrape run failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Scraping failed" })),
            )
                .into_response()
        }
    }
}
