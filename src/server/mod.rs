//! HTTP surface for search, submission, and scrape triggering.

mod handlers;
mod middleware;
mod routes;

pub use routes::create_router;

use std::net::SocketAddr;
use std::sync::Arc;

use crate::config::Settings;
use crate::ingest::Ingestor;
use crate::rate_limit::RateLimiter;
use crate::scrapers::{HttpClient, SourceConfig};
use crate::store::TournamentStore;

/// Shared state for the web server.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn TournamentStore>,
    /// Coarse gate applied to every API request.
    pub global_limiter: Arc<RateLimiter>,
    /// Stricter gate applied inside the tournament handlers.
    pub api_limiter: Arc<RateLimiter>,
    pub ingestor: Arc<Ingestor>,
    /// Source scraped by the trigger endpoint.
    pub source: Option<SourceConfig>,
}

impl AppState {
    pub fn new(settings: &Settings, store: Arc<dyn TournamentStore>) -> Self {
        let client = HttpClient::new(settings.request_timeout());
        let ingestor = Arc::new(Ingestor::new(
            store.clone(),
            client,
            settings.politeness_delay(),
        ));

        Self {
            store,
            global_limiter: Arc::new(RateLimiter::new(
                settings.global_rate_limit.max_requests,
                settings.global_rate_limit.window(),
            )),
            api_limiter: Arc::new(RateLimiter::new(
                settings.api_rate_limit.max_requests,
                settings.api_rate_limit.window(),
            )),
            ingestor,
            source: settings.source(None).cloned(),
        }
    }
}

/// Start the web server.
pub async fn serve(
    settings: &Settings,
    store: Arc<dyn TournamentStore>,
    host: &str,
    port: u16,
) -> anyhow::Result<()> {
    let state = AppState::new(settings, store);
    let app = create_router(state);

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    tracing::info!("Starting server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
