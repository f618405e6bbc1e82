//! HTTP client for polite listing retrieval.

use std::time::Duration;

use reqwest::Client;

use super::FetchError;

/// User agent identifying the crawler to source sites.
pub const USER_AGENT: &str = "TaikaiSearch/0.1 (tournament listing aggregator)";

/// Thin wrapper over `reqwest::Client` with a bounded timeout.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    pub fn new(timeout: Duration) -> Self {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .gzip(true)
            .brotli(true)
            .build()
            .expect("Failed to create HTTP client");

        Self { client }
    }

    /// Fetch a page body, failing on transport errors and non-success
    /// statuses.
    pub async fn get_text(&self, url: &str) -> Result<String, FetchError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        Ok(response.text().await?)
    }
}
