pub mod error;
pub mod types;

pub use error::{Result, SearchError};
pub use types::{SearchItem, SearchResponse};

use std::time::Duration;

const BASE_URL: &str = "https://www.googleapis.com/customsearch/v1";

/// The API returns at most this many results per request.
pub const MAX_RESULTS_PER_REQUEST: u32 = 10;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

pub struct GoogleSearchClient {
    client: reqwest::Client,
    api_key: String,
    engine_id: String,
    base_url: String,
}

impl GoogleSearchClient {
    pub fn new(api_key: impl Into<String>, engine_id: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            client,
            api_key: api_key.into(),
            engine_id: engine_id.into(),
            base_url: BASE_URL.to_string(),
        })
    }

    /// Point the client at a different endpoint (proxies, local fakes).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Fetch the first page of results for `query`. `num` is capped at
    /// [`MAX_RESULTS_PER_REQUEST`]; no pagination.
    pub async fn search(&self, query: &str, num: u32) -> Result<Vec<SearchItem>> {
        let num = num.clamp(1, MAX_RESULTS_PER_REQUEST);
        tracing::debug!(query, num, "Custom Search request");

        let resp = self
            .client
            .get(&self.base_url)
            .query(&[
                ("key", self.api_key.as_str()),
                ("cx", self.engine_id.as_str()),
                ("q", query),
            ])
            .query(&[("num", num)])
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(SearchError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let data: SearchResponse = resp.json().await?;
        tracing::debug!(query, count = data.items.len(), "Custom Search complete");
        Ok(data.items)
    }
}
