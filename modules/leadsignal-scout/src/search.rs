use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use tracing::{info, warn};

use leadsignal_common::{Config, RawSearchResult};
use search_client::{GoogleSearchClient, SearchItem, MAX_RESULTS_PER_REQUEST};

// --- WebSearcher trait ---

#[async_trait]
pub trait WebSearcher: Send + Sync {
    async fn search(&self, query: &str, max_results: u32) -> Result<Vec<RawSearchResult>>;
}

// --- Google Custom Search ---

/// Searcher backed by the Custom Search API. Without credentials every
/// search fails with a configuration error.
pub struct GoogleSearcher {
    client: Option<GoogleSearchClient>,
}

impl GoogleSearcher {
    pub fn new(client: GoogleSearchClient) -> Self {
        Self {
            client: Some(client),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        let (Some(api_key), Some(engine_id)) = (
            config.google_api_key.as_deref(),
            config.google_search_engine_id.as_deref(),
        ) else {
            warn!("GOOGLE_API_KEY or GOOGLE_SEARCH_ENGINE_ID not set; searches will return nothing");
            return Self { client: None };
        };

        match GoogleSearchClient::new(api_key, engine_id) {
            Ok(client) => Self::new(client),
            Err(e) => {
                warn!(error = %e, "Failed to build search client");
                Self { client: None }
            }
        }
    }
}

#[async_trait]
impl WebSearcher for GoogleSearcher {
    async fn search(&self, query: &str, max_results: u32) -> Result<Vec<RawSearchResult>> {
        let Some(client) = &self.client else {
            bail!("search credentials not configured (need GOOGLE_API_KEY and GOOGLE_SEARCH_ENGINE_ID)");
        };

        let items = client
            .search(query, max_results)
            .await
            .context("Custom Search request failed")?;

        Ok(items.into_iter().map(into_raw_result).collect())
    }
}

fn into_raw_result(item: SearchItem) -> RawSearchResult {
    RawSearchResult {
        title: item.title,
        url: item.link,
        snippet: item.snippet,
        display_link: item.display_link,
    }
}

// --- Gateway ---

/// Run one query, best effort. The requested count is capped at the
/// provider's per-request maximum; any failure is logged and yields no results.
pub async fn search_or_empty(
    searcher: &dyn WebSearcher,
    query: &str,
    requested: u32,
) -> Vec<RawSearchResult> {
    let limit = requested.min(MAX_RESULTS_PER_REQUEST);

    match searcher.search(query, limit).await {
        Ok(mut results) => {
            results.truncate(limit as usize);
            info!(query, count = results.len(), "Search complete");
            results
        }
        Err(e) => {
            warn!(query, error = %e, "Search failed, continuing without results");
            Vec::new()
        }
    }
}
