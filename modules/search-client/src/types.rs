use serde::Deserialize;

/// Top-level Custom Search response. `items` is absent when nothing matched.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub items: Vec<SearchItem>,
}

/// A single organic result. Only the fields the pipeline consumes are kept.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchItem {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub snippet: String,
    #[serde(rename = "displayLink", default)]
    pub display_link: String,
}
