mod auth;
pub mod error;
pub mod types;

pub use error::{Result, SheetsError};
pub use types::{ServiceAccountKey, ValueRange};

use std::time::Duration;

const BASE_URL: &str = "https://sheets.googleapis.com/v4";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for the values endpoints of one spreadsheet.
///
/// Every call to [`SheetsClient::session`] performs a fresh token exchange;
/// sessions are meant to live for a single read or write.
pub struct SheetsClient {
    http: reqwest::Client,
    key: ServiceAccountKey,
    spreadsheet_id: String,
    base_url: String,
}

impl SheetsClient {
    pub fn new(key: ServiceAccountKey, spreadsheet_id: impl Into<String>) -> Result<Self> {
        let http = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            http,
            key,
            spreadsheet_id: spreadsheet_id.into(),
            base_url: BASE_URL.to_string(),
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Authenticate and return a session bound to this spreadsheet.
    pub async fn session(&self) -> Result<SheetSession<'_>> {
        let token = auth::fetch_access_token(&self.http, &self.key).await?;
        Ok(SheetSession {
            client: self,
            token,
        })
    }

    fn values_url(&self, range: &str, suffix: &str) -> Result<reqwest::Url> {
        let mut url = reqwest::Url::parse(&self.base_url)
            .map_err(|e| SheetsError::Parse(format!("invalid base url: {e}")))?;
        url.path_segments_mut()
            .map_err(|_| SheetsError::Parse("base url cannot be a base".to_string()))?
            .push("spreadsheets")
            .push(&self.spreadsheet_id)
            .push("values")
            .push(&format!("{range}{suffix}"));
        Ok(url)
    }
}

/// An authenticated handle for one operation.
pub struct SheetSession<'a> {
    client: &'a SheetsClient,
    token: String,
}

impl SheetSession<'_> {
    /// Read every row in `range`. Trailing empty cells are omitted by the API.
    pub async fn get_values(&self, range: &str) -> Result<Vec<Vec<String>>> {
        let url = self.client.values_url(range, "")?;
        let resp = self
            .client
            .http
            .get(url)
            .bearer_auth(&self.token)
            .send()
            .await?;
        let resp = check_status(resp).await?;
        let values: ValueRange = resp.json().await?;
        Ok(values.into_rows())
    }

    /// Clear cell contents in `range` (formatting is kept).
    pub async fn clear(&self, range: &str) -> Result<()> {
        let url = self.client.values_url(range, ":clear")?;
        let resp = self
            .client
            .http
            .post(url)
            .bearer_auth(&self.token)
            .json(&serde_json::json!({}))
            .send()
            .await?;
        check_status(resp).await?;
        Ok(())
    }

    /// Overwrite `range` with `rows`, stored as raw strings.
    pub async fn update(&self, range: &str, rows: Vec<Vec<String>>) -> Result<()> {
        let url = self.client.values_url(range, "")?;
        let resp = self
            .client
            .http
            .put(url)
            .bearer_auth(&self.token)
            .query(&[("valueInputOption", "RAW")])
            .json(&ValueRange::from_rows(rows))
            .send()
            .await?;
        check_status(resp).await?;
        Ok(())
    }

    /// Write `rows` after the last non-empty row of the table at `range`,
    /// reusing blank rows already in the grid instead of inserting new ones.
    pub async fn append(&self, range: &str, rows: Vec<Vec<String>>) -> Result<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let count = rows.len();
        let url = self.client.values_url(range, ":append")?;
        let resp = self
            .client
            .http
            .post(url)
            .bearer_auth(&self.token)
            .query(&[("valueInputOption", "RAW"), ("insertDataOption", "OVERWRITE")])
            .json(&ValueRange::from_rows(rows))
            .send()
            .await?;
        check_status(resp).await?;
        tracing::debug!(range, count, "Appended rows");
        Ok(())
    }
}

async fn check_status(resp: reqwest::Response) -> Result<reqwest::Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    Err(SheetsError::Api {
        status: status.as_u16(),
        message: body,
    })
}
