use std::env;
use std::path::PathBuf;

use crate::error::LeadSignalError;

/// Spreadsheet that mirrors the latest snapshot.
pub const DEFAULT_SHEET_ID: &str = "1-6e0U1SATcgs2V8u2fOoDoKIrLjzwJi8GxJtUwy9t_U";

/// Where the run writes its local snapshot.
pub const DEFAULT_SIGNALS_FILE: &str = "/app/signals_today.json";

/// Development fallback for the service-account key.
pub const DEFAULT_SERVICE_ACCOUNT_FILE: &str = "./credentials.json";

/// Application configuration loaded from environment variables.
///
/// Credentials are optional: a missing search key or service account disables
/// that boundary (it returns empty results) instead of stopping the process.
#[derive(Debug, Clone)]
pub struct Config {
    // Search provider
    pub google_api_key: Option<String>,
    pub google_search_engine_id: Option<String>,

    // Remote tabular store
    pub service_account_json: Option<String>,
    pub service_account_file: PathBuf,
    pub sheet_id: String,

    // Local snapshot
    pub signals_file: PathBuf,

    // Web server
    pub web_host: String,
    pub web_port: u16,
}

impl Config {
    /// Load configuration from the process environment (and `.env`, if present).
    pub fn from_env() -> Result<Self, LeadSignalError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, LeadSignalError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let web_port = match get("PORT") {
            Some(port) => port
                .trim()
                .parse()
                .map_err(|_| LeadSignalError::Config(format!("PORT must be a number, got {port:?}")))?,
            None => 8080,
        };

        Ok(Self {
            google_api_key: get("GOOGLE_API_KEY"),
            google_search_engine_id: get("GOOGLE_SEARCH_ENGINE_ID"),
            service_account_json: get("GOOGLE_SERVICE_ACCOUNT_JSON"),
            service_account_file: get("GOOGLE_SERVICE_ACCOUNT_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_SERVICE_ACCOUNT_FILE)),
            sheet_id: get("SHEET_ID").unwrap_or_else(|| DEFAULT_SHEET_ID.to_string()),
            signals_file: get("SIGNALS_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_SIGNALS_FILE)),
            web_host: get("WEB_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            web_port,
        })
    }

    /// Service-account key material: the env var first, then the local key file.
    pub fn service_account_key(&self) -> Option<String> {
        if let Some(json) = &self.service_account_json {
            return Some(json.clone());
        }
        match std::fs::read_to_string(&self.service_account_file) {
            Ok(json) => {
                tracing::debug!(path = %self.service_account_file.display(), "Loaded service account key from file");
                Some(json)
            }
            Err(_) => None,
        }
    }

    pub fn log_redacted(&self) {
        fn preview_opt(val: &Option<String>) -> String {
            match val {
                Some(v) => {
                    let head: String = v.chars().take(5).collect();
                    format!("{head}...({} chars)", v.len())
                }
                None => "<not set>".to_string(),
            }
        }

        tracing::info!("Config loaded:");
        tracing::info!("  GOOGLE_API_KEY: {}", preview_opt(&self.google_api_key));
        tracing::info!("  GOOGLE_SEARCH_ENGINE_ID: {}", preview_opt(&self.google_search_engine_id));
        tracing::info!(
            "  GOOGLE_SERVICE_ACCOUNT_JSON: {}",
            if self.service_account_json.is_some() { "<set>" } else { "<not set>" }
        );
        tracing::info!("  GOOGLE_SERVICE_ACCOUNT_FILE: {}", self.service_account_file.display());
        tracing::info!("  SHEET_ID: {}", self.sheet_id);
        tracing::info!("  SIGNALS_FILE: {}", self.signals_file.display());
        tracing::info!("  LISTEN: {}:{}", self.web_host, self.web_port);
    }
}
