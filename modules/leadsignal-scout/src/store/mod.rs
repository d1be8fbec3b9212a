//! Persistence for run snapshots.
//!
//! Two copies of the same snapshot: a local JSON file and a remote table.
//! Writes go to both; dashboard reads prefer the remote table and fall back
//! to the local file when the remote read comes back empty. An empty remote
//! table and an unreachable one look the same to the read path.

pub mod remote;
pub mod snapshot;

use std::sync::Arc;

use serde::Serialize;
use tracing::{error, info, warn};

use leadsignal_common::{Config, LeadSignalError, Signal, Snapshot};
use sheets_client::{ServiceAccountKey, SheetsClient};

pub use remote::TabularStore;
pub use snapshot::SnapshotFile;

/// Which copy served a dashboard read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadSource {
    Remote,
    LocalSnapshot,
    Empty,
}

#[derive(Debug, Clone)]
pub struct DashboardRead {
    pub signals: Vec<Signal>,
    pub source: ReadSource,
    /// Generation timestamp, known only when the local snapshot served the read.
    pub generated_at: Option<String>,
}

pub struct SignalStore {
    snapshot: SnapshotFile,
    remote: Option<Arc<dyn TabularStore>>,
}

impl SignalStore {
    pub fn new(snapshot: SnapshotFile, remote: Option<Arc<dyn TabularStore>>) -> Self {
        Self { snapshot, remote }
    }

    /// Local file from `SIGNALS_FILE`; remote sheet only when a usable
    /// service-account key is configured.
    pub fn from_config(config: &Config) -> Self {
        let snapshot = SnapshotFile::new(&config.signals_file);
        let remote = build_sheet(config).map(|client| Arc::new(client) as Arc<dyn TabularStore>);
        Self::new(snapshot, remote)
    }

    pub fn snapshot_file(&self) -> &SnapshotFile {
        &self.snapshot
    }

    /// Overwrite the local snapshot, then mirror its signals to the remote table.
    /// Returns whether the remote mirror succeeded; the remote write is skipped
    /// when the local write fails.
    pub async fn persist(&self, snapshot: &Snapshot) -> Result<bool, LeadSignalError> {
        if let Err(e) = self.snapshot.write(snapshot).await {
            error!(error = %e, "Failed to write local snapshot");
            return Err(e);
        }

        let remote = match &self.remote {
            Some(store) => remote::write_signals(store.as_ref(), &snapshot.signals).await,
            None => {
                warn!("Remote store not configured, skipping mirror");
                false
            }
        };

        Ok(remote)
    }

    /// Signals from the remote table; empty when unconfigured or unreachable.
    pub async fn read_remote(&self) -> Vec<Signal> {
        match &self.remote {
            Some(store) => remote::read_signals(store.as_ref()).await,
            None => Vec::new(),
        }
    }

    pub async fn read_local(&self) -> Result<Snapshot, LeadSignalError> {
        self.snapshot.read().await
    }

    /// Remote first; the local snapshot when the remote read yields nothing.
    pub async fn read_for_dashboard(&self) -> DashboardRead {
        let signals = self.read_remote().await;
        if !signals.is_empty() {
            return DashboardRead {
                signals,
                source: ReadSource::Remote,
                generated_at: None,
            };
        }

        match self.read_local().await {
            Ok(snapshot) => {
                info!(total = snapshot.total, "Serving local snapshot");
                DashboardRead {
                    signals: snapshot.signals,
                    source: ReadSource::LocalSnapshot,
                    generated_at: Some(snapshot.generated_at),
                }
            }
            Err(LeadSignalError::NotFound(_)) => DashboardRead {
                signals: Vec::new(),
                source: ReadSource::Empty,
                generated_at: None,
            },
            Err(e) => {
                warn!(error = %e, "Local snapshot unreadable");
                DashboardRead {
                    signals: Vec::new(),
                    source: ReadSource::Empty,
                    generated_at: None,
                }
            }
        }
    }
}

fn build_sheet(config: &Config) -> Option<SheetsClient> {
    let Some(json) = config.service_account_key() else {
        warn!("No service account credential configured; remote store disabled");
        return None;
    };

    let key = match ServiceAccountKey::from_json(&json) {
        Ok(key) => key,
        Err(e) => {
            warn!(error = %e, "Service account credential is not valid JSON; remote store disabled");
            return None;
        }
    };

    match SheetsClient::new(key, config.sheet_id.clone()) {
        Ok(client) => Some(client),
        Err(e) => {
            warn!(error = %e, "Failed to build Sheets client; remote store disabled");
            None
        }
    }
}
