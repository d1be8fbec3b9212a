use std::sync::Arc;

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{error, info};

use leadsignal_common::{Config, Signal, Snapshot, TIMESTAMP_FORMAT};

use crate::builder::build_signal;
use crate::queries::{default_queries, RESULTS_PER_QUERY};
use crate::search::{search_or_empty, GoogleSearcher, WebSearcher};
use crate::stats::ScoutStats;
use crate::store::SignalStore;

// --- Scout ---

/// One pass over the query list: search, build, persist.
pub struct Scout {
    searcher: Arc<dyn WebSearcher>,
    store: Arc<SignalStore>,
    queries: Vec<String>,
    results_per_query: u32,
}

impl Scout {
    pub fn new(searcher: Arc<dyn WebSearcher>, store: Arc<SignalStore>) -> Self {
        Self {
            searcher,
            store,
            queries: default_queries(),
            results_per_query: RESULTS_PER_QUERY,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            Arc::new(GoogleSearcher::from_config(config)),
            Arc::new(SignalStore::from_config(config)),
        )
    }

    pub fn with_queries(mut self, queries: Vec<String>) -> Self {
        self.queries = queries;
        self
    }

    pub fn store(&self) -> &Arc<SignalStore> {
        &self.store
    }

    /// Search every query in order and build signals in query order, then
    /// result order. A failed query contributes nothing.
    pub async fn collect_signals(&self, now: DateTime<Utc>) -> (Vec<Signal>, ScoutStats) {
        let mut stats = ScoutStats::default();
        let mut signals = Vec::new();

        for query in &self.queries {
            let results =
                search_or_empty(self.searcher.as_ref(), query, self.results_per_query).await;
            stats.record_query(results.len());

            for result in &results {
                match build_signal(result, query, now) {
                    Some(signal) => {
                        stats.record_signal(&signal);
                        signals.push(signal);
                    }
                    None => stats.record_dropped(),
                }
            }
        }

        (signals, stats)
    }

    /// Full run. The snapshot is persisted even when no signals were built.
    /// Only a failed local snapshot write fails the run.
    pub async fn run(&self) -> Result<ScoutStats> {
        info!(queries = self.queries.len(), "Scout run starting");

        let (signals, mut stats) = self.collect_signals(Utc::now()).await;
        let snapshot = Snapshot::new(signals, Utc::now());

        stats.remote_synced = self
            .store
            .persist(&snapshot)
            .await
            .context("Failed to persist snapshot")?;

        info!(
            signals = snapshot.total,
            remote = stats.remote_synced,
            "Scout run complete"
        );
        Ok(stats)
    }
}

// --- Run status ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunState {
    #[default]
    Idle,
    Running,
    Done,
    Failed,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RunStatus {
    pub state: RunState,
    pub started_at: Option<String>,
    pub finished_at: Option<String>,
    /// Finish time of the last successful run.
    pub last_execution: Option<String>,
    /// Signals produced by the last successful run.
    pub signals: Option<usize>,
    /// Error from the last failed run, cleared when a new run starts.
    pub error: Option<String>,
}

// --- RunController ---

/// Owns the run status and starts runs, one at a time.
#[derive(Clone, Default)]
pub struct RunController {
    status: Arc<Mutex<RunStatus>>,
}

impl RunController {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn status(&self) -> RunStatus {
        self.status.lock().await.clone()
    }

    pub async fn last_execution(&self) -> Option<String> {
        self.status.lock().await.last_execution.clone()
    }

    /// Start a run on a background task. Returns `None` without starting
    /// anything when a run is already in progress.
    pub async fn spawn(&self, scout: Arc<Scout>) -> Option<JoinHandle<()>> {
        if !self.try_begin().await {
            info!("Run already in progress, not starting another");
            return None;
        }

        let controller = self.clone();
        Some(tokio::spawn(async move {
            let result = scout.run().await;
            controller.finish(&result).await;
        }))
    }

    /// Run in the current task and wait for it.
    pub async fn run_now(&self, scout: &Scout) -> Result<ScoutStats> {
        if !self.try_begin().await {
            bail!("A run is already in progress");
        }
        let result = scout.run().await;
        self.finish(&result).await;
        result
    }

    async fn try_begin(&self) -> bool {
        let mut status = self.status.lock().await;
        if status.state == RunState::Running {
            return false;
        }
        status.state = RunState::Running;
        status.started_at = Some(now_stamp());
        status.finished_at = None;
        status.error = None;
        true
    }

    async fn finish(&self, result: &Result<ScoutStats>) {
        let mut status = self.status.lock().await;
        let finished = now_stamp();
        status.finished_at = Some(finished.clone());
        match result {
            Ok(stats) => {
                status.state = RunState::Done;
                status.last_execution = Some(finished);
                status.signals = Some(stats.signals_built as usize);
            }
            Err(e) => {
                error!(error = %format!("{e:#}"), "Scout run failed");
                status.state = RunState::Failed;
                status.error = Some(format!("{e:#}"));
            }
        }
    }
}

fn now_stamp() -> String {
    Utc::now().format(TIMESTAMP_FORMAT).to_string()
}
