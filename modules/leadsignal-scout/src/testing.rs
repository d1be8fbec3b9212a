// Test mocks for the scout pipeline.
//
// Two mocks matching the two trait boundaries:
// - MockSearcher (WebSearcher): HashMap-based query→results
// - MockSheet (TabularStore): in-memory rows
//
// Plus `sample_signal` for building deterministic signals.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use anyhow::{bail, Result};
use async_trait::async_trait;

use leadsignal_common::{Priority, RawSearchResult, Signal, EVENT_YEAR, SIGNAL_TYPE};

use crate::search::WebSearcher;
use crate::store::remote::TabularStore;

// ---------------------------------------------------------------------------
// MockSearcher
// ---------------------------------------------------------------------------

/// HashMap-based searcher. Unregistered queries return no results;
/// queries registered with `.fail_on()` return `Err`.
pub struct MockSearcher {
    results: HashMap<String, Vec<RawSearchResult>>,
    failing: HashSet<String>,
    calls: Mutex<Vec<(String, u32)>>,
}

impl MockSearcher {
    pub fn new() -> Self {
        Self {
            results: HashMap::new(),
            failing: HashSet::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn on_search(mut self, query: &str, results: Vec<RawSearchResult>) -> Self {
        self.results.insert(query.to_string(), results);
        self
    }

    pub fn fail_on(mut self, query: &str) -> Self {
        self.failing.insert(query.to_string());
        self
    }

    /// Queries in the order they were issued.
    pub fn queries_seen(&self) -> Vec<String> {
        self.calls.lock().unwrap().iter().map(|(q, _)| q.clone()).collect()
    }

    /// The `max_results` passed on each call, in order.
    pub fn requested_limits(&self) -> Vec<u32> {
        self.calls.lock().unwrap().iter().map(|(_, n)| *n).collect()
    }
}

impl Default for MockSearcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl WebSearcher for MockSearcher {
    async fn search(&self, query: &str, max_results: u32) -> Result<Vec<RawSearchResult>> {
        self.calls
            .lock()
            .unwrap()
            .push((query.to_string(), max_results));

        if self.failing.contains(query) {
            bail!("MockSearcher: search failed for {query}");
        }
        Ok(self.results.get(query).cloned().unwrap_or_default())
    }
}

// ---------------------------------------------------------------------------
// MockSheet
// ---------------------------------------------------------------------------

/// In-memory table. `unreachable()` makes every call fail.
pub struct MockSheet {
    rows: Mutex<Vec<Vec<String>>>,
    unreachable: bool,
}

impl MockSheet {
    pub fn new() -> Self {
        Self::with_rows(Vec::new())
    }

    pub fn with_rows(rows: Vec<Vec<String>>) -> Self {
        Self {
            rows: Mutex::new(rows),
            unreachable: false,
        }
    }

    pub fn unreachable() -> Self {
        Self {
            rows: Mutex::new(Vec::new()),
            unreachable: true,
        }
    }

    /// Every stored row, header included.
    pub fn rows(&self) -> Vec<Vec<String>> {
        self.rows.lock().unwrap().clone()
    }

    /// Replace the stored rows wholesale, bypassing the trait.
    pub fn reset(&self, rows: Vec<Vec<String>>) {
        *self.rows.lock().unwrap() = rows;
    }
}

impl Default for MockSheet {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TabularStore for MockSheet {
    async fn replace_rows(&self, header: Vec<String>, rows: Vec<Vec<String>>) -> Result<()> {
        if self.unreachable {
            bail!("MockSheet: unreachable");
        }
        let mut stored = self.rows.lock().unwrap();
        stored.clear();
        stored.push(header);
        stored.extend(rows);
        Ok(())
    }

    async fn read_rows(&self) -> Result<Vec<Vec<String>>> {
        if self.unreachable {
            bail!("MockSheet: unreachable");
        }
        Ok(self.rows.lock().unwrap().clone())
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// A fully populated High-priority signal. Distinct `n` give distinct id and url.
pub fn sample_signal(n: usize) -> Signal {
    Signal {
        id: format!("SIG-202603141005-{n}"),
        title: format!("Summer Programme {n} Admissions Contact"),
        url: format!("https://www.school{n}.edu/summer"),
        signal_type: SIGNAL_TYPE.to_string(),
        email: Some(format!("admissions@school{n}.edu")),
        phone: Some("+34 91 000 0000".to_string()),
        institution_name: Some(format!("school{n}")),
        source_keyword: "summer school contact".to_string(),
        detected_date: "2026-03-14".to_string(),
        event_date: Some(EVENT_YEAR.to_string()),
        priority: Priority::High,
    }
}

/// A search result for `url` with `title` and `snippet`.
pub fn raw_result(title: &str, url: &str, snippet: &str) -> RawSearchResult {
    RawSearchResult {
        title: title.to_string(),
        url: url.to_string(),
        snippet: snippet.to_string(),
        display_link: String::new(),
    }
}
