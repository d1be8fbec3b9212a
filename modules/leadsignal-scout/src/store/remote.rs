use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::{debug, info, warn};

use leadsignal_common::{Priority, Signal};
use sheets_client::SheetsClient;

/// Columns written per signal, in order.
pub const COLUMNS: [&str; 10] = [
    "id",
    "signal_type",
    "source_keyword",
    "url",
    "title",
    "institution_name",
    "email",
    "phone",
    "priority",
    "event_date",
];

const HEADER_RANGE: &str = "A1:J1";
const DATA_RANGE: &str = "A2:J";
const TABLE_RANGE: &str = "A1:J";

// --- TabularStore trait ---

/// A header row followed by data rows.
#[async_trait]
pub trait TabularStore: Send + Sync {
    /// Replace every data row below the header with `rows`, rewriting the header.
    async fn replace_rows(&self, header: Vec<String>, rows: Vec<Vec<String>>) -> Result<()>;

    /// Every row, header included.
    async fn read_rows(&self) -> Result<Vec<Vec<String>>>;
}

#[async_trait]
impl TabularStore for SheetsClient {
    async fn replace_rows(&self, header: Vec<String>, rows: Vec<Vec<String>>) -> Result<()> {
        let session = self.session().await.context("Sheets authentication failed")?;
        session
            .clear(DATA_RANGE)
            .await
            .context("Failed to clear data rows")?;
        session
            .update(HEADER_RANGE, vec![header])
            .await
            .context("Failed to write header row")?;
        session
            .append(TABLE_RANGE, rows)
            .await
            .context("Failed to append signal rows")?;
        Ok(())
    }

    async fn read_rows(&self) -> Result<Vec<Vec<String>>> {
        let session = self.session().await.context("Sheets authentication failed")?;
        Ok(session
            .get_values(TABLE_RANGE)
            .await
            .context("Failed to read sheet values")?)
    }
}

// --- Row mapping ---

pub fn header_row() -> Vec<String> {
    COLUMNS.iter().map(|c| c.to_string()).collect()
}

pub fn signal_to_row(signal: &Signal) -> Vec<String> {
    vec![
        signal.id.clone(),
        signal.signal_type.clone(),
        signal.source_keyword.clone(),
        signal.url.clone(),
        signal.title.clone(),
        signal.institution_name.clone().unwrap_or_default(),
        signal.email.clone().unwrap_or_default(),
        signal.phone.clone().unwrap_or_default(),
        signal.priority.to_string(),
        signal.effective_date().to_string(),
    ]
}

/// Rebuild a signal from a stored row. Rows shorter than ten columns or with
/// an empty id are not signals.
///
/// The sheet stores one date column, so it fills both `event_date` and
/// `detected_date`.
pub fn row_to_signal(row: &[String]) -> Option<Signal> {
    if row.len() < COLUMNS.len() || row[0].trim().is_empty() {
        return None;
    }

    let priority = row[8].parse::<Priority>().unwrap_or_else(|_| {
        debug!(id = %row[0], value = %row[8], "Unrecognised priority in sheet row, using Low");
        Priority::Low
    });

    Some(Signal {
        id: row[0].clone(),
        signal_type: row[1].clone(),
        source_keyword: row[2].clone(),
        url: row[3].clone(),
        title: row[4].clone(),
        institution_name: non_empty(&row[5]),
        email: non_empty(&row[6]),
        phone: non_empty(&row[7]),
        priority,
        event_date: non_empty(&row[9]),
        detected_date: row[9].clone(),
    })
}

fn non_empty(cell: &str) -> Option<String> {
    if cell.is_empty() {
        None
    } else {
        Some(cell.to_string())
    }
}

// --- Best-effort sync ---

/// Overwrite the remote table with `signals`. Failures are logged and reported as `false`.
pub async fn write_signals(store: &dyn TabularStore, signals: &[Signal]) -> bool {
    let rows: Vec<Vec<String>> = signals.iter().map(signal_to_row).collect();
    match store.replace_rows(header_row(), rows).await {
        Ok(()) => {
            info!(count = signals.len(), "Remote store updated");
            true
        }
        Err(e) => {
            warn!(error = %format!("{e:#}"), "Failed to write signals to remote store");
            false
        }
    }
}

/// Every well-formed signal row in the remote table. Malformed rows are
/// skipped; failures are logged and yield an empty list.
pub async fn read_signals(store: &dyn TabularStore) -> Vec<Signal> {
    let rows = match store.read_rows().await {
        Ok(rows) => rows,
        Err(e) => {
            warn!(error = %format!("{e:#}"), "Failed to read signals from remote store");
            return Vec::new();
        }
    };

    rows.iter()
        .skip(1)
        .filter_map(|row| row_to_signal(row))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{sample_signal, MockSheet};

    #[test]
    fn row_uses_fixed_column_order() {
        let signal = sample_signal(7);
        let row = signal_to_row(&signal);
        assert_eq!(row.len(), COLUMNS.len());
        assert_eq!(row[0], signal.id);
        assert_eq!(row[2], signal.source_keyword);
        assert_eq!(row[3], signal.url);
        assert_eq!(row[8], "High");
        assert_eq!(row[9], "2026");
    }

    #[test]
    fn row_date_falls_back_to_detected_date() {
        let mut signal = sample_signal(1);
        signal.event_date = None;
        assert_eq!(signal_to_row(&signal)[9], signal.detected_date);
    }

    #[test]
    fn missing_contacts_become_empty_cells_and_back() {
        let mut signal = sample_signal(1);
        signal.email = None;
        signal.phone = None;
        let row = signal_to_row(&signal);
        assert_eq!(row[6], "");
        assert_eq!(row[7], "");

        let back = row_to_signal(&row).unwrap();
        assert_eq!(back.email, None);
        assert_eq!(back.phone, None);
    }

    #[test]
    fn short_or_keyless_rows_are_skipped() {
        let mut row = signal_to_row(&sample_signal(1));
        row.truncate(9);
        assert!(row_to_signal(&row).is_none());

        let mut row = signal_to_row(&sample_signal(1));
        row[0] = String::new();
        assert!(row_to_signal(&row).is_none());
    }

    #[test]
    fn spanish_priority_labels_are_read() {
        let mut row = signal_to_row(&sample_signal(1));
        row[8] = "Media".to_string();
        assert_eq!(row_to_signal(&row).unwrap().priority, Priority::Medium);
    }

    #[tokio::test]
    async fn write_then_read_round_trips() {
        let sheet = MockSheet::new();
        let signals: Vec<Signal> = (0..4).map(sample_signal).collect();

        assert!(write_signals(&sheet, &signals).await);
        let read = read_signals(&sheet).await;

        assert_eq!(read.len(), signals.len());
        for (original, restored) in signals.iter().zip(&read) {
            assert_eq!(signal_to_row(original), signal_to_row(restored));
        }
    }

    #[tokio::test]
    async fn write_replaces_previous_rows() {
        let sheet = MockSheet::new();
        write_signals(&sheet, &(0..5).map(sample_signal).collect::<Vec<_>>()).await;
        write_signals(&sheet, &[sample_signal(9)]).await;

        let read = read_signals(&sheet).await;
        assert_eq!(read.len(), 1);
        assert_eq!(read[0].id, sample_signal(9).id);
    }

    #[tokio::test]
    async fn malformed_rows_are_dropped_silently() {
        let sheet = MockSheet::with_rows(vec![
            header_row(),
            signal_to_row(&sample_signal(1)),
            vec!["SIG-x".to_string(), "too short".to_string()],
            vec![String::new(); 10],
            signal_to_row(&sample_signal(2)),
        ]);

        let read = read_signals(&sheet).await;
        assert_eq!(read.len(), 2);
    }

    #[tokio::test]
    async fn failures_become_false_and_empty() {
        let sheet = MockSheet::unreachable();
        assert!(!write_signals(&sheet, &[sample_signal(1)]).await);
        assert!(read_signals(&sheet).await.is_empty());
    }
}
