use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Classification tag stamped on every signal this pipeline produces.
pub const SIGNAL_TYPE: &str = "Institucional - Programa 2026";

/// Placeholder event date: the programme year the queries target.
pub const EVENT_YEAR: &str = "2026";

/// Format of run/snapshot timestamps shown on the dashboard.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Format of `detected_date`.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

// --- Priority ---

/// Serialized with the same spelling as `Display`, so the snapshot file and
/// the sheet agree. Lowercase spellings are still read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Priority {
    #[serde(alias = "high")]
    High,
    #[serde(alias = "medium")]
    Medium,
    #[serde(alias = "low")]
    Low,
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Priority::High => write!(f, "High"),
            Priority::Medium => write!(f, "Medium"),
            Priority::Low => write!(f, "Low"),
        }
    }
}

impl std::str::FromStr for Priority {
    type Err = String;

    /// Accepts the English tiers in any case, plus the Spanish labels
    /// (`Alta`/`Media`/`Baja`) found in sheets written by older runs.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "high" | "alta" => Ok(Priority::High),
            "medium" | "media" => Ok(Priority::Medium),
            "low" | "baja" => Ok(Priority::Low),
            other => Err(format!("unknown priority: {other}")),
        }
    }
}

// --- Search results ---

/// One organic result from the search provider, stripped of provider-specific fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawSearchResult {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub snippet: String,
    #[serde(default)]
    pub display_link: String,
}

// --- Signal ---

/// A lead derived from a single search result.
///
/// Built once by the signal builder; `priority` is assigned right after
/// construction and never recomputed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    /// Display id, `SIG-<minute timestamp>-<url hash mod 1000>`. Collisions are possible.
    pub id: String,
    pub title: String,
    pub url: String,
    pub signal_type: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub institution_name: Option<String>,
    pub source_keyword: String,
    pub detected_date: String,
    #[serde(default)]
    pub event_date: Option<String>,
    pub priority: Priority,
}

impl Signal {
    /// The date shown for this signal: the event date, or the detection date when absent.
    pub fn effective_date(&self) -> &str {
        self.event_date.as_deref().unwrap_or(&self.detected_date)
    }
}

// --- Snapshot ---

/// The full output of one run, as written to the local snapshot file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(rename = "fecha_generacion")]
    pub generated_at: String,
    #[serde(rename = "total_senales")]
    pub total: usize,
    #[serde(rename = "senales")]
    pub signals: Vec<Signal>,
}

impl Snapshot {
    pub fn new(signals: Vec<Signal>, generated_at: DateTime<Utc>) -> Self {
        Self {
            generated_at: generated_at.format(TIMESTAMP_FORMAT).to_string(),
            total: signals.len(),
            signals,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn signal() -> Signal {
        Signal {
            id: "SIG-202606011200-42".to_string(),
            title: "Summer housing".to_string(),
            url: "https://example.edu".to_string(),
            signal_type: SIGNAL_TYPE.to_string(),
            email: None,
            phone: None,
            institution_name: Some("example".to_string()),
            source_keyword: "summer housing".to_string(),
            detected_date: "2026-06-01".to_string(),
            event_date: None,
            priority: Priority::Low,
        }
    }

    #[test]
    fn effective_date_falls_back_to_detected_date() {
        let mut s = signal();
        assert_eq!(s.effective_date(), "2026-06-01");
        s.event_date = Some(EVENT_YEAR.to_string());
        assert_eq!(s.effective_date(), "2026");
    }

    #[test]
    fn priority_serializes_like_display() {
        for p in [Priority::High, Priority::Medium, Priority::Low] {
            assert_eq!(serde_json::to_value(p).unwrap(), p.to_string());
        }
        let old: Priority = serde_json::from_str("\"medium\"").unwrap();
        assert_eq!(old, Priority::Medium);
    }

    #[test]
    fn priority_parses_english_and_spanish_labels() {
        assert_eq!("High".parse::<Priority>().unwrap(), Priority::High);
        assert_eq!("medium".parse::<Priority>().unwrap(), Priority::Medium);
        assert_eq!("Baja".parse::<Priority>().unwrap(), Priority::Low);
        assert!("urgent".parse::<Priority>().is_err());
    }

    #[test]
    fn snapshot_uses_spanish_file_keys() {
        let at = Utc.with_ymd_and_hms(2026, 6, 1, 9, 30, 0).unwrap();
        let snapshot = Snapshot::new(vec![signal()], at);
        let json = serde_json::to_value(&snapshot).unwrap();

        assert_eq!(json["fecha_generacion"], "2026-06-01 09:30:00");
        assert_eq!(json["total_senales"], 1);
        assert_eq!(json["senales"][0]["priority"], "Low");
        assert_eq!(json["senales"][0]["institution_name"], "example");
    }
}
