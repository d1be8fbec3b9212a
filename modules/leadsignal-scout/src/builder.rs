use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};

use leadsignal_common::{Priority, RawSearchResult, Signal, DATE_FORMAT, EVENT_YEAR, SIGNAL_TYPE};

use crate::classifier::classify_priority;
use crate::extractor::{extract_email, extract_institution, extract_phone};

/// Turn one search result into a prioritised signal.
///
/// Returns `None` when the result has no url or no title. Whitespace-only
/// values count as present.
pub fn build_signal(result: &RawSearchResult, query: &str, now: DateTime<Utc>) -> Option<Signal> {
    if result.url.is_empty() || result.title.is_empty() {
        return None;
    }

    let text = format!("{} {}", result.title, result.snippet);

    let mut signal = Signal {
        id: signal_id(&result.url, now),
        title: result.title.clone(),
        url: result.url.clone(),
        signal_type: SIGNAL_TYPE.to_string(),
        email: extract_email(&text),
        phone: extract_phone(&text),
        institution_name: extract_institution(&result.url, &result.title),
        source_keyword: query.to_string(),
        detected_date: now.format(DATE_FORMAT).to_string(),
        event_date: Some(EVENT_YEAR.to_string()),
        priority: Priority::Low,
    };
    signal.priority = classify_priority(&signal);

    Some(signal)
}

/// `SIG-<YYYYMMDDHHMM>-<n>`, `n` in `0..1000` from a hash of the url.
pub fn signal_id(url: &str, now: DateTime<Utc>) -> String {
    let digest = Sha256::digest(url.as_bytes());
    let mut head = [0u8; 8];
    head.copy_from_slice(&digest[..8]);
    let bucket = u64::from_be_bytes(head) % 1000;
    format!("SIG-{}-{bucket}", now.format("%Y%m%d%H%M"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 14, 10, 5, 0).unwrap()
    }

    fn result(title: &str, url: &str, snippet: &str) -> RawSearchResult {
        RawSearchResult {
            title: title.to_string(),
            url: url.to_string(),
            snippet: snippet.to_string(),
            display_link: String::new(),
        }
    }

    #[test]
    fn ie_business_school_scenario() {
        let raw = result(
            "IE Business School Summer Admissions Contact",
            "https://www.ie.edu/summer",
            "Email us at info@ie.edu or call +34 91 000 0000",
        );
        let signal = build_signal(&raw, "IE summer school contact", now()).unwrap();

        assert_eq!(signal.email.as_deref(), Some("info@ie.edu"));
        assert_eq!(signal.phone.as_deref(), Some("+34 91 000 0000"));
        assert_eq!(signal.institution_name.as_deref(), Some("ie"));
        assert_eq!(signal.priority, Priority::High);
        assert_eq!(signal.source_keyword, "IE summer school contact");
        assert_eq!(signal.signal_type, SIGNAL_TYPE);
        assert_eq!(signal.detected_date, "2026-03-14");
        assert_eq!(signal.event_date.as_deref(), Some("2026"));
    }

    #[test]
    fn missing_url_or_title_drops_result() {
        assert!(build_signal(&result("Title", "", "x@y.com"), "q", now()).is_none());
        assert!(build_signal(&result("", "https://a.edu", "x@y.com"), "q", now()).is_none());
        assert!(build_signal(&result("", "", ""), "q", now()).is_none());
    }

    #[test]
    fn whitespace_title_is_not_missing() {
        let signal = build_signal(&result("   ", "https://a.edu", ""), "q", now()).unwrap();
        assert_eq!(signal.title, "   ");
        assert_eq!(signal.priority, Priority::Low);
    }

    #[test]
    fn snippet_only_contacts_are_found() {
        let raw = result(
            "Summer programme",
            "https://www.uc3m.es/abroad",
            "Questions: abroad@uc3m.es",
        );
        let signal = build_signal(&raw, "UC3M study abroad housing", now()).unwrap();
        assert_eq!(signal.email.as_deref(), Some("abroad@uc3m.es"));
        assert_eq!(signal.phone, None);
        assert_eq!(signal.priority, Priority::Medium);
    }

    #[test]
    fn bare_result_is_low_priority() {
        let raw = result("Madrid in summer", "https://blog.example.com/madrid", "");
        let signal = build_signal(&raw, "q", now()).unwrap();
        assert_eq!(signal.priority, Priority::Low);
        assert_eq!(signal.institution_name.as_deref(), Some("blog"));
    }

    #[test]
    fn id_encodes_minute_and_url_bucket() {
        let id = signal_id("https://www.ie.edu/summer", now());
        assert!(id.starts_with("SIG-202603141005-"));
        let bucket: u64 = id.rsplit('-').next().unwrap().parse().unwrap();
        assert!(bucket < 1000);
        assert_eq!(id, signal_id("https://www.ie.edu/summer", now()));
    }
}
