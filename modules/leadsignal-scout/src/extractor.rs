//! Contact extraction from search result text.
//!
//! All three extractors are pattern-based and take the first match only.
//! The phone pattern is deliberately loose: it will also match year ranges
//! and postal-code-like runs of digits.

use std::sync::LazyLock;

use regex::Regex;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b").unwrap());
static PHONE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\+?\d{1,3}[-.\s]?)?\(?\d{2,4}\)?[-.\s]?\d{2,4}[-.\s]?\d{2,4}").unwrap()
});

/// First email address in `text`.
pub fn extract_email(text: &str) -> Option<String> {
    EMAIL_RE.find(text).map(|m| m.as_str().to_string())
}

/// First phone-like run of digit groups in `text`. Not validated.
pub fn extract_phone(text: &str) -> Option<String> {
    PHONE_RE.find(text).map(|m| m.as_str().to_string())
}

/// Institution name from the first label of the URL's host, minus a leading `www.`.
///
/// Only http(s) URLs qualify. The label is taken from the host as written, so
/// international domains keep their Unicode form rather than punycode.
/// `_title` is accepted so callers can pass the whole result; the derivation
/// is URL-only.
pub fn extract_institution(url: &str, _title: &str) -> Option<String> {
    let parsed = url::Url::parse(url).ok()?;
    if !matches!(parsed.scheme(), "http" | "https") || parsed.host_str().is_none() {
        return None;
    }

    let host = raw_host(url)?;
    let host = host.strip_prefix("www.").unwrap_or(host);
    let label = host.split('.').next()?;
    if label.is_empty() {
        return None;
    }
    Some(label.to_string())
}

/// The host exactly as it appears in `url`: no userinfo, no port.
fn raw_host(url: &str) -> Option<&str> {
    let (_, rest) = url.trim_start().split_once("://")?;
    let authority = rest.split(['/', '?', '#']).next()?;
    let host = authority.rsplit_once('@').map_or(authority, |(_, h)| h);
    if host.starts_with('[') {
        return None;
    }
    host.split(':').next()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_found_in_sentence() {
        assert_eq!(
            extract_email("Email us at info@ie.edu or call").as_deref(),
            Some("info@ie.edu")
        );
    }

    #[test]
    fn email_takes_first_match() {
        assert_eq!(
            extract_email("admissions@uc3m.es, housing@uc3m.es").as_deref(),
            Some("admissions@uc3m.es")
        );
    }

    #[test]
    fn email_allows_dotted_local_part_and_subdomains() {
        assert_eq!(
            extract_email("Write to Summer.Office@madrid.slu.edu today").as_deref(),
            Some("Summer.Office@madrid.slu.edu")
        );
    }

    #[test]
    fn email_absent() {
        assert_eq!(extract_email("No contact details here"), None);
        assert_eq!(extract_email("user@localhost"), None);
        assert_eq!(extract_email("handle @ie"), None);
    }

    #[test]
    fn phone_with_country_code() {
        assert_eq!(
            extract_phone("or call +34 91 000 0000 today").as_deref(),
            Some("+34 91 000 0000")
        );
    }

    #[test]
    fn phone_with_parenthesised_area_code() {
        assert_eq!(
            extract_phone("Tel: (555) 123-4567").as_deref(),
            Some("(555) 123-4567")
        );
    }

    #[test]
    fn phone_over_matches_year_ranges() {
        // Accepted false positive: academic years look like digit groups.
        assert_eq!(
            extract_phone("Courses 2025-2026 now open").as_deref(),
            Some("2025-2026")
        );
    }

    #[test]
    fn phone_absent_for_short_numbers() {
        assert_eq!(extract_phone("Summer 2026 in Madrid"), None);
        assert_eq!(extract_phone("no digits"), None);
    }

    #[test]
    fn institution_strips_www() {
        assert_eq!(
            extract_institution("https://www.ie.edu/summer", "").as_deref(),
            Some("ie")
        );
    }

    #[test]
    fn institution_without_www() {
        assert_eq!(
            extract_institution("http://comillas.edu/en/summer", "Comillas").as_deref(),
            Some("comillas")
        );
    }

    #[test]
    fn institution_keeps_subdomain_label() {
        assert_eq!(
            extract_institution("https://madrid.slu.edu/housing", "").as_deref(),
            Some("madrid")
        );
    }

    #[test]
    fn institution_keeps_unicode_host_label() {
        assert_eq!(
            extract_institution("https://www.universidad-españa.es/x", "").as_deref(),
            Some("universidad-españa")
        );
    }

    #[test]
    fn institution_ignores_userinfo_and_port() {
        assert_eq!(
            extract_institution("https://user:pw@www.ie.edu:8443/summer", "").as_deref(),
            Some("ie")
        );
    }

    #[test]
    fn institution_requires_http_scheme_and_host() {
        assert_eq!(extract_institution("ftp://files.ie.edu", ""), None);
        assert_eq!(extract_institution("www.ie.edu/summer", ""), None);
        assert_eq!(extract_institution("", ""), None);
    }
}
