use leadsignal_common::{Priority, Signal};

/// Title keywords that mark a page as a direct contact route. At most one point total.
const HIGH_PRIORITY_KEYWORDS: &[&str] = &["contact", "admissions", "housing", "accommodation"];

/// Additive score: +2 email, +1 phone, +1 keyword in title.
/// 3 or more is High, 1 or more is Medium, otherwise Low.
///
/// The signal's current `priority` is ignored.
pub fn classify_priority(signal: &Signal) -> Priority {
    let mut score = 0;

    if signal.email.is_some() {
        score += 2;
    }
    if signal.phone.is_some() {
        score += 1;
    }

    let title = signal.title.to_lowercase();
    if HIGH_PRIORITY_KEYWORDS.iter().any(|kw| title.contains(kw)) {
        score += 1;
    }

    match score {
        s if s >= 3 => Priority::High,
        s if s >= 1 => Priority::Medium,
        _ => Priority::Low,
    }
}
