use leadsignal_common::{Priority, Signal};

/// Stats from a scout run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ScoutStats {
    pub queries_run: u32,
    /// Queries that returned nothing, whether the provider failed or had no hits.
    pub queries_empty: u32,
    pub results_seen: u32,
    pub signals_built: u32,
    pub results_dropped: u32,
    pub by_priority: [u32; 3], // High, Medium, Low
    pub with_email: u32,
    pub remote_synced: bool,
}

impl ScoutStats {
    pub fn record_query(&mut self, results: usize) {
        self.queries_run += 1;
        if results == 0 {
            self.queries_empty += 1;
        }
        self.results_seen += results as u32;
    }

    pub fn record_signal(&mut self, signal: &Signal) {
        self.signals_built += 1;
        let slot = match signal.priority {
            Priority::High => 0,
            Priority::Medium => 1,
            Priority::Low => 2,
        };
        self.by_priority[slot] += 1;
        if signal.email.is_some() {
            self.with_email += 1;
        }
    }

    pub fn record_dropped(&mut self) {
        self.results_dropped += 1;
    }
}

impl std::fmt::Display for ScoutStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "\n=== Scout Run Complete ===")?;
        writeln!(f, "Queries run:     {}", self.queries_run)?;
        writeln!(f, "Queries empty:   {}", self.queries_empty)?;
        writeln!(f, "Results seen:    {}", self.results_seen)?;
        writeln!(f, "Results dropped: {}", self.results_dropped)?;
        writeln!(f, "Signals built:   {}", self.signals_built)?;
        writeln!(f, "\nBy priority:")?;
        writeln!(f, "  High:   {}", self.by_priority[0])?;
        writeln!(f, "  Medium: {}", self.by_priority[1])?;
        writeln!(f, "  Low:    {}", self.by_priority[2])?;
        let total = self.signals_built.max(1);
        writeln!(
            f,
            "\nWith email: {} ({:.0}%)",
            self.with_email,
            self.with_email as f64 / total as f64 * 100.0
        )?;
        write!(
            f,
            "Remote sync: {}",
            if self.remote_synced { "ok" } else { "skipped or failed" }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::sample_signal;

    #[test]
    fn counts_queries_and_priorities() {
        let mut stats = ScoutStats::default();
        stats.record_query(0);
        stats.record_query(3);

        let mut medium = sample_signal(2);
        medium.priority = Priority::Medium;
        medium.email = None;
        stats.record_signal(&sample_signal(1));
        stats.record_signal(&medium);
        stats.record_dropped();

        assert_eq!(stats.queries_run, 2);
        assert_eq!(stats.queries_empty, 1);
        assert_eq!(stats.results_seen, 3);
        assert_eq!(stats.signals_built, 2);
        assert_eq!(stats.results_dropped, 1);
        assert_eq!(stats.by_priority, [1, 1, 0]);
        assert_eq!(stats.with_email, 1);
    }

    #[test]
    fn display_handles_zero_signals() {
        let text = ScoutStats::default().to_string();
        assert!(text.contains("Signals built:   0"));
        assert!(text.contains("With email: 0 (0%)"));
    }
}
