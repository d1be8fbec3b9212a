/// The fixed query list, run in this order.
pub const SEARCH_QUERIES: [&str; 12] = [
    "summer school Madrid 2026 contact",
    "business school summer course Madrid email",
    "IE summer school contact",
    "ESADE summer madrid admissions",
    "Comillas summer school housing",
    "EOI summer madrid contact",
    "UC3M study abroad housing",
    "Saint Louis University Madrid housing",
    "SLU Madrid accommodation contact",
    "Suffolk University Madrid study abroad contact",
    "NYU Madrid study abroad housing",
    "spanish school madrid summer course contact",
];

/// Results asked for per query. The gateway caps this at the provider maximum.
pub const RESULTS_PER_QUERY: u32 = 15;

pub fn default_queries() -> Vec<String> {
    SEARCH_QUERIES.iter().map(|q| q.to_string()).collect()
}
