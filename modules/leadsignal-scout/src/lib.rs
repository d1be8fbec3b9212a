pub mod builder;
pub mod classifier;
pub mod extractor;
pub mod queries;
pub mod run;
pub mod search;
pub mod stats;
pub mod store;
#[cfg(any(test, feature = "test-support"))]
pub mod testing;

pub use run::{RunController, RunState, RunStatus, Scout};
pub use stats::ScoutStats;
pub use store::{DashboardRead, ReadSource, SignalStore};
