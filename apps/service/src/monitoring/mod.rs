pub mod checker;
/// Monitoring engine module - probes endpoints and derives their statistics
///
/// This module is responsible for:
/// - Executing single HTTP checks with a timeout
/// - Keeping the bounded per-endpoint check history
/// - Computing uptime, latency and status from that history
/// - Scheduling periodic and on-demand sweeps
pub mod executor;
pub mod history;
pub mod scheduler;
pub mod stats;
pub mod types;

pub use executor::ProbeExecutor;
pub use history::HistoryRing;
pub use scheduler::{MonitoringScheduler, SweepEntry};
pub use stats::DerivedStats;
pub use types::{CheckResult, EndpointStatus};
