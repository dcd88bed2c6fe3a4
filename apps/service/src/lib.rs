//! Uppe check-and-aggregate engine.
//!
//! Registered endpoints are probed in sweeps, every result lands in a bounded
//! per-endpoint history, and uptime / latency / status are derived from that
//! history on demand. [`Orchestrator`] is the entry point for presentation
//! layers.

pub mod config;
pub mod error;
pub mod models;
pub mod monitoring;
pub mod orchestrator;
pub mod registry;
pub mod validation;

pub use config::{Config, ConfigError, MonitoringConfig};
pub use error::MonitorError;
pub use models::{Endpoint, NewEndpoint};
pub use monitoring::{CheckResult, DerivedStats, EndpointStatus, SweepEntry};
pub use orchestrator::{BadgeState, Orchestrator};
