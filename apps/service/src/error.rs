use thiserror::Error;

/// Errors surfaced by the monitoring engine
///
/// Lookups of unknown endpoints are not errors, they return `None` or
/// `false`. Probe failures are recorded in the check history instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MonitorError {
    #[error("{0}")]
    Validation(String),
}

impl MonitorError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}
