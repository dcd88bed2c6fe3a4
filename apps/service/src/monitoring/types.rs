use serde::{Deserialize, Serialize};

/// Current status of an endpoint, derived from its most recent check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EndpointStatus {
    Up,
    Down,
    Unknown,
}

impl std::fmt::Display for EndpointStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EndpointStatus::Up => write!(f, "up"),
            EndpointStatus::Down => write!(f, "down"),
            EndpointStatus::Unknown => write!(f, "unknown"),
        }
    }
}

/// Milliseconds since the Unix epoch, as used for check timestamps
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Result of a single probe against an endpoint
///
/// `status` and `response_time` are either both present (a response was
/// received) or both absent, in which case `error` describes the failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckResult {
    /// When the attempt started, in milliseconds since the Unix epoch
    pub timestamp: i64,

    /// HTTP status code of the response
    pub status: Option<u16>,

    /// Time until response headers arrived, in milliseconds
    pub response_time: Option<u64>,

    /// Failure description when no response was received
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CheckResult {
    /// A probe that received a response
    pub fn success(timestamp: i64, status: u16, response_time: u64) -> Self {
        Self { timestamp, status: Some(status), response_time: Some(response_time), error: None }
    }

    /// A probe that failed before any response arrived
    pub fn failure(timestamp: i64, error: impl Into<String>) -> Self {
        let mut error = error.into();
        if error.trim().is_empty() {
            error = "Unknown error".to_string();
        }

        Self { timestamp, status: None, response_time: None, error: Some(error) }
    }

    pub fn is_failure(&self) -> bool {
        self.status.is_none()
    }

    /// Whether the observed status matches what the endpoint expects
    pub fn matches(&self, expected_status: u16) -> bool {
        self.status == Some(expected_status)
    }
}
