use anyhow::Result;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::time::timeout;

use super::checker::{Checker, HttpChecker};
use super::types::{CheckResult, now_millis};

/// Default bound on a single probe
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(10);

/// Probe executor - runs exactly one check per call and never fails
///
/// Every outcome, including timeouts and transport errors, is folded into
/// the returned [`CheckResult`] so the caller can always record it.
pub struct ProbeExecutor {
    checker: Arc<dyn Checker>,
    timeout: Duration,
}

impl ProbeExecutor {
    /// Create an executor backed by the HTTP checker
    pub fn new(timeout: Duration) -> Result<Self> {
        Ok(Self::with_checker(Arc::new(HttpChecker::new(timeout)?), timeout))
    }

    /// Create an executor around any checker implementation
    pub fn with_checker(checker: Arc<dyn Checker>, timeout: Duration) -> Self {
        Self { checker, timeout }
    }

    /// Probe `target` once
    ///
    /// The timestamp is taken when the attempt starts. The response time
    /// covers the span from that moment until the response headers arrived.
    pub async fn probe(&self, target: &str) -> CheckResult {
        let timestamp = now_millis();
        let start = Instant::now();

        match timeout(self.timeout, self.checker.check(target)).await {
            Ok(Ok(status)) => {
                let elapsed = start.elapsed().as_millis() as u64;
                CheckResult::success(timestamp, status, elapsed)
            }
            Ok(Err(e)) => CheckResult::failure(timestamp, e.to_string()),
            Err(_) => CheckResult::failure(
                timestamp,
                format!("Request timed out after {}s", self.timeout.as_secs_f64()),
            ),
        }
    }
}
