//! Statistics derived from an endpoint's check history.
//!
//! Everything here is a pure function of the results and the expected status
//! code. Nothing is cached, so repeated calls over the same history return
//! identical values.

use serde::{Deserialize, Serialize};

use super::types::{CheckResult, EndpointStatus};

/// Percentage of checks whose status matched `expected_status`, in [0, 100]
pub fn uptime(results: &[CheckResult], expected_status: u16) -> f64 {
    if results.is_empty() {
        return 0.0;
    }

    let successful = results.iter().filter(|r| r.matches(expected_status)).count();
    (successful as f64 / results.len() as f64) * 100.0
}

/// Mean of the recorded response times, rounded to the nearest millisecond
pub fn average_response_time(results: &[CheckResult]) -> u64 {
    let (sum, count) = results
        .iter()
        .filter_map(|r| r.response_time)
        .fold((0u64, 0u64), |(sum, count), rt| (sum.saturating_add(rt), count + 1));

    if count == 0 {
        return 0;
    }

    (sum + count / 2) / count
}

/// Classify the endpoint from its latest check
pub fn current_status(results: &[CheckResult], expected_status: u16) -> EndpointStatus {
    match results.last() {
        None => EndpointStatus::Unknown,
        Some(last) if last.matches(expected_status) => EndpointStatus::Up,
        Some(_) => EndpointStatus::Down,
    }
}

/// Snapshot of everything the dashboard and badge need for one endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedStats {
    pub uptime: f64,
    pub avg_response_time: u64,
    pub last_check: Option<CheckResult>,
    pub status: EndpointStatus,
    pub total_checks: u64,
    pub successful_checks: u64,
    pub min_response_time: u64,
    pub max_response_time: u64,
}

impl DerivedStats {
    pub fn compute(results: &[CheckResult], expected_status: u16) -> Self {
        let successful = results.iter().filter(|r| r.matches(expected_status)).count() as u64;
        let latencies = results.iter().filter_map(|r| r.response_time);

        Self {
            uptime: uptime(results, expected_status),
            avg_response_time: average_response_time(results),
            last_check: results.last().cloned(),
            status: current_status(results, expected_status),
            total_checks: results.len() as u64,
            successful_checks: successful,
            min_response_time: latencies.clone().min().unwrap_or(0),
            max_response_time: latencies.max().unwrap_or(0),
        }
    }
}
