use futures::future::join_all;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::sync::broadcast;
use tokio::time::{Instant, MissedTickBehavior, interval_at};
use tracing::{debug, error, info};
use uuid::Uuid;

use super::executor::ProbeExecutor;
use super::types::CheckResult;
use crate::registry::Registry;

/// Default time between periodic sweeps
pub const DEFAULT_SWEEP_INTERVAL: Duration = Duration::from_secs(60);

/// Result of probing one endpoint during a sweep
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SweepEntry {
    #[serde(rename = "id")]
    pub endpoint_id: Uuid,

    #[serde(flatten)]
    pub result: CheckResult,
}

/// Holds the in-flight flag for the lifetime of one sweep task
struct SweepGuard(Arc<MonitoringScheduler>);

impl SweepGuard {
    fn acquire(scheduler: &Arc<MonitoringScheduler>) -> Option<Self> {
        scheduler
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(Arc::clone(scheduler)))
    }
}

impl Drop for SweepGuard {
    fn drop(&mut self) {
        self.0.in_flight.store(false, Ordering::Release);
    }
}

/// Monitoring scheduler - probes every registered endpoint in sweeps
///
/// Only one sweep runs at a time. A sweep requested while another is in
/// flight is dropped rather than queued.
pub struct MonitoringScheduler {
    registry: Arc<Registry>,
    executor: Arc<ProbeExecutor>,
    in_flight: AtomicBool,
    report_tx: broadcast::Sender<Arc<Vec<SweepEntry>>>,
}

impl MonitoringScheduler {
    /// Create a new monitoring scheduler
    pub fn new(registry: Arc<Registry>, executor: Arc<ProbeExecutor>) -> Self {
        let (report_tx, _) = broadcast::channel(16);
        Self { registry, executor, in_flight: AtomicBool::new(false), report_tx }
    }

    pub fn is_sweeping(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Receive the results of every completed sweep
    pub fn subscribe(&self) -> broadcast::Receiver<Arc<Vec<SweepEntry>>> {
        self.report_tx.subscribe()
    }

    /// Probe every registered endpoint concurrently and record the results
    ///
    /// Returns `None` without probing anything when another sweep is still
    /// running. Otherwise waits for every probe to finish or time out. The
    /// sweep runs in its own task, so it completes and records every result
    /// even if the caller stops waiting.
    pub async fn run_sweep(self: &Arc<Self>) -> Option<Vec<SweepEntry>> {
        let Some(guard) = SweepGuard::acquire(self) else {
            info!("Sweep already in flight, ignoring trigger");
            return None;
        };

        let task = tokio::spawn(async move {
            let entries = guard.0.sweep().await;
            drop(guard);
            entries
        });

        match task.await {
            Ok(entries) => Some(entries),
            Err(e) => {
                error!("Sweep task failed: {}", e);
                Some(Vec::new())
            }
        }
    }

    async fn sweep(&self) -> Vec<SweepEntry> {
        let targets = self.registry.entries().await;
        let started = Instant::now();
        debug!("Starting sweep over {} endpoints", targets.len());

        let probes = targets.into_iter().map(|target| async move {
            let endpoint = target.endpoint();
            let result = self.executor.probe(&endpoint.url).await;

            if let Some(error) = &result.error {
                debug!(id = %endpoint.id, url = %endpoint.url, "Probe failed: {}", error);
            }

            target.record(result.clone()).await;
            SweepEntry { endpoint_id: endpoint.id, result }
        });

        let entries = join_all(probes).await;
        debug!("Sweep finished in {:?} ({} results)", started.elapsed(), entries.len());

        // No subscribers is fine
        let _ = self.report_tx.send(Arc::new(entries.clone()));

        entries
    }

    /// Run a sweep every `period`, starting one period from now
    pub fn start(self: Arc<Self>, period: Duration) -> tokio::task::JoinHandle<()> {
        tokio::spawn(async move {
            let mut timer = interval_at(Instant::now() + period, period);
            timer.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                timer.tick().await;

                if self.run_sweep().await.is_none() {
                    debug!("Periodic sweep skipped, a manual sweep is running");
                }
            }
        })
    }
}
