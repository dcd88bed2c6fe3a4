//! Orchestrator module - coordinates all components
//!
//! The orchestrator wires the registry, probe executor and scheduler
//! together and exposes the query and mutation interface consumed by the
//! presentation layers (HTTP API, badge, CLI).

use anyhow::Result;
use std::sync::{Arc, Mutex};
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::MonitoringConfig;
use crate::error::MonitorError;
use crate::models::{Endpoint, NewEndpoint};
use crate::monitoring::{
    CheckResult, DerivedStats, EndpointStatus, MonitoringScheduler, ProbeExecutor, SweepEntry,
};
use crate::registry::Registry;

/// What a status badge needs to know about one endpoint
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BadgeState {
    pub status: EndpointStatus,
    pub uptime: f64,
}

impl BadgeState {
    /// Badge shown for endpoints that do not exist
    pub fn unknown() -> Self {
        Self { status: EndpointStatus::Unknown, uptime: 0.0 }
    }
}

/// Main orchestrator for the uptime monitor
pub struct Orchestrator {
    config: MonitoringConfig,
    registry: Arc<Registry>,
    scheduler: Arc<MonitoringScheduler>,
    scheduler_handle: Mutex<Option<JoinHandle<()>>>,
}

impl Orchestrator {
    /// Create an orchestrator probing over HTTP
    pub fn new(config: MonitoringConfig) -> Result<Self> {
        let executor = ProbeExecutor::new(config.timeout())?;
        Ok(Self::with_executor(config, executor))
    }

    /// Create an orchestrator around a custom executor
    pub fn with_executor(config: MonitoringConfig, executor: ProbeExecutor) -> Self {
        let registry = Arc::new(Registry::new(config.history_capacity));
        let scheduler = Arc::new(MonitoringScheduler::new(registry.clone(), Arc::new(executor)));

        Self { config, registry, scheduler, scheduler_handle: Mutex::new(None) }
    }

    /// Register every seed endpoint, skipping (and logging) invalid ones
    pub async fn seed(&self, seeds: &[NewEndpoint]) -> Vec<Endpoint> {
        let mut registered = Vec::with_capacity(seeds.len());
        for seed in seeds {
            match self.registry.register(seed.clone()).await {
                Ok(endpoint) => registered.push(endpoint),
                Err(e) => warn!("Skipping configured endpoint '{}': {}", seed.name, e),
            }
        }
        registered
    }

    /// Start periodic sweeps. Does nothing if they are already running.
    pub fn start_scheduler(&self) {
        let mut handle = self.scheduler_handle.lock().unwrap_or_else(|e| e.into_inner());
        if handle.as_ref().is_some_and(|h| !h.is_finished()) {
            return;
        }

        info!(
            "Sweeping every {}s (probe timeout {}s)",
            self.config.interval_seconds, self.config.timeout_seconds
        );
        *handle = Some(self.scheduler.clone().start(self.config.interval()));
    }

    pub fn stop_scheduler(&self) {
        let mut handle = self.scheduler_handle.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(handle) = handle.take() {
            handle.abort();
            info!("Periodic sweeps stopped");
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Arc<Vec<SweepEntry>>> {
        self.scheduler.subscribe()
    }

    pub async fn list_endpoints(&self) -> Vec<Endpoint> {
        self.registry.list().await
    }

    pub async fn get_endpoint(&self, id: Uuid) -> Option<Endpoint> {
        self.registry.get(id).await
    }

    pub async fn get_stats(&self, id: Uuid) -> Option<DerivedStats> {
        Some(self.registry.entry(id).await?.stats().await)
    }

    /// Recorded checks for one endpoint, oldest first
    pub async fn get_history(&self, id: Uuid) -> Option<Vec<CheckResult>> {
        Some(self.registry.entry(id).await?.history().await)
    }

    /// Every endpoint paired with its history, in registration order
    pub async fn list_with_history(&self) -> Vec<(Endpoint, Vec<CheckResult>)> {
        let mut listing = Vec::new();
        for entry in self.registry.entries().await {
            listing.push((entry.endpoint().clone(), entry.history().await));
        }
        listing
    }

    pub async fn badge_state(&self, id: Uuid) -> BadgeState {
        match self.get_stats(id).await {
            Some(stats) => BadgeState { status: stats.status, uptime: stats.uptime },
            None => BadgeState::unknown(),
        }
    }

    pub async fn register_endpoint(&self, request: NewEndpoint) -> Result<Endpoint, MonitorError> {
        self.registry.register(request).await
    }

    pub async fn remove_endpoint(&self, id: Uuid) -> bool {
        self.registry.remove(id).await
    }

    /// Run a sweep now. `None` means one was already in flight.
    pub async fn trigger_sweep(&self) -> Option<Vec<SweepEntry>> {
        self.scheduler.run_sweep().await
    }
}

impl Drop for Orchestrator {
    fn drop(&mut self) {
        self.stop_scheduler();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::monitoring::checker::Checker;
    use anyhow::anyhow;
    use std::collections::VecDeque;
    use std::time::Duration;
    use tokio::sync::Mutex as AsyncMutex;

    /// Replays a scripted list of outcomes, one per check
    struct ScriptedChecker {
        script: AsyncMutex<VecDeque<Option<u16>>>,
    }

    impl ScriptedChecker {
        fn new(script: Vec<Option<u16>>) -> Arc<Self> {
            Arc::new(Self { script: AsyncMutex::new(script.into()) })
        }
    }

    #[async_trait::async_trait]
    impl Checker for ScriptedChecker {
        async fn check(&self, _target: &str) -> anyhow::Result<u16> {
            match self.script.lock().await.pop_front().flatten() {
                Some(status) => Ok(status),
                None => Err(anyhow!("Connection failed: scripted failure")),
            }
        }
    }

    fn orchestrator(script: Vec<Option<u16>>) -> Orchestrator {
        let config = MonitoringConfig::default();
        let executor = ProbeExecutor::with_checker(ScriptedChecker::new(script), Duration::from_secs(5));
        Orchestrator::with_executor(config, executor)
    }

    #[tokio::test]
    async fn test_three_of_four_sweeps_up() {
        let orchestrator = orchestrator(vec![Some(200), Some(200), Some(500), Some(200)]);
        let endpoint = orchestrator
            .register_endpoint(NewEndpoint::new("API", "https://example.com"))
            .await
            .unwrap();

        for _ in 0..4 {
            orchestrator.trigger_sweep().await.unwrap();
        }

        let stats = orchestrator.get_stats(endpoint.id).await.unwrap();
        assert_eq!(stats.uptime, 75.0);
        assert_eq!(stats.status, EndpointStatus::Up);
        assert_eq!(stats.total_checks, 4);
        assert_eq!(stats.last_check.unwrap().status, Some(200));

        // Nothing changes between reads
        assert_eq!(orchestrator.get_stats(endpoint.id).await.unwrap().uptime, 75.0);
    }

    #[tokio::test]
    async fn test_failure_then_success() {
        let orchestrator = orchestrator(vec![None, Some(200)]);
        let endpoint = orchestrator
            .register_endpoint(NewEndpoint::new("API", "https://example.com"))
            .await
            .unwrap();

        orchestrator.trigger_sweep().await.unwrap();
        orchestrator.trigger_sweep().await.unwrap();

        let history = orchestrator.get_history(endpoint.id).await.unwrap();
        assert!(history[0].is_failure());
        assert!(history[0].timestamp <= history[1].timestamp);

        let stats = orchestrator.get_stats(endpoint.id).await.unwrap();
        assert_eq!(stats.uptime, 50.0);
        assert_eq!(stats.status, EndpointStatus::Up);
        assert_eq!(stats.avg_response_time, history[1].response_time.unwrap());
    }

    #[tokio::test]
    async fn test_badge_state() {
        let orchestrator = orchestrator(vec![None]);
        let endpoint = orchestrator
            .register_endpoint(NewEndpoint::new("API", "https://example.com"))
            .await
            .unwrap();

        assert_eq!(orchestrator.badge_state(endpoint.id).await, BadgeState::unknown());
        assert_eq!(orchestrator.badge_state(Uuid::new_v4()).await, BadgeState::unknown());

        orchestrator.trigger_sweep().await.unwrap();
        let state = orchestrator.badge_state(endpoint.id).await;
        assert_eq!(state.status, EndpointStatus::Down);
        assert_eq!(state.uptime, 0.0);
    }

    #[tokio::test]
    async fn test_removed_endpoint_is_gone() {
        let orchestrator = orchestrator(vec![]);
        let endpoint = orchestrator
            .register_endpoint(NewEndpoint::new("API", "https://example.com"))
            .await
            .unwrap();

        assert!(orchestrator.remove_endpoint(endpoint.id).await);
        assert!(orchestrator.get_endpoint(endpoint.id).await.is_none());
        assert!(orchestrator.get_stats(endpoint.id).await.is_none());
        assert!(orchestrator.get_history(endpoint.id).await.is_none());
        assert_eq!(orchestrator.trigger_sweep().await, Some(Vec::new()));
    }

    #[tokio::test]
    async fn test_seed_skips_invalid_entries() {
        let orchestrator = orchestrator(vec![]);
        let seeded = orchestrator
            .seed(&[
                NewEndpoint::new("API", "https://example.com"),
                NewEndpoint::new("", "https://example.com"),
                NewEndpoint::new("Bad", "example.com"),
            ])
            .await;

        assert_eq!(seeded.len(), 1);
        assert_eq!(orchestrator.list_endpoints().await, seeded);
    }

    #[tokio::test]
    async fn test_start_scheduler_is_idempotent() {
        let orchestrator = orchestrator(vec![]);
        orchestrator.start_scheduler();
        orchestrator.start_scheduler();
        orchestrator.stop_scheduler();
        orchestrator.stop_scheduler();
    }
}
