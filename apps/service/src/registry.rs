//! Endpoint registry.
//!
//! Owns every registered endpoint together with its check history. The map
//! of endpoints and each history ring sit behind their own read-write lock,
//! so the scheduler can append results while readers take snapshots.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

use crate::error::MonitorError;
use crate::models::{Endpoint, NewEndpoint};
use crate::monitoring::history::{DEFAULT_HISTORY_CAPACITY, HistoryRing};
use crate::monitoring::stats::DerivedStats;
use crate::monitoring::types::CheckResult;

/// An endpoint and the history of checks recorded against it
#[derive(Debug)]
pub struct MonitoredEndpoint {
    endpoint: Endpoint,
    sequence: u64,
    history: RwLock<HistoryRing>,
}

impl MonitoredEndpoint {
    fn new(endpoint: Endpoint, sequence: u64, capacity: usize) -> Self {
        Self { endpoint, sequence, history: RwLock::new(HistoryRing::new(capacity)) }
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    /// Append a check result to this endpoint's history
    pub async fn record(&self, result: CheckResult) {
        self.history.write().await.append(result);
    }

    /// Snapshot of the history, oldest first
    pub async fn history(&self) -> Vec<CheckResult> {
        self.history.read().await.all()
    }

    pub async fn last_check(&self) -> Option<CheckResult> {
        self.history.read().await.last().cloned()
    }

    /// Statistics computed over a consistent snapshot of the history
    pub async fn stats(&self) -> DerivedStats {
        let snapshot = self.history().await;
        DerivedStats::compute(&snapshot, self.endpoint.expected_status)
    }
}

/// Registry of monitored endpoints
#[derive(Debug)]
pub struct Registry {
    endpoints: RwLock<HashMap<Uuid, Arc<MonitoredEndpoint>>>,
    next_sequence: AtomicU64,
    history_capacity: usize,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_CAPACITY)
    }
}

impl Registry {
    pub fn new(history_capacity: usize) -> Self {
        Self {
            endpoints: RwLock::new(HashMap::new()),
            next_sequence: AtomicU64::new(0),
            history_capacity,
        }
    }

    /// Validate and store a new endpoint with an empty history
    pub async fn register(&self, request: NewEndpoint) -> Result<Endpoint, MonitorError> {
        let endpoint = request.into_endpoint()?;
        let sequence = self.next_sequence.fetch_add(1, Ordering::Relaxed);
        let entry = Arc::new(MonitoredEndpoint::new(endpoint.clone(), sequence, self.history_capacity));

        self.endpoints.write().await.insert(endpoint.id, entry);
        info!(id = %endpoint.id, url = %endpoint.url, "Registered endpoint '{}'", endpoint.name);

        Ok(endpoint)
    }

    pub async fn get(&self, id: Uuid) -> Option<Endpoint> {
        self.entry(id).await.map(|entry| entry.endpoint.clone())
    }

    pub async fn entry(&self, id: Uuid) -> Option<Arc<MonitoredEndpoint>> {
        self.endpoints.read().await.get(&id).cloned()
    }

    /// All entries in registration order
    pub async fn entries(&self) -> Vec<Arc<MonitoredEndpoint>> {
        let mut entries: Vec<_> = self.endpoints.read().await.values().cloned().collect();
        entries.sort_by_key(|entry| entry.sequence);
        entries
    }

    /// All endpoints in registration order
    pub async fn list(&self) -> Vec<Endpoint> {
        self.entries().await.into_iter().map(|entry| entry.endpoint.clone()).collect()
    }

    /// Remove an endpoint and discard its history
    pub async fn remove(&self, id: Uuid) -> bool {
        let removed = self.endpoints.write().await.remove(&id);
        if let Some(entry) = &removed {
            info!(id = %id, "Removed endpoint '{}'", entry.endpoint.name);
        }
        removed.is_some()
    }

    pub async fn is_empty(&self) -> bool {
        self.endpoints.read().await.is_empty()
    }
}
