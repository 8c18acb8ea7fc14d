//! In-memory station directory.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::RwLock;
use tracing::debug;

use crate::domain::{Station, StationId};

use super::error::StoreError;

/// Thread-safe station directory.
///
/// Owns every `Station` record; the rest of the system refers to stations
/// by id and resolves them here.
#[derive(Clone, Default)]
pub struct StationDirectory {
    inner: Arc<RwLock<HashMap<StationId, Station>>>,
    next_id: Arc<AtomicU64>,
}

impl StationDirectory {
    /// Create an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a station under a fresh id.
    pub async fn create(&self, name: impl Into<String>) -> Station {
        let id = StationId(self.next_id.fetch_add(1, Ordering::Relaxed) + 1);
        let station = Station::new(id, name);

        let mut guard = self.inner.write().await;
        guard.insert(id, station.clone());
        debug!(station = %id, "registered station");

        station
    }

    /// Resolve a station id to its record.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::StationNotFound`] for an unknown id.
    pub async fn resolve(&self, id: StationId) -> Result<Station, StoreError> {
        let guard = self.inner.read().await;
        guard
            .get(&id)
            .cloned()
            .ok_or(StoreError::StationNotFound(id))
    }

    /// All stations, in id order.
    pub async fn list(&self) -> Vec<Station> {
        let guard = self.inner.read().await;
        let mut stations: Vec<Station> = guard.values().cloned().collect();
        stations.sort_by_key(|s| s.id);
        stations
    }

    /// Delete a station.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::StationNotFound`] for an unknown id.
    pub async fn remove(&self, id: StationId) -> Result<(), StoreError> {
        let mut guard = self.inner.write().await;
        guard
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::StationNotFound(id))
    }
}
