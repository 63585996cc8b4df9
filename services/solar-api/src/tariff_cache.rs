//! Read-through cache for the utility tariff table.
//!
//! ## Invalidation
//! Entries never expire. `invalidate()` drops the cached table so the next
//! read reloads it from disk.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use solar_common::{SolarError, SolarResult};
use tokio::sync::RwLock;
use tracing::info;

use crate::billing::TariffTable;

/// Tariff table loaded lazily from a YAML file.
pub struct TariffCache {
    path: PathBuf,
    table: RwLock<Option<Arc<TariffTable>>>,
    loads: AtomicU64,
}

impl TariffCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            table: RwLock::new(None),
            loads: AtomicU64::new(0),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The cached table, loading it on first use.
    pub async fn table(&self) -> SolarResult<Arc<TariffTable>> {
        if let Some(table) = self.table.read().await.as_ref() {
            return Ok(Arc::clone(table));
        }

        let mut slot = self.table.write().await;
        // another request may have loaded it while we waited
        if let Some(table) = slot.as_ref() {
            return Ok(Arc::clone(table));
        }

        let table = Arc::new(self.load().await?);
        *slot = Some(Arc::clone(&table));
        Ok(table)
    }

    /// Drop the cached table.
    pub async fn invalidate(&self) {
        *self.table.write().await = None;
    }

    /// Number of times the table has been read from disk.
    pub fn load_count(&self) -> u64 {
        self.loads.load(Ordering::Relaxed)
    }

    async fn load(&self) -> SolarResult<TariffTable> {
        let content = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            SolarError::configuration(format!(
                "Failed to read tariff table {}: {}",
                self.path.display(),
                e
            ))
        })?;
        let table: TariffTable = serde_yaml::from_str(&content).map_err(|e| {
            SolarError::configuration(format!(
                "Failed to parse tariff table {}: {}",
                self.path.display(),
                e
            ))
        })?;

        self.loads.fetch_add(1, Ordering::Relaxed);
        info!(
            path = %self.path.display(),
            regions = table.regions.len(),
            "Loaded tariff table"
        );
        Ok(table)
    }
}
