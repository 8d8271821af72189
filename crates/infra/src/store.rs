use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use rigcheck_builds::BuildRecord;
use rigcheck_core::BuildId;

use crate::error::StoreError;

/// Persists flat build records (ids only, never products).
#[async_trait]
pub trait BuildStore: Send + Sync {
    /// Insert or overwrite the record with the same id.
    async fn save(&self, record: BuildRecord) -> Result<(), StoreError>;

    async fn load(&self, id: BuildId) -> Result<Option<BuildRecord>, StoreError>;

    async fn delete(&self, id: BuildId) -> Result<(), StoreError>;
}

#[async_trait]
impl<S> BuildStore for Arc<S>
where
    S: BuildStore + ?Sized,
{
    async fn save(&self, record: BuildRecord) -> Result<(), StoreError> {
        (**self).save(record).await
    }

    async fn load(&self, id: BuildId) -> Result<Option<BuildRecord>, StoreError> {
        (**self).load(id).await
    }

    async fn delete(&self, id: BuildId) -> Result<(), StoreError> {
        (**self).delete(id).await
    }
}

/// In-memory build store.
///
/// Records are kept as JSON so saves go through the same encoding a real
/// backend would see.
#[derive(Debug, Default)]
pub struct InMemoryBuildStore {
    records: RwLock<HashMap<BuildId, serde_json::Value>>,
    saves: AtomicUsize,
}

impl InMemoryBuildStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of successful saves since creation.
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BuildStore for InMemoryBuildStore {
    async fn save(&self, record: BuildRecord) -> Result<(), StoreError> {
        let encoded = serde_json::to_value(&record).map_err(|e| StoreError::Serialization(e.to_string()))?;
        self.records.write().await.insert(record.id, encoded);
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn load(&self, id: BuildId) -> Result<Option<BuildRecord>, StoreError> {
        let records = self.records.read().await;
        records
            .get(&id)
            .map(|value| serde_json::from_value(value.clone()).map_err(|e| StoreError::Serialization(e.to_string())))
            .transpose()
    }

    async fn delete(&self, id: BuildId) -> Result<(), StoreError> {
        match self.records.write().await.remove(&id) {
            Some(_) => Ok(()),
            None => Err(StoreError::NotFound(id)),
        }
    }
}
