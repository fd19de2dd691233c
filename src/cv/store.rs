//! Persistence seam for generation records.

use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;
use uuid::Uuid;

use super::model::{CvSummary, GenerationRecord, RecordUpdate};
use crate::db::StoreError;

#[async_trait]
pub trait GenerationStore: Send + Sync {
    async fn create(&self, record: GenerationRecord) -> Result<GenerationRecord, StoreError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<GenerationRecord>, StoreError>;
    /// Single-record atomic write; `NotFound` when the id is gone.
    async fn update(&self, id: Uuid, update: RecordUpdate) -> Result<GenerationRecord, StoreError>;
    async fn delete(&self, id: Uuid) -> Result<(), StoreError>;
    /// Newest first.
    async fn list_all(&self) -> Result<Vec<GenerationRecord>, StoreError>;

    /// Newest first, without PDF output. Stores that can skip loading it should.
    async fn list_summaries(&self) -> Result<Vec<CvSummary>, StoreError> {
        Ok(self.list_all().await?.iter().map(CvSummary::from).collect())
    }
}

/// Store used when no database is configured, and by the tests.
#[derive(Default)]
pub struct InMemoryGenerationStore {
    records: RwLock<HashMap<Uuid, GenerationRecord>>,
}

impl InMemoryGenerationStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl GenerationStore for InMemoryGenerationStore {
    async fn create(&self, record: GenerationRecord) -> Result<GenerationRecord, StoreError> {
        self.records.write().insert(record.id, record.clone());
        Ok(record)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<GenerationRecord>, StoreError> {
        Ok(self.records.read().get(&id).cloned())
    }

    async fn update(&self, id: Uuid, update: RecordUpdate) -> Result<GenerationRecord, StoreError> {
        let mut records = self.records.write();
        let record = records.get_mut(&id).ok_or(StoreError::NotFound(id))?;
        record.apply(update);
        Ok(record.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        self.records
            .write()
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::NotFound(id))
    }

    async fn list_all(&self) -> Result<Vec<GenerationRecord>, StoreError> {
        let mut records: Vec<GenerationRecord> = self.records.read().values().cloned().collect();
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(records)
    }
}
