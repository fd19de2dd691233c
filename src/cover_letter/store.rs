use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use std::collections::HashMap;
use uuid::Uuid;

use super::model::CoverLetterRecord;
use crate::db::StoreError;

#[async_trait]
pub trait CoverLetterStore: Send + Sync {
    async fn create(&self, record: CoverLetterRecord) -> Result<CoverLetterRecord, StoreError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<CoverLetterRecord>, StoreError>;
    /// Store the user's edit and refresh `updated_at`.
    async fn update_content(&self, id: Uuid, content: &str) -> Result<CoverLetterRecord, StoreError>;
    async fn delete(&self, id: Uuid) -> Result<(), StoreError>;
    /// Newest first.
    async fn list_all(&self) -> Result<Vec<CoverLetterRecord>, StoreError>;
}

#[derive(Default)]
pub struct InMemoryCoverLetterStore {
    records: RwLock<HashMap<Uuid, CoverLetterRecord>>,
}

impl InMemoryCoverLetterStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CoverLetterStore for InMemoryCoverLetterStore {
    async fn create(&self, record: CoverLetterRecord) -> Result<CoverLetterRecord, StoreError> {
        self.records.write().insert(record.id, record.clone());
        Ok(record)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<CoverLetterRecord>, StoreError> {
        Ok(self.records.read().get(&id).cloned())
    }

    async fn update_content(&self, id: Uuid, content: &str) -> Result<CoverLetterRecord, StoreError> {
        let mut records = self.records.write();
        let record = records.get_mut(&id).ok_or(StoreError::NotFound(id))?;
        record.updated_content = Some(content.to_string());
        record.updated_at = Utc::now();
        Ok(record.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        self.records
            .write()
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::NotFound(id))
    }

    async fn list_all(&self) -> Result<Vec<CoverLetterRecord>, StoreError> {
        let mut records: Vec<CoverLetterRecord> = self.records.read().values().cloned().collect();
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(records)
    }
}
