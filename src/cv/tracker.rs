//! Generation tracker.
//!
//! Every attempt gets a record that starts `PROCESSING` and ends `COMPLETED` with the PDF
//! or `FAILED` without one. Regeneration reuses the record.

use moka::future::Cache;
use serde_json::Value;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use uuid::Uuid;

use super::model::{CvSummary, GenerationRecord, GenerationStatus, RecordUpdate};
use super::store::GenerationStore;
use crate::db::StoreError;
use crate::generation::templates::RenderOptions;
use crate::generation::validation::ValidationErrors;
use crate::generation::{DispatchError, TemplateDispatcher};

const LIST_CACHE_KEY: &str = "cv_generations";

#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("{}", .0.to_message())]
    Validation(ValidationErrors),
    #[error("CV not found: {0}")]
    NotFound(Uuid),
    #[error("Unsupported template type: {0}")]
    UnsupportedTemplate(String),
    #[error("PDF generation failed: {0}")]
    Generation(String),
    #[error("CV {id} is {status} and cannot be regenerated yet")]
    InvalidState { id: Uuid, status: GenerationStatus },
    #[error("CV {0} has no PDF output")]
    NotReady(Uuid),
    #[error(transparent)]
    Store(StoreError),
}

impl From<DispatchError> for TrackerError {
    fn from(err: DispatchError) -> Self {
        match err {
            DispatchError::Validation(errors) => Self::Validation(errors),
            DispatchError::UnsupportedTemplate(template) => Self::UnsupportedTemplate(template),
            DispatchError::GenerationFailed(cause) => Self::Generation(cause),
        }
    }
}

impl From<StoreError> for TrackerError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => Self::NotFound(id),
            other => Self::Store(other),
        }
    }
}

pub struct GenerationTracker {
    store: Arc<dyn GenerationStore>,
    dispatcher: TemplateDispatcher,
    list_cache: Cache<String, Vec<CvSummary>>,
    /// Bumped after every write, before the cached list is invalidated.
    write_epoch: AtomicU64,
}

impl GenerationTracker {
    pub fn new(store: Arc<dyn GenerationStore>, dispatcher: TemplateDispatcher) -> Self {
        let list_cache = Cache::builder()
            .time_to_live(Duration::from_secs(10 * 60))
            .max_capacity(10)
            .build();

        Self {
            store,
            dispatcher,
            list_cache,
            write_epoch: AtomicU64::new(0),
        }
    }

    /// Create a record and render it.
    ///
    /// The version/language pair is checked before anything is stored. A dispatch error
    /// leaves the record `FAILED` and is returned as is.
    pub async fn generate(
        &self,
        template_type: &str,
        data: Value,
        version: Option<&str>,
        language: Option<&str>,
    ) -> Result<GenerationRecord, TrackerError> {
        RenderOptions::validate(version, language).map_err(TrackerError::Validation)?;

        let record = self
            .store
            .create(GenerationRecord::processing(template_type, data.clone()))
            .await?;
        self.invalidate_list().await;
        log::info!("CV generation {} started with template '{}'", record.id, template_type);

        let rendered = self
            .render(template_type.to_string(), data, version, language)
            .await;
        self.finish(record.id, rendered, None).await
    }

    /// Render new data into an existing record.
    pub async fn regenerate(
        &self,
        id: Uuid,
        data: Value,
        version: Option<&str>,
        language: Option<&str>,
    ) -> Result<GenerationRecord, TrackerError> {
        let record = self.get(id).await?;
        if record.generation_status == GenerationStatus::Processing {
            return Err(TrackerError::InvalidState {
                id,
                status: record.generation_status,
            });
        }
        RenderOptions::validate(version, language).map_err(TrackerError::Validation)?;

        log::info!("Regenerating CV {} with template '{}'", id, record.template_type);
        let rendered = self
            .render(record.template_type, data.clone(), version, language)
            .await;
        self.finish(id, rendered, Some(data)).await
    }

    pub async fn get(&self, id: Uuid) -> Result<GenerationRecord, TrackerError> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or(TrackerError::NotFound(id))
    }

    /// Summaries, newest first.
    ///
    /// A snapshot read while a write was in flight is dropped from the cache again, so the
    /// next call goes back to the store.
    pub async fn list(&self) -> Result<Vec<CvSummary>, TrackerError> {
        if let Some(summaries) = self.list_cache.get(LIST_CACHE_KEY).await {
            return Ok(summaries);
        }

        let epoch = self.write_epoch.load(Ordering::SeqCst);
        let summaries = self.store.list_summaries().await?;
        self.list_cache
            .insert(LIST_CACHE_KEY.to_string(), summaries.clone())
            .await;
        if self.write_epoch.load(Ordering::SeqCst) != epoch {
            log::debug!("CV list changed while it was being read, not caching it");
            self.list_cache.invalidate(LIST_CACHE_KEY).await;
        }
        Ok(summaries)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), TrackerError> {
        self.store.delete(id).await?;
        self.invalidate_list().await;
        log::info!("CV {} deleted", id);
        Ok(())
    }

    /// The stored PDF of a completed record.
    pub async fn download(&self, id: Uuid) -> Result<Vec<u8>, TrackerError> {
        let record = self.get(id).await?;
        match record.pdf_data {
            Some(pdf) if !pdf.is_empty() => Ok(pdf),
            _ => Err(TrackerError::NotReady(id)),
        }
    }

    async fn render(
        &self,
        template_type: String,
        data: Value,
        version: Option<&str>,
        language: Option<&str>,
    ) -> Result<Vec<u8>, TrackerError> {
        let dispatcher = self.dispatcher.clone();
        let version = version.map(str::to_string);
        let language = language.map(str::to_string);

        tokio::task::spawn_blocking(move || {
            dispatcher.dispatch(
                &template_type,
                &data,
                version.as_deref(),
                language.as_deref(),
            )
        })
        .await
        .map_err(|e| TrackerError::Generation(format!("render task failed: {}", e)))?
        .map_err(TrackerError::from)
    }

    /// Write the terminal status for a render result.
    async fn finish(
        &self,
        id: Uuid,
        rendered: Result<Vec<u8>, TrackerError>,
        template_data: Option<Value>,
    ) -> Result<GenerationRecord, TrackerError> {
        let pdf = match rendered {
            Ok(pdf) => pdf,
            Err(e) => {
                log::error!("CV generation {} failed: {}", id, e);
                self.mark_failed(id, template_data).await;
                return Err(e);
            }
        };

        let mut update = RecordUpdate::completed(pdf);
        if let Some(data) = template_data.clone() {
            update = update.with_template_data(data);
        }

        let result = self.store.update(id, update).await;
        self.invalidate_list().await;
        match result {
            Ok(record) => {
                log::info!("CV generation {} completed", id);
                Ok(record)
            }
            Err(e) => {
                log::error!("Failed to store PDF for CV {}: {}", id, e);
                self.mark_failed(id, template_data).await;
                Err(e.into())
            }
        }
    }

    /// Best effort: a failure here is logged and dropped so the caller's error wins.
    async fn mark_failed(&self, id: Uuid, template_data: Option<Value>) {
        let mut update = RecordUpdate::failed();
        if let Some(data) = template_data {
            update = update.with_template_data(data);
        }

        if let Err(e) = self.store.update(id, update).await {
            log::error!("Failed to mark CV {} as FAILED: {}", id, e);
        }
        self.invalidate_list().await;
    }

    async fn invalidate_list(&self) {
        self.write_epoch.fetch_add(1, Ordering::SeqCst);
        self.list_cache.invalidate(LIST_CACHE_KEY).await;
    }
}
