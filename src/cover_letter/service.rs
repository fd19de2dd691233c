//! Cover letter records and their PDF renderings.

use chrono::Utc;
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

use super::model::{
    CoverLetterRecord, CreateCoverLetterRequest, CustomPdfRequest, UpdateCoverLetterRequest,
};
use super::store::CoverLetterStore;
use crate::cv::model::GenerationStatus;
use crate::db::StoreError;
use crate::generation::cover_letter::{FormattedLetter, SimpleLetter};
use crate::generation::title::{cover_letter_filename, CoverLetterKind};
use crate::generation::validation::ValidationErrors;
use crate::generation::{
    detect, DocumentComposer, GeneratedDocument, GeneratorError, Layout, Validator,
};

#[derive(Debug, Error)]
pub enum CoverLetterError {
    #[error("{}", .0.to_message())]
    Validation(ValidationErrors),
    #[error("Cover letter not found: {0}")]
    NotFound(Uuid),
    #[error("Cover letter {0} has not been generated or its content is empty")]
    NotReady(Uuid),
    #[error("PDF generation failed: {0}")]
    Generation(String),
    #[error(transparent)]
    Store(StoreError),
}

impl From<StoreError> for CoverLetterError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => Self::NotFound(id),
            other => Self::Store(other),
        }
    }
}

impl From<GeneratorError> for CoverLetterError {
    fn from(err: GeneratorError) -> Self {
        Self::Generation(err.to_string())
    }
}

pub struct CoverLetterService {
    store: Arc<dyn CoverLetterStore>,
    composer: Arc<DocumentComposer>,
}

impl CoverLetterService {
    pub fn new(store: Arc<dyn CoverLetterStore>, composer: Arc<DocumentComposer>) -> Self {
        Self { store, composer }
    }

    pub async fn create(
        &self,
        request: CreateCoverLetterRequest,
    ) -> Result<CoverLetterRecord, CoverLetterError> {
        request.validate().map_err(CoverLetterError::Validation)?;

        let now = Utc::now();
        let generated_content = format!(
            "{}\n\n{}",
            request.content,
            request.user_profile.signature_block()
        );
        let record = CoverLetterRecord {
            id: Uuid::new_v4(),
            position_title: request.position_title,
            company_name: request.company_name,
            job_description: request.job_description,
            generated_content,
            updated_content: None,
            generation_status: GenerationStatus::Completed,
            created_at: now,
            updated_at: now,
        };

        let record = self.store.create(record).await?;
        log::info!(
            "Cover letter {} created for {} at {}",
            record.id,
            record.position_title,
            record.company_name
        );
        Ok(record)
    }

    pub async fn get(&self, id: Uuid) -> Result<CoverLetterRecord, CoverLetterError> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or(CoverLetterError::NotFound(id))
    }

    pub async fn list(&self) -> Result<Vec<CoverLetterRecord>, CoverLetterError> {
        Ok(self.store.list_all().await?)
    }

    pub async fn update(
        &self,
        id: Uuid,
        request: UpdateCoverLetterRequest,
    ) -> Result<CoverLetterRecord, CoverLetterError> {
        request.validate().map_err(CoverLetterError::Validation)?;
        let record = self.store.update_content(id, &request.updated_content).await?;
        log::info!("Cover letter {} updated", id);
        Ok(record)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), CoverLetterError> {
        self.store.delete(id).await?;
        log::info!("Cover letter {} deleted", id);
        Ok(())
    }

    /// Render a stored letter with the simple layout.
    pub async fn download_pdf(&self, id: Uuid) -> Result<GeneratedDocument, CoverLetterError> {
        let record = self.get(id).await?;
        if record.generation_status != GenerationStatus::Completed
            || record.effective_content().trim().is_empty()
        {
            return Err(CoverLetterError::NotReady(id));
        }

        let content = record.effective_content().to_string();
        let language = detect(&content);
        let filename = cover_letter_filename(
            &record.company_name,
            &record.position_title,
            CoverLetterKind::Stored,
        );

        let composer = self.composer.clone();
        let pdf = tokio::task::spawn_blocking(move || {
            let layout = SimpleLetter {
                company: &record.company_name,
                position: &record.position_title,
                content: &content,
                language,
            };
            composer.compose(&layout.build())
        })
        .await
        .map_err(|e| CoverLetterError::Generation(format!("render task failed: {}", e)))??;

        Ok(GeneratedDocument {
            filename,
            pdf,
            language,
        })
    }

    /// Render text the user edited with the formatted layout.
    pub async fn custom_pdf(
        &self,
        request: CustomPdfRequest,
    ) -> Result<GeneratedDocument, CoverLetterError> {
        request.validate().map_err(CoverLetterError::Validation)?;

        let language = request.language.unwrap_or_else(|| detect(&request.content));
        let filename = cover_letter_filename(
            &request.company_name,
            &request.position_title,
            CoverLetterKind::Edited,
        );

        let composer = self.composer.clone();
        let pdf = tokio::task::spawn_blocking(move || {
            let layout = FormattedLetter::new(
                &request.company_name,
                &request.position_title,
                &request.content,
                language,
                request.full_name.as_deref(),
            );
            composer.compose(&layout.build())
        })
        .await
        .map_err(|e| CoverLetterError::Generation(format!("render task failed: {}", e)))??;

        Ok(GeneratedDocument {
            filename,
            pdf,
            language,
        })
    }
}
