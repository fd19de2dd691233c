//! Database module - AppState and the PostgreSQL stores
//!
//! - `generation` - CV generation records
//! - `cover_letter` - cover letter records
//!
//! Without a `DATABASE_URL` the in-memory stores are used instead.

mod cover_letter;
mod generation;

pub use cover_letter::PgCoverLetterStore;
pub use generation::PgGenerationStore;

use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use uuid::Uuid;

use crate::config::AppConfig;
use crate::cover_letter::{CoverLetterService, CoverLetterStore, InMemoryCoverLetterStore};
use crate::cv::{GenerationStore, GenerationTracker, InMemoryGenerationStore};
use crate::generation::{DocumentComposer, FontCache, TemplateDispatcher, TemplateRegistry};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("record not found: {0}")]
    NotFound(Uuid),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("stored record is invalid: {0}")]
    Corrupt(String),
}

#[derive(Clone)]
pub struct AppState {
    pub tracker: Arc<GenerationTracker>,
    pub cover_letters: Arc<CoverLetterService>,
    pub fonts: Arc<FontCache>,
}

impl AppState {
    /// Connect to PostgreSQL when configured, otherwise keep everything in memory.
    pub async fn new_with_config(config: &AppConfig) -> Result<Self, StoreError> {
        let fonts = Arc::new(FontCache::with_default_locations(config.font_dir.clone()));

        let Some(database_url) = config.database_url.as_deref() else {
            log::warn!("DATABASE_URL is not set, records are kept in memory only");
            return Ok(Self::in_memory(fonts));
        };

        let pool = sqlx::postgres::PgPoolOptions::new()
            .max_connections(20)
            .min_connections(2)
            .acquire_timeout(Duration::from_secs(30))
            .idle_timeout(Duration::from_secs(900))
            .max_lifetime(Duration::from_secs(1800))
            .connect(database_url)
            .await?;

        Self::new_with_pool(pool, fonts).await
    }

    /// PostgreSQL stores on an existing pool; tables are created if missing.
    pub async fn new_with_pool(pool: PgPool, fonts: Arc<FontCache>) -> Result<Self, StoreError> {
        let generations = PgGenerationStore::new(pool.clone());
        generations.ensure_schema().await?;
        let cover_letters = PgCoverLetterStore::new(pool);
        cover_letters.ensure_schema().await?;
        log::info!("Connected to PostgreSQL, schema ready");

        Ok(Self::with_stores(
            Arc::new(generations),
            Arc::new(cover_letters),
            fonts,
        ))
    }

    pub fn in_memory(fonts: Arc<FontCache>) -> Self {
        Self::with_stores(
            Arc::new(InMemoryGenerationStore::new()),
            Arc::new(InMemoryCoverLetterStore::new()),
            fonts,
        )
    }

    /// Wire the services on top of the given stores.
    pub fn with_stores(
        generations: Arc<dyn GenerationStore>,
        cover_letters: Arc<dyn CoverLetterStore>,
        fonts: Arc<FontCache>,
    ) -> Self {
        let composer = Arc::new(DocumentComposer::new(fonts.clone()));
        let dispatcher = TemplateDispatcher::new(TemplateRegistry::with_defaults(composer.clone()));

        Self {
            tracker: Arc::new(GenerationTracker::new(generations, dispatcher)),
            cover_letters: Arc::new(CoverLetterService::new(cover_letters, composer)),
            fonts,
        }
    }
}
