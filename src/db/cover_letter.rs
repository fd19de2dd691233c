//! Cover letter records in PostgreSQL

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use super::StoreError;
use crate::cover_letter::model::CoverLetterRecord;
use crate::cover_letter::CoverLetterStore;

const RETURNING_COLUMNS: &str = "id, position_title, company_name, job_description, generated_content, updated_content, generation_status, created_at, updated_at";

#[derive(sqlx::FromRow)]
struct CoverLetterRow {
    id: Uuid,
    position_title: String,
    company_name: String,
    job_description: String,
    generated_content: String,
    updated_content: Option<String>,
    generation_status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<CoverLetterRow> for CoverLetterRecord {
    type Error = StoreError;

    fn try_from(row: CoverLetterRow) -> Result<Self, Self::Error> {
        Ok(CoverLetterRecord {
            id: row.id,
            position_title: row.position_title,
            company_name: row.company_name,
            job_description: row.job_description,
            generated_content: row.generated_content,
            updated_content: row.updated_content,
            generation_status: row.generation_status.parse().map_err(StoreError::Corrupt)?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

pub struct PgCoverLetterStore {
    pool: PgPool,
}

impl PgCoverLetterStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn ensure_schema(&self) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS cover_letters (
                id UUID PRIMARY KEY,
                position_title TEXT NOT NULL,
                company_name TEXT NOT NULL,
                job_description TEXT NOT NULL,
                generated_content TEXT NOT NULL,
                updated_content TEXT,
                generation_status TEXT NOT NULL,
                created_at TIMESTAMPTZ NOT NULL,
                updated_at TIMESTAMPTZ NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}

#[async_trait]
impl CoverLetterStore for PgCoverLetterStore {
    async fn create(&self, record: CoverLetterRecord) -> Result<CoverLetterRecord, StoreError> {
        sqlx::query(
            r#"
            INSERT INTO cover_letters (id, position_title, company_name, job_description, generated_content, updated_content, generation_status, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(record.id)
        .bind(&record.position_title)
        .bind(&record.company_name)
        .bind(&record.job_description)
        .bind(&record.generated_content)
        .bind(record.updated_content.as_deref())
        .bind(record.generation_status.as_str())
        .bind(record.created_at)
        .bind(record.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(record)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<CoverLetterRecord>, StoreError> {
        let row = sqlx::query_as::<_, CoverLetterRow>(&format!(
            "SELECT {} FROM cover_letters WHERE id = $1",
            RETURNING_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        row.map(CoverLetterRecord::try_from).transpose()
    }

    async fn update_content(&self, id: Uuid, content: &str) -> Result<CoverLetterRecord, StoreError> {
        let row = sqlx::query_as::<_, CoverLetterRow>(&format!(
            "UPDATE cover_letters SET updated_content = $2, updated_at = $3 WHERE id = $1 RETURNING {}",
            RETURNING_COLUMNS
        ))
        .bind(id)
        .bind(content)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?;

        row.ok_or(StoreError::NotFound(id))?.try_into()
    }

    async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM cover_letters WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(id));
        }
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<CoverLetterRecord>, StoreError> {
        let rows = sqlx::query_as::<_, CoverLetterRow>(&format!(
            "SELECT {} FROM cover_letters ORDER BY created_at DESC",
            RETURNING_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;
        rows.into_iter().map(CoverLetterRecord::try_from).collect()
    }
}
