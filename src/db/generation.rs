//! CV generation records in PostgreSQL

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::PgPool;
use uuid::Uuid;

use super::StoreError;
use crate::cv::model::{CvSummary, GenerationRecord, RecordUpdate};
use crate::cv::GenerationStore;

const SELECT_COLUMNS: &str = "SELECT id, template_type, template_data, generation_status, pdf_data, created_at, updated_at FROM generated_cvs";
const SELECT_SUMMARIES: &str = "SELECT id, template_type, generation_status, created_at, updated_at FROM generated_cvs ORDER BY created_at DESC";

#[derive(sqlx::FromRow)]
struct GenerationRow {
    id: Uuid,
    template_type: String,
    template_data: Value,
    generation_status: String,
    pdf_data: Option<Vec<u8>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<GenerationRow> for GenerationRecord {
    type Error = StoreError;

    fn try_from(row: GenerationRow) -> Result<Self, Self::Error> {
        Ok(GenerationRecord {
            id: row.id,
            template_type: row.template_type,
            template_data: row.template_data,
            generation_status: row.generation_status.parse().map_err(StoreError::Corrupt)?,
            pdf_data: row.pdf_data,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct SummaryRow {
    id: Uuid,
    template_type: String,
    generation_status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<SummaryRow> for CvSummary {
    type Error = StoreError;

    fn try_from(row: SummaryRow) -> Result<Self, Self::Error> {
        Ok(CvSummary {
            id: row.id,
            template_type: row.template_type,
            generation_status: row.generation_status.parse().map_err(StoreError::Corrupt)?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

pub struct PgGenerationStore {
    pool: PgPool,
}

impl PgGenerationStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn ensure_schema(&self) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS generated_cvs (
                id UUID PRIMARY KEY,
                template_type TEXT NOT NULL,
                template_data JSONB NOT NULL,
                generation_status TEXT NOT NULL,
                pdf_data BYTEA,
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
impl GenerationStore for PgGenerationStore {
    async fn create(&self, record: GenerationRecord) -> Result<GenerationRecord, StoreError> {
        sqlx::query(
            r#"
            INSERT INTO generated_cvs (id, template_type, template_data, generation_status, pdf_data, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(record.id)
        .bind(&record.template_type)
        .bind(&record.template_data)
        .bind(record.generation_status.as_str())
        .bind(record.pdf_data.as_deref())
        .bind(record.created_at)
        .bind(record.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(record)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<GenerationRecord>, StoreError> {
        let row = sqlx::query_as::<_, GenerationRow>(&format!("{} WHERE id = $1", SELECT_COLUMNS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.map(GenerationRecord::try_from).transpose()
    }

    async fn update(&self, id: Uuid, update: RecordUpdate) -> Result<GenerationRecord, StoreError> {
        let row = sqlx::query_as::<_, GenerationRow>(
            r#"
            UPDATE generated_cvs
               SET generation_status = $2,
                   pdf_data = $3,
                   template_data = COALESCE($4, template_data),
                   updated_at = $5
             WHERE id = $1
            RETURNING id, template_type, template_data, generation_status, pdf_data, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(update.status.as_str())
        .bind(update.pdf_data.as_deref())
        .bind(update.template_data.as_ref())
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?;

        row.ok_or(StoreError::NotFound(id))?.try_into()
    }

    async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM generated_cvs WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(id));
        }
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<GenerationRecord>, StoreError> {
        let rows = sqlx::query_as::<_, GenerationRow>(&format!(
            "{} ORDER BY created_at DESC",
            SELECT_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;
        rows.into_iter().map(GenerationRecord::try_from).collect()
    }

    async fn list_summaries(&self) -> Result<Vec<CvSummary>, StoreError> {
        let rows = sqlx::query_as::<_, SummaryRow>(SELECT_SUMMARIES)
            .fetch_all(&self.pool)
            .await?;
        rows.into_iter().map(CvSummary::try_from).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_query_skips_pdf_output() {
        assert!(!SELECT_SUMMARIES.contains("pdf_data"));
        assert!(SELECT_SUMMARIES.ends_with("ORDER BY created_at DESC"));
    }

    #[test]
    fn test_summary_row_rejects_unknown_status() {
        let row = SummaryRow {
            id: Uuid::new_v4(),
            template_type: "basic-hr".to_string(),
            generation_status: "QUEUED".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        assert!(matches!(CvSummary::try_from(row), Err(StoreError::Corrupt(_))));
    }
}
