use base64::Engine;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum GenerationStatus {
    Processing,
    Completed,
    Failed,
}

impl GenerationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Processing => "PROCESSING",
            Self::Completed => "COMPLETED",
            Self::Failed => "FAILED",
        }
    }
}

impl fmt::Display for GenerationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GenerationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PROCESSING" => Ok(Self::Processing),
            "COMPLETED" => Ok(Self::Completed),
            "FAILED" => Ok(Self::Failed),
            other => Err(format!("unknown generation status: {}", other)),
        }
    }
}

/// One CV generation attempt.
///
/// `pdf_data` is present exactly when the status is `COMPLETED`.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRecord {
    pub id: Uuid,
    /// As supplied by the caller, possibly not a known template.
    pub template_type: String,
    pub template_data: Value,
    pub generation_status: GenerationStatus,
    pub pdf_data: Option<Vec<u8>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl GenerationRecord {
    pub fn processing(template_type: &str, template_data: Value) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            template_type: template_type.to_string(),
            template_data,
            generation_status: GenerationStatus::Processing,
            pdf_data: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn has_output(&self) -> bool {
        self.pdf_data.as_ref().is_some_and(|pdf| !pdf.is_empty())
    }

    /// Apply a status transition the way every store does.
    pub fn apply(&mut self, update: RecordUpdate) {
        if let Some(data) = update.template_data {
            self.template_data = data;
        }
        self.generation_status = update.status;
        self.pdf_data = update.pdf_data;
        self.updated_at = Utc::now();
    }
}

/// A status transition. Output is replaced together with the status so the two never
/// disagree.
#[derive(Debug, Clone)]
pub struct RecordUpdate {
    pub status: GenerationStatus,
    pub pdf_data: Option<Vec<u8>>,
    pub template_data: Option<Value>,
}

impl RecordUpdate {
    pub fn completed(pdf: Vec<u8>) -> Self {
        Self {
            status: GenerationStatus::Completed,
            pdf_data: Some(pdf),
            template_data: None,
        }
    }

    pub fn failed() -> Self {
        Self {
            status: GenerationStatus::Failed,
            pdf_data: None,
            template_data: None,
        }
    }

    pub fn with_template_data(mut self, data: Value) -> Self {
        self.template_data = Some(data);
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GenerateCvRequest {
    pub template_type: String,
    #[schema(value_type = Object)]
    pub data: Value,
    pub version: Option<String>,
    pub language: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegenerateCvRequest {
    #[schema(value_type = Object)]
    pub data: Value,
    pub version: Option<String>,
    pub language: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CvGenerationResponse {
    pub id: Uuid,
    pub template_type: String,
    pub generation_status: GenerationStatus,
    pub pdf_base64: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&GenerationRecord> for CvGenerationResponse {
    fn from(record: &GenerationRecord) -> Self {
        Self {
            id: record.id,
            template_type: record.template_type.clone(),
            generation_status: record.generation_status,
            pdf_base64: record
                .pdf_data
                .as_ref()
                .map(|pdf| base64::engine::general_purpose::STANDARD.encode(pdf)),
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CvSummary {
    pub id: Uuid,
    pub template_type: String,
    pub generation_status: GenerationStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&GenerationRecord> for CvSummary {
    fn from(record: &GenerationRecord) -> Self {
        Self {
            id: record.id,
            template_type: record.template_type.clone(),
            generation_status: record.generation_status,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CvDetail {
    pub id: Uuid,
    pub template_type: String,
    #[schema(value_type = Object)]
    pub template_data: Value,
    pub generation_status: GenerationStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<GenerationRecord> for CvDetail {
    fn from(record: GenerationRecord) -> Self {
        Self {
            id: record.id,
            template_type: record.template_type,
            template_data: record.template_data,
            generation_status: record.generation_status,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_failed_update_clears_output() {
        let mut record = GenerationRecord::processing("basic-hr", json!({}));
        record.apply(RecordUpdate::completed(b"%PDF-1.5".to_vec()));
        assert!(record.has_output());

        record.apply(RecordUpdate::failed());
        assert_eq!(record.generation_status, GenerationStatus::Failed);
        assert!(record.pdf_data.is_none());
    }

    #[test]
    fn test_response_encodes_pdf_as_base64() {
        let mut record = GenerationRecord::processing("basic-hr", json!({}));
        record.apply(RecordUpdate::completed(b"abc".to_vec()));
        let response = CvGenerationResponse::from(&record);
        assert_eq!(response.pdf_base64.as_deref(), Some("YWJj"));
    }
}
