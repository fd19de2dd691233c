use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::cv::model::GenerationStatus;
use crate::generation::validation::{
    validate_email, validate_min_length, validate_required, ValidationErrors,
};
use crate::generation::{Language, Validator};

const MIN_JOB_DESCRIPTION_LEN: usize = 10;

#[derive(Debug, Clone, PartialEq)]
pub struct CoverLetterRecord {
    pub id: Uuid,
    pub position_title: String,
    pub company_name: String,
    pub job_description: String,
    pub generated_content: String,
    pub updated_content: Option<String>,
    pub generation_status: GenerationStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CoverLetterRecord {
    /// The user's edit when there is one, the generated text otherwise.
    pub fn effective_content(&self) -> &str {
        match self.updated_content.as_deref() {
            Some(updated) if !updated.is_empty() => updated,
            _ => &self.generated_content,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub email: String,
}

impl UserProfile {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
    }

    /// `Name\nphone\nemail`, appended under the letter body.
    pub fn signature_block(&self) -> String {
        format!(
            "{}\n{}\n{}",
            self.full_name(),
            self.phone.trim(),
            self.email.trim()
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCoverLetterRequest {
    pub content: String,
    pub position_title: String,
    pub company_name: String,
    pub job_description: String,
    pub user_profile: UserProfile,
}

impl Validator for CreateCoverLetterRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        validate_required(&self.content, "content", "Content", &mut errors);
        validate_required(&self.position_title, "positionTitle", "Position title", &mut errors);
        validate_required(&self.company_name, "companyName", "Company name", &mut errors);
        validate_min_length(
            &self.job_description,
            MIN_JOB_DESCRIPTION_LEN,
            "jobDescription",
            "Job description",
            &mut errors,
        );

        let profile = &self.user_profile;
        validate_required(&profile.first_name, "userProfile.firstName", "First name", &mut errors);
        validate_required(&profile.last_name, "userProfile.lastName", "Last name", &mut errors);
        validate_required(&profile.phone, "userProfile.phone", "Phone", &mut errors);
        validate_email(&profile.email, "userProfile.email", &mut errors);

        errors.into_result()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCoverLetterRequest {
    pub updated_content: String,
}

impl Validator for UpdateCoverLetterRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        validate_required(&self.updated_content, "updatedContent", "Updated content", &mut errors);
        errors.into_result()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CustomPdfRequest {
    pub content: String,
    pub position_title: String,
    pub company_name: String,
    /// Detected from the content when absent.
    pub language: Option<Language>,
    pub full_name: Option<String>,
}

impl Validator for CustomPdfRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        validate_required(&self.content, "content", "Content", &mut errors);
        validate_required(&self.position_title, "positionTitle", "Position title", &mut errors);
        validate_required(&self.company_name, "companyName", "Company name", &mut errors);
        errors.into_result()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CoverLetterResponse {
    pub id: Uuid,
    pub generated_content: String,
    pub position_title: String,
    pub company_name: String,
    pub generation_status: GenerationStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&CoverLetterRecord> for CoverLetterResponse {
    fn from(record: &CoverLetterRecord) -> Self {
        Self {
            id: record.id,
            generated_content: record.effective_content().to_string(),
            position_title: record.position_title.clone(),
            company_name: record.company_name.clone(),
            generation_status: record.generation_status,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CoverLetterListResponse {
    pub cover_letters: Vec<CoverLetterResponse>,
}
