//! CV payload accepted by every template.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use super::RenderError;

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CvTemplateData {
    pub personal_info: PersonalInfo,
    #[serde(default)]
    pub objective: Option<String>,
    #[serde(default)]
    pub experience: Vec<Experience>,
    #[serde(default)]
    pub education: Vec<Education>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub languages: Vec<LanguageSkill>,
    #[serde(default)]
    pub certificates: Vec<Certificate>,
    #[serde(default)]
    pub references: Vec<Reference>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PersonalInfo {
    pub full_name: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub linkedin: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Experience {
    pub job_title: String,
    pub company: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub is_current: bool,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Education {
    pub degree: String,
    pub school: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub graduation_date: Option<String>,
    #[serde(default)]
    pub details: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LanguageSkill {
    pub language: String,
    #[serde(default)]
    pub level: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Certificate {
    pub name: String,
    #[serde(default)]
    pub issuer: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Reference {
    pub name: String,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub contact: Option<String>,
}

impl CvTemplateData {
    /// Deserialize a raw payload and check the one field every layout needs.
    pub fn from_value(value: &Value) -> Result<Self, RenderError> {
        let data = Self::deserialize(value).map_err(|e| RenderError::InvalidData(e.to_string()))?;
        if data.personal_info.full_name.trim().is_empty() {
            return Err(RenderError::InvalidData(
                "personalInfo.fullName must not be empty".to_string(),
            ));
        }
        Ok(data)
    }
}

/// Trimmed value, `None` when blank.
pub(crate) fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_minimal_payload_defaults_sections() {
        let data = CvTemplateData::from_value(&json!({
            "personalInfo": { "fullName": "Ayşe Yılmaz" }
        }))
        .unwrap();
        assert!(data.experience.is_empty());
        assert!(data.objective.is_none());
    }

    #[test]
    fn test_blank_full_name_is_rejected() {
        let err = CvTemplateData::from_value(&json!({
            "personalInfo": { "fullName": "  " }
        }))
        .unwrap_err();
        assert!(err.to_string().contains("fullName"));
    }

    #[test]
    fn test_wrong_shape_is_rejected() {
        assert!(CvTemplateData::from_value(&json!({ "experience": "none" })).is_err());
    }
}
