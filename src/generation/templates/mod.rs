//! CV templates and the dispatcher that picks one.
//!
//! Each template is a [`TemplateRenderer`] registered in a [`TemplateRegistry`] under its
//! [`TemplateId`]. The dispatcher validates the version/language pair, parses the template
//! string and hands the raw payload to the renderer.

pub mod basic_hr;
pub mod common;
pub mod data;
pub mod minimalist_turkish;
pub mod office_manager;
pub mod simple_classic;
pub mod stylish_accounting;

pub use data::CvTemplateData;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use thiserror::Error;
use utoipa::ToSchema;

use super::composer::DocumentComposer;
use super::language::Language;
use super::validation::{ValidationError, ValidationErrors};
use super::GeneratorError;

const TURKEY_VERSION: &str = "turkey";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum TemplateId {
    BasicHr,
    OfficeManager,
    SimpleClassic,
    StylishAccounting,
    MinimalistTurkish,
}

impl TemplateId {
    pub const ALL: [TemplateId; 5] = [
        TemplateId::BasicHr,
        TemplateId::OfficeManager,
        TemplateId::SimpleClassic,
        TemplateId::StylishAccounting,
        TemplateId::MinimalistTurkish,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BasicHr => "basic-hr",
            Self::OfficeManager => "office-manager",
            Self::SimpleClassic => "simple-classic",
            Self::StylishAccounting => "stylish-accounting",
            Self::MinimalistTurkish => "minimalist-turkish",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::BasicHr => "Basic HR Template",
            Self::OfficeManager => "Office Manager Template",
            Self::SimpleClassic => "Simple Classic Template",
            Self::StylishAccounting => "Stylish Accounting Template",
            Self::MinimalistTurkish => "Minimalist Turkish Template",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::BasicHr => "Professional template for HR and business roles",
            Self::OfficeManager => "Template optimized for office management roles",
            Self::SimpleClassic => "Clean and simple template for any role",
            Self::StylishAccounting => "Professional template for accounting and finance roles",
            Self::MinimalistTurkish => "Minimalist template with Turkish language support",
        }
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TemplateId {
    type Err = DispatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .find(|id| id.as_str() == s)
            .copied()
            .ok_or_else(|| DispatchError::UnsupportedTemplate(s.to_string()))
    }
}

/// Entry of the public template list.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TemplateInfo {
    pub id: TemplateId,
    pub name: String,
    pub description: String,
}

pub fn templates() -> Vec<TemplateInfo> {
    TemplateId::ALL
        .iter()
        .map(|id| TemplateInfo {
            id: *id,
            name: id.display_name().to_string(),
            description: id.description().to_string(),
        })
        .collect()
}

/// Version/language pair after validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderOptions {
    pub version: Option<String>,
    /// Only set for the turkey version.
    pub language: Option<Language>,
}

impl RenderOptions {
    /// Check the pair: the turkey version needs `turkish` or `english`, every other
    /// version ignores the language. Versions are matched exactly, without trimming.
    pub fn validate(version: Option<&str>, language: Option<&str>) -> Result<Self, ValidationErrors> {
        let version = version.filter(|v| !v.is_empty());
        if version != Some(TURKEY_VERSION) {
            return Ok(Self {
                version: version.map(str::to_string),
                language: None,
            });
        }

        match language.and_then(Language::from_cv_param) {
            Some(language) => Ok(Self {
                version: version.map(str::to_string),
                language: Some(language),
            }),
            None => Err(ValidationErrors::single(
                ValidationError::new(
                    "language",
                    "Language is required for turkey version (turkish or english)",
                )
                .with_suggestion("Send language: \"turkish\" or \"english\""),
            )),
        }
    }

    pub fn is_turkey(&self) -> bool {
        self.version.as_deref() == Some(TURKEY_VERSION)
    }

    /// Language for section labels, given the template's own default.
    pub fn label_language(&self, template_default: Language) -> Language {
        match (self.is_turkey(), self.language) {
            (true, Some(language)) => language,
            _ => template_default,
        }
    }
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("invalid CV data: {0}")]
    InvalidData(String),
    #[error(transparent)]
    Generator(#[from] GeneratorError),
}

/// A CV layout: payload in, PDF bytes out.
pub trait TemplateRenderer: Send + Sync {
    fn render(&self, data: &Value, options: &RenderOptions) -> Result<Vec<u8>, RenderError>;
}

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("{}", .0.to_message())]
    Validation(ValidationErrors),
    #[error("Unsupported template type: {0}")]
    UnsupportedTemplate(String),
    #[error("PDF generation failed: {0}")]
    GenerationFailed(String),
}

/// Capability table from template id to renderer.
#[derive(Default, Clone)]
pub struct TemplateRegistry {
    renderers: HashMap<TemplateId, Arc<dyn TemplateRenderer>>,
}

impl TemplateRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the five bundled templates sharing one composer.
    pub fn with_defaults(composer: Arc<DocumentComposer>) -> Self {
        let mut registry = Self::new();
        registry.register(
            TemplateId::BasicHr,
            Arc::new(basic_hr::BasicHrTemplate::new(composer.clone())),
        );
        registry.register(
            TemplateId::OfficeManager,
            Arc::new(office_manager::OfficeManagerTemplate::new(composer.clone())),
        );
        registry.register(
            TemplateId::SimpleClassic,
            Arc::new(simple_classic::SimpleClassicTemplate::new(composer.clone())),
        );
        registry.register(
            TemplateId::StylishAccounting,
            Arc::new(stylish_accounting::StylishAccountingTemplate::new(
                composer.clone(),
            )),
        );
        registry.register(
            TemplateId::MinimalistTurkish,
            Arc::new(minimalist_turkish::MinimalistTurkishTemplate::new(composer)),
        );
        registry
    }

    pub fn register(&mut self, id: TemplateId, renderer: Arc<dyn TemplateRenderer>) {
        self.renderers.insert(id, renderer);
    }

    pub fn get(&self, id: TemplateId) -> Option<Arc<dyn TemplateRenderer>> {
        self.renderers.get(&id).cloned()
    }
}

/// Picks a renderer for a template string and runs it.
#[derive(Clone)]
pub struct TemplateDispatcher {
    registry: Arc<TemplateRegistry>,
}

impl TemplateDispatcher {
    pub fn new(registry: TemplateRegistry) -> Self {
        Self {
            registry: Arc::new(registry),
        }
    }

    /// Render `data` with the named template. CPU bound; call it off the async runtime.
    pub fn dispatch(
        &self,
        template: &str,
        data: &Value,
        version: Option<&str>,
        language: Option<&str>,
    ) -> Result<Vec<u8>, DispatchError> {
        let options = RenderOptions::validate(version, language).map_err(DispatchError::Validation)?;
        let id: TemplateId = template.parse()?;
        let renderer = self
            .registry
            .get(id)
            .ok_or_else(|| DispatchError::UnsupportedTemplate(template.to_string()))?;

        renderer.render(data, &options).map_err(|e| {
            log::error!("PDF generation error for template {}: {}", id, e);
            DispatchError::GenerationFailed(e.to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_id_parses_kebab_case() {
        assert_eq!("office-manager".parse::<TemplateId>().unwrap(), TemplateId::OfficeManager);
        assert!(matches!(
            "modern".parse::<TemplateId>(),
            Err(DispatchError::UnsupportedTemplate(_))
        ));
    }

    #[test]
    fn test_turkey_requires_language() {
        assert!(RenderOptions::validate(Some("turkey"), None).is_err());
        assert!(RenderOptions::validate(Some("turkey"), Some("german")).is_err());
        let options = RenderOptions::validate(Some("turkey"), Some("english")).unwrap();
        assert_eq!(options.language, Some(Language::English));
    }

    #[test]
    fn test_padded_turkey_is_another_version() {
        let options = RenderOptions::validate(Some(" turkey "), None).unwrap();
        assert!(!options.is_turkey());
        assert_eq!(options.version.as_deref(), Some(" turkey "));
    }

    #[test]
    fn test_other_versions_ignore_language() {
        let options = RenderOptions::validate(Some("global"), Some("klingon")).unwrap();
        assert_eq!(options.language, None);
        assert_eq!(options.label_language(Language::English), Language::English);
    }

    #[test]
    fn test_templates_lists_all_five() {
        let list = templates();
        assert_eq!(list.len(), 5);
        assert_eq!(list[4].name, "Minimalist Turkish Template");
    }
}
