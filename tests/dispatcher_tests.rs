use kariyer_pdf_server::generation::templates::{templates, RenderError};
use kariyer_pdf_server::generation::{
    DispatchError, DocumentComposer, FontCache, RenderOptions, TemplateDispatcher, TemplateId,
    TemplateRegistry, TemplateRenderer,
};
use serde_json::{json, Value};
use std::sync::Arc;

fn dispatcher() -> TemplateDispatcher {
    let composer = Arc::new(DocumentComposer::new(Arc::new(FontCache::new(vec![]))));
    TemplateDispatcher::new(TemplateRegistry::with_defaults(composer))
}

fn sample_cv() -> Value {
    json!({
        "personalInfo": {
            "fullName": "Ayşe Yılmaz",
            "title": "İnsan Kaynakları Uzmanı",
            "email": "ayse@example.com",
            "phone": "+90 555 000 00 00",
            "city": "İzmir"
        },
        "objective": "Çalışan deneyimini iyileştiren süreçler kurmak.",
        "experience": [{
            "jobTitle": "HR Specialist",
            "company": "Acme",
            "startDate": "2021-01",
            "isCurrent": true,
            "description": "Recruiting and onboarding for 120 people."
        }],
        "education": [{
            "degree": "BA Psychology",
            "school": "Ege Üniversitesi",
            "graduationDate": "2020"
        }],
        "skills": ["Recruiting", "Payroll", "Excel"],
        "languages": [{ "language": "English", "level": "C1" }],
        "certificates": [{ "name": "SHRM-CP", "issuer": "SHRM" }],
        "references": [{ "name": "Mehmet Demir", "company": "Acme" }]
    })
}

#[test]
fn test_every_template_renders_a_pdf() {
    let dispatcher = dispatcher();
    for id in TemplateId::ALL {
        let pdf = dispatcher
            .dispatch(id.as_str(), &sample_cv(), None, None)
            .unwrap_or_else(|e| panic!("{} failed: {}", id, e));
        assert!(pdf.starts_with(b"%PDF-"), "{} did not produce a PDF", id);
    }
}

#[test]
fn test_turkey_version_renders_in_both_languages() {
    let dispatcher = dispatcher();
    for language in ["turkish", "english"] {
        let pdf = dispatcher
            .dispatch("basic-hr", &sample_cv(), Some("turkey"), Some(language))
            .unwrap();
        assert!(pdf.starts_with(b"%PDF-"));
    }
}

#[test]
fn test_turkey_version_without_language_is_rejected() {
    let err = dispatcher()
        .dispatch("basic-hr", &sample_cv(), Some("turkey"), None)
        .unwrap_err();
    match err {
        DispatchError::Validation(errors) => assert!(errors.has_field("language")),
        other => panic!("expected validation error, got {:?}", other),
    }
}

#[test]
fn test_other_versions_ignore_language() {
    let pdf = dispatcher()
        .dispatch("simple-classic", &sample_cv(), Some("global"), Some("klingon"))
        .unwrap();
    assert!(pdf.starts_with(b"%PDF-"));
}

#[test]
fn test_unknown_template_is_unsupported() {
    let err = dispatcher()
        .dispatch("modern-blue", &sample_cv(), None, None)
        .unwrap_err();
    assert!(matches!(err, DispatchError::UnsupportedTemplate(ref t) if t == "modern-blue"));
    assert_eq!(err.to_string(), "Unsupported template type: modern-blue");
}

#[test]
fn test_malformed_data_is_wrapped_as_generation_failure() {
    let err = dispatcher()
        .dispatch("office-manager", &json!({ "personalInfo": { "fullName": "" } }), None, None)
        .unwrap_err();
    assert!(matches!(err, DispatchError::GenerationFailed(_)));
    assert!(err.to_string().starts_with("PDF generation failed: "));
}

struct Failing;

impl TemplateRenderer for Failing {
    fn render(&self, _data: &Value, _options: &RenderOptions) -> Result<Vec<u8>, RenderError> {
        Err(RenderError::InvalidData("boom".to_string()))
    }
}

#[test]
fn test_registered_renderer_errors_are_wrapped() {
    let mut registry = TemplateRegistry::new();
    registry.register(TemplateId::StylishAccounting, Arc::new(Failing));
    let dispatcher = TemplateDispatcher::new(registry);

    let err = dispatcher
        .dispatch("stylish-accounting", &json!({}), None, None)
        .unwrap_err();
    assert_eq!(err.to_string(), "PDF generation failed: invalid CV data: boom");
}

#[test]
fn test_unregistered_known_template_is_unsupported() {
    let dispatcher = TemplateDispatcher::new(TemplateRegistry::new());
    let err = dispatcher
        .dispatch("basic-hr", &sample_cv(), None, None)
        .unwrap_err();
    assert!(matches!(err, DispatchError::UnsupportedTemplate(_)));
}

#[test]
fn test_template_catalog_lists_all_five() {
    let catalog = templates();
    assert_eq!(catalog.len(), 5);
    assert!(catalog.iter().any(|t| t.id == TemplateId::MinimalistTurkish));
}
