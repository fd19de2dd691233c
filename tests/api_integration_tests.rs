use actix_web::http::{header, StatusCode};
use actix_web::{test, web, App};
use kariyer_pdf_server::cover_letter::model::{CoverLetterListResponse, CoverLetterResponse};
use kariyer_pdf_server::cv::model::{CvDetail, CvGenerationResponse, CvSummary, GenerationStatus};
use kariyer_pdf_server::generation::FontCache;
use kariyer_pdf_server::{api_config, AppState, ErrorResponse};
use serde_json::{json, Value};
use std::sync::Arc;

#[cfg(test)]
mod api_integration_tests {
    use super::*;

    fn create_test_app_state() -> web::Data<AppState> {
        web::Data::new(AppState::in_memory(Arc::new(FontCache::new(vec![]))))
    }

    fn cv_payload(template: &str) -> Value {
        json!({
            "templateType": template,
            "data": {
                "personalInfo": { "fullName": "Jane Doe", "email": "jane@example.com" },
                "skills": ["Leadership"]
            }
        })
    }

    fn cover_letter_payload() -> Value {
        json!({
            "content": "Hello,\n\nI would like to apply for this role and the team.",
            "positionTitle": "backend engineer",
            "companyName": "Acme",
            "jobDescription": "Build and run Rust services for our platform.",
            "userProfile": {
                "firstName": "Jane",
                "lastName": "Doe",
                "phone": "+1 555 0100",
                "email": "jane@example.com"
            }
        })
    }

    #[actix_web::test]
    async fn test_get_templates() {
        let app = test::init_service(
            App::new()
                .app_data(create_test_app_state())
                .service(web::scope("/api").configure(api_config)),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/api/cv-generator/templates")
            .to_request();
        let body: Vec<Value> = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body.len(), 5);
        assert_eq!(body[0]["id"], "basic-hr");
    }

    #[actix_web::test]
    async fn test_generate_download_and_delete_cv() {
        let app = test::init_service(
            App::new()
                .app_data(create_test_app_state())
                .service(web::scope("/api").configure(api_config)),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/cv-generator/generate")
            .set_json(cv_payload("simple-classic"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let created: CvGenerationResponse = test::read_body_json(resp).await;
        assert_eq!(created.generation_status, GenerationStatus::Completed);
        assert!(created.pdf_base64.is_some());

        let req = test::TestRequest::get()
            .uri(&format!("/api/cv-generator/{}", created.id))
            .to_request();
        let detail: CvDetail = test::call_and_read_body_json(&app, req).await;
        assert_eq!(detail.template_data["personalInfo"]["fullName"], "Jane Doe");

        let req = test::TestRequest::get()
            .uri(&format!("/api/cv-generator/{}/download", created.id))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let disposition = resp
            .headers()
            .get(header::CONTENT_DISPOSITION)
            .unwrap()
            .to_str()
            .unwrap()
            .to_string();
        assert!(disposition.contains(&format!("cv-{}.pdf", created.id)));
        let body = test::read_body(resp).await;
        assert!(body.starts_with(b"%PDF-"));

        let req = test::TestRequest::delete()
            .uri(&format!("/api/cv-generator/{}", created.id))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);

        let req = test::TestRequest::get()
            .uri(&format!("/api/cv-generator/{}", created.id))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_unknown_template_is_bad_request() {
        let app = test::init_service(
            App::new()
                .app_data(create_test_app_state())
                .service(web::scope("/api").configure(api_config)),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/cv-generator/generate")
            .set_json(cv_payload("modern-blue"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let error: ErrorResponse = test::read_body_json(resp).await;
        assert_eq!(error.message, "Unsupported template type: modern-blue");

        let req = test::TestRequest::get().uri("/api/cv-generator").to_request();
        let list: Vec<CvSummary> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].generation_status, GenerationStatus::Failed);
    }

    #[actix_web::test]
    async fn test_turkey_version_requires_language() {
        let app = test::init_service(
            App::new()
                .app_data(create_test_app_state())
                .service(web::scope("/api").configure(api_config)),
        )
        .await;

        let mut payload = cv_payload("basic-hr");
        payload["version"] = json!("turkey");
        let req = test::TestRequest::post()
            .uri("/api/cv-generator/generate")
            .set_json(payload)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let error: ErrorResponse = test::read_body_json(resp).await;
        assert_eq!(error.error, "ValidationError");
        let fields: Vec<String> = error
            .errors
            .unwrap_or_default()
            .into_iter()
            .map(|e| e.field)
            .collect();
        assert_eq!(fields, vec!["language"]);

        let req = test::TestRequest::get().uri("/api/cv-generator").to_request();
        let list: Vec<CvSummary> = test::call_and_read_body_json(&app, req).await;
        assert!(list.is_empty());
    }

    #[actix_web::test]
    async fn test_regenerate_keeps_id() {
        let app = test::init_service(
            App::new()
                .app_data(create_test_app_state())
                .service(web::scope("/api").configure(api_config)),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/cv-generator/generate")
            .set_json(cv_payload("office-manager"))
            .to_request();
        let created: CvGenerationResponse = test::call_and_read_body_json(&app, req).await;

        let req = test::TestRequest::post()
            .uri(&format!("/api/cv-generator/{}/regenerate", created.id))
            .set_json(json!({
                "data": { "personalInfo": { "fullName": "Jane Smith" } },
                "version": "turkey",
                "language": "turkish"
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let regenerated: CvGenerationResponse = test::read_body_json(resp).await;
        assert_eq!(regenerated.id, created.id);
        assert_eq!(regenerated.generation_status, GenerationStatus::Completed);
    }

    #[actix_web::test]
    async fn test_cover_letter_lifecycle() {
        let app = test::init_service(
            App::new()
                .app_data(create_test_app_state())
                .service(web::scope("/api").configure(api_config)),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/cover-letter")
            .set_json(cover_letter_payload())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let created: CoverLetterResponse = test::read_body_json(resp).await;
        assert!(created.generated_content.ends_with("jane@example.com"));

        let req = test::TestRequest::put()
            .uri(&format!("/api/cover-letter/{}", created.id))
            .set_json(json!({ "updatedContent": "Hello,\n\nEdited body.\n\nBest regards,\nJane" }))
            .to_request();
        let updated: CoverLetterResponse = test::call_and_read_body_json(&app, req).await;
        assert!(updated.generated_content.contains("Edited body."));

        let req = test::TestRequest::get().uri("/api/cover-letter").to_request();
        let list: CoverLetterListResponse = test::call_and_read_body_json(&app, req).await;
        assert_eq!(list.cover_letters.len(), 1);

        let req = test::TestRequest::get()
            .uri(&format!("/api/cover-letter/{}/pdf", created.id))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let disposition = resp
            .headers()
            .get(header::CONTENT_DISPOSITION)
            .unwrap()
            .to_str()
            .unwrap()
            .to_string();
        assert!(disposition.contains("Acme_Backend_Engineer_Cover_Letter.pdf"));

        let req = test::TestRequest::delete()
            .uri(&format!("/api/cover-letter/{}", created.id))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    }

    #[actix_web::test]
    async fn test_cover_letter_validation_lists_fields() {
        let app = test::init_service(
            App::new()
                .app_data(create_test_app_state())
                .service(web::scope("/api").configure(api_config)),
        )
        .await;

        let mut payload = cover_letter_payload();
        payload["companyName"] = json!("");
        payload["userProfile"]["email"] = json!("jane");
        let req = test::TestRequest::post()
            .uri("/api/cover-letter")
            .set_json(payload)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let error: ErrorResponse = test::read_body_json(resp).await;
        assert_eq!(error.message, "Validation failed: 2 errors found");
        assert_eq!(error.errors.map(|e| e.len()), Some(2));
    }

    #[actix_web::test]
    async fn test_custom_pdf_route_is_not_an_id() {
        let app = test::init_service(
            App::new()
                .app_data(create_test_app_state())
                .service(web::scope("/api").configure(api_config)),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/cover-letter/custom-pdf")
            .set_json(json!({
                "content": "Merhaba,\n\nBu pozisyon için başvuruyorum.\n\nSaygılarımla",
                "positionTitle": "Mühendis",
                "companyName": "Acme",
                "language": "TURKISH",
                "fullName": "Ayşe Yılmaz"
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/pdf"
        );
        let body = test::read_body(resp).await;
        assert!(body.starts_with(b"%PDF-"));
    }

    #[actix_web::test]
    async fn test_missing_cover_letter_pdf_is_not_found() {
        let app = test::init_service(
            App::new()
                .app_data(create_test_app_state())
                .service(web::scope("/api").configure(api_config)),
        )
        .await;

        let req = test::TestRequest::get()
            .uri(&format!("/api/cover-letter/{}/pdf", uuid::Uuid::new_v4()))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
