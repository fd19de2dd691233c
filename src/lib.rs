use actix_cors::Cors;
use actix_web::middleware::{Compress, Logger};
use actix_web::{http::header, web, App, HttpServer};
use actix_web_prometheus::PrometheusMetricsBuilder;
use serde::{Deserialize, Serialize};
use utoipa::{OpenApi, ToSchema};
use utoipa_swagger_ui::SwaggerUi;

pub mod config;
pub mod cover_letter;
pub mod cv;
pub mod db;
pub mod generation;

pub use crate::config::AppConfig;
pub use crate::db::AppState;

use crate::generation::validation::{ValidationError, ValidationErrors};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub timestamp: String,
    /// Per-field problems for validation failures.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<ValidationError>>,
}

impl ErrorResponse {
    pub fn new(error_type: &str, message: &str) -> Self {
        Self {
            error: error_type.to_string(),
            message: message.to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            errors: None,
        }
    }

    pub fn not_found(message: &str) -> Self {
        Self::new("NotFound", message)
    }

    pub fn bad_request(message: &str) -> Self {
        Self::new("BadRequest", message)
    }

    pub fn conflict(message: &str) -> Self {
        Self::new("Conflict", message)
    }

    pub fn internal_error(message: &str) -> Self {
        Self::new("InternalServerError", message)
    }

    pub fn validation(errors: &ValidationErrors) -> Self {
        Self {
            errors: Some(errors.errors().to_vec()),
            ..Self::new("ValidationError", &errors.to_message())
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::cv::routes::get_templates,
        crate::cv::routes::generate_cv,
        crate::cv::routes::list_cvs,
        crate::cv::routes::get_cv,
        crate::cv::routes::download_cv,
        crate::cv::routes::regenerate_cv,
        crate::cv::routes::delete_cv,
        crate::cover_letter::routes::create_cover_letter,
        crate::cover_letter::routes::list_cover_letters,
        crate::cover_letter::routes::get_cover_letter,
        crate::cover_letter::routes::update_cover_letter,
        crate::cover_letter::routes::delete_cover_letter,
        crate::cover_letter::routes::download_cover_letter_pdf,
        crate::cover_letter::routes::custom_cover_letter_pdf
    ),
    components(
        schemas(
            ErrorResponse,
            ValidationError,
            generation::Language,
            generation::templates::TemplateId,
            generation::templates::TemplateInfo,
            generation::templates::data::CvTemplateData,
            generation::templates::data::PersonalInfo,
            generation::templates::data::Experience,
            generation::templates::data::Education,
            generation::templates::data::LanguageSkill,
            generation::templates::data::Certificate,
            generation::templates::data::Reference,
            cv::model::GenerationStatus,
            cv::model::GenerateCvRequest,
            cv::model::RegenerateCvRequest,
            cv::model::CvGenerationResponse,
            cv::model::CvSummary,
            cv::model::CvDetail,
            cover_letter::model::UserProfile,
            cover_letter::model::CreateCoverLetterRequest,
            cover_letter::model::UpdateCoverLetterRequest,
            cover_letter::model::CustomPdfRequest,
            cover_letter::model::CoverLetterResponse,
            cover_letter::model::CoverLetterListResponse,
        )
    ),
    tags(
        (name = "CV Generator", description = "CV generation and regeneration endpoints."),
        (name = "Cover Letter", description = "Cover letter CRUD and PDF endpoints.")
    ),
    servers(
        (url = "http://127.0.0.1:8080", description = "Localhost server")
    )
)]
pub struct ApiDoc;

/// Every `/api` route.
pub fn api_config(cfg: &mut web::ServiceConfig) {
    cfg.configure(cv::routes::config)
        .configure(cover_letter::routes::config);
}

fn cors(config: &AppConfig) -> Cors {
    let cors = Cors::default()
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
        .allowed_headers(vec![header::ACCEPT, header::CONTENT_TYPE])
        .expose_headers(vec![header::CONTENT_DISPOSITION])
        .max_age(3600);

    if config.allowed_origins.is_empty() {
        return cors.allow_any_origin();
    }
    config
        .allowed_origins
        .iter()
        .fold(cors, |cors, origin| cors.allowed_origin(origin))
}

pub async fn run() -> std::io::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = AppConfig::from_env()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;

    let app_state = match AppState::new_with_config(&config).await {
        Ok(state) => web::Data::new(state),
        Err(e) => {
            log::error!("Failed to connect to database. Please check DATABASE_URL in .env and ensure the database is running. Error: {}", e);
            std::process::exit(1);
        }
    };

    let prometheus = PrometheusMetricsBuilder::new("kariyer_pdf_server")
        .endpoint("/metrics")
        .build()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?;

    let (host, port) = config.bind_address();
    log::info!("Starting server at http://{}:{}", host, port);

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(Compress::default())
            .wrap(prometheus.clone())
            .wrap(cors(&config))
            .app_data(app_state.clone())
            .service(web::scope("/api").configure(api_config))
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-doc/openapi.json", ApiDoc::openapi()),
            )
    })
    .keep_alive(actix_web::http::KeepAlive::Os)
    .bind((host, port))?
    .run()
    .await
}
