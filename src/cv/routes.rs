use actix_web::http::header;
use actix_web::{web, HttpResponse, Responder};
use uuid::Uuid;

use crate::cv::model::{
    CvDetail, CvGenerationResponse, CvSummary, GenerateCvRequest, RegenerateCvRequest,
};
use crate::cv::tracker::TrackerError;
use crate::generation::templates::{templates, TemplateInfo};
use crate::generation::title::cv_filename;
use crate::generation::PDF_CONTENT_TYPE;
use crate::{AppState, ErrorResponse};

fn error_response(err: TrackerError) -> HttpResponse {
    match err {
        TrackerError::Validation(errors) => {
            HttpResponse::BadRequest().json(ErrorResponse::validation(&errors))
        }
        TrackerError::NotFound(_) => {
            HttpResponse::NotFound().json(ErrorResponse::not_found(&err.to_string()))
        }
        TrackerError::UnsupportedTemplate(_) => HttpResponse::BadRequest()
            .json(ErrorResponse::new("UnsupportedTemplate", &err.to_string())),
        TrackerError::InvalidState { .. } | TrackerError::NotReady(_) => {
            HttpResponse::Conflict().json(ErrorResponse::conflict(&err.to_string()))
        }
        TrackerError::Generation(_) | TrackerError::Store(_) => {
            log::error!("CV request failed: {}", err);
            HttpResponse::InternalServerError().json(ErrorResponse::internal_error(&err.to_string()))
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/cv-generator/templates",
    tag = "CV Generator",
    responses(
        (status = 200, description = "Available CV templates", body = Vec<TemplateInfo>)
    )
)]
pub async fn get_templates() -> impl Responder {
    HttpResponse::Ok().json(templates())
}

#[utoipa::path(
    post,
    path = "/api/cv-generator/generate",
    tag = "CV Generator",
    request_body = GenerateCvRequest,
    responses(
        (status = 201, description = "CV generated", body = CvGenerationResponse),
        (status = 400, description = "Invalid request or unsupported template", body = ErrorResponse),
        (status = 500, description = "PDF generation failed", body = ErrorResponse)
    )
)]
pub async fn generate_cv(
    state: web::Data<AppState>,
    item: web::Json<GenerateCvRequest>,
) -> impl Responder {
    let request = item.into_inner();
    if request.template_type.trim().is_empty() {
        return HttpResponse::BadRequest()
            .json(ErrorResponse::bad_request("Template type and data are required"));
    }

    match state
        .tracker
        .generate(
            &request.template_type,
            request.data,
            request.version.as_deref(),
            request.language.as_deref(),
        )
        .await
    {
        Ok(record) => HttpResponse::Created().json(CvGenerationResponse::from(&record)),
        Err(e) => error_response(e),
    }
}

#[utoipa::path(
    get,
    path = "/api/cv-generator",
    tag = "CV Generator",
    responses(
        (status = 200, description = "Generated CVs, newest first", body = Vec<CvSummary>)
    )
)]
pub async fn list_cvs(state: web::Data<AppState>) -> impl Responder {
    match state.tracker.list().await {
        Ok(summaries) => HttpResponse::Ok().json(summaries),
        Err(e) => error_response(e),
    }
}

#[utoipa::path(
    get,
    path = "/api/cv-generator/{id}",
    tag = "CV Generator",
    params(
        ("id" = Uuid, Path, description = "CV ID")
    ),
    responses(
        (status = 200, description = "CV record", body = CvDetail),
        (status = 404, description = "CV not found", body = ErrorResponse)
    )
)]
pub async fn get_cv(state: web::Data<AppState>, path: web::Path<Uuid>) -> impl Responder {
    match state.tracker.get(path.into_inner()).await {
        Ok(record) => HttpResponse::Ok().json(CvDetail::from(record)),
        Err(e) => error_response(e),
    }
}

#[utoipa::path(
    get,
    path = "/api/cv-generator/{id}/download",
    tag = "CV Generator",
    params(
        ("id" = Uuid, Path, description = "CV ID")
    ),
    responses(
        (status = 200, description = "PDF file", body = Vec<u8>, content_type = "application/pdf"),
        (status = 404, description = "CV not found", body = ErrorResponse),
        (status = 409, description = "CV has no PDF yet", body = ErrorResponse)
    )
)]
pub async fn download_cv(state: web::Data<AppState>, path: web::Path<Uuid>) -> impl Responder {
    let id = path.into_inner();
    match state.tracker.download(id).await {
        Ok(pdf) => HttpResponse::Ok()
            .content_type(PDF_CONTENT_TYPE)
            .insert_header((
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", cv_filename(&id)),
            ))
            .body(pdf),
        Err(e) => error_response(e),
    }
}

#[utoipa::path(
    post,
    path = "/api/cv-generator/{id}/regenerate",
    tag = "CV Generator",
    params(
        ("id" = Uuid, Path, description = "CV ID")
    ),
    request_body = RegenerateCvRequest,
    responses(
        (status = 200, description = "CV regenerated", body = CvGenerationResponse),
        (status = 404, description = "CV not found", body = ErrorResponse),
        (status = 409, description = "CV is still processing", body = ErrorResponse)
    )
)]
pub async fn regenerate_cv(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    item: web::Json<RegenerateCvRequest>,
) -> impl Responder {
    let request = item.into_inner();
    match state
        .tracker
        .regenerate(
            path.into_inner(),
            request.data,
            request.version.as_deref(),
            request.language.as_deref(),
        )
        .await
    {
        Ok(record) => HttpResponse::Ok().json(CvGenerationResponse::from(&record)),
        Err(e) => error_response(e),
    }
}

#[utoipa::path(
    delete,
    path = "/api/cv-generator/{id}",
    tag = "CV Generator",
    params(
        ("id" = Uuid, Path, description = "CV ID")
    ),
    responses(
        (status = 204, description = "CV deleted"),
        (status = 404, description = "CV not found", body = ErrorResponse)
    )
)]
pub async fn delete_cv(state: web::Data<AppState>, path: web::Path<Uuid>) -> impl Responder {
    match state.tracker.delete(path.into_inner()).await {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(e) => error_response(e),
    }
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/cv-generator/templates").route(web::get().to(get_templates)))
        .service(web::resource("/cv-generator/generate").route(web::post().to(generate_cv)))
        .service(web::resource("/cv-generator").route(web::get().to(list_cvs)))
        .service(
            web::resource("/cv-generator/{id}")
                .route(web::get().to(get_cv))
                .route(web::delete().to(delete_cv)),
        )
        .service(web::resource("/cv-generator/{id}/download").route(web::get().to(download_cv)))
        .service(
            web::resource("/cv-generator/{id}/regenerate").route(web::post().to(regenerate_cv)),
        );
}
