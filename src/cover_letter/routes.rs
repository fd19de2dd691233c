use actix_web::http::header;
use actix_web::{web, HttpResponse, Responder};
use uuid::Uuid;

use crate::cover_letter::model::{
    CoverLetterListResponse, CoverLetterResponse, CreateCoverLetterRequest, CustomPdfRequest,
    UpdateCoverLetterRequest,
};
use crate::cover_letter::service::CoverLetterError;
use crate::generation::{GeneratedDocument, PDF_CONTENT_TYPE};
use crate::{AppState, ErrorResponse};

fn error_response(err: CoverLetterError) -> HttpResponse {
    match err {
        CoverLetterError::Validation(errors) => {
            HttpResponse::BadRequest().json(ErrorResponse::validation(&errors))
        }
        CoverLetterError::NotFound(_) => {
            HttpResponse::NotFound().json(ErrorResponse::not_found(&err.to_string()))
        }
        CoverLetterError::NotReady(_) => {
            HttpResponse::Conflict().json(ErrorResponse::conflict(&err.to_string()))
        }
        CoverLetterError::Generation(_) | CoverLetterError::Store(_) => {
            log::error!("Cover letter request failed: {}", err);
            HttpResponse::InternalServerError().json(ErrorResponse::internal_error(&err.to_string()))
        }
    }
}

fn pdf_response(document: GeneratedDocument) -> HttpResponse {
    HttpResponse::Ok()
        .content_type(PDF_CONTENT_TYPE)
        .insert_header((
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", document.filename),
        ))
        .body(document.pdf)
}

#[utoipa::path(
    post,
    path = "/api/cover-letter",
    tag = "Cover Letter",
    request_body = CreateCoverLetterRequest,
    responses(
        (status = 201, description = "Cover letter created", body = CoverLetterResponse),
        (status = 400, description = "Validation failed", body = ErrorResponse)
    )
)]
pub async fn create_cover_letter(
    state: web::Data<AppState>,
    item: web::Json<CreateCoverLetterRequest>,
) -> impl Responder {
    match state.cover_letters.create(item.into_inner()).await {
        Ok(record) => HttpResponse::Created().json(CoverLetterResponse::from(&record)),
        Err(e) => error_response(e),
    }
}

#[utoipa::path(
    get,
    path = "/api/cover-letter",
    tag = "Cover Letter",
    responses(
        (status = 200, description = "Cover letters, newest first", body = CoverLetterListResponse)
    )
)]
pub async fn list_cover_letters(state: web::Data<AppState>) -> impl Responder {
    match state.cover_letters.list().await {
        Ok(records) => HttpResponse::Ok().json(CoverLetterListResponse {
            cover_letters: records.iter().map(CoverLetterResponse::from).collect(),
        }),
        Err(e) => error_response(e),
    }
}

#[utoipa::path(
    get,
    path = "/api/cover-letter/{id}",
    tag = "Cover Letter",
    params(
        ("id" = Uuid, Path, description = "Cover letter ID")
    ),
    responses(
        (status = 200, description = "Cover letter", body = CoverLetterResponse),
        (status = 404, description = "Cover letter not found", body = ErrorResponse)
    )
)]
pub async fn get_cover_letter(state: web::Data<AppState>, path: web::Path<Uuid>) -> impl Responder {
    match state.cover_letters.get(path.into_inner()).await {
        Ok(record) => HttpResponse::Ok().json(CoverLetterResponse::from(&record)),
        Err(e) => error_response(e),
    }
}

#[utoipa::path(
    put,
    path = "/api/cover-letter/{id}",
    tag = "Cover Letter",
    params(
        ("id" = Uuid, Path, description = "Cover letter ID")
    ),
    request_body = UpdateCoverLetterRequest,
    responses(
        (status = 200, description = "Cover letter updated", body = CoverLetterResponse),
        (status = 400, description = "Validation failed", body = ErrorResponse),
        (status = 404, description = "Cover letter not found", body = ErrorResponse)
    )
)]
pub async fn update_cover_letter(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    item: web::Json<UpdateCoverLetterRequest>,
) -> impl Responder {
    match state
        .cover_letters
        .update(path.into_inner(), item.into_inner())
        .await
    {
        Ok(record) => HttpResponse::Ok().json(CoverLetterResponse::from(&record)),
        Err(e) => error_response(e),
    }
}

#[utoipa::path(
    delete,
    path = "/api/cover-letter/{id}",
    tag = "Cover Letter",
    params(
        ("id" = Uuid, Path, description = "Cover letter ID")
    ),
    responses(
        (status = 204, description = "Cover letter deleted"),
        (status = 404, description = "Cover letter not found", body = ErrorResponse)
    )
)]
pub async fn delete_cover_letter(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> impl Responder {
    match state.cover_letters.delete(path.into_inner()).await {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(e) => error_response(e),
    }
}

#[utoipa::path(
    get,
    path = "/api/cover-letter/{id}/pdf",
    tag = "Cover Letter",
    params(
        ("id" = Uuid, Path, description = "Cover letter ID")
    ),
    responses(
        (status = 200, description = "PDF file", body = Vec<u8>, content_type = "application/pdf"),
        (status = 404, description = "Cover letter not found", body = ErrorResponse),
        (status = 409, description = "Cover letter has no content", body = ErrorResponse)
    )
)]
pub async fn download_cover_letter_pdf(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> impl Responder {
    match state.cover_letters.download_pdf(path.into_inner()).await {
        Ok(document) => pdf_response(document),
        Err(e) => error_response(e),
    }
}

#[utoipa::path(
    post,
    path = "/api/cover-letter/custom-pdf",
    tag = "Cover Letter",
    request_body = CustomPdfRequest,
    responses(
        (status = 200, description = "PDF file", body = Vec<u8>, content_type = "application/pdf"),
        (status = 400, description = "Validation failed", body = ErrorResponse)
    )
)]
pub async fn custom_cover_letter_pdf(
    state: web::Data<AppState>,
    item: web::Json<CustomPdfRequest>,
) -> impl Responder {
    match state.cover_letters.custom_pdf(item.into_inner()).await {
        Ok(document) => pdf_response(document),
        Err(e) => error_response(e),
    }
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/cover-letter")
            .route(web::get().to(list_cover_letters))
            .route(web::post().to(create_cover_letter)),
    )
    .service(
        web::resource("/cover-letter/custom-pdf").route(web::post().to(custom_cover_letter_pdf)),
    )
    .service(
        web::resource("/cover-letter/{id}")
            .route(web::get().to(get_cover_letter))
            .route(web::put().to(update_cover_letter))
            .route(web::delete().to(delete_cover_letter)),
    )
    .service(
        web::resource("/cover-letter/{id}/pdf").route(web::get().to(download_cover_letter_pdf)),
    );
}
