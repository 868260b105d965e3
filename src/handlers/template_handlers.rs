use actix_web::{HttpResponse, web};
use serde_json::json;

use crate::db::DbPool;
use crate::errors::AppError;
use crate::models::template::{self, TemplateSubmission};
use crate::render;

/// The static layout skeleton. Fetched once per client session and captured
/// into every template record at creation time.
pub const LAYOUT: &str = include_str!("../../templates/layout.html");

/// GET /api/getEmailLayout — the skeleton the editor substitutes into
pub async fn get_layout() -> HttpResponse {
    HttpResponse::Ok().json(json!({ "layout": LAYOUT }))
}

/// POST /api/uploadEmailConfig — create a new template
///
/// The layout stored on the record is the server's skeleton; any layout in
/// the request body is ignored.
pub async fn create(
    pool: web::Data<DbPool>,
    body: web::Json<TemplateSubmission>,
) -> Result<HttpResponse, AppError> {
    let errors = template::validate_submission(&body);
    if !errors.is_empty() {
        return Err(AppError::Validation(errors.join("; ")));
    }

    let conn = pool.get()?;
    let id = template::create(&conn, &body, LAYOUT)?;

    log::info!("Created email template {id}");
    Ok(HttpResponse::Ok().json(json!({
        "message": "Email template saved successfully",
        "id": id,
    })))
}

/// GET /api/email/{id} — fetch a template by id
pub async fn read(
    pool: web::Data<DbPool>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let conn = pool.get()?;

    let record = template::find_by_id(&conn, id)?.ok_or(AppError::NotFound)?;

    Ok(HttpResponse::Ok().json(json!({
        "message": "Email template fetched successfully",
        "data": record,
    })))
}

/// PUT /api/email/{id} — update a template
///
/// The layout captured at creation is preserved no matter what the body
/// submits.
pub async fn update(
    pool: web::Data<DbPool>,
    path: web::Path<i64>,
    body: web::Json<TemplateSubmission>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();

    let errors = template::validate_submission(&body);
    if !errors.is_empty() {
        return Err(AppError::Validation(errors.join("; ")));
    }

    let conn = pool.get()?;
    let updated = template::update(&conn, id, &body)?.ok_or(AppError::NotFound)?;

    Ok(HttpResponse::Ok().json(json!({
        "message": "Email template updated successfully",
        "data": updated,
    })))
}

/// GET /api/renderAndDownloadTemplate/{id} — compile and deliver as an
/// attachment named `email-template-<id>.html`
pub async fn download(
    pool: web::Data<DbPool>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let conn = pool.get()?;

    // A malformed persisted section surfaces as a decode error here; treat
    // it like any other compiler fault: log the cause, return the generic
    // render error.
    let record = template::find_by_id(&conn, id)
        .map_err(|e| match e {
            AppError::Json(cause) => {
                log::error!("Error rendering template {id}: {cause}");
                AppError::Render
            }
            other => other,
        })?
        .ok_or(AppError::NotFound)?;

    let html = render::compile(&record).map_err(|e| {
        log::error!("Error rendering template {id}: {e}");
        AppError::Render
    })?;

    Ok(HttpResponse::Ok()
        .content_type("text/html")
        .insert_header((
            "Content-Disposition",
            format!("attachment; filename=\"email-template-{id}.html\""),
        ))
        .body(html))
}
