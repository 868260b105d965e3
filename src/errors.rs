use actix_web::{HttpResponse, ResponseError};
use serde_json::json;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Db(rusqlite::Error),
    Pool(r2d2::Error),
    Json(serde_json::Error),
    Io(std::io::Error),
    Validation(String),
    Render,
    NotFound,
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Db(e) => write!(f, "Database error: {e}"),
            AppError::Pool(e) => write!(f, "Pool error: {e}"),
            AppError::Json(e) => write!(f, "JSON error: {e}"),
            AppError::Io(e) => write!(f, "I/O error: {e}"),
            AppError::Validation(e) => write!(f, "Validation failed: {e}"),
            AppError::Render => write!(f, "Failed to process template"),
            AppError::NotFound => write!(f, "Not found"),
        }
    }
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::NotFound => {
                HttpResponse::NotFound().json(json!({ "error": "Email template not found" }))
            }
            AppError::Validation(details) => {
                HttpResponse::BadRequest().json(json!({ "error": details }))
            }
            // The original cause has already been logged at the compiler
            // boundary; callers only ever see the generic message.
            AppError::Render => HttpResponse::InternalServerError()
                .json(json!({ "error": "Error rendering template" })),
            _ => {
                log::error!("{self}");
                HttpResponse::InternalServerError()
                    .json(json!({ "error": "Internal server error" }))
            }
        }
    }
}

impl From<rusqlite::Error> for AppError {
    fn from(e: rusqlite::Error) -> Self {
        AppError::Db(e)
    }
}

impl From<r2d2::Error> for AppError {
    fn from(e: r2d2::Error) -> Self {
        AppError::Pool(e)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self {
        AppError::Json(e)
    }
}

impl From<std::io::Error> for AppError {
    fn from(e: std::io::Error) -> Self {
        AppError::Io(e)
    }
}
