use actix_web::{HttpResponse, web};

use crate::blob::BlobStore;
use crate::errors::AppError;

/// POST /api/uploadImage — store raw image bytes, return `{url, publicId}`
///
/// The body is the image itself. The editor puts the returned URL into the
/// owning image section; a failed upload changes nothing on the template.
pub async fn upload_image(
    store: web::Data<BlobStore>,
    bytes: web::Bytes,
) -> Result<HttpResponse, AppError> {
    if bytes.is_empty() {
        return Err(AppError::Validation("No image provided".to_string()));
    }

    let stored = store.upload(&bytes)?;
    log::info!("Stored uploaded image as {}", stored.public_id);

    Ok(HttpResponse::Ok().json(stored))
}
