//! `POST /upload` — store one image from a multipart form.

use crate::{
    errors::AppError,
    models::upload::{DEFAULT_CONTENT_TYPE, UploadRequest, UploadResponse},
    services::gallery_service::GalleryService,
};
use axum::{
    Json,
    extract::{Multipart, State, multipart::MultipartRejection},
};
use tracing::{debug, error};

/// Form field the upload page sends the file in.
pub const IMAGE_FIELD: &str = "image";

const NO_FILE: &str = "No file uploaded";

/// `POST /upload`
///
/// A request that is not multipart at all is treated like a form without a
/// file.
pub async fn upload_image(
    State(service): State<GalleryService>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>, AppError> {
    let multipart = match multipart {
        Ok(multipart) => multipart,
        Err(rejection) => {
            debug!(reason = %rejection.body_text(), "upload without multipart body");
            return Err(AppError::bad_request(NO_FILE));
        }
    };

    let Some(request) = read_image_field(multipart).await? else {
        debug!("upload form carried no file");
        return Err(AppError::bad_request(NO_FILE));
    };

    let filename = request.filename.clone();
    service.upload(request).await.map_err(|err| {
        error!(filename = %filename, error = %err, "upload error");
        AppError::from(err)
    })?;

    Ok(Json(UploadResponse::uploaded()))
}

/// Buffer the first `image` field that carries a filename.
///
/// Browsers submit an empty filename when no file was picked; that counts as
/// no file.
async fn read_image_field(mut multipart: Multipart) -> Result<Option<UploadRequest>, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|err| AppError::bad_request(err.body_text()))?
    {
        if field.name() != Some(IMAGE_FIELD) {
            continue;
        }
        let filename = match field.file_name() {
            Some(name) if !name.is_empty() => name.to_owned(),
            _ => continue,
        };
        let content_type = field
            .content_type()
            .unwrap_or(DEFAULT_CONTENT_TYPE)
            .to_owned();

        let payload = field
            .bytes()
            .await
            .map_err(|err| AppError::bad_request(err.body_text()))?;

        return Ok(Some(UploadRequest {
            filename,
            payload,
            content_type,
        }));
    }

    Ok(None)
}
