//! Defines routes for the gallery.
//!
//! ## Structure
//! - `GET  /`        — gallery page listing every object with a signed URL
//! - `POST /upload`  — multipart upload of one image (field `image`)
//! - `GET  /healthz` — liveness

use crate::{
    handlers::{
        gallery_handlers::index, health_handlers::healthz, upload_handlers::upload_image,
    },
    services::gallery_service::GalleryService,
};
use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};

/// Build and return the router for the gallery.
///
/// The router carries shared state (`GalleryService`) to all handlers.
/// Uploads are buffered whole, so the default body limit is lifted on
/// `/upload`.
pub fn routes() -> Router<GalleryService> {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/", get(index))
        .route(
            "/upload",
            post(upload_image).layer(DefaultBodyLimit::disable()),
        )
}
