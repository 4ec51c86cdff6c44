//! Upload request and response payloads.

use bytes::Bytes;
use serde::Serialize;

/// Content type recorded when the multipart part declares none.
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// A single file received from the upload form, fully buffered.
#[derive(Clone, Debug)]
pub struct UploadRequest {
    /// Filename as sent by the client.
    pub filename: String,

    /// Raw file bytes.
    pub payload: Bytes,

    /// MIME type declared on the multipart part, passed to the store unchanged.
    pub content_type: String,
}

/// Body of a successful `POST /upload`.
#[derive(Serialize, Debug)]
pub struct UploadResponse {
    pub success: bool,
    pub message: &'static str,
}

impl UploadResponse {
    pub fn uploaded() -> Self {
        Self {
            success: true,
            message: "Image uploaded successfully!",
        }
    }
}
