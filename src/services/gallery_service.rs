//! src/services/gallery_service.rs
//!
//! GalleryService — the two gallery operations over an injected
//! [`ObjectStore`]: list every object with a signed URL, and store one
//! uploaded file under a timestamped key. It holds no state besides the
//! store handle and the bucket name, so it is cheap to clone into every
//! request.

use crate::{
    models::{image::ImageRecord, upload::UploadRequest},
    store::{ObjectStore, StoreError, StoreResult},
};
use chrono::Utc;
use futures::future::try_join_all;
use std::{sync::Arc, time::Duration};
use tracing::{debug, info};

/// Lifetime of the URLs handed out on the gallery page.
pub const SIGNED_URL_TTL: Duration = Duration::from_secs(3600);

#[derive(Clone)]
pub struct GalleryService {
    /// Process-wide store client, shared by all in-flight requests.
    pub store: Arc<dyn ObjectStore>,

    /// Bucket every operation targets.
    pub bucket: String,
}

impl GalleryService {
    pub fn new(store: Arc<dyn ObjectStore>, bucket: impl Into<String>) -> Self {
        Self {
            store,
            bucket: bucket.into(),
        }
    }

    /// Enumerate the bucket and sign a GET URL for each key.
    ///
    /// Signing runs concurrently; the result keeps the store's enumeration
    /// order. Any failure fails the whole listing.
    pub async fn list_images(&self) -> StoreResult<Vec<ImageRecord>> {
        let keys = self.store.list(&self.bucket).await?;

        let signing = keys.into_iter().map(|key| async move {
            let url = self.store.sign(&self.bucket, &key, SIGNED_URL_TTL).await?;
            Ok::<_, StoreError>(ImageRecord { name: key, url })
        });
        let images = try_join_all(signing).await?;

        debug!(bucket = %self.bucket, count = images.len(), "signed gallery urls");
        Ok(images)
    }

    /// Persist one upload and return the key it was written under.
    pub async fn upload(&self, request: UploadRequest) -> StoreResult<String> {
        let key = object_key(Utc::now().timestamp_millis(), &request.filename);
        let size = request.payload.len();

        self.store
            .put(&self.bucket, &key, request.payload, &request.content_type)
            .await?;

        info!(
            bucket = %self.bucket,
            key = %key,
            size,
            content_type = %request.content_type,
            "stored upload"
        );
        Ok(key)
    }
}

/// `<epoch-ms>_<original-filename>`. Two uploads of the same name only
/// collide when they land in the same millisecond.
pub fn object_key(timestamp_ms: i64, filename: &str) -> String {
    format!("{timestamp_ms}_{filename}")
}
