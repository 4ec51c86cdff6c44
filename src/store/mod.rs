//! Object store capability used by the gallery.
//!
//! Handlers only ever see `Arc<dyn ObjectStore>`; the S3 client lives behind
//! it in [`s3`], and tests swap in [`memory`].

pub mod s3;

#[cfg(test)]
pub mod memory;

use async_trait::async_trait;
use bytes::Bytes;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{0}")]
    List(String),
    #[error("{0}")]
    Sign(String),
    #[error("{0}")]
    Put(String),
    #[error("invalid presign expiry: {0}")]
    Presign(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Bucket-oriented key/value store with enumeration and signed reads.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Every key currently in `bucket`, in the store's enumeration order.
    async fn list(&self, bucket: &str) -> StoreResult<Vec<String>>;

    /// A URL granting unauthenticated GET access to `key` for `ttl`.
    async fn sign(&self, bucket: &str, key: &str, ttl: Duration) -> StoreResult<String>;

    async fn put(
        &self,
        bucket: &str,
        key: &str,
        body: Bytes,
        content_type: &str,
    ) -> StoreResult<()>;
}
