//! In-memory `ObjectStore` double for handler and service tests.

use super::{ObjectStore, StoreError, StoreResult};
use async_trait::async_trait;
use bytes::Bytes;
use std::{collections::BTreeMap, time::Duration};
use tokio::sync::RwLock;

/// An object as the store holds it.
#[derive(Debug, Clone)]
pub struct StoredObject {
    pub payload: Bytes,
    pub content_type: String,
}

/// Keys are kept in a `BTreeMap` so enumeration is lexicographic, like S3.
#[derive(Default)]
pub struct MemoryStore {
    objects: RwLock<BTreeMap<(String, String), StoredObject>>,
    fail_list: bool,
    fail_sign: bool,
    fail_put: Option<String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_list(mut self) -> Self {
        self.fail_list = true;
        self
    }

    pub fn failing_sign(mut self) -> Self {
        self.fail_sign = true;
        self
    }

    pub fn failing_put(mut self, message: impl Into<String>) -> Self {
        self.fail_put = Some(message.into());
        self
    }

    pub async fn insert(&self, bucket: &str, key: &str, payload: &[u8], content_type: &str) {
        self.objects.write().await.insert(
            (bucket.to_owned(), key.to_owned()),
            StoredObject {
                payload: Bytes::copy_from_slice(payload),
                content_type: content_type.to_owned(),
            },
        );
    }

    pub async fn get(&self, bucket: &str, key: &str) -> Option<StoredObject> {
        self.objects
            .read()
            .await
            .get(&(bucket.to_owned(), key.to_owned()))
            .cloned()
    }

    pub async fn keys(&self, bucket: &str) -> Vec<String> {
        self.objects
            .read()
            .await
            .keys()
            .filter(|(b, _)| b == bucket)
            .map(|(_, key)| key.clone())
            .collect()
    }

    pub async fn len(&self) -> usize {
        self.objects.read().await.len()
    }
}

#[async_trait]
impl ObjectStore for MemoryStore {
    async fn list(&self, bucket: &str) -> StoreResult<Vec<String>> {
        if self.fail_list {
            return Err(StoreError::List("connection refused".into()));
        }
        Ok(self.keys(bucket).await)
    }

    async fn sign(&self, bucket: &str, key: &str, ttl: Duration) -> StoreResult<String> {
        if self.fail_sign {
            return Err(StoreError::Sign("credentials expired".into()));
        }
        Ok(format!(
            "https://{bucket}.s3.test/{key}?X-Amz-Expires={}",
            ttl.as_secs()
        ))
    }

    async fn put(
        &self,
        bucket: &str,
        key: &str,
        body: Bytes,
        content_type: &str,
    ) -> StoreResult<()> {
        if let Some(message) = &self.fail_put {
            return Err(StoreError::Put(message.clone()));
        }
        self.objects.write().await.insert(
            (bucket.to_owned(), key.to_owned()),
            StoredObject {
                payload: body,
                content_type: content_type.to_owned(),
            },
        );
        Ok(())
    }
}
