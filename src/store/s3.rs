//! `ObjectStore` backed by the AWS S3 SDK.

use super::{ObjectStore, StoreError, StoreResult};
use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_s3::{
    Client,
    error::ProvideErrorMetadata,
    presigning::PresigningConfig,
    primitives::ByteStream,
};
use bytes::Bytes;
use std::time::Duration;
use tracing::debug;

#[derive(Clone)]
pub struct S3Store {
    client: Client,
}

impl S3Store {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Build a client from the default credential chain.
    ///
    /// A custom `endpoint_url` targets an S3-compatible service and switches
    /// to path-style addressing.
    pub async fn connect(region: &str, endpoint_url: Option<&str>) -> Self {
        let mut loader =
            aws_config::defaults(BehaviorVersion::latest()).region(Region::new(region.to_owned()));
        if let Some(endpoint) = endpoint_url {
            loader = loader.endpoint_url(endpoint);
        }
        let shared = loader.load().await;

        let s3_config = aws_sdk_s3::config::Builder::from(&shared)
            .force_path_style(endpoint_url.is_some())
            .build();
        Self::new(Client::from_conf(s3_config))
    }
}

#[async_trait]
impl ObjectStore for S3Store {
    async fn list(&self, bucket: &str) -> StoreResult<Vec<String>> {
        let mut pages = self
            .client
            .list_objects_v2()
            .bucket(bucket)
            .into_paginator()
            .send();

        let mut keys = Vec::new();
        while let Some(page) = pages.next().await {
            let page = page.map_err(|err| StoreError::List(sdk_message(&err)))?;
            keys.extend(
                page.contents()
                    .iter()
                    .filter_map(|obj| obj.key().map(str::to_owned)),
            );
        }

        debug!(bucket, count = keys.len(), "listed objects");
        Ok(keys)
    }

    async fn sign(&self, bucket: &str, key: &str, ttl: Duration) -> StoreResult<String> {
        let presigning =
            PresigningConfig::expires_in(ttl).map_err(|err| StoreError::Presign(err.to_string()))?;

        let request = self
            .client
            .get_object()
            .bucket(bucket)
            .key(key)
            .presigned(presigning)
            .await
            .map_err(|err| StoreError::Sign(sdk_message(&err)))?;

        Ok(request.uri().to_string())
    }

    async fn put(
        &self,
        bucket: &str,
        key: &str,
        body: Bytes,
        content_type: &str,
    ) -> StoreResult<()> {
        self.client
            .put_object()
            .bucket(bucket)
            .key(key)
            .body(ByteStream::from(body))
            .content_type(content_type)
            .send()
            .await
            .map_err(|err| StoreError::Put(sdk_message(&err)))?;

        Ok(())
    }
}

/// Prefer the service's own message ("Access Denied", ...). Otherwise join
/// the `Display` chain of the error and its sources, which keeps SDK
/// internals out of what callers see.
fn sdk_message<E>(err: &E) -> String
where
    E: ProvideErrorMetadata + std::error::Error,
{
    if let Some(message) = err.message() {
        return message.to_owned();
    }

    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
