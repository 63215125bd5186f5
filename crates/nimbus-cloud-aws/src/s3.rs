//! Object storage facade
//!
//! [`S3`] is bound to one bucket at a time. Uploads go through the call
//! handle ([`ObjectApi`]); reads go through the resource handle
//! ([`ObjectResource`]).

use crate::error::Result;
use crate::sdk::S3Connector;
use async_trait::async_trait;
use nimbus_cloud::{Connector, Credential, Handles};
use std::path::Path;

/// Low-level object upload interface
#[async_trait]
pub trait ObjectApi: Send + Sync {
    /// Upload a local file to `bucket/key`
    async fn upload_file(&self, bucket: &str, key: &str, path: &Path) -> Result<()>;

    /// Store `body` as `bucket/key`
    async fn put_object(&self, bucket: &str, key: &str, body: Vec<u8>) -> Result<()>;
}

/// Object reads
#[async_trait]
pub trait ObjectResource: Send + Sync {
    /// Full body of `bucket/key`, `None` when the key does not exist
    async fn get_object(&self, bucket: &str, key: &str) -> Result<Option<Vec<u8>>>;
}

/// S3 facade
pub struct S3<C: Connector = S3Connector> {
    handles: Handles<C>,
    bucket: String,
}

impl S3 {
    /// Build SDK-backed handles for the credential's keys and region
    pub fn new(credential: &Credential, bucket: impl Into<String>) -> Self {
        Self::with_connector(S3Connector, credential, bucket)
    }
}

impl<C> S3<C>
where
    C: Connector,
    C::Client: ObjectApi,
    C::Resource: ObjectResource,
{
    pub fn with_connector(connector: C, credential: &Credential, bucket: impl Into<String>) -> Self {
        Self {
            handles: Handles::new(connector, credential),
            bucket: bucket.into(),
        }
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// Point subsequent operations at another bucket
    pub fn set_bucket(&mut self, bucket: impl Into<String>) {
        self.bucket = bucket.into();
    }

    pub fn region(&self) -> &str {
        self.handles.region()
    }

    pub fn rebind(&mut self, credential: &Credential) {
        self.handles.rebind(credential);
    }

    pub fn handles(&self) -> &Handles<C> {
        &self.handles
    }

    /// Upload a local file to `key`
    pub async fn upload(&self, path: impl AsRef<Path>, key: &str) -> Result<()> {
        let path = path.as_ref();
        tracing::debug!("Uploading {} to s3://{}/{}", path.display(), self.bucket, key);
        self.handles
            .client()
            .upload_file(&self.bucket, key, path)
            .await
    }

    /// Store an in-memory body under `key`
    pub async fn put(&self, body: impl Into<Vec<u8>>, key: &str) -> Result<()> {
        tracing::debug!("Putting s3://{}/{}", self.bucket, key);
        self.handles
            .client()
            .put_object(&self.bucket, key, body.into())
            .await
    }

    /// Object body, distinguishing a missing key (`Ok(None)`) from failure
    pub async fn try_get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        tracing::debug!("Getting s3://{}/{}", self.bucket, key);
        self.handles.resource().get_object(&self.bucket, key).await
    }

    /// Object body, or `None` when it cannot be read for any reason
    pub async fn get(&self, key: &str) -> Option<Vec<u8>> {
        match self.try_get(key).await {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!("Failed to read s3://{}/{}: {}", self.bucket, key, e);
                None
            }
        }
    }

    /// Write the object at `key` to `path`
    ///
    /// Returns `Ok(false)` without creating the file when the object cannot
    /// be read.
    pub async fn download(&self, path: impl AsRef<Path>, key: &str) -> Result<bool> {
        let Some(body) = self.get(key).await else {
            return Ok(false);
        };

        let path = path.as_ref();
        tracing::debug!("Writing {} bytes to {}", body.len(), path.display());
        tokio::fs::write(path, body).await?;
        Ok(true)
    }
}
