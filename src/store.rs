//! Defines the storage capability used by the content-fetching
//! conversion strategies, and its S3 implementation.

use crate::error::AdapterError;
use bytes::Bytes;
#[cfg(test)]
use mockall::automock;

/// A capability that reads an object's content out of storage. The
/// storage client is supplied by the caller at adapter configuration
/// time, never constructed here.
#[cfg_attr(test, automock)]
pub trait ObjectStore {
    async fn fetch(&self, bucket: &str, key: &str) -> Result<Bytes, AdapterError>;
}

impl ObjectStore for aws_sdk_s3::Client {
    async fn fetch(&self, bucket: &str, key: &str) -> Result<Bytes, AdapterError> {
        let response = self
            .get_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| AdapterError::Fetch {
                bucket: bucket.to_string(),
                key: key.to_string(),
                source: Box::new(e),
            })?;
        let content = response.body.collect().await.map_err(|e| AdapterError::Fetch {
            bucket: bucket.to_string(),
            key: key.to_string(),
            source: Box::new(e),
        })?;
        Ok(content.into_bytes())
    }
}
