use async_trait::async_trait;
use std::time::Duration;

use crate::core::error::AppError;

/// One object as reported by a bucket listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectSummary {
    pub key: String,
    pub size: u64,
}

/// Operations the file service needs from an S3-compatible bucket
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Store `data` under `key` in a single put
    async fn put_object(&self, key: &str, data: &[u8], content_type: &str)
        -> Result<(), AppError>;

    /// Every object in the bucket, in provider order
    async fn list_objects(&self) -> Result<Vec<ObjectSummary>, AppError>;

    /// Time-limited GET URL for `key`
    async fn presign_get(&self, key: &str, expires_in: Duration) -> Result<String, AppError>;

    fn bucket_name(&self) -> String;
}
