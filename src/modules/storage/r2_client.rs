//! Cloudflare R2 storage client
//!
//! R2 speaks the S3 API on an account-scoped endpoint, so the client is a
//! thin wrapper over a rust-s3 `Bucket` with static credentials and the
//! `auto` region.

use async_trait::async_trait;
use s3::creds::Credentials;
use s3::serde_types::ListBucketResult;
use s3::{Bucket, Region};
use std::future::Future;
use std::time::Duration;
use tracing::debug;

use crate::core::config::R2Config;
use crate::core::error::AppError;
use crate::modules::storage::{ObjectStore, ObjectSummary};

/// R2 bucket client, built once at startup and shared across requests
pub struct R2Client {
    bucket: Box<Bucket>,
    endpoint: String,
    request_timeout: Duration,
}

impl R2Client {
    /// Create a client bound to `https://{account}.r2.cloudflarestorage.com`
    ///
    /// No network call is made here; bad credentials surface on first use.
    pub fn new(config: &R2Config) -> Result<Self, AppError> {
        let credentials = Credentials::new(
            Some(&config.access_key_id),
            Some(&config.secret_access_key),
            None,
            None,
            None,
        )
        .map_err(|e| AppError::Configuration(format!("Failed to load R2 credentials: {}", e)))?;

        let endpoint = config.endpoint();
        let region = Region::Custom {
            region: config.region().to_string(),
            endpoint: endpoint.clone(),
        };

        let mut bucket = Bucket::new(&config.bucket_name, region, credentials)
            .map_err(|e| AppError::Configuration(format!("Failed to create R2 bucket: {}", e)))?;

        // https://{account}.r2.cloudflarestorage.com/{bucket}/{key}
        bucket.set_path_style();

        debug!("R2 bucket '{}' bound to {}", bucket.name(), endpoint);

        Ok(Self {
            bucket,
            endpoint,
            request_timeout: config.request_timeout,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Run one provider call under the configured timeout
    async fn bounded<T, F>(&self, operation: &str, call: F) -> Result<T, AppError>
    where
        F: Future<Output = Result<T, s3::error::S3Error>>,
    {
        match tokio::time::timeout(self.request_timeout, call).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => {
                debug!("R2 {} failed: {}", operation, e);
                Err(AppError::Upstream(format!("failed to {}: {}", operation, e)))
            }
            Err(_) => {
                debug!(
                    "R2 {} timed out after {:?}",
                    operation, self.request_timeout
                );
                Err(AppError::UpstreamTimeout(format!(
                    "failed to {}: storage provider did not respond within {}s",
                    operation,
                    self.request_timeout.as_secs()
                )))
            }
        }
    }
}

#[async_trait]
impl ObjectStore for R2Client {
    async fn put_object(
        &self,
        key: &str,
        data: &[u8],
        content_type: &str,
    ) -> Result<(), AppError> {
        let response = self
            .bounded(
                "upload file",
                self.bucket
                    .put_object_with_content_type(key, data, content_type),
            )
            .await?;

        check_put_status(key, response.status_code(), response.as_slice())?;

        debug!("Uploaded '{}' to bucket '{}'", key, self.bucket.name());
        Ok(())
    }

    async fn list_objects(&self) -> Result<Vec<ObjectSummary>, AppError> {
        let pages = self
            .bounded("list objects", self.bucket.list(String::new(), None))
            .await?;

        Ok(summaries_from_listing(pages))
    }

    async fn presign_get(&self, key: &str, expires_in: Duration) -> Result<String, AppError> {
        let expiry_secs = u32::try_from(expires_in.as_secs())
            .map_err(|_| AppError::Validation("duration is too long".to_string()))?;

        self.bounded(
            "generate presigned URL",
            self.bucket.presign_get(key, expiry_secs, None),
        )
        .await
    }

    fn bucket_name(&self) -> String {
        self.bucket.name()
    }
}

/// Reject a put whose response status is outside 2xx
fn check_put_status(key: &str, status: u16, body: &[u8]) -> Result<(), AppError> {
    if (200..300).contains(&status) {
        return Ok(());
    }

    debug!(
        "R2 put of '{}' returned {}: {}",
        key,
        status,
        String::from_utf8_lossy(body)
    );
    Err(AppError::Upstream(format!(
        "failed to upload file: provider returned status {}",
        status
    )))
}

/// Flatten every page of a listing into summaries, keeping provider order
fn summaries_from_listing(pages: Vec<ListBucketResult>) -> Vec<ObjectSummary> {
    pages
        .into_iter()
        .flat_map(|page| page.contents)
        .map(|object| ObjectSummary {
            key: object.key,
            size: object.size,
        })
        .collect()
}
