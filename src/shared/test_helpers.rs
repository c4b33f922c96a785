#[cfg(test)]
use crate::core::error::AppError;
#[cfg(test)]
use crate::modules::storage::{ObjectStore, ObjectSummary};
#[cfg(test)]
use async_trait::async_trait;
#[cfg(test)]
use std::sync::atomic::{AtomicUsize, Ordering};
#[cfg(test)]
use std::sync::Mutex;
#[cfg(test)]
use std::time::Duration;

#[cfg(test)]
#[derive(Debug, Clone)]
pub struct StoredObject {
    pub key: String,
    pub data: Vec<u8>,
    pub content_type: String,
}

/// In-memory bucket standing in for R2 in tests.
///
/// Counts every provider call so tests can assert that validation
/// failures never reach storage.
#[cfg(test)]
pub struct InMemoryStore {
    objects: Mutex<Vec<StoredObject>>,
    calls: AtomicUsize,
    failure: Option<fn(String) -> AppError>,
    fail_only: Option<&'static str>,
}

#[cfg(test)]
impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            objects: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
            failure: None,
            fail_only: None,
        }
    }

    pub fn with_objects(objects: &[(&str, &[u8])]) -> Self {
        let store = Self::new();
        *store.objects.lock().unwrap() = objects
            .iter()
            .map(|(key, data)| StoredObject {
                key: key.to_string(),
                data: data.to_vec(),
                content_type: "application/octet-stream".to_string(),
            })
            .collect();
        store
    }

    /// Every call fails as if the provider were unreachable
    pub fn failing() -> Self {
        Self {
            failure: Some(AppError::Upstream),
            ..Self::new()
        }
    }

    /// Every call fails as if the provider never answered
    pub fn timing_out() -> Self {
        Self {
            failure: Some(AppError::UpstreamTimeout),
            ..Self::new()
        }
    }

    /// Only `operation` fails as unreachable; other calls succeed
    pub fn failing_on(self, operation: &'static str) -> Self {
        Self {
            failure: Some(AppError::Upstream),
            fail_only: Some(operation),
            ..self
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn get(&self, key: &str) -> Option<StoredObject> {
        self.objects
            .lock()
            .unwrap()
            .iter()
            .find(|o| o.key == key)
            .cloned()
    }

    fn record_call(&self, operation: &str) -> Result<(), AppError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(failure) = self.failure {
            if self.fail_only.map_or(true, |only| only == operation) {
                return Err(failure(format!(
                    "failed to {}: connection refused",
                    operation
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[async_trait]
impl ObjectStore for InMemoryStore {
    async fn put_object(
        &self,
        key: &str,
        data: &[u8],
        content_type: &str,
    ) -> Result<(), AppError> {
        self.record_call("upload file")?;
        let mut objects = self.objects.lock().unwrap();
        objects.retain(|o| o.key != key);
        objects.push(StoredObject {
            key: key.to_string(),
            data: data.to_vec(),
            content_type: content_type.to_string(),
        });
        Ok(())
    }

    async fn list_objects(&self) -> Result<Vec<ObjectSummary>, AppError> {
        self.record_call("list objects")?;
        Ok(self
            .objects
            .lock()
            .unwrap()
            .iter()
            .map(|o| ObjectSummary {
                key: o.key.clone(),
                size: o.data.len() as u64,
            })
            .collect())
    }

    async fn presign_get(&self, key: &str, expires_in: Duration) -> Result<String, AppError> {
        self.record_call("generate presigned URL")?;
        Ok(format!(
            "https://test-bucket.example/{}?X-Amz-Expires={}",
            key,
            expires_in.as_secs()
        ))
    }

    fn bucket_name(&self) -> String {
        "test-bucket".to_string()
    }
}
