use std::io::Cursor;
use std::sync::Arc;
use std::time::Duration;

use axum::body::Bytes;
use tracing::{debug, info};
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::files::dtos::{
    to_file_items, FileItemDto, FileListDto, SignedUrlDto, UploadedFileDto,
};
use crate::features::files::services::content_type;
use crate::modules::storage::ObjectStore;
use crate::shared::constants::{MAX_PRESIGN_EXPIRY_SECS, SNIFF_LEN};

/// Service for file operations against the object store
pub struct FileService {
    store: Arc<dyn ObjectStore>,
}

impl FileService {
    pub fn new(store: Arc<dyn ObjectStore>) -> Self {
        Self { store }
    }

    /// Fresh object key for an upload: `{uuid}{original extension}`
    pub fn generate_key(original_filename: &str) -> String {
        format!("{}{}", Uuid::new_v4(), extension_of(original_filename))
    }

    /// Upload one buffered file under `key`.
    ///
    /// The content type is sniffed from the first 512 bytes of the buffer and
    /// the stored body runs from the cursor's position to the end. The body is
    /// a slice of the same buffer, so the upload is never copied.
    pub async fn upload_single_file(&self, file: Cursor<Bytes>, key: &str) -> Result<UploadedFileDto> {
        let position = usize::try_from(file.position()).unwrap_or(usize::MAX);
        let data = file.into_inner();

        let content_type = content_type::detect(&data[..data.len().min(SNIFF_LEN)], key);
        let body = data.slice(position.min(data.len())..);

        if body.is_empty() {
            debug!("Rejected empty upload for '{}'", key);
            return Err(AppError::Validation(
                "file is empty, upload aborted".to_string(),
            ));
        }

        self.store.put_object(key, &body, &content_type).await?;

        info!(
            "File uploaded successfully: key={}, size={}, content_type={}",
            key,
            body.len(),
            content_type
        );

        Ok(UploadedFileDto {
            file_name: key.to_string(),
            file_size: i64::try_from(body.len()).unwrap_or(i64::MAX),
        })
    }

    /// List every file in the bucket; an empty bucket is an empty list
    pub async fn get_list_file(&self) -> Result<FileListDto> {
        let objects = self.store.list_objects().await?;
        debug!(
            "Listed {} objects in bucket '{}'",
            objects.len(),
            self.store.bucket_name()
        );

        Ok(FileListDto {
            files: to_file_items(objects),
        })
    }

    /// Find a file by its exact key.
    ///
    /// Scans the full listing, which is fine for the small buckets this
    /// gateway fronts.
    pub async fn get_file_by_key(&self, key: &str) -> Result<FileItemDto> {
        let objects = self.store.list_objects().await?;

        objects
            .into_iter()
            .find(|object| object.key == key)
            .map(FileItemDto::from)
            .ok_or_else(|| {
                let message = format!("file with key '{}' not found", key);
                debug!("{}", message);
                AppError::NotFound(message)
            })
    }

    /// Presigned GET URL for `key`, valid for `expires_in`
    pub async fn gen_signed_url(&self, key: &str, expires_in: Duration) -> Result<SignedUrlDto> {
        let url = self.store.presign_get(key, expires_in).await?;
        let duration = humantime::format_duration(expires_in).to_string();

        info!("Signed URL generated: key={}, duration={}", key, duration);

        Ok(SignedUrlDto { url, duration })
    }
}

/// Parse a duration literal such as "5m", "1h" or "1h 30m" into a URL expiry
pub fn parse_expiry(literal: &str) -> Result<Duration> {
    let duration = humantime::parse_duration(literal.trim())
        .map_err(|e| AppError::Validation(format!("invalid duration '{}': {}", literal, e)))?;

    if duration.as_secs() == 0 {
        return Err(AppError::Validation(
            "duration must be at least one second".to_string(),
        ));
    }

    if duration.as_secs() > MAX_PRESIGN_EXPIRY_SECS {
        return Err(AppError::Validation(format!(
            "duration must not exceed {}",
            humantime::format_duration(Duration::from_secs(MAX_PRESIGN_EXPIRY_SECS))
        )));
    }

    Ok(duration)
}

/// Extension of the last path element, dot included ("" when absent)
fn extension_of(filename: &str) -> &str {
    let base = filename.rsplit(['/', '\\']).next().unwrap_or(filename);
    match base.rfind('.') {
        Some(idx) => &base[idx..],
        None => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::InMemoryStore;

    fn service_with(store: &Arc<InMemoryStore>) -> FileService {
        FileService::new(Arc::clone(store) as Arc<dyn ObjectStore>)
    }

    #[test]
    fn test_extension_of() {
        assert_eq!(extension_of("notes.txt"), ".txt");
        assert_eq!(extension_of("archive.tar.gz"), ".gz");
        assert_eq!(extension_of("README"), "");
        assert_eq!(extension_of("dir.v2/README"), "");
        assert_eq!(extension_of("C:\\docs\\photo.JPG"), ".JPG");
    }

    #[test]
    fn test_generate_key_keeps_extension_and_is_unique() {
        let first = FileService::generate_key("report.pdf");
        let second = FileService::generate_key("report.pdf");
        assert!(first.ends_with(".pdf"));
        assert_ne!(first, second);
        assert!(Uuid::parse_str(first.trim_end_matches(".pdf")).is_ok());
    }

    #[test]
    fn test_parse_expiry() {
        assert_eq!(parse_expiry("5m").unwrap(), Duration::from_secs(300));
        assert_eq!(parse_expiry("1h").unwrap(), Duration::from_secs(3600));
        assert_eq!(parse_expiry("1h 30m").unwrap(), Duration::from_secs(5400));
        assert!(matches!(parse_expiry("soon"), Err(AppError::Validation(_))));
        assert!(matches!(parse_expiry("0s"), Err(AppError::Validation(_))));
        assert!(matches!(parse_expiry("8days"), Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_upload_reports_exact_size_and_content_type() {
        let store = Arc::new(InMemoryStore::new());
        let service = service_with(&store);

        let uploaded = service
            .upload_single_file(Cursor::new(Bytes::from_static(b"abc")), "k.txt")
            .await
            .unwrap();

        assert_eq!(uploaded.file_name, "k.txt");
        assert_eq!(uploaded.file_size, 3);
        let stored = store.get("k.txt").unwrap();
        assert_eq!(stored.data, b"abc");
        assert_eq!(stored.content_type, "text/plain; charset=utf-8");
    }

    #[tokio::test]
    async fn test_upload_measures_from_current_position() {
        let store = Arc::new(InMemoryStore::new());
        let service = service_with(&store);

        let mut cursor = Cursor::new(Bytes::from_static(b"skip-payload"));
        cursor.set_position(5);
        let uploaded = service.upload_single_file(cursor, "p.bin").await.unwrap();

        assert_eq!(uploaded.file_size, 7);
        assert_eq!(store.get("p.bin").unwrap().data, b"payload");
    }

    #[tokio::test]
    async fn test_empty_upload_is_rejected_without_storage_call() {
        let store = Arc::new(InMemoryStore::new());
        let service = service_with(&store);

        let err = service
            .upload_single_file(Cursor::new(Bytes::new()), "empty.png")
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(err.to_string(), "file is empty, upload aborted");
        assert_eq!(store.calls(), 0);
    }

    #[tokio::test]
    async fn test_upload_sniffs_from_buffer_start() {
        let store = Arc::new(InMemoryStore::new());
        let service = service_with(&store);

        let uploaded = service
            .upload_single_file(Cursor::new(Bytes::from_static(b"%PDF-1.4 body")), "doc.pdf")
            .await
            .unwrap();

        assert_eq!(uploaded.file_size, 13);
        assert_eq!(store.get("doc.pdf").unwrap().content_type, "application/pdf");
    }

    #[tokio::test]
    async fn test_upload_position_past_end_is_empty() {
        let store = Arc::new(InMemoryStore::new());
        let service = service_with(&store);

        let mut cursor = Cursor::new(Bytes::from_static(b"abc"));
        cursor.set_position(10);
        let err = service.upload_single_file(cursor, "k.txt").await.unwrap_err();

        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(store.calls(), 0);
    }

    #[tokio::test]
    async fn test_upload_propagates_provider_failure() {
        let store = Arc::new(InMemoryStore::failing());
        let err = service_with(&store)
            .upload_single_file(Cursor::new(Bytes::from_static(b"abc")), "k.txt")
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Upstream(_)));
        assert_eq!(store.calls(), 1);
    }

    #[tokio::test]
    async fn test_list_preserves_provider_order() {
        let store = Arc::new(InMemoryStore::with_objects(&[
            ("b.txt", b"bb"),
            ("a.txt", b"a"),
            ("c.txt", b"ccc"),
        ]));
        let service = service_with(&store);

        let list = service.get_list_file().await.unwrap();
        let names: Vec<&str> = list.files.iter().map(|f| f.file_name.as_str()).collect();
        assert_eq!(names, vec!["b.txt", "a.txt", "c.txt"]);
        assert_eq!(list.files[2].file_size, 3);
    }

    #[tokio::test]
    async fn test_list_empty_bucket() {
        let store = Arc::new(InMemoryStore::new());
        let list = service_with(&store).get_list_file().await.unwrap();
        assert!(list.files.is_empty());
    }

    #[tokio::test]
    async fn test_get_file_by_key() {
        let store = Arc::new(InMemoryStore::with_objects(&[("a.txt", b"abc")]));
        let service = service_with(&store);

        let found = service.get_file_by_key("a.txt").await.unwrap();
        assert_eq!(found.file_size, 3);

        let err = service.get_file_by_key("a.tx").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
        assert_eq!(err.to_string(), "file with key 'a.tx' not found");
    }

    #[tokio::test]
    async fn test_gen_signed_url() {
        let store = Arc::new(InMemoryStore::with_objects(&[("a.txt", b"abc")]));
        let grant = service_with(&store)
            .gen_signed_url("a.txt", Duration::from_secs(600))
            .await
            .unwrap();

        assert!(grant.url.contains("X-Amz-Expires=600"));
        assert_eq!(grant.duration, "10m");
    }

    #[tokio::test]
    async fn test_gen_signed_url_propagates_provider_failure() {
        let store = Arc::new(InMemoryStore::failing());
        let err = service_with(&store)
            .gen_signed_url("a.txt", Duration::from_secs(60))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Upstream(_)));
    }
}
