/// Default ceiling for an upload request body (5 MiB)
pub const DEFAULT_MAX_UPLOAD_SIZE: usize = 5 * 1024 * 1024;

/// Multipart field carrying the uploaded file
pub const FILE_FIELD: &str = "file";

/// Bytes inspected when detecting the content type of an upload
pub const SNIFF_LEN: usize = 512;

// =============================================================================
// R2
// =============================================================================

/// Host suffix of account-scoped R2 endpoints
pub const R2_DOMAIN: &str = "r2.cloudflarestorage.com";

/// Placeholder region token accepted by R2
pub const R2_REGION: &str = "auto";

/// Longest expiry S3-style presigned URLs accept (7 days)
pub const MAX_PRESIGN_EXPIRY_SECS: u64 = 7 * 24 * 60 * 60;
