use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::modules::storage::ObjectSummary;

/// Upload file request DTO for OpenAPI documentation
/// Note: This struct is for Swagger UI documentation only.
/// The actual handler uses axum's Multipart extractor directly.
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct UploadFileDto {
    /// The file to upload (exactly one per request)
    #[schema(format = Binary, content_media_type = "application/octet-stream")]
    pub file: String,
}

/// Metadata of a freshly uploaded file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UploadedFileDto {
    /// Generated object key: `{uuid}{original extension}`
    #[schema(example = "0192e4a1-7c3b-4f7e-9a51-2d8f0c6b1e23.txt")]
    pub file_name: String,
    /// Size in bytes (field name kept for existing clients)
    #[serde(rename = "file_size_in_kb")]
    pub file_size: i64,
}

/// One entry of a bucket listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FileItemDto {
    pub file_name: String,
    /// Size in bytes (field name kept for existing clients)
    #[serde(rename = "file_size_in_kb")]
    pub file_size: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FileListDto {
    pub files: Vec<FileItemDto>,
}

/// Request to share a stored file through a presigned URL
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct MakeFilePublicDto {
    /// Object key returned by the upload endpoint
    #[serde(rename = "FileID", alias = "file_id")]
    #[validate(length(min = 1, message = "FileID is required"))]
    pub file_id: String,
    /// How long the URL stays valid, e.g. "5m", "1h", "1h 30m"
    #[serde(rename = "Duration", alias = "duration")]
    #[validate(length(min = 1, message = "Duration is required"))]
    #[schema(example = "1h")]
    pub duration: String,
}

/// A time-limited download URL
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SignedUrlDto {
    pub url: String,
    /// Validity of the URL, e.g. "5m"
    pub duration: String,
}

impl From<ObjectSummary> for FileItemDto {
    fn from(object: ObjectSummary) -> Self {
        Self {
            file_name: object.key,
            file_size: i64::try_from(object.size).unwrap_or(i64::MAX),
        }
    }
}

/// Map a provider listing 1:1 into list entries, preserving order
pub fn to_file_items(objects: Vec<ObjectSummary>) -> Vec<FileItemDto> {
    objects.into_iter().map(FileItemDto::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn summary(key: &str, size: u64) -> ObjectSummary {
        ObjectSummary {
            key: key.to_string(),
            size,
        }
    }

    #[test]
    fn test_to_file_items_preserves_order_and_duplicates() {
        let items = to_file_items(vec![
            summary("b.txt", 2),
            summary("a.txt", 1),
            summary("b.txt", 2),
        ]);
        let names: Vec<&str> = items.iter().map(|i| i.file_name.as_str()).collect();
        assert_eq!(names, vec!["b.txt", "a.txt", "b.txt"]);
        assert_eq!(items[0].file_size, 2);
    }

    #[test]
    fn test_to_file_items_empty() {
        assert!(to_file_items(Vec::new()).is_empty());
    }

    #[test]
    fn test_file_item_wire_names() {
        let value = serde_json::to_value(FileItemDto {
            file_name: "a.txt".to_string(),
            file_size: 3,
        })
        .unwrap();
        assert_eq!(value, json!({"file_name": "a.txt", "file_size_in_kb": 3}));
    }

    #[test]
    fn test_make_public_accepts_both_spellings() {
        let pascal: MakeFilePublicDto =
            serde_json::from_value(json!({"FileID": "a.txt", "Duration": "5m"})).unwrap();
        assert_eq!(pascal.file_id, "a.txt");
        assert_eq!(pascal.duration, "5m");

        let snake: MakeFilePublicDto =
            serde_json::from_value(json!({"file_id": "b.txt", "duration": "1h"})).unwrap();
        assert_eq!(snake.file_id, "b.txt");
    }

    #[test]
    fn test_make_public_requires_values() {
        let dto = MakeFilePublicDto {
            file_id: String::new(),
            duration: "5m".to_string(),
        };
        assert!(dto.validate().is_err());
    }
}
