use std::io::Cursor;
use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};
use tracing::debug;
use validator::Validate;

use crate::core::config::StatusMode;
use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::files::dtos::{
    FileItemDto, FileListDto, MakeFilePublicDto, SignedUrlDto, UploadFileDto, UploadedFileDto,
};
use crate::features::files::services::{parse_expiry, FileService};
use crate::shared::constants::FILE_FIELD;
use crate::shared::types::ApiResponse;

/// State for file handlers
#[derive(Clone)]
pub struct FilesState {
    pub service: Arc<FileService>,
    pub status_mode: StatusMode,
}

impl FilesState {
    /// Status of a successful read
    fn found(&self) -> StatusCode {
        match self.status_mode {
            StatusMode::Legacy => StatusCode::FOUND,
            StatusMode::Standard => StatusCode::OK,
        }
    }

    /// In legacy mode every failure of an operation maps to one fixed status
    fn failure(&self, err: AppError, legacy: impl FnOnce(String) -> AppError) -> AppError {
        match self.status_mode {
            StatusMode::Legacy => {
                debug!("Storage operation failed: {}", err);
                legacy(err.to_string())
            }
            StatusMode::Standard => err,
        }
    }
}

/// Upload a file
///
/// Accepts multipart/form-data with exactly one `file` field. The object is
/// stored under a generated key that keeps the original extension.
#[utoipa::path(
    post,
    path = "/upload",
    tag = "files",
    request_body(
        content = UploadFileDto,
        content_type = "multipart/form-data",
        description = "Single file upload",
    ),
    responses(
        (status = 201, description = "File uploaded successfully", body = ApiResponse<UploadedFileDto>),
        (status = 400, description = "Malformed form, missing file, more than one file or body too large"),
        (status = 408, description = "Upload failed (legacy status mode)"),
        (status = 502, description = "Storage provider error (standard status mode)")
    )
)]
pub async fn upload_file(
    State(state): State<FilesState>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<ApiResponse<UploadedFileDto>>)> {
    let mut upload: Option<(String, Bytes)> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        debug!("Failed to read multipart field: {}", e);
        AppError::BadRequest(format!("Failed to read multipart data: {}", e))
    })? {
        if field.name() != Some(FILE_FIELD) {
            debug!("Ignoring unknown field: {:?}", field.name());
            continue;
        }

        // A part without a filename is a plain form value, not a file
        let file_name = match field.file_name() {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => {
                debug!("Ignoring non-file part named '{}'", FILE_FIELD);
                continue;
            }
        };

        if upload.is_some() {
            debug!("Multiple file uploads are not allowed");
            return Err(AppError::BadRequest(
                "only one file can be uploaded at a time".to_string(),
            ));
        }

        let data = field.bytes().await.map_err(|e| {
            debug!("Failed to read file bytes: {}", e);
            AppError::BadRequest(format!("Failed to read file data: {}", e))
        })?;

        upload = Some((file_name, data));
    }

    let (file_name, data) =
        upload.ok_or_else(|| AppError::BadRequest("file is required".to_string()))?;

    let key = FileService::generate_key(&file_name);
    let uploaded = state
        .service
        .upload_single_file(Cursor::new(data), &key)
        .await
        .map_err(|e| state.failure(e, AppError::RequestTimeout))?;

    Ok((StatusCode::CREATED, Json(ApiResponse::success(uploaded))))
}

/// List every file in the bucket
#[utoipa::path(
    get,
    path = "/lists",
    tag = "files",
    responses(
        (status = 302, description = "Listing (legacy status mode)", body = ApiResponse<FileListDto>),
        (status = 200, description = "Listing (standard status mode)", body = ApiResponse<FileListDto>),
        (status = 404, description = "Listing failed (legacy status mode)"),
        (status = 502, description = "Storage provider error (standard status mode)")
    )
)]
pub async fn list_files(
    State(state): State<FilesState>,
) -> Result<(StatusCode, Json<ApiResponse<FileListDto>>)> {
    let files = state
        .service
        .get_list_file()
        .await
        .map_err(|e| state.failure(e, |_| AppError::NotFound("file not found".to_string())))?;

    Ok((state.found(), Json(ApiResponse::success(files))))
}

/// Share a file through a presigned URL
///
/// The duration literal is validated before the bucket is queried.
#[utoipa::path(
    post,
    path = "/public",
    tag = "files",
    request_body = MakeFilePublicDto,
    responses(
        (status = 202, description = "Presigned URL generated", body = ApiResponse<SignedUrlDto>),
        (status = 400, description = "Malformed body or duration"),
        (status = 404, description = "File not found"),
        (status = 502, description = "Storage provider error (standard status mode)")
    )
)]
pub async fn make_file_public(
    State(state): State<FilesState>,
    AppJson(dto): AppJson<MakeFilePublicDto>,
) -> Result<(StatusCode, Json<ApiResponse<SignedUrlDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let expires_in = parse_expiry(&dto.duration)?;

    state
        .service
        .get_file_by_key(&dto.file_id)
        .await
        .map_err(|e| state.failure(e, AppError::NotFound))?;

    let grant = state
        .service
        .gen_signed_url(&dto.file_id, expires_in)
        .await
        .map_err(|e| state.failure(e, AppError::NotFound))?;

    Ok((StatusCode::ACCEPTED, Json(ApiResponse::success(grant))))
}

/// Get a file's metadata by its key
#[utoipa::path(
    get,
    path = "/file/{id}",
    tag = "files",
    params(
        ("id" = String, Path, description = "Object key returned by the upload endpoint")
    ),
    responses(
        (status = 302, description = "File found (legacy status mode)", body = ApiResponse<FileItemDto>),
        (status = 200, description = "File found (standard status mode)", body = ApiResponse<FileItemDto>),
        (status = 404, description = "File not found"),
        (status = 502, description = "Storage provider error (standard status mode)")
    )
)]
pub async fn get_file_by_id(
    State(state): State<FilesState>,
    Path(id): Path<String>,
) -> Result<(StatusCode, Json<ApiResponse<FileItemDto>>)> {
    let file = state
        .service
        .get_file_by_key(&id)
        .await
        .map_err(|e| state.failure(e, AppError::NotFound))?;

    Ok((state.found(), Json(ApiResponse::success(file))))
}
