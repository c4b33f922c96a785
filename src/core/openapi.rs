use utoipa::{Modify, OpenApi};

use crate::features::files::{dtos as files_dtos, handlers as files_handlers};
use crate::shared::types::ApiResponse;

#[derive(OpenApi)]
#[openapi(
    paths(
        files_handlers::upload_file,
        files_handlers::list_files,
        files_handlers::make_file_public,
        files_handlers::get_file_by_id,
    ),
    components(
        schemas(
            ApiResponse<files_dtos::UploadedFileDto>,
            ApiResponse<files_dtos::FileListDto>,
            ApiResponse<files_dtos::FileItemDto>,
            ApiResponse<files_dtos::SignedUrlDto>,
            files_dtos::UploadFileDto,
            files_dtos::UploadedFileDto,
            files_dtos::FileItemDto,
            files_dtos::FileListDto,
            files_dtos::MakeFilePublicDto,
            files_dtos::SignedUrlDto,
        )
    ),
    tags(
        (name = "files", description = "File upload, listing and sharing")
    )
)]
pub struct ApiDoc;

/// Fills the document's info block from configuration
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_file_routes() {
        let doc = ApiDoc::openapi();
        for path in ["/upload", "/lists", "/public", "/file/{id}"] {
            assert!(doc.paths.paths.contains_key(path), "missing {}", path);
        }
    }

    #[test]
    fn test_info_modifier() {
        let mut doc = ApiDoc::openapi();
        SwaggerInfoModifier {
            title: "Files".to_string(),
            version: "9.9.9".to_string(),
            description: "desc".to_string(),
        }
        .modify(&mut doc);
        assert_eq!(doc.info.title, "Files");
        assert_eq!(doc.info.version, "9.9.9");
    }
}
