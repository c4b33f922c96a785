use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::features::files::handlers::{
    get_file_by_id, list_files, make_file_public, upload_file, FilesState,
};

/// Create routes for the files feature
///
/// `max_upload_size` caps the whole upload request body, multipart
/// framing included.
pub fn routes(state: FilesState, max_upload_size: usize) -> Router {
    Router::new()
        .route(
            "/upload",
            post(upload_file).layer(DefaultBodyLimit::max(max_upload_size)),
        )
        .route("/lists", get(list_files))
        .route("/public", post(make_file_public))
        .route("/file/{id}", get(get_file_by_id))
        .with_state(state)
}
