use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Uniform envelope for every API response.
///
/// `data` is typed per endpoint, so each handler picks the payload shape
/// through `T` instead of an untyped value.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
        }
    }

    pub fn error(message: impl Into<String>) -> ApiResponse<()> {
        ApiResponse {
            success: false,
            message: Some(message.into()),
            data: None,
        }
    }
}
