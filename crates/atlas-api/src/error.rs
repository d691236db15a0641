//! Error-to-status translation

use axum::http::StatusCode;
use axum::Json;
use tracing::error;
use validator::ValidationErrors;

use atlas_core::error::TenantError;

use crate::response::ApiResponse;

/// The error half of every handler result.
pub type ErrorResponse = (StatusCode, Json<ApiResponse<()>>);

/// Map a domain failure onto a transport signal. DuplicateCode and
/// VersionConflict are both conflicts but carry distinct codes so clients
/// can tell "pick another code" from "re-read and retry".
pub fn from_tenant_error(err: TenantError) -> ErrorResponse {
    match &err {
        TenantError::NotFound => (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error("TENANT_NOT_FOUND", &err.to_string())),
        ),
        TenantError::DuplicateCode(_) => (
            StatusCode::CONFLICT,
            Json(ApiResponse::error("TENANT_CODE_EXISTS", &err.to_string())),
        ),
        TenantError::VersionConflict { .. } => (
            StatusCode::CONFLICT,
            Json(ApiResponse::error("VERSION_CONFLICT", &err.to_string())),
        ),
        TenantError::InvalidSortField(_) => (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error("INVALID_SORT_FIELD", &err.to_string())),
        ),
        TenantError::Database(msg) => {
            error!("Store failure: {}", msg);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("INTERNAL_ERROR", "Internal server error")),
            )
        }
    }
}

pub fn from_validation_errors(errors: ValidationErrors) -> ErrorResponse {
    (
        StatusCode::BAD_REQUEST,
        Json(ApiResponse::error("VALIDATION_ERROR", &errors.to_string())),
    )
}

pub fn bad_request(code: &str, message: &str) -> ErrorResponse {
    (
        StatusCode::BAD_REQUEST,
        Json(ApiResponse::error(code, message)),
    )
}
