//! Health check handler

use axum::Json;
use serde::Serialize;

use crate::response::ApiResponse;

#[derive(Serialize)]
pub struct HealthDto {
    pub status: &'static str,
    pub service: &'static str,
}

/// GET /health
pub async fn health_check() -> Json<ApiResponse<HealthDto>> {
    Json(ApiResponse::success(HealthDto {
        status: "ok",
        service: "atlas-tenant",
    }))
}
