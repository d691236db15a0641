// ============================================================================
// Atlas API - Tenant Handlers
// File: crates/atlas-api/src/handlers/tenants.rs
// ============================================================================
//! Tenant HTTP handlers. Shape validation happens here; everything else is
//! delegated to the registry.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use atlas_core::domain::TenantStatus;
use atlas_core::services::SearchCriteria;
use atlas_shared::constants::MAX_PAGE_SIZE;

use crate::dto::{CreateTenantRequest, SearchParams, TenantResponse, UpdateTenantRequest};
use crate::error::{bad_request, from_tenant_error, from_validation_errors, ErrorResponse};
use crate::extract::Actor;
use crate::response::{ApiResponse, PageDto};
use crate::state::AppState;

/// POST /api/v1/tenants
pub async fn create_tenant(
    State(state): State<AppState>,
    Actor(actor): Actor,
    Json(payload): Json<CreateTenantRequest>,
) -> Result<(StatusCode, Json<ApiResponse<TenantResponse>>), ErrorResponse> {
    info!("POST /api/v1/tenants - Creating tenant with code: {}", payload.code);

    payload.validate().map_err(from_validation_errors)?;

    let tenant = state
        .registry
        .create_tenant(payload.into(), &actor)
        .await
        .map_err(from_tenant_error)?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(tenant.into())),
    ))
}

/// PUT /api/v1/tenants/{id}
pub async fn update_tenant(
    State(state): State<AppState>,
    Actor(actor): Actor,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateTenantRequest>,
) -> Result<Json<ApiResponse<TenantResponse>>, ErrorResponse> {
    info!("PUT /api/v1/tenants/{} - Updating tenant", id);

    payload.validate().map_err(from_validation_errors)?;

    let tenant = state
        .registry
        .update_tenant(&id, payload.into(), &actor)
        .await
        .map_err(from_tenant_error)?;

    Ok(Json(ApiResponse::success(tenant.into())))
}

/// GET /api/v1/tenants/{id}
pub async fn get_tenant_by_id(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<TenantResponse>>, ErrorResponse> {
    info!("GET /api/v1/tenants/{} - Fetching tenant", id);

    let tenant = state
        .registry
        .get_tenant(&id)
        .await
        .map_err(from_tenant_error)?;

    Ok(Json(ApiResponse::success(tenant.into())))
}

/// GET /api/v1/tenants/code/{code}
pub async fn get_tenant_by_code(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<ApiResponse<TenantResponse>>, ErrorResponse> {
    info!("GET /api/v1/tenants/code/{} - Fetching tenant", code);

    let tenant = state
        .registry
        .get_tenant_by_code(&code)
        .await
        .map_err(from_tenant_error)?;

    Ok(Json(ApiResponse::success(tenant.into())))
}

/// GET /api/v1/tenants
pub async fn search_tenants(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<ApiResponse<PageDto<TenantResponse>>>, ErrorResponse> {
    info!(
        "GET /api/v1/tenants - Searching tenants with term: {:?}, status: {:?}, page: {}, size: {}",
        params.search_term, params.status, params.page, params.size
    );

    let status = match params.status.as_deref() {
        Some(raw) => Some(
            TenantStatus::parse(raw)
                .ok_or_else(|| bad_request("INVALID_STATUS", &format!("Unknown status: {raw}")))?,
        ),
        None => None,
    };

    let page = state
        .registry
        .search_tenants(SearchCriteria {
            search_term: params.search_term,
            status,
            page: params.page,
            size: params.size.clamp(1, MAX_PAGE_SIZE),
            sort_by: params.sort_by,
            sort_direction: params.sort_direction,
        })
        .await
        .map_err(from_tenant_error)?;

    Ok(Json(ApiResponse::success(PageDto::from_page(
        page,
        TenantResponse::from,
    ))))
}

/// DELETE /api/v1/tenants/{id}
pub async fn delete_tenant(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ErrorResponse> {
    info!("DELETE /api/v1/tenants/{} - Deleting tenant", id);

    state
        .registry
        .delete_tenant(&id)
        .await
        .map_err(from_tenant_error)?;

    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/tenants/exists/{code}
pub async fn exists_by_code(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<ApiResponse<bool>>, ErrorResponse> {
    info!("GET /api/v1/tenants/exists/{} - Checking tenant existence", code);

    let exists = state
        .registry
        .code_exists(&code)
        .await
        .map_err(from_tenant_error)?;

    Ok(Json(ApiResponse::success(exists)))
}
