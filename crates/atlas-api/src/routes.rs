//! Router assembly, shared by the server binary and the integration tests.

use axum::{
    routing::get,
    Router,
};

use crate::handlers::{health, tenants};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route(
            "/api/v1/tenants",
            get(tenants::search_tenants).post(tenants::create_tenant),
        )
        .route(
            "/api/v1/tenants/{id}",
            get(tenants::get_tenant_by_id)
                .put(tenants::update_tenant)
                .delete(tenants::delete_tenant),
        )
        .route("/api/v1/tenants/code/{code}", get(tenants::get_tenant_by_code))
        .route("/api/v1/tenants/exists/{code}", get(tenants::exists_by_code))
        .with_state(state)
}
