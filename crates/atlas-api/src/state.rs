use atlas_core::services::TenantRegistry;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<TenantRegistry>,
}
