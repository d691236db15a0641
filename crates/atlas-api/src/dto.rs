//! Request/response DTOs for the tenant endpoints

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use atlas_core::domain::{CreateTenant, Tenant, TenantPatch, TenantStatus};
use atlas_shared::constants::DEFAULT_PAGE_SIZE;

/// Creation payload. Shape rules live here; business rules live in the
/// registry.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTenantRequest {
    #[validate(length(min = 1, max = 50, message = "Tenant code is required and must not exceed 50 characters"))]
    pub code: String,

    #[validate(length(min = 1, max = 255, message = "Tenant name is required and must not exceed 255 characters"))]
    pub name: String,

    pub description: Option<String>,

    #[validate(email(message = "Invalid email format"))]
    #[validate(length(max = 255, message = "Email must not exceed 255 characters"))]
    pub email: Option<String>,

    #[validate(length(max = 50, message = "Phone must not exceed 50 characters"))]
    pub phone: Option<String>,

    pub address: Option<String>,

    pub status: Option<TenantStatus>,
}

impl From<CreateTenantRequest> for CreateTenant {
    fn from(req: CreateTenantRequest) -> Self {
        CreateTenant {
            code: req.code,
            name: req.name,
            description: req.description,
            email: req.email,
            phone: req.phone,
            address: req.address,
            status: req.status,
        }
    }
}

/// Update payload. Code is immutable and deliberately absent; an omitted
/// status leaves the current status unchanged.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateTenantRequest {
    #[validate(length(min = 1, max = 255, message = "Tenant name is required and must not exceed 255 characters"))]
    pub name: String,

    pub description: Option<String>,

    #[validate(email(message = "Invalid email format"))]
    #[validate(length(max = 255, message = "Email must not exceed 255 characters"))]
    pub email: Option<String>,

    #[validate(length(max = 50, message = "Phone must not exceed 50 characters"))]
    pub phone: Option<String>,

    pub address: Option<String>,

    pub status: Option<TenantStatus>,
}

impl From<UpdateTenantRequest> for TenantPatch {
    fn from(req: UpdateTenantRequest) -> Self {
        TenantPatch {
            name: req.name,
            description: req.description,
            email: req.email,
            phone: req.phone,
            address: req.address,
            status: req.status,
        }
    }
}

/// Tenant response body
#[derive(Debug, Serialize)]
pub struct TenantResponse {
    pub id: Uuid,
    pub code: String,
    pub name: String,
    pub description: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub status: TenantStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub created_by: String,
    pub updated_by: String,
    pub version: i64,
}

impl From<Tenant> for TenantResponse {
    fn from(tenant: Tenant) -> Self {
        TenantResponse {
            id: tenant.id,
            code: tenant.code,
            name: tenant.name,
            description: tenant.description,
            email: tenant.email,
            phone: tenant.phone,
            address: tenant.address,
            status: tenant.status,
            created_at: tenant.created_at,
            updated_at: tenant.updated_at,
            created_by: tenant.created_by,
            updated_by: tenant.updated_by,
            version: tenant.version,
        }
    }
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

/// Search query parameters
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub search_term: Option<String>,
    /// Status name, case-insensitive (`active`, `INACTIVE`, ...).
    pub status: Option<String>,
    #[serde(default)]
    pub page: u32,
    #[serde(default = "default_page_size")]
    pub size: u32,
    pub sort_by: Option<String>,
    pub sort_direction: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_create() -> CreateTenantRequest {
        CreateTenantRequest {
            code: "ACME".to_string(),
            name: "Acme Corp".to_string(),
            description: None,
            email: Some("info@acme.example".to_string()),
            phone: None,
            address: None,
            status: None,
        }
    }

    #[test]
    fn test_create_request_accepts_valid_payload() {
        assert!(valid_create().validate().is_ok());
    }

    #[test]
    fn test_create_request_rejects_empty_code() {
        let mut req = valid_create();
        req.code = String::new();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_create_request_rejects_overlong_code() {
        let mut req = valid_create();
        req.code = "X".repeat(51);
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_create_request_rejects_bad_email() {
        let mut req = valid_create();
        req.email = Some("not-an-email".to_string());
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_create_request_allows_absent_optionals() {
        let mut req = valid_create();
        req.email = None;
        req.phone = None;
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_status_deserializes_screaming_snake() {
        let req: CreateTenantRequest = serde_json::from_value(serde_json::json!({
            "code": "ACME",
            "name": "Acme Corp",
            "status": "SUSPENDED"
        }))
        .unwrap();
        assert_eq!(req.status, Some(TenantStatus::Suspended));
    }
}
