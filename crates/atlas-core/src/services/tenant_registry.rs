// ============================================================================
// Atlas Core - Tenant Registry Service
// File: crates/atlas-core/src/services/tenant_registry.rs
// ============================================================================
//! Business-rule orchestration above the tenant store: duplicate-code
//! rejection, default filling, audit stamping, patch merging, and search
//! normalization. No retries, no caching, no background work.

use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::{CreateTenant, NewTenant, Tenant, TenantChanges, TenantPatch, TenantStatus};
use crate::error::TenantError;
use crate::repositories::{Page, SearchQuery, SortDirection, SortField, TenantStore};

/// Raw search parameters as received from callers, before normalization.
#[derive(Debug, Clone, Default)]
pub struct SearchCriteria {
    pub search_term: Option<String>,
    pub status: Option<TenantStatus>,
    pub page: u32,
    pub size: u32,
    /// Sort key name; defaults to `createdAt` when absent.
    pub sort_by: Option<String>,
    /// `desc` (case-insensitive) sorts descending; anything else ascending.
    /// Defaults to descending when absent.
    pub sort_direction: Option<String>,
}

/// Tenant registry service
pub struct TenantRegistry {
    store: Arc<dyn TenantStore>,
}

impl TenantRegistry {
    pub fn new(store: Arc<dyn TenantStore>) -> Self {
        Self { store }
    }

    /// Create a new tenant stamped with `actor` as creator.
    pub async fn create_tenant(
        &self,
        request: CreateTenant,
        actor: &str,
    ) -> Result<Tenant, TenantError> {
        info!("Creating tenant with code: {}", request.code);

        if self.store.exists_by_code(&request.code).await? {
            warn!("Tenant code already exists: {}", request.code);
            return Err(TenantError::DuplicateCode(request.code));
        }

        // The store's insert is atomic; a concurrent create racing past the
        // pre-check above still resolves to exactly one DuplicateCode.
        let tenant = self
            .store
            .insert(NewTenant {
                code: request.code,
                name: request.name,
                description: request.description,
                email: request.email,
                phone: request.phone,
                address: request.address,
                status: request.status.unwrap_or_default(),
                created_by: actor.to_string(),
                updated_by: actor.to_string(),
            })
            .await?;

        info!("Successfully created tenant with id: {}", tenant.id);
        Ok(tenant)
    }

    /// Update an existing tenant. Reads the current record, merges the
    /// patch (status only when supplied), and writes with the version just
    /// read. A `VersionConflict` means a concurrent writer won the race;
    /// it is surfaced as-is for the caller to re-read and retry.
    pub async fn update_tenant(
        &self,
        id: &Uuid,
        patch: TenantPatch,
        actor: &str,
    ) -> Result<Tenant, TenantError> {
        info!("Updating tenant with id: {}", id);

        let current = self
            .store
            .get_by_id(id)
            .await?
            .ok_or(TenantError::NotFound)?;

        let changes = TenantChanges {
            name: patch.name,
            description: patch.description,
            email: patch.email,
            phone: patch.phone,
            address: patch.address,
            status: patch.status.unwrap_or(current.status),
            updated_by: actor.to_string(),
        };

        let updated = self.store.update(id, current.version, changes).await?;
        info!("Successfully updated tenant with id: {}", updated.id);
        Ok(updated)
    }

    /// Get tenant by id.
    pub async fn get_tenant(&self, id: &Uuid) -> Result<Tenant, TenantError> {
        self.store
            .get_by_id(id)
            .await?
            .ok_or(TenantError::NotFound)
    }

    /// Get tenant by code.
    pub async fn get_tenant_by_code(&self, code: &str) -> Result<Tenant, TenantError> {
        self.store
            .get_by_code(code)
            .await?
            .ok_or(TenantError::NotFound)
    }

    /// Search tenants with pagination. Normalizes the sort key (default
    /// `createdAt` descending) and rejects unknown keys before the store
    /// is consulted.
    pub async fn search_tenants(
        &self,
        criteria: SearchCriteria,
    ) -> Result<Page<Tenant>, TenantError> {
        info!(
            "Searching tenants with term: {:?}, status: {:?}, page: {}, size: {}",
            criteria.search_term, criteria.status, criteria.page, criteria.size
        );

        let sort_by = match criteria.sort_by.as_deref() {
            Some(field) => SortField::parse(field)?,
            None => SortField::CreatedAt,
        };
        let direction = match criteria.sort_direction.as_deref() {
            Some(dir) if !dir.eq_ignore_ascii_case("desc") => SortDirection::Asc,
            _ => SortDirection::Desc,
        };

        self.store
            .search(SearchQuery {
                term: criteria.search_term,
                status: criteria.status,
                page: criteria.page,
                size: criteria.size,
                sort_by,
                direction,
            })
            .await
    }

    /// Soft delete tenant.
    pub async fn delete_tenant(&self, id: &Uuid) -> Result<(), TenantError> {
        info!("Deleting tenant with id: {}", id);
        self.store.soft_delete(id).await?;
        info!("Successfully deleted tenant with id: {}", id);
        Ok(())
    }

    /// Check if a live tenant exists by code.
    pub async fn code_exists(&self, code: &str) -> Result<bool, TenantError> {
        self.store.exists_by_code(code).await
    }
}
