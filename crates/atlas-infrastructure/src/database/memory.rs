// ============================================================================
// Atlas Infrastructure - In-Memory Tenant Store
// File: crates/atlas-infrastructure/src/database/memory.rs
// ============================================================================
//! In-process `TenantStore` backed by a `RwLock<HashMap>`. The write lock is
//! held across every check-and-mutate step, which gives the same atomicity
//! the PostgreSQL adapter gets from its unique index and conditional UPDATE.
//! Used by the test suites and for local development without a database.

use std::cmp::Ordering;
use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use atlas_core::domain::{NewTenant, Tenant, TenantChanges};
use atlas_core::error::TenantError;
use atlas_core::repositories::{Page, SearchQuery, SortDirection, SortField, TenantStore};

#[derive(Default)]
pub struct MemTenantStore {
    records: RwLock<HashMap<Uuid, Tenant>>,
}

impl MemTenantStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn matches_term(tenant: &Tenant, term: &str) -> bool {
    let term = term.to_lowercase();
    tenant.name.to_lowercase().contains(&term) || tenant.code.to_lowercase().contains(&term)
}

fn compare_by(a: &Tenant, b: &Tenant, field: SortField) -> Ordering {
    match field {
        SortField::Id => a.id.cmp(&b.id),
        SortField::Code => a.code.cmp(&b.code),
        SortField::Name => a.name.cmp(&b.name),
        SortField::Description => a.description.cmp(&b.description),
        SortField::Email => a.email.cmp(&b.email),
        SortField::Phone => a.phone.cmp(&b.phone),
        SortField::Address => a.address.cmp(&b.address),
        SortField::Status => a.status.as_str().cmp(b.status.as_str()),
        SortField::CreatedAt => a.created_at.cmp(&b.created_at),
        SortField::UpdatedAt => a.updated_at.cmp(&b.updated_at),
        SortField::CreatedBy => a.created_by.cmp(&b.created_by),
        SortField::UpdatedBy => a.updated_by.cmp(&b.updated_by),
        SortField::Version => a.version.cmp(&b.version),
    }
}

#[async_trait]
impl TenantStore for MemTenantStore {
    async fn insert(&self, tenant: NewTenant) -> Result<Tenant, TenantError> {
        let mut records = self.records.write().await;

        // Uniqueness applies to live records only; deleted tenants free
        // their code for reuse.
        if records
            .values()
            .any(|t| !t.is_deleted() && t.code == tenant.code)
        {
            return Err(TenantError::DuplicateCode(tenant.code));
        }

        let now = Utc::now();
        let stored = Tenant {
            id: Uuid::new_v4(),
            code: tenant.code,
            name: tenant.name,
            description: tenant.description,
            email: tenant.email,
            phone: tenant.phone,
            address: tenant.address,
            status: tenant.status,
            created_at: now,
            updated_at: now,
            deleted_at: None,
            created_by: tenant.created_by,
            updated_by: tenant.updated_by,
            version: 0,
        };
        records.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn get_by_id(&self, id: &Uuid) -> Result<Option<Tenant>, TenantError> {
        let records = self.records.read().await;
        Ok(records.get(id).filter(|t| !t.is_deleted()).cloned())
    }

    async fn get_by_code(&self, code: &str) -> Result<Option<Tenant>, TenantError> {
        let records = self.records.read().await;
        Ok(records
            .values()
            .find(|t| !t.is_deleted() && t.code == code)
            .cloned())
    }

    async fn exists_by_code(&self, code: &str) -> Result<bool, TenantError> {
        let records = self.records.read().await;
        Ok(records.values().any(|t| !t.is_deleted() && t.code == code))
    }

    async fn update(
        &self,
        id: &Uuid,
        expected_version: i64,
        changes: TenantChanges,
    ) -> Result<Tenant, TenantError> {
        let mut records = self.records.write().await;

        let tenant = records
            .get_mut(id)
            .filter(|t| !t.is_deleted())
            .ok_or(TenantError::NotFound)?;

        if tenant.version != expected_version {
            return Err(TenantError::VersionConflict {
                expected: expected_version,
                actual: tenant.version,
            });
        }

        tenant.apply_changes(changes, Utc::now());
        Ok(tenant.clone())
    }

    async fn soft_delete(&self, id: &Uuid) -> Result<(), TenantError> {
        let mut records = self.records.write().await;

        let tenant = records
            .get_mut(id)
            .filter(|t| !t.is_deleted())
            .ok_or(TenantError::NotFound)?;

        tenant.soft_delete(Utc::now());
        Ok(())
    }

    async fn search(&self, query: SearchQuery) -> Result<Page<Tenant>, TenantError> {
        let records = self.records.read().await;

        let term = query
            .term
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty());

        let mut filtered: Vec<Tenant> = records
            .values()
            .filter(|t| !t.is_deleted())
            .filter(|t| term.is_none_or(|term| matches_term(t, term)))
            .filter(|t| query.status.is_none_or(|status| t.status == status))
            .cloned()
            .collect();

        // Tie-break on id ascending regardless of direction, so pagination
        // is deterministic across equal sort keys.
        filtered.sort_by(|a, b| {
            let key = match query.direction {
                SortDirection::Asc => compare_by(a, b, query.sort_by),
                SortDirection::Desc => compare_by(b, a, query.sort_by),
            };
            key.then_with(|| a.id.cmp(&b.id))
        });

        let total_count = filtered.len() as u64;
        let start = (query.page as usize).saturating_mul(query.size as usize);
        let items: Vec<Tenant> = filtered
            .into_iter()
            .skip(start)
            .take(query.size as usize)
            .collect();

        Ok(Page {
            items,
            total_count,
            page: query.page,
            size: query.size,
        })
    }
}
