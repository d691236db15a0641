//! Tenant store trait (port)
//!
//! The single source of truth for uniqueness and optimistic versioning.
//! `insert` and `update` are atomic against the underlying store: two
//! concurrent inserts with the same code yield exactly one success, and two
//! concurrent updates from the same version yield exactly one success.

use async_trait::async_trait;
use uuid::Uuid;

#[cfg(test)]
use mockall::automock;

use crate::domain::{NewTenant, Tenant, TenantChanges, TenantStatus};
use crate::error::TenantError;

/// Sort direction for search results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

/// The closed set of sortable tenant attributes.
///
/// Sort keys arrive from callers as strings; parsing happens once, in the
/// registry, so stores only ever see valid keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Id,
    Code,
    Name,
    Description,
    Email,
    Phone,
    Address,
    Status,
    CreatedAt,
    UpdatedAt,
    CreatedBy,
    UpdatedBy,
    Version,
}

impl SortField {
    /// Accepts both snake_case and camelCase spellings of the attribute
    /// names; anything else is an `InvalidSortField` caller error.
    pub fn parse(s: &str) -> Result<Self, TenantError> {
        match s {
            "id" => Ok(SortField::Id),
            "code" => Ok(SortField::Code),
            "name" => Ok(SortField::Name),
            "description" => Ok(SortField::Description),
            "email" => Ok(SortField::Email),
            "phone" => Ok(SortField::Phone),
            "address" => Ok(SortField::Address),
            "status" => Ok(SortField::Status),
            "created_at" | "createdAt" => Ok(SortField::CreatedAt),
            "updated_at" | "updatedAt" => Ok(SortField::UpdatedAt),
            "created_by" | "createdBy" => Ok(SortField::CreatedBy),
            "updated_by" | "updatedBy" => Ok(SortField::UpdatedBy),
            "version" => Ok(SortField::Version),
            other => Err(TenantError::InvalidSortField(other.to_string())),
        }
    }

    /// Column name in the SQL schema.
    pub fn as_column(&self) -> &'static str {
        match self {
            SortField::Id => "id",
            SortField::Code => "code",
            SortField::Name => "name",
            SortField::Description => "description",
            SortField::Email => "email",
            SortField::Phone => "phone",
            SortField::Address => "address",
            SortField::Status => "status",
            SortField::CreatedAt => "created_at",
            SortField::UpdatedAt => "updated_at",
            SortField::CreatedBy => "created_by",
            SortField::UpdatedBy => "updated_by",
            SortField::Version => "version",
        }
    }
}

/// A normalized, validated search request.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchQuery {
    /// Case-insensitive substring match against name or code; an empty or
    /// absent term imposes no constraint.
    pub term: Option<String>,
    pub status: Option<TenantStatus>,
    /// Zero-based page index.
    pub page: u32,
    pub size: u32,
    pub sort_by: SortField,
    pub direction: SortDirection,
}

/// One page of search results plus the total size of the filtered set.
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total_count: u64,
    pub page: u32,
    pub size: u32,
}

impl<T> Page<T> {
    pub fn total_pages(&self) -> u32 {
        if self.size == 0 {
            return 0;
        }
        self.total_count.div_ceil(self.size as u64) as u32
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total_count: self.total_count,
            page: self.page,
            size: self.size,
        }
    }
}

#[cfg_attr(test, automock)]
#[async_trait]
pub trait TenantStore: Send + Sync {
    /// Insert a new tenant. Fails with `DuplicateCode` if a live tenant
    /// with the same code exists; the check and the write are one atomic
    /// operation. Assigns id, version 0, and creation timestamps.
    async fn insert(&self, tenant: NewTenant) -> Result<Tenant, TenantError>;

    /// Fetch a live tenant by id. Soft-deleted records are invisible.
    async fn get_by_id(&self, id: &Uuid) -> Result<Option<Tenant>, TenantError>;

    /// Fetch a live tenant by code.
    async fn get_by_code(&self, code: &str) -> Result<Option<Tenant>, TenantError>;

    /// True iff a live tenant with the given code exists.
    async fn exists_by_code(&self, code: &str) -> Result<bool, TenantError>;

    /// Version-checked update. Fails `NotFound` when the record is absent
    /// or soft-deleted, `VersionConflict` when the stored version differs
    /// from `expected_version`. On success the version increments by one
    /// and `updated_at` refreshes; the whole step is atomic.
    async fn update(
        &self,
        id: &Uuid,
        expected_version: i64,
        changes: TenantChanges,
    ) -> Result<Tenant, TenantError>;

    /// Mark a live tenant deleted. A second call on the same record fails
    /// `NotFound`, matching the visibility rule for deleted records.
    async fn soft_delete(&self, id: &Uuid) -> Result<(), TenantError>;

    /// Filtered, sorted, paginated search over live tenants. Ties on the
    /// sort key break on id ascending so pagination stays deterministic.
    async fn search(&self, query: SearchQuery) -> Result<Page<Tenant>, TenantError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_field_parse_both_spellings() {
        assert_eq!(SortField::parse("created_at").unwrap(), SortField::CreatedAt);
        assert_eq!(SortField::parse("createdAt").unwrap(), SortField::CreatedAt);
        assert_eq!(SortField::parse("updatedAt").unwrap(), SortField::UpdatedAt);
        assert_eq!(SortField::parse("createdBy").unwrap(), SortField::CreatedBy);
        assert_eq!(SortField::parse("name").unwrap(), SortField::Name);
    }

    #[test]
    fn test_every_sortable_attribute_parses() {
        for field in [
            "id",
            "code",
            "name",
            "description",
            "email",
            "phone",
            "address",
            "status",
            "created_at",
            "updated_at",
            "created_by",
            "updated_by",
            "version",
        ] {
            assert!(SortField::parse(field).is_ok(), "{field} should be sortable");
        }
    }

    #[test]
    fn test_sort_field_parse_rejects_unknown() {
        let err = SortField::parse("deleted_at; DROP TABLE tenants").unwrap_err();
        assert!(matches!(err, TenantError::InvalidSortField(_)));
    }

    #[test]
    fn test_page_total_pages() {
        let page = Page::<u8> {
            items: vec![],
            total_count: 41,
            page: 0,
            size: 20,
        };
        assert_eq!(page.total_pages(), 3);

        let exact = Page::<u8> {
            items: vec![],
            total_count: 40,
            page: 0,
            size: 20,
        };
        assert_eq!(exact.total_pages(), 2);
    }
}
