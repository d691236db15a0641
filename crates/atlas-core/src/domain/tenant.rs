// ============================================================================
// Atlas Core - Tenant Entity
// File: crates/atlas-core/src/domain/tenant.rs
// Description: Tenant organization entity with soft delete and versioning
// ============================================================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Tenant status enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TenantStatus {
    Active,
    Inactive,
    Suspended,
}

impl TenantStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TenantStatus::Active => "ACTIVE",
            TenantStatus::Inactive => "INACTIVE",
            TenantStatus::Suspended => "SUSPENDED",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_uppercase().as_str() {
            "ACTIVE" => Some(TenantStatus::Active),
            "INACTIVE" => Some(TenantStatus::Inactive),
            "SUSPENDED" => Some(TenantStatus::Suspended),
            _ => None,
        }
    }
}

impl Default for TenantStatus {
    fn default() -> Self {
        TenantStatus::Active
    }
}

/// Tenant entity
///
/// A soft-deleted tenant (`deleted_at` set) is invisible to every normal
/// read path; its code becomes reusable by a new tenant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tenant {
    pub id: Uuid,
    pub code: String,
    pub name: String,
    pub description: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub status: TenantStatus,

    // Audit fields
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
    pub created_by: String,
    pub updated_by: String,

    /// Optimistic concurrency stamp, starts at 0 and increments by 1 on
    /// every successful mutation.
    pub version: i64,
}

impl Tenant {
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// Apply a merged set of changes: field updates, version bump, audit
    /// refresh. Used by stores that mutate records in process.
    pub fn apply_changes(&mut self, changes: TenantChanges, now: DateTime<Utc>) {
        self.name = changes.name;
        self.description = changes.description;
        self.email = changes.email;
        self.phone = changes.phone;
        self.address = changes.address;
        self.status = changes.status;
        self.updated_by = changes.updated_by;
        self.updated_at = now;
        self.version += 1;
    }

    pub fn soft_delete(&mut self, now: DateTime<Utc>) {
        self.deleted_at = Some(now);
    }
}

/// Input to tenant creation, before the store assigns id, version, and
/// timestamps. Built by the registry from a [`CreateTenant`] plus the actor.
#[derive(Debug, Clone)]
pub struct NewTenant {
    pub code: String,
    pub name: String,
    pub description: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub status: TenantStatus,
    pub created_by: String,
    pub updated_by: String,
}

/// Caller-facing creation payload. `status` defaults to ACTIVE when unset.
#[derive(Debug, Clone)]
pub struct CreateTenant {
    pub code: String,
    pub name: String,
    pub description: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub status: Option<TenantStatus>,
}

/// Caller-facing update payload. An unset `status` leaves the current
/// status unchanged; the other fields are applied as given.
#[derive(Debug, Clone)]
pub struct TenantPatch {
    pub name: String,
    pub description: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub status: Option<TenantStatus>,
}

/// The merged field set a store applies in one atomic, version-checked
/// update. Produced by the registry; never touches id or code.
#[derive(Debug, Clone, PartialEq)]
pub struct TenantChanges {
    pub name: String,
    pub description: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub status: TenantStatus,
    pub updated_by: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tenant() -> Tenant {
        let now = Utc::now();
        Tenant {
            id: Uuid::new_v4(),
            code: "ACME".to_string(),
            name: "Acme Corp".to_string(),
            description: None,
            email: None,
            phone: None,
            address: None,
            status: TenantStatus::Active,
            created_at: now,
            updated_at: now,
            deleted_at: None,
            created_by: "tester".to_string(),
            updated_by: "tester".to_string(),
            version: 0,
        }
    }

    #[test]
    fn test_status_parse_case_insensitive() {
        assert_eq!(TenantStatus::parse("active"), Some(TenantStatus::Active));
        assert_eq!(TenantStatus::parse("INACTIVE"), Some(TenantStatus::Inactive));
        assert_eq!(TenantStatus::parse("Suspended"), Some(TenantStatus::Suspended));
        assert_eq!(TenantStatus::parse("archived"), None);
    }

    #[test]
    fn test_status_round_trip() {
        for status in [
            TenantStatus::Active,
            TenantStatus::Inactive,
            TenantStatus::Suspended,
        ] {
            assert_eq!(TenantStatus::parse(status.as_str()), Some(status));
        }
    }

    #[test]
    fn test_apply_changes_bumps_version_and_audit() {
        let mut tenant = sample_tenant();
        let before = tenant.updated_at;
        let now = before + chrono::Duration::seconds(5);

        tenant.apply_changes(
            TenantChanges {
                name: "Acme Holdings".to_string(),
                description: Some("Renamed".to_string()),
                email: None,
                phone: None,
                address: None,
                status: TenantStatus::Inactive,
                updated_by: "editor".to_string(),
            },
            now,
        );

        assert_eq!(tenant.version, 1);
        assert_eq!(tenant.name, "Acme Holdings");
        assert_eq!(tenant.status, TenantStatus::Inactive);
        assert_eq!(tenant.updated_by, "editor");
        assert_eq!(tenant.updated_at, now);
        // code and creation audit are immutable
        assert_eq!(tenant.code, "ACME");
        assert_eq!(tenant.created_by, "tester");
    }

    #[test]
    fn test_soft_delete_marks_record() {
        let mut tenant = sample_tenant();
        assert!(!tenant.is_deleted());
        tenant.soft_delete(Utc::now());
        assert!(tenant.is_deleted());
    }
}
