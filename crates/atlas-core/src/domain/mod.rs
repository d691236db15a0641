//! Domain entities for the tenant registry.

pub mod tenant;

pub use tenant::{CreateTenant, NewTenant, Tenant, TenantChanges, TenantPatch, TenantStatus};
