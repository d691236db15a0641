//! Domain services (business logic)

pub mod tenant_registry;

pub use tenant_registry::{SearchCriteria, TenantRegistry};
