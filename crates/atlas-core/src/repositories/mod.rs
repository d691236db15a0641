//! Store traits (ports)

pub mod tenant_store;

pub use tenant_store::{Page, SearchQuery, SortDirection, SortField, TenantStore};

#[cfg(test)]
pub use tenant_store::MockTenantStore;
