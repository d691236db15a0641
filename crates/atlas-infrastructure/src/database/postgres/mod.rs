pub mod tenant_store_impl;

pub use tenant_store_impl::PgTenantStore;
