//! # Atlas Infrastructure
//!
//! Tenant store adapters: PostgreSQL for production, in-memory for tests
//! and local development.

pub mod database;

pub use database::{create_pool, MemTenantStore, PgTenantStore};
