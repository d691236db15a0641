//! # Atlas Core
//!
//! Domain entities, the tenant store port, and the registry service for the
//! Atlas tenant registry.

pub mod domain;
pub mod error;
pub mod repositories;
pub mod services;

// Re-export domain entities
pub use domain::*;
pub use error::TenantError;
