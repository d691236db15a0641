//! Domain errors

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TenantError {
    #[error("Tenant not found")]
    NotFound,

    #[error("Tenant with code '{0}' already exists")]
    DuplicateCode(String),

    #[error("Version conflict: expected {expected}, found {actual}")]
    VersionConflict { expected: i64, actual: i64 },

    #[error("Invalid sort field: {0}")]
    InvalidSortField(String),

    #[error("Database error: {0}")]
    Database(String),
}
