// ============================================================================
// Atlas Infrastructure - PostgreSQL Tenant Store
// File: crates/atlas-infrastructure/src/database/postgres/tenant_store_impl.rs
// ============================================================================

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use tracing::{error, info};
use uuid::Uuid;

use atlas_core::domain::{NewTenant, Tenant, TenantChanges, TenantStatus};
use atlas_core::error::TenantError;
use atlas_core::repositories::{Page, SearchQuery, SortDirection, TenantStore};

const TENANT_COLUMNS: &str = "id, code, name, description, email, phone, address, status, \
     created_at, updated_at, deleted_at, created_by, updated_by, version";

pub struct PgTenantStore {
    pool: PgPool,
}

impl PgTenantStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Internal row type for SQLx mapping
#[derive(Debug, FromRow)]
struct TenantRow {
    pub id: Uuid,
    pub code: String,
    pub name: String,
    pub description: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
    pub created_by: String,
    pub updated_by: String,
    pub version: i64,
}

impl From<TenantRow> for Tenant {
    fn from(row: TenantRow) -> Self {
        Tenant {
            id: row.id,
            code: row.code,
            name: row.name,
            description: row.description,
            email: row.email,
            phone: row.phone,
            address: row.address,
            status: TenantStatus::parse(&row.status).unwrap_or_default(),
            created_at: row.created_at,
            updated_at: row.updated_at,
            deleted_at: row.deleted_at,
            created_by: row.created_by,
            updated_by: row.updated_by,
            version: row.version,
        }
    }
}

fn db_err(context: &str, e: sqlx::Error) -> TenantError {
    error!("Database error {}: {}", context, e);
    TenantError::Database(e.to_string())
}

// Search terms are literal substrings; '%', '_' and the escape character
// itself must not act as ILIKE wildcards.
fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[async_trait]
impl TenantStore for PgTenantStore {
    async fn insert(&self, tenant: NewTenant) -> Result<Tenant, TenantError> {
        info!("Inserting tenant with code: {}", tenant.code);

        let now = Utc::now();
        let row: TenantRow = sqlx::query_as(&format!(
            r#"
            INSERT INTO tenants (
                id, code, name, description, email, phone, address, status,
                created_at, updated_at, deleted_at, created_by, updated_by, version
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, NULL, $11, $12, 0)
            RETURNING {TENANT_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(&tenant.code)
        .bind(&tenant.name)
        .bind(&tenant.description)
        .bind(&tenant.email)
        .bind(&tenant.phone)
        .bind(&tenant.address)
        .bind(tenant.status.as_str())
        .bind(now)
        .bind(now)
        .bind(&tenant.created_by)
        .bind(&tenant.updated_by)
        .fetch_one(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            // The partial unique index on live codes turns a concurrent
            // same-code insert into a unique violation here.
            if e.as_database_error()
                .is_some_and(|db| db.is_unique_violation())
            {
                TenantError::DuplicateCode(tenant.code.clone())
            } else {
                db_err("inserting tenant", e)
            }
        })?;

        info!("Tenant inserted successfully: {}", row.id);
        Ok(row.into())
    }

    async fn get_by_id(&self, id: &Uuid) -> Result<Option<Tenant>, TenantError> {
        let row: Option<TenantRow> = sqlx::query_as(&format!(
            r#"
            SELECT {TENANT_COLUMNS}
            FROM tenants
            WHERE id = $1 AND deleted_at IS NULL
            "#
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_err("finding tenant by id", e))?;

        Ok(row.map(|r| r.into()))
    }

    async fn get_by_code(&self, code: &str) -> Result<Option<Tenant>, TenantError> {
        let row: Option<TenantRow> = sqlx::query_as(&format!(
            r#"
            SELECT {TENANT_COLUMNS}
            FROM tenants
            WHERE code = $1 AND deleted_at IS NULL
            "#
        ))
        .bind(code)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_err("finding tenant by code", e))?;

        Ok(row.map(|r| r.into()))
    }

    async fn exists_by_code(&self, code: &str) -> Result<bool, TenantError> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM tenants WHERE code = $1 AND deleted_at IS NULL)",
        )
        .bind(code)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_err("checking tenant code", e))?;

        Ok(exists)
    }

    async fn update(
        &self,
        id: &Uuid,
        expected_version: i64,
        changes: TenantChanges,
    ) -> Result<Tenant, TenantError> {
        // Version check and mutation in one statement; zero rows means the
        // record is gone, deleted, or was written by someone else first.
        let row: Option<TenantRow> = sqlx::query_as(&format!(
            r#"
            UPDATE tenants
            SET
                name = $3,
                description = $4,
                email = $5,
                phone = $6,
                address = $7,
                status = $8,
                updated_by = $9,
                updated_at = $10,
                version = version + 1
            WHERE id = $1 AND deleted_at IS NULL AND version = $2
            RETURNING {TENANT_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(expected_version)
        .bind(&changes.name)
        .bind(&changes.description)
        .bind(&changes.email)
        .bind(&changes.phone)
        .bind(&changes.address)
        .bind(changes.status.as_str())
        .bind(&changes.updated_by)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_err("updating tenant", e))?;

        match row {
            Some(row) => Ok(row.into()),
            None => {
                let actual: Option<i64> = sqlx::query_scalar(
                    "SELECT version FROM tenants WHERE id = $1 AND deleted_at IS NULL",
                )
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| db_err("re-reading tenant version", e))?;

                match actual {
                    Some(actual) => Err(TenantError::VersionConflict {
                        expected: expected_version,
                        actual,
                    }),
                    None => Err(TenantError::NotFound),
                }
            }
        }
    }

    async fn soft_delete(&self, id: &Uuid) -> Result<(), TenantError> {
        let result = sqlx::query(
            "UPDATE tenants SET deleted_at = $2 WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(|e| db_err("deleting tenant", e))?;

        if result.rows_affected() == 0 {
            return Err(TenantError::NotFound);
        }
        Ok(())
    }

    async fn search(&self, query: SearchQuery) -> Result<Page<Tenant>, TenantError> {
        let term = query
            .term
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(escape_like);
        let status = query.status.map(|s| s.as_str());

        let filter = r#"
            deleted_at IS NULL
            AND ($1::text IS NULL
                 OR name ILIKE '%' || $1 || '%' ESCAPE '\'
                 OR code ILIKE '%' || $1 || '%' ESCAPE '\')
            AND ($2::text IS NULL OR status = $2)
        "#;

        // Count and page must agree, so both statements share one repeatable
        // read transaction and see the same snapshot.
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| db_err("starting search transaction", e))?;
        sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ")
            .execute(&mut *tx)
            .await
            .map_err(|e| db_err("setting search isolation", e))?;

        let total_count: i64 =
            sqlx::query_scalar(&format!("SELECT COUNT(*) FROM tenants WHERE {filter}"))
                .bind(&term)
                .bind(status)
                .fetch_one(&mut *tx)
                .await
                .map_err(|e| db_err("counting tenants", e))?;

        // Sort key comes from the closed SortField enum, never from caller
        // input, so interpolating the column name is safe.
        let order = match query.direction {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        };
        let rows: Vec<TenantRow> = sqlx::query_as(&format!(
            r#"
            SELECT {TENANT_COLUMNS}
            FROM tenants
            WHERE {filter}
            ORDER BY {column} {order}, id ASC
            LIMIT $3 OFFSET $4
            "#,
            column = query.sort_by.as_column(),
        ))
        .bind(&term)
        .bind(status)
        .bind(query.size as i64)
        .bind(query.page as i64 * query.size as i64)
        .fetch_all(&mut *tx)
        .await
        .map_err(|e| db_err("searching tenants", e))?;

        tx.commit()
            .await
            .map_err(|e| db_err("committing search transaction", e))?;

        Ok(Page {
            items: rows.into_iter().map(|r| r.into()).collect(),
            total_count: total_count as u64,
            page: query.page,
            size: query.size,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_like_neutralizes_wildcards() {
        assert_eq!(escape_like("100% pure"), "100\\% pure");
        assert_eq!(escape_like("a_b"), "a\\_b");
        assert_eq!(escape_like(r"back\slash"), r"back\\slash");
        assert_eq!(escape_like("plain"), "plain");
    }
}
