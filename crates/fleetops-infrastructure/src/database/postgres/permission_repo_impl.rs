//! PostgreSQL Permission repository

use async_trait::async_trait;
use sqlx::{FromRow, PgPool};
use tracing::error;
use uuid::Uuid;

use fleetops_core::domain::Permission;
use fleetops_core::error::DomainError;
use fleetops_core::repositories::PermissionRepository;

pub struct PgPermissionRepository {
    pool: PgPool,
}

impl PgPermissionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct PermissionRow {
    pub id: Uuid,
    pub name: String,
}

#[async_trait]
impl PermissionRepository for PgPermissionRepository {
    async fn list_all(&self) -> Result<Vec<Permission>, DomainError> {
        let rows: Vec<PermissionRow> =
            sqlx::query_as("SELECT id, name FROM permissions ORDER BY name")
                .fetch_all(&self.pool)
                .await
                .map_err(|e: sqlx::Error| {
                    error!("Database error listing permissions: {}", e);
                    DomainError::DatabaseError(e.to_string())
                })?;

        Ok(rows
            .into_iter()
            .map(|row| Permission {
                id: row.id,
                name: row.name,
            })
            .collect())
    }
}
