//! PostgreSQL LoadType repository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use tracing::{error, info};
use uuid::Uuid;

use fleetops_core::domain::LoadType;
use fleetops_core::error::DomainError;
use fleetops_core::repositories::{ListQuery, LoadTypeRepository};

pub struct PgLoadTypeRepository {
    pool: PgPool,
}

impl PgLoadTypeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Internal row type for SQLx mapping
#[derive(Debug, FromRow)]
struct LoadTypeRow {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub created_by: Option<Uuid>,
    pub updated_at: Option<DateTime<Utc>>,
    pub updated_by: Option<Uuid>,
}

impl From<LoadTypeRow> for LoadType {
    fn from(row: LoadTypeRow) -> Self {
        LoadType {
            id: row.id,
            name: row.name,
            created_at: row.created_at,
            created_by: row.created_by,
            updated_at: row.updated_at,
            updated_by: row.updated_by,
        }
    }
}

const COLUMNS: &str = "id, name, created_at, created_by, updated_at, updated_by";

#[async_trait]
impl LoadTypeRepository for PgLoadTypeRepository {
    async fn list(&self, query: &ListQuery) -> Result<(Vec<LoadType>, u64), DomainError> {
        let pattern = query.search.as_ref().map(|s| format!("%{}%", s));

        let total: i64 = match &pattern {
            Some(pattern) => {
                sqlx::query_scalar("SELECT COUNT(*) FROM load_types WHERE name ILIKE $1")
                    .bind(pattern)
                    .fetch_one(&self.pool)
                    .await
            }
            None => {
                sqlx::query_scalar("SELECT COUNT(*) FROM load_types")
                    .fetch_one(&self.pool)
                    .await
            }
        }
        .map_err(|e: sqlx::Error| {
            error!("Database error counting load types: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        let rows: Vec<LoadTypeRow> = match &pattern {
            Some(pattern) => {
                sqlx::query_as(&format!(
                    "SELECT {COLUMNS} FROM load_types WHERE name ILIKE $1 \
                     ORDER BY name LIMIT $2 OFFSET $3"
                ))
                .bind(pattern)
                .bind(query.pagination.limit())
                .bind(query.pagination.offset())
                .fetch_all(&self.pool)
                .await
            }
            None => {
                sqlx::query_as(&format!(
                    "SELECT {COLUMNS} FROM load_types ORDER BY name LIMIT $1 OFFSET $2"
                ))
                .bind(query.pagination.limit())
                .bind(query.pagination.offset())
                .fetch_all(&self.pool)
                .await
            }
        }
        .map_err(|e: sqlx::Error| {
            error!("Database error listing load types: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok((rows.into_iter().map(Into::into).collect(), total as u64))
    }

    async fn find_by_id(&self, id: &Uuid) -> Result<Option<LoadType>, DomainError> {
        let row: Option<LoadTypeRow> =
            sqlx::query_as(&format!("SELECT {COLUMNS} FROM load_types WHERE id = $1"))
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e: sqlx::Error| {
                    error!("Database error finding load type by id: {}", e);
                    DomainError::DatabaseError(e.to_string())
                })?;

        Ok(row.map(|r| r.into()))
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<LoadType>, DomainError> {
        let row: Option<LoadTypeRow> = sqlx::query_as(&format!(
            "SELECT {COLUMNS} FROM load_types WHERE LOWER(name) = LOWER($1)"
        ))
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error finding load type by name: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(row.map(|r| r.into()))
    }

    async fn create(&self, load_type: &LoadType) -> Result<LoadType, DomainError> {
        let row: LoadTypeRow = sqlx::query_as(&format!(
            "INSERT INTO load_types (id, name, created_at, created_by, updated_at, updated_by) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {COLUMNS}"
        ))
        .bind(load_type.id)
        .bind(&load_type.name)
        .bind(load_type.created_at)
        .bind(load_type.created_by)
        .bind(load_type.updated_at)
        .bind(load_type.updated_by)
        .fetch_one(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error creating load type: {}", e);
            let msg = e.to_string();
            if msg.contains("unique") || msg.contains("duplicate") {
                DomainError::NameAlreadyExists {
                    entity: "LoadType",
                    name: load_type.name.clone(),
                }
            } else {
                DomainError::DatabaseError(msg)
            }
        })?;

        info!("LoadType created: {}", row.id);
        Ok(row.into())
    }

    async fn update(&self, load_type: &LoadType) -> Result<LoadType, DomainError> {
        let row: LoadTypeRow = sqlx::query_as(&format!(
            "UPDATE load_types SET name = $2, updated_at = $3, updated_by = $4 \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        ))
        .bind(load_type.id)
        .bind(&load_type.name)
        .bind(load_type.updated_at)
        .bind(load_type.updated_by)
        .fetch_one(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error updating load type: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(row.into())
    }

    async fn delete(&self, id: &Uuid) -> Result<(), DomainError> {
        sqlx::query("DELETE FROM load_types WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e: sqlx::Error| {
                error!("Database error deleting load type: {}", e);
                DomainError::DatabaseError(e.to_string())
            })?;

        Ok(())
    }
}
