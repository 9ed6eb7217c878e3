//! PostgreSQL Bank repository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use tracing::{error, info};
use uuid::Uuid;

use fleetops_core::domain::Bank;
use fleetops_core::error::DomainError;
use fleetops_core::repositories::{BankRepository, ListQuery};

pub struct PgBankRepository {
    pool: PgPool,
}

impl PgBankRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Internal row type for SQLx mapping
#[derive(Debug, FromRow)]
struct BankRow {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub created_by: Option<Uuid>,
    pub updated_at: Option<DateTime<Utc>>,
    pub updated_by: Option<Uuid>,
}

impl From<BankRow> for Bank {
    fn from(row: BankRow) -> Self {
        Bank {
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
impl BankRepository for PgBankRepository {
    async fn list(&self, query: &ListQuery) -> Result<(Vec<Bank>, u64), DomainError> {
        let pattern = query.search.as_ref().map(|s| format!("%{}%", s));

        let total: i64 = match &pattern {
            Some(pattern) => {
                sqlx::query_scalar("SELECT COUNT(*) FROM banks WHERE name ILIKE $1")
                    .bind(pattern)
                    .fetch_one(&self.pool)
                    .await
            }
            None => {
                sqlx::query_scalar("SELECT COUNT(*) FROM banks")
                    .fetch_one(&self.pool)
                    .await
            }
        }
        .map_err(|e: sqlx::Error| {
            error!("Database error counting banks: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        let rows: Vec<BankRow> = match &pattern {
            Some(pattern) => {
                sqlx::query_as(&format!(
                    "SELECT {COLUMNS} FROM banks WHERE name ILIKE $1 \
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
                    "SELECT {COLUMNS} FROM banks ORDER BY name LIMIT $1 OFFSET $2"
                ))
                .bind(query.pagination.limit())
                .bind(query.pagination.offset())
                .fetch_all(&self.pool)
                .await
            }
        }
        .map_err(|e: sqlx::Error| {
            error!("Database error listing banks: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok((rows.into_iter().map(Into::into).collect(), total as u64))
    }

    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Bank>, DomainError> {
        let row: Option<BankRow> =
            sqlx::query_as(&format!("SELECT {COLUMNS} FROM banks WHERE id = $1"))
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e: sqlx::Error| {
                    error!("Database error finding bank by id: {}", e);
                    DomainError::DatabaseError(e.to_string())
                })?;

        Ok(row.map(|r| r.into()))
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Bank>, DomainError> {
        let row: Option<BankRow> = sqlx::query_as(&format!(
            "SELECT {COLUMNS} FROM banks WHERE LOWER(name) = LOWER($1)"
        ))
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error finding bank by name: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(row.map(|r| r.into()))
    }

    async fn create(&self, bank: &Bank) -> Result<Bank, DomainError> {
        let row: BankRow = sqlx::query_as(&format!(
            "INSERT INTO banks (id, name, created_at, created_by, updated_at, updated_by) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {COLUMNS}"
        ))
        .bind(bank.id)
        .bind(&bank.name)
        .bind(bank.created_at)
        .bind(bank.created_by)
        .bind(bank.updated_at)
        .bind(bank.updated_by)
        .fetch_one(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error creating bank: {}", e);
            let msg = e.to_string();
            if msg.contains("unique") || msg.contains("duplicate") {
                DomainError::NameAlreadyExists {
                    entity: "Bank",
                    name: bank.name.clone(),
                }
            } else {
                DomainError::DatabaseError(msg)
            }
        })?;

        info!("Bank created: {}", row.id);
        Ok(row.into())
    }

    async fn update(&self, bank: &Bank) -> Result<Bank, DomainError> {
        let row: BankRow = sqlx::query_as(&format!(
            "UPDATE banks SET name = $2, updated_at = $3, updated_by = $4 \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        ))
        .bind(bank.id)
        .bind(&bank.name)
        .bind(bank.updated_at)
        .bind(bank.updated_by)
        .fetch_one(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error updating bank: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(row.into())
    }

    async fn delete(&self, id: &Uuid) -> Result<(), DomainError> {
        sqlx::query("DELETE FROM banks WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e: sqlx::Error| {
                error!("Database error deleting bank: {}", e);
                let msg = e.to_string();
                if msg.contains("foreign key") {
                    DomainError::Conflict {
                        entity: "Bank",
                        referencing: "incomes",
                    }
                } else {
                    DomainError::DatabaseError(msg)
                }
            })?;

        Ok(())
    }
}
