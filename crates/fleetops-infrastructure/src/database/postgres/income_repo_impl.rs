//! PostgreSQL Income repository

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{FromRow, PgPool};
use tracing::{error, info};
use uuid::Uuid;

use fleetops_core::domain::{Income, PaymentType};
use fleetops_core::error::DomainError;
use fleetops_core::repositories::{IncomeRepository, ListQuery};

pub struct PgIncomeRepository {
    pool: PgPool,
}

impl PgIncomeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Internal row type for SQLx mapping
#[derive(Debug, FromRow)]
struct IncomeRow {
    pub id: Uuid,
    pub order_id: Uuid,
    pub amount: f64,
    pub received_date: NaiveDate,
    pub bank_id: Uuid,
    pub account_number: String,
    pub payment_type: Option<String>,
    pub remark: Option<String>,
    pub attachment: Option<String>,
    pub created_at: DateTime<Utc>,
    pub created_by: Option<Uuid>,
    pub updated_at: Option<DateTime<Utc>>,
    pub updated_by: Option<Uuid>,
}

impl From<IncomeRow> for Income {
    fn from(row: IncomeRow) -> Self {
        Income {
            id: row.id,
            order_id: row.order_id,
            amount: row.amount,
            received_date: row.received_date,
            bank_id: row.bank_id,
            account_number: row.account_number,
            payment_type: row.payment_type.as_deref().and_then(PaymentType::from_str),
            remark: row.remark,
            attachment: row.attachment,
            created_at: row.created_at,
            created_by: row.created_by,
            updated_at: row.updated_at,
            updated_by: row.updated_by,
        }
    }
}

const COLUMNS: &str = "id, order_id, amount, received_date, bank_id, account_number, \
                       payment_type, remark, attachment, \
                       created_at, created_by, updated_at, updated_by";

#[async_trait]
impl IncomeRepository for PgIncomeRepository {
    async fn list(&self, query: &ListQuery) -> Result<(Vec<Income>, u64), DomainError> {
        let pattern = query.search.as_ref().map(|s| format!("%{}%", s));

        let total: i64 = match &pattern {
            Some(pattern) => sqlx::query_scalar(
                "SELECT COUNT(*) FROM incomes \
                 WHERE account_number ILIKE $1 OR remark ILIKE $1",
            )
            .bind(pattern)
            .fetch_one(&self.pool)
            .await,
            None => {
                sqlx::query_scalar("SELECT COUNT(*) FROM incomes")
                    .fetch_one(&self.pool)
                    .await
            }
        }
        .map_err(|e: sqlx::Error| {
            error!("Database error counting incomes: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        let rows: Vec<IncomeRow> = match &pattern {
            Some(pattern) => {
                sqlx::query_as(&format!(
                    "SELECT {COLUMNS} FROM incomes \
                     WHERE account_number ILIKE $1 OR remark ILIKE $1 \
                     ORDER BY received_date DESC, created_at DESC LIMIT $2 OFFSET $3"
                ))
                .bind(pattern)
                .bind(query.pagination.limit())
                .bind(query.pagination.offset())
                .fetch_all(&self.pool)
                .await
            }
            None => {
                sqlx::query_as(&format!(
                    "SELECT {COLUMNS} FROM incomes \
                     ORDER BY received_date DESC, created_at DESC LIMIT $1 OFFSET $2"
                ))
                .bind(query.pagination.limit())
                .bind(query.pagination.offset())
                .fetch_all(&self.pool)
                .await
            }
        }
        .map_err(|e: sqlx::Error| {
            error!("Database error listing incomes: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok((rows.into_iter().map(Into::into).collect(), total as u64))
    }

    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Income>, DomainError> {
        let row: Option<IncomeRow> =
            sqlx::query_as(&format!("SELECT {COLUMNS} FROM incomes WHERE id = $1"))
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e: sqlx::Error| {
                    error!("Database error finding income by id: {}", e);
                    DomainError::DatabaseError(e.to_string())
                })?;

        Ok(row.map(|r| r.into()))
    }

    async fn create(&self, income: &Income) -> Result<Income, DomainError> {
        let row: IncomeRow = sqlx::query_as(&format!(
            "INSERT INTO incomes \
                 (id, order_id, amount, received_date, bank_id, account_number, \
                  payment_type, remark, attachment, \
                  created_at, created_by, updated_at, updated_by) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13) \
             RETURNING {COLUMNS}"
        ))
        .bind(income.id)
        .bind(income.order_id)
        .bind(income.amount)
        .bind(income.received_date)
        .bind(income.bank_id)
        .bind(&income.account_number)
        .bind(income.payment_type.map(|p| p.as_str()))
        .bind(&income.remark)
        .bind(&income.attachment)
        .bind(income.created_at)
        .bind(income.created_by)
        .bind(income.updated_at)
        .bind(income.updated_by)
        .fetch_one(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error creating income: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        info!("Income created: {}", row.id);
        Ok(row.into())
    }

    async fn update(&self, income: &Income) -> Result<Income, DomainError> {
        let row: IncomeRow = sqlx::query_as(&format!(
            "UPDATE incomes SET \
                 order_id = $2, amount = $3, received_date = $4, bank_id = $5, \
                 account_number = $6, payment_type = $7, remark = $8, attachment = $9, \
                 updated_at = $10, updated_by = $11 \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        ))
        .bind(income.id)
        .bind(income.order_id)
        .bind(income.amount)
        .bind(income.received_date)
        .bind(income.bank_id)
        .bind(&income.account_number)
        .bind(income.payment_type.map(|p| p.as_str()))
        .bind(&income.remark)
        .bind(&income.attachment)
        .bind(income.updated_at)
        .bind(income.updated_by)
        .fetch_one(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error updating income: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(row.into())
    }

    async fn delete(&self, id: &Uuid) -> Result<(), DomainError> {
        sqlx::query("DELETE FROM incomes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e: sqlx::Error| {
                error!("Database error deleting income: {}", e);
                DomainError::DatabaseError(e.to_string())
            })?;

        Ok(())
    }

    async fn count_by_bank(&self, bank_id: &Uuid) -> Result<u64, DomainError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM incomes WHERE bank_id = $1")
            .bind(bank_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e: sqlx::Error| {
                error!("Database error counting incomes by bank: {}", e);
                DomainError::DatabaseError(e.to_string())
            })?;

        Ok(count as u64)
    }

    async fn count_by_order(&self, order_id: &Uuid) -> Result<u64, DomainError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM incomes WHERE order_id = $1")
            .bind(order_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e: sqlx::Error| {
                error!("Database error counting incomes by order: {}", e);
                DomainError::DatabaseError(e.to_string())
            })?;

        Ok(count as u64)
    }
}
