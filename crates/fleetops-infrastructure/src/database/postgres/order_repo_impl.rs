//! PostgreSQL Order repository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use tracing::{error, info};
use uuid::Uuid;

use fleetops_core::domain::{Order, OrderStatus};
use fleetops_core::error::DomainError;
use fleetops_core::repositories::{ListQuery, OrderRepository};

pub struct PgOrderRepository {
    pool: PgPool,
}

impl PgOrderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Internal row type for SQLx mapping
#[derive(Debug, FromRow)]
struct OrderRow {
    pub id: Uuid,
    pub order_name: String,
    pub amount: f64,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub created_by: Option<Uuid>,
    pub updated_at: Option<DateTime<Utc>>,
    pub updated_by: Option<Uuid>,
}

impl From<OrderRow> for Order {
    fn from(row: OrderRow) -> Self {
        Order {
            id: row.id,
            order_name: row.order_name,
            amount: row.amount,
            status: OrderStatus::from_str(&row.status).unwrap_or_default(),
            created_at: row.created_at,
            created_by: row.created_by,
            updated_at: row.updated_at,
            updated_by: row.updated_by,
        }
    }
}

const COLUMNS: &str = "id, order_name, amount, status, created_at, created_by, \
                       updated_at, updated_by";

#[async_trait]
impl OrderRepository for PgOrderRepository {
    async fn list(&self, query: &ListQuery) -> Result<(Vec<Order>, u64), DomainError> {
        let pattern = query.search.as_ref().map(|s| format!("%{}%", s));

        let total: i64 = match &pattern {
            Some(pattern) => {
                sqlx::query_scalar("SELECT COUNT(*) FROM orders WHERE order_name ILIKE $1")
                    .bind(pattern)
                    .fetch_one(&self.pool)
                    .await
            }
            None => {
                sqlx::query_scalar("SELECT COUNT(*) FROM orders")
                    .fetch_one(&self.pool)
                    .await
            }
        }
        .map_err(|e: sqlx::Error| {
            error!("Database error counting orders: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        let rows: Vec<OrderRow> = match &pattern {
            Some(pattern) => {
                sqlx::query_as(&format!(
                    "SELECT {COLUMNS} FROM orders WHERE order_name ILIKE $1 \
                     ORDER BY created_at DESC LIMIT $2 OFFSET $3"
                ))
                .bind(pattern)
                .bind(query.pagination.limit())
                .bind(query.pagination.offset())
                .fetch_all(&self.pool)
                .await
            }
            None => {
                sqlx::query_as(&format!(
                    "SELECT {COLUMNS} FROM orders ORDER BY created_at DESC LIMIT $1 OFFSET $2"
                ))
                .bind(query.pagination.limit())
                .bind(query.pagination.offset())
                .fetch_all(&self.pool)
                .await
            }
        }
        .map_err(|e: sqlx::Error| {
            error!("Database error listing orders: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok((rows.into_iter().map(Into::into).collect(), total as u64))
    }

    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Order>, DomainError> {
        let row: Option<OrderRow> =
            sqlx::query_as(&format!("SELECT {COLUMNS} FROM orders WHERE id = $1"))
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e: sqlx::Error| {
                    error!("Database error finding order by id: {}", e);
                    DomainError::DatabaseError(e.to_string())
                })?;

        Ok(row.map(|r| r.into()))
    }

    async fn create(&self, order: &Order) -> Result<Order, DomainError> {
        let row: OrderRow = sqlx::query_as(&format!(
            "INSERT INTO orders \
                 (id, order_name, amount, status, created_at, created_by, updated_at, updated_by) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING {COLUMNS}"
        ))
        .bind(order.id)
        .bind(&order.order_name)
        .bind(order.amount)
        .bind(order.status.as_str())
        .bind(order.created_at)
        .bind(order.created_by)
        .bind(order.updated_at)
        .bind(order.updated_by)
        .fetch_one(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error creating order: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        info!("Order created: {}", row.id);
        Ok(row.into())
    }

    async fn update(&self, order: &Order) -> Result<Order, DomainError> {
        let row: OrderRow = sqlx::query_as(&format!(
            "UPDATE orders SET \
                 order_name = $2, amount = $3, status = $4, updated_at = $5, updated_by = $6 \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        ))
        .bind(order.id)
        .bind(&order.order_name)
        .bind(order.amount)
        .bind(order.status.as_str())
        .bind(order.updated_at)
        .bind(order.updated_by)
        .fetch_one(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error updating order: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(row.into())
    }

    async fn delete(&self, id: &Uuid) -> Result<(), DomainError> {
        sqlx::query("DELETE FROM orders WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e: sqlx::Error| {
                error!("Database error deleting order: {}", e);
                let msg = e.to_string();
                if msg.contains("foreign key") {
                    DomainError::Conflict {
                        entity: "Order",
                        referencing: "incomes",
                    }
                } else {
                    DomainError::DatabaseError(msg)
                }
            })?;

        Ok(())
    }
}
