//! PostgreSQL Employee repository

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{FromRow, PgPool};
use tracing::{error, info};
use uuid::Uuid;

use fleetops_core::domain::{Employee, EmployeeType};
use fleetops_core::error::DomainError;
use fleetops_core::repositories::{EmployeeRepository, ListQuery};

pub struct PgEmployeeRepository {
    pool: PgPool,
}

impl PgEmployeeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Internal row type for SQLx mapping
#[derive(Debug, FromRow)]
struct EmployeeRow {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub employee_type: String,
    pub hire_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub created_by: Option<Uuid>,
    pub updated_at: Option<DateTime<Utc>>,
    pub updated_by: Option<Uuid>,
}

impl From<EmployeeRow> for Employee {
    fn from(row: EmployeeRow) -> Self {
        Employee {
            id: row.id,
            first_name: row.first_name,
            last_name: row.last_name,
            email: row.email,
            phone: row.phone,
            employee_type: EmployeeType::from_str(&row.employee_type)
                .unwrap_or(EmployeeType::Stuff),
            hire_date: row.hire_date,
            created_at: row.created_at,
            created_by: row.created_by,
            updated_at: row.updated_at,
            updated_by: row.updated_by,
        }
    }
}

const COLUMNS: &str = "id, first_name, last_name, email, phone, type AS employee_type, \
                       hire_date, created_at, created_by, updated_at, updated_by";

#[async_trait]
impl EmployeeRepository for PgEmployeeRepository {
    async fn list(&self, query: &ListQuery) -> Result<(Vec<Employee>, u64), DomainError> {
        let pattern = query.search.as_ref().map(|s| format!("%{}%", s));

        let total: i64 = match &pattern {
            Some(pattern) => sqlx::query_scalar(
                "SELECT COUNT(*) FROM employees \
                 WHERE first_name ILIKE $1 OR last_name ILIKE $1 OR email ILIKE $1",
            )
            .bind(pattern)
            .fetch_one(&self.pool)
            .await,
            None => {
                sqlx::query_scalar("SELECT COUNT(*) FROM employees")
                    .fetch_one(&self.pool)
                    .await
            }
        }
        .map_err(|e: sqlx::Error| {
            error!("Database error counting employees: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        let rows: Vec<EmployeeRow> = match &pattern {
            Some(pattern) => {
                sqlx::query_as(&format!(
                    "SELECT {COLUMNS} FROM employees \
                     WHERE first_name ILIKE $1 OR last_name ILIKE $1 OR email ILIKE $1 \
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
                    "SELECT {COLUMNS} FROM employees \
                     ORDER BY created_at DESC LIMIT $1 OFFSET $2"
                ))
                .bind(query.pagination.limit())
                .bind(query.pagination.offset())
                .fetch_all(&self.pool)
                .await
            }
        }
        .map_err(|e: sqlx::Error| {
            error!("Database error listing employees: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok((rows.into_iter().map(Into::into).collect(), total as u64))
    }

    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Employee>, DomainError> {
        let row: Option<EmployeeRow> =
            sqlx::query_as(&format!("SELECT {COLUMNS} FROM employees WHERE id = $1"))
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e: sqlx::Error| {
                    error!("Database error finding employee by id: {}", e);
                    DomainError::DatabaseError(e.to_string())
                })?;

        Ok(row.map(|r| r.into()))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Employee>, DomainError> {
        let row: Option<EmployeeRow> = sqlx::query_as(&format!(
            "SELECT {COLUMNS} FROM employees WHERE LOWER(email) = LOWER($1)"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error finding employee by email: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(row.map(|r| r.into()))
    }

    async fn create(&self, employee: &Employee) -> Result<Employee, DomainError> {
        let row: EmployeeRow = sqlx::query_as(&format!(
            "INSERT INTO employees \
                 (id, first_name, last_name, email, phone, type, hire_date, \
                  created_at, created_by, updated_at, updated_by) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) \
             RETURNING {COLUMNS}"
        ))
        .bind(employee.id)
        .bind(&employee.first_name)
        .bind(&employee.last_name)
        .bind(&employee.email)
        .bind(&employee.phone)
        .bind(employee.employee_type.as_str())
        .bind(employee.hire_date)
        .bind(employee.created_at)
        .bind(employee.created_by)
        .bind(employee.updated_at)
        .bind(employee.updated_by)
        .fetch_one(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error creating employee: {}", e);
            let msg = e.to_string();
            if msg.contains("unique") || msg.contains("duplicate") {
                DomainError::EmailAlreadyExists(employee.email.clone())
            } else {
                DomainError::DatabaseError(msg)
            }
        })?;

        info!("Employee created: {}", row.id);
        Ok(row.into())
    }

    async fn update(&self, employee: &Employee) -> Result<Employee, DomainError> {
        let row: EmployeeRow = sqlx::query_as(&format!(
            "UPDATE employees SET \
                 first_name = $2, last_name = $3, email = $4, phone = $5, \
                 type = $6, hire_date = $7, updated_at = $8, updated_by = $9 \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        ))
        .bind(employee.id)
        .bind(&employee.first_name)
        .bind(&employee.last_name)
        .bind(&employee.email)
        .bind(&employee.phone)
        .bind(employee.employee_type.as_str())
        .bind(employee.hire_date)
        .bind(employee.updated_at)
        .bind(employee.updated_by)
        .fetch_one(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error updating employee: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(row.into())
    }

    async fn delete(&self, id: &Uuid) -> Result<(), DomainError> {
        sqlx::query("DELETE FROM employees WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e: sqlx::Error| {
                error!("Database error deleting employee: {}", e);
                DomainError::DatabaseError(e.to_string())
            })?;

        Ok(())
    }
}
