//! PostgreSQL User repository

use std::collections::HashSet;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use tracing::{error, info};
use uuid::Uuid;

use fleetops_core::domain::{Principal, Role, User, UserDetail};
use fleetops_core::error::DomainError;
use fleetops_core::repositories::{ListQuery, UserRepository};

pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Internal row types for SQLx mapping
#[derive(Debug, FromRow)]
struct UserRow {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub created_by: Option<Uuid>,
    pub updated_at: Option<DateTime<Utc>>,
    pub updated_by: Option<Uuid>,
}

#[derive(Debug, FromRow)]
struct RoleRow {
    pub id: Uuid,
    pub name: String,
    pub display_name: Option<String>,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub created_by: Option<Uuid>,
    pub updated_at: Option<DateTime<Utc>>,
    pub updated_by: Option<Uuid>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: row.id,
            name: row.name,
            email: row.email,
            phone: row.phone,
            password_hash: row.password_hash,
            created_at: row.created_at,
            created_by: row.created_by,
            updated_at: row.updated_at,
            updated_by: row.updated_by,
        }
    }
}

impl From<RoleRow> for Role {
    fn from(row: RoleRow) -> Self {
        Role {
            id: row.id,
            name: row.name,
            display_name: row.display_name,
            description: row.description,
            created_at: row.created_at,
            created_by: row.created_by,
            updated_at: row.updated_at,
            updated_by: row.updated_by,
        }
    }
}

const COLUMNS: &str = "id, name, email, phone, password_hash, \
                       created_at, created_by, updated_at, updated_by";

fn db_error(context: &str, e: sqlx::Error) -> DomainError {
    error!("Database error {}: {}", context, e);
    DomainError::DatabaseError(e.to_string())
}

impl PgUserRepository {
    async fn roles_of(&self, user_id: &Uuid) -> Result<Vec<Role>, DomainError> {
        let rows: Vec<RoleRow> = sqlx::query_as(
            "SELECT r.id, r.name, r.display_name, r.description, \
                    r.created_at, r.created_by, r.updated_at, r.updated_by \
             FROM roles r \
             JOIN role_user ru ON ru.role_id = r.id \
             WHERE ru.user_id = $1 \
             ORDER BY r.name",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("loading user roles", e))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn list(&self, query: &ListQuery) -> Result<(Vec<User>, u64), DomainError> {
        let pattern = query.search.as_ref().map(|s| format!("%{}%", s));

        let total: i64 = match &pattern {
            Some(pattern) => {
                sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE name ILIKE $1 OR email ILIKE $1")
                    .bind(pattern)
                    .fetch_one(&self.pool)
                    .await
            }
            None => {
                sqlx::query_scalar("SELECT COUNT(*) FROM users")
                    .fetch_one(&self.pool)
                    .await
            }
        }
        .map_err(|e| db_error("counting users", e))?;

        let rows: Vec<UserRow> = match &pattern {
            Some(pattern) => {
                sqlx::query_as(&format!(
                    "SELECT {COLUMNS} FROM users \
                     WHERE name ILIKE $1 OR email ILIKE $1 \
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
                    "SELECT {COLUMNS} FROM users ORDER BY created_at DESC LIMIT $1 OFFSET $2"
                ))
                .bind(query.pagination.limit())
                .bind(query.pagination.offset())
                .fetch_all(&self.pool)
                .await
            }
        }
        .map_err(|e| db_error("listing users", e))?;

        Ok((rows.into_iter().map(Into::into).collect(), total as u64))
    }

    async fn find_by_id(&self, id: &Uuid) -> Result<Option<User>, DomainError> {
        let row: Option<UserRow> =
            sqlx::query_as(&format!("SELECT {COLUMNS} FROM users WHERE id = $1"))
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| db_error("finding user by id", e))?;

        Ok(row.map(|r| r.into()))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let row: Option<UserRow> = sqlx::query_as(&format!(
            "SELECT {COLUMNS} FROM users WHERE LOWER(email) = LOWER($1)"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("finding user by email", e))?;

        Ok(row.map(|r| r.into()))
    }

    async fn find_detail(&self, id: &Uuid) -> Result<Option<UserDetail>, DomainError> {
        let Some(user) = self.find_by_id(id).await? else {
            return Ok(None);
        };
        let roles = self.roles_of(id).await?;
        Ok(Some(UserDetail { user, roles }))
    }

    async fn find_principal(&self, id: &Uuid) -> Result<Option<Principal>, DomainError> {
        let Some(user) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        let names: Vec<String> = sqlx::query_scalar(
            "SELECT DISTINCT p.name FROM permissions p \
             JOIN permission_role pr ON pr.permission_id = p.id \
             JOIN role_user ru ON ru.role_id = pr.role_id \
             WHERE ru.user_id = $1",
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("loading principal permissions", e))?;

        Ok(Some(Principal {
            id: user.id,
            name: user.name,
            email: user.email,
            permissions: names.into_iter().collect::<HashSet<_>>(),
        }))
    }

    async fn create(&self, user: &User, role_ids: &[Uuid]) -> Result<UserDetail, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| db_error("starting transaction", e))?;

        let row: UserRow = sqlx::query_as(&format!(
            "INSERT INTO users \
                 (id, name, email, phone, password_hash, \
                  created_at, created_by, updated_at, updated_by) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
             RETURNING {COLUMNS}"
        ))
        .bind(user.id)
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.phone)
        .bind(&user.password_hash)
        .bind(user.created_at)
        .bind(user.created_by)
        .bind(user.updated_at)
        .bind(user.updated_by)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            let msg = e.to_string();
            if msg.contains("unique") || msg.contains("duplicate") {
                DomainError::EmailAlreadyExists(user.email.clone())
            } else {
                db_error("creating user", e)
            }
        })?;

        if !role_ids.is_empty() {
            sqlx::query(
                "INSERT INTO role_user (role_id, user_id) \
                 SELECT rid, $1 FROM UNNEST($2::uuid[]) AS rid",
            )
            .bind(user.id)
            .bind(role_ids)
            .execute(&mut *tx)
            .await
            .map_err(|e| db_error("assigning user roles", e))?;
        }

        tx.commit()
            .await
            .map_err(|e| db_error("committing user create", e))?;

        info!("User created: {}", row.id);
        let roles = self.roles_of(&row.id).await?;
        Ok(UserDetail {
            user: row.into(),
            roles,
        })
    }

    async fn update<'a>(
        &self,
        user: &User,
        role_ids: Option<&'a [Uuid]>,
    ) -> Result<UserDetail, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| db_error("starting transaction", e))?;

        let row: UserRow = sqlx::query_as(&format!(
            "UPDATE users SET \
                 name = $2, email = $3, phone = $4, password_hash = $5, \
                 updated_at = $6, updated_by = $7 \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        ))
        .bind(user.id)
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.phone)
        .bind(&user.password_hash)
        .bind(user.updated_at)
        .bind(user.updated_by)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| db_error("updating user", e))?;

        if let Some(role_ids) = role_ids {
            sqlx::query("DELETE FROM role_user WHERE user_id = $1")
                .bind(user.id)
                .execute(&mut *tx)
                .await
                .map_err(|e| db_error("detaching user roles", e))?;

            if !role_ids.is_empty() {
                sqlx::query(
                    "INSERT INTO role_user (role_id, user_id) \
                     SELECT rid, $1 FROM UNNEST($2::uuid[]) AS rid",
                )
                .bind(user.id)
                .bind(role_ids)
                .execute(&mut *tx)
                .await
                .map_err(|e| db_error("assigning user roles", e))?;
            }
        }

        tx.commit()
            .await
            .map_err(|e| db_error("committing user update", e))?;

        let roles = self.roles_of(&row.id).await?;
        Ok(UserDetail {
            user: row.into(),
            roles,
        })
    }

    async fn delete(&self, id: &Uuid) -> Result<(), DomainError> {
        sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("deleting user", e))?;

        Ok(())
    }
}
