//! PostgreSQL Role repository
//!
//! Role writes span the role row and its permission assignments, so they
//! run inside a transaction.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use tracing::{error, info};
use uuid::Uuid;

use fleetops_core::domain::{Permission, Role, RoleDetail};
use fleetops_core::error::DomainError;
use fleetops_core::repositories::{ListQuery, RoleRepository};

pub struct PgRoleRepository {
    pool: PgPool,
}

impl PgRoleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Internal row types for SQLx mapping
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

#[derive(Debug, FromRow)]
struct PermissionRow {
    pub id: Uuid,
    pub name: String,
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

impl From<PermissionRow> for Permission {
    fn from(row: PermissionRow) -> Self {
        Permission {
            id: row.id,
            name: row.name,
        }
    }
}

const COLUMNS: &str = "id, name, display_name, description, created_at, created_by, \
                       updated_at, updated_by";

fn db_error(context: &str, e: sqlx::Error) -> DomainError {
    error!("Database error {}: {}", context, e);
    DomainError::DatabaseError(e.to_string())
}

impl PgRoleRepository {
    async fn permissions_of(&self, role_id: &Uuid) -> Result<Vec<Permission>, DomainError> {
        let rows: Vec<PermissionRow> = sqlx::query_as(
            "SELECT p.id, p.name FROM permissions p \
             JOIN permission_role pr ON pr.permission_id = p.id \
             WHERE pr.role_id = $1 \
             ORDER BY p.name",
        )
        .bind(role_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("loading role permissions", e))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}

#[async_trait]
impl RoleRepository for PgRoleRepository {
    async fn list(&self, query: &ListQuery) -> Result<(Vec<Role>, u64), DomainError> {
        let pattern = query.search.as_ref().map(|s| format!("%{}%", s));

        let total: i64 = match &pattern {
            Some(pattern) => sqlx::query_scalar(
                "SELECT COUNT(*) FROM roles WHERE name ILIKE $1 OR display_name ILIKE $1",
            )
            .bind(pattern)
            .fetch_one(&self.pool)
            .await,
            None => {
                sqlx::query_scalar("SELECT COUNT(*) FROM roles")
                    .fetch_one(&self.pool)
                    .await
            }
        }
        .map_err(|e| db_error("counting roles", e))?;

        let rows: Vec<RoleRow> = match &pattern {
            Some(pattern) => {
                sqlx::query_as(&format!(
                    "SELECT {COLUMNS} FROM roles \
                     WHERE name ILIKE $1 OR display_name ILIKE $1 \
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
                    "SELECT {COLUMNS} FROM roles ORDER BY name LIMIT $1 OFFSET $2"
                ))
                .bind(query.pagination.limit())
                .bind(query.pagination.offset())
                .fetch_all(&self.pool)
                .await
            }
        }
        .map_err(|e| db_error("listing roles", e))?;

        Ok((rows.into_iter().map(Into::into).collect(), total as u64))
    }

    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Role>, DomainError> {
        let row: Option<RoleRow> =
            sqlx::query_as(&format!("SELECT {COLUMNS} FROM roles WHERE id = $1"))
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| db_error("finding role by id", e))?;

        Ok(row.map(|r| r.into()))
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Role>, DomainError> {
        let row: Option<RoleRow> = sqlx::query_as(&format!(
            "SELECT {COLUMNS} FROM roles WHERE LOWER(name) = LOWER($1)"
        ))
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("finding role by name", e))?;

        Ok(row.map(|r| r.into()))
    }

    async fn find_detail(&self, id: &Uuid) -> Result<Option<RoleDetail>, DomainError> {
        let Some(role) = self.find_by_id(id).await? else {
            return Ok(None);
        };
        let permissions = self.permissions_of(id).await?;
        Ok(Some(RoleDetail { role, permissions }))
    }

    async fn create(
        &self,
        role: &Role,
        permission_ids: &[Uuid],
    ) -> Result<RoleDetail, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| db_error("starting transaction", e))?;

        let row: RoleRow = sqlx::query_as(&format!(
            "INSERT INTO roles \
                 (id, name, display_name, description, created_at, created_by, updated_at, updated_by) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING {COLUMNS}"
        ))
        .bind(role.id)
        .bind(&role.name)
        .bind(&role.display_name)
        .bind(&role.description)
        .bind(role.created_at)
        .bind(role.created_by)
        .bind(role.updated_at)
        .bind(role.updated_by)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            let msg = e.to_string();
            if msg.contains("unique") || msg.contains("duplicate") {
                DomainError::NameAlreadyExists {
                    entity: "Role",
                    name: role.name.clone(),
                }
            } else {
                db_error("creating role", e)
            }
        })?;

        if !permission_ids.is_empty() {
            sqlx::query(
                "INSERT INTO permission_role (permission_id, role_id) \
                 SELECT pid, $1 FROM UNNEST($2::uuid[]) AS pid",
            )
            .bind(role.id)
            .bind(permission_ids)
            .execute(&mut *tx)
            .await
            .map_err(|e| db_error("attaching role permissions", e))?;
        }

        tx.commit()
            .await
            .map_err(|e| db_error("committing role create", e))?;

        info!("Role created: {}", row.id);
        let permissions = self.permissions_of(&row.id).await?;
        Ok(RoleDetail {
            role: row.into(),
            permissions,
        })
    }

    async fn update<'a>(
        &self,
        role: &Role,
        permission_ids: Option<&'a [Uuid]>,
    ) -> Result<RoleDetail, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| db_error("starting transaction", e))?;

        let row: RoleRow = sqlx::query_as(&format!(
            "UPDATE roles SET \
                 name = $2, display_name = $3, description = $4, updated_at = $5, updated_by = $6 \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        ))
        .bind(role.id)
        .bind(&role.name)
        .bind(&role.display_name)
        .bind(&role.description)
        .bind(role.updated_at)
        .bind(role.updated_by)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| db_error("updating role", e))?;

        if let Some(permission_ids) = permission_ids {
            sqlx::query("DELETE FROM permission_role WHERE role_id = $1")
                .bind(role.id)
                .execute(&mut *tx)
                .await
                .map_err(|e| db_error("detaching role permissions", e))?;

            if !permission_ids.is_empty() {
                sqlx::query(
                    "INSERT INTO permission_role (permission_id, role_id) \
                     SELECT pid, $1 FROM UNNEST($2::uuid[]) AS pid",
                )
                .bind(role.id)
                .bind(permission_ids)
                .execute(&mut *tx)
                .await
                .map_err(|e| db_error("attaching role permissions", e))?;
            }
        }

        tx.commit()
            .await
            .map_err(|e| db_error("committing role update", e))?;

        let permissions = self.permissions_of(&row.id).await?;
        Ok(RoleDetail {
            role: row.into(),
            permissions,
        })
    }

    async fn delete(&self, id: &Uuid) -> Result<(), DomainError> {
        // Join rows cascade via the schema.
        sqlx::query("DELETE FROM roles WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("deleting role", e))?;

        Ok(())
    }
}
