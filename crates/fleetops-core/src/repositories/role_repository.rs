//! Role repository trait (port)

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Role, RoleDetail};
use crate::error::DomainError;

use super::ListQuery;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RoleRepository: Send + Sync {
    async fn list(&self, query: &ListQuery) -> Result<(Vec<Role>, u64), DomainError>;
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Role>, DomainError>;
    async fn find_by_name(&self, name: &str) -> Result<Option<Role>, DomainError>;
    async fn find_detail(&self, id: &Uuid) -> Result<Option<RoleDetail>, DomainError>;

    /// Persists the role and attaches the given permission set.
    async fn create(&self, role: &Role, permission_ids: &[Uuid]) -> Result<RoleDetail, DomainError>;

    /// Updates the role; when `permission_ids` is given, the attached
    /// permission set is replaced wholesale.
    async fn update<'a>(
        &self,
        role: &Role,
        permission_ids: Option<&'a [Uuid]>,
    ) -> Result<RoleDetail, DomainError>;

    /// Removes the role; user and permission assignments go with it.
    async fn delete(&self, id: &Uuid) -> Result<(), DomainError>;
}
