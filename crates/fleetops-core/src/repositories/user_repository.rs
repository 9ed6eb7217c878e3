//! User repository trait (port)

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Principal, User, UserDetail};
use crate::error::DomainError;

use super::ListQuery;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn list(&self, query: &ListQuery) -> Result<(Vec<User>, u64), DomainError>;
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<User>, DomainError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;
    async fn find_detail(&self, id: &Uuid) -> Result<Option<UserDetail>, DomainError>;

    /// User identity plus the permission union across all held roles.
    async fn find_principal(&self, id: &Uuid) -> Result<Option<Principal>, DomainError>;

    /// Persists the user and assigns the given roles.
    async fn create(&self, user: &User, role_ids: &[Uuid]) -> Result<UserDetail, DomainError>;

    /// Updates the user; when `role_ids` is given, the role assignment is
    /// replaced wholesale.
    async fn update<'a>(
        &self,
        user: &User,
        role_ids: Option<&'a [Uuid]>,
    ) -> Result<UserDetail, DomainError>;

    async fn delete(&self, id: &Uuid) -> Result<(), DomainError>;
}
