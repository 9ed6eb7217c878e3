//! Permission repository trait (port)

use async_trait::async_trait;

use crate::domain::Permission;
use crate::error::DomainError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PermissionRepository: Send + Sync {
    /// The full seeded catalogue; small and unpaginated.
    async fn list_all(&self) -> Result<Vec<Permission>, DomainError>;
}
