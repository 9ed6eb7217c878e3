//! Load type repository trait (port)

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::LoadType;
use crate::error::DomainError;

use super::ListQuery;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoadTypeRepository: Send + Sync {
    async fn list(&self, query: &ListQuery) -> Result<(Vec<LoadType>, u64), DomainError>;
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<LoadType>, DomainError>;
    async fn find_by_name(&self, name: &str) -> Result<Option<LoadType>, DomainError>;
    async fn create(&self, load_type: &LoadType) -> Result<LoadType, DomainError>;
    async fn update(&self, load_type: &LoadType) -> Result<LoadType, DomainError>;
    async fn delete(&self, id: &Uuid) -> Result<(), DomainError>;
}
