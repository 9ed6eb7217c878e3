//! Order repository trait (port)

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::Order;
use crate::error::DomainError;

use super::ListQuery;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OrderRepository: Send + Sync {
    async fn list(&self, query: &ListQuery) -> Result<(Vec<Order>, u64), DomainError>;
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Order>, DomainError>;
    async fn create(&self, order: &Order) -> Result<Order, DomainError>;
    async fn update(&self, order: &Order) -> Result<Order, DomainError>;
    async fn delete(&self, id: &Uuid) -> Result<(), DomainError>;
}
