//! Income repository trait (port)

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::Income;
use crate::error::DomainError;

use super::ListQuery;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IncomeRepository: Send + Sync {
    async fn list(&self, query: &ListQuery) -> Result<(Vec<Income>, u64), DomainError>;
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Income>, DomainError>;
    async fn create(&self, income: &Income) -> Result<Income, DomainError>;
    async fn update(&self, income: &Income) -> Result<Income, DomainError>;
    async fn delete(&self, id: &Uuid) -> Result<(), DomainError>;

    /// Incomes referencing the given bank; used for restrict-on-delete.
    async fn count_by_bank(&self, bank_id: &Uuid) -> Result<u64, DomainError>;

    /// Incomes referencing the given order; used for restrict-on-delete.
    async fn count_by_order(&self, order_id: &Uuid) -> Result<u64, DomainError>;
}
