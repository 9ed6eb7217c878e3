//! Bank repository trait (port)

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::Bank;
use crate::error::DomainError;

use super::ListQuery;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BankRepository: Send + Sync {
    async fn list(&self, query: &ListQuery) -> Result<(Vec<Bank>, u64), DomainError>;
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Bank>, DomainError>;
    async fn find_by_name(&self, name: &str) -> Result<Option<Bank>, DomainError>;
    async fn create(&self, bank: &Bank) -> Result<Bank, DomainError>;
    async fn update(&self, bank: &Bank) -> Result<Bank, DomainError>;
    async fn delete(&self, id: &Uuid) -> Result<(), DomainError>;
}
