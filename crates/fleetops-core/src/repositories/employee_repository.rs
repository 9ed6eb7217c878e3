//! Employee repository trait (port)

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::Employee;
use crate::error::DomainError;

use super::ListQuery;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmployeeRepository: Send + Sync {
    async fn list(&self, query: &ListQuery) -> Result<(Vec<Employee>, u64), DomainError>;
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Employee>, DomainError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<Employee>, DomainError>;
    async fn create(&self, employee: &Employee) -> Result<Employee, DomainError>;
    async fn update(&self, employee: &Employee) -> Result<Employee, DomainError>;
    async fn delete(&self, id: &Uuid) -> Result<(), DomainError>;
}
