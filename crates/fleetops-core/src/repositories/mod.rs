//! Repository traits (ports)

pub mod attachment_store;
pub mod bank_repository;
pub mod employee_repository;
pub mod income_repository;
pub mod load_type_repository;
pub mod order_repository;
pub mod permission_repository;
pub mod role_repository;
pub mod user_repository;

pub use attachment_store::{AttachmentStore, AttachmentUpload, StagedAttachment};
pub use bank_repository::BankRepository;
pub use employee_repository::EmployeeRepository;
pub use income_repository::IncomeRepository;
pub use load_type_repository::LoadTypeRepository;
pub use order_repository::OrderRepository;
pub use permission_repository::PermissionRepository;
pub use role_repository::RoleRepository;
pub use user_repository::UserRepository;

use fleetops_shared::types::Pagination;

/// Page selection plus optional free-text search for list operations.
#[derive(Debug, Clone, Default)]
pub struct ListQuery {
    pub pagination: Pagination,
    pub search: Option<String>,
}

impl ListQuery {
    pub fn new(pagination: Pagination, search: Option<String>) -> Self {
        // Treat a blank search box as no filter.
        let search = search.filter(|s| !s.trim().is_empty());
        Self { pagination, search }
    }
}
