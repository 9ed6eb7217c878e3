//! PostgreSQL repository implementations

pub mod bank_repo_impl;
pub mod employee_repo_impl;
pub mod income_repo_impl;
pub mod load_type_repo_impl;
pub mod order_repo_impl;
pub mod permission_repo_impl;
pub mod role_repo_impl;
pub mod user_repo_impl;

pub use bank_repo_impl::PgBankRepository;
pub use employee_repo_impl::PgEmployeeRepository;
pub use income_repo_impl::PgIncomeRepository;
pub use load_type_repo_impl::PgLoadTypeRepository;
pub use order_repo_impl::PgOrderRepository;
pub use permission_repo_impl::PgPermissionRepository;
pub use role_repo_impl::PgRoleRepository;
pub use user_repo_impl::PgUserRepository;
