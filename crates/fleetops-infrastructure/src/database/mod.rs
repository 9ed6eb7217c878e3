//! Database module (PostgreSQL adapters)

pub mod connection;
pub mod postgres;

pub use connection::create_pool;
pub use postgres::{
    PgBankRepository, PgEmployeeRepository, PgIncomeRepository, PgLoadTypeRepository,
    PgOrderRepository, PgPermissionRepository, PgRoleRepository, PgUserRepository,
};
