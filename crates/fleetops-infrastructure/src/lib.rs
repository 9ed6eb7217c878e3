//! # FleetOps Infrastructure
//!
//! Database and blob-store implementations (adapters).

pub mod database;
pub mod storage;

pub use database::{
    create_pool, PgBankRepository, PgEmployeeRepository, PgIncomeRepository,
    PgLoadTypeRepository, PgOrderRepository, PgPermissionRepository, PgRoleRepository,
    PgUserRepository,
};
pub use storage::FsAttachmentStore;
