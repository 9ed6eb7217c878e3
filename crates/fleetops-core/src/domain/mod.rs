//! Domain entities for the FleetOps back-office.

pub mod bank;
pub mod employee;
pub mod income;
pub mod load_type;
pub mod order;
pub mod permission;
pub mod role;
pub mod user;

// Re-export all entities and enums
pub use bank::{Bank, CreateBank, UpdateBank};
pub use employee::{CreateEmployee, Employee, EmployeeType, UpdateEmployee};
pub use income::{CreateIncome, Income, PaymentType, UpdateIncome};
pub use load_type::{CreateLoadType, LoadType, UpdateLoadType};
pub use order::{CreateOrder, Order, OrderStatus, UpdateOrder};
pub use permission::Permission;
pub use role::{CreateRole, Role, RoleDetail, UpdateRole};
pub use user::{CreateUser, Principal, UpdateUser, User, UserDetail};
