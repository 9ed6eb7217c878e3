//! Resource services and the access gate

pub mod access_gate;
pub mod auth_service;
pub mod bank_service;
pub mod employee_service;
pub mod income_service;
pub mod load_type_service;
pub mod order_service;
pub mod role_service;
pub mod user_service;

pub use access_gate::AccessGate;
pub use auth_service::{AuthService, LoginResult, ProfileResult};
pub use bank_service::BankService;
pub use employee_service::EmployeeService;
pub use income_service::IncomeService;
pub use load_type_service::LoadTypeService;
pub use order_service::OrderService;
pub use role_service::RoleService;
pub use user_service::UserService;

#[cfg(test)]
pub(crate) mod test_support {
    use std::collections::HashSet;
    use uuid::Uuid;

    use crate::domain::Principal;

    /// A principal holding exactly the given permissions.
    pub fn actor_with(permissions: &[&str]) -> Principal {
        Principal {
            id: Uuid::new_v4(),
            name: "Test Operator".into(),
            email: "operator@example.com".into(),
            permissions: permissions.iter().map(|p| p.to_string()).collect::<HashSet<_>>(),
        }
    }
}
