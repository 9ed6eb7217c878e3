//! Permission entity and the flat capability catalogue

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Atomic capability. The catalogue is seeded by migration and read-only at
/// runtime; matching is exact-string membership, no hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permission {
    pub id: Uuid,
    pub name: String,
}

/// Permission name constants, one `view/create/update/delete` quad per
/// resource.
pub mod names {
    pub const EMPLOYEE_VIEW: &str = "employee.view";
    pub const EMPLOYEE_CREATE: &str = "employee.create";
    pub const EMPLOYEE_UPDATE: &str = "employee.update";
    pub const EMPLOYEE_DELETE: &str = "employee.delete";

    pub const INCOME_VIEW: &str = "income.view";
    pub const INCOME_CREATE: &str = "income.create";
    pub const INCOME_UPDATE: &str = "income.update";
    pub const INCOME_DELETE: &str = "income.delete";

    pub const ORDER_VIEW: &str = "order.view";
    pub const ORDER_CREATE: &str = "order.create";
    pub const ORDER_UPDATE: &str = "order.update";
    pub const ORDER_DELETE: &str = "order.delete";

    pub const BANK_VIEW: &str = "bank.view";
    pub const BANK_CREATE: &str = "bank.create";
    pub const BANK_UPDATE: &str = "bank.update";
    pub const BANK_DELETE: &str = "bank.delete";

    pub const LOAD_TYPE_VIEW: &str = "load_type.view";
    pub const LOAD_TYPE_CREATE: &str = "load_type.create";
    pub const LOAD_TYPE_UPDATE: &str = "load_type.update";
    pub const LOAD_TYPE_DELETE: &str = "load_type.delete";

    pub const ROLE_VIEW: &str = "role.view";
    pub const ROLE_CREATE: &str = "role.create";
    pub const ROLE_UPDATE: &str = "role.update";
    pub const ROLE_DELETE: &str = "role.delete";

    pub const USER_VIEW: &str = "user.view";
    pub const USER_CREATE: &str = "user.create";
    pub const USER_UPDATE: &str = "user.update";
    pub const USER_DELETE: &str = "user.delete";

    pub const ALL: &[&str] = &[
        EMPLOYEE_VIEW,
        EMPLOYEE_CREATE,
        EMPLOYEE_UPDATE,
        EMPLOYEE_DELETE,
        INCOME_VIEW,
        INCOME_CREATE,
        INCOME_UPDATE,
        INCOME_DELETE,
        ORDER_VIEW,
        ORDER_CREATE,
        ORDER_UPDATE,
        ORDER_DELETE,
        BANK_VIEW,
        BANK_CREATE,
        BANK_UPDATE,
        BANK_DELETE,
        LOAD_TYPE_VIEW,
        LOAD_TYPE_CREATE,
        LOAD_TYPE_UPDATE,
        LOAD_TYPE_DELETE,
        ROLE_VIEW,
        ROLE_CREATE,
        ROLE_UPDATE,
        ROLE_DELETE,
        USER_VIEW,
        USER_CREATE,
        USER_UPDATE,
        USER_DELETE,
    ];
}
