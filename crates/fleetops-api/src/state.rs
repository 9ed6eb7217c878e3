use std::sync::Arc;

use fleetops_core::services::{
    AuthService, BankService, EmployeeService, IncomeService, LoadTypeService, OrderService,
    RoleService, UserService,
};

#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<AuthService>,
    pub employee_service: Arc<EmployeeService>,
    pub income_service: Arc<IncomeService>,
    pub order_service: Arc<OrderService>,
    pub bank_service: Arc<BankService>,
    pub load_type_service: Arc<LoadTypeService>,
    pub role_service: Arc<RoleService>,
    pub user_service: Arc<UserService>,
}
