//! HTTP handlers

pub mod auth;
pub mod banks;
pub mod employees;
pub mod health;
pub mod incomes;
pub mod load_types;
pub mod orders;
pub mod roles;
pub mod users;
