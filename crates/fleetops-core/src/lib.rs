//! # FleetOps Core
//!
//! Domain entities, resource services, access gate, and repository traits
//! for the FleetOps back-office.

pub mod domain;
pub mod error;
pub mod repositories;
pub mod services;

pub use domain::*;
pub use error::DomainError;
