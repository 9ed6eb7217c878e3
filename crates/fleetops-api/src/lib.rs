//! # FleetOps API
//!
//! HTTP handlers, middleware, DTOs, response envelope, and router.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use response::ApiResponse;
pub use routes::create_router;
pub use state::AppState;
