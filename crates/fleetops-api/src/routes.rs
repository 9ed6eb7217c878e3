//! API routes

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
    Router,
};

use crate::{
    handlers::{auth, banks, employees, health, incomes, load_types, orders, roles, users},
    middleware::auth_middleware,
    state::AppState,
};

// Multipart income bodies: 2 MiB attachment plus fields and headroom.
const MAX_BODY_BYTES: usize = 4 * 1024 * 1024;

/// Create the router for the FleetOps API
pub fn create_router(state: AppState) -> Router {
    let protected = Router::new()
        .route("/auth/logout", post(auth::logout))
        .route("/auth/profile", get(auth::profile))
        .route(
            "/employees",
            get(employees::list_employees).post(employees::create_employee),
        )
        .route(
            "/employees/{id}",
            get(employees::get_employee)
                .put(employees::update_employee)
                .delete(employees::delete_employee),
        )
        .route(
            "/incomes",
            get(incomes::list_incomes).post(incomes::create_income),
        )
        .route(
            "/incomes/{id}",
            get(incomes::get_income)
                .put(incomes::update_income)
                .delete(incomes::delete_income),
        )
        .route("/orders", get(orders::list_orders).post(orders::create_order))
        .route(
            "/orders/{id}",
            get(orders::get_order)
                .put(orders::update_order)
                .delete(orders::delete_order),
        )
        .route("/banks", get(banks::list_banks).post(banks::create_bank))
        .route(
            "/banks/{id}",
            get(banks::get_bank)
                .put(banks::update_bank)
                .delete(banks::delete_bank),
        )
        .route(
            "/load-types",
            get(load_types::list_load_types).post(load_types::create_load_type),
        )
        .route(
            "/load-types/{id}",
            get(load_types::get_load_type)
                .put(load_types::update_load_type)
                .delete(load_types::delete_load_type),
        )
        .route("/roles", get(roles::list_roles).post(roles::create_role))
        .route(
            "/roles/{id}",
            get(roles::get_role)
                .put(roles::update_role)
                .delete(roles::delete_role),
        )
        .route("/permissions", get(roles::list_permissions))
        .route("/users", get(users::list_users).post(users::create_user))
        .route(
            "/users/{id}",
            get(users::get_user)
                .put(users::update_user)
                .delete(users::delete_user),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let api = Router::new()
        .route("/auth/login", post(auth::login))
        .merge(protected);

    Router::new()
        .route("/health", get(health::health_check))
        .nest("/api/v1", api)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .with_state(state)
}
