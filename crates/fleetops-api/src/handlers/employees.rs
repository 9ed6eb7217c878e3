//! Employee HTTP handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};
use uuid::Uuid;

use fleetops_core::domain::{CreateEmployee, Principal, UpdateEmployee};
use fleetops_core::repositories::ListQuery;

use crate::{dto::PageQuery, error::ApiError, response::ApiResponse, state::AppState};

/// GET /api/v1/employees
pub async fn list_employees(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Query(query): Query<PageQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let query: ListQuery = query.into();
    let (items, meta) = state.employee_service.list(&principal, &query).await?;
    Ok(Json(ApiResponse::paginated(items, meta)))
}

/// GET /api/v1/employees/{id}
pub async fn get_employee(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let employee = state.employee_service.get(&principal, &id).await?;
    Ok(Json(ApiResponse::success(employee)))
}

/// POST /api/v1/employees
pub async fn create_employee(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Json(payload): Json<CreateEmployee>,
) -> Result<impl IntoResponse, ApiError> {
    let created = state.employee_service.create(&principal, payload).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success_with_message(
            created,
            "Employee created successfully.",
        )),
    ))
}

/// PUT /api/v1/employees/{id}
pub async fn update_employee(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateEmployee>,
) -> Result<impl IntoResponse, ApiError> {
    let updated = state
        .employee_service
        .update(&principal, &id, payload)
        .await?;
    Ok(Json(ApiResponse::success_with_message(
        updated,
        "Employee updated successfully.",
    )))
}

/// DELETE /api/v1/employees/{id}
pub async fn delete_employee(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    state.employee_service.delete(&principal, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}
