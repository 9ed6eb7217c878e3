//! Role and permission HTTP handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};
use uuid::Uuid;

use fleetops_core::domain::{CreateRole, Principal, UpdateRole};
use fleetops_core::repositories::ListQuery;

use crate::{dto::PageQuery, error::ApiError, response::ApiResponse, state::AppState};

/// GET /api/v1/roles
pub async fn list_roles(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Query(query): Query<PageQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let query: ListQuery = query.into();
    let (items, meta) = state.role_service.list(&principal, &query).await?;
    Ok(Json(ApiResponse::paginated(items, meta)))
}

/// GET /api/v1/roles/{id}
pub async fn get_role(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let role = state.role_service.get(&principal, &id).await?;
    Ok(Json(ApiResponse::success(role)))
}

/// GET /api/v1/permissions — the seeded catalogue, for role forms.
pub async fn list_permissions(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
) -> Result<impl IntoResponse, ApiError> {
    let permissions = state.role_service.list_permissions(&principal).await?;
    Ok(Json(ApiResponse::success(permissions)))
}

/// POST /api/v1/roles
pub async fn create_role(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Json(payload): Json<CreateRole>,
) -> Result<impl IntoResponse, ApiError> {
    let created = state.role_service.create(&principal, payload).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success_with_message(
            created,
            "Role created successfully.",
        )),
    ))
}

/// PUT /api/v1/roles/{id}
pub async fn update_role(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateRole>,
) -> Result<impl IntoResponse, ApiError> {
    let updated = state.role_service.update(&principal, &id, payload).await?;
    Ok(Json(ApiResponse::success_with_message(
        updated,
        "Role updated successfully.",
    )))
}

/// DELETE /api/v1/roles/{id}
pub async fn delete_role(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    state.role_service.delete(&principal, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}
