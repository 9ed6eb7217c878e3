//! User HTTP handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};
use uuid::Uuid;

use fleetops_core::domain::{CreateUser, Principal, UpdateUser};
use fleetops_core::repositories::ListQuery;

use crate::{dto::PageQuery, error::ApiError, response::ApiResponse, state::AppState};

/// GET /api/v1/users
pub async fn list_users(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Query(query): Query<PageQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let query: ListQuery = query.into();
    let (items, meta) = state.user_service.list(&principal, &query).await?;
    Ok(Json(ApiResponse::paginated(items, meta)))
}

/// GET /api/v1/users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let user = state.user_service.get(&principal, &id).await?;
    Ok(Json(ApiResponse::success(user)))
}

/// POST /api/v1/users
pub async fn create_user(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Json(payload): Json<CreateUser>,
) -> Result<impl IntoResponse, ApiError> {
    let created = state.user_service.create(&principal, payload).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success_with_message(
            created,
            "User created successfully.",
        )),
    ))
}

/// PUT /api/v1/users/{id}
pub async fn update_user(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateUser>,
) -> Result<impl IntoResponse, ApiError> {
    let updated = state.user_service.update(&principal, &id, payload).await?;
    Ok(Json(ApiResponse::success_with_message(
        updated,
        "User updated successfully.",
    )))
}

/// DELETE /api/v1/users/{id}
pub async fn delete_user(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    state.user_service.delete(&principal, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}
