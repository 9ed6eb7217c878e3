//! Load type HTTP handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};
use uuid::Uuid;

use fleetops_core::domain::{CreateLoadType, Principal, UpdateLoadType};
use fleetops_core::repositories::ListQuery;

use crate::{dto::PageQuery, error::ApiError, response::ApiResponse, state::AppState};

/// GET /api/v1/load-types
pub async fn list_load_types(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Query(query): Query<PageQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let query: ListQuery = query.into();
    let (items, meta) = state.load_type_service.list(&principal, &query).await?;
    Ok(Json(ApiResponse::paginated(items, meta)))
}

/// GET /api/v1/load-types/{id}
pub async fn get_load_type(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let load_type = state.load_type_service.get(&principal, &id).await?;
    Ok(Json(ApiResponse::success(load_type)))
}

/// POST /api/v1/load-types
pub async fn create_load_type(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Json(payload): Json<CreateLoadType>,
) -> Result<impl IntoResponse, ApiError> {
    let created = state.load_type_service.create(&principal, payload).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success_with_message(
            created,
            "Load type created successfully.",
        )),
    ))
}

/// PUT /api/v1/load-types/{id}
pub async fn update_load_type(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateLoadType>,
) -> Result<impl IntoResponse, ApiError> {
    let updated = state
        .load_type_service
        .update(&principal, &id, payload)
        .await?;
    Ok(Json(ApiResponse::success_with_message(
        updated,
        "Load type updated successfully.",
    )))
}

/// DELETE /api/v1/load-types/{id}
pub async fn delete_load_type(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    state.load_type_service.delete(&principal, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}
