//! Bank HTTP handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};
use uuid::Uuid;

use fleetops_core::domain::{CreateBank, Principal, UpdateBank};
use fleetops_core::repositories::ListQuery;

use crate::{dto::PageQuery, error::ApiError, response::ApiResponse, state::AppState};

/// GET /api/v1/banks
pub async fn list_banks(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Query(query): Query<PageQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let query: ListQuery = query.into();
    let (items, meta) = state.bank_service.list(&principal, &query).await?;
    Ok(Json(ApiResponse::paginated(items, meta)))
}

/// GET /api/v1/banks/{id}
pub async fn get_bank(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let bank = state.bank_service.get(&principal, &id).await?;
    Ok(Json(ApiResponse::success(bank)))
}

/// POST /api/v1/banks
pub async fn create_bank(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Json(payload): Json<CreateBank>,
) -> Result<impl IntoResponse, ApiError> {
    let created = state.bank_service.create(&principal, payload).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success_with_message(
            created,
            "Bank created successfully.",
        )),
    ))
}

/// PUT /api/v1/banks/{id}
pub async fn update_bank(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateBank>,
) -> Result<impl IntoResponse, ApiError> {
    let updated = state.bank_service.update(&principal, &id, payload).await?;
    Ok(Json(ApiResponse::success_with_message(
        updated,
        "Bank updated successfully.",
    )))
}

/// DELETE /api/v1/banks/{id}
pub async fn delete_bank(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    state.bank_service.delete(&principal, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}
