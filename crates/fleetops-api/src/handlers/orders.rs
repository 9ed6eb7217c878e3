//! Order HTTP handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};
use uuid::Uuid;

use fleetops_core::domain::{CreateOrder, Principal, UpdateOrder};
use fleetops_core::repositories::ListQuery;

use crate::{dto::PageQuery, error::ApiError, response::ApiResponse, state::AppState};

/// GET /api/v1/orders
pub async fn list_orders(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Query(query): Query<PageQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let query: ListQuery = query.into();
    let (items, meta) = state.order_service.list(&principal, &query).await?;
    Ok(Json(ApiResponse::paginated(items, meta)))
}

/// GET /api/v1/orders/{id}
pub async fn get_order(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let order = state.order_service.get(&principal, &id).await?;
    Ok(Json(ApiResponse::success(order)))
}

/// POST /api/v1/orders
pub async fn create_order(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Json(payload): Json<CreateOrder>,
) -> Result<impl IntoResponse, ApiError> {
    let created = state.order_service.create(&principal, payload).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success_with_message(
            created,
            "Order created successfully.",
        )),
    ))
}

/// PUT /api/v1/orders/{id}
pub async fn update_order(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateOrder>,
) -> Result<impl IntoResponse, ApiError> {
    let updated = state.order_service.update(&principal, &id, payload).await?;
    Ok(Json(ApiResponse::success_with_message(
        updated,
        "Order updated successfully.",
    )))
}

/// DELETE /api/v1/orders/{id}
pub async fn delete_order(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    state.order_service.delete(&principal, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}
