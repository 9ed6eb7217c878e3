//! Authentication HTTP handlers (login, logout, profile)

use axum::{extract::State, response::IntoResponse, Extension, Json};
use serde::{Deserialize, Serialize};

use fleetops_core::domain::{Principal, User, UserDetail};

use crate::{error::ApiError, response::ApiResponse, state::AppState};

/// Login request payload
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Login response
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub user: User,
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

/// Session profile consumed by the client permission hook
#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub user: UserDetail,
    pub permissions: Vec<String>,
}

/// Login handler - POST /api/v1/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let result = state
        .auth_service
        .login(&payload.email, &payload.password)
        .await?;

    Ok(Json(ApiResponse::success(LoginResponse {
        user: result.user,
        access_token: result.access_token,
        token_type: "Bearer".to_string(),
        expires_in: result.expires_in,
    })))
}

/// Logout handler - POST /api/v1/auth/logout
///
/// Access tokens are stateless; the client drops its session and the server
/// acknowledges.
pub async fn logout(Extension(_principal): Extension<Principal>) -> impl IntoResponse {
    Json(ApiResponse::message("Logged out successfully."))
}

/// Profile handler - GET /api/v1/auth/profile
pub async fn profile(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
) -> Result<impl IntoResponse, ApiError> {
    let profile = state.auth_service.profile(&principal).await?;

    Ok(Json(ApiResponse::success(ProfileResponse {
        user: profile.user,
        permissions: profile.permissions,
    })))
}
