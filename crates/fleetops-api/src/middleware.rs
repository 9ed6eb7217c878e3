//! Authentication middleware

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};

use crate::{error::ApiError, state::AppState};

/// Resolves the bearer token into a `Principal` and stores it as a request
/// extension for handlers to pick up.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or(ApiError::Unauthorized)?;

    let principal = state
        .auth_service
        .authenticate(token)
        .await
        .map_err(|_| ApiError::Unauthorized)?;

    request.extensions_mut().insert(principal);
    Ok(next.run(request).await)
}
