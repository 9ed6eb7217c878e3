//! API error type and status mapping

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::error;

use fleetops_core::error::{DomainError, FieldErrors};

use crate::response::ApiResponse;

#[derive(Error, Debug)]
pub enum ApiError {
    /// Missing or invalid bearer token
    #[error("Unauthorized")]
    Unauthorized,

    #[error(transparent)]
    Domain(#[from] DomainError),
}

fn single_field(field: &str, message: &str) -> FieldErrors {
    let mut errors = FieldErrors::new();
    errors.insert(field.to_string(), vec![message.to_string()]);
    errors
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                ApiResponse::failure("Unauthenticated."),
            ),
            ApiError::Domain(e) => match e {
                DomainError::Validation(errors) => (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    ApiResponse::validation("Validation errors", errors),
                ),
                DomainError::EmailAlreadyExists(_) => (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    ApiResponse::validation(
                        "Validation errors",
                        single_field("email", "has already been taken."),
                    ),
                ),
                DomainError::NameAlreadyExists { .. } => (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    ApiResponse::validation(
                        "Validation errors",
                        single_field("name", "has already been taken."),
                    ),
                ),
                DomainError::NotFound { entity, .. } => (
                    StatusCode::NOT_FOUND,
                    ApiResponse::failure(&format!("{entity} not found.")),
                ),
                DomainError::PermissionDenied(_) => (
                    StatusCode::FORBIDDEN,
                    ApiResponse::failure("This action is unauthorized."),
                ),
                DomainError::InvalidCredentials => (
                    StatusCode::UNAUTHORIZED,
                    ApiResponse::failure("Invalid credentials."),
                ),
                DomainError::Conflict { entity, referencing } => (
                    StatusCode::CONFLICT,
                    ApiResponse::failure(&format!(
                        "{entity} is still referenced by existing {referencing}."
                    )),
                ),
                // Internal detail goes to the log, never the body.
                other => {
                    error!("Unhandled domain error: {}", other);
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        ApiResponse::failure("Internal server error."),
                    )
                }
            },
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: ApiError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn domain_errors_map_to_expected_statuses() {
        assert_eq!(status_of(ApiError::Unauthorized), StatusCode::UNAUTHORIZED);
        assert_eq!(
            status_of(DomainError::not_found("Employee", "x").into()),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(DomainError::EmailAlreadyExists("a@b.com".into()).into()),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            status_of(DomainError::invalid_field("amount", "bad").into()),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            status_of(DomainError::PermissionDenied("employee.create".into()).into()),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            status_of(
                DomainError::Conflict {
                    entity: "Bank",
                    referencing: "incomes"
                }
                .into()
            ),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_of(DomainError::DatabaseError("boom".into()).into()),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
