//! Domain errors

use std::collections::BTreeMap;
use thiserror::Error;
use validator::ValidationErrors;

/// Field-keyed validation messages, serialized into the response envelope.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Validation failed")]
    Validation(FieldErrors),

    #[error("Email already exists: {0}")]
    EmailAlreadyExists(String),

    #[error("{entity} name already exists: {name}")]
    NameAlreadyExists { entity: &'static str, name: String },

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("{entity} is still referenced by existing {referencing}")]
    Conflict {
        entity: &'static str,
        referencing: &'static str,
    },

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Token generation error: {0}")]
    TokenGenerationError(String),

    #[error("Password hash error: {0}")]
    PasswordHashError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    /// Validation failure for a single field.
    pub fn invalid_field(field: &str, message: &str) -> Self {
        let mut errors = FieldErrors::new();
        errors.insert(field.to_string(), vec![message.to_string()]);
        Self::Validation(errors)
    }
}

impl From<ValidationErrors> for DomainError {
    fn from(errors: ValidationErrors) -> Self {
        let mut fields = FieldErrors::new();
        for (field, errs) in errors.field_errors() {
            let messages = errs
                .iter()
                .map(|e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("{} is invalid", field))
                })
                .collect();
            fields.insert(field.to_string(), messages);
        }
        Self::Validation(fields)
    }
}
