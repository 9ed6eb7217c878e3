//! Client-side errors

use thiserror::Error;

use fleetops_core::error::FieldErrors;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-2xx response, message extracted from the envelope when present.
    #[error("{message}")]
    Api {
        status: u16,
        message: String,
        errors: Option<FieldErrors>,
    },

    #[error("Unexpected API response format")]
    UnexpectedFormat,

    #[error("Not authenticated")]
    Unauthenticated,
}
