//! API response envelope
//!
//! Every endpoint answers with the same shape:
//! `{success, data?, meta?, message?, errors?}`.

use serde::Serialize;

use fleetops_core::error::FieldErrors;
use fleetops_shared::types::PageMeta;

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<PageMeta>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<FieldErrors>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            meta: None,
            message: None,
            errors: None,
        }
    }

    pub fn success_with_message(data: T, message: &str) -> Self {
        Self {
            message: Some(message.to_string()),
            ..Self::success(data)
        }
    }

    /// List response with pagination metadata.
    pub fn paginated(data: T, meta: PageMeta) -> Self {
        Self {
            meta: Some(meta),
            ..Self::success(data)
        }
    }
}

impl ApiResponse<()> {
    /// Success acknowledgement with no payload.
    pub fn message(message: &str) -> Self {
        Self {
            success: true,
            data: None,
            meta: None,
            message: Some(message.to_string()),
            errors: None,
        }
    }

    pub fn failure(message: &str) -> Self {
        Self {
            success: false,
            data: None,
            meta: None,
            message: Some(message.to_string()),
            errors: None,
        }
    }

    pub fn validation(message: &str, errors: FieldErrors) -> Self {
        Self {
            success: false,
            data: None,
            meta: None,
            message: Some(message.to_string()),
            errors: Some(errors),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fleetops_shared::types::Pagination;

    #[test]
    fn success_envelope_omits_absent_fields() {
        let value = serde_json::to_value(ApiResponse::success(vec![1, 2, 3])).unwrap();
        assert_eq!(value["success"], true);
        assert_eq!(value["data"], serde_json::json!([1, 2, 3]));
        assert!(value.get("meta").is_none());
        assert!(value.get("message").is_none());
        assert!(value.get("errors").is_none());
    }

    #[test]
    fn paginated_envelope_carries_meta() {
        let meta = PageMeta::new(&Pagination::default(), 30);
        let value = serde_json::to_value(ApiResponse::paginated(vec!["a"], meta)).unwrap();
        assert_eq!(value["meta"]["total"], 30);
        assert_eq!(value["meta"]["last_page"], 2);
        assert_eq!(value["meta"]["current_page"], 1);
    }

    #[test]
    fn validation_envelope_carries_field_errors() {
        let mut errors = FieldErrors::new();
        errors.insert("email".into(), vec!["has already been taken.".into()]);
        let value =
            serde_json::to_value(ApiResponse::validation("Validation errors", errors)).unwrap();
        assert_eq!(value["success"], false);
        assert_eq!(value["errors"]["email"][0], "has already been taken.");
    }
}
