//! Income HTTP handlers
//!
//! Create and update accept multipart form-data so a receipt file can ride
//! along with the fields.

use std::collections::HashMap;

use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};
use chrono::NaiveDate;
use uuid::Uuid;

use fleetops_core::domain::{CreateIncome, PaymentType, Principal, UpdateIncome};
use fleetops_core::error::DomainError;
use fleetops_core::repositories::{AttachmentUpload, ListQuery};

use crate::{dto::PageQuery, error::ApiError, response::ApiResponse, state::AppState};

/// GET /api/v1/incomes
pub async fn list_incomes(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Query(query): Query<PageQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let query: ListQuery = query.into();
    let (items, meta) = state.income_service.list(&principal, &query).await?;
    Ok(Json(ApiResponse::paginated(items, meta)))
}

/// GET /api/v1/incomes/{id}
pub async fn get_income(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let income = state.income_service.get(&principal, &id).await?;
    Ok(Json(ApiResponse::success(income)))
}

/// POST /api/v1/incomes (multipart form-data)
pub async fn create_income(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    multipart: Multipart,
) -> Result<impl IntoResponse, ApiError> {
    let (fields, upload) = read_form(multipart).await?;
    let payload = parse_create(&fields)?;
    let created = state
        .income_service
        .create(&principal, payload, upload)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success_with_message(
            created,
            "Income created successfully.",
        )),
    ))
}

/// PUT /api/v1/incomes/{id} (multipart form-data)
pub async fn update_income(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<Uuid>,
    multipart: Multipart,
) -> Result<impl IntoResponse, ApiError> {
    let (fields, upload) = read_form(multipart).await?;
    let payload = parse_update(&fields)?;
    let updated = state
        .income_service
        .update(&principal, &id, payload, upload)
        .await?;
    Ok(Json(ApiResponse::success_with_message(
        updated,
        "Income updated successfully.",
    )))
}

/// DELETE /api/v1/incomes/{id}
pub async fn delete_income(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    state.income_service.delete(&principal, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}

const ATTACHMENT_FIELD: &str = "attachment";

/// Splits a multipart body into text fields and the optional attachment.
/// Empty text values are treated as absent, matching form semantics.
async fn read_form(
    mut multipart: Multipart,
) -> Result<(HashMap<String, String>, Option<AttachmentUpload>), ApiError> {
    let mut fields = HashMap::new();
    let mut upload = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| DomainError::invalid_field("body", "malformed multipart body"))?
    {
        let name = field.name().unwrap_or_default().to_string();
        if name == ATTACHMENT_FIELD {
            let file_name = field.file_name().unwrap_or(ATTACHMENT_FIELD).to_string();
            let bytes = field
                .bytes()
                .await
                .map_err(|_| {
                    DomainError::invalid_field(ATTACHMENT_FIELD, "could not read uploaded file")
                })?
                .to_vec();
            if !bytes.is_empty() {
                upload = Some(AttachmentUpload { file_name, bytes });
            }
        } else {
            let value = field
                .text()
                .await
                .map_err(|_| DomainError::invalid_field(&name, "could not read field"))?;
            if !value.is_empty() {
                fields.insert(name, value);
            }
        }
    }

    Ok((fields, upload))
}

fn parse_create(fields: &HashMap<String, String>) -> Result<CreateIncome, ApiError> {
    Ok(CreateIncome {
        order_id: required(fields, "order_id", parse_uuid)?,
        amount: required(fields, "amount", parse_f64)?,
        received_date: required(fields, "received_date", parse_date)?,
        bank_id: required(fields, "bank_id", parse_uuid)?,
        account_number: required(fields, "account_number", |_, v| Ok(v.to_string()))?,
        payment_type: optional(fields, "payment_type", parse_payment_type)?,
        remark: fields.get("remark").cloned(),
    })
}

fn parse_update(fields: &HashMap<String, String>) -> Result<UpdateIncome, ApiError> {
    Ok(UpdateIncome {
        order_id: optional(fields, "order_id", parse_uuid)?,
        amount: optional(fields, "amount", parse_f64)?,
        received_date: optional(fields, "received_date", parse_date)?,
        bank_id: optional(fields, "bank_id", parse_uuid)?,
        account_number: fields.get("account_number").cloned(),
        payment_type: optional(fields, "payment_type", parse_payment_type)?,
        remark: fields.get("remark").cloned(),
    })
}

fn required<T>(
    fields: &HashMap<String, String>,
    key: &str,
    parse: fn(&str, &str) -> Result<T, DomainError>,
) -> Result<T, ApiError> {
    let value = fields
        .get(key)
        .ok_or_else(|| DomainError::invalid_field(key, "is required"))?;
    Ok(parse(key, value)?)
}

fn optional<T>(
    fields: &HashMap<String, String>,
    key: &str,
    parse: fn(&str, &str) -> Result<T, DomainError>,
) -> Result<Option<T>, ApiError> {
    fields
        .get(key)
        .map(|value| parse(key, value))
        .transpose()
        .map_err(Into::into)
}

fn parse_uuid(key: &str, value: &str) -> Result<Uuid, DomainError> {
    Uuid::parse_str(value).map_err(|_| DomainError::invalid_field(key, "must be a valid id"))
}

fn parse_f64(key: &str, value: &str) -> Result<f64, DomainError> {
    value
        .parse()
        .map_err(|_| DomainError::invalid_field(key, "must be a number"))
}

fn parse_date(key: &str, value: &str) -> Result<NaiveDate, DomainError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| DomainError::invalid_field(key, "must be a date (YYYY-MM-DD)"))
}

fn parse_payment_type(key: &str, value: &str) -> Result<PaymentType, DomainError> {
    PaymentType::from_str(value).ok_or_else(|| {
        DomainError::invalid_field(key, "must be cash, credit_card, bank_transfer, or other")
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn create_requires_order_and_bank() {
        let err = parse_create(&fields(&[("amount", "10.5")])).unwrap_err();
        assert!(matches!(
            err,
            ApiError::Domain(DomainError::Validation(_))
        ));
    }

    #[test]
    fn create_parses_a_full_form() {
        let order_id = Uuid::new_v4();
        let bank_id = Uuid::new_v4();
        let order = order_id.to_string();
        let bank = bank_id.to_string();
        let payload = parse_create(&fields(&[
            ("order_id", order.as_str()),
            ("amount", "250.75"),
            ("received_date", "2024-06-01"),
            ("bank_id", bank.as_str()),
            ("account_number", "0001-0002"),
            ("payment_type", "bank_transfer"),
        ]))
        .unwrap();

        assert_eq!(payload.order_id, order_id);
        assert_eq!(payload.bank_id, bank_id);
        assert_eq!(payload.amount, 250.75);
        assert_eq!(payload.payment_type, Some(PaymentType::BankTransfer));
    }

    #[test]
    fn update_accepts_partial_forms() {
        let payload = parse_update(&fields(&[("amount", "99")])).unwrap();
        assert_eq!(payload.amount, Some(99.0));
        assert!(payload.order_id.is_none());
        assert!(payload.account_number.is_none());
    }

    #[test]
    fn bad_payment_type_is_a_field_error() {
        let err = parse_update(&fields(&[("payment_type", "barter")])).unwrap_err();
        match err {
            ApiError::Domain(DomainError::Validation(errors)) => {
                assert!(errors.contains_key("payment_type"))
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }
}
