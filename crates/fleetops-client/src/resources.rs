//! Typed resource handles over the REST surface

use std::marker::PhantomData;

use reqwest::multipart::{Form, Part};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use uuid::Uuid;

use fleetops_core::domain::{CreateIncome, Income, UpdateIncome};

use crate::envelope::{normalize_list, Envelope};
use crate::error::ClientError;
use crate::FleetClient;

/// List call parameters: `page`, `per_page`, `search`.
#[derive(Debug, Clone, Default)]
pub struct ListParams {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub search: Option<String>,
}

/// Attachment bytes to ride along with an income form.
#[derive(Debug, Clone)]
pub struct AttachmentFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Turns a response into its JSON body, or an API error with the
/// server-provided message (default string when the body is opaque).
pub(crate) async fn check(response: reqwest::Response) -> Result<Value, ClientError> {
    let status = response.status();
    if status.is_success() {
        if status == reqwest::StatusCode::NO_CONTENT {
            return Ok(Value::Null);
        }
        return Ok(response.json().await?);
    }

    let body: Value = response.json().await.unwrap_or(Value::Null);
    let message = body
        .get("message")
        .and_then(Value::as_str)
        .unwrap_or("An unknown error occurred")
        .to_string();
    let errors = body
        .get("errors")
        .and_then(|errors| serde_json::from_value(errors.clone()).ok());

    Err(ClientError::Api {
        status: status.as_u16(),
        message,
        errors,
    })
}

pub(crate) fn decode_data<D: DeserializeOwned>(body: Value) -> Result<D, ClientError> {
    let data = body
        .get("data")
        .cloned()
        .ok_or(ClientError::UnexpectedFormat)?;
    serde_json::from_value(data).map_err(|_| ClientError::UnexpectedFormat)
}

/// Generic CRUD handle. `T` is the list item type; `D` the detail type
/// returned by get/create/update (differs for roles and users, which carry
/// their assignments in detail responses).
pub struct ResourceClient<'a, T, D = T> {
    client: &'a FleetClient,
    path: &'static str,
    _marker: PhantomData<(T, D)>,
}

impl<'a, T: DeserializeOwned, D: DeserializeOwned> ResourceClient<'a, T, D> {
    pub(crate) fn new(client: &'a FleetClient, path: &'static str) -> Self {
        Self {
            client,
            path,
            _marker: PhantomData,
        }
    }

    pub async fn list(&self, params: &ListParams) -> Result<Envelope<Vec<T>>, ClientError> {
        let mut query: Vec<(&str, String)> = Vec::new();
        if let Some(page) = params.page {
            query.push(("page", page.to_string()));
        }
        if let Some(per_page) = params.per_page {
            query.push(("per_page", per_page.to_string()));
        }
        if let Some(search) = &params.search {
            query.push(("search", search.clone()));
        }

        let response = self
            .client
            .http
            .get(self.client.url(self.path))
            .bearer_auth(self.client.bearer()?)
            .query(&query)
            .send()
            .await?;

        normalize_list(check(response).await?, params.per_page)
    }

    pub async fn get(&self, id: Uuid) -> Result<D, ClientError> {
        let response = self
            .client
            .http
            .get(self.client.url(&format!("{}/{id}", self.path)))
            .bearer_auth(self.client.bearer()?)
            .send()
            .await?;

        decode_data(check(response).await?)
    }

    pub async fn create<P: Serialize>(&self, payload: &P) -> Result<D, ClientError> {
        let response = self
            .client
            .http
            .post(self.client.url(self.path))
            .bearer_auth(self.client.bearer()?)
            .json(payload)
            .send()
            .await?;

        decode_data(check(response).await?)
    }

    pub async fn update<P: Serialize>(&self, id: Uuid, payload: &P) -> Result<D, ClientError> {
        let response = self
            .client
            .http
            .put(self.client.url(&format!("{}/{id}", self.path)))
            .bearer_auth(self.client.bearer()?)
            .json(payload)
            .send()
            .await?;

        decode_data(check(response).await?)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), ClientError> {
        let response = self
            .client
            .http
            .delete(self.client.url(&format!("{}/{id}", self.path)))
            .bearer_auth(self.client.bearer()?)
            .send()
            .await?;

        check(response).await?;
        Ok(())
    }
}

/// Income handle: same CRUD surface, but create/update go out as multipart
/// so an attachment can be included.
pub struct IncomeClient<'a> {
    inner: ResourceClient<'a, Income>,
}

impl<'a> IncomeClient<'a> {
    pub(crate) fn new(client: &'a FleetClient) -> Self {
        Self {
            inner: ResourceClient::new(client, "/incomes"),
        }
    }

    pub async fn list(&self, params: &ListParams) -> Result<Envelope<Vec<Income>>, ClientError> {
        self.inner.list(params).await
    }

    pub async fn get(&self, id: Uuid) -> Result<Income, ClientError> {
        self.inner.get(id).await
    }

    pub async fn create(
        &self,
        payload: &CreateIncome,
        attachment: Option<AttachmentFile>,
    ) -> Result<Income, ClientError> {
        let mut form = Form::new()
            .text("order_id", payload.order_id.to_string())
            .text("amount", payload.amount.to_string())
            .text("received_date", payload.received_date.to_string())
            .text("bank_id", payload.bank_id.to_string())
            .text("account_number", payload.account_number.clone());
        if let Some(payment_type) = payload.payment_type {
            form = form.text("payment_type", payment_type.as_str());
        }
        if let Some(remark) = &payload.remark {
            form = form.text("remark", remark.clone());
        }
        form = attach(form, attachment);

        let response = self
            .inner
            .client
            .http
            .post(self.inner.client.url("/incomes"))
            .bearer_auth(self.inner.client.bearer()?)
            .multipart(form)
            .send()
            .await?;

        decode_data(check(response).await?)
    }

    pub async fn update(
        &self,
        id: Uuid,
        payload: &UpdateIncome,
        attachment: Option<AttachmentFile>,
    ) -> Result<Income, ClientError> {
        let mut form = Form::new();
        if let Some(order_id) = payload.order_id {
            form = form.text("order_id", order_id.to_string());
        }
        if let Some(amount) = payload.amount {
            form = form.text("amount", amount.to_string());
        }
        if let Some(received_date) = payload.received_date {
            form = form.text("received_date", received_date.to_string());
        }
        if let Some(bank_id) = payload.bank_id {
            form = form.text("bank_id", bank_id.to_string());
        }
        if let Some(account_number) = &payload.account_number {
            form = form.text("account_number", account_number.clone());
        }
        if let Some(payment_type) = payload.payment_type {
            form = form.text("payment_type", payment_type.as_str());
        }
        if let Some(remark) = &payload.remark {
            form = form.text("remark", remark.clone());
        }
        form = attach(form, attachment);

        let response = self
            .inner
            .client
            .http
            .put(self.inner.client.url(&format!("/incomes/{id}")))
            .bearer_auth(self.inner.client.bearer()?)
            .multipart(form)
            .send()
            .await?;

        decode_data(check(response).await?)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), ClientError> {
        self.inner.delete(id).await
    }
}

fn attach(form: Form, attachment: Option<AttachmentFile>) -> Form {
    match attachment {
        Some(file) => form.part(
            "attachment",
            Part::bytes(file.bytes).file_name(file.file_name),
        ),
        None => form,
    }
}
