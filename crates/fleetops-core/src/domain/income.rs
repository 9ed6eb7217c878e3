//! Income domain entity

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentType {
    Cash,
    CreditCard,
    BankTransfer,
    Other,
}

impl PaymentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cash => "cash",
            Self::CreditCard => "credit_card",
            Self::BankTransfer => "bank_transfer",
            Self::Other => "other",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "cash" => Some(Self::Cash),
            "credit_card" => Some(Self::CreditCard),
            "bank_transfer" => Some(Self::BankTransfer),
            "other" => Some(Self::Other),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Income {
    pub id: Uuid,
    pub order_id: Uuid,
    pub amount: f64,
    pub received_date: NaiveDate,
    pub bank_id: Uuid,
    pub account_number: String,
    pub payment_type: Option<PaymentType>,
    pub remark: Option<String>,
    /// Stored blob path of the uploaded receipt, if any.
    pub attachment: Option<String>,

    // Audit fields
    pub created_at: DateTime<Utc>,
    pub created_by: Option<Uuid>,
    pub updated_at: Option<DateTime<Utc>>,
    pub updated_by: Option<Uuid>,
}

impl Income {
    pub fn new(payload: CreateIncome, created_by: Option<Uuid>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            order_id: payload.order_id,
            amount: payload.amount,
            received_date: payload.received_date,
            bank_id: payload.bank_id,
            account_number: payload.account_number,
            payment_type: payload.payment_type,
            remark: payload.remark,
            attachment: None,
            created_at: now,
            created_by,
            updated_at: Some(now),
            updated_by: created_by,
        }
    }

    /// Applies a partial update and stamps the acting principal. The
    /// attachment path is managed separately by the service.
    pub fn apply(&mut self, update: UpdateIncome, updated_by: Uuid) {
        if let Some(order_id) = update.order_id {
            self.order_id = order_id;
        }
        if let Some(amount) = update.amount {
            self.amount = amount;
        }
        if let Some(received_date) = update.received_date {
            self.received_date = received_date;
        }
        if let Some(bank_id) = update.bank_id {
            self.bank_id = bank_id;
        }
        if let Some(account_number) = update.account_number {
            self.account_number = account_number;
        }
        if let Some(payment_type) = update.payment_type {
            self.payment_type = Some(payment_type);
        }
        if let Some(remark) = update.remark {
            self.remark = Some(remark);
        }
        self.updated_at = Some(Utc::now());
        self.updated_by = Some(updated_by);
    }
}

/// New income payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateIncome {
    pub order_id: Uuid,

    #[validate(range(min = 0.0, message = "amount must not be negative"))]
    pub amount: f64,

    pub received_date: NaiveDate,

    pub bank_id: Uuid,

    #[validate(length(min = 1, max = 64, message = "account number is required"))]
    pub account_number: String,

    pub payment_type: Option<PaymentType>,

    #[validate(length(max = 1024, message = "remark is too long"))]
    pub remark: Option<String>,
}

/// Partial income update payload
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateIncome {
    pub order_id: Option<Uuid>,

    #[validate(range(min = 0.0, message = "amount must not be negative"))]
    pub amount: Option<f64>,

    pub received_date: Option<NaiveDate>,

    pub bank_id: Option<Uuid>,

    #[validate(length(min = 1, max = 64, message = "account number must not be empty"))]
    pub account_number: Option<String>,

    pub payment_type: Option<PaymentType>,

    #[validate(length(max = 1024, message = "remark is too long"))]
    pub remark: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payment_type_round_trips_as_string() {
        for pt in [
            PaymentType::Cash,
            PaymentType::CreditCard,
            PaymentType::BankTransfer,
            PaymentType::Other,
        ] {
            assert_eq!(PaymentType::from_str(pt.as_str()), Some(pt));
        }
        assert_eq!(PaymentType::from_str("barter"), None);
    }

    #[test]
    fn negative_amount_fails_validation() {
        let payload = CreateIncome {
            order_id: Uuid::new_v4(),
            amount: -1.0,
            received_date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            bank_id: Uuid::new_v4(),
            account_number: "111-222".into(),
            payment_type: None,
            remark: None,
        };
        assert!(validator::Validate::validate(&payload).is_err());
    }
}
