//! Order domain entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    Processing,
    Success,
    Failed,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Processing => "processing",
            Self::Success => "success",
            Self::Failed => "failed",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(Self::Pending),
            "processing" => Some(Self::Processing),
            "success" => Some(Self::Success),
            "failed" => Some(Self::Failed),
            _ => None,
        }
    }
}

impl Default for OrderStatus {
    fn default() -> Self {
        Self::Pending
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: Uuid,
    pub order_name: String,
    pub amount: f64,
    pub status: OrderStatus,

    // Audit fields
    pub created_at: DateTime<Utc>,
    pub created_by: Option<Uuid>,
    pub updated_at: Option<DateTime<Utc>>,
    pub updated_by: Option<Uuid>,
}

impl Order {
    pub fn new(payload: CreateOrder, created_by: Option<Uuid>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            order_name: payload.order_name,
            amount: payload.amount,
            status: payload.status.unwrap_or_default(),
            created_at: now,
            created_by,
            updated_at: Some(now),
            updated_by: created_by,
        }
    }

    pub fn apply(&mut self, update: UpdateOrder, updated_by: Uuid) {
        if let Some(order_name) = update.order_name {
            self.order_name = order_name;
        }
        if let Some(amount) = update.amount {
            self.amount = amount;
        }
        if let Some(status) = update.status {
            self.status = status;
        }
        self.updated_at = Some(Utc::now());
        self.updated_by = Some(updated_by);
    }
}

/// New order payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateOrder {
    #[validate(length(min = 1, max = 255, message = "order name is required"))]
    pub order_name: String,

    #[validate(range(min = 0.0, message = "amount must not be negative"))]
    pub amount: f64,

    pub status: Option<OrderStatus>,
}

/// Partial order update payload
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateOrder {
    #[validate(length(min = 1, max = 255, message = "order name must not be empty"))]
    pub order_name: Option<String>,

    #[validate(range(min = 0.0, message = "amount must not be negative"))]
    pub amount: Option<f64>,

    pub status: Option<OrderStatus>,
}
