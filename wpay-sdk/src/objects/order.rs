use crate::objects::money::MoneyAmount;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

/// Request payload for creating a new order.
///
/// Field limits (description 5..=100 chars, URLs and strings up to 255 chars,
/// `timeout_seconds` 30..=86400) are enforced by the gateway, not here. The
/// request is sent exactly as built so that retries with the same
/// `external_id` stay idempotent.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequest {
    pub amount: MoneyAmount,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fail_return_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_data: Option<String>,
    /// Order id in the merchant system, used by the gateway to detect
    /// duplicated orders on retry.
    pub external_id: String,
    pub timeout_seconds: u32,
    pub customer_telegram_id: i64,
}

impl OrderRequest {
    pub fn new(
        amount: MoneyAmount,
        description: impl Into<String>,
        external_id: impl Into<String>,
        timeout_seconds: u32,
        customer_telegram_id: i64,
    ) -> Self {
        Self {
            amount,
            description: description.into(),
            return_url: None,
            fail_return_url: None,
            custom_data: None,
            external_id: external_id.into(),
            timeout_seconds,
            customer_telegram_id,
        }
    }

    pub fn with_return_url(mut self, url: impl Into<String>) -> Self {
        self.return_url = Some(url.into());
        self
    }

    pub fn with_fail_return_url(mut self, url: impl Into<String>) -> Self {
        self.fail_return_url = Some(url.into());
        self
    }

    pub fn with_custom_data(mut self, data: impl Into<String>) -> Self {
        self.custom_data = Some(data.into());
        self
    }
}

/// Lifecycle status of an order as reported in a preview.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Active,
    Expired,
    Paid,
    Cancelled,
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderStatus::Active => write!(f, "ACTIVE"),
            OrderStatus::Expired => write!(f, "EXPIRED"),
            OrderStatus::Paid => write!(f, "PAID"),
            OrderStatus::Cancelled => write!(f, "CANCELLED"),
        }
    }
}

/// Result code of an order API call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResponseStatus {
    /// A new order was created.
    Success,
    /// An order with exactly the same parameters (including `externalId`)
    /// already exists.
    Already,
    /// An order with the same `externalId` but different parameters exists.
    Conflict,
    /// The store is not permitted to perform the call.
    AccessDenied,
}

impl std::fmt::Display for ResponseStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResponseStatus::Success => write!(f, "SUCCESS"),
            ResponseStatus::Already => write!(f, "ALREADY"),
            ResponseStatus::Conflict => write!(f, "CONFLICT"),
            ResponseStatus::AccessDenied => write!(f, "ACCESS_DENIED"),
        }
    }
}

/// Gateway-side snapshot of an order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderPreview {
    pub id: String,
    pub status: OrderStatus,
    /// Human-readable (short) order number.
    pub number: String,
    pub amount: MoneyAmount,
    pub create_date_time: String,
    pub expiration_date_time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_date_time: Option<String>,
    /// URL to show to the payer.
    pub pay_link: String,
}

impl OrderPreview {
    pub fn created_at(&self) -> Result<OffsetDateTime, time::error::Parse> {
        OffsetDateTime::parse(&self.create_date_time, &Rfc3339)
    }

    pub fn expires_at(&self) -> Result<OffsetDateTime, time::error::Parse> {
        OffsetDateTime::parse(&self.expiration_date_time, &Rfc3339)
    }

    pub fn completed_at(&self) -> Option<Result<OffsetDateTime, time::error::Parse>> {
        self.completed_date_time
            .as_deref()
            .map(|s| OffsetDateTime::parse(s, &Rfc3339))
    }
}

/// Envelope returned by both the "create order" and "preview order" endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderResponse {
    pub status: ResponseStatus,
    /// Verbose reason of a non-success result.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Present for `SUCCESS` and `ALREADY` only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<OrderPreview>,
}

/// A gateway response that did not yield an order preview.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OrderRejection {
    #[error("gateway rejected the call: status={status}, message={}", .message.as_deref().unwrap_or(""))]
    Status {
        status: ResponseStatus,
        message: Option<String>,
    },
    #[error("gateway returned {status} without order data")]
    MissingPreview { status: ResponseStatus },
}

impl OrderRejection {
    pub fn status(&self) -> ResponseStatus {
        match self {
            OrderRejection::Status { status, .. } | OrderRejection::MissingPreview { status } => {
                *status
            }
        }
    }
}

impl OrderResponse {
    /// Reconcile the result of a "create order" call.
    ///
    /// `ALREADY` is a success: it means a retry hit the order created by an
    /// earlier attempt with the same `externalId`.
    pub fn into_created_order(self) -> Result<OrderPreview, OrderRejection> {
        match self.status {
            ResponseStatus::Success | ResponseStatus::Already => self.into_preview(),
            ResponseStatus::Conflict | ResponseStatus::AccessDenied => Err(self.into_rejection()),
        }
    }

    /// Reconcile the result of a "preview order" call. Only `SUCCESS` counts.
    pub fn into_previewed_order(self) -> Result<OrderPreview, OrderRejection> {
        match self.status {
            ResponseStatus::Success => self.into_preview(),
            ResponseStatus::Already | ResponseStatus::Conflict | ResponseStatus::AccessDenied => {
                Err(self.into_rejection())
            }
        }
    }

    fn into_preview(self) -> Result<OrderPreview, OrderRejection> {
        self.data.ok_or(OrderRejection::MissingPreview {
            status: self.status,
        })
    }

    fn into_rejection(self) -> OrderRejection {
        OrderRejection::Status {
            status: self.status,
            message: self.message,
        }
    }
}
