//! Webhook payload types for order events.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use super::money::MoneyAmount;
use super::order::OrderStatus;

/// Kind of order event delivered through a webhook.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventType {
    OrderPaid,
    OrderFailed,
}

impl std::fmt::Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventType::OrderPaid => write!(f, "ORDER_PAID"),
            EventType::OrderFailed => write!(f, "ORDER_FAILED"),
        }
    }
}

/// A single webhook message.
///
/// One webhook request carries a JSON array of these. `event_id` is the
/// idempotency key: the same event may be delivered more than once and
/// consumers must process each id only once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub event_date_time: String,
    pub event_id: i64,
    #[serde(rename = "type")]
    pub event_type: EventType,
    pub payload: Payload,
}

impl Event {
    pub fn is_paid(&self) -> bool {
        self.event_type == EventType::OrderPaid
    }

    pub fn is_failed(&self) -> bool {
        self.event_type == EventType::OrderFailed
    }

    pub fn occurred_at(&self) -> Result<OffsetDateTime, time::error::Parse> {
        OffsetDateTime::parse(&self.event_date_time, &Rfc3339)
    }
}

/// Order details attached to an [`Event`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payload {
    /// Failure reason (e.g. `EXPIRED`). Sent for `ORDER_FAILED` only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<OrderStatus>,
    pub id: i64,
    pub number: String,
    pub external_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_data: Option<String>,
    pub order_amount: MoneyAmount,
    /// Sent for `ORDER_PAID` only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_payment_option: Option<SelectedPaymentOption>,
    pub order_completed_date_time: String,
}

impl Payload {
    pub fn completed_at(&self) -> Result<OffsetDateTime, time::error::Parse> {
        OffsetDateTime::parse(&self.order_completed_date_time, &Rfc3339)
    }
}

/// The payment option the customer chose to pay with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectedPaymentOption {
    pub amount: MoneyAmount,
    pub amount_fee: MoneyAmount,
    pub amount_net: MoneyAmount,
    pub exchange_rate: String,
}

/// Decode a webhook request body into its events.
///
/// The body must be a JSON array. No checks are made beyond what decoding
/// enforces, so verify the signature before trusting the result.
pub fn parse_events(body: &[u8]) -> Result<Vec<Event>, serde_json::Error> {
    serde_json::from_slice(body)
}
