pub mod money;
pub mod order;
pub mod webhook;

pub use money::{CurrencyCode, MoneyAmount, UnknownCurrency};
pub use order::{
    OrderPreview, OrderRejection, OrderRequest, OrderResponse, OrderStatus, ResponseStatus,
};
pub use webhook::{Event, EventType, Payload, SelectedPaymentOption, parse_events};
