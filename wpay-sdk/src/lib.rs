//! SDK for the Wallet Pay store API.
//!
//! * [`objects`] – wire types for orders, previews and webhook events.
//! * [`signature`] – webhook HMAC-SHA256 signing and verification.
//! * [`client`] – async HTTP client (behind the `client` feature).

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![forbid(unsafe_code)]

#[cfg(feature = "client")]
pub mod client;
pub mod objects;
pub mod signature;
