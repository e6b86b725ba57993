//! Order endpoints of the store API.
//!
//! Every request carries the store API key in the `Wpay-Store-Api-Key`
//! header and is sent as `POST` with JSON content/accept headers.

use reqwest::header::{ACCEPT, CONTENT_TYPE};

use super::{Client, ClientError};
use crate::objects::{OrderPreview, OrderRequest, OrderResponse};
use crate::signature::API_KEY_HEADER;

const ORDER_PATH: &str = "wpay/store-api/v1/order";
const PREVIEW_PATH: &str = "wpay/store-api/v1/order/preview";

impl Client {
    /// `POST /wpay/store-api/v1/order` – create a new order.
    ///
    /// Both `SUCCESS` and `ALREADY` return the preview, so retrying with an
    /// unchanged request (same `externalId`) never creates a duplicate.
    /// `CONFLICT` and `ACCESS_DENIED` surface as [`ClientError::Rejected`].
    pub async fn create_order(&self, request: &OrderRequest) -> Result<OrderPreview, ClientError> {
        let body = serde_json::to_vec(request)?;
        let response = self.send(ORDER_PATH, None, Some(body)).await?;

        let status = response.status;
        response.into_created_order().map_err(|rejection| {
            tracing::warn!(
                external_id = %request.external_id,
                status = %status,
                error = %rejection,
                "order creation rejected"
            );
            ClientError::from(rejection)
        })
    }

    /// `POST /wpay/store-api/v1/order/preview?id={id}` – fetch the current
    /// state of an order. Only `SUCCESS` yields a preview.
    pub async fn get_preview_order(&self, id: &str) -> Result<OrderPreview, ClientError> {
        let response = self.send(PREVIEW_PATH, Some(id), None).await?;

        let status = response.status;
        response.into_previewed_order().map_err(|rejection| {
            tracing::warn!(
                order_id = %id,
                status = %status,
                error = %rejection,
                "order preview rejected"
            );
            ClientError::from(rejection)
        })
    }

    async fn send(
        &self,
        path: &str,
        id: Option<&str>,
        body: Option<Vec<u8>>,
    ) -> Result<OrderResponse, ClientError> {
        let url = self.base_url.join(path)?;

        let mut request = self
            .http
            .post(url)
            .header(API_KEY_HEADER, &self.api_key)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json");
        if let Some(id) = id {
            request = request.query(&[("id", id)]);
        }
        if let Some(body) = body {
            request = request.body(body);
        }

        tracing::debug!(endpoint = path, "sending store API request");
        let resp = request.send().await?;

        let response: OrderResponse = parse_response(resp).await?;
        tracing::debug!(endpoint = path, status = %response.status, "store API responded");
        Ok(response)
    }
}

async fn parse_response<T: serde::de::DeserializeOwned>(
    resp: reqwest::Response,
) -> Result<T, ClientError> {
    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        tracing::warn!(status = %status, "store API returned an error status");
        return Err(ClientError::Api { status, body });
    }
    let bytes = resp.bytes().await?;
    serde_json::from_slice(&bytes).map_err(ClientError::Json)
}
