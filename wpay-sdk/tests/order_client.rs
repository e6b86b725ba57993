//! Order client tests against a mock gateway.

use mockito::{Matcher, Server};
use serde_json::json;
use std::time::{Duration, Instant};
use tokio::sync::watch;
use url::Url;
use wpay_sdk::client::{Client, ClientError, ClientOptions, with_cancellation};
use wpay_sdk::objects::{CurrencyCode, MoneyAmount, OrderRequest, OrderStatus, ResponseStatus};

const API_KEY: &str = "test-store-key";

fn client_for(server: &Server) -> Client {
    let base_url = Url::parse(&server.url()).unwrap();
    Client::new(ClientOptions::new(API_KEY).with_base_url(base_url)).unwrap()
}

fn order_request() -> OrderRequest {
    OrderRequest::new(
        MoneyAmount::new(CurrencyCode::Ton, "1.50"),
        "VPN for 1 month",
        "merchant-order-1",
        600,
        777000,
    )
    .with_return_url("https://t.me/my_bot")
}

fn preview() -> serde_json::Value {
    json!({
        "id": "2503181",
        "status": "ACTIVE",
        "number": "9aeb581c",
        "amount": { "currencyCode": "TON", "amount": "1.50" },
        "createDateTime": "2024-01-01T12:00:00Z",
        "expirationDateTime": "2024-01-01T12:10:00Z",
        "payLink": "https://t.me/wallet/start?startapp=wpay_order-orderId__2503181"
    })
}

async fn mock_create(server: &mut Server, body: serde_json::Value) -> mockito::Mock {
    server
        .mock("POST", "/wpay/store-api/v1/order")
        .match_header("Wpay-Store-Api-Key", API_KEY)
        .match_header("content-type", "application/json")
        .match_header("accept", "application/json")
        .match_body(Matcher::PartialJson(json!({
            "externalId": "merchant-order-1",
            "description": "VPN for 1 month",
            "amount": { "currencyCode": "TON", "amount": "1.50" },
            "timeoutSeconds": 600,
            "customerTelegramId": 777000,
            "returnUrl": "https://t.me/my_bot"
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body.to_string())
        .create_async()
        .await
}

async fn mock_preview(server: &mut Server, status: u16, body: String) -> mockito::Mock {
    server
        .mock("POST", "/wpay/store-api/v1/order/preview")
        .match_query(Matcher::UrlEncoded("id".into(), "2503181".into()))
        .match_header("Wpay-Store-Api-Key", API_KEY)
        .with_status(status as usize)
        .with_header("content-type", "application/json")
        .with_body(body)
        .create_async()
        .await
}

#[tokio::test]
async fn test_create_order_success() {
    let mut server = Server::new_async().await;
    let mock = mock_create(&mut server, json!({ "status": "SUCCESS", "data": preview() })).await;

    let order = client_for(&server).create_order(&order_request()).await.unwrap();

    mock.assert_async().await;
    assert_eq!(order.id, "2503181");
    assert_eq!(order.status, OrderStatus::Active);
    assert_eq!(order.amount, MoneyAmount::new(CurrencyCode::Ton, "1.50"));
}

#[tokio::test]
async fn test_create_order_already_is_success() {
    let mut server = Server::new_async().await;
    let mock = mock_create(&mut server, json!({ "status": "ALREADY", "data": preview() })).await;

    let order = client_for(&server).create_order(&order_request()).await.unwrap();

    mock.assert_async().await;
    assert_eq!(order.id, "2503181");
}

#[tokio::test]
async fn test_create_order_conflict() {
    let mut server = Server::new_async().await;
    let _mock = mock_create(
        &mut server,
        json!({ "status": "CONFLICT", "message": "externalId already used" }),
    )
    .await;

    let err = client_for(&server).create_order(&order_request()).await.unwrap_err();

    assert!(err.is_conflict());
    assert!(!err.is_access_denied());
    assert!(err.to_string().contains("externalId already used"));
}

#[tokio::test]
async fn test_create_order_access_denied() {
    let mut server = Server::new_async().await;
    let _mock = mock_create(&mut server, json!({ "status": "ACCESS_DENIED" })).await;

    let err = client_for(&server).create_order(&order_request()).await.unwrap_err();

    assert!(err.is_access_denied());
    assert_eq!(err.gateway_status(), Some(ResponseStatus::AccessDenied));
}

#[tokio::test]
async fn test_preview_success() {
    let mut server = Server::new_async().await;
    let mock = mock_preview(
        &mut server,
        200,
        json!({ "status": "SUCCESS", "data": preview() }).to_string(),
    )
    .await;

    let order = client_for(&server).get_preview_order("2503181").await.unwrap();

    mock.assert_async().await;
    assert_eq!(order.number, "9aeb581c");
}

#[tokio::test]
async fn test_preview_rejects_every_other_status() {
    for status in ["ALREADY", "CONFLICT", "ACCESS_DENIED"] {
        let mut server = Server::new_async().await;
        let _mock = mock_preview(
            &mut server,
            200,
            json!({ "status": status, "data": preview() }).to_string(),
        )
        .await;

        let err = client_for(&server).get_preview_order("2503181").await.unwrap_err();
        assert!(matches!(err, ClientError::Rejected(_)), "{status}");
    }
}

#[tokio::test]
async fn test_non_success_http_status_skips_decoding() {
    let mut server = Server::new_async().await;
    let _mock = mock_preview(&mut server, 401, "unauthorized".to_string()).await;

    let err = client_for(&server).get_preview_order("2503181").await.unwrap_err();

    match err {
        ClientError::Api { status, body } => {
            assert_eq!(status.as_u16(), 401);
            assert_eq!(body, "unauthorized");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_malformed_json_is_decoding_error() {
    let mut server = Server::new_async().await;
    let _mock = mock_preview(&mut server, 200, "{\"status\":".to_string()).await;

    let err = client_for(&server).get_preview_order("2503181").await.unwrap_err();

    assert!(matches!(err, ClientError::Json(_)));
    assert_eq!(err.gateway_status(), None);
}

#[tokio::test]
async fn test_unknown_gateway_status_is_decoding_error() {
    let mut server = Server::new_async().await;
    let _mock = mock_preview(&mut server, 200, json!({ "status": "MAYBE" }).to_string()).await;

    let err = client_for(&server).get_preview_order("2503181").await.unwrap_err();

    assert!(matches!(err, ClientError::Json(_)));
}

#[tokio::test]
async fn test_cancelled_call() {
    let server = Server::new_async().await;
    let client = client_for(&server);
    let (_tx, rx) = watch::channel(true);

    let err = with_cancellation(rx, client.get_preview_order("2503181"))
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::Cancelled));
}

#[tokio::test]
async fn test_uncancelled_call_completes() {
    let mut server = Server::new_async().await;
    let _mock = mock_preview(
        &mut server,
        200,
        json!({ "status": "SUCCESS", "data": preview() }).to_string(),
    )
    .await;
    let client = client_for(&server);
    let (tx, rx) = watch::channel(false);
    drop(tx);

    let order = with_cancellation(rx, client.get_preview_order("2503181"))
        .await
        .unwrap();

    assert_eq!(order.id, "2503181");
}

#[tokio::test]
async fn test_base_url_path_prefix_is_kept() {
    let mut server = Server::new_async().await;
    let prefixed = server
        .mock("POST", "/proxy/wpay/store-api/v1/order/preview")
        .match_query(Matcher::UrlEncoded("id".into(), "2503181".into()))
        .with_status(200)
        .with_body(json!({ "status": "SUCCESS", "data": preview() }).to_string())
        .expect(2)
        .create_async()
        .await;
    let bare = server
        .mock("POST", "/wpay/store-api/v1/order/preview")
        .match_query(Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    for base in ["proxy", "proxy/"] {
        let base_url = Url::parse(&format!("{}/{base}", server.url())).unwrap();
        let client = Client::new(ClientOptions::new(API_KEY).with_base_url(base_url)).unwrap();
        let order = client.get_preview_order("2503181").await.unwrap();
        assert_eq!(order.id, "2503181");
    }

    prefixed.assert_async().await;
    bare.assert_async().await;
}

/// Accepts connections and never answers them.
async fn silent_gateway() -> Url {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let mut open = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            open.push(socket);
        }
    });
    Url::parse(&format!("http://{addr}/")).unwrap()
}

#[tokio::test]
async fn test_cancel_aborts_in_flight_call() {
    let base_url = silent_gateway().await;
    let client = Client::new(ClientOptions::new(API_KEY).with_base_url(base_url)).unwrap();
    let (tx, rx) = watch::channel(false);
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(200)).await;
        tx.send(true).unwrap();
    });

    let started = Instant::now();
    let err = with_cancellation(rx, client.get_preview_order("2503181"))
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::Cancelled));
    assert!(started.elapsed() < Duration::from_secs(5));
}

#[tokio::test]
async fn test_configured_timeout_bounds_the_call() {
    let base_url = silent_gateway().await;
    let client = Client::new(
        ClientOptions::new(API_KEY)
            .with_base_url(base_url)
            .with_timeout(Duration::from_millis(300)),
    )
    .unwrap();

    let started = Instant::now();
    let err = client.get_preview_order("2503181").await.unwrap_err();

    match err {
        ClientError::Http(e) => assert!(e.is_timeout()),
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(started.elapsed() < Duration::from_secs(5));
}
