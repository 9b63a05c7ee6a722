//! Integration tests for the endpoint catalog
//!
//! Drives the public clients through `MockTransport`, so nothing here
//! touches the network.

use bpx_rest::{
    AccountClient, ApiResponse, Blockchain, BlockingAccountClient, CapitalHistoryQuery,
    Credentials, FillHistoryQuery, KlineInterval, Method, MockTransport, OrderHistoryQuery,
    OrderRef, OrderRequest, Page, PublicClient, PublicRequests, RequestBuilder, RestError,
    SelfTradePrevention, Side, TimeInForce, ValidationError,
};
use rust_decimal_macros::dec;
use serde_json::json;

const API_KEY: &str = "5MxkYJbWzAVqGGAq5aQ2fsLw8Y96vxYyGMHqD5UrEHgT";
const SECRET: &str = "AQIDBAUGBwgJCgsMDQ4PEBESExQVFhcYGRobHB0eHyA=";

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

fn account() -> AccountClient<MockTransport> {
    init_tracing();
    let credentials = Credentials::new(API_KEY, SECRET).unwrap();
    AccountClient::with_transport(RequestBuilder::new(credentials), MockTransport::new())
}

fn public() -> PublicClient<MockTransport> {
    init_tracing();
    PublicClient::with_transport(PublicRequests::new(), MockTransport::new())
}

fn validation(err: RestError) -> ValidationError {
    err.as_validation().cloned().expect("expected a validation error")
}

// =============================================================================
// Pagination bounds
// =============================================================================

#[tokio::test]
async fn test_limit_bounds() {
    let client = account();
    client.transport().push_json(json!([]));
    client.transport().push_json(json!([]));

    for limit in [1001, -1] {
        let query = OrderHistoryQuery { page: Page::limit(limit), ..Default::default() };
        let err = client.get_order_history(&query, None).await.unwrap_err();
        assert_eq!(validation(err), ValidationError::LimitOutOfRange { value: limit });
    }
    assert_eq!(client.transport().request_count(), 0);

    for limit in [0, 1000] {
        let query = OrderHistoryQuery { page: Page::limit(limit), ..Default::default() };
        client.get_order_history(&query, None).await.unwrap();
        let request = client.transport().last_request().unwrap();
        let sent = request.query.unwrap();
        assert_eq!(sent.get("limit").and_then(|v| v.as_i64()), Some(limit));
    }
}

#[tokio::test]
async fn test_negative_offset_rejected() {
    let client = account();
    let query = CapitalHistoryQuery::page(Page::new(100, -1));

    let err = client.get_deposits(&query, None).await.unwrap_err();
    assert_eq!(validation(err), ValidationError::negative("offset", -1));
    assert_eq!(client.transport().request_count(), 0);
}

#[tokio::test]
async fn test_zero_offset_sent() {
    let client = account();
    client.transport().push_json(json!([]));

    client.get_withdrawals(&CapitalHistoryQuery::page(Page::new(100, 0)), None).await.unwrap();

    let request = client.transport().last_request().unwrap();
    let query = request.query.unwrap();
    assert_eq!(query.get("offset").and_then(|v| v.as_i64()), Some(0));
}

#[tokio::test]
async fn test_public_trades_limit() {
    let client = public();
    let err = client.get_history_trades("SOL_USDC", Page::limit(1001)).await.unwrap_err();
    assert!(err.is_validation());
    assert_eq!(client.transport().request_count(), 0);
}

// =============================================================================
// Orders
// =============================================================================

#[tokio::test]
async fn test_market_order_never_sends_price() {
    let client = account();
    client.transport().push_json(json!({"id": "1", "status": "Filled"}));

    let order = OrderRequest::market("SOL_USDC", Side::Ask, dec!(2))
        .with_price(dec!(99))
        .with_time_in_force(TimeInForce::Ioc)
        .with_self_trade_prevention(SelfTradePrevention::RejectBoth);
    client.execute_order(&order, None).await.unwrap();

    let request = client.transport().last_request().unwrap();
    assert_eq!(request.method, Method::Post);
    assert!(request.url.ends_with("api/v1/order"));
    let body = request.body.unwrap();
    assert!(!body.contains_key("price"));
    assert_eq!(body.get("orderType").and_then(|v| v.as_str()), Some("Market"));
    assert_eq!(body.get("selfTradePrevention").and_then(|v| v.as_str()), Some("RejectBoth"));
    assert_eq!(body.get("timeInForce").and_then(|v| v.as_str()), Some("IOC"));
}

#[tokio::test]
async fn test_order_without_time_in_force_rejected() {
    let client = account();
    client.transport().push_json(json!({"id": "1", "status": "Filled"}));

    let order = OrderRequest::market("SOL_USDC", Side::Ask, dec!(2));
    let err = client.execute_order(&order, None).await.unwrap_err();
    assert_eq!(validation(err), ValidationError::MissingField("timeInForce"));
    assert_eq!(client.transport().request_count(), 0);

    client.execute_order(&order.post_only(), None).await.unwrap();
    assert_eq!(client.transport().request_count(), 1);
}

#[tokio::test]
async fn test_limit_order_flow() {
    let client = account();
    client.transport().push_json(json!({"id": "42", "status": "New"}));
    client.transport().push_json(json!({"id": "42", "status": "Cancelled"}));

    let order = OrderRequest::limit("SOL_USDC", Side::Bid, dec!(1), dec!(20))
        .with_time_in_force(TimeInForce::Gtc)
        .with_client_id(7);
    let placed = client.execute_order(&order, Some(10_000)).await.unwrap();
    assert_eq!(placed.as_json().and_then(|v| v["id"].as_str()), Some("42"));

    client.cancel_order("SOL_USDC", &OrderRef::ClientId(7), None).await.unwrap();

    let requests = client.transport().take_requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].headers.get("X-Window").map(String::as_str), Some("10000"));
    assert_eq!(requests[1].method, Method::Delete);
    assert_eq!(requests[1].headers.get("X-Window").map(String::as_str), Some("5000"));
    let body = requests[1].body.as_ref().unwrap();
    assert_eq!(body.get("clientId").and_then(|v| v.as_i64()), Some(7));
}

// =============================================================================
// Headers
// =============================================================================

#[tokio::test]
async fn test_exactly_five_headers() {
    let client = account();
    client.transport().push_json(json!({}));

    client.get_balances(Some(60_000)).await.unwrap();

    let request = client.transport().last_request().unwrap();
    let names: Vec<&str> = request.headers.keys().map(String::as_str).collect();
    assert_eq!(
        names,
        vec!["Content-Type", "X-API-Key", "X-Signature", "X-Timestamp", "X-Window"]
    );
    assert_eq!(request.headers["X-API-Key"], API_KEY);
    assert_eq!(request.headers["X-Window"], "60000");
}

#[tokio::test]
async fn test_zero_window_rejected() {
    let client = account();
    let err = client.get_balances(Some(0)).await.unwrap_err();
    assert_eq!(validation(err), ValidationError::ZeroWindow);
}

#[tokio::test]
async fn test_public_requests_unsigned() {
    let client = public();
    client.transport().push_json(json!([]));

    client.get_markets().await.unwrap();

    let request = client.transport().last_request().unwrap();
    assert!(request.headers.is_empty());
    assert_eq!(request.url, "https://api.backpack.exchange/api/v1/markets");
}

// =============================================================================
// Klines and constants
// =============================================================================

#[tokio::test]
async fn test_klines_start_time() {
    let client = public();
    let err = client
        .get_klines("SOL_USDC", KlineInterval::OneHour, -1, None)
        .await
        .unwrap_err();
    assert_eq!(validation(err), ValidationError::negative("start_time", -1));

    client.transport().push_json(json!([]));
    client
        .get_klines("SOL_USDC", KlineInterval::OneHour, 0, Some(3600))
        .await
        .unwrap();
    let query = client.transport().last_request().unwrap().query.unwrap();
    assert_eq!(query.get("startTime").and_then(|v| v.as_i64()), Some(0));
    assert_eq!(query.get("endTime").and_then(|v| v.as_i64()), Some(3600));
}

#[test]
fn test_constant_parsing() {
    assert_eq!(
        "10x".parse::<KlineInterval>().unwrap_err(),
        ValidationError::InvalidInterval("10x".into())
    );
    assert!("Reject".parse::<SelfTradePrevention>().unwrap_err().is_invalid_member());
    assert!("Tron".parse::<Blockchain>().unwrap_err().is_invalid_member());
    assert_eq!("1month".parse::<KlineInterval>().unwrap(), KlineInterval::OneMonth);
}

// =============================================================================
// Responses
// =============================================================================

#[tokio::test]
async fn test_status_error_passthrough() {
    let client = account();
    client.transport().push_error(RestError::Status {
        status: 400,
        body: r#"{"code":"INVALID_CLIENT_REQUEST"}"#.into(),
    });

    let err = client.get_fill_history(&FillHistoryQuery::default(), None).await.unwrap_err();
    assert_eq!(err.status(), Some(400));
}

#[tokio::test]
async fn test_text_response() {
    let client = public();
    client.transport().push_text("pong");

    let response = client.get_ping().await.unwrap();
    assert_eq!(response, ApiResponse::Text("pong".into()));
}

#[test]
fn test_blocking_client_shares_catalog() {
    init_tracing();
    let credentials = Credentials::new(API_KEY, SECRET).unwrap();
    let client =
        BlockingAccountClient::with_transport(RequestBuilder::new(credentials), MockTransport::new());
    client.transport().push_json(json!({"address": "addr"}));

    client.get_deposit_address(Blockchain::Solana, None).unwrap();

    let request = client.transport().last_request().unwrap();
    assert!(request.url.ends_with("wapi/v1/capital/deposit/address"));
    let query = request.query.unwrap();
    assert_eq!(query.get("blockchain").and_then(|v| v.as_str()), Some("Solana"));
}
