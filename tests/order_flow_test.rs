use futuresbot::api::BinanceFuturesClient;
use futuresbot::config::Credentials;
use futuresbot::manager;
use futuresbot::orders::{place_limit_order, place_market_order};
use futuresbot::strategy::{execute_twap, place_oco_order, setup_grid_strategy, LevelPlacement};
use futuresbot::Error;
use mockito::{Matcher, Server, ServerGuard};

fn test_client(server: &ServerGuard) -> BinanceFuturesClient {
    BinanceFuturesClient::with_base_url(Credentials::new("test-key", "test-secret"), server.url())
        .unwrap()
}

fn order_body(order_id: u64, side: &str, order_type: &str, price: Option<&str>) -> String {
    let mut body = serde_json::json!({
        "orderId": order_id,
        "symbol": "BTCUSDT",
        "side": side,
        "type": order_type,
        "status": "NEW",
        "origQty": "0.01",
        "executedQty": "0",
        "timeInForce": "GTC",
        "reduceOnly": false,
        "updateTime": 1700000000000u64,
    });
    if let Some(price) = price {
        body["price"] = price.into();
    }
    body.to_string()
}

fn filled_market_body(order_id: u64, side: &str, executed_qty: &str, avg_price: &str) -> String {
    serde_json::json!({
        "orderId": order_id,
        "symbol": "BTCUSDT",
        "side": side,
        "type": "MARKET",
        "status": "FILLED",
        "origQty": executed_qty,
        "executedQty": executed_qty,
        "avgPrice": avg_price,
        "updateTime": 1700000000000u64,
    })
    .to_string()
}

#[tokio::test]
async fn test_market_order_round_trip() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/fapi/v1/order")
        .match_query(Matcher::Regex(
            "symbol=BTCUSDT&side=BUY&type=MARKET&quantity=0.01&".to_string(),
        ))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(filled_market_body(1001, "BUY", "0.01", "45000.00"))
        .create_async()
        .await;

    let client = test_client(&server);
    // Lowercase inputs are normalised by validation before hitting the wire.
    let order = place_market_order(&client, "btcusdt", "buy", "0.01")
        .await
        .unwrap();

    assert_eq!(order.order_id, 1001);
    assert_eq!(order.status, "FILLED");
    assert_eq!(order.fill(), Some((0.01, 45000.0)));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_validation_failure_never_reaches_network() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/fapi/v1/order")
        .match_query(Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let client = test_client(&server);
    let err = place_market_order(&client, "btcusdt", "HOLD", "0.01")
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Validation(_)));
    assert_eq!(err.prefix(), "Validation Error");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_exchange_rejection_maps_to_api_error() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/fapi/v1/order")
        .match_query(Matcher::Any)
        .with_status(400)
        .with_header("content-type", "application/json")
        .with_body(r#"{"code":-2019,"msg":"Margin is insufficient."}"#)
        .create_async()
        .await;

    let client = test_client(&server);
    let err = place_limit_order(&client, "BTCUSDT", "BUY", "0.01", "45000")
        .await
        .unwrap_err();

    match &err {
        Error::Exchange { code, msg } => {
            assert_eq!(*code, -2019);
            assert_eq!(msg, "Margin is insufficient.");
        }
        other => panic!("expected exchange error, got {other:?}"),
    }
    assert_eq!(err.prefix(), "API Error");
}

#[tokio::test]
async fn test_grid_places_around_market_and_survives_a_rejected_level() {
    let mut server = Server::new_async().await;

    server
        .mock("GET", "/fapi/v1/ticker/price")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"symbol":"BTCUSDT","price":"45000.00"}"#)
        .create_async()
        .await;

    // The buy level is rejected by the exchange...
    let buy_mock = server
        .mock("POST", "/fapi/v1/order")
        .match_query(Matcher::Regex("side=BUY.*price=43000&".to_string()))
        .with_status(400)
        .with_header("content-type", "application/json")
        .with_body(r#"{"code":-2019,"msg":"Margin is insufficient."}"#)
        .create_async()
        .await;

    // ...while the sell level goes through.
    let sell_mock = server
        .mock("POST", "/fapi/v1/order")
        .match_query(Matcher::Regex("side=SELL.*price=47000&".to_string()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(order_body(2002, "SELL", "LIMIT", Some("47000")))
        .create_async()
        .await;

    let client = test_client(&server);
    let report = setup_grid_strategy(&client, "BTCUSDT", "0.01", "43000", "47000", "3")
        .await
        .unwrap();

    assert_eq!(report.current_price, 45000.0);
    assert_eq!(report.levels, vec![43000.0, 45000.0, 47000.0]);

    // One rejection does not abort the ladder: the sell after the failed
    // buy was still attempted, and the middle level sat exactly on the
    // market price so it was placed as neither.
    assert!(report.buy_orders().is_empty());
    assert_eq!(report.sell_orders().len(), 1);
    assert_eq!(report.failed_count(), 1);
    assert!(matches!(
        report.placements[1],
        LevelPlacement::Skipped { price } if price == 45000.0
    ));

    buy_mock.assert_async().await;
    sell_mock.assert_async().await;
}

#[tokio::test]
async fn test_twap_sends_equal_slices() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/fapi/v1/order")
        .match_query(Matcher::Regex(
            "type=MARKET&quantity=0.05&".to_string(),
        ))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(filled_market_body(3003, "BUY", "0.05", "45000.00"))
        .expect(2)
        .create_async()
        .await;

    let client = test_client(&server);
    let report = execute_twap(&client, "BTCUSDT", "BUY", "0.1", "2", "1")
        .await
        .unwrap();

    assert_eq!(report.slices.len(), 2);
    assert_eq!(report.executed_count(), 2);
    assert_eq!(report.slice_quantity, 0.05);
    assert_eq!(report.average_fill_price(), Some(45000.0));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_oco_places_both_reduce_only_legs() {
    let mut server = Server::new_async().await;

    let tp_mock = server
        .mock("POST", "/fapi/v1/order")
        .match_query(Matcher::Regex(
            "side=SELL&type=TAKE_PROFIT&.*reduceOnly=true".to_string(),
        ))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(order_body(4004, "SELL", "TAKE_PROFIT", Some("46000")))
        .create_async()
        .await;

    let stop_mock = server
        .mock("POST", "/fapi/v1/order")
        .match_query(Matcher::Regex(
            "side=SELL&type=STOP&.*reduceOnly=true".to_string(),
        ))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(order_body(4005, "SELL", "STOP", Some("42900")))
        .create_async()
        .await;

    let client = test_client(&server);
    let report = place_oco_order(&client, "BTCUSDT", "BUY", "0.01", "46000", "43000", "42900")
        .await
        .unwrap();

    assert_eq!(report.take_profit.order_id, 4004);
    assert_eq!(report.stop_loss.order_id, 4005);
    tp_mock.assert_async().await;
    stop_mock.assert_async().await;
}

#[tokio::test]
async fn test_oco_stop_leg_never_attempted_after_take_profit_failure() {
    let mut server = Server::new_async().await;

    server
        .mock("POST", "/fapi/v1/order")
        .match_query(Matcher::Regex("type=TAKE_PROFIT&".to_string()))
        .with_status(400)
        .with_header("content-type", "application/json")
        .with_body(r#"{"code":-4046,"msg":"Quantity greater than max quantity."}"#)
        .create_async()
        .await;

    let stop_mock = server
        .mock("POST", "/fapi/v1/order")
        .match_query(Matcher::Regex("type=STOP&".to_string()))
        .expect(0)
        .create_async()
        .await;

    let client = test_client(&server);
    let err = place_oco_order(&client, "BTCUSDT", "BUY", "0.01", "46000", "43000", "42900")
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Exchange { code: -4046, .. }));
    stop_mock.assert_async().await;
}

#[tokio::test]
async fn test_order_manager_list_and_cancel_flow() {
    let mut server = Server::new_async().await;

    server
        .mock("GET", "/fapi/v1/openOrders")
        .match_query(Matcher::Regex("symbol=BTCUSDT&".to_string()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(format!(
            "[{},{}]",
            order_body(5001, "BUY", "LIMIT", Some("43000")),
            order_body(5002, "SELL", "MARKET", None)
        ))
        .create_async()
        .await;

    server
        .mock("DELETE", "/fapi/v1/order")
        .match_query(Matcher::Regex("orderId=5001&".to_string()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(order_body(5001, "BUY", "LIMIT", Some("43000")))
        .create_async()
        .await;

    server
        .mock("DELETE", "/fapi/v1/allOpenOrders")
        .match_query(Matcher::Regex("symbol=BTCUSDT&".to_string()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"code":200,"msg":"The operation of cancel all open order is done."}"#)
        .create_async()
        .await;

    let client = test_client(&server);

    let orders = manager::open_orders(&client, Some("btcusdt")).await.unwrap();
    assert_eq!(orders.len(), 2);

    let table = manager::render_order_table(&orders);
    assert!(table.contains("5001"));
    assert!(table.contains("43000"));
    assert!(table.contains("MARKET"));

    let cancelled = manager::cancel_order(&client, "btcusdt", 5001).await.unwrap();
    assert_eq!(cancelled.order_id, 5001);

    manager::cancel_all_orders(&client, "btcusdt").await.unwrap();
}

#[tokio::test]
async fn test_ping_and_account_balance() {
    let mut server = Server::new_async().await;

    server
        .mock("GET", "/fapi/v1/ping")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body("{}")
        .create_async()
        .await;

    server
        .mock("GET", "/fapi/v2/account")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"totalWalletBalance":"15000.00"}"#)
        .create_async()
        .await;

    let client = test_client(&server);
    client.ping().await.unwrap();
    assert_eq!(client.account_balance().await.unwrap(), 15000.0);
}
