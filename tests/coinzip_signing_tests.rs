//! Request signing tests with fixed nonces

use ccxt_coinzip::{ApiScope, CcxtError, Coinzip, Exchange, ExchangeConfig, HttpMethod, Params};
use serde_json::{json, Value};

const NONCE: i64 = 1551924191000;

fn exchange() -> Coinzip {
    Coinzip::new(ExchangeConfig::new().with_credentials("key", "secret")).unwrap()
}

fn params(value: Value) -> Params {
    match value {
        Value::Object(map) => map,
        _ => panic!("params must be an object"),
    }
}

#[test]
fn test_private_get_reference_signature() {
    let request = exchange()
        .sign_with_nonce(
            "orders",
            ApiScope::Private,
            HttpMethod::Get,
            &params(json!({"state": "wait", "market": "btcphp"})),
            None,
            None,
            NONCE,
        )
        .unwrap();

    assert_eq!(
        request.url,
        "https://www.coinzip.co/api/v2/orders?access_key=key&market=btcphp&state=wait\
         &tonce=1551924191000\
         &signature=693b7917a2785d9a59f671ef09c304e78bc0bc7b7bbef7a576ada909bc3e800f"
    );
    assert_eq!(request.method, "GET");
    assert!(request.body.is_none());
}

#[test]
fn test_batch_order_reference_signature() {
    let request = exchange()
        .sign_with_nonce(
            "orders/multi",
            ApiScope::Private,
            HttpMethod::Post,
            &params(json!({
                "market": "btcphp",
                "orders": [{"side": "buy", "volume": "1", "ord_type": "limit", "price": "100"}]
            })),
            None,
            None,
            NONCE,
        )
        .unwrap();

    assert_eq!(request.url, "https://www.coinzip.co/api/v2/orders/multi");
    assert_eq!(
        request.body.as_deref(),
        Some(
            "access_key=key&market=btcphp&tonce=1551924191000\
             &orders%5B%5D%5Bside%5D=buy&orders%5B%5D%5Bvolume%5D=1\
             &orders%5B%5D%5Bord_type%5D=limit&orders%5B%5D%5Bprice%5D=100\
             &signature=86a578ecc06b43ef1874afc0daadc912aa172dc8a218a13d53249376c65fd0d1"
        )
    );
}

#[test]
fn test_cancel_reference_signature() {
    let request = exchange()
        .sign_with_nonce(
            "order/delete",
            ApiScope::Private,
            HttpMethod::Post,
            &params(json!({"id": 42})),
            None,
            None,
            NONCE,
        )
        .unwrap();

    assert_eq!(
        request.body.as_deref(),
        Some(
            "access_key=key&id=42&tonce=1551924191000\
             &signature=2e1fdde047722713921cc6033a070a4e8323eeda2b97e23f8954f63fcd05f7fa"
        )
    );
    assert_eq!(
        request.headers.get("Content-Type").map(String::as_str),
        Some("application/x-www-form-urlencoded")
    );
}

#[test]
fn test_param_insertion_order_does_not_change_signature() {
    let exchange = exchange();
    let a = exchange
        .sign_with_nonce(
            "orders",
            ApiScope::Private,
            HttpMethod::Get,
            &params(json!({"market": "btcphp", "state": "wait", "limit": 10})),
            None,
            None,
            NONCE,
        )
        .unwrap();
    let b = exchange
        .sign_with_nonce(
            "orders",
            ApiScope::Private,
            HttpMethod::Get,
            &params(json!({"limit": 10, "state": "wait", "market": "btcphp"})),
            None,
            None,
            NONCE,
        )
        .unwrap();
    assert_eq!(a.url, b.url);
}

#[test]
fn test_composite_param_is_rejected() {
    let err = exchange()
        .sign_with_nonce(
            "orders",
            ApiScope::Private,
            HttpMethod::Get,
            &params(json!({"market": ["btcphp"]})),
            None,
            None,
            NONCE,
        )
        .unwrap_err();
    assert!(matches!(err, CcxtError::BadRequest { .. }));
}

#[test]
fn test_missing_path_param() {
    let err = exchange()
        .sign(
            "tickers/{market}",
            ApiScope::Public,
            HttpMethod::Get,
            &Params::new(),
            None,
            None,
        )
        .unwrap_err();
    assert!(matches!(err, CcxtError::ArgumentsRequired { .. }));
}

#[test]
fn test_live_sign_uses_current_time() {
    let exchange = exchange();
    let request = exchange
        .sign(
            "members/me",
            ApiScope::Private,
            HttpMethod::Get,
            &Params::new(),
            None,
            None,
        )
        .unwrap();

    let tonce: i64 = request
        .url
        .split("tonce=")
        .nth(1)
        .and_then(|rest| rest.split('&').next())
        .and_then(|t| t.parse().ok())
        .unwrap();
    assert!(tonce > NONCE);
}

#[test]
fn test_missing_api_key() {
    let exchange = Coinzip::new(ExchangeConfig::new().with_api_secret("secret")).unwrap();
    let err = exchange
        .sign(
            "members/me",
            ApiScope::Private,
            HttpMethod::Get,
            &Params::new(),
            None,
            None,
        )
        .unwrap_err();
    assert!(err.is_auth_error());
    assert_eq!(err.to_string(), "coinzip requires \"apiKey\" credential");
}
