//! Integration tests for error handling
//!
//! Tests for CcxtError types, error propagation, and error recovery patterns

use ccxt_coinzip::{CcxtError, CcxtResult, ErrorKind};

// === Error Type Tests ===

#[test]
fn test_error_hierarchy_exchange_errors() {
    let errors = vec![
        CcxtError::ExchangeError {
            message: "Generic error".into(),
        },
        CcxtError::AuthenticationError {
            message: "Invalid API key".into(),
        },
        CcxtError::ArgumentsRequired {
            message: "Limit orders require a price".into(),
        },
        CcxtError::BadRequest {
            message: "Invalid parameter".into(),
        },
        CcxtError::BadSymbol {
            symbol: "INVALID/PAIR".into(),
        },
        CcxtError::InsufficientFunds {
            message: "not enough PHP".into(),
        },
        CcxtError::NotSupported {
            feature: "withdraw".into(),
        },
    ];

    for err in errors {
        assert!(!err.code().is_empty());
        assert!(!err.is_retryable());
    }
}

#[test]
fn test_error_hierarchy_network_errors() {
    let retryable = vec![
        CcxtError::NetworkError {
            url: "https://www.coinzip.co".into(),
            message: "Connection failed".into(),
        },
        CcxtError::RateLimitExceeded {
            message: "Too many requests".into(),
        },
        CcxtError::ExchangeNotAvailable {
            message: "Maintenance".into(),
        },
        CcxtError::RequestTimeout {
            url: "https://www.coinzip.co/api/v2/markets".into(),
        },
    ];

    for err in retryable {
        assert!(err.is_retryable(), "{} should be retryable", err.code());
        assert!(err.is_network_error());
    }
}

#[test]
fn test_vendor_kinds_build_matching_errors() {
    let err = ErrorKind::OrderNotFound.into_error("coinzip {\"id\":\"42\"}");
    assert!(matches!(err, CcxtError::OrderNotFound { .. }));
    assert!(err.to_string().contains("42"));

    let err = ErrorKind::InsufficientFunds.into_error("coinzip balance");
    assert_eq!(err.code(), "INSUFFICIENT_FUNDS");
}

#[test]
fn test_json_error_conversion() {
    let parsed: Result<serde_json::Value, _> = serde_json::from_str("{not json");
    let err: CcxtError = parsed.unwrap_err().into();
    assert!(matches!(err, CcxtError::JsonError { .. }));
    assert_eq!(err.code(), "JSON_ERROR");
}

// === Propagation ===

fn require_price(price: Option<&str>) -> CcxtResult<&str> {
    price.ok_or_else(|| CcxtError::ArgumentsRequired {
        message: "price".into(),
    })
}

fn place(price: Option<&str>) -> CcxtResult<String> {
    let price = require_price(price)?;
    Ok(format!("price={price}"))
}

#[test]
fn test_question_mark_propagation() {
    assert_eq!(place(Some("100")).unwrap(), "price=100");
    assert!(matches!(
        place(None),
        Err(CcxtError::ArgumentsRequired { .. })
    ));
}

#[test]
fn test_retry_decision_pattern() {
    let outcomes: Vec<CcxtResult<()>> = vec![
        Err(CcxtError::RequestTimeout { url: String::new() }),
        Err(CcxtError::OrderNotFound {
            message: "gone".into(),
        }),
        Ok(()),
    ];

    let retry: Vec<bool> = outcomes
        .iter()
        .map(|r| r.as_ref().err().is_some_and(CcxtError::is_retryable))
        .collect();
    assert_eq!(retry, vec![true, false, false]);
}
