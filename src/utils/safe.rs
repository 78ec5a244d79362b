//! Safe helper functions for extracting values from JSON
//!
//! CCXT의 safe* 헬퍼 함수들을 Rust로 구현

use rust_decimal::Decimal;
use serde_json::Value;
use std::str::FromStr;

/// 안전한 문자열 추출
pub fn safe_string(obj: &Value, key: &str) -> Option<String> {
    obj.get(key).and_then(|v| match v {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    })
}

/// 소문자 문자열 추출
pub fn safe_string_lower(obj: &Value, key: &str) -> Option<String> {
    safe_string(obj, key).map(|s| s.to_lowercase())
}

/// 대문자 문자열 추출
pub fn safe_string_upper(obj: &Value, key: &str) -> Option<String> {
    safe_string(obj, key).map(|s| s.to_uppercase())
}

/// 안전한 정수 추출
pub fn safe_integer(obj: &Value, key: &str) -> Option<i64> {
    obj.get(key).and_then(|v| match v {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    })
}

/// 안전한 Decimal 추출
pub fn safe_decimal(obj: &Value, key: &str) -> Option<Decimal> {
    obj.get(key).and_then(to_decimal)
}

/// 안전한 값 추출
pub fn safe_value<'a>(obj: &'a Value, key: &str) -> Option<&'a Value> {
    obj.get(key).filter(|v| !v.is_null())
}

/// Decimal from a JSON string or number; scientific notation is accepted
pub fn to_decimal(value: &Value) -> Option<Decimal> {
    let text = match value {
        Value::String(s) if !s.is_empty() => s.clone(),
        Value::Number(n) => n.to_string(),
        _ => return None,
    };
    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn test_safe_string_from_number() {
        let obj = json!({"id": 12345});
        assert_eq!(safe_string(&obj, "id"), Some("12345".to_string()));
    }

    #[test]
    fn test_safe_string_null_value() {
        let obj = json!({"base_unit": null});
        assert_eq!(safe_string(&obj, "base_unit"), None);
        assert_eq!(safe_string(&obj, "missing"), None);
    }

    #[test]
    fn test_safe_string_case() {
        let obj = json!({"currency": "php", "market": "BTCPHP"});
        assert_eq!(safe_string_upper(&obj, "currency").as_deref(), Some("PHP"));
        assert_eq!(safe_string_lower(&obj, "market").as_deref(), Some("btcphp"));
    }

    #[test]
    fn test_safe_integer_from_string() {
        let obj = json!({"at": "1551924191", "bad": "abc"});
        assert_eq!(safe_integer(&obj, "at"), Some(1551924191));
        assert_eq!(safe_integer(&obj, "bad"), None);
    }

    #[test]
    fn test_safe_decimal() {
        let obj = json!({"price": "3512000.5", "vol": 12.25, "empty": "", "tiny": "1e-8"});
        assert_eq!(safe_decimal(&obj, "price"), Some(dec!(3512000.5)));
        assert_eq!(safe_decimal(&obj, "vol"), Some(dec!(12.25)));
        assert_eq!(safe_decimal(&obj, "empty"), None);
        assert_eq!(safe_decimal(&obj, "tiny"), Some(dec!(0.00000001)));
    }

    #[test]
    fn test_safe_value_null() {
        let obj = json!({"ticker": null, "accounts": []});
        assert!(safe_value(&obj, "ticker").is_none());
        assert!(safe_value(&obj, "accounts").is_some());
    }
}
