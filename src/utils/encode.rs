//! Query-string encoding for request signing
//!
//! The signed string is compared byte for byte by the exchange, so key order
//! and escaping here are part of the wire format.

use serde_json::{Map, Value};

use crate::errors::{CcxtError, CcxtResult};

/// Request parameters; insertion order is kept (serde_json `preserve_order`)
pub type Params = Map<String, Value>;

/// Key of the batched order list
pub const ORDERS_KEY: &str = "orders";

/// Percent-escape a single key or value (RFC 3986 unreserved set kept)
pub fn percent_escape(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

/// Stringify a scalar JSON value; `None` for null, error for composites
fn scalar_to_string(key: &str, value: &Value) -> CcxtResult<Option<String>> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s.clone())),
        Value::Number(n) => Ok(Some(n.to_string())),
        Value::Bool(b) => Ok(Some(b.to_string())),
        Value::Array(_) | Value::Object(_) => Err(CcxtError::BadRequest {
            message: format!("Parameter \"{key}\" must be a scalar value"),
        }),
    }
}

/// `key=value&...` with both sides percent-escaped; keys sorted when `sort`
pub fn urlencode(params: &Params, sort: bool) -> CcxtResult<String> {
    let mut keys: Vec<&String> = params.keys().collect();
    if sort {
        keys.sort();
    }

    let mut pairs = Vec::with_capacity(keys.len());
    for key in keys {
        if let Some(value) = scalar_to_string(key, &params[key.as_str()])? {
            pairs.push(format!("{}={}", percent_escape(key), percent_escape(&value)));
        }
    }
    Ok(pairs.join("&"))
}

/// Names of `{placeholder}` tokens in `path`, in order of appearance
pub fn extract_params(path: &str) -> Vec<String> {
    let mut names = Vec::new();
    let mut rest = path;
    while let Some(start) = rest.find('{') {
        let after = &rest[start + 1..];
        match after.find('}') {
            Some(end) => {
                names.push(after[..end].to_string());
                rest = &after[end + 1..];
            }
            None => break,
        }
    }
    names
}

/// Substitute `{placeholder}` tokens with matching params.
///
/// Returns the imploded path and the params left over for the query.
/// The caller's map is not modified.
pub fn implode_params(path: &str, params: &Params) -> CcxtResult<(String, Params)> {
    let mut imploded = path.to_string();
    let mut remaining = params.clone();

    for name in extract_params(path) {
        let value = remaining
            .remove(&name)
            .and_then(|v| scalar_to_string(&name, &v).transpose())
            .transpose()?
            .ok_or_else(|| CcxtError::ArgumentsRequired {
                message: format!("Path \"{path}\" requires parameter \"{name}\""),
            })?;
        imploded = imploded.replace(&format!("{{{name}}}"), &value);
    }

    Ok((imploded, remaining))
}

/// Canonical encoding of signed params.
///
/// Scalar keys are sorted and escaped. The `orders` list, when present, is
/// appended afterwards as `orders%5B%5D%5B<field>%5D=<value>` per field,
/// keeping list order and each order's field order. Those values are not
/// escaped.
pub fn encode_params(params: &Params) -> CcxtResult<String> {
    let Some(orders) = params.get(ORDERS_KEY) else {
        return urlencode(params, true);
    };

    let orders = match orders {
        Value::Array(orders) => orders,
        Value::Null => return urlencode(params, true),
        _ => {
            return Err(CcxtError::BadRequest {
                message: "Parameter \"orders\" must be an array of objects".to_string(),
            })
        }
    };

    let mut scalars = params.clone();
    scalars.remove(ORDERS_KEY);
    let mut encoded = urlencode(&scalars, true)?;

    for order in orders {
        let Value::Object(fields) = order else {
            return Err(CcxtError::BadRequest {
                message: "Each entry of \"orders\" must be an object".to_string(),
            });
        };
        for (field, value) in fields {
            if let Some(value) = scalar_to_string(field, value)? {
                if !encoded.is_empty() {
                    encoded.push('&');
                }
                encoded.push_str(&format!("orders%5B%5D%5B{field}%5D={value}"));
            }
        }
    }

    Ok(encoded)
}
