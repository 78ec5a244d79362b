//! HTTP client for API requests

use reqwest::{Client, Method};
use std::time::Duration;
use tracing::debug;

use super::ExchangeConfig;
use crate::errors::{CcxtError, CcxtResult};
use crate::types::SignedRequest;

/// Raw response handed back to the exchange for error mapping and parsing
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// HTTP 클라이언트
///
/// Sends a signed request exactly once. Status handling is left to the
/// exchange, which knows how to read its own error payloads.
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// 새로운 HTTP 클라이언트 생성
    pub fn new(config: &ExchangeConfig) -> CcxtResult<Self> {
        let mut builder = Client::builder().timeout(Duration::from_millis(config.timeout_ms()));
        if let Some(user_agent) = config.user_agent() {
            builder = builder.user_agent(user_agent);
        }

        let client = builder.build().map_err(|e| CcxtError::NetworkError {
            url: String::new(),
            message: e.to_string(),
        })?;

        Ok(Self { client })
    }

    /// Send the request described by `request`
    pub async fn execute(&self, request: &SignedRequest) -> CcxtResult<HttpResponse> {
        let method = Method::from_bytes(request.method.as_bytes()).map_err(|_| {
            CcxtError::BadRequest {
                message: format!("Unsupported HTTP method: {}", request.method),
            }
        })?;

        // the query string of a private GET carries the signature
        let endpoint = request.url.split('?').next().unwrap_or_default();
        debug!(method = %request.method, url = endpoint, "sending request");

        let mut builder = self.client.request(method, &request.url);
        for (key, value) in &request.headers {
            builder = builder.header(key.as_str(), value.as_str());
        }
        if let Some(body) = &request.body {
            builder = builder.body(body.clone());
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        debug!(status, url = endpoint, "received response");

        Ok(HttpResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_success_range() {
        let ok = HttpResponse {
            status: 201,
            body: String::new(),
        };
        assert!(ok.is_success());

        let not_found = HttpResponse {
            status: 404,
            body: String::new(),
        };
        assert!(!not_found.is_success());
    }

    #[test]
    fn test_client_builds_with_user_agent() {
        let config = ExchangeConfig::new()
            .with_timeout(1000)
            .with_user_agent("ccxt-coinzip-test");
        assert!(HttpClient::new(&config).is_ok());
    }
}
