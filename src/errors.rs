//! CCXT Error Hierarchy
//!
//! Subset of CCXT's error classes raised by the Coinzip adapter, plus the
//! vendor error-code table type.

use thiserror::Error;

/// CCXT error hierarchy
///
/// - ExchangeError
///   - AuthenticationError
///     - MissingCredential (raised locally, before any request is sent)
///   - BadRequest
///     - BadSymbol
///   - InsufficientFunds
///   - InvalidOrder
///     - OrderNotFound
///   - NotSupported
/// - OperationFailed
///   - NetworkError
///     - RateLimitExceeded
///     - ExchangeNotAvailable
///     - RequestTimeout
///   - BadResponse
#[derive(Error, Debug)]
pub enum CcxtError {
    // === ExchangeError family ===
    /// Generic exchange error
    #[error("Exchange error: {message}")]
    ExchangeError { message: String },

    /// Authentication rejected by the exchange
    #[error("Authentication error: {message}")]
    AuthenticationError { message: String },

    /// A private call was attempted without the credential configured
    #[error("{exchange} requires \"{credential}\" credential")]
    MissingCredential { exchange: String, credential: String },

    /// Required arguments missing
    #[error("Arguments required: {message}")]
    ArgumentsRequired { message: String },

    /// Invalid request parameters
    #[error("Bad request: {message}")]
    BadRequest { message: String },

    /// Invalid trading symbol
    #[error("Bad symbol: {symbol}")]
    BadSymbol { symbol: String },

    /// Not enough balance
    #[error("Insufficient funds: {message}")]
    InsufficientFunds { message: String },

    /// Generic invalid order error
    #[error("Invalid order: {message}")]
    InvalidOrder { message: String },

    /// Order not found (or no longer cancelable)
    #[error("Order not found: {message}")]
    OrderNotFound { message: String },

    /// Feature or endpoint not supported by this exchange
    #[error("Not supported: {feature}")]
    NotSupported { feature: String },

    // === OperationFailed / NetworkError family ===
    /// Generic network error
    #[error("Network error: {url} - {message}")]
    NetworkError { url: String, message: String },

    /// Rate limit exceeded
    #[error("Rate limit exceeded: {message}")]
    RateLimitExceeded { message: String },

    /// Exchange is temporarily unavailable
    #[error("Exchange not available: {message}")]
    ExchangeNotAvailable { message: String },

    /// Request timed out
    #[error("Request timeout: {url}")]
    RequestTimeout { url: String },

    /// Invalid response from exchange
    #[error("Bad response: {message}")]
    BadResponse { message: String },

    // === Parsing errors ===
    /// Failed to parse response data
    #[error("Parse error: {data_type} - {message}")]
    ParseError { data_type: String, message: String },

    /// JSON parsing error
    #[error("JSON error: {message}")]
    JsonError { message: String },
}

impl CcxtError {
    /// Returns the error code as a string constant
    pub fn code(&self) -> &'static str {
        match self {
            CcxtError::ExchangeError { .. } => "EXCHANGE_ERROR",
            CcxtError::AuthenticationError { .. } => "AUTHENTICATION_ERROR",
            CcxtError::MissingCredential { .. } => "MISSING_CREDENTIAL",
            CcxtError::ArgumentsRequired { .. } => "ARGUMENTS_REQUIRED",
            CcxtError::BadRequest { .. } => "BAD_REQUEST",
            CcxtError::BadSymbol { .. } => "BAD_SYMBOL",
            CcxtError::InsufficientFunds { .. } => "INSUFFICIENT_FUNDS",
            CcxtError::InvalidOrder { .. } => "INVALID_ORDER",
            CcxtError::OrderNotFound { .. } => "ORDER_NOT_FOUND",
            CcxtError::NotSupported { .. } => "NOT_SUPPORTED",
            CcxtError::NetworkError { .. } => "NETWORK_ERROR",
            CcxtError::RateLimitExceeded { .. } => "RATE_LIMIT_EXCEEDED",
            CcxtError::ExchangeNotAvailable { .. } => "EXCHANGE_NOT_AVAILABLE",
            CcxtError::RequestTimeout { .. } => "REQUEST_TIMEOUT",
            CcxtError::BadResponse { .. } => "BAD_RESPONSE",
            CcxtError::ParseError { .. } => "PARSE_ERROR",
            CcxtError::JsonError { .. } => "JSON_ERROR",
        }
    }

    /// Returns true if this error is temporary and the operation can be retried.
    ///
    /// The adapter itself never retries; callers decide.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            CcxtError::NetworkError { .. }
                | CcxtError::RequestTimeout { .. }
                | CcxtError::RateLimitExceeded { .. }
                | CcxtError::ExchangeNotAvailable { .. }
        )
    }

    /// Returns true if this is an authentication-related error
    pub fn is_auth_error(&self) -> bool {
        matches!(
            self,
            CcxtError::AuthenticationError { .. } | CcxtError::MissingCredential { .. }
        )
    }

    /// Returns true if this is an order-related error
    pub fn is_order_error(&self) -> bool {
        matches!(
            self,
            CcxtError::InvalidOrder { .. } | CcxtError::OrderNotFound { .. }
        )
    }

    /// Returns true if this is a network-related error
    pub fn is_network_error(&self) -> bool {
        matches!(
            self,
            CcxtError::NetworkError { .. }
                | CcxtError::RateLimitExceeded { .. }
                | CcxtError::ExchangeNotAvailable { .. }
                | CcxtError::RequestTimeout { .. }
        )
    }

    /// The tag of this error, if it is one an exchange error table can produce
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            CcxtError::ExchangeError { .. } => Some(ErrorKind::Exchange),
            CcxtError::AuthenticationError { .. } => Some(ErrorKind::Authentication),
            CcxtError::BadRequest { .. } => Some(ErrorKind::BadRequest),
            CcxtError::InsufficientFunds { .. } => Some(ErrorKind::InsufficientFunds),
            CcxtError::InvalidOrder { .. } => Some(ErrorKind::InvalidOrder),
            CcxtError::OrderNotFound { .. } => Some(ErrorKind::OrderNotFound),
            CcxtError::RateLimitExceeded { .. } => Some(ErrorKind::RateLimitExceeded),
            CcxtError::ExchangeNotAvailable { .. } => Some(ErrorKind::ExchangeNotAvailable),
            _ => None,
        }
    }
}

/// Standardized error kinds that vendor error codes map onto.
///
/// Exchanges declare a static `(code, ErrorKind)` table; the kind is turned
/// into a full [`CcxtError`] once the vendor message is known.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Exchange,
    Authentication,
    BadRequest,
    InsufficientFunds,
    InvalidOrder,
    OrderNotFound,
    RateLimitExceeded,
    ExchangeNotAvailable,
}

impl ErrorKind {
    /// Build the concrete error carrying `message`
    pub fn into_error(self, message: impl Into<String>) -> CcxtError {
        let message = message.into();
        match self {
            ErrorKind::Exchange => CcxtError::ExchangeError { message },
            ErrorKind::Authentication => CcxtError::AuthenticationError { message },
            ErrorKind::BadRequest => CcxtError::BadRequest { message },
            ErrorKind::InsufficientFunds => CcxtError::InsufficientFunds { message },
            ErrorKind::InvalidOrder => CcxtError::InvalidOrder { message },
            ErrorKind::OrderNotFound => CcxtError::OrderNotFound { message },
            ErrorKind::RateLimitExceeded => CcxtError::RateLimitExceeded { message },
            ErrorKind::ExchangeNotAvailable => CcxtError::ExchangeNotAvailable { message },
        }
    }
}

// === From implementations for common error types ===

impl From<serde_json::Error> for CcxtError {
    fn from(err: serde_json::Error) -> Self {
        CcxtError::JsonError {
            message: err.to_string(),
        }
    }
}

impl From<reqwest::Error> for CcxtError {
    fn from(err: reqwest::Error) -> Self {
        let url = err.url().map(|u| u.to_string()).unwrap_or_default();
        if err.is_timeout() {
            CcxtError::RequestTimeout { url }
        } else if err.is_connect() {
            CcxtError::NetworkError {
                url,
                message: "Connection failed".into(),
            }
        } else {
            CcxtError::NetworkError {
                url,
                message: err.to_string(),
            }
        }
    }
}

/// Result 타입 alias
pub type CcxtResult<T> = Result<T, CcxtError>;
