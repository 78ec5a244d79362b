//! Order type - 주문 정보

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::errors::CcxtError;
use crate::utils::time::iso8601;

/// 주문 상태
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Open,
    Closed,
    Canceled,
}

/// 주문 측면
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderSide {
    Buy,
    Sell,
}

impl OrderSide {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderSide::Buy => "buy",
            OrderSide::Sell => "sell",
        }
    }
}

impl FromStr for OrderSide {
    type Err = CcxtError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "buy" | "bid" => Ok(OrderSide::Buy),
            "sell" | "ask" => Ok(OrderSide::Sell),
            other => Err(CcxtError::ParseError {
                data_type: "OrderSide".into(),
                message: format!("Unknown order side: {other}"),
            }),
        }
    }
}

/// 주문 타입
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderType {
    Limit,
    Market,
}

impl OrderType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderType::Limit => "limit",
            OrderType::Market => "market",
        }
    }
}

impl FromStr for OrderType {
    type Err = CcxtError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "limit" => Ok(OrderType::Limit),
            "market" => Ok(OrderType::Market),
            other => Err(CcxtError::ParseError {
                data_type: "OrderType".into(),
                message: format!("Unknown order type: {other}"),
            }),
        }
    }
}

/// 주문 정보
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// 주문 ID
    pub id: String,
    /// 타임스탬프 (밀리초)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
    /// ISO 8601 datetime
    #[serde(skip_serializing_if = "Option::is_none")]
    pub datetime: Option<String>,
    /// 주문 상태, 알 수 없는 상태는 None
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<OrderStatus>,
    /// 심볼
    pub symbol: String,
    /// 주문 타입
    #[serde(rename = "type")]
    pub order_type: OrderType,
    /// 매수/매도
    pub side: OrderSide,
    /// 주문 가격
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,
    /// 평균 체결가
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average: Option<Decimal>,
    /// 주문 수량
    pub amount: Decimal,
    /// 체결된 수량
    #[serde(default)]
    pub filled: Decimal,
    /// 미체결 수량
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remaining: Option<Decimal>,
    /// 원본 응답
    #[serde(default)]
    pub info: serde_json::Value,
}

impl Order {
    /// 새 주문 생성
    pub fn new(
        id: String,
        symbol: String,
        order_type: OrderType,
        side: OrderSide,
        amount: Decimal,
    ) -> Self {
        Self {
            id,
            timestamp: None,
            datetime: None,
            status: Some(OrderStatus::Open),
            symbol,
            order_type,
            side,
            price: None,
            average: None,
            amount,
            filled: Decimal::ZERO,
            remaining: Some(amount),
            info: serde_json::Value::Null,
        }
    }

    /// 타임스탬프 설정
    pub fn with_timestamp(mut self, ts: i64) -> Self {
        self.timestamp = Some(ts);
        self.datetime = iso8601(ts);
        self
    }

    /// 미체결 여부
    pub fn is_open(&self) -> bool {
        self.status == Some(OrderStatus::Open)
    }

    /// 더 이상 취소할 수 없는 상태 (체결 완료 또는 취소됨)
    pub fn is_finished(&self) -> bool {
        matches!(
            self.status,
            Some(OrderStatus::Closed) | Some(OrderStatus::Canceled)
        )
    }
}

/// 주문 요청 - 복수 주문 생성시 사용
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequest {
    /// 심볼 (예: "BTC/PHP")
    pub symbol: String,
    /// 주문 타입
    #[serde(rename = "type")]
    pub order_type: OrderType,
    /// 매수/매도
    pub side: OrderSide,
    /// 주문 수량
    pub amount: Decimal,
    /// 주문 가격 (지정가)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,
}

impl OrderRequest {
    /// 지정가 주문 요청
    pub fn limit(symbol: &str, side: OrderSide, amount: Decimal, price: Decimal) -> Self {
        Self {
            symbol: symbol.to_string(),
            order_type: OrderType::Limit,
            side,
            amount,
            price: Some(price),
        }
    }

    /// 시장가 주문 요청
    pub fn market(symbol: &str, side: OrderSide, amount: Decimal) -> Self {
        Self {
            symbol: symbol.to_string(),
            order_type: OrderType::Market,
            side,
            amount,
            price: None,
        }
    }
}
