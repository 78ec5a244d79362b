//! Trade type - 체결 내역

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::OrderSide;
use crate::utils::time::iso8601;

/// 체결 내역
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trade {
    /// 체결 ID
    pub id: String,
    /// 주문 ID
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<String>,
    /// 타임스탬프 (밀리초)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
    /// ISO 8601 datetime
    #[serde(skip_serializing_if = "Option::is_none")]
    pub datetime: Option<String>,
    /// 심볼
    pub symbol: String,
    /// 매수/매도
    #[serde(skip_serializing_if = "Option::is_none")]
    pub side: Option<OrderSide>,
    /// 체결 가격
    pub price: Decimal,
    /// 체결 수량
    pub amount: Decimal,
    /// 체결 금액
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost: Option<Decimal>,
    /// 원본 응답
    #[serde(default)]
    pub info: serde_json::Value,
}

impl Trade {
    /// 새 Trade 생성
    pub fn new(id: String, symbol: String, price: Decimal, amount: Decimal) -> Self {
        Self {
            id,
            order: None,
            timestamp: None,
            datetime: None,
            symbol,
            side: None,
            price,
            amount,
            cost: Some(price * amount),
            info: serde_json::Value::Null,
        }
    }

    /// 타임스탬프 설정
    pub fn with_timestamp(mut self, ts: i64) -> Self {
        self.timestamp = Some(ts);
        self.datetime = iso8601(ts);
        self
    }

    /// 매수인지 확인
    pub fn is_buy(&self) -> bool {
        self.side == Some(OrderSide::Buy)
    }
}
