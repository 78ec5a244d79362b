//! Market type - 거래소 마켓 정보

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 마켓 정보
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Market {
    /// 거래소 내부 ID (예: 'btcphp')
    pub id: String,
    /// 통합 심볼 (예: 'BTC/PHP')
    pub symbol: String,
    /// 기준 화폐 (예: 'BTC')
    pub base: String,
    /// 견적 화폐 (예: 'PHP')
    pub quote: String,
    /// 거래소 기준 화폐 ID
    pub base_id: String,
    /// 거래소 견적 화폐 ID
    pub quote_id: String,
    /// 활성 상태
    pub active: bool,
    /// 정밀도
    pub precision: MarketPrecision,
    /// 거래 제한
    pub limits: MarketLimits,
    /// 원본 응답
    #[serde(default)]
    pub info: serde_json::Value,
}

/// 마켓 정밀도 (소수점 자릿수)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MarketPrecision {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<i32>,
}

/// 마켓 제한
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MarketLimits {
    #[serde(default)]
    pub amount: MinMax,
    #[serde(default)]
    pub price: MinMax,
    #[serde(default)]
    pub cost: MinMax,
}

/// 최소/최대 값
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MinMax {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<Decimal>,
}

impl Market {
    /// 현물 마켓 생성
    pub fn spot(id: String, symbol: String, base_id: String, quote_id: String) -> Self {
        Self {
            id,
            symbol,
            base: base_id.to_uppercase(),
            quote: quote_id.to_uppercase(),
            base_id,
            quote_id,
            active: true,
            precision: MarketPrecision::default(),
            limits: MarketLimits::default(),
            info: serde_json::Value::Null,
        }
    }

    /// 정밀도 설정
    pub fn with_precision(mut self, amount: i32, price: i32) -> Self {
        self.precision = MarketPrecision {
            amount: Some(amount),
            price: Some(price),
        };
        self
    }
}
