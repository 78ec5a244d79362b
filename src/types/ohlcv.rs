//! OHLCV type - 캔들 데이터

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// OHLCV 캔들 데이터
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OHLCV {
    /// 타임스탬프 (밀리초)
    pub timestamp: i64,
    /// 시가
    pub open: Decimal,
    /// 고가
    pub high: Decimal,
    /// 저가
    pub low: Decimal,
    /// 종가
    pub close: Decimal,
    /// 거래량
    pub volume: Decimal,
}

impl OHLCV {
    /// 새 OHLCV 생성
    pub fn new(
        timestamp: i64,
        open: Decimal,
        high: Decimal,
        low: Decimal,
        close: Decimal,
        volume: Decimal,
    ) -> Self {
        Self {
            timestamp,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    /// 상승 캔들 여부
    pub fn is_bullish(&self) -> bool {
        self.close > self.open
    }

    /// 캔들 전체 범위
    pub fn range(&self) -> Decimal {
        self.high - self.low
    }
}
