//! Exchange trait - Unified exchange interface
//!
//! Exchange metadata, the request descriptor and the trait every
//! exchange implementation provides.

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::{
    Balances, Market, OHLCV, Order, OrderBook, OrderRequest, OrderSide, OrderType, Ticker, Trade,
    Transaction,
};
use crate::errors::{CcxtError, CcxtResult, ErrorKind};
use crate::utils::crypto::HashAlgorithm;
use crate::utils::encode::Params;

/// Exchange ID - identifies the exchange
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExchangeId {
    Coinzip,
}

impl ExchangeId {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExchangeId::Coinzip => "coinzip",
        }
    }
}

impl std::fmt::Display for ExchangeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// 타임프레임
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Timeframe {
    #[serde(rename = "1s")]
    Second1,
    #[serde(rename = "1m")]
    Minute1,
    #[serde(rename = "3m")]
    Minute3,
    #[serde(rename = "5m")]
    Minute5,
    #[serde(rename = "15m")]
    Minute15,
    #[serde(rename = "30m")]
    Minute30,
    #[serde(rename = "1h")]
    Hour1,
    #[serde(rename = "2h")]
    Hour2,
    #[serde(rename = "4h")]
    Hour4,
    #[serde(rename = "6h")]
    Hour6,
    #[serde(rename = "12h")]
    Hour12,
    #[serde(rename = "1d")]
    Day1,
    #[serde(rename = "3d")]
    Day3,
    #[serde(rename = "1w")]
    Week1,
    #[serde(rename = "1M")]
    Month1,
}

impl Timeframe {
    pub fn as_str(&self) -> &'static str {
        match self {
            Timeframe::Second1 => "1s",
            Timeframe::Minute1 => "1m",
            Timeframe::Minute3 => "3m",
            Timeframe::Minute5 => "5m",
            Timeframe::Minute15 => "15m",
            Timeframe::Minute30 => "30m",
            Timeframe::Hour1 => "1h",
            Timeframe::Hour2 => "2h",
            Timeframe::Hour4 => "4h",
            Timeframe::Hour6 => "6h",
            Timeframe::Hour12 => "12h",
            Timeframe::Day1 => "1d",
            Timeframe::Day3 => "3d",
            Timeframe::Week1 => "1w",
            Timeframe::Month1 => "1M",
        }
    }

    /// 밀리초 단위 기간
    pub fn to_millis(&self) -> i64 {
        const MINUTE: i64 = 60 * 1000;
        match self {
            Timeframe::Second1 => 1000,
            Timeframe::Minute1 => MINUTE,
            Timeframe::Minute3 => 3 * MINUTE,
            Timeframe::Minute5 => 5 * MINUTE,
            Timeframe::Minute15 => 15 * MINUTE,
            Timeframe::Minute30 => 30 * MINUTE,
            Timeframe::Hour1 => 60 * MINUTE,
            Timeframe::Hour2 => 120 * MINUTE,
            Timeframe::Hour4 => 240 * MINUTE,
            Timeframe::Hour6 => 360 * MINUTE,
            Timeframe::Hour12 => 720 * MINUTE,
            Timeframe::Day1 => 1440 * MINUTE,
            Timeframe::Day3 => 3 * 1440 * MINUTE,
            Timeframe::Week1 => 7 * 1440 * MINUTE,
            Timeframe::Month1 => 30 * 1440 * MINUTE,
        }
    }
}

/// Exchange feature flags - indicates supported functionality
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeFeatures {
    // === Market Types ===
    pub cors: bool,
    pub spot: bool,
    pub margin: bool,
    pub swap: bool,
    pub future: bool,

    // === Public API ===
    pub fetch_markets: bool,
    pub fetch_currencies: bool,
    pub fetch_ticker: bool,
    pub fetch_tickers: bool,
    pub fetch_order_book: bool,
    pub fetch_trades: bool,
    pub fetch_ohlcv: bool,
    pub fetch_time: bool,

    // === Private API ===
    pub fetch_balance: bool,
    pub create_order: bool,
    pub create_orders: bool,
    pub cancel_order: bool,
    pub cancel_all_orders: bool,
    pub fetch_order: bool,
    pub fetch_orders: bool,
    pub fetch_open_orders: bool,
    pub fetch_closed_orders: bool,
    pub fetch_my_trades: bool,

    // === Funding ===
    pub fetch_deposits: bool,
    pub fetch_withdrawals: bool,
    pub deposit: bool,
    pub withdraw: bool,
}

/// 거래소 URL 정보
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExchangeUrls {
    pub logo: Option<String>,
    pub api: HashMap<String, String>,
    pub www: Option<String>,
    pub doc: Vec<String>,
    pub fees: Option<String>,
}

/// 필수 인증 정보
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequiredCredentials {
    pub api_key: bool,
    pub secret: bool,
}

impl Default for RequiredCredentials {
    fn default() -> Self {
        Self {
            api_key: true,
            secret: true,
        }
    }
}

/// API 접근 범위
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiScope {
    Public,
    Private,
}

impl ApiScope {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApiScope::Public => "public",
            ApiScope::Private => "private",
        }
    }
}

/// HTTP 메서드
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 엔드포인트 선언 (범위, 메서드, 경로)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Endpoint {
    pub scope: ApiScope,
    pub method: HttpMethod,
    /// `{placeholder}` 토큰을 포함할 수 있는 상대 경로
    pub path: &'static str,
}

impl Endpoint {
    pub const fn new(scope: ApiScope, method: HttpMethod, path: &'static str) -> Self {
        Self {
            scope,
            method,
            path,
        }
    }
}

/// 서명된 요청
#[derive(Debug, Clone, PartialEq)]
pub struct SignedRequest {
    pub url: String,
    pub method: String,
    pub headers: HashMap<String, String>,
    pub body: Option<String>,
}

/// Static description of an exchange: identity, urls, capabilities,
/// endpoint table and vendor error codes.
#[derive(Debug, Clone)]
pub struct ExchangeDescription {
    pub id: String,
    pub name: String,
    pub countries: Vec<String>,
    pub version: String,
    /// 요청 간 최소 간격 (밀리초), 메타데이터 전용
    pub rate_limit: u64,
    /// HMAC 해시 함수
    pub hash: HashAlgorithm,
    pub required_credentials: RequiredCredentials,
    pub urls: ExchangeUrls,
    pub has: ExchangeFeatures,
    pub timeframes: HashMap<Timeframe, String>,
    pub api: Vec<Endpoint>,
    /// 거래소 에러 코드 → 에러 종류
    pub exceptions: HashMap<i64, ErrorKind>,
}

/// Replacement values for an [`ExchangeDescription`].
///
/// A `Some` field replaces the whole base field, `None` keeps it.
#[derive(Debug, Clone, Default)]
pub struct DescriptionOverride {
    pub id: Option<String>,
    pub name: Option<String>,
    pub countries: Option<Vec<String>>,
    pub version: Option<String>,
    pub rate_limit: Option<u64>,
    pub hash: Option<HashAlgorithm>,
    pub required_credentials: Option<RequiredCredentials>,
    pub urls: Option<ExchangeUrls>,
    pub has: Option<ExchangeFeatures>,
    pub timeframes: Option<HashMap<Timeframe, String>>,
    pub api: Option<Vec<Endpoint>>,
    pub exceptions: Option<HashMap<i64, ErrorKind>>,
}

impl ExchangeDescription {
    /// 모든 거래소 공통 기본값
    pub fn base() -> Self {
        Self {
            id: String::new(),
            name: String::new(),
            countries: Vec::new(),
            version: "v1".into(),
            rate_limit: 2000,
            hash: HashAlgorithm::Sha256,
            required_credentials: RequiredCredentials::default(),
            urls: ExchangeUrls::default(),
            has: ExchangeFeatures::default(),
            timeframes: HashMap::new(),
            api: Vec::new(),
            exceptions: HashMap::new(),
        }
    }

    /// Apply `layer` field by field on top of `self`
    pub fn merge(self, layer: DescriptionOverride) -> Self {
        Self {
            id: layer.id.unwrap_or(self.id),
            name: layer.name.unwrap_or(self.name),
            countries: layer.countries.unwrap_or(self.countries),
            version: layer.version.unwrap_or(self.version),
            rate_limit: layer.rate_limit.unwrap_or(self.rate_limit),
            hash: layer.hash.unwrap_or(self.hash),
            required_credentials: layer
                .required_credentials
                .unwrap_or(self.required_credentials),
            urls: layer.urls.unwrap_or(self.urls),
            has: layer.has.unwrap_or(self.has),
            timeframes: layer.timeframes.unwrap_or(self.timeframes),
            api: layer.api.unwrap_or(self.api),
            exceptions: layer.exceptions.unwrap_or(self.exceptions),
        }
    }

    /// 선언된 엔드포인트 조회
    pub fn endpoint(&self, scope: ApiScope, method: HttpMethod, path: &str) -> Option<&Endpoint> {
        self.api
            .iter()
            .find(|e| e.scope == scope && e.method == method && e.path == path)
    }
}

/// 거래소 통합 인터페이스
///
/// CCXT의 Exchange 클래스를 Rust trait으로 포팅
#[async_trait]
pub trait Exchange: Send + Sync {
    // === 메타데이터 ===

    /// 거래소 ID
    fn id(&self) -> ExchangeId;

    /// 거래소 이름
    fn name(&self) -> &str;

    /// API 버전
    fn version(&self) -> &str {
        "v1"
    }

    /// 국가 목록
    fn countries(&self) -> &[String] {
        &[]
    }

    /// 레이트 리밋 (밀리초)
    fn rate_limit(&self) -> u64 {
        1000
    }

    /// 지원 기능
    fn has(&self) -> &ExchangeFeatures;

    /// 특정 기능 지원 여부
    fn has_feature(&self, feature: &str) -> bool {
        let features = self.has();
        match feature {
            "fetchMarkets" => features.fetch_markets,
            "fetchCurrencies" => features.fetch_currencies,
            "fetchTicker" => features.fetch_ticker,
            "fetchTickers" => features.fetch_tickers,
            "fetchOrderBook" => features.fetch_order_book,
            "fetchTrades" => features.fetch_trades,
            "fetchOHLCV" => features.fetch_ohlcv,
            "fetchTime" => features.fetch_time,
            "fetchBalance" => features.fetch_balance,
            "createOrder" => features.create_order,
            "createOrders" => features.create_orders,
            "cancelOrder" => features.cancel_order,
            "cancelAllOrders" => features.cancel_all_orders,
            "fetchOrder" => features.fetch_order,
            "fetchOrders" => features.fetch_orders,
            "fetchOpenOrders" => features.fetch_open_orders,
            "fetchClosedOrders" => features.fetch_closed_orders,
            "fetchMyTrades" => features.fetch_my_trades,
            "fetchDeposits" => features.fetch_deposits,
            "fetchWithdrawals" => features.fetch_withdrawals,
            "deposit" => features.deposit,
            "withdraw" => features.withdraw,
            _ => false,
        }
    }

    /// URL 정보
    fn urls(&self) -> &ExchangeUrls;

    /// 지원 타임프레임
    fn timeframes(&self) -> &HashMap<Timeframe, String>;

    // === Public API ===

    /// 마켓 로드 (캐싱)
    async fn load_markets(&self, reload: bool) -> CcxtResult<HashMap<String, Market>>;

    /// 마켓 목록 조회
    async fn fetch_markets(&self) -> CcxtResult<Vec<Market>>;

    /// 시세 조회
    async fn fetch_ticker(&self, symbol: &str) -> CcxtResult<Ticker>;

    /// 복수 시세 조회
    async fn fetch_tickers(&self, symbols: Option<&[&str]>) -> CcxtResult<HashMap<String, Ticker>> {
        let _ = symbols;
        Err(CcxtError::NotSupported {
            feature: "fetchTickers".into(),
        })
    }

    /// 호가창 조회
    async fn fetch_order_book(&self, symbol: &str, limit: Option<u32>) -> CcxtResult<OrderBook>;

    /// 체결 내역 조회
    async fn fetch_trades(
        &self,
        symbol: &str,
        since: Option<i64>,
        limit: Option<u32>,
    ) -> CcxtResult<Vec<Trade>>;

    /// OHLCV 조회
    async fn fetch_ohlcv(
        &self,
        symbol: &str,
        timeframe: Timeframe,
        since: Option<i64>,
        limit: Option<u32>,
    ) -> CcxtResult<Vec<OHLCV>>;

    /// 서버 시간 (밀리초)
    async fn fetch_time(&self) -> CcxtResult<i64> {
        Err(CcxtError::NotSupported {
            feature: "fetchTime".into(),
        })
    }

    // === Private API ===

    /// 잔고 조회
    async fn fetch_balance(&self) -> CcxtResult<Balances>;

    /// 주문 생성
    async fn create_order(
        &self,
        symbol: &str,
        order_type: OrderType,
        side: OrderSide,
        amount: Decimal,
        price: Option<Decimal>,
    ) -> CcxtResult<Order>;

    /// 지정가 주문
    async fn create_limit_order(
        &self,
        symbol: &str,
        side: OrderSide,
        amount: Decimal,
        price: Decimal,
    ) -> CcxtResult<Order> {
        self.create_order(symbol, OrderType::Limit, side, amount, Some(price))
            .await
    }

    /// 시장가 주문
    async fn create_market_order(
        &self,
        symbol: &str,
        side: OrderSide,
        amount: Decimal,
    ) -> CcxtResult<Order> {
        self.create_order(symbol, OrderType::Market, side, amount, None)
            .await
    }

    /// 복수 주문 생성
    async fn create_orders(&self, orders: Vec<OrderRequest>) -> CcxtResult<Vec<Order>> {
        let _ = orders;
        Err(CcxtError::NotSupported {
            feature: "createOrders".into(),
        })
    }

    /// 주문 취소
    async fn cancel_order(&self, id: &str, symbol: &str) -> CcxtResult<Order>;

    /// Cancel all orders, optionally for one symbol
    async fn cancel_all_orders(&self, symbol: Option<&str>) -> CcxtResult<Vec<Order>> {
        let _ = symbol;
        Err(CcxtError::NotSupported {
            feature: "cancelAllOrders".into(),
        })
    }

    /// 주문 조회
    async fn fetch_order(&self, id: &str, symbol: &str) -> CcxtResult<Order>;

    /// 미체결 주문 목록
    async fn fetch_open_orders(
        &self,
        symbol: Option<&str>,
        since: Option<i64>,
        limit: Option<u32>,
    ) -> CcxtResult<Vec<Order>>;

    /// 체결 완료 주문 목록
    async fn fetch_closed_orders(
        &self,
        symbol: Option<&str>,
        since: Option<i64>,
        limit: Option<u32>,
    ) -> CcxtResult<Vec<Order>> {
        let _ = (symbol, since, limit);
        Err(CcxtError::NotSupported {
            feature: "fetchClosedOrders".into(),
        })
    }

    /// 전체 주문 목록
    async fn fetch_orders(
        &self,
        symbol: Option<&str>,
        since: Option<i64>,
        limit: Option<u32>,
    ) -> CcxtResult<Vec<Order>> {
        let _ = (symbol, since, limit);
        Err(CcxtError::NotSupported {
            feature: "fetchOrders".into(),
        })
    }

    /// 내 체결 내역
    async fn fetch_my_trades(
        &self,
        symbol: Option<&str>,
        since: Option<i64>,
        limit: Option<u32>,
    ) -> CcxtResult<Vec<Trade>> {
        let _ = (symbol, since, limit);
        Err(CcxtError::NotSupported {
            feature: "fetchMyTrades".into(),
        })
    }

    // === 입출금 ===

    /// 입금 내역
    async fn fetch_deposits(
        &self,
        code: Option<&str>,
        since: Option<i64>,
        limit: Option<u32>,
    ) -> CcxtResult<Vec<Transaction>> {
        let _ = (code, since, limit);
        Err(CcxtError::NotSupported {
            feature: "fetchDeposits".into(),
        })
    }

    // === Utilities ===

    /// Convert symbol to market ID
    fn market_id(&self, symbol: &str) -> Option<String>;

    /// Convert market ID to symbol
    fn symbol(&self, market_id: &str) -> Option<String>;

    /// Sign a request
    fn sign(
        &self,
        path: &str,
        api: ApiScope,
        method: HttpMethod,
        params: &Params,
        headers: Option<HashMap<String, String>>,
        body: Option<&str>,
    ) -> CcxtResult<SignedRequest>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeframe() {
        assert_eq!(Timeframe::Minute1.as_str(), "1m");
        assert_eq!(Timeframe::Hour1.to_millis(), 3600000);
        assert_eq!(Timeframe::Day1.to_millis(), 86400000);
        assert_eq!(Timeframe::Week1.to_millis(), 10080 * 60 * 1000);
    }

    #[test]
    fn test_exchange_id() {
        assert_eq!(ExchangeId::Coinzip.as_str(), "coinzip");
        assert_eq!(format!("{}", ExchangeId::Coinzip), "coinzip");
    }

    #[test]
    fn test_merge_replaces_whole_fields() {
        let base = ExchangeDescription::base();
        assert_eq!(base.version, "v1");

        let mut urls = ExchangeUrls::default();
        urls.api.insert("rest".into(), "https://example.test".into());

        let merged = base.merge(DescriptionOverride {
            version: Some("v2".into()),
            urls: Some(urls),
            ..Default::default()
        });

        assert_eq!(merged.version, "v2");
        assert_eq!(merged.urls.api.len(), 1);
        assert!(merged.urls.www.is_none());
        // untouched fields keep base values
        assert_eq!(merged.rate_limit, 2000);
        assert_eq!(merged.hash, HashAlgorithm::Sha256);
    }

    #[test]
    fn test_endpoint_lookup() {
        let description = ExchangeDescription::base().merge(DescriptionOverride {
            api: Some(vec![Endpoint::new(
                ApiScope::Private,
                HttpMethod::Post,
                "orders",
            )]),
            ..Default::default()
        });

        assert!(description
            .endpoint(ApiScope::Private, HttpMethod::Post, "orders")
            .is_some());
        assert!(description
            .endpoint(ApiScope::Private, HttpMethod::Get, "orders")
            .is_none());
        assert!(description
            .endpoint(ApiScope::Public, HttpMethod::Post, "orders")
            .is_none());
    }
}
