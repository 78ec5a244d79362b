//! Coinzip Exchange Implementation
//!
//! Peatio 기반 거래소 (필리핀). REST API v2, HMAC-SHA256 서명.

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{debug, warn};

use crate::client::{ExchangeConfig, HttpClient, HttpResponse};
use crate::errors::{CcxtError, CcxtResult, ErrorKind};
use crate::types::{
    ApiScope, Balance, Balances, DescriptionOverride, Endpoint, Exchange, ExchangeDescription,
    ExchangeFeatures, ExchangeId, ExchangeUrls, Fee, HttpMethod, Market, Order, OrderBook,
    OrderBookEntry, OrderRequest, OrderSide, OrderStatus, OrderType, SignedRequest, Ticker,
    Timeframe, Trade, Transaction, TransactionStatus, OHLCV,
};
use crate::types::ApiScope::{Private, Public};
use crate::types::HttpMethod::{Get, Post};
use crate::utils::crypto::{hmac_hex, HashAlgorithm};
use crate::utils::encode::{encode_params, implode_params, urlencode, Params, ORDERS_KEY};
use crate::utils::safe::{safe_integer, safe_string, safe_string_lower, safe_value, to_decimal};
use crate::utils::time::{now_ms, parse8601};

const API_URL: &str = "https://www.coinzip.co";
const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";
const DEFAULT_OHLCV_LIMIT: u32 = 500;

/// 선언된 REST 엔드포인트
const ENDPOINTS: &[Endpoint] = &[
    Endpoint::new(Public, Get, "markets"),
    Endpoint::new(Public, Get, "tickers"),
    Endpoint::new(Public, Get, "tickers/{market}"),
    Endpoint::new(Public, Get, "order_book"),
    Endpoint::new(Public, Get, "depth"),
    Endpoint::new(Public, Get, "trades"),
    Endpoint::new(Public, Get, "k"),
    Endpoint::new(Public, Get, "k_with_pending_trades"),
    Endpoint::new(Public, Get, "timestamp"),
    Endpoint::new(Private, Get, "members/me"),
    Endpoint::new(Private, Get, "deposits"),
    Endpoint::new(Private, Get, "deposit/id"),
    Endpoint::new(Private, Get, "orders"),
    Endpoint::new(Private, Get, "order"),
    Endpoint::new(Private, Get, "orders/summary"),
    Endpoint::new(Private, Get, "trades/my"),
    Endpoint::new(Private, Post, "orders"),
    Endpoint::new(Private, Post, "orders/multi"),
    Endpoint::new(Private, Post, "orders/clear"),
    Endpoint::new(Private, Post, "order/delete"),
];

/// Coinzip 거래소
pub struct Coinzip {
    config: ExchangeConfig,
    client: HttpClient,
    description: ExchangeDescription,
    markets: RwLock<HashMap<String, Market>>,
    markets_by_id: RwLock<HashMap<String, String>>,
}

impl Coinzip {
    /// 새 Coinzip 인스턴스 생성
    pub fn new(config: ExchangeConfig) -> CcxtResult<Self> {
        Self::with_description(config, DescriptionOverride::default())
    }

    /// Build with `layer` applied on top of the Coinzip description
    pub fn with_description(
        config: ExchangeConfig,
        layer: DescriptionOverride,
    ) -> CcxtResult<Self> {
        let client = HttpClient::new(&config)?;
        let mut description = ExchangeDescription::base()
            .merge(Self::describe())
            .merge(layer);

        if let Some(url) = config.api_url() {
            description
                .urls
                .api
                .insert("rest".into(), url.trim_end_matches('/').to_string());
        }

        Ok(Self {
            config,
            client,
            description,
            markets: RwLock::new(HashMap::new()),
            markets_by_id: RwLock::new(HashMap::new()),
        })
    }

    /// Coinzip 고유 설명
    pub fn describe() -> DescriptionOverride {
        let features = ExchangeFeatures {
            cors: false,
            spot: true,
            fetch_markets: true,
            fetch_currencies: false,
            fetch_ticker: true,
            fetch_tickers: true,
            fetch_order_book: true,
            fetch_trades: true,
            fetch_ohlcv: true,
            fetch_time: true,
            fetch_balance: true,
            create_order: true,
            create_orders: true,
            cancel_order: true,
            cancel_all_orders: true,
            fetch_order: true,
            fetch_orders: true,
            fetch_open_orders: true,
            fetch_closed_orders: true,
            fetch_my_trades: true,
            fetch_deposits: true,
            fetch_withdrawals: false,
            deposit: false,
            withdraw: false,
            ..Default::default()
        };

        let mut api_urls = HashMap::new();
        api_urls.insert("rest".into(), API_URL.into());

        let urls = ExchangeUrls {
            logo: Some("https://user-images.githubusercontent.com/786083/53869301-ecfc2200-4032-11e9-80bc-42eda484076f.png".into()),
            api: api_urls,
            www: Some(API_URL.into()),
            doc: vec!["https://www.coinzip.co/documents/api_v2".into()],
            fees: None,
        };

        let timeframes = [
            (Timeframe::Minute1, "1"),
            (Timeframe::Minute5, "5"),
            (Timeframe::Minute15, "15"),
            (Timeframe::Minute30, "30"),
            (Timeframe::Hour1, "60"),
            (Timeframe::Hour2, "120"),
            (Timeframe::Hour4, "240"),
            (Timeframe::Hour12, "720"),
            (Timeframe::Day1, "1440"),
            (Timeframe::Day3, "4320"),
            (Timeframe::Week1, "10080"),
        ]
        .into_iter()
        .map(|(tf, period)| (tf, period.to_string()))
        .collect();

        let exceptions = HashMap::from([
            (2002, ErrorKind::InsufficientFunds),
            (2003, ErrorKind::OrderNotFound),
        ]);

        DescriptionOverride {
            id: Some(ExchangeId::Coinzip.as_str().into()),
            name: Some("Coinzip".into()),
            countries: Some(
                ["PH", "KR", "JP", "SG", "AU"]
                    .iter()
                    .map(|c| c.to_string())
                    .collect(),
            ),
            version: Some("v2".into()),
            rate_limit: Some(400),
            hash: Some(HashAlgorithm::Sha256),
            urls: Some(urls),
            has: Some(features),
            timeframes: Some(timeframes),
            api: Some(ENDPOINTS.to_vec()),
            exceptions: Some(exceptions),
            ..Default::default()
        }
    }

    pub fn description(&self) -> &ExchangeDescription {
        &self.description
    }

    fn api_url(&self) -> &str {
        self.description
            .urls
            .api
            .get("rest")
            .map(String::as_str)
            .unwrap_or(API_URL)
    }

    fn credentials(&self) -> CcxtResult<(&str, &str)> {
        let missing = |credential: &str| CcxtError::MissingCredential {
            exchange: self.description.id.clone(),
            credential: credential.into(),
        };

        let required = self.description.required_credentials;
        let api_key = match self.config.api_key() {
            Some(key) if !key.is_empty() => key,
            _ if required.api_key => return Err(missing("apiKey")),
            _ => "",
        };
        let secret = match self.config.secret() {
            Some(secret) if !secret.is_empty() => secret,
            _ if required.secret => return Err(missing("secret")),
            _ => "",
        };
        Ok((api_key, secret))
    }

    /// Sign with a caller-supplied nonce instead of the current time.
    ///
    /// Output depends only on the arguments and the configured credentials.
    #[allow(clippy::too_many_arguments)]
    pub fn sign_with_nonce(
        &self,
        path: &str,
        api: ApiScope,
        method: HttpMethod,
        params: &Params,
        headers: Option<HashMap<String, String>>,
        body: Option<&str>,
        nonce: i64,
    ) -> CcxtResult<SignedRequest> {
        self.sign_request(path, api, method, params, headers, body, || nonce)
    }

    #[allow(clippy::too_many_arguments)]
    fn sign_request(
        &self,
        path: &str,
        api: ApiScope,
        method: HttpMethod,
        params: &Params,
        headers: Option<HashMap<String, String>>,
        body: Option<&str>,
        nonce: impl FnOnce() -> i64,
    ) -> CcxtResult<SignedRequest> {
        let (imploded, query) = implode_params(path, params)?;
        let request = format!("/api/{}/{}", self.description.version, imploded);
        let mut url = format!("{}{}", self.api_url(), request);
        let mut headers = headers.unwrap_or_default();

        if api == ApiScope::Public {
            if !query.is_empty() {
                let encoded = urlencode(&query, false)?;
                if !encoded.is_empty() {
                    url.push('?');
                    url.push_str(&encoded);
                }
            }
            return Ok(SignedRequest {
                url,
                method: method.to_string(),
                headers,
                body: body.map(str::to_string),
            });
        }

        let (api_key, secret) = self.credentials()?;

        let mut signed = Params::new();
        signed.insert("access_key".into(), json!(api_key));
        signed.insert("tonce".into(), json!(nonce()));
        for (key, value) in query {
            signed.insert(key, value);
        }

        let query = encode_params(&signed)?;
        let auth = format!("{method}|{request}|{query}");
        let signature = hmac_hex(self.description.hash, secret, &auth)?;
        let suffix = format!("{query}&signature={signature}");

        if method == HttpMethod::Get {
            url.push('?');
            url.push_str(&suffix);
            Ok(SignedRequest {
                url,
                method: method.to_string(),
                headers,
                body: None,
            })
        } else {
            headers.insert("Content-Type".into(), FORM_CONTENT_TYPE.into());
            Ok(SignedRequest {
                url,
                method: method.to_string(),
                headers,
                body: Some(suffix),
            })
        }
    }

    /// Sign, send and decode a call to a declared endpoint
    async fn request(
        &self,
        path: &str,
        api: ApiScope,
        method: HttpMethod,
        params: Params,
    ) -> CcxtResult<Value> {
        if self.description.endpoint(api, method, path).is_none() {
            return Err(CcxtError::NotSupported {
                feature: format!("{} {} {}", api.as_str(), method, path),
            });
        }

        let request = self.sign(path, api, method, &params, None, None)?;
        let response = self.client.execute(&request).await?;
        self.handle_errors(&response)?;

        if response.body.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&response.body)?)
    }

    async fn public_get(&self, path: &str, params: Params) -> CcxtResult<Value> {
        self.request(path, Public, Get, params).await
    }

    async fn private_get(&self, path: &str, params: Params) -> CcxtResult<Value> {
        self.request(path, Private, Get, params).await
    }

    async fn private_post(&self, path: &str, params: Params) -> CcxtResult<Value> {
        self.request(path, Private, Post, params).await
    }

    /// Map a vendor error payload or a failing HTTP status to an error
    fn handle_errors(&self, response: &HttpResponse) -> CcxtResult<()> {
        let body: Value = serde_json::from_str(&response.body).unwrap_or(Value::Null);
        let message = format!("{} {}", self.description.id, response.body);

        if let Some(error) = safe_value(&body, "error") {
            if let Some(code) = safe_integer(error, "code") {
                let kind = self
                    .description
                    .exceptions
                    .get(&code)
                    .copied()
                    .unwrap_or(ErrorKind::Exchange);
                warn!(
                    exchange = %self.description.id,
                    code,
                    vendor_message = %safe_string(error, "message").unwrap_or_default(),
                    "exchange returned an error"
                );
                return Err(kind.into_error(message));
            }
        }

        if response.is_success() {
            return Ok(());
        }

        let kind = match response.status {
            401 | 403 => ErrorKind::Authentication,
            404 => ErrorKind::BadRequest,
            429 => ErrorKind::RateLimitExceeded,
            500..=599 => ErrorKind::ExchangeNotAvailable,
            _ => ErrorKind::Exchange,
        };
        Err(kind.into_error(message))
    }

    fn read_markets(&self) -> CcxtResult<RwLockReadGuard<'_, HashMap<String, Market>>> {
        self.markets.read().map_err(|_| poisoned())
    }

    fn write_markets(&self) -> CcxtResult<RwLockWriteGuard<'_, HashMap<String, Market>>> {
        self.markets.write().map_err(|_| poisoned())
    }

    /// 로드된 마켓 조회
    fn market(&self, symbol: &str) -> CcxtResult<Market> {
        self.read_markets()?
            .get(symbol)
            .cloned()
            .ok_or_else(|| CcxtError::BadSymbol {
                symbol: symbol.to_string(),
            })
    }

    fn parse_market(&self, raw: &Value) -> CcxtResult<Market> {
        let id = safe_string(raw, "id").ok_or_else(|| bad_response("market without id"))?;
        let symbol = safe_string(raw, "name").ok_or_else(|| bad_response("market without name"))?;

        let (base_id, quote_id) = match (
            safe_string_lower(raw, "base_unit"),
            safe_string_lower(raw, "quote_unit"),
        ) {
            (Some(base), Some(quote)) => (base, quote),
            _ => {
                let (base, quote) = symbol
                    .split_once('/')
                    .ok_or_else(|| bad_response(&format!("cannot split market name {symbol}")))?;
                (base.to_lowercase(), quote.to_lowercase())
            }
        };

        let mut market = Market::spot(id, symbol, base_id, quote_id).with_precision(8, 8);
        market.info = raw.clone();
        Ok(market)
    }

    fn parse_ticker(&self, raw: &Value, symbol: &str) -> CcxtResult<Ticker> {
        let response = CoinzipTickerResponse::deserialize(raw)?;
        let ticker = response.ticker;

        let mut result = Ticker::new(symbol.to_string()).with_prices(
            ticker.last,
            ticker.buy,
            ticker.sell,
        );
        if let Some(at) = response.at {
            result = result.with_timestamp(at * 1000);
        }
        result.high = ticker.high;
        result.low = ticker.low;
        result.open = ticker.open;
        result.base_volume = ticker.vol;
        result.info = raw.get("ticker").cloned().unwrap_or(Value::Null);
        Ok(result)
    }

    /// Symbol for a market id; unknown ids fall back to `id[0..3]/id[3..6]`
    fn ticker_symbol(&self, market_id: &str) -> String {
        if let Some(symbol) = self.symbol(market_id) {
            return symbol;
        }
        match (market_id.get(0..3), market_id.get(3..6)) {
            (Some(base), Some(quote)) => {
                format!("{}/{}", base.to_uppercase(), quote.to_uppercase())
            }
            _ => market_id.to_uppercase(),
        }
    }

    fn resolve_symbol(&self, market: Option<&Market>, market_id: Option<&str>) -> String {
        if let Some(market) = market {
            return market.symbol.clone();
        }
        market_id
            .map(|id| self.symbol(id).unwrap_or_else(|| id.to_string()))
            .unwrap_or_default()
    }

    fn parse_trade(&self, raw: &Value, market: Option<&Market>) -> CcxtResult<Trade> {
        let trade = CoinzipTrade::deserialize(raw)?;
        let symbol = self.resolve_symbol(market, trade.market.as_deref());

        let mut result = Trade::new(
            trade.id,
            symbol,
            trade.price.unwrap_or_default(),
            trade.volume.unwrap_or_default(),
        );
        if let Some(ts) = trade.created_at.as_deref().and_then(parse8601) {
            result = result.with_timestamp(ts);
        }
        result.order = trade.order_id;
        result.side = trade.side.as_deref().and_then(|s| s.parse().ok());
        result.cost = trade.funds.or(result.cost);
        result.info = raw.clone();
        Ok(result)
    }

    fn parse_trades(
        &self,
        raw: &Value,
        market: Option<&Market>,
        since: Option<i64>,
        limit: Option<u32>,
    ) -> CcxtResult<Vec<Trade>> {
        let trades = as_array(raw)?
            .iter()
            .map(|t| self.parse_trade(t, market))
            .collect::<CcxtResult<Vec<_>>>()?;
        Ok(filter_by_since_limit(trades, since, limit, |t| t.timestamp))
    }

    fn parse_ohlcv(row: &Value) -> CcxtResult<OHLCV> {
        let fields = row
            .as_array()
            .filter(|r| r.len() >= 6)
            .ok_or_else(|| bad_response("kline row must have six fields"))?;
        let number = |i: usize| {
            to_decimal(&fields[i]).ok_or_else(|| bad_response("non-numeric kline field"))
        };
        let seconds = fields[0]
            .as_i64()
            .ok_or_else(|| bad_response("kline timestamp must be an integer"))?;

        Ok(OHLCV::new(
            seconds * 1000,
            number(1)?,
            number(2)?,
            number(3)?,
            number(4)?,
            number(5)?,
        ))
    }

    fn parse_order(&self, raw: &Value, market: Option<&Market>) -> CcxtResult<Order> {
        let order = CoinzipOrder::deserialize(raw)?;
        let symbol = self.resolve_symbol(market, order.market.as_deref());
        let side: OrderSide = order.side.parse()?;
        let order_type: OrderType = order.ord_type.parse()?;

        let mut result = Order::new(
            order.id,
            symbol,
            order_type,
            side,
            order.volume.unwrap_or_default(),
        );
        if let Some(ts) = order.created_at.as_deref().and_then(parse8601) {
            result = result.with_timestamp(ts);
        }
        result.status = parse_order_status(order.state.as_deref());
        result.price = order.price;
        result.average = order.avg_price;
        result.filled = order.executed_volume.unwrap_or_default();
        result.remaining = order.remaining_volume;
        result.info = raw.clone();
        Ok(result)
    }

    fn parse_orders(
        &self,
        raw: &Value,
        market: Option<&Market>,
        since: Option<i64>,
        limit: Option<u32>,
    ) -> CcxtResult<Vec<Order>> {
        let orders = as_array(raw)?
            .iter()
            .map(|o| self.parse_order(o, market))
            .collect::<CcxtResult<Vec<_>>>()?;
        Ok(filter_by_since_limit(orders, since, limit, |o| o.timestamp))
    }

    fn parse_deposit(&self, raw: &Value) -> CcxtResult<Transaction> {
        let deposit = CoinzipDeposit::deserialize(raw)?;

        let mut result = Transaction::deposit(
            deposit.id,
            deposit.currency.to_uppercase(),
            deposit.amount.unwrap_or_default(),
        )
        .with_status(parse_deposit_status(deposit.state.as_deref()));
        if let Some(ts) = deposit.created_at.as_deref().and_then(parse8601) {
            result = result.with_timestamp(ts);
        }
        result.updated = deposit.done_at.as_deref().and_then(parse8601);
        result.txid = deposit.txid;
        result.fee = deposit
            .fee
            .map(|cost| Fee::new(cost, result.currency.clone()));
        result.info = raw.clone();
        Ok(result)
    }

    /// 상태별 주문 목록 (`all`, `wait`, `done`)
    async fn fetch_orders_by_state(
        &self,
        state: &str,
        symbol: Option<&str>,
        since: Option<i64>,
        limit: Option<u32>,
    ) -> CcxtResult<Vec<Order>> {
        self.load_markets(false).await?;
        let market = symbol.map(|s| self.market(s)).transpose()?;

        let mut params = Params::new();
        if let Some(market) = &market {
            params.insert("market".into(), json!(market.id));
        }
        if let Some(since) = since {
            params.insert("timestamp".into(), json!(since / 1000));
        }
        if let Some(limit) = limit {
            params.insert("limit".into(), json!(limit));
        }
        params.insert("state".into(), json!(state));

        let response = self.private_get("orders", params).await?;
        self.parse_orders(&response, market.as_ref(), since, limit)
    }
}

#[async_trait]
impl Exchange for Coinzip {
    fn id(&self) -> ExchangeId {
        ExchangeId::Coinzip
    }

    fn name(&self) -> &str {
        &self.description.name
    }

    fn version(&self) -> &str {
        &self.description.version
    }

    fn countries(&self) -> &[String] {
        &self.description.countries
    }

    fn rate_limit(&self) -> u64 {
        self.description.rate_limit
    }

    fn has(&self) -> &ExchangeFeatures {
        &self.description.has
    }

    fn urls(&self) -> &ExchangeUrls {
        &self.description.urls
    }

    fn timeframes(&self) -> &HashMap<Timeframe, String> {
        &self.description.timeframes
    }

    async fn load_markets(&self, reload: bool) -> CcxtResult<HashMap<String, Market>> {
        {
            let cache = self.read_markets()?;
            if !reload && !cache.is_empty() {
                return Ok(cache.clone());
            }
        }

        let markets = self.fetch_markets().await?;
        debug!(exchange = %self.description.id, count = markets.len(), "loaded markets");

        let mut cache = self.write_markets()?;
        let mut by_id = self.markets_by_id.write().map_err(|_| poisoned())?;
        cache.clear();
        by_id.clear();
        for market in markets {
            by_id.insert(market.id.clone(), market.symbol.clone());
            cache.insert(market.symbol.clone(), market);
        }

        Ok(cache.clone())
    }

    async fn fetch_markets(&self) -> CcxtResult<Vec<Market>> {
        let response = self.public_get("markets", Params::new()).await?;
        as_array(&response)?
            .iter()
            .map(|m| self.parse_market(m))
            .collect()
    }

    async fn fetch_ticker(&self, symbol: &str) -> CcxtResult<Ticker> {
        self.load_markets(false).await?;
        let market = self.market(symbol)?;

        let mut params = Params::new();
        params.insert("market".into(), json!(market.id));
        let response = self.public_get("tickers/{market}", params).await?;
        self.parse_ticker(&response, &market.symbol)
    }

    async fn fetch_tickers(&self, symbols: Option<&[&str]>) -> CcxtResult<HashMap<String, Ticker>> {
        self.load_markets(false).await?;
        let response = self.public_get("tickers", Params::new()).await?;
        let tickers = response
            .as_object()
            .ok_or_else(|| bad_response("tickers must be an object"))?;

        let mut result = HashMap::new();
        for (market_id, raw) in tickers {
            let symbol = self.ticker_symbol(market_id);
            if let Some(wanted) = symbols {
                if !wanted.contains(&symbol.as_str()) {
                    continue;
                }
            }
            let ticker = self.parse_ticker(raw, &symbol)?;
            result.insert(symbol, ticker);
        }
        Ok(result)
    }

    async fn fetch_order_book(&self, symbol: &str, limit: Option<u32>) -> CcxtResult<OrderBook> {
        self.load_markets(false).await?;
        let market = self.market(symbol)?;

        let mut params = Params::new();
        params.insert("market".into(), json!(market.id));
        if let Some(limit) = limit {
            params.insert("limit".into(), json!(limit));
        }

        let response = self.public_get("depth", params).await?;
        let depth = CoinzipDepth::deserialize(&response)?;

        let entries = |levels: &[Vec<Value>]| -> Vec<OrderBookEntry> {
            levels
                .iter()
                .filter_map(|level| {
                    Some(OrderBookEntry::new(
                        to_decimal(level.first()?)?,
                        to_decimal(level.get(1)?)?,
                    ))
                })
                .collect()
        };

        let mut book = OrderBook::new(market.symbol.clone());
        if let Some(ts) = depth.timestamp {
            book = book.with_timestamp(ts * 1000);
        }
        book.bids = entries(&depth.bids);
        book.asks = entries(&depth.asks);
        book.sort();
        Ok(book)
    }

    async fn fetch_trades(
        &self,
        symbol: &str,
        since: Option<i64>,
        limit: Option<u32>,
    ) -> CcxtResult<Vec<Trade>> {
        self.load_markets(false).await?;
        let market = self.market(symbol)?;

        let mut params = Params::new();
        params.insert("market".into(), json!(market.id));
        let response = self.public_get("trades", params).await?;
        self.parse_trades(&response, Some(&market), since, limit)
    }

    async fn fetch_ohlcv(
        &self,
        symbol: &str,
        timeframe: Timeframe,
        since: Option<i64>,
        limit: Option<u32>,
    ) -> CcxtResult<Vec<OHLCV>> {
        self.load_markets(false).await?;
        let market = self.market(symbol)?;
        let period = self
            .description
            .timeframes
            .get(&timeframe)
            .ok_or_else(|| CcxtError::NotSupported {
                feature: format!("timeframe {}", timeframe.as_str()),
            })?;
        let period: i64 = period
            .parse()
            .map_err(|_| bad_response("timeframe period must be numeric"))?;

        let mut params = Params::new();
        params.insert("market".into(), json!(market.id));
        params.insert("period".into(), json!(period));
        params.insert("limit".into(), json!(limit.unwrap_or(DEFAULT_OHLCV_LIMIT)));
        if let Some(since) = since {
            params.insert("timestamp".into(), json!(since / 1000));
        }

        let response = self.public_get("k", params).await?;
        as_array(&response)?.iter().map(Self::parse_ohlcv).collect()
    }

    async fn fetch_time(&self) -> CcxtResult<i64> {
        let response = self.public_get("timestamp", Params::new()).await?;
        let seconds = response
            .as_i64()
            .or_else(|| response.as_str().and_then(|s| s.parse().ok()))
            .ok_or_else(|| bad_response("timestamp must be an integer"))?;
        Ok(seconds * 1000)
    }

    async fn fetch_balance(&self) -> CcxtResult<Balances> {
        let response = self.private_get("members/me", Params::new()).await?;
        let member = CoinzipMember::deserialize(&response)?;

        let mut balances = Balances::new();
        for account in member.accounts {
            let free = account.balance.unwrap_or_default();
            let used = account.locked.unwrap_or_default();
            balances.add(account.currency.to_uppercase(), Balance::new(free, used));
        }
        balances.info = response.get("accounts").cloned().unwrap_or(Value::Null);
        Ok(balances)
    }

    async fn create_order(
        &self,
        symbol: &str,
        order_type: OrderType,
        side: OrderSide,
        amount: Decimal,
        price: Option<Decimal>,
    ) -> CcxtResult<Order> {
        self.load_markets(false).await?;
        let market = self.market(symbol)?;

        let mut params = Params::new();
        params.insert("market".into(), json!(market.id));
        params.extend(order_fields(order_type, side, amount, price)?);

        let response = self.private_post("orders", params).await?;
        self.parse_order(&response, Some(&market))
    }

    async fn create_orders(&self, orders: Vec<OrderRequest>) -> CcxtResult<Vec<Order>> {
        let first = orders.first().ok_or_else(|| CcxtError::ArgumentsRequired {
            message: "createOrders requires at least one order".into(),
        })?;
        if orders.iter().any(|o| o.symbol != first.symbol) {
            return Err(CcxtError::BadRequest {
                message: "createOrders requires all orders to share one symbol".into(),
            });
        }

        self.load_markets(false).await?;
        let market = self.market(&first.symbol)?;

        let entries = orders
            .iter()
            .map(|o| order_fields(o.order_type, o.side, o.amount, o.price).map(Value::Object))
            .collect::<CcxtResult<Vec<_>>>()?;

        let mut params = Params::new();
        params.insert("market".into(), json!(market.id));
        params.insert(ORDERS_KEY.into(), Value::Array(entries));

        let response = self.private_post("orders/multi", params).await?;
        self.parse_orders(&response, Some(&market), None, None)
    }

    async fn cancel_order(&self, id: &str, _symbol: &str) -> CcxtResult<Order> {
        self.load_markets(false).await?;

        let mut params = Params::new();
        params.insert("id".into(), json!(id));
        let response = self.private_post("order/delete", params).await?;
        let order = self.parse_order(&response, None)?;

        // 이미 체결되었거나 취소된 주문
        if order.is_finished() {
            return Err(CcxtError::OrderNotFound {
                message: format!(
                    "{} {}",
                    self.description.id,
                    serde_json::to_string(&order)?
                ),
            });
        }
        Ok(order)
    }

    async fn cancel_all_orders(&self, symbol: Option<&str>) -> CcxtResult<Vec<Order>> {
        if symbol.is_some() {
            return Err(CcxtError::NotSupported {
                feature: "cancelAllOrders for a single symbol".into(),
            });
        }
        self.load_markets(false).await?;

        let response = self.private_post("orders/clear", Params::new()).await?;
        self.parse_orders(&response, None, None, None)
    }

    async fn fetch_order(&self, id: &str, _symbol: &str) -> CcxtResult<Order> {
        let numeric: i64 = id.parse().map_err(|_| CcxtError::InvalidOrder {
            message: format!("Order id must be an integer: {id}"),
        })?;
        self.load_markets(false).await?;

        let mut params = Params::new();
        params.insert("id".into(), json!(numeric));
        let response = self.private_get("order", params).await?;
        self.parse_order(&response, None)
    }

    async fn fetch_open_orders(
        &self,
        symbol: Option<&str>,
        since: Option<i64>,
        limit: Option<u32>,
    ) -> CcxtResult<Vec<Order>> {
        self.fetch_orders_by_state("wait", symbol, since, limit).await
    }

    async fn fetch_closed_orders(
        &self,
        symbol: Option<&str>,
        since: Option<i64>,
        limit: Option<u32>,
    ) -> CcxtResult<Vec<Order>> {
        self.fetch_orders_by_state("done", symbol, since, limit).await
    }

    async fn fetch_orders(
        &self,
        symbol: Option<&str>,
        since: Option<i64>,
        limit: Option<u32>,
    ) -> CcxtResult<Vec<Order>> {
        self.fetch_orders_by_state("all", symbol, since, limit).await
    }

    async fn fetch_my_trades(
        &self,
        symbol: Option<&str>,
        since: Option<i64>,
        limit: Option<u32>,
    ) -> CcxtResult<Vec<Trade>> {
        self.load_markets(false).await?;
        let market = symbol.map(|s| self.market(s)).transpose()?;

        let mut params = Params::new();
        if let Some(market) = &market {
            params.insert("market".into(), json!(market.id));
        }
        if let Some(since) = since {
            params.insert("timestamp".into(), json!(since / 1000));
        }
        if let Some(limit) = limit {
            params.insert("limit".into(), json!(limit));
        }

        let response = self.private_get("trades/my", params).await?;
        self.parse_trades(&response, market.as_ref(), since, limit)
    }

    async fn fetch_deposits(
        &self,
        code: Option<&str>,
        since: Option<i64>,
        limit: Option<u32>,
    ) -> CcxtResult<Vec<Transaction>> {
        let mut params = Params::new();
        if let Some(code) = code {
            params.insert("currency".into(), json!(code.to_lowercase()));
        }
        if let Some(limit) = limit {
            params.insert("limit".into(), json!(limit));
        }

        let response = self.private_get("deposits", params).await?;
        let deposits = as_array(&response)?
            .iter()
            .map(|d| self.parse_deposit(d))
            .collect::<CcxtResult<Vec<_>>>()?;
        Ok(filter_by_since_limit(deposits, since, limit, |d| d.timestamp))
    }

    fn market_id(&self, symbol: &str) -> Option<String> {
        let cache = self.markets.read().ok()?;
        cache.get(symbol).map(|m| m.id.clone())
    }

    fn symbol(&self, market_id: &str) -> Option<String> {
        let by_id = self.markets_by_id.read().ok()?;
        by_id.get(market_id).cloned()
    }

    fn sign(
        &self,
        path: &str,
        api: ApiScope,
        method: HttpMethod,
        params: &Params,
        headers: Option<HashMap<String, String>>,
        body: Option<&str>,
    ) -> CcxtResult<SignedRequest> {
        self.sign_request(path, api, method, params, headers, body, now_ms)
    }
}

/// Vendor fields of a single order, in the order they are sent
fn order_fields(
    order_type: OrderType,
    side: OrderSide,
    amount: Decimal,
    price: Option<Decimal>,
) -> CcxtResult<Params> {
    let mut fields = Params::new();
    fields.insert("side".into(), json!(side.as_str()));
    fields.insert("volume".into(), json!(amount.to_string()));
    fields.insert("ord_type".into(), json!(order_type.as_str()));
    if order_type == OrderType::Limit {
        let price = price.ok_or_else(|| CcxtError::ArgumentsRequired {
            message: "Limit orders require a price".into(),
        })?;
        fields.insert("price".into(), json!(price.to_string()));
    }
    Ok(fields)
}

fn parse_order_status(state: Option<&str>) -> Option<OrderStatus> {
    match state? {
        "done" => Some(OrderStatus::Closed),
        "wait" => Some(OrderStatus::Open),
        "cancel" => Some(OrderStatus::Canceled),
        _ => None,
    }
}

fn parse_deposit_status(state: Option<&str>) -> TransactionStatus {
    match state {
        Some("accepted") | Some("done") => TransactionStatus::Ok,
        Some("rejected") => TransactionStatus::Failed,
        Some("canceled") => TransactionStatus::Canceled,
        _ => TransactionStatus::Pending,
    }
}

/// Sort by timestamp, drop entries before `since`, keep the first `limit`
fn filter_by_since_limit<T>(
    mut items: Vec<T>,
    since: Option<i64>,
    limit: Option<u32>,
    timestamp: impl Fn(&T) -> Option<i64>,
) -> Vec<T> {
    items.sort_by_key(|item| timestamp(item).unwrap_or(i64::MIN));
    if let Some(since) = since {
        items.retain(|item| timestamp(item).is_some_and(|ts| ts >= since));
    }
    if let Some(limit) = limit {
        items.truncate(limit as usize);
    }
    items
}

fn as_array(value: &Value) -> CcxtResult<&Vec<Value>> {
    value
        .as_array()
        .ok_or_else(|| bad_response("expected a JSON array"))
}

fn bad_response(message: &str) -> CcxtError {
    CcxtError::BadResponse {
        message: message.to_string(),
    }
}

fn poisoned() -> CcxtError {
    CcxtError::ExchangeError {
        message: "market cache lock poisoned".into(),
    }
}

fn lenient_decimal<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Decimal>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(to_decimal(&value))
}

fn id_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!("invalid id: {other}"))),
    }
}

fn optional_id_string<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(Some(s)),
        Value::Number(n) => Ok(Some(n.to_string())),
        _ => Ok(None),
    }
}

// === Response Types ===

#[derive(Debug, Deserialize)]
struct CoinzipTickerResponse {
    #[serde(default)]
    at: Option<i64>,
    ticker: CoinzipTicker,
}

#[derive(Debug, Deserialize)]
struct CoinzipTicker {
    #[serde(default, deserialize_with = "lenient_decimal")]
    buy: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient_decimal")]
    sell: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient_decimal")]
    low: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient_decimal")]
    high: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient_decimal")]
    last: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient_decimal")]
    vol: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient_decimal")]
    open: Option<Decimal>,
}

#[derive(Debug, Deserialize)]
struct CoinzipDepth {
    #[serde(default)]
    timestamp: Option<i64>,
    #[serde(default)]
    bids: Vec<Vec<Value>>,
    #[serde(default)]
    asks: Vec<Vec<Value>>,
}

#[derive(Debug, Deserialize)]
struct CoinzipTrade {
    #[serde(deserialize_with = "id_string")]
    id: String,
    #[serde(default, deserialize_with = "lenient_decimal")]
    price: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient_decimal")]
    volume: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient_decimal")]
    funds: Option<Decimal>,
    #[serde(default)]
    market: Option<String>,
    #[serde(default)]
    created_at: Option<String>,
    #[serde(default)]
    side: Option<String>,
    #[serde(default, deserialize_with = "optional_id_string")]
    order_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CoinzipOrder {
    #[serde(deserialize_with = "id_string")]
    id: String,
    side: String,
    ord_type: String,
    #[serde(default, deserialize_with = "lenient_decimal")]
    price: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient_decimal")]
    avg_price: Option<Decimal>,
    #[serde(default)]
    state: Option<String>,
    #[serde(default)]
    market: Option<String>,
    #[serde(default)]
    created_at: Option<String>,
    #[serde(default, deserialize_with = "lenient_decimal")]
    volume: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient_decimal")]
    remaining_volume: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient_decimal")]
    executed_volume: Option<Decimal>,
}

#[derive(Debug, Deserialize)]
struct CoinzipMember {
    #[serde(default)]
    accounts: Vec<CoinzipAccount>,
}

#[derive(Debug, Deserialize)]
struct CoinzipAccount {
    currency: String,
    #[serde(default, deserialize_with = "lenient_decimal")]
    balance: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient_decimal")]
    locked: Option<Decimal>,
}

#[derive(Debug, Deserialize)]
struct CoinzipDeposit {
    #[serde(deserialize_with = "id_string")]
    id: String,
    currency: String,
    #[serde(default, deserialize_with = "lenient_decimal")]
    amount: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient_decimal")]
    fee: Option<Decimal>,
    #[serde(default)]
    txid: Option<String>,
    #[serde(default)]
    created_at: Option<String>,
    #[serde(default)]
    done_at: Option<String>,
    #[serde(default)]
    state: Option<String>,
}
