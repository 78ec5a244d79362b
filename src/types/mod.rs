//! Unified data types
//!
//! 거래소 공통 데이터 모델

mod balance;
mod exchange;
mod fee;
mod market;
mod ohlcv;
mod order;
mod orderbook;
mod ticker;
mod trade;
mod transaction;

pub use balance::{Balance, Balances};
pub use exchange::{
    ApiScope, DescriptionOverride, Endpoint, Exchange, ExchangeDescription, ExchangeFeatures,
    ExchangeId, ExchangeUrls, HttpMethod, RequiredCredentials, SignedRequest, Timeframe,
};
pub use fee::Fee;
pub use market::{Market, MarketLimits, MarketPrecision, MinMax};
pub use ohlcv::OHLCV;
pub use order::{Order, OrderRequest, OrderSide, OrderStatus, OrderType};
pub use orderbook::{OrderBook, OrderBookEntry};
pub use ticker::Ticker;
pub use trade::Trade;
pub use transaction::{Transaction, TransactionStatus, TransactionType};
