//! ccxt-coinzip: Coinzip exchange adapter
//!
//! CCXT 통합 인터페이스 기반 Coinzip (Peatio) 거래소 구현
//!
//! ```no_run
//! use ccxt_coinzip::{Coinzip, Exchange, ExchangeConfig};
//!
//! # async fn run() -> ccxt_coinzip::CcxtResult<()> {
//! let exchange = Coinzip::new(ExchangeConfig::new())?;
//! let ticker = exchange.fetch_ticker("BTC/PHP").await?;
//! println!("{:?}", ticker.last);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod errors;
pub mod exchanges;
pub mod types;
pub mod utils;

// Re-exports
pub use client::{ExchangeConfig, HttpClient, HttpResponse};
pub use errors::{CcxtError, CcxtResult, ErrorKind};
pub use exchanges::Coinzip;
pub use types::*;
pub use utils::Params;
