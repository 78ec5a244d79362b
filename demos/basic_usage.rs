//! Basic Usage Example
//!
//! Demonstrates fundamental operations with ccxt-coinzip:
//! - Creating the exchange from environment configuration
//! - Fetching market data
//! - Reading balances when credentials are present
//!
//! `COINZIP_API_KEY` / `COINZIP_SECRET` enable the private section,
//! `RUST_LOG=ccxt_coinzip=debug` shows request logs.

use ccxt_coinzip::client::ExchangeConfig;
use ccxt_coinzip::exchanges::cex::Coinzip;
use ccxt_coinzip::types::{Exchange, Timeframe};
use ccxt_coinzip::CcxtResult;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> CcxtResult<()> {
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    println!("=== Coinzip Basic Usage Example ===\n");

    let config = ExchangeConfig::from_env("COINZIP");
    let has_credentials = config.has_credentials();
    let exchange = Coinzip::new(config)?;

    println!("Exchange: {} ({})", exchange.name(), exchange.id());
    println!("API version: {}", exchange.version());
    println!("Countries: {}", exchange.countries().join(", "));

    // Fetch markets
    println!("\n--- Fetching Markets ---");
    let markets = exchange.load_markets(false).await?;
    for market in markets.values().take(5) {
        println!(
            "  {} - Base: {}, Quote: {}",
            market.symbol, market.base, market.quote
        );
    }

    let Some(symbol) = markets.keys().min().cloned() else {
        println!("No markets listed");
        return Ok(());
    };

    // Ticker
    println!("\n--- Fetching Ticker ---");
    let ticker = exchange.fetch_ticker(&symbol).await?;
    println!("{symbol} Ticker:");
    println!("  Last Price: {:?}", ticker.last);
    println!("  Bid: {:?}", ticker.bid);
    println!("  Ask: {:?}", ticker.ask);
    println!("  24h Volume: {:?}", ticker.base_volume);

    // Order book
    println!("\n--- Fetching Order Book ---");
    let orderbook = exchange.fetch_order_book(&symbol, Some(5)).await?;
    for bid in orderbook.bids.iter().take(5) {
        println!("  Bid Price: {}, Amount: {}", bid.price, bid.amount);
    }
    for ask in orderbook.asks.iter().take(5) {
        println!("  Ask Price: {}, Amount: {}", ask.price, ask.amount);
    }

    // Candles
    println!("\n--- Fetching OHLCV ---");
    let candles = exchange
        .fetch_ohlcv(&symbol, Timeframe::Hour1, None, Some(5))
        .await?;
    for candle in &candles {
        println!(
            "  {} O:{} H:{} L:{} C:{} V:{}",
            candle.timestamp, candle.open, candle.high, candle.low, candle.close, candle.volume
        );
    }

    if has_credentials {
        println!("\n--- Fetching Balance ---");
        let balances = exchange.fetch_balance().await?;
        for (currency, balance) in &balances.currencies {
            println!("  {currency}: free {:?}, used {:?}", balance.free, balance.used);
        }
    }

    println!("\n=== Basic Usage Example Complete ===");
    Ok(())
}
