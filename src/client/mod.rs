//! HTTP Client and related utilities

mod config;
mod http;

pub use config::ExchangeConfig;
pub use http::{HttpClient, HttpResponse};
