//! Signing Benchmarks
//!
//! Benchmarks for the request signing path:
//! - Canonical parameter encoding
//! - HMAC signatures
//! - Full private request signing

use ccxt_coinzip::client::ExchangeConfig;
use ccxt_coinzip::exchanges::cex::Coinzip;
use ccxt_coinzip::types::{ApiScope, HttpMethod};
use ccxt_coinzip::utils::crypto::{hmac_hex, HashAlgorithm};
use ccxt_coinzip::utils::encode::encode_params;
use ccxt_coinzip::Params;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use serde_json::{json, Value};

fn params(value: Value) -> Params {
    match value {
        Value::Object(map) => map,
        _ => Params::new(),
    }
}

fn batch_params(count: usize) -> Params {
    let orders: Vec<Value> = (0..count)
        .map(|i| json!({"side": "buy", "volume": "0.01", "ord_type": "limit", "price": 100 + i}))
        .collect();
    params(json!({"market": "btcphp", "access_key": "key", "tonce": 1551924191000i64, "orders": orders}))
}

fn bench_encode_params(c: &mut Criterion) {
    let simple = params(json!({"market": "btcphp", "state": "wait", "limit": 100, "access_key": "key"}));
    let batch = batch_params(20);

    let mut group = c.benchmark_group("encode_params");
    group.bench_function("scalar", |b| b.iter(|| encode_params(black_box(&simple))));
    group.bench_function("batch_20", |b| b.iter(|| encode_params(black_box(&batch))));
    group.finish();
}

fn bench_hmac(c: &mut Criterion) {
    let message = "GET|/api/v2/orders|access_key=key&market=btcphp&state=wait&tonce=1551924191000";

    let mut group = c.benchmark_group("hmac");
    for algorithm in [HashAlgorithm::Sha256, HashAlgorithm::Sha512] {
        group.bench_function(algorithm.as_str(), |b| {
            b.iter(|| hmac_hex(algorithm, black_box("secret"), black_box(message)))
        });
    }
    group.finish();
}

fn bench_sign(c: &mut Criterion) {
    let exchange = Coinzip::new(ExchangeConfig::new().with_credentials("key", "secret")).unwrap();
    let query = params(json!({"market": "btcphp", "state": "wait"}));
    let batch = batch_params(20);

    let mut group = c.benchmark_group("sign");
    group.bench_function("private_get", |b| {
        b.iter(|| {
            exchange.sign_with_nonce(
                "orders",
                ApiScope::Private,
                HttpMethod::Get,
                black_box(&query),
                None,
                None,
                1551924191000,
            )
        })
    });
    group.bench_function("private_post_batch_20", |b| {
        b.iter(|| {
            exchange.sign_with_nonce(
                "orders/multi",
                ApiScope::Private,
                HttpMethod::Post,
                black_box(&batch),
                None,
                None,
                1551924191000,
            )
        })
    });
    group.finish();
}

criterion_group!(benches, bench_encode_params, bench_hmac, bench_sign);
criterion_main!(benches);
