//! Benchmarks for canonical signing string construction and Ed25519 signing
//!
//! Run with: cargo bench --bench signing

use bpx_auth::{signing_string, Credentials, RequestSigner};
use bpx_types::Params;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

const SECRET: &str = "AQIDBAUGBwgJCgsMDQ4PEBESExQVFhcYGRobHB0eHyA=";

fn order_params() -> Params {
    Params::new()
        .with("symbol", "SOL_USDC")
        .with("side", "Bid")
        .with("orderType", "Limit")
        .with("quantity", "1.25")
        .with("price", "142.31")
        .with("timeInForce", "GTC")
        .with("selfTradePrevention", "RejectBoth")
        .with("clientId", 42i64)
}

fn bench_signing_string(c: &mut Criterion) {
    let params = order_params();
    let empty = Params::new();

    let mut group = c.benchmark_group("signing_string");
    group.bench_function("no_params", |b| {
        b.iter(|| signing_string(black_box("balanceQuery"), black_box(&empty), 1_700_000_000_000, 5000))
    });
    group.bench_function("order_params", |b| {
        b.iter(|| signing_string(black_box("orderExecute"), black_box(&params), 1_700_000_000_000, 5000))
    });
    group.finish();
}

fn bench_sign(c: &mut Criterion) {
    let credentials = Credentials::new("public_key", SECRET).unwrap();
    let params = order_params();

    c.bench_function("sign_order", |b| {
        b.iter(|| {
            RequestSigner::at(&credentials, 1_700_000_000_000, 5000)
                .sign(black_box("orderExecute"), black_box(&params))
        })
    });
}

criterion_group!(benches, bench_signing_string, bench_sign);
criterion_main!(benches);
