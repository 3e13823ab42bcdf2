//! Criterion benchmarks for batch planning.
//!
//! Run with: `cargo bench -p deepfront-runner`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use deepfront_core::{BalanceSnapshot, FeeCoin, OrderSide, PoolId, PriceQuote, SCALE};
use deepfront_runner::{run_batch, Scenario, ScenarioFile, ScenarioRunner};

fn synthetic_file(count: usize) -> ScenarioFile {
    let scenarios = (0..count)
        .map(|i| Scenario {
            name: format!("s{i}"),
            pool: PoolId::new(format!("0x{:x}", i % 16)),
            side: if i % 2 == 0 { OrderSide::Bid } else { OrderSide::Ask },
            quantity: 1_000 + i as u64,
            price: 2 * SCALE,
            fee_coin: if i % 3 == 0 { FeeCoin::Quote } else { FeeCoin::Distinct },
            deep_required: 5_000,
            balances: BalanceSnapshot {
                wallet_deep: (i as u64 * 37) % 5_000,
                balance_manager_deep: 100,
                wallet_input: 10_000,
                balance_manager_input: 500,
                wallet_settlement: 10_000,
                balance_manager_settlement: 50,
                reserve_deep: 1_000_000,
            },
            quote: None,
            estimate: None,
        })
        .collect();
    ScenarioFile {
        fees: Default::default(),
        whitelist: vec![PoolId::from("0x0")],
        price: PriceQuote::Direct {
            stable_per_deep: 37_815_000,
        },
        scenarios,
    }
}

fn bench_run_scenario(c: &mut Criterion) {
    let file = synthetic_file(1);
    let runner = ScenarioRunner::from_file(&file);
    let scenario = &file.scenarios[0];
    c.bench_function("run_scenario", |b| {
        b.iter(|| runner.run_scenario(black_box(scenario)))
    });
}

fn bench_run_batch(c: &mut Criterion) {
    let mut group = c.benchmark_group("run_batch");
    for size in [10, 100, 1_000] {
        let file = synthetic_file(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &file, |b, file| {
            b.iter(|| run_batch(black_box(file)))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_run_scenario, bench_run_batch);
criterion_main!(benches);
