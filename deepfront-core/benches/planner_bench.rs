//! Criterion benchmarks for the planning hot path.
//!
//! Benchmarks:
//! 1. Fixed-point primitives (mul, div, slippage)
//! 2. Individual planners (DEEP, fee, deposit)
//! 3. Full order plan across balance regimes

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use deepfront_core::{
    apply_slippage, create_order_plan, determine_deep_requirements, div_fixed, get_fee_plan,
    mul_fixed, plan_input_coin_deposit, BalanceSnapshot, FeeCoin, Order, OrderSide, SCALE,
};

const SUI_PER_DEEP: u64 = 37_815_000_000;

// ── Helpers ──────────────────────────────────────────────────────────

fn regimes() -> Vec<(&'static str, BalanceSnapshot)> {
    vec![
        (
            "self_funded",
            BalanceSnapshot {
                wallet_deep: 50_000,
                balance_manager_deep: 50_000,
                wallet_input: 1_000_000,
                balance_manager_input: 0,
                wallet_settlement: 1_000_000,
                balance_manager_settlement: 0,
                reserve_deep: 0,
            },
        ),
        (
            "reserve_borrow",
            BalanceSnapshot {
                wallet_deep: 1_000,
                balance_manager_deep: 0,
                wallet_input: 1_000_000,
                balance_manager_input: 500_000,
                wallet_settlement: 10_000_000,
                balance_manager_settlement: 1_000,
                reserve_deep: 10_000_000,
            },
        ),
        ("insufficient", BalanceSnapshot::default()),
    ]
}

// ── 1. Fixed-point ───────────────────────────────────────────────────

fn bench_math(c: &mut Criterion) {
    let mut group = c.benchmark_group("math");
    group.bench_function("mul_fixed", |b| {
        b.iter(|| mul_fixed(black_box(123_456_789), black_box(SUI_PER_DEEP)))
    });
    group.bench_function("div_fixed", |b| {
        b.iter(|| div_fixed(black_box(SCALE), black_box(4 * SCALE)))
    });
    group.bench_function("apply_slippage", |b| {
        b.iter(|| apply_slippage(black_box(1_000_000), black_box(10_000_000)))
    });
    group.finish();
}

// ── 2. Planners ──────────────────────────────────────────────────────

fn bench_planners(c: &mut Criterion) {
    let mut group = c.benchmark_group("planners");
    group.bench_function("deep", |b| {
        b.iter(|| {
            determine_deep_requirements(
                black_box(25_000),
                false,
                black_box(1_000),
                black_box(4_000),
                black_box(1_000_000),
            )
        })
    });
    group.bench_function("fee", |b| {
        b.iter(|| {
            get_fee_plan(
                true,
                black_box(20_000),
                false,
                black_box(SUI_PER_DEEP),
                black_box(1_000_000),
                black_box(1_000),
            )
        })
    });
    group.bench_function("deposit", |b| {
        b.iter(|| {
            plan_input_coin_deposit(
                OrderSide::Bid,
                black_box(1_000),
                black_box(2 * SCALE),
                black_box(500),
                black_box(5_000),
            )
        })
    });
    group.finish();
}

// ── 3. Orchestrator ──────────────────────────────────────────────────

fn bench_order_plan(c: &mut Criterion) {
    let mut group = c.benchmark_group("order_plan");
    let order = Order::new(OrderSide::Bid, 1_000, 2 * SCALE).with_fee_coin(FeeCoin::Quote);
    for (name, balances) in regimes() {
        group.bench_with_input(BenchmarkId::from_parameter(name), &balances, |b, balances| {
            b.iter(|| create_order_plan(&order, black_box(balances), 25_000, SUI_PER_DEEP))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_math, bench_planners, bench_order_plan);
criterion_main!(benches);
