//! Benchmark harness using Criterion for latency measurement.
//!
//! Measures:
//! - Place order (no match)
//! - Place order (full match)
//! - Cancel order
//! - Mixed workload

use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

use fillbook::{Config, Context, OrderBook, Side};

fn bench_book(capacity: u32) -> OrderBook {
    let ctx = Arc::new(Context::with_config(Config {
        expected_max_orders: capacity,
        ..Config::default()
    }));
    OrderBook::new(ctx, "BENCH")
}

/// Benchmark: place an order that rests (no matching)
fn bench_place_no_match(c: &mut Criterion) {
    let mut book = bench_book(2_000_000);
    let mut order_id = 0u64;

    c.bench_function("place_no_match", |b| {
        b.iter(|| {
            order_id += 1;
            black_box(book.add_limit(order_id, Side::Buy, 9_000, 100))
        })
    });
}

/// Benchmark: place an order that fully matches against resting depth
fn bench_place_full_match(c: &mut Criterion) {
    let mut group = c.benchmark_group("place_full_match");

    for depth in [1u32, 10, 100].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(depth), depth, |b, &depth| {
            let mut book = bench_book(2_000_000);

            for i in 0..depth as u64 {
                book.add_limit(i + 1, Side::Sell, 10_000, 100).unwrap();
            }

            let mut order_id = 1_000u64;

            b.iter(|| {
                order_id += 2;
                let result = book.add_limit(order_id, Side::Buy, 10_000, 100);

                // Replenish the consumed resting order
                book.add_limit(order_id + 1, Side::Sell, 10_000, 100).unwrap();

                black_box(result)
            })
        });
    }

    group.finish();
}

/// Benchmark: cancel from books of increasing size
fn bench_cancel(c: &mut Criterion) {
    let mut group = c.benchmark_group("cancel");

    for book_size in [100u64, 1_000, 10_000].iter() {
        group.bench_with_input(
            BenchmarkId::from_parameter(book_size),
            book_size,
            |b, &book_size| {
                let mut book = bench_book(2_000_000);

                for i in 0..book_size {
                    let (side, price) = if i % 2 == 0 {
                        (Side::Buy, 9_000 + (i % 100) as u32 * 10)
                    } else {
                        (Side::Sell, 11_000 + (i % 100) as u32 * 10)
                    };
                    book.add_limit(i + 1, side, price, 100).unwrap();
                }

                let mut cancel_id = 1u64;
                let mut next_id = book_size + 1;

                b.iter(|| {
                    let result = book.cancel(cancel_id);

                    // Replenish at a non-crossing price
                    let (side, price) = if cancel_id % 2 == 1 {
                        (Side::Buy, 9_000 + (cancel_id % 100) as u32 * 10)
                    } else {
                        (Side::Sell, 11_000 + (cancel_id % 100) as u32 * 10)
                    };
                    book.add_limit(next_id, side, price, 100).unwrap();

                    cancel_id = next_id;
                    next_id += 1;

                    black_box(result)
                })
            },
        );
    }

    group.finish();
}

/// Benchmark: mixed workload (70% place, 30% cancel)
fn bench_mixed_workload(c: &mut Criterion) {
    let mut group = c.benchmark_group("mixed_workload");

    group.bench_function("70_place_30_cancel", |b| {
        let mut book = bench_book(2_000_000);
        let mut rng = ChaCha8Rng::seed_from_u64(0xDEADBEEF);
        let mut order_id = 0u64;

        for _ in 0..1_000 {
            order_id += 1;
            let side = if rng.gen_bool(0.5) { Side::Buy } else { Side::Sell };
            let _ = book.add_limit(order_id, side, 9_900 + rng.gen_range(0..200), 100);
        }

        b.iter(|| {
            if rng.gen_bool(0.7) {
                order_id += 1;
                let side = if rng.gen_bool(0.5) { Side::Buy } else { Side::Sell };
                black_box(book.add_limit(
                    order_id,
                    side,
                    9_900 + rng.gen_range(0..200),
                    rng.gen_range(1..500),
                ))
            } else {
                let cancel_id = rng.gen_range(1..=order_id);
                black_box(book.cancel(cancel_id))
            }
        })
    });

    group.finish();
}

/// Benchmark: sustained throughput over batches of 1000 orders
fn bench_throughput(c: &mut Criterion) {
    let mut group = c.benchmark_group("throughput");
    group.throughput(criterion::Throughput::Elements(1_000));

    group.bench_function("1000_orders", |b| {
        let mut book = bench_book(2_000_000);
        let mut rng = ChaCha8Rng::seed_from_u64(0xCAFEBABE);
        let mut order_id = 0u64;

        b.iter(|| {
            for _ in 0..1_000 {
                order_id += 1;
                let side = if rng.gen_bool(0.5) { Side::Buy } else { Side::Sell };
                let _ = black_box(book.add_limit(
                    order_id,
                    side,
                    9_900 + rng.gen_range(0..200),
                    rng.gen_range(1..500),
                ));
            }
            book.clear();
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_place_no_match,
    bench_place_full_match,
    bench_cancel,
    bench_mixed_workload,
    bench_throughput,
);

criterion_main!(benches);
