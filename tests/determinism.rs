//! Determinism test - identical command streams must produce identical
//! books, including under mixed order types and a manual clock.

use std::sync::Arc;

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

use fillbook::{
    BookStats, Config, Context, OrderBook, OrderFlags, OrderRequest, Side, TimeInForce,
};

#[derive(Clone, Copy, Debug)]
enum Op {
    Limit { id: u64, side: Side, price: u32, qty: u32 },
    Ioc { id: u64, side: Side, price: u32, qty: u32 },
    Iceberg { id: u64, side: Side, price: u32, qty: u32, display: u32 },
    PostOnly { id: u64, side: Side, price: u32, qty: u32 },
    Market { id: u64, side: Side, qty: u32 },
    Stop { id: u64, side: Side, stop: u32, qty: u32 },
    Cancel { id: u64 },
    Sweep,
}

fn random_ops(seed: u64, count: usize) -> Vec<Op> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut ops = Vec::with_capacity(count);
    let mut next_id = 1u64;

    for _ in 0..count {
        let side = if rng.gen_bool(0.5) { Side::Buy } else { Side::Sell };
        let price = 9_900 + rng.gen_range(0..200);
        let qty = rng.gen_range(1..300);
        let id = next_id;
        next_id += 1;

        let op = match rng.gen_range(0..10) {
            0..=3 => Op::Limit { id, side, price, qty },
            4 => Op::Ioc { id, side, price, qty },
            5 => Op::Iceberg { id, side, price, qty: qty + 100, display: qty / 2 + 1 },
            6 => Op::PostOnly { id, side, price, qty },
            7 => Op::Market { id, side, qty },
            8 => Op::Stop { id, side, stop: price, qty },
            _ => {
                if rng.gen_bool(0.5) {
                    Op::Cancel { id: rng.gen_range(1..next_id) }
                } else {
                    Op::Sweep
                }
            }
        };
        ops.push(op);
    }
    ops
}

fn apply(book: &mut OrderBook, op: Op) {
    // Statuses are intentionally ignored: rejections must be deterministic
    // too, and the book comparison catches any divergence
    match op {
        Op::Limit { id, side, price, qty } => {
            let _ = book.add_limit(id, side, price, qty);
        }
        Op::Ioc { id, side, price, qty } => {
            let _ = book.add_order(
                OrderRequest::limit(id, side, price, qty).with_tif(TimeInForce::Ioc),
            );
        }
        Op::Iceberg { id, side, price, qty, display } => {
            let _ = book.add_order(OrderRequest::limit(id, side, price, qty).with_display(display));
        }
        Op::PostOnly { id, side, price, qty } => {
            let _ = book.add_order(
                OrderRequest::limit(id, side, price, qty).with_flags(OrderFlags::POST_ONLY),
            );
        }
        Op::Market { id, side, qty } => {
            let _ = book.add_market(id, side, qty);
        }
        Op::Stop { id, side, stop, qty } => {
            let _ = book.add_order(OrderRequest::stop(id, side, stop, qty));
        }
        Op::Cancel { id } => {
            let _ = book.cancel(id);
        }
        Op::Sweep => {
            book.process_stops();
        }
    }
}

fn fingerprint(book: &OrderBook) -> (BookStats, Option<u32>, Option<u32>, u64, u64) {
    (
        book.stats(),
        book.best_bid(),
        book.best_ask(),
        book.depth(Side::Buy, 32),
        book.depth(Side::Sell, 32),
    )
}

fn fresh_book() -> OrderBook {
    let ctx = Arc::new(Context::with_config(Config::default()));
    ctx.set_timestamp(1);
    OrderBook::new(ctx, "DET")
}

#[test]
fn identical_streams_produce_identical_books() {
    let ops = random_ops(0x5EED, 3_000);

    let mut book_a = fresh_book();
    let mut book_b = fresh_book();

    for (step, &op) in ops.iter().enumerate() {
        apply(&mut book_a, op);
        apply(&mut book_b, op);

        assert_eq!(
            fingerprint(&book_a),
            fingerprint(&book_b),
            "divergence at step {step}: {op:?}"
        );
    }
}

#[test]
fn replay_after_clear_matches_original() {
    let ops = random_ops(99, 1_500);

    let mut book = fresh_book();
    for &op in &ops {
        apply(&mut book, op);
    }
    let first = (
        book.best_bid(),
        book.best_ask(),
        book.order_count(),
        book.depth(Side::Buy, 32),
        book.depth(Side::Sell, 32),
    );

    book.clear();
    for &op in &ops {
        apply(&mut book, op);
    }
    let second = (
        book.best_bid(),
        book.best_ask(),
        book.order_count(),
        book.depth(Side::Buy, 32),
        book.depth(Side::Sell, 32),
    );

    assert_eq!(first, second);
}
