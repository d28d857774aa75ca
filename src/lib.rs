//! # Fillbook
//!
//! A single-symbol limit order book with strict price-time priority
//! matching.
//!
//! ## Design Principles
//!
//! - **Single-Writer**: one thread owns a book exclusively (no locks on the
//!   matching path)
//! - **O(1) hot path**: order lookup, cancel, and best-price queries are
//!   constant time; matching walks only the levels it consumes
//! - **Arena allocation**: orders live in a pre-allocated slab and carry
//!   their own FIFO links, so the matching loop never touches the heap
//! - **No hidden state**: configuration, clock, and callbacks travel with a
//!   [`Context`]; several books may share one
//!
//! ## Architecture
//!
//! ```text
//! [Submissions] --> [OrderBook] --> bid/ask PriceLevels (sorted by price)
//!                       |               |-- intrusive FIFO per level
//!                       |-- OrderPool (arena + id index)
//!                       |-- pending-stop table
//!                       '--> [Context callbacks: trades, order events]
//! ```
//!
//! Orders support limit/market/stop/stop-limit types, GTC/IOC/FOK/DAY/GTD
//! time-in-force, and post-only, iceberg/hidden, and all-or-none flags.
//! Executions price at the passive order's limit.

pub mod arena;
pub mod context;
pub mod order;
pub mod order_book;
pub mod pool;
pub mod price_level;
pub mod queue;
pub mod types;

// Re-exports for convenience
pub use arena::{ArenaIndex, NULL_INDEX};
pub use context::{Config, Context, StopPolicy};
pub use order::Order;
pub use order_book::OrderBook;
pub use price_level::PriceLevel;
pub use types::{
    BookError, BookStats, OrderEvent, OrderFlags, OrderId, OrderRequest, OrderSnapshot,
    OrderState, OrderType, Price, Quantity, Side, TimeInForce, Timestamp, Trade,
    INVALID_ORDER_ID,
};
