//! Context - per-engine configuration, clock, and callback sinks.
//!
//! No hidden process-wide state: every order book holds a reference to the
//! context it was created with, and callbacks travel with it. One context
//! may back several books, each confined to its own thread, so the callback
//! pair sits behind a mutex and the clock behind atomics.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Instant;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::types::{OrderEvent, OrderId, Price, Quantity, Timestamp, Trade};

/// When pending stop orders are swept for triggers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum StopPolicy {
    /// The caller invokes `process_stops` explicitly (default)
    #[default]
    Manual,
    /// Every mutating book operation ends with a bounded trigger cascade
    Automatic,
}

/// Book configuration: price bounds, capacity hints, feature toggles.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    /// Lowest admissible limit/stop price (inclusive)
    pub min_price: Price,
    /// Highest admissible limit/stop price (inclusive)
    pub max_price: Price,
    /// Price grid spacing; prices must sit on `min_price + k * tick_size`
    pub tick_size: Price,
    /// Order pool capacity
    pub expected_max_orders: u32,
    /// Price level capacity hint
    pub expected_price_levels: u32,
    pub enable_stop_orders: bool,
    pub enable_iceberg_orders: bool,
    pub enable_time_expiry: bool,
    pub stop_policy: StopPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            min_price: 0,
            max_price: Price::MAX,
            tick_size: 1,
            expected_max_orders: 10_000,
            expected_price_levels: 1_000,
            enable_stop_orders: true,
            enable_iceberg_orders: true,
            enable_time_expiry: true,
            stop_policy: StopPolicy::Manual,
        }
    }
}

impl Config {
    /// True if `price` lies inside the configured bounds on the tick grid.
    pub fn price_in_bounds(&self, price: Price) -> bool {
        if price < self.min_price || price > self.max_price {
            return false;
        }
        let tick = self.tick_size.max(1);
        (price - self.min_price) % tick == 0
    }
}

/// Trade notification sink.
pub type TradeCallback = Box<dyn FnMut(&Trade) + Send>;

/// Order lifecycle notification sink: (order id, event, filled, remaining).
pub type OrderEventCallback = Box<dyn FnMut(OrderId, OrderEvent, Quantity, Quantity) + Send>;

#[derive(Default)]
struct Callbacks {
    on_trade: Option<TradeCallback>,
    on_order_event: Option<OrderEventCallback>,
}

/// Shared engine context. Outlives any book created against it.
pub struct Context {
    config: Config,
    callbacks: Mutex<Callbacks>,
    /// Anchor for the system-monotonic clock
    origin: Instant,
    manual_mode: AtomicBool,
    manual_time: AtomicU64,
}

impl Context {
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Self {
        Self {
            config,
            callbacks: Mutex::new(Callbacks::default()),
            origin: Instant::now(),
            manual_mode: AtomicBool::new(false),
            manual_time: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn config(&self) -> &Config {
        &self.config
    }

    // ========================================================================
    // Callbacks
    // ========================================================================

    /// Install both callback sinks at once.
    pub fn set_callbacks(
        &self,
        on_trade: impl FnMut(&Trade) + Send + 'static,
        on_order_event: impl FnMut(OrderId, OrderEvent, Quantity, Quantity) + Send + 'static,
    ) {
        let mut callbacks = self.callbacks.lock();
        callbacks.on_trade = Some(Box::new(on_trade));
        callbacks.on_order_event = Some(Box::new(on_order_event));
    }

    pub fn set_trade_callback(&self, on_trade: impl FnMut(&Trade) + Send + 'static) {
        self.callbacks.lock().on_trade = Some(Box::new(on_trade));
    }

    pub fn set_order_event_callback(
        &self,
        on_order_event: impl FnMut(OrderId, OrderEvent, Quantity, Quantity) + Send + 'static,
    ) {
        self.callbacks.lock().on_order_event = Some(Box::new(on_order_event));
    }

    pub(crate) fn emit_trade(&self, trade: &Trade) {
        if let Some(cb) = self.callbacks.lock().on_trade.as_mut() {
            cb(trade);
        }
    }

    pub(crate) fn emit_order_event(
        &self,
        order_id: OrderId,
        event: OrderEvent,
        filled: Quantity,
        remaining: Quantity,
    ) {
        if let Some(cb) = self.callbacks.lock().on_order_event.as_mut() {
            cb(order_id, event, filled, remaining);
        }
    }

    // ========================================================================
    // Clock
    // ========================================================================

    /// Current timestamp in nanoseconds: the manually supplied value, or a
    /// monotonic sample in system mode.
    pub fn timestamp(&self) -> Timestamp {
        if self.manual_mode.load(Ordering::Acquire) {
            self.manual_time.load(Ordering::Acquire)
        } else {
            self.origin.elapsed().as_nanos() as Timestamp
        }
    }

    /// Supply the clock value directly (backtesting/simulation). Switches
    /// the context into manual mode.
    pub fn set_timestamp(&self, timestamp: Timestamp) {
        self.manual_time.store(timestamp, Ordering::Release);
        self.manual_mode.store(true, Ordering::Release);
    }

    /// Return to the system-monotonic clock.
    pub fn use_system_time(&self) {
        self.manual_mode.store(false, Ordering::Release);
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("config", &self.config)
            .field("manual_mode", &self.manual_mode.load(Ordering::Relaxed))
            .finish()
    }
}
