//! Order Book - the per-symbol matching engine.
//!
//! Maintains bid and ask price levels in sorted maps with cached best
//! prices, a pending-stop table, and the order pool. Incoming orders are
//! validated, matched against the opposite side under price-time priority,
//! and either parked in the book or destroyed. Trade and lifecycle events
//! are delivered synchronously through the context callbacks.

use std::collections::BTreeMap;
use std::sync::Arc;

use rustc_hash::FxHashMap;
use tracing::{debug, trace};

use crate::arena::ArenaIndex;
use crate::context::{Context, StopPolicy};
use crate::order::Order;
use crate::pool::OrderPool;
use crate::price_level::{Fill, PriceLevel};
use crate::types::{
    BookError, BookStats, OrderEvent, OrderId, OrderRequest, OrderSnapshot, OrderState,
    OrderType, Price, Quantity, Side, Timestamp, Trade, INVALID_ORDER_ID,
};

/// Upper bound on automatic trigger sweeps after one mutation, so cascading
/// stops cannot loop unbounded.
const MAX_STOP_CASCADES: u32 = 8;

/// Per-symbol limit order book.
///
/// Not thread-safe: one thread owns a book and runs every operation to
/// completion. Several books may share one `Context`.
pub struct OrderBook {
    symbol: String,
    context: Arc<Context>,

    pool: OrderPool,

    /// Bid levels; the frontier is the highest key
    bids: BTreeMap<Price, PriceLevel>,
    /// Ask levels; the frontier is the lowest key
    asks: BTreeMap<Price, PriceLevel>,

    /// Pending stop orders, keyed by order id
    stop_orders: FxHashMap<OrderId, ArenaIndex>,

    best_bid: Option<Price>,
    best_ask: Option<Price>,

    /// Cumulative fill count
    total_trades: u64,
    /// Cumulative matched quantity
    total_volume: u64,
}

impl OrderBook {
    pub fn new(context: Arc<Context>, symbol: impl Into<String>) -> Self {
        let capacity = context.config().expected_max_orders;
        Self {
            symbol: symbol.into(),
            context,
            pool: OrderPool::new(capacity),
            bids: BTreeMap::new(),
            asks: BTreeMap::new(),
            stop_orders: FxHashMap::default(),
            best_bid: None,
            best_ask: None,
            total_trades: 0,
            total_volume: 0,
        }
    }

    #[inline]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    #[inline]
    pub fn context(&self) -> &Arc<Context> {
        &self.context
    }

    // ========================================================================
    // Submission
    // ========================================================================

    /// Add a plain GTC limit order.
    pub fn add_limit(
        &mut self,
        order_id: OrderId,
        side: Side,
        price: Price,
        quantity: Quantity,
    ) -> Result<(), BookError> {
        self.add_order(OrderRequest::limit(order_id, side, price, quantity))
    }

    /// Add a market order.
    pub fn add_market(
        &mut self,
        order_id: OrderId,
        side: Side,
        quantity: Quantity,
    ) -> Result<(), BookError> {
        self.add_order(OrderRequest::market(order_id, side, quantity))
    }

    /// Full submission path with type, time-in-force, flags, and expiry.
    ///
    /// Validation failures leave the book untouched and emit no events.
    /// Policy rejections (post-only, FOK/AON) emit `Rejected` and destroy
    /// the order.
    pub fn add_order(&mut self, request: OrderRequest) -> Result<(), BookError> {
        self.validate(&request)?;

        let now = self.context.timestamp();
        let index = self.pool.create(Order::from_request(&request, now))?;

        let result = if self.pool.get(index).is_stop() {
            self.submit_stop(index, now)
        } else {
            self.process_new_order(index, now)
        };

        self.auto_sweep_stops();
        result
    }

    fn validate(&self, request: &OrderRequest) -> Result<(), BookError> {
        if request.order_id == INVALID_ORDER_ID {
            return Err(BookError::InvalidParam);
        }
        if request.quantity == 0 {
            return Err(BookError::InvalidQuantity);
        }

        let config = self.context.config();
        let is_stop = matches!(request.order_type, OrderType::Stop | OrderType::StopLimit);
        let needs_price = matches!(request.order_type, OrderType::Limit | OrderType::StopLimit);

        if needs_price && (request.price == 0 || !config.price_in_bounds(request.price)) {
            return Err(BookError::InvalidPrice);
        }
        if is_stop && (request.stop_price == 0 || !config.price_in_bounds(request.stop_price)) {
            return Err(BookError::InvalidPrice);
        }
        if is_stop && !config.enable_stop_orders {
            return Err(BookError::InvalidParam);
        }
        if request.display_quantity > 0 && !config.enable_iceberg_orders {
            return Err(BookError::InvalidParam);
        }
        if self.pool.contains(request.order_id) {
            return Err(BookError::DuplicateOrder);
        }
        Ok(())
    }

    // ========================================================================
    // Order processing
    // ========================================================================

    fn process_new_order(&mut self, index: ArenaIndex, now: Timestamp) -> Result<(), BookError> {
        let (id, side, price, is_market, post_only, fok, ioc, aon, restable, quantity) = {
            let order = self.pool.get(index);
            (
                order.order_id(),
                order.side(),
                order.price(),
                order.is_market(),
                order.is_post_only(),
                order.is_fok(),
                order.is_ioc(),
                order.is_aon(),
                order.is_restable_tif(),
                order.remaining_quantity(),
            )
        };

        if post_only && self.would_match_immediately(side, price) {
            self.pool.get_mut(index).reject();
            self.context.emit_order_event(id, OrderEvent::Rejected, 0, 0);
            self.pool.destroy(index);
            return Err(BookError::WouldMatch);
        }

        // FOK always needs the full quantity up front; AON only when it
        // would execute at all.
        if fok || (aon && self.crosses_book(side, price, is_market)) {
            if !self.can_source(side, price, is_market, quantity) {
                self.pool.get_mut(index).reject();
                self.context.emit_order_event(id, OrderEvent::Rejected, 0, 0);
                self.pool.destroy(index);
                return Err(BookError::CannotFill);
            }
            if fok {
                self.execute_matches(index, now);
                let filled = self.pool.get(index).filled_quantity();
                self.context.emit_order_event(id, OrderEvent::Filled, filled, 0);
                self.pool.destroy(index);
                return Ok(());
            }
        }

        if ioc {
            self.execute_matches(index, now);
            return self.finish_immediate(index);
        }

        self.execute_matches(index, now);

        if is_market {
            // Market orders never rest
            return self.finish_immediate(index);
        }

        let (filled, remaining) = {
            let order = self.pool.get(index);
            (order.filled_quantity(), order.remaining_quantity())
        };

        if remaining == 0 {
            self.context.emit_order_event(id, OrderEvent::Filled, filled, 0);
            self.pool.destroy(index);
        } else if restable {
            self.add_to_book(index);
            if filled > 0 {
                self.context
                    .emit_order_event(id, OrderEvent::Partial, filled, remaining);
            } else {
                self.context
                    .emit_order_event(id, OrderEvent::Accepted, 0, remaining);
            }
        } else {
            // Residual under a non-resting TIF: cancel like an IOC remainder
            self.pool.get_mut(index).cancel();
            self.context
                .emit_order_event(id, OrderEvent::Cancelled, filled, 0);
            self.pool.destroy(index);
        }

        Ok(())
    }

    /// Disposition for orders that never rest (market, IOC): cancel any
    /// residual, report a full fill otherwise, destroy either way.
    fn finish_immediate(&mut self, index: ArenaIndex) -> Result<(), BookError> {
        let (id, filled, remaining) = {
            let order = self.pool.get(index);
            (
                order.order_id(),
                order.filled_quantity(),
                order.remaining_quantity(),
            )
        };

        if remaining > 0 {
            self.pool.get_mut(index).cancel();
            self.context
                .emit_order_event(id, OrderEvent::Cancelled, filled, 0);
        } else {
            self.context
                .emit_order_event(id, OrderEvent::Filled, filled, 0);
        }
        self.pool.destroy(index);
        Ok(())
    }

    /// Walk the opposite side from the frontier, matching level by level
    /// until the aggressor is satisfied or prices stop crossing.
    fn execute_matches(&mut self, aggressive: ArenaIndex, now: Timestamp) {
        let (side, limit_price, is_market, aggressor_id) = {
            let order = self.pool.get(aggressive);
            (
                order.side(),
                order.price(),
                order.is_market(),
                order.order_id(),
            )
        };

        let mut fills: Vec<Fill> = Vec::new();

        loop {
            let remaining = self.pool.get(aggressive).remaining_quantity();
            if remaining == 0 {
                break;
            }

            let frontier = match side {
                Side::Buy => self.asks.keys().next().copied(),
                Side::Sell => self.bids.keys().next_back().copied(),
            };
            let Some(level_price) = frontier else { break };

            let crosses = is_market
                || match side {
                    Side::Buy => limit_price >= level_price,
                    Side::Sell => limit_price <= level_price,
                };
            if !crosses {
                break;
            }

            fills.clear();
            let matched = {
                let level = match side {
                    Side::Buy => self.asks.get_mut(&level_price),
                    Side::Sell => self.bids.get_mut(&level_price),
                };
                let Some(level) = level else { break };
                level.match_orders(&mut self.pool, aggressive, remaining, &mut fills)
            };
            debug_assert!(matched > 0, "no progress at a crossing level");

            for fill in &fills {
                self.total_trades += 1;
                self.total_volume += fill.quantity as u64;

                let (buy_id, sell_id) = match side {
                    Side::Buy => (aggressor_id, fill.passive_id),
                    Side::Sell => (fill.passive_id, aggressor_id),
                };
                trace!(
                    buy = buy_id,
                    sell = sell_id,
                    price = fill.price,
                    quantity = fill.quantity,
                    "trade"
                );
                self.context.emit_trade(&Trade {
                    buy_order_id: buy_id,
                    sell_order_id: sell_id,
                    price: fill.price,
                    quantity: fill.quantity,
                    timestamp: now,
                });

                // Passive lifecycle follows its last trade
                if fill.passive_remaining == 0 {
                    self.context.emit_order_event(
                        fill.passive_id,
                        OrderEvent::Filled,
                        fill.passive_filled,
                        0,
                    );
                    self.pool.destroy(fill.passive_index);
                } else {
                    self.context.emit_order_event(
                        fill.passive_id,
                        OrderEvent::Partial,
                        fill.passive_filled,
                        fill.passive_remaining,
                    );
                }
            }

            let emptied = match side {
                Side::Buy => self.asks.get(&level_price).map_or(false, |l| l.is_empty()),
                Side::Sell => self.bids.get(&level_price).map_or(false, |l| l.is_empty()),
            };
            if emptied {
                match side {
                    Side::Buy => {
                        self.asks.remove(&level_price);
                        self.refresh_best_ask();
                    }
                    Side::Sell => {
                        self.bids.remove(&level_price);
                        self.refresh_best_bid();
                    }
                }
            }

            if matched == 0 {
                break;
            }
        }
    }

    // ========================================================================
    // Book management
    // ========================================================================

    fn add_to_book(&mut self, index: ArenaIndex) {
        let (side, price, filled) = {
            let order = self.pool.get(index);
            debug_assert!(!order.is_market());
            (order.side(), order.price(), order.filled_quantity())
        };

        // A triggered stop-limit rests like any other order from here on
        let state = if filled > 0 {
            OrderState::PartiallyFilled
        } else {
            OrderState::Active
        };
        self.pool.get_mut(index).set_state(state);

        match side {
            Side::Buy => {
                self.bids
                    .entry(price)
                    .or_insert_with(|| PriceLevel::new(price))
                    .add_order(&mut self.pool, index);
                if self.best_bid.map_or(true, |best| price > best) {
                    self.best_bid = Some(price);
                }
            }
            Side::Sell => {
                self.asks
                    .entry(price)
                    .or_insert_with(|| PriceLevel::new(price))
                    .add_order(&mut self.pool, index);
                if self.best_ask.map_or(true, |best| price < best) {
                    self.best_ask = Some(price);
                }
            }
        }
    }

    fn remove_from_book(&mut self, index: ArenaIndex) {
        let (resting, side, price) = {
            let order = self.pool.get(index);
            (order.is_resting(), order.side(), order.price())
        };
        if !resting {
            return;
        }

        let emptied = {
            let level = match side {
                Side::Buy => self.bids.get_mut(&price),
                Side::Sell => self.asks.get_mut(&price),
            };
            let Some(level) = level else { return };
            level.remove_order(&mut self.pool, index);
            level.is_empty()
        };

        if emptied {
            match side {
                Side::Buy => {
                    self.bids.remove(&price);
                    if self.best_bid == Some(price) {
                        self.refresh_best_bid();
                    }
                }
                Side::Sell => {
                    self.asks.remove(&price);
                    if self.best_ask == Some(price) {
                        self.refresh_best_ask();
                    }
                }
            }
        }
    }

    fn refresh_best_bid(&mut self) {
        self.best_bid = self.bids.keys().next_back().copied();
    }

    fn refresh_best_ask(&mut self) {
        self.best_ask = self.asks.keys().next().copied();
    }

    // ========================================================================
    // Cancel / modify / replace
    // ========================================================================

    /// Cancel a live order. Emits `Cancelled` with the filled count.
    pub fn cancel(&mut self, order_id: OrderId) -> Result<(), BookError> {
        let index = self.pool.find(order_id).ok_or(BookError::OrderNotFound)?;

        let (pending_stop, filled) = {
            let order = self.pool.get(index);
            (
                order.is_stop() && order.state() == OrderState::PendingNew,
                order.filled_quantity(),
            )
        };

        if pending_stop {
            self.stop_orders.remove(&order_id);
        } else {
            self.remove_from_book(index);
        }

        self.pool.get_mut(index).cancel();
        self.context
            .emit_order_event(order_id, OrderEvent::Cancelled, filled, 0);
        self.pool.destroy(index);

        self.auto_sweep_stops();
        Ok(())
    }

    /// Reduce an order's total quantity. Requires
    /// `filled < new_quantity < total`; time priority is preserved.
    pub fn modify(&mut self, order_id: OrderId, new_quantity: Quantity) -> Result<(), BookError> {
        let index = self.pool.find(order_id).ok_or(BookError::OrderNotFound)?;

        let (resting, side, price, old_remaining, old_visible) = {
            let order = self.pool.get(index);
            (
                order.is_resting(),
                order.side(),
                order.price(),
                order.remaining_quantity(),
                order.visible_quantity(),
            )
        };

        if !self.pool.get_mut(index).reduce_quantity(new_quantity) {
            return Err(BookError::InvalidQuantity);
        }

        if resting {
            let level = match side {
                Side::Buy => self.bids.get_mut(&price),
                Side::Sell => self.asks.get_mut(&price),
            };
            if let Some(level) = level {
                level.update_after_fill(&mut self.pool, index, old_remaining, old_visible);
            }
        }
        Ok(())
    }

    /// Cancel `old_order_id` and submit a fresh GTC limit on the same side
    /// at the new price and quantity. Time priority is lost.
    ///
    /// The replacement is checked first so a bad request cannot leave the
    /// book with the old order already gone.
    pub fn replace(
        &mut self,
        old_order_id: OrderId,
        new_order_id: OrderId,
        new_price: Price,
        new_quantity: Quantity,
    ) -> Result<(), BookError> {
        let index = self.pool.find(old_order_id).ok_or(BookError::OrderNotFound)?;
        // Capture before cancellation destroys the original
        let side = self.pool.get(index).side();

        if new_order_id == INVALID_ORDER_ID {
            return Err(BookError::InvalidParam);
        }
        if new_quantity == 0 {
            return Err(BookError::InvalidQuantity);
        }
        if new_price == 0 || !self.context.config().price_in_bounds(new_price) {
            return Err(BookError::InvalidPrice);
        }
        if new_order_id != old_order_id && self.pool.contains(new_order_id) {
            return Err(BookError::DuplicateOrder);
        }

        self.cancel(old_order_id)?;
        self.add_limit(new_order_id, side, new_price, new_quantity)
    }

    // ========================================================================
    // Stop orders
    // ========================================================================

    fn submit_stop(&mut self, index: ArenaIndex, now: Timestamp) -> Result<(), BookError> {
        let (id, remaining) = {
            let order = self.pool.get(index);
            (order.order_id(), order.remaining_quantity())
        };

        if self.stop_triggered(index) {
            self.pool.get_mut(index).trigger_stop();
            self.context
                .emit_order_event(id, OrderEvent::Triggered, 0, remaining);
            return self.process_new_order(index, now);
        }

        self.stop_orders.insert(id, index);
        self.context
            .emit_order_event(id, OrderEvent::Accepted, 0, remaining);
        Ok(())
    }

    fn stop_triggered(&self, index: ArenaIndex) -> bool {
        let order = self.pool.get(index);
        let stop_price = order.stop_price();
        match order.side() {
            Side::Buy => matches!(self.best_ask, Some(ask) if ask >= stop_price),
            Side::Sell => matches!(self.best_bid, Some(bid) if bid <= stop_price),
        }
    }

    /// Sweep the pending-stop table once, converting every stop whose
    /// trigger condition holds and running it through the submission path.
    ///
    /// Triggering removes the order from the table first, so repeated
    /// sweeps cannot fire the same stop twice. Returns the trigger count.
    pub fn process_stops(&mut self) -> u32 {
        let triggered: Vec<(OrderId, ArenaIndex)> = self
            .stop_orders
            .iter()
            .filter(|(_, &index)| self.stop_triggered(index))
            .map(|(&id, &index)| (id, index))
            .collect();

        let mut count = 0;
        for (id, index) in triggered {
            self.stop_orders.remove(&id);

            let remaining = self.pool.get(index).remaining_quantity();
            self.pool.get_mut(index).trigger_stop();
            self.context
                .emit_order_event(id, OrderEvent::Triggered, 0, remaining);

            let now = self.context.timestamp();
            // A policy rejection here still terminates the order; there is
            // nothing left to propagate.
            let _ = self.process_new_order(index, now);
            count += 1;
        }

        if count > 0 {
            debug!(count, "stop orders triggered");
        }
        count
    }

    /// Under `StopPolicy::Automatic`, run trigger sweeps until quiescent or
    /// the cascade bound is hit.
    fn auto_sweep_stops(&mut self) {
        if self.context.config().stop_policy != StopPolicy::Automatic {
            return;
        }
        for _ in 0..MAX_STOP_CASCADES {
            if self.process_stops() == 0 {
                break;
            }
        }
    }

    // ========================================================================
    // Expiry
    // ========================================================================

    /// Expire every live order with `expire_time > 0` and `now >=
    /// expire_time`. DAY orders carry the end-of-day timestamp supplied by
    /// the caller. Returns the expired count.
    pub fn process_expirations(&mut self, now: Timestamp) -> u32 {
        if !self.context.config().enable_time_expiry {
            return 0;
        }

        let expired = self.pool.collect_expired(now);
        let mut count = 0;

        for order_id in expired {
            let Some(index) = self.pool.find(order_id) else { continue };

            let pending_stop = {
                let order = self.pool.get(index);
                order.is_stop() && order.state() == OrderState::PendingNew
            };
            if pending_stop {
                self.stop_orders.remove(&order_id);
            } else {
                self.remove_from_book(index);
            }

            let filled = self.pool.get(index).filled_quantity();
            self.pool.get_mut(index).expire();
            self.context
                .emit_order_event(order_id, OrderEvent::Expired, filled, 0);
            self.pool.destroy(index);
            count += 1;
        }

        if count > 0 {
            debug!(count, "orders expired");
        }
        self.auto_sweep_stops();
        count
    }

    // ========================================================================
    // Policy helpers
    // ========================================================================

    fn would_match_immediately(&self, side: Side, price: Price) -> bool {
        match side {
            Side::Buy => matches!(self.best_ask, Some(ask) if price >= ask),
            Side::Sell => matches!(self.best_bid, Some(bid) if price <= bid),
        }
    }

    fn crosses_book(&self, side: Side, price: Price, is_market: bool) -> bool {
        if is_market {
            match side {
                Side::Buy => self.best_ask.is_some(),
                Side::Sell => self.best_bid.is_some(),
            }
        } else {
            self.would_match_immediately(side, price)
        }
    }

    /// Can the opposite side source `quantity` at acceptable prices?
    /// Hidden volume counts; market orders accept every level. Each level
    /// answers for the still-unsourced remainder via `fok_fills`.
    fn can_source(&self, side: Side, limit: Price, is_market: bool, quantity: Quantity) -> bool {
        let mut needed = quantity;
        match side {
            Side::Buy => {
                for (&price, level) in self.asks.iter() {
                    if !is_market && limit < price {
                        break;
                    }
                    if level.fok_fills(needed) {
                        return true;
                    }
                    // fok_fills failed, so the level volume is below
                    // `needed` and the narrowing cast is lossless
                    needed -= level.total_volume() as Quantity;
                }
            }
            Side::Sell => {
                for (&price, level) in self.bids.iter().rev() {
                    if !is_market && limit > price {
                        break;
                    }
                    if level.fok_fills(needed) {
                        return true;
                    }
                    needed -= level.total_volume() as Quantity;
                }
            }
        }
        false
    }

    // ========================================================================
    // Market data queries
    // ========================================================================

    #[inline]
    pub fn best_bid(&self) -> Option<Price> {
        self.best_bid
    }

    #[inline]
    pub fn best_ask(&self) -> Option<Price> {
        self.best_ask
    }

    /// `best_ask - best_bid` when both sides are present
    pub fn spread(&self) -> Option<Price> {
        match (self.best_bid, self.best_ask) {
            (Some(bid), Some(ask)) => Some(ask - bid),
            _ => None,
        }
    }

    /// Midpoint of the touch when both sides are present
    pub fn mid(&self) -> Option<Price> {
        match (self.best_bid, self.best_ask) {
            (Some(bid), Some(ask)) => Some(((bid as u64 + ask as u64) / 2) as Price),
            _ => None,
        }
    }

    /// Total resting volume at one price, 0 if the level does not exist
    pub fn volume_at_price(&self, side: Side, price: Price) -> u64 {
        let level = match side {
            Side::Buy => self.bids.get(&price),
            Side::Sell => self.asks.get(&price),
        };
        level.map_or(0, |l| l.total_volume())
    }

    /// Displayed (visible) volume at one price, 0 if the level does not
    /// exist. Hidden quantity is excluded.
    pub fn visible_volume_at_price(&self, side: Side, price: Price) -> u64 {
        let level = match side {
            Side::Buy => self.bids.get(&price),
            Side::Sell => self.asks.get(&price),
        };
        level.map_or(0, |l| l.visible_volume())
    }

    /// Sum of `total_volume` over the first `num_levels` levels in
    /// frontier order
    pub fn depth(&self, side: Side, num_levels: u32) -> u64 {
        match side {
            Side::Buy => self
                .bids
                .values()
                .rev()
                .take(num_levels as usize)
                .map(|l| l.total_volume())
                .sum(),
            Side::Sell => self
                .asks
                .values()
                .take(num_levels as usize)
                .map(|l| l.total_volume())
                .sum(),
        }
    }

    #[inline]
    pub fn has_order(&self, order_id: OrderId) -> bool {
        self.pool.contains(order_id)
    }

    /// Snapshot of a live order, if any
    pub fn order_info(&self, order_id: OrderId) -> Option<OrderSnapshot> {
        self.pool
            .find(order_id)
            .map(|index| self.pool.get(index).snapshot())
    }

    #[inline]
    pub fn order_count(&self) -> usize {
        self.pool.live_count()
    }

    #[inline]
    pub fn bid_level_count(&self) -> usize {
        self.bids.len()
    }

    #[inline]
    pub fn ask_level_count(&self) -> usize {
        self.asks.len()
    }

    #[inline]
    pub fn total_trades(&self) -> u64 {
        self.total_trades
    }

    #[inline]
    pub fn total_volume(&self) -> u64 {
        self.total_volume
    }

    pub fn stats(&self) -> BookStats {
        BookStats {
            total_orders: self.pool.live_count() as u32,
            bid_levels: self.bids.len() as u32,
            ask_levels: self.asks.len() as u32,
            total_bid_volume: self.bids.values().map(|l| l.total_volume()).sum(),
            total_ask_volume: self.asks.values().map(|l| l.total_volume()).sum(),
            best_bid: self.best_bid.unwrap_or(0),
            best_ask: self.best_ask.unwrap_or(0),
            total_trades: self.total_trades,
            total_volume: self.total_volume,
        }
    }

    // ========================================================================
    // Administrative
    // ========================================================================

    /// Drop every order, level, and pending stop. Cumulative trade counters
    /// are preserved.
    pub fn clear(&mut self) {
        self.bids.clear();
        self.asks.clear();
        self.stop_orders.clear();
        self.pool.clear();
        self.best_bid = None;
        self.best_ask = None;
    }
}

impl std::fmt::Debug for OrderBook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrderBook")
            .field("symbol", &self.symbol)
            .field("best_bid", &self.best_bid)
            .field("best_ask", &self.best_ask)
            .field("bid_levels", &self.bids.len())
            .field("ask_levels", &self.asks.len())
            .field("orders", &self.pool.live_count())
            .field("pending_stops", &self.stop_orders.len())
            .finish()
    }
}
