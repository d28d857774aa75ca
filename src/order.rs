//! Order record and lifecycle state machine.
//!
//! Each order embeds its own FIFO linkage (arena indices) so a price level
//! can insert and unlink it without touching the heap.

use crate::arena::{ArenaIndex, NULL_INDEX};
use crate::types::{
    OrderFlags, OrderId, OrderRequest, OrderSnapshot, OrderState, OrderType, Price, Quantity,
    Side, TimeInForce, Timestamp, INVALID_ORDER_ID,
};

/// A single order with state, quantities, flags, and queue linkage.
#[derive(Clone, Debug)]
pub struct Order {
    // FIFO linkage within a price level (indices into the arena)
    pub(crate) next: ArenaIndex,
    pub(crate) prev: ArenaIndex,

    order_id: OrderId,
    side: Side,
    order_type: OrderType,
    state: OrderState,
    time_in_force: TimeInForce,
    flags: OrderFlags,

    /// Limit price (0 for market orders)
    price: Price,
    /// Stop trigger price (0 for non-stop orders)
    stop_price: Price,

    total_quantity: Quantity,
    filled_quantity: Quantity,
    /// Visible slice size for icebergs; 0 shows everything
    display_quantity: Quantity,
    /// Fills charged against the current visible slice
    visible_filled: Quantity,

    created_time: Timestamp,
    /// 0 means no expiry
    expire_time: Timestamp,
}

impl Order {
    /// Build an order from a full submission request.
    ///
    /// Stop orders start pending (they live in the stop table, not the
    /// book); everything else starts active.
    pub fn from_request(req: &OrderRequest, created: Timestamp) -> Self {
        let state = match req.order_type {
            OrderType::Stop | OrderType::StopLimit => OrderState::PendingNew,
            _ => OrderState::Active,
        };
        Self {
            next: NULL_INDEX,
            prev: NULL_INDEX,
            order_id: req.order_id,
            side: req.side,
            order_type: req.order_type,
            state,
            time_in_force: req.time_in_force,
            flags: req.flags,
            price: req.price,
            stop_price: req.stop_price,
            total_quantity: req.quantity,
            filled_quantity: 0,
            display_quantity: req.display_quantity,
            visible_filled: 0,
            created_time: created,
            expire_time: req.expire_time,
        }
    }

    /// Placeholder for unoccupied arena slots.
    pub(crate) const fn vacant() -> Self {
        Self {
            next: NULL_INDEX,
            prev: NULL_INDEX,
            order_id: INVALID_ORDER_ID,
            side: Side::Buy,
            order_type: OrderType::Limit,
            state: OrderState::PendingNew,
            time_in_force: TimeInForce::Gtc,
            flags: OrderFlags::NONE,
            price: 0,
            stop_price: 0,
            total_quantity: 0,
            filled_quantity: 0,
            display_quantity: 0,
            visible_filled: 0,
            created_time: 0,
            expire_time: 0,
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    #[inline]
    pub fn order_id(&self) -> OrderId {
        self.order_id
    }

    #[inline]
    pub fn side(&self) -> Side {
        self.side
    }

    #[inline]
    pub fn order_type(&self) -> OrderType {
        self.order_type
    }

    #[inline]
    pub fn state(&self) -> OrderState {
        self.state
    }

    #[inline]
    pub fn time_in_force(&self) -> TimeInForce {
        self.time_in_force
    }

    #[inline]
    pub fn flags(&self) -> OrderFlags {
        self.flags
    }

    #[inline]
    pub fn price(&self) -> Price {
        self.price
    }

    #[inline]
    pub fn stop_price(&self) -> Price {
        self.stop_price
    }

    #[inline]
    pub fn total_quantity(&self) -> Quantity {
        self.total_quantity
    }

    #[inline]
    pub fn filled_quantity(&self) -> Quantity {
        self.filled_quantity
    }

    #[inline]
    pub fn remaining_quantity(&self) -> Quantity {
        self.total_quantity - self.filled_quantity
    }

    #[inline]
    pub fn display_quantity(&self) -> Quantity {
        self.display_quantity
    }

    /// Quantity exposed to market data.
    ///
    /// Icebergs expose the unfilled part of the current display slice,
    /// capped by the remaining quantity so the final slice never overstates.
    /// A HIDDEN order with no display slice exposes nothing.
    pub fn visible_quantity(&self) -> Quantity {
        let remaining = self.remaining_quantity();
        if self.display_quantity == 0 {
            if self.flags.contains(OrderFlags::HIDDEN) {
                0
            } else {
                remaining
            }
        } else {
            remaining.min(self.display_quantity.saturating_sub(self.visible_filled))
        }
    }

    #[inline]
    pub fn created_time(&self) -> Timestamp {
        self.created_time
    }

    #[inline]
    pub fn expire_time(&self) -> Timestamp {
        self.expire_time
    }

    // ========================================================================
    // State queries
    // ========================================================================

    #[inline]
    pub fn is_buy(&self) -> bool {
        self.side == Side::Buy
    }

    #[inline]
    pub fn is_market(&self) -> bool {
        self.order_type == OrderType::Market
    }

    #[inline]
    pub fn is_stop(&self) -> bool {
        matches!(self.order_type, OrderType::Stop | OrderType::StopLimit)
    }

    #[inline]
    pub fn is_resting(&self) -> bool {
        matches!(self.state, OrderState::Active | OrderState::PartiallyFilled)
    }

    #[inline]
    pub fn is_filled(&self) -> bool {
        self.state == OrderState::Filled
    }

    #[inline]
    pub fn is_ioc(&self) -> bool {
        self.time_in_force == TimeInForce::Ioc
    }

    #[inline]
    pub fn is_fok(&self) -> bool {
        self.time_in_force == TimeInForce::Fok
    }

    /// True for TIFs that may rest in the book
    #[inline]
    pub fn is_restable_tif(&self) -> bool {
        matches!(
            self.time_in_force,
            TimeInForce::Gtc | TimeInForce::Day | TimeInForce::Gtd
        )
    }

    #[inline]
    pub fn is_post_only(&self) -> bool {
        self.flags.contains(OrderFlags::POST_ONLY)
    }

    #[inline]
    pub fn is_aon(&self) -> bool {
        self.flags.contains(OrderFlags::AON)
    }

    /// Iceberg orders carry a nonzero display slice
    #[inline]
    pub fn is_iceberg(&self) -> bool {
        self.display_quantity > 0
    }

    #[inline]
    pub fn has_expiry(&self) -> bool {
        self.expire_time > 0
    }

    #[inline]
    pub fn is_expired(&self, now: Timestamp) -> bool {
        self.has_expiry() && now >= self.expire_time
    }

    // ========================================================================
    // Lifecycle transitions
    // ========================================================================

    /// Apply a fill, returning the quantity actually filled.
    ///
    /// Iceberg orders replenish the visible slice once it is exhausted and
    /// quantity remains; the caller is responsible for requeueing at the
    /// level tail when that happens.
    pub fn fill(&mut self, quantity: Quantity) -> Quantity {
        let fill = quantity.min(self.remaining_quantity());
        if fill == 0 {
            return 0;
        }

        self.filled_quantity += fill;

        if self.display_quantity > 0 {
            self.visible_filled += fill;
            if self.visible_filled >= self.display_quantity && self.remaining_quantity() > 0 {
                // Expose the next slice
                self.visible_filled = 0;
            }
        }

        self.state = if self.filled_quantity >= self.total_quantity {
            OrderState::Filled
        } else {
            OrderState::PartiallyFilled
        };

        fill
    }

    /// Reduce total quantity. Only strict reductions that stay above the
    /// filled quantity are allowed; time priority is preserved.
    pub fn reduce_quantity(&mut self, new_quantity: Quantity) -> bool {
        if new_quantity >= self.total_quantity || new_quantity <= self.filled_quantity {
            return false;
        }
        self.total_quantity = new_quantity;
        true
    }

    pub fn cancel(&mut self) {
        self.state = OrderState::Cancelled;
    }

    pub fn reject(&mut self) {
        self.state = OrderState::Rejected;
    }

    pub fn expire(&mut self) {
        self.state = OrderState::Expired;
    }

    pub(crate) fn set_state(&mut self, state: OrderState) {
        self.state = state;
    }

    /// Convert a triggered stop into its underlying order type.
    /// One-shot: after conversion the order is no longer a stop.
    pub fn trigger_stop(&mut self) {
        debug_assert!(self.is_stop());
        self.order_type = match self.order_type {
            OrderType::Stop => OrderType::Market,
            _ => OrderType::Limit,
        };
        self.state = OrderState::Triggered;
        self.stop_price = 0;
    }

    /// Read-only copy of the current state
    pub fn snapshot(&self) -> OrderSnapshot {
        OrderSnapshot {
            order_id: self.order_id,
            side: self.side,
            order_type: self.order_type,
            price: self.price,
            stop_price: self.stop_price,
            total_quantity: self.total_quantity,
            filled_quantity: self.filled_quantity,
            remaining_quantity: self.remaining_quantity(),
            display_quantity: self.display_quantity,
            time_in_force: self.time_in_force,
            flags: self.flags,
            state: self.state,
            created_time: self.created_time,
            expire_time: self.expire_time,
        }
    }
}
