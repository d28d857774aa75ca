//! Core types shared across the engine.
//!
//! Enum discriminants and error codes are part of the external contract;
//! callers embedding the engine behind a foreign interface rely on the
//! numeric values staying stable.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Price in integer ticks. Tick semantics are external to the engine.
pub type Price = u32;

/// Quantity in lots.
pub type Quantity = u32;

/// Client-assigned order identifier. `0` is reserved as invalid.
pub type OrderId = u64;

/// Monotonic nanoseconds from the context clock.
pub type Timestamp = u64;

/// Reserved order id meaning "no order".
pub const INVALID_ORDER_ID: OrderId = 0;

/// Order side (buy = bid, sell = ask)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Side {
    /// Buy side (bids)
    Buy = 0,
    /// Sell side (asks)
    Sell = 1,
}

impl Side {
    /// Returns the opposite side
    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Side::Buy => Side::Sell,
            Side::Sell => Side::Buy,
        }
    }
}

/// Order type determines matching behavior
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum OrderType {
    /// Limit order - rests in book if not fully matched (default)
    #[default]
    Limit = 0,
    /// Market order - executes against the best available prices, never rests
    Market = 1,
    /// Stop market order - inert until the trigger price is reached
    Stop = 2,
    /// Stop limit order - converts to a limit order on trigger
    StopLimit = 3,
}

/// Time-in-force controls how long an order remains eligible
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum TimeInForce {
    /// Good Till Cancel - rests until cancelled (default)
    #[default]
    Gtc = 0,
    /// Immediate Or Cancel - match what is possible, cancel the rest
    Ioc = 1,
    /// Fill Or Kill - full immediate fill or reject
    Fok = 2,
    /// Good for Day - expires at the end-of-day timestamp supplied by the caller
    Day = 3,
    /// Good Till Date - expires at a caller-specified timestamp
    Gtd = 4,
}

/// Order flags bitfield. Values are part of the contract.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderFlags(pub u32);

impl OrderFlags {
    pub const NONE: OrderFlags = OrderFlags(0);
    /// Reject instead of matching immediately (maker-only)
    pub const POST_ONLY: OrderFlags = OrderFlags(1);
    /// Hidden order; combined with a display quantity this is an iceberg
    pub const HIDDEN: OrderFlags = OrderFlags(1 << 1);
    /// All-or-None: full fill in one pass or no execution
    pub const AON: OrderFlags = OrderFlags(1 << 2);
    /// Reserved: requires position data, not interpreted by the core
    pub const REDUCE_ONLY: OrderFlags = OrderFlags(1 << 3);

    /// True if every flag in `other` is set in `self`
    #[inline]
    pub const fn contains(self, other: OrderFlags) -> bool {
        self.0 & other.0 == other.0
    }

    /// Raw bit representation
    #[inline]
    pub const fn bits(self) -> u32 {
        self.0
    }
}

impl std::ops::BitOr for OrderFlags {
    type Output = OrderFlags;

    #[inline]
    fn bitor(self, rhs: OrderFlags) -> OrderFlags {
        OrderFlags(self.0 | rhs.0)
    }
}

impl std::ops::BitOrAssign for OrderFlags {
    #[inline]
    fn bitor_assign(&mut self, rhs: OrderFlags) {
        self.0 |= rhs.0;
    }
}

/// Order lifecycle state
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum OrderState {
    /// Created but not yet in the book (pending stop orders)
    PendingNew = 0,
    /// Resting in the book, no fills yet
    Active = 1,
    /// Resting with some quantity filled
    PartiallyFilled = 2,
    /// Completely filled
    Filled = 3,
    /// Cancelled by the submitter
    Cancelled = 4,
    /// Rejected by policy (post-only, FOK)
    Rejected = 5,
    /// Expired (DAY/GTD)
    Expired = 6,
    /// Stop order triggered and converted
    Triggered = 7,
}

/// Order lifecycle events delivered through the context callback
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum OrderEvent {
    /// Order accepted and resting (or parked as a pending stop)
    Accepted = 0,
    /// Order rejected by policy
    Rejected = 1,
    /// Order fully filled
    Filled = 2,
    /// Order partially filled, still live
    Partial = 3,
    /// Order cancelled (explicitly or as an IOC/market residual)
    Cancelled = 4,
    /// Order expired (DAY/GTD)
    Expired = 5,
    /// Stop order triggered and converted
    Triggered = 6,
}

/// Failure statuses. Discriminants mirror the external status codes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error, Serialize, Deserialize)]
#[repr(i32)]
pub enum BookError {
    /// Unspecified internal failure
    #[error("internal error")]
    Internal = -1,
    /// Malformed parameter (zero id, disabled feature)
    #[error("invalid parameter")]
    InvalidParam = -2,
    /// Order storage exhausted
    #[error("out of memory")]
    OutOfMemory = -3,
    /// No live order with that id
    #[error("order not found")]
    OrderNotFound = -4,
    /// Missing, out-of-bounds, or misaligned price
    #[error("invalid price")]
    InvalidPrice = -5,
    /// Zero or otherwise unusable quantity
    #[error("invalid quantity")]
    InvalidQuantity = -6,
    /// An order with this id is already live
    #[error("duplicate order id")]
    DuplicateOrder = -7,
    /// Post-only order would have matched immediately
    #[error("post-only order would match")]
    WouldMatch = -8,
    /// FOK/AON order cannot be filled in full
    #[error("cannot fill order in full")]
    CannotFill = -9,
    /// Stop order has not triggered
    #[error("stop order not triggered")]
    StopNotTriggered = -10,
}

impl BookError {
    /// Numeric status code (stable contract value)
    #[inline]
    pub const fn code(self) -> i32 {
        self as i32
    }
}

/// A single execution between a buy and a sell order.
///
/// The buy/sell identities are resolved from the incoming order's side:
/// when the aggressor is the buy, `buy_order_id` names the aggressor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trade {
    pub buy_order_id: OrderId,
    pub sell_order_id: OrderId,
    /// Execution price (the passive order's limit)
    pub price: Price,
    pub quantity: Quantity,
    pub timestamp: Timestamp,
}

/// Read-only copy of an order's current state, for queries.
///
/// Absent prices are reported with the `0` sentinel so the snapshot
/// serializes the same way the wire contract spells it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderSnapshot {
    pub order_id: OrderId,
    pub side: Side,
    pub order_type: OrderType,
    pub price: Price,
    pub stop_price: Price,
    pub total_quantity: Quantity,
    pub filled_quantity: Quantity,
    pub remaining_quantity: Quantity,
    pub display_quantity: Quantity,
    pub time_in_force: TimeInForce,
    pub flags: OrderFlags,
    pub state: OrderState,
    pub created_time: Timestamp,
    pub expire_time: Timestamp,
}

/// Aggregate book statistics. Best prices use the `0` sentinel when absent.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookStats {
    pub total_orders: u32,
    pub bid_levels: u32,
    pub ask_levels: u32,
    pub total_bid_volume: u64,
    pub total_ask_volume: u64,
    pub best_bid: Price,
    pub best_ask: Price,
    /// Cumulative fill count
    pub total_trades: u64,
    /// Cumulative matched quantity
    pub total_volume: u64,
}

/// Full order submission parameters.
///
/// The constructors cover the common shapes; the `with_*` methods layer on
/// time-in-force, flags, display quantity, and expiry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OrderRequest {
    pub order_id: OrderId,
    pub order_type: OrderType,
    pub side: Side,
    /// Limit price (0 for market orders)
    pub price: Price,
    /// Stop trigger price (0 for non-stop orders)
    pub stop_price: Price,
    pub quantity: Quantity,
    /// Visible slice for icebergs; 0 shows the full remaining quantity
    pub display_quantity: Quantity,
    pub time_in_force: TimeInForce,
    pub flags: OrderFlags,
    /// Expiry timestamp for DAY/GTD; 0 means no expiry
    pub expire_time: Timestamp,
}

impl OrderRequest {
    /// A plain GTC limit order
    pub const fn limit(order_id: OrderId, side: Side, price: Price, quantity: Quantity) -> Self {
        Self {
            order_id,
            order_type: OrderType::Limit,
            side,
            price,
            stop_price: 0,
            quantity,
            display_quantity: 0,
            time_in_force: TimeInForce::Gtc,
            flags: OrderFlags::NONE,
            expire_time: 0,
        }
    }

    /// A market order
    pub const fn market(order_id: OrderId, side: Side, quantity: Quantity) -> Self {
        Self {
            order_id,
            order_type: OrderType::Market,
            side,
            price: 0,
            stop_price: 0,
            quantity,
            display_quantity: 0,
            time_in_force: TimeInForce::Gtc,
            flags: OrderFlags::NONE,
            expire_time: 0,
        }
    }

    /// A stop market order, inert until `stop_price` is reached
    pub const fn stop(order_id: OrderId, side: Side, stop_price: Price, quantity: Quantity) -> Self {
        Self {
            order_id,
            order_type: OrderType::Stop,
            side,
            price: 0,
            stop_price,
            quantity,
            display_quantity: 0,
            time_in_force: TimeInForce::Gtc,
            flags: OrderFlags::NONE,
            expire_time: 0,
        }
    }

    /// A stop limit order: converts to a limit at `price` on trigger
    pub const fn stop_limit(
        order_id: OrderId,
        side: Side,
        stop_price: Price,
        price: Price,
        quantity: Quantity,
    ) -> Self {
        Self {
            order_id,
            order_type: OrderType::StopLimit,
            side,
            price,
            stop_price,
            quantity,
            display_quantity: 0,
            time_in_force: TimeInForce::Gtc,
            flags: OrderFlags::NONE,
            expire_time: 0,
        }
    }

    pub const fn with_tif(mut self, tif: TimeInForce) -> Self {
        self.time_in_force = tif;
        self
    }

    pub const fn with_flags(mut self, flags: OrderFlags) -> Self {
        self.flags = flags;
        self
    }

    pub const fn with_display(mut self, display_quantity: Quantity) -> Self {
        self.display_quantity = display_quantity;
        self
    }

    pub const fn with_expiry(mut self, expire_time: Timestamp) -> Self {
        self.expire_time = expire_time;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_side_opposite() {
        assert_eq!(Side::Buy.opposite(), Side::Sell);
        assert_eq!(Side::Sell.opposite(), Side::Buy);
    }

    #[test]
    fn test_contract_discriminants() {
        assert_eq!(Side::Buy as u8, 0);
        assert_eq!(Side::Sell as u8, 1);
        assert_eq!(OrderType::Limit as u8, 0);
        assert_eq!(OrderType::Market as u8, 1);
        assert_eq!(OrderType::Stop as u8, 2);
        assert_eq!(OrderType::StopLimit as u8, 3);
        assert_eq!(TimeInForce::Gtc as u8, 0);
        assert_eq!(TimeInForce::Gtd as u8, 4);
        assert_eq!(OrderEvent::Accepted as u8, 0);
        assert_eq!(OrderEvent::Triggered as u8, 6);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(BookError::Internal.code(), -1);
        assert_eq!(BookError::InvalidParam.code(), -2);
        assert_eq!(BookError::OutOfMemory.code(), -3);
        assert_eq!(BookError::OrderNotFound.code(), -4);
        assert_eq!(BookError::InvalidPrice.code(), -5);
        assert_eq!(BookError::InvalidQuantity.code(), -6);
        assert_eq!(BookError::DuplicateOrder.code(), -7);
        assert_eq!(BookError::WouldMatch.code(), -8);
        assert_eq!(BookError::CannotFill.code(), -9);
        assert_eq!(BookError::StopNotTriggered.code(), -10);
    }

    #[test]
    fn test_flags() {
        let flags = OrderFlags::POST_ONLY | OrderFlags::HIDDEN;
        assert!(flags.contains(OrderFlags::POST_ONLY));
        assert!(flags.contains(OrderFlags::HIDDEN));
        assert!(!flags.contains(OrderFlags::AON));
        assert_eq!(flags.bits(), 3);

        assert_eq!(OrderFlags::POST_ONLY.bits(), 1);
        assert_eq!(OrderFlags::HIDDEN.bits(), 2);
        assert_eq!(OrderFlags::AON.bits(), 4);
        assert_eq!(OrderFlags::REDUCE_ONLY.bits(), 8);
    }

    #[test]
    fn test_request_constructors() {
        let limit = OrderRequest::limit(1, Side::Buy, 10_000, 50);
        assert_eq!(limit.order_type, OrderType::Limit);
        assert_eq!(limit.time_in_force, TimeInForce::Gtc);

        let ioc = OrderRequest::limit(2, Side::Sell, 10_000, 50).with_tif(TimeInForce::Ioc);
        assert_eq!(ioc.time_in_force, TimeInForce::Ioc);

        let stop = OrderRequest::stop(3, Side::Buy, 10_100, 25);
        assert_eq!(stop.order_type, OrderType::Stop);
        assert_eq!(stop.stop_price, 10_100);
        assert_eq!(stop.price, 0);

        let iceberg = OrderRequest::limit(4, Side::Sell, 10_000, 500).with_display(100);
        assert_eq!(iceberg.display_quantity, 100);
    }

    #[test]
    fn test_defaults() {
        assert_eq!(OrderType::default(), OrderType::Limit);
        assert_eq!(TimeInForce::default(), TimeInForce::Gtc);
        assert_eq!(OrderFlags::default(), OrderFlags::NONE);
    }
}
