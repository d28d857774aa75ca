//! Order pool: arena storage plus an id index.
//!
//! Owns every live order in a book. Creation rejects duplicate ids,
//! destruction unindexes before releasing the slot, and lookup by order id
//! is O(1) through an `FxHashMap`.

use rustc_hash::FxHashMap;

use crate::arena::{Arena, ArenaIndex};
use crate::order::Order;
use crate::types::{BookError, OrderId, Timestamp};

pub struct OrderPool {
    arena: Arena,
    index: FxHashMap<OrderId, ArenaIndex>,
}

impl OrderPool {
    pub fn new(capacity: u32) -> Self {
        Self {
            arena: Arena::new(capacity),
            index: FxHashMap::with_capacity_and_hasher(capacity as usize, Default::default()),
        }
    }

    /// Admit an order, returning its stable arena index.
    pub fn create(&mut self, order: Order) -> Result<ArenaIndex, BookError> {
        let id = order.order_id();
        if self.index.contains_key(&id) {
            return Err(BookError::DuplicateOrder);
        }

        let index = self.arena.insert(order).ok_or(BookError::OutOfMemory)?;
        self.index.insert(id, index);
        Ok(index)
    }

    /// Unindex and release an order. The caller must have already unlinked
    /// it from any price level.
    pub fn destroy(&mut self, index: ArenaIndex) {
        let id = self.arena.get(index).order_id();
        self.index.remove(&id);
        self.arena.free(index);
    }

    #[inline]
    pub fn find(&self, order_id: OrderId) -> Option<ArenaIndex> {
        self.index.get(&order_id).copied()
    }

    #[inline]
    pub fn contains(&self, order_id: OrderId) -> bool {
        self.index.contains_key(&order_id)
    }

    #[inline]
    pub fn get(&self, index: ArenaIndex) -> &Order {
        self.arena.get(index)
    }

    #[inline]
    pub fn get_mut(&mut self, index: ArenaIndex) -> &mut Order {
        self.arena.get_mut(index)
    }

    #[inline]
    pub fn live_count(&self) -> usize {
        self.index.len()
    }

    #[inline]
    pub(crate) fn arena_mut(&mut self) -> &mut Arena {
        &mut self.arena
    }

    /// Ids of all live orders whose expiry has passed, for the expiry sweep.
    pub fn collect_expired(&self, now: Timestamp) -> Vec<OrderId> {
        self.index
            .iter()
            .filter(|(_, &idx)| self.arena.get(idx).is_expired(now))
            .map(|(&id, _)| id)
            .collect()
    }

    /// Destroy every live order.
    pub fn clear(&mut self) {
        let indices: Vec<ArenaIndex> = self.index.values().copied().collect();
        self.index.clear();
        for index in indices {
            self.arena.free(index);
        }
    }
}

impl std::fmt::Debug for OrderPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrderPool")
            .field("live", &self.index.len())
            .field("capacity", &self.arena.capacity())
            .finish()
    }
}
