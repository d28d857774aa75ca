//! Slab allocator for order records.
//!
//! The arena pre-allocates a contiguous block of order slots at startup and
//! recycles them through a free list threaded through the `next` link of
//! vacant slots. Allocation and release are O(1), and a slot's index stays
//! stable for the lifetime of the order occupying it.

use std::fmt;

use crate::order::Order;

/// Sentinel value representing a null/invalid index
pub const NULL_INDEX: u32 = u32::MAX;

/// Index of an order slot in the arena - a "compressed pointer"
pub type ArenaIndex = u32;

/// Fixed-capacity pool of order slots with O(1) alloc/free.
pub struct Arena {
    /// Contiguous block of order slots
    slots: Vec<Order>,

    /// Head of the free list (index of first vacant slot)
    free_head: ArenaIndex,

    /// Number of currently occupied slots
    live: u32,

    /// Total capacity
    capacity: u32,
}

impl Arena {
    /// Create a new arena with the specified capacity.
    ///
    /// # Panics
    /// Panics if capacity is not below `NULL_INDEX`.
    pub fn new(capacity: u32) -> Self {
        assert!(capacity < NULL_INDEX, "capacity must be below NULL_INDEX");

        let mut slots = vec![Order::vacant(); capacity as usize];

        // Thread the free list through all slots
        for i in 0..capacity.saturating_sub(1) {
            slots[i as usize].next = i + 1;
        }
        if capacity > 0 {
            slots[(capacity - 1) as usize].next = NULL_INDEX;
        }

        Self {
            slots,
            free_head: if capacity > 0 { 0 } else { NULL_INDEX },
            live: 0,
            capacity,
        }
    }

    /// Place an order into a vacant slot and return its index.
    ///
    /// Returns `None` if the arena is full.
    #[inline]
    pub fn insert(&mut self, order: Order) -> Option<ArenaIndex> {
        if self.free_head == NULL_INDEX {
            return None;
        }

        let index = self.free_head;
        self.free_head = self.slots[index as usize].next;
        self.live += 1;

        self.slots[index as usize] = order;
        self.slots[index as usize].next = NULL_INDEX;
        self.slots[index as usize].prev = NULL_INDEX;

        Some(index)
    }

    /// Release a slot back to the free list.
    ///
    /// The caller must ensure the index is currently occupied; releasing a
    /// vacant slot corrupts the free list.
    #[inline]
    pub fn free(&mut self, index: ArenaIndex) {
        debug_assert!(index < self.capacity, "index out of bounds");
        debug_assert!(self.live > 0, "double free");

        self.slots[index as usize] = Order::vacant();
        self.slots[index as usize].next = self.free_head;
        self.free_head = index;
        self.live -= 1;
    }

    #[inline]
    pub fn get(&self, index: ArenaIndex) -> &Order {
        debug_assert!(index < self.capacity, "index out of bounds");
        &self.slots[index as usize]
    }

    #[inline]
    pub fn get_mut(&mut self, index: ArenaIndex) -> &mut Order {
        debug_assert!(index < self.capacity, "index out of bounds");
        &mut self.slots[index as usize]
    }

    /// Number of currently occupied slots
    #[inline]
    pub fn live(&self) -> u32 {
        self.live
    }

    #[inline]
    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.free_head == NULL_INDEX
    }
}

impl fmt::Debug for Arena {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Arena")
            .field("capacity", &self.capacity)
            .field("live", &self.live)
            .field("free_head", &self.free_head)
            .finish()
    }
}
