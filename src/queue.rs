//! The bounded blocking priority queue.
//!
//! Capacity is enforced by two counting semaphores (`slots` for producers,
//! `items` for consumers); the ring itself is only ever touched inside one
//! mutex-guarded critical section. Both operations take the semaphore
//! first and the ring lock second; `enqueue` and `dequeue` are the only
//! code paths touching either primitive, which fixes the lock order
//! structurally.

use crossbeam_utils::CachePadded;
use parking_lot::Mutex;
use thiserror::Error;

use crate::item::{Item, Priority};
use crate::semaphore::Semaphore;

/// Errors surfaced at queue construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum QueueError {
    /// The requested capacity was zero.
    #[error("queue capacity must be at least 1, got {0}")]
    InvalidCapacity(usize),
}

/// Ring storage and indices. Only accessed while holding the mutex.
///
/// Occupied slots always form two contiguous logical runs in traversal
/// order from `head`: an urgent run followed by a normal run, either
/// possibly empty, each FIFO.
struct Ring<T> {
    slots: Box<[Option<Item<T>>]>,
    head: usize,
    tail: usize,
    len: usize,
}

impl<T> Ring<T> {
    fn with_capacity(capacity: usize) -> Self {
        let mut slots = Vec::with_capacity(capacity);
        slots.resize_with(capacity, || None);
        Self {
            slots: slots.into_boxed_slice(),
            head: 0,
            tail: 0,
            len: 0,
        }
    }

    fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Places `item` according to its priority class. The caller has
    /// already taken a slot permit, so `len < capacity` holds here.
    fn insert(&mut self, item: Item<T>) {
        debug_assert!(self.len < self.capacity());
        if item.priority() == Priority::Urgent && self.len > 0 {
            self.insert_urgent(item);
        } else {
            self.slots[self.tail] = Some(item);
            self.tail = (self.tail + 1) % self.capacity();
        }
        self.len += 1;
    }

    /// Appends an urgent item to the end of the urgent run.
    ///
    /// Walks backward from the slot before `tail`, counting the trailing
    /// run of normal items, shifts that run one slot toward the new tail
    /// (nearest the tail first, so nothing is overwritten before it
    /// moves), and writes the urgent item into the vacated slot. Cost is
    /// proportional to the trailing normal run, not to `len`.
    fn insert_urgent(&mut self, item: Item<T>) {
        let capacity = self.capacity();

        let mut run = 0;
        while run < self.len {
            let idx = (self.tail + capacity - 1 - run) % capacity;
            let occupant = self.slots[idx].as_ref().expect("occupied ring slot");
            if occupant.priority() == Priority::Urgent {
                break;
            }
            run += 1;
        }

        for moved in 0..run {
            let src = (self.tail + capacity - 1 - moved) % capacity;
            let dst = (src + 1) % capacity;
            self.slots[dst] = self.slots[src].take();
        }

        let vacated = (self.tail + capacity - run) % capacity;
        self.slots[vacated] = Some(item);
        self.tail = (self.tail + 1) % capacity;
    }

    /// Takes the item at `head`. The caller has already taken an item
    /// permit, so `len > 0` holds here.
    fn remove(&mut self) -> Item<T> {
        debug_assert!(self.len > 0);
        let item = self.slots[self.head].take().expect("occupied ring slot");
        self.head = (self.head + 1) % self.capacity();
        self.len -= 1;
        item
    }
}

/// A fixed-capacity blocking MPMC queue with two-level priority ordering.
///
/// Shared between threads behind an `Arc`; all operations take `&self`.
pub struct BoundedQueue<T> {
    ring: Mutex<Ring<T>>,

    /// Producer admission: one permit per free slot.
    ///
    /// Padded onto its own cache line so producer-side waiting does not
    /// false-share with consumer-side waiting.
    slots: CachePadded<Semaphore>,

    /// Consumer admission: one permit per ready item.
    items: CachePadded<Semaphore>,

    capacity: usize,
}

impl<T: Send> BoundedQueue<T> {
    /// Creates an empty queue holding at most `capacity` items.
    pub fn new(capacity: usize) -> Result<Self, QueueError> {
        if capacity == 0 {
            return Err(QueueError::InvalidCapacity(capacity));
        }
        Ok(Self {
            ring: Mutex::new(Ring::with_capacity(capacity)),
            slots: CachePadded::new(Semaphore::new(capacity)),
            items: CachePadded::new(Semaphore::new(0)),
            capacity,
        })
    }

    /// Inserts an item, blocking while the queue is full.
    ///
    /// Normal items join the back of the queue; urgent items join the end
    /// of the urgent run, ahead of every normal item already stored.
    pub fn enqueue(&self, item: Item<T>) {
        self.slots.acquire();
        {
            let mut ring = self.ring.lock();
            ring.insert(item);
        }
        self.items.release();
    }

    /// Inserts an item without blocking.
    ///
    /// Returns the item back to the caller if the queue was full.
    pub fn try_enqueue(&self, item: Item<T>) -> Result<(), Item<T>> {
        if !self.slots.try_acquire() {
            return Err(item);
        }
        {
            let mut ring = self.ring.lock();
            ring.insert(item);
        }
        self.items.release();
        Ok(())
    }

    /// Removes the oldest ready item, blocking while the queue is empty.
    pub fn dequeue(&self) -> Item<T> {
        self.items.acquire();
        let item = {
            let mut ring = self.ring.lock();
            ring.remove()
        };
        self.slots.release();
        item
    }

    /// Removes the oldest ready item without blocking.
    pub fn try_dequeue(&self) -> Option<Item<T>> {
        if !self.items.try_acquire() {
            return None;
        }
        let item = {
            let mut ring = self.ring.lock();
            ring.remove()
        };
        self.slots.release();
        Some(item)
    }

    /// Maximum number of items the queue can hold.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of items currently stored.
    pub fn len(&self) -> usize {
        self.ring.lock().len
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
